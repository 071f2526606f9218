//! The error outcome of an invocation.

use bytes::{BufMut, Bytes, BytesMut};
use udfwire_core::{ErrorCode, fatal};

/// `(code, message, trace)` reported to the engine in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ErrorResult {
    pub code: ErrorCode,
    pub message: String,
    pub trace: Option<String>,
}

impl ErrorResult {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace: None,
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }

    /// Serialize as code, length-prefixed message, then a presence byte and the
    /// length-prefixed trace when there is one. Little-endian throughout.
    pub fn to_bytes(&self) -> Bytes {
        let trace_len = self.trace.as_ref().map_or(0, |t| 4 + t.len());
        let mut out = BytesMut::with_capacity(4 + 4 + self.message.len() + 1 + trace_len);
        out.put_i32_le(self.code.code());
        put_text(&mut out, &self.message);
        match &self.trace {
            Some(trace) => {
                out.put_u8(1);
                put_text(&mut out, trace);
            }
            None => out.put_u8(0),
        }
        out.freeze()
    }
}

fn put_text(out: &mut BytesMut, text: &str) {
    let len = i32::try_from(text.len())
        .unwrap_or_else(|_| fatal(format_args!("error text of {} bytes", text.len())));
    out.put_i32_le(len);
    out.put_slice(text.as_bytes());
}
