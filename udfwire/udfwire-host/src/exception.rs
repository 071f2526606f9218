//! Failures raised by the guest function.

use std::fmt::{self, Display, Formatter};

use udfwire_core::ErrorCode;

use crate::error_result::ErrorResult;

/// What the guest raised, as far as error classification is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionKind {
    DivisionByZero,
    /// A Trino error carrying its own code.
    Trino(ErrorCode),
    /// The guest ran out of memory.
    MemoryError,
    /// Any other failure, named by the guest's own exception type.
    Other(String),
}

impl Display for ExceptionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => f.write_str("DivisionByZero"),
            Self::Trino(_) => f.write_str("TrinoError"),
            Self::MemoryError => f.write_str("MemoryError"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Exception returned by [`GuestFunction::call`](crate::GuestFunction::call).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestException {
    pub kind: ExceptionKind,
    pub message: String,
    pub traceback: Option<String>,
}

impl GuestException {
    pub fn new(kind: ExceptionKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            traceback: None,
        }
    }

    pub fn division_by_zero(message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::DivisionByZero, message)
    }

    pub fn trino(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Trino(code), message)
    }

    pub fn invalid_function_argument(message: impl Into<String>) -> Self {
        Self::trino(ErrorCode::INVALID_FUNCTION_ARGUMENT, message)
    }

    pub fn numeric_value_out_of_range(message: impl Into<String>) -> Self {
        Self::trino(ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE, message)
    }

    pub fn memory_error() -> Self {
        Self::new(ExceptionKind::MemoryError, "")
    }

    pub fn other(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ExceptionKind::Other(type_name.into()), message)
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = Some(traceback.into());
        self
    }

    /// Standard classification into an error result.
    ///
    /// The traceback, if any, becomes the trace.
    pub fn to_error_result(&self) -> ErrorResult {
        let (code, message) = match &self.kind {
            ExceptionKind::DivisionByZero => (ErrorCode::DIVISION_BY_ZERO, self.message.clone()),
            ExceptionKind::Trino(code) => (*code, self.message.clone()),
            ExceptionKind::MemoryError => {
                (ErrorCode::EXCEEDED_FUNCTION_MEMORY_LIMIT, "MemoryError".to_string())
            }
            ExceptionKind::Other(_) => (ErrorCode::FUNCTION_IMPLEMENTATION_ERROR, self.to_string()),
        };
        ErrorResult {
            code,
            message,
            trace: self.traceback.clone(),
        }
    }
}

/// `<kind>: <message>`, or just the kind when the message is empty.
impl Display for GuestException {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for GuestException {}
