//! Growable output buffer for the encode path.

use bytes::{BufMut, Bytes};
use udfwire_core::fatal;

pub const DEFAULT_INITIAL_CAPACITY: usize = 1024;

/// Bytes reserved at the front for the payload length.
pub const HEADER_LEN: usize = 4;

/// Append-only buffer with a reserved length header.
///
/// Capacity doubles until it covers each append. [`OutputBuffer::finish`] writes
/// the payload length into the header and hands the bytes to the caller.
#[derive(Debug)]
pub struct OutputBuffer {
    data: Vec<u8>,
    capacity: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Capacity below the header size is raised to it.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        let capacity = initial_capacity.max(HEADER_LEN);
        let mut data = Vec::with_capacity(capacity);
        data.resize(HEADER_LEN, 0);
        Self { data, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes used, header included.
    pub fn used(&self) -> usize {
        self.data.len()
    }

    /// True while nothing has been appended after the header.
    pub fn is_empty(&self) -> bool {
        self.payload_len() == 0
    }

    pub fn payload_len(&self) -> usize {
        self.data.len() - HEADER_LEN
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[HEADER_LEN..]
    }

    pub fn reserve(&mut self, required: usize) {
        if self.capacity >= required {
            return;
        }
        let mut capacity = self.capacity;
        while capacity < required {
            capacity = capacity
                .checked_mul(2)
                .unwrap_or_else(|| fatal(format_args!("failed to allocate {required} bytes")));
        }
        self.data.reserve_exact(capacity - self.data.len());
        self.capacity = capacity;
    }

    pub fn append(&mut self, bytes: &[u8]) {
        self.reserve(self.data.len() + bytes.len());
        self.data.put_slice(bytes);
    }

    pub fn append_presence(&mut self, present: bool) {
        self.append_i8(present.into());
    }

    pub fn append_i8(&mut self, value: i8) {
        self.append(&value.to_le_bytes());
    }

    pub fn append_i16(&mut self, value: i16) {
        self.append(&value.to_le_bytes());
    }

    pub fn append_i32(&mut self, value: i32) {
        self.append(&value.to_le_bytes());
    }

    pub fn append_i64(&mut self, value: i64) {
        self.append(&value.to_le_bytes());
    }

    pub fn append_f32(&mut self, value: f32) {
        self.append(&value.to_le_bytes());
    }

    pub fn append_f64(&mut self, value: f64) {
        self.append(&value.to_le_bytes());
    }

    /// Write the payload length into the header and release the bytes.
    pub fn finish(mut self) -> Bytes {
        let payload_len = i32::try_from(self.payload_len()).unwrap_or_else(|_| {
            fatal(format_args!(
                "encoded payload of {} bytes exceeds the wire limit",
                self.payload_len()
            ))
        });
        (&mut self.data[..HEADER_LEN]).put_i32_le(payload_len);
        Bytes::from(self.data)
    }
}
