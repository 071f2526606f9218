//! Read cursors over a type descriptor and a data buffer.
//!
//! Both cursors are a borrowed buffer plus an index. [`TypeCursor`] is `Copy` so
//! array and map traversal can save a position and rewind to it per element.
//! Any read past the end, unknown kind tag or negative count is a protocol
//! violation and terminates via [`fatal`].

use bytes::Buf;
use tracing::trace;
use udfwire_core::{TypeKind, fatal};

#[derive(Debug, Clone, Copy)]
pub struct TypeCursor<'a> {
    descriptor: &'a [u8],
    pos: usize,
}

impl<'a> TypeCursor<'a> {
    pub fn new(descriptor: &'a [u8]) -> Self {
        Self { descriptor, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.descriptor.len()
    }

    fn read_i32(&mut self) -> i32 {
        let mut rest = self.descriptor.get(self.pos..).unwrap_or_default();
        let value = rest.try_get_i32_le().unwrap_or_else(|_| {
            fatal(format_args!(
                "type descriptor truncated at offset {}",
                self.pos
            ))
        });
        self.pos += 4;
        value
    }

    /// Read the kind tag of the node at the cursor.
    pub fn read_kind(&mut self) -> TypeKind {
        let at = self.pos;
        let tag = self.read_i32();
        TypeKind::try_from(tag)
            .unwrap_or_else(|e| fatal(format_args!("{e} at type descriptor offset {at}")))
    }

    /// Read the field count following a `ROW` tag.
    pub fn read_field_count(&mut self) -> usize {
        let count = self.read_i32();
        usize::try_from(count)
            .unwrap_or_else(|_| fatal(format_args!("negative row field count {count}")))
    }

    /// Advance past the whole subtree at the cursor.
    pub fn skip(&mut self) {
        let kind = self.read_kind();
        trace!(%kind, "skip type");
        match kind {
            TypeKind::Row => {
                for _ in 0..self.read_field_count() {
                    self.skip();
                }
            }
            TypeKind::Array => self.skip(),
            TypeKind::Map => {
                self.skip();
                self.skip();
            }
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DataCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! read_fixed {
    ($name:ident, $ty:ty, $get:ident) => {
        pub fn $name(&mut self) -> $ty {
            let mut rest = self.rest();
            let value = rest.$get().unwrap_or_else(|_| self.eof(size_of::<$ty>()));
            self.pos += size_of::<$ty>();
            value
        }
    };
}

impl<'a> DataCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn rest(&self) -> &'a [u8] {
        self.data.get(self.pos..).unwrap_or_default()
    }

    fn eof(&self, wanted: usize) -> ! {
        fatal(format_args!(
            "unexpected end of data at offset {}: wanted {wanted} bytes, {} remaining",
            self.pos,
            self.remaining()
        ))
    }

    read_fixed!(read_i8, i8, try_get_i8);
    read_fixed!(read_i16, i16, try_get_i16_le);
    read_fixed!(read_i32, i32, try_get_i32_le);
    read_fixed!(read_i64, i64, try_get_i64_le);
    read_fixed!(read_f32, f32, try_get_f32_le);
    read_fixed!(read_f64, f64, try_get_f64_le);

    /// Read a 4-byte length or count.
    pub fn read_len(&mut self) -> usize {
        let at = self.pos;
        let len = self.read_i32();
        usize::try_from(len)
            .unwrap_or_else(|_| fatal(format_args!("negative length {len} at offset {at}")))
    }

    pub fn read_bytes(&mut self, n: usize) -> &'a [u8] {
        let rest = self.rest();
        if rest.len() < n {
            self.eof(n);
        }
        self.pos += n;
        &rest[..n]
    }

    pub fn read_array<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(self.read_bytes(N));
        out
    }

    /// Read a length-prefixed byte run.
    pub fn read_prefixed(&mut self) -> &'a [u8] {
        let len = self.read_len();
        self.read_bytes(len)
    }
}
