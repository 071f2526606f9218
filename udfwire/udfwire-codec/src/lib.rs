//! Bidirectional codec between the Trino UDF wire format and [`udfwire_core::Value`].
//!
//! Key components:
//! - [`TypeCursor`] / [`DataCursor`]: lockstep cursors over a type descriptor and data
//! - [`decode_value`] / [`decode_arguments`]: wire data → structured values
//! - [`encode_value`] / [`encode_result`]: structured value → length-prefixed wire data
//! - [`OutputBuffer`]: doubling output buffer with a reserved length header

mod buffer;
mod cursor;
mod decoder;
mod encoder;
mod error;
mod narrow;
mod temporal;

pub use buffer::{DEFAULT_INITIAL_CAPACITY, HEADER_LEN, OutputBuffer};
pub use cursor::{DataCursor, TypeCursor};
pub use decoder::{decode_arguments, decode_value};
pub use encoder::{encode_result, encode_result_with_capacity, encode_value};
pub use error::EncodeError;
