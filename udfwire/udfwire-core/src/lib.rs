//! Shared vocabulary for the `udfwire` codec.
//!
//! This crate provides the type descriptor model ([`TypeKind`] / [`TrinoType`]),
//! the structured [`Value`] exchanged with guest functions, and the Trino
//! [`ErrorCode`]s surfaced to the engine.

mod error;
mod error_code;
mod kind;
mod trino_type;
mod value;

pub use error::{DescriptorError, UnknownTypeTag, fatal};
pub use error_code::ErrorCode;
pub use kind::TypeKind;
pub use trino_type::TrinoType;
pub use value::Value;
