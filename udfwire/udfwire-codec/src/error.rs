//! Error types for the encode path.

use udfwire_core::{ErrorCode, TypeKind, Value};

/// Recoverable failure while encoding a returned value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// The value's variant cannot represent the expected type.
    #[error("expected a value of type {expected}, found '{actual}'")]
    TypeMismatch {
        expected: TypeKind,
        actual: &'static str,
    },

    /// A row value whose field count differs from the declared one.
    #[error("row has {actual} fields, expected {expected} fields")]
    ArityMismatch { expected: usize, actual: usize },

    /// Numeric narrowing overflowed the target type.
    #[error("Value out of range for {kind}")]
    OutOfRange { kind: TypeKind },

    /// A zone-bearing type received a value without an offset.
    #[error("{actual} value does not have a time zone offset")]
    MissingTimeZone {
        kind: TypeKind,
        actual: &'static str,
    },

    /// The variant matches but its payload cannot be encoded.
    #[error("{detail}")]
    InvalidValue {
        kind: TypeKind,
        actual: &'static str,
        detail: String,
    },
}

impl EncodeError {
    pub fn type_mismatch(expected: TypeKind, value: &Value) -> Self {
        Self::TypeMismatch {
            expected,
            actual: value.type_name(),
        }
    }

    pub fn invalid_value(kind: TypeKind, value: &Value, detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            kind,
            actual: value.type_name(),
            detail: detail.into(),
        }
    }

    /// Trino type the failing value was being encoded as.
    pub fn kind(&self) -> TypeKind {
        match self {
            Self::TypeMismatch { expected, .. } => *expected,
            Self::ArityMismatch { .. } => TypeKind::Row,
            Self::OutOfRange { kind }
            | Self::MissingTimeZone { kind, .. }
            | Self::InvalidValue { kind, .. } => *kind,
        }
    }

    /// Runtime type name of the failing value, if it was inspected.
    pub fn actual_type(&self) -> Option<&'static str> {
        match self {
            Self::TypeMismatch { actual, .. }
            | Self::MissingTimeZone { actual, .. }
            | Self::InvalidValue { actual, .. } => Some(*actual),
            Self::ArityMismatch { .. } => Some("row"),
            Self::OutOfRange { .. } => None,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::OutOfRange { .. } => ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE,
            _ => ErrorCode::FUNCTION_IMPLEMENTATION_ERROR,
        }
    }
}
