use std::fmt;

/// Trino error code carried in an error result.
///
/// Guest code may raise any code; the named constants are the ones the host
/// produces itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const INVALID_FUNCTION_ARGUMENT: Self = Self(7);
    pub const DIVISION_BY_ZERO: Self = Self(8);
    pub const INVALID_CAST_ARGUMENT: Self = Self(9);
    pub const NOT_SUPPORTED: Self = Self(13);
    pub const NUMERIC_VALUE_OUT_OF_RANGE: Self = Self(19);
    pub const EXCEEDED_FUNCTION_MEMORY_LIMIT: Self = Self(37);
    pub const FUNCTION_IMPLEMENTATION_ERROR: Self = Self(65549);

    pub fn code(&self) -> i32 {
        self.0
    }

    pub fn name(&self) -> Option<&'static str> {
        Some(match *self {
            Self::INVALID_FUNCTION_ARGUMENT => "INVALID_FUNCTION_ARGUMENT",
            Self::DIVISION_BY_ZERO => "DIVISION_BY_ZERO",
            Self::INVALID_CAST_ARGUMENT => "INVALID_CAST_ARGUMENT",
            Self::NOT_SUPPORTED => "NOT_SUPPORTED",
            Self::NUMERIC_VALUE_OUT_OF_RANGE => "NUMERIC_VALUE_OUT_OF_RANGE",
            Self::EXCEEDED_FUNCTION_MEMORY_LIMIT => "EXCEEDED_FUNCTION_MEMORY_LIMIT",
            Self::FUNCTION_IMPLEMENTATION_ERROR => "FUNCTION_IMPLEMENTATION_ERROR",
            _ => return None,
        })
    }
}

impl From<i32> for ErrorCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}
