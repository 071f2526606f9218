//! Mapping of invocation failures to [`ErrorResult`]s.

use tracing::debug;
use udfwire_codec::EncodeError;
use udfwire_core::{ErrorCode, fatal};

use crate::{
    error::FormatError, error_result::ErrorResult, exception::GuestException,
    guest::GuestFunction,
};

/// A returned value that could not be encoded.
///
/// Range failures keep their literal message; everything else names the value's
/// type and the Trino type it was converted to.
pub fn encode_failure(error: &EncodeError) -> ErrorResult {
    let code = error.error_code();
    match error.actual_type() {
        Some(actual) if code != ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE => ErrorResult::new(
            code,
            format!(
                "Failed to convert result type '{actual}' to Trino type {}: {error}",
                error.kind()
            ),
        ),
        _ => ErrorResult::new(code, error.to_string()),
    }
}

/// An exception raised by the guest, formatted by the guest itself.
pub fn guest_failure<G>(guest: &G, exception: &GuestException) -> ErrorResult
where
    G: GuestFunction + ?Sized,
{
    match guest.format_exception(exception) {
        Ok(result) => result,
        Err(FormatError::OutOfMemory) => {
            debug!("formatting guest exception ran out of memory");
            ErrorResult::new(
                ErrorCode::EXCEEDED_FUNCTION_MEMORY_LIMIT,
                "MemoryError (no traceback available)",
            )
        }
        Err(e) => fatal(format_args!("cannot convert guest exception to an error result: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use udfwire_core::TypeKind;

    use super::*;

    #[test]
    fn out_of_range_keeps_literal_message() {
        let result = encode_failure(&EncodeError::OutOfRange {
            kind: TypeKind::SmallInt,
        });
        assert_eq!(
            result,
            ErrorResult::new(
                ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE,
                "Value out of range for SMALLINT"
            )
        );
    }

    #[test]
    fn arity_mismatch_names_row() {
        let result = encode_failure(&EncodeError::ArityMismatch {
            expected: 2,
            actual: 1,
        });
        assert_eq!(result.code, ErrorCode::FUNCTION_IMPLEMENTATION_ERROR);
        assert_eq!(
            result.message,
            "Failed to convert result type 'row' to Trino type ROW: row has 1 fields, expected 2 fields"
        );
    }
}
