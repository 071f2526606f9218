use udfwire_core::{TypeKind, Value};

use crate::error::EncodeError;

/// Narrow any integer variant of `value` into `T`, the wire type of `kind`.
///
/// Integers outside `T` and non-integer variants both fail with
/// [`EncodeError::OutOfRange`].
pub(crate) fn checked_narrow<T>(value: &Value, kind: TypeKind) -> Result<T, EncodeError>
where
    T: TryFrom<i128>,
{
    value
        .as_integer()
        .and_then(|wide| T::try_from(wide).ok())
        .ok_or(EncodeError::OutOfRange { kind })
}
