//! [`Value`] to wire data encoding, driven by a type descriptor.

use std::net::IpAddr;

use bytes::Bytes;
use tracing::trace;
use udfwire_core::{TypeKind, Value};

use crate::{
    buffer::{DEFAULT_INITIAL_CAPACITY, OutputBuffer},
    cursor::TypeCursor,
    error::EncodeError,
    narrow::checked_narrow,
    temporal,
};

/// Encode a returned value against `return_type`.
///
/// On success the bytes start with the 4-byte payload length.
pub fn encode_result(value: &Value, return_type: &[u8]) -> Result<Bytes, EncodeError> {
    encode_result_with_capacity(value, return_type, DEFAULT_INITIAL_CAPACITY)
}

pub fn encode_result_with_capacity(
    value: &Value,
    return_type: &[u8],
    initial_capacity: usize,
) -> Result<Bytes, EncodeError> {
    let mut out = OutputBuffer::with_capacity(initial_capacity);
    let mut ty = TypeCursor::new(return_type);
    encode_value(value, &mut ty, &mut out)?;
    Ok(out.finish())
}

/// Encode one value, advancing `ty` past its type node.
///
/// After an error the cursor and buffer are left mid-value and must be discarded.
pub fn encode_value(
    value: &Value,
    ty: &mut TypeCursor<'_>,
    out: &mut OutputBuffer,
) -> Result<(), EncodeError> {
    out.append_presence(!value.is_null());
    if value.is_null() {
        trace!("encode: present=false");
        ty.skip();
        return Ok(());
    }

    let kind = ty.read_kind();
    trace!(%kind, value = value.type_name(), "encode");

    match kind {
        TypeKind::Row => {
            let Value::Row(fields) = value else {
                return Err(EncodeError::type_mismatch(kind, value));
            };
            let count = ty.read_field_count();
            if fields.len() != count {
                return Err(EncodeError::ArityMismatch {
                    expected: count,
                    actual: fields.len(),
                });
            }
            for field in fields {
                encode_value(field, ty, out)?;
            }
        }
        TypeKind::Array => {
            let Value::Array(elements) = value else {
                return Err(EncodeError::type_mismatch(kind, value));
            };
            let element_type = *ty;
            out.append_i32(wire_len(elements.len(), kind, value)?);
            for element in elements {
                *ty = element_type;
                encode_value(element, ty, out)?;
            }
            if elements.is_empty() {
                ty.skip();
            }
        }
        TypeKind::Map => {
            let Value::Map(entries) = value else {
                return Err(EncodeError::type_mismatch(kind, value));
            };
            let entry_type = *ty;
            out.append_i32(wire_len(entries.len(), kind, value)?);
            for (key, entry) in entries {
                *ty = entry_type;
                encode_value(key, ty, out)?;
                encode_value(entry, ty, out)?;
            }
            if entries.is_empty() {
                ty.skip();
                ty.skip();
            }
        }
        TypeKind::Boolean => match value {
            Value::Boolean(v) => out.append_i8((*v).into()),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::BigInt => out.append_i64(checked_narrow(value, kind)?),
        TypeKind::Integer => out.append_i32(checked_narrow(value, kind)?),
        TypeKind::SmallInt => out.append_i16(checked_narrow(value, kind)?),
        TypeKind::TinyInt => out.append_i8(checked_narrow(value, kind)?),
        TypeKind::Double => out.append_f64(float_value(value, kind)?),
        TypeKind::Real => out.append_f32(float_value(value, kind)? as f32),
        TypeKind::Decimal => match value {
            Value::Decimal(literal) => {
                let plain = normalize_decimal_literal(literal).map_err(|detail| {
                    EncodeError::invalid_value(kind, value, detail)
                })?;
                append_prefixed(out, plain.as_bytes(), kind, value)?;
            }
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Varchar | TypeKind::Json => match value {
            Value::String(s) => append_prefixed(out, s.as_bytes(), kind, value)?,
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Varbinary => match value {
            Value::Bytes(b) => append_prefixed(out, b, kind, value)?,
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Date => match value {
            Value::Date(date) => out.append_i32(temporal::days_from_date(*date)),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Time => match value {
            Value::Time(time) | Value::TimeWithZone(time, _) => {
                out.append_i64(temporal::micros_from_time(*time));
            }
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::TimeWithZone => match value {
            Value::TimeWithZone(time, offset) => {
                out.append_i64(temporal::micros_from_time(*time));
                out.append_i16(temporal::minutes_from_offset(*offset));
            }
            Value::Time(_) => return Err(missing_time_zone(kind, value)),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Timestamp => match value {
            Value::Timestamp(ts) => out.append_i64(temporal::micros_from_timestamp(*ts)),
            Value::TimestampWithZone(ts) => {
                out.append_i64(temporal::micros_from_timestamp(ts.naive_local()));
            }
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::TimestampWithZone => match value {
            Value::TimestampWithZone(ts) => {
                let (utc, minutes) = temporal::zoned_parts(ts);
                out.append_i64(utc);
                out.append_i16(minutes);
            }
            Value::Timestamp(_) => return Err(missing_time_zone(kind, value)),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::IntervalYearMonth => match value {
            Value::IntervalYearMonth(months) => out.append_i32(*months),
            _ => out.append_i32(checked_narrow(value, kind)?),
        },
        TypeKind::IntervalDaySecond => match value {
            Value::IntervalDaySecond(interval) => {
                let millis = temporal::millis_from_interval(*interval)
                    .ok_or(EncodeError::OutOfRange { kind })?;
                out.append_i64(millis);
            }
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::Uuid => match value {
            Value::Uuid(uuid) => out.append(uuid.as_bytes()),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
        TypeKind::IpAddress => match value {
            Value::IpAddress(ip) => out.append(&ip_to_wire(*ip)),
            _ => return Err(EncodeError::type_mismatch(kind, value)),
        },
    }
    Ok(())
}

fn missing_time_zone(kind: TypeKind, value: &Value) -> EncodeError {
    EncodeError::MissingTimeZone {
        kind,
        actual: value.type_name(),
    }
}

fn wire_len(len: usize, kind: TypeKind, value: &Value) -> Result<i32, EncodeError> {
    i32::try_from(len).map_err(|_| {
        EncodeError::invalid_value(kind, value, format!("length {len} exceeds the wire limit"))
    })
}

fn append_prefixed(
    out: &mut OutputBuffer,
    bytes: &[u8],
    kind: TypeKind,
    value: &Value,
) -> Result<(), EncodeError> {
    out.append_i32(wire_len(bytes.len(), kind, value)?);
    out.append(bytes);
    Ok(())
}

fn float_value(value: &Value, kind: TypeKind) -> Result<f64, EncodeError> {
    match value {
        Value::Double(v) => Ok(*v),
        Value::Real(v) => Ok(f64::from(*v)),
        other => other
            .as_integer()
            .map(|v| v as f64)
            .ok_or_else(|| EncodeError::type_mismatch(kind, value)),
    }
}

const MAX_DECIMAL_EXPONENT: u64 = 1_000;

/// Rewrites a finite literal, exponent forms included, as plain `[-]digits[.digits]`.
///
/// Leading zeros go and the scale is kept, so `1.20E-3` becomes `0.00120`.
fn normalize_decimal_literal(literal: &str) -> Result<String, String> {
    let (negative, unsigned) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };
    let lowered = unsigned.to_ascii_lowercase();
    if matches!(lowered.as_str(), "nan" | "snan" | "inf" | "infinity") {
        return Err(format!("Decimal is not finite: {literal}"));
    }

    let not_decimal = || format!("Not a decimal literal: '{literal}'");
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => {
            (mantissa, exponent.parse::<i64>().map_err(|_| not_decimal())?)
        }
        None => (unsigned, 0),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits_only = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !digits_only(whole) || !digits_only(fraction) {
        return Err(not_decimal());
    }
    if exponent.unsigned_abs() > MAX_DECIMAL_EXPONENT {
        return Err(format!("Decimal exponent out of range: {literal}"));
    }

    let joined = format!("{whole}{fraction}");
    let coefficient = match joined.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let scale = exponent - fraction.len() as i64;

    let mut plain = String::with_capacity(coefficient.len() + 4);
    if negative {
        plain.push('-');
    }
    if scale >= 0 {
        plain.push_str(coefficient);
        if coefficient != "0" {
            plain.push_str(&"0".repeat(scale as usize));
        }
    } else {
        let point = coefficient.len() as i64 + scale;
        if point > 0 {
            let (int_part, frac_part) = coefficient.split_at(point as usize);
            plain.push_str(int_part);
            plain.push('.');
            plain.push_str(frac_part);
        } else {
            plain.push_str("0.");
            plain.push_str(&"0".repeat(point.unsigned_abs() as usize));
            plain.push_str(coefficient);
        }
    }
    Ok(plain)
}

/// IPv4 addresses are stored in their v4-mapped IPv6 form.
fn ip_to_wire(ip: IpAddr) -> [u8; 16] {
    match ip {
        IpAddr::V4(v4) => v4.to_ipv6_mapped().octets(),
        IpAddr::V6(v6) => v6.octets(),
    }
}
