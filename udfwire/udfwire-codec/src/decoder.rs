//! Wire data to [`Value`] decoding, driven by a type descriptor.

use std::{
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    sync::Arc,
};

use tracing::trace;
use udfwire_core::{TypeKind, Value, fatal};
use uuid::Uuid;

use crate::{
    cursor::{DataCursor, TypeCursor},
    temporal,
};

/// Decode the argument row described by `argument_type` into call arguments.
///
/// An absent row yields no arguments. A non-row descriptor is a protocol violation.
pub fn decode_arguments(argument_type: &[u8], data: &[u8]) -> Vec<Value> {
    let mut ty = TypeCursor::new(argument_type);
    let mut probe = ty;
    if probe.read_kind() != TypeKind::Row {
        fatal("argument type descriptor is not a ROW");
    }
    let mut data = DataCursor::new(data);
    match decode_value(&mut data, &mut ty) {
        Value::Row(fields) => fields,
        Value::Null => Vec::new(),
        other => unreachable!("ROW descriptor decoded as {}", other.type_name()),
    }
}

/// Decode one value, advancing `data` past its bytes and `ty` past its type node.
pub fn decode_value(data: &mut DataCursor<'_>, ty: &mut TypeCursor<'_>) -> Value {
    let present = data.read_i8() != 0;
    if !present {
        trace!("decode: present=false");
        ty.skip();
        return Value::Null;
    }

    let kind = ty.read_kind();
    trace!(%kind, offset = data.position(), "decode");

    match kind {
        TypeKind::Row => {
            let count = ty.read_field_count();
            let mut fields = Vec::with_capacity(count);
            for _ in 0..count {
                fields.push(decode_value(data, ty));
            }
            Value::Row(fields)
        }
        TypeKind::Array => {
            let element_type = *ty;
            let count = data.read_len();
            trace!(count, "decode: array elements");
            let mut elements = Vec::with_capacity(count.min(data.remaining()));
            for _ in 0..count {
                *ty = element_type;
                elements.push(decode_value(data, ty));
            }
            if count == 0 {
                ty.skip();
            }
            Value::Array(elements)
        }
        TypeKind::Map => {
            let entry_type = *ty;
            let count = data.read_len();
            trace!(count, "decode: map entries");
            let mut entries = Vec::with_capacity(count.min(data.remaining()));
            for _ in 0..count {
                *ty = entry_type;
                let key = decode_value(data, ty);
                let value = decode_value(data, ty);
                entries.push((key, value));
            }
            if count == 0 {
                ty.skip();
                ty.skip();
            }
            Value::Map(entries)
        }
        TypeKind::Boolean => Value::Boolean(data.read_i8() != 0),
        TypeKind::BigInt => Value::BigInt(data.read_i64()),
        TypeKind::Integer => Value::Integer(data.read_i32()),
        TypeKind::SmallInt => Value::SmallInt(data.read_i16()),
        TypeKind::TinyInt => Value::TinyInt(data.read_i8()),
        TypeKind::Double => Value::Double(data.read_f64()),
        TypeKind::Real => Value::Real(data.read_f32()),
        TypeKind::Decimal => Value::Decimal(decode_text(data, kind)),
        TypeKind::Varchar | TypeKind::Json => Value::String(decode_text(data, kind)),
        TypeKind::Varbinary => Value::Bytes(Arc::from(data.read_prefixed())),
        TypeKind::Date => Value::Date(temporal::date_from_days(data.read_i32())),
        TypeKind::Time => Value::Time(temporal::time_from_micros(data.read_i64())),
        TypeKind::TimeWithZone => {
            let time = temporal::time_from_micros(data.read_i64());
            let offset = temporal::offset_from_minutes(data.read_i16());
            Value::TimeWithZone(time, offset)
        }
        TypeKind::Timestamp => Value::Timestamp(temporal::timestamp_from_micros(data.read_i64())),
        TypeKind::TimestampWithZone => {
            let utc = data.read_i64();
            let offset = data.read_i16();
            Value::TimestampWithZone(temporal::zoned_timestamp(utc, offset))
        }
        TypeKind::IntervalYearMonth => Value::IntervalYearMonth(data.read_i32()),
        TypeKind::IntervalDaySecond => {
            Value::IntervalDaySecond(temporal::interval_from_millis(data.read_i64()))
        }
        TypeKind::Uuid => Value::Uuid(Uuid::from_bytes(data.read_array())),
        TypeKind::IpAddress => Value::IpAddress(ip_from_wire(data.read_array())),
    }
}

fn decode_text(data: &mut DataCursor<'_>, kind: TypeKind) -> Arc<str> {
    let at = data.position();
    let bytes = data.read_prefixed();
    match std::str::from_utf8(bytes) {
        Ok(text) => Arc::from(text),
        Err(e) => fatal(format_args!("invalid UTF-8 in {kind} value at offset {at}: {e}")),
    }
}

/// Only the v4-mapped prefix (80 zero bits, 16 one bits) yields an IPv4 address.
fn ip_from_wire(octets: [u8; 16]) -> IpAddr {
    match octets {
        [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, a, b, c, d] => {
            IpAddr::V4(Ipv4Addr::new(a, b, c, d))
        }
        _ => IpAddr::V6(Ipv6Addr::from(octets)),
    }
}
