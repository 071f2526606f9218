//! Structured values exchanged with the guest function.

use std::{
    fmt::{self, Display, Formatter},
    net::IpAddr,
    sync::Arc,
};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use uuid::Uuid;

/// Value produced by the decoder and consumed by the encoder.
///
/// Decoding yields exactly one variant per type kind. Encoding is a little more
/// lenient: any integer variant may target any integer kind (subject to range
/// checks) and the float kinds also accept integers.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Boolean(bool),
    TinyInt(i8),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    /// Guest integer wider than any SQL integer kind; only ever encoded.
    WideInt(i128),
    Real(f32),
    Double(f64),
    /// Exact decimal literal, e.g. `-12.50`.
    Decimal(Arc<str>),
    /// `VARCHAR` and `JSON`.
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    Date(NaiveDate),
    Time(NaiveTime),
    TimeWithZone(NaiveTime, FixedOffset),
    Timestamp(NaiveDateTime),
    TimestampWithZone(DateTime<FixedOffset>),
    /// Total months.
    IntervalYearMonth(i32),
    IntervalDaySecond(TimeDelta),
    Uuid(Uuid),
    IpAddress(IpAddr),
    Row(Vec<Value>),
    Array(Vec<Value>),
    Map(Vec<(Value, Value)>),
}

impl Value {
    pub fn string(s: impl AsRef<str>) -> Self {
        Self::String(Arc::from(s.as_ref()))
    }

    pub fn decimal(literal: impl AsRef<str>) -> Self {
        Self::Decimal(Arc::from(literal.as_ref()))
    }

    pub fn bytes(b: impl AsRef<[u8]>) -> Self {
        Self::Bytes(Arc::from(b.as_ref()))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer payload widened to `i128`, for any of the integer variants.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::TinyInt(v) => Some((*v).into()),
            Value::SmallInt(v) => Some((*v).into()),
            Value::Integer(v) => Some((*v).into()),
            Value::BigInt(v) => Some((*v).into()),
            Value::WideInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Runtime type name reported in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::TinyInt(_) => "tinyint",
            Value::SmallInt(_) => "smallint",
            Value::Integer(_) => "integer",
            Value::BigInt(_) => "bigint",
            Value::WideInt(_) => "wide integer",
            Value::Real(_) => "real",
            Value::Double(_) => "double",
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::TimeWithZone(..) => "time with offset",
            Value::Timestamp(_) => "timestamp",
            Value::TimestampWithZone(_) => "timestamp with offset",
            Value::IntervalYearMonth(_) => "interval year to month",
            Value::IntervalDaySecond(_) => "interval day to second",
            Value::Uuid(_) => "uuid",
            Value::IpAddress(_) => "ip address",
            Value::Row(_) => "row",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

fn write_list<'a>(
    f: &mut Formatter<'_>,
    open: &str,
    items: impl Iterator<Item = &'a Value>,
    close: &str,
) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

/// SQL-flavoured literal rendering, used by logs and the CLI.
impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::TinyInt(v) => write!(f, "{v}"),
            Value::SmallInt(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::BigInt(v) => write!(f, "{v}"),
            Value::WideInt(v) => write!(f, "{v}"),
            Value::Real(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::Decimal(v) => f.write_str(v),
            Value::String(v) => write!(f, "'{}'", v.replace('\'', "''")),
            Value::Bytes(v) => {
                f.write_str("X'")?;
                for b in v.iter() {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
            Value::Date(v) => write!(f, "DATE '{v}'"),
            Value::Time(v) => write!(f, "TIME '{v}'"),
            Value::TimeWithZone(t, offset) => write!(f, "TIME '{t}{offset}'"),
            Value::Timestamp(v) => write!(f, "TIMESTAMP '{v}'"),
            Value::TimestampWithZone(v) => write!(f, "TIMESTAMP '{v}'"),
            Value::IntervalYearMonth(v) => write!(f, "INTERVAL '{v}' MONTH"),
            Value::IntervalDaySecond(v) => {
                write!(f, "INTERVAL '{}' SECOND", v.num_milliseconds() as f64 / 1000.0)
            }
            Value::Uuid(v) => write!(f, "UUID '{v}'"),
            Value::IpAddress(v) => write!(f, "IPADDRESS '{v}'"),
            Value::Row(fields) => write_list(f, "ROW(", fields.iter(), ")"),
            Value::Array(elements) => write_list(f, "ARRAY[", elements.iter(), "]"),
            Value::Map(entries) => {
                write_list(f, "MAP(ARRAY[", entries.iter().map(|(k, _)| k), "], ")?;
                write_list(f, "ARRAY[", entries.iter().map(|(_, v)| v), "])")
            }
        }
    }
}
