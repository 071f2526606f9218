use std::fmt::{self, Display, Formatter};

use crate::{
    error::{DescriptorError, UnknownTypeTag, fatal},
    kind::TypeKind,
};

/// Owned type tree, the parsed form of a type descriptor.
///
/// Variant names mirror [`TypeKind`]. The codec itself walks the raw descriptor;
/// this tree is for building descriptors, validating them once at setup and
/// rendering signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrinoType {
    Row(Vec<TrinoType>),
    Array(Box<TrinoType>),
    Map {
        key: Box<TrinoType>,
        value: Box<TrinoType>,
    },
    Boolean,
    BigInt,
    Integer,
    SmallInt,
    TinyInt,
    Double,
    Real,
    Decimal,
    Varchar,
    Varbinary,
    Date,
    Time,
    TimeWithZone,
    Timestamp,
    TimestampWithZone,
    IntervalYearMonth,
    IntervalDaySecond,
    Json,
    Uuid,
    IpAddress,
}

impl TrinoType {
    pub fn row(fields: impl IntoIterator<Item = TrinoType>) -> Self {
        Self::Row(fields.into_iter().collect())
    }

    pub fn array(element: TrinoType) -> Self {
        Self::Array(Box::new(element))
    }

    pub fn map(key: TrinoType, value: TrinoType) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Scalar type for `kind`, or `None` for the composite kinds.
    pub fn scalar(kind: TypeKind) -> Option<Self> {
        Some(match kind {
            TypeKind::Row | TypeKind::Array | TypeKind::Map => return None,
            TypeKind::Boolean => Self::Boolean,
            TypeKind::BigInt => Self::BigInt,
            TypeKind::Integer => Self::Integer,
            TypeKind::SmallInt => Self::SmallInt,
            TypeKind::TinyInt => Self::TinyInt,
            TypeKind::Double => Self::Double,
            TypeKind::Real => Self::Real,
            TypeKind::Decimal => Self::Decimal,
            TypeKind::Varchar => Self::Varchar,
            TypeKind::Varbinary => Self::Varbinary,
            TypeKind::Date => Self::Date,
            TypeKind::Time => Self::Time,
            TypeKind::TimeWithZone => Self::TimeWithZone,
            TypeKind::Timestamp => Self::Timestamp,
            TypeKind::TimestampWithZone => Self::TimestampWithZone,
            TypeKind::IntervalYearMonth => Self::IntervalYearMonth,
            TypeKind::IntervalDaySecond => Self::IntervalDaySecond,
            TypeKind::Json => Self::Json,
            TypeKind::Uuid => Self::Uuid,
            TypeKind::IpAddress => Self::IpAddress,
        })
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Self::Row(_) => TypeKind::Row,
            Self::Array(_) => TypeKind::Array,
            Self::Map { .. } => TypeKind::Map,
            Self::Boolean => TypeKind::Boolean,
            Self::BigInt => TypeKind::BigInt,
            Self::Integer => TypeKind::Integer,
            Self::SmallInt => TypeKind::SmallInt,
            Self::TinyInt => TypeKind::TinyInt,
            Self::Double => TypeKind::Double,
            Self::Real => TypeKind::Real,
            Self::Decimal => TypeKind::Decimal,
            Self::Varchar => TypeKind::Varchar,
            Self::Varbinary => TypeKind::Varbinary,
            Self::Date => TypeKind::Date,
            Self::Time => TypeKind::Time,
            Self::TimeWithZone => TypeKind::TimeWithZone,
            Self::Timestamp => TypeKind::Timestamp,
            Self::TimestampWithZone => TypeKind::TimestampWithZone,
            Self::IntervalYearMonth => TypeKind::IntervalYearMonth,
            Self::IntervalDaySecond => TypeKind::IntervalDaySecond,
            Self::Json => TypeKind::Json,
            Self::Uuid => TypeKind::Uuid,
            Self::IpAddress => TypeKind::IpAddress,
        }
    }

    /// Serialize as a pre-order descriptor.
    pub fn to_descriptor(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_descriptor(&mut out);
        out
    }

    pub fn write_descriptor(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.kind().tag().to_le_bytes());
        match self {
            Self::Row(fields) => {
                let count = i32::try_from(fields.len())
                    .unwrap_or_else(|_| fatal(format_args!("row has {} fields", fields.len())));
                out.extend_from_slice(&count.to_le_bytes());
                for field in fields {
                    field.write_descriptor(out);
                }
            }
            Self::Array(element) => element.write_descriptor(out),
            Self::Map { key, value } => {
                key.write_descriptor(out);
                value.write_descriptor(out);
            }
            _ => {}
        }
    }

    /// Parse a complete descriptor. Trailing bytes are rejected.
    pub fn parse(descriptor: &[u8]) -> Result<Self, DescriptorError> {
        let mut offset = 0;
        let ty = parse_node(descriptor, &mut offset)?;
        if offset != descriptor.len() {
            return Err(DescriptorError::TrailingBytes {
                remaining: descriptor.len() - offset,
            });
        }
        Ok(ty)
    }
}

fn read_i32(descriptor: &[u8], offset: &mut usize) -> Result<i32, DescriptorError> {
    let bytes = descriptor
        .get(*offset..*offset + 4)
        .ok_or(DescriptorError::Truncated { offset: *offset })?;
    *offset += 4;
    Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn parse_node(descriptor: &[u8], offset: &mut usize) -> Result<TrinoType, DescriptorError> {
    let at = *offset;
    let tag = read_i32(descriptor, offset)?;
    let kind = TypeKind::try_from(tag).map_err(|source: UnknownTypeTag| {
        DescriptorError::UnknownTag { offset: at, source }
    })?;

    Ok(match kind {
        TypeKind::Row => {
            let count_at = *offset;
            let count = read_i32(descriptor, offset)?;
            if count < 0 {
                return Err(DescriptorError::NegativeFieldCount {
                    offset: count_at,
                    count,
                });
            }
            let mut fields = Vec::new();
            for _ in 0..count {
                fields.push(parse_node(descriptor, offset)?);
            }
            TrinoType::Row(fields)
        }
        TypeKind::Array => TrinoType::array(parse_node(descriptor, offset)?),
        TypeKind::Map => {
            let key = parse_node(descriptor, offset)?;
            let value = parse_node(descriptor, offset)?;
            TrinoType::map(key, value)
        }
        scalar => match TrinoType::scalar(scalar) {
            Some(ty) => ty,
            None => unreachable!("{scalar} is not a scalar type"),
        },
    })
}

/// Renders the SQL signature, e.g. `row(integer, array(map(varchar, integer)))`.
impl Display for TrinoType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(fields) => {
                f.write_str("row(")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
            Self::Array(element) => write!(f, "array({element})"),
            Self::Map { key, value } => write!(f, "map({key}, {value})"),
            scalar => f.write_str(&scalar.kind().as_str().to_ascii_lowercase()),
        }
    }
}
