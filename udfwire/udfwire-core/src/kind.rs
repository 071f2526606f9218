use std::fmt;

use crate::error::UnknownTypeTag;

/// Node kinds of a type descriptor, tagged on the wire by a 4-byte integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// `ROW` (0): field count, then the field types
    Row,
    /// `ARRAY` (1): element type
    Array,
    /// `MAP` (2): key type, then value type
    Map,
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

impl TypeKind {
    pub const ALL: [TypeKind; 23] = [
        Self::Row,
        Self::Array,
        Self::Map,
        Self::Boolean,
        Self::BigInt,
        Self::Integer,
        Self::SmallInt,
        Self::TinyInt,
        Self::Double,
        Self::Real,
        Self::Decimal,
        Self::Varchar,
        Self::Varbinary,
        Self::Date,
        Self::Time,
        Self::TimeWithZone,
        Self::Timestamp,
        Self::TimestampWithZone,
        Self::IntervalYearMonth,
        Self::IntervalDaySecond,
        Self::Json,
        Self::Uuid,
        Self::IpAddress,
    ];

    /// Wire tag of this kind.
    pub const fn tag(self) -> i32 {
        match self {
            Self::Row => 0,
            Self::Array => 1,
            Self::Map => 2,
            Self::Boolean => 3,
            Self::BigInt => 4,
            Self::Integer => 5,
            Self::SmallInt => 6,
            Self::TinyInt => 7,
            Self::Double => 8,
            Self::Real => 9,
            Self::Decimal => 10,
            Self::Varchar => 11,
            Self::Varbinary => 12,
            Self::Date => 13,
            Self::Time => 14,
            Self::TimeWithZone => 15,
            Self::Timestamp => 16,
            Self::TimestampWithZone => 17,
            Self::IntervalYearMonth => 18,
            Self::IntervalDaySecond => 19,
            Self::Json => 20,
            Self::Uuid => 21,
            Self::IpAddress => 22,
        }
    }

    pub fn from_tag(tag: i32) -> Option<Self> {
        usize::try_from(tag)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }

    /// Trino SQL name, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "ROW",
            Self::Array => "ARRAY",
            Self::Map => "MAP",
            Self::Boolean => "BOOLEAN",
            Self::BigInt => "BIGINT",
            Self::Integer => "INTEGER",
            Self::SmallInt => "SMALLINT",
            Self::TinyInt => "TINYINT",
            Self::Double => "DOUBLE",
            Self::Real => "REAL",
            Self::Decimal => "DECIMAL",
            Self::Varchar => "VARCHAR",
            Self::Varbinary => "VARBINARY",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::TimeWithZone => "TIME WITH TIME ZONE",
            Self::Timestamp => "TIMESTAMP",
            Self::TimestampWithZone => "TIMESTAMP WITH TIME ZONE",
            Self::IntervalYearMonth => "INTERVAL YEAR TO MONTH",
            Self::IntervalDaySecond => "INTERVAL DAY TO SECOND",
            Self::Json => "JSON",
            Self::Uuid => "UUID",
            Self::IpAddress => "IPADDRESS",
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Row | Self::Array | Self::Map)
    }
}

impl TryFrom<i32> for TypeKind {
    type Error = UnknownTypeTag;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        Self::from_tag(tag).ok_or(UnknownTypeTag(tag))
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
