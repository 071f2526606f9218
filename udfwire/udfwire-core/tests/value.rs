use std::net::{IpAddr, Ipv4Addr};

use chrono::{NaiveDate, TimeDelta};
use udfwire_core::Value;

#[test]
fn value_string_creates_arc_str_value() {
    match Value::string("hello") {
        Value::String(s) => assert_eq!(&*s, "hello"),
        other => panic!("unexpected value variant: {other:?}"),
    }
}

#[test]
fn as_integer_widens_every_integer_variant() {
    assert_eq!(Value::TinyInt(-1).as_integer(), Some(-1));
    assert_eq!(Value::SmallInt(300).as_integer(), Some(300));
    assert_eq!(Value::Integer(i32::MIN).as_integer(), Some(i32::MIN.into()));
    assert_eq!(Value::BigInt(i64::MAX).as_integer(), Some(i64::MAX.into()));
    assert_eq!(Value::WideInt(i128::MAX).as_integer(), Some(i128::MAX));
    assert_eq!(Value::Double(1.0).as_integer(), None);
    assert_eq!(Value::IntervalYearMonth(3).as_integer(), None);
    assert_eq!(Value::Null.as_integer(), None);
}

#[test]
fn type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::string("").type_name(), "string");
    assert_eq!(Value::bytes(b"").type_name(), "bytes");
    assert_eq!(Value::WideInt(0).type_name(), "wide integer");
    assert_eq!(Value::Map(vec![]).type_name(), "map");
    assert!(Value::Null.is_null());
    assert!(!Value::Row(vec![]).is_null());
}

#[test]
fn display_renders_sql_literals() {
    assert_eq!(Value::Null.to_string(), "NULL");
    assert_eq!(Value::string("it's").to_string(), "'it''s'");
    assert_eq!(Value::bytes([0u8, 0xff]).to_string(), "X'00ff'");
    assert_eq!(Value::decimal("-1.50").to_string(), "-1.50");
    assert_eq!(
        Value::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()).to_string(),
        "DATE '2024-01-02'"
    );
    assert_eq!(
        Value::IntervalDaySecond(TimeDelta::milliseconds(1_500)).to_string(),
        "INTERVAL '1.5' SECOND"
    );
    assert_eq!(
        Value::IpAddress(IpAddr::V4(Ipv4Addr::LOCALHOST)).to_string(),
        "IPADDRESS '127.0.0.1'"
    );
}

#[test]
fn display_renders_composites() {
    let value = Value::Row(vec![
        Value::Integer(1),
        Value::Array(vec![Value::string("a"), Value::Null]),
        Value::Map(vec![
            (Value::string("k1"), Value::BigInt(10)),
            (Value::string("k2"), Value::BigInt(20)),
        ]),
    ]);
    assert_eq!(
        value.to_string(),
        "ROW(1, ARRAY['a', NULL], MAP(ARRAY['k1', 'k2'], ARRAY[10, 20]))"
    );
}
