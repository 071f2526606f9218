use chrono::NaiveDate;
use udfwire_codec::encode_result;
use udfwire_core::{DescriptorError, ErrorCode, TrinoType, Value};
use udfwire_host::{
    ErrorResult, FnGuest, FormatError, GuestException, GuestFunction, HostConfig, HostError,
    UdfHost,
};

// ── helpers ──────────────────────────────────────────────────────────────────

/// Argument buffer for `values` under `args_type` (an encoded row without header).
fn argument_data(args_type: &TrinoType, values: Vec<Value>) -> Vec<u8> {
    let bytes = encode_result(&Value::Row(values), &args_type.to_descriptor())
        .expect("arguments should encode");
    bytes[4..].to_vec()
}

fn host_for<G: GuestFunction>(args: &TrinoType, returns: &TrinoType, guest: G) -> UdfHost<G> {
    UdfHost::builder()
        .argument_type(args.to_descriptor())
        .return_type(returns.to_descriptor())
        .build(guest)
        .expect("host should build")
}

/// Guest that always raises `exception`.
fn raising(exception: GuestException) -> impl GuestFunction {
    FnGuest::new("raise", move |_| Err(exception.clone()))
}

fn run_failing(guest: impl GuestFunction) -> ErrorResult {
    let args = TrinoType::row([]);
    let mut host = host_for(&args, &TrinoType::BigInt, guest);
    host.execute(&argument_data(&args, vec![]))
        .expect_err("invocation should fail")
}

/// Guest whose exception formatting itself fails.
struct BrokenFormatter(FormatError);

impl GuestFunction for BrokenFormatter {
    fn name(&self) -> &str {
        "broken"
    }

    fn call(&mut self, _args: Vec<Value>) -> Result<Value, GuestException> {
        Err(GuestException::other("RuntimeError", "boom"))
    }

    fn format_exception(&self, _exception: &GuestException) -> Result<ErrorResult, FormatError> {
        Err(self.0.clone())
    }
}

// ── setup ────────────────────────────────────────────────────────────────────

#[test]
fn build_requires_both_descriptors() {
    let guest = FnGuest::new("f", |_| Ok(Value::Null));
    let err = UdfHost::builder()
        .return_type(TrinoType::BigInt.to_descriptor())
        .build(guest)
        .err()
        .expect("build should fail");
    assert!(matches!(err, HostError::MissingDescriptor { role: "argument" }));
    assert_eq!(err.to_string(), "argument type descriptor not set");
}

#[test]
fn build_rejects_non_row_argument_type() {
    let guest = FnGuest::new("f", |_| Ok(Value::Null));
    let err = UdfHost::builder()
        .argument_type(TrinoType::BigInt.to_descriptor())
        .return_type(TrinoType::BigInt.to_descriptor())
        .build(guest)
        .err()
        .expect("build should fail");
    assert_eq!(err.to_string(), "argument type must be a row, found bigint");
}

#[test]
fn build_rejects_corrupt_descriptor() {
    let guest = FnGuest::new("f", |_| Ok(Value::Null));
    let err = UdfHost::builder()
        .argument_type(TrinoType::row([]).to_descriptor())
        .return_type(99i32.to_le_bytes().to_vec())
        .build(guest)
        .err()
        .expect("build should fail");
    assert!(matches!(
        err,
        HostError::InvalidDescriptor {
            role: "return",
            source: DescriptorError::UnknownTag { offset: 0, .. },
        }
    ));
}

#[test]
fn build_exposes_signatures_and_config() {
    let args = TrinoType::row([TrinoType::Varchar, TrinoType::array(TrinoType::Integer)]);
    let host = UdfHost::builder()
        .argument_type(args.to_descriptor())
        .return_type(TrinoType::Json.to_descriptor())
        .config(HostConfig { initial_capacity: 64 })
        .build(FnGuest::new("f", |_| Ok(Value::Null)))
        .unwrap();
    assert_eq!(host.argument_signature(), &args);
    assert_eq!(host.return_signature().to_string(), "json");
    assert_eq!(host.config().initial_capacity, 64);
    assert_eq!(host.guest().name(), "f");
}

// ── invocation ───────────────────────────────────────────────────────────────

#[test]
fn execute_returns_length_prefixed_result() {
    let args = TrinoType::row([TrinoType::Integer, TrinoType::Integer]);
    let guest = FnGuest::new("add", |args| match args.as_slice() {
        [Value::Integer(a), Value::Integer(b)] => Ok(Value::Integer(a + b)),
        _ => Err(GuestException::invalid_function_argument("expected two integers")),
    });
    let mut host = host_for(&args, &TrinoType::Integer, guest);

    let bytes = host
        .execute(&argument_data(&args, vec![Value::Integer(2), Value::Integer(3)]))
        .expect("invocation should succeed");
    assert_eq!(bytes.as_ref(), &[5, 0, 0, 0, 1, 5, 0, 0, 0]);
}

#[test]
fn null_arguments_reach_the_guest_as_null() {
    let args = TrinoType::row([TrinoType::Varchar, TrinoType::map(TrinoType::Varchar, TrinoType::Date)]);
    let guest = FnGuest::new("nulls", |args| {
        assert_eq!(args, vec![Value::string("x"), Value::Null]);
        Ok(Value::Null)
    });
    let mut host = host_for(&args, &TrinoType::Date, guest);

    let bytes = host
        .execute(&argument_data(&args, vec![Value::string("x"), Value::Null]))
        .unwrap();
    assert_eq!(bytes.as_ref(), &[1, 0, 0, 0, 0]);
}

#[test]
fn absent_argument_row_invokes_with_no_arguments() {
    let args = TrinoType::row([TrinoType::BigInt]);
    let guest = FnGuest::new("empty", |args| Ok(Value::BigInt(args.len() as i64)));
    let mut host = host_for(&args, &TrinoType::BigInt, guest);

    let bytes = host.execute(&[0]).unwrap();
    assert_eq!(bytes.as_ref(), &[9, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0]);
}

#[test]
fn guest_state_persists_across_invocations() {
    let args = TrinoType::row([]);
    let mut calls = 0i64;
    let guest = FnGuest::new("counter", move |_| {
        calls += 1;
        Ok(Value::BigInt(calls))
    });
    let mut host = host_for(&args, &TrinoType::BigInt, guest);
    let data = argument_data(&args, vec![]);

    host.execute(&data).unwrap();
    let bytes = host.execute(&data).unwrap();
    assert_eq!(&bytes[5..], &2i64.to_le_bytes());
}

#[test]
fn small_initial_capacity_still_fits_large_results() {
    let args = TrinoType::row([TrinoType::Integer]);
    let guest = FnGuest::new("repeat", |args| match args.as_slice() {
        [Value::Integer(n)] => Ok(Value::string("ab".repeat(*n as usize))),
        _ => Ok(Value::Null),
    });
    let mut host = UdfHost::builder()
        .argument_type(args.to_descriptor())
        .return_type(TrinoType::Varchar.to_descriptor())
        .initial_capacity(8)
        .build(guest)
        .unwrap();

    let bytes = host
        .execute(&argument_data(&args, vec![Value::Integer(1000)]))
        .unwrap();
    assert_eq!(bytes.len(), 4 + 1 + 4 + 2000);
}

// ── guest failures ───────────────────────────────────────────────────────────

#[test]
fn division_by_zero_maps_to_its_code() {
    let err = run_failing(raising(
        GuestException::division_by_zero("division by zero").with_traceback("at line 3"),
    ));
    assert_eq!(err.code, ErrorCode::DIVISION_BY_ZERO);
    assert_eq!(err.message, "division by zero");
    assert_eq!(err.trace.as_deref(), Some("at line 3"));
}

#[test]
fn trino_errors_keep_their_own_code() {
    let err = run_failing(raising(GuestException::trino(ErrorCode(1234), "custom")));
    assert_eq!(err, ErrorResult::new(ErrorCode(1234), "custom"));

    let err = run_failing(raising(GuestException::numeric_value_out_of_range("too big")));
    assert_eq!(err.code, ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE);
}

#[test]
fn memory_error_reports_memory_limit() {
    let err = run_failing(raising(GuestException::memory_error()));
    assert_eq!(
        err,
        ErrorResult::new(ErrorCode::EXCEEDED_FUNCTION_MEMORY_LIMIT, "MemoryError")
    );
}

#[test]
fn other_exceptions_are_implementation_errors() {
    let err = run_failing(raising(
        GuestException::other("ValueError", "bad value").with_traceback("tb"),
    ));
    assert_eq!(
        err,
        ErrorResult::new(ErrorCode::FUNCTION_IMPLEMENTATION_ERROR, "ValueError: bad value")
            .with_trace("tb")
    );
}

#[test]
fn formatter_out_of_memory_downgrades_to_fixed_error() {
    let err = run_failing(BrokenFormatter(FormatError::OutOfMemory));
    assert_eq!(
        err,
        ErrorResult::new(
            ErrorCode::EXCEEDED_FUNCTION_MEMORY_LIMIT,
            "MemoryError (no traceback available)"
        )
    );
}

#[test]
#[should_panic(expected = "protocol violation")]
fn other_formatter_failures_are_fatal() {
    run_failing(BrokenFormatter(FormatError::Failed("tuple expected".into())));
}

// ── result conversion failures ───────────────────────────────────────────────

#[test]
fn type_mismatch_names_both_types() {
    let err = run_result(TrinoType::Varchar, Value::Integer(1));
    assert_eq!(err.code, ErrorCode::FUNCTION_IMPLEMENTATION_ERROR);
    assert_eq!(
        err.message,
        "Failed to convert result type 'integer' to Trino type VARCHAR: \
         expected a value of type VARCHAR, found 'integer'"
    );
    assert_eq!(err.trace, None);
}

#[test]
fn range_failure_uses_literal_message() {
    let err = run_result(TrinoType::TinyInt, Value::Integer(128));
    assert_eq!(
        err,
        ErrorResult::new(ErrorCode::NUMERIC_VALUE_OUT_OF_RANGE, "Value out of range for TINYINT")
    );
}

#[test]
fn missing_time_zone_is_an_implementation_error() {
    let ts = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    let err = run_result(TrinoType::TimestampWithZone, Value::Timestamp(ts));
    assert_eq!(err.code, ErrorCode::FUNCTION_IMPLEMENTATION_ERROR);
    assert_eq!(
        err.message,
        "Failed to convert result type 'timestamp' to Trino type TIMESTAMP WITH TIME ZONE: \
         timestamp value does not have a time zone offset"
    );
}

fn run_result(return_type: TrinoType, value: Value) -> ErrorResult {
    let args = TrinoType::row([]);
    let guest = FnGuest::new("result", move |_| Ok(value.clone()));
    let mut host = host_for(&args, &return_type, guest);
    host.execute(&argument_data(&args, vec![]))
        .expect_err("result conversion should fail")
}

// ── error result layout ──────────────────────────────────────────────────────

#[test]
fn error_result_bytes_without_trace() {
    let bytes = ErrorResult::new(ErrorCode::DIVISION_BY_ZERO, "oops").to_bytes();
    assert_eq!(bytes.as_ref(), &[8, 0, 0, 0, 4, 0, 0, 0, b'o', b'o', b'p', b's', 0]);
}

#[test]
fn error_result_bytes_with_trace() {
    let bytes = ErrorResult::new(ErrorCode::FUNCTION_IMPLEMENTATION_ERROR, "e")
        .with_trace("tb")
        .to_bytes();
    let mut expected = 65549i32.to_le_bytes().to_vec();
    expected.extend_from_slice(&[1, 0, 0, 0, b'e', 1, 2, 0, 0, 0, b't', b'b']);
    assert_eq!(bytes.as_ref(), expected.as_slice());
}

#[test]
fn error_result_display() {
    let result = ErrorResult::new(ErrorCode::NOT_SUPPORTED, "nope");
    assert_eq!(result.to_string(), "NOT_SUPPORTED(13): nope");
}
