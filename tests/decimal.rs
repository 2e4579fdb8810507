//! Coercion of raw inputs to `fixedMxN` and `ufixedMxN`.

mod common;

use abi_wrap::{
    BigDecimal, BigInt, DataType, EnumType, Input, IntegerType, Payload, Request, Resolution,
    Response, Specificity, TypeClass, Wrapped, WrappedError, WrapError, WrapOptions, wrap_with,
};
use common::*;

fn uint8() -> DataType {
    DataType::Integer(IntegerType::new(TypeClass::Unsigned, 8))
}

fn color() -> EnumType {
    EnumType::new("Color")
}

// =============================================================================
// Basic inputs
// =============================================================================

#[test]
fn test_numeric_string() -> Result<(), anyhow::Error> {
    let value = decimal(UFIXED128X18, &Input::string("1.23"))?;
    assert_eq!(value.payload, dec("1.23"));
    assert_eq!(value.to_plain_string(), "1.23");
    Ok(())
}

#[test]
fn test_numeric_string_forms() -> Result<(), anyhow::Error> {
    assert_eq!(decimal(FIXED128X18, &Input::string("-4"))?.payload, dec("-4"));
    assert_eq!(decimal(FIXED128X18, &Input::string(" .5 "))?.payload, dec("0.5"));
    assert_eq!(decimal(FIXED128X18, &Input::string("1e3"))?.to_plain_string(), "1000");
    assert_eq!(decimal(FIXED128X18, &Input::string("2.50"))?.payload, dec("2.5"));
    Ok(())
}

#[test]
fn test_too_many_places() {
    let reason = assert_mismatch(decimal(UFIXED8X0, &Input::string("1.5")), Specificity::RECOGNIZED);
    assert!(reason.contains("too many decimal places"), "{reason}");
}

#[test]
fn test_trailing_zeros_do_not_count_as_places() -> Result<(), anyhow::Error> {
    assert_eq!(decimal(UFIXED8X0, &Input::string("3.000"))?.payload, dec("3"));
    Ok(())
}

#[test]
fn test_out_of_range() {
    let reason = assert_mismatch(decimal(UFIXED8X0, &Input::string("256")), Specificity::RECOGNIZED);
    assert!(reason.contains("out of range"), "{reason}");

    assert_mismatch(decimal(UFIXED8X0, &Input::string("-1")), Specificity::RECOGNIZED);
    assert_mismatch(decimal(FIXED8X1, &Input::string("12.8")), Specificity::RECOGNIZED);
    assert_mismatch(decimal(FIXED8X1, &Input::string("-12.9")), Specificity::RECOGNIZED);
}

#[test]
fn test_range_bounds_are_inclusive() -> Result<(), anyhow::Error> {
    assert_eq!(decimal(UFIXED8X0, &Input::string("255"))?.payload, dec("255"));
    assert_eq!(decimal(UFIXED8X0, &Input::string("0"))?.payload, dec("0"));
    assert_eq!(decimal(FIXED8X1, &Input::string("12.7"))?.payload, dec("12.7"));
    assert_eq!(decimal(FIXED8X1, &Input::string("-12.8"))?.payload, dec("-12.8"));
    Ok(())
}

#[test]
fn test_huge_exponent_is_out_of_range() {
    assert_mismatch(decimal(FIXED128X18, &Input::string("1e1000000")), Specificity::RECOGNIZED);
}

#[test]
fn test_extreme_exponents_are_out_of_range() {
    let reason = assert_mismatch(
        decimal(FIXED128X18, &Input::string("1e9223372036854775807")),
        Specificity::RECOGNIZED,
    );
    assert!(reason.contains("out of range"), "{reason}");

    let huge = BigDecimal::new(BigInt::from(1), i64::MIN + 1);
    assert_mismatch(decimal(FIXED128X18, &Input::Decimal(huge.clone())), Specificity::RECOGNIZED);

    let mut resolver = |_: &Request| Response::Decimal(Resolution::resolved(huge.clone()));
    let result = wrap_with(
        &FIXED128X18,
        &Input::Other("custom".to_string()),
        &WrapOptions::default(),
        &mut resolver,
    );
    assert_mismatch(result, Specificity::RECOGNIZED);
}

#[test]
fn test_extreme_exponent_error_displays() {
    let input = Input::Decimal(BigDecimal::new(BigInt::from(1), -4_000_000_000_000_000_000));
    let error = decimal(FIXED128X18, &input).err();
    assert_eq!(error.as_ref().and_then(WrapError::specificity), Some(Specificity::RECOGNIZED));

    let message = error.map(|error| error.to_string()).unwrap_or_default();
    assert!(message.contains("out of range"), "{message}");
    assert!(message.len() < 512, "{message}");
}

#[test]
fn test_zero_with_extreme_exponent() -> Result<(), anyhow::Error> {
    let zero = BigDecimal::new(BigInt::from(0), -4_000_000_000_000_000_000);
    assert_eq!(decimal(UFIXED8X0, &Input::Decimal(zero))?.to_plain_string(), "0");
    assert_eq!(decimal(UFIXED8X0, &Input::string("0e9223372036854775807"))?.payload, dec("0"));
    Ok(())
}

#[test]
fn test_not_a_numeral() {
    let reason = assert_mismatch(decimal(FIXED128X18, &Input::string("0x10")), Specificity::PLAUSIBLE);
    assert!(reason.contains("decimal numeral"), "{reason}");
}

#[test]
fn test_numbers() -> Result<(), anyhow::Error> {
    assert_eq!(decimal(FIXED8X1, &Input::Number(-2.5))?.payload, dec("-2.5"));
    assert_eq!(decimal(UFIXED128X18, &Input::Number(0.1))?.payload, dec("0.1"));
    assert_eq!(decimal(UFIXED8X0, &Input::BoxedNumber(7.0))?.payload, dec("7"));
    Ok(())
}

#[test]
fn test_number_limits() -> Result<(), anyhow::Error> {
    // 2^53 - 1 is exact, 2^53 is not
    let max_safe = decimal(FIXED128X18, &Input::Number(9_007_199_254_740_991.0))?;
    assert_eq!(max_safe.to_plain_string(), "9007199254740991");

    let reason = assert_mismatch(
        decimal(FIXED128X18, &Input::Number(9_007_199_254_740_992.0)),
        Specificity::PLAUSIBLE,
    );
    assert!(reason.contains("exact"), "{reason}");

    assert_mismatch(decimal(FIXED128X18, &Input::Number(1e-20)), Specificity::PLAUSIBLE);
    assert_mismatch(decimal(FIXED128X18, &Input::Number(f64::NAN)), Specificity::PLAUSIBLE);
    assert_mismatch(decimal(FIXED128X18, &Input::Number(f64::INFINITY)), Specificity::PLAUSIBLE);
    Ok(())
}

#[test]
fn test_big_integers_and_decimals() -> Result<(), anyhow::Error> {
    let big = BigInt::from(10u64).pow(30);
    let value = decimal(UFIXED128X18, &Input::BigInt(big.clone()))?;
    assert_eq!(value.payload, BigDecimal::from(big.clone()));

    let value = decimal(UFIXED128X18, &Input::BigNumber(BigInt::from(42)))?;
    assert_eq!(value.payload, dec("42"));

    let value = decimal(FIXED8X1, &Input::Decimal(dec("-0.5")))?;
    assert_eq!(value.payload, dec("-0.5"));

    let too_big = BigInt::from(1u8) << 128;
    assert_mismatch(decimal(UFIXED128X18, &Input::BigInt(too_big)), Specificity::RECOGNIZED);
    Ok(())
}

#[test]
fn test_every_recognizing_case_validates() {
    let loose = |input: Input| decimal_loose(UFIXED8X0, &input);
    let enum_value = |numeric: i64| {
        Input::wrapped(Wrapped::value(
            color(),
            Payload::Enum {
                name: "Blue".to_string(),
                numeric: BigInt::from(numeric),
            },
        ))
    };

    // Too precise for zero places
    for input in [
        Input::Number(1.5),
        Input::BoxedNumber(1.5),
        Input::string("1.5"),
        Input::BoxedString("1.5".to_string()),
        Input::Decimal(dec("1.5")),
        Input::type_value("ufixed8x0", Input::string("1.5")),
    ] {
        let reason = assert_mismatch(decimal(UFIXED8X0, &input), Specificity::RECOGNIZED);
        assert!(reason.contains("too many decimal places"), "{input}: {reason}");
    }

    // Out of range for eight unsigned bits
    for result in [
        decimal(UFIXED8X0, &Input::Number(256.0)),
        decimal(UFIXED8X0, &Input::BoxedNumber(-1.0)),
        decimal(UFIXED8X0, &Input::BigInt(BigInt::from(256))),
        decimal(UFIXED8X0, &Input::BigNumber(BigInt::from(-1))),
        loose(Input::wrapped(Wrapped::value(uint8(), Payload::Integer(BigInt::from(300))))),
        loose(enum_value(256)),
        loose(Input::wrapped(Wrapped::error(
            color(),
            WrappedError::EnumOutOfRange { raw: BigInt::from(1000) },
        ))),
    ] {
        let reason = assert_mismatch(result, Specificity::RECOGNIZED);
        assert!(reason.contains("out of range"), "{reason}");
    }
}

#[test]
fn test_resolved_value_out_of_range() {
    let mut resolver = |_: &Request| Response::Decimal(Resolution::resolved(dec("256")));
    let result = wrap_with(
        &UFIXED8X0,
        &Input::Other("custom".to_string()),
        &WrapOptions::default(),
        &mut resolver,
    );
    let reason = assert_mismatch(result, Specificity::RECOGNIZED);
    assert!(reason.contains("out of range"), "{reason}");
}

#[test]
fn test_boxed_string() -> Result<(), anyhow::Error> {
    let value = decimal(UFIXED8X1, &Input::BoxedString("2.5".to_string()))?;
    assert_eq!(value.payload, dec("2.5"));
    Ok(())
}

// =============================================================================
// Type annotations
// =============================================================================

#[test]
fn test_type_annotation() -> Result<(), anyhow::Error> {
    let input = Input::type_value("fixed128x18", Input::string("1"));
    assert_eq!(decimal(FIXED128X18, &input)?.payload, dec("1"));

    // Bare `fixed` means fixed128x18
    let input = Input::type_value("fixed", Input::string("1"));
    assert_eq!(decimal(FIXED128X18, &input)?.payload, dec("1"));
    Ok(())
}

#[test]
fn test_type_annotation_mismatch() {
    let input = Input::type_value("fixed256x18", Input::string("1"));
    let reason = assert_mismatch(decimal(FIXED128X18, &input), Specificity::RECOGNIZED);
    assert!(reason.contains("does not match"), "{reason}");
}

#[test]
fn test_type_annotation_allows_loose_wrapped_integer() -> Result<(), anyhow::Error> {
    let inner = Input::wrapped(Wrapped::value(uint8(), Payload::Integer(BigInt::from(9))));
    let input = Input::type_value("ufixed8x0", inner);
    assert_eq!(decimal(UFIXED8X0, &input)?.payload, dec("9"));
    Ok(())
}

// =============================================================================
// Wrapped values
// =============================================================================

#[test]
fn test_wrapped_decimal_roundtrip() -> Result<(), anyhow::Error> {
    let first = decimal(UFIXED128X18, &Input::string("1.5"))?;
    let second = decimal(UFIXED128X18, &Input::wrapped(first.clone()))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_wrapped_decimal_strict_and_loose() -> Result<(), anyhow::Error> {
    let first = decimal(UFIXED128X18, &Input::string("1.5"))?;
    let input = Input::wrapped(first);

    let reason = assert_mismatch(decimal(UFIXED8X1, &input), Specificity::RECOGNIZED);
    assert!(reason.contains("does not match"), "{reason}");

    let value = decimal_loose(UFIXED8X1, &input)?;
    assert_eq!(value.data_type, UFIXED8X1);
    assert_eq!(value.payload, dec("1.5"));

    // Loose values are re-validated against the target
    assert_mismatch(decimal_loose(UFIXED8X0, &input), Specificity::RECOGNIZED);
    Ok(())
}

#[test]
fn test_wrapped_integer_requires_loose() -> Result<(), anyhow::Error> {
    let input = Input::wrapped(Wrapped::value(uint8(), Payload::Integer(BigInt::from(5))));

    let reason = assert_mismatch(decimal(UFIXED8X0, &input), Specificity::LIKELY);
    assert!(reason.contains("loose"), "{reason}");

    assert_eq!(decimal_loose(UFIXED8X0, &input)?.payload, dec("5"));
    Ok(())
}

#[test]
fn test_wrapped_enum() -> Result<(), anyhow::Error> {
    let input = Input::wrapped(Wrapped::value(
        color(),
        Payload::Enum {
            name: "Blue".to_string(),
            numeric: BigInt::from(2),
        },
    ));
    assert_mismatch(decimal(UFIXED8X0, &input), Specificity::LIKELY);
    assert_eq!(decimal_loose(UFIXED8X0, &input)?.payload, dec("2"));
    Ok(())
}

#[test]
fn test_wrapped_enum_out_of_range_error() -> Result<(), anyhow::Error> {
    let input = Input::wrapped(Wrapped::error(
        color(),
        WrappedError::EnumOutOfRange { raw: BigInt::from(7) },
    ));
    assert_mismatch(decimal(UFIXED8X0, &input), Specificity::LIKELY);
    assert_eq!(decimal_loose(UFIXED8X0, &input)?.payload, dec("7"));
    Ok(())
}

#[test]
fn test_wrapped_bytes_is_not_a_decimal() {
    let input = Input::wrapped(Wrapped::value(BYTES2, Payload::Bytes("0x0102".to_string())));
    // Only the resolver's "unrecognized" answer rises above shape mismatches
    assert_mismatch(decimal_loose(UFIXED8X0, &input), Specificity::PLAUSIBLE);
}

// =============================================================================
// Resolver fallback
// =============================================================================

#[test]
fn test_resolver_resolves_unknown_input() -> Result<(), anyhow::Error> {
    let mut resolver = |request: &Request| {
        assert_eq!(request.input(), &Input::Other("custom".to_string()));
        Response::Decimal(Resolution::resolved(dec("2.5")))
    };
    let value = wrap_with(
        &UFIXED8X1,
        &Input::Other("custom".to_string()),
        &WrapOptions::default(),
        &mut resolver,
    )?;
    assert_eq!(value.payload, dec("2.5"));
    Ok(())
}

#[test]
fn test_resolved_value_is_validated() {
    let mut resolver = |_: &Request| Response::Decimal(Resolution::resolved(dec("0.25")));
    let result = wrap_with(
        &UFIXED8X1,
        &Input::Other("custom".to_string()),
        &WrapOptions::default(),
        &mut resolver,
    );
    assert_mismatch(result, Specificity::RECOGNIZED);
}

#[test]
fn test_resolver_unrecognized() {
    let reason = assert_mismatch(
        decimal(UFIXED8X1, &Input::Other("custom".to_string())),
        Specificity::PLAUSIBLE,
    );
    assert_eq!(reason, "Input was not recognized as a decimal number");
}

#[test]
fn test_resolver_partially_recognized() {
    let mut resolver = |_: &Request| {
        Response::Decimal(
            Resolution::unrecognized()
                .partially_recognized()
                .with_reason("Looked like a rational, but the denominator was zero"),
        )
    };
    let result = wrap_with(
        &UFIXED8X1,
        &Input::string("1/0"),
        &WrapOptions::default(),
        &mut resolver,
    );
    let reason = assert_mismatch(result, Specificity::RECOGNIZED);
    assert!(reason.contains("denominator"), "{reason}");
}

#[test]
fn test_resolver_wrong_response_kind() {
    let mut resolver = |_: &Request| Response::Integer(Resolution::resolved(BigInt::from(1)));
    let result = wrap_with(
        &UFIXED8X1,
        &Input::Other("custom".to_string()),
        &WrapOptions::default(),
        &mut resolver,
    );
    let error = result.err();
    assert!(
        matches!(error, Some(WrapError::BadResponseType { .. })),
        "{error:?}"
    );
    assert!(error.is_some_and(|error| error.is_protocol_violation()));
}

#[test]
fn test_resolver_not_consulted_when_a_case_matches() -> Result<(), anyhow::Error> {
    let mut calls = 0;
    let mut resolver = |request: &Request| {
        calls += 1;
        Response::unrecognized(request.kind())
    };
    wrap_with(
        &UFIXED8X1,
        &Input::string("1.5"),
        &WrapOptions::default(),
        &mut resolver,
    )?;
    assert_eq!(calls, 0);
    Ok(())
}
