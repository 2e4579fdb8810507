//! Cases for `fixedMxN` and `ufixedMxN`.
//!
//! Each basic case turns its input into an exact decimal and passes it to
//! [`validate`]. The last case hands inputs nobody recognized to the
//! caller's resolver.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_traits::Zero;

use super::{Case, Request, Response, Resume, Step, Suspension, WrapType, dispatch};
use crate::error::{ResolutionKind, Result, Specificity, WrapError};
use crate::logging::{debug, warn};
use crate::options::WrapOptions;
use crate::types::{DataType, DecimalType};
use crate::value::{DecimalValue, Input, Payload, Wrapped, WrappedError, WrappedResult};

/// Largest integer a double represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub(crate) static CASES: [Case<DecimalType>; 13] = [
    Case::resumable("type/value pair", from_type_value),
    Case::immediate("number", from_number),
    Case::immediate("numeric string", from_string),
    Case::immediate("boxed number", from_boxed_number),
    Case::immediate("boxed string", from_boxed_string),
    Case::immediate("bigint", from_bigint),
    Case::immediate("big number", from_big_number),
    Case::immediate("decimal", from_decimal),
    Case::immediate("wrapped fixed-point", from_wrapped_decimal),
    Case::immediate("wrapped integer", from_wrapped_integer),
    Case::immediate("wrapped enum", from_wrapped_enum),
    Case::immediate("wrapped enum error", from_wrapped_enum_error),
    Case::resumable("resolver", from_resolver),
];

fn mismatch(
    data_type: &DecimalType,
    input: &Input,
    options: &WrapOptions,
    specificity: Specificity,
    reason: impl Into<String>,
) -> WrapError {
    WrapError::mismatch(*data_type, input, options, specificity, reason)
}

fn from_type_value(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Step<DecimalValue> {
    let Input::TypeValue { type_name, value } = input else {
        return Step::Failed(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a type/value pair",
        ));
    };
    let annotated = match type_name.parse::<DecimalType>() {
        Ok(annotated) => annotated,
        Err(error) => {
            return Step::Failed(mismatch(
                data_type,
                input,
                options,
                Specificity::RECOGNIZED,
                format!("Type annotation is not a fixed-point type: {}", error.reason),
            ));
        }
    };
    debug!(
        annotation = %type_name,
        bits = annotated.bits,
        places = annotated.places,
        "parsed fixed-point type annotation"
    );
    if annotated != *data_type {
        return Step::Failed(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!("Type annotation {annotated} does not match {data_type}"),
        ));
    }
    dispatch::run(data_type, value, &options.loosened(), DecimalType::basic_cases())
}

fn from_number(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::Number(number) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a number",
        ));
    };
    if !number.is_finite() {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::PLAUSIBLE,
            "Input was not a finite number",
        ));
    }
    let magnitude = number.abs();
    if magnitude > MAX_SAFE_INTEGER || (magnitude != 0.0 && magnitude < f64::EPSILON) {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::PLAUSIBLE,
            "Input magnitude is outside the range where numbers are exact; \
             use a numeric string, bigint, or big number object instead",
        ));
    }
    // Display prints the shortest round-tripping digits, never an exponent.
    let value = BigDecimal::from_str(&number.to_string()).map_err(|_| {
        mismatch(
            data_type,
            input,
            options,
            Specificity::PLAUSIBLE,
            "Input could not be read as an exact decimal",
        )
    })?;
    validate(data_type, input, options, value)
}

fn from_string(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::String(text) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a string",
        ));
    };
    let value = parse_numeral(text).ok_or_else(|| {
        mismatch(
            data_type,
            input,
            options,
            Specificity::PLAUSIBLE,
            "Input was a string, but not a decimal numeral",
        )
    })?;
    validate(data_type, input, options, value)
}

fn from_boxed_number(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::BoxedNumber(number) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a boxed number",
        ));
    };
    from_number(data_type, &Input::Number(*number), options)
}

fn from_boxed_string(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::BoxedString(text) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a boxed string",
        ));
    };
    from_string(data_type, &Input::String(text.clone()), options)
}

fn from_bigint(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::BigInt(number) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a bigint",
        ));
    };
    validate(data_type, input, options, BigDecimal::from(number.clone()))
}

fn from_big_number(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::BigNumber(number) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a big number object",
        ));
    };
    validate(data_type, input, options, BigDecimal::from(number.clone()))
}

fn from_decimal(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let Input::Decimal(number) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a decimal object",
        ));
    };
    validate(data_type, input, options, number.clone())
}

/// The wrapped value inside `input`, if any.
fn wrapped_input<'a>(
    data_type: &DecimalType,
    input: &'a Input,
    options: &WrapOptions,
) -> Result<&'a Wrapped> {
    match input {
        Input::Wrapped(wrapped) => Ok(wrapped),
        _ => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a wrapped value",
        )),
    }
}

/// Wrapped integers and enums are only a fixed-point value in loose mode.
fn require_loose(
    data_type: &DecimalType,
    input: &Input,
    options: &WrapOptions,
    what: &str,
) -> Result<()> {
    if options.loose {
        return Ok(());
    }
    Err(mismatch(
        data_type,
        input,
        options,
        Specificity::LIKELY,
        format!("Wrapped {what} values are only accepted as {data_type} in loose mode"),
    ))
}

fn from_wrapped_decimal(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let wrapped = wrapped_input(data_type, input, options)?;
    let DataType::Decimal(source) = &wrapped.data_type else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            format!("Input was a wrapped {} value, not a fixed-point value", wrapped.data_type),
        ));
    };
    if !options.loose && source != data_type {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!("Input was a wrapped {source} value, which does not match {data_type}"),
        ));
    }
    match &wrapped.result {
        WrappedResult::Value(Payload::Decimal(number)) => {
            validate(data_type, input, options, number.clone())
        }
        WrappedResult::Value(_) => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped fixed-point value with a non-decimal payload",
        )),
        WrappedResult::Error(_) => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped error, not a value",
        )),
    }
}

fn from_wrapped_integer(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let wrapped = wrapped_input(data_type, input, options)?;
    if !matches!(wrapped.data_type, DataType::Integer(_)) {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a wrapped integer",
        ));
    }
    require_loose(data_type, input, options, "integer")?;
    match &wrapped.result {
        WrappedResult::Value(Payload::Integer(number)) => {
            validate(data_type, input, options, BigDecimal::from(number.clone()))
        }
        WrappedResult::Value(_) => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped integer with a non-integer payload",
        )),
        WrappedResult::Error(_) => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped error, not a value",
        )),
    }
}

fn from_wrapped_enum(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let wrapped = wrapped_input(data_type, input, options)?;
    let (DataType::Enum(_), WrappedResult::Value(payload)) = (&wrapped.data_type, &wrapped.result) else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a wrapped enum value",
        ));
    };
    require_loose(data_type, input, options, "enum")?;
    let Payload::Enum { numeric, .. } = payload else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped enum with a non-enum payload",
        ));
    };
    validate(data_type, input, options, BigDecimal::from(numeric.clone()))
}

fn from_wrapped_enum_error(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Result<DecimalValue> {
    let wrapped = wrapped_input(data_type, input, options)?;
    let (DataType::Enum(_), WrappedResult::Error(WrappedError::EnumOutOfRange { raw })) =
        (&wrapped.data_type, &wrapped.result)
    else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a wrapped out-of-range enum error",
        ));
    };
    require_loose(data_type, input, options, "enum error")?;
    validate(data_type, input, options, BigDecimal::from(raw.clone()))
}

fn from_resolver(data_type: &DecimalType, input: &Input, options: &WrapOptions) -> Step<DecimalValue> {
    debug!(data_type = %data_type, "requesting decimal resolution");
    Step::Suspended(Suspension::new(
        Request::Decimal {
            input: input.clone(),
        },
        AwaitingDecimal {
            data_type: *data_type,
            input: input.clone(),
            options: options.clone(),
        },
    ))
}

/// The resolver case, suspended on its request.
struct AwaitingDecimal {
    data_type: DecimalType,
    input: Input,
    options: WrapOptions,
}

impl Resume<DecimalValue> for AwaitingDecimal {
    fn resume(self: Box<Self>, response: Response) -> Step<DecimalValue> {
        let AwaitingDecimal {
            data_type,
            input,
            options,
        } = *self;
        let resolution = match response {
            Response::Decimal(resolution) => resolution,
            other => {
                warn!(got = %other.kind(), "resolver answered a decimal request with the wrong kind");
                return Step::Failed(WrapError::BadResponseType {
                    expected: ResolutionKind::Decimal,
                    got: other.kind(),
                });
            }
        };
        debug!(
            resolved = resolution.value.is_some(),
            partially_recognized = resolution.partially_recognized,
            "received decimal resolution"
        );
        match resolution.value {
            Some(value) => validate(&data_type, &input, &options, value).into(),
            None => {
                let specificity = if resolution.partially_recognized {
                    Specificity::RECOGNIZED
                } else {
                    Specificity::PLAUSIBLE
                };
                let reason = resolution
                    .reason
                    .unwrap_or_else(|| "Input was not recognized as a decimal number".to_string());
                Step::Failed(mismatch(&data_type, &input, &options, specificity, reason))
            }
        }
    }
}

/// Check precision and range, producing the canonical value.
fn validate(
    data_type: &DecimalType,
    input: &Input,
    options: &WrapOptions,
    value: BigDecimal,
) -> Result<DecimalValue> {
    let places = fractional_places(&value);
    if places > i64::from(data_type.places) {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!(
                "Input has too many decimal places: {data_type} allows {}, input has {places}",
                data_type.places
            ),
        ));
    }
    if !in_range(data_type, &value) {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!(
                "Input is out of range for {data_type} (allowed {} to {})",
                data_type.min_value().to_plain_string(),
                data_type.max_value().to_plain_string(),
            ),
        ));
    }
    // Integers written with an exponent keep a negative scale; store them plainly.
    let (_, scale) = value.as_bigint_and_exponent();
    let payload = if scale < 0 { value.with_scale(0) } else { value };
    Ok(DecimalValue {
        data_type: *data_type,
        payload,
    })
}

/// Number of digits after the point, ignoring trailing zeros.
fn fractional_places(value: &BigDecimal) -> i64 {
    // A non-positive scale has no fractional digits to strip.
    if value.fractional_digit_count() <= 0 {
        return 0;
    }
    value.normalized().fractional_digit_count().max(0)
}

fn in_range(data_type: &DecimalType, value: &BigDecimal) -> bool {
    // Reject huge magnitudes before comparing, which would rescale them.
    if !value.is_zero() {
        let integer_digits =
            i128::from(value.digits()) - i128::from(value.fractional_digit_count());
        if integer_digits > i128::from(data_type.bits) + 1 {
            return false;
        }
    }
    *value >= data_type.min_value() && *value <= data_type.max_value()
}

/// Parse `[+-]digits[.digits][e[+-]digits]`, allowing surrounding whitespace.
///
/// Only the grammar is checked here; conversion is left to `BigDecimal`,
/// which rejects exponents whose scale does not fit.
fn parse_numeral(text: &str) -> Option<BigDecimal> {
    let text = text.trim();
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (mantissa, exponent) = match unsigned.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };
    let (whole, fraction) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (whole.is_empty() && fraction.is_empty()) || !all_digits(whole) || !all_digits(fraction) {
        return None;
    }
    if let Some(exponent) = exponent {
        let digits = exponent.strip_prefix(['+', '-']).unwrap_or(exponent);
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
    }
    BigDecimal::from_str(text).ok()
}
