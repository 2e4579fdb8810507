//! Cases for `bytes` and `bytesN`.
//!
//! Every accepting case produces `0x`-prefixed hex and hands it to
//! [`finish`], which lowercases it and, for static types, rejects overlong
//! payloads and right-pads short ones with zero bytes.

use super::{Case, Step, WrapType, dispatch};
use crate::error::{Result, Specificity, WrapError};
use crate::logging::debug;
use crate::options::WrapOptions;
use crate::types::{BytesType, DataType};
use crate::value::{BytesValue, Input, Payload, WrappedResult};

pub(crate) static CASES: [Case<BytesType>; 7] = [
    Case::resumable("type/value pair", from_type_value),
    Case::immediate("hex string", from_hex_string),
    Case::immediate("boxed string", from_boxed_string),
    Case::immediate("byte array", from_byte_array),
    Case::immediate("encoding/text pair", from_encoded_text),
    Case::immediate("wrapped bytes", from_wrapped),
    Case::immediate("catch-all", fail_all),
];

fn mismatch(
    data_type: &BytesType,
    input: &Input,
    options: &WrapOptions,
    specificity: Specificity,
    reason: impl Into<String>,
) -> WrapError {
    WrapError::mismatch(*data_type, input, options, specificity, reason)
}

fn from_type_value(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Step<BytesValue> {
    let Input::TypeValue { type_name, value } = input else {
        return Step::Failed(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a type/value pair",
        ));
    };
    let annotated = match type_name.parse::<BytesType>() {
        Ok(annotated) => annotated,
        Err(error) => {
            return Step::Failed(mismatch(
                data_type,
                input,
                options,
                Specificity::RECOGNIZED,
                format!("Type annotation is not a bytes type: {}", error.reason),
            ));
        }
    };
    debug!(annotation = %type_name, length = ?annotated.length(), "parsed bytes type annotation");
    if annotated != *data_type {
        return Step::Failed(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!("Type annotation {annotated} does not match {data_type}"),
        ));
    }
    dispatch::run(data_type, value, &options.loosened(), BytesType::basic_cases())
}

fn from_hex_string(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    let Input::String(text) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a string",
        ));
    };
    if !is_hex_bytes(text) {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::PLAUSIBLE,
            "Input was a string, but not a 0x-prefixed hex string with an even number of digits",
        ));
    }
    finish(data_type, input, options, text.clone())
}

fn from_boxed_string(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    let Input::BoxedString(text) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a boxed string",
        ));
    };
    from_hex_string(data_type, &Input::String(text.clone()), options)
}

fn from_byte_array(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    let bytes = match input {
        Input::Bytes(bytes) => bytes.clone(),
        Input::Sequence(items) => items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                as_byte(item).ok_or_else(|| {
                    mismatch(
                        data_type,
                        input,
                        options,
                        Specificity::RECOGNIZED,
                        format!("Input has element {item} at index {index} which is not a byte (an integer from 0 to 255)"),
                    )
                })
            })
            .collect::<Result<Vec<u8>>>()?,
        _ => {
            return Err(mismatch(
                data_type,
                input,
                options,
                Specificity::UNRECOGNIZED,
                "Input was not a byte array",
            ));
        }
    };
    finish(data_type, input, options, format!("0x{}", hex::encode(bytes)))
}

fn as_byte(item: &Input) -> Option<u8> {
    match item {
        Input::Number(number) if number.fract() == 0.0 && (0.0..256.0).contains(number) => {
            Some(*number as u8)
        }
        _ => None,
    }
}

fn from_encoded_text(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    let Input::EncodedText { encoding, text } = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not an encoding/text pair",
        ));
    };
    if encoding != "utf8" {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            format!("Unsupported encoding {encoding:?}; only \"utf8\" is supported"),
        ));
    }
    let text = String::from_utf16(text).map_err(|_| {
        mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input text contains an unpaired surrogate and cannot be encoded as UTF-8",
        )
    })?;
    finish(data_type, input, options, format!("0x{}", hex::encode(text)))
}

fn from_wrapped(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    let Input::Wrapped(wrapped) = input else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            "Input was not a wrapped value",
        ));
    };
    let DataType::Bytes(source) = &wrapped.data_type else {
        return Err(mismatch(
            data_type,
            input,
            options,
            Specificity::UNRECOGNIZED,
            format!("Input was a wrapped {} value, not a bytes value", wrapped.data_type),
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
        WrappedResult::Value(Payload::Bytes(hex)) if is_hex_bytes(hex) => {
            finish(data_type, input, options, hex.clone())
        }
        WrappedResult::Value(_) => Err(mismatch(
            data_type,
            input,
            options,
            Specificity::RECOGNIZED,
            "Input was a wrapped bytes value with a malformed payload",
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

fn fail_all(data_type: &BytesType, input: &Input, options: &WrapOptions) -> Result<BytesValue> {
    Err(mismatch(
        data_type,
        input,
        options,
        Specificity::CATCH_ALL,
        "Input was not a hex string, byte array, UTF-8 encoding/text pair, \
         boxed string, type/value pair, or wrapped bytes value",
    ))
}

/// Strict `0x`-prefixed hex with whole bytes.
fn is_hex_bytes(text: &str) -> bool {
    text.strip_prefix("0x").is_some_and(|digits| {
        digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit())
    })
}

/// Lowercase `hex` and fit it to a static length.
fn finish(data_type: &BytesType, input: &Input, options: &WrapOptions, hex: String) -> Result<BytesValue> {
    let mut payload = hex.to_ascii_lowercase();
    if let BytesType::Static { length } = *data_type {
        let actual = payload.len().saturating_sub(2) / 2;
        if actual > length {
            return Err(mismatch(
                data_type,
                input,
                options,
                Specificity::RECOGNIZED,
                format!("Input was overlong: {actual} bytes, but {data_type} holds {length}"),
            ));
        }
        payload.extend(std::iter::repeat_n('0', (length - actual) * 2));
    }
    Ok(BytesValue {
        data_type: *data_type,
        payload,
    })
}
