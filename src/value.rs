//! Raw inputs and canonical values.
//!
//! [`Input`] is the closed set of shapes a caller may hand to the coercion
//! engine. [`BytesValue`] and [`DecimalValue`] are the validated outputs an
//! encoder consumes. [`Wrapped`] models a value that an earlier coercion (or
//! a decoder) already produced, which may be fed back in as input.

use std::fmt;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::types::{BytesType, DataType, DecimalType};

/// Loosely-typed caller input.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    /// A primitive string.
    String(String),
    /// An object-wrapped string.
    BoxedString(String),
    /// A native floating-point number.
    Number(f64),
    /// An object-wrapped number.
    BoxedNumber(f64),
    /// A native arbitrary-precision integer.
    BigInt(BigInt),
    /// An external big-integer object.
    BigNumber(BigInt),
    /// An external exact-decimal object.
    Decimal(BigDecimal),
    /// A native byte buffer.
    Bytes(Vec<u8>),
    /// An indexed sequence, accepted as bytes when every element is a byte.
    Sequence(Vec<Input>),
    /// Text tagged with the encoding it should be converted with.
    ///
    /// The text is kept as UTF-16 code units so that unpaired surrogates
    /// can be represented and rejected.
    EncodedText { encoding: String, text: Vec<u16> },
    /// An explicit `{ type, value }` annotation.
    TypeValue { type_name: String, value: Box<Input> },
    /// A previously-wrapped value.
    Wrapped(Box<Wrapped>),
    Bool(bool),
    Null,
    /// Anything else, kept only as a description for diagnostics.
    Other(String),
}

impl Input {
    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    /// An encoding/text pair built from a Rust string.
    pub fn text(encoding: impl Into<String>, text: &str) -> Self {
        Self::EncodedText {
            encoding: encoding.into(),
            text: text.encode_utf16().collect(),
        }
    }

    pub fn type_value(type_name: impl Into<String>, value: Input) -> Self {
        Self::TypeValue {
            type_name: type_name.into(),
            value: Box::new(value),
        }
    }

    pub fn wrapped(wrapped: impl Into<Wrapped>) -> Self {
        Self::Wrapped(Box::new(wrapped.into()))
    }

    /// A sequence of numbers, the shape of a typed byte array.
    pub fn byte_sequence(items: impl IntoIterator<Item = f64>) -> Self {
        Self::Sequence(items.into_iter().map(Self::Number).collect())
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(text) => write!(f, "{text:?}"),
            Self::BoxedString(text) => write!(f, "String({text:?})"),
            Self::Number(number) => write!(f, "{number}"),
            Self::BoxedNumber(number) => write!(f, "Number({number})"),
            Self::BigInt(number) => write!(f, "{number}n"),
            Self::BigNumber(number) => write!(f, "BigNumber({number})"),
            Self::Decimal(number) => write!(f, "Decimal({number})"),
            Self::Bytes(bytes) => write!(f, "Bytes(0x{})", hex::encode(bytes)),
            Self::Sequence(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::EncodedText { encoding, text } => write!(
                f,
                "{{ encoding: {encoding:?}, text: {:?} }}",
                String::from_utf16_lossy(text)
            ),
            Self::TypeValue { type_name, value } => {
                write!(f, "{{ type: {type_name:?}, value: {value} }}")
            }
            Self::Wrapped(wrapped) => write!(f, "wrapped {}", wrapped.data_type),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Null => write!(f, "null"),
            Self::Other(description) => f.write_str(description),
        }
    }
}

/// A value produced earlier, tagged with the type it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct Wrapped {
    pub data_type: DataType,
    pub result: WrappedResult,
}

impl Wrapped {
    pub fn value(data_type: impl Into<DataType>, payload: Payload) -> Self {
        Self {
            data_type: data_type.into(),
            result: WrappedResult::Value(payload),
        }
    }

    pub fn error(data_type: impl Into<DataType>, error: WrappedError) -> Self {
        Self {
            data_type: data_type.into(),
            result: WrappedResult::Error(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WrappedResult {
    Value(Payload),
    Error(WrappedError),
}

/// The contents of a wrapped value.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Lowercase `0x`-prefixed hex.
    Bytes(String),
    Decimal(BigDecimal),
    Integer(BigInt),
    /// An enum option with its declared numeric position.
    Enum { name: String, numeric: BigInt },
}

/// Errors a decoder may have recorded in place of a value.
#[derive(Debug, Clone, PartialEq)]
pub enum WrappedError {
    /// The raw numeric payload is outside the enum's declared options.
    EnumOutOfRange { raw: BigInt },
    Other(String),
}

/// A validated bytes value.
///
/// The payload is lowercase `0x`-prefixed hex; for static types it is
/// exactly `length` bytes long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BytesValue {
    pub data_type: BytesType,
    pub payload: String,
}

impl BytesValue {
    /// Decode the payload back into raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let digits = self.payload.strip_prefix("0x").unwrap_or(&self.payload);
        hex::decode(digits).unwrap_or_default()
    }
}

impl fmt::Display for BytesValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

impl From<BytesValue> for Wrapped {
    fn from(value: BytesValue) -> Self {
        Wrapped::value(value.data_type, Payload::Bytes(value.payload))
    }
}

/// A validated fixed-point value.
///
/// The payload has at most `places` fractional digits and lies within the
/// type's range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalValue {
    pub data_type: DecimalType,
    pub payload: BigDecimal,
}

impl DecimalValue {
    /// The payload in positional notation, never in exponent form.
    ///
    /// Validation bounds the payload by the type's bits and places, so the
    /// rendering is bounded too.
    pub fn to_plain_string(&self) -> String {
        self.payload.to_plain_string()
    }
}

impl fmt::Display for DecimalValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_plain_string())
    }
}

impl From<DecimalValue> for Wrapped {
    fn from(value: DecimalValue) -> Self {
        Wrapped::value(value.data_type, Payload::Decimal(value.payload))
    }
}
