//! Type descriptors for the values this crate coerces and accepts.
//!
//! [`BytesType`] and [`DecimalType`] are coercion targets. [`IntegerType`]
//! and [`EnumType`] only describe previously-wrapped inputs. All of them
//! render and parse using Solidity spelling (`bytes32`, `ufixed128x18`).

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{One, Zero};
use thiserror::Error;

/// Largest static bytes length expressible in a type string.
pub const MAX_STATIC_BYTES: usize = 32;

/// Largest fixed-point or integer width in bits.
pub const MAX_BITS: u32 = 256;

/// Largest number of decimal places of a fixed-point type.
pub const MAX_PLACES: u32 = 80;

/// Bit width and places used by a bare `fixed`/`ufixed` annotation.
pub const DEFAULT_FIXED_BITS: u32 = 128;
pub const DEFAULT_FIXED_PLACES: u32 = 18;

/// Error returned when a type string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid type `{text}`: {reason}")]
pub struct DataTypeParseError {
    pub text: String,
    pub reason: String,
}

impl DataTypeParseError {
    fn new(text: &str, reason: impl Into<String>) -> Self {
        Self {
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

/// Whether a numeric type admits negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Signed,
    Unsigned,
}

/// Static bytes have a fixed length; dynamic bytes are unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BytesKind {
    Static,
    Dynamic,
}

/// A bytes type descriptor (`bytesN` or `bytes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BytesType {
    Static { length: usize },
    Dynamic,
}

impl BytesType {
    pub const fn fixed(length: usize) -> Self {
        Self::Static { length }
    }

    pub fn kind(&self) -> BytesKind {
        match self {
            Self::Static { .. } => BytesKind::Static,
            Self::Dynamic => BytesKind::Dynamic,
        }
    }

    /// Byte length of a static type, `None` for dynamic bytes.
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Static { length } => Some(*length),
            Self::Dynamic => None,
        }
    }
}

impl fmt::Display for BytesType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static { length } => write!(f, "bytes{length}"),
            Self::Dynamic => write!(f, "bytes"),
        }
    }
}

/// Parses `byte` (one byte), `bytes` (dynamic), and `bytesN`/`byteN`.
impl FromStr for BytesType {
    type Err = DataTypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let rest = text
            .strip_prefix("byte")
            .ok_or_else(|| DataTypeParseError::new(text, "not a bytes type"))?;
        let digits = rest.strip_prefix('s').unwrap_or(rest);
        if digits.is_empty() {
            return Ok(if rest.is_empty() {
                Self::Static { length: 1 }
            } else {
                Self::Dynamic
            });
        }
        let length = parse_width(digits)
            .ok_or_else(|| DataTypeParseError::new(text, "not a bytes type"))?
            as usize;
        if !(1..=MAX_STATIC_BYTES).contains(&length) {
            return Err(DataTypeParseError::new(
                text,
                format!("static bytes length must be between 1 and {MAX_STATIC_BYTES}"),
            ));
        }
        Ok(Self::Static { length })
    }
}

/// A fixed-point decimal type descriptor (`fixedMxN` / `ufixedMxN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecimalType {
    pub class: TypeClass,
    pub bits: u32,
    pub places: u32,
}

impl DecimalType {
    pub const fn new(class: TypeClass, bits: u32, places: u32) -> Self {
        Self {
            class,
            bits,
            places,
        }
    }

    pub const fn signed(bits: u32, places: u32) -> Self {
        Self::new(TypeClass::Signed, bits, places)
    }

    pub const fn unsigned(bits: u32, places: u32) -> Self {
        Self::new(TypeClass::Unsigned, bits, places)
    }

    /// Smallest representable value (inclusive).
    pub fn min_value(&self) -> BigDecimal {
        match self.class {
            TypeClass::Unsigned => BigDecimal::zero(),
            TypeClass::Signed => {
                let bound = BigInt::one() << self.bits.saturating_sub(1);
                BigDecimal::new(-bound, i64::from(self.places))
            }
        }
    }

    /// Largest representable value (inclusive).
    pub fn max_value(&self) -> BigDecimal {
        let bound = match self.class {
            TypeClass::Unsigned => BigInt::one() << self.bits,
            TypeClass::Signed => BigInt::one() << self.bits.saturating_sub(1),
        };
        BigDecimal::new(bound - BigInt::one(), i64::from(self.places))
    }
}

impl fmt::Display for DecimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.class {
            TypeClass::Signed => "fixed",
            TypeClass::Unsigned => "ufixed",
        };
        write!(f, "{prefix}{}x{}", self.bits, self.places)
    }
}

/// Parses `fixed`/`ufixed`, optionally suffixed `BITSxPLACES` (default 128x18).
impl FromStr for DecimalType {
    type Err = DataTypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (class, rest) = if let Some(rest) = text.strip_prefix("ufixed") {
            (TypeClass::Unsigned, rest)
        } else if let Some(rest) = text.strip_prefix("fixed") {
            (TypeClass::Signed, rest)
        } else {
            return Err(DataTypeParseError::new(text, "not a fixed-point type"));
        };
        if rest.is_empty() {
            return Ok(Self::new(class, DEFAULT_FIXED_BITS, DEFAULT_FIXED_PLACES));
        }
        let (bits, places) = rest
            .split_once('x')
            .and_then(|(bits, places)| {
                let places = if places == "0" { Some(0) } else { parse_width(places) };
                Some((parse_width(bits)?, places?))
            })
            .ok_or_else(|| DataTypeParseError::new(text, "not a fixed-point type"))?;
        check_bits(text, bits)?;
        if places > MAX_PLACES {
            return Err(DataTypeParseError::new(
                text,
                format!("decimal places must be at most {MAX_PLACES}"),
            ));
        }
        Ok(Self::new(class, bits, places))
    }
}

/// An integer type descriptor (`intN` / `uintN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntegerType {
    pub class: TypeClass,
    pub bits: u32,
}

impl IntegerType {
    pub const fn new(class: TypeClass, bits: u32) -> Self {
        Self { class, bits }
    }
}

impl fmt::Display for IntegerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            TypeClass::Signed => write!(f, "int{}", self.bits),
            TypeClass::Unsigned => write!(f, "uint{}", self.bits),
        }
    }
}

impl FromStr for IntegerType {
    type Err = DataTypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (class, rest) = if let Some(rest) = text.strip_prefix("uint") {
            (TypeClass::Unsigned, rest)
        } else if let Some(rest) = text.strip_prefix("int") {
            (TypeClass::Signed, rest)
        } else {
            return Err(DataTypeParseError::new(text, "not an integer type"));
        };
        if rest.is_empty() {
            return Ok(Self::new(class, MAX_BITS));
        }
        let bits =
            parse_width(rest).ok_or_else(|| DataTypeParseError::new(text, "not an integer type"))?;
        check_bits(text, bits)?;
        Ok(Self::new(class, bits))
    }
}

/// A user-defined enum type, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumType {
    pub name: String,
}

impl EnumType {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for EnumType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum {}", self.name)
    }
}

/// Any type descriptor known to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Bytes(BytesType),
    Decimal(DecimalType),
    Integer(IntegerType),
    Enum(EnumType),
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bytes(ty) => ty.fmt(f),
            Self::Decimal(ty) => ty.fmt(f),
            Self::Integer(ty) => ty.fmt(f),
            Self::Enum(ty) => ty.fmt(f),
        }
    }
}

/// Parses elementary type strings. Enum types have no string form.
impl FromStr for DataType {
    type Err = DataTypeParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.starts_with("byte") {
            text.parse().map(Self::Bytes)
        } else if text.starts_with("fixed") || text.starts_with("ufixed") {
            text.parse().map(Self::Decimal)
        } else if text.starts_with("int") || text.starts_with("uint") {
            text.parse().map(Self::Integer)
        } else {
            Err(DataTypeParseError::new(text, "unrecognized type"))
        }
    }
}

impl From<BytesType> for DataType {
    fn from(ty: BytesType) -> Self {
        Self::Bytes(ty)
    }
}

impl From<DecimalType> for DataType {
    fn from(ty: DecimalType) -> Self {
        Self::Decimal(ty)
    }
}

impl From<IntegerType> for DataType {
    fn from(ty: IntegerType) -> Self {
        Self::Integer(ty)
    }
}

impl From<EnumType> for DataType {
    fn from(ty: EnumType) -> Self {
        Self::Enum(ty)
    }
}

/// Parse a positive decimal width with no sign and no leading zero.
fn parse_width(digits: &str) -> Option<u32> {
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    digits.parse().ok()
}

fn check_bits(text: &str, bits: u32) -> Result<(), DataTypeParseError> {
    if bits % 8 != 0 || bits > MAX_BITS {
        return Err(DataTypeParseError::new(
            text,
            format!("bit width must be a multiple of 8 between 8 and {MAX_BITS}"),
        ));
    }
    Ok(())
}
