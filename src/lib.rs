//! Coercion of loosely-typed input into validated canonical ABI values.
//!
//! This library sits between free-form caller input and an ABI encoder. It
//! takes raw values (hex strings, byte arrays, numbers, numeric strings,
//! big-number objects, explicit `{type, value}` annotations, previously
//! wrapped values) and produces canonical values that satisfy a target
//! type's length, range and precision rules.
//!
//! # Quick Start
//!
//! ```ignore
//! use abi_wrap::prelude::*;
//!
//! let options = WrapOptions::named("salt");
//! let salt = wrap_with(&BytesType::fixed(4), &Input::string("0xAB"), &options, &mut Unresolved)?;
//! assert_eq!(salt.payload, "0xab000000");
//!
//! let price: DecimalType = "ufixed128x18".parse()?;
//! let value = wrap_with(&price, &Input::string("1.23"), &WrapOptions::default(), &mut Unresolved)?;
//! assert_eq!(value.to_plain_string(), "1.23");
//! ```
//!
//! # Resolving unrecognized input
//!
//! Fixed-point coercion ends with a case that asks the caller to interpret
//! input no other case understood. [`wrap`] returns [`Step::Suspended`]
//! carrying a [`Request`]; answer it with [`Suspension::resume`], or drive
//! the whole run with a [`Resolver`] through [`wrap_with`].
//!
//! # Modules
//!
//! - [`types`] - Type descriptors (`bytesN`, `fixedMxN`, ...)
//! - [`value`] - Raw inputs and canonical values
//! - [`wrap`] - The coercion engine and its cases
//!
//! # Feature Flags
//!
//! - `json` - Convert JSON into inputs and canonical values into JSON
//! - `logging` - Enable library-level tracing (consumers provide their own subscriber)
//! - `cli` - Enable the command-line interface binary
//! - `full` - Enable all features

mod error;
#[cfg(feature = "json")]
mod json;
mod logging;
mod options;
pub mod prelude;
pub mod types;
pub mod value;
pub mod wrap;

pub use error::{ResolutionKind, Result, Specificity, TypeMismatchError, WrapError};
pub use options::WrapOptions;
pub use types::{
    BytesKind, BytesType, DataType, DataTypeParseError, DecimalType, EnumType, IntegerType,
    TypeClass,
};
pub use value::{BytesValue, DecimalValue, Input, Payload, Wrapped, WrappedError, WrappedResult};
pub use wrap::{
    Request, Resolution, Resolver, Response, Step, Suspension, Unresolved, WrapType, wrap,
    wrap_with,
};

// Re-export the numeric types inputs and values are built from
pub use bigdecimal::BigDecimal;
pub use num_bigint::BigInt;
