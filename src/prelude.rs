//! Convenient re-exports for common usage patterns.
//!
//! This module provides a single import to bring all commonly used types
//! into scope.
//!
//! # Example
//!
//! ```ignore
//! use abi_wrap::prelude::*;
//!
//! let ty: DecimalType = "fixed128x18".parse()?;
//! let value = wrap_with(&ty, &Input::string("-0.5"), &WrapOptions::default(), &mut Unresolved)?;
//! ```

// Errors
pub use crate::error::{Result, Specificity, WrapError};

// Options
pub use crate::options::WrapOptions;

// Types and values
pub use crate::types::{BytesType, DataType, DecimalType};
pub use crate::value::{BytesValue, DecimalValue, Input, Wrapped};

// Coercion
pub use crate::wrap::{Request, Resolution, Resolver, Response, Step, Unresolved, wrap, wrap_with};

// Dependency re-exports
pub use crate::{BigDecimal, BigInt};
