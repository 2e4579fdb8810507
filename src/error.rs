//! Error types for coercion.
//!
//! Every failed coercion surfaces exactly one [`WrapError`]. Ordinary
//! rejections are [`TypeMismatchError`]s ranked by [`Specificity`]; the
//! engine keeps the most specific one across all the cases it tried. A
//! resolver answering with the wrong kind of response is a protocol
//! violation and aborts the run immediately.

use std::fmt;

use thiserror::Error;

use crate::options::WrapOptions;
use crate::types::DataType;
use crate::value::Input;

/// How strongly a failed case believed the input was meant for it.
///
/// Level 1 means the input does not even resemble the form the case
/// handles; level 5 means it matched the form exactly but failed a
/// semantic check such as length, range or precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Specificity(u8);

impl Specificity {
    /// The input's shape is not the one this case handles.
    pub const UNRECOGNIZED: Self = Self(1);
    /// Baseline used by catch-all cases.
    pub const CATCH_ALL: Self = Self(2);
    /// The input resembles the form but could not be read.
    pub const PLAUSIBLE: Self = Self(3);
    /// The input is of the right family but not accepted in this mode.
    pub const LIKELY: Self = Self(4);
    /// The input matched precisely and failed a semantic check.
    pub const RECOGNIZED: Self = Self(5);

    /// Clamp `level` into `1..=5`.
    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 5))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The kind of externally resolved information a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    Decimal,
    Integer,
}

impl fmt::Display for ResolutionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decimal => f.write_str("decimal"),
            Self::Integer => f.write_str("integer"),
        }
    }
}

/// An input rejected by a case.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Cannot wrap {input} as {data_type}{}: {reason}", argument_suffix(.name))]
pub struct TypeMismatchError {
    pub data_type: DataType,
    pub input: Input,
    pub name: Option<String>,
    pub specificity: Specificity,
    pub reason: String,
}

impl TypeMismatchError {
    pub fn new(
        data_type: impl Into<DataType>,
        input: &Input,
        options: &WrapOptions,
        specificity: Specificity,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            data_type: data_type.into(),
            input: input.clone(),
            name: options.name.clone(),
            specificity,
            reason: reason.into(),
        }
    }
}

fn argument_suffix(name: &Option<String>) -> String {
    name.as_ref()
        .map(|name| format!(" for argument {name}"))
        .unwrap_or_default()
}

/// Error type for all coercion operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WrapError {
    /// No case accepted the input; this is the most specific rejection.
    #[error(transparent)]
    TypeMismatch(#[from] TypeMismatchError),

    /// A suspended case was resumed with a response it did not ask for.
    #[error("Resolver answered a {expected} request with a response of kind {got}")]
    BadResponseType {
        expected: ResolutionKind,
        got: ResolutionKind,
    },
}

/// A [`Result`] type alias using [`WrapError`].
pub type Result<T> = std::result::Result<T, WrapError>;

impl WrapError {
    pub(crate) fn mismatch(
        data_type: impl Into<DataType>,
        input: &Input,
        options: &WrapOptions,
        specificity: Specificity,
        reason: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch(TypeMismatchError::new(
            data_type,
            input,
            options,
            specificity,
            reason,
        ))
    }

    /// Returns `true` if this is an ordinary type mismatch.
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch(_))
    }

    /// Returns `true` if a resolver broke the request/response contract.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, Self::BadResponseType { .. })
    }

    /// Specificity of a type mismatch, `None` for protocol violations.
    pub fn specificity(&self) -> Option<Specificity> {
        match self {
            Self::TypeMismatch(mismatch) => Some(mismatch.specificity),
            Self::BadResponseType { .. } => None,
        }
    }

    /// Human-readable reason of a type mismatch.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch(mismatch) => Some(&mismatch.reason),
            Self::BadResponseType { .. } => None,
        }
    }
}
