//! The request/response contract between a suspended coercion and the
//! external resolver that answers it.

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::error::ResolutionKind;
use crate::value::Input;

/// Information a suspended case needs from outside the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Interpret `input` as an exact decimal.
    Decimal { input: Input },
}

impl Request {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            Self::Decimal { .. } => ResolutionKind::Decimal,
        }
    }

    /// The raw input the resolver is asked to interpret.
    pub fn input(&self) -> &Input {
        match self {
            Self::Decimal { input } => input,
        }
    }
}

/// A resolver's answer to a [`Request`].
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Decimal(Resolution<BigDecimal>),
    Integer(Resolution<BigInt>),
}

impl Response {
    pub fn kind(&self) -> ResolutionKind {
        match self {
            Self::Decimal(_) => ResolutionKind::Decimal,
            Self::Integer(_) => ResolutionKind::Integer,
        }
    }

    /// A "could not interpret" answer matching `kind`.
    pub fn unrecognized(kind: ResolutionKind) -> Self {
        match kind {
            ResolutionKind::Decimal => Self::Decimal(Resolution::unrecognized()),
            ResolutionKind::Integer => Self::Integer(Resolution::unrecognized()),
        }
    }
}

/// The outcome of resolving one request.
///
/// A missing `value` means the resolver could not interpret the input;
/// `partially_recognized` tells the engine whether the input looked like
/// something the resolver understands, which raises the specificity of the
/// resulting error.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub value: Option<T>,
    pub reason: Option<String>,
    pub partially_recognized: bool,
}

impl<T> Resolution<T> {
    pub fn resolved(value: T) -> Self {
        Self {
            value: Some(value),
            reason: None,
            partially_recognized: false,
        }
    }

    pub fn unrecognized() -> Self {
        Self {
            value: None,
            reason: None,
            partially_recognized: false,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn partially_recognized(mut self) -> Self {
        self.partially_recognized = true;
        self
    }
}

/// Answers requests raised by suspended coercions.
///
/// Closures of type `FnMut(&Request) -> Response` are resolvers.
pub trait Resolver {
    fn resolve(&mut self, request: &Request) -> Response;
}

impl<F> Resolver for F
where
    F: FnMut(&Request) -> Response,
{
    fn resolve(&mut self, request: &Request) -> Response {
        self(request)
    }
}

/// A resolver that never recognizes anything.
///
/// Driving a coercion with it turns the resolver fallback into a plain
/// rejection, so the call completes without outside help.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unresolved;

impl Resolver for Unresolved {
    fn resolve(&mut self, request: &Request) -> Response {
        Response::unrecognized(request.kind())
    }
}
