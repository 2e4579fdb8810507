//! Coercion of raw inputs into canonical values.
//!
//! A coercion tries an ordered list of [`Case`]s against one input. The
//! first case that produces a value wins; if every case fails, the most
//! specific rejection is reported. A case may also suspend with a
//! [`Request`] for information only the caller can provide; the run then
//! returns [`Step::Suspended`] and continues when the caller feeds a
//! [`Response`] back through [`Suspension::resume`].
//!
//! # Module Organization
//!
//! - [`request`]: the request/response contract and the [`Resolver`] trait
//! - `dispatch`: the ordered-case engine
//! - `bytes`: cases for `bytes` and `bytesN`
//! - `decimal`: cases for `fixedMxN` and `ufixedMxN`
//!
//! # Example
//!
//! ```ignore
//! use abi_wrap::{wrap_with, BytesType, Input, Unresolved, WrapOptions};
//!
//! let value = wrap_with(
//!     &BytesType::fixed(4),
//!     &Input::byte_sequence([1.0, 2.0]),
//!     &WrapOptions::default(),
//!     &mut Unresolved,
//! )?;
//! assert_eq!(value.payload, "0x01020000");
//! ```

mod bytes;
mod decimal;
mod dispatch;
pub mod request;

use std::fmt;

pub use request::{Request, Resolution, Resolver, Response, Unresolved};

use crate::error::{Result, WrapError};
use crate::options::WrapOptions;
use crate::types::{BytesType, DataType, DecimalType};
use crate::value::{BytesValue, DecimalValue, Input};

/// A target type with an ordered list of coercion cases.
pub trait WrapType: Clone + Into<DataType> + fmt::Display + 'static {
    /// The canonical value produced for this type.
    type Value: 'static;

    /// Every case, in priority order.
    fn cases() -> &'static [Case<Self>];

    /// The cases re-entered from an explicit type annotation.
    fn basic_cases() -> &'static [Case<Self>];
}

impl WrapType for BytesType {
    type Value = BytesValue;

    fn cases() -> &'static [Case<Self>] {
        &bytes::CASES
    }

    fn basic_cases() -> &'static [Case<Self>] {
        bytes::CASES.get(1..).unwrap_or(&[])
    }
}

impl WrapType for DecimalType {
    type Value = DecimalValue;

    fn cases() -> &'static [Case<Self>] {
        &decimal::CASES
    }

    fn basic_cases() -> &'static [Case<Self>] {
        decimal::CASES.get(1..).unwrap_or(&[])
    }
}

/// A case that finishes without outside help.
pub type ImmediateFn<T> = fn(&T, &Input, &WrapOptions) -> Result<<T as WrapType>::Value>;

/// A case that may suspend.
pub type ResumableFn<T> = fn(&T, &Input, &WrapOptions) -> Step<<T as WrapType>::Value>;

/// One candidate interpretation of an input.
pub struct Case<T: WrapType> {
    pub name: &'static str,
    run: CaseFn<T>,
}

enum CaseFn<T: WrapType> {
    Immediate(ImmediateFn<T>),
    Resumable(ResumableFn<T>),
}

impl<T: WrapType> Case<T> {
    pub const fn immediate(name: &'static str, run: ImmediateFn<T>) -> Self {
        Self {
            name,
            run: CaseFn::Immediate(run),
        }
    }

    pub const fn resumable(name: &'static str, run: ResumableFn<T>) -> Self {
        Self {
            name,
            run: CaseFn::Resumable(run),
        }
    }

    pub(crate) fn begin(&self, data_type: &T, input: &Input, options: &WrapOptions) -> Step<T::Value> {
        match self.run {
            CaseFn::Immediate(run) => run(data_type, input, options).into(),
            CaseFn::Resumable(run) => run(data_type, input, options),
        }
    }
}

/// The state a coercion (or a single case) is left in after advancing.
#[derive(Debug)]
pub enum Step<V> {
    Done(V),
    Failed(WrapError),
    Suspended(Suspension<V>),
}

impl<V> Step<V> {
    /// Drive this step to completion, answering requests with `resolver`.
    pub fn drive<R>(self, resolver: &mut R) -> Result<V>
    where
        R: Resolver + ?Sized,
    {
        let mut step = self;
        loop {
            match step {
                Step::Done(value) => return Ok(value),
                Step::Failed(error) => return Err(error),
                Step::Suspended(suspension) => {
                    let response = resolver.resolve(suspension.request());
                    step = suspension.resume(response);
                }
            }
        }
    }

    /// The finished result, or `None` if the coercion is suspended.
    pub fn into_result(self) -> Option<Result<V>> {
        match self {
            Step::Done(value) => Some(Ok(value)),
            Step::Failed(error) => Some(Err(error)),
            Step::Suspended(_) => None,
        }
    }

    pub fn is_suspended(&self) -> bool {
        matches!(self, Step::Suspended(_))
    }
}

impl<V> From<Result<V>> for Step<V> {
    fn from(result: Result<V>) -> Self {
        match result {
            Ok(value) => Step::Done(value),
            Err(error) => Step::Failed(error),
        }
    }
}

/// Continuation of a suspended computation.
pub(crate) trait Resume<V> {
    fn resume(self: Box<Self>, response: Response) -> Step<V>;
}

/// A coercion waiting for exactly one [`Response`].
pub struct Suspension<V> {
    request: Request,
    continuation: Box<dyn Resume<V>>,
}

impl<V> Suspension<V> {
    pub(crate) fn new(request: Request, continuation: impl Resume<V> + 'static) -> Self {
        Self {
            request,
            continuation: Box::new(continuation),
        }
    }

    /// What the suspended case is asking for.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Continue the coercion with the resolver's answer.
    pub fn resume(self, response: Response) -> Step<V> {
        self.continuation.resume(response)
    }
}

impl<V> fmt::Debug for Suspension<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspension")
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

/// Start coercing `input` to `data_type`.
///
/// Returns [`Step::Suspended`] if a case needs outside information; use
/// [`Suspension::resume`] or [`Step::drive`] to continue.
pub fn wrap<T: WrapType>(data_type: &T, input: &Input, options: &WrapOptions) -> Step<T::Value> {
    dispatch::run(data_type, input, options, T::cases())
}

/// Coerce `input` to `data_type`, answering any request with `resolver`.
pub fn wrap_with<T, R>(
    data_type: &T,
    input: &Input,
    options: &WrapOptions,
    resolver: &mut R,
) -> Result<T::Value>
where
    T: WrapType,
    R: Resolver + ?Sized,
{
    wrap(data_type, input, options).drive(resolver)
}
