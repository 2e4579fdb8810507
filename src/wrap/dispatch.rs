//! The ordered-case engine.
//!
//! Cases are tried strictly in list order. A case that produces a value
//! ends the run. A type mismatch is remembered if it is more specific than
//! every earlier one (so ties keep the earliest), and the next case is
//! tried. A suspended case suspends the whole run; resuming feeds the
//! response to that same case and carries on from there. A protocol
//! violation ends the run at once.

use super::{Case, Response, Resume, Step, Suspension, WrapType};
use crate::error::{Specificity, TypeMismatchError, WrapError};
use crate::logging::{debug, trace};
use crate::options::WrapOptions;
use crate::value::Input;

/// Run `cases` against `input`.
pub(crate) fn run<T: WrapType>(
    data_type: &T,
    input: &Input,
    options: &WrapOptions,
    cases: &'static [Case<T>],
) -> Step<T::Value> {
    Dispatch {
        data_type: data_type.clone(),
        input: input.clone(),
        options: options.clone(),
        cases,
        next: 0,
        best: None,
    }
    .advance()
}

struct Dispatch<T: WrapType> {
    data_type: T,
    input: Input,
    options: WrapOptions,
    cases: &'static [Case<T>],
    /// Index of the next case to begin.
    next: usize,
    /// Most specific mismatch so far.
    best: Option<TypeMismatchError>,
}

impl<T: WrapType> Dispatch<T> {
    fn advance(mut self) -> Step<T::Value> {
        let cases = self.cases;
        let Some(case) = cases.get(self.next) else {
            return self.finish();
        };
        self.next += 1;
        trace!(data_type = %self.data_type, case = case.name, "trying case");
        let step = case.begin(&self.data_type, &self.input, &self.options);
        self.settle(step)
    }

    /// Act on the outcome of the case that just ran (index `next - 1`).
    fn settle(mut self, step: Step<T::Value>) -> Step<T::Value> {
        match step {
            Step::Done(value) => {
                debug!(data_type = %self.data_type, case = self.current_case(), "case accepted input");
                Step::Done(value)
            }
            Step::Failed(WrapError::TypeMismatch(mismatch)) => {
                trace!(
                    case = self.current_case(),
                    specificity = mismatch.specificity.level(),
                    reason = %mismatch.reason,
                    "case rejected input"
                );
                self.record(mismatch);
                self.advance()
            }
            Step::Failed(fatal) => Step::Failed(fatal),
            Step::Suspended(suspension) => {
                debug!(case = self.current_case(), request = ?suspension.request.kind(), "case suspended");
                let Suspension {
                    request,
                    continuation,
                } = suspension;
                Step::Suspended(Suspension::new(
                    request,
                    Pending {
                        dispatch: self,
                        case: continuation,
                    },
                ))
            }
        }
    }

    fn record(&mut self, mismatch: TypeMismatchError) {
        if self
            .best
            .as_ref()
            .is_none_or(|best| mismatch.specificity > best.specificity)
        {
            self.best = Some(mismatch);
        }
    }

    fn finish(self) -> Step<T::Value> {
        let error = self.best.unwrap_or_else(|| {
            TypeMismatchError::new(
                self.data_type.clone(),
                &self.input,
                &self.options,
                Specificity::UNRECOGNIZED,
                "No coercion cases are available for this type",
            )
        });
        debug!(
            data_type = %self.data_type,
            specificity = error.specificity.level(),
            reason = %error.reason,
            "all cases rejected input"
        );
        Step::Failed(WrapError::TypeMismatch(error))
    }

    fn current_case(&self) -> &'static str {
        self.next
            .checked_sub(1)
            .and_then(|index| self.cases.get(index))
            .map_or("<none>", |case| case.name)
    }
}

/// A run waiting on one of its cases.
struct Pending<T: WrapType> {
    dispatch: Dispatch<T>,
    case: Box<dyn Resume<T::Value>>,
}

impl<T: WrapType> Resume<T::Value> for Pending<T> {
    fn resume(self: Box<Self>, response: Response) -> Step<T::Value> {
        let Pending { dispatch, case } = *self;
        let step = case.resume(response);
        dispatch.settle(step)
    }
}
