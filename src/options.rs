//! Per-call coercion options.

/// Options controlling a single coercion.
///
/// # Example
///
/// ```ignore
/// use abi_wrap::WrapOptions;
///
/// let options = WrapOptions::named("amount").with_loose(true);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// Argument name reported in errors.
    pub name: Option<String>,
    /// Accept already-typed values whose type only loosely matches the
    /// target, re-validating them against it.
    pub loose: bool,
}

impl WrapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            loose: false,
        }
    }

    pub fn with_loose(mut self, loose: bool) -> Self {
        self.loose = loose;
        self
    }

    /// A copy of these options with loose mode switched on.
    pub(crate) fn loosened(&self) -> Self {
        self.clone().with_loose(true)
    }
}
