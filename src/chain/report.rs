//! Error labels and chain-level outcomes.

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// Label attached to a failing step when the caller supplies none.
pub const DEFAULT_LABEL: &str = "conversion failed";

/// A caller-supplied error label.
///
/// Labels are attached to a step when it is added to a chain and surface
/// unchanged in reports when that step fails. Cloning is cheap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(Arc<str>);

impl Label {
    /// Creates a label from any string-like value.
    #[must_use]
    pub fn new(text: impl AsRef<str>) -> Self {
        Self(Arc::from(text.as_ref()))
    }

    /// Returns the label text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL)
    }
}

impl From<&str> for Label {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Label {
    fn from(text: String) -> Self {
        Self(Arc::from(text))
    }
}

impl PartialEq<&str> for Label {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outcome of applying a whole [`Chain`](super::Chain) to an input.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainReport {
    /// Every step continued; carries the final value.
    Continue(Value),
    /// A step stopped the chain early without error; carries its value.
    Stop(Value),
    /// A step failed; carries the label of the failing step.
    Error(Label),
}

impl ChainReport {
    /// Returns `true` for `Continue` and `Stop`.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        !matches!(self, Self::Error(_))
    }

    /// Returns `true` only for `Stop`.
    #[must_use]
    pub const fn is_stop(&self) -> bool {
        matches!(self, Self::Stop(_))
    }

    /// Borrows the produced value of a successful report.
    #[must_use]
    pub const fn value(&self) -> Option<&Value> {
        match self {
            Self::Continue(v) | Self::Stop(v) => Some(v),
            Self::Error(_) => None,
        }
    }

    /// Consumes the report, yielding its value or `Missing` on error.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Continue(v) | Self::Stop(v) => v,
            Self::Error(_) => Value::Missing,
        }
    }

    /// Borrows the error label of a failed report.
    #[must_use]
    pub const fn error(&self) -> Option<&Label> {
        match self {
            Self::Error(label) => Some(label),
            Self::Continue(_) | Self::Stop(_) => None,
        }
    }
}
