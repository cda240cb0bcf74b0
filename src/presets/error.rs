//! Error type for preset converters.

use crate::value::Value;

/// Why a preset converter rejected its input.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The value's kind cannot be converted to the target.
    #[error("unable to represent {found} value as {target}")]
    Unrepresentable {
        /// Kind of the rejected value.
        found: &'static str,
        /// Name of the conversion target.
        target: &'static str,
    },

    /// The text was not valid JSON.
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The input did not describe a valid date.
    #[error("unable to represent '{0}' as a date")]
    InvalidDate(String),
}

impl ConversionError {
    pub(crate) const fn unrepresentable(value: &Value, target: &'static str) -> Self {
        Self::Unrepresentable {
            found: value.kind(),
            target,
        }
    }
}
