//! Error types for document loading.
//!
//! Data failures are never errors: they are reported through
//! [`Report`](super::Report). These types cover documents that cannot be
//! read at all.

use super::diagnostic::SchemaDiagnostic;

/// Errors that can occur when loading input documents or policies.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// YAML deserialization of an input document failed.
    #[error("YAML deserialization failed: {message}")]
    Deserialize {
        /// The parser's message.
        message: String,
        /// Location of the failure, when the parser reported one.
        diagnostic: Option<SchemaDiagnostic>,
    },

    /// A match policy document was malformed.
    #[error("invalid match policy: {message}")]
    Policy {
        /// The parser's message.
        message: String,
        /// Location of the failure, when the parser reported one.
        diagnostic: Option<SchemaDiagnostic>,
    },
}

impl SchemaError {
    /// Returns the structured diagnostic, if one was recorded.
    #[must_use]
    pub const fn diagnostic(&self) -> Option<&SchemaDiagnostic> {
        match self {
            Self::Deserialize { diagnostic, .. } | Self::Policy { diagnostic, .. } => {
                diagnostic.as_ref()
            }
        }
    }
}
