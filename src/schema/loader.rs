//! Multi-document input loading.
//!
//! Provides [`load_values`] which deserializes one or more YAML documents
//! from a single string into [`Value`]s ready to be matched. JSON is a
//! subset of YAML, so JSON documents load the same way.

use super::diagnostic::{SchemaDiagnostic, SchemaDiagnosticCode};
use super::error::SchemaError;
use crate::value::Value;

/// Synthetic source identifier used by [`load_values`].
const INLINE_SOURCE: &str = "<inline>";

/// Loads one or more input documents from a YAML string.
///
/// Documents are separated by `---`. Explicit `null`s load as
/// [`Value::Null`]; no value ever loads as [`Value::Missing`].
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] if the YAML is malformed.
///
/// # Examples
///
///     use treat::schema::load_values;
///     use treat::value::Value;
///
///     let docs = load_values("name: Ann\n---\n[1, 2]\n").unwrap();
///     assert_eq!(docs.len(), 2);
///     assert_eq!(docs[0].get("name"), &Value::from("Ann"));
pub fn load_values(input: &str) -> Result<Vec<Value>, SchemaError> {
    load_values_with_source(INLINE_SOURCE, input)
}

/// Loads input documents and records diagnostics against an explicit
/// source identifier.
///
/// # Errors
///
/// Returns [`SchemaError::Deserialize`] when YAML parsing fails.
pub fn load_values_with_source(source: &str, input: &str) -> Result<Vec<Value>, SchemaError> {
    let values: Vec<Value> = serde_saphyr::from_multiple(input).map_err(|error| {
        let message = error.to_string();
        let diagnostic = error.location().map(|location| {
            SchemaDiagnostic::at(
                SchemaDiagnosticCode::InputParseFailure,
                source,
                &message,
                location,
            )
        });
        SchemaError::Deserialize {
            message,
            diagnostic,
        }
    })?;
    tracing::debug!(source, documents = values.len(), "loaded input documents");
    Ok(values)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
