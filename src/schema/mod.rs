//! Schemas, the recursive matcher, and the reports it produces.
//!
//! A [`Schema`] is built from explicit constructors ([`field`], [`list`],
//! [`tuple`], [`object`]) and matched against an input with [`treat_like`]
//! or a configured [`Matcher`]. The resulting [`Report`] carries an overall
//! `ok` flag plus a `value` and an `error` that mirror the schema's shape, so
//! every failing field is reported at once.

mod diagnostic;
mod error;
mod loader;
mod matcher;
mod policy;
mod report;
mod types;

pub use diagnostic::{SchemaDiagnostic, SchemaDiagnosticCode, SourceLocation};
pub use error::SchemaError;
pub use loader::{load_values, load_values_with_source};
pub use matcher::{Matcher, NOT_SUITABLE, WRONG_CONTAINER, shape, shape_with, treat_like};
pub use policy::{ContainerPolicy, FanOut, MatchPolicy};
pub use report::{ErrorTree, Report};
pub use types::{Schema, field, list, object, tuple};
