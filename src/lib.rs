//! `treat`: composable validation and conversion of dynamic values.
//!
//! Build a [`chain::Chain`] of steps, arrange chains into a
//! [`schema::Schema`] of objects, lists and tuples, and match it against an
//! input to get a [`schema::Report`] whose value and errors mirror the
//! schema's shape.

/// Steps, chains and chain reports.
pub mod chain;
/// Ready-made converters, validators and base chains.
pub mod presets;
/// Schemas, the matcher, reports, policies and input loading.
pub mod schema;
/// The dynamic value type.
pub mod value;
