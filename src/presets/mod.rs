//! Ready-made converters, validators and base chains.
//!
//! Nothing here is special to the engine: converters are plain
//! `Fn(Value) -> Result<Value, ConversionError>` functions used with
//! [`Chain::try_map`], validators are plain `Fn(&Value) -> bool` predicates
//! used with [`Chain::check`], and the base chains are ordinary chains.
//!
//! # Examples
//!
//!     use treat::presets::{self, converters, validators};
//!     use treat::schema::{object, field, treat_like};
//!     use treat::value::Value;
//!
//!     let schema = object([
//!         ("name", field(presets::string().try_map(converters::trim, "err_not_string"))),
//!         ("age", field(presets::number().check(validators::positive, "err_not_positive"))),
//!     ]);
//!     let input: Value = [("name", Value::from(" Ann ")), ("age", Value::Integer(-1))]
//!         .into_iter()
//!         .collect();
//!
//!     let report = treat_like(&schema, input);
//!     assert!(!report.ok);
//!     assert_eq!(report.value.get("name"), &Value::from("Ann"));
//!     assert_eq!(report.error.field("age").label().map(|l| l.as_str()), Some("err_not_positive"));

pub mod converters;
mod error;
pub mod validators;

pub use error::ConversionError;

use crate::chain::Chain;
use validators::{Kind, optional_type_check};

/// Label used by [`string`] when the value is neither missing nor a string.
pub const NOT_A_STRING: &str = "not a string";
/// Label used by [`number`] when the value is neither missing nor a number.
pub const NOT_A_NUMBER: &str = "not a number";
/// Label used by [`boolean`] when the value is neither missing nor a boolean.
pub const NOT_A_BOOLEAN: &str = "not a boolean";

/// A chain accepting missing values and strings.
#[must_use]
pub fn string() -> Chain {
    Chain::new().check(optional_type_check(Kind::String), NOT_A_STRING)
}

/// A chain accepting missing values and numbers.
#[must_use]
pub fn number() -> Chain {
    Chain::new().check(optional_type_check(Kind::Number), NOT_A_NUMBER)
}

/// A chain accepting missing values and booleans.
#[must_use]
pub fn boolean() -> Chain {
    Chain::new().check(optional_type_check(Kind::Boolean), NOT_A_BOOLEAN)
}

/// The empty chain, accepting anything unchanged.
#[must_use]
pub const fn any() -> Chain {
    Chain::new()
}
