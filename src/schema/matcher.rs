//! The recursive schema matcher.
//!
//! [`Matcher::run`] walks a [`Schema`] alongside an input [`Value`],
//! applying each leaf chain to the value found at the same position and
//! folding the per-position results back into a [`Report`] shaped like the
//! schema. A failure at one position never prevents its siblings from being
//! evaluated and reported.

use indexmap::IndexMap;
use rayon::prelude::*;

use super::policy::{ContainerPolicy, FanOut, MatchPolicy};
use super::report::Report;
use super::types::Schema;
use crate::chain::{Chain, ChainReport, Label, Step, StepResult};
use crate::value::Value;

/// Error label for a schema node the matcher cannot interpret.
pub const NOT_SUITABLE: &str = "not suitable";

/// Error label for a container node whose input has the wrong kind under
/// [`ContainerPolicy::Strict`].
pub const WRONG_CONTAINER: &str = "wrong container type";

/// Matches schemas against inputs under a fixed [`MatchPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Matcher {
    policy: MatchPolicy,
}

impl Matcher {
    /// Creates a matcher with the given policy.
    #[must_use]
    pub const fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    /// Returns the matcher's policy.
    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Matches `schema` against `input`.
    #[must_use]
    pub fn run(&self, schema: &Schema, input: Value) -> Report {
        match schema {
            Schema::Field(chain) => leaf(chain, input),
            Schema::List(item) => self.list(item, input),
            Schema::Tuple(items) if items.is_empty() => {
                tracing::debug!("empty tuple schema is not suitable for matching");
                Report::failure(Label::new(NOT_SUITABLE))
            }
            Schema::Tuple(items) => self.tuple(items, input),
            Schema::Object(fields) => self.object(fields, input),
        }
    }

    fn list(&self, item: &Schema, input: Value) -> Report {
        let Some(values) = self.items_of(input) else {
            return wrong_container("list");
        };
        let pairs = values.into_iter().map(|value| (item, value)).collect();
        Report::from_items(self.fan_out(pairs))
    }

    fn tuple(&self, schemas: &[Schema], input: Value) -> Report {
        let Some(values) = self.items_of(input) else {
            return wrong_container("tuple");
        };
        let mut remaining = values.into_iter();
        let pairs = schemas
            .iter()
            .map(|schema| (schema, remaining.next().unwrap_or_default()))
            .collect();
        Report::from_items(self.fan_out(pairs))
    }

    fn object(&self, fields: &IndexMap<String, Schema>, input: Value) -> Report {
        let mut entries = match (input, self.policy.containers) {
            (Value::Map(entries), _) => entries,
            (_, ContainerPolicy::Coerce) => IndexMap::new(),
            (_, ContainerPolicy::Strict) => return wrong_container("object"),
        };
        let pairs = fields
            .iter()
            .map(|(name, schema)| (schema, entries.swap_remove(name).unwrap_or_default()))
            .collect();
        let children = self.fan_out(pairs);
        Report::from_fields(fields.keys().cloned().zip(children).collect())
    }

    /// Unpacks a list input, or returns `None` when the strict policy
    /// rejects a non-list.
    fn items_of(&self, input: Value) -> Option<Vec<Value>> {
        match (input, self.policy.containers) {
            (Value::List(items), _) => Some(items),
            (_, ContainerPolicy::Coerce) => Some(Vec::new()),
            (_, ContainerPolicy::Strict) => None,
        }
    }

    fn fan_out(&self, pairs: Vec<(&Schema, Value)>) -> Vec<Report> {
        match self.policy.fan_out {
            FanOut::Sequential => pairs
                .into_iter()
                .map(|(schema, value)| self.run(schema, value))
                .collect(),
            FanOut::Parallel => pairs
                .into_par_iter()
                .map(|(schema, value)| self.run(schema, value))
                .collect(),
        }
    }
}

fn leaf(chain: &Chain, input: Value) -> Report {
    match chain.apply(input) {
        ChainReport::Continue(value) | ChainReport::Stop(value) => Report::success(value),
        ChainReport::Error(label) => Report::failure(label),
    }
}

fn wrong_container(node: &'static str) -> Report {
    tracing::debug!(node, "strict policy rejected input container");
    Report::failure(Label::new(WRONG_CONTAINER))
}

/// Matches `schema` against `input` with the default policy: wrong
/// containers coerce to empty and children are evaluated sequentially.
///
/// # Examples
///
///     use treat::chain::Chain;
///     use treat::schema::{list, treat_like, ErrorTree};
///     use treat::value::Value;
///
///     let names = list(Chain::new().check(|v| v.as_str().is_some_and(|s| s.len() > 1), "err_too_short"));
///     let report = treat_like(&names, Value::from(vec!["abc", "a"]));
///
///     assert!(!report.ok);
///     assert_eq!(report.value, Value::List(vec![Value::from("abc"), Value::Missing]));
///     assert_eq!(report.error.item(0), &ErrorTree::None);
///     assert_eq!(report.error.item(1), &ErrorTree::Label("err_too_short".into()));
#[must_use]
pub fn treat_like(schema: &Schema, input: Value) -> Report {
    Matcher::default().run(schema, input)
}

/// A step that matches its input against `schema` with the default policy.
///
/// Lets a whole structure be validated inside a chain. The step continues
/// with the report's value when the report is ok and fails otherwise; the
/// per-position errors are collapsed into the label of the chain step.
#[must_use]
pub fn shape(schema: Schema) -> impl Step {
    shape_with(schema, MatchPolicy::default())
}

/// Like [`shape`], with an explicit policy.
#[must_use]
pub fn shape_with(schema: Schema, policy: MatchPolicy) -> impl Step {
    let matcher = Matcher::new(policy);
    move |value: Value| {
        let report = matcher.run(&schema, value);
        if report.ok {
            StepResult::Continue(report.value)
        } else {
            tracing::debug!(errors = ?report.error.flatten(), "nested shape rejected value");
            StepResult::Error
        }
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
