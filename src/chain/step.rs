//! The step contract and the constructors that build steps from plain
//! functions.
//!
//! Steps never carry error payloads. A failing step returns
//! [`StepResult::Error`] and the enclosing chain attaches the label the
//! caller supplied for that step. Converters that can fail are written as
//! `Fn(Value) -> Result<Value, E>` and adapted with [`fallible_step`].

use std::fmt::Display;

use super::stage::Chain;
use crate::value::Value;

/// The tri-state outcome of running a single step.
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    /// Hand the value to the next step.
    Continue(Value),
    /// Finish the chain successfully with this value, skipping later steps.
    Stop(Value),
    /// The step rejected its input.
    Error,
}

/// A single pure unit of conversion or validation.
///
/// Any `Fn(Value) -> StepResult` closure that is `Send + Sync` is a step.
pub trait Step: Send + Sync {
    /// Runs the step against one value.
    fn run(&self, value: Value) -> StepResult;
}

impl<F> Step for F
where
    F: Fn(Value) -> StepResult + Send + Sync,
{
    fn run(&self, value: Value) -> StepResult {
        self(value)
    }
}

/// A step that passes its input through unchanged.
#[must_use]
pub fn identity() -> impl Step {
    StepResult::Continue
}

/// Wraps a total conversion function; the step always continues.
#[must_use]
pub fn converting_step<F>(f: F) -> impl Step
where
    F: Fn(Value) -> Value + Send + Sync,
{
    move |value: Value| StepResult::Continue(f(value))
}

/// Wraps a conversion function that can fail.
///
/// `Ok` continues with the converted value; `Err` becomes
/// [`StepResult::Error`]. The error itself is only logged, since the label
/// reported to callers belongs to the chain.
#[must_use]
pub fn fallible_step<F, E>(f: F) -> impl Step
where
    F: Fn(Value) -> Result<Value, E> + Send + Sync,
    E: Display,
{
    move |value: Value| match f(value) {
        Ok(converted) => StepResult::Continue(converted),
        Err(error) => {
            tracing::debug!(%error, "converter rejected value");
            StepResult::Error
        }
    }
}

/// Wraps a predicate: the value continues unchanged when it holds and the
/// step fails otherwise.
#[must_use]
pub fn validation_step<P>(predicate: P) -> impl Step
where
    P: Fn(&Value) -> bool + Send + Sync,
{
    move |value: Value| {
        if predicate(&value) {
            StepResult::Continue(value)
        } else {
            StepResult::Error
        }
    }
}

/// Applies `chain` to every item of a list input.
///
/// Succeeds with the list of item values only when every item succeeds.
/// Any failing item, or an input that is not a list, fails the whole step;
/// there are no partial results at this level.
#[must_use]
pub fn array_of(chain: Chain) -> impl Step {
    move |value: Value| {
        let Value::List(items) = value else {
            return StepResult::Error;
        };
        let converted: Option<Vec<Value>> = items
            .into_iter()
            .map(|item| {
                let report = chain.apply(item);
                report.is_ok().then(|| report.into_value())
            })
            .collect();
        converted.map_or(StepResult::Error, |values| {
            StepResult::Continue(Value::List(values))
        })
    }
}

/// Substitutes `fallback` for a missing value; anything else passes through.
#[must_use]
pub fn by_default(fallback: Value) -> impl Step {
    move |value: Value| {
        if value.is_missing() {
            StepResult::Continue(fallback.clone())
        } else {
            StepResult::Continue(value)
        }
    }
}

/// Runs `step` only on provided values; `Missing` and `Null` continue
/// untouched.
#[must_use]
pub fn optional<S: Step>(step: S) -> impl Step {
    move |value: Value| {
        if value.is_provided() {
            step.run(value)
        } else {
            StepResult::Continue(value)
        }
    }
}

/// Stops the chain successfully when the value is missing.
#[must_use]
pub fn stop_when_missing() -> impl Step {
    |value: Value| {
        if value.is_missing() {
            StepResult::Stop(value)
        } else {
            StepResult::Continue(value)
        }
    }
}
