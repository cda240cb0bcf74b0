//! The persistent chain: a linked list of stages that grows by wrapping.

use std::fmt;
use std::sync::Arc;

use super::report::{ChainReport, Label};
use super::step::{Step, StepResult, converting_step, fallible_step, validation_step};
use crate::value::Value;

/// One appended step plus the label reported when it fails.
struct Stage {
    prev: Option<Arc<Stage>>,
    step: Arc<dyn Step>,
    label: Option<Label>,
}

impl Drop for Stage {
    // Unlinks the predecessors one at a time so that dropping a long chain
    // does not recurse once per stage.
    fn drop(&mut self) {
        let mut next = self.prev.take();
        while let Some(stage) = next {
            next = Arc::into_inner(stage).and_then(|mut owned| owned.prev.take());
        }
    }
}

/// An immutable sequence of steps.
///
/// Each extension returns a new chain holding a shared reference to the
/// previous stages, so the original chain stays usable and any number of
/// branches can grow from the same base.
///
/// # Examples
///
///     use treat::chain::{Chain, ChainReport};
///     use treat::value::Value;
///
///     let shout = Chain::new()
///         .check(|v| v.as_str().is_some(), "err_not_string")
///         .map(|v| Value::from(v.as_str().unwrap_or_default().to_uppercase()));
///
///     assert_eq!(shout.apply(Value::from("hi")), ChainReport::Continue(Value::from("HI")));
///     assert_eq!(shout.apply(Value::Integer(1)), ChainReport::Error("err_not_string".into()));
#[derive(Clone, Default)]
pub struct Chain {
    last: Option<Arc<Stage>>,
    len: usize,
}

impl Chain {
    /// Creates the empty chain, which continues with its input unchanged.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None, len: 0 }
    }

    /// Returns the number of steps in the chain.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the chain has no steps.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends a step whose failure is reported with [`Label::default`].
    #[must_use]
    pub fn then<S: Step + 'static>(&self, step: S) -> Self {
        self.push(Arc::new(step), None)
    }

    /// Appends a step whose failure is reported with `label`.
    #[must_use]
    pub fn then_labelled<S: Step + 'static>(&self, step: S, label: impl Into<Label>) -> Self {
        self.push(Arc::new(step), Some(label.into()))
    }

    /// Appends a total conversion.
    ///
    /// `f` must be total: a panic inside it unwinds out of
    /// [`apply`](Self::apply). Use [`try_map`](Self::try_map) for
    /// conversions that can fail.
    #[must_use]
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.then(converting_step(f))
    }

    /// Appends a conversion that can fail, reported with `label`.
    #[must_use]
    pub fn try_map<F, E>(&self, f: F, label: impl Into<Label>) -> Self
    where
        F: Fn(Value) -> Result<Value, E> + Send + Sync + 'static,
        E: fmt::Display + 'static,
    {
        self.then_labelled(fallible_step(f), label)
    }

    /// Appends a predicate check, reported with `label` when it fails.
    #[must_use]
    pub fn check<P>(&self, predicate: P, label: impl Into<Label>) -> Self
    where
        P: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.then_labelled(validation_step(predicate), label)
    }

    fn push(&self, step: Arc<dyn Step>, label: Option<Label>) -> Self {
        Self {
            last: Some(Arc::new(Stage {
                prev: self.last.clone(),
                step,
                label,
            })),
            len: self.len + 1,
        }
    }

    /// Runs every step in order against `input`.
    ///
    /// The first failing step ends the run with its own label, and the first
    /// stopping step ends it with its value; no later step is invoked in
    /// either case.
    #[must_use]
    pub fn apply(&self, input: Value) -> ChainReport {
        let mut current = input;
        for (index, stage) in self.stages().into_iter().enumerate() {
            tracing::trace!(step = index, "running chain step");
            match stage.step.run(current) {
                StepResult::Continue(next) => current = next,
                StepResult::Stop(value) => {
                    tracing::trace!(step = index, "chain stopped early");
                    return ChainReport::Stop(value);
                }
                StepResult::Error => {
                    let label = stage.label.clone().unwrap_or_default();
                    tracing::trace!(step = index, %label, "chain step failed");
                    return ChainReport::Error(label);
                }
            }
        }
        ChainReport::Continue(current)
    }

    /// Collects the stages oldest first.
    fn stages(&self) -> Vec<&Stage> {
        let mut stages = Vec::with_capacity(self.len);
        let mut cursor = self.last.as_deref();
        while let Some(stage) = cursor {
            stages.push(stage);
            cursor = stage.prev.as_deref();
        }
        stages.reverse();
        stages
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<Option<&str>> = self
            .stages()
            .into_iter()
            .map(|stage| stage.label.as_ref().map(Label::as_str))
            .collect();
        f.debug_struct("Chain").field("labels", &labels).finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for chain composition and the apply algorithm.
    use super::*;
    use crate::chain::DEFAULT_LABEL;
    use rstest::{fixture, rstest};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn is_string(value: &Value) -> bool {
        value.as_str().is_some()
    }

    fn trim(value: Value) -> Value {
        match value {
            Value::String(s) => Value::String(s.trim().to_owned()),
            other => other,
        }
    }

    fn longer_than(n: usize) -> impl Fn(&Value) -> bool {
        move |value: &Value| value.as_str().is_some_and(|s| s.chars().count() > n)
    }

    /// Fixture: provided → string → trimmed → longer than one char.
    #[fixture]
    fn required_string() -> Chain {
        Chain::new()
            .check(Value::is_provided, "err_required")
            .check(is_string, "err_not_string")
            .map(trim)
            .check(longer_than(1), "err_too_short")
    }

    #[rstest]
    #[case::ok(Value::from("Hello "), ChainReport::Continue(Value::from("Hello")))]
    #[case::missing(Value::Missing, ChainReport::Error("err_required".into()))]
    #[case::wrong_type(Value::Integer(45), ChainReport::Error("err_not_string".into()))]
    #[case::too_short(Value::from("M"), ChainReport::Error("err_too_short".into()))]
    fn labels_come_from_the_failing_step(
        required_string: Chain,
        #[case] input: Value,
        #[case] expected: ChainReport,
    ) {
        assert_eq!(required_string.apply(input), expected);
    }

    #[test]
    fn empty_chain_continues_with_input() {
        let chain = Chain::new();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(Value::Null), ChainReport::Continue(Value::Null));
    }

    #[test]
    fn unlabelled_failure_uses_default_label() {
        let chain = Chain::new().then(|_: Value| StepResult::Error);
        assert_eq!(chain.apply(Value::Null), ChainReport::Error(DEFAULT_LABEL.into()));
    }

    #[test]
    fn failed_fallible_converter_reports_chain_label() {
        let chain = Chain::new().try_map(
            |v: Value| v.as_str().map(|s| Value::from(s.len() > 3)).ok_or("no length"),
            "err_no_length",
        );
        assert_eq!(chain.apply(Value::from("abcd")), ChainReport::Continue(Value::Bool(true)));
        assert_eq!(chain.apply(Value::Bool(true)), ChainReport::Error("err_no_length".into()));
    }

    #[rstest]
    #[case::even(Value::Integer(6), ChainReport::Continue(Value::Integer(12)))]
    #[case::odd(Value::Integer(5), ChainReport::Stop(Value::from("-5")))]
    fn stop_value_may_differ_in_kind(#[case] input: Value, #[case] expected: ChainReport) {
        let chain = Chain::new()
            .then(|v: Value| match v.as_i64() {
                Some(n) if n.rem_euclid(2) == 0 => StepResult::Continue(v),
                Some(n) => StepResult::Stop(Value::from((-n).to_string())),
                None => StepResult::Error,
            })
            .map(|v| v.as_i64().map_or(v, |n| Value::Integer(n * 2)));
        assert_eq!(chain.apply(input), expected);
    }

    #[test]
    fn steps_after_a_failure_never_run() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let chain = Chain::new()
            .check(|_| false, "boom")
            .map(move |v| {
                counter.fetch_add(1, Ordering::SeqCst);
                v
            });
        assert_eq!(chain.apply(Value::Null), ChainReport::Error("boom".into()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn branches_share_a_base_without_interfering() {
        let base = Chain::new().check(is_string, "err_not_string");
        let upper = base.map(|v| Value::from(v.as_str().unwrap_or_default().to_uppercase()));
        let lower = base.map(|v| Value::from(v.as_str().unwrap_or_default().to_lowercase()));

        assert_eq!(base.len(), 1);
        assert_eq!(upper.len(), 2);
        assert_eq!(base.apply(Value::from("Ab")), ChainReport::Continue(Value::from("Ab")));
        assert_eq!(upper.apply(Value::from("Ab")), ChainReport::Continue(Value::from("AB")));
        assert_eq!(lower.apply(Value::from("Ab")), ChainReport::Continue(Value::from("ab")));
    }

    #[test]
    #[should_panic(expected = "input should be a string")]
    fn panicking_map_unwinds_out_of_apply() {
        let chain = Chain::new()
            .map(|v| Value::from(v.as_str().expect("input should be a string").to_uppercase()));
        let _report = chain.apply(Value::Integer(3));
    }

    #[test]
    fn fallible_conversion_reports_instead_of_unwinding() {
        let chain = Chain::new().try_map(
            |v: Value| v.as_str().map(|s| Value::from(s.to_uppercase())).ok_or("not a string"),
            "err_not_string",
        );
        assert_eq!(chain.apply(Value::Integer(3)), ChainReport::Error("err_not_string".into()));
    }

    #[test]
    fn dropping_a_very_long_chain_does_not_overflow() {
        let long = (0..100_000).fold(Chain::new(), |chain, _| chain.map(|v| v));
        let shared = long.clone();
        assert_eq!(long.len(), 100_000);
        drop(long);
        assert_eq!(shared.apply(Value::Integer(1)), ChainReport::Continue(Value::Integer(1)));
        drop(shared);
    }

    #[test]
    fn dropping_a_branch_keeps_the_shared_base_alive() {
        let base = (0..1_000).fold(Chain::new(), |chain, _| chain.map(|v| v));
        let branch = base.check(is_string, "err_not_string");
        drop(branch);
        assert_eq!(base.len(), 1_000);
        assert_eq!(base.apply(Value::Null), ChainReport::Continue(Value::Null));
    }

    #[test]
    fn debug_lists_step_labels() {
        let chain = Chain::new().map(trim).check(is_string, "err_not_string");
        assert_eq!(
            format!("{chain:?}"),
            r#"Chain { labels: [None, Some("err_not_string")] }"#
        );
    }
}
