//! Unit tests for the schema matcher.

use super::*;
use crate::chain::Label;
use crate::schema::report::ErrorTree;
use crate::schema::types::{field, list, object, tuple};
use rstest::{fixture, rstest};

fn is_integer(value: &Value) -> bool {
    value.as_i64().is_some()
}

fn integer() -> Chain {
    Chain::new().check(is_integer, "err_not_integer")
}

fn label(text: &str) -> ErrorTree {
    ErrorTree::Label(Label::from(text))
}

/// Fixture: `{a: integer, b: integer}`.
#[fixture]
fn pair() -> Schema {
    object([("a", field(integer())), ("b", field(integer()))])
}

fn matchers() -> [Matcher; 2] {
    [
        Matcher::default(),
        Matcher::new(MatchPolicy::default().with_fan_out(FanOut::Parallel)),
    ]
}

#[rstest]
fn object_failures_stay_local(pair: Schema) {
    for matcher in matchers() {
        let input: Value = [("a", Value::Integer(1)), ("b", Value::from("x"))]
            .into_iter()
            .collect();
        let report = matcher.run(&pair, input);
        assert!(!report.ok);
        assert_eq!(report.value.get("a"), &Value::Integer(1));
        assert_eq!(report.value.get("b"), &Value::Missing);
        assert_eq!(report.error.field("a"), &ErrorTree::None);
        assert_eq!(report.error.field("b"), &label("err_not_integer"));
    }
}

#[rstest]
fn object_drops_undeclared_keys_and_keeps_schema_order(pair: Schema) {
    let input: Value = [("extra", 9), ("b", 2), ("a", 1)].into_iter().collect();
    let report = treat_like(&pair, input);
    assert!(report.ok);
    let expected: Value = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(report.value, expected);
}

#[rstest]
#[case::missing(Value::Missing)]
#[case::null(Value::Null)]
#[case::string(Value::from("ab"))]
fn object_coerces_non_maps_to_missing_fields(pair: Schema, #[case] input: Value) {
    let report = treat_like(&pair, input);
    assert!(!report.ok);
    assert_eq!(report.error.field("a"), &label("err_not_integer"));
    assert_eq!(report.error.field("b"), &label("err_not_integer"));
}

#[rstest]
#[case::missing(Value::Missing)]
#[case::null(Value::Null)]
#[case::string(Value::from("not a list"))]
#[case::map([("a", 1)].into_iter().collect())]
fn list_coerces_non_lists_to_empty(#[case] input: Value) {
    let report = treat_like(&list(integer()), input);
    assert!(report.ok);
    assert_eq!(report.value, Value::List(Vec::new()));
    assert_eq!(report.error, ErrorTree::List(Vec::new()));
}

#[test]
fn list_reports_every_item() {
    for matcher in matchers() {
        let input = Value::List(vec![
            Value::Integer(1),
            Value::from("x"),
            Value::Integer(3),
            Value::Null,
        ]);
        let report = matcher.run(&list(integer()), input);
        assert!(!report.ok);
        assert_eq!(
            report.value,
            Value::List(vec![
                Value::Integer(1),
                Value::Missing,
                Value::Integer(3),
                Value::Missing,
            ])
        );
        assert_eq!(
            report.error,
            ErrorTree::List(vec![
                ErrorTree::None,
                label("err_not_integer"),
                ErrorTree::None,
                label("err_not_integer"),
            ])
        );
    }
}

#[test]
fn tuple_pads_short_input_with_missing() {
    let schema = tuple([field(integer()), field(Chain::new())]);
    let report = treat_like(&schema, Value::from(vec![5]));
    assert!(report.ok);
    assert_eq!(
        report.value,
        Value::List(vec![Value::Integer(5), Value::Missing])
    );
    assert_eq!(
        report.error,
        ErrorTree::List(vec![ErrorTree::None, ErrorTree::None])
    );
}

#[test]
fn tuple_ignores_surplus_items() {
    let schema = tuple([field(integer()), field(integer())]);
    let report = treat_like(&schema, Value::from(vec![1, 2, 3]));
    assert!(report.ok);
    assert_eq!(report.value, Value::from(vec![1, 2]));
}

#[test]
fn single_item_tuple_is_positional() {
    let schema = tuple([field(integer())]);
    let report = treat_like(&schema, Value::from(vec![1, 2]));
    assert_eq!(report.value, Value::from(vec![1]));
}

#[test]
fn empty_tuple_is_not_suitable() {
    let report = treat_like(&tuple([]), Value::from(vec![1]));
    assert!(!report.ok);
    assert_eq!(report.value, Value::Missing);
    assert_eq!(report.error, label(NOT_SUITABLE));
}

#[test]
fn stop_values_count_as_success() {
    let schema = field(
        Chain::new()
            .then(crate::chain::stop_when_missing())
            .check(is_integer, "err_not_integer"),
    );
    let report = treat_like(&schema, Value::Missing);
    assert!(report.ok);
    assert_eq!(report.value, Value::Missing);
    assert_eq!(report.error, ErrorTree::None);
}

#[test]
fn nested_structures_mirror_the_schema() {
    let schema = object([
        ("id", field(integer())),
        ("point", tuple([field(integer()), field(integer())])),
        ("tags", list(integer())),
    ]);
    let input: Value = [
        ("id", Value::Integer(7)),
        ("point", Value::from(vec![Value::Integer(1), Value::from("y")])),
        ("tags", Value::from(vec![Value::from("t"), Value::Integer(2)])),
    ]
    .into_iter()
    .collect();

    for matcher in matchers() {
        let report = matcher.run(&schema, input.clone());
        assert!(!report.ok);
        assert_eq!(
            report.error.flatten(),
            vec![
                ("point.1".to_owned(), Label::from("err_not_integer")),
                ("tags.0".to_owned(), Label::from("err_not_integer")),
            ]
        );
        assert_eq!(report.value.get("id"), &Value::Integer(7));
        assert_eq!(report.value.get("tags").get_index(1), &Value::Integer(2));
    }
}

#[rstest]
#[case::list_given_string(Schema::list(field(integer())), Value::from("x"))]
#[case::list_given_missing(Schema::list(field(integer())), Value::Missing)]
#[case::tuple_given_map(
    tuple([field(integer()), field(integer())]),
    [("a", 1)].into_iter().collect()
)]
#[case::object_given_list(object([("a", field(integer()))]), Value::from(vec![1]))]
#[case::object_given_null(object([("a", field(integer()))]), Value::Null)]
fn strict_policy_rejects_wrong_containers(#[case] schema: Schema, #[case] input: Value) {
    let report = Matcher::new(MatchPolicy::strict()).run(&schema, input);
    assert!(!report.ok);
    assert_eq!(report.value, Value::Missing);
    assert_eq!(report.error, label(WRONG_CONTAINER));
}

#[test]
fn strict_policy_only_fails_the_offending_node() {
    let schema = object([("a", field(integer())), ("tags", list(integer()))]);
    let input: Value = [("a", Value::Integer(1)), ("tags", Value::from("oops"))]
        .into_iter()
        .collect();
    let report = Matcher::new(MatchPolicy::strict()).run(&schema, input);
    assert!(!report.ok);
    assert_eq!(report.value.get("a"), &Value::Integer(1));
    assert_eq!(report.error.field("a"), &ErrorTree::None);
    assert_eq!(report.error.field("tags"), &label(WRONG_CONTAINER));
}

#[test]
fn shape_step_embeds_a_schema_in_a_chain() {
    let records = Chain::new()
        .then_labelled(shape(list(object([("n", field(integer()))]))), "err_records");
    let good = Value::from(vec![Value::from_iter([("n", 1)])]);
    let bad = Value::from(vec![Value::from_iter([("n", "x")])]);

    assert_eq!(records.apply(good.clone()), ChainReport::Continue(good));
    assert_eq!(records.apply(bad), ChainReport::Error("err_records".into()));
}

#[test]
fn schemas_are_reusable_across_matches() {
    let schema = list(integer());
    let first = treat_like(&schema, Value::from(vec![1]));
    let second = treat_like(&schema, Value::from(vec!["x"]));
    assert!(first.ok);
    assert!(!second.ok);
}
