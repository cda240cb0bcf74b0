//! Ready-made predicates for [`Chain::check`](crate::chain::Chain::check).

use std::cmp::Ordering;

use regex::Regex;

use crate::value::Value;

/// Holds for any value except `Missing` and `Null`.
#[must_use]
pub const fn provided(value: &Value) -> bool {
    value.is_provided()
}

/// Holds for strings.
#[must_use]
pub const fn is_string(value: &Value) -> bool {
    matches!(value, Value::String(_))
}

/// Holds for integers and floats.
#[must_use]
pub const fn is_number(value: &Value) -> bool {
    matches!(value, Value::Integer(_) | Value::Float(_))
}

/// Holds for booleans.
#[must_use]
pub const fn is_bool(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

/// Holds for lists.
#[must_use]
pub const fn is_list(value: &Value) -> bool {
    matches!(value, Value::List(_))
}

/// Holds for maps.
#[must_use]
pub const fn is_map(value: &Value) -> bool {
    matches!(value, Value::Map(_))
}

/// A kind accepted by [`optional_type_check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// [`Value::String`].
    String,
    /// [`Value::Integer`] or [`Value::Float`].
    Number,
    /// [`Value::Bool`].
    Boolean,
    /// [`Value::Map`].
    Map,
}

/// Holds when the value is missing or has the given kind.
///
/// An explicit `Null` does not hold.
#[must_use]
pub fn optional_type_check(kind: Kind) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    move |value: &Value| match value {
        Value::Missing => true,
        Value::Null => false,
        _ => match kind {
            Kind::String => is_string(value),
            Kind::Number => is_number(value),
            Kind::Boolean => is_bool(value),
            Kind::Map => is_map(value),
        },
    }
}

/// Numeric size of a value: the number itself, or the character count of a
/// string, or the length of a list or map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Size {
    /// An exact integral size.
    Whole(i64),
    /// A fractional size.
    Fraction(f64),
}

impl Size {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Integer(n) => Some(Self::Whole(*n)),
            Value::Float(x) => Some(Self::Fraction(*x)),
            Value::String(s) => Self::from_len(s.chars().count()),
            Value::List(items) => Self::from_len(items.len()),
            Value::Map(entries) => Self::from_len(entries.len()),
            _ => None,
        }
    }

    fn from_len(len: usize) -> Option<Self> {
        i64::try_from(len).ok().map(Self::Whole)
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "comparisons against fractional bounds tolerate rounding of huge integers"
    )]
    fn as_f64(self) -> f64 {
        match self {
            Self::Whole(n) => n as f64,
            Self::Fraction(x) => x,
        }
    }

    fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Whole(a), Self::Whole(b)) => Some(a.cmp(&b)),
            _ => self.as_f64().partial_cmp(&other.as_f64()),
        }
    }
}

impl From<i64> for Size {
    fn from(n: i64) -> Self {
        Self::Whole(n)
    }
}

impl From<i32> for Size {
    fn from(n: i32) -> Self {
        Self::Whole(i64::from(n))
    }
}

impl From<f64> for Size {
    fn from(x: f64) -> Self {
        Self::Fraction(x)
    }
}

fn size_test(
    bound: Size,
    accept: fn(Ordering) -> bool,
) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    move |value: &Value| {
        Size::of(value)
            .and_then(|size| size.compare(bound))
            .is_some_and(accept)
    }
}

/// Holds when the value's [`Size`] is greater than `bound`.
#[must_use]
pub fn gt(bound: impl Into<Size>) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    size_test(bound.into(), Ordering::is_gt)
}

/// Holds when the value's [`Size`] is less than `bound`.
#[must_use]
pub fn lt(bound: impl Into<Size>) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    size_test(bound.into(), Ordering::is_lt)
}

/// Holds when the value's [`Size`] is at least `bound`.
#[must_use]
pub fn gte(bound: impl Into<Size>) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    size_test(bound.into(), Ordering::is_ge)
}

/// Holds when the value's [`Size`] is at most `bound`.
#[must_use]
pub fn lte(bound: impl Into<Size>) -> impl Fn(&Value) -> bool + Send + Sync + Copy {
    size_test(bound.into(), Ordering::is_le)
}

/// Holds for numbers greater than zero.
#[must_use]
pub fn positive(value: &Value) -> bool {
    is_number(value) && gt(0)(value)
}

/// Holds for numbers less than zero.
#[must_use]
pub fn negative(value: &Value) -> bool {
    is_number(value) && lt(0)(value)
}

/// Holds for strings in which `pattern` finds a match.
#[must_use]
pub fn matches(pattern: Regex) -> impl Fn(&Value) -> bool + Send + Sync {
    move |value: &Value| value.as_str().is_some_and(|s| pattern.is_match(s))
}
