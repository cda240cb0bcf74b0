//! The schema sum type and its constructors.

use indexmap::IndexMap;

use crate::chain::Chain;

/// A declarative description of the expected input shape.
///
/// Schemas nest arbitrarily and are immutable once built, so one schema can
/// be matched against any number of inputs, from any number of threads.
#[derive(Debug, Clone)]
pub enum Schema {
    /// A leaf: the chain is applied to the value at this position.
    Field(Chain),
    /// A variable-length list; the inner schema is applied to every item.
    List(Box<Self>),
    /// A fixed-length list; schema `i` is applied to item `i`.
    Tuple(Vec<Self>),
    /// A mapping; each declared key's schema is applied to that key's value.
    /// Keys present only in the input are dropped.
    Object(IndexMap<String, Self>),
}

impl Schema {
    /// Builds a leaf schema from a chain.
    #[must_use]
    pub const fn field(chain: Chain) -> Self {
        Self::Field(chain)
    }

    /// Builds a list schema applying `item` to every element.
    #[must_use]
    pub fn list(item: Self) -> Self {
        Self::List(Box::new(item))
    }

    /// Builds a positional tuple schema.
    #[must_use]
    pub fn tuple(items: impl IntoIterator<Item = Self>) -> Self {
        Self::Tuple(items.into_iter().collect())
    }

    /// Builds a mapping schema from `(key, schema)` pairs, keeping their
    /// order.
    #[must_use]
    pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(fields.into_iter().map(|(k, s)| (k.into(), s)).collect())
    }
}

impl From<Chain> for Schema {
    fn from(chain: Chain) -> Self {
        Self::Field(chain)
    }
}

/// Shorthand for [`Schema::field`].
#[must_use]
pub const fn field(chain: Chain) -> Schema {
    Schema::field(chain)
}

/// Shorthand for [`Schema::list`].
#[must_use]
pub fn list(item: impl Into<Schema>) -> Schema {
    Schema::list(item.into())
}

/// Shorthand for [`Schema::tuple`].
#[must_use]
pub fn tuple(items: impl IntoIterator<Item = Schema>) -> Schema {
    Schema::tuple(items)
}

/// Shorthand for [`Schema::object`].
#[must_use]
pub fn object<K: Into<String>>(fields: impl IntoIterator<Item = (K, Schema)>) -> Schema {
    Schema::object(fields)
}
