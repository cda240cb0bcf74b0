//! Schema-shaped match reports.

use indexmap::IndexMap;

use crate::chain::Label;
use crate::value::Value;

/// The error side of a [`Report`], shaped like the schema that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ErrorTree {
    /// The leaf at this position succeeded.
    #[default]
    None,
    /// The leaf at this position failed with this label.
    Label(Label),
    /// Per-item errors of a list or tuple node.
    List(Vec<Self>),
    /// Per-field errors of an object node, in schema key order.
    Fields(IndexMap<String, Self>),
}

static NO_ERROR: ErrorTree = ErrorTree::None;

impl ErrorTree {
    /// Returns the label when this node is a failed leaf.
    #[must_use]
    pub const fn label(&self) -> Option<&Label> {
        match self {
            Self::Label(label) => Some(label),
            _ => None,
        }
    }

    /// Looks up a field's error, yielding `None` when absent.
    #[must_use]
    pub fn field(&self, name: &str) -> &Self {
        match self {
            Self::Fields(fields) => fields.get(name).unwrap_or(&NO_ERROR),
            _ => &NO_ERROR,
        }
    }

    /// Looks up an item's error, yielding `None` when absent.
    #[must_use]
    pub fn item(&self, index: usize) -> &Self {
        match self {
            Self::List(items) => items.get(index).unwrap_or(&NO_ERROR),
            _ => &NO_ERROR,
        }
    }

    /// Returns `true` when no label occurs anywhere in the tree.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        match self {
            Self::None => true,
            Self::Label(_) => false,
            Self::List(items) => items.iter().all(Self::is_clean),
            Self::Fields(fields) => fields.values().all(Self::is_clean),
        }
    }

    /// Lists every label with a dotted path to its position, depth first.
    ///
    /// List positions render as their index, so a failing `phones` item at
    /// index 1 of record 0 appears as `0.phones.1`. A failing root leaf has
    /// the empty path.
    #[must_use]
    pub fn flatten(&self) -> Vec<(String, Label)> {
        let mut out = Vec::new();
        self.collect_into(String::new(), &mut out);
        out
    }

    fn collect_into(&self, path: String, out: &mut Vec<(String, Label)>) {
        match self {
            Self::None => {}
            Self::Label(label) => out.push((path, label.clone())),
            Self::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_into(join(&path, &index.to_string()), out);
                }
            }
            Self::Fields(fields) => {
                for (name, item) in fields {
                    item.collect_into(join(&path, name), out);
                }
            }
        }
    }
}

fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        segment.to_owned()
    } else {
        format!("{prefix}.{segment}")
    }
}

impl From<Label> for ErrorTree {
    fn from(label: Label) -> Self {
        Self::Label(label)
    }
}

/// The result of matching a schema against an input.
///
/// `value` and `error` mirror the schema's shape. At a leaf, `value` holds
/// the chain's output (or `Missing` on failure) and `error` holds
/// [`ErrorTree::None`] (or the failing step's label).
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// `true` iff every leaf in the schema succeeded.
    pub ok: bool,
    /// The converted value.
    pub value: Value,
    /// The per-position errors.
    pub error: ErrorTree,
}

impl Report {
    /// A successful leaf.
    #[must_use]
    pub const fn success(value: Value) -> Self {
        Self {
            ok: true,
            value,
            error: ErrorTree::None,
        }
    }

    /// A failed leaf.
    #[must_use]
    pub const fn failure(label: Label) -> Self {
        Self {
            ok: false,
            value: Value::Missing,
            error: ErrorTree::Label(label),
        }
    }

    /// Assembles a list or tuple node from its children, in order.
    #[must_use]
    pub fn from_items(children: Vec<Self>) -> Self {
        let ok = children.iter().all(|child| child.ok);
        let (values, errors) = children
            .into_iter()
            .map(|child| (child.value, child.error))
            .unzip();
        Self {
            ok,
            value: Value::List(values),
            error: ErrorTree::List(errors),
        }
    }

    /// Assembles an object node from named children, in order.
    #[must_use]
    pub fn from_fields(children: Vec<(String, Self)>) -> Self {
        let ok = children.iter().all(|(_, child)| child.ok);
        let mut values = IndexMap::with_capacity(children.len());
        let mut errors = IndexMap::with_capacity(children.len());
        for (name, child) in children {
            values.insert(name.clone(), child.value);
            errors.insert(name, child.error);
        }
        Self {
            ok,
            value: Value::Map(values),
            error: ErrorTree::Fields(errors),
        }
    }
}
