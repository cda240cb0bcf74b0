//! Match policy configuration.
//!
//! The policy decides how container nodes treat inputs of the wrong kind and
//! whether sibling matches run on the `rayon` pool. It can be built in code
//! or loaded from YAML:
//!
//!     use treat::schema::{ContainerPolicy, FanOut, MatchPolicy};
//!
//!     let policy = MatchPolicy::from_yaml("containers: strict\nfan_out: parallel\n").unwrap();
//!     assert_eq!(policy.containers, ContainerPolicy::Strict);
//!     assert_eq!(policy.fan_out, FanOut::Parallel);

use serde::Deserialize;

use super::diagnostic::{SchemaDiagnostic, SchemaDiagnosticCode};
use super::error::SchemaError;

/// Synthetic source identifier used by [`MatchPolicy::from_yaml`].
const INLINE_SOURCE: &str = "<policy>";

/// How list, tuple and object nodes treat an input of the wrong kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerPolicy {
    /// Treat it as an empty list or empty mapping.
    #[default]
    Coerce,
    /// Fail the node with [`WRONG_CONTAINER`](super::WRONG_CONTAINER).
    Strict,
}

/// How children of a container node are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    /// One after another on the calling thread.
    #[default]
    Sequential,
    /// Concurrently on the `rayon` global pool.
    Parallel,
}

/// Settings for a [`Matcher`](super::Matcher).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchPolicy {
    /// Wrong-container handling.
    #[serde(default)]
    pub containers: ContainerPolicy,
    /// Child evaluation strategy.
    #[serde(default)]
    pub fan_out: FanOut,
}

impl MatchPolicy {
    /// The default policy with strict container checks.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            containers: ContainerPolicy::Strict,
            fan_out: FanOut::Sequential,
        }
    }

    /// Returns a copy with the given fan-out strategy.
    #[must_use]
    pub const fn with_fan_out(self, fan_out: FanOut) -> Self {
        Self {
            containers: self.containers,
            fan_out,
        }
    }

    /// Parses a policy from a YAML document.
    ///
    /// Missing keys take their defaults; unknown keys are rejected.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Policy`] when the YAML is malformed or names
    /// an unknown key or variant.
    pub fn from_yaml(input: &str) -> Result<Self, SchemaError> {
        serde_saphyr::from_str(input).map_err(|error| {
            let message = error.to_string();
            let diagnostic = error.location().map(|location| {
                SchemaDiagnostic::at(
                    SchemaDiagnosticCode::PolicyParseFailure,
                    INLINE_SOURCE,
                    &message,
                    location,
                )
            });
            SchemaError::Policy {
                message,
                diagnostic,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for policy parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::empty_mapping("{}", MatchPolicy::default())]
    #[case::strict_only("containers: strict", MatchPolicy::strict())]
    #[case::parallel_only(
        "fan_out: parallel",
        MatchPolicy::default().with_fan_out(FanOut::Parallel)
    )]
    fn policy_fields_default_independently(#[case] yaml: &str, #[case] expected: MatchPolicy) {
        let policy = MatchPolicy::from_yaml(yaml).expect("policy should parse");
        assert_eq!(policy, expected);
    }

    #[rstest]
    #[case::unknown_key("containers: coerce\nretries: 3\n")]
    #[case::unknown_variant("containers: lenient\n")]
    fn invalid_policy_is_rejected(#[case] yaml: &str) {
        let result = MatchPolicy::from_yaml(yaml);
        assert!(
            matches!(result, Err(SchemaError::Policy { .. })),
            "expected policy error, got: {result:?}"
        );
    }
}
