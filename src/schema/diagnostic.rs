//! Structured diagnostics for document loading failures.
//!
//! Input documents and policy files are parsed with `serde-saphyr`; when the
//! parser reports a position, the failure carries a [`SchemaDiagnostic`]
//! pinned to that source location.

/// Stable diagnostic classification codes for loading failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaDiagnosticCode {
    /// An input document failed to parse.
    InputParseFailure,
    /// A policy document failed to parse or named an unknown setting.
    PolicyParseFailure,
}

impl SchemaDiagnosticCode {
    /// Returns the stable, machine-readable code string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InputParseFailure => "input.parse_failure",
            Self::PolicyParseFailure => "policy.parse_failure",
        }
    }
}

/// Source location attached to a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Source file or source identifier.
    pub source: String,
    /// 1-indexed line number.
    pub line: usize,
    /// 1-indexed column number.
    pub column: usize,
}

/// Structured diagnostic payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDiagnostic {
    /// Stable diagnostic code for programmatic handling.
    pub code: SchemaDiagnosticCode,
    /// Primary source location.
    pub location: SourceLocation,
    /// First line of the parser's message.
    pub message: String,
}

impl SchemaDiagnostic {
    pub(crate) fn at(
        code: SchemaDiagnosticCode,
        source: &str,
        message: &str,
        location: serde_saphyr::Location,
    ) -> Self {
        let line = usize::try_from(location.line()).ok().unwrap_or(usize::MAX);
        let column = usize::try_from(location.column())
            .ok()
            .unwrap_or(usize::MAX);
        Self {
            code,
            location: SourceLocation {
                source: source.to_owned(),
                line,
                column,
            },
            message: message.lines().next().unwrap_or(message).to_owned(),
        }
    }

    /// Renders the diagnostic into a deterministic single-line format.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "{} | {}:{}:{} | {}",
            self.code.as_str(),
            self.location.source,
            self.location.line,
            self.location.column,
            self.message
        )
    }
}
