//! Diagnostics and the reporter that decides whether synthesis proceeds.
//!
//! Rules never fail with an `Err`: every problem becomes a [`Diagnostic`]
//! attached to the declaration that triggered it. The reporter collects
//! them per declaration; an `Error` aborts that declaration only.

use std::fmt;

use flagwright_foundation::CapabilitySet;
use flagwright_syntax::{DeclPath, Member, Span};

use crate::expansion::ExpansionResult;

// =============================================================================
// Diagnostic
// =============================================================================

/// Diagnostic severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Advisory; synthesis proceeds.
    Warning,
    /// Aborts synthesis for the owning declaration.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Stable identifier of the check that produced a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleId {
    /// Directive applied to a declaration kind it does not support.
    IncorrectType,
    /// Sum with an incompatible raw carrier or capability.
    UnsupportedEnum,
    /// Baseline-flag-only product nests a `Variant`.
    VariantEnum,
    /// Baseline-with-variant product lacks its `Variant`.
    NoVariantEnum,
    /// Both a default member and `enabledByDefault` were supplied.
    DoubleDefault,
}

impl RuleId {
    /// Returns the identifier string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IncorrectType => "incorrectType",
            Self::UnsupportedEnum => "unsupportedEnum",
            Self::VariantEnum => "variantEnum",
            Self::NoVariantEnum => "noVariantEnum",
            Self::DoubleDefault => "doubleDefault",
        }
    }

    /// Returns the severity this check always reports with.
    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::DoubleDefault => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Synthesis stage that raised a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Cases, fields, initializers, computed properties.
    Members,
    /// Capabilities and the members they supply.
    Conformances,
}

/// One structured diagnostic, attached to the declaration that caused it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity.
    pub severity: Severity,
    /// Which check fired.
    pub rule_id: RuleId,
    /// Human-readable message.
    pub message: String,
    /// Owning declaration.
    pub declaration: DeclPath,
    /// Where the owning declaration was written.
    pub span: Span,
    /// Stage that raised it.
    pub stage: Stage,
}

impl Diagnostic {
    /// Creates a diagnostic with the severity implied by `rule_id`.
    pub fn new(
        rule_id: RuleId,
        message: impl Into<String>,
        declaration: DeclPath,
        span: Span,
        stage: Stage,
    ) -> Self {
        Self {
            severity: rule_id.severity(),
            rule_id,
            message: message.into(),
            declaration,
            span,
            stage,
        }
    }

    /// Returns true for errors.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.declaration)?;
        if !self.span.is_unknown() {
            write!(f, ":{}", self.span)?;
        }
        write!(f, ": {}[{}]: {}", self.severity, self.rule_id, self.message)
    }
}

// =============================================================================
// Reporter
// =============================================================================

/// Collects diagnostics for one declaration and finalises its result.
///
/// Diagnostics are kept in the order reported and never deduplicated:
/// the same violation seen by two stages is reported twice.
#[derive(Debug, Default)]
pub struct DiagnosticReporter {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::debug!(
            declaration = %diagnostic.declaration,
            rule = diagnostic.rule_id.as_str(),
            severity = %diagnostic.severity,
            "diagnostic reported"
        );
        self.diagnostics.push(diagnostic);
    }

    /// Returns the diagnostics recorded so far.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Returns true if any error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Finalises a declaration's result.
    ///
    /// With any error recorded the result is aborted and the synthesized
    /// members and capabilities are discarded; warnings never block.
    #[must_use]
    pub fn finish(self, new_members: Vec<Member>, new_capabilities: CapabilitySet) -> ExpansionResult {
        let aborted = self.has_errors();
        if aborted {
            return ExpansionResult {
                diagnostics: self.diagnostics,
                new_members: Vec::new(),
                new_capabilities: CapabilitySet::new(),
                aborted,
            };
        }
        ExpansionResult {
            diagnostics: self.diagnostics,
            new_members,
            new_capabilities,
            aborted,
        }
    }
}

/// Renders diagnostics one per line.
#[must_use]
pub fn render_all<'a>(diagnostics: impl IntoIterator<Item = &'a Diagnostic>) -> String {
    diagnostics
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
