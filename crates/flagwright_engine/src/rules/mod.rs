//! Synthesis rules, one per directive.
//!
//! Each rule is a pure function from a [`RuleContext`] (declaration,
//! shape, configuration) to an [`ExpansionResult`]. Rules run in up to
//! two stages: a member stage and a conformance stage. Each stage
//! validates the declaration on its own, so a rejected declaration
//! reports the violation once per stage.
//!
//! | Directive | Rule | Expected shape |
//! |---|---|---|
//! | `BoolFlag` | [`bool_flag`] | `BareFlag` |
//! | `StringFlag` | [`string_flag`] | `StringKeyed` |
//! | `BaselineBoolFlag` | [`baseline_bool`] | `BaselineFlagOnly` |
//! | `BaselineStringFlag` | [`baseline_string`] | `BaselineWithVariant` |
//! | `RemoteValue` | [`unified`] | `BareFlag` or `StringKeyed` |

pub mod baseline_bool;
pub mod baseline_string;
pub mod bool_flag;
pub mod string_flag;
pub mod unified;

use flagwright_foundation::{Capability, CapabilitySet};
use flagwright_syntax::{Body, DeclKind, DeclPath, Declaration, Directive, Member, RawCarrier};

use crate::defaults;
use crate::diagnostic::{Diagnostic, DiagnosticReporter, RuleId, Stage};
use crate::expansion::{Expansion, ExpansionResult, Origin, RuleConfig};
use crate::merge;
use crate::shape::{Shape, classify, foreign_capability};

// =============================================================================
// Rule Context
// =============================================================================

/// Everything a rule reads.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    /// The declaration being expanded.
    pub decl: &'a Declaration,
    /// Its path in the tree.
    pub path: &'a DeclPath,
    /// The directive that selected the rule.
    pub directive: Directive,
    /// The classifier's verdict.
    pub shape: Shape,
    /// Directive parameters.
    pub config: RuleConfig,
}

impl<'a> RuleContext<'a> {
    /// Classifies `decl` and builds the context for `directive`.
    #[must_use]
    pub fn new(decl: &'a Declaration, path: &'a DeclPath, directive: Directive) -> Self {
        Self {
            decl,
            path,
            directive,
            shape: classify(decl),
            config: RuleConfig::from_directive(directive),
        }
    }
}

/// A failed validation: which check and why.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// The check that failed.
    pub rule_id: RuleId,
    /// Message for the diagnostic.
    pub message: String,
}

impl Violation {
    /// Creates a violation.
    pub fn new(rule_id: RuleId, message: impl Into<String>) -> Self {
        Self {
            rule_id,
            message: message.into(),
        }
    }
}

/// Checks that the context's shape is `expected`, naming the mismatch.
pub(crate) fn require_shape(cx: &RuleContext<'_>, expected: Shape) -> Result<(), Violation> {
    let Some(rule_id) = cx.shape.violation(cx.decl.kind, expected) else {
        return Ok(());
    };
    let directive = cx.directive.name();
    let message = match rule_id {
        RuleId::IncorrectType => {
            let kind = if expected.is_sum_shape() {
                DeclKind::Sum
            } else {
                DeclKind::Product
            };
            format!("@{directive} should be applied to a {kind} type")
        }
        RuleId::UnsupportedEnum => unsupported_sum(cx.decl, directive, expected),
        RuleId::VariantEnum => {
            format!("@{directive} should be applied to a product without a nested sum")
        }
        RuleId::NoVariantEnum => match cx.decl.nested_sums().len() {
            0 => format!("No Variant sum was found in @{directive} product"),
            n => format!("@{directive} product must nest exactly one Variant sum, found {n}"),
        },
        RuleId::DoubleDefault => format!("@{directive} can't be applied here"),
    };
    Err(Violation::new(rule_id, message))
}

fn unsupported_sum(decl: &Declaration, directive: &str, expected: Shape) -> String {
    match (expected, decl.raw_carrier) {
        (Shape::StringKeyed, _) => format!("@{directive} needs a sum with String raw value"),
        (_, RawCarrier::None) => match foreign_capability(decl) {
            Some(cap) => format!("@{directive} can't be combined with {cap}"),
            None => format!("@{directive} can't be applied to this sum"),
        },
        (_, carrier) => format!("@{directive} can't have {carrier} raw value"),
    }
}

// =============================================================================
// Synthesis Builder
// =============================================================================

/// Accumulates one declaration's synthesized members, target
/// capabilities, and diagnostics across both stages.
pub(crate) struct Synthesis<'a> {
    cx: &'a RuleContext<'a>,
    reporter: DiagnosticReporter,
    members: Vec<Member>,
    target: CapabilitySet,
}

impl<'a> Synthesis<'a> {
    pub(crate) fn new(cx: &'a RuleContext<'a>) -> Self {
        Self {
            cx,
            reporter: DiagnosticReporter::new(),
            members: Vec::new(),
            target: CapabilitySet::new(),
        }
    }

    pub(crate) fn cx(&self) -> &RuleContext<'a> {
        self.cx
    }

    /// Records the violation, if any, and returns whether the stage may
    /// proceed.
    pub(crate) fn check(&mut self, stage: Stage, outcome: Result<(), Violation>) -> bool {
        match outcome {
            Ok(()) => true,
            Err(violation) => {
                self.diagnose(stage, violation.rule_id, violation.message);
                false
            }
        }
    }

    pub(crate) fn diagnose(&mut self, stage: Stage, rule_id: RuleId, message: impl Into<String>) {
        self.reporter.report(Diagnostic::new(
            rule_id,
            message,
            self.cx.path.clone(),
            self.cx.decl.span,
            stage,
        ));
    }

    pub(crate) fn add(&mut self, member: Member) {
        self.members.push(member);
    }

    pub(crate) fn target(&mut self, capabilities: impl IntoIterator<Item = Capability>) {
        self.target.extend(capabilities);
    }

    /// Declared case names followed by synthesized ones, without repeats.
    pub(crate) fn case_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let synthesized = self.members.iter().filter(|m| m.is_case());
        for case in self.cx.decl.cases().chain(synthesized) {
            if !names.contains(&case.name) {
                names.push(case.name.clone());
            }
        }
        names
    }

    /// Adds the members every new target capability supplies. Capabilities
    /// the declaration already has bring their own implementation.
    pub(crate) fn supply_capability_members(&mut self) {
        let cases = self.case_names();
        let existing = &self.cx.decl.existing_capabilities;
        let supplied: Vec<Member> = self
            .target
            .iter()
            .filter(|cap| !existing.contains(cap))
            .flat_map(|cap| defaults::provided_members(*cap, self.cx.decl, &cases))
            .collect();
        self.members.extend(supplied);
    }

    /// Resolves the type default for a value capability.
    ///
    /// An explicitly declared default always wins; supplying
    /// `enabledByDefault` as well is reported as `doubleDefault` and the
    /// parameter is ignored. Otherwise the parameter decides, and without
    /// it the capability's fallback applies.
    pub(crate) fn resolve_default(&mut self, capability: Capability, variant: Option<&str>) {
        let declared = self.cx.decl.defines_default();
        match (self.cx.config.enabled_by_default, declared) {
            (Some(_), true) => self.diagnose(
                Stage::Conformances,
                RuleId::DoubleDefault,
                "enabledByDefault parameter is ignored as `default` property is already declared",
            ),
            (Some(enabled), false) => {
                if let Some(body) = configured_default(capability, enabled) {
                    self.add(defaults::default_member(body));
                }
            }
            (None, true) => {}
            (None, false) => {
                let cases = self.case_names();
                if let Some(body) = defaults::fallback_default(capability, &cases, variant) {
                    self.add(defaults::default_member(body));
                }
            }
        }
    }

    /// Applies the merge policy and the reporter's abort decision.
    pub(crate) fn finish(self) -> ExpansionResult {
        let decl = self.cx.decl;
        let members = merge::fresh_members(decl, self.members);
        let capabilities = merge::union(&decl.existing_capabilities, self.target);
        tracing::trace!(
            declaration = %self.cx.path,
            members = members.len(),
            capabilities = capabilities.len(),
            "synthesis merged"
        );
        self.reporter.finish(members, capabilities)
    }
}

fn configured_default(capability: Capability, enabled: bool) -> Option<Body> {
    match capability {
        Capability::BoolValue => Some(Body::DefaultCase(
            if enabled { "enabled" } else { "disabled" }.to_string(),
        )),
        Capability::BaselineBoolValue => Some(Body::BaselineBoolDefault { enabled }),
        _ => None,
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs the rule selected by `directive` over `decl`.
///
/// A `Namespace` directive contributes nothing of its own here; its
/// children are handled by [`crate::namespace`].
#[must_use]
pub fn run(cx: &RuleContext<'_>) -> ExpansionResult {
    tracing::debug!(
        declaration = %cx.path,
        directive = cx.directive.name(),
        shape = %cx.shape,
        "applying rule"
    );
    match cx.directive {
        Directive::BoolFlag { .. } => bool_flag::expand(cx),
        Directive::StringFlag => string_flag::expand(cx),
        Directive::BaselineBoolFlag { .. } => baseline_bool::expand(cx),
        Directive::BaselineStringFlag => baseline_string::expand(cx),
        Directive::RemoteValue => unified::expand(cx),
        Directive::Namespace => ExpansionResult::default(),
    }
}

/// Expands one annotated declaration, including the nested `Variant` a
/// baseline string flag cascades into.
#[must_use]
pub fn apply<'a>(
    decl: &'a Declaration,
    path: DeclPath,
    directive: Directive,
    origin: Origin,
) -> Expansion<'a> {
    let cx = RuleContext::new(decl, &path, directive);
    let shape = cx.shape;
    let result = run(&cx);
    let nested = if matches!(directive, Directive::BaselineStringFlag) && !result.aborted {
        baseline_string::cascade(decl, &path)
    } else {
        Vec::new()
    };
    Expansion {
        declaration: decl,
        path,
        directive,
        origin,
        shape,
        result,
        nested,
    }
}
