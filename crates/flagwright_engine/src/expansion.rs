//! Expansion results.

use flagwright_foundation::CapabilitySet;
use flagwright_syntax::{DeclPath, Declaration, Directive, Member};

use crate::diagnostic::{Diagnostic, Severity};
use crate::shape::Shape;

/// Rule configuration taken from the directive's parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleConfig {
    /// `enabledByDefault`, when supplied.
    pub enabled_by_default: Option<bool>,
}

impl RuleConfig {
    /// Extracts the configuration carried by a directive.
    #[must_use]
    pub const fn from_directive(directive: Directive) -> Self {
        Self {
            enabled_by_default: directive.enabled_by_default(),
        }
    }
}

/// What synthesis produced for one declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExpansionResult {
    /// Diagnostics, in the order reported.
    pub diagnostics: Vec<Diagnostic>,
    /// Members to add; never one the declaration already has.
    pub new_members: Vec<Member>,
    /// Capabilities to add; never one the declaration already has.
    pub new_capabilities: CapabilitySet,
    /// True when an error discarded synthesis.
    pub aborted: bool,
}

impl ExpansionResult {
    /// Returns true if a conformance block has to be emitted.
    #[must_use]
    pub fn emits_conformance(&self) -> bool {
        !self.new_capabilities.is_empty()
    }

    /// Returns true if nothing is added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.new_members.is_empty() && self.new_capabilities.is_empty()
    }

    /// Returns the synthesized member with the given name.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.new_members.iter().find(|m| m.name == name)
    }

    /// Returns the error diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Returns the warning diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Where a declaration's directive came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Written on the declaration.
    Explicit,
    /// Assigned by an enclosing namespace or baseline product.
    Assigned,
}

/// One expanded declaration, with the expansions of any children it
/// cascaded into.
#[derive(Clone, Debug)]
pub struct Expansion<'a> {
    /// The declaration as written.
    pub declaration: &'a Declaration,
    /// Its path in the tree.
    pub path: DeclPath,
    /// The directive that selected the rule.
    pub directive: Directive,
    /// Whether that directive was written or assigned.
    pub origin: Origin,
    /// Shape the classifier assigned.
    pub shape: Shape,
    /// What the rule produced.
    pub result: ExpansionResult,
    /// Expansions of children, in declaration order.
    pub nested: Vec<Expansion<'a>>,
}

impl<'a> Expansion<'a> {
    /// Visits this expansion and every nested one, pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Expansion<'a>> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.nested.iter().rev());
            Some(next)
        })
    }

    /// Returns the nested expansion for the child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Expansion<'a>> {
        self.nested.iter().find(|e| e.declaration.name == name)
    }

    /// Returns the diagnostics of this expansion and all nested ones.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.iter().flat_map(|e| e.result.diagnostics.iter())
    }
}
