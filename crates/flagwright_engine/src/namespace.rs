//! Namespace propagation.
//!
//! A `@Namespace` container annotates its children and expands them in
//! two phases:
//!
//! 1. **Assignment.** Every immediate child without a directive is given
//!    one from its structure; children with a directive keep it.
//! 2. **Synthesis.** Every child is expanded with its directive.
//!
//! Phase 1 finishes for all children before phase 2 starts for any.
//! Phase 2 expansions are independent and may run on the `rayon` pool;
//! results are always returned in declaration order.

use flagwright_syntax::{DeclKind, DeclPath, Declaration, Directive, RawCarrier};
use rayon::prelude::*;

use crate::expansion::{Expansion, ExpansionResult, Origin};
use crate::rules;
use crate::shape::classify;

/// A directive chosen for one child in phase 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment {
    /// Path of the child.
    pub child: DeclPath,
    /// Directive the child is expanded with.
    pub directive: Directive,
    /// Whether the directive was written or assigned.
    pub origin: Origin,
}

/// The directive a namespace gives a child that has none.
///
/// | Child | Directive |
/// |---|---|
/// | sum, `String` carrier | `@StringFlag` |
/// | any other sum | `@BoolFlag` |
/// | product nesting a sum | `@BaselineStringFlag` |
/// | product | `@BaselineBoolFlag` |
#[must_use]
pub fn assigned_directive(child: &Declaration) -> Directive {
    match child.kind {
        DeclKind::Sum if child.raw_carrier == RawCarrier::String => Directive::StringFlag,
        DeclKind::Sum => Directive::BOOL_FLAG,
        DeclKind::Product if child.nested_sums().is_empty() => Directive::BASELINE_BOOL_FLAG,
        DeclKind::Product => Directive::BaselineStringFlag,
    }
}

/// Phase 1: directives for every immediate child of `container`.
///
/// An explicit directive is never overridden.
#[must_use]
pub fn assign(container: &Declaration, path: &DeclPath) -> Vec<Assignment> {
    container
        .nested
        .iter()
        .map(|child| {
            let (directive, origin) = match child.directive {
                Some(directive) => (directive, Origin::Explicit),
                None => (assigned_directive(child), Origin::Assigned),
            };
            Assignment {
                child: path.child(child.name.clone()),
                directive,
                origin,
            }
        })
        .collect()
}

/// Expands a namespace container: phase 1 over all children, then
/// phase 2 per child.
#[must_use]
pub fn expand_namespace<'a>(
    container: &'a Declaration,
    path: DeclPath,
    origin: Origin,
    parallel: bool,
) -> Expansion<'a> {
    let assignments = assign(container, &path);
    tracing::debug!(
        namespace = %path,
        children = assignments.len(),
        assigned = assignments.iter().filter(|a| a.origin == Origin::Assigned).count(),
        "namespace assignment complete"
    );

    let work = container
        .nested
        .iter()
        .zip(assignments)
        .map(|(child, a)| (child, a.child, a.directive, a.origin))
        .collect();
    let nested = expand_each(work, parallel);

    Expansion {
        declaration: container,
        path,
        directive: Directive::Namespace,
        origin,
        shape: classify(container),
        result: ExpansionResult::default(),
        nested,
    }
}

/// Expands one declaration with `directive`, routing namespaces to the
/// propagator and everything else to its rule.
#[must_use]
pub fn expand_declaration<'a>(
    decl: &'a Declaration,
    path: DeclPath,
    directive: Directive,
    origin: Origin,
    parallel: bool,
) -> Expansion<'a> {
    match directive {
        Directive::Namespace => expand_namespace(decl, path, origin, parallel),
        _ => rules::apply(decl, path, directive, origin),
    }
}

type Work<'a> = (&'a Declaration, DeclPath, Directive, Origin);

/// Expands independent declarations, in input order.
pub(crate) fn expand_each<'a>(work: Vec<Work<'a>>, parallel: bool) -> Vec<Expansion<'a>> {
    if !parallel || work.len() < 2 {
        return work
            .into_iter()
            .map(|(decl, path, directive, origin)| {
                expand_declaration(decl, path, directive, origin, parallel)
            })
            .collect();
    }

    work.into_par_iter()
        .map(|(decl, path, directive, origin)| {
            expand_declaration(decl, path, directive, origin, parallel)
        })
        .collect()
}
