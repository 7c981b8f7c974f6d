//! `@BaselineStringFlag`: a string variant split into baseline and
//! treatment.
//!
//! The product nests exactly one sum, its `Variant`. The rule adds
//! `baseline` and `variant` fields, a name parser that delegates the
//! variant token to the nested type, and the crossed `allCases`. The
//! nested sum is itself expanded as a `@StringFlag` unless it carries a
//! directive of its own.

use flagwright_foundation::Capability;
use flagwright_syntax::{Body, DeclPath, Declaration, Directive, Member, Param, TypeRef};

use super::{RuleContext, Synthesis, Violation, apply, require_shape};
use crate::diagnostic::Stage;
use crate::expansion::{Expansion, ExpansionResult, Origin};
use crate::shape::Shape;

/// Capabilities a baseline string flag ends up with.
pub const TARGET: [Capability; 3] = [
    Capability::BaselineStringValue,
    Capability::CaseEnumerable,
    Capability::Equatable,
];

/// Expands a `@BaselineStringFlag` declaration. The nested variant is
/// expanded separately by [`cascade`].
#[must_use]
pub fn expand(cx: &RuleContext<'_>) -> ExpansionResult {
    let mut syn = Synthesis::new(cx);
    if syn.check(Stage::Members, validate(cx)) {
        synthesize_members(&mut syn);
    }
    if syn.check(Stage::Conformances, validate(cx)) {
        synthesize_conformances(&mut syn);
    }
    syn.finish()
}

/// The declaration must be a product nesting exactly one sum.
pub fn validate(cx: &RuleContext<'_>) -> Result<(), Violation> {
    require_shape(cx, Shape::BaselineWithVariant)
}

/// Returns the name of the nested variant sum.
#[must_use]
pub fn variant_name(decl: &Declaration) -> Option<&str> {
    decl.nested_sums().first().map(|v| v.name.as_str())
}

fn synthesize_members(syn: &mut Synthesis<'_>) {
    let Some(variant) = variant_name(syn.cx().decl).map(str::to_string) else {
        return;
    };
    let variant_ty = TypeRef::Named(variant.clone());
    syn.add(Member::field("baseline", TypeRef::Bool));
    syn.add(Member::field("variant", variant_ty.clone()));
    syn.add(
        Member::initializer(vec![Param::new("name", TypeRef::String)], true)
            .with_body(Body::ParseBaselineVariant { variant }),
    );
    syn.add(
        Member::initializer(
            vec![
                Param::new("baseline", TypeRef::Bool),
                Param::new("variant", variant_ty),
            ],
            false,
        )
        .with_body(Body::AssignFields(vec![
            "baseline".to_string(),
            "variant".to_string(),
        ])),
    );
}

fn synthesize_conformances(syn: &mut Synthesis<'_>) {
    let Some(variant) = variant_name(syn.cx().decl).map(str::to_string) else {
        return;
    };
    syn.target(TARGET);
    syn.add(
        Member::static_property("allCases", TypeRef::SelfList).with_body(
            Body::BaselineVariantCases {
                variant: variant.clone(),
            },
        ),
    );
    syn.add(Member::property("name", TypeRef::String).with_body(Body::BaselineVariantName));
    syn.supply_capability_members();
    syn.resolve_default(Capability::BaselineStringValue, Some(&variant));
}

/// Expands the nested variant of a baseline string flag at `path`.
///
/// A variant without a directive is assigned `@StringFlag`; an explicit
/// directive is kept. Assignment precedes synthesis.
#[must_use]
pub fn cascade<'a>(decl: &'a Declaration, path: &DeclPath) -> Vec<Expansion<'a>> {
    decl.nested_sums()
        .into_iter()
        .map(|variant| {
            let (directive, origin) = match variant.directive {
                Some(directive) => (directive, Origin::Explicit),
                None => (Directive::StringFlag, Origin::Assigned),
            };
            tracing::debug!(
                declaration = %path,
                variant = %variant.name,
                directive = directive.name(),
                "cascading into variant"
            );
            apply(variant, path.child(variant.name.clone()), directive, origin)
        })
        .collect()
}
