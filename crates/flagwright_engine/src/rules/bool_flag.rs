//! `@BoolFlag`: an on/off sum.
//!
//! Member stage adds the `enabled` and `disabled` cases, the
//! `init(booleanLiteral:)` initializer and the `isEnabled` accessor.
//! Conformance stage adds `BoolValue`, `CaseEnumerable` and `Equatable`
//! together with the type default.

use flagwright_foundation::Capability;
use flagwright_syntax::{Body, Member, Param, TypeRef};

use super::{RuleContext, Synthesis, Violation, require_shape};
use crate::diagnostic::Stage;
use crate::expansion::ExpansionResult;
use crate::shape::Shape;

/// Capabilities a bool flag ends up with.
pub const TARGET: [Capability; 3] = [
    Capability::BoolValue,
    Capability::CaseEnumerable,
    Capability::Equatable,
];

/// Expands a `@BoolFlag` declaration.
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

/// The declaration must be a carrier-less sum.
pub fn validate(cx: &RuleContext<'_>) -> Result<(), Violation> {
    require_shape(cx, Shape::BareFlag)
}

pub(crate) fn synthesize_members(syn: &mut Synthesis<'_>) {
    syn.add(Member::case("enabled"));
    syn.add(Member::case("disabled"));
    syn.add(
        Member::initializer(vec![Param::new("booleanLiteral", TypeRef::Bool)], false)
            .with_body(Body::BoolFromLiteral),
    );
    syn.add(Member::property("isEnabled", TypeRef::Bool).with_body(Body::BoolAccessor));
}

pub(crate) fn synthesize_conformances(syn: &mut Synthesis<'_>) {
    syn.target(TARGET);
    syn.supply_capability_members();
    syn.resolve_default(Capability::BoolValue, None);
}
