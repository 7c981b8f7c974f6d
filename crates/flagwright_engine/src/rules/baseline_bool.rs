//! `@BaselineBoolFlag`: an on/off flag split into baseline and treatment.
//!
//! The product gets `baseline` and `isEnabled` fields, a name parser
//! (`"true"`, `"false_baseline"`, ...) and a field initializer; the
//! conformance stage adds the four-element `allCases`, the `name`
//! encoder, and the baseline default.

use flagwright_foundation::Capability;
use flagwright_syntax::{Body, Member, Param, TypeRef};

use super::{RuleContext, Synthesis, Violation, require_shape};
use crate::diagnostic::Stage;
use crate::expansion::ExpansionResult;
use crate::shape::Shape;

/// Capabilities a baseline bool flag ends up with.
pub const TARGET: [Capability; 3] = [
    Capability::BaselineBoolValue,
    Capability::CaseEnumerable,
    Capability::Equatable,
];

const FIELDS: [&str; 2] = ["baseline", "isEnabled"];

/// Expands a `@BaselineBoolFlag` declaration.
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

/// The declaration must be a product with no nested sum.
pub fn validate(cx: &RuleContext<'_>) -> Result<(), Violation> {
    require_shape(cx, Shape::BaselineFlagOnly)
}

fn synthesize_members(syn: &mut Synthesis<'_>) {
    for field in FIELDS {
        syn.add(Member::field(field, TypeRef::Bool));
    }
    syn.add(
        Member::initializer(vec![Param::new("name", TypeRef::String)], true)
            .with_body(Body::ParseBaselineBool),
    );
    syn.add(
        Member::initializer(
            FIELDS
                .iter()
                .map(|field| Param::new(*field, TypeRef::Bool))
                .collect(),
            false,
        )
        .with_body(Body::AssignFields(
            FIELDS.iter().map(ToString::to_string).collect(),
        )),
    );
}

fn synthesize_conformances(syn: &mut Synthesis<'_>) {
    syn.target(TARGET);
    syn.add(Member::static_property("allCases", TypeRef::SelfList).with_body(Body::BaselineBoolCases));
    syn.add(Member::property("name", TypeRef::String).with_body(Body::BaselineBoolName));
    syn.supply_capability_members();
    syn.resolve_default(Capability::BaselineBoolValue, None);
}
