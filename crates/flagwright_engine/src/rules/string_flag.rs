//! `@StringFlag`: a string-keyed sum.
//!
//! Only a conformance stage: the cases are written by hand, the rule adds
//! `StringValue`, `CaseEnumerable` and `Equatable`, the name parser they
//! bring, and a default naming the first case.

use flagwright_foundation::Capability;

use super::{RuleContext, Synthesis, Violation, require_shape};
use crate::diagnostic::Stage;
use crate::expansion::ExpansionResult;
use crate::shape::Shape;

/// Capabilities a string flag ends up with.
pub const TARGET: [Capability; 3] = [
    Capability::StringValue,
    Capability::CaseEnumerable,
    Capability::Equatable,
];

/// Expands a `@StringFlag` declaration.
#[must_use]
pub fn expand(cx: &RuleContext<'_>) -> ExpansionResult {
    let mut syn = Synthesis::new(cx);
    if syn.check(Stage::Conformances, validate(cx)) {
        synthesize_conformances(&mut syn);
    }
    syn.finish()
}

/// The declaration must be a sum with a `String` carrier.
pub fn validate(cx: &RuleContext<'_>) -> Result<(), Violation> {
    require_shape(cx, Shape::StringKeyed)
}

pub(crate) fn synthesize_conformances(syn: &mut Synthesis<'_>) {
    syn.target(TARGET);
    syn.supply_capability_members();
    syn.resolve_default(Capability::StringValue, None);
}
