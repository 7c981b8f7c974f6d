//! `@RemoteValue`: a sum whose flavor is read from its raw carrier.
//!
//! A `String` carrier expands as a string flag, no carrier as a bool
//! flag. Other carriers are rejected.

use flagwright_syntax::{Declaration, RawCarrier};

use super::{RuleContext, Synthesis, Violation, bool_flag, require_shape, string_flag};
use crate::diagnostic::Stage;
use crate::expansion::ExpansionResult;
use crate::shape::Shape;

/// The shape the unified rule expects for `decl`.
#[must_use]
pub fn target_shape(decl: &Declaration) -> Shape {
    match decl.raw_carrier {
        RawCarrier::String => Shape::StringKeyed,
        RawCarrier::None | RawCarrier::Bool | RawCarrier::Int => Shape::BareFlag,
    }
}

/// Expands a `@RemoteValue` declaration.
#[must_use]
pub fn expand(cx: &RuleContext<'_>) -> ExpansionResult {
    let target = target_shape(cx.decl);
    let mut syn = Synthesis::new(cx);
    if syn.check(Stage::Members, validate(cx)) && target == Shape::BareFlag {
        bool_flag::synthesize_members(&mut syn);
    }
    if syn.check(Stage::Conformances, validate(cx)) {
        match target {
            Shape::StringKeyed => string_flag::synthesize_conformances(&mut syn),
            _ => bool_flag::synthesize_conformances(&mut syn),
        }
    }
    syn.finish()
}

/// The declaration must be a sum with a `String` carrier or none.
pub fn validate(cx: &RuleContext<'_>) -> Result<(), Violation> {
    require_shape(cx, target_shape(cx.decl))
}
