//! Declarations rendered by the build script into `generated_flags.rs`.

use flagwright_syntax::{Declaration, Directive, Member, RawCarrier};

/// A `Flags` namespace covering every flag flavor, plus one top-level
/// unified flag.
pub fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::product("Flags")
            .with_directive(Directive::Namespace)
            .with_nested(Declaration::sum("Onboarding"))
            .with_nested(
                Declaration::sum("Flow")
                    .with_carrier(RawCarrier::String)
                    .with_case("control")
                    .with_member(Member::case_with_raw("short", "short_flow")),
            )
            .with_nested(Declaration::product("Banner"))
            .with_nested(
                Declaration::product("Paywall").with_nested(
                    Declaration::sum("Variant")
                        .with_carrier(RawCarrier::String)
                        .with_case("a")
                        .with_member(Member::case_with_raw("b", "b_long")),
                ),
            ),
        Declaration::sum("Checkout")
            .with_directive(Directive::RemoteValue)
            .with_carrier(RawCarrier::String)
            .with_case("legacy")
            .with_case("express"),
    ]
}
