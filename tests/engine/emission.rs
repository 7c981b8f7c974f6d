//! Integration tests for code emission

use flagwright_engine::emit::HEADER;
use flagwright_engine::{EmitOptions, Pass, PassOptions, render};
use flagwright_syntax::{Declaration, Directive, RawCarrier};

fn generate(decls: &[Declaration]) -> String {
    let output = Pass::new(PassOptions::default()).run(decls);
    render(&output.expansions, &EmitOptions::default())
}

fn flags() -> Vec<Declaration> {
    vec![
        Declaration::product("Flags")
            .with_directive(Directive::Namespace)
            .with_nested(Declaration::sum("Onboarding"))
            .with_nested(
                Declaration::product("Paywall").with_nested(
                    Declaration::sum("Variant")
                        .with_carrier(RawCarrier::String)
                        .with_case("a")
                        .with_case("b"),
                ),
            ),
    ]
}

#[test]
fn output_is_headed_and_stable() {
    let source = generate(&flags());
    assert!(source.starts_with(HEADER));
    assert_eq!(source, generate(&flags()));
}

#[test]
fn namespace_contents_are_emitted() {
    let source = generate(&flags());
    for expected in [
        "pub mod flags {",
        "pub enum Onboarding {",
        "pub struct Paywall {",
        "pub enum PaywallVariant {",
        "impl rt::BoolRemoteValue for Onboarding {",
        "impl rt::StringRemoteValue for Paywall {",
        "impl rt::StringRemoteValue for PaywallVariant {",
        "const CAPABILITY: rt::Capability = rt::Capability::BaselineStringValue;",
    ] {
        assert!(source.contains(expected), "missing `{expected}` in:\n{source}");
    }
}

#[test]
fn unannotated_declarations_are_not_emitted() {
    let source = generate(&[Declaration::sum("Plain")]);
    assert!(!source.contains("Plain"));
}
