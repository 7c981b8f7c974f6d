//! Integration tests for tree validation

use flagwright_foundation::ErrorKind;
use flagwright_syntax::{Declaration, Member, RawCarrier, SourceFile, Span, TypeRef};

fn invalid_path(result: flagwright_foundation::Result<()>) -> String {
    match result.unwrap_err().kind {
        ErrorKind::InvalidDeclaration { path, .. } => path,
        other => panic!("unexpected error kind: {other}"),
    }
}

#[test]
fn well_formed_tree_passes() {
    let tree = Declaration::product("Paywall").with_nested(
        Declaration::sum("Variant")
            .with_carrier(RawCarrier::String)
            .with_case("a"),
    );
    assert!(tree.validate().is_ok());
}

#[test]
fn duplicate_cases_are_rejected() {
    let tree = Declaration::sum("Flow").with_case("a").with_case("a");
    assert_eq!(invalid_path(tree.validate()), "Flow");
}

#[test]
fn sums_cannot_store_fields() {
    let tree = Declaration::sum("Flow").with_member(Member::field("x", TypeRef::Bool));
    assert!(tree.validate().is_err());
}

#[test]
fn products_cannot_carry_raw_values_or_cases() {
    assert!(
        Declaration::product("Banner")
            .with_carrier(RawCarrier::Int)
            .validate()
            .is_err()
    );
    assert!(
        Declaration::product("Banner")
            .with_case("on")
            .validate()
            .is_err()
    );
}

#[test]
fn nested_errors_report_the_nested_path() {
    let tree = Declaration::product("Flags").with_nested(
        Declaration::product("Paywall")
            .with_nested(Declaration::sum("Variant").with_case("a").with_case("a")),
    );
    assert_eq!(invalid_path(tree.validate()), "Flags.Paywall.Variant");
}

#[test]
fn duplicate_nested_names_are_rejected() {
    let tree = Declaration::product("Flags")
        .with_nested(Declaration::sum("A"))
        .with_nested(Declaration::product("A"));
    assert_eq!(invalid_path(tree.validate()), "Flags");
}

#[test]
fn errors_carry_file_and_position() {
    let file = SourceFile::new(vec![
        Declaration::sum("Flow")
            .with_case("a")
            .with_case("a")
            .with_span(Span::new(10, 40, 4, 1)),
    ])
    .with_path("flags.json");
    let err = file.validate().unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("flags.json"));
    assert_eq!(context.line, Some(4));
    assert_eq!(context.column, Some(1));
}
