//! Integration tests for declaration trees

use flagwright_foundation::Capability;
use flagwright_syntax::{
    DeclPath, Declaration, Directive, Member, MemberKey, Param, RawCarrier, TypeRef, walk,
};

fn paywall() -> Declaration {
    Declaration::product("Paywall")
        .with_member(Member::field("title", TypeRef::String))
        .with_nested(
            Declaration::sum("Variant")
                .with_carrier(RawCarrier::String)
                .with_case("a")
                .with_member(Member::case_with_raw("b", "b_long")),
        )
        .with_nested(Declaration::product("Copy"))
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn cases_keep_declaration_order() {
    let variant = Declaration::sum("Variant")
        .with_case("control")
        .with_member(Member::static_property("default", TypeRef::SelfType))
        .with_case("short");
    assert_eq!(variant.case_names(), vec!["control", "short"]);
}

#[test]
fn raw_names_default_to_case_names() {
    let tree = paywall();
    let variant = tree.nested_named("Variant").unwrap();
    let raws: Vec<_> = variant.cases().filter_map(Member::raw_name).collect();
    assert_eq!(raws, vec!["a", "b_long"]);
}

#[test]
fn nested_sums_skip_products() {
    let tree = paywall();
    let sums: Vec<_> = tree.nested_sums().iter().map(|d| d.name.as_str()).collect();
    assert_eq!(sums, vec!["Variant"]);
    assert!(tree.nested_named("Missing").is_none());
}

#[test]
fn member_keys_identify_initializers_by_labels() {
    let init = Member::initializer(
        vec![
            Param::new("baseline", TypeRef::Bool),
            Param::new("isEnabled", TypeRef::Bool),
        ],
        false,
    );
    assert_eq!(
        init.key(),
        MemberKey::Initializer(vec!["baseline".to_string(), "isEnabled".to_string()])
    );
    let decl = Declaration::product("Banner").with_member(init);
    assert!(decl.has_member(&MemberKey::Initializer(vec![
        "baseline".to_string(),
        "isEnabled".to_string()
    ])));
    assert!(!decl.has_member(&MemberKey::Property("isEnabled".to_string())));
}

#[test]
fn default_comes_from_member_or_capability() {
    let plain = Declaration::sum("Onboarding");
    assert!(!plain.defines_default());

    let member = plain
        .clone()
        .with_member(Member::static_property("default", TypeRef::SelfType));
    assert!(member.default_member().is_some());
    assert!(member.defines_default());

    let capability = plain.with_capability(Capability::Default);
    assert!(capability.default_member().is_none());
    assert!(capability.defines_default());
}

// =============================================================================
// Directives
// =============================================================================

#[test]
fn directive_names_and_parameters() {
    assert_eq!(Directive::BOOL_FLAG.name(), "BoolFlag");
    assert_eq!(Directive::BOOL_FLAG.enabled_by_default(), None);
    let enabled = Directive::BaselineBoolFlag {
        enabled_by_default: Some(true),
    };
    assert_eq!(enabled.enabled_by_default(), Some(true));
    assert_eq!(Directive::StringFlag.enabled_by_default(), None);
}

// =============================================================================
// Paths and traversal
// =============================================================================

#[test]
fn paths_compose() {
    let root = DeclPath::root("Flags");
    let child = root.child("Paywall").child("Variant");
    assert_eq!(child.to_string(), "Flags.Paywall.Variant");
    assert_eq!(child.parent().unwrap().simple_name(), "Paywall");
    assert_eq!(DeclPath::parse(&child.full_name()), child);
    assert!(root.parent().is_none());
}

#[test]
fn walk_reaches_every_declaration() {
    let tree = Declaration::product("Flags")
        .with_directive(Directive::Namespace)
        .with_nested(paywall())
        .with_nested(Declaration::sum("Onboarding"));
    let paths: Vec<String> = walk(&tree).map(|(p, _)| p.full_name()).collect();
    assert_eq!(
        paths,
        vec![
            "Flags",
            "Flags.Paywall",
            "Flags.Paywall.Variant",
            "Flags.Paywall.Copy",
            "Flags.Onboarding",
        ]
    );
}
