//! Integration tests for namespace propagation

use flagwright_engine::{Assignment, Origin, Pass, PassOptions, RuleId, assign, expand_namespace};
use flagwright_syntax::{Body, DeclPath, Declaration, Directive, RawCarrier};

fn flags() -> Declaration {
    Declaration::product("Flags")
        .with_directive(Directive::Namespace)
        .with_nested(
            Declaration::sum("Flow")
                .with_carrier(RawCarrier::String)
                .with_case("control")
                .with_case("short"),
        )
        .with_nested(
            Declaration::product("Paywall").with_nested(
                Declaration::sum("Variant")
                    .with_carrier(RawCarrier::String)
                    .with_case("a")
                    .with_case("b"),
            ),
        )
        .with_nested(Declaration::sum("Onboarding").with_directive(Directive::BoolFlag {
            enabled_by_default: Some(true),
        }))
        .with_nested(Declaration::product("Banner"))
}

#[test]
fn phase_one_assigns_by_structure() {
    let container = flags();
    let root = DeclPath::root("Flags");
    let assignments = assign(&container, &root);
    assert_eq!(
        assignments,
        vec![
            Assignment {
                child: root.child("Flow"),
                directive: Directive::StringFlag,
                origin: Origin::Assigned,
            },
            Assignment {
                child: root.child("Paywall"),
                directive: Directive::BaselineStringFlag,
                origin: Origin::Assigned,
            },
            Assignment {
                child: root.child("Onboarding"),
                directive: Directive::BoolFlag {
                    enabled_by_default: Some(true),
                },
                origin: Origin::Explicit,
            },
            Assignment {
                child: root.child("Banner"),
                directive: Directive::BASELINE_BOOL_FLAG,
                origin: Origin::Assigned,
            },
        ]
    );
}

#[test]
fn phase_one_is_pure() {
    let container = flags();
    let root = DeclPath::root("Flags");
    assert_eq!(assign(&container, &root), assign(&container, &root));
}

#[test]
fn phase_two_expands_every_child_in_order() {
    let container = flags();
    let expansion = expand_namespace(&container, DeclPath::root("Flags"), Origin::Explicit, true);
    let names: Vec<_> = expansion
        .nested
        .iter()
        .map(|e| e.declaration.name.as_str())
        .collect();
    assert_eq!(names, vec!["Flow", "Paywall", "Onboarding", "Banner"]);
    assert!(expansion.all_diagnostics().next().is_none());

    let onboarding = expansion.child("Onboarding").unwrap();
    assert_eq!(
        onboarding.result.member("default").map(|m| &m.body),
        Some(&Body::DefaultCase("enabled".to_string()))
    );
    let variant = expansion.child("Paywall").and_then(|p| p.child("Variant"));
    assert_eq!(
        variant.map(|v| v.path.full_name()),
        Some("Flags.Paywall.Variant".to_string())
    );
}

#[test]
fn sibling_errors_stay_local() {
    let container = Declaration::product("Flags")
        .with_directive(Directive::Namespace)
        .with_nested(
            Declaration::sum("Level")
                .with_carrier(RawCarrier::Int)
                .with_case("low"),
        )
        .with_nested(Declaration::sum("Onboarding"));
    let decls = vec![container];
    let output = Pass::default().run(&decls);

    assert!(output.has_errors());
    let aborted: Vec<String> = output.aborted().iter().map(|p| p.full_name()).collect();
    assert_eq!(aborted, vec!["Flags.Level"]);
    assert!(
        output
            .diagnostics()
            .all(|d| d.rule_id == RuleId::UnsupportedEnum && d.declaration.full_name() == "Flags.Level")
    );
    let onboarding = output.find("Flags.Onboarding").unwrap();
    assert!(!onboarding.result.new_members.is_empty());
}

#[test]
fn parallel_and_sequential_agree() {
    let decls = vec![flags(), Declaration::sum("Solo").with_directive(Directive::BOOL_FLAG)];
    let sequential = Pass::new(PassOptions {
        parallel: false,
        deny_warnings: false,
    })
    .run(&decls);
    let parallel = Pass::default().run(&decls);

    let summary = |output: &flagwright_engine::PassOutput<'_>| {
        output
            .all()
            .map(|e| (e.path.full_name(), e.result.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(summary(&sequential), summary(&parallel));
}
