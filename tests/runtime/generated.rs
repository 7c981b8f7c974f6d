//! Flag types rendered by the build script from `flags_tree`, exercised
//! against the runtime traits.

use flagwright_engine::{EmitOptions, Pass, render};
use flagwright_runtime::{BoolRemoteValue, CaseEnumerable, RemoteValue, StringRemoteValue};

use crate::flags_tree;

#[allow(dead_code)]
mod source {
    include!(concat!(env!("OUT_DIR"), "/generated_flags.rs"));
}

pub use source::{Checkout, flags};

use flags::{Banner, Flow, Onboarding, Paywall, PaywallVariant};
use proptest::prelude::*;

const GENERATED: &str = include_str!(concat!(env!("OUT_DIR"), "/generated_flags.rs"));

// =============================================================================
// Compiled output
// =============================================================================

#[test]
fn compiled_output_matches_render() {
    let declarations = flags_tree::declarations();
    let output = Pass::default().run(&declarations);
    assert!(!output.has_errors());
    assert_eq!(render(&output.expansions, &EmitOptions::default()), GENERATED);
}

#[test]
fn compiled_output_carries_docs() {
    assert!(GENERATED.contains("/// Remote flag `Flags.Paywall.Variant` (@StringFlag)."));
    assert!(GENERATED.contains("/// Conforms to StringValue, CaseEnumerable, Equatable."));
}

// =============================================================================
// String flags
// =============================================================================

#[test]
fn raw_values_name_cases() {
    assert_eq!(Flow::from_name("short_flow"), Some(Flow::Short));
    assert_eq!(Flow::from_name("short"), None);
    assert_eq!(Flow::Short.name(), "short_flow");
    assert_eq!(Flow::Control.name(), "control");
    assert_eq!(Flow::default_value(), Flow::Control);
}

#[test]
fn unified_string_flag_decodes_text() {
    assert_eq!(Checkout::all_cases(), vec![Checkout::Legacy, Checkout::Express]);
    assert_eq!(<Checkout as RemoteValue>::CAPABILITY, flagwright_runtime::Capability::StringValue);
    assert_eq!(
        <Checkout as RemoteValue>::decode(flagwright_runtime::Raw::Text("express")),
        Some(Checkout::Express)
    );
    assert_eq!(<Checkout as RemoteValue>::decode(flagwright_runtime::Raw::Flag(true)), None);
}

// =============================================================================
// Baseline name encoding
// =============================================================================

#[test]
fn baseline_names() {
    let paywall = Paywall::new(true, PaywallVariant::A);
    assert_eq!(paywall.name(), "a_baseline");
    assert_eq!(Paywall::from_name("a_baseline"), Some(paywall));
    assert_eq!(Paywall::from_name("b_long"), Some(Paywall::new(false, PaywallVariant::B)));
    assert_eq!(Paywall::from_name("c_baseline"), None);
}

#[test]
fn bool_tokens_are_strict() {
    assert_eq!(Banner::from_name("true"), Some(Banner::new(false, true)));
    assert_eq!(Banner::from_name("false_baseline"), Some(Banner::new(true, false)));
    assert_eq!(Banner::from_name("enabled"), None);
    assert_eq!(Banner::from_name(""), None);
}

#[test]
fn baseline_bool_cases_are_complete() {
    let cases = <Banner as CaseEnumerable>::all_cases();
    assert_eq!(cases.len(), 4);
    let distinct: std::collections::HashSet<_> = cases.iter().collect();
    assert_eq!(distinct.len(), 4);
}

#[test]
fn baseline_variant_cases_cross_baseline() {
    assert_eq!(
        Paywall::all_cases(),
        vec![
            Paywall::new(true, PaywallVariant::A),
            Paywall::new(false, PaywallVariant::A),
            Paywall::new(true, PaywallVariant::B),
            Paywall::new(false, PaywallVariant::B),
        ]
    );
}

#[test]
fn defaults_sit_in_the_baseline_group() {
    assert_eq!(<Paywall as RemoteValue>::default_value(), Paywall::new(true, PaywallVariant::A));
    assert!(<Banner as RemoteValue>::default_value().is_baseline());
    assert_eq!(<Onboarding as RemoteValue>::default_value(), Onboarding::Disabled);
}

#[test]
fn trait_views_agree_with_inherent_members() {
    assert!(<Onboarding as BoolRemoteValue>::from_bool(true).is_enabled());
    assert_eq!(Onboarding::Enabled.describe(), "enabled");
    assert_eq!(
        <PaywallVariant as StringRemoteValue>::name(&PaywallVariant::B),
        "b_long"
    );
}

#[test]
fn emitted_flags_join_no_experiment() {
    assert_eq!(Paywall::new(false, PaywallVariant::B).experimental_group(), None);
}

proptest! {
    #[test]
    fn paywall_names_round_trip(value in prop::sample::select(Paywall::all_cases())) {
        prop_assert_eq!(Paywall::from_name(&value.name()), Some(value));
    }

    #[test]
    fn banner_names_round_trip(baseline: bool, enabled: bool) {
        let value = Banner::new(baseline, enabled);
        prop_assert_eq!(Banner::from_name(&value.name()), Some(value));
    }
}
