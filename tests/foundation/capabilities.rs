//! Integration tests for capability tags

use flagwright_foundation::capability::join;
use flagwright_foundation::{Capability, CapabilitySet, Encoding, ErrorKind};

#[test]
fn identifiers_round_trip() {
    for capability in Capability::ALL {
        let parsed: Capability = capability.as_str().parse().unwrap();
        assert_eq!(parsed, capability);
        assert_eq!(capability.to_string(), capability.as_str());
    }
}

#[test]
fn unknown_identifier_is_an_error() {
    let err = "Hashable".parse::<Capability>().unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownCapability(ref name) if name == "Hashable"));
}

#[test]
fn only_bool_value_uses_flag_encoding() {
    let flags: Vec<_> = Capability::ALL
        .into_iter()
        .filter(|c| c.encoding() == Some(Encoding::Flag))
        .collect();
    assert_eq!(flags, vec![Capability::BoolValue]);
    assert_eq!(
        Capability::BaselineBoolValue.encoding(),
        Some(Encoding::Text)
    );
}

#[test]
fn value_and_baseline_families() {
    let values: Vec<_> = Capability::ALL.into_iter().filter(|c| c.is_value()).collect();
    assert_eq!(values.len(), 4);
    assert!(Capability::BaselineStringValue.is_baseline());
    assert!(!Capability::StringValue.is_baseline());
    assert!(!Capability::Equatable.is_value());
}

#[test]
fn sets_render_in_order() {
    let set: CapabilitySet = [
        Capability::Equatable,
        Capability::BoolValue,
        Capability::CaseEnumerable,
    ]
    .into_iter()
    .collect();
    assert_eq!(join(&set), "BoolValue, CaseEnumerable, Equatable");
    assert_eq!(join(&CapabilitySet::new()), "");
}
