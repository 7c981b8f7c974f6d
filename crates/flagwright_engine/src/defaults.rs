//! Members supplied by capabilities.
//!
//! A capability can bring default implementations with it: a
//! string-keyed sum gets its `name` and `init(name:)` from its raw
//! values, an enumerable sum gets `allCases` from its cases. These are
//! looked up by capability tag here and added during synthesis, after
//! the rule's own members (so a rule-provided member always wins).

use flagwright_foundation::Capability;
use flagwright_syntax::{Body, DeclKind, Declaration, Member, Param, TypeRef};

/// Name of the type-level default member.
pub const DEFAULT_MEMBER: &str = "default";

/// Returns the members `capability` supplies for `decl`.
///
/// `cases` lists the declared and synthesized case names, in order.
#[must_use]
pub fn provided_members(capability: Capability, decl: &Declaration, cases: &[String]) -> Vec<Member> {
    match (capability, decl.kind) {
        (Capability::StringValue, DeclKind::Sum) => vec![
            Member::initializer(vec![Param::new("name", TypeRef::String)], true)
                .with_body(Body::ParseRawName),
            Member::property("name", TypeRef::String).with_body(Body::RawName),
        ],
        (Capability::CaseEnumerable, DeclKind::Sum) => {
            vec![Member::static_property("allCases", TypeRef::SelfList)
                .with_body(Body::AllSumCases(cases.to_vec()))]
        }
        // Baseline capabilities and product enumeration are synthesized by
        // their rules; the structural capabilities bring no members.
        (
            Capability::BoolValue
            | Capability::BaselineStringValue
            | Capability::BaselineBoolValue
            | Capability::Default
            | Capability::Equatable
            | Capability::StringValue
            | Capability::CaseEnumerable,
            _,
        ) => Vec::new(),
    }
}

/// Returns the default a value capability falls back to when neither the
/// declaration nor a directive parameter chooses one.
///
/// - `BoolValue`: `disabled`
/// - `StringValue`: the first case (none when there are no cases)
/// - `BaselineBoolValue`: baseline group, disabled
/// - `BaselineStringValue`: baseline group, the variant's own default
#[must_use]
pub fn fallback_default(capability: Capability, cases: &[String], variant: Option<&str>) -> Option<Body> {
    match capability {
        Capability::BoolValue => Some(Body::DefaultCase("disabled".to_string())),
        Capability::StringValue => cases.first().map(|first| Body::DefaultCase(first.clone())),
        Capability::BaselineBoolValue => Some(Body::BaselineBoolDefault { enabled: false }),
        Capability::BaselineStringValue => variant.map(|v| Body::BaselineVariantDefault {
            variant: v.to_string(),
        }),
        Capability::Default | Capability::CaseEnumerable | Capability::Equatable => None,
    }
}

/// Builds the type-level `default` member.
#[must_use]
pub fn default_member(body: Body) -> Member {
    Member::static_property(DEFAULT_MEMBER, TypeRef::SelfType).with_body(body)
}
