//! Shape classification.
//!
//! `classify` inspects one declaration and tags it with the structural
//! shape that selects a synthesis rule. It is total: every combination
//! not matched below is `Unsupported`.

use std::fmt;

use flagwright_foundation::Capability;
use flagwright_syntax::{DeclKind, Declaration, RawCarrier};

use crate::diagnostic::RuleId;

/// Capabilities a bare on/off sum may already declare and still be a
/// `BareFlag`. Anything else on a carrier-less sum is foreign.
const BOOL_FAMILY: [Capability; 4] = [
    Capability::BoolValue,
    Capability::CaseEnumerable,
    Capability::Equatable,
    Capability::Default,
];

/// Structural classification of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Sum without a raw carrier.
    BareFlag,
    /// Sum with a `String` raw carrier.
    StringKeyed,
    /// Product nesting exactly one sum (its `Variant`).
    BaselineWithVariant,
    /// Product nesting no sum.
    BaselineFlagOnly,
    /// Anything else.
    Unsupported,
}

impl Shape {
    /// Returns true unless the shape is `Unsupported`.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        !matches!(self, Self::Unsupported)
    }

    /// Returns true for the shapes a sum can take.
    #[must_use]
    pub const fn is_sum_shape(self) -> bool {
        matches!(self, Self::BareFlag | Self::StringKeyed)
    }

    /// Returns the check a declaration of `kind` classified as `self`
    /// fails when a rule expects `expected`, or `None` when it matches.
    ///
    /// A kind mismatch is always `incorrectType`; otherwise the expected
    /// shape decides.
    #[must_use]
    pub fn violation(self, kind: DeclKind, expected: Shape) -> Option<RuleId> {
        if self == expected {
            return None;
        }
        let expects_sum = expected.is_sum_shape();
        let is_sum = matches!(kind, DeclKind::Sum);
        if expects_sum != is_sum {
            return Some(RuleId::IncorrectType);
        }
        Some(match expected {
            Self::BareFlag | Self::StringKeyed | Self::Unsupported => RuleId::UnsupportedEnum,
            Self::BaselineFlagOnly => RuleId::VariantEnum,
            Self::BaselineWithVariant => RuleId::NoVariantEnum,
        })
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::BareFlag => "BareFlag",
            Self::StringKeyed => "StringKeyed",
            Self::BaselineWithVariant => "BaselineWithVariant",
            Self::BaselineFlagOnly => "BaselineFlagOnly",
            Self::Unsupported => "Unsupported",
        };
        f.write_str(name)
    }
}

/// Classifies a declaration.
///
/// | Shape | Condition |
/// |---|---|
/// | `StringKeyed` | sum, `String` carrier |
/// | `BareFlag` | sum, no carrier, only boolean-family capabilities |
/// | `BaselineWithVariant` | product nesting exactly one sum |
/// | `BaselineFlagOnly` | product nesting no sum |
/// | `Unsupported` | everything else (`Int`/`Bool` carriers, foreign capabilities, several nested sums) |
#[must_use]
pub fn classify(decl: &Declaration) -> Shape {
    match decl.kind {
        DeclKind::Sum => match decl.raw_carrier {
            RawCarrier::String => Shape::StringKeyed,
            RawCarrier::None if has_only_bool_family(decl) => Shape::BareFlag,
            RawCarrier::None | RawCarrier::Int | RawCarrier::Bool => Shape::Unsupported,
        },
        DeclKind::Product => match decl.nested_sums().len() {
            0 => Shape::BaselineFlagOnly,
            1 => Shape::BaselineWithVariant,
            _ => Shape::Unsupported,
        },
    }
}

fn has_only_bool_family(decl: &Declaration) -> bool {
    decl.existing_capabilities
        .iter()
        .all(|cap| BOOL_FAMILY.contains(cap))
}

/// Returns the first declared capability outside the boolean family.
#[must_use]
pub fn foreign_capability(decl: &Declaration) -> Option<Capability> {
    decl.existing_capabilities
        .iter()
        .copied()
        .find(|cap| !BOOL_FAMILY.contains(cap))
}
