//! Capability tags for remote flag types.
//!
//! A capability names a behavioral contract a flag type satisfies. The
//! engine synthesizes conformances to capabilities, and the runtime reads
//! the tag to decide how a flag is encoded by a remote provider.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Ordered set of capabilities.
///
/// Ordered so that every rendering of a set is deterministic.
pub type CapabilitySet = BTreeSet<Capability>;

/// A trait identifier a flag type can conform to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Capability {
    /// Named variant read from a raw string.
    StringValue,
    /// On/off toggle read from a boolean token.
    BoolValue,
    /// Named variant split into baseline/treatment groups.
    BaselineStringValue,
    /// On/off toggle split into baseline/treatment groups.
    BaselineBoolValue,
    /// Provides a `default` value.
    Default,
    /// Enumerates every value of the type.
    CaseEnumerable,
    /// Structural equality.
    Equatable,
}

/// How a value capability is read from a remote provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Encoding {
    /// The raw string is parsed by name.
    Text,
    /// The raw string must be exactly `"true"` or `"false"`.
    Flag,
}

impl Capability {
    /// Every capability, in declaration order.
    pub const ALL: [Capability; 7] = [
        Capability::StringValue,
        Capability::BoolValue,
        Capability::BaselineStringValue,
        Capability::BaselineBoolValue,
        Capability::Default,
        Capability::CaseEnumerable,
        Capability::Equatable,
    ];

    /// Returns the identifier used in diagnostics and tree files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StringValue => "StringValue",
            Self::BoolValue => "BoolValue",
            Self::BaselineStringValue => "BaselineStringValue",
            Self::BaselineBoolValue => "BaselineBoolValue",
            Self::Default => "Default",
            Self::CaseEnumerable => "CaseEnumerable",
            Self::Equatable => "Equatable",
        }
    }

    /// Returns the provider encoding of a value capability.
    ///
    /// Baseline booleans travel as names (`"true_baseline"`), so only
    /// [`Capability::BoolValue`] uses the boolean token encoding.
    #[must_use]
    pub const fn encoding(self) -> Option<Encoding> {
        match self {
            Self::BoolValue => Some(Encoding::Flag),
            Self::StringValue | Self::BaselineStringValue | Self::BaselineBoolValue => {
                Some(Encoding::Text)
            }
            Self::Default | Self::CaseEnumerable | Self::Equatable => None,
        }
    }

    /// Returns true for the four value capabilities.
    #[must_use]
    pub const fn is_value(self) -> bool {
        self.encoding().is_some()
    }

    /// Returns true for the baseline-aware capabilities.
    #[must_use]
    pub const fn is_baseline(self) -> bool {
        matches!(self, Self::BaselineStringValue | Self::BaselineBoolValue)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::unknown_capability(s))
    }
}

/// Renders a capability set as a comma-separated list.
#[must_use]
pub fn join(set: &CapabilitySet) -> String {
    set.iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
