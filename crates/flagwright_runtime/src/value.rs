//! Traits implemented by flag types.
//!
//! The generator emits these impls for every capability it synthesizes;
//! capabilities a type already declared are implemented by hand.

use flagwright_foundation::Capability;

/// A raw value as delivered by a provider, already shaped by the
/// capability's [`Encoding`](flagwright_foundation::Encoding).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Raw<'a> {
    /// A name to decode by string.
    Text(&'a str),
    /// A boolean token.
    Flag(bool),
}

/// Experiment tracking data reported for a resolved value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExperimentalGroup {
    /// The experiment the value belongs to.
    pub key: String,
    /// The group the user landed in.
    pub value: String,
}

impl ExperimentalGroup {
    /// Creates a group record.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A value that can be resolved from remote configuration.
pub trait RemoteValue: Clone + Send + Sync + 'static {
    /// The value capability that decides how raw values are decoded.
    const CAPABILITY: Capability;

    /// The value used when the remote source has nothing usable.
    fn default_value() -> Self;

    /// Decodes a raw value. Returns `None` when it does not name a value.
    fn decode(raw: Raw<'_>) -> Option<Self>;

    /// Human-readable rendering: `"enabled"`/`"disabled"` or the name.
    fn describe(&self) -> String;

    /// Returns true for the control group of an experiment.
    fn is_baseline(&self) -> bool {
        false
    }

    /// Experiment tracking data, for types that take part in one.
    fn experimental_group(&self) -> Option<ExperimentalGroup> {
        None
    }

    /// Whether [`experimental_group`](Self::experimental_group) should be
    /// reported. The baseline group is never tracked.
    fn should_track(&self) -> bool {
        !self.is_baseline()
    }
}

/// A value identified by a string name.
pub trait StringRemoteValue: Sized {
    /// Parses a name. Returns `None` for unknown names.
    fn from_name(name: &str) -> Option<Self>;

    /// The name this value is delivered as.
    fn name(&self) -> String;
}

/// A two-state value.
pub trait BoolRemoteValue: Sized {
    /// Builds the value for a boolean.
    fn from_bool(value: bool) -> Self;

    /// Returns true when the flag is on.
    fn is_enabled(&self) -> bool;
}

/// A type whose values can all be listed.
pub trait CaseEnumerable: Sized {
    /// Every value, in declaration order.
    fn all_cases() -> Vec<Self>;
}
