//! Remote keys and the type information they carry.
//!
//! A key names a remote value and carries a [`FlagType`]: the value
//! capability that selects the decoding, plus type-erased functions over
//! the concrete flag type. The service decides how to read a value from
//! the capability tag alone.

use std::any::{Any, TypeId};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use flagwright_foundation::Capability;

use crate::value::{ExperimentalGroup, Raw, RemoteValue};

/// A resolved value with its concrete type erased.
pub type ErasedValue = Arc<dyn Any + Send + Sync>;

/// A named remote value.
pub trait RemoteKey: Send + Sync {
    /// The key as known to the provider.
    fn name(&self) -> &str;

    /// Display title, when it differs from the name.
    fn title(&self) -> Option<&str> {
        None
    }

    /// The flag type this key resolves to.
    fn flag_type(&self) -> FlagType;

    /// The title if set, otherwise the name.
    fn label(&self) -> &str {
        self.title().unwrap_or_else(|| self.name())
    }
}

/// Type information for one flag type.
#[derive(Clone, Copy)]
pub struct FlagType {
    capability: Capability,
    type_id: TypeId,
    type_name: &'static str,
    decode: fn(Raw<'_>) -> Option<ErasedValue>,
    default: fn() -> ErasedValue,
    describe: fn(&ErasedValue) -> String,
    tracked_group: fn(&ErasedValue) -> Option<ExperimentalGroup>,
}

impl FlagType {
    /// Builds the type information for `T`.
    #[must_use]
    pub fn of<T: RemoteValue>() -> Self {
        Self {
            capability: T::CAPABILITY,
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            decode: decode_erased::<T>,
            default: default_erased::<T>,
            describe: describe_erased::<T>,
            tracked_group: tracked_group_erased::<T>,
        }
    }

    /// The value capability of the type.
    #[must_use]
    pub const fn capability(&self) -> Capability {
        self.capability
    }

    /// The type's identity, used as the cache key.
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The type's Rust name.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Decodes a raw value into the type.
    #[must_use]
    pub fn decode(&self, raw: Raw<'_>) -> Option<ErasedValue> {
        (self.decode)(raw)
    }

    /// The type's default value.
    #[must_use]
    pub fn default_value(&self) -> ErasedValue {
        (self.default)()
    }

    /// Renders a value of this type; empty for a value of another type.
    #[must_use]
    pub fn describe(&self, value: &ErasedValue) -> String {
        (self.describe)(value)
    }

    /// The experimental group to report for a value, if it should be
    /// tracked.
    #[must_use]
    pub fn tracked_group(&self, value: &ErasedValue) -> Option<ExperimentalGroup> {
        (self.tracked_group)(value)
    }
}

impl fmt::Debug for FlagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagType")
            .field("capability", &self.capability)
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

impl PartialEq for FlagType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for FlagType {}

fn decode_erased<T: RemoteValue>(raw: Raw<'_>) -> Option<ErasedValue> {
    T::decode(raw).map(|value| Arc::new(value) as ErasedValue)
}

fn default_erased<T: RemoteValue>() -> ErasedValue {
    Arc::new(T::default_value())
}

fn describe_erased<T: RemoteValue>(value: &ErasedValue) -> String {
    value
        .downcast_ref::<T>()
        .map(RemoteValue::describe)
        .unwrap_or_default()
}

fn tracked_group_erased<T: RemoteValue>(value: &ErasedValue) -> Option<ExperimentalGroup> {
    value
        .downcast_ref::<T>()
        .filter(|v| v.should_track())
        .and_then(RemoteValue::experimental_group)
}

/// A key bound to a concrete flag type.
///
/// ```
/// use flagwright_runtime::key::FlagKey;
/// use flagwright_runtime::RemoteKey;
/// # use flagwright_runtime::{Capability, Raw, RemoteValue};
/// # #[derive(Clone)]
/// # struct Onboarding;
/// # impl RemoteValue for Onboarding {
/// #     const CAPABILITY: Capability = Capability::BoolValue;
/// #     fn default_value() -> Self { Onboarding }
/// #     fn decode(_: Raw<'_>) -> Option<Self> { None }
/// #     fn describe(&self) -> String { String::new() }
/// # }
///
/// let key = FlagKey::<Onboarding>::new("onboarding").with_title("New onboarding");
/// assert_eq!(key.label(), "New onboarding");
/// assert_eq!(key.flag_type().capability(), Capability::BoolValue);
/// ```
pub struct FlagKey<T> {
    name: String,
    title: Option<String>,
    marker: PhantomData<fn() -> T>,
}

impl<T> FlagKey<T> {
    /// Creates a key.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            marker: PhantomData,
        }
    }

    /// Sets the display title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

impl<T> Clone for FlagKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            title: self.title.clone(),
            marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for FlagKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlagKey")
            .field("name", &self.name)
            .field("title", &self.title)
            .finish()
    }
}

impl<T: RemoteValue> RemoteKey for FlagKey<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn flag_type(&self) -> FlagType {
        FlagType::of::<T>()
    }
}
