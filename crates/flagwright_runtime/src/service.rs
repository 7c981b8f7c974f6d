//! The remote configuration service.
//!
//! Values are resolved once per flag type and cached: the first read of
//! a type computes its value (override, then provider, then default)
//! while holding that type's cache entry, so concurrent readers never
//! compute it twice. Every cached value lives in a `watch` channel that
//! subscribers can observe.

use std::any::TypeId;
use std::marker::PhantomData;
use std::sync::Arc;

use dashmap::{DashMap, DashSet};
use flagwright_foundation::{Error, ErrorKind, Result};
use parking_lot::RwLock;
use tokio::sync::watch;

use crate::key::{ErasedValue, FlagType, RemoteKey};
use crate::provider::{RemoteConfigProvider, decode_raw};
use crate::value::{ExperimentalGroup, RemoteValue};

// =============================================================================
// Observer
// =============================================================================

/// Callbacks for resolution events. Every method defaults to doing nothing.
///
/// Callbacks run after the cache entry is released, so they may read
/// other values from the service.
pub trait ServiceObserver: Send + Sync {
    /// A key had no value at the provider.
    fn key_not_found(&self, _key: &str) {}

    /// Summary of the keys not found during a [`prefetch`](RemoteConfigService::prefetch).
    fn keys_not_found(&self, _keys: &[String]) {}

    /// A key had a value that does not decode.
    fn incorrect_value(&self, _key: &str, _value: &str) {}

    /// Summary of the incorrect values seen during a prefetch.
    fn incorrect_values(&self, _values: &[(String, String)]) {}

    /// A resolved value belongs to a tracked experimental group.
    fn experimental_group(&self, _group: &ExperimentalGroup) {}
}

// =============================================================================
// Service
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Override,
    Provider,
    Missing,
    Incorrect,
}

struct Resolution {
    value: ErasedValue,
    source: Source,
    raw: Option<String>,
}

struct KnownKey {
    name: String,
    label: String,
    flag: FlagType,
}

/// A thread-safe cache of resolved flag values.
pub struct RemoteConfigService {
    provider: Arc<dyn RemoteConfigProvider>,
    observer: Option<Arc<dyn ServiceObserver>>,
    overrides: DashMap<String, String>,
    cache: DashMap<TypeId, watch::Sender<ErasedValue>>,
    missing_keys: DashSet<String>,
    incorrect_values: DashMap<String, String>,
    known_keys: RwLock<Vec<KnownKey>>,
}

impl RemoteConfigService {
    /// Creates a service reading from `provider`.
    #[must_use]
    pub fn new(provider: Arc<dyn RemoteConfigProvider>) -> Self {
        Self {
            provider,
            observer: None,
            overrides: DashMap::new(),
            cache: DashMap::new(),
            missing_keys: DashSet::new(),
            incorrect_values: DashMap::new(),
            known_keys: RwLock::new(Vec::new()),
        }
    }

    /// Sets the observer notified of resolution events.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn ServiceObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Overrides the raw value of a key. Takes precedence over the
    /// provider for values resolved afterwards.
    pub fn set_override(&self, key: impl Into<String>, raw: impl Into<String>) {
        self.overrides.insert(key.into(), raw.into());
    }

    /// Removes an override.
    pub fn clear_override(&self, key: &str) {
        self.overrides.remove(key);
    }

    /// Returns the value of `key`, resolving and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` does not resolve to `T`.
    pub fn value<T: RemoteValue>(&self, key: &dyn RemoteKey) -> Result<T> {
        let value = self.erased(key);
        downcast::<T>(key, &value)
    }

    /// Subscribes to the cached value of `key`, resolving it first if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns an error if `key` does not resolve to `T`.
    pub fn subscribe<T: RemoteValue>(&self, key: &dyn RemoteKey) -> Result<Subscription<T>> {
        let flag = key.flag_type();
        if flag.type_id() != TypeId::of::<T>() {
            return Err(type_mismatch::<T>(key));
        }
        self.erased(key);
        let receiver = self
            .cache
            .get(&flag.type_id())
            .map(|sender| sender.subscribe())
            .ok_or_else(|| {
                Error::new(ErrorKind::Internal(format!(
                    "no cached value for `{}`",
                    key.name()
                )))
            })?;
        Ok(Subscription {
            receiver,
            marker: PhantomData,
        })
    }

    /// Resolves every key, caching the values, and registers them for
    /// [`current_remote_data`](Self::current_remote_data). Reports the
    /// missing keys and incorrect values seen so far to the observer.
    pub fn prefetch(&self, keys: &[&dyn RemoteKey]) {
        {
            let mut known = self.known_keys.write();
            known.clear();
            known.extend(keys.iter().map(|key| KnownKey {
                name: key.name().to_string(),
                label: key.label().to_string(),
                flag: key.flag_type(),
            }));
        }
        for key in keys {
            self.erased(*key);
        }

        let Some(observer) = &self.observer else {
            return;
        };
        let missing = self.missing_keys();
        if !missing.is_empty() {
            observer.keys_not_found(&missing);
        }
        let incorrect = self.incorrect_values();
        if !incorrect.is_empty() {
            observer.incorrect_values(&incorrect);
        }
    }

    /// Label and rendered value of every key registered by the last
    /// [`prefetch`](Self::prefetch), in registration order.
    #[must_use]
    pub fn current_remote_data(&self) -> Vec<(String, String)> {
        let known = self.known_keys.read();
        known
            .iter()
            .filter(|key| key.flag.capability().is_value())
            .map(|key| {
                let value = self
                    .cache
                    .get(&key.flag.type_id())
                    .map_or_else(|| key.flag.default_value(), |sender| sender.borrow().clone());
                (key.label.clone(), key.flag.describe(&value))
            })
            .collect()
    }

    /// Re-resolves every registered key and publishes changed values to
    /// subscribers.
    pub fn refresh(&self) {
        let known: Vec<(String, FlagType)> = self
            .known_keys
            .read()
            .iter()
            .map(|key| (key.name.clone(), key.flag))
            .collect();
        for (name, flag) in known {
            let resolution = self.resolve(&name, &flag);
            if let Some(sender) = self.cache.get(&flag.type_id()) {
                sender.send_replace(Arc::clone(&resolution.value));
            }
            self.report(&name, &flag, &resolution);
        }
    }

    /// Fetches and activates fresh values at the provider.
    ///
    /// Cached values are kept; call [`refresh`](Self::refresh) to apply
    /// the fetched values.
    ///
    /// # Errors
    ///
    /// Returns the provider's error if the fetch fails.
    pub async fn fetch(&self) -> Result<()> {
        self.provider.fetch_and_activate().await
    }

    /// Keys that had no value at the provider, sorted.
    #[must_use]
    pub fn missing_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.missing_keys.iter().map(|k| k.clone()).collect();
        keys.sort();
        keys
    }

    /// Keys with undecodable values and the values, sorted by key.
    #[must_use]
    pub fn incorrect_values(&self) -> Vec<(String, String)> {
        let mut values: Vec<(String, String)> = self
            .incorrect_values
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        values.sort();
        values
    }

    fn erased(&self, key: &dyn RemoteKey) -> ErasedValue {
        let flag = key.flag_type();
        let mut computed = None;
        let value = {
            let entry = self.cache.entry(flag.type_id()).or_insert_with(|| {
                let resolution = self.resolve(key.name(), &flag);
                let (sender, _) = watch::channel(Arc::clone(&resolution.value));
                computed = Some(resolution);
                sender
            });
            entry.value().borrow().clone()
        };

        match computed {
            Some(resolution) => self.report(key.name(), &flag, &resolution),
            None => tracing::trace!(key = key.name(), "cache hit"),
        }
        value
    }

    fn resolve(&self, name: &str, flag: &FlagType) -> Resolution {
        if let Some(value) = self
            .overrides
            .get(name)
            .and_then(|raw| decode_raw(flag, raw.value()))
        {
            return Resolution {
                value,
                source: Source::Override,
                raw: None,
            };
        }

        if let Some(value) = self
            .provider
            .raw_value(name)
            .and_then(|raw| decode_raw(flag, &raw))
        {
            return Resolution {
                value,
                source: Source::Provider,
                raw: None,
            };
        }

        let raw = self.provider.string_representation(name);
        Resolution {
            value: flag.default_value(),
            source: if raw.is_some() {
                Source::Incorrect
            } else {
                Source::Missing
            },
            raw,
        }
    }

    fn report(&self, name: &str, flag: &FlagType, resolution: &Resolution) {
        match (resolution.source, resolution.raw.as_deref()) {
            (Source::Incorrect, Some(raw)) => {
                tracing::warn!(key = name, value = raw, flag = flag.type_name(), "incorrect remote value");
                self.incorrect_values.insert(name.to_string(), raw.to_string());
                if let Some(observer) = &self.observer {
                    observer.incorrect_value(name, raw);
                }
            }
            (Source::Missing, _) => {
                tracing::warn!(key = name, flag = flag.type_name(), "remote key not found");
                self.missing_keys.insert(name.to_string());
                if let Some(observer) = &self.observer {
                    observer.key_not_found(name);
                }
            }
            (source, _) => tracing::trace!(key = name, ?source, "resolved remote value"),
        }

        if !matches!(resolution.source, Source::Override | Source::Provider) {
            return;
        }
        if let (Some(group), Some(observer)) = (flag.tracked_group(&resolution.value), &self.observer) {
            observer.experimental_group(&group);
        }
    }
}

fn type_mismatch<T>(key: &dyn RemoteKey) -> Error {
    Error::new(ErrorKind::Internal(format!(
        "key `{}` resolves to {}, not {}",
        key.name(),
        key.flag_type().type_name(),
        std::any::type_name::<T>()
    )))
}

fn downcast<T: RemoteValue>(key: &dyn RemoteKey, value: &ErasedValue) -> Result<T> {
    value
        .downcast_ref::<T>()
        .cloned()
        .ok_or_else(|| type_mismatch::<T>(key))
}

// =============================================================================
// Subscription
// =============================================================================

/// A typed view of a cached value's `watch` channel.
pub struct Subscription<T> {
    receiver: watch::Receiver<ErasedValue>,
    marker: PhantomData<fn() -> T>,
}

impl<T: RemoteValue> Subscription<T> {
    /// The last published value.
    #[must_use]
    pub fn current(&self) -> T {
        self.receiver
            .borrow()
            .downcast_ref::<T>()
            .cloned()
            .unwrap_or_else(T::default_value)
    }

    /// Waits for the next published value.
    ///
    /// # Errors
    ///
    /// Returns an error if the service was dropped.
    pub async fn changed(&mut self) -> Result<T> {
        self.receiver
            .changed()
            .await
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        let value = self
            .receiver
            .borrow_and_update()
            .downcast_ref::<T>()
            .cloned()
            .unwrap_or_else(T::default_value);
        Ok(value)
    }

    /// The underlying receiver.
    #[must_use]
    pub fn into_inner(self) -> watch::Receiver<ErasedValue> {
        self.receiver
    }
}
