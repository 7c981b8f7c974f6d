//! Remote configuration providers.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use flagwright_foundation::{Encoding, Error, Result};

use crate::baseline::parse_bool_token;
use crate::key::{ErasedValue, FlagType, RemoteKey};
use crate::value::Raw;

/// The remote source of raw flag values.
#[async_trait]
pub trait RemoteConfigProvider: Send + Sync {
    /// The activated raw value for a key, if the key is known.
    fn raw_value(&self, key: &str) -> Option<String>;

    /// The raw value as reported for diagnostics: absent when empty.
    fn string_representation(&self, key: &str) -> Option<String> {
        self.raw_value(key).filter(|v| !v.is_empty())
    }

    /// Fetches fresh values and activates them.
    async fn fetch_and_activate(&self) -> Result<()>;
}

/// Decodes a raw string with the encoding of `flag`'s capability.
///
/// Text capabilities decode the string as a name. The flag encoding
/// accepts exactly `"true"` or `"false"`; anything else, including the
/// empty string, is absent.
#[must_use]
pub fn decode_raw(flag: &FlagType, raw: &str) -> Option<ErasedValue> {
    match flag.capability().encoding()? {
        Encoding::Text => flag.decode(Raw::Text(raw)),
        Encoding::Flag => flag.decode(Raw::Flag(parse_bool_token(raw)?)),
    }
}

/// Reads and decodes the value of `key` from `provider`.
#[must_use]
pub fn resolve(provider: &dyn RemoteConfigProvider, key: &dyn RemoteKey) -> Option<ErasedValue> {
    let raw = provider.raw_value(key.name())?;
    decode_raw(&key.flag_type(), &raw)
}

/// A provider backed by in-process maps.
///
/// Values set with [`stage`](Self::stage) become visible on the next
/// [`fetch_and_activate`](RemoteConfigProvider::fetch_and_activate).
#[derive(Debug, Default)]
pub struct InMemoryProvider {
    active: DashMap<String, String>,
    staged: DashMap<String, String>,
    offline: AtomicBool,
}

impl InMemoryProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets an active value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.active.insert(key.into(), value.into());
    }

    /// Removes an active value.
    pub fn remove(&self, key: &str) {
        self.active.remove(key);
    }

    /// Stages a value for the next fetch.
    pub fn stage(&self, key: impl Into<String>, value: impl Into<String>) {
        self.staged.insert(key.into(), value.into());
    }

    /// Makes subsequent fetches fail.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }
}

#[async_trait]
impl RemoteConfigProvider for InMemoryProvider {
    fn raw_value(&self, key: &str) -> Option<String> {
        self.active.get(key).map(|v| v.value().clone())
    }

    async fn fetch_and_activate(&self) -> Result<()> {
        if self.offline.load(Ordering::Relaxed) {
            return Err(Error::provider("in-memory provider is offline"));
        }
        let keys: Vec<String> = self.staged.iter().map(|e| e.key().clone()).collect();
        for key in keys {
            if let Some((key, value)) = self.staged.remove(&key) {
                self.active.insert(key, value);
            }
        }
        Ok(())
    }
}
