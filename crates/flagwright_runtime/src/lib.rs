//! Runtime support, tree I/O, and CLI for flagwright.
//!
//! This crate provides:
//! - [`RemoteValue`] and friends - The traits generated flag types implement
//! - [`RemoteKey`] / [`FlagType`] - Keys with an explicit capability tag
//! - [`RemoteConfigProvider`] - The remote source of raw values
//! - [`RemoteConfigService`] - A thread-safe cache resolving flag values
//! - [`serialize`] - Loading and saving declaration trees
//! - [`GeneratorConfig`] - TOML configuration for the generator CLI
//!
//! Generated code refers to this crate through a single path alias
//! (`use ::flagwright_runtime as rt;`), so everything it touches is
//! re-exported at the root.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod baseline;
pub mod config;
pub mod key;
pub mod provider;
pub mod serialize;
pub mod service;
pub mod value;

pub use baseline::{BASELINE_SUFFIX, join_baseline, parse_bool_token, split_baseline};
pub use config::GeneratorConfig;
pub use flagwright_foundation::{Capability, Encoding, Error, ErrorKind, Result};
pub use key::{ErasedValue, FlagKey, FlagType, RemoteKey};
pub use provider::{InMemoryProvider, RemoteConfigProvider, resolve};
pub use service::{RemoteConfigService, ServiceObserver};
pub use value::{
    BoolRemoteValue, CaseEnumerable, ExperimentalGroup, Raw, RemoteValue, StringRemoteValue,
};
