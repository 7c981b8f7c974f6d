//! Capability tags and error types for flagwright.
//!
//! This crate provides:
//! - [`Capability`] - The trait identifiers a flag type can satisfy
//! - [`CapabilitySet`] - Ordered capability sets used by synthesis
//! - [`Encoding`] - How a capability is read from a remote provider
//! - [`Error`] - Rich error types with context

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod capability;
pub mod error;

pub use capability::{Capability, CapabilitySet, Encoding};
pub use error::{Error, ErrorContext, ErrorKind};

/// Result type alias using the flagwright [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
