//! Dotted declaration paths.
//!
//! A `DeclPath` names a declaration inside a tree, e.g. `Flags.Paywall`
//! for the `Paywall` child of the `Flags` namespace. Diagnostics and
//! namespace assignments are keyed by it.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A qualified declaration path like `Flags.Paywall.Variant`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclPath {
    /// Path segments, outermost first.
    pub segments: Vec<String>,
}

impl DeclPath {
    /// Creates a path with a single segment.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Creates a path from a dotted string like `Flags.Paywall`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        Self {
            segments: s
                .split('.')
                .filter(|seg| !seg.is_empty())
                .map(String::from)
                .collect(),
        }
    }

    /// Returns a new path with `name` appended.
    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }

    /// Returns the enclosing path, if any.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        if self.segments.len() < 2 {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    /// Returns the last segment.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Returns the full dotted name.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Display for DeclPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
