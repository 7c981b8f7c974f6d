//! Integration tests for Layer 3: Runtime
//!
//! Tests for emitted flag types, the remote config service, and
//! declaration tree I/O.

mod flags_tree;
mod generated;
mod service;
mod trees;
