//! Integration tests for Layer 2: Engine
//!
//! Tests for classification, rules, namespace propagation, and emission.

mod emission;
mod namespaces;
