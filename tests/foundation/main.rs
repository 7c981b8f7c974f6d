//! Integration tests for Layer 0: Foundation
//!
//! Tests for capability tags and error types.

mod capabilities;
mod errors;
