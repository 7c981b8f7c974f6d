//! Integration tests for Layer 1: Syntax
//!
//! Tests for declaration trees, directives, paths, and validation.

mod declarations;
mod validation;
