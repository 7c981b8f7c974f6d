//! flagwright - Remote feature-flag declaration transformation
//!
//! This crate re-exports all layers of the flagwright system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: flagwright_runtime    - Value traits, config service, tree I/O, CLI
//! Layer 2: flagwright_engine     - Classification, rules, namespaces, emission
//! Layer 1: flagwright_syntax     - Declaration trees, directives, paths
//! Layer 0: flagwright_foundation - Capabilities and errors
//! ```

pub use flagwright_engine as engine;
pub use flagwright_foundation as foundation;
pub use flagwright_runtime as runtime;
pub use flagwright_syntax as syntax;
