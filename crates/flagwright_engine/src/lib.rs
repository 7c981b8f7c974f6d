//! Declaration transformation engine for flagwright.
//!
//! This crate provides:
//! - [`classify`] - Shape classification of one declaration
//! - [`rules`] - One synthesis rule per directive
//! - [`namespace`] - Two-phase propagation over namespace containers
//! - [`DiagnosticReporter`] - Diagnostic collection and abort decisions
//! - [`Pass`] - A full pass over a set of top-level declarations
//! - [`emit`] - Rendering of expansions as Rust source
//!
//! Every operation here is a pure function of its input tree: running a
//! pass twice over the same declarations yields the same output.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod defaults;
pub mod diagnostic;
pub mod emit;
pub mod expansion;
pub mod merge;
pub mod namespace;
pub mod pass;
pub mod rules;
pub mod shape;

pub use diagnostic::{Diagnostic, DiagnosticReporter, RuleId, Severity, Stage};
pub use emit::{EmitOptions, render};
pub use expansion::{Expansion, ExpansionResult, Origin, RuleConfig};
pub use namespace::{Assignment, assign, expand_namespace};
pub use pass::{Pass, PassOptions, PassOutput};
pub use shape::{Shape, classify};
