//! Declaration tree model for flagwright.
//!
//! This crate provides:
//! - [`Declaration`] - One synthesizable type and its nested members
//! - [`Directive`] - The annotation selecting which rule expands it
//! - [`DeclPath`] - Dotted paths identifying declarations in a tree
//! - [`walk`] - Depth-first traversal over a declaration tree
//! - [`Span`] - Source locations for diagnostics
//!
//! Parsing source text into declarations is left to front ends; trees
//! arrive already built, either through the builder methods here or
//! deserialized with the `serde` feature.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod declaration;
pub mod path;
pub mod span;
pub mod walk;

pub use declaration::{
    Body, DeclKind, Declaration, Directive, Member, MemberKey, MemberKind, Param, RawCarrier,
    SourceFile, TypeRef,
};
pub use path::DeclPath;
pub use span::Span;
pub use walk::{Walk, walk};
