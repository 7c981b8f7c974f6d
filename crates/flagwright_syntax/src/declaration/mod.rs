//! Declaration trees handed to the transformation engine.
//!
//! A front end (or a tree file) produces [`Declaration`]s; the engine
//! classifies them and synthesizes members and capabilities.
//!
//! # Module Structure
//!
//! - `types` - All declaration type definitions
//! - `validate` - Structural invariant checks for incoming trees

mod types;
mod validate;


pub use types::{
    Body, DeclKind, Declaration, Directive, Member, MemberKey, MemberKind, Param, RawCarrier,
    SourceFile, TypeRef,
};
