//! Structural invariant checks.
//!
//! Trees built by hand or read from files are checked once before the
//! engine sees them. The engine itself assumes these invariants hold.

use std::collections::HashSet;

use flagwright_foundation::{Error, ErrorContext, Result};

use super::types::{DeclKind, Declaration, MemberKind, RawCarrier, SourceFile};
use crate::path::DeclPath;

impl Declaration {
    /// Checks the structural invariants of this declaration and every
    /// nested declaration.
    ///
    /// - a sum's cases are unique by name
    /// - only sums carry a raw value carrier or cases
    /// - only products carry stored fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidDeclaration` naming the first offending path.
    pub fn validate(&self) -> Result<()> {
        self.validate_at(&DeclPath::root(&self.name))
    }

    fn validate_at(&self, path: &DeclPath) -> Result<()> {
        let located = |message: String| {
            let err = Error::invalid_declaration(path.full_name(), message);
            if self.span.is_unknown() {
                err
            } else {
                err.with_context(
                    ErrorContext::new()
                        .with_position(self.span.line as usize, self.span.column as usize),
                )
            }
        };

        if self.name.is_empty() {
            return Err(located("declaration has no name".to_string()));
        }

        match self.kind {
            DeclKind::Sum => {
                let mut seen = HashSet::new();
                for member in &self.members {
                    match &member.kind {
                        MemberKind::Case { .. } if !seen.insert(member.name.as_str()) => {
                            return Err(located(format!("duplicate case `{}`", member.name)));
                        }
                        MemberKind::Field { .. } => {
                            return Err(located(format!(
                                "sum declares stored field `{}`",
                                member.name
                            )));
                        }
                        _ => {}
                    }
                }
            }
            DeclKind::Product => {
                if self.raw_carrier != RawCarrier::None {
                    return Err(located(format!(
                        "product declares raw value carrier {}",
                        self.raw_carrier
                    )));
                }
                if let Some(case) = self.cases().next() {
                    return Err(located(format!("product declares case `{}`", case.name)));
                }
            }
        }

        let mut nested_names = HashSet::new();
        for child in &self.nested {
            if !nested_names.insert(child.name.as_str()) {
                return Err(located(format!(
                    "duplicate nested declaration `{}`",
                    child.name
                )));
            }
            child.validate_at(&path.child(&child.name))?;
        }

        Ok(())
    }
}

impl SourceFile {
    /// Validates every top-level declaration.
    ///
    /// # Errors
    ///
    /// Returns the first invariant violation, with the file path attached
    /// as context when known.
    pub fn validate(&self) -> Result<()> {
        for decl in &self.declarations {
            decl.validate().map_err(|err| match &self.path {
                Some(path) => {
                    let context = err.context.clone().unwrap_or_default().with_source(path);
                    err.with_context(context)
                }
                None => err,
            })?;
        }
        Ok(())
    }
}
