//! Depth-first traversal over declaration trees.
//!
//! # Example
//!
//! ```
//! use flagwright_syntax::{Declaration, walk};
//!
//! let tree = Declaration::product("Paywall").with_nested(Declaration::sum("Variant"));
//! let paths: Vec<String> = walk(&tree).map(|(path, _)| path.full_name()).collect();
//! assert_eq!(paths, ["Paywall", "Paywall.Variant"]);
//! ```

use crate::declaration::Declaration;
use crate::path::DeclPath;

/// Returns a pre-order iterator over `root` and all nested declarations.
#[must_use]
pub fn walk(root: &Declaration) -> Walk<'_> {
    Walk {
        stack: vec![(DeclPath::root(&root.name), root)],
    }
}

/// Pre-order iterator yielding each declaration with its path.
pub struct Walk<'a> {
    stack: Vec<(DeclPath, &'a Declaration)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (DeclPath, &'a Declaration);

    fn next(&mut self) -> Option<Self::Item> {
        let (path, decl) = self.stack.pop()?;
        // Reversed so the first child is visited first.
        for child in decl.nested.iter().rev() {
            self.stack.push((path.child(&child.name), child));
        }
        Some((path, decl))
    }
}
