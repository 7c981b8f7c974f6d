//! The transformation pass over a set of top-level declarations.

use flagwright_syntax::{DeclPath, Declaration, SourceFile};

use crate::diagnostic::{Diagnostic, Severity};
use crate::expansion::{Expansion, Origin};
use crate::namespace::expand_each;

/// Options for a [`Pass`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PassOptions {
    /// Expand independent declarations on the `rayon` pool.
    pub parallel: bool,
    /// Count warnings as errors for [`PassOutput::has_errors`].
    pub deny_warnings: bool,
}

impl Default for PassOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            deny_warnings: false,
        }
    }
}

/// Runs classification and synthesis over declaration trees.
///
/// # Example
///
/// ```
/// use flagwright_engine::{Pass, PassOptions};
/// use flagwright_syntax::{Declaration, Directive};
///
/// let decls = vec![Declaration::sum("Onboarding").with_directive(Directive::BOOL_FLAG)];
/// let output = Pass::new(PassOptions::default()).run(&decls);
/// assert!(!output.has_errors());
/// assert_eq!(output.expansions.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Pass {
    options: PassOptions,
}

impl Pass {
    /// Creates a pass with the given options.
    #[must_use]
    pub const fn new(options: PassOptions) -> Self {
        Self { options }
    }

    /// Returns the options.
    #[must_use]
    pub const fn options(&self) -> PassOptions {
        self.options
    }

    /// Expands every top-level declaration that carries a directive.
    ///
    /// Declarations without one are listed in [`PassOutput::skipped`].
    #[must_use]
    pub fn run<'a>(&self, declarations: &'a [Declaration]) -> PassOutput<'a> {
        let mut skipped = Vec::new();
        let mut work = Vec::new();
        for decl in declarations {
            let path = DeclPath::root(decl.name.clone());
            match decl.directive {
                Some(directive) => work.push((decl, path, directive, Origin::Explicit)),
                None => skipped.push(path),
            }
        }

        let expansions = expand_each(work, self.options.parallel);
        let output = PassOutput {
            expansions,
            skipped,
            deny_warnings: self.options.deny_warnings,
        };
        tracing::debug!(
            expanded = output.expansions.len(),
            skipped = output.skipped.len(),
            errors = output.count(Severity::Error),
            warnings = output.count(Severity::Warning),
            "pass complete"
        );
        output
    }

    /// Expands the declarations of one source file.
    #[must_use]
    pub fn run_file<'a>(&self, file: &'a SourceFile) -> PassOutput<'a> {
        tracing::debug!(file = file.path.as_deref().unwrap_or("<memory>"), "running pass");
        self.run(&file.declarations)
    }
}

/// Everything a pass produced.
#[derive(Clone, Debug)]
pub struct PassOutput<'a> {
    /// One expansion per annotated top-level declaration, in input order.
    pub expansions: Vec<Expansion<'a>>,
    /// Top-level declarations without a directive.
    pub skipped: Vec<DeclPath>,
    deny_warnings: bool,
}

impl<'a> PassOutput<'a> {
    /// Every expansion, nested ones included, pre-order.
    pub fn all(&self) -> impl Iterator<Item = &Expansion<'a>> {
        self.expansions.iter().flat_map(Expansion::iter)
    }

    /// All diagnostics, in order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.all().flat_map(|e| e.result.diagnostics.iter())
    }

    /// Returns the number of diagnostics with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics().filter(|d| d.severity == severity).count()
    }

    /// Returns true if the pass should fail: any error, or any warning
    /// when warnings are denied.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics()
            .any(|d| d.is_error() || self.deny_warnings)
    }

    /// Paths of declarations whose synthesis was aborted.
    #[must_use]
    pub fn aborted(&self) -> Vec<&DeclPath> {
        self.all()
            .filter(|e| e.result.aborted)
            .map(|e| &e.path)
            .collect()
    }

    /// Finds the expansion at `path`.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Expansion<'a>> {
        self.all().find(|e| e.path.full_name() == path)
    }
}
