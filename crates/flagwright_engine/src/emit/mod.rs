//! Rendering of expansions as Rust source.
//!
//! Each non-aborted expansion becomes a complete type definition, an
//! inherent `impl` with the synthesized members, and one trait `impl` per
//! capability the expansion added. Capabilities the declaration already
//! had are implemented by hand and never emitted again.
//!
//! Namespaces become modules; a nested expansion (the variant of a
//! baseline string flag) becomes a sibling item named after its parent:
//! `Paywall.Variant` renders as `PaywallVariant`. A parent whose variant
//! was aborted is not rendered either.
//!
//! # Example
//!
//! ```
//! use flagwright_engine::{EmitOptions, Pass, render};
//! use flagwright_syntax::{Declaration, Directive};
//!
//! let decls = vec![Declaration::sum("Onboarding").with_directive(Directive::BOOL_FLAG)];
//! let output = Pass::default().run(&decls);
//! let source = render(&output.expansions, &EmitOptions::default());
//! assert!(source.contains("pub enum Onboarding {"));
//! ```

pub mod naming;


use flagwright_foundation::capability::join;
use flagwright_foundation::{Capability, CapabilitySet};
use flagwright_syntax::{Body, DeclKind, Declaration, Directive, Member, MemberKind, TypeRef};

use crate::expansion::Expansion;
use naming::{method_name, string_literal, to_snake, to_upper_camel};

/// First line of every rendered file.
pub const HEADER: &str = "// @generated by flagwright. Do not edit.";

/// Options for [`render`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitOptions {
    /// Path the emitted code imports the runtime traits from.
    pub runtime_path: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            runtime_path: "::flagwright_runtime".to_string(),
        }
    }
}

/// Renders expansions as one Rust source file.
///
/// The output is a pure function of its input.
#[must_use]
pub fn render(expansions: &[Expansion<'_>], options: &EmitOptions) -> String {
    let mut emitter = Emitter::new();
    emitter.line(HEADER);
    emitter.blank();
    emitter.line("#[allow(unused_imports)]");
    emitter.line(&format!("use {} as rt;", options.runtime_path));
    for expansion in expansions {
        emitter.expansion(expansion, "");
    }
    emitter.output
}

// =============================================================================
// Type View
// =============================================================================

/// A declaration together with what its expansion adds.
struct TypeView<'e> {
    item: String,
    decl: &'e Declaration,
    directive: Directive,
    members: Vec<&'e Member>,
    new_capabilities: &'e CapabilitySet,
}

impl<'e> TypeView<'e> {
    fn new(expansion: &'e Expansion<'_>, item: String) -> Self {
        let decl = expansion.declaration;
        Self {
            item,
            decl,
            directive: expansion.directive,
            members: decl
                .members
                .iter()
                .chain(&expansion.result.new_members)
                .collect(),
            new_capabilities: &expansion.result.new_capabilities,
        }
    }

    fn cases(&self) -> impl Iterator<Item = &'e Member> + '_ {
        self.members.iter().copied().filter(|m| m.is_case())
    }

    fn fields(&self) -> impl Iterator<Item = (&'e str, &'e TypeRef)> + '_ {
        self.members.iter().filter_map(|m| match &m.kind {
            MemberKind::Field { ty } => Some((m.name.as_str(), ty)),
            _ => None,
        })
    }

    fn is_copy(&self) -> bool {
        self.fields().all(|(_, ty)| *ty != TypeRef::String)
    }

    fn has_default(&self) -> bool {
        self.decl.defines_default()
            || self
                .members
                .iter()
                .any(|m| m.name == crate::defaults::DEFAULT_MEMBER)
    }

    /// Item name of a type the declaration refers to: its own nested
    /// types are prefixed with the item name.
    fn type_name(&self, name: &str) -> String {
        if self.decl.nested_named(name).is_some() {
            format!("{}{}", self.item, to_upper_camel(name))
        } else {
            to_upper_camel(name)
        }
    }

    fn rust_type(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Bool => "bool".to_string(),
            TypeRef::String => "String".to_string(),
            TypeRef::SelfType => "Self".to_string(),
            TypeRef::SelfList => "Vec<Self>".to_string(),
            TypeRef::Named(name) => self.type_name(name),
        }
    }
}

fn renders_method(member: &Member) -> bool {
    match (&member.kind, &member.body) {
        (MemberKind::Case { .. } | MemberKind::Field { .. }, _)
        | (_, Body::Declared)
        | (MemberKind::Initializer { .. }, Body::Expr(_)) => false,
        _ => true,
    }
}

// =============================================================================
// Emitter
// =============================================================================

struct Emitter {
    output: String,
    indent_level: usize,
}

impl Emitter {
    fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.indent_level {
            self.output.push_str("    ");
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn blank(&mut self) {
        self.output.push('\n');
    }

    fn open(&mut self, text: &str) {
        self.line(text);
        self.indent_level += 1;
    }

    fn close(&mut self, text: &str) {
        self.indent_level = self.indent_level.saturating_sub(1);
        self.line(text);
    }

    fn expansion(&mut self, expansion: &Expansion<'_>, prefix: &str) {
        if expansion.result.aborted {
            tracing::debug!(declaration = %expansion.path, "aborted, not emitted");
            return;
        }
        if expansion.directive == Directive::Namespace {
            self.module(expansion);
            return;
        }
        if let Some(nested) = expansion.nested.iter().find(|n| n.result.aborted) {
            tracing::debug!(
                declaration = %expansion.path,
                variant = %nested.path,
                "variant aborted, not emitted"
            );
            return;
        }
        let item = format!("{prefix}{}", to_upper_camel(&expansion.declaration.name));
        let view = TypeView::new(expansion, item.clone());
        self.type_definition(&view, expansion);
        self.inherent_impl(&view);
        self.trait_impls(&view);
        for nested in &expansion.nested {
            self.expansion(nested, &item);
        }
    }

    fn module(&mut self, expansion: &Expansion<'_>) {
        self.blank();
        self.line(&format!("/// Namespace `{}`.", expansion.path));
        self.open(&format!(
            "pub mod {} {{",
            to_snake(&expansion.declaration.name)
        ));
        self.line("#[allow(unused_imports)]");
        self.line("use super::rt;");
        for nested in &expansion.nested {
            self.expansion(nested, "");
        }
        self.close("}");
    }

    // -------------------------------------------------------------------------
    // Type definition
    // -------------------------------------------------------------------------

    fn type_definition(&mut self, view: &TypeView<'_>, expansion: &Expansion<'_>) {
        self.blank();
        self.line(&format!(
            "/// Remote flag `{}` ({}).",
            expansion.path, view.directive
        ));
        if !view.new_capabilities.is_empty() {
            self.line(&format!("/// Conforms to {}.", join(view.new_capabilities)));
        }

        let mut derives = vec!["Clone"];
        if view.is_copy() {
            derives.push("Copy");
        }
        derives.push("Debug");
        if view.new_capabilities.contains(&Capability::Equatable) {
            derives.extend(["PartialEq", "Eq"]);
        }
        derives.push("Hash");
        self.line(&format!("#[derive({})]", derives.join(", ")));

        match view.decl.kind {
            DeclKind::Sum => {
                self.open(&format!("pub enum {} {{", view.item));
                let cases: Vec<_> = view.cases().map(|c| to_upper_camel(&c.name)).collect();
                for case in cases {
                    self.line(&format!("{case},"));
                }
                self.close("}");
            }
            DeclKind::Product => {
                self.open(&format!("pub struct {} {{", view.item));
                let fields: Vec<_> = view
                    .fields()
                    .map(|(name, ty)| format!("pub {}: {},", to_snake(name), view.rust_type(ty)))
                    .collect();
                for field in fields {
                    self.line(&field);
                }
                self.close("}");
            }
        }
    }

    // -------------------------------------------------------------------------
    // Inherent members
    // -------------------------------------------------------------------------

    fn inherent_impl(&mut self, view: &TypeView<'_>) {
        let methods: Vec<&Member> = view
            .members
            .iter()
            .copied()
            .filter(|m| renders_method(m))
            .collect();
        if methods.is_empty() {
            return;
        }
        self.blank();
        self.open(&format!("impl {} {{", view.item));
        for (i, member) in methods.into_iter().enumerate() {
            if i > 0 {
                self.blank();
            }
            self.method(view, member);
        }
        self.close("}");
    }

    fn method(&mut self, view: &TypeView<'_>, member: &Member) {
        let name = method_name(&member.name);
        match &member.body {
            Body::BoolFromLiteral => {
                self.open("pub const fn from_bool(value: bool) -> Self {");
                self.line("if value { Self::Enabled } else { Self::Disabled }");
            }
            Body::BoolAccessor => {
                self.open(&format!("pub const fn {name}(self) -> bool {{"));
                self.line("matches!(self, Self::Enabled)");
            }
            Body::RawName => {
                self.open(&format!("pub const fn {name}(&self) -> &'static str {{"));
                self.open("match *self {");
                let arms: Vec<_> = view
                    .cases()
                    .map(|c| {
                        format!(
                            "Self::{} => {},",
                            to_upper_camel(&c.name),
                            string_literal(c.raw_name().unwrap_or(&c.name))
                        )
                    })
                    .collect();
                for arm in arms {
                    self.line(&arm);
                }
                self.close("}");
            }
            Body::ParseRawName => {
                self.open("pub fn from_name(name: &str) -> Option<Self> {");
                self.open("match name {");
                let arms: Vec<_> = view
                    .cases()
                    .map(|c| {
                        format!(
                            "{} => Some(Self::{}),",
                            string_literal(c.raw_name().unwrap_or(&c.name)),
                            to_upper_camel(&c.name)
                        )
                    })
                    .collect();
                for arm in arms {
                    self.line(&arm);
                }
                self.line("_ => None,");
                self.close("}");
            }
            Body::ParseBaselineBool => {
                self.open("pub fn from_name(name: &str) -> Option<Self> {");
                self.line("let (baseline, token) = rt::split_baseline(name);");
                self.line("let is_enabled = rt::parse_bool_token(token)?;");
                self.line("Some(Self { baseline, is_enabled })");
            }
            Body::ParseBaselineVariant { variant } => {
                self.open("pub fn from_name(name: &str) -> Option<Self> {");
                self.line("let (baseline, token) = rt::split_baseline(name);");
                self.line(&format!(
                    "let variant = <{} as rt::StringRemoteValue>::from_name(token)?;",
                    view.type_name(variant)
                ));
                self.line("Some(Self { baseline, variant })");
            }
            Body::AssignFields(fields) => {
                let params = match &member.kind {
                    MemberKind::Initializer { params, .. } => params
                        .iter()
                        .map(|p| format!("{}: {}", to_snake(&p.label), view.rust_type(&p.ty)))
                        .collect::<Vec<_>>()
                        .join(", "),
                    _ => String::new(),
                };
                let assigned: Vec<_> = fields.iter().map(|f| to_snake(f)).collect();
                self.open(&format!("pub const fn new({params}) -> Self {{"));
                self.line(&format!("Self {{ {} }}", assigned.join(", ")));
            }
            Body::AllSumCases(cases) => {
                let values: Vec<_> = cases
                    .iter()
                    .map(|c| format!("Self::{}", to_upper_camel(c)))
                    .collect();
                self.open(&format!("pub fn {name}() -> Vec<Self> {{"));
                self.line(&format!("vec![{}]", values.join(", ")));
            }
            Body::BaselineBoolCases => {
                self.open(&format!("pub fn {name}() -> Vec<Self> {{"));
                self.open("vec![");
                for (baseline, enabled) in [(true, true), (true, false), (false, true), (false, false)] {
                    self.line(&format!(
                        "Self {{ baseline: {baseline}, is_enabled: {enabled} }},"
                    ));
                }
                self.close("]");
            }
            Body::BaselineVariantCases { variant } => {
                self.open(&format!("pub fn {name}() -> Vec<Self> {{"));
                self.line(&format!(
                    "<{} as rt::CaseEnumerable>::all_cases()",
                    view.type_name(variant)
                ));
                self.indent_level += 1;
                self.line(".into_iter()");
                self.line(
                    ".flat_map(|variant| [Self { baseline: true, variant }, Self { baseline: false, variant }])",
                );
                self.line(".collect()");
                self.indent_level -= 1;
            }
            Body::BaselineBoolName => {
                self.open(&format!("pub fn {name}(&self) -> String {{"));
                self.line("let token = if self.is_enabled { \"true\" } else { \"false\" };");
                self.line("rt::join_baseline(token, self.baseline)");
            }
            Body::BaselineVariantName => {
                self.open(&format!("pub fn {name}(&self) -> String {{"));
                self.line("rt::join_baseline(&rt::StringRemoteValue::name(&self.variant), self.baseline)");
            }
            Body::DefaultCase(case) => {
                self.open(&format!("pub const fn {name}() -> Self {{"));
                self.line(&format!("Self::{}", to_upper_camel(case)));
            }
            Body::BaselineBoolDefault { enabled } => {
                self.open(&format!("pub const fn {name}() -> Self {{"));
                self.line(&format!("Self {{ baseline: true, is_enabled: {enabled} }}"));
            }
            Body::BaselineVariantDefault { variant } => {
                self.open(&format!("pub fn {name}() -> Self {{"));
                self.line(&format!(
                    "Self {{ baseline: true, variant: <{} as rt::RemoteValue>::default_value() }}",
                    view.type_name(variant)
                ));
            }
            Body::Expr(expr) => {
                let (is_static, ty) = match &member.kind {
                    MemberKind::Property { ty, is_static } => (*is_static, view.rust_type(ty)),
                    _ => (true, "Self".to_string()),
                };
                let receiver = if is_static { "" } else { "&self" };
                self.open(&format!("pub fn {name}({receiver}) -> {ty} {{"));
                self.line(expr);
            }
            Body::Declared => return,
        }
        self.close("}");
    }

    // -------------------------------------------------------------------------
    // Trait implementations
    // -------------------------------------------------------------------------

    fn trait_impls(&mut self, view: &TypeView<'_>) {
        for capability in view.new_capabilities {
            match capability {
                Capability::BoolValue
                | Capability::StringValue
                | Capability::BaselineBoolValue
                | Capability::BaselineStringValue => {
                    if !view.has_default() {
                        self.blank();
                        self.line(&format!(
                            "// `{}` has no default value: {} is not implemented.",
                            view.item, capability
                        ));
                        continue;
                    }
                    self.remote_value_impl(view, *capability);
                    if *capability == Capability::BoolValue {
                        self.bool_value_impl(view);
                    } else {
                        self.string_value_impl(view);
                    }
                }
                Capability::CaseEnumerable => self.case_enumerable_impl(view),
                Capability::Default | Capability::Equatable => {}
            }
        }
    }

    fn remote_value_impl(&mut self, view: &TypeView<'_>, capability: Capability) {
        self.blank();
        self.open(&format!("impl rt::RemoteValue for {} {{", view.item));
        self.line(&format!(
            "const CAPABILITY: rt::Capability = rt::Capability::{};",
            capability.as_str()
        ));
        self.blank();
        self.open("fn default_value() -> Self {");
        self.line("Self::default_value()");
        self.close("}");
        self.blank();
        self.open("fn decode(raw: rt::Raw<'_>) -> Option<Self> {");
        self.open("match raw {");
        if capability == Capability::BoolValue {
            self.line("rt::Raw::Flag(value) => Some(Self::from_bool(value)),");
            self.line("rt::Raw::Text(_) => None,");
        } else {
            self.line("rt::Raw::Text(name) => Self::from_name(name),");
            self.line("rt::Raw::Flag(_) => None,");
        }
        self.close("}");
        self.close("}");
        self.blank();
        self.open("fn describe(&self) -> String {");
        if capability == Capability::BoolValue {
            self.line("let state = if Self::is_enabled(*self) { \"enabled\" } else { \"disabled\" };");
            self.line("state.to_string()");
        } else {
            self.line("Self::name(self).to_string()");
        }
        self.close("}");
        if capability.is_baseline() {
            self.blank();
            self.open("fn is_baseline(&self) -> bool {");
            self.line("self.baseline");
            self.close("}");
        }
        self.close("}");
    }

    fn bool_value_impl(&mut self, view: &TypeView<'_>) {
        self.blank();
        self.open(&format!("impl rt::BoolRemoteValue for {} {{", view.item));
        self.open("fn from_bool(value: bool) -> Self {");
        self.line("Self::from_bool(value)");
        self.close("}");
        self.blank();
        self.open("fn is_enabled(&self) -> bool {");
        self.line("Self::is_enabled(*self)");
        self.close("}");
        self.close("}");
    }

    fn string_value_impl(&mut self, view: &TypeView<'_>) {
        self.blank();
        self.open(&format!("impl rt::StringRemoteValue for {} {{", view.item));
        self.open("fn from_name(name: &str) -> Option<Self> {");
        self.line("Self::from_name(name)");
        self.close("}");
        self.blank();
        self.open("fn name(&self) -> String {");
        self.line("Self::name(self).to_string()");
        self.close("}");
        self.close("}");
    }

    fn case_enumerable_impl(&mut self, view: &TypeView<'_>) {
        self.blank();
        self.open(&format!("impl rt::CaseEnumerable for {} {{", view.item));
        self.open("fn all_cases() -> Vec<Self> {");
        self.line("Self::all_cases()");
        self.close("}");
        self.close("}");
    }
}
