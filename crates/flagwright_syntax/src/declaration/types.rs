//! Declaration type definitions.
//!
//! Contains the structs and enums making up a declaration tree: the
//! declaration itself, its members, member bodies, and directives.

use flagwright_foundation::{Capability, CapabilitySet};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;

// =============================================================================
// Kinds and Carriers
// =============================================================================

/// Structural kind of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DeclKind {
    /// A set of named cases.
    Sum,
    /// A fixed set of fields.
    Product,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sum => write!(f, "sum"),
            Self::Product => write!(f, "product"),
        }
    }
}

/// The raw value each case of a sum carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RawCarrier {
    /// Cases carry no raw value.
    #[default]
    None,
    /// Cases carry a boolean.
    Bool,
    /// Cases carry an integer.
    Int,
    /// Cases carry a string (the case name unless given explicitly).
    String,
}

impl fmt::Display for RawCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Bool => write!(f, "Bool"),
            Self::Int => write!(f, "Int"),
            Self::String => write!(f, "String"),
        }
    }
}

// =============================================================================
// Members
// =============================================================================

/// A type mentioned by a member signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TypeRef {
    /// Boolean.
    Bool,
    /// String.
    String,
    /// The enclosing declaration.
    SelfType,
    /// A list of the enclosing declaration.
    SelfList,
    /// Another declaration, by name.
    Named(String),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "Bool"),
            Self::String => write!(f, "String"),
            Self::SelfType => write!(f, "Self"),
            Self::SelfList => write!(f, "[Self]"),
            Self::Named(name) => write!(f, "{name}"),
        }
    }
}

/// A labelled initializer parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Param {
    /// Argument label (e.g. `name` in `init(name:)`).
    pub label: String,
    /// Parameter type.
    pub ty: TypeRef,
}

impl Param {
    /// Creates a new parameter.
    pub fn new(label: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            label: label.into(),
            ty,
        }
    }
}

/// What kind of member a declaration carries.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MemberKind {
    /// A case of a sum, optionally with an explicit raw value.
    Case {
        /// Explicit raw value (`case b = "b_var"`).
        raw_value: Option<String>,
    },
    /// A stored field of a product.
    Field {
        /// Field type.
        ty: TypeRef,
    },
    /// An initializer.
    Initializer {
        /// Labelled parameters.
        params: Vec<Param>,
        /// Whether it may return no value.
        failable: bool,
    },
    /// A computed property.
    Property {
        /// Property type.
        ty: TypeRef,
        /// Whether it belongs to the type rather than a value.
        is_static: bool,
    },
}

/// Identity of a member for duplicate detection.
///
/// Two members with equal keys are the same member: synthesis never
/// declares a member whose key already exists.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKey {
    /// A case, by name.
    Case(String),
    /// A field, by name.
    Field(String),
    /// An initializer, by argument labels.
    Initializer(Vec<String>),
    /// A property, by name.
    Property(String),
}

impl fmt::Display for MemberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Case(name) => write!(f, "case {name}"),
            Self::Field(name) => write!(f, "field {name}"),
            Self::Initializer(labels) => {
                write!(f, "init(")?;
                for label in labels {
                    write!(f, "{label}:")?;
                }
                write!(f, ")")
            }
            Self::Property(name) => write!(f, "property {name}"),
        }
    }
}

/// What a member computes.
///
/// Declared members carry `Declared`, `Expr`, or `DefaultCase`; the
/// remaining variants are produced by synthesis.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Body {
    /// Declared without a body we know about (implemented elsewhere).
    #[default]
    Declared,
    /// A verbatim expression, emitted as-is.
    Expr(String),
    /// Evaluates to the named case.
    DefaultCase(String),
    /// `enabled` for `true`, `disabled` for `false`.
    BoolFromLiteral,
    /// `true` exactly for `enabled`.
    BoolAccessor,
    /// The case's raw string (or its name when implicit).
    RawName,
    /// Finds the case whose raw string equals the input.
    ParseRawName,
    /// Strips `_baseline`, then reads `true`/`false`.
    ParseBaselineBool,
    /// Strips `_baseline`, then parses the rest as the named variant type.
    ParseBaselineVariant {
        /// Name of the nested variant type.
        variant: String,
    },
    /// Assigns each listed field from the parameter of the same label.
    AssignFields(Vec<String>),
    /// Lists the named cases in order.
    AllSumCases(Vec<String>),
    /// The four baseline/enabled combinations.
    BaselineBoolCases,
    /// `{true, false}` crossed with every variant value.
    BaselineVariantCases {
        /// Name of the nested variant type.
        variant: String,
    },
    /// `true`/`false`, suffixed with `_baseline` for the baseline group.
    BaselineBoolName,
    /// The variant's name, suffixed with `_baseline` for the baseline group.
    BaselineVariantName,
    /// Baseline group with the given enabled state.
    BaselineBoolDefault {
        /// Whether the default is enabled.
        enabled: bool,
    },
    /// Baseline group with the variant type's own default.
    BaselineVariantDefault {
        /// Name of the nested variant type.
        variant: String,
    },
}

impl Body {
    /// Returns true for bodies produced by synthesis.
    #[must_use]
    pub fn is_synthesized(&self) -> bool {
        !matches!(self, Self::Declared | Self::Expr(_) | Self::DefaultCase(_))
    }
}

/// A member of a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Member {
    /// Member name (`init` for initializers).
    pub name: String,
    /// What kind of member this is.
    pub kind: MemberKind,
    /// What it computes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub body: Body,
    /// Source span.
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Member {
    /// Creates a case with an implicit raw value.
    pub fn case(name: impl Into<String>) -> Self {
        Self::new(name, MemberKind::Case { raw_value: None })
    }

    /// Creates a case with an explicit raw value.
    pub fn case_with_raw(name: impl Into<String>, raw: impl Into<String>) -> Self {
        Self::new(
            name,
            MemberKind::Case {
                raw_value: Some(raw.into()),
            },
        )
    }

    /// Creates a stored field.
    pub fn field(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, MemberKind::Field { ty })
    }

    /// Creates an initializer.
    #[must_use]
    pub fn initializer(params: Vec<Param>, failable: bool) -> Self {
        Self::new("init", MemberKind::Initializer { params, failable })
    }

    /// Creates an instance property.
    pub fn property(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(
            name,
            MemberKind::Property {
                ty,
                is_static: false,
            },
        )
    }

    /// Creates a type-level property.
    pub fn static_property(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(
            name,
            MemberKind::Property {
                ty,
                is_static: true,
            },
        )
    }

    fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
            body: Body::Declared,
            span: Span::default(),
        }
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Sets the source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns the identity used for duplicate detection.
    #[must_use]
    pub fn key(&self) -> MemberKey {
        match &self.kind {
            MemberKind::Case { .. } => MemberKey::Case(self.name.clone()),
            MemberKind::Field { .. } => MemberKey::Field(self.name.clone()),
            MemberKind::Initializer { params, .. } => {
                MemberKey::Initializer(params.iter().map(|p| p.label.clone()).collect())
            }
            MemberKind::Property { .. } => MemberKey::Property(self.name.clone()),
        }
    }

    /// Returns true for cases.
    #[must_use]
    pub fn is_case(&self) -> bool {
        matches!(self.kind, MemberKind::Case { .. })
    }

    /// Returns the raw string of a case: the explicit raw value, or the
    /// case name when implicit. `None` for non-cases.
    #[must_use]
    pub fn raw_name(&self) -> Option<&str> {
        match &self.kind {
            MemberKind::Case { raw_value } => Some(raw_value.as_deref().unwrap_or(&self.name)),
            _ => None,
        }
    }
}

// =============================================================================
// Directives
// =============================================================================

/// The annotation attached to a declaration, selecting its rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Directive {
    /// String-keyed sum.
    StringFlag,
    /// On/off sum.
    BoolFlag {
        /// Default when no `default` member is declared.
        #[cfg_attr(feature = "serde", serde(default))]
        enabled_by_default: Option<bool>,
    },
    /// Product with a nested `Variant` sum.
    BaselineStringFlag,
    /// Product without a nested sum.
    BaselineBoolFlag {
        /// Default enabled state of the baseline group.
        #[cfg_attr(feature = "serde", serde(default))]
        enabled_by_default: Option<bool>,
    },
    /// Sum whose flavor is detected from its raw carrier.
    RemoteValue,
    /// Container whose children are classified and annotated.
    Namespace,
}

impl Directive {
    /// `BoolFlag` without parameters.
    pub const BOOL_FLAG: Directive = Directive::BoolFlag {
        enabled_by_default: None,
    };

    /// `BaselineBoolFlag` without parameters.
    pub const BASELINE_BOOL_FLAG: Directive = Directive::BaselineBoolFlag {
        enabled_by_default: None,
    };

    /// Returns the annotation identifier.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::StringFlag => "StringFlag",
            Self::BoolFlag { .. } => "BoolFlag",
            Self::BaselineStringFlag => "BaselineStringFlag",
            Self::BaselineBoolFlag { .. } => "BaselineBoolFlag",
            Self::RemoteValue => "RemoteValue",
            Self::Namespace => "Namespace",
        }
    }

    /// Returns the `enabledByDefault` parameter, if this directive takes
    /// one and it was supplied.
    #[must_use]
    pub const fn enabled_by_default(&self) -> Option<bool> {
        match self {
            Self::BoolFlag { enabled_by_default }
            | Self::BaselineBoolFlag { enabled_by_default } => *enabled_by_default,
            _ => None,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name())?;
        if let Some(enabled) = self.enabled_by_default() {
            write!(f, "(enabledByDefault: {enabled})")?;
        }
        Ok(())
    }
}

// =============================================================================
// Declaration
// =============================================================================

/// One synthesizable type.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Declaration {
    /// Type name.
    pub name: String,
    /// Structural kind.
    pub kind: DeclKind,
    /// Raw value carrier (sums only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub raw_carrier: RawCarrier,
    /// Capabilities already declared on the type.
    #[cfg_attr(feature = "serde", serde(default))]
    pub existing_capabilities: CapabilitySet,
    /// Declared members, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub members: Vec<Member>,
    /// Nested declarations, in order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub nested: Vec<Declaration>,
    /// Annotation, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub directive: Option<Directive>,
    /// Source span.
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
}

impl Declaration {
    /// Creates an empty sum declaration.
    pub fn sum(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Sum)
    }

    /// Creates an empty product declaration.
    pub fn product(name: impl Into<String>) -> Self {
        Self::new(name, DeclKind::Product)
    }

    fn new(name: impl Into<String>, kind: DeclKind) -> Self {
        Self {
            name: name.into(),
            kind,
            raw_carrier: RawCarrier::None,
            existing_capabilities: CapabilitySet::new(),
            members: Vec::new(),
            nested: Vec::new(),
            directive: None,
            span: Span::default(),
        }
    }

    /// Sets the raw value carrier.
    #[must_use]
    pub fn with_carrier(mut self, carrier: RawCarrier) -> Self {
        self.raw_carrier = carrier;
        self
    }

    /// Appends a case with an implicit raw value.
    #[must_use]
    pub fn with_case(self, name: impl Into<String>) -> Self {
        self.with_member(Member::case(name))
    }

    /// Appends a member.
    #[must_use]
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Appends a nested declaration.
    #[must_use]
    pub fn with_nested(mut self, child: Declaration) -> Self {
        self.nested.push(child);
        self
    }

    /// Adds a declared capability.
    #[must_use]
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.existing_capabilities.insert(capability);
        self
    }

    /// Sets the directive.
    #[must_use]
    pub fn with_directive(mut self, directive: Directive) -> Self {
        self.directive = Some(directive);
        self
    }

    /// Sets the source span.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Returns true for sums.
    #[must_use]
    pub fn is_sum(&self) -> bool {
        self.kind == DeclKind::Sum
    }

    /// Returns true for products.
    #[must_use]
    pub fn is_product(&self) -> bool {
        self.kind == DeclKind::Product
    }

    /// Returns the declared cases, in order.
    pub fn cases(&self) -> impl Iterator<Item = &Member> {
        self.members.iter().filter(|m| m.is_case())
    }

    /// Returns the declared case names, in order.
    #[must_use]
    pub fn case_names(&self) -> Vec<&str> {
        self.cases().map(|m| m.name.as_str()).collect()
    }

    /// Returns true if a member with the given key is declared.
    #[must_use]
    pub fn has_member(&self, key: &MemberKey) -> bool {
        self.members.iter().any(|m| &m.key() == key)
    }

    /// Returns the declared `default` property, if any.
    #[must_use]
    pub fn default_member(&self) -> Option<&Member> {
        self.members.iter().find(|m| {
            m.name == "default" && matches!(m.kind, MemberKind::Property { is_static: true, .. })
        })
    }

    /// Returns true if the type already provides its own default, either
    /// as a member or as a declared capability.
    #[must_use]
    pub fn defines_default(&self) -> bool {
        self.default_member().is_some()
            || self.existing_capabilities.contains(&Capability::Default)
    }

    /// Returns the nested sums, in order.
    #[must_use]
    pub fn nested_sums(&self) -> Vec<&Declaration> {
        self.nested.iter().filter(|d| d.is_sum()).collect()
    }

    /// Returns the nested declaration with the given name.
    #[must_use]
    pub fn nested_named(&self, name: &str) -> Option<&Declaration> {
        self.nested.iter().find(|d| d.name == name)
    }
}

// =============================================================================
// Source File
// =============================================================================

/// One input tree: the top-level declarations read from a file.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceFile {
    /// Where the tree was read from, if anywhere.
    #[cfg_attr(feature = "serde", serde(default))]
    pub path: Option<String>,
    /// Top-level declarations, in order.
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    /// Creates a source file from declarations.
    #[must_use]
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self {
            path: None,
            declarations,
        }
    }

    /// Sets the originating path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}
