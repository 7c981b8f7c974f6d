//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use flagwright_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_declaration() {
    let err = Error::invalid_declaration("Flags.Onboarding", "duplicate case `on`");
    assert!(matches!(err.kind, ErrorKind::InvalidDeclaration { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("Flags.Onboarding"));
    assert!(msg.contains("duplicate case"));
}

#[test]
fn error_config() {
    let err = Error::config("unknown field `threads`");
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    assert!(format!("{err}").contains("threads"));
}

#[test]
fn error_provider() {
    let err = Error::provider("offline");
    assert!(matches!(err.kind, ErrorKind::Provider(_)));
    assert_eq!(format!("{err}"), "provider error: offline");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::new(ErrorKind::Internal("boom".to_string()));
    assert!(err.context.is_none());
}

#[test]
fn error_with_context() {
    let context = ErrorContext::new()
        .with_source("flags.json")
        .with_position(3, 7)
        .with_frame("Flags");
    let err = Error::new(ErrorKind::Io("gone".to_string())).with_context(context);

    let context = err.context.as_ref().unwrap();
    assert_eq!(context.source.as_deref(), Some("flags.json"));
    assert_eq!(context.line, Some(3));
    assert_eq!(context.column, Some(7));
    assert_eq!(context.stack, vec!["Flags".to_string()]);
}

#[test]
fn context_display() {
    let context = ErrorContext::new().with_source("flags.json").with_position(3, 7);
    assert_eq!(context.to_string(), "at flags.json:3:7");
}
