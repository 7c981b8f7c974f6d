//! Integration tests for declaration tree files feeding a pass

use std::path::PathBuf;

use flagwright_engine::{EmitOptions, Pass, PassOptions, Severity, render};
use flagwright_runtime::serialize::{self, Format};
use flagwright_runtime::{ErrorKind, GeneratorConfig};
use flagwright_syntax::{Body, Declaration, Directive, Member, RawCarrier, SourceFile, TypeRef};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("flagwright_it_{}_{name}", std::process::id()))
}

fn tree() -> SourceFile {
    SourceFile::new(vec![
        Declaration::product("Flags")
            .with_directive(Directive::Namespace)
            .with_nested(Declaration::sum("Onboarding"))
            .with_nested(
                Declaration::product("Paywall").with_nested(
                    Declaration::sum("Variant")
                        .with_carrier(RawCarrier::String)
                        .with_case("a")
                        .with_member(Member::case_with_raw("b", "b_long")),
                ),
            ),
    ])
}

fn generate(file: &SourceFile) -> String {
    let output = Pass::new(PassOptions::default()).run_file(file);
    assert!(!output.has_errors());
    render(&output.expansions, &EmitOptions::default())
}

#[test]
fn stored_trees_generate_the_same_code() {
    let expected = generate(&tree());
    for name in ["tree.json", "tree.msgpack"] {
        let path = temp_path(name);
        serialize::save_to_file(&tree(), &path).unwrap();
        let loaded = serialize::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.path, Some(path.display().to_string()));
        assert_eq!(generate(&loaded), expected);
    }
}

#[test]
fn malformed_stored_trees_name_their_file() {
    let path = temp_path("bad.json");
    let bad = SourceFile::new(vec![Declaration::sum("Twice").with_case("a").with_case("a")]);
    std::fs::write(&path, serialize::to_bytes(&bad, Format::Json).unwrap()).unwrap();

    let err = serialize::load_from_file(&path).unwrap_err();
    std::fs::remove_file(&path).unwrap();

    assert!(matches!(err.kind, ErrorKind::InvalidDeclaration { .. }));
    let source = err.context.and_then(|c| c.source);
    assert_eq!(source, Some(path.display().to_string()));
}

#[test]
fn missing_files_are_io_errors() {
    let err = serialize::load_from_file(temp_path("absent.json")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[test]
fn config_drives_the_pass_and_emitter() {
    let path = temp_path("flagwright.toml");
    std::fs::write(
        &path,
        "[pass]\nparallel = false\ndeny_warnings = true\n\n[emit]\nruntime_path = \"crate::rt\"\n",
    )
    .unwrap();
    let config = GeneratorConfig::load(Some(&path)).unwrap();
    std::fs::remove_file(&path).unwrap();

    let file = SourceFile::new(vec![
        Declaration::sum("Onboarding")
            .with_directive(Directive::BoolFlag {
                enabled_by_default: Some(true),
            })
            .with_member(
                Member::static_property("default", TypeRef::SelfType).with_body(Body::Declared),
            ),
    ]);
    let output = Pass::new(config.pass_options()).run_file(&file);
    assert!(output.count(Severity::Warning) > 0);
    assert!(output.has_errors());

    let source = render(&output.expansions, &config.emit_options());
    assert!(source.contains("crate::rt"));
}
