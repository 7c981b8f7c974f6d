//! Renders the runtime test flags with the real emitter so the
//! integration tests compile its output.

use std::env;
use std::fs;
use std::path::PathBuf;

use flagwright_engine::{EmitOptions, Pass, PassOptions, render};

#[path = "tests/runtime/flags_tree.rs"]
mod flags_tree;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=tests/runtime/flags_tree.rs");

    let declarations = flags_tree::declarations();
    let output = Pass::new(PassOptions::default()).run(&declarations);
    if output.has_errors() {
        let messages: Vec<String> = output.diagnostics().map(ToString::to_string).collect();
        return Err(messages.join("\n").into());
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(
        out_dir.join("generated_flags.rs"),
        render(&output.expansions, &EmitOptions::default()),
    )?;
    Ok(())
}
