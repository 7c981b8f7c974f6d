//! flagwright CLI entry point.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use flagwright_engine::emit::naming::{to_snake, to_upper_camel};
use flagwright_engine::{Expansion, Pass, Severity, render};
use flagwright_runtime::{Error, GeneratorConfig, serialize};
use flagwright_syntax::{Directive, SourceFile};
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    inputs: Vec<PathBuf>,
    config: Option<PathBuf>,
    out: Option<PathBuf>,
    check: bool,
    deny_warnings: bool,
    sequential: bool,
    log: Option<String>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "--check" => config.check = true,
            "--deny-warnings" => config.deny_warnings = true,
            "--sequential" => config.sequential = true,
            "--config" => {
                i += 1;
                if i >= args.len() {
                    return Err("--config requires a file".into());
                }
                config.config = Some(PathBuf::from(&args[i]));
            }
            "-o" | "--out" => {
                i += 1;
                if i >= args.len() {
                    return Err("--out requires a file".into());
                }
                config.out = Some(PathBuf::from(&args[i]));
            }
            "--log" => {
                i += 1;
                if i >= args.len() {
                    return Err("--log requires a filter".into());
                }
                config.log = Some(args[i].clone());
            }
            arg if arg.starts_with('-') => {
                return Err(format!("unknown option: {arg}").into());
            }
            path => config.inputs.push(PathBuf::from(path)),
        }
        i += 1;
    }

    Ok(config)
}

fn init_logging(cli: Option<&str>, file: Option<&str>) {
    let filter = match cli.or(file) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns `Ok(false)` when diagnostics fail the run.
fn run(args: Vec<String>) -> Result<bool, Box<dyn std::error::Error>> {
    let cli = parse_args(args)?;

    if cli.show_help {
        print_help();
        return Ok(true);
    }

    if cli.show_version {
        println!("flagwright {}", env!("CARGO_PKG_VERSION"));
        return Ok(true);
    }

    let config = GeneratorConfig::load(cli.config.as_deref())?;
    init_logging(cli.log.as_deref(), config.log.filter.as_deref());

    if cli.inputs.is_empty() {
        return Err("no input trees given (see --help)".into());
    }

    let mut options = config.pass_options();
    options.parallel &= !cli.sequential;
    options.deny_warnings |= cli.deny_warnings;
    let pass = Pass::new(options);

    let files = cli
        .inputs
        .iter()
        .map(serialize::load_from_file)
        .collect::<Result<Vec<SourceFile>, _>>()?;

    let mut expansions = Vec::new();
    let mut items = HashMap::new();
    let mut failed = false;
    let (mut errors, mut warnings) = (0, 0);
    for file in &files {
        let output = pass.run_file(file);
        let source = file.path.as_deref().unwrap_or("<memory>");
        claim_items(&mut items, source, &output.expansions)?;
        for diagnostic in output.diagnostics() {
            eprintln!("{source}: {diagnostic}");
        }
        errors += output.count(Severity::Error);
        warnings += output.count(Severity::Warning);
        failed |= output.has_errors();
        expansions.extend(output.expansions);
    }

    if errors + warnings > 0 {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if cli.check {
        return Ok(!failed);
    }

    let source = render(&expansions, &config.emit_options());
    match &cli.out {
        Some(path) => {
            std::fs::write(path, source)
                .map_err(|e| format!("failed to write '{}': {e}", path.display()))?;
            tracing::info!(path = %path.display(), "wrote generated code");
        }
        None => print!("{source}"),
    }

    Ok(!failed)
}

/// Records the item each top-level expansion renders to, failing when an
/// earlier input already rendered one with the same name.
fn claim_items(
    items: &mut HashMap<String, String>,
    source: &str,
    expansions: &[Expansion<'_>],
) -> Result<(), Error> {
    for expansion in expansions {
        let name = &expansion.declaration.name;
        let item = match expansion.directive {
            Directive::Namespace => format!("mod {}", to_snake(name)),
            _ => to_upper_camel(name),
        };
        if let Some(first) = items.insert(item.clone(), source.to_string()) {
            return Err(Error::invalid_declaration(
                expansion.path.to_string(),
                format!("`{item}` is already generated from {first}"),
            ));
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mflagwright\x1b[0m - Remote feature-flag code generator

\x1b[1mUSAGE:\x1b[0m
    flagwright [OPTIONS] <INPUT>...

\x1b[1mARGUMENTS:\x1b[0m
    <INPUT>...    Declaration trees (.json, .msgpack, .mp)

\x1b[1mOPTIONS:\x1b[0m
    -h, --help            Print help information
    -V, --version         Print version information
    -o, --out FILE        Write generated code to FILE (default: stdout)
    --config FILE         Read configuration from FILE (default: flagwright.toml)
    --check               Report diagnostics without generating code
    --deny-warnings       Fail when any warning is reported
    --sequential          Expand declarations on one thread
    --log FILTER          Log filter, overriding RUST_LOG and the config

\x1b[1mEXAMPLES:\x1b[0m
    flagwright flags.json                  Print generated code
    flagwright -o src/flags.rs flags.json  Write generated code
    flagwright --check --deny-warnings *.json
    flagwright --log flagwright=debug flags.json"
    );
}
