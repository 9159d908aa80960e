//! The Tailless Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::{fs, path::Path, process};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{
    ast::Node,
    catalog::UtilityCatalog,
    cli::args::{Command, TaillessArgs},
    engine::Compiler,
    errors::{print_error, SourceContext, TaillessError},
};

pub mod args;
pub mod build;
pub mod output;

pub use build::BuildConfig;

/// Environment variable overriding the `-v`/`-q` log filter.
pub const LOG_ENV: &str = "TAILLESS_LOG";

// ============================================================================
// MAIN ENTRY POINT
// ============================================================================

pub fn run() {
    let args = TaillessArgs::parse();
    init_logging(args.verbose, args.quiet);

    let compiler = Compiler::default();
    let ok = match args.command {
        Command::Build {
            input,
            output: destination,
            extension,
            no_copy,
        } => match BuildConfig::resolve(input, destination, &extension, !no_copy) {
            Ok(config) => run_build(&config, &compiler),
            Err(message) => {
                output::print_failure("Error", &message);
                false
            }
        },
        Command::Check { file } => {
            let checked = with_source(&file, |name, source| compiler.compile_named(name, source));
            if checked.is_some() {
                output::print_success("Checked", &file.display().to_string());
            }
            checked.is_some()
        }
        Command::Tokens { file } => {
            with_source(&file, |name, source| {
                compiler.tokenize(source).map_err(|e| attach(e, name, source))
            })
            .map(|tokens| output::print_tokens(&tokens))
            .is_some()
        }
        Command::Ast { file, json } => {
            with_source(&file, |name, source| {
                compiler.parse(source).map_err(|e| attach(e, name, source))
            })
            .map(|tree| print_ast(&tree, json))
            .unwrap_or(false)
        }
        Command::Utility { name } => print_utility(compiler.catalog, &name),
    };

    if !ok {
        process::exit(1);
    }
}

// ============================================================================
// LOGGING
// ============================================================================

fn init_logging(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if quiet {
            "error"
        } else {
            match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        })
    });

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .try_init();
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn run_build(config: &BuildConfig, compiler: &Compiler<'_>) -> bool {
    match build::build(config, compiler) {
        Ok(report) if config.input.is_file() => match report.failures.into_iter().next() {
            Some((_, error)) => {
                print_error(error);
                false
            }
            None => {
                output::print_success("Compiled", &config.output.display().to_string());
                true
            }
        },
        Ok(report) => {
            let ok = report.is_success();
            output::print_build_report(report);
            ok
        }
        Err(error) => {
            print_error(error);
            false
        }
    }
}

fn print_ast(tree: &Node, json: bool) -> bool {
    if !json {
        output::print_tree(tree);
        return true;
    }
    match serde_json::to_string_pretty(tree) {
        Ok(text) => {
            println!("{text}");
            true
        }
        Err(e) => {
            output::print_failure("Error", &format!("Failed to serialize tree: {e}"));
            false
        }
    }
}

fn print_utility(catalog: &UtilityCatalog, name: &str) -> bool {
    let name = if name.starts_with('.') {
        name.to_string()
    } else {
        format!(".{name}")
    };
    match catalog.lookup(&name) {
        Some(declarations) => {
            for declaration in declarations {
                println!("{declaration}");
            }
            true
        }
        None => {
            output::print_failure("Error", &format!("Unknown utility '{name}'"));
            false
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Reads `path` and hands its contents to `f`, printing any error.
fn with_source<T>(
    path: &Path,
    f: impl FnOnce(&str, &str) -> Result<T, TaillessError>,
) -> Option<T> {
    let result = fs::read_to_string(path)
        .map_err(|e| TaillessError::read_failed(path, &e))
        .and_then(|source| f(&path.display().to_string(), &source));

    result.map_err(print_error).ok()
}

fn attach(error: TaillessError, name: &str, source: &str) -> TaillessError {
    error.with_source(SourceContext::from_file(name, source))
}
