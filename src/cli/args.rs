//! Defines the command-line arguments and subcommands for the Tailless CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "tailless",
    version,
    about = "Compiles nested stylesheets with variables, mixins and utility classes to plain CSS."
)]
pub struct TaillessArgs {
    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a stylesheet, or every stylesheet under a directory.
    Build {
        /// Source file or directory.
        #[arg(required = true)]
        input: PathBuf,
        /// Destination file or directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Extension of stylesheet sources when building a directory.
        #[arg(long, default_value = "tl")]
        extension: String,
        /// Do not copy non-stylesheet files into the output directory.
        #[arg(long)]
        no_copy: bool,
    },
    /// Compile a stylesheet and report errors without writing anything.
    Check {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Print the classified token stream for a stylesheet.
    Tokens {
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Show the unresolved syntax tree for a stylesheet.
    Ast {
        #[arg(required = true)]
        file: PathBuf,
        /// Print the tree as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the declarations behind a built-in utility class.
    Utility {
        /// Class name, with or without the leading dot.
        #[arg(required = true)]
        name: String,
    },
}
