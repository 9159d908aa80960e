//! Handles all user-facing output for the CLI.
//!
//! Compiled CSS, token listings and trees go to stdout; status lines are
//! colorized with `termcolor` and go to stderr so piped output stays clean.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    ast::{Node, NodeKind},
    errors::print_error,
    syntax::Token,
};

use super::build::BuildReport;

// ============================================================================
// STATUS LINES
// ============================================================================

fn status(color: Color, label: &str, message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    let _ = write!(stderr, "{label:>9}");
    let _ = stderr.reset();
    let _ = writeln!(stderr, " {message}");
}

pub fn print_success(label: &str, message: &str) {
    status(Color::Green, label, message);
}

pub fn print_failure(label: &str, message: &str) {
    status(Color::Red, label, message);
}

/// Prints every failure with full diagnostics, then a one-line summary.
pub fn print_build_report(report: BuildReport) {
    let failed = report.failures.len();
    for (path, error) in report.failures {
        print_failure("Failed", &path.display().to_string());
        print_error(error);
    }

    let summary = format!(
        "{} compiled, {} copied, {} failed",
        report.compiled, report.copied, failed
    );
    if failed == 0 {
        print_success("Finished", &summary);
    } else {
        print_failure("Finished", &summary);
    }
}

// ============================================================================
// INSPECTION OUTPUT
// ============================================================================

pub fn print_tokens(tokens: &[Token]) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    for token in tokens {
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)));
        let _ = write!(stdout, "{:>4}  {:<12}", token.line, format!("{:?}", token.kind));
        let _ = stdout.reset();
        let _ = writeln!(stdout, " {}", token.text);
    }
}

/// Prints an indented outline of the tree.
pub fn print_tree(node: &Node) {
    let mut out = String::new();
    outline(node, 0, &mut out);
    print!("{out}");
}

fn outline(node: &Node, depth: usize, out: &mut String) {
    let label = match &node.kind {
        NodeKind::Root => "Root".to_string(),
        NodeKind::Variable { text } => format!("Variable {text}"),
        NodeKind::Selector { selectors, .. } => format!("Selector {}", selectors.join(", ")),
        NodeKind::Declaration { text } => format!("Declaration {text}"),
        NodeKind::MixinCall { text } => format!("MixinCall {text}"),
        NodeKind::AtRule { header, .. } => format!("AtRule {header}"),
        NodeKind::Import { text } => format!("Import {text}"),
    };
    out.push_str(&format!("{:indent$}{label}  (line {})\n", "", node.line, indent = depth * 2));
    for child in &node.children {
        outline(child, depth + 1, out);
    }
}
