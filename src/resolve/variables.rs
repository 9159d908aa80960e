//! Variable resolution.
//!
//! Each block's `@name: value;` children form a scope for that block and its
//! descendants. Declaration text and at-rule headers have every `@name`
//! reference replaced in place. Mixin definition blocks are walked like any
//! other block, so a template that refers to an unknown variable fails even
//! when it is never called. A variable with an empty value is not defined.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::ast::{Node, NodeKind};
use crate::errors::{ErrorKind, TaillessError};
use crate::scope::Scope;

/// Upper bound on replacements in one piece of text. A value that refers to
/// itself would otherwise rescan forever.
pub const MAX_SUBSTITUTIONS: usize = 1000;

static REFERENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[0-9A-Za-z_-]+").expect("variable reference pattern is valid"));

type VariableScope<'p> = Scope<'p, String>;

pub fn resolve_variables(root: &mut Node) -> Result<(), TaillessError> {
    resolve_node(root, &Scope::root())
}

fn resolve_node(node: &mut Node, parent: &VariableScope<'_>) -> Result<(), TaillessError> {
    let mut scope = Scope::child(parent);
    for child in &node.children {
        if let NodeKind::Variable { text } = &child.kind {
            if let Some((name, value)) = parse_definition(text) {
                // Lookup falls through to the enclosing scopes instead.
                if !value.is_empty() {
                    scope.define(name, value);
                }
            }
        }
    }

    let line = node.line;
    match &mut node.kind {
        NodeKind::Declaration { text } => {
            *text = substitute(text, &scope, line)?;
        }
        NodeKind::AtRule { header, .. } => {
            // The at-keyword itself looks like a reference; leave it alone.
            if let Some(rest) = header.strip_prefix('@') {
                *header = format!("@{}", substitute(rest, &scope, line)?);
            }
        }
        _ => {}
    }

    for child in &mut node.children {
        resolve_node(child, &scope)?;
    }
    Ok(())
}

/// Splits `@name: value;` into its name (without `@`) and trimmed value.
fn parse_definition(text: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = text.split(':').collect();
    let [name, value] = parts.as_slice() else {
        return None;
    };
    let name = name.trim().trim_start_matches('@');
    let value = value.trim().trim_end_matches(';').trim();
    Some((name.to_string(), value.to_string()))
}

/// Replaces the first `@name` reference with its value and rescans, until no
/// reference is left.
pub fn substitute(text: &str, scope: &VariableScope<'_>, line: usize) -> Result<String, TaillessError> {
    let mut text = text.to_string();
    let mut substitutions = 0;

    while let Some(found) = REFERENCE.find(&text) {
        let range = found.range();
        let name = found.as_str()[1..].to_string();

        let Some(value) = scope.lookup(&name) else {
            return Err(TaillessError::new(ErrorKind::VariableNotFound { name }, Some(line)));
        };

        substitutions += 1;
        if substitutions > MAX_SUBSTITUTIONS {
            return Err(TaillessError::new(ErrorKind::RecursiveVariable { name }, Some(line)));
        }

        trace!(line, name = %name, value = %value, "substituted variable");
        text.replace_range(range, value);
    }

    Ok(text)
}
