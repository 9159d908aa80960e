//! Tree construction from a validated token stream.
//!
//! The builder keeps a stack of insertion contexts. Each context owns the
//! node currently receiving children; an open brace pushes a new context and
//! a close brace pops it, attaching the finished node to the context below.
//! The stack is discarded once the tree is built.

use super::Node;
use crate::syntax::{Token, TokenKind};

struct Context {
    node: Node,
    /// A declaration still waiting for its terminating `;`.
    pending: Option<(String, usize)>,
}

impl Context {
    fn new(node: Node) -> Self {
        Self {
            node,
            pending: None,
        }
    }

    fn add_child(&mut self, child: Node) {
        self.node.children.push(child);
    }

    fn add_declaration_text(&mut self, text: &str, line: usize) {
        let (joined, line) = match self.pending.take() {
            Some((pending, first_line)) => (format!("{pending} {text}"), first_line),
            None => (text.to_string(), line),
        };

        let (statements, rest) = split_statements(&joined);
        for statement in statements {
            self.add_child(Node::declaration(statement, line));
        }
        if !rest.is_empty() {
            self.pending = Some((rest.to_string(), line));
        }
    }

    fn flush_pending(&mut self) {
        if let Some((text, line)) = self.pending.take() {
            self.add_child(Node::declaration(format!("{text};"), line));
        }
    }

    fn finish(mut self) -> Node {
        self.flush_pending();
        self.node
    }
}

/// Builds the tree. Assumes `tokens` already passed validation.
pub fn build_tree(tokens: &[Token]) -> Node {
    let mut stack = vec![Context::new(Node::root())];

    for (index, token) in tokens.iter().enumerate() {
        let Some(current) = stack.last_mut() else {
            break;
        };

        match token.kind {
            TokenKind::Variable => current.add_child(Node::variable(&token.text, token.line)),
            TokenKind::Import => current.add_child(Node::import(&token.text, token.line)),
            TokenKind::Declaration => current.add_declaration_text(&token.text, token.line),
            TokenKind::MixinCall => {
                let (statements, _) = split_statements(&token.text);
                for statement in statements {
                    current.add_child(Node::mixin_call(statement, token.line));
                }
            }
            TokenKind::OpenBrace => {
                let Some(previous) = index.checked_sub(1).map(|i| &tokens[i]) else {
                    continue;
                };
                let node = match previous.kind {
                    TokenKind::Selector => {
                        let (selectors, line) = collect_selectors(&tokens[..index]);
                        Node::selector(selectors, line)
                    }
                    TokenKind::AtRule => Node::at_rule(&previous.text, previous.line),
                    _ => continue,
                };
                stack.push(Context::new(node));
            }
            TokenKind::CloseBrace => {
                if stack.len() > 1 {
                    if let Some(finished) = stack.pop() {
                        let node = finished.finish();
                        if let Some(parent) = stack.last_mut() {
                            parent.add_child(node);
                        }
                    }
                }
            }
            TokenKind::Selector | TokenKind::AtRule => {}
        }
    }

    // Validation guarantees only the root context is left; close any
    // stragglers so an unvalidated stream still yields a tree.
    while stack.len() > 1 {
        if let Some(context) = stack.pop() {
            let node = context.finish();
            if let Some(parent) = stack.last_mut() {
                parent.add_child(node);
            }
        }
    }
    stack.pop().map_or_else(Node::root, Context::finish)
}

/// Walks backward over the run of selector tokens ending the slice and
/// returns the comma-split list in source order, with the first line number.
fn collect_selectors(tokens: &[Token]) -> (Vec<String>, usize) {
    let start = tokens
        .iter()
        .rposition(|t| t.kind != TokenKind::Selector)
        .map_or(0, |i| i + 1);
    let run = &tokens[start..];

    let selectors = run
        .iter()
        .flat_map(|t| t.text.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let line = run.first().map_or(0, |t| t.line);
    (selectors, line)
}

/// Splits on `;`, returning each terminated statement (with its `;`) and the
/// unterminated remainder.
pub fn split_statements(text: &str) -> (Vec<String>, &str) {
    let mut statements = Vec::new();
    let mut rest = text;

    while let Some(pos) = rest.find(';') {
        let statement = rest[..=pos].trim();
        if statement != ";" {
            statements.push(statement.to_string());
        }
        rest = &rest[pos + 1..];
    }

    (statements, rest.trim())
}
