//! Line classification.
//!
//! Each normalized line becomes exactly one token. The scan carries two pieces
//! of state: whether a declaration is still running on from a previous line,
//! and the current brace level.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Line, Token, TokenKind};

static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^@[0-9A-Za-z_-]+$").expect("variable name pattern is valid"));

pub fn classify(lines: &[Line]) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(lines.len());
    let mut in_declaration = false;
    let mut level = 0;

    for line in lines {
        let text = line.text.as_str();
        let number = line.number;

        let token = if is_variable(text) {
            Token::new(TokenKind::Variable, text, number)
        } else if text.starts_with('@') {
            let kind = if text.starts_with("@import") {
                TokenKind::Import
            } else {
                TokenKind::AtRule
            };
            Token::new(kind, text, number)
        } else if is_declaration_start(text) {
            in_declaration = !text.ends_with(';');
            Token::new(TokenKind::Declaration, text, number)
        } else if text == "{" {
            level += 1;
            Token::with_level(TokenKind::OpenBrace, text, number, level)
        } else if text == "}" {
            let token = Token::with_level(TokenKind::CloseBrace, text, number, level);
            level -= 1;
            in_declaration = false;
            token
        } else if in_declaration {
            in_declaration = !text.ends_with(';');
            Token::new(TokenKind::Declaration, text, number)
        } else if text.ends_with(';') {
            Token::new(TokenKind::MixinCall, text, number)
        } else {
            Token::new(TokenKind::Selector, text, number)
        };

        tokens.push(token);
    }

    tokens
}

/// `@name: value` with exactly one colon.
pub fn is_variable(text: &str) -> bool {
    if !text.starts_with('@') {
        return false;
    }
    let mut parts = text.split(':');
    let (Some(name), Some(_), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    VARIABLE_NAME.is_match(name.trim())
}

/// A colon that ends the line or is followed by a space.
pub fn is_declaration_start(text: &str) -> bool {
    let Some(pos) = text.find(':') else {
        return false;
    };
    let rest = &text[pos + 1..];
    rest.is_empty() || rest.starts_with(' ')
}
