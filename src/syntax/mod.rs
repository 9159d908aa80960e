//! Syntax module for the Tailless stylesheet language
//!
//! Turns raw source text into a flat stream of structural tokens:
//! comments are stripped, braces are split onto their own logical lines,
//! every line is classified, and brace structure is validated before any
//! tree is built.

use serde::Serialize;

use crate::errors::ErrorReporting;

pub mod classifier;
pub mod normalizer;
pub mod validator;

pub use classifier::classify;
pub use normalizer::{normalize, split_braces};
pub use validator::validate;

/// One logical source line, trimmed, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Line {
    pub text: String,
    pub number: usize,
}

impl Line {
    pub fn new(text: impl Into<String>, number: usize) -> Self {
        Self {
            text: text.into(),
            number,
        }
    }
}

impl ErrorReporting for Line {
    fn source_line(&self) -> usize {
        self.number
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Variable,
    AtRule,
    Import,
    Declaration,
    Selector,
    OpenBrace,
    CloseBrace,
    MixinCall,
}

/// A classified line. `level` is only meaningful for braces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub level: i32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self::with_level(kind, text, line, 0)
    }

    pub fn with_level(kind: TokenKind, text: impl Into<String>, line: usize, level: i32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            level,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl ErrorReporting for Token {
    fn source_line(&self) -> usize {
        self.line
    }
}

/// Runs the whole lexical front end: normalize, split braces, classify, validate.
pub fn tokenize(source: &str) -> Result<Vec<Token>, crate::TaillessError> {
    let lines = split_braces(normalize(source));
    let tokens = classify(&lines);
    validate(&tokens)?;
    tracing::debug!(lines = lines.len(), tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}
