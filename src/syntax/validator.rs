//! # Brace Validator
//!
//! ## Purpose
//! Rejects token streams the tree builder cannot consume: unbalanced braces,
//! blocks opened by anything but a selector or at-rule, and selectors or
//! at-rules that never open a block.
//!
//! ## Invariants
//! - Never mutates input
//! - Fails on the first violation, reporting its line

use super::{Token, TokenKind};
use crate::errors::{ErrorKind, ErrorReporting, TaillessError};

pub fn validate(tokens: &[Token]) -> Result<(), TaillessError> {
    check_balance(tokens)?;
    check_adjacency(tokens)?;

    let depth: i32 = tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::OpenBrace => 1,
            TokenKind::CloseBrace => -1,
            _ => 0,
        })
        .sum();

    if depth != 0 {
        let line = tokens.last().map(|t| t.line);
        return Err(TaillessError::new(ErrorKind::MissingBraces, line));
    }

    Ok(())
}

/// Pass 1: every close brace must close something.
fn check_balance(tokens: &[Token]) -> Result<(), TaillessError> {
    match tokens
        .iter()
        .find(|t| t.is(TokenKind::CloseBrace) && t.level <= 0)
    {
        Some(token) => Err(token.report(ErrorKind::UnexpectedBrace)),
        None => Ok(()),
    }
}

/// Pass 2: token-adjacency grammar.
fn check_adjacency(tokens: &[Token]) -> Result<(), TaillessError> {
    if let Some(first) = tokens.first() {
        if first.is(TokenKind::OpenBrace) {
            return Err(first.report(ErrorKind::InvalidOpeningBrace));
        }
    }

    for pair in tokens.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);

        match current.kind {
            TokenKind::AtRule if !next.is(TokenKind::OpenBrace) => {
                return Err(next.report(ErrorKind::MissingOpeningBrace));
            }
            TokenKind::Selector
                if !next.is(TokenKind::Selector) && !next.is(TokenKind::OpenBrace) =>
            {
                return Err(next.report(ErrorKind::MissingOpeningBrace));
            }
            _ => {}
        }

        if next.is(TokenKind::OpenBrace)
            && !current.is(TokenKind::AtRule)
            && !current.is(TokenKind::Selector)
        {
            return Err(next.report(ErrorKind::InvalidOpeningBrace));
        }
    }

    match tokens.last() {
        Some(last) if last.is(TokenKind::AtRule) || last.is(TokenKind::Selector) => {
            Err(last.report(ErrorKind::MissingOpeningBrace))
        }
        _ => Ok(()),
    }
}
