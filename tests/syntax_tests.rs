// tests/syntax_tests.rs

use tailless::syntax::{classify, normalize, split_braces, tokenize, validate, Line, Token, TokenKind};
use tailless::ErrorKind;

fn texts(lines: &[Line]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    classify(&split_braces(normalize(source)))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn validation_error(source: &str) -> (ErrorKind, Option<usize>) {
    let err = tokenize(source).expect_err("source should be rejected");
    (err.kind, err.line)
}

// ---
// Normalizer
// ---

#[test]
fn test_normalize_drops_blank_lines_and_keeps_numbers() {
    let lines = normalize("\n.a\n\n   \n{\n");
    assert_eq!(lines, vec![Line::new(".a", 2), Line::new("{", 5)]);
}

#[test]
fn test_normalize_strips_line_comments() {
    let lines = normalize("color: red; // trailing\n// whole line\n");
    assert_eq!(texts(&lines), vec!["color: red;"]);
}

#[test]
fn test_normalize_strips_single_line_block_comment() {
    let lines = normalize("color: /* note */ red;");
    assert_eq!(texts(&lines), vec!["color:", "red;"]);
    assert!(lines.iter().all(|l| l.number == 1));
}

#[test]
fn test_normalize_spans_multi_line_block_comment() {
    let lines = normalize(".a /* start\nstill comment\nend */ .b\n.c");
    assert_eq!(lines, vec![Line::new(".a", 1), Line::new(".b", 3), Line::new(".c", 4)]);
}

#[test]
fn test_normalize_block_comment_runs_from_first_open_to_last_close() {
    // Text between two same-line comments is swallowed.
    let lines = normalize("a /* one */ b /* two */ c");
    assert_eq!(texts(&lines), vec!["a", "c"]);
}

#[test]
fn test_normalize_close_before_open_keeps_both_segments() {
    let lines = normalize("a */ b /* c\nd");
    assert_eq!(texts(&lines), vec!["a */ b", "b /* c", "d"]);
    assert_eq!(lines[1].number, 1);
    assert_eq!(lines[2].number, 2);
}

#[test]
fn test_normalize_passes_at_lines_through_untouched() {
    let lines = normalize("@import url(\"http://example.com/a.css\");");
    assert_eq!(texts(&lines), vec!["@import url(\"http://example.com/a.css\");"]);
}

#[test]
fn test_normalize_strips_comments_from_indented_at_lines() {
    // Only a raw leading `@` bypasses comment stripping.
    let lines = normalize("  @media screen // wide\n");
    assert_eq!(texts(&lines), vec!["@media screen"]);
}

#[test]
fn test_normalize_accepts_crlf() {
    let lines = normalize(".a\r\n{\r\n}\r\n");
    assert_eq!(texts(&lines), vec![".a", "{", "}"]);
}

// ---
// Brace splitter
// ---

#[test]
fn test_split_braces_puts_each_brace_on_its_own_line() {
    let lines = split_braces(vec![Line::new(".a { color: red; }", 7)]);
    assert_eq!(texts(&lines), vec![".a", "{", "color: red;", "}"]);
    assert!(lines.iter().all(|l| l.number == 7));
}

#[test]
fn test_split_braces_leaves_bare_braces_alone() {
    let lines = split_braces(vec![Line::new("{", 1), Line::new("}", 2)]);
    assert_eq!(lines, vec![Line::new("{", 1), Line::new("}", 2)]);
}

#[test]
fn test_split_braces_separates_statements_from_block_header() {
    let lines = split_braces(vec![Line::new("@color: red; .a { color: @color; }", 1)]);
    assert_eq!(texts(&lines), vec!["@color: red;", ".a", "{", "color: @color;", "}"]);
}

#[test]
fn test_split_braces_handles_adjacent_blocks() {
    let lines = split_braces(vec![Line::new("}}.b{", 3)]);
    assert_eq!(texts(&lines), vec!["}", "}", ".b", "{"]);
}

// ---
// Classifier
// ---

#[test]
fn test_classify_priority_order() {
    let source = "@size: 4px;\n@import \"x.css\";\n@media print\n{\n.a\n{\ncolor: red;\n.btn();\n}\n}";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Variable,
            TokenKind::Import,
            TokenKind::AtRule,
            TokenKind::OpenBrace,
            TokenKind::Selector,
            TokenKind::OpenBrace,
            TokenKind::Declaration,
            TokenKind::MixinCall,
            TokenKind::CloseBrace,
            TokenKind::CloseBrace,
        ]
    );
}

#[test]
fn test_classify_variable_needs_exactly_one_colon() {
    assert!(tailless::syntax::classifier::is_variable("@gap: 1rem;"));
    assert!(!tailless::syntax::classifier::is_variable("@bg: url(http://x);"));
    assert!(!tailless::syntax::classifier::is_variable("@media (min-width: 10px)"));
}

#[test]
fn test_classify_pseudo_class_selector_is_not_a_declaration() {
    assert_eq!(kinds("a:hover\n{\n}"), vec![TokenKind::Selector, TokenKind::OpenBrace, TokenKind::CloseBrace]);
}

#[test]
fn test_classify_multi_line_declaration_continues_until_semicolon() {
    let source = ".a {\ngrid-template-areas:\n\"head head\"\n\"side main\";\n.b();\n}";
    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Selector,
            TokenKind::OpenBrace,
            TokenKind::Declaration,
            TokenKind::Declaration,
            TokenKind::Declaration,
            TokenKind::MixinCall,
            TokenKind::CloseBrace,
        ]
    );
}

#[test]
fn test_classify_close_brace_ends_unterminated_declaration() {
    let source = ".a {\ncolor: red\n}\n.b {\n}";
    assert_eq!(kinds(source)[4], TokenKind::Selector);
}

#[test]
fn test_classify_tags_brace_levels() {
    let tokens: Vec<Token> = classify(&split_braces(normalize(".a {\n.b {\n}\n}")));
    let levels: Vec<i32> = tokens
        .iter()
        .filter(|t| t.is(TokenKind::OpenBrace) || t.is(TokenKind::CloseBrace))
        .map(|t| t.level)
        .collect();
    assert_eq!(levels, vec![1, 2, 2, 1]);
}

// ---
// Validator
// ---

#[test]
fn test_validate_accepts_well_formed_source() {
    assert!(tokenize(".a {\n  .b { color: red; }\n}\n@media print {\n  .c { margin: 0; }\n}").is_ok());
    assert!(validate(&[]).is_ok());
}

#[test]
fn test_validate_rejects_unexpected_close_brace() {
    assert_eq!(validation_error(".a {\n}\n}"), (ErrorKind::UnexpectedBrace, Some(3)));
}

#[test]
fn test_validate_rejects_missing_closing_brace() {
    assert_eq!(validation_error(".a {\ncolor: red;\n"), (ErrorKind::MissingBraces, Some(2)));
}

#[test]
fn test_validate_rejects_selector_without_block() {
    assert_eq!(
        validation_error(".a\ncolor: red;\n.b {\n}"),
        (ErrorKind::MissingOpeningBrace, Some(2))
    );
    assert_eq!(validation_error(".a {\n}\n.b"), (ErrorKind::MissingOpeningBrace, Some(3)));
}

#[test]
fn test_validate_rejects_at_rule_without_block() {
    assert_eq!(
        validation_error("@media print\n.a {\n}"),
        (ErrorKind::MissingOpeningBrace, Some(2))
    );
}

#[test]
fn test_validate_rejects_block_opened_by_declaration() {
    assert_eq!(
        validation_error(".a {\ncolor: red;\n{\n}\n}"),
        (ErrorKind::InvalidOpeningBrace, Some(3))
    );
    assert_eq!(validation_error("{\n}"), (ErrorKind::InvalidOpeningBrace, Some(1)));
}

#[test]
fn test_validate_accepts_multi_line_selector_lists() {
    assert!(tokenize(".a,\n.b,\n.c\n{\ncolor: red;\n}").is_ok());
}
