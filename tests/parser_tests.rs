// tests/parser_tests.rs

use tailless::ast::{build_tree, builder::split_statements, Node, NodeKind};
use tailless::syntax::tokenize;

fn parse(source: &str) -> Node {
    build_tree(&tokenize(source).unwrap())
}

fn declarations(node: &Node) -> Vec<&str> {
    node.children
        .iter()
        .filter_map(|c| match &c.kind {
            NodeKind::Declaration { text } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn selectors(node: &Node) -> &[String] {
    match &node.kind {
        NodeKind::Selector { selectors, .. } => selectors,
        other => panic!("expected a selector node, got {other:?}"),
    }
}

#[test]
fn test_build_mirrors_brace_nesting() {
    let tree = parse(".a {\n  color: red;\n  .b {\n    margin: 0;\n  }\n}\n.c {\n}");
    assert_eq!(tree.kind, NodeKind::Root);
    assert_eq!(tree.children.len(), 2);

    let a = &tree.children[0];
    assert_eq!(selectors(a), [".a"]);
    assert_eq!(a.line, 1);
    assert_eq!(declarations(a), vec!["color: red;"]);
    assert_eq!(selectors(&a.children[1]), [".b"]);
    assert_eq!(declarations(&a.children[1]), vec!["margin: 0;"]);
    assert_eq!(selectors(&tree.children[1]), [".c"]);
    assert_eq!(tree.count(), 6);
}

#[test]
fn test_build_collects_multi_line_selector_list_in_source_order() {
    let tree = parse(".b,\n.a,\n.b {\n}");
    let block = &tree.children[0];
    assert_eq!(selectors(block), [".b", ".a", ".b"]);
    assert_eq!(block.line, 1);
}

#[test]
fn test_build_drops_empty_selector_entries() {
    let tree = parse(".a, , .b,\n{\n}");
    assert_eq!(selectors(&tree.children[0]), [".a", ".b"]);
}

#[test]
fn test_build_splits_statements_sharing_a_line() {
    let tree = parse(".a {\n  color: red; margin: 0;\n  .x(); .y();\n}\n.x() {\n}\n.y() {\n}");
    let a = &tree.children[0];
    assert_eq!(declarations(a), vec!["color: red;", "margin: 0;"]);
    let calls: Vec<&NodeKind> = a.children[2..].iter().map(|c| &c.kind).collect();
    assert_eq!(
        calls,
        vec![
            &NodeKind::MixinCall { text: ".x();".into() },
            &NodeKind::MixinCall { text: ".y();".into() },
        ]
    );
}

#[test]
fn test_build_joins_multi_line_declarations() {
    let tree = parse(".grid {\n  grid-template-areas:\n    \"head head\"\n    \"side main\";\n}");
    let grid = &tree.children[0];
    assert_eq!(
        declarations(grid),
        vec!["grid-template-areas: \"head head\" \"side main\";"]
    );
    assert_eq!(grid.children[0].line, 2);
}

#[test]
fn test_build_terminates_declaration_left_open_at_block_end() {
    let tree = parse(".a {\n  color: red\n}");
    assert_eq!(declarations(&tree.children[0]), vec!["color: red;"]);
}

#[test]
fn test_build_attaches_variables_imports_and_at_rules() {
    let tree = parse("@import \"base.css\";\n@gap: 4px;\n@media print {\n  .a {\n  }\n}");
    assert_eq!(tree.children[0].kind, NodeKind::Import { text: "@import \"base.css\";".into() });
    assert_eq!(tree.children[1].kind, NodeKind::Variable { text: "@gap: 4px;".into() });
    match &tree.children[2].kind {
        NodeKind::AtRule { header, parent_selectors } => {
            assert_eq!(header, "@media print");
            assert!(parent_selectors.is_empty());
        }
        other => panic!("expected an at-rule, got {other:?}"),
    }
    assert_eq!(tree.children[2].line, 3);
    assert_eq!(selectors(&tree.children[2].children[0]), [".a"]);
}

#[test]
fn test_mixin_signature_and_call_name() {
    let tree = parse(".btn() {\n  color: blue;\n}\n.a {\n  .btn();\n  .p-4;\n}");
    assert_eq!(tree.children[0].mixin_signature(), Some(".btn"));
    assert_eq!(tree.children[1].mixin_signature(), None);

    let calls = &tree.children[1].children;
    assert_eq!(calls[0].mixin_call_name(), Some(".btn"));
    assert_eq!(calls[1].mixin_call_name(), Some(".p-4"));
}

#[test]
fn test_selector_list_with_signature_is_not_a_definition() {
    let tree = parse(".a, .btn() {\n}");
    assert_eq!(tree.children[0].mixin_signature(), None);
}

#[test]
fn test_deep_copy_resets_derived_state() {
    let mut node = Node::selector(vec![".a".into()], 3)
        .with_children(vec![Node::declaration("color: red;", 4)]);
    if let NodeKind::Selector { merged, .. } = &mut node.kind {
        merged.push(".x .a".into());
    }
    node.hidden = true;

    let copy = node.deep_copy();
    assert_eq!(copy.kind, NodeKind::Selector { selectors: vec![".a".into()], merged: vec![] });
    assert!(!copy.hidden);
    assert_eq!(copy.children, node.children);
    assert_eq!(copy.line, 3);
}

#[test]
fn test_split_statements_returns_remainder() {
    let (statements, rest) = split_statements("a: 1; b: 2;; c: 3");
    assert_eq!(statements, vec!["a: 1;", "b: 2;"]);
    assert_eq!(rest, "c: 3");
}
