// tests/resolve_tests.rs

use tailless::ast::{build_tree, Node, NodeKind};
use tailless::catalog::UtilityCatalog;
use tailless::resolve::{resolve_mixins, resolve_variables, substitute, MAX_SUBSTITUTIONS};
use tailless::scope::Scope;
use tailless::syntax::tokenize;
use tailless::{ErrorKind, TaillessError};

fn parse(source: &str) -> Node {
    build_tree(&tokenize(source).unwrap())
}

fn resolved(source: &str) -> Result<Node, TaillessError> {
    let mut tree = parse(source);
    resolve_mixins(&mut tree, UtilityCatalog::builtin())?;
    resolve_variables(&mut tree)?;
    Ok(tree)
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

fn has_calls(node: &Node) -> bool {
    matches!(node.kind, NodeKind::MixinCall { .. }) || node.children.iter().any(has_calls)
}

// ---
// Mixins
// ---

#[test]
fn test_mixin_body_is_spliced_in_place_of_call() {
    let tree = resolved(".btn() {\n  color: blue;\n  padding: 0;\n}\n.a {\n  margin: 0;\n  .btn();\n  border: none;\n}").unwrap();
    assert_eq!(
        declarations(&tree.children[1]),
        vec!["margin: 0;", "color: blue;", "padding: 0;", "border: none;"]
    );
    assert!(!has_calls(&tree));
}

#[test]
fn test_utility_class_is_spliced_with_call_line() {
    let tree = resolved(".a {\n  .px-2();\n  .p-4;\n}").unwrap();
    let a = &tree.children[0];
    assert_eq!(
        declarations(a),
        vec!["padding-left: 0.5rem;", "padding-right: 0.5rem;", "padding: 1rem;"]
    );
    assert_eq!(a.children[0].line, 2);
    assert_eq!(a.children[2].line, 3);
}

#[test]
fn test_utility_catalog_takes_precedence_over_user_mixin() {
    let tree = resolved(".p-4() {\n  margin: 1px;\n}\n.a {\n  .p-4();\n}").unwrap();
    assert_eq!(declarations(&tree.children[1]), vec!["padding: 1rem;"]);
}

#[test]
fn test_mixin_calls_inside_mixin_bodies_resolve() {
    let source = ".base() {\n  color: red;\n}\n.btn() {\n  .base();\n  .m-1();\n}\n.a {\n  .btn();\n}";
    let tree = resolved(source).unwrap();
    assert_eq!(declarations(&tree.children[2]), vec!["color: red;", "margin: 0.25rem;"]);
    assert!(!has_calls(&tree));
}

#[test]
fn test_mixin_body_with_nested_rules_is_copied_per_call() {
    let source = ".card() {\n  .title {\n    margin: 0;\n  }\n}\n.a {\n  .card();\n}\n.b {\n  .card();\n}";
    let mut tree = resolved(source).unwrap();

    let NodeKind::Selector { selectors, .. } = &mut tree.children[1].children[0].kind else {
        panic!("expected the spliced .title block");
    };
    selectors[0] = ".changed".into();

    assert_eq!(
        tree.children[2].children[0].kind,
        NodeKind::Selector { selectors: vec![".title".into()], merged: vec![] }
    );
}

#[test]
fn test_inner_mixin_shadows_outer_only_within_its_block() {
    let source = "\
.m() {
  color: outer;
}
.a {
  .m() {
    color: inner;
  }
  .m();
  .b {
    .m();
  }
}
.c {
  .m();
}";
    let tree = resolved(source).unwrap();
    let a = &tree.children[1];
    assert_eq!(declarations(a), vec!["color: inner;"]);
    assert_eq!(declarations(&a.children[2]), vec!["color: inner;"]);
    assert_eq!(declarations(&tree.children[2]), vec!["color: outer;"]);
}

#[test]
fn test_nested_calls_use_the_definition_scope() {
    let source = "\
.x() {
  color: red;
}
.m() {
  .x();
}
.a {
  .x() {
    color: blue;
  }
  .m();
}";
    let tree = resolved(source).unwrap();
    assert_eq!(declarations(&tree.children[2]), vec!["color: red;"]);
}

#[test]
fn test_definition_may_call_a_later_sibling() {
    let source = ".a() {\n  .b();\n}\n.b() {\n  color: red;\n}\n.c {\n  .b() {\n    color: blue;\n  }\n  .a();\n}";
    let tree = resolved(source).unwrap();
    assert_eq!(declarations(&tree.children[2]), vec!["color: red;"]);
    assert!(!has_calls(&tree));
}

#[test]
fn test_unknown_mixin_fails_with_line() {
    let err = resolved(".a {\n  color: red;\n  .button();\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MixinNotFound { name: ".button".into() });
    assert_eq!(err.to_string(), "Line 3: Mixin '.button' not found");
}

#[test]
fn test_mixin_defined_in_sibling_block_is_not_visible() {
    let err = resolved(".a {\n  .m() {\n    color: red;\n  }\n}\n.b {\n  .m();\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::MixinNotFound { name: ".m".into() });
    assert_eq!(err.line, Some(7));
}

#[test]
fn test_mixin_calling_itself_fails() {
    let err = resolved(".loop() {\n  color: red;\n  .loop();\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParentMixin { name: ".loop".into() });
    assert_eq!(err.line, Some(3));
}

#[test]
fn test_mixin_calling_itself_from_nested_block_fails() {
    let err = resolved(".m() {\n  .inner {\n    .m();\n  }\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidParentMixin { name: ".m".into() });
}

#[test]
fn test_mutually_recursive_mixins_fail() {
    let source = ".a() {\n  .b();\n}\n.b() {\n  .a();\n}\n.x {\n  .a();\n}";
    let err = resolved(source).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidParentMixin { .. }));
}

// ---
// Variables
// ---

#[test]
fn test_variable_is_substituted_in_declarations() {
    let tree = resolved("@color: red;\n.a {\n  color: @color;\n  border: 1px solid @color;\n}").unwrap();
    assert_eq!(
        declarations(&tree.children[1]),
        vec!["color: red;", "border: 1px solid red;"]
    );
}

#[test]
fn test_variable_is_substituted_in_at_rule_header() {
    let tree = resolved("@wide: 800px;\n@media (min-width: @wide) {\n  .a {\n    color: red;\n  }\n}").unwrap();
    match &tree.children[1].kind {
        NodeKind::AtRule { header, .. } => assert_eq!(header, "@media (min-width: 800px)"),
        other => panic!("expected an at-rule, got {other:?}"),
    }
}

#[test]
fn test_inner_variable_shadows_outer_only_within_its_block() {
    let source = "@c: red;\n.a {\n  @c: blue;\n  color: @c;\n  .b {\n    color: @c;\n  }\n}\n.d {\n  color: @c;\n}";
    let tree = resolved(source).unwrap();
    let a = &tree.children[1];
    assert_eq!(declarations(a), vec!["color: blue;"]);
    assert_eq!(declarations(&a.children[2]), vec!["color: blue;"]);
    assert_eq!(declarations(&tree.children[2]), vec!["color: red;"]);
}

#[test]
fn test_mixin_definition_needs_its_variables_in_scope() {
    let source = ".tint() {\n  color: @accent;\n}\n.a {\n  @accent: green;\n  .tint();\n}";
    let err = resolved(source).unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableNotFound { name: "accent".into() });
    assert_eq!(err.line, Some(2));
}

#[test]
fn test_uncalled_mixin_definition_is_still_checked() {
    let err = resolved(".m() {\n  width: @missing;\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableNotFound { name: "missing".into() });
}

#[test]
fn test_mixin_definition_sees_variables_from_its_own_scope() {
    let source = "@accent: green;\n.tint() {\n  color: @accent;\n}\n.a {\n  .tint();\n}";
    let tree = resolved(source).unwrap();
    assert_eq!(declarations(&tree.children[1]), vec!["color: green;"]);
    assert_eq!(declarations(&tree.children[2]), vec!["color: green;"]);
}

#[test]
fn test_substituted_value_is_rescanned() {
    let tree = resolved("@base: 4px;\n@gap: @base;\n.a {\n  margin: @gap;\n}").unwrap();
    assert_eq!(declarations(&tree.children[2]), vec!["margin: 4px;"]);
}

#[test]
fn test_empty_value_is_not_defined() {
    let err = resolved("@none: ;\n.a {\n  margin: 0@none;\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableNotFound { name: "none".into() });
    assert_eq!(err.line, Some(3));
}

#[test]
fn test_empty_value_falls_back_to_outer_definition() {
    let tree = resolved("@gap: 4px;\n.a {\n  @gap: ;\n  margin: @gap;\n}").unwrap();
    assert_eq!(declarations(&tree.children[1]), vec!["margin: 4px;"]);
}

#[test]
fn test_undefined_variable_fails_with_line() {
    let err = resolved(".a {\n  width: @size;\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::VariableNotFound { name: "size".into() });
    assert_eq!(err.to_string(), "Line 2: Variable 'size' not found");
}

#[test]
fn test_self_referencing_variable_is_bounded() {
    let err = resolved("@x: @x;\n.a {\n  width: @x;\n}").unwrap_err();
    assert_eq!(err.kind, ErrorKind::RecursiveVariable { name: "x".into() });
    assert_eq!(err.line, Some(3));
}

#[test]
fn test_substitute_resolves_through_ancestors() {
    let mut outer = Scope::root();
    outer.define("a", "1px".to_string());
    let mut inner = Scope::child(&outer);
    inner.define("b", "@a @a".to_string());

    assert_eq!(substitute("margin: @b;", &inner, 1).unwrap(), "margin: 1px 1px;");
    assert_eq!(substitute("no references", &inner, 1).unwrap(), "no references");
}

#[test]
fn test_substitute_bound_counts_replacements() {
    let mut scope = Scope::root();
    scope.define("v", "x".to_string());
    let text = "@v ".repeat(MAX_SUBSTITUTIONS);
    assert!(substitute(&text, &scope, 1).is_ok());

    let text = "@v ".repeat(MAX_SUBSTITUTIONS + 1);
    assert!(substitute(&text, &scope, 1).is_err());
}
