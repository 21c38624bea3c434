// tests/parser_tests.rs

use sasstree::ast::node::{Kind, Node, NodeKind};
use sasstree::ast::tokens::{Position, TokenKind};
use sasstree::ast::tree::{NodeId, SassTree};
use sasstree::parser::{ParseError, parse};

fn only_child(tree: &SassTree, id: NodeId) -> NodeId {
    let children = tree.children(id);
    assert_eq!(children.len(), 1, "expected exactly one child");
    children[0]
}

fn node<'a>(tree: &'a SassTree, id: NodeId) -> &'a Node {
    tree.get(id)
}

// ============================================================================
// Rulesets and Declarations
// ============================================================================

#[test]
fn test_simple_rule() {
    let tree = parse("p {\n  color: red;\n}\n").unwrap();

    let root = tree.root();
    assert_eq!(node(&tree, root).kind(), Kind::DocumentRoot);
    assert_eq!(tree.children(root).len(), 1);

    let ruleset = only_child(&tree, root);
    match &node(&tree, ruleset).kind {
        NodeKind::Ruleset { selector } => assert_eq!(selector, "p "),
        other => panic!("expected Ruleset, got {:?}", other),
    }

    let block = only_child(&tree, ruleset);
    assert_eq!(node(&tree, block).kind(), Kind::Block);

    let declaration = only_child(&tree, block);
    match &node(&tree, declaration).kind {
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            assert_eq!(property, "color");
            assert_eq!(value, " red");
            assert!(colon);
            assert!(terminated);
        }
        other => panic!("expected Declaration, got {:?}", other),
    }
}

#[test]
fn test_unterminated_declaration_before_close() {
    let tree = parse("p { color: red }").unwrap();

    let ruleset = only_child(&tree, tree.root());
    let block = only_child(&tree, ruleset);
    let declaration = only_child(&tree, block);

    match &node(&tree, declaration).kind {
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            assert_eq!(property, "color");
            assert_eq!(value, " red ");
            assert!(colon);
            assert!(!terminated);
        }
        other => panic!("expected Declaration, got {:?}", other),
    }
    assert_eq!(node(&tree, declaration).after, "");
}

#[test]
fn test_multiple_declarations_in_order() {
    let tree = parse("p { color: red; margin: 0; }").unwrap();

    let declarations = tree.find(Kind::Declaration);
    assert_eq!(declarations.len(), 2);

    let properties: Vec<String> = declarations
        .iter()
        .map(|&id| match &node(&tree, id).kind {
            NodeKind::Declaration { property, .. } => property.clone(),
            _ => unreachable!(),
        })
        .collect();
    assert_eq!(properties, vec!["color".to_string(), "margin".to_string()]);
}

#[test]
fn test_value_splits_at_first_colon_only() {
    let tree = parse("p { background: url(a:b); }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration { property, value, .. } => {
            assert_eq!(property, "background");
            assert_eq!(value, " url(a:b)");
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_declaration_without_colon() {
    let tree = parse("p { flex }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            assert_eq!(property, "flex ");
            assert_eq!(value, "");
            assert!(!colon);
            assert!(!terminated);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_declaration_with_empty_value_keeps_colon() {
    let tree = parse("p { color:; }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            assert_eq!(property, "color");
            assert_eq!(value, "");
            assert!(colon);
            assert!(terminated);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_top_level_declaration_at_eof() {
    let tree = parse("$width: 10px").unwrap();

    let declaration = only_child(&tree, tree.root());
    match &node(&tree, declaration).kind {
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            assert_eq!(property, "$width");
            assert_eq!(value, " 10px");
            assert!(colon);
            assert!(!terminated);
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_ie_hack_kept_in_value() {
    let tree = parse("p { color: red \\9; }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration { value, .. } => assert_eq!(value, " red \\9"),
        _ => unreachable!(),
    }
}

// ============================================================================
// Selectors
// ============================================================================

#[test]
fn test_selector_variety() {
    let test_cases = vec![
        (".test { }", ".test "),
        (".a.b { }", ".a.b "),
        ("#id { }", "#id "),
        ("[hidden] { }", "[hidden] "),
        (".a > .b { }", ".a > .b "),
        ("* { }", "* "),
        ("p, .cls { }", "p, .cls "),
        ("a:hover { }", "a:hover "),
        ("%placeholder { }", "%placeholder "),
        ("-webkit-thing { }", "-webkit-thing "),
    ];

    for (input, expected) in test_cases {
        let tree = parse(input).unwrap();
        let ruleset = only_child(&tree, tree.root());
        match &node(&tree, ruleset).kind {
            NodeKind::Ruleset { selector } => {
                assert_eq!(selector, expected, "Failed for input: {}", input);
            }
            other => panic!("expected Ruleset for {}, got {:?}", input, other),
        }
    }
}

#[test]
fn test_nested_rulesets() {
    let tree = parse(".outer { .inner { color: red; } }").unwrap();

    let outer = only_child(&tree, tree.root());
    let outer_block = only_child(&tree, outer);
    let inner = only_child(&tree, outer_block);

    match &node(&tree, inner).kind {
        NodeKind::Ruleset { selector } => assert_eq!(selector, ".inner "),
        other => panic!("expected nested Ruleset, got {:?}", other),
    }

    let inner_block = only_child(&tree, inner);
    assert_eq!(tree.children(inner_block).len(), 1);
}

#[test]
fn test_deep_nesting_parent_links() {
    let tree = parse("a { b { c { d: e; } } }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];

    // Walk upward: declaration -> block -> c -> block -> b -> block -> a -> root
    let mut id = declaration;
    let mut hops = 0;
    while let Some(parent) = tree.parent(id) {
        id = parent;
        hops += 1;
    }
    assert_eq!(id, tree.root());
    assert_eq!(hops, 7);
}

// ============================================================================
// At-Rules
// ============================================================================

#[test]
fn test_at_rule_with_semicolon() {
    let tree = parse("@import \"base.scss\";").unwrap();

    let at_rule = only_child(&tree, tree.root());
    match &node(&tree, at_rule).kind {
        NodeKind::AtRule { rule, value } => {
            assert_eq!(rule, "@import");
            assert_eq!(value, " \"base.scss\"");
        }
        other => panic!("expected AtRule, got {:?}", other),
    }
    assert_eq!(node(&tree, at_rule).after, ";");
    assert!(tree.children(at_rule).is_empty());
}

#[test]
fn test_at_rule_with_block() {
    let tree = parse("@media screen and (max-width: 100px) { p { color: red; } }").unwrap();

    let at_rule = only_child(&tree, tree.root());
    match &node(&tree, at_rule).kind {
        NodeKind::AtRule { rule, value } => {
            assert_eq!(rule, "@media");
            assert_eq!(value, " screen and (max-width: 100px) ");
        }
        other => panic!("expected AtRule, got {:?}", other),
    }

    let block = only_child(&tree, at_rule);
    assert_eq!(node(&tree, block).kind(), Kind::Block);

    let ruleset = only_child(&tree, block);
    assert_eq!(node(&tree, ruleset).kind(), Kind::Ruleset);
}

#[test]
fn test_nested_at_rule() {
    let tree = parse("@media @tablet { p { color: red; } }").unwrap();

    let outer = only_child(&tree, tree.root());
    match &node(&tree, outer).kind {
        NodeKind::AtRule { rule, value } => {
            assert_eq!(rule, "@media");
            assert_eq!(value, " ");
        }
        other => panic!("expected AtRule, got {:?}", other),
    }

    let inner = only_child(&tree, outer);
    match &node(&tree, inner).kind {
        NodeKind::AtRule { rule, .. } => assert_eq!(rule, "@tablet"),
        other => panic!("expected nested AtRule, got {:?}", other),
    }

    let block = only_child(&tree, inner);
    assert_eq!(node(&tree, block).kind(), Kind::Block);
}

#[test]
fn test_at_rule_unterminated_at_eof() {
    let tree = parse("@charset \"UTF-8\"").unwrap();

    let at_rule = only_child(&tree, tree.root());
    match &node(&tree, at_rule).kind {
        NodeKind::AtRule { rule, value } => {
            assert_eq!(rule, "@charset");
            assert_eq!(value, " \"UTF-8\"");
        }
        _ => unreachable!(),
    }
    assert_eq!(node(&tree, at_rule).after, "");
}

#[test]
fn test_at_rule_rejects_unexpected_token() {
    let result = parse("@media [ {");
    match result {
        Err(ParseError::UnexpectedToken {
            kind,
            line,
            column,
            expected,
        }) => {
            assert_eq!(kind, TokenKind::OpenBracket);
            assert_eq!(line, 1);
            assert_eq!(column, 7);
            assert_eq!(expected, Some("'{' or ';'"));
        }
        other => panic!("expected UnexpectedToken, got {:?}", other),
    }
}

// ============================================================================
// Interpolation
// ============================================================================

#[test]
fn test_interpolation_in_selector() {
    let tree = parse("p.#{$name} { color: red; }").unwrap();

    let ruleset = only_child(&tree, tree.root());
    match &node(&tree, ruleset).kind {
        NodeKind::Ruleset { selector } => assert_eq!(selector, "p.#{$name} "),
        other => panic!("expected Ruleset, got {:?}", other),
    }
}

#[test]
fn test_interpolation_in_value() {
    let tree = parse("p { color: #{$c}; }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration { property, value, .. } => {
            assert_eq!(property, "color");
            assert_eq!(value, " #{$c}");
        }
        _ => unreachable!(),
    }
}

#[test]
fn test_interpolation_in_at_rule_value() {
    let tree = parse("@media #{$query} { }").unwrap();

    let at_rule = only_child(&tree, tree.root());
    match &node(&tree, at_rule).kind {
        NodeKind::AtRule { value, .. } => assert_eq!(value, " #{$query} "),
        _ => unreachable!(),
    }
}

#[test]
fn test_interpolation_is_single_level() {
    // The first `}` closes the interpolation; what follows is selector text.
    let tree = parse(".x-#{$a}-y { color: red; }").unwrap();

    let ruleset = only_child(&tree, tree.root());
    match &node(&tree, ruleset).kind {
        NodeKind::Ruleset { selector } => assert_eq!(selector, ".x-#{$a}-y "),
        _ => unreachable!(),
    }
}

#[test]
fn test_hash_without_brace_is_plain_text() {
    let tree = parse("p { color: #fff; }").unwrap();

    let declaration = tree.find(Kind::Declaration)[0];
    match &node(&tree, declaration).kind {
        NodeKind::Declaration { value, .. } => assert_eq!(value, " #fff"),
        _ => unreachable!(),
    }
}

#[test]
fn test_unclosed_interpolation_errors() {
    let result = parse("p { color: #{$c ");
    assert!(matches!(result, Err(ParseError::UnexpectedEof { .. })));
}

// ============================================================================
// Comments
// ============================================================================

#[test]
fn test_line_comment_node() {
    let tree = parse("// note\np { }").unwrap();

    let children = tree.children(tree.root());
    assert_eq!(children.len(), 2);

    match &node(&tree, children[0]).kind {
        NodeKind::Comment { content, multiline } => {
            assert_eq!(content, "// note");
            assert!(!multiline);
        }
        other => panic!("expected Comment, got {:?}", other),
    }
    assert_eq!(node(&tree, children[0]).after, "\n");
}

#[test]
fn test_multiline_comment_node() {
    let tree = parse("/* a\nb */").unwrap();

    let comment = only_child(&tree, tree.root());
    match &node(&tree, comment).kind {
        NodeKind::Comment { content, multiline } => {
            assert_eq!(content, "/* a\nb */");
            assert!(multiline);
        }
        other => panic!("expected Comment, got {:?}", other),
    }
}

#[test]
fn test_comment_inside_block() {
    let tree = parse("p { /* why */ color: red; }").unwrap();

    let ruleset = only_child(&tree, tree.root());
    let block = only_child(&tree, ruleset);
    let children = tree.children(block);
    assert_eq!(children.len(), 2);
    assert_eq!(node(&tree, children[0]).kind(), Kind::Comment);
    assert_eq!(node(&tree, children[1]).kind(), Kind::Declaration);
}

// ============================================================================
// Whitespace Attachment
// ============================================================================

#[test]
fn test_trailing_whitespace_attaches_to_latest() {
    let tree = parse("p {\n  color: red;\n}\n").unwrap();

    let ruleset = only_child(&tree, tree.root());
    let block = only_child(&tree, ruleset);
    let declaration = only_child(&tree, block);

    assert_eq!(node(&tree, block).after, "\n  ");
    assert_eq!(node(&tree, declaration).after, ";\n");
    assert_eq!(node(&tree, ruleset).after, "\n");
}

#[test]
fn test_whitespace_between_siblings_not_duplicated() {
    let tree = parse("a { }  b { }").unwrap();

    let children = tree.children(tree.root());
    assert_eq!(children.len(), 2);
    assert_eq!(node(&tree, children[0]).after, "  ");
    assert_eq!(node(&tree, children[1]).after, "");
}

#[test]
fn test_contiguous_trivia_accumulates() {
    let tree = parse("p { color: red; }\n\n\n").unwrap();

    let ruleset = only_child(&tree, tree.root());
    assert_eq!(node(&tree, ruleset).after, "\n\n\n");
}

#[test]
fn test_leading_whitespace_attaches_to_root() {
    let tree = parse("  p { }").unwrap();
    assert_eq!(node(&tree, tree.root()).after, "  ");
}

// ============================================================================
// Fallback Leaves
// ============================================================================

#[test]
fn test_unclaimed_token_becomes_leaf() {
    let tree = parse("; p { }").unwrap();

    let children = tree.children(tree.root());
    assert_eq!(children.len(), 2);
    match &node(&tree, children[0]).kind {
        NodeKind::Token { lexeme } => assert_eq!(lexeme, ";"),
        other => panic!("expected Token leaf, got {:?}", other),
    }
}

#[test]
fn test_stray_open_curly_becomes_leaf() {
    // A `{` with no statement or at-rule before it opens nothing.
    let tree = parse("{ }\nx: y;").unwrap();

    let children = tree.children(tree.root());
    assert_eq!(children.len(), 3);

    match &node(&tree, children[0]).kind {
        NodeKind::Token { lexeme } => assert_eq!(lexeme, "{"),
        other => panic!("expected Token leaf, got {:?}", other),
    }
    match &node(&tree, children[1]).kind {
        NodeKind::Token { lexeme } => assert_eq!(lexeme, "}"),
        other => panic!("expected Token leaf, got {:?}", other),
    }
    assert_eq!(node(&tree, children[1]).after, "\n");
    assert_eq!(node(&tree, children[2]).kind(), Kind::Declaration);
}

#[test]
fn test_unknown_character_survives_as_leaf() {
    let tree = parse("p { } ?").unwrap();

    let children = tree.children(tree.root());
    assert_eq!(children.len(), 2);
    match &node(&tree, children[1]).kind {
        NodeKind::Token { lexeme } => assert_eq!(lexeme, "?"),
        other => panic!("expected Token leaf, got {:?}", other),
    }
}

// ============================================================================
// Sources and Structure
// ============================================================================

#[test]
fn test_node_source_positions() {
    let tree = parse("p {\n  color: red;\n}").unwrap();

    let ruleset = only_child(&tree, tree.root());
    assert_eq!(node(&tree, ruleset).source, Some(Position { line: 1, column: 0 }));

    let declaration = tree.find(Kind::Declaration)[0];
    assert_eq!(
        node(&tree, declaration).source,
        Some(Position { line: 2, column: 2 })
    );

    assert_eq!(node(&tree, tree.root()).source, None);
}

#[test]
fn test_root_has_no_parent() {
    let tree = parse("p { }").unwrap();
    assert_eq!(tree.parent(tree.root()), None);
}

#[test]
fn test_every_node_appears_once_in_parent_children() {
    let tree = parse("a { b: c; } @media x { d { e: f; } }").unwrap();

    let mut seen = vec![0usize; tree.len()];
    tree.walk(|id, _| seen[id.index()] += 1);
    assert!(seen.iter().all(|&count| count == 1));

    tree.walk(|id, node_ref| {
        if let Some(parent) = node_ref.parent {
            let hits = tree
                .children(parent)
                .iter()
                .filter(|&&child| child == id)
                .count();
            assert_eq!(hits, 1);
        }
    });
}

#[test]
fn test_parse_is_deterministic() {
    let source = "@media screen { p.cls { color: #{$c}; margin: 0 } }\n// tail\n";
    assert_eq!(parse(source).unwrap(), parse(source).unwrap());
}

#[test]
fn test_lex_error_propagates() {
    let result = parse("p { content: \"abc }");
    assert!(matches!(result, Err(ParseError::Lex(_))));
}
