//! Presentation helpers for parsed trees.
//!
//! The core contract is the tree itself; these functions exist so the CLI
//! and other thin consumers never reimplement traversal. JSON shaping is an
//! explicit per-kind mapping rather than a clone-and-strip of the node, and
//! each node renders as `{ "<Kind>": { ...fields } }` with the kind, source
//! position, and parent link omitted.

use crate::ast::node::NodeKind;
use crate::ast::tree::{NodeId, SassTree};
use serde_json::{Map, Value, json};

/// Shape a whole tree as a `serde_json::Value`, root first.
pub fn tree_to_value(tree: &SassTree) -> Value {
    node_to_value(tree, tree.root())
}

fn node_to_value(tree: &SassTree, id: NodeId) -> Value {
    let node = tree.get(id);
    let mut fields = Map::new();

    match &node.kind {
        NodeKind::DocumentRoot | NodeKind::Block => {}
        NodeKind::Ruleset { selector } => {
            fields.insert("selector".into(), json!(selector));
        }
        NodeKind::Declaration {
            property,
            value,
            colon,
            terminated,
        } => {
            fields.insert("property".into(), json!(property));
            fields.insert("value".into(), json!(value));
            fields.insert("colon".into(), json!(colon));
            fields.insert("terminated".into(), json!(terminated));
        }
        NodeKind::AtRule { rule, value } => {
            fields.insert("rule".into(), json!(rule));
            fields.insert("value".into(), json!(value));
        }
        NodeKind::Comment { content, multiline } => {
            fields.insert("content".into(), json!(content));
            fields.insert("multiline".into(), json!(multiline));
        }
        NodeKind::Token { lexeme } => {
            fields.insert("lexeme".into(), json!(lexeme));
        }
    }

    fields.insert("after".into(), json!(node.after));

    if !node.children.is_empty() {
        let children: Vec<Value> = tree
            .children(id)
            .iter()
            .map(|&child| node_to_value(tree, child))
            .collect();
        fields.insert("children".into(), Value::Array(children));
    }

    let mut wrapper = Map::new();
    wrapper.insert(node.kind().name().to_string(), Value::Object(fields));
    Value::Object(wrapper)
}

/// Compact JSON for a parsed tree.
pub fn to_json(tree: &SassTree) -> String {
    serde_json::to_string(&tree_to_value(tree)).expect("tree serialization cannot fail")
}

/// Pretty-printed JSON for a parsed tree.
pub fn to_json_pretty(tree: &SassTree) -> String {
    serde_json::to_string_pretty(&tree_to_value(tree)).expect("tree serialization cannot fail")
}

/// Mirror the tree back out as SCSS text.
///
/// Because the parser preserves whitespace, comments, and unclassified
/// characters, this reproduces the original input for any tree built by
/// [`crate::parse`].
pub fn to_scss(tree: &SassTree) -> String {
    let mut out = String::new();
    render(tree, tree.root(), &mut out);
    out
}

fn render(tree: &SassTree, id: NodeId, out: &mut String) {
    let node = tree.get(id);

    match &node.kind {
        // Containers emit their `after` text before their children: for a
        // root or block it holds the trivia between the opening of the
        // context and the first child.
        NodeKind::DocumentRoot => {
            out.push_str(&node.after);
            render_children(tree, id, out);
        }
        NodeKind::Block => {
            out.push('{');
            out.push_str(&node.after);
            render_children(tree, id, out);
            out.push('}');
        }
        NodeKind::Ruleset { selector } => {
            out.push_str(selector);
            render_children(tree, id, out);
            out.push_str(&node.after);
        }
        NodeKind::Declaration {
            property,
            value,
            colon,
            ..
        } => {
            out.push_str(property);
            if *colon {
                out.push(':');
                out.push_str(value);
            }
            out.push_str(&node.after);
        }
        NodeKind::AtRule { rule, value } => {
            out.push_str(rule);
            out.push_str(value);
            render_children(tree, id, out);
            out.push_str(&node.after);
        }
        NodeKind::Comment { content, .. } => {
            out.push_str(content);
            out.push_str(&node.after);
        }
        NodeKind::Token { lexeme } => {
            out.push_str(lexeme);
            out.push_str(&node.after);
        }
    }
}

fn render_children(tree: &SassTree, id: NodeId, out: &mut String) {
    for &child in tree.children(id) {
        render(tree, child, out);
    }
}
