//! The arena-backed AST.
//!
//! Nodes live in a flat `Vec` and address each other by [`NodeId`]. Child
//! lists are index lists and `parent` is an optional index, so the tree has
//! no cyclic ownership while still giving O(1) upward navigation.

use crate::ast::node::{Kind, Node, NodeKind};
use crate::ast::tokens::Position;

/// Index of a node within its [`SassTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A parsed SCSS document: the arena plus the implicit root at index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SassTree {
    nodes: Vec<Node>,
}

impl SassTree {
    /// Create a tree containing only the `DocumentRoot`.
    pub(crate) fn new() -> Self {
        SassTree {
            nodes: vec![Node::new(NodeKind::DocumentRoot, None)],
        }
    }

    /// The `DocumentRoot`, always at index 0.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root is always present.
        false
    }

    /// Attach a new node under `parent`, at the end of its child list.
    ///
    /// The parent link is set here, once, and never reassigned.
    pub(crate) fn attach(&mut self, parent: NodeId, kind: NodeKind, source: Position) -> NodeId {
        let id = NodeId(self.nodes.len());
        let mut node = Node::new(kind, Some(source));
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Depth-first walk in document order, visiting each node before its
    /// children.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(NodeId, &Node),
    {
        self.walk_from(self.root(), &mut visit);
    }

    fn walk_from<F>(&self, id: NodeId, visit: &mut F)
    where
        F: FnMut(NodeId, &Node),
    {
        visit(id, &self.nodes[id.0]);
        for &child in &self.nodes[id.0].children {
            self.walk_from(child, visit);
        }
    }

    /// All nodes of the given kind, in document order.
    pub fn find(&self, kind: Kind) -> Vec<NodeId> {
        let mut matches = Vec::new();
        self.walk(|id, node| {
            if node.kind() == kind {
                matches.push(id);
            }
        });
        matches
    }
}
