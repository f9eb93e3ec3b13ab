use std::collections::BTreeMap;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::node::{Node, NodeId};

/// Arena-backed pyramid graph.
///
/// Nodes live in a generational arena and are addressed by their `NodeId`
/// through a sorted lookup table, so iteration is row-major.
#[derive(Debug, Default)]
pub struct Pyramid {
    arena: Arena<Node>,
    lookup: BTreeMap<NodeId, Index>,
}

impl Pyramid {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, node: Node) -> Index {
        let id = node.id;
        let idx = self.arena.insert(node);
        if let Some(previous) = self.lookup.insert(id, idx) {
            self.arena.remove(previous);
        }
        idx
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.lookup.get(id).and_then(|&idx| self.arena.get(idx))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.lookup.contains_key(id)
    }

    /// The designated root `00`, absent for an empty pyramid.
    pub fn root(&self) -> Option<&Node> {
        self.get(&NodeId::ROOT)
    }

    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Number of levels, i.e. the length of every root-to-leaf path.
    pub fn height(&self) -> usize {
        self.lookup.keys().next_back().map_or(0, |id| id.row + 1)
    }

    /// Nodes in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.lookup.values().filter_map(move |&idx| self.arena.get(idx))
    }

    /// Every parent-child connection whose child exists, left before right.
    #[instrument(level = "debug", skip(self))]
    pub fn edges(&self) -> Vec<(NodeId, NodeId)> {
        let mut edges = Vec::new();
        for node in self.iter() {
            for &child in &node.children {
                if self.contains(&child) {
                    edges.push((node.id, child));
                }
            }
        }
        edges
    }

    /// Collects every root-to-leaf route, root first, left routes before right ones.
    ///
    /// Dangling child references are skipped. Empty pyramids return no routes.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_paths(&self) -> Vec<Vec<&Node>> {
        let mut paths = Vec::new();
        let Some(root) = self.root() else {
            return paths;
        };

        let mut stack = vec![vec![root]];
        while let Some(path) = stack.pop() {
            let Some(&node) = path.last() else {
                continue;
            };
            if node.is_leaf() {
                paths.push(path);
                continue;
            }
            // Push right before left so the left route pops first
            for child in node.children.iter().rev() {
                if let Some(child) = self.get(child) {
                    let mut branch = path.clone();
                    branch.push(child);
                    stack.push(branch);
                }
            }
        }
        paths
    }

    /// Renders the pyramid as a tree of `id (value)` labels.
    ///
    /// Shared children appear under both parents.
    pub fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(pyramid: &Pyramid, node: &Node) -> Tree<String> {
            let leaves: Vec<_> = node
                .children
                .iter()
                .filter_map(|child| pyramid.get(child))
                .map(|child| build_tree(pyramid, child))
                .collect();
            Tree::new(node.to_string()).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build_tree(self, root),
            None => Tree::new("Empty pyramid".to_string()),
        }
    }
}
