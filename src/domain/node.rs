//! Node identity and payload.

use std::fmt;

use serde::{Serialize, Serializer};

/// Position of a cell in the pyramid, used as the node key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    pub row: usize,
    pub col: usize,
}

impl NodeId {
    pub const ROOT: NodeId = NodeId { row: 0, col: 0 };

    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Left child position (same column, next row).
    pub fn left(&self) -> Self {
        Self::new(self.row + 1, self.col)
    }

    /// Right child position (next column, next row).
    pub fn right(&self) -> Self {
        Self::new(self.row + 1, self.col + 1)
    }
}

/// Renders `"{row}{col}"` while both indices are single digits and
/// `"{row}:{col}"` otherwise, so two distinct ids never render alike.
impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.row < 10 && self.col < 10 {
            write!(f, "{}{}", self.row, self.col)
        } else {
            write!(f, "{}:{}", self.row, self.col)
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One cell of the pyramid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub value: f64,
    /// Empty for the leaf row, otherwise `[left, right]`
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn left(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn right(&self) -> Option<NodeId> {
        self.children.get(1).copied()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.value)
    }
}
