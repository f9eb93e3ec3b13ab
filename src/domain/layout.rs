//! Drawing geometry for pyramid nodes and connections.

use serde::Serialize;

use crate::domain::arena::Pyramid;
use crate::domain::node::{Node, NodeId};

/// Screen-space box of one node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl NodeBox {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0)
    }
}

/// Center-to-center segment `[x1, y1, x2, y2]`.
pub type Edge = [f64; 4];

/// Places rows centred over each other, one cell per node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Layout {
    pub cell_width: f64,
    pub cell_height: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            cell_width: 60.0,
            cell_height: 60.0,
        }
    }
}

impl Layout {
    pub fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// Box for `id` in a pyramid of `height` rows.
    ///
    /// Row `r` is indented by half a cell per missing node relative to the base row.
    pub fn node_box(&self, id: NodeId, height: usize) -> NodeBox {
        let indent = height.saturating_sub(id.row + 1) as f64 * self.cell_width / 2.0;
        NodeBox {
            x: indent + id.col as f64 * self.cell_width,
            y: id.row as f64 * self.cell_height,
            w: self.cell_width,
            h: self.cell_height,
        }
    }

    pub fn edge(&self, from: NodeId, to: NodeId, height: usize) -> Edge {
        let (x1, y1) = self.node_box(from, height).center();
        let (x2, y2) = self.node_box(to, height).center();
        [x1, y1, x2, y2]
    }

    /// Connections between consecutive nodes of a root-first path.
    pub fn path_edges(&self, path: &[&Node], height: usize) -> Vec<Edge> {
        path.windows(2)
            .map(|pair| self.edge(pair[0].id, pair[1].id, height))
            .collect()
    }

    /// Every connection in the pyramid.
    pub fn all_edges(&self, pyramid: &Pyramid) -> Vec<Edge> {
        let height = pyramid.height();
        pyramid
            .edges()
            .into_iter()
            .map(|(from, to)| self.edge(from, to, height))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_three_rows_when_placing_root_then_centred_over_base() {
        let layout = Layout::new(10.0, 20.0);
        let root = layout.node_box(NodeId::ROOT, 3);
        let base_mid = layout.node_box(NodeId::new(2, 1), 3);
        assert_eq!(root.center().0, base_mid.center().0);
        assert_eq!(root.y, 0.0);
        assert_eq!(base_mid.y, 40.0);
    }

    #[test]
    fn given_adjacent_nodes_when_computing_edge_then_joins_centres() {
        let layout = Layout::new(10.0, 10.0);
        let edge = layout.edge(NodeId::ROOT, NodeId::new(1, 0), 2);
        assert_eq!(edge, [10.0, 5.0, 5.0, 15.0]);
    }
}
