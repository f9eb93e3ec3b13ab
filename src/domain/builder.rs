//! Pyramid builder: turns triangular rows of numbers into a node graph.

use tracing::{debug, instrument};

use crate::domain::arena::Pyramid;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId};

/// Constructs pyramids from row-major input.
#[derive(Debug, Clone, Copy)]
pub struct PyramidBuilder {
    strict: bool,
}

impl Default for PyramidBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PyramidBuilder {
    /// Builder that validates row shapes before building.
    pub fn new() -> Self {
        Self { strict: true }
    }

    /// Builder that trusts row shapes, see [`PyramidBuilder::build_unchecked`].
    pub fn lenient() -> Self {
        Self { strict: false }
    }

    /// Build a pyramid, validating shapes when the builder is strict.
    pub fn build(&self, rows: &[Vec<f64>]) -> DomainResult<Pyramid> {
        if self.strict {
            validate_rows(rows)?;
        }
        Ok(Self::build_unchecked(rows))
    }

    /// Build without validation.
    ///
    /// Cell `(i, j)` gets children `(i+1, j)` and `(i+1, j+1)` whenever row `i+1`
    /// exists, so ragged rows produce references to nodes that are not in the map.
    #[instrument(level = "debug", skip(rows), fields(rows = rows.len()))]
    pub fn build_unchecked(rows: &[Vec<f64>]) -> Pyramid {
        let mut pyramid = Pyramid::new();
        for (i, row) in rows.iter().enumerate() {
            let has_next = i + 1 < rows.len();
            for (j, &value) in row.iter().enumerate() {
                let id = NodeId::new(i, j);
                let children = if has_next {
                    vec![id.left(), id.right()]
                } else {
                    Vec::new()
                };
                pyramid.insert_node(Node {
                    id,
                    value,
                    children,
                });
            }
        }
        debug!(nodes = pyramid.len(), height = pyramid.height(), "pyramid built");
        pyramid
    }
}

/// Row `i` must hold exactly `i + 1` entries.
pub fn validate_rows(rows: &[Vec<f64>]) -> DomainResult<()> {
    for (i, row) in rows.iter().enumerate() {
        if row.len() != i + 1 {
            return Err(DomainError::RaggedRow {
                row: i,
                expected: i + 1,
                actual: row.len(),
            });
        }
    }
    Ok(())
}
