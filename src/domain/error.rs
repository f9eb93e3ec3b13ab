//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Domain errors represent structural violations of the pyramid model.
/// A search that finds nothing is not an error, see `SearchStatus`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("ragged pyramid: row {row} has {actual} entries, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("node {parent} references missing child {child}")]
    DanglingChild { parent: NodeId, child: NodeId },

    #[error("node not found: {0}")]
    NodeNotFound(NodeId),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
