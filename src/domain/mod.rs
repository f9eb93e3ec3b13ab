//! Domain layer: pyramid model and path search
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod builder;
pub mod error;
pub mod layout;
pub mod node;
pub mod search;
pub mod trace;

pub use arena::Pyramid;
pub use builder::{validate_rows, PyramidBuilder};
pub use error::{DomainError, DomainResult};
pub use layout::{Edge, Layout, NodeBox};
pub use node::{Node, NodeId};
pub use search::{PathSearcher, SearchOutcome, SearchStatus};
pub use trace::{SearchTrace, TraceEvent, BAD, GOOD};
