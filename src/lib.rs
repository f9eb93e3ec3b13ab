//! Pyramid product-path search.
//!
//! Build a pyramid from triangular rows, search it depth-first for a
//! root-to-leaf path whose value product equals a target, and keep the
//! ordered trace of every step for replay.
//!
//! ```
//! use pyrpath::domain::{PathSearcher, PyramidBuilder};
//!
//! let rows = vec![vec![1.0], vec![2.0, 3.0], vec![1.0, 6.0, 2.0]];
//! let pyramid = PyramidBuilder::new().build(&rows).unwrap();
//! let outcome = PathSearcher::new(&pyramid).search_from_root(6.0).unwrap();
//!
//! assert!(outcome.found());
//! assert_eq!(outcome.directions(), "RR");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use application::{Problem, Solution, Solver, NO_SOLUTION};
pub use domain::{
    NodeId, PathSearcher, Pyramid, PyramidBuilder, SearchOutcome, SearchStatus, SearchTrace,
    TraceEvent,
};
