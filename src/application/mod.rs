//! Application layer: input parsing, solving and trace replay
//!
//! This layer orchestrates domain logic and owns all I/O.

pub mod error;
pub mod error_ext;
pub mod input;
pub mod replay;
pub mod solver;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use input::Problem;
pub use replay::{play, Replay, ReplayStep, ReplayTiming};
pub use solver::{Solution, Solver, NO_SOLUTION};
