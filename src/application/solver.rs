//! Solve a problem end to end: build a fresh pyramid, search it from the root.

use tracing::{info, instrument};

use crate::application::{ApplicationResult, Problem};
use crate::config::Settings;
use crate::domain::{PathSearcher, Pyramid, PyramidBuilder, SearchOutcome};

/// Message shown when no root-to-leaf path matches the target.
pub const NO_SOLUTION: &str = "No Solution";

/// Pyramid and search outcome of one invocation.
#[derive(Debug)]
pub struct Solution {
    pub pyramid: Pyramid,
    pub outcome: SearchOutcome,
}

impl Solution {
    /// The turn sequence of the winning path, or [`NO_SOLUTION`].
    pub fn summary(&self) -> String {
        if self.outcome.found() {
            self.outcome.directions()
        } else {
            NO_SOLUTION.to_string()
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Solver {
    builder: PyramidBuilder,
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

impl Solver {
    pub fn new(settings: &Settings) -> Self {
        let builder = if settings.search.strict_rows {
            PyramidBuilder::new()
        } else {
            PyramidBuilder::lenient()
        };
        Self { builder }
    }

    #[instrument(level = "debug", skip(self, problem), fields(goal = problem.target, rows = problem.rows.len()))]
    pub fn solve(&self, problem: &Problem) -> ApplicationResult<Solution> {
        let pyramid = self.builder.build(&problem.rows)?;
        let outcome = PathSearcher::new(&pyramid).search_from_root(problem.target)?;
        info!(status = ?outcome.status, steps = outcome.trace.len(), "solved");
        Ok(Solution { pyramid, outcome })
    }
}
