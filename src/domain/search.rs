//! Depth-first product search over a pyramid.
//!
//! The traversal is left-branch-first and stops at the first matching leaf.
//! It runs on an explicit stack, so pyramid height is bounded by memory rather
//! than by the call stack, and emits exactly the trace a recursive walk would:
//!
//! - leaf: `GOOD id` when the running product equals the target, else `BAD id`
//! - inner node: `id`, left subtree, `id`, and (only if the left side failed)
//!   right subtree followed by `id` again

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, instrument, trace};

use crate::domain::arena::Pyramid;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Node, NodeId};
use crate::domain::trace::SearchTrace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// A leaf matched the target
    Found,
    /// Every leaf was tried, none matched
    Exhausted,
    /// The start node is not in the pyramid (e.g. empty input)
    MissingRoot,
}

/// Result of one search invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    /// Winning route in leaf-to-root order; empty unless found
    pub path: Vec<Node>,
    pub trace: SearchTrace,
}

impl SearchOutcome {
    pub fn found(&self) -> bool {
        self.status == SearchStatus::Found
    }

    /// Winning route in drawing order, root first.
    pub fn root_first_path(&self) -> Vec<&Node> {
        self.path.iter().rev().collect()
    }

    /// Turn sequence of the winning route, `L` for left and `R` for right.
    ///
    /// Empty when nothing was found or the pyramid has a single row.
    pub fn directions(&self) -> String {
        self.root_first_path()
            .iter()
            .tuple_windows()
            .map(|(parent, child)| if child.id.col == parent.id.col { 'L' } else { 'R' })
            .collect()
    }

    /// Product of the winning route values, multiplied root first like the search does.
    pub fn product(&self) -> Option<f64> {
        if self.found() {
            Some(self.path.iter().rev().map(|n| n.value).product())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Enter,
    AfterLeft,
    AfterRight,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    id: NodeId,
    product: f64,
    stage: Stage,
}

/// Searches one pyramid; each call owns fresh trace and path accumulators.
#[derive(Debug, Clone, Copy)]
pub struct PathSearcher<'a> {
    pyramid: &'a Pyramid,
}

impl<'a> PathSearcher<'a> {
    pub fn new(pyramid: &'a Pyramid) -> Self {
        Self { pyramid }
    }

    /// Search from the pyramid root.
    pub fn search_from_root(&self, target: f64) -> DomainResult<SearchOutcome> {
        self.search(NodeId::ROOT, target)
    }

    /// Search from `start`, seeding the running product with its value.
    #[instrument(level = "debug", skip(self, target), fields(goal = target))]
    pub fn search(&self, start: NodeId, target: f64) -> DomainResult<SearchOutcome> {
        let mut trace = SearchTrace::new();
        let mut path: Vec<Node> = Vec::new();

        let Some(root) = self.pyramid.get(&start) else {
            debug!(%start, "start node missing, no solution");
            return Ok(SearchOutcome {
                status: SearchStatus::MissingRoot,
                path,
                trace,
            });
        };

        let mut stack = vec![Frame {
            id: root.id,
            product: root.value,
            stage: Stage::Enter,
        }];
        // Outcome of the most recently finished subtree
        let mut matched = false;

        while let Some(frame) = stack.pop() {
            let node = self.node(frame.id)?;
            match frame.stage {
                Stage::Enter if node.is_leaf() => {
                    matched = frame.product == target;
                    trace!(id = %node.id, product = frame.product, matched, "leaf");
                    trace.terminal(node.id, matched);
                    if matched {
                        path.push(node.clone());
                    }
                }
                Stage::Enter => {
                    trace.visit(node.id);
                    let left = self.child(node, node.left(), node.id.left())?;
                    stack.push(Frame {
                        stage: Stage::AfterLeft,
                        ..frame
                    });
                    stack.push(Frame {
                        id: left.id,
                        product: frame.product * left.value,
                        stage: Stage::Enter,
                    });
                }
                Stage::AfterLeft => {
                    trace.visit(node.id);
                    if matched {
                        path.push(node.clone());
                        continue;
                    }
                    let right = self.child(node, node.right(), node.id.right())?;
                    stack.push(Frame {
                        stage: Stage::AfterRight,
                        ..frame
                    });
                    stack.push(Frame {
                        id: right.id,
                        product: frame.product * right.value,
                        stage: Stage::Enter,
                    });
                }
                Stage::AfterRight => {
                    trace.visit(node.id);
                    if matched {
                        path.push(node.clone());
                    }
                }
            }
        }

        let status = if matched {
            SearchStatus::Found
        } else {
            SearchStatus::Exhausted
        };
        debug!(?status, trace_len = trace.len(), "search finished");
        Ok(SearchOutcome {
            status,
            path,
            trace,
        })
    }

    fn node(&self, id: NodeId) -> DomainResult<&'a Node> {
        self.pyramid.get(&id).ok_or(DomainError::NodeNotFound(id))
    }

    /// Resolve one child slot; `position` names the child when the slot is empty.
    fn child(
        &self,
        parent: &Node,
        slot: Option<NodeId>,
        position: NodeId,
    ) -> DomainResult<&'a Node> {
        let child = slot.unwrap_or(position);
        match slot.and_then(|id| self.pyramid.get(&id)) {
            Some(node) => Ok(node),
            None => Err(DomainError::DanglingChild {
                parent: parent.id,
                child,
            }),
        }
    }
}
