//! Flat search trace consumed by replay.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::domain::node::NodeId;

pub const GOOD: &str = "GOOD";
pub const BAD: &str = "BAD";

/// One entry of the search trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceEvent {
    /// The search entered or backtracked through this node
    Visit(NodeId),
    /// A leaf matched the target; the leaf id follows
    Good,
    /// A leaf did not match; the leaf id follows
    Bad,
}

impl TraceEvent {
    pub fn is_marker(&self) -> bool {
        matches!(self, TraceEvent::Good | TraceEvent::Bad)
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::Visit(id) => write!(f, "{}", id),
            TraceEvent::Good => f.write_str(GOOD),
            TraceEvent::Bad => f.write_str(BAD),
        }
    }
}

impl Serialize for TraceEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchTrace {
    events: Vec<TraceEvent>,
}

impl SearchTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visit(&mut self, id: NodeId) {
        self.events.push(TraceEvent::Visit(id));
    }

    /// Records a leaf outcome: the marker, then the leaf id.
    pub fn terminal(&mut self, id: NodeId, matched: bool) {
        let marker = if matched {
            TraceEvent::Good
        } else {
            TraceEvent::Bad
        };
        self.events.push(marker);
        self.events.push(TraceEvent::Visit(id));
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceEvent> {
        self.events.iter()
    }

    /// String tokens drawn from {node-id, `GOOD`, `BAD`}.
    pub fn tokens(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }

    pub fn markers(&self) -> impl Iterator<Item = &TraceEvent> {
        self.events.iter().filter(|e| e.is_marker())
    }

    pub fn last_marker(&self) -> Option<TraceEvent> {
        self.markers().last().copied()
    }

    /// Every marker is immediately followed by a node id.
    pub fn is_well_formed(&self) -> bool {
        self.events
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_marker())
            .all(|(i, _)| matches!(self.events.get(i + 1), Some(TraceEvent::Visit(_))))
    }
}

impl<'a> IntoIterator for &'a SearchTrace {
    type Item = &'a TraceEvent;
    type IntoIter = std::slice::Iter<'a, TraceEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

impl From<Vec<TraceEvent>> for SearchTrace {
    fn from(events: Vec<TraceEvent>) -> Self {
        Self { events }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_terminal_when_recording_then_marker_precedes_leaf() {
        let mut trace = SearchTrace::new();
        trace.terminal(NodeId::ROOT, true);
        assert_eq!(trace.tokens(), vec!["GOOD", "00"]);
        assert!(trace.is_well_formed());
        assert_eq!(trace.last_marker(), Some(TraceEvent::Good));
    }

    #[test]
    fn given_trailing_marker_when_checking_then_not_well_formed() {
        let trace = SearchTrace::from(vec![TraceEvent::Visit(NodeId::ROOT), TraceEvent::Bad]);
        assert!(!trace.is_well_formed());
    }

    #[test]
    fn given_trace_when_serializing_then_emits_token_array() {
        let mut trace = SearchTrace::new();
        trace.visit(NodeId::ROOT);
        trace.terminal(NodeId::new(1, 0), false);
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(json, r#"["00","BAD","10"]"#);
    }
}
