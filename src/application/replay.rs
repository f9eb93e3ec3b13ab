//! Step-by-step playback of a finished search trace.
//!
//! The search has completed before playback starts, so stopping early just
//! means dropping the iterator.

use std::time::Duration;

use crate::config::ReplaySettings;
use crate::domain::{SearchTrace, TraceEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayTiming {
    pub step_delay: Duration,
    pub marker_delay: Duration,
}

impl Default for ReplayTiming {
    fn default() -> Self {
        Self::from(&ReplaySettings::default())
    }
}

impl From<&ReplaySettings> for ReplayTiming {
    fn from(settings: &ReplaySettings) -> Self {
        Self {
            step_delay: settings.step_delay(),
            marker_delay: settings.marker_delay(),
        }
    }
}

impl ReplayTiming {
    pub fn immediate() -> Self {
        Self {
            step_delay: Duration::ZERO,
            marker_delay: Duration::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStep {
    pub index: usize,
    pub event: TraceEvent,
    /// Pause before this step is shown
    pub delay: Duration,
    /// Set once a GOOD marker has been replayed
    pub highlighted: bool,
}

/// Iterator over replay steps of a trace.
#[derive(Debug, Clone)]
pub struct Replay<'a> {
    events: std::iter::Enumerate<std::slice::Iter<'a, TraceEvent>>,
    timing: ReplayTiming,
    highlighted: bool,
}

impl<'a> Replay<'a> {
    pub fn new(trace: &'a SearchTrace, timing: ReplayTiming) -> Self {
        Self {
            events: trace.iter().enumerate(),
            timing,
            highlighted: false,
        }
    }

    /// Sum of all remaining delays.
    pub fn total_duration(&self) -> Duration {
        self.clone().map(|step| step.delay).sum()
    }
}

impl Iterator for Replay<'_> {
    type Item = ReplayStep;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, &event) = self.events.next()?;
        if event == TraceEvent::Good {
            self.highlighted = true;
        }
        let delay = if event.is_marker() {
            self.timing.marker_delay
        } else {
            self.timing.step_delay
        };
        Some(ReplayStep {
            index,
            event,
            delay,
            highlighted: self.highlighted,
        })
    }
}

/// Drive `sink` through every step, sleeping for each step's delay first.
pub fn play<I, F>(steps: I, mut sink: F)
where
    I: IntoIterator<Item = ReplayStep>,
    F: FnMut(&ReplayStep),
{
    for step in steps {
        if !step.delay.is_zero() {
            std::thread::sleep(step.delay);
        }
        sink(&step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeId;

    fn trace() -> SearchTrace {
        let mut trace = SearchTrace::new();
        trace.visit(NodeId::ROOT);
        trace.terminal(NodeId::new(1, 0), true);
        trace.visit(NodeId::ROOT);
        trace
    }

    #[test]
    fn given_default_timing_when_replaying_then_markers_are_instant() {
        let trace = trace();
        let delays: Vec<_> = Replay::new(&trace, ReplayTiming::default())
            .map(|s| s.delay.as_millis())
            .collect();
        assert_eq!(delays, vec![850, 0, 850, 850]);
    }

    #[test]
    fn given_good_marker_when_replaying_then_following_steps_highlighted() {
        let trace = trace();
        let flags: Vec<_> = Replay::new(&trace, ReplayTiming::immediate())
            .map(|s| s.highlighted)
            .collect();
        assert_eq!(flags, vec![false, true, true, true]);
    }
}
