//! Output event sinks.
//!
//! A sink receives the [`OutputEvent`]s of each evaluation pass, in node
//! creation order, after the pass has resolved every node. Hosts use it to
//! surface output values to the user however they like.

use super::report::OutputEvent;

/// A receiver of output events.
///
/// Any `FnMut(&OutputEvent)` closure is a sink.
pub trait OutputSink {
    /// Called once per output node per evaluation pass.
    fn on_output(&mut self, event: &OutputEvent);
}

impl<F> OutputSink for F
where
    F: FnMut(&OutputEvent),
{
    fn on_output(&mut self, event: &OutputEvent) {
        self(event)
    }
}

/// A sink that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    events: Vec<OutputEvent>,
}

impl CollectingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events received so far.
    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }

    /// Take the received events, leaving the sink empty.
    pub fn drain(&mut self) -> Vec<OutputEvent> {
        std::mem::take(&mut self.events)
    }
}

impl OutputSink for CollectingSink {
    fn on_output(&mut self, event: &OutputEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn closure_sink_calls_callback() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: &OutputEvent| seen.push(event.value);
            sink.on_output(&OutputEvent { node: NodeId::from(1), value: true });
            sink.on_output(&OutputEvent { node: NodeId::from(2), value: false });
        }
        assert_eq!(seen, vec![true, false]);
    }

    #[test]
    fn collecting_sink_drains() {
        let mut sink = CollectingSink::new();
        sink.on_output(&OutputEvent { node: NodeId::from(0), value: true });

        assert_eq!(sink.events().len(), 1);
        assert_eq!(sink.drain().len(), 1);
        assert!(sink.events().is_empty());
    }
}
