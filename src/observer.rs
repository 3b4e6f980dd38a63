//! Decision-point hooks for the matching engine.
//!
//! The engine reports every alternative it tries and every repetition
//! count it settles on through a [`MatchObserver`]. It never logs or
//! prints by itself; callers that want a trace pass a [`LogObserver`] or
//! collect events with a [`Recorder`].

use log::trace;

/// Receives engine decisions. Positions are offsets into the input of the
/// current match call.
pub trait MatchObserver {
    /// Alternative `index` of a union is about to be tried at `pos`.
    fn alternative(&mut self, _index: usize, _pos: usize) {}

    /// Alternative `index` matched, but the rest of the pattern failed after it.
    fn alternative_rejected(&mut self, _index: usize, _pos: usize) {}

    /// A star body can repeat at most `count` times starting at `pos`.
    fn repetitions(&mut self, _count: usize, _pos: usize) {}

    /// The rest of the pattern is being tried after `count` repetitions.
    fn repetition_chosen(&mut self, _count: usize, _pos: usize) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl MatchObserver for NoopObserver {}

/// Forwards decisions to the `log` facade at trace level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl MatchObserver for LogObserver {
    fn alternative(&mut self, index: usize, pos: usize) {
        trace!(target: "kleene_match", "trying alternative {index} at {pos}");
    }

    fn alternative_rejected(&mut self, index: usize, pos: usize) {
        trace!(target: "kleene_match", "alternative {index} at {pos} matched, continuation failed");
    }

    fn repetitions(&mut self, count: usize, pos: usize) {
        trace!(target: "kleene_match", "star at {pos} repeats up to {count} times");
    }

    fn repetition_chosen(&mut self, count: usize, pos: usize) {
        trace!(target: "kleene_match", "star at {pos}: trying rest after {count} repetitions");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Alternative { index: usize, pos: usize },
    AlternativeRejected { index: usize, pos: usize },
    Repetitions { count: usize, pos: usize },
    RepetitionChosen { count: usize, pos: usize },
}

/// Keeps every event in order.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl MatchObserver for Recorder {
    fn alternative(&mut self, index: usize, pos: usize) {
        self.events.push(Event::Alternative { index, pos });
    }

    fn alternative_rejected(&mut self, index: usize, pos: usize) {
        self.events.push(Event::AlternativeRejected { index, pos });
    }

    fn repetitions(&mut self, count: usize, pos: usize) {
        self.events.push(Event::Repetitions { count, pos });
    }

    fn repetition_chosen(&mut self, count: usize, pos: usize) {
        self.events.push(Event::RepetitionChosen { count, pos });
    }
}
