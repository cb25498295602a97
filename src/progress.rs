//! Progress notifications
//!
//! Loading and playing a sequence report what they are doing as [`ProgressEvent`]s
//! pushed into a [`ProgressSink`]. A sink can be a channel sender, a closure, or
//! [`NullSink`] when nobody is listening.
//!
//! ```rust
//! use std::sync::mpsc;
//! use fretscale::{ProgressEvent, ProgressSink};
//!
//! let (mut tx, rx) = mpsc::channel::<ProgressEvent>();
//! tx.notify(ProgressEvent::Error { message: "bad token".to_string() });
//! assert_eq!(rx.recv().unwrap(), ProgressEvent::Error { message: "bad token".to_string() });
//! ```

use std::sync::mpsc::Sender;

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Tokens were sequenced; `skipped` counts tokens that failed to parse
    SequenceLoaded { name: String, groups: usize, skipped: usize },
    StartSequence { name: String, repeat: u32 },
    /// A group is about to be handed to the player
    PlayingNotes { label: String, frequencies: Vec<f64>, duration_ms: u32 },
    StopSequence { name: String },
    Error { message: String },
}

pub trait ProgressSink {
    fn notify(&mut self, event: ProgressEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ProgressSink for NullSink {
    fn notify(&mut self, _event: ProgressEvent) {}
}

impl ProgressSink for Sender<ProgressEvent> {
    fn notify(&mut self, event: ProgressEvent) {
        // A dropped receiver only means nobody is watching progress
        let _ = self.send(event);
    }
}

impl<F> ProgressSink for F
where
    F: FnMut(ProgressEvent),
{
    fn notify(&mut self, event: ProgressEvent) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink_collects() {
        let mut seen = Vec::new();
        {
            let mut sink = |event: ProgressEvent| seen.push(event);
            sink.notify(ProgressEvent::StopSequence { name: "scale".to_string() });
        }
        assert_eq!(seen, vec![ProgressEvent::StopSequence { name: "scale".to_string() }]);
    }

    #[test]
    fn test_sender_ignores_hung_up_receiver() {
        let (mut tx, rx) = std::sync::mpsc::channel::<ProgressEvent>();
        drop(rx);
        tx.notify(ProgressEvent::Error { message: "nobody listening".to_string() });
    }
}
