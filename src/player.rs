//! # Players
//!
//! The engine never produces audio. It hands each [`EventGroup`] to something
//! implementing [`Player`], which owns synthesis and output.
//!
//! ## Key Types
//! - [`Player`] - capability trait: play a group of events with a voice
//! - [`RecordingPlayer`] - keeps every call, for tests and dry runs
//! - [`LogPlayer`] - logs each group, optionally waiting out its duration
//! - [`PlayableSequence`] - an owned, reversible list of groups with a repeat count
//!
//! ## Example
//! ```rust
//! use fretscale::{NoteRegistry, NullSink, RecordingPlayer, SequenceContext, TokenSequencer};
//!
//! let registry = NoteRegistry::new();
//! let sequencer = TokenSequencer::new(&registry, SequenceContext::default());
//! let mut sequence = sequencer.load("riff", "E2-0.5, W-0.5, G2", &mut NullSink);
//! sequence.set_repeat(2);
//!
//! let mut player = RecordingPlayer::default();
//! let failures = sequence.play(&mut player, &mut NullSink);
//! assert!(failures.is_empty());
//! assert_eq!(player.calls().len(), 6);
//! ```

use std::thread;
use std::time::Duration;

use log::info;

use crate::error::MusicError;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::sequencer::{EventGroup, PlayableEvent, Voice};

pub trait Player {
    /// Play events that start together. `voice` is the group's default voice;
    /// each event also carries its own.
    fn play(&mut self, events: &[PlayableEvent], voice: Voice) -> Result<(), MusicError>;

    fn can_pause(&self) -> bool {
        false
    }

    fn can_stop(&self) -> bool {
        false
    }

    fn pause(&mut self) {}

    fn stop(&mut self) {}
}

/// Remembers every call instead of playing it
#[derive(Debug, Default)]
pub struct RecordingPlayer {
    calls: Vec<(Vec<PlayableEvent>, Voice)>,
    paused: bool,
    stopped: bool,
}

impl RecordingPlayer {
    pub fn calls(&self) -> &[(Vec<PlayableEvent>, Voice)] {
        &self.calls
    }

    /// Every event played, in order
    pub fn events(&self) -> impl Iterator<Item = &PlayableEvent> {
        self.calls.iter().flat_map(|(events, _)| events.iter())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Player for RecordingPlayer {
    fn play(&mut self, events: &[PlayableEvent], voice: Voice) -> Result<(), MusicError> {
        self.paused = false;
        self.calls.push((events.to_vec(), voice));
        Ok(())
    }

    fn can_pause(&self) -> bool {
        true
    }

    fn can_stop(&self) -> bool {
        true
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

/// Logs each group at `info` level
#[derive(Debug, Default)]
pub struct LogPlayer {
    paced: bool,
}

impl LogPlayer {
    /// Sleep for each group's duration after logging it
    pub fn paced() -> Self {
        Self { paced: true }
    }
}

impl Player for LogPlayer {
    fn play(&mut self, events: &[PlayableEvent], _voice: Voice) -> Result<(), MusicError> {
        for event in events {
            if event.is_rest() {
                info!("  rest {}ms", event.duration_ms);
            } else {
                info!(
                    "  {} {:.2}Hz {}ms {} ({:?})",
                    event.label,
                    event.frequency,
                    event.duration_ms,
                    event.voice,
                    event.voice.waveform()
                );
            }
        }
        if self.paced {
            let longest = events.iter().map(|e| e.duration_ms).max().unwrap_or(0);
            thread::sleep(Duration::from_millis(longest as u64));
        }
        Ok(())
    }
}

/// Sequenced event groups ready to play
#[derive(Debug, Clone, PartialEq)]
pub struct PlayableSequence {
    name: String,
    groups: Vec<EventGroup>,
    repeat: u32,
}

impl PlayableSequence {
    pub fn new(name: impl Into<String>, groups: Vec<EventGroup>) -> Self {
        Self {
            name: name.into(),
            groups,
            repeat: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn groups(&self) -> &[EventGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn repeat(&self) -> u32 {
        self.repeat
    }

    pub fn set_repeat(&mut self, repeat: u32) {
        self.repeat = repeat;
    }

    pub fn reverse(&mut self) {
        self.groups.reverse();
    }

    /// Pause `player` if it supports pausing. Returns whether it did.
    pub fn pause(&self, player: &mut dyn Player) -> bool {
        if player.can_pause() {
            info!("Pausing {}", self.name);
            player.pause();
            return true;
        }
        false
    }

    /// Total duration of one pass in ms
    pub fn duration_ms(&self) -> u64 {
        self.groups.iter().map(|g| g.duration_ms() as u64).sum()
    }

    /// Play every group `repeat` times.
    ///
    /// A group the player rejects is reported to `sink` and collected in the
    /// returned list; playback continues with the next group. An empty
    /// sequence only reports an error.
    pub fn play(&self, player: &mut dyn Player, sink: &mut dyn ProgressSink) -> Vec<MusicError> {
        if self.groups.is_empty() {
            let e = MusicError::PlaybackFailed("There are no notes to play".to_string());
            sink.notify(ProgressEvent::Error { message: e.to_string() });
            return vec![e];
        }

        let mut failures = Vec::new();
        sink.notify(ProgressEvent::StartSequence {
            name: self.name.clone(),
            repeat: self.repeat,
        });

        for _ in 0..self.repeat {
            for group in &self.groups {
                sink.notify(ProgressEvent::PlayingNotes {
                    label: group.primary.clone(),
                    frequencies: group.frequencies(),
                    duration_ms: group.duration_ms(),
                });
                if let Err(e) = player.play(&group.events, group.voice) {
                    sink.notify(ProgressEvent::Error { message: e.to_string() });
                    failures.push(e);
                }
            }
        }

        if player.can_stop() {
            player.stop();
        }
        sink.notify(ProgressEvent::StopSequence { name: self.name.clone() });
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(label: &str, frequency: f64, duration_ms: u32) -> EventGroup {
        EventGroup {
            primary: label.to_string(),
            voice: Voice::Flute,
            events: vec![PlayableEvent {
                frequency,
                duration_ms,
                voice: Voice::Flute,
                label: label.to_string(),
            }],
        }
    }

    struct RejectingPlayer {
        reject: String,
    }

    impl Player for RejectingPlayer {
        fn play(&mut self, events: &[PlayableEvent], _voice: Voice) -> Result<(), MusicError> {
            if events.iter().any(|e| e.label == self.reject) {
                return Err(MusicError::PlaybackFailed(format!("cannot play {}", self.reject)));
            }
            Ok(())
        }
    }

    #[test]
    fn test_reverse_and_duration() {
        let mut sequence = PlayableSequence::new(
            "pair",
            vec![group("A4", 440.0, 250), group("A5", 880.0, 500)],
        );
        assert_eq!(sequence.duration_ms(), 750);
        sequence.reverse();
        assert_eq!(sequence.groups()[0].primary, "A5");
    }

    #[test]
    fn test_play_repeats_and_reports_progress() {
        let mut sequence = PlayableSequence::new("pair", vec![group("A4", 440.0, 250), group("A5", 880.0, 500)]);
        sequence.set_repeat(3);

        let mut player = RecordingPlayer::default();
        let mut events = Vec::new();
        let mut sink = |event: ProgressEvent| events.push(event);
        let failures = sequence.play(&mut player, &mut sink);

        assert!(failures.is_empty());
        assert_eq!(player.calls().len(), 6);
        assert!(player.is_stopped());
        assert_eq!(events.len(), 8);
        assert_eq!(events[0], ProgressEvent::StartSequence { name: "pair".to_string(), repeat: 3 });
        assert_eq!(events[7], ProgressEvent::StopSequence { name: "pair".to_string() });
    }

    #[test]
    fn test_player_failure_does_not_abort() {
        let sequence = PlayableSequence::new(
            "trio",
            vec![group("A4", 440.0, 100), group("B4", 493.88, 100), group("C5", 523.25, 100)],
        );
        let mut player = RejectingPlayer { reject: "B4".to_string() };
        let mut errors = Vec::new();
        let mut sink = |event: ProgressEvent| {
            if let ProgressEvent::Error { message } = event {
                errors.push(message);
            }
        };
        let failures = sequence.play(&mut player, &mut sink);
        assert_eq!(failures, vec![MusicError::PlaybackFailed("cannot play B4".to_string())]);
        assert_eq!(errors, vec!["Playback failed: cannot play B4".to_string()]);
    }

    #[test]
    fn test_empty_sequence_reports_no_notes() {
        let sequence = PlayableSequence::new("silence", Vec::new());
        let mut player = RecordingPlayer::default();
        let mut events = Vec::new();
        let mut sink = |event: ProgressEvent| events.push(event);
        let failures = sequence.play(&mut player, &mut sink);

        assert_eq!(
            failures,
            vec![MusicError::PlaybackFailed("There are no notes to play".to_string())]
        );
        assert_eq!(
            events,
            vec![ProgressEvent::Error { message: "Playback failed: There are no notes to play".to_string() }]
        );
        assert!(player.calls().is_empty());
        assert!(!player.is_stopped());
    }

    #[test]
    fn test_pause_only_when_supported() {
        let sequence = PlayableSequence::new("solo", vec![group("A4", 440.0, 100)]);

        let mut recorder = RecordingPlayer::default();
        assert!(sequence.pause(&mut recorder));
        assert!(recorder.is_paused());
        sequence.play(&mut recorder, &mut crate::progress::NullSink);
        assert!(!recorder.is_paused());

        let mut logger = LogPlayer::default();
        assert!(!logger.can_pause());
        assert!(!logger.can_stop());
        assert!(!sequence.pause(&mut logger));
    }
}
