//! Sequencer type definitions
//!
//! Configuration for turning tokens into events, and the event types handed
//! to a [`Player`](crate::player::Player).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::chord::ChordType;
use crate::note::DEFAULT_REFERENCE_HZ;

/// Instrument voice an event is played with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Voice {
    #[default]
    Horn,
    Flute,
    Clarinet,
    Recorder,
}

/// Oscillator shape a synthesizer should use for a voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sawtooth,
    Triangle,
    Square,
    Sine,
}

impl Voice {
    pub const ALL: [Voice; 4] = [Voice::Horn, Voice::Flute, Voice::Clarinet, Voice::Recorder];

    pub fn waveform(self) -> Waveform {
        match self {
            Voice::Horn => Waveform::Sawtooth,
            Voice::Flute => Waveform::Triangle,
            Voice::Clarinet => Waveform::Square,
            Voice::Recorder => Waveform::Sine,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Voice::Horn => "Horn",
            Voice::Flute => "Flute",
            Voice::Clarinet => "Clarinet",
            Voice::Recorder => "Recorder",
        }
    }

    /// Parse a voice from its name (any case) or its numeric index.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::ALL.get(index).copied();
        }
        Self::ALL
            .iter()
            .copied()
            .find(|voice| voice.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Settings applied while sequencing tokens
///
/// # Fields
/// - `measure_ms`: length of one whole measure; a token's duration fraction is taken of this
/// - `base_octave`: octave given to note tokens written without one
/// - `voice`: voice for tokens without a voice field
/// - `reference_hz`: A4 reference for every note created
/// - `chord_type`: what each note token expands to
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceContext {
    pub measure_ms: u32,
    pub base_octave: i32,
    pub voice: Voice,
    pub reference_hz: u32,
    pub chord_type: ChordType,
}

impl Default for SequenceContext {
    fn default() -> Self {
        Self {
            measure_ms: 1000,
            base_octave: 2,
            voice: Voice::Horn,
            reference_hz: DEFAULT_REFERENCE_HZ,
            chord_type: ChordType::Note,
        }
    }
}

impl SequenceContext {
    pub fn with_measure_ms(mut self, measure_ms: u32) -> Self {
        self.measure_ms = measure_ms;
        self
    }

    pub fn with_base_octave(mut self, octave: i32) -> Self {
        self.base_octave = octave;
        self
    }

    pub fn with_voice(mut self, voice: Voice) -> Self {
        self.voice = voice;
        self
    }

    pub fn with_reference_hz(mut self, reference_hz: u32) -> Self {
        self.reference_hz = reference_hz;
        self
    }

    pub fn with_chord_type(mut self, chord_type: ChordType) -> Self {
        self.chord_type = chord_type;
        self
    }

    /// Duration in ms of `fraction` of a measure, truncated. `None` when it
    /// does not fit in a `u32`.
    pub fn duration_of(&self, fraction: f64) -> Option<u32> {
        let ms = (self.measure_ms as f64 * fraction).trunc();
        (0.0..=u32::MAX as f64).contains(&ms).then_some(ms as u32)
    }

    /// `name` with `base_octave` appended when it carries no octave digits
    pub fn note_text(&self, name: &str) -> String {
        if name.ends_with(|c: char| c.is_ascii_digit()) {
            name.to_string()
        } else {
            format!("{}{}", name, self.base_octave)
        }
    }
}

/// One sound (or silence) ready for playback
///
/// A rest has frequency 0 and the label `"W"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayableEvent {
    pub frequency: f64,
    pub duration_ms: u32,
    pub voice: Voice,
    pub label: String,
}

impl PlayableEvent {
    pub fn rest(duration_ms: u32, voice: Voice) -> Self {
        Self {
            frequency: 0.0,
            duration_ms,
            voice,
            label: super::REST_MARKER.to_string(),
        }
    }

    pub fn is_rest(&self) -> bool {
        self.frequency == 0.0
    }
}

/// Events that start together in one time slot
///
/// `primary` is the label of the first note written in the slot, used for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventGroup {
    pub primary: String,
    pub voice: Voice,
    pub events: Vec<PlayableEvent>,
}

impl EventGroup {
    /// Longest event in the slot
    pub fn duration_ms(&self) -> u32 {
        self.events.iter().map(|e| e.duration_ms).max().unwrap_or(0)
    }

    pub fn frequencies(&self) -> Vec<f64> {
        self.events.iter().map(|e| e.frequency).collect()
    }
}
