//! # Sequencer Module
//!
//! Turn compact note and tablature text into timed, frequency-tagged events.
//!
//! ## Purpose
//! A sequence is written as comma-separated tokens. Each token fills one time slot:
//! 1. **Note token** - `<pitch>[<octave>][-<fraction>][-<voice>]`, e.g. `C#3-0.5-flute`
//! 2. **Tab token** - `<string>-<fret>[-<fraction>][-<voice>]`, e.g. `6-3-0.25`
//! 3. **Rest token** - `W[-<fraction>]`, silence for the given part of a measure
//!
//! Several members joined with `|` (`E2|B2|E3`) sound together as one group; the
//! first is the group's primary note for display.
//!
//! ## Defaults
//! Taken from [`SequenceContext`]:
//! - missing octave -> `base_octave` (2)
//! - missing fraction -> one whole measure (`measure_ms`, 1000)
//! - missing voice -> `voice` (Horn)
//!
//! A fraction's duration is `measure_ms * fraction`, truncated to whole milliseconds.
//! Voices may be given by name (any case) or index: horn 0, flute 1, clarinet 2, recorder 3.
//!
//! ## Sub-modules
//! - `types` - [`SequenceContext`], [`Voice`], [`PlayableEvent`], [`EventGroup`]
//! - `engine` - [`TokenSequencer`], token classification and resolution
//!
//! ## Entry Points
//! - [`TokenSequencer::parse`] - one `Result` per token, nothing skipped
//! - [`TokenSequencer::load`] - lenient: bad tokens are logged, reported and skipped
//!
//! ## Example
//! ```rust
//! use fretscale::{NoteRegistry, SequenceContext, StringInstrument, TokenSequencer, TuningScheme};
//!
//! let registry = NoteRegistry::new();
//! let guitar = StringInstrument::new(TuningScheme::Standard, 24).unwrap();
//! let sequencer = TokenSequencer::new(&registry, SequenceContext::default())
//!     .with_instrument(&guitar);
//!
//! let groups = sequencer.parse_str("A4-0.25, W-0.5, 5-3");
//! assert_eq!(groups.len(), 3);
//!
//! let a = groups[0].as_ref().unwrap();
//! assert_eq!(a.events[0].frequency, 440.0);
//! assert_eq!(a.events[0].duration_ms, 250);
//!
//! let rest = groups[1].as_ref().unwrap();
//! assert!(rest.events[0].is_rest());
//!
//! let tab = groups[2].as_ref().unwrap();
//! assert_eq!(tab.primary, "C3");
//! ```
//!
//! ## Related Modules
//! - `registry` - note tokens are created through the shared registry
//! - `fretboard` - tab tokens are looked up on the instrument
//! - `player` - plays the resulting groups

mod engine;
mod types;


pub use engine::{split_tokens, TokenSequencer};
pub use types::{EventGroup, PlayableEvent, SequenceContext, Voice, Waveform};

/// Separates tokens in sequence text
pub const TOKEN_DELIMITER: char = ',';

/// Separates members sounding in the same slot
pub const GROUP_DELIMITER: char = '|';

/// Separates fields within a token
pub const FIELD_DELIMITER: char = '-';

/// Pitch field of a rest token
pub const REST_MARKER: &str = "W";
