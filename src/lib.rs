pub mod chord;
pub mod definitions;
pub mod error;
pub mod fretboard;
pub mod note;
pub mod pitch;
pub mod player;
pub mod progress;
pub mod registry;
pub mod scale;
pub mod sequencer;

pub use chord::ChordType;
pub use definitions::{Song, SongKey, TabVersion, Tablature};
pub use error::*;
pub use fretboard::{FretboardString, StringInstrument, TuningScheme, DEFAULT_FRETS};
pub use note::{Note, DEFAULT_REFERENCE_HZ};
pub use pitch::{Pitch, PitchTable, Spelling, ToneType};
pub use player::{LogPlayer, PlayableSequence, Player, RecordingPlayer};
pub use progress::{NullSink, ProgressEvent, ProgressSink};
pub use registry::NoteRegistry;
pub use scale::ScaleType;
pub use sequencer::{EventGroup, PlayableEvent, SequenceContext, TokenSequencer, Voice, Waveform};

/// Sequence comma-separated note or tab text with the default context.
/// This is the quickest way from text to events.
pub fn sequence(text: &str, registry: &NoteRegistry) -> Vec<Result<EventGroup, MusicError>> {
    TokenSequencer::new(registry, SequenceContext::default()).parse_str(text)
}

/// Build a guitar in `tuning` with the default fret count.
pub fn guitar(tuning: TuningScheme) -> Result<StringInstrument, MusicError> {
    StringInstrument::new(tuning, DEFAULT_FRETS)
}
