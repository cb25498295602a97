//! # Error Types
//!
//! This module defines all error types for the fretscale engine.
//!
//! Every error carries enough context (the offending note text, string number,
//! fret, or token) for a caller to report it without re-deriving anything.
//!
//! ## Error Types
//! - `InvalidNote` - A pitch name not found in the sharp or flat spellings
//! - `OctaveOutOfRange` - Frequency requested outside the precomputed table
//! - `FretOutOfRange` / `NoteNotOnString` - Fretboard lookups outside a string's map
//! - `StringNotFound` - An instrument has no string with that number
//! - `MalformedToken` - A sequence token whose fields do not parse
//! - `IntervalValidationFailed` - Every violation found while validating a cross-string interval
//! - `DefinitionError` - A song or tablature record that cannot be deserialized
//! - `PlaybackFailed` - A player could not play an event group
//!
//! ## Usage
//! ```rust
//! use fretscale::{MusicError, StringInstrument, TuningScheme};
//!
//! let guitar = StringInstrument::new(TuningScheme::Standard, 24).unwrap();
//! match guitar.get_note(7, 0) {
//!     Ok(note) => println!("{}", note),
//!     Err(MusicError::StringNotFound(string)) => eprintln!("no string {}", string),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MusicError {
    /// The pitch part of a note could not be found in either spelling table.
    ///
    /// # Example
    /// ```
    /// # use fretscale::MusicError;
    /// let err = MusicError::InvalidNote("H4".to_string());
    /// assert_eq!(err.to_string(), "Invalid note 'H4': pitch name not found");
    /// ```
    #[error("Invalid note '{0}': pitch name not found")]
    InvalidNote(String),

    /// A frequency was requested for an octave the note has no table entry for.
    #[error("Octave {octave} is outside the playable range {min}..={max}")]
    OctaveOutOfRange { octave: i32, min: i32, max: i32 },

    /// A fret lookup beyond the end of a string.
    ///
    /// # Example
    /// ```
    /// # use fretscale::MusicError;
    /// let err = MusicError::FretOutOfRange { string: 1, fret: 30, max: 24 };
    /// assert_eq!(err.to_string(), "Fret: 30 doesn't exist on String: 1 (0..=24)");
    /// ```
    #[error("Fret: {fret} doesn't exist on String: {string} (0..={max})")]
    FretOutOfRange { string: u8, fret: u8, max: u8 },

    /// A note that is not playable on the given string.
    #[error("String {string} does not contain the note: {note}. The string does contain: {available}")]
    NoteNotOnString {
        string: u8,
        note: String,
        available: String,
    },

    #[error("There is no string number: {0}")]
    StringNotFound(u8),

    /// A sequence token whose required fields do not parse.
    ///
    /// # Example
    /// ```
    /// # use fretscale::MusicError;
    /// let err = MusicError::MalformedToken {
    ///     token: "6-x".to_string(),
    ///     message: "fret 'x' is not a number".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Malformed token '6-x': fret 'x' is not a number");
    /// ```
    #[error("Malformed token '{token}': {message}")]
    MalformedToken { token: String, message: String },

    /// All of the problems found while validating both ends of an interval.
    #[error("Interval validation failed: {}", join_errors(.0))]
    IntervalValidationFailed(Vec<MusicError>),

    /// Song or tablature record that failed to load.
    #[error("Invalid definition: {0}")]
    DefinitionError(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

fn join_errors(errors: &[MusicError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_error_lists_every_violation() {
        let err = MusicError::IntervalValidationFailed(vec![
            MusicError::StringNotFound(9),
            MusicError::FretOutOfRange { string: 6, fret: 30, max: 24 },
        ]);
        assert_eq!(
            err.to_string(),
            "Interval validation failed: There is no string number: 9; Fret: 30 doesn't exist on String: 6 (0..=24)"
        );
    }
}
