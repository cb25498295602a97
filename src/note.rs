//! # Note
//!
//! An immutable spelled pitch at an octave, with its frequency table computed once
//! at construction.
//!
//! ## Purpose
//! A [`Note`] is the unit every other module works in. It knows:
//! 1. **Identity** - pitch class and sounding octave (used for equality and hashing)
//! 2. **Spelling** - the written letter and accidental, which decide the tone type
//!    and therefore which spelling table neighbours are named from
//! 3. **Frequency** - Hz at any octave in the precomputed range
//!
//! ## Parsing
//! Raw text is a pitch name followed by optional octave digits: `"A4"`, `"C#3"`, `"Bb"`.
//! A missing octave is octave 0 and octaves above 99 are rejected. Octaves are
//! written octaves in scientific pitch notation, so `B#3` sounds as `C4` and
//! compares equal to it.
//!
//! ## Frequency Model
//! The reference pitch (A4, default 440 Hz) anchors a ratio of 2^(1/12) per semitone.
//! At construction the note stores its pitch class at every octave from 0 to 11
//! (-4 to +7 relative to octave 4), so [`Note::frequency_at`] is a table lookup.
//!
//! ## Example
//! ```rust
//! use fretscale::Note;
//!
//! let a = Note::parse("A4").unwrap();
//! assert_eq!(a.frequency().unwrap(), 440.0);
//! assert_eq!(a.frequency_at(5).unwrap(), 880.0);
//!
//! let names: Vec<String> = a.major_scale().iter().map(|n| n.to_string()).collect();
//! assert_eq!(names, ["A4", "B4", "C#5", "D5", "E5", "F#5", "G#5", "A5"]);
//! ```
//!
//! ## Related Modules
//! - `pitch` - spelling tables and letter arithmetic
//! - `scale` / `chord` - derivations exposed as methods here
//! - `registry` - shares one instance per distinct note

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::chord::{self, ChordType};
use crate::error::MusicError;
use crate::pitch::{Pitch, PitchTable, Spelling, ToneType, PITCH_CLASSES};
use crate::scale::{self, ScaleType};

/// A4 in Hz unless a caller supplies another reference
pub const DEFAULT_REFERENCE_HZ: u32 = 440;

/// Lowest octave with a frequency table entry
pub const MIN_OCTAVE: i32 = 0;

/// Highest octave with a frequency table entry
pub const MAX_OCTAVE: i32 = 11;

/// Largest octave a parsed note may be written with
const MAX_WRITTEN_OCTAVE: i32 = 99;

/// Octave the reference pitch sits in
const REFERENCE_OCTAVE: i32 = 4;

/// Pitch class of A, the reference letter
const REFERENCE_PITCH_CLASS: i32 = 9;

const OCTAVE_SLOTS: usize = (MAX_OCTAVE - MIN_OCTAVE + 1) as usize;

#[derive(Debug, Clone)]
pub struct Note {
    pitch: Pitch,
    octave: i32,
    reference_hz: u32,
    frequencies: [f64; OCTAVE_SLOTS],
}

impl Note {
    /// Parse a note against the default 440 Hz reference.
    pub fn parse(raw: &str) -> Result<Self, MusicError> {
        Self::with_reference(raw, DEFAULT_REFERENCE_HZ)
    }

    /// Parse a note against a custom A4 reference.
    pub fn with_reference(raw: &str, reference_hz: u32) -> Result<Self, MusicError> {
        let (pitch, octave) = split_raw(raw)?;
        Ok(Self::from_pitch(pitch, octave, reference_hz))
    }

    /// Build a note from an already validated pitch.
    pub fn from_pitch(pitch: Pitch, octave: i32, reference_hz: u32) -> Self {
        Self {
            pitch,
            octave,
            reference_hz,
            frequencies: frequency_table(pitch.pitch_class(), reference_hz),
        }
    }

    pub fn pitch(&self) -> Pitch {
        self.pitch
    }

    /// Written octave, as it appears in the note's name
    pub fn octave(&self) -> i32 {
        self.octave
    }

    /// Octave the note actually sounds in (differs from the written octave for `B#` and `Cb`)
    pub fn sounding_octave(&self) -> i32 {
        self.octave + self.pitch.octave_carry()
    }

    pub fn pitch_class(&self) -> u8 {
        self.pitch.pitch_class()
    }

    pub fn tone_type(&self) -> ToneType {
        self.pitch.tone_type()
    }

    /// Spelling table used for neighbours and fallback scale spelling
    pub fn spelling(&self) -> Spelling {
        self.tone_type().spelling()
    }

    pub fn reference_hz(&self) -> u32 {
        self.reference_hz
    }

    /// Pitch name without the octave, e.g. `"C#"`
    pub fn pitch_name(&self) -> String {
        self.pitch.to_string()
    }

    /// Semitones above C0 of the sounding pitch
    pub fn semitone_index(&self) -> i32 {
        self.sounding_octave() * PITCH_CLASSES as i32 + self.pitch_class() as i32
    }

    /// The same pitch `octaves` octaves up (or down when negative).
    pub fn shifted_octaves(&self, octaves: i32) -> Self {
        Self {
            octave: self.octave + octaves,
            ..self.clone()
        }
    }

    /// Frequency in Hz at the note's own octave
    pub fn frequency(&self) -> Result<f64, MusicError> {
        self.frequency_at(self.sounding_octave())
    }

    /// Frequency of this pitch class at `octave`
    pub fn frequency_at(&self, octave: i32) -> Result<f64, MusicError> {
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(MusicError::OctaveOutOfRange {
                octave,
                min: MIN_OCTAVE,
                max: MAX_OCTAVE,
            });
        }
        Ok(self.frequencies[(octave - MIN_OCTAVE) as usize])
    }

    /// Every precomputed (octave, Hz) pair, lowest first
    pub fn frequencies(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.frequencies
            .iter()
            .enumerate()
            .map(|(i, hz)| (MIN_OCTAVE + i as i32, *hz))
    }

    /// Next lower semitone, named from this note's spelling table.
    pub fn note_before(&self) -> Self {
        self.chromatic_neighbour(-1)
    }

    /// Next higher semitone, named from this note's spelling table.
    pub fn note_after(&self) -> Self {
        self.chromatic_neighbour(1)
    }

    fn chromatic_neighbour(&self, steps: i32) -> Self {
        let (position, carry) = PitchTable::step(self.pitch_class(), steps);
        Self::from_pitch(
            Pitch::spelled(position, self.spelling()),
            self.sounding_octave() + carry,
            self.reference_hz,
        )
    }

    pub fn major_scale(&self) -> Vec<Note> {
        scale::build(self, ScaleType::Major)
    }

    pub fn minor_scale(&self) -> Vec<Note> {
        scale::build(self, ScaleType::Minor)
    }

    /// Leading tone: the 7th degree of the major scale, one octave down
    pub fn major_note_before(&self) -> Self {
        scale::degree_below(self, ScaleType::Major)
    }

    /// The 2nd degree of the major scale
    pub fn major_note_after(&self) -> Self {
        scale::degree_above(self, ScaleType::Major)
    }

    pub fn minor_note_before(&self) -> Self {
        scale::degree_below(self, ScaleType::Minor)
    }

    pub fn minor_note_after(&self) -> Self {
        scale::degree_above(self, ScaleType::Minor)
    }

    /// Root of the relative minor: the 6th degree of the major scale
    pub fn relative_minor(&self) -> Self {
        scale::relative_minor(self)
    }

    /// Root of the relative major: the 3rd degree of the minor scale
    pub fn relative_major(&self) -> Self {
        scale::relative_major(self)
    }

    pub fn relative_minor_scale(&self) -> Vec<Note> {
        self.relative_minor().minor_scale()
    }

    pub fn power_chord(&self) -> Vec<Note> {
        chord::build(self, ChordType::Power)
    }

    pub fn major_chord3(&self) -> Vec<Note> {
        chord::build(self, ChordType::MajorThird)
    }

    pub fn major_chord7(&self) -> Vec<Note> {
        chord::build(self, ChordType::MajorSeventh)
    }

    pub fn minor_chord3(&self) -> Vec<Note> {
        chord::build(self, ChordType::MinorThird)
    }

    pub fn minor_chord7(&self) -> Vec<Note> {
        chord::build(self, ChordType::MinorSeventh)
    }

    /// Notes this note expands to under `chord_type`
    pub fn chord(&self, chord_type: ChordType) -> Vec<Note> {
        chord::build(self, chord_type)
    }
}

impl PartialEq for Note {
    fn eq(&self, other: &Self) -> bool {
        self.pitch_class() == other.pitch_class() && self.sounding_octave() == other.sounding_octave()
    }
}

impl Eq for Note {}

impl Hash for Note {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pitch_class().hash(state);
        self.sounding_octave().hash(state);
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch, self.octave)
    }
}

/// Split `"C#4"` into the pitch `C#` and octave 4.
pub(crate) fn split_raw(raw: &str) -> Result<(Pitch, i32), MusicError> {
    let trimmed = raw.trim();
    let digits_at = trimmed
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (name, digits) = trimmed.split_at(digits_at);

    let pitch = Pitch::parse(name).map_err(|_| MusicError::InvalidNote(raw.to_string()))?;
    let octave = if digits.is_empty() {
        0
    } else {
        digits
            .parse::<i32>()
            .map_err(|_| MusicError::InvalidNote(raw.to_string()))?
    };
    if octave > MAX_WRITTEN_OCTAVE {
        return Err(MusicError::OctaveOutOfRange {
            octave,
            min: MIN_OCTAVE,
            max: MAX_OCTAVE,
        });
    }
    Ok((pitch, octave))
}

fn frequency_table(pitch_class: u8, reference_hz: u32) -> [f64; OCTAVE_SLOTS] {
    let semitone = 2f64.powf(1.0 / PITCH_CLASSES as f64);
    let at_reference_octave =
        reference_hz as f64 * semitone.powi(pitch_class as i32 - REFERENCE_PITCH_CLASS);

    let mut table = [0.0; OCTAVE_SLOTS];
    for (i, slot) in table.iter_mut().enumerate() {
        let octave = MIN_OCTAVE + i as i32;
        *slot = at_reference_octave * 2f64.powi(octave - REFERENCE_OCTAVE);
    }
    table
}
