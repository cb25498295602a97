//! A single fretted string and its two-way fret/note lookup

use std::collections::HashMap;
use std::fmt;

use crate::error::MusicError;
use crate::note::Note;
use crate::pitch::{Pitch, PitchTable};

/// One string of a fretted instrument.
///
/// `notes[fret]` gives the note at a fret; `frets` maps the sounding
/// (pitch class, octave) of each note back to its fret, so enharmonic
/// spellings (`C#3` / `Db3`) find the same fret.
#[derive(Debug, Clone)]
pub struct FretboardString {
    number: u8,
    fret_count: u8,
    notes: Vec<Note>,
    frets: HashMap<(u8, i32), u8>,
}

impl FretboardString {
    pub fn new(number: u8, open: Note, fret_count: u8) -> Self {
        let (notes, frets) = build(&open, fret_count);
        Self {
            number,
            fret_count,
            notes,
            frets,
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn fret_count(&self) -> u8 {
        self.fret_count
    }

    /// The open-string note (fret 0)
    pub fn open_tuning(&self) -> &Note {
        &self.notes[0]
    }

    /// Notes from the open string up to the last fret
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_at(&self, fret: u8) -> Result<&Note, MusicError> {
        self.notes
            .get(fret as usize)
            .ok_or(MusicError::FretOutOfRange {
                string: self.number,
                fret,
                max: self.fret_count,
            })
    }

    pub fn fret_of(&self, note: &Note) -> Result<u8, MusicError> {
        self.frets
            .get(&sounding_key(note))
            .copied()
            .ok_or_else(|| MusicError::NoteNotOnString {
                string: self.number,
                note: note.to_string(),
                available: self.listing(),
            })
    }

    /// Rebuild the whole string from a new open note; fret numbering is unchanged.
    pub fn retune(&mut self, open: Note) {
        let (notes, frets) = build(&open, self.fret_count);
        self.notes = notes;
        self.frets = frets;
    }

    /// `fret:note` pairs joined with commas
    pub fn listing(&self) -> String {
        self.notes
            .iter()
            .enumerate()
            .map(|(fret, note)| format!("{}:{}", fret, note))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for FretboardString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "String {}: {}", self.number, self.listing())
    }
}

fn sounding_key(note: &Note) -> (u8, i32) {
    (note.pitch_class(), note.sounding_octave())
}

/// Walk the chromatic circle from `open` for every fret, spelling with the
/// open note's table and carrying the octave at each C.
fn build(open: &Note, fret_count: u8) -> (Vec<Note>, HashMap<(u8, i32), u8>) {
    let spelling = open.spelling();
    let mut notes = Vec::with_capacity(fret_count as usize + 1);
    let mut frets = HashMap::with_capacity(fret_count as usize + 1);

    for fret in 0..=fret_count {
        let note = if fret == 0 {
            open.clone()
        } else {
            let (position, carry) = PitchTable::step(open.pitch_class(), fret as i32);
            Note::from_pitch(
                Pitch::spelled(position, spelling),
                open.sounding_octave() + carry,
                open.reference_hz(),
            )
        };
        let previous = frets.insert(sounding_key(&note), fret);
        debug_assert!(previous.is_none(), "fret {} repeats a note", fret);
        notes.push(note);
    }
    (notes, frets)
}
