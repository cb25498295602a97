//! Scale generation
//!
//! Walks a whole/half step pattern around the chromatic circle from a root note
//! and spells each degree with the next letter name, so a 7-note scale uses
//! every letter A-G exactly once (F# major contains `E#`, Gb major contains `Cb`).
//! When a degree cannot be reached from its letter with at most two accidentals,
//! it falls back to the root's spelling table and then the opposite table,
//! taking the first name whose letter is still unused.
//!
//! The written octave advances once, at the first degree spelled with the letter C.

use crate::note::Note;
use crate::pitch::{NoteName, Pitch, PitchTable, Spelling};

/// Notes in a generated scale: seven degrees plus the root an octave up
pub const SCALE_LENGTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Whole,
    Half,
}

impl Step {
    pub fn semitones(self) -> i32 {
        match self {
            Step::Whole => 2,
            Step::Half => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleType {
    #[default]
    Major,
    Minor,
}

impl ScaleType {
    pub fn pattern(self) -> [Step; 7] {
        use Step::{Half as H, Whole as W};
        match self {
            ScaleType::Major => [W, W, H, W, W, W, H],
            ScaleType::Minor => [W, H, W, W, H, W, W],
        }
    }
}

/// Build the 8-note scale of `scale_type` starting at `root`.
pub fn build(root: &Note, scale_type: ScaleType) -> Vec<Note> {
    let root_pitch = root.pitch();
    let start_octave = root.octave();
    let mut octave = start_octave;
    let mut position = root.pitch_class();
    let mut used = vec![root_pitch.name];

    let mut notes = Vec::with_capacity(SCALE_LENGTH);
    notes.push(root.clone());

    for (i, step) in scale_type.pattern().iter().enumerate() {
        let degree = i + 1;
        position = PitchTable::step(position, step.semitones()).0;

        let pitch = if degree == SCALE_LENGTH - 1 {
            root_pitch
        } else {
            spell_degree(position, root_pitch.name.offset(degree), root.spelling(), &used)
        };

        if pitch.name == NoteName::C && octave == start_octave {
            octave += 1;
        }
        used.push(pitch.name);
        notes.push(Note::from_pitch(pitch, octave, root.reference_hz()));
    }
    notes
}

fn spell_degree(position: u8, letter: NoteName, spelling: Spelling, used: &[NoteName]) -> Pitch {
    if let Some(pitch) = Pitch::spelled_as(position, letter) {
        return pitch;
    }
    let own = Pitch::spelled(position, spelling);
    [own, Pitch::spelled(position, spelling.opposite())]
        .into_iter()
        .find(|candidate| !used.contains(&candidate.name))
        .unwrap_or(own)
}

/// 7th degree of the scale, one octave below the root's octave.
pub fn degree_below(root: &Note, scale_type: ScaleType) -> Note {
    let scale = build(root, scale_type);
    scale[6].shifted_octaves(-1)
}

/// 2nd degree of the scale.
pub fn degree_above(root: &Note, scale_type: ScaleType) -> Note {
    let scale = build(root, scale_type);
    scale[1].clone()
}

pub fn relative_minor(root: &Note) -> Note {
    build(root, ScaleType::Major)[5].clone()
}

pub fn relative_major(root: &Note) -> Note {
    build(root, ScaleType::Minor)[2].clone()
}
