//! Chord derivation
//!
//! Chords are stacked thirds taken from a scale: degrees 1, 3, 5, 7, 9, 11, 13 and 15,
//! where degrees above 7 wrap back into the scale one (or two) octaves higher.
//! A triad is the first three of these, a seventh chord the first five, and a power
//! chord is the root and fifth of the major scale.

use crate::note::Note;
use crate::scale::{self, ScaleType};

/// Scale degrees of the chord built through the 15th
pub const EXTENDED_DEGREES: [usize; 8] = [1, 3, 5, 7, 9, 11, 13, 15];

const TRIAD_LENGTH: usize = 3;
const SEVENTH_LENGTH: usize = 5;

/// How a single note is expanded when played
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChordType {
    /// Only the note itself
    #[default]
    Note,
    Power,
    MinorThird,
    MajorThird,
    MinorSeventh,
    MajorSeventh,
}

impl ChordType {
    pub const ALL: [ChordType; 6] = [
        ChordType::Note,
        ChordType::Power,
        ChordType::MinorThird,
        ChordType::MajorThird,
        ChordType::MinorSeventh,
        ChordType::MajorSeventh,
    ];

    /// Parse a chord type from its name (any case) or its numeric index.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(index) = s.parse::<usize>() {
            return Self::ALL.get(index).copied();
        }
        Self::ALL
            .iter()
            .copied()
            .find(|chord_type| chord_type.name().eq_ignore_ascii_case(s))
    }

    pub fn name(self) -> &'static str {
        match self {
            ChordType::Note => "Note",
            ChordType::Power => "Power",
            ChordType::MinorThird => "MinorThird",
            ChordType::MajorThird => "MajorThird",
            ChordType::MinorSeventh => "MinorSeventh",
            ChordType::MajorSeventh => "MajorSeventh",
        }
    }
}

/// Every degree in [`EXTENDED_DEGREES`] of the scale on `root`.
pub fn extended(root: &Note, scale_type: ScaleType) -> Vec<Note> {
    let scale = scale::build(root, scale_type);
    EXTENDED_DEGREES
        .iter()
        .map(|degree| {
            let index = (degree - 1) % 7;
            let octaves = ((degree - 1) / 7) as i32;
            scale[index].shifted_octaves(octaves)
        })
        .collect()
}

pub fn build(root: &Note, chord_type: ChordType) -> Vec<Note> {
    match chord_type {
        ChordType::Note => vec![root.clone()],
        ChordType::Power => {
            let scale = scale::build(root, ScaleType::Major);
            vec![scale[0].clone(), scale[4].clone()]
        }
        ChordType::MajorThird => take(root, ScaleType::Major, TRIAD_LENGTH),
        ChordType::MinorThird => take(root, ScaleType::Minor, TRIAD_LENGTH),
        ChordType::MajorSeventh => take(root, ScaleType::Major, SEVENTH_LENGTH),
        ChordType::MinorSeventh => take(root, ScaleType::Minor, SEVENTH_LENGTH),
    }
}

fn take(root: &Note, scale_type: ScaleType, count: usize) -> Vec<Note> {
    extended(root, scale_type).into_iter().take(count).collect()
}
