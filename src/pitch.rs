//! # Pitch Table
//!
//! The fixed 12-position chromatic cycle and the spelled pitch names that sit on it.
//!
//! ## Spellings
//! Every position has a sharp name and a flat name. The two tables agree on
//! the seven natural positions and differ only on the five altered ones:
//!
//! ```text
//! position  0  1   2  3   4  5  6   7  8   9  10  11
//! sharp     C  C#  D  D#  E  F  F#  G  G#  A  A#  B
//! flat      C  Db  D  Eb  E  F  Gb  G  Ab  A  Bb  B
//! ```
//!
//! A [`Pitch`] is a letter plus an accidental. Besides the names in the two
//! tables, the letter-correct spellings scales need (`E#`, `B#`, `Fb`, `Cb`,
//! and double accidentals such as `F##`) are also accepted. A spelling may
//! fall outside the C..B range of its letter (`B#` is position 0 of the next
//! octave, `Cb` is position 11 of the previous one); [`Pitch::octave_carry`]
//! reports that shift.

use std::fmt;

use crate::error::MusicError;

/// Number of positions on the chromatic circle
pub const PITCH_CLASSES: u8 = 12;

/// Chromatic cycle spelled with sharps
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic cycle spelled with flats
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Which of the two 12-name tables to spell with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

impl Spelling {
    pub fn opposite(self) -> Self {
        match self {
            Spelling::Sharp => Spelling::Flat,
            Spelling::Flat => Spelling::Sharp,
        }
    }
}

/// Whether a note was written natural, sharp or flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToneType {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl ToneType {
    /// The table a note of this tone type derives scales and neighbours from.
    /// Natural notes use the sharp table.
    pub fn spelling(self) -> Spelling {
        match self {
            ToneType::Flat => Spelling::Flat,
            ToneType::Natural | ToneType::Sharp => Spelling::Sharp,
        }
    }
}

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NoteName {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteName {
    /// Letters in ascending order starting from C
    pub const ALL: [NoteName; 7] = [
        NoteName::C,
        NoteName::D,
        NoteName::E,
        NoteName::F,
        NoteName::G,
        NoteName::A,
        NoteName::B,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(NoteName::C),
            'D' => Some(NoteName::D),
            'E' => Some(NoteName::E),
            'F' => Some(NoteName::F),
            'G' => Some(NoteName::G),
            'A' => Some(NoteName::A),
            'B' => Some(NoteName::B),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            NoteName::C => 'C',
            NoteName::D => 'D',
            NoteName::E => 'E',
            NoteName::F => 'F',
            NoteName::G => 'G',
            NoteName::A => 'A',
            NoteName::B => 'B',
        }
    }

    /// Semitone offset of the natural letter from C
    pub fn semitone(self) -> i8 {
        match self {
            NoteName::C => 0,
            NoteName::D => 2,
            NoteName::E => 4,
            NoteName::F => 5,
            NoteName::G => 7,
            NoteName::A => 9,
            NoteName::B => 11,
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// The letter `steps` letters above this one, wrapping G -> A -> B -> C.
    pub fn offset(self, steps: usize) -> Self {
        Self::ALL[(self.index() + steps) % Self::ALL.len()]
    }
}

/// Accidentals, up to two in either direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    pub fn semitones(self) -> i8 {
        match self {
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
        }
    }

    pub fn from_semitones(semitones: i8) -> Option<Self> {
        match semitones {
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            _ => None,
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "" => Some(Accidental::Natural),
            "#" => Some(Accidental::Sharp),
            "##" => Some(Accidental::DoubleSharp),
            "b" => Some(Accidental::Flat),
            "bb" => Some(Accidental::DoubleFlat),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::DoubleFlat => "bb",
            Accidental::Flat => "b",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
        }
    }
}

/// A spelled pitch name without an octave, e.g. `C#` or `Bb`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pitch {
    pub name: NoteName,
    pub accidental: Accidental,
}

impl Pitch {
    pub fn new(name: NoteName, accidental: Accidental) -> Self {
        Self { name, accidental }
    }

    /// Parse a pitch name such as `"C"`, `"F#"`, `"Bb"` or `"E#"`.
    pub fn parse(s: &str) -> Result<Self, MusicError> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let name = chars
            .next()
            .and_then(NoteName::from_char)
            .ok_or_else(|| MusicError::InvalidNote(s.to_string()))?;
        let accidental = Accidental::from_symbol(chars.as_str())
            .ok_or_else(|| MusicError::InvalidNote(s.to_string()))?;
        Ok(Self { name, accidental })
    }

    /// Name of `position` in the requested table.
    pub fn spelled(position: u8, spelling: Spelling) -> Self {
        // Table names always parse
        Self::parse(PitchTable::name_at(position as usize, spelling)).unwrap_or_default()
    }

    /// Spell `position` using `letter`, if it is reachable with at most two accidentals.
    pub fn spelled_as(position: u8, letter: NoteName) -> Option<Self> {
        let diff = (position as i8 - letter.semitone()).rem_euclid(12);
        // Map 10/11 to -2/-1 so Cb and Dbb are found below their letter
        let diff = if diff > 6 { diff - 12 } else { diff };
        Accidental::from_semitones(diff).map(|accidental| Self::new(letter, accidental))
    }

    /// Semitone offset from C of the written letter, before wrapping (-2..=13)
    fn raw_semitone(self) -> i8 {
        self.name.semitone() + self.accidental.semitones()
    }

    /// Position on the chromatic circle (0 = C)
    pub fn pitch_class(self) -> u8 {
        self.raw_semitone().rem_euclid(PITCH_CLASSES as i8) as u8
    }

    /// Octaves this spelling sits away from its letter's octave: `B#` is +1, `Cb` is -1.
    pub fn octave_carry(self) -> i32 {
        (self.raw_semitone() as i32).div_euclid(PITCH_CLASSES as i32)
    }

    pub fn tone_type(self) -> ToneType {
        match self.accidental.semitones() {
            0 => ToneType::Natural,
            s if s > 0 => ToneType::Sharp,
            _ => ToneType::Flat,
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name.as_char(), self.accidental.symbol())
    }
}

/// Lookup over the two chromatic spelling tables
pub struct PitchTable;

impl PitchTable {
    /// Position (0..12) of a pitch name.
    ///
    /// ```
    /// use fretscale::PitchTable;
    ///
    /// assert_eq!(PitchTable::position_of("C#").unwrap(), 1);
    /// assert_eq!(PitchTable::position_of("Db").unwrap(), 1);
    /// assert!(PitchTable::position_of("H").is_err());
    /// ```
    pub fn position_of(name: &str) -> Result<u8, MusicError> {
        Pitch::parse(name).map(Pitch::pitch_class)
    }

    /// Name at `index`, wrapping around the circle.
    pub fn name_at(index: usize, spelling: Spelling) -> &'static str {
        let index = index % PITCH_CLASSES as usize;
        match spelling {
            Spelling::Sharp => SHARP_NAMES[index],
            Spelling::Flat => FLAT_NAMES[index],
        }
    }

    /// Move `steps` semitones from `position`.
    /// Returns the new position and the number of C boundaries crossed.
    pub fn step(position: u8, steps: i32) -> (u8, i32) {
        let total = position as i32 + steps;
        (
            total.rem_euclid(PITCH_CLASSES as i32) as u8,
            total.div_euclid(PITCH_CLASSES as i32),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_agree_on_naturals() {
        let mut altered = 0;
        for i in 0..12 {
            let sharp = SHARP_NAMES[i];
            let flat = FLAT_NAMES[i];
            if sharp == flat {
                assert_eq!(sharp.len(), 1);
            } else {
                altered += 1;
                assert_eq!(PitchTable::position_of(sharp).unwrap(), i as u8);
                assert_eq!(PitchTable::position_of(flat).unwrap(), i as u8);
            }
        }
        assert_eq!(altered, 5);
    }

    #[test]
    fn test_name_at_wraps() {
        assert_eq!(PitchTable::name_at(12, Spelling::Sharp), "C");
        assert_eq!(PitchTable::name_at(13, Spelling::Flat), "Db");
        assert_eq!(PitchTable::name_at(10, Spelling::Sharp), "A#");
    }

    #[test]
    fn test_step_crosses_c() {
        assert_eq!(PitchTable::step(11, 1), (0, 1));
        assert_eq!(PitchTable::step(0, -1), (11, -1));
        assert_eq!(PitchTable::step(4, 2), (6, 0));
    }

    #[test]
    fn test_extended_spellings() {
        let e_sharp = Pitch::parse("E#").unwrap();
        assert_eq!(e_sharp.pitch_class(), 5);
        assert_eq!(e_sharp.octave_carry(), 0);

        let b_sharp = Pitch::parse("B#").unwrap();
        assert_eq!(b_sharp.pitch_class(), 0);
        assert_eq!(b_sharp.octave_carry(), 1);

        let c_flat = Pitch::parse("Cb").unwrap();
        assert_eq!(c_flat.pitch_class(), 11);
        assert_eq!(c_flat.octave_carry(), -1);

        assert_eq!(Pitch::parse("F##").unwrap().pitch_class(), 7);
        assert_eq!(Pitch::parse("Bbb").unwrap().to_string(), "Bbb");
    }

    #[test]
    fn test_invalid_names() {
        assert!(Pitch::parse("").is_err());
        assert!(Pitch::parse("H").is_err());
        assert!(Pitch::parse("c").is_err());
        assert!(Pitch::parse("C#b").is_err());
        assert!(Pitch::parse("C###").is_err());
    }

    #[test]
    fn test_spelled_as_letter() {
        assert_eq!(Pitch::spelled_as(5, NoteName::E).unwrap().to_string(), "E#");
        assert_eq!(Pitch::spelled_as(11, NoteName::C).unwrap().to_string(), "Cb");
        assert_eq!(Pitch::spelled_as(7, NoteName::F).unwrap().to_string(), "F##");
        assert!(Pitch::spelled_as(8, NoteName::E).is_none());
    }

    #[test]
    fn test_tone_type() {
        assert_eq!(Pitch::parse("A").unwrap().tone_type(), ToneType::Natural);
        assert_eq!(Pitch::parse("A#").unwrap().tone_type(), ToneType::Sharp);
        assert_eq!(Pitch::parse("Ab").unwrap().tone_type(), ToneType::Flat);
        assert_eq!(ToneType::Natural.spelling(), Spelling::Sharp);
        assert_eq!(ToneType::Flat.spelling(), Spelling::Flat);
    }
}
