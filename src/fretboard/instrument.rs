//! String instrument built from a tuning scheme

use std::fmt;

use log::debug;

use super::string::FretboardString;
use super::tuning::TuningScheme;
use crate::error::MusicError;
use crate::note::{Note, DEFAULT_REFERENCE_HZ};

/// Frets on the default instrument
pub const DEFAULT_FRETS: u8 = 24;

#[derive(Debug, Clone)]
pub struct StringInstrument {
    name: String,
    tuning: TuningScheme,
    fret_count: u8,
    reference_hz: u32,
    strings: Vec<FretboardString>,
}

impl StringInstrument {
    /// A guitar in `tuning` with `fret_count` frets against A4 = 440 Hz.
    pub fn new(tuning: TuningScheme, fret_count: u8) -> Result<Self, MusicError> {
        Self::with_reference(tuning, fret_count, DEFAULT_REFERENCE_HZ)
    }

    pub fn with_reference(
        tuning: TuningScheme,
        fret_count: u8,
        reference_hz: u32,
    ) -> Result<Self, MusicError> {
        let strings = tuning
            .open_notes()
            .iter()
            .enumerate()
            .map(|(i, open)| {
                let note = Note::with_reference(open, reference_hz)?;
                Ok(FretboardString::new(i as u8 + 1, note, fret_count))
            })
            .collect::<Result<Vec<_>, MusicError>>()?;

        debug!(
            "Built guitar: {} tuning, {} strings, {} frets",
            tuning,
            strings.len(),
            fret_count
        );

        Ok(Self {
            name: "Guitar".to_string(),
            tuning,
            fret_count,
            reference_hz,
            strings,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tuning(&self) -> TuningScheme {
        self.tuning
    }

    pub fn fret_count(&self) -> u8 {
        self.fret_count
    }

    pub fn reference_hz(&self) -> u32 {
        self.reference_hz
    }

    /// Strings in order, string 1 first
    pub fn strings(&self) -> &[FretboardString] {
        &self.strings
    }

    pub fn string(&self, number: u8) -> Result<&FretboardString, MusicError> {
        self.strings
            .iter()
            .find(|s| s.number() == number)
            .ok_or(MusicError::StringNotFound(number))
    }

    fn string_mut(&mut self, number: u8) -> Result<&mut FretboardString, MusicError> {
        self.strings
            .iter_mut()
            .find(|s| s.number() == number)
            .ok_or(MusicError::StringNotFound(number))
    }

    /// Note sounded by fretting `string` at `fret`.
    ///
    /// ```
    /// use fretscale::{StringInstrument, TuningScheme};
    ///
    /// let guitar = StringInstrument::new(TuningScheme::Standard, 24).unwrap();
    /// assert_eq!(guitar.get_note(5, 5).unwrap().to_string(), "D3");
    /// ```
    pub fn get_note(&self, string: u8, fret: u8) -> Result<&Note, MusicError> {
        self.string(string)?.note_at(fret)
    }

    /// Fret on `string` that sounds `note` (any enharmonic spelling).
    pub fn get_fret(&self, string: u8, note: &str) -> Result<u8, MusicError> {
        let target = self.string(string)?;
        let note = Note::with_reference(note, self.reference_hz)?;
        target.fret_of(&note)
    }

    /// Re-tune a single string; the others keep their maps.
    pub fn custom_tune(&mut self, string: u8, note: &str) -> Result<(), MusicError> {
        let open = Note::with_reference(note, self.reference_hz)?;
        let target = self.string_mut(string)?;
        debug!("Re-tuning string {} from {} to {}", string, target.open_tuning(), open);
        target.retune(open);
        Ok(())
    }

    /// Signed semitone distance from `start` to `end`.
    pub fn note_interval(&self, start: &str, end: &str) -> Result<i32, MusicError> {
        let start = Note::with_reference(start, self.reference_hz)?;
        let end = Note::with_reference(end, self.reference_hz)?;
        Ok(interval(&start, &end))
    }

    /// Signed semitone distance between two fretted positions.
    ///
    /// Both positions are validated first and every problem is reported
    /// together in [`MusicError::IntervalValidationFailed`].
    pub fn fret_interval(
        &self,
        start_string: u8,
        start_fret: u8,
        end_string: u8,
        end_fret: u8,
    ) -> Result<i32, MusicError> {
        let mut errors = Vec::new();
        let start = self.checked_note(start_string, start_fret, &mut errors);
        let end = self.checked_note(end_string, end_fret, &mut errors);

        match (start, end) {
            (Some(start), Some(end)) if errors.is_empty() => Ok(interval(start, end)),
            _ => Err(MusicError::IntervalValidationFailed(errors)),
        }
    }

    fn checked_note(&self, string: u8, fret: u8, errors: &mut Vec<MusicError>) -> Option<&Note> {
        match self.get_note(string, fret) {
            Ok(note) => Some(note),
            Err(e) => {
                errors.push(e);
                None
            }
        }
    }
}

fn interval(start: &Note, end: &Note) -> i32 {
    end.semitone_index() - start.semitone_index()
}

impl fmt::Display for StringInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opens = self
            .strings
            .iter()
            .rev()
            .map(|s| s.open_tuning().to_string())
            .collect::<Vec<_>>()
            .join("|");
        write!(f, "{} tuned to {}. Strings {}", self.name, self.tuning, opens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guitar(tuning: TuningScheme) -> StringInstrument {
        StringInstrument::new(tuning, DEFAULT_FRETS).unwrap()
    }

    fn note(instrument: &StringInstrument, string: u8, fret: u8) -> String {
        instrument.get_note(string, fret).unwrap().to_string()
    }

    #[test]
    fn test_standard_tuning_notes() {
        let g = guitar(TuningScheme::Standard);
        assert_eq!(note(&g, 5, 5), "D3");
        assert_eq!(note(&g, 5, 7), "E3");
        assert_eq!(note(&g, 5, 8), "F3");
        assert_eq!(note(&g, 1, 5), "A4");
        assert_eq!(note(&g, 2, 5), "E4");
        assert_eq!(note(&g, 3, 4), "B3");
        assert_eq!(note(&g, 4, 5), "G3");
        assert_eq!(note(&g, 6, 5), "A2");
    }

    #[test]
    fn test_drop_tunings() {
        let c = guitar(TuningScheme::DropC);
        assert_eq!(note(&c, 5, 5), "C3");
        assert_eq!(note(&c, 5, 7), "D3");
        assert_eq!(note(&c, 5, 8), "D#3");

        let c_sharp = guitar(TuningScheme::DropCSharp);
        assert_eq!(note(&c_sharp, 5, 5), "C#3");
        assert_eq!(note(&c_sharp, 5, 7), "D#3");
        assert_eq!(note(&c_sharp, 5, 8), "E3");
    }

    #[test]
    fn test_get_fret_locations() {
        let g = guitar(TuningScheme::Standard);
        let cases = [
            (1, "G4", 3),
            (1, "A4", 5),
            (1, "B4", 7),
            (1, "G5", 15),
            (1, "A5", 17),
            (1, "B5", 19),
            (2, "B5", 24),
            (3, "G5", 24),
            (5, "A4", 24),
            (6, "G2", 3),
        ];
        for (string, name, fret) in cases {
            assert_eq!(g.get_fret(string, name).unwrap(), fret, "{} on string {}", name, string);
        }
    }

    #[test]
    fn test_get_fret_errors() {
        let g = guitar(TuningScheme::Standard);
        assert_eq!(g.get_fret(7, "E2").unwrap_err(), MusicError::StringNotFound(7));
        assert!(matches!(
            g.get_fret(1, "E2").unwrap_err(),
            MusicError::NoteNotOnString { string: 1, .. }
        ));
        assert!(matches!(g.get_fret(1, "K2").unwrap_err(), MusicError::InvalidNote(_)));
    }

    #[test]
    fn test_custom_tune_touches_one_string() {
        let mut g = guitar(TuningScheme::Standard);
        g.custom_tune(6, "D2").unwrap();
        assert_eq!(note(&g, 6, 0), "D2");
        assert_eq!(note(&g, 6, 2), "E2");
        for string in 1..=5 {
            let untouched = guitar(TuningScheme::Standard);
            assert_eq!(note(&g, string, 0), note(&untouched, string, 0));
        }
        assert_eq!(g.custom_tune(9, "D2").unwrap_err(), MusicError::StringNotFound(9));
    }

    #[test]
    fn test_note_interval() {
        let g = guitar(TuningScheme::Standard);
        assert_eq!(g.note_interval("C", "G").unwrap(), 7);
        assert_eq!(g.note_interval("G", "C").unwrap(), -7);
        assert_eq!(g.note_interval("E2", "E3").unwrap(), 12);
        assert!(g.note_interval("C", "Z").is_err());
    }

    #[test]
    fn test_power_chord_interval_on_every_fret_pair() {
        let g = guitar(TuningScheme::Standard);
        for fret in 0..12 {
            assert_eq!(g.fret_interval(6, fret, 5, fret + 2).unwrap(), 7);
        }
    }

    #[test]
    fn test_interval_collects_every_violation() {
        let g = guitar(TuningScheme::Standard);
        assert_eq!(
            g.fret_interval(8, 0, 6, 30).unwrap_err(),
            MusicError::IntervalValidationFailed(vec![
                MusicError::StringNotFound(8),
                MusicError::FretOutOfRange { string: 6, fret: 30, max: 24 },
            ])
        );
    }

    #[test]
    fn test_display() {
        let g = guitar(TuningScheme::Standard);
        assert_eq!(g.to_string(), "Guitar tuned to Standard. Strings E2|A2|D3|G3|B3|E4");
    }
}
