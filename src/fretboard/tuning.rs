//! Tuning scheme tables

use std::fmt;

/// Named open-string tunings for a six-string instrument.
///
/// Each scheme is a table of open notes, string 1 (highest) first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TuningScheme {
    #[default]
    Standard,
    DropD,
    DropC,
    DropCSharp,
    OpenC,
    OpenD,
}

impl TuningScheme {
    pub const ALL: [TuningScheme; 6] = [
        TuningScheme::Standard,
        TuningScheme::DropD,
        TuningScheme::DropC,
        TuningScheme::DropCSharp,
        TuningScheme::OpenC,
        TuningScheme::OpenD,
    ];

    /// Open notes for strings 1 through 6
    pub fn open_notes(self) -> [&'static str; 6] {
        match self {
            TuningScheme::Standard => ["E4", "B3", "G3", "D3", "A2", "E2"],
            TuningScheme::DropD => ["E4", "B3", "G3", "D3", "A2", "D2"],
            TuningScheme::DropC => ["D4", "A3", "F3", "C3", "G2", "C2"],
            TuningScheme::DropCSharp => ["D#4", "A#3", "F#3", "C#3", "G#2", "C#2"],
            TuningScheme::OpenC => ["E4", "C4", "G3", "C3", "G2", "C2"],
            TuningScheme::OpenD => ["D4", "A3", "F#3", "D3", "A2", "D2"],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TuningScheme::Standard => "Standard",
            TuningScheme::DropD => "DropD",
            TuningScheme::DropC => "DropC",
            TuningScheme::DropCSharp => "DropCSharp",
            TuningScheme::OpenC => "OpenC",
            TuningScheme::OpenD => "OpenD",
        }
    }

    /// Parse a scheme name, ignoring case, `-`/`_` separators and a `#` for "sharp".
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized: String = s
            .trim()
            .replace('#', "sharp")
            .chars()
            .filter(|c| *c != '-' && *c != '_' && *c != ' ')
            .collect();
        Self::ALL
            .iter()
            .copied()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(&normalized))
    }
}

impl fmt::Display for TuningScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_variants() {
        assert_eq!(TuningScheme::from_name("standard"), Some(TuningScheme::Standard));
        assert_eq!(TuningScheme::from_name("dropCSharp"), Some(TuningScheme::DropCSharp));
        assert_eq!(TuningScheme::from_name("Drop-C#"), Some(TuningScheme::DropCSharp));
        assert_eq!(TuningScheme::from_name("open_d"), Some(TuningScheme::OpenD));
        assert_eq!(TuningScheme::from_name("invalid"), None);
    }

    #[test]
    fn test_drop_d_only_changes_low_string() {
        let standard = TuningScheme::Standard.open_notes();
        let drop_d = TuningScheme::DropD.open_notes();
        for string in 0..5 {
            assert_eq!(standard[string], drop_d[string]);
        }
        assert_eq!(standard[5], "E2");
        assert_eq!(drop_d[5], "D2");
    }
}
