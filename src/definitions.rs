//! # Song and Tablature Definitions
//!
//! Structured records describing what to play, deserialized from YAML or JSON.
//!
//! ## Song
//! ```yaml
//! keyName: C
//! sequence: "C3-0.5, D3-0.5, E3"
//! chordType: Power        # name or index, optional
//! reverse: false          # optional
//! keys:                   # optional alternate keys
//!   - keyName: D
//!     sequence: "D3-0.5, E3-0.5, F#3"
//! ```
//!
//! ## Tablature
//! ```yaml
//! name: Riff
//! speed: 600              # ms per measure
//! tuning: standard
//! tab: "6-0-0.5, 6-3-0.5"
//! repeat: 2               # optional, default 1
//! default: Drop           # optional, name of a version to adopt
//! versions:
//!   - name: Drop
//!     tuning: dropD
//!     tab: "6-0-0.5, 6-5-0.5"
//! ```
//!
//! Raw records mirror the file layout; conversion validates tuning and chord
//! names and splits sequences into trimmed tokens.

use serde::Deserialize;

use crate::chord::ChordType;
use crate::error::MusicError;
use crate::fretboard::TuningScheme;
use crate::sequencer::split_tokens;

/// Raw song key for deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawSongKey {
    pub key_name: String,
    pub sequence: Option<String>,
    pub chord_type: Option<RawChordType>,
}

/// Chord types are written by name or by index
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum RawChordType {
    Index(usize),
    Name(String),
}

/// Raw song for deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawSong {
    #[serde(flatten)]
    pub key: RawSongKey,
    #[serde(default)]
    pub reverse: bool,
    #[serde(default)]
    pub keys: Vec<RawSongKey>,
}

/// Raw tablature version for deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawTabVersion {
    pub name: Option<String>,
    #[serde(default)]
    pub speed: u32,
    pub tuning: Option<String>,
    pub tab: Option<String>,
}

/// Raw tablature for deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawTablature {
    #[serde(flatten)]
    pub version: RawTabVersion,
    pub repeat: Option<u32>,
    pub default: Option<String>,
    #[serde(default)]
    pub versions: Vec<RawTabVersion>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SongKey {
    pub name: String,
    pub sequence: String,
    pub chord_type: ChordType,
}

impl SongKey {
    pub fn new(name: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sequence: sequence.into(),
            chord_type: ChordType::Note,
        }
    }

    /// The sequence split on commas, each token trimmed
    pub fn tokens(&self) -> Vec<&str> {
        split_tokens(&self.sequence)
    }

    fn from_raw(raw: RawSongKey) -> Result<Self, MusicError> {
        let chord_type = match raw.chord_type {
            None => ChordType::Note,
            Some(RawChordType::Index(index)) => ChordType::ALL
                .get(index)
                .copied()
                .ok_or_else(|| MusicError::DefinitionError(format!("Invalid chord type: {}", index)))?,
            Some(RawChordType::Name(name)) => ChordType::from_name(&name)
                .ok_or_else(|| MusicError::DefinitionError(format!("Invalid chord type: {}", name)))?,
        };
        Ok(Self {
            name: raw.key_name,
            sequence: raw.sequence.unwrap_or_default(),
            chord_type,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub default_key: SongKey,
    pub reverse: bool,
    pub keys: Vec<SongKey>,
}

impl Song {
    /// Parse a song from YAML or JSON text.
    ///
    /// ```
    /// use fretscale::Song;
    ///
    /// let song = Song::from_yaml(r#"{"keyName": "A", "sequence": "A, B, C"}"#).unwrap();
    /// assert_eq!(song.default_key.tokens(), ["A", "B", "C"]);
    /// assert!(Song::from_yaml(r#"{"sequence": "A"}"#).is_err());
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, MusicError> {
        let raw: RawSong =
            serde_yaml::from_str(content).map_err(|e| MusicError::DefinitionError(e.to_string()))?;
        Ok(Self {
            default_key: SongKey::from_raw(raw.key)?,
            reverse: raw.reverse,
            keys: raw
                .keys
                .into_iter()
                .map(SongKey::from_raw)
                .collect::<Result<_, _>>()?,
        })
    }

    /// The key named `name` (any case), or the song's own key when absent or unknown.
    pub fn key(&self, name: Option<&str>) -> &SongKey {
        name.and_then(|name| {
            self.keys
                .iter()
                .find(|key| key.name.eq_ignore_ascii_case(name))
        })
        .unwrap_or(&self.default_key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TabVersion {
    pub name: String,
    /// Milliseconds per measure; 0 means "inherit"
    pub speed: u32,
    pub tuning: TuningScheme,
    pub tab: String,
}

impl TabVersion {
    pub fn tokens(&self) -> Vec<&str> {
        split_tokens(&self.tab)
    }

    fn from_raw(raw: RawTabVersion) -> Result<Self, MusicError> {
        let tuning = match raw.tuning {
            None => TuningScheme::Standard,
            Some(name) => TuningScheme::from_name(&name)
                .ok_or_else(|| MusicError::DefinitionError(format!("Invalid tuning: {}", name)))?,
        };
        Ok(Self {
            name: raw.name.unwrap_or_default(),
            speed: raw.speed,
            tuning,
            tab: raw.tab.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tablature {
    pub version: TabVersion,
    pub repeat: u32,
    pub default: Option<String>,
    pub versions: Vec<TabVersion>,
}

impl Tablature {
    /// Parse tablature from YAML or JSON text and apply [`Tablature::fix_up`].
    pub fn from_yaml(content: &str) -> Result<Self, MusicError> {
        let raw: RawTablature =
            serde_yaml::from_str(content).map_err(|e| MusicError::DefinitionError(e.to_string()))?;
        let mut tablature = Self {
            version: TabVersion::from_raw(raw.version)?,
            repeat: raw.repeat.unwrap_or(1),
            default: raw.default,
            versions: raw
                .versions
                .into_iter()
                .map(TabVersion::from_raw)
                .collect::<Result<_, _>>()?,
        };
        tablature.fix_up();
        Ok(tablature)
    }

    /// Give versions without a speed the tablature's speed, then adopt the
    /// name, tab and tuning of the `default` version if one matches.
    pub fn fix_up(&mut self) {
        for version in self.versions.iter_mut().filter(|v| v.speed == 0) {
            version.speed = self.version.speed;
        }

        let chosen = self
            .default
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| self.versions.iter().find(|v| v.name == name))
            .cloned();
        if let Some(chosen) = chosen {
            self.version.name = chosen.name;
            self.version.tab = chosen.tab;
            self.version.tuning = chosen.tuning;
        }
    }

    /// The version named `name` (any case), or the tablature's own when absent or unknown.
    pub fn version(&self, name: Option<&str>) -> &TabVersion {
        name.and_then(|name| {
            self.versions
                .iter()
                .find(|v| v.name.eq_ignore_ascii_case(name))
        })
        .unwrap_or(&self.version)
    }
}
