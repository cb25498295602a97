//! Token sequencing engine
//!
//! Classifies each token as a note, tab position or rest, resolves it to notes
//! through the registry (and the instrument for tab tokens) and builds the
//! timed events for its slot.

use log::{debug, warn};

use super::types::{EventGroup, PlayableEvent, SequenceContext, Voice};
use super::{FIELD_DELIMITER, GROUP_DELIMITER, REST_MARKER, TOKEN_DELIMITER};
use crate::error::MusicError;
use crate::fretboard::StringInstrument;
use crate::player::PlayableSequence;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::registry::NoteRegistry;

/// A single chord member, after field splitting
#[derive(Debug, Clone, PartialEq)]
enum Token<'t> {
    Note {
        name: &'t str,
        fraction: f64,
        voice: Option<Voice>,
    },
    Tab {
        string: u8,
        fret: u8,
        fraction: f64,
        voice: Option<Voice>,
    },
    Rest {
        fraction: f64,
        voice: Option<Voice>,
    },
}

/// Split sequence text on commas, dropping blank tokens.
pub fn split_tokens(text: &str) -> Vec<&str> {
    text.split(TOKEN_DELIMITER)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

fn malformed(token: &str, message: impl Into<String>) -> MusicError {
    MusicError::MalformedToken {
        token: token.to_string(),
        message: message.into(),
    }
}

fn parse_fraction(token: &str, field: Option<&str>) -> Result<f64, MusicError> {
    let Some(field) = field else {
        return Ok(1.0);
    };
    let fraction: f64 = field
        .parse()
        .map_err(|_| malformed(token, format!("duration '{}' is not a number", field)))?;
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(malformed(token, format!("duration '{}' is not a measure fraction", field)));
    }
    Ok(fraction)
}

fn parse_voice(token: &str, field: Option<&str>) -> Result<Option<Voice>, MusicError> {
    field
        .map(|f| Voice::from_name(f).ok_or_else(|| malformed(token, format!("unknown voice '{}'", f))))
        .transpose()
}

fn classify(token: &str) -> Result<Token<'_>, MusicError> {
    let fields: Vec<&str> = token.split(FIELD_DELIMITER).map(str::trim).collect();
    let head = fields[0];
    if head.is_empty() {
        return Err(malformed(token, "missing pitch"));
    }

    if head.chars().all(|c| c.is_ascii_digit()) {
        if fields.len() > 4 {
            return Err(malformed(token, "expected string-fret-duration-voice"));
        }
        let string = head
            .parse::<u8>()
            .map_err(|_| malformed(token, format!("string '{}' is out of range", head)))?;
        let fret_field = fields.get(1).ok_or_else(|| malformed(token, "missing fret"))?;
        let fret = fret_field
            .parse::<u8>()
            .map_err(|_| malformed(token, format!("fret '{}' is not a number", fret_field)))?;
        return Ok(Token::Tab {
            string,
            fret,
            fraction: parse_fraction(token, fields.get(2).copied())?,
            voice: parse_voice(token, fields.get(3).copied())?,
        });
    }

    if fields.len() > 3 {
        return Err(malformed(token, "expected pitch-duration-voice"));
    }
    let fraction = parse_fraction(token, fields.get(1).copied())?;
    let voice = parse_voice(token, fields.get(2).copied())?;

    if head.eq_ignore_ascii_case(REST_MARKER) {
        Ok(Token::Rest { fraction, voice })
    } else {
        Ok(Token::Note { name: head, fraction, voice })
    }
}

/// Turns token text into [`EventGroup`]s
pub struct TokenSequencer<'a> {
    registry: &'a NoteRegistry,
    instrument: Option<&'a StringInstrument>,
    context: SequenceContext,
}

impl<'a> TokenSequencer<'a> {
    pub fn new(registry: &'a NoteRegistry, context: SequenceContext) -> Self {
        Self {
            registry,
            instrument: None,
            context,
        }
    }

    /// Resolve tab tokens against `instrument`.
    pub fn with_instrument(mut self, instrument: &'a StringInstrument) -> Self {
        self.instrument = Some(instrument);
        self
    }

    pub fn context(&self) -> &SequenceContext {
        &self.context
    }

    /// Parse one time slot. Members separated by `|` sound together; the first is primary.
    pub fn parse_token(&self, token: &str) -> Result<EventGroup, MusicError> {
        let mut primary = None;
        let mut voice = None;
        let mut events = Vec::new();

        for member in token.split(GROUP_DELIMITER).map(str::trim) {
            if member.is_empty() {
                return Err(malformed(token, "empty chord member"));
            }
            let (label, member_voice, member_events) = self.resolve(member)?;
            primary.get_or_insert(label);
            voice.get_or_insert(member_voice);
            events.extend(member_events);
        }

        Ok(EventGroup {
            primary: primary.unwrap_or_default(),
            voice: voice.unwrap_or(self.context.voice),
            events,
        })
    }

    /// Parse every token, keeping each failure in place.
    pub fn parse<I, S>(&self, tokens: I) -> Vec<Result<EventGroup, MusicError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens
            .into_iter()
            .filter(|t| !t.as_ref().trim().is_empty())
            .map(|t| self.parse_token(t.as_ref().trim()))
            .collect()
    }

    /// [`TokenSequencer::parse`] over comma-separated text
    pub fn parse_str(&self, text: &str) -> Vec<Result<EventGroup, MusicError>> {
        self.parse(split_tokens(text))
    }

    /// Sequence comma-separated text, skipping tokens that fail.
    pub fn load(&self, name: &str, text: &str, sink: &mut dyn ProgressSink) -> PlayableSequence {
        self.load_tokens(name, split_tokens(text), sink)
    }

    /// Sequence tokens, skipping (and reporting) the ones that fail.
    pub fn load_tokens<I, S>(&self, name: &str, tokens: I, sink: &mut dyn ProgressSink) -> PlayableSequence
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut groups = Vec::new();
        let mut skipped = 0;

        for token in tokens {
            let token = token.as_ref().trim();
            if token.is_empty() {
                continue;
            }
            match self.parse_token(token) {
                Ok(group) => groups.push(group),
                Err(e) => {
                    warn!("Skipping token '{}': {}", token, e);
                    sink.notify(ProgressEvent::Error { message: e.to_string() });
                    skipped += 1;
                }
            }
        }

        debug!("Loaded '{}': {} groups, {} skipped", name, groups.len(), skipped);
        sink.notify(ProgressEvent::SequenceLoaded {
            name: name.to_string(),
            groups: groups.len(),
            skipped,
        });
        PlayableSequence::new(name, groups)
    }

    fn resolve(&self, member: &str) -> Result<(String, Voice, Vec<PlayableEvent>), MusicError> {
        match classify(member)? {
            Token::Rest { fraction, voice } => {
                let voice = voice.unwrap_or(self.context.voice);
                let rest = PlayableEvent::rest(self.duration(member, fraction)?, voice);
                Ok((REST_MARKER.to_string(), voice, vec![rest]))
            }
            Token::Note { name, fraction, voice } => {
                let duration_ms = self.duration(member, fraction)?;
                self.note_events(&self.context.note_text(name), duration_ms, voice)
            }
            Token::Tab { string, fret, fraction, voice } => {
                let instrument = self
                    .instrument
                    .ok_or_else(|| malformed(member, "tab token needs a string instrument"))?;
                let duration_ms = self.duration(member, fraction)?;
                let raw = instrument.get_note(string, fret)?.to_string();
                self.note_events(&raw, duration_ms, voice)
            }
        }
    }

    fn duration(&self, member: &str, fraction: f64) -> Result<u32, MusicError> {
        self.context
            .duration_of(fraction)
            .ok_or_else(|| malformed(member, format!("duration {} measures is too long", fraction)))
    }

    fn note_events(
        &self,
        raw: &str,
        duration_ms: u32,
        voice: Option<Voice>,
    ) -> Result<(String, Voice, Vec<PlayableEvent>), MusicError> {
        let voice = voice.unwrap_or(self.context.voice);
        let note = self.registry.create(raw, self.context.reference_hz)?;

        let events = note
            .chord(self.context.chord_type)
            .iter()
            .map(|n| {
                Ok(PlayableEvent {
                    frequency: n.frequency()?,
                    duration_ms,
                    voice,
                    label: n.to_string(),
                })
            })
            .collect::<Result<Vec<_>, MusicError>>()?;

        Ok((note.to_string(), voice, events))
    }
}
