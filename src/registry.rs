//! Note registry
//!
//! Memoizes note construction so each distinct (pitch, written octave, reference)
//! is parsed and has its frequency table built once. Entries are shared as
//! `Arc<Note>`; two calls for the same key return the same allocation.
//! The registry never evicts.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};
use parking_lot::Mutex;

use crate::error::MusicError;
use crate::note::{split_raw, Note, DEFAULT_REFERENCE_HZ};
use crate::pitch::Pitch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NoteKey {
    pitch: Pitch,
    octave: i32,
    reference_hz: u32,
}

#[derive(Debug, Default)]
pub struct NoteRegistry {
    notes: Mutex<HashMap<NoteKey, Arc<Note>>>,
}

impl NoteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the shared note for `raw` at `reference_hz`, constructing it on first use.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use fretscale::NoteRegistry;
    ///
    /// let registry = NoteRegistry::new();
    /// let first = registry.create("C#4", 440).unwrap();
    /// let second = registry.create(" C#4 ", 440).unwrap();
    /// assert!(Arc::ptr_eq(&first, &second));
    /// assert!(registry.create("X4", 440).is_err());
    /// assert_eq!(registry.len(), 1);
    /// ```
    pub fn create(&self, raw: &str, reference_hz: u32) -> Result<Arc<Note>, MusicError> {
        let (pitch, octave) = split_raw(raw)?;
        let key = NoteKey { pitch, octave, reference_hz };

        let mut notes = self.notes.lock();
        if let Some(note) = notes.get(&key) {
            trace!("Note cache hit: {}{} @ {}Hz", pitch, octave, reference_hz);
            return Ok(Arc::clone(note));
        }

        debug!("Creating note {}{} @ {}Hz", pitch, octave, reference_hz);
        let note = Arc::new(Note::from_pitch(pitch, octave, reference_hz));
        notes.insert(key, Arc::clone(&note));
        Ok(note)
    }

    /// [`NoteRegistry::create`] against the default 440 Hz reference
    pub fn get(&self, raw: &str) -> Result<Arc<Note>, MusicError> {
        self.create(raw, DEFAULT_REFERENCE_HZ)
    }

    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }
}
