//! # Fretboard Module
//!
//! Model a fretted string instrument as a set of strings, each with a two-way
//! mapping between frets and notes.
//!
//! ## Sub-modules
//! - `tuning` - [`TuningScheme`] tables of open-string notes
//! - `string` - [`FretboardString`], the fret <-> note map for one string
//! - `instrument` - [`StringInstrument`], strings numbered from 1 (highest) under a scheme
//!
//! ## Building a String
//! Starting from the open note, each fret is one semitone higher. Names come from
//! the open note's spelling table and the octave advances whenever the walk
//! passes C. Every fret therefore has exactly one note and no note repeats.
//!
//! ## Example
//! ```rust
//! use fretscale::{StringInstrument, TuningScheme};
//!
//! let mut guitar = StringInstrument::new(TuningScheme::Standard, 24).unwrap();
//!
//! assert_eq!(guitar.get_note(1, 5).unwrap().to_string(), "A4");
//! assert_eq!(guitar.get_fret(5, "D3").unwrap(), 5);
//!
//! // Power chord shape: root on string 6, fifth two frets up on string 5
//! assert_eq!(guitar.fret_interval(6, 0, 5, 2).unwrap(), 7);
//!
//! guitar.custom_tune(6, "D2").unwrap();
//! assert_eq!(guitar.get_note(6, 0).unwrap().to_string(), "D2");
//! ```
//!
//! ## Concurrency
//! Re-tuning takes `&mut self`, so queries and re-tuning of one instrument are
//! serialized by the borrow checker; share it behind a lock if several threads need it.

mod instrument;
mod string;
mod tuning;

pub use instrument::{StringInstrument, DEFAULT_FRETS};
pub use string::FretboardString;
pub use tuning::TuningScheme;
