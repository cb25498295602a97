//! Integration tests for fretscale
//!
//! Tests the path from fretboard and note text to played event groups.

use std::sync::mpsc;

use fretscale::{
    guitar, sequence, ChordType, MusicError, Note, NoteRegistry, NullSink, ProgressEvent,
    RecordingPlayer, SequenceContext, Song, Tablature, TokenSequencer, TuningScheme, Voice,
};

#[test]
fn test_open_strings_match_every_tuning() {
    for tuning in TuningScheme::ALL {
        let instrument = guitar(tuning).unwrap();
        for (i, open) in tuning.open_notes().iter().enumerate() {
            let string = i as u8 + 1;
            assert_eq!(
                instrument.get_note(string, 0).unwrap(),
                &Note::parse(open).unwrap(),
                "{} string {}",
                tuning,
                string
            );
        }
    }
}

#[test]
fn test_every_fret_round_trips() {
    for tuning in TuningScheme::ALL {
        let instrument = guitar(tuning).unwrap();
        for string in instrument.strings() {
            for fret in 0..=string.fret_count() {
                let note = string.note_at(fret).unwrap();
                assert_eq!(string.fret_of(note).unwrap(), fret);
            }
        }
    }
}

#[test]
fn test_chromatic_spacing_along_a_string() {
    let instrument = guitar(TuningScheme::Standard).unwrap();
    for string in 1..=6 {
        for k in 0..=12 {
            let start = instrument.get_note(string, 3).unwrap().to_string();
            let end = instrument.get_note(string, 3 + k).unwrap().to_string();
            assert_eq!(instrument.note_interval(&start, &end).unwrap(), k as i32);
        }
    }
}

#[test]
fn test_adjacent_strings_are_a_fourth_apart() {
    let instrument = guitar(TuningScheme::Standard).unwrap();
    for string in 1..=5u8 {
        let fret = if string == 2 { 4 } else { 5 };
        assert_eq!(
            instrument.get_note(string, 0).unwrap(),
            instrument.get_note(string + 1, fret).unwrap(),
            "string {} open",
            string
        );
    }
}

#[test]
fn test_power_chord_shape_for_all_roots() {
    let instrument = guitar(TuningScheme::Standard).unwrap();
    for fret in 0..12 {
        assert_eq!(instrument.fret_interval(6, fret, 5, fret + 2).unwrap(), 7);
        let root = instrument.get_note(6, fret).unwrap();
        let fifth = instrument.get_note(5, fret + 2).unwrap();
        assert_eq!(&root.power_chord()[1], fifth);
    }
}

#[test]
fn test_drop_d_differs_only_on_sixth_string() {
    let standard = guitar(TuningScheme::Standard).unwrap();
    let drop_d = guitar(TuningScheme::DropD).unwrap();
    for string in 1..=5 {
        assert_eq!(standard.get_note(string, 0).unwrap(), drop_d.get_note(string, 0).unwrap());
    }
    assert_eq!(standard.get_note(6, 0).unwrap().to_string(), "E2");
    assert_eq!(drop_d.get_note(6, 0).unwrap().to_string(), "D2");
}

#[test]
fn test_interval_errors_name_both_ends() {
    let instrument = guitar(TuningScheme::Standard).unwrap();
    let err = instrument.fret_interval(0, 25, 9, 0).unwrap_err();
    assert_eq!(
        err,
        MusicError::IntervalValidationFailed(vec![
            MusicError::StringNotFound(0),
            MusicError::StringNotFound(9),
        ])
    );
}

#[test]
fn test_rest_is_silent_and_builds_no_note() {
    let registry = NoteRegistry::new();
    let groups = sequence("W-0.5", &registry);
    let rest = &groups[0].as_ref().unwrap().events[0];
    assert_eq!(rest.frequency, 0.0);
    assert_eq!(rest.duration_ms, 500);
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_song_plays_through_recording_player() {
    let song = Song::from_yaml(
        "keyName: E\nsequence: \"E2-0.5, W-0.25, G2-0.25\"\nchordType: power\nreverse: true\n",
    )
    .unwrap();
    let key = song.key(None);

    let registry = NoteRegistry::new();
    let context = SequenceContext::default()
        .with_measure_ms(800)
        .with_chord_type(key.chord_type);
    let sequencer = TokenSequencer::new(&registry, context);
    let mut loaded = sequencer.load_tokens(&key.name, key.tokens(), &mut NullSink);
    if song.reverse {
        loaded.reverse();
    }

    let (mut tx, rx) = mpsc::channel::<ProgressEvent>();
    let mut player = RecordingPlayer::default();
    let failures = loaded.play(&mut player, &mut tx);
    drop(tx);
    assert!(failures.is_empty());

    let labels: Vec<&str> = player.events().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["G2", "D3", "W", "E2", "B2"]);
    let durations: Vec<u32> = player.events().map(|e| e.duration_ms).collect();
    assert_eq!(durations, [200, 200, 200, 400, 400]);

    let progress: Vec<ProgressEvent> = rx.iter().collect();
    assert_eq!(progress.len(), 5);
    assert!(matches!(progress[1], ProgressEvent::PlayingNotes { ref label, .. } if label == "G2"));
}

#[test]
fn test_tablature_uses_its_tuning_and_repeat() {
    let tablature = Tablature::from_yaml(
        r#"{"name": "Riff", "speed": 400, "tuning": "dropD", "tab": "6-0-0.5, 6-5-0.5-flute", "repeat": 2}"#,
    )
    .unwrap();
    let version = tablature.version(None);
    let instrument = guitar(version.tuning).unwrap();

    let registry = NoteRegistry::new();
    let context = SequenceContext::default().with_measure_ms(version.speed);
    let sequencer = TokenSequencer::new(&registry, context).with_instrument(&instrument);
    let mut loaded = sequencer.load_tokens(&version.name, version.tokens(), &mut NullSink);
    loaded.set_repeat(tablature.repeat);

    let mut player = RecordingPlayer::default();
    loaded.play(&mut player, &mut NullSink);

    let played: Vec<(String, Voice, u32)> = player
        .events()
        .map(|e| (e.label.clone(), e.voice, e.duration_ms))
        .collect();
    assert_eq!(
        played,
        vec![
            ("D2".to_string(), Voice::Horn, 200),
            ("G2".to_string(), Voice::Flute, 200),
            ("D2".to_string(), Voice::Horn, 200),
            ("G2".to_string(), Voice::Flute, 200),
        ]
    );
}

#[test]
fn test_scale_sequence_frequencies_rise() {
    let registry = NoteRegistry::new();
    let note = registry.get("F#3").unwrap();
    let tokens: Vec<String> = note.major_scale().iter().map(|n| n.to_string()).collect();
    assert_eq!(tokens[6], "E#4");

    let sequencer = TokenSequencer::new(&registry, SequenceContext::default());
    let groups: Vec<_> = sequencer.parse(&tokens).into_iter().map(Result::unwrap).collect();
    for pair in groups.windows(2) {
        assert!(pair[1].events[0].frequency > pair[0].events[0].frequency);
    }
    assert_eq!(groups[7].events[0].frequency, 2.0 * groups[0].events[0].frequency);
}

#[test]
fn test_chord_type_names_round_trip() {
    for chord_type in ChordType::ALL {
        assert_eq!(ChordType::from_name(chord_type.name()), Some(chord_type));
    }
}
