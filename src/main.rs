//! fretscale CLI
//! Show scale and chord data for a note, or sequence a song or tablature file
//! and hand it to the logging player.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::thread;
use std::time::Duration;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use fretscale::{
    LogPlayer, MusicError, Note, NoteRegistry, PlayableSequence, ProgressEvent, SequenceContext,
    Song, StringInstrument, Tablature, TokenSequencer, Voice, DEFAULT_FRETS,
};

/// Music theory and fretboard calculator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// A4 reference frequency in Hz
    #[arg(short = 'r', long = "reference", default_value_t = 440)]
    reference: u32,

    /// Octave for notes written without one
    #[arg(short, long, default_value_t = 3)]
    octave: i32,

    /// Measures to wait before playing
    #[arg(short = 'w', long = "prewait", default_value_t = 0)]
    prewait: u32,

    /// Milliseconds per measure
    #[arg(short, long, default_value_t = 300)]
    speed: u32,

    /// Voice: horn, flute, clarinet or recorder (or 0-3)
    #[arg(short, long, default_value = "horn")]
    instrument: String,

    /// Note to report on, e.g. C#3
    #[arg(short, long)]
    note: Option<String>,

    /// Song file (YAML or JSON)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Song key or tablature version to play
    #[arg(short, long)]
    key: Option<String>,

    /// Tablature file (YAML or JSON)
    #[arg(short, long)]
    tab: Option<PathBuf>,

    /// Wait out each group's duration while playing
    #[arg(long)]
    paced: bool,

    /// Print sequenced events as YAML instead of playing them
    #[arg(long)]
    print_events: bool,
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    if cli.note.is_none() && cli.file.is_none() && cli.tab.is_none() {
        error!("Nothing to do: pass --note, --file or --tab");
        process::exit(2);
    }

    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn context(cli: &Cli) -> Result<SequenceContext, MusicError> {
    let voice = Voice::from_name(&cli.instrument)
        .ok_or_else(|| MusicError::DefinitionError(format!("Unknown instrument: {}", cli.instrument)))?;
    Ok(SequenceContext::default()
        .with_measure_ms(cli.speed)
        .with_base_octave(cli.octave)
        .with_voice(voice)
        .with_reference_hz(cli.reference))
}

/// Pre-wait is given in measures
fn prewait_ms(cli: &Cli) -> u64 {
    cli.speed as u64 * cli.prewait as u64
}

fn run(cli: &Cli) -> Result<(), MusicError> {
    let context = context(cli)?;
    let registry = NoteRegistry::new();

    if let Some(name) = &cli.note {
        let note = registry.create(&context.note_text(name), cli.reference)?;
        print_report(&note)?;

        let sequencer = TokenSequencer::new(&registry, context.clone());
        for (label, scale) in [("major scale", note.major_scale()), ("minor scale", note.minor_scale())] {
            let tokens: Vec<String> = scale.iter().map(|n| n.to_string()).collect();
            let sequence = sequencer.load_tokens(label, &tokens, &mut log_progress);
            play(cli, &sequence)?;
        }
    }

    if let Some(path) = &cli.file {
        let song = Song::from_yaml(&read(path)?)?;
        let key = song.key(cli.key.as_deref());
        info!("Song key {} ({} tokens)", key.name, key.tokens().len());

        let sequencer = TokenSequencer::new(&registry, context.clone().with_chord_type(key.chord_type));
        let mut sequence = sequencer.load_tokens(&key.name, key.tokens(), &mut log_progress);
        if song.reverse {
            sequence.reverse();
        }
        play(cli, &sequence)?;
    }

    if let Some(path) = &cli.tab {
        let tablature = Tablature::from_yaml(&read(path)?)?;
        let version = tablature.version(cli.key.as_deref());
        let guitar = StringInstrument::with_reference(version.tuning, DEFAULT_FRETS, cli.reference)?;
        info!("{}", guitar);

        let speed = if version.speed > 0 { version.speed } else { cli.speed };
        let sequencer = TokenSequencer::new(&registry, context.clone().with_measure_ms(speed))
            .with_instrument(&guitar);
        let mut sequence = sequencer.load_tokens(&version.name, version.tokens(), &mut log_progress);
        sequence.set_repeat(tablature.repeat);
        play(cli, &sequence)?;
    }

    Ok(())
}

fn read(path: &Path) -> Result<String, MusicError> {
    fs::read_to_string(path)
        .map_err(|e| MusicError::DefinitionError(format!("Cannot read '{}': {}", path.display(), e)))
}

fn log_progress(event: ProgressEvent) {
    match event {
        ProgressEvent::SequenceLoaded { name, groups, skipped } => {
            info!("Loaded {}: {} groups, {} skipped", name, groups, skipped)
        }
        ProgressEvent::StartSequence { name, repeat } => info!("Playing {} x{}", name, repeat),
        ProgressEvent::PlayingNotes { label, duration_ms, .. } => info!("{} ({}ms)", label, duration_ms),
        ProgressEvent::StopSequence { name } => info!("Finished {}", name),
        ProgressEvent::Error { message } => error!("{}", message),
    }
}

fn play(cli: &Cli, sequence: &PlayableSequence) -> Result<(), MusicError> {
    if cli.print_events {
        let yaml = serde_yaml::to_string(sequence.groups())
            .map_err(|e| MusicError::PlaybackFailed(e.to_string()))?;
        println!("# {}\n{}", sequence.name(), yaml);
        return Ok(());
    }

    if cli.prewait > 0 {
        thread::sleep(Duration::from_millis(prewait_ms(cli)));
    }
    let mut player = if cli.paced { LogPlayer::paced() } else { LogPlayer::default() };
    let failures = sequence.play(&mut player, &mut log_progress);
    if !failures.is_empty() && !sequence.is_empty() {
        error!("{} of {} groups failed to play", failures.len(), sequence.len());
    }
    Ok(())
}

fn print_report(note: &Note) -> Result<(), MusicError> {
    let names = |notes: Vec<Note>| notes.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(" ");

    println!("Note: {} ({:?})", note, note.tone_type());
    println!("Frequency: {:.2}Hz (A4 = {}Hz)", note.frequency()?, note.reference_hz());
    let octaves: Vec<String> = note
        .frequencies()
        .map(|(octave, hz)| format!("{}{}={:.2}", note.pitch(), octave, hz))
        .collect();
    println!("All octaves: {}", octaves.join(" "));
    println!("Chromatic neighbours: {} < {} > {}", note.note_before(), note, note.note_after());
    println!("Major neighbours: {} < {} > {}", note.major_note_before(), note, note.major_note_after());
    println!("Minor neighbours: {} < {} > {}", note.minor_note_before(), note, note.minor_note_after());
    println!("Major scale: {}", names(note.major_scale()));
    println!("Minor scale: {}", names(note.minor_scale()));
    println!("Power chord: {}", names(note.power_chord()));
    println!("Major chord: {} | 7: {}", names(note.major_chord3()), names(note.major_chord7()));
    println!("Minor chord: {} | 7: {}", names(note.minor_chord3()), names(note.minor_chord7()));
    println!("Relative minor: {} ({})", note.relative_minor(), names(note.relative_minor_scale()));
    println!("Relative major: {}", note.relative_major());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_without_octave_uses_octave_option() {
        let cli = Cli::parse_from(["fretscale", "-n", "C", "-o", "3"]);
        let registry = NoteRegistry::new();
        let name = context(&cli).unwrap().note_text("C");
        let note = registry.create(&name, cli.reference).unwrap();

        assert_eq!(note.to_string(), "C3");
        assert!((note.frequency().unwrap() - 130.81).abs() < 0.01);
        assert_eq!(note.major_scale().last().unwrap().to_string(), "C4");
    }

    #[test]
    fn test_prewait_counts_measures() {
        let cli = Cli::parse_from(["fretscale", "-n", "C", "-w", "2", "-s", "300"]);
        assert_eq!(prewait_ms(&cli), 600);
        assert_eq!(prewait_ms(&Cli::parse_from(["fretscale", "-n", "C"])), 0);
    }

    #[test]
    fn test_unknown_instrument_is_rejected() {
        let cli = Cli::parse_from(["fretscale", "-n", "C", "-i", "banjo"]);
        assert!(matches!(context(&cli), Err(MusicError::DefinitionError(_))));
    }
}
