//! Terminal shell around the puzzle engine: words come in as typed lines
//! instead of wheel taps, everything else runs through the same tick loop.

mod source;
mod storage;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use beeline_engine::{
    rank_index, Engine, EngineConfig, InputEvent, KeyInput, NoHit, Notification, PuzzleStatus,
    WordFeedback, RANK_FRACTIONS,
};
use clap::Parser;

use crate::source::SampleSource;
use crate::storage::FileStorage;

const RANK_NAMES: [&str; RANK_FRACTIONS.len()] = [
    "Beginner",
    "Good Start",
    "Moving Up",
    "Good",
    "Solid",
    "Nice",
    "Great",
    "Amazing",
    "Genius",
    "Queen Bee",
];

#[derive(Parser)]
#[command(name = "beeline", about = "Play the daily letter-wheel puzzle in a terminal")]
struct Args {
    /// Epoch day to play (defaults to today)
    #[arg(long)]
    day: Option<i64>,

    /// Wipe progress for the selected day before playing
    #[arg(long)]
    restart: bool,

    /// Save file path
    #[arg(long, default_value = "beeline-save.json")]
    storage: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let storage = FileStorage::open(&args.storage)?;
    let mut engine = Engine::new(storage, EngineConfig::default());
    pollster::block_on(engine.load_day(args.day, &SampleSource));
    if args.restart {
        pollster::block_on(engine.restart());
    }

    match engine.status() {
        PuzzleStatus::Ready => {}
        PuzzleStatus::Failed(message) => {
            eprintln!("could not load a puzzle: {message}");
            std::process::exit(1);
        }
        PuzzleStatus::NoPuzzle | PuzzleStatus::Loading => {
            eprintln!("could not load a puzzle");
            std::process::exit(1);
        }
    }

    let started = Instant::now();
    print_board(&engine);
    println!("type a word, or :s shuffle, :l list, :h hints, :q quit");

    let stdin = io::stdin();
    let mut out = io::stdout();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();

        match line {
            "" => {
                print_board(&engine);
                continue;
            }
            ":q" => break,
            ":s" => engine.push_input(InputEvent::Key(KeyInput::Space)),
            ":l" => {
                print_found(&engine);
                continue;
            }
            ":h" => {
                print_hints(&engine);
                continue;
            }
            word => {
                for ch in word.chars() {
                    engine.push_input(InputEvent::Key(KeyInput::Letter(ch)));
                }
                engine.push_input(InputEvent::Key(KeyInput::Enter));
            }
        }

        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        let outcome = engine.tick(now_ms, &NoHit);

        if let Some(feedback) = engine.feedback() {
            println!("{}", feedback_line(feedback));
        }
        for notification in &outcome.notifications {
            match notification {
                Notification::Genius => println!("*** Genius! ***"),
                Notification::QueenBee => println!("*** Queen Bee! You found every word. ***"),
            }
        }
        // The splash only exists for pointer-driven shells; dismiss it here
        // so the next submission is not swallowed.
        engine.push_input(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        engine.push_input(InputEvent::PointerUp { x: 0.0, y: 0.0 });
        engine.tick(now_ms, &NoHit);

        if outcome.save_requested {
            pollster::block_on(engine.save())?;
        }
        print_board(&engine);
    }

    pollster::block_on(engine.save())?;
    Ok(())
}

fn print_board<S: beeline_engine::Storage>(engine: &Engine<S>) {
    let session = engine.session();
    let letters: Vec<String> = session
        .letters
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                format!("[{l}]")
            } else {
                l.to_string()
            }
        })
        .collect();
    let rank = rank_index(session.score, session.max_score);
    println!(
        "day {}  {}  score {}/{}  rank {}",
        session.day,
        letters.join(" "),
        session.score,
        session.max_score,
        RANK_NAMES[rank]
    );
}

fn print_found<S: beeline_engine::Storage>(engine: &Engine<S>) {
    let found = &engine.session().found;
    if found.is_empty() {
        println!("nothing found yet");
        return;
    }
    println!("{} found: {}", found.len(), found.join(", "));
}

fn print_hints<S: beeline_engine::Storage>(engine: &Engine<S>) {
    let totals = engine.hints_puzzle();
    let found = engine.hints_found();

    println!(
        "pangrams: {} of {}",
        found.pangrams, totals.pangrams
    );
    for (letter, row) in &totals.lengths {
        let found_row = found.lengths.get(letter);
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .skip(4)
            .filter(|(_, total)| **total > 0)
            .map(|(len, total)| {
                let have = found_row
                    .and_then(|r| r.get(len))
                    .copied()
                    .unwrap_or(0);
                format!("{len}:{have}/{total}")
            })
            .collect();
        if !cells.is_empty() {
            println!("  {letter}  {}", cells.join("  "));
        }
    }
    let mut starts: Vec<String> = Vec::new();
    for (prefix, total) in &totals.starts {
        let have = found.starts.get(prefix).copied().unwrap_or(0);
        starts.push(format!("{prefix}:{have}/{total}"));
    }
    if !starts.is_empty() {
        println!("  starts  {}", starts.join("  "));
    }
}

fn feedback_line(feedback: WordFeedback) -> String {
    match feedback {
        WordFeedback::AlreadyFound => "already found".to_string(),
        WordFeedback::TooShort => "too short".to_string(),
        WordFeedback::MissingCenter => "missing the center letter".to_string(),
        WordFeedback::NotInList => "not in the word list".to_string(),
        WordFeedback::Scored { points, forms } if forms > 1 => {
            format!("+{points} points ({forms} words)")
        }
        WordFeedback::Scored { points, .. } => format!("+{points} points"),
    }
}
