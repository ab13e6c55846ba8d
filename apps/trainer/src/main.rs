//! Reference collaborator for lingua-core: a line-driven terminal trainer.
//!
//! Stands in for the game client: discoveries are reported with
//! `/discover`, quiz answers are typed as plain text, and the tick loop
//! advances whenever a line is processed. Run with two JSON file paths
//! (native map, target map) to use your own vocabulary, or with no
//! arguments for the built-in demo set.

use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lingua_core::{clock, Direction, QuizEvents, SubmitOutcome, Trainer, TrainerConfig, TranslationCatalog};

/// Renders quiz side effects to the terminal.
struct ConsoleEvents;

impl QuizEvents for ConsoleEvents {
    fn quiz_started(&mut self, _key: &str, prompt: &str, direction: Direction) {
        match direction {
            Direction::NativeToTarget => {
                println!("[flashcard] What is \"{prompt}\" in the language you are learning?");
            }
            Direction::TargetToNative => {
                println!("[flashcard] What is \"{prompt}\" in your language?");
            }
        }
    }

    fn quiz_result(&mut self, _key: &str, correct: bool, expected: &str) {
        if correct {
            println!("[correct] The answer is \"{expected}\".");
        } else {
            println!("[incorrect] The answer is \"{expected}\". Try typing it again.");
        }
    }

    fn item_mastered(&mut self, key: &str) {
        println!("[mastered] {key}: five correct answers!");
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let catalog = match (args.next(), args.next()) {
        (Some(native), Some(target)) => TranslationCatalog::load_from_files(
            PathBuf::from(native).as_path(),
            PathBuf::from(target).as_path(),
        ),
        _ => demo_catalog(),
    };

    let progress = progress_path();
    tracing::debug!(path = %progress.display(), "using progress file");

    let now = clock::now_millis();
    let mut trainer = Trainer::new(
        catalog,
        TrainerConfig::new(progress),
        Box::new(ConsoleEvents),
        now,
    );

    if trainer.welcome_message_enabled() {
        println!("=== linguadex ===");
        println!("Discover words with /discover <key>, answer flashcards by typing.");
        println!("Type /help for all commands.");
    }
    trainer.notify_join(now);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let now = clock::now_millis();
        trainer.tick(now);

        if let Some(command) = line.strip_prefix('/') {
            if !run_command(&mut trainer, command, now) {
                break;
            }
        } else if trainer.submit_answer(line, now) == SubmitOutcome::Ignored {
            println!("(no flashcard is waiting for an answer)");
        }
    }

    Ok(())
}

/// Dispatch a `/command`. Returns false to quit.
fn run_command(trainer: &mut Trainer, command: &str, now: i64) -> bool {
    let mut parts = command.split_whitespace();
    match (parts.next().unwrap_or(""), parts.next()) {
        ("discover", Some(key)) => {
            if trainer.report_discovery(key, now) {
                let target = trainer.catalog().target_or_key(key).to_string();
                let native = trainer.catalog().native_or_key(key).to_string();
                println!("New discovery: {native} = {target}");
            } else if trainer.is_discovered(key) {
                println!("Already discovered.");
            } else {
                println!("Unknown key: {key}");
            }
        }
        ("discover", None) => println!("Usage: /discover <key>"),
        ("progress", _) => {
            let stats = trainer.stats();
            println!("=== Progress ===");
            let percent = if stats.total > 0 {
                stats.discovered as f64 * 100.0 / stats.total as f64
            } else {
                0.0
            };
            println!(
                "Discovered: {}/{} ({percent:.1}%)",
                stats.discovered, stats.total
            );
            println!("Mastered:   {} (5+ correct flashcards)", stats.mastered);
            println!("Biomes:     {}", stats.discovered_biomes);
        }
        ("flashcard", _) => {
            if !trainer.trigger_quiz() {
                println!("Nothing to quiz: discover something first.");
            }
        }
        ("interval", Some(minutes)) => match minutes.parse() {
            Ok(minutes) if trainer.set_interval_minutes(minutes) => {
                println!("Flashcard interval set to {minutes} minutes.");
            }
            _ => println!("Interval must be 1-120 minutes."),
        },
        ("interval", None) => {
            println!(
                "Current interval: {} minutes (use /interval <1-120> to change)",
                trainer.interval_minutes()
            );
        }
        ("welcome", _) => {
            let enabled = !trainer.welcome_message_enabled();
            trainer.set_welcome_message_enabled(enabled);
            println!(
                "Welcome message is now {}",
                if enabled { "enabled" } else { "disabled" }
            );
        }
        ("cancel", _) => {
            trainer.cancel_quiz();
            println!("Flashcard cancelled.");
        }
        ("help", _) => {
            println!("/discover <key>   report seeing a vocabulary item");
            println!("/flashcard        trigger a flashcard right now");
            println!("/progress         show learning statistics");
            println!("/interval [min]   show or set the quiz interval");
            println!("/welcome          toggle the welcome message");
            println!("/cancel           abandon the current flashcard");
            println!("/quit             exit");
        }
        ("quit" | "exit", _) => return false,
        (other, _) => println!("Unknown command: /{other} (try /help)"),
    }
    true
}

fn progress_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("linguadex")
        .join("progress.json")
}

/// Small English→Spanish starter vocabulary for running without files.
fn demo_catalog() -> TranslationCatalog {
    let pairs = [
        ("block.minecraft.stone", "Stone", "Piedra"),
        ("block.minecraft.dirt", "Dirt", "Tierra"),
        ("block.minecraft.sand", "Sand", "Arena"),
        ("entity.minecraft.cow", "Cow", "Vaca"),
        ("entity.minecraft.sheep", "Sheep", "Oveja"),
        ("entity.minecraft.bat", "Bat", "Murciélago"),
        ("item.minecraft.apple", "Apple", "Manzana"),
        ("item.minecraft.bread", "Bread", "Pan"),
        ("biome.minecraft.plains", "Plains", "Llanura"),
        ("biome.minecraft.desert", "Desert", "Desierto"),
        ("biome.minecraft.forest", "Forest", "Bosque"),
    ];
    let mut native = HashMap::new();
    let mut target = HashMap::new();
    for (key, en, es) in pairs {
        native.insert(key.to_string(), en.to_string());
        target.insert(key.to_string(), es.to_string());
    }
    TranslationCatalog::new(native, target)
}
