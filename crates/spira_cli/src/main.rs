use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use spira_core::{JournalStore, ResponseMode, SpiraConfig};
use spira_engine::{personality_type, CompanionEngine, EntryOutcome, FALLBACK_RESPONSE};
use spira_memory::{spiral_hotspot, to_csv, SqliteJournal, TrendReport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

#[derive(Parser, Debug)]
#[command(author, version, about = "spira — a pocket companion for thought spirals")]
struct Args {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the journal database (overrides config)
    #[arg(long, env = "SPIRA_DB")]
    db: Option<PathBuf>,

    /// Response tone: validation, tough_love, humor, distraction or mirror_me
    #[arg(short, long)]
    mode: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show trend report and spiral hotspot over the whole journal
    Trends,
    /// Show personality type and summary stats
    Stats,
    /// Print the most recent entries
    History {
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Export the journal as CSV
    Export {
        /// Output file; stdout if omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spira")
        .join("config.toml")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = SpiraConfig::load_or_default(&config_path);
    if let Some(db) = &args.db {
        config.db_path = db.clone();
    }
    if let Some(mode) = &args.mode {
        config.response_mode = mode
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid --mode: {}", e))?;
    }

    let store = Arc::new(
        SqliteJournal::new(&config.db_path)
            .await
            .with_context(|| format!("Failed to open journal at {}", config.db_path.display()))?,
    );

    match args.command {
        None => interactive(store, &config).await,
        Some(Command::Trends) => trends(store.as_ref()).await,
        Some(Command::Stats) => stats(store.as_ref()).await,
        Some(Command::History { limit }) => history(store.as_ref(), limit).await,
        Some(Command::Export { output }) => export(store.as_ref(), output).await,
    }
}

async fn interactive(store: Arc<SqliteJournal>, config: &SpiraConfig) -> Result<()> {
    // No external model is wired in this build; pattern detection runs on the
    // deterministic keyword fallback and emotion gets the placeholder label.
    let mut engine = CompanionEngine::new(
        store,
        None,
        config.response_mode,
        config.history_limit,
    )
    .await?;

    println!("spira — what's swirling in that mind of yours?");
    println!(
        "(tone: {}; ':mode <tone>' to switch, 'quit' to leave)\n",
        engine.session().mode()
    );

    let mut editor = rustyline::DefaultEditor::new()?;
    loop {
        let line = match editor.readline("spira> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if let Some(tone) = trimmed.strip_prefix(":mode ") {
            match tone.trim().parse::<ResponseMode>() {
                Ok(mode) => {
                    engine.set_mode(mode);
                    println!("Tone switched to {}.\n", mode);
                }
                Err(e) => println!("{}\n", e),
            }
            continue;
        }
        editor.add_history_entry(trimmed).ok();

        match engine.process(trimmed).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => {
                error!("Processing failed: {}", e);
                println!("Oops, something went wrong. {}\n", FALLBACK_RESPONSE);
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &EntryOutcome) {
    let level = outcome.entry.spiral_level;
    let meter: String = "🌸".repeat(level as usize) + &"⚪".repeat((10 - level) as usize);

    println!();
    println!(
        "  pattern: {} ({:.0}%)",
        outcome.entry.pattern,
        outcome.pattern_confidence * 100.0
    );
    println!("  spiral:  {} {}/10", meter, level);
    println!("  mood:    {}", outcome.entry.mood);
    println!();
    println!("  {}", outcome.response);

    if let Some(hotspot) = &outcome.hotspot {
        println!();
        println!("  Something I've noticed about you:");
        println!("  - You tend to spiral most often around {}:00.", hotspot.hour);
        println!("  - {}s seem to be emotionally tougher than others.", hotspot.day);
        if let Some(emotion) = &hotspot.emotion {
            println!("  - The most frequent emotion during your spirals is {}.", emotion);
        }
    }
    println!();
}

async fn trends(store: &SqliteJournal) -> Result<()> {
    let entries = store.all_entries().await?;
    let Some(report) = TrendReport::build(&entries) else {
        println!("No journal data yet. Keep writing to see your trends.");
        return Ok(());
    };

    println!("Your spiral overview");
    println!("  total entries:       {}", report.total_entries);
    println!("  average spiral:      {:.1}/10", report.average_spiral);
    println!("  most common mood:    {}", report.most_common_mood);
    println!("  most common pattern: {}", report.most_common_pattern);

    if let Some(day) = &report.worst_day {
        println!("  toughest day:        {}", day);
    }
    if let Some(hour) = report.worst_hour {
        println!("  toughest hour:       around {}:00", hour);
    }

    println!("\nPattern counts");
    for (pattern, count) in &report.pattern_counts {
        println!("  {:<22} {}", pattern, count);
    }
    println!("\nMood counts");
    for (mood, count) in &report.mood_counts {
        println!("  {:<22} {}", mood, count);
    }

    match spiral_hotspot(store).await? {
        Some(hotspot) => {
            println!("\nHigh-spiral hotspot: {}s around {}:00", hotspot.day, hotspot.hour);
            if let Some(emotion) = &hotspot.emotion {
                println!("Most frequent emotion while spiraling: {}", emotion);
            }
        }
        None => println!("\nNot enough high-spiral entries for a hotspot yet."),
    }

    Ok(())
}

async fn stats(store: &SqliteJournal) -> Result<()> {
    let entries = store.all_entries().await?;
    if entries.is_empty() {
        println!("Share your thoughts to see your stats!");
        return Ok(());
    }

    let avg = entries.iter().map(|e| e.spiral_level as f64).sum::<f64>() / entries.len() as f64;
    let personality = personality_type(entries.iter().map(|e| &e.pattern));

    println!("  personality type:    {}", personality);
    println!("  average spiral:      {:.1}/10", avg);
    println!("  total sessions:      {}", entries.len());

    let recent_moods: Vec<&str> = entries
        .iter()
        .rev()
        .take(5)
        .map(|e| e.mood.as_str())
        .collect();
    println!("  recent moods:        {}", recent_moods.join(", "));

    Ok(())
}

async fn history(store: &SqliteJournal, limit: u32) -> Result<()> {
    let entries = store.recent(limit).await?;
    if entries.is_empty() {
        println!("The journal is empty.");
        return Ok(());
    }

    for entry in entries {
        println!(
            "🗓️  {} | {} | level {}/10 | {} | {}",
            entry.timestamp, entry.mood, entry.spiral_level, entry.pattern, entry.response_type
        );
        println!("    {}\n", entry.input_text);
    }
    Ok(())
}

async fn export(store: &SqliteJournal, output: Option<PathBuf>) -> Result<()> {
    let entries = store.all_entries().await?;
    // Responses aren't persisted; exported rows carry an empty response field.
    let csv = to_csv(entries.iter().map(|e| (e, "")));

    match output {
        Some(path) => {
            std::fs::write(&path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} entries to {}", entries.len(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}
