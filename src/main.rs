use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use tactickle::config::AppConfig;
use tactickle::game::rules::rules_text;
use tactickle::game::{GameEngine, GameState};
use tactickle::persistence::SaveManager;
use tactickle::records::RecordsStore;
use tactickle::ui::{App, SessionEnd};

/// Play TacTickle in the terminal.
#[derive(Parser)]
#[command(name = "tactickle", about = "Slide your pieces to make three in a row on a 4x4 board")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "tactickle.toml", global = true)]
    config: PathBuf,

    /// Override the saves directory
    #[arg(long, global = true)]
    saves_dir: Option<PathBuf>,

    /// Override the match records file
    #[arg(long, global = true)]
    records_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new game
    Play {
        /// Name of the player with the white pieces
        #[arg(long)]
        white: String,

        /// Name of the player with the black pieces
        #[arg(long)]
        black: String,

        /// Let black make the first move
        #[arg(long)]
        black_first: bool,
    },
    /// Resume a saved game
    Load {
        /// Save name, with or without ".json"
        name: String,
    },
    /// List saved games
    Saves,
    /// Delete a saved game
    Delete { name: String },
    /// Show the fastest wins
    Records {
        /// Number of entries (defaults to records.top_count)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Explain how to play
    Rules,
    /// Print a configuration file with every default value
    DefaultConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(dir) = cli.saves_dir {
        config.storage.saves_dir = dir;
    }
    if let Some(file) = cli.records_file {
        config.storage.records_file = file;
    }
    config.validate().context("validating configuration")?;

    match cli.command {
        Command::Play {
            white,
            black,
            black_first,
        } => {
            let state = GameState::with_starting_player(&white, &black, u8::from(black_first))
                .context("creating a new game")?;
            play(&config, state)
        }
        Command::Load { name } => {
            let saves = open_saves(&config)?;
            let state = saves
                .load(&name)
                .with_context(|| format!("loading save '{name}'"))?;
            play(&config, state)
        }
        Command::Saves => {
            let saves = open_saves(&config)?;
            let names = saves.list().context("listing saves")?;
            if names.is_empty() {
                println!("No saved games in {}", saves.dir().display());
            }
            for (i, name) in names.iter().enumerate() {
                println!("{:>3}) {}", i + 1, name);
            }
            Ok(())
        }
        Command::Delete { name } => {
            let saves = open_saves(&config)?;
            saves
                .delete(&name)
                .with_context(|| format!("deleting save '{name}'"))?;
            println!("Deleted '{name}'");
            Ok(())
        }
        Command::Records { top } => {
            let count = top.unwrap_or(config.records.top_count);
            if count == 0 {
                bail!("--top must be at least 1");
            }
            show_records(&config, count);
            Ok(())
        }
        Command::Rules => {
            print!("{}", rules_text());
            Ok(())
        }
        Command::DefaultConfig => {
            print!("{}", AppConfig::default_toml().context("serializing defaults")?);
            Ok(())
        }
    }
}

fn open_saves(config: &AppConfig) -> Result<SaveManager> {
    SaveManager::new(&config.storage.saves_dir).with_context(|| {
        format!(
            "opening saves directory {}",
            config.storage.saves_dir.display()
        )
    })
}

fn play(config: &AppConfig, state: GameState) -> Result<()> {
    let saves = open_saves(config)?;
    let mut records = RecordsStore::new(&config.storage.records_file);
    let mut app = App::new(GameEngine::new(state), Some(&saves), &mut records);

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let res = app.run(&mut terminal);

    // Restore terminal, even when the game loop failed
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    match res.context("running the game")? {
        SessionEnd::Won(record) => println!(
            "{} beat {} in {} moves.",
            record.winner, record.loser, record.move_count
        ),
        SessionEnd::Draw => println!("The game is drawn."),
        SessionEnd::Quit { saved: Some(path) } => {
            println!("Resume later with: tactickle load {}", save_name(&path))
        }
        SessionEnd::Quit { saved: None } => println!("Game abandoned."),
    }
    Ok(())
}

fn save_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn show_records(config: &AppConfig, count: usize) {
    let store = RecordsStore::new(&config.storage.records_file);
    let records = store.top(count);
    if records.is_empty() {
        println!("No games won yet.");
        return;
    }

    println!("{:>3}  {:<16} {:<16} {:>5}", "#", "Winner", "Loser", "Moves");
    for (i, record) in records.iter().enumerate() {
        println!(
            "{:>3}  {:<16} {:<16} {:>5}",
            i + 1,
            record.winner,
            record.loser,
            record.move_count
        );
    }
}
