use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;

use connect_n::chooser::RandomChooser;
use connect_n::config::GameConfig;
use connect_n::error::GameError;
use connect_n::events::{Command, GameEvent};
use connect_n::game::{Board, Game, Participant};

/// Play connect-N in the terminal against a random opponent.
#[derive(Parser)]
#[command(name = "connect-n", about = "Play connect-N against a random opponent")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_n.toml")]
    config: PathBuf,

    /// Override number of rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override the run length needed to win
    #[arg(long)]
    winning_length: Option<usize>,

    /// Override the computer's move timeout, in seconds
    #[arg(long)]
    timeout: Option<f64>,

    /// Flip a coin for who moves first
    #[arg(long)]
    random_start: bool,

    /// Debug logging, and no move timeout
    #[arg(long)]
    debug: bool,

    /// Your display name
    #[arg(long, default_value = "Player1")]
    name: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // Load configuration
    let mut config = GameConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        config.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.cols = cols;
    }
    if let Some(winning_length) = cli.winning_length {
        config.winning_length = winning_length;
    }
    if let Some(timeout) = cli.timeout {
        config.move_timeout_secs = Some(timeout);
    }
    if cli.random_start {
        config.random_start = true;
    }
    if cli.debug {
        config = config.without_move_timeout();
    }
    config.validate().context("invalid game settings")?;

    log::info!(
        "starting connect-{} on a {}x{} board",
        config.winning_length,
        config.rows,
        config.cols
    );
    let mirror = Board::new(config.rows, config.cols, config.winning_length)?;
    let ncols = config.cols;

    let players = [
        Participant::interactive(cli.name),
        Participant::computed("Computer", Arc::new(RandomChooser::new())),
    ];
    let mut game = Game::new(config, players).context("creating game")?;

    let printer = spawn_printer(game.subscribe(), mirror);
    let (command_tx, command_rx) = mpsc::channel();
    spawn_input_reader(command_tx);

    println!("Choose a column with 1-{ncols}, 'h <col>' to hover, 'r' to restart, 'q' to quit.");
    let result = game.run(&command_rx);

    // Dropping the game closes the event channel and lets the printer finish
    drop(game);
    finish_printer(printer);

    match result {
        Ok(_) | Err(GameError::InputClosed) => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Wait for the printer; a panic there is logged rather than propagated.
fn finish_printer(printer: thread::JoinHandle<()>) -> bool {
    match printer.join() {
        Ok(()) => true,
        Err(_) => {
            log::error!("board printer thread panicked");
            false
        }
    }
}

/// Print the board from the event stream, mirroring every applied move.
fn spawn_printer(events: mpsc::Receiver<GameEvent>, mut board: Board) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        println!("{board}\n");
        for event in events {
            match event {
                GameEvent::ColumnChosen(col) => log::debug!("column {} chosen", col + 1),
                GameEvent::MoveApplied { position, token } => {
                    if let Err(e) = board.play(token.to_cell(), position.0) {
                        log::error!("display board out of sync: {}", e);
                    }
                    println!("{board}\n");
                }
                GameEvent::HighlightRequested(col) => println!("(column {})", col + 1),
                GameEvent::GameOver {
                    winner,
                    winning_cells,
                } => match winner {
                    Some(name) => println!("{name} wins! {winning_cells:?}"),
                    None => println!("It's a draw!"),
                },
                GameEvent::Restarted => {
                    board.reset();
                    println!("New game started!\n{board}\n");
                }
            }
        }
    })
}

/// Turn stdin lines into game commands. Quitting or EOF closes the channel.
fn spawn_input_reader(commands: mpsc::Sender<Command>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            let command = match line.trim() {
                "q" => break,
                "r" => Command::Reset,
                input => match input.strip_prefix("h ") {
                    Some(col) => match parse_column(col) {
                        Some(col) => Command::Hover(col),
                        None => continue,
                    },
                    None => Command::ColumnSelected(parse_column(input)),
                },
            };
            if commands.send(command).is_err() {
                break;
            }
        }
    });
}

/// Columns are typed 1-based.
fn parse_column(input: &str) -> Option<usize> {
    input.trim().parse::<usize>().ok()?.checked_sub(1)
}
