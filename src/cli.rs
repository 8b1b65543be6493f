use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};

use crate::clock::{DailyClock, format_countdown};
use crate::game_state::{GameMode, RejectReason, Session, SubmitOutcome};
use crate::games::Games;
use crate::keys::KeyInput;
use crate::persistence::{FileStore, MemoryStore, STATE_FILE_NAME, Store};
use crate::scorer::row_to_string;
use crate::share::{ShareConfig, share_text};
use crate::stats::Statistics;
use crate::wordbank::{
    EMBEDDED_ALLOWED, EMBEDDED_ANSWERS, EMBEDDED_DENYLIST, WordBank, load_wordbank_from_file,
    load_wordbank_from_str,
};
use crate::{NUM_BOARDS, WORD_LENGTH, debug_log};

/// Four-board word puzzle
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited answer list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Which puzzle to use
    #[arg(short, long, value_enum, default_value_t = ModeArg::Daily)]
    pub mode: ModeArg,

    /// Directory for saved games (defaults to the platform data directory)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Keep everything in memory
    #[arg(long)]
    pub no_save: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Play the puzzle interactively (default)
    Play,
    /// Show statistics for the selected mode
    Stats,
    /// Print the share text for the selected mode
    Share,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Daily,
    Practice,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Daily => Self::Daily,
            ModeArg::Practice => Self::Practice,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Embedded lists, or a custom answer list with the embedded words still accepted as guesses.
pub fn build_word_bank(path: Option<&str>) -> io::Result<WordBank> {
    let Some(path) = path else {
        return Ok(WordBank::embedded());
    };
    let answers = load_wordbank_from_file(path)?;
    let mut allowed = load_wordbank_from_str(EMBEDDED_ANSWERS);
    allowed.extend(load_wordbank_from_str(EMBEDDED_ALLOWED));
    Ok(WordBank::new(answers, allowed, load_wordbank_from_str(EMBEDDED_DENYLIST)))
}

/// The file store, or memory when saving is off or the file cannot be opened.
pub fn open_store(cli: &Cli) -> Box<dyn Store> {
    if cli.no_save {
        return Box::new(MemoryStore::new());
    }
    let path = match &cli.data_dir {
        Some(dir) => Some(dir.join(STATE_FILE_NAME)),
        None => FileStore::default_path(),
    };
    let Some(path) = path else {
        log::warn!("no data directory available, progress will not be saved");
        return Box::new(MemoryStore::new());
    };
    match FileStore::open(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("cannot open {}: {e}; progress will not be saved", path.display());
            Box::new(MemoryStore::new())
        }
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let bank = build_word_bank(cli.wordbank_path.as_deref()).with_context(|| {
        format!(
            "failed to load word bank from '{}'",
            cli.wordbank_path.as_deref().unwrap_or_default()
        )
    })?;
    let store = open_store(cli);
    let mut games = Games::load(store, Arc::new(bank), DailyClock::default(), Utc::now())
        .context("cannot choose puzzle words from this answer list")?;
    let mode = GameMode::from(cli.mode);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            let stdin = io::stdin();
            play_loop(&mut games, mode, stdin.lock(), &mut out, Utc::now)
                .context("terminal input or output failed")?;
        }
        Command::Stats => write!(out, "{}", render_stats(mode, games.game(mode).stats()))?,
        Command::Share => {
            let text = share_text(mode, games.session(mode), &ShareConfig::default());
            write!(out, "{text}")?;
        }
    }
    Ok(())
}

pub enum LineInput {
    Guess(String),
    Invalid,
    Exit,
    NewGame,
}

fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}

/// Reads one line of play input. `None` at end of input.
pub fn read_line_input<R: BufRead>(reader: &mut R) -> io::Result<Option<LineInput>> {
    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    let input = input.trim().to_lowercase();
    Ok(Some(match input.as_str() {
        "exit" => LineInput::Exit,
        "next" => LineInput::NewGame,
        _ if is_valid_word(&input) => LineInput::Guess(input),
        _ => LineInput::Invalid,
    }))
}

/// One line per guess row, each board showing the guess and its G/Y/X feedback.
pub fn render_boards(session: &Session) -> String {
    let mut text = String::new();
    for (i, guess) in session.guesses().iter().enumerate() {
        let cells: Vec<String> = (0..NUM_BOARDS)
            .map(|b| match session.boards()[b].get(i) {
                Some(row) => format!("{} {}", guess.to_uppercase(), row_to_string(row)),
                None => " ".repeat(WORD_LENGTH * 2 + 1),
            })
            .collect();
        text.push_str(&format!("{}. {}\n", i + 1, cells.join(" | ")));
    }
    text
}

pub fn render_stats(mode: GameMode, stats: &Statistics) -> String {
    let mut text = format!(
        "{mode} statistics\nPlayed: {}  Win %: {:.0}  Current streak: {}  Max streak: {}\n",
        stats.games_played(),
        stats.win_percentage(),
        stats.current_streak,
        stats.max_streak
    );
    text.push_str("Wins by guesses:\n");
    for (i, count) in stats.win_distribution().iter().enumerate() {
        text.push_str(&format!("  {}: {count}\n", i + NUM_BOARDS));
    }
    text.push_str("Losses by words solved:\n");
    for (i, count) in stats.loss_distribution().iter().enumerate() {
        text.push_str(&format!("  {i}: {count}\n"));
    }
    text
}

fn reject_message(reason: RejectReason) -> &'static str {
    match reason {
        RejectReason::GameOver => "This puzzle is finished.",
        RejectReason::TooShort => "Not enough letters.",
        RejectReason::NotInWordList => "Not in word list.",
    }
}

fn clear_entry(games: &mut Games, mode: GameMode) {
    while !games.session(mode).current().is_empty() {
        if !games.delete_letter(mode) {
            break;
        }
    }
}

/// Types `guess` key by key and submits it. A rejected entry is cleared again.
fn enter_guess(games: &mut Games, mode: GameMode, guess: &str) -> SubmitOutcome {
    clear_entry(games, mode);
    for c in guess.chars() {
        games.handle_key(mode, KeyInput::Letter(c));
    }
    let outcome = games.submit_guess(mode);
    if matches!(outcome, SubmitOutcome::Rejected(_)) {
        clear_entry(games, mode);
    }
    outcome
}

fn write_finish<W: Write>(
    games: &Games,
    mode: GameMode,
    now: DateTime<Utc>,
    out: &mut W,
) -> io::Result<()> {
    let session = games.session(mode);
    let targets: Vec<String> = session.targets().iter().map(|t| t.to_uppercase()).collect();
    writeln!(out, "Answers: {}", targets.join(", "))?;
    writeln!(out, "\n{}", share_text(mode, session, &ShareConfig::default()))?;
    write!(out, "{}", render_stats(mode, games.game(mode).stats()))?;
    if mode == GameMode::Daily {
        let remaining = games.clock().time_until_next(session.seed(), now);
        writeln!(out, "Next daily puzzle in {}", format_countdown(remaining))?;
    } else {
        writeln!(out, "Type 'next' for a new practice puzzle.")?;
    }
    Ok(())
}

/// Line-oriented play: one guess per line, `next` for a new practice puzzle, `exit` to quit.
///
/// The daily puzzle is checked for rollover before every prompt.
pub fn play_loop<R, W, F>(
    games: &mut Games,
    mode: GameMode,
    mut reader: R,
    out: &mut W,
    now: F,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    F: Fn() -> DateTime<Utc>,
{
    loop {
        if mode == GameMode::Daily {
            match games.reset_daily_if_old(now()) {
                Ok(true) => writeln!(out, "A new daily puzzle has started.")?,
                Ok(false) => {}
                Err(e) => return Err(io::Error::other(e)),
            }
        }
        let session = games.session(mode);
        if !session.is_complete() {
            write!(out, "{}", render_boards(session))?;
            writeln!(
                out,
                "Guess {} of {} (or 'exit'):",
                session.guesses().len() + 1,
                crate::MAX_GUESSES
            )?;
        }

        let Some(input) = read_line_input(&mut reader)? else {
            break;
        };
        match input {
            LineInput::Exit => {
                writeln!(out, "Exiting.")?;
                break;
            }
            LineInput::NewGame if mode == GameMode::Practice => {
                games.reset_practice(now()).map_err(io::Error::other)?;
                writeln!(out, "New practice puzzle started.")?;
            }
            LineInput::NewGame => writeln!(out, "The daily puzzle changes once a day.")?,
            LineInput::Invalid => writeln!(out, "Invalid guess. Please enter 5 letters.")?,
            LineInput::Guess(guess) => match enter_guess(games, mode, &guess) {
                SubmitOutcome::Rejected(reason) => writeln!(out, "{}", reject_message(reason))?,
                SubmitOutcome::Accepted => {
                    debug_log!("play_loop() - accepted {}", guess);
                }
                SubmitOutcome::Completed(result) => {
                    write!(out, "{}", render_boards(games.session(mode)))?;
                    if result.is_win() {
                        writeln!(out, "Solved all four in {} guesses!", result.attempts)?;
                    } else {
                        writeln!(out, "Out of guesses: {} of 4 solved.", result.total_correct)?;
                    }
                    write_finish(games, mode, now(), out)?;
                }
            },
        }
    }
    Ok(())
}
