use std::fmt;
use std::sync::Arc;

use crate::board::{Board, answers_correct, build_all_boards};
use crate::keys::KeyInput;
use crate::scorer::{Feedback, score};
use crate::selector::{SelectionError, select_targets};
use crate::stats::Statistics;
use crate::wordbank::WordBank;
use crate::{MAX_GUESSES, NUM_BOARDS, WORD_LENGTH, debug_log, info_log};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameMode {
    Daily,
    Practice,
}

impl GameMode {
    pub const ALL: [Self; 2] = [Self::Daily, Self::Practice];

    /// Prefix used for this mode's persisted fields.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Practice => "free",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily => write!(f, "Daily"),
            Self::Practice => write!(f, "Practice"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Active,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    GameOver,
    TooShort,
    NotInWordList,
}

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub total_correct: usize,
    pub attempts: usize,
}

impl GameResult {
    pub fn is_win(&self) -> bool {
        self.total_correct == NUM_BOARDS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Rejected(RejectReason),
    Accepted,
    /// The guess was accepted and ended the game.
    Completed(GameResult),
}

/// One puzzle: four targets, the guesses made so far and the letters being typed.
#[derive(Debug, Clone)]
pub struct Session {
    bank: Arc<WordBank>,
    seed: i64,
    targets: [String; NUM_BOARDS],
    guesses: Vec<String>,
    current: String,
    boards: [Board; NUM_BOARDS],
    answers_correct: [Option<usize>; NUM_BOARDS],
}

impl Session {
    pub fn new(seed: i64, bank: Arc<WordBank>) -> Result<Self, SelectionError> {
        Self::restore(seed, Vec::new(), bank)
    }

    /// Rebuilds a session from its seed and guess list.
    ///
    /// Guesses are replayed as given; callers restoring persisted data check them first.
    pub fn restore(seed: i64, guesses: Vec<String>, bank: Arc<WordBank>) -> Result<Self, SelectionError> {
        let targets = select_targets(seed, &bank)?;
        let boards = build_all_boards(&guesses, &targets);
        let answers_correct = answers_correct(&guesses, &targets);
        Ok(Self {
            bank,
            seed,
            targets,
            guesses,
            current: String::new(),
            boards,
            answers_correct,
        })
    }

    pub fn seed(&self) -> i64 {
        self.seed
    }

    pub fn targets(&self) -> &[String; NUM_BOARDS] {
        &self.targets
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn boards(&self) -> &[Board; NUM_BOARDS] {
        &self.boards
    }

    /// Per board, the index of the guess that solved it.
    pub fn answers_correct(&self) -> &[Option<usize>; NUM_BOARDS] {
        &self.answers_correct
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn total_correct(&self) -> usize {
        self.answers_correct.iter().filter(|a| a.is_some()).count()
    }

    pub fn status(&self) -> GameStatus {
        if self.guesses.len() >= MAX_GUESSES || self.total_correct() == NUM_BOARDS {
            GameStatus::Complete
        } else {
            GameStatus::Active
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status() == GameStatus::Complete
    }

    /// The final result, once the session is complete.
    pub fn result(&self) -> Option<GameResult> {
        self.is_complete().then(|| GameResult {
            total_correct: self.total_correct(),
            attempts: self.guesses.len(),
        })
    }

    pub fn is_valid_guess(&self, word: &str) -> bool {
        word.len() == WORD_LENGTH && self.bank.is_valid_guess(word)
    }

    pub fn add_letter(&mut self, letter: char) -> bool {
        if self.is_complete() || self.current.len() >= WORD_LENGTH || !letter.is_ascii_alphabetic() {
            return false;
        }
        self.current.push(letter.to_ascii_lowercase());
        debug_log!("add_letter() - current entry now {:?}", self.current);
        true
    }

    pub fn delete_letter(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }
        let removed = self.current.pop().is_some();
        if removed {
            debug_log!("delete_letter() - current entry now {:?}", self.current);
        }
        removed
    }

    /// Submits the current entry as a guess against all four boards.
    pub fn submit_guess(&mut self) -> SubmitOutcome {
        if self.is_complete() {
            return SubmitOutcome::Rejected(RejectReason::GameOver);
        }
        if self.current.len() != WORD_LENGTH {
            debug_log!("submit_guess() - rejected short entry {:?}", self.current);
            return SubmitOutcome::Rejected(RejectReason::TooShort);
        }
        if !self.bank.is_valid_guess(&self.current) {
            debug_log!("submit_guess() - rejected unknown word {:?}", self.current);
            return SubmitOutcome::Rejected(RejectReason::NotInWordList);
        }

        let guess = std::mem::take(&mut self.current);
        self.guesses.push(guess);
        let guess = &self.guesses[self.guesses.len() - 1];
        let index = self.guesses.len() - 1;
        for (board, target) in self.targets.iter().enumerate() {
            // Solved boards stay frozen.
            if self.answers_correct[board].is_some() {
                continue;
            }
            self.boards[board].push(score(guess, target));
            if guess == target {
                self.answers_correct[board] = Some(index);
            }
        }
        info_log!("submit_guess() - guess {} {:?} accepted", index + 1, guess);

        match self.result() {
            Some(result) => {
                log::info!(
                    "puzzle {} finished: {}/{} boards in {} guesses",
                    self.seed,
                    result.total_correct,
                    NUM_BOARDS,
                    result.attempts
                );
                SubmitOutcome::Completed(result)
            }
            None => SubmitOutcome::Accepted,
        }
    }

    /// Applies one key press. Returns the game result if this key finished the game.
    pub fn handle_key(&mut self, key: KeyInput) -> Option<GameResult> {
        match key {
            KeyInput::Letter(c) => {
                self.add_letter(c);
                None
            }
            KeyInput::Delete => {
                self.delete_letter();
                None
            }
            KeyInput::Submit => match self.submit_guess() {
                SubmitOutcome::Completed(result) => Some(result),
                SubmitOutcome::Accepted | SubmitOutcome::Rejected(_) => None,
            },
        }
    }

    /// Best verdict seen for `letter` on each board, or `None` if it was never guessed.
    pub fn key_state(&self, letter: char) -> Option<[Feedback; NUM_BOARDS]> {
        let letter = letter.to_ascii_lowercase();
        if !self.guesses.iter().any(|g| g.contains(letter)) {
            return None;
        }
        Some(std::array::from_fn(|board| {
            let mut best = Feedback::Absent;
            for (row, feedback) in self.boards[board].iter().enumerate() {
                for (ch, verdict) in self.guesses[row].chars().zip(feedback) {
                    if ch == letter {
                        best = best.max(*verdict);
                    }
                }
            }
            best
        }))
    }
}

/// One mode's session together with the statistics it feeds.
#[derive(Debug, Clone)]
pub struct Game {
    mode: GameMode,
    session: Session,
    stats: Statistics,
}

impl Game {
    pub fn new(mode: GameMode, session: Session, stats: Statistics) -> Self {
        Self {
            mode,
            session,
            stats,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    /// Swaps in a fresh puzzle. Statistics are kept and nothing is recorded for the old one.
    pub fn replace_session(&mut self, session: Session) {
        info_log!(
            "replace_session() - {} puzzle {} replaced by {}",
            self.mode,
            self.session.seed(),
            session.seed()
        );
        self.session = session;
    }

    pub fn add_letter(&mut self, letter: char) -> bool {
        self.session.add_letter(letter)
    }

    pub fn delete_letter(&mut self) -> bool {
        self.session.delete_letter()
    }

    pub fn submit_guess(&mut self) -> SubmitOutcome {
        let outcome = self.session.submit_guess();
        if let SubmitOutcome::Completed(result) = outcome {
            self.stats.record_completion(result.total_correct, result.attempts);
        }
        outcome
    }

    pub fn handle_key(&mut self, key: KeyInput) -> Option<GameResult> {
        let result = self.session.handle_key(key);
        if let Some(result) = result {
            self.stats.record_completion(result.total_correct, result.attempts);
        }
        result
    }
}
