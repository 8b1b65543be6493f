use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::clock::{DailyClock, practice_seed};
use crate::game_state::{Game, GameMode, GameResult, Session, SubmitOutcome};
use crate::keys::KeyInput;
use crate::persistence::{SavedMode, Store, load_mode, save_game};
use crate::selector::SelectionError;
use crate::wordbank::WordBank;
use crate::{debug_log, info_log};

/// Both game modes plus the storage they are mirrored to.
///
/// In-memory state is authoritative. Every change is written through to the store on a
/// best-effort basis; storage failures are logged and otherwise ignored.
pub struct Games {
    bank: Arc<WordBank>,
    clock: DailyClock,
    store: Box<dyn Store>,
    store_failed: bool,
    daily: Game,
    practice: Game,
}

fn fresh_seed(mode: GameMode, clock: &DailyClock, now: DateTime<Utc>) -> i64 {
    match mode {
        GameMode::Daily => clock.seed_at(now),
        GameMode::Practice => practice_seed(now),
    }
}

/// Replays saved guesses, refusing lists that continue past the end of the game.
fn restore_session(
    seed: i64,
    guesses: Vec<String>,
    bank: &Arc<WordBank>,
) -> Result<Option<Session>, SelectionError> {
    let count = guesses.len();
    let session = Session::restore(seed, guesses, Arc::clone(bank))?;
    let solved_at = session.answers_correct().iter().copied().max().flatten();
    let finished_early = session.total_correct() == session.answers_correct().len()
        && solved_at.is_some_and(|last| last + 1 < count);
    Ok((!finished_early).then_some(session))
}

fn load_game(
    saved: SavedMode,
    mode: GameMode,
    bank: &Arc<WordBank>,
    clock: &DailyClock,
    now: DateTime<Utc>,
) -> Result<Game, SelectionError> {
    let current_daily = clock.seed_at(now);
    let restorable = match (saved.seed, saved.guesses) {
        (Some(seed), Some(guesses)) if mode == GameMode::Practice || seed == current_daily => {
            restore_session(seed, guesses, bank)?
        }
        _ => None,
    };
    let session = match restorable {
        Some(session) => {
            log::info!(
                "restored {mode} puzzle {} with {} guesses",
                session.seed(),
                session.guesses().len()
            );
            session
        }
        None => {
            let seed = fresh_seed(mode, clock, now);
            log::info!("starting {mode} puzzle {seed}");
            Session::new(seed, Arc::clone(bank))?
        }
    };
    Ok(Game::new(mode, session, saved.stats))
}

impl Games {
    /// Restores both modes from `store`, starting fresh where nothing usable was saved.
    ///
    /// Fails only when the word list cannot produce a puzzle.
    pub fn load(
        store: Box<dyn Store>,
        bank: Arc<WordBank>,
        clock: DailyClock,
        now: DateTime<Utc>,
    ) -> Result<Self, SelectionError> {
        let daily = load_game(
            load_mode(store.as_ref(), GameMode::Daily, &bank),
            GameMode::Daily,
            &bank,
            &clock,
            now,
        )?;
        let practice = load_game(
            load_mode(store.as_ref(), GameMode::Practice, &bank),
            GameMode::Practice,
            &bank,
            &clock,
            now,
        )?;
        let mut games = Self {
            bank,
            clock,
            store,
            store_failed: false,
            daily,
            practice,
        };
        games.persist();
        Ok(games)
    }

    pub fn game(&self, mode: GameMode) -> &Game {
        match mode {
            GameMode::Daily => &self.daily,
            GameMode::Practice => &self.practice,
        }
    }

    fn game_mut(&mut self, mode: GameMode) -> &mut Game {
        match mode {
            GameMode::Daily => &mut self.daily,
            GameMode::Practice => &mut self.practice,
        }
    }

    pub fn session(&self, mode: GameMode) -> &Session {
        self.game(mode).session()
    }

    pub fn clock(&self) -> &DailyClock {
        &self.clock
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    /// Applies one key press. Only an accepted guess reaches the store.
    pub fn handle_key(&mut self, mode: GameMode, key: KeyInput) -> Option<GameResult> {
        debug_log!("handle_key() - {mode}: {:?}", key);
        match key {
            KeyInput::Submit => match self.submit_guess(mode) {
                SubmitOutcome::Completed(result) => Some(result),
                SubmitOutcome::Accepted | SubmitOutcome::Rejected(_) => None,
            },
            KeyInput::Letter(_) | KeyInput::Delete => self.game_mut(mode).handle_key(key),
        }
    }

    /// The in-progress entry is never stored.
    pub fn add_letter(&mut self, mode: GameMode, letter: char) -> bool {
        self.game_mut(mode).add_letter(letter)
    }

    pub fn delete_letter(&mut self, mode: GameMode) -> bool {
        self.game_mut(mode).delete_letter()
    }

    pub fn submit_guess(&mut self, mode: GameMode) -> SubmitOutcome {
        let outcome = self.game_mut(mode).submit_guess();
        if !matches!(outcome, SubmitOutcome::Rejected(_)) {
            self.persist();
        }
        outcome
    }

    /// Starts the new daily puzzle once the period has rolled over.
    ///
    /// The abandoned puzzle records nothing in the statistics. Returns whether a reset
    /// happened.
    pub fn reset_daily_if_old(&mut self, now: DateTime<Utc>) -> Result<bool, SelectionError> {
        let seed = self.clock.seed_at(now);
        if seed == self.daily.session().seed() {
            return Ok(false);
        }
        let session = Session::new(seed, Arc::clone(&self.bank))?;
        info_log!("reset_daily_if_old() - daily puzzle rolled over to {}", seed);
        self.daily.replace_session(session);
        self.persist();
        Ok(true)
    }

    /// Abandons the current practice puzzle for a new one.
    pub fn reset_practice(&mut self, now: DateTime<Utc>) -> Result<(), SelectionError> {
        let session = Session::new(practice_seed(now), Arc::clone(&self.bank))?;
        self.practice.replace_session(session);
        self.persist();
        Ok(())
    }

    /// Writes both modes through to the store.
    pub fn persist(&mut self) {
        let result = save_game(self.store.as_mut(), &self.daily)
            .and_then(|()| save_game(self.store.as_mut(), &self.practice))
            .and_then(|()| self.store.flush());
        match result {
            Ok(()) => self.store_failed = false,
            Err(e) if self.store_failed => log::debug!("storage still failing: {e}"),
            Err(e) => {
                log::warn!("storage failed, continuing in memory only: {e}");
                self.store_failed = true;
            }
        }
    }
}
