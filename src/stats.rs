use crate::{MAX_GUESSES, NUM_BOARDS};

/// Buckets `0..MAX_GUESSES` count wins by attempts used (bucket `n - 1` for a win on guess
/// `n`); the following `NUM_BOARDS` buckets count losses by boards solved.
pub const HISTORY_LEN: usize = MAX_GUESSES + NUM_BOARDS;

/// Fewest guesses a win can take: one per board.
const FIRST_WIN_BUCKET: usize = NUM_BOARDS - 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub history: [u32; HISTORY_LEN],
    pub current_streak: u32,
    pub max_streak: u32,
}

impl Default for Statistics {
    fn default() -> Self {
        Self {
            history: [0; HISTORY_LEN],
            current_streak: 0,
            max_streak: 0,
        }
    }
}

// Counts come back from storage unchecked, so nothing here may overflow.
fn saturating_sum(counts: &[u32]) -> u32 {
    counts.iter().fold(0, |total, &n| total.saturating_add(n))
}

impl Statistics {
    /// Records a finished game. Must be called once per completed session.
    pub fn record_completion(&mut self, total_correct: usize, attempts_used: usize) {
        if total_correct == NUM_BOARDS {
            let bucket = attempts_used.clamp(1, MAX_GUESSES) - 1;
            self.history[bucket] = self.history[bucket].saturating_add(1);
            self.current_streak = self.current_streak.saturating_add(1);
            self.max_streak = self.max_streak.max(self.current_streak);
            log::info!("win in {attempts_used} guesses, streak now {}", self.current_streak);
        } else {
            let bucket = MAX_GUESSES + total_correct.min(NUM_BOARDS - 1);
            self.history[bucket] = self.history[bucket].saturating_add(1);
            if self.current_streak > 0 {
                log::info!("streak of {} reset", self.current_streak);
            }
            self.current_streak = 0;
            log::info!("loss with {total_correct} of {NUM_BOARDS} solved");
        }
    }

    /// Wins indexed by guesses used, starting at `NUM_BOARDS` guesses.
    pub fn win_distribution(&self) -> &[u32] {
        &self.history[FIRST_WIN_BUCKET..MAX_GUESSES]
    }

    /// Losses indexed by boards solved.
    pub fn loss_distribution(&self) -> &[u32] {
        &self.history[MAX_GUESSES..]
    }

    pub fn wins(&self) -> u32 {
        saturating_sum(&self.history[..MAX_GUESSES])
    }

    pub fn losses(&self) -> u32 {
        saturating_sum(self.loss_distribution())
    }

    pub fn games_played(&self) -> u32 {
        self.wins().saturating_add(self.losses())
    }

    pub fn win_percentage(&self) -> f64 {
        match self.games_played() {
            0 => 0.0,
            played => f64::from(self.wins()) * 100.0 / f64::from(played),
        }
    }

    /// Comma-joined bucket counts, as persisted.
    pub fn history_to_string(&self) -> String {
        self.history
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Parses persisted bucket counts. `None` unless exactly `HISTORY_LEN` integers.
    pub fn parse_history(text: &str) -> Option<[u32; HISTORY_LEN]> {
        let counts: Vec<u32> = text
            .split(',')
            .map(|part| part.trim().parse().ok())
            .collect::<Option<_>>()?;
        counts.try_into().ok()
    }
}
