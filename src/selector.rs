use std::fmt;

use crate::NUM_BOARDS;
use crate::rng::MersenneTwister;
use crate::wordbank::WordBank;

/// Upper bound on quadruple draws before giving up on a seed.
pub const MAX_DRAWS: usize = 10_000;

/// The answer list cannot produce a valid target quadruple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    TooFewCandidates { available: usize },
    Exhausted { draws: usize },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewCandidates { available } => write!(
                f,
                "answer list has {available} selectable words, need at least {NUM_BOARDS}"
            ),
            Self::Exhausted { draws } => {
                write!(f, "no valid target set found after {draws} draws")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

fn is_acceptable(candidates: &[&String; NUM_BOARDS], bank: &WordBank) -> bool {
    for (i, a) in candidates.iter().enumerate() {
        if bank.is_denied(a) || candidates[i + 1..].contains(a) {
            return false;
        }
    }
    true
}

/// Picks the four targets for `seed`.
///
/// Whole quadruples are redrawn until all four are distinct and none is denied, so the
/// result depends only on `seed` and the order of the answer list.
pub fn select_targets(seed: i64, bank: &WordBank) -> Result<[String; NUM_BOARDS], SelectionError> {
    let available = bank.selectable_count();
    if available < NUM_BOARDS {
        return Err(SelectionError::TooFewCandidates { available });
    }

    let answers = bank.answers();
    let mut rng = MersenneTwister::for_puzzle(seed);
    let mut draw = move || &answers[rng.random_int31() as usize % answers.len()];

    for _ in 0..MAX_DRAWS {
        let candidates = [draw(), draw(), draw(), draw()];
        if is_acceptable(&candidates, bank) {
            return Ok(candidates.map(String::clone));
        }
    }
    log::warn!("target selection for seed {seed} gave up after {MAX_DRAWS} draws");
    Err(SelectionError::Exhausted { draws: MAX_DRAWS })
}
