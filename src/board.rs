use crate::NUM_BOARDS;
use crate::scorer::{Row, score};

/// Feedback rows recorded for one target, oldest first.
pub type Board = Vec<Row>;

/// Index of the first guess equal to `target`.
pub fn matched_index(guesses: &[String], target: &str) -> Option<usize> {
    guesses.iter().position(|g| g == target)
}

pub fn answers_correct(guesses: &[String], targets: &[String; NUM_BOARDS]) -> [Option<usize>; NUM_BOARDS] {
    std::array::from_fn(|i| matched_index(guesses, &targets[i]))
}

/// Rows for one target. A board stops recording at the guess that solves it.
pub fn build_board(guesses: &[String], target: &str) -> Board {
    let limit = matched_index(guesses, target).map_or(guesses.len(), |i| i + 1);
    guesses[..limit].iter().map(|g| score(g, target)).collect()
}

pub fn build_all_boards(guesses: &[String], targets: &[String; NUM_BOARDS]) -> [Board; NUM_BOARDS] {
    std::array::from_fn(|i| build_board(guesses, &targets[i]))
}
