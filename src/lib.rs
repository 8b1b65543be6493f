// Library interface for quad-wordle
// The puzzle engine: four simultaneous five-letter puzzles solved with shared guesses.

pub mod board;
pub mod cli;
pub mod clock;
pub mod game_state;
pub mod games;
pub mod keys;
pub mod logging;
pub mod persistence;
pub mod rng;
pub mod scorer;
pub mod selector;
pub mod share;
pub mod stats;
pub mod wordbank;

/// Boards (target words) per puzzle.
pub const NUM_BOARDS: usize = 4;
pub const WORD_LENGTH: usize = 5;
/// Guess rows available before the puzzle is lost.
pub const MAX_GUESSES: usize = 9;

// Re-export commonly used items for easier testing
pub use board::{answers_correct, build_all_boards};
pub use clock::DailyClock;
pub use game_state::{Game, GameMode, GameResult, GameStatus, RejectReason, Session, SubmitOutcome};
pub use games::Games;
pub use keys::KeyInput;
pub use persistence::{FileStore, MemoryStore, Store};
pub use scorer::{Feedback, score};
pub use selector::{SelectionError, select_targets};
pub use share::{ShareConfig, share_text};
pub use stats::Statistics;
pub use wordbank::{WordBank, load_wordbank_from_file, load_wordbank_from_str};
