//! Flat key/value persistence for both game modes.
//!
//! Every mode writes five string fields: `last_<mode>` (seed), `<mode>_guesses`,
//! `<mode>_history`, `<mode>_current_streak` and `<mode>_max_streak`. Reading never fails:
//! missing or corrupt fields fall back to fresh-game defaults.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::MAX_GUESSES;
use crate::game_state::{Game, GameMode};
use crate::stats::Statistics;
use crate::wordbank::WordBank;

pub const STATE_FILE_NAME: &str = "state.txt";

#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Unavailable,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "storage I/O error: {e}"),
            Self::Unavailable => write!(f, "storage unavailable"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Unavailable => None,
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Durable string storage.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Makes earlier `set` calls durable.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Process-lifetime storage. An unavailable store fails every call.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            values: HashMap::new(),
            unavailable: true,
        }
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.unavailable {
            return Err(StoreError::Unavailable);
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `key=value` lines in a single file, rewritten on every flush.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(text) => parse_lines(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    /// Default location under the platform data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("quad-wordle").join(STATE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_lines(text: &str) -> HashMap<String, String> {
    text.lines()
        .filter_map(|line| line.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .collect()
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut keys: Vec<&String> = self.values.keys().collect();
        keys.sort();
        let body: String = keys
            .into_iter()
            .map(|k| format!("{k}={}\n", self.values[k]))
            .collect();
        fs::write(&self.path, body)?;
        Ok(())
    }
}

fn seed_key(mode: GameMode) -> String {
    format!("last_{}", mode.storage_key())
}

fn field_key(mode: GameMode, field: &str) -> String {
    format!("{}_{field}", mode.storage_key())
}

/// What was found in storage for one mode.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SavedMode {
    pub seed: Option<i64>,
    /// `None` when the stored list is malformed.
    pub guesses: Option<Vec<String>>,
    pub stats: Statistics,
}

/// Splits a stored guess list, accepting it only if every entry is a known word.
pub fn parse_guesses(text: &str, bank: &WordBank) -> Option<Vec<String>> {
    if text.is_empty() {
        return Some(Vec::new());
    }
    let guesses: Vec<String> = text.split(',').map(str::to_string).collect();
    let valid = guesses.len() <= MAX_GUESSES && guesses.iter().all(|g| bank.is_valid_guess(g));
    valid.then_some(guesses)
}

fn read_field(store: &dyn Store, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("could not read {key}: {e}");
            None
        }
    }
}

/// Reads one mode's fields.
pub fn load_mode(store: &dyn Store, mode: GameMode, bank: &WordBank) -> SavedMode {
    let seed = read_field(store, &seed_key(mode)).and_then(|s| s.parse().ok());
    let guesses = parse_guesses(
        &read_field(store, &field_key(mode, "guesses")).unwrap_or_default(),
        bank,
    );
    let history = read_field(store, &field_key(mode, "history"))
        .and_then(|h| Statistics::parse_history(&h))
        .unwrap_or_default();
    let streak = |field: &str| {
        read_field(store, &field_key(mode, field))
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    };
    SavedMode {
        seed,
        guesses,
        stats: Statistics {
            history,
            current_streak: streak("current_streak"),
            max_streak: streak("max_streak"),
        },
    }
}

/// Writes one mode's fields. The caller decides whether to flush.
pub fn save_game(store: &mut dyn Store, game: &Game) -> Result<(), StoreError> {
    let mode = game.mode();
    let session = game.session();
    let stats = game.stats();
    store.set(&seed_key(mode), &session.seed().to_string())?;
    store.set(&field_key(mode, "guesses"), &session.guesses().join(","))?;
    store.set(&field_key(mode, "history"), &stats.history_to_string())?;
    store.set(&field_key(mode, "current_streak"), &stats.current_streak.to_string())?;
    store.set(&field_key(mode, "max_streak"), &stats.max_streak.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::Session;
    use std::sync::Arc;

    fn bank() -> WordBank {
        WordBank::new(
            ["crane", "slate", "raise", "stare", "arise", "irate"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec!["duchy".to_string()],
            Vec::new(),
        )
    }

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));
    }

    #[test]
    fn test_unavailable_store_errors() {
        let mut store = MemoryStore::unavailable();
        assert!(matches!(store.get("a"), Err(StoreError::Unavailable)));
        assert!(store.set("a", "1").is_err());
    }

    #[test]
    fn test_parse_guesses() {
        let bank = bank();
        assert_eq!(parse_guesses("", &bank), Some(vec![]));
        assert_eq!(
            parse_guesses("crane,duchy", &bank),
            Some(vec!["crane".to_string(), "duchy".to_string()])
        );
        assert_eq!(parse_guesses("crane,zzzzz", &bank), None);
        assert_eq!(parse_guesses("crane,", &bank), None);
        assert_eq!(parse_guesses(&["crane"; 10].join(","), &bank), None);
    }

    #[test]
    fn test_load_missing_fields_gives_defaults() {
        let store = MemoryStore::new();
        let saved = load_mode(&store, GameMode::Daily, &bank());
        assert_eq!(saved.seed, None);
        assert_eq!(saved.guesses, Some(vec![]));
        assert_eq!(saved.stats, Statistics::default());
    }

    #[test]
    fn test_load_corrupt_fields_fall_back() {
        let mut store = MemoryStore::new();
        store.set("last_daily", "not-a-number").unwrap();
        store.set("daily_history", "1,2").unwrap();
        store.set("daily_current_streak", "-4").unwrap();
        store.set("daily_max_streak", "7").unwrap();
        let saved = load_mode(&store, GameMode::Daily, &bank());
        assert_eq!(saved.seed, None);
        assert_eq!(saved.stats.history, Statistics::default().history);
        assert_eq!(saved.stats.current_streak, 0);
        assert_eq!(saved.stats.max_streak, 7);
    }

    #[test]
    fn test_save_then_load() {
        let bank = Arc::new(bank());
        let mut session = Session::new(12, bank.clone()).unwrap();
        for c in "duchy".chars() {
            session.add_letter(c);
        }
        session.submit_guess();
        let mut stats = Statistics::default();
        stats.record_completion(4, 6);
        let game = Game::new(GameMode::Practice, session, stats.clone());

        let mut store = MemoryStore::new();
        save_game(&mut store, &game).unwrap();
        assert_eq!(store.get("last_free").unwrap(), Some("12".to_string()));
        assert_eq!(store.get("free_guesses").unwrap(), Some("duchy".to_string()));

        let saved = load_mode(&store, GameMode::Practice, &bank);
        assert_eq!(saved.seed, Some(12));
        assert_eq!(saved.guesses, Some(vec!["duchy".to_string()]));
        assert_eq!(saved.stats, stats);
        // Modes do not share fields.
        assert_eq!(load_mode(&store, GameMode::Daily, &bank).seed, None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let path = std::env::temp_dir()
            .join("quad_wordle_store_test")
            .join(STATE_FILE_NAME);
        let _ = fs::remove_file(&path);

        let mut store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("last_daily").unwrap(), None);
        store.set("last_daily", "42").unwrap();
        store.set("daily_guesses", "crane,slate").unwrap();
        store.flush().unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("last_daily").unwrap(), Some("42".to_string()));
        assert_eq!(
            reopened.get("daily_guesses").unwrap(),
            Some("crane,slate".to_string())
        );
        assert_eq!(reopened.path(), path.as_path());

        fs::remove_file(&path).unwrap();
    }
}
