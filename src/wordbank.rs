use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::WORD_LENGTH;

/// Ordered target list. Order is part of puzzle identity: seeds index into it.
pub const EMBEDDED_ANSWERS: &str = include_str!("resources/answers.txt");
/// Accepted as guesses, never chosen as targets.
pub const EMBEDDED_ALLOWED: &str = include_str!("resources/allowed.txt");
/// Answers that are never chosen as targets.
pub const EMBEDDED_DENYLIST: &str = include_str!("resources/denylist.txt");

fn normalize(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_lowercase())).then_some(word)
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// The vocabulary of one game: target answers, extra guessable words and the denylist.
#[derive(Debug, Clone)]
pub struct WordBank {
    answers: Vec<String>,
    answer_set: HashSet<String>,
    allowed: HashSet<String>,
    denylist: HashSet<String>,
}

impl WordBank {
    pub fn new<A, D>(answers: Vec<String>, allowed: A, denylist: D) -> Self
    where
        A: IntoIterator<Item = String>,
        D: IntoIterator<Item = String>,
    {
        let answer_set = answers.iter().cloned().collect();
        Self {
            answers,
            answer_set,
            allowed: allowed.into_iter().collect(),
            denylist: denylist.into_iter().collect(),
        }
    }

    /// Answers only, with no extra guesses and nothing denied.
    pub fn from_answers(answers: Vec<String>) -> Self {
        Self::new(answers, Vec::new(), Vec::new())
    }

    /// The word lists compiled into the crate.
    pub fn embedded() -> Self {
        Self::new(
            load_wordbank_from_str(EMBEDDED_ANSWERS),
            load_wordbank_from_str(EMBEDDED_ALLOWED),
            load_wordbank_from_str(EMBEDDED_DENYLIST),
        )
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn is_answer(&self, word: &str) -> bool {
        self.answer_set.contains(word)
    }

    pub fn is_denied(&self, word: &str) -> bool {
        self.denylist.contains(word)
    }

    /// True when `word` may be submitted as a guess.
    pub fn is_valid_guess(&self, word: &str) -> bool {
        self.answer_set.contains(word) || self.allowed.contains(word)
    }

    /// Number of distinct answers that may become targets.
    pub fn selectable_count(&self) -> usize {
        self.answer_set
            .iter()
            .filter(|w| !self.denylist.contains(*w))
            .count()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_str_normalizes_case_and_filters() {
        let words = load_wordbank_from_str("Crane\n  SLATE \nabc\ncr4ne\n\ntoolong\nraise");
        assert_eq!(words, vec!["crane", "slate", "raise"]);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let path = std::env::temp_dir().join("quad_wordle_wordbank_test.txt");
        {
            let mut file = File::create(&path).unwrap();
            writeln!(file, "apple").unwrap();
            writeln!(file, "GRAPE").unwrap();
            writeln!(file, "kiwi").unwrap();
        }
        let words = load_wordbank_from_file(&path).unwrap();
        assert_eq!(words, vec!["apple", "grape"]);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_from_missing_file_errors() {
        assert!(load_wordbank_from_file("/definitely/not/here.txt").is_err());
    }

    #[test]
    fn test_embedded_lists_are_consistent() {
        let bank = WordBank::embedded();
        assert!(bank.answers().len() > 500);
        for word in bank.answers() {
            assert_eq!(word.len(), WORD_LENGTH, "{word}");
            assert!(bank.is_valid_guess(word));
        }
        for word in load_wordbank_from_str(EMBEDDED_DENYLIST) {
            assert!(bank.is_answer(&word), "denied word {word} is not an answer");
            assert!(bank.is_denied(&word));
        }
        for word in load_wordbank_from_str(EMBEDDED_ALLOWED) {
            assert!(!bank.is_answer(&word), "{word} listed twice");
            assert!(bank.is_valid_guess(&word));
        }
    }

    #[test]
    fn test_guess_validity() {
        let bank = WordBank::new(
            vec!["crane".to_string(), "slate".to_string()],
            vec!["aahed".to_string()],
            vec!["slate".to_string()],
        );
        assert!(bank.is_valid_guess("crane"));
        assert!(bank.is_valid_guess("slate"));
        assert!(bank.is_valid_guess("aahed"));
        assert!(!bank.is_valid_guess("zzzzz"));
        assert!(!bank.is_answer("aahed"));
        assert_eq!(bank.selectable_count(), 1);
    }
}
