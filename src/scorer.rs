use crate::WORD_LENGTH;

/// Verdict for one letter of a guess against one target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feedback {
    /// Letter absent, or all its occurrences already accounted for.
    Absent,
    /// Letter occurs elsewhere in the target.
    Present,
    /// Right letter, right position.
    Correct,
}

impl Feedback {
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Feedback for a whole guess row.
pub type Row = [Feedback; WORD_LENGTH];

pub fn row_to_string(row: &Row) -> String {
    row.iter().map(|f| f.to_char()).collect()
}

/// Scores `guess` against `target`.
///
/// Exact matches are taken first and removed from the pool; each remaining guess letter
/// then claims one unused occurrence in the target, left to right. A letter can never be
/// reported more often than the target contains it.
pub fn score(guess: &str, target: &str) -> Row {
    let mut feedback = [Feedback::Absent; WORD_LENGTH];
    let guess: Vec<u8> = guess.bytes().collect();
    let mut remaining: Vec<Option<u8>> = target.bytes().map(Some).collect();

    // greens
    for i in 0..WORD_LENGTH.min(guess.len()).min(remaining.len()) {
        if remaining[i] == Some(guess[i]) {
            feedback[i] = Feedback::Correct;
            remaining[i] = None;
        }
    }
    // yellows
    for (i, &letter) in guess.iter().enumerate().take(WORD_LENGTH) {
        if feedback[i] == Feedback::Correct {
            continue;
        }
        if let Some(pos) = remaining.iter().position(|&c| c == Some(letter)) {
            feedback[i] = Feedback::Present;
            remaining[pos] = None;
        }
    }
    feedback
}
