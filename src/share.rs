//! Text summaries for sharing a finished (or abandoned) puzzle.

use crate::game_state::{GameMode, Session};
use crate::scorer::{Feedback, Row};
use crate::{MAX_GUESSES, NUM_BOARDS};

const CORRECT: &str = "\u{1F7E9}";
const PRESENT: &str = "\u{1F7E8}";
const ABSENT: &str = "\u{2B1C}";
const EMPTY_ROW: &str = "\u{2B1B}\u{2B1B}\u{2B1B}\u{2B1B}\u{2B1B}";
const FAILED: &str = "\u{1F7E5}";
const KEYCAPS: [&str; MAX_GUESSES] = [
    "1\u{FE0F}\u{20E3}",
    "2\u{FE0F}\u{20E3}",
    "3\u{FE0F}\u{20E3}",
    "4\u{FE0F}\u{20E3}",
    "5\u{FE0F}\u{20E3}",
    "6\u{FE0F}\u{20E3}",
    "7\u{FE0F}\u{20E3}",
    "8\u{FE0F}\u{20E3}",
    "9\u{FE0F}\u{20E3}",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    pub title: String,
    pub site: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: "Quordle".to_string(),
            site: "quordle.com".to_string(),
        }
    }
}

/// Keycap digit for the guess that solved a board, or a red square.
pub fn result_glyph(matched: Option<usize>) -> &'static str {
    matched
        .and_then(|index| KEYCAPS.get(index).copied())
        .unwrap_or(FAILED)
}

pub fn row_glyphs(row: Option<&Row>) -> String {
    match row {
        None => EMPTY_ROW.to_string(),
        Some(row) => row
            .iter()
            .map(|f| match f {
                Feedback::Correct => CORRECT,
                Feedback::Present => PRESENT,
                Feedback::Absent => ABSENT,
            })
            .collect(),
    }
}

/// Header, result glyphs and site line, with no grid.
pub fn share_summary(mode: GameMode, session: &Session, config: &ShareConfig) -> String {
    let correct = session.answers_correct();
    let targets = session.targets();
    let mut text = match mode {
        GameMode::Daily => format!("Daily {} #{}\n", config.title, session.seed()),
        GameMode::Practice => format!("Practice {}\n", config.title),
    };
    for pair in 0..NUM_BOARDS / 2 {
        let (a, b) = (pair * 2, pair * 2 + 1);
        text.push_str(result_glyph(correct[a]));
        text.push_str(result_glyph(correct[b]));
        if mode == GameMode::Practice {
            text.push_str(&format!(
                " {} - {}",
                targets[a].to_uppercase(),
                targets[b].to_uppercase()
            ));
        }
        text.push('\n');
    }
    text.push_str(&config.site);
    text
}

/// Last row index shown for a pair of boards: the later solve if both are solved,
/// otherwise the full height.
fn last_row(a: Option<usize>, b: Option<usize>) -> usize {
    match (a, b) {
        (Some(a), Some(b)) => a.max(b),
        _ => MAX_GUESSES - 1,
    }
}

/// Full share text: the summary followed by the feedback grids, boards paired side by side.
pub fn share_text(mode: GameMode, session: &Session, config: &ShareConfig) -> String {
    let correct = session.answers_correct();
    let boards = session.boards();
    let mut text = share_summary(mode, session, config);
    text.push('\n');
    for pair in 0..NUM_BOARDS / 2 {
        if pair > 0 {
            text.push('\n');
        }
        let (a, b) = (pair * 2, pair * 2 + 1);
        for i in 0..=last_row(correct[a], correct[b]) {
            text.push_str(&row_glyphs(boards[a].get(i)));
            text.push(' ');
            text.push_str(&row_glyphs(boards[b].get(i)));
            text.push('\n');
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::WordBank;
    use std::sync::Arc;

    fn bank() -> Arc<WordBank> {
        Arc::new(WordBank::new(
            ["crane", "slate", "raise", "stare", "arise", "irate", "atone", "stone"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            vec!["duchy".to_string()],
            Vec::new(),
        ))
    }

    fn play(session: &mut Session, words: &[String]) {
        for word in words {
            for c in word.chars() {
                session.add_letter(c);
            }
            session.submit_guess();
        }
    }

    #[test]
    fn test_glyphs() {
        assert_eq!(result_glyph(None), "🟥");
        assert_eq!(result_glyph(Some(0)), "1️⃣");
        assert_eq!(result_glyph(Some(8)), "9️⃣");
        assert_eq!(row_glyphs(None), "⬛⬛⬛⬛⬛");
        use crate::scorer::Feedback::{Absent as X, Correct as G, Present as Y};
        assert_eq!(row_glyphs(Some(&[G, Y, X, X, G])), "🟩🟨⬜⬜🟩");
    }

    #[test]
    fn test_daily_win_text() {
        let mut session = Session::new(77, bank()).unwrap();
        let targets = session.targets().to_vec();
        play(&mut session, &targets);

        let text = share_text(GameMode::Daily, &session, &ShareConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Daily Quordle #77");
        assert_eq!(lines[1], "1️⃣2️⃣");
        assert_eq!(lines[2], "3️⃣4️⃣");
        assert_eq!(lines[3], "quordle.com");
        // Top pair solved by guess 2: two rows. Bottom pair by guess 4: four rows.
        let boards = session.boards();
        assert_eq!(
            lines[4],
            format!("{} {}", "🟩".repeat(5), row_glyphs(boards[1].first()))
        );
        assert_eq!(lines[5], format!("{} {}", "⬛".repeat(5), "🟩".repeat(5)));
        assert_eq!(lines[6], "");
        assert_eq!(lines.len(), 4 + 2 + 1 + 4);
        assert_eq!(lines[10], format!("{} {}", "⬛".repeat(5), "🟩".repeat(5)));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_practice_loss_text() {
        let mut session = Session::new(5, bank()).unwrap();
        let first = session.targets()[0].clone();
        let mut words = vec![first];
        words.extend(std::iter::repeat_n("duchy".to_string(), 8));
        play(&mut session, &words);
        assert!(session.is_complete());

        let summary = share_summary(GameMode::Practice, &session, &ShareConfig::default());
        let t = session.targets();
        assert_eq!(
            summary,
            format!(
                "Practice Quordle\n1️⃣🟥 {} - {}\n🟥🟥 {} - {}\nquordle.com",
                t[0].to_uppercase(),
                t[1].to_uppercase(),
                t[2].to_uppercase(),
                t[3].to_uppercase()
            )
        );

        let text = share_text(GameMode::Practice, &session, &ShareConfig::default());
        // Unsolved pairs show all nine rows each, plus the blank separator.
        assert_eq!(text.lines().count(), 4 + 9 + 1 + 9);
        assert!(text.starts_with(&summary));
        let first_pair_second_row = text.lines().nth(5).unwrap();
        assert!(first_pair_second_row.starts_with("⬛⬛⬛⬛⬛ "));
    }

    #[test]
    fn test_custom_config() {
        let session = Session::new(1, bank()).unwrap();
        let config = ShareConfig {
            title: "Quad".to_string(),
            site: "example.org".to_string(),
        };
        let summary = share_summary(GameMode::Daily, &session, &config);
        assert_eq!(summary, "Daily Quad #1\n🟥🟥\n🟥🟥\nexample.org");
    }
}
