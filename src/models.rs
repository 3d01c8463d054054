use serde::{Deserialize, Serialize};

/// A multiple-choice question as stored in a question collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "questions")]
    pub prompt: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], answer: &str) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        }
    }

    /// A question is playable when it has options and the answer is one of them.
    pub fn is_valid(&self) -> bool {
        !self.options.is_empty() && self.options.iter().any(|o| o == &self.answer)
    }

    pub fn is_correct(&self, option: &str) -> bool {
        self.answer == option
    }
}

/// Positional label for an option: 0 -> 'A', 1 -> 'B', ...
pub fn option_label(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

/// Position of an option given its label, case-insensitive.
pub fn label_index(label: char) -> Option<usize> {
    let upper = label.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        Some((upper as u8 - b'A') as usize)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    InProgress,
    ShowingSummary,
    ConfirmingExit,
}

/// How the one-second tick is presented and whether it enforces a deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TimerPolicy {
    /// Unbounded up-counting display of the session's elapsed time.
    #[default]
    Elapsed,
    /// Per-question countdown; on expiry an empty answer is submitted.
    Countdown { seconds: u64 },
}

pub const DEFAULT_COUNTDOWN_SECS: u64 = 60;

/// Which screen the terminal shell is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    Quiz,
}
