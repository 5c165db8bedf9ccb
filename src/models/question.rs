use std::collections::BTreeSet;

use serde::Deserialize;

/// Number of option columns a data source row may carry.
pub const NUM_OPTIONS: usize = 5;

/// Number of leading options every question must fill in.
pub const REQUIRED_OPTIONS: usize = 4;

/// Delimiter between correct answers in the `answer` column.
pub const ANSWER_SEPARATOR: char = ';';

/// A question as it appears in the data source, before validation.
///
/// Every column defaults to empty so a missing `option5` header (or a
/// missing key in a JSON object) reads the same as an empty cell.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawQuestion {
    pub question: String,
    pub option1: String,
    pub option2: String,
    pub option3: String,
    pub option4: String,
    pub option5: String,
    pub answer: String,
}

/// A validated question ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub text: String,
    /// All five option slots, trimmed. Slot 5 may be empty.
    pub options: [String; NUM_OPTIONS],
    pub correct_answers: BTreeSet<String>,
}

impl Question {
    /// Validate a raw row.
    ///
    /// Returns `None` when the question text, any of the first four
    /// options, or the answer set is empty after trimming.
    pub fn from_raw(raw: RawQuestion) -> Option<Self> {
        let text = raw.question.trim().to_string();
        let options = [
            raw.option1.trim().to_string(),
            raw.option2.trim().to_string(),
            raw.option3.trim().to_string(),
            raw.option4.trim().to_string(),
            raw.option5.trim().to_string(),
        ];
        let correct_answers = parse_answer_set(&raw.answer);

        if text.is_empty()
            || options[..REQUIRED_OPTIONS].iter().any(String::is_empty)
            || correct_answers.is_empty()
        {
            return None;
        }

        Some(Self {
            text,
            options,
            correct_answers,
        })
    }

    /// Options that should be shown to the user.
    pub fn visible_options(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .map(String::as_str)
            .filter(|opt| !opt.is_empty())
    }

    /// Correct answers joined back into the `answer` column format.
    pub fn answer_field(&self) -> String {
        join_answer_set(&self.correct_answers)
    }
}

/// Split a `;`-delimited answer field into a set, trimming each piece and
/// dropping empties.
pub fn parse_answer_set(raw: &str) -> BTreeSet<String> {
    raw.split(ANSWER_SEPARATOR)
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_answer_set(answers: &BTreeSet<String>) -> String {
    let sep = ANSWER_SEPARATOR.to_string();
    answers
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(sep.as_str())
}
