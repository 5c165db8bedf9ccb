//! Form fields exchanged between the quiz page and the grader.
//!
//! The server keeps no session. Everything needed to grade a question
//! travels in hidden inputs that the browser posts back alongside the
//! checkbox selections, keyed by the question's position on the page.

use std::collections::HashMap;

use crate::models::Question;

/// Upper bound on questions per page, and on indices read back on submit.
pub const MAX_QUESTIONS: usize = 50;

/// The per-question inputs on the quiz form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Checkbox selections (`q{i}`), zero or more values.
    Selection,
    /// Correct answers joined by `;` (`answer{i}`).
    Answer,
    /// Question text (`text{i}`).
    Text,
    /// Options as a JSON array of strings (`options{i}`).
    Options,
    /// Integrity tag (`sig{i}`), present only when signing is enabled.
    Signature,
}

impl Field {
    fn prefix(self) -> &'static str {
        match self {
            Field::Selection => "q",
            Field::Answer => "answer",
            Field::Text => "text",
            Field::Options => "options",
            Field::Signature => "sig",
        }
    }

    /// Input name for the question at `index`.
    pub fn name(self, index: usize) -> String {
        format!("{}{}", self.prefix(), index)
    }
}

/// Hidden values rendered for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenFields {
    pub text: String,
    pub answer: String,
    pub options: String,
}

impl HiddenFields {
    pub fn for_question(question: &Question) -> Self {
        Self {
            text: question.text.clone(),
            answer: question.answer_field(),
            options: encode_options(question.visible_options()),
        }
    }
}

/// Encode options for the hidden `options{i}` field.
///
/// A JSON array keeps option text intact whatever characters it holds.
pub fn encode_options<'a>(options: impl IntoIterator<Item = &'a str>) -> String {
    serde_json::Value::from_iter(options).to_string()
}

/// Decode the hidden options field back into the displayed options.
///
/// Returns `None` when the field is not a JSON array of strings.
pub fn split_options(raw: &str) -> Option<Vec<String>> {
    let options: Vec<String> = serde_json::from_str(raw).ok()?;
    Some(
        options
            .iter()
            .map(|opt| opt.trim())
            .filter(|opt| !opt.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// A decoded `application/x-www-form-urlencoded` body.
///
/// Keeps every value of repeated keys, which checkbox groups rely on.
/// Browsers submit line breaks as CRLF; they are folded back to LF so
/// values match what was rendered.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    values: HashMap<String, Vec<String>>,
}

impl FormFields {
    pub fn parse(body: &[u8]) -> Self {
        let mut values: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body).into_owned() {
            values.entry(key).or_default().push(value.replace("\r\n", "\n"));
        }
        Self { values }
    }

    /// All values posted under `name`, in submission order.
    pub fn all(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First value posted under `name`, treating an empty value as absent.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.all(name)
            .first()
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// First value posted under `name`, if any.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.all(name).first().map(String::as_str)
    }
}
