use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Question, RawQuestion};
use crate::protocol::MAX_QUESTIONS;

pub const DEFAULT_QUESTIONS_PATH: &str = "questions.csv";

/// Error raised when the question source cannot be read.
#[derive(Debug)]
pub enum LoadError {
    /// The file is missing or could not be opened.
    Io { path: PathBuf, source: io::Error },
    /// The CSV header could not be read.
    Csv { path: PathBuf, source: csv::Error },
    /// The JSON document is not an array of question objects.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            LoadError::Csv { path, source } => {
                write!(f, "invalid CSV in {}: {}", path.display(), source)
            }
            LoadError::Json { path, source } => {
                write!(f, "invalid JSON in {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
        }
    }
}

/// Load the question bank and draw a random sample of at most
/// `sample_size` questions (never more than [`MAX_QUESTIONS`]).
pub fn load_questions<P: AsRef<Path>>(
    path: P,
    sample_size: usize,
) -> Result<Vec<Question>, LoadError> {
    let bank = load_question_bank(path)?;
    let available = bank.len();
    let sample = sample_questions(bank, sample_size, &mut rand::thread_rng());
    info!("Sampled {} of {} questions", sample.len(), available);
    Ok(sample)
}

/// Load every valid question from `path`, in file order.
///
/// Files ending in `.json` are read as a JSON array; anything else is
/// read as CSV with a header row.
pub fn load_question_bank<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();
    let rows = if is_json(path) {
        read_json_rows(path)?
    } else {
        read_csv_rows(path)?
    };

    let row_count = rows.len();
    let questions: Vec<Question> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| parse_row(index + 1, raw))
        .collect();

    debug!(
        "Loaded {} valid questions from {} rows in {}",
        questions.len(),
        row_count,
        path.display()
    );
    Ok(questions)
}

/// Draw `min(sample_size, MAX_QUESTIONS, questions.len())` questions
/// uniformly without replacement.
pub fn sample_questions<R: Rng + ?Sized>(
    mut questions: Vec<Question>,
    sample_size: usize,
    rng: &mut R,
) -> Vec<Question> {
    let count = sample_size.min(MAX_QUESTIONS).min(questions.len());
    questions.shuffle(rng);
    questions.truncate(count);
    questions
}

fn parse_row(row: usize, raw: RawQuestion) -> Option<Question> {
    let question = Question::from_raw(raw);
    if question.is_none() {
        debug!("Skipping incomplete row {}", row);
    }
    question
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_csv_rows(path: &Path) -> Result<Vec<RawQuestion>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(BufReader::new(open(path)?));

    reader.headers().map_err(|source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<RawQuestion>().enumerate() {
        match record {
            Ok(raw) => rows.push(raw),
            Err(e) => {
                // Keep row numbering aligned with the data rows.
                warn!("Skipping malformed row {} in {}: {}", index + 1, path.display(), e);
                rows.push(RawQuestion::default());
            }
        }
    }

    Ok(rows)
}

fn read_json_rows(path: &Path) -> Result<Vec<RawQuestion>, LoadError> {
    serde_json::from_reader(BufReader::new(open(path)?)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}
