//! # quiz-web
//!
//! A randomized multiple-choice quiz served over HTTP.
//!
//! Every `GET /` draws a fresh sample from a CSV question bank and renders
//! it as a form. The form carries each question's answers in hidden
//! fields, so `POST /` can grade the submission without any server-side
//! session.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_web::{QuizConfig, QuizError, QuizServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let config = QuizConfig::new("questions.csv");
//!     QuizServer::new(config)?.run().await
//! }
//! ```

mod config;
mod data;
mod models;
pub mod protocol;
mod server;
mod ui;

use std::sync::Arc;

pub use config::{ConfigError, QuizConfig, DEFAULT_PORT};
pub use data::{
    load_question_bank, load_questions, sample_questions, LoadError, DEFAULT_QUESTIONS_PATH,
};
pub use models::{
    calculate_percentage, classify_option, GradeReport, OptionState, Question, QuestionResult,
    RawQuestion,
};
pub use server::{grade, routes};

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Invalid configuration.
    Config(ConfigError),
    /// The HTTP server could not start.
    Server(warp::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Config(e) => write!(f, "Invalid configuration: {}", e),
            QuizError::Server(e) => write!(f, "Server error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Config(e) => Some(e),
            QuizError::Server(e) => Some(e),
        }
    }
}

impl From<ConfigError> for QuizError {
    fn from(err: ConfigError) -> Self {
        QuizError::Config(err)
    }
}

impl From<warp::Error> for QuizError {
    fn from(err: warp::Error) -> Self {
        QuizError::Server(err)
    }
}

/// A configured quiz server.
///
/// Holds nothing but the validated configuration; requests share no
/// mutable state.
pub struct QuizServer {
    config: Arc<QuizConfig>,
}

impl QuizServer {
    /// Validate `config` and build a server from it.
    pub fn new(config: QuizConfig) -> Result<Self, QuizError> {
        let config = config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &QuizConfig {
        &self.config
    }

    /// Validated configuration, ready to hand to [`routes`] when embedding
    /// the quiz in another warp server.
    pub fn shared_config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    /// Bind to the configured address and serve until Ctrl-C.
    pub async fn run(self) -> Result<(), QuizError> {
        server::run(self.config).await
    }
}
