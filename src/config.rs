//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::data::DEFAULT_QUESTIONS_PATH;
use crate::protocol::{SigningKey, MAX_QUESTIONS};

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

/// Everything the server needs, fixed at startup.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    /// CSV (or `.json`) file read on every quiz request.
    pub questions_path: PathBuf,
    pub addr: SocketAddr,
    /// Questions per quiz, at most [`MAX_QUESTIONS`].
    pub sample_size: usize,
    /// Enables integrity tags on hidden fields.
    pub signing_key: Option<SigningKey>,
}

impl QuizConfig {
    pub fn new(questions_path: impl Into<PathBuf>) -> Self {
        Self {
            questions_path: questions_path.into(),
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            sample_size: MAX_QUESTIONS,
            signing_key: None,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    pub fn with_signing_key(mut self, key: SigningKey) -> Self {
        self.signing_key = Some(key);
        self
    }

    /// Reject unusable settings and clamp the sample size.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.sample_size == 0 {
            return Err(ConfigError::ZeroSampleSize);
        }
        self.sample_size = self.sample_size.min(MAX_QUESTIONS);
        Ok(self)
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::new(DEFAULT_QUESTIONS_PATH)
    }
}

/// Invalid server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    ZeroSampleSize,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ZeroSampleSize => write!(f, "sample size must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuizConfig::default();
        assert_eq!(config.questions_path, PathBuf::from("questions.csv"));
        assert_eq!(config.addr.port(), DEFAULT_PORT);
        assert_eq!(config.sample_size, 50);
        assert!(config.signing_key.is_none());
    }

    #[test]
    fn test_validate_clamps_sample_size() {
        let config = QuizConfig::default().with_sample_size(500).validate().unwrap();
        assert_eq!(config.sample_size, MAX_QUESTIONS);

        let config = QuizConfig::default().with_sample_size(10).validate().unwrap();
        assert_eq!(config.sample_size, 10);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let err = QuizConfig::default().with_sample_size(0).validate().unwrap_err();
        assert_eq!(err, ConfigError::ZeroSampleSize);
    }
}
