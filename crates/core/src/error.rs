use std::path::PathBuf;

use thiserror::Error;

use crate::{allocation::SectionKey, duration::EpisodeDuration, provider::ProviderError};

#[derive(Error, Debug)]
pub enum DecodedError {
    #[error("Invalid duration: {0}")]
    Duration(#[from] DurationError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid episode plan: {0}")]
    Plan(#[from] PlanError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Failed to create directory {path}: {source}")]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Rejections raised before a duration reaches the allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("duration is missing")]
    Missing,

    #[error("{input:?} is not a whole number of minutes")]
    NotAnInteger { input: String },

    #[error("{minutes} minutes is negative")]
    Negative { minutes: i64 },

    #[error("{minutes} minutes is not one of 15, 30 or 45")]
    NotATier { minutes: u32 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration parsing failed: {0}")]
    ParseFailed(Box<figment::Error>),

    #[error("Invalid {field}: {value}. Must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid {field}: must not be empty")]
    Empty { field: &'static str },

    #[error("Invalid max_tokens: {value}. Must be greater than 0")]
    InvalidMaxTokens { value: u32 },

    #[error("Invalid article length bounds: min {min} is greater than max {max}")]
    InvalidArticleLength { min: usize, max: usize },

    #[error("Invalid log_level: {value:?}. Must be one of off, error, warn, info, debug, trace")]
    InvalidLogLevel { value: String },

    #[error("Invalid duration_minutes: {0}")]
    Duration(#[from] DurationError),
}

/// A deserialized plan that breaks the shape [`allocate`](crate::allocate) guarantees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    #[error("episode topics must not be empty")]
    NoTopics,

    #[error("{field} is {found}, expected {expected} for a {duration} episode")]
    Mismatch {
        field: &'static str,
        duration: EpisodeDuration,
        expected: u32,
        found: u32,
    },

    #[error("main stories must be numbered 1..={expected}, found {found:?}")]
    MainStoryNumbering { expected: u8, found: Vec<u8> },

    #[error("section {0} is missing")]
    MissingSection(SectionKey),

    #[error("section {section} enabled flag disagrees with optional_sections")]
    FlagMismatch { section: SectionKey },

    #[error("duration adjustment targets {adjusted}, plan is {planned}")]
    AdjustmentMismatch {
        adjusted: EpisodeDuration,
        planned: EpisodeDuration,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::ParseFailed(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DecodedError>;
