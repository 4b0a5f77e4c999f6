// src/error.rs

use crate::extractor::PageSchema;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Login failed: {0}")]
    Authentication(String),
    #[error("Page structure changed, rule '{schema}' did not match")]
    ParseFailure {
        schema: PageSchema,
        fragment: String,
    },
    #[error("Could not decode the page from '{url}' as '{encoding}'")]
    Decode { url: String, encoding: String },
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
    #[error("Interrupted by user")]
    UserInterrupt,
    #[error("{0}")] // the message is shown as is
    UserInputError(String),
    #[error("Unexpected error: {0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    pub(crate) fn parse_failure(schema: PageSchema, fragment: &str) -> Self {
        AppError::ParseFailure {
            schema,
            fragment: fragment.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
