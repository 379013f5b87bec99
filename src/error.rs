// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssistantError>;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Text extraction failed for {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("Provider request failed: {0}")]
    Provider(String),

    #[error("Response stream failed: {0}")]
    Stream(String),

    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    #[error("A response is already in flight")]
    Busy,

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
