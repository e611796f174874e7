use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxFollowupError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Sheet request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Gemini API error: {0}")]
    GeminiError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TaxFollowupError>;
