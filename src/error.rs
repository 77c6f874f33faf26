//! Error handling for the ATS analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsError>;

impl AtsError {
    /// Message suitable for showing to the person who supplied the input.
    pub fn user_message(&self) -> String {
        match self {
            AtsError::UnsupportedFileType(_) => {
                "Please upload a supported format (TXT, PDF, DOC or DOCX)".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<askama::Error> for AtsError {
    fn from(err: askama::Error) -> Self {
        AtsError::OutputFormatting(err.to_string())
    }
}

impl From<toml::de::Error> for AtsError {
    fn from(err: toml::de::Error) -> Self {
        AtsError::Configuration(format!("Failed to parse config: {}", err))
    }
}
