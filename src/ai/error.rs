//! Generation failures and how they render
//!
//! Every failure still renders to a single human-readable line, so the UI can
//! show success and failure in the same response pane. The [`ErrorKind`] lets
//! callers tell them apart without parsing the text.

use thiserror::Error;

use super::catalog::Provider;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Configuration,
    Provider,
    Transport,
    Parse,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Please enter an email to generate a response.")]
    EmptyInput,

    #[error("An error occurred: unknown model '{0}'")]
    UnknownModel(String),

    #[error("An error occurred: unknown writing style '{0}'")]
    UnknownStyle(String),

    #[error("An error occurred: {0} credentials are not configured")]
    MissingCredentials(Provider),

    /// The provider rejected the call and said why (Bedrock service errors)
    #[error("Error: {message}")]
    ServiceError { status: u16, message: String },

    /// Non-success HTTP response from an OpenAI-compatible API
    #[error("An error occurred: Error code: {status} - {body}")]
    Api { status: u16, body: String },

    #[error("An error occurred: {0}")]
    Transport(String),

    #[error("An error occurred: {0}")]
    Parse(String),
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::EmptyInput => ErrorKind::Validation,
            GenerationError::UnknownModel(_)
            | GenerationError::UnknownStyle(_)
            | GenerationError::MissingCredentials(_) => ErrorKind::Configuration,
            GenerationError::ServiceError { .. } | GenerationError::Api { .. } => {
                ErrorKind::Provider
            }
            GenerationError::Transport(_) => ErrorKind::Transport,
            GenerationError::Parse(_) => ErrorKind::Parse,
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GenerationError::Parse(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

/// Outcome of one generation request
pub type GenerationResult = Result<String, GenerationError>;

/// Render a result as the text shown to the user, whichever arm it is
pub fn display_text(result: &GenerationResult) -> String {
    match result {
        Ok(text) => text.clone(),
        Err(e) => e.to_string(),
    }
}
