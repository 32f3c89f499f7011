#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Environment variable {0} not set error")]
    EnvironmentVariableNotSetError(String),
    #[error("File read error, {0}")]
    FileReadError(String),
    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Url parse error: {0}")]
    UrlParseError(#[from] url::ParseError),
    #[error("Serde json error")]
    SerdejsonError(#[from] serde_json::Error),
    #[error("External service error, {0}")]
    ExternalServiceError(String),
    #[error("Validation error, {0}")]
    ValidationError(String),
    #[error("Validation errors, {0}")]
    ValidatorValidationErrors(#[from] validator::ValidationErrors),
    #[error("{0}")]
    NotFoundError(String),
    #[error("IO error, {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// User-facing message for the listing page. The external-service variant
    /// already carries the server-provided message when one was present in the
    /// error body; everything else collapses to a generic retry hint.
    pub fn user_message(&self) -> String {
        match self {
            Self::ExternalServiceError(message) => message.clone(),
            Self::Request(_) => "Unable to load listings. Please try again.".to_string(),
            Self::NotFoundError(message) => message.clone(),
            Self::ValidationError(message) => message.clone(),
            Self::ValidatorValidationErrors(errors) => errors.to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }
}
