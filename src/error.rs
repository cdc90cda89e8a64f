use reqwest::StatusCode;
use thiserror::Error;

/// Message shown to the user whenever the directory cannot be loaded. The
/// underlying cause only goes to the log.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load drinks. Please try again later.";

/// Fallback shown when a rejected submission carries no `detail`.
pub const SUBMIT_FAILED_MESSAGE: &str = "Failed to add drink. Please try again.";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("invalid directory payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("could not read directory file: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected drink ({status})")]
    Rejected {
        status: StatusCode,
        detail: Option<String>,
    },
}

impl SubmitError {
    /// Message for the form: the server's `detail` if it sent one.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => SUBMIT_FAILED_MESSAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a drink name")]
    EmptyName,
    #[error("Please add at least one step")]
    NoSteps,
    #[error("A drink is already being submitted")]
    Busy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid backend url {url:?}: {source}")]
    BackendUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("{0} must be greater than zero")]
    ZeroCadence(&'static str),
    #[error("static source selected but no file configured")]
    MissingStaticFile,
}

impl From<ConfigError> for std::io::Error {
    fn from(e: ConfigError) -> Self {
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_submission_prefers_server_detail() {
        let err = SubmitError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: Some("Drink already exists".to_string()),
        };
        assert_eq!(err.user_message(), "Drink already exists");
    }

    #[test]
    fn rejected_submission_without_detail_uses_fallback() {
        let err = SubmitError::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: None,
        };
        assert_eq!(err.user_message(), SUBMIT_FAILED_MESSAGE);

        let blank = SubmitError::Rejected {
            status: StatusCode::BAD_REQUEST,
            detail: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message(), SUBMIT_FAILED_MESSAGE);
    }
}
