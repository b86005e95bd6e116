use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal: raised once at startup, before the poll loop exists.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variables are not set: {}", .names.join(", "))]
    Missing { names: Vec<&'static str> },
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Why a decoded API payload was refused before any field was read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedResponse {
    #[error("API response is not a JSON object")]
    NotAnObject,
    #[error("API response has no \"{0}\" key")]
    MissingKey(&'static str),
    #[error("\"homeworks\" in API response is not a list")]
    HomeworksNotAList,
    #[error("\"current_date\" in API response is not an integer timestamp")]
    CurrentDateNotInteger,
}

/// Failure of a single poll cycle. All variants are retried on the next period.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("review API request failed: {0}")]
    Transport(#[source] BoxError),
    #[error("review API answered with status {0} instead of 200")]
    UnexpectedStatus(u16),
    #[error(transparent)]
    Malformed(#[from] MalformedResponse),
    #[error("homework record has no \"{0}\" key")]
    MissingField(&'static str),
    #[error("unknown homework status {0:?}")]
    UnknownStatus(String),
}

impl CycleError {
    pub fn transport(err: impl Into<BoxError>) -> Self {
        Self::Transport(err.into())
    }
}

/// Delivery to the chat failed. Never leaves the notifier.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("chat API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("chat API rejected the message ({status}): {description}")]
    Rejected { status: u16, description: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_lists_every_name() {
        let err = ConfigError::Missing {
            names: vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"],
        };
        assert_eq!(
            err.to_string(),
            "required environment variables are not set: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn malformed_response_is_shown_verbatim_in_cycle_errors() {
        let err = CycleError::from(MalformedResponse::MissingKey("current_date"));
        assert_eq!(err.to_string(), "API response has no \"current_date\" key");
    }

    #[test]
    fn status_code_is_carried_in_the_message() {
        let err = CycleError::UnexpectedStatus(503);
        assert_eq!(err.to_string(), "review API answered with status 503 instead of 200");
    }
}
