//! Failure kinds, one enum per failure domain.

use thiserror::Error;

/// Fatal at startup; the poll loop is never entered.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unexpected status code {status} from {endpoint} (from_date={from_date})")]
    UnexpectedStatusCode {
        status: u16,
        endpoint: String,
        from_date: i64,
    },
    #[error("failed to reach the homework API: {0}")]
    Connection(#[from] reqwest::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResponseError {
    #[error("API response is not a JSON object")]
    NotAnObject,
    #[error("API response is missing expected keys: {}", .0.join(", "))]
    MissingExpectedKeys(Vec<&'static str>),
    #[error("`homeworks` in API response is not a list")]
    HomeworksNotAList,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatusError {
    #[error("homework record is not a JSON object")]
    RecordNotAnObject,
    #[error("homework record has no name")]
    MissingName,
    #[error("undocumented homework status: {0}")]
    UnrecognizedStatus(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("failed to send message: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("message rejected with status {status}: {description}")]
    Rejected { status: u16, description: String },
}

/// Anything that can go wrong inside one poll cycle before a message is built.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Status(#[from] StatusError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variables_lists_names() {
        let err = ConfigError::MissingVariables(vec!["TELEGRAM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: TELEGRAM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_poll_error_is_transparent() {
        let err: PollError = StatusError::UnrecognizedStatus("in_review".to_string()).into();
        assert_eq!(err.to_string(), "undocumented homework status: in_review");

        let err: PollError = ApiError::UnexpectedStatusCode {
            status: 500,
            endpoint: "http://localhost/".to_string(),
            from_date: 42,
        }
        .into();
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("from_date=42"));
    }
}
