//! Error types for fetching and extracting source pages.
//!
//! [`FetchError`] and [`ExtractError`] mirror the two recovery strategies of
//! the pipeline: a fetch failure only costs one source its contribution, while
//! an extraction failure is fatal for the run. [`RunError`] is everything that
//! can end a run.

use thiserror::Error;

/// Failure to retrieve markup for one source.
///
/// The `Display` text of each variant is the diagnostic printed to the
/// operator.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Failed to retrieve the page. Status code: {status}")]
    Status { status: u16 },

    #[error("An error occurred while fetching the page: {message}")]
    Transport { message: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Failure to turn markup into article records.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Malformed publish date {value:?}: expected an ISO-8601 timestamp")]
    MalformedDate { value: String },

    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),
}

/// Failure that ends a whole run.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("Failed to write progress output: {0}")]
    Progress(#[from] std::io::Error),

    #[error("Failed to serialize digest: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_diagnostic() {
        let err = FetchError::Status { status: 404 };
        assert_eq!(err.to_string(), "Failed to retrieve the page. Status code: 404");
    }

    #[test]
    fn test_transport_diagnostic() {
        let err = FetchError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "An error occurred while fetching the page: connection refused"
        );
    }

    #[test]
    fn test_base_url_conversion() {
        let parse_err = url::Url::parse("not a url").unwrap_err();
        let err: ExtractError = parse_err.into();
        assert!(matches!(err, ExtractError::BaseUrl(_)));
    }

    #[test]
    fn test_run_error_keeps_extract_message() {
        let err: RunError = ExtractError::MalformedDate {
            value: "soon".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Malformed publish date \"soon\": expected an ISO-8601 timestamp"
        );
    }
}
