//! Failures surfaced by the list controller.

use serde_json::Value;
use thiserror::Error;

/// Why a list fetch did not produce a page.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    /// Transport failed before any response arrived.
    #[error("no response from server")]
    NoResponse,

    #[error("{message}")]
    Server { status: u16, message: String },

    /// The body was neither a `{ data, pagination }` envelope nor an array.
    #[error("unexpected data format")]
    UnexpectedFormat,
}

impl FetchError {
    /// Builds a server error from an error response body.
    ///
    /// The message is taken from `message`, then `error`, of a JSON object
    /// body; anything else yields a generic message with the status code.
    pub fn from_error_body(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error"].iter().find_map(|key| {
                    value
                        .get(key)
                        .and_then(Value::as_str)
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .map(str::to_string)
                })
            })
            .unwrap_or_else(|| format!("request failed with status {status}"));

        FetchError::Server { status, message }
    }

    /// Whether retrying the same query may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::NoResponse => true,
            FetchError::Server { status, .. } => *status >= 500,
            FetchError::UnexpectedFormat => false,
        }
    }
}

/// Rejected controller input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ListError {
    #[error("unknown filter `{0}`")]
    UnknownFilter(String),

    #[error("`{value}` is not an option of filter `{filter}`")]
    InvalidFilterValue { filter: String, value: String },

    #[error("unsupported page size {0}")]
    InvalidPageSize(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_message_over_error() {
        let err = FetchError::from_error_body(409, br#"{"message":"En uso","error":"conflict"}"#);
        assert_eq!(
            err,
            FetchError::Server {
                status: 409,
                message: "En uso".into()
            }
        );
    }

    #[test]
    fn falls_back_to_error_field() {
        let err = FetchError::from_error_body(400, br#"{"error":"bad filter"}"#);
        assert_eq!(err.to_string(), "bad filter");
    }

    #[test]
    fn non_json_body_gets_generic_message() {
        let err = FetchError::from_error_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
        assert!(err.is_retryable());
    }

    #[test]
    fn display_strings_match_user_facing_text() {
        assert_eq!(FetchError::NoResponse.to_string(), "no response from server");
        assert_eq!(
            FetchError::UnexpectedFormat.to_string(),
            "unexpected data format"
        );
    }
}
