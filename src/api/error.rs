//! Errors returned by the forms API client

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur while talking to the forms API
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS, reset)
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("server returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Server {
        status: StatusCode,
        /// The `error` field of the response body, when the body carried one
        message: Option<String>,
    },

    /// A 2xx response whose body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a user-facing alert: the server's own message when it sent
    /// one, otherwise `fallback`.
    pub fn alert_text(&self, fallback: &str) -> String {
        self.server_message()
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| fallback.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_text_prefers_server_message() {
        let err = ApiError::Server {
            status: StatusCode::BAD_REQUEST,
            message: Some("Invalid email format".to_string()),
        };
        assert_eq!(err.alert_text("Error creating user"), "Invalid email format");
    }

    #[test]
    fn test_alert_text_falls_back_without_message() {
        let err = ApiError::Server {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: None,
        };
        assert_eq!(err.alert_text("Error creating user"), "Error creating user");
    }

    #[test]
    fn test_alert_text_ignores_blank_message() {
        let err = ApiError::Server {
            status: StatusCode::FORBIDDEN,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.alert_text("Error deleting form"), "Error deleting form");
    }

    #[test]
    fn test_decode_error_uses_fallback() {
        let err = ApiError::Decode("missing field `name`".to_string());
        assert!(err.server_message().is_none());
        assert_eq!(err.alert_text("Error loading forms"), "Error loading forms");
    }

    #[test]
    fn test_display_includes_status_and_message() {
        let err = ApiError::Server {
            status: StatusCode::FORBIDDEN,
            message: Some("Unauthorized".to_string()),
        };
        let text = err.to_string();
        assert!(text.contains("403"));
        assert!(text.contains("Unauthorized"));
    }
}
