//! Request error taxonomy.

use thiserror::Error;

/// Terminal failure of a dispatched request.
///
/// Exactly one variant (or a successful envelope) results from a call;
/// intermediate re-authentication attempts never surface here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// An empty path was given to URL building.
    #[error("url can't be empty")]
    InvalidPath,

    /// The transport failed or delivered an unreadable response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a status other than 200.
    #[error("server returned HTTP {status}")]
    HttpStatus { status: u16 },

    /// The envelope code is outside the accepted set.
    #[error("business error {code}: {message}")]
    Business { code: i64, message: String },
}

impl RequestError {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestError::InvalidPath => "invalid_path",
            RequestError::Transport(_) => "transport",
            RequestError::HttpStatus { .. } => "http_status",
            RequestError::Business { .. } => "business",
        }
    }
}

/// Result type for dispatched requests.
pub type RequestResult<T> = Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RequestError::HttpStatus { status: 502 };
        assert_eq!(err.to_string(), "server returned HTTP 502");

        let err = RequestError::Business {
            code: 2001,
            message: "stock exhausted".into(),
        };
        assert!(err.to_string().contains("2001"));
        assert_eq!(err.kind(), "business");
    }
}
