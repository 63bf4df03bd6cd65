use shared::error::{ApiError, ErrorCode};
use thiserror::Error;

/// Any failure of a remote call. Callers above the transport treat all
/// variants alike; the distinction only feeds logging and redirects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestFailure {
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response payload: {0}")]
    Decode(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl RequestFailure {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestFailure::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_bad_request(&self) -> bool {
        self.status() == Some(400)
    }

    /// The failure as shown to the user by a component.
    pub fn to_api_error(&self) -> ApiError {
        match self {
            RequestFailure::Status { status, body } => ApiError::from_status(*status, body.clone()),
            RequestFailure::Transport(_) => ApiError::new(ErrorCode::Connector, self.to_string()),
            RequestFailure::Decode(_) | RequestFailure::InvalidUrl(_) => {
                ApiError::new(ErrorCode::Internal, self.to_string())
            }
        }
    }
}

impl From<url::ParseError> for RequestFailure {
    fn from(value: url::ParseError) -> Self {
        RequestFailure::InvalidUrl(value.to_string())
    }
}

impl From<serde_json::Error> for RequestFailure {
    fn from(value: serde_json::Error) -> Self {
        RequestFailure::Decode(value.to_string())
    }
}
