use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single request against the XRPC API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({}): {message}", .status.as_u16())]
    Status {
        status: StatusCode,
        code: Option<String>,
        message: String,
    },

    #[error("parse {what} response: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("not authenticated: create a session first")]
    NotAuthenticated,

    #[error("invalid API base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

impl ApiError {
    /// Builds a status error from a failed response body, preferring the
    /// structured `message` over the raw text.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let envelope: ErrorEnvelope = serde_json::from_str(body).unwrap_or_default();
        let message = match envelope.message {
            Some(message) if !message.is_empty() => message,
            _ => body.to_string(),
        };

        ApiError::Status {
            status,
            code: envelope.error,
            message,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors surfaced by the client operations. Which of these end a run is
/// decided by the caller. The wrapped `ApiError` is already part of the
/// message.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("create session: {0}")]
    Auth(ApiError),

    #[error("get follows: {0}")]
    Fetch(ApiError),

    #[error("create list: {0}")]
    CreateList(ApiError),

    #[error("add {subject} to list: {error}")]
    AddMember { subject: String, error: ApiError },
}

impl ClientError {
    pub fn api_error(&self) -> &ApiError {
        match self {
            ClientError::Auth(e) | ClientError::Fetch(e) | ClientError::CreateList(e) => e,
            ClientError::AddMember { error, .. } => error,
        }
    }
}
