use std::fmt;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum Error {
    /// Session could not be renewed; the expiry handler has already run.
    SessionExpired,
    /// Non-2xx response carrying a JSON `message` or `error` field.
    Server { status: StatusCode, message: String },
    /// Non-2xx response without a structured message.
    Http { status: StatusCode, message: String },
    Transport(reqwest::Error),
    Json(serde_json::Error),
    Io(std::io::Error),
    Config(String),
}

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired";

impl Error {
    /// Human-readable text suitable for direct display.
    pub fn message(&self) -> String {
        match self {
            Error::SessionExpired => SESSION_EXPIRED_MESSAGE.to_string(),
            Error::Server { message, .. } | Error::Http { message, .. } => message.clone(),
            Error::Transport(err) => err.to_string(),
            Error::Json(err) => err.to_string(),
            Error::Io(err) => err.to_string(),
            Error::Config(msg) => msg.clone(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Server { status, .. } | Error::Http { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self, Error::SessionExpired)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err)
    }
}
