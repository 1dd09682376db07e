// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the weft HTTP client
//!
//! Two failure families matter to the interceptor pipeline: request
//! construction (never recoverable by interceptors) and response errors
//! (recoverable via `on_response_error`). The variants carry enough
//! context (URL, status, body) for hooks to decide what to do.

use thiserror::Error;

/// Result type alias for weft operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the weft HTTP client
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Response status rejected by the validation predicate
    #[error("HTTP status {status} for {url}")]
    Status {
        status: u16,
        url: String,
        body: bytes::Bytes,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error (bad header, bad base URL, bad timeout)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An interceptor rejected the request or raised during recovery
    #[error("Interceptor error: {0}")]
    Interceptor(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Create an interceptor error
    pub fn interceptor<S: Into<String>>(msg: S) -> Self {
        Error::Interceptor(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Create a status error from a rejected response
    pub fn status(status: u16, url: impl Into<String>, body: bytes::Bytes) -> Self {
        Error::Status {
            status,
            url: url.into(),
            body,
        }
    }

    /// Check if this is a timeout error
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Http(e) if e.is_timeout())
    }

    /// Check if this is a transport-level error
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Status { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Status { status, .. } if (500..600).contains(status))
    }

    /// Check if a retrying interceptor could plausibly recover this
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::Status { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Status { url, .. } => Some(url),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            _ => None,
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
