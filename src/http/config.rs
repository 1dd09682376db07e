// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use url::Url;

use super::DEFAULT_TIMEOUT;

/// Status validation predicate type
pub type ValidateStatus = Arc<dyn Fn(StatusCode) -> bool + Send + Sync>;

/// Network configuration for [`HttpClient`](super::HttpClient)
///
/// Base URL and timeout are live-mutable on the client after construction;
/// everything else is fixed.
#[derive(Clone)]
pub struct NetworkConfig {
    /// Base URL that relative targets are joined against
    pub base_url: Option<Url>,
    /// Default timeout for requests without a per-call override
    pub timeout: Duration,
    /// Default headers merged into every request (per-request headers win)
    pub default_headers: HeaderMap,
    /// Predicate deciding whether a status counts as success
    pub validate_status: ValidateStatus,
    /// First default header that failed conversion; surfaced as a
    /// request-construction error on every dispatch
    invalid_header: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            default_headers: HeaderMap::new(),
            validate_status: Arc::new(|status| status.is_success()),
            invalid_header: None,
        }
    }
}

impl NetworkConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the default timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header
    ///
    /// An invalid name or value marks the configuration malformed; every
    /// dispatch through a client carrying it fails as a
    /// request-construction error rather than silently dropping the header.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.default_headers.insert(name, value);
            }
            _ => {
                if self.invalid_header.is_none() {
                    self.invalid_header = Some(name.as_ref().to_string());
                }
            }
        }
        self
    }

    /// First default header that failed conversion, if any
    pub fn invalid_header(&self) -> Option<&str> {
        self.invalid_header.as_deref()
    }

    /// Set the status validation predicate
    pub fn validate_status<F>(mut self, predicate: F) -> Self
    where
        F: Fn(StatusCode) -> bool + Send + Sync + 'static,
    {
        self.validate_status = Arc::new(predicate);
        self
    }
}

impl fmt::Debug for NetworkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkConfig")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("default_headers", &self.default_headers)
            .finish_non_exhaustive()
    }
}
