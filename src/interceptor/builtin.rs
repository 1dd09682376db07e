// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Ready-made interceptors for common cross-cutting concerns

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{headers, RequestConfig, Response};

use super::Interceptor;

/// Header entry for request modification
#[derive(Debug, Clone)]
pub struct HeaderEntry {
    pub name: String,
    pub value: String,
}

impl HeaderEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Auth header injector
///
/// Injects auth headers into every outgoing request, optionally restricted
/// to specific hosts. Relative targets always get the headers (their host is
/// the client's base URL).
pub struct AuthHeaderInjector {
    /// Headers to inject into every request
    headers: Vec<HeaderEntry>,
    /// Hosts to inject into (empty = all)
    hosts: Vec<String>,
}

impl AuthHeaderInjector {
    /// Create a new auth header injector
    pub fn new() -> Self {
        Self {
            headers: Vec::new(),
            hosts: Vec::new(),
        }
    }

    /// Add a bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.headers.push(HeaderEntry::new(
            headers::AUTHORIZATION,
            format!("Bearer {}", token.into()),
        ));
        self
    }

    /// Add basic auth
    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", username, password),
        );
        self.headers.push(HeaderEntry::new(
            headers::AUTHORIZATION,
            format!("Basic {}", encoded),
        ));
        self
    }

    /// Add a custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(HeaderEntry::new(name, value));
        self
    }

    /// Restrict injection to specific hosts
    pub fn for_hosts(mut self, hosts: Vec<String>) -> Self {
        self.hosts = hosts;
        self
    }

    fn should_inject(&self, target: &str) -> bool {
        if self.hosts.is_empty() {
            return true;
        }

        match url::Url::parse(target) {
            // Exact host or subdomain only; substring matches would leak
            // credentials to lookalike hosts
            Ok(url) => url
                .host_str()
                .map(|host| {
                    self.hosts
                        .iter()
                        .any(|h| host == h.as_str() || host.ends_with(&format!(".{}", h)))
                })
                .unwrap_or(false),
            // Relative target; resolved against the client base URL
            Err(_) => true,
        }
    }
}

impl Default for AuthHeaderInjector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Interceptor for AuthHeaderInjector {
    async fn on_request(&self, mut config: RequestConfig) -> Result<RequestConfig> {
        if self.should_inject(&config.target) {
            for header in &self.headers {
                config = config.header(&header.name, &header.value);
            }
        }
        Ok(config)
    }
}

/// Request logger interceptor
///
/// Emits structured tracing events for every request, response, and failure
/// passing through the pipeline.
pub struct RequestLogger {
    /// Log request bodies
    pub log_bodies: bool,
    /// Log response bodies
    pub log_responses: bool,
}

impl Default for RequestLogger {
    fn default() -> Self {
        Self {
            log_bodies: false,
            log_responses: false,
        }
    }
}

#[async_trait]
impl Interceptor for RequestLogger {
    async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig> {
        tracing::info!(
            method = %config.method,
            target = %config.target,
            "Request"
        );

        if self.log_bodies {
            if let Some(ref body) = config.body {
                tracing::debug!(body = ?String::from_utf8_lossy(body), "Request body");
            }
        }

        Ok(config)
    }

    async fn on_request_error(&self, error: &Error) {
        tracing::warn!(error = %error, "Request construction failed");
    }

    async fn on_response(&self, response: Response) -> Result<Response> {
        tracing::info!(
            url = %response.url,
            status = %response.status,
            "Response"
        );

        if self.log_responses {
            tracing::debug!(body = %response.text_lossy(), "Response body");
        }

        Ok(response)
    }

    async fn on_response_error(&self, error: &Error) -> Result<Option<Response>> {
        tracing::warn!(
            error = %error,
            status = ?error.status_code(),
            "Response error"
        );
        Ok(None)
    }
}
