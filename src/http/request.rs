// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration passed through the interceptor pipeline

use std::collections::HashMap;
use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde::Serialize;

use crate::error::Result;

/// Mutable request parameters
///
/// Each `on_request` hook receives ownership of the working config and
/// returns the (possibly replaced) config used by subsequent hooks, so the
/// final dispatched request reflects every interceptor in registration
/// order. The target may be an absolute URL or a path joined against the
/// client's base URL at dispatch time.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Request method
    pub method: Method,
    /// Absolute URL or path relative to the client base URL
    pub target: String,
    /// Request headers
    pub headers: HeaderMap,
    /// Query pairs appended to the resolved URL
    pub query: Vec<(String, String)>,
    /// Request body
    pub body: Option<Bytes>,
    /// Per-call timeout override
    pub timeout: Option<Duration>,
    /// First header that failed name/value conversion; surfaced as a
    /// request-construction error at dispatch
    invalid_header: Option<String>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: HeaderMap::new(),
            query: Vec::new(),
            body: None,
            timeout: None,
            invalid_header: None,
        }
    }

    /// Create a GET request config
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    /// Create a POST request config
    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::POST, target)
    }

    /// Set a header
    ///
    /// An invalid name or value marks the config malformed; the client
    /// raises it as a request-construction error at dispatch, after every
    /// `on_request_error` hook has observed it.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => {
                if self.invalid_header.is_none() {
                    self.invalid_header = Some(name.as_ref().to_string());
                }
            }
        }
        self
    }

    /// First header that failed conversion, if any
    pub fn invalid_header(&self) -> Option<&str> {
        self.invalid_header.as_deref()
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Add a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set the request body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let json = serde_json::to_vec(data)?;
        self.body = Some(Bytes::from(json));
        self = self.header("content-type", "application/json");
        Ok(self)
    }

    /// Set a form-encoded body
    pub fn form(mut self, data: &HashMap<String, String>) -> Self {
        let body: String = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(data.iter())
            .finish();
        self.body = Some(Bytes::from(body));
        self = self.header("content-type", "application/x-www-form-urlencoded");
        self
    }

    /// Set a per-call timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
