// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client layer
//!
//! Provides a lightweight HTTP client over reqwest with live-mutable
//! configuration and a request/response interceptor pipeline applied
//! around every call.

mod client;
mod config;
mod request;
mod response;

pub use client::{HttpClient, RequestBuilder};
pub use config::{NetworkConfig, ValidateStatus};
pub use request::RequestConfig;
pub use response::{Payload, Response};

/// Default request timeout
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Common HTTP headers
pub mod headers {
    pub const ACCEPT: &str = "accept";
    pub const CONTENT_TYPE: &str = "content-type";
    pub const USER_AGENT: &str = "user-agent";
    pub const AUTHORIZATION: &str = "authorization";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}
