// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Network manager facade
//!
//! Presents one fixed contract over any transport-shaped dependency.
//! Verb calls delegate 1:1; management calls apply only when the transport
//! exposes the controls capability, and report whether they did.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::Result;
use crate::http::{HttpClient, Payload, RequestConfig, Response};
use crate::interceptor::Interceptor;

/// Minimal transport capability: perform HTTP verbs
///
/// Only `execute` is required; the verb methods have default
/// implementations in terms of it. Interceptor and configuration
/// management is a separate, optional capability (see
/// [`TransportControls`]).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute a generic request
    async fn execute(&self, config: RequestConfig) -> Result<Response>;

    /// Execute a GET request
    async fn get(&self, target: &str) -> Result<Response> {
        self.execute(RequestConfig::new(Method::GET, target)).await
    }

    /// Execute a POST request
    async fn post(&self, target: &str, body: Bytes) -> Result<Response> {
        self.execute(RequestConfig::new(Method::POST, target).body(body))
            .await
    }

    /// Execute a PUT request
    async fn put(&self, target: &str, body: Bytes) -> Result<Response> {
        self.execute(RequestConfig::new(Method::PUT, target).body(body))
            .await
    }

    /// Execute a DELETE request
    async fn delete(&self, target: &str) -> Result<Response> {
        self.execute(RequestConfig::new(Method::DELETE, target))
            .await
    }

    /// Execute a PATCH request
    async fn patch(&self, target: &str, body: Bytes) -> Result<Response> {
        self.execute(RequestConfig::new(Method::PATCH, target).body(body))
            .await
    }

    /// Management capability, if this transport has one
    ///
    /// Defaults to `None`: a minimal verb-only transport needs no adapter
    /// boilerplate to be wrapped by [`NetworkManager`].
    fn controls(&self) -> Option<&dyn TransportControls> {
        None
    }
}

/// Optional transport management capability
pub trait TransportControls: Send + Sync {
    /// Append an interceptor
    fn add_interceptor(&self, interceptor: Arc<dyn Interceptor>);

    /// Remove the first pointer-equal registration
    fn remove_interceptor(&self, interceptor: &Arc<dyn Interceptor>);

    /// Set the base URL for subsequent calls
    fn set_base_url(&self, url: Url);

    /// Set the default timeout for subsequent calls
    fn set_timeout(&self, timeout: Duration);
}

#[async_trait]
impl Transport for HttpClient {
    async fn execute(&self, config: RequestConfig) -> Result<Response> {
        HttpClient::execute(self, config).await
    }

    fn controls(&self) -> Option<&dyn TransportControls> {
        Some(self)
    }
}

impl TransportControls for HttpClient {
    fn add_interceptor(&self, interceptor: Arc<dyn Interceptor>) {
        HttpClient::add_interceptor(self, interceptor);
    }

    fn remove_interceptor(&self, interceptor: &Arc<dyn Interceptor>) {
        HttpClient::remove_interceptor(self, interceptor);
    }

    fn set_base_url(&self, url: Url) {
        HttpClient::set_base_url(self, url);
    }

    fn set_timeout(&self, timeout: Duration) {
        HttpClient::set_timeout(self, timeout);
    }
}

/// Facade over a transport-shaped dependency
///
/// Built once over a fixed transport; the dependency is not swappable
/// after construction. Management calls on a controls-less transport are
/// logged no-ops that return `false`, never errors.
#[derive(Clone)]
pub struct NetworkManager {
    transport: Arc<dyn Transport>,
}

impl NetworkManager {
    /// Create a manager over a transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Execute a GET request
    pub async fn get(&self, target: &str) -> Result<Response> {
        self.transport.get(target).await
    }

    /// Execute a POST request
    pub async fn post(&self, target: &str, body: impl Into<Bytes>) -> Result<Response> {
        self.transport.post(target, body.into()).await
    }

    /// Execute a PUT request
    pub async fn put(&self, target: &str, body: impl Into<Bytes>) -> Result<Response> {
        self.transport.put(target, body.into()).await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, target: &str) -> Result<Response> {
        self.transport.delete(target).await
    }

    /// Execute a PATCH request
    pub async fn patch(&self, target: &str, body: impl Into<Bytes>) -> Result<Response> {
        self.transport.patch(target, body.into()).await
    }

    /// Execute a generic request
    pub async fn execute(&self, config: RequestConfig) -> Result<Response> {
        self.transport.execute(config).await
    }

    /// Execute a GET request and decode the body into a typed payload
    pub async fn get_json<T: DeserializeOwned>(&self, target: &str) -> Result<Payload<T>> {
        self.get(target).await?.payload()
    }

    /// Execute a POST request with a JSON body and decode the response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        target: &str,
        body: &B,
    ) -> Result<Payload<T>> {
        let config = RequestConfig::new(Method::POST, target).json(body)?;
        self.execute(config).await?.payload()
    }

    /// Append an interceptor; returns whether the transport accepted it
    pub fn add_interceptor(&self, interceptor: Arc<dyn Interceptor>) -> bool {
        match self.transport.controls() {
            Some(controls) => {
                controls.add_interceptor(interceptor);
                true
            }
            None => {
                tracing::debug!(op = "add_interceptor", "transport exposes no controls; ignored");
                false
            }
        }
    }

    /// Remove an interceptor; returns whether the transport accepted it
    pub fn remove_interceptor(&self, interceptor: &Arc<dyn Interceptor>) -> bool {
        match self.transport.controls() {
            Some(controls) => {
                controls.remove_interceptor(interceptor);
                true
            }
            None => {
                tracing::debug!(
                    op = "remove_interceptor",
                    "transport exposes no controls; ignored"
                );
                false
            }
        }
    }

    /// Set the base URL; returns whether the transport accepted it
    pub fn set_base_url(&self, url: Url) -> bool {
        match self.transport.controls() {
            Some(controls) => {
                controls.set_base_url(url);
                true
            }
            None => {
                tracing::debug!(op = "set_base_url", "transport exposes no controls; ignored");
                false
            }
        }
    }

    /// Set the default timeout; returns whether the transport accepted it
    pub fn set_timeout(&self, timeout: Duration) -> bool {
        match self.transport.controls() {
            Some(controls) => {
                controls.set_timeout(timeout);
                true
            }
            None => {
                tracing::debug!(op = "set_timeout", "transport exposes no controls; ignored");
                false
            }
        }
    }
}
