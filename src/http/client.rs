// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! HTTP client implementation
//!
//! Owns the interceptor pipeline and applies it around every call:
//! request hooks in registration order before dispatch, response hooks in
//! the same order after, with short-circuit recovery on response errors.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use parking_lot::RwLock;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::config::NetworkConfig;
use super::request::RequestConfig;
use super::response::{Payload, Response};
use crate::error::{Error, Result};
use crate::interceptor::{Interceptor, InterceptorChain};

/// HTTP client with an interceptor pipeline
///
/// Cloning is cheap and shares the interceptor chain and live
/// configuration.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<RwLock<NetworkConfig>>,
    chain: InterceptorChain,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(NetworkConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: NetworkConfig) -> Result<Self> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            config: Arc::new(RwLock::new(config)),
            chain: InterceptorChain::new(),
        })
    }

    /// Get a copy of the current configuration
    pub fn config(&self) -> NetworkConfig {
        self.config.read().clone()
    }

    /// Append an interceptor to the pipeline. No deduplication.
    pub fn add_interceptor(&self, interceptor: Arc<dyn Interceptor>) {
        self.chain.add(interceptor);
    }

    /// Remove the first pointer-equal registration; no-op if absent
    pub fn remove_interceptor(&self, interceptor: &Arc<dyn Interceptor>) {
        self.chain.remove(interceptor);
    }

    /// Number of registered interceptors
    pub fn interceptor_count(&self) -> usize {
        self.chain.len()
    }

    /// Set the base URL; affects subsequent calls, not in-flight ones
    pub fn set_base_url(&self, url: Url) {
        self.config.write().base_url = Some(url);
    }

    /// Set the default timeout; affects subsequent calls, not in-flight ones
    pub fn set_timeout(&self, timeout: Duration) {
        self.config.write().timeout = timeout;
    }

    /// Execute a GET request
    pub async fn get(&self, target: impl Into<String>) -> Result<Response> {
        self.execute(RequestConfig::new(Method::GET, target)).await
    }

    /// Execute a POST request
    pub async fn post(&self, target: impl Into<String>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(RequestConfig::new(Method::POST, target).body(body))
            .await
    }

    /// Execute a PUT request
    pub async fn put(&self, target: impl Into<String>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(RequestConfig::new(Method::PUT, target).body(body))
            .await
    }

    /// Execute a DELETE request
    pub async fn delete(&self, target: impl Into<String>) -> Result<Response> {
        self.execute(RequestConfig::new(Method::DELETE, target))
            .await
    }

    /// Execute a PATCH request
    pub async fn patch(&self, target: impl Into<String>, body: impl Into<Bytes>) -> Result<Response> {
        self.execute(RequestConfig::new(Method::PATCH, target).body(body))
            .await
    }

    /// Execute a GET request and decode the body into a typed payload
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        target: impl Into<String>,
    ) -> Result<Payload<T>> {
        self.get(target).await?.payload()
    }

    /// Execute a POST request with a JSON body and decode the response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        target: impl Into<String>,
        body: &B,
    ) -> Result<Payload<T>> {
        let config = RequestConfig::new(Method::POST, target).json(body)?;
        self.execute(config).await?.payload()
    }

    /// Create a request builder for options-rich calls
    pub fn request(&self, method: Method, target: impl Into<String>) -> RequestBuilder {
        RequestBuilder {
            client: self.clone(),
            config: RequestConfig::new(method, target),
        }
    }

    /// Execute a request through the interceptor pipeline
    ///
    /// The chain is snapshotted at pipeline start; concurrent registration
    /// changes never affect a request already in flight.
    pub async fn execute(&self, config: RequestConfig) -> Result<Response> {
        let cfg = self.config.read().clone();
        let snapshot = self.chain.snapshot();

        // Merge defaults; per-request values win
        let mut working = config;
        for (name, value) in cfg.default_headers.iter() {
            if !working.headers.contains_key(name) {
                working.headers.insert(name.clone(), value.clone());
            }
        }
        if working.timeout.is_none() {
            working.timeout = Some(cfg.timeout);
        }

        // Request hooks, registration order, replace-on-each-step.
        // Request-side failures are not recoverable: every on_request_error
        // hook observes the error, then it propagates verbatim.
        for interceptor in &snapshot {
            working = match interceptor.on_request(working).await {
                Ok(config) => config,
                Err(err) => {
                    notify_request_error(&snapshot, &err).await;
                    return Err(err);
                }
            };
        }

        // A header that failed conversion anywhere (defaults, caller
        // config, or a hook mutation) is a request-construction error;
        // never dispatch with it silently dropped.
        if let Some(name) = cfg.invalid_header().or_else(|| working.invalid_header()) {
            let err = Error::config(format!("invalid name or value for header '{}'", name));
            notify_request_error(&snapshot, &err).await;
            return Err(err);
        }

        let url = match resolve_url(&working.target, cfg.base_url.as_ref(), &working.query) {
            Ok(url) => url,
            Err(err) => {
                notify_request_error(&snapshot, &err).await;
                return Err(err);
            }
        };

        let mut builder = self
            .client
            .request(working.method.clone(), url)
            .headers(working.headers.clone())
            .timeout(working.timeout.unwrap_or(cfg.timeout));

        if let Some(ref body) = working.body {
            builder = builder.body(body.clone());
        }

        let raw = match builder.send().await {
            Ok(raw) => raw,
            Err(err) => return recover(&snapshot, Error::Http(err)).await,
        };

        let status = raw.status();
        let headers = raw.headers().clone();
        let final_url = raw.url().clone();
        let body = match raw.bytes().await {
            Ok(body) => body,
            Err(err) => return recover(&snapshot, Error::Http(err)).await,
        };

        let response = Response::new(status, headers, body, final_url);

        if !(cfg.validate_status)(status) {
            let err = Error::status(status.as_u16(), response.url.as_str(), response.body.clone());
            return recover(&snapshot, err).await;
        }

        // Response hooks, same registration order (not reversed)
        let mut working = response;
        for interceptor in &snapshot {
            working = interceptor.on_response(working).await?;
        }

        Ok(working)
    }
}

/// Resolve the target against the base URL and append query pairs
fn resolve_url(target: &str, base: Option<&Url>, query: &[(String, String)]) -> Result<Url> {
    let mut url = match Url::parse(target) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => match base {
            Some(base) => base.join(target)?,
            None => {
                return Err(Error::config(format!(
                    "relative target '{}' requires a base URL",
                    target
                )))
            }
        },
        Err(err) => return Err(err.into()),
    };

    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    }

    Ok(url)
}

/// Invoke every on_request_error hook in order, for side effects only
async fn notify_request_error(snapshot: &[Arc<dyn Interceptor>], error: &Error) {
    for interceptor in snapshot {
        interceptor.on_request_error(error).await;
    }
}

/// Run the response-error pipeline
///
/// The first hook returning a substitute response ends the chain early; a
/// hook raising a new error replaces the original and propagates
/// immediately. If nobody recovers, the original error surfaces unchanged.
async fn recover(snapshot: &[Arc<dyn Interceptor>], error: Error) -> Result<Response> {
    for interceptor in snapshot {
        match interceptor.on_response_error(&error).await {
            Ok(Some(response)) => {
                tracing::debug!(url = ?error.url(), "Response error recovered by interceptor");
                return Ok(response);
            }
            Ok(None) => continue,
            Err(err) => return Err(err),
        }
    }
    Err(error)
}

/// Builder for executing requests with the client
pub struct RequestBuilder {
    client: HttpClient,
    config: RequestConfig,
}

impl RequestBuilder {
    /// Set a header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        self.config = self.config.header(name, value);
        self
    }

    /// Add a query pair
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config = self.config.query(name, value);
        self
    }

    /// Set the body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.config = self.config.body(body);
        self
    }

    /// Set a JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.config = self.config.json(data)?;
        Ok(self)
    }

    /// Set a per-call timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.timeout(timeout);
        self
    }

    /// Execute the request
    pub async fn send(self) -> Result<Response> {
        self.client.execute(self.config).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use reqwest::header::HeaderMap;
    use reqwest::StatusCode;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    /// Appends its tag to the `x-trace` header on the way out and to the
    /// body on the way back, recording every hook invocation.
    struct Marker {
        tag: &'static str,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Marker {
        fn new(tag: &'static str, calls: Arc<Mutex<Vec<String>>>) -> Arc<dyn Interceptor> {
            Arc::new(Self { tag, calls })
        }
    }

    #[async_trait]
    impl Interceptor for Marker {
        async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig> {
            self.calls.lock().push(format!("req:{}", self.tag));
            let trace = match config.headers.get("x-trace") {
                Some(prev) => format!("{},{}", prev.to_str().unwrap_or(""), self.tag),
                None => self.tag.to_string(),
            };
            Ok(config.header("x-trace", trace))
        }

        async fn on_request_error(&self, _error: &Error) {
            self.calls.lock().push(format!("req_err:{}", self.tag));
        }

        async fn on_response(&self, mut response: Response) -> Result<Response> {
            self.calls.lock().push(format!("resp:{}", self.tag));
            let mut body = response.body.to_vec();
            body.extend_from_slice(self.tag.as_bytes());
            response.body = Bytes::from(body);
            Ok(response)
        }

        async fn on_response_error(&self, _error: &Error) -> Result<Option<Response>> {
            self.calls.lock().push(format!("resp_err:{}", self.tag));
            Ok(None)
        }
    }

    /// Recovers any response error with a fixed substitute response.
    struct Fallback {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Interceptor for Fallback {
        async fn on_response_error(&self, _error: &Error) -> Result<Option<Response>> {
            self.calls.lock().push("fallback".to_string());
            Ok(Some(Response::new(
                StatusCode::OK,
                HeaderMap::new(),
                Bytes::from(r#""fallback""#),
                Url::parse("https://fallback.invalid/").unwrap(),
            )))
        }
    }

    /// Raises a new error from the recovery pass.
    struct Raiser;

    #[async_trait]
    impl Interceptor for Raiser {
        async fn on_response_error(&self, _error: &Error) -> Result<Option<Response>> {
            Err(Error::interceptor("refusing to recover"))
        }
    }

    async fn client_for(server: &MockServer) -> HttpClient {
        HttpClient::with_config(
            NetworkConfig::new().base_url(Url::parse(&server.uri()).unwrap()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_interceptor_adds_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-trace", "a"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("a", calls));

        let response = client.get("/ping").await.unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_request_hooks_run_in_registration_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-trace", "a,b"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("a", calls.clone()));
        client.add_interceptor(Marker::new("b", calls.clone()));

        client.get("/ping").await.unwrap();

        let calls = calls.lock();
        assert_eq!(&calls[..2], &["req:a".to_string(), "req:b".to_string()]);
    }

    #[tokio::test]
    async fn test_response_hooks_same_order_not_reversed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x:"))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("a", calls.clone()));
        client.add_interceptor(Marker::new("b", calls.clone()));

        let response = client.get("/data").await.unwrap();

        // Each hook saw the previous hook's output
        assert_eq!(response.text().unwrap(), "x:ab");
        let calls = calls.lock();
        assert_eq!(
            &calls[2..],
            &["resp:a".to_string(), "resp:b".to_string()]
        );
    }

    #[tokio::test]
    async fn test_recovery_short_circuits_remaining_interceptors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("first", calls.clone()));
        client.add_interceptor(Arc::new(Fallback {
            calls: calls.clone(),
        }));
        client.add_interceptor(Marker::new("after", calls.clone()));

        let response = client.get("/boom").await.unwrap();

        let payload: Payload<String> = response.payload().unwrap();
        assert_eq!(payload.data, "fallback");
        assert_eq!(payload.status, StatusCode::OK);

        let calls = calls.lock();
        // "first" declined, fallback recovered, "after" never entered the
        // error pass
        assert!(calls.contains(&"resp_err:first".to_string()));
        assert!(calls.contains(&"fallback".to_string()));
        assert!(!calls.contains(&"resp_err:after".to_string()));
    }

    #[tokio::test]
    async fn test_unrecovered_error_propagates_original() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("a", calls.clone()));
        client.add_interceptor(Marker::new("b", calls.clone()));

        let err = client.get("/boom").await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
        assert!(err.is_server_error());

        let calls = calls.lock();
        let error_calls: Vec<_> = calls.iter().filter(|c| c.starts_with("resp_err")).collect();
        assert_eq!(error_calls, ["resp_err:a", "resp_err:b"]);
    }

    #[tokio::test]
    async fn test_raising_recovery_hook_replaces_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boom"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Arc::new(Raiser));
        client.add_interceptor(Marker::new("after", calls.clone()));

        let err = client.get("/boom").await.unwrap_err();
        assert!(matches!(err, Error::Interceptor(_)));
        // The raise abandoned the remaining error hooks
        assert!(!calls.lock().iter().any(|c| c.starts_with("resp_err")));
    }

    #[tokio::test]
    async fn test_request_construction_error_notifies_hooks() {
        // No base URL, relative target: fails before dispatch
        let client = HttpClient::new().unwrap();
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Marker::new("a", calls.clone()));

        let err = client.get("/nowhere").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        let calls = calls.lock();
        assert!(calls.contains(&"req_err:a".to_string()));
        // Not recoverable: the error pass never ran
        assert!(!calls.iter().any(|c| c.starts_with("resp_err")));
    }

    #[tokio::test]
    async fn test_invalid_header_from_interceptor_aborts_dispatch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        client.add_interceptor(Arc::new(
            crate::interceptor::AuthHeaderInjector::new().bearer_token("bad\ntoken"),
        ));
        client.add_interceptor(Marker::new("a", calls.clone()));

        let err = client.get("/ping").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        // Observed by the request-error pass, never dispatched
        assert!(calls.lock().contains(&"req_err:a".to_string()));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_default_header_fails_every_call() {
        let server = MockServer::start().await;
        let client = HttpClient::with_config(
            NetworkConfig::new()
                .base_url(Url::parse(&server.uri()).unwrap())
                .header("x-api-key", "bad\nvalue"),
        )
        .unwrap();

        let err = client.get("/ping").await.unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_base_url_affects_subsequent_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        assert!(client.get("/ping").await.is_err());

        client.set_base_url(Url::parse(&server.uri()).unwrap());
        assert!(client.get("/ping").await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_default_headers_merged_per_request_wins() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-api-key", "override"))
            .and(header("x-client", "weft"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = HttpClient::with_config(
            NetworkConfig::new()
                .base_url(Url::parse(&server.uri()).unwrap())
                .header("x-api-key", "default")
                .header("x-client", "weft"),
        )
        .unwrap();

        let response = client
            .request(Method::GET, "/ping")
            .header("x-api-key", "override")
            .send()
            .await
            .unwrap();
        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_custom_validate_status_skips_error_pipeline() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = HttpClient::with_config(
            NetworkConfig::new()
                .base_url(Url::parse(&server.uri()).unwrap())
                .validate_status(|s| s.as_u16() < 500),
        )
        .unwrap();

        let response = client.get("/missing").await.unwrap();
        assert_eq!(response.status_code(), 404);
    }

    #[tokio::test]
    async fn test_typed_payload_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 7})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let payload: Payload<serde_json::Value> = client
            .post_json("/users", &serde_json::json!({"name": "ada"}))
            .await
            .unwrap();

        assert_eq!(payload.status, StatusCode::CREATED);
        assert_eq!(payload.data["id"], 7);
    }

    #[tokio::test]
    async fn test_remove_interceptor_takes_first_occurrence() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ping"))
            .and(header("x-trace", "a"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let client = client_for(&server).await;
        let calls = Arc::new(Mutex::new(Vec::new()));
        let a = Marker::new("a", calls.clone());
        client.add_interceptor(a.clone());
        client.add_interceptor(a.clone());
        assert_eq!(client.interceptor_count(), 2);

        client.remove_interceptor(&a);
        assert_eq!(client.interceptor_count(), 1);

        // The surviving duplicate still stamps the header
        client.get("/ping").await.unwrap();
    }
}
