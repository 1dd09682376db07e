// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Request/response interceptor pipeline
//!
//! Interceptors attach cross-cutting behavior (auth injection, logging,
//! retry, response shaping) around every HTTP call without coupling callers
//! to the transport.

mod builtin;
mod chain;

pub use builtin::{AuthHeaderInjector, HeaderEntry, RequestLogger};
pub use chain::InterceptorChain;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::http::{RequestConfig, Response};

/// A set of hooks invoked around outgoing requests and incoming
/// responses/errors
///
/// Every hook has a default no-op implementation; implement only the ones
/// you need. Hooks may suspend (e.g. to await a token refresh) and are
/// always awaited in sequence, never concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use weft::{Interceptor, RequestConfig, Result};
/// use async_trait::async_trait;
///
/// struct ApiKey(String);
///
/// #[async_trait]
/// impl Interceptor for ApiKey {
///     async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig> {
///         Ok(config.header("x-api-key", &self.0))
///     }
/// }
/// ```
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Called before a request is dispatched
    ///
    /// Returns the config used by subsequent interceptors and, finally, the
    /// transport. An `Err` aborts the request; request-side errors are not
    /// recoverable.
    async fn on_request(&self, config: RequestConfig) -> Result<RequestConfig> {
        Ok(config)
    }

    /// Called when request construction fails, for side effects only
    ///
    /// Runs for every interceptor in registration order; the original error
    /// propagates to the caller regardless.
    async fn on_request_error(&self, _error: &Error) {}

    /// Called after a successful response
    ///
    /// Returns the response seen by subsequent interceptors and, finally,
    /// the caller. An `Err` propagates directly without entering the
    /// recovery pass.
    async fn on_response(&self, response: Response) -> Result<Response> {
        Ok(response)
    }

    /// Called when the dispatched call fails (transport fault or rejected
    /// status)
    ///
    /// `Ok(Some(response))` recovers the call with a substitute result,
    /// short-circuiting remaining interceptors. `Err` replaces the original
    /// error and propagates immediately. `Ok(None)` passes to the next
    /// interceptor.
    async fn on_response_error(&self, _error: &Error) -> Result<Option<Response>> {
        Ok(None)
    }
}
