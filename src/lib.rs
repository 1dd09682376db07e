// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! # Weft - Pluggable HTTP Client with Interceptor Pipeline
//!
//! Issue HTTP verbs through a uniform contract while attaching
//! cross-cutting behaviors (auth injection, logging, retry, response
//! shaping) as ordered interceptors, without coupling callers to a
//! specific transport.
//!
//! ## Features
//!
//! - Interceptor pipeline: request hooks in registration order outbound,
//!   response hooks in the same order inbound
//! - Short-circuit recovery: any `on_response_error` hook may substitute a
//!   successful result, ending the chain early
//! - Live configuration: base URL and timeout mutable between calls
//! - Capability-checked facade: [`NetworkManager`] wraps any
//!   [`Transport`], with management calls downgrading to logged no-ops on
//!   verb-only transports
//! - Copy-on-write snapshots: concurrent add/remove never affects a
//!   request already in flight
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use weft::{create_manager, AuthHeaderInjector, HttpClient, Interceptor, NetworkConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpClient::with_config(
//!         NetworkConfig::new().base_url("https://api.example.com".parse()?),
//!     )?;
//!
//!     let auth: Arc<dyn Interceptor> =
//!         Arc::new(AuthHeaderInjector::new().bearer_token("token"));
//!     let manager = create_manager(Arc::new(client), [auth]);
//!
//!     let users = manager.get("/users").await?;
//!     println!("{} -> {}", users.status, users.text_lossy());
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod http;
pub mod interceptor;
pub mod manager;

use std::sync::Arc;

// Re-exports for convenience

pub use error::{Error, Result};
pub use http::{HttpClient, NetworkConfig, Payload, RequestConfig, Response};
pub use interceptor::{AuthHeaderInjector, Interceptor, InterceptorChain, RequestLogger};
pub use manager::{NetworkManager, Transport, TransportControls};

/// Create a [`NetworkManager`] over a transport, registering a starting
/// interceptor set
///
/// Interceptors are registered in iteration order; on a transport without
/// controls they are silently skipped (the manager's management contract).
pub fn create_manager(
    transport: Arc<dyn Transport>,
    interceptors: impl IntoIterator<Item = Arc<dyn Interceptor>>,
) -> NetworkManager {
    let manager = NetworkManager::new(transport);
    for interceptor in interceptors {
        manager.add_interceptor(interceptor);
    }
    manager
}
