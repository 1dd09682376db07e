// Copyright (c) 2026 Weft Labs. All rights reserved.
// This software is proprietary and confidential.

//! Interceptor chain - ordered registration list

use std::sync::Arc;

use parking_lot::RwLock;

use super::Interceptor;

/// Ordered collection of registered interceptors
///
/// Order is exactly registration order: request hooks run in that order on
/// the way out and response hooks run in the same order on the way back
/// (not reversed). Duplicates are allowed; removal takes out the first
/// pointer-equal occurrence.
#[derive(Clone, Default)]
pub struct InterceptorChain {
    interceptors: Arc<RwLock<Vec<Arc<dyn Interceptor>>>>,
}

impl InterceptorChain {
    /// Create a new empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an interceptor. No deduplication.
    pub fn add(&self, interceptor: Arc<dyn Interceptor>) {
        self.interceptors.write().push(interceptor);
    }

    /// Remove the first pointer-equal occurrence; no-op if absent
    pub fn remove(&self, interceptor: &Arc<dyn Interceptor>) {
        let mut interceptors = self.interceptors.write();
        if let Some(index) = interceptors
            .iter()
            .position(|i| Arc::ptr_eq(i, interceptor))
        {
            interceptors.remove(index);
        }
    }

    /// Copy-on-write snapshot of the current registrations
    ///
    /// Every request takes one at pipeline start, so add/remove while a
    /// request is in flight never affects that request.
    pub fn snapshot(&self) -> Vec<Arc<dyn Interceptor>> {
        self.interceptors.read().clone()
    }

    /// Number of registered interceptors
    pub fn len(&self) -> usize {
        self.interceptors.read().len()
    }

    /// Check if the chain is empty
    pub fn is_empty(&self) -> bool {
        self.interceptors.read().is_empty()
    }
}
