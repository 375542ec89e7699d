//! Application Context
//!
//! The tracker client and its cache version, provided via Leptos Context API.

use std::sync::Arc;

use leptos::prelude::*;
use taskboard_core::ClientResult;

use crate::api::ApiClient;

#[derive(Clone, Copy)]
pub struct AppContext {
    client: StoredValue<Arc<ApiClient>>,
    /// Bumped by the client's watcher after every cache change
    cache_version: ReadSignal<u64>,
}

impl AppContext {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (cache_version, set_cache_version) = signal(0u64);
        client.watch(Arc::new(move || set_cache_version.update(|v| *v += 1)));
        Self {
            client: StoredValue::new(client),
            cache_version,
        }
    }

    pub fn client(&self) -> Arc<ApiClient> {
        self.client.get_value()
    }

    /// Subscribe the current reactive scope to cache changes
    pub fn track_cache(&self) {
        self.cache_version.track();
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

/// Network side of a cache-and-network query
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState {
    Loading,
    Done,
    Failed(String),
}

impl FetchState {
    pub fn settled<T>(result: &ClientResult<T>) -> Self {
        match result {
            Ok(_) => FetchState::Done,
            Err(err) => FetchState::Failed(err.to_string()),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}
