//! In-memory testimonial collections
//!
//! Backs the CLI's offline rendering and the development server, and gives
//! tests a transport with real URL handling.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::loader::{Testimonial, Transport, TransportResponse};

/// Testimonials keyed by collection identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FixtureStore {
    collections: BTreeMap<String, Vec<Testimonial>>,
}

impl FixtureStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `{"<slug>": [records...], ...}`
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Adds (or replaces) a collection
    #[must_use]
    pub fn with_collection(mut self, slug: impl Into<String>, items: Vec<Testimonial>) -> Self {
        self.insert(slug, items);
        self
    }

    /// Adds (or replaces) a collection
    pub fn insert(&mut self, slug: impl Into<String>, items: Vec<Testimonial>) {
        self.collections.insert(slug.into(), items);
    }

    /// Records for a collection; unknown collections are empty
    #[must_use]
    pub fn get(&self, slug: &str) -> &[Testimonial] {
        self.collections
            .get(slug)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Known collection identifiers
    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    /// Number of collections
    #[must_use]
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Whether the store has no collections
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

/// Extracts the decoded `slug` query parameter from a URL
#[must_use]
pub fn slug_from_url(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "slug")
        .and_then(|(_, value)| {
            urlencoding::decode(&value.replace('+', " "))
                .ok()
                .map(std::borrow::Cow::into_owned)
        })
}

/// Serves GETs from a [`FixtureStore`]
#[derive(Debug, Clone)]
pub struct FixtureTransport {
    store: Arc<FixtureStore>,
    forced: Option<Result<TransportResponse, LoadError>>,
}

impl FixtureTransport {
    /// Serves the store's collections
    #[must_use]
    pub fn new(store: impl Into<Arc<FixtureStore>>) -> Self {
        Self {
            store: store.into(),
            forced: None,
        }
    }

    /// Answers every request with `status` and an empty body
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.forced = Some(Ok(TransportResponse::new(status, Vec::new())));
        self
    }

    /// Fails every request with `error`
    #[must_use]
    pub fn failing(mut self, error: LoadError) -> Self {
        self.forced = Some(Err(error));
        self
    }

    /// The backing store
    #[must_use]
    pub fn store(&self) -> &FixtureStore {
        &self.store
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for FixtureTransport {
    async fn get(&self, url: &str, _timeout: Duration) -> Result<TransportResponse, LoadError> {
        if let Some(forced) = &self.forced {
            return forced.clone();
        }
        let slug = slug_from_url(url).unwrap_or_default();
        let body = serde_json::to_vec(self.store.get(&slug))?;
        Ok(TransportResponse::new(200, body))
    }
}
