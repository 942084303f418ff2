//! Testimonial loading
//!
//! One GET per bootstrap, bounded by the configured timeout, never retried.
//! The fetch ends in exactly one [`LoadOutcome`]; nothing here panics or
//! returns early through an exception path.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::config::{Layout, WidgetConfig};
use crate::error::LoadError;

/// Path of the testimonials endpoint, relative to the API origin
pub const ENDPOINT_PATH: &str = "/api/testimonials";

/// A testimonial record as served by the backend
///
/// Only `content` is required. Other fields tolerate the loose shapes the
/// backend has been seen to send: a null name, a fractional or quoted rating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    /// Star rating, expected 1-5
    #[serde(
        default,
        deserialize_with = "lenient_rating",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<i64>,
    /// Optional headline
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    /// Body text
    pub content: String,
    /// Attribution
    #[serde(default, deserialize_with = "lenient_name")]
    pub client_name: String,
}

/// Numbers are floored, numeric strings parsed, anything else is no rating
fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let floor = |f: f64| f.is_finite().then(|| f.floor() as i64);
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(floor)),
        Value::String(s) => s.trim().parse::<f64>().ok().and_then(floor),
        _ => None,
    })
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn lenient_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

impl Testimonial {
    /// Creates a testimonial with no rating or title
    #[must_use]
    pub fn new(content: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            rating: None,
            title: None,
            content: content.into(),
            client_name: client_name.into(),
        }
    }

    /// Sets the rating
    #[must_use]
    pub const fn with_rating(mut self, rating: i64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Sets the title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Status and body of a completed GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// A response with the given status and body
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Performs the single GET a bootstrap needs.
///
/// Implementations enforce `timeout` themselves and report it as
/// [`LoadError::Timeout`].
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Transport {
    /// Issues a GET for `url`
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, LoadError>;
}

/// Terminal outcome of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// At least one testimonial after truncation
    Loaded(Vec<Testimonial>),
    /// Successful response with nothing to show
    Empty,
    /// Transport error, timeout, non-success status or undecodable body
    Failed(LoadError),
}

impl LoadOutcome {
    /// Testimonials to render; empty unless loaded
    #[must_use]
    pub fn testimonials(&self) -> &[Testimonial] {
        match self {
            Self::Loaded(items) => items,
            Self::Empty | Self::Failed(_) => &[],
        }
    }

    /// Whether the load failed
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Short outcome name for logs
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "loaded",
            Self::Empty => "empty",
            Self::Failed(_) => "failed",
        }
    }
}

/// URL of the testimonials endpoint for a config.
///
/// Relative when the config carries no API origin.
#[must_use]
pub fn endpoint_url(config: &WidgetConfig) -> String {
    format!(
        "{}{ENDPOINT_PATH}?slug={}",
        config.api_base.as_deref().unwrap_or(""),
        urlencoding::encode(&config.collection_id)
    )
}

/// Applies the truncation policy: `single` keeps the first item, every
/// other layout keeps the first `max_items`
#[must_use]
pub fn truncate(config: &WidgetConfig, mut items: Vec<Testimonial>) -> Vec<Testimonial> {
    let keep = match config.layout {
        Layout::Single => 1,
        Layout::List | Layout::Grid | Layout::Carousel => config.max_items as usize,
    };
    items.truncate(keep);
    items
}

/// Decodes a JSON array of records, skipping records that do not decode
pub fn decode_records(body: &[u8]) -> Result<Vec<Testimonial>, LoadError> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(body)?;
    let mut records = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<Testimonial>(value) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(index, error = %err, "skipping malformed testimonial"),
        }
    }
    Ok(records)
}

/// Fetches, decodes and truncates the testimonials for `config`
pub async fn load<T: Transport + ?Sized>(config: &WidgetConfig, transport: &T) -> LoadOutcome {
    let url = endpoint_url(config);
    tracing::debug!(slug = %config.collection_id, url = %url, timeout_ms = config.timeout_ms(), "fetching testimonials");

    let response = match transport.get(&url, config.timeout).await {
        Ok(response) => response,
        Err(err) => return LoadOutcome::Failed(err),
    };
    if !response.is_success() {
        return LoadOutcome::Failed(LoadError::Status {
            status: response.status,
        });
    }

    match decode_records(&response.body) {
        Ok(records) => {
            let records = truncate(config, records);
            if records.is_empty() {
                LoadOutcome::Empty
            } else {
                LoadOutcome::Loaded(records)
            }
        }
        Err(err) => LoadOutcome::Failed(err),
    }
}
