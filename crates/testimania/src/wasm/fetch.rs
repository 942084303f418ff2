//! `fetch`-backed transport

use std::time::Duration;

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortSignal, RequestInit, RequestMode, Response};

use crate::error::LoadError;
use crate::loader::{Transport, TransportResponse};

/// [`Transport`] over the browser's `fetch`, bounded by `AbortSignal.timeout`
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl FetchTransport {
    /// Creates the transport
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// Message of a rejected promise
fn js_message(value: &JsValue) -> String {
    js_sys::Reflect::get(value, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "fetch failed".to_string())
}

fn is_timeout(value: &JsValue) -> bool {
    js_sys::Reflect::get(value, &JsValue::from_str("name"))
        .ok()
        .and_then(|n| n.as_string())
        .is_some_and(|name| name == "TimeoutError" || name == "AbortError")
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, LoadError> {
        let ms = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let map_err = |err: JsValue| {
            if is_timeout(&err) {
                LoadError::Timeout { ms: u64::from(ms) }
            } else {
                LoadError::transport(js_message(&err))
            }
        };

        let window = web_sys::window().ok_or_else(|| LoadError::transport("no window"))?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_mode(RequestMode::Cors);
        init.set_signal(Some(&AbortSignal::timeout_with_u32(ms)));

        let response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
            .await
            .map_err(map_err)?;
        let response: Response = response
            .dyn_into()
            .map_err(|_| LoadError::transport("fetch did not resolve to a Response"))?;
        let status = response.status();

        let text = JsFuture::from(response.text().map_err(map_err)?)
            .await
            .map_err(map_err)?;
        Ok(TransportResponse::new(
            status,
            text.as_string().unwrap_or_default().into_bytes(),
        ))
    }
}
