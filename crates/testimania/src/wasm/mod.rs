//! Browser entry point
//!
//! Compiled for `wasm32` with the `wasm` feature. The module bootstraps the
//! widget once when loaded, against the page's `script[data-slug]` tag and
//! the `#testimania-widget` element.

mod browser;
mod fetch;

use wasm_bindgen::prelude::*;

pub use browser::BrowserHost;
pub use fetch::FetchTransport;

use crate::widget::bootstrap;

/// Starts the widget
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Some(mut host) = BrowserHost::from_window() else {
        web_sys::console::error_1(&"Testimania: no document to render into".into());
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        // Fatal errors are already reported to the console by the bootstrap.
        let _ = bootstrap(&mut host, &FetchTransport::new()).await;
    });
}
