//! Testimania - embeddable testimonial widget
//!
//! A site owner drops a script tag carrying `data-*` attributes next to an
//! element with id `testimania-widget`. From those attributes alone the
//! widget fetches the approved testimonials of one collection, styles itself
//! and renders them as a list, grid, carousel or single card.
//!
//! The pipeline runs the same everywhere; only the [`Host`](host::Host) (the
//! page) and the [`Transport`](loader::Transport) (one HTTP GET) change:
//!
//! - in the browser (`wasm` feature): `BrowserHost` and `FetchTransport`
//! - natively: [`HeadlessHost`](host::HeadlessHost) with
//!   [`HttpTransport`](http::HttpTransport) (`http` feature) or
//!   [`FixtureTransport`](fixture::FixtureTransport)
//!
//! # Example
//!
//! ```rust
//! use testimania::prelude::*;
//!
//! let config = WidgetConfig::new("acme")
//!     .with_layout(Layout::Grid)
//!     .with_max_items(2);
//! let items = vec![
//!     Testimonial::new("Fast and friendly", "Ana").with_rating(5),
//!     Testimonial::new("Would buy again", "Bo").with_rating(4),
//!     Testimonial::new("Solid", "Cy"),
//! ];
//!
//! let kept = truncate(&config, items);
//! let fragment = render(&config, &kept);
//! assert_eq!(fragment.count_by_class("tm-card"), 2);
//! assert!(fragment.to_html().contains("- Ana"));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod carousel;
pub mod config;
pub mod dom;
pub mod error;
pub mod fixture;
pub mod host;
pub mod loader;
pub mod render;
pub mod snippet;
pub mod style;
pub mod widget;

/// Native HTTP transport
#[cfg(all(feature = "http", not(target_arch = "wasm32")))]
pub mod http;

/// Browser bindings
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::carousel::{CarouselController, NavControl};
    pub use crate::config::{
        attr, AttributeSource, CssColor, CssLength, Font, Layout, Shadow, Theme, Token,
        WidgetConfig, RENDER_TARGET_ID,
    };
    pub use crate::dom::{DomElement, Fragment, Node};
    pub use crate::error::{ConfigError, ConfigResult, LoadError};
    pub use crate::fixture::{FixtureStore, FixtureTransport};
    pub use crate::host::{HeadlessHost, Host};
    pub use crate::loader::{load, truncate, LoadOutcome, Testimonial, Transport, TransportResponse};
    pub use crate::render::{render, render_outcome, Fallback};
    pub use crate::snippet::{embed_snippet, DEFAULT_SCRIPT_SRC};
    pub use crate::style::{synthesize, Stylesheet};
    pub use crate::widget::{bootstrap, Mounted};

    #[cfg(all(feature = "http", not(target_arch = "wasm32")))]
    pub use crate::http::HttpTransport;

    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    pub use crate::wasm::{BrowserHost, FetchTransport};
}
