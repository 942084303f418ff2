//! Embed snippet generation
//!
//! Produces the markup a site owner pastes into their page: the render
//! target followed by the script tag carrying the widget attributes.

use std::fmt::Write as _;

use crate::config::{WidgetConfig, RENDER_TARGET_ID};
use crate::dom::escape_attr;

/// Default location of the widget script
pub const DEFAULT_SCRIPT_SRC: &str = "/embed.js";

/// Builds the embed snippet for `config`, loading the widget from `script_src`
#[must_use]
pub fn embed_snippet(config: &WidgetConfig, script_src: &str) -> String {
    let mut out = format!("<div id=\"{RENDER_TARGET_ID}\"></div>\n");
    let _ = write!(out, "<script src=\"{}\"", escape_attr(script_src));
    for (name, value) in config.to_attributes() {
        let _ = write!(out, "\n  {name}=\"{}\"", escape_attr(&value));
    }
    out.push_str("\n  defer></script>\n");
    out
}
