//! Command handlers - extracted from main.rs for testability
//!
//! Handlers build their output and return it; main.rs decides where it goes.

pub mod render;
pub mod serve;
pub mod snippet;

pub use render::{execute_render, load_fixtures, RenderReport};
pub use serve::execute_serve;
pub use snippet::execute_snippet;
