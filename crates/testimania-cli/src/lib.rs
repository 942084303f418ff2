//! Testimania CLI library
//!
//! Native tooling around the testimonial widget: headless rendering to HTML,
//! embed snippet generation and a fixture server with live previews.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
pub mod dev_server;
mod error;
pub mod handlers;
pub mod logging;
mod output;

pub use commands::{
    Cli, ColorArg, Commands, LogFormatArg, RenderArgs, ServeArgs, SnippetArgs, WidgetArgs,
};
pub use config::{attribute_name, CliConfig, ColorChoice, LogFormat, Verbosity, WidgetAttributes};
pub use dev_server::{DevServer, DevServerConfig};
pub use error::{CliError, CliResult};
pub use output::{write_output, Reporter};
