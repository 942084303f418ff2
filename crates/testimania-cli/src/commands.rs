//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::WidgetAttributes;
use crate::error::CliResult;
use testimania::config::attr;

/// Testimania: render, embed and preview the testimonial widget
#[derive(Parser, Debug)]
#[command(name = "testimania")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the widget headlessly to HTML
    Render(RenderArgs),

    /// Print the embed snippet for a widget config
    Snippet(SnippetArgs),

    /// Serve fixtures and live previews over HTTP
    Serve(ServeArgs),
}

/// Widget attributes, shared by `render` and `snippet`
///
/// Precedence, lowest first: `--config` file, typed flags, `--attr` pairs.
#[derive(Args, Debug, Default, Clone)]
pub struct WidgetArgs {
    /// YAML file mapping attribute names to values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Collection identifier
    #[arg(long)]
    pub slug: Option<String>,

    /// Layout (list, grid, carousel, single)
    #[arg(long)]
    pub layout: Option<String>,

    /// Theme (light, dark)
    #[arg(long)]
    pub theme: Option<String>,

    /// Accent color
    #[arg(long)]
    pub primary_color: Option<String>,

    /// Container max width
    #[arg(long)]
    pub max_width: Option<String>,

    /// Maximum number of testimonials
    #[arg(long)]
    pub max_items: Option<u32>,

    /// Star ratings (true, false)
    #[arg(long)]
    pub show_stars: Option<bool>,

    /// Header text
    #[arg(long)]
    pub widget_title: Option<String>,

    /// Grid column count
    #[arg(long)]
    pub grid_columns: Option<u32>,

    /// Card corner radius
    #[arg(long)]
    pub border_radius: Option<String>,

    /// Card shadow (none, sm, md, lg)
    #[arg(long)]
    pub shadow: Option<String>,

    /// Font (sans, serif, mono)
    #[arg(long)]
    pub font: Option<String>,

    /// Spacing between cards
    #[arg(long)]
    pub gap: Option<String>,

    /// Fetch timeout in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,

    /// Extra attribute as name=value (repeatable)
    #[arg(long = "attr", value_name = "NAME=VALUE")]
    pub attrs: Vec<String>,
}

impl WidgetArgs {
    /// Collects the attributes in precedence order
    pub fn attributes(&self) -> CliResult<WidgetAttributes> {
        let mut attrs = match &self.config {
            Some(path) => WidgetAttributes::load(path)?,
            None => WidgetAttributes::new(),
        };
        attrs.set_opt(attr::SLUG, self.slug.as_ref());
        attrs.set_opt(attr::LAYOUT, self.layout.as_ref());
        attrs.set_opt(attr::THEME, self.theme.as_ref());
        attrs.set_opt(attr::PRIMARY_COLOR, self.primary_color.as_ref());
        attrs.set_opt(attr::MAX_WIDTH, self.max_width.as_ref());
        attrs.set_opt(attr::MAX_ITEMS, self.max_items);
        attrs.set_opt(attr::SHOW_STARS, self.show_stars);
        attrs.set_opt(attr::WIDGET_TITLE, self.widget_title.as_ref());
        attrs.set_opt(attr::GRID_COLUMNS, self.grid_columns);
        attrs.set_opt(attr::BORDER_RADIUS, self.border_radius.as_ref());
        attrs.set_opt(attr::SHADOW, self.shadow.as_ref());
        attrs.set_opt(attr::FONT, self.font.as_ref());
        attrs.set_opt(attr::GAP, self.gap.as_ref());
        attrs.set_opt(attr::TIMEOUT_MS, self.timeout_ms);
        for pair in &self.attrs {
            attrs.set_pair(pair)?;
        }
        Ok(attrs)
    }
}

/// Arguments for the render command
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Widget attributes
    #[command(flatten)]
    pub widget: WidgetArgs,

    /// JSON fixtures file (slug -> testimonials)
    #[arg(long, conflicts_with = "api_base")]
    pub fixtures: Option<PathBuf>,

    /// Origin serving /api/testimonials
    #[arg(long)]
    pub api_base: Option<String>,

    /// Write only the widget container, not a full page
    #[arg(long)]
    pub fragment: bool,

    /// Page title for full-page output
    #[arg(long, default_value = "Testimonials preview")]
    pub title: String,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the snippet command
#[derive(Args, Debug)]
pub struct SnippetArgs {
    /// Widget attributes
    #[command(flatten)]
    pub widget: WidgetArgs,

    /// URL of the widget script
    #[arg(long, default_value = testimania::snippet::DEFAULT_SCRIPT_SRC)]
    pub script_src: String,

    /// Origin serving /api/testimonials, when not the page's own
    #[arg(long)]
    pub api_base: Option<String>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the serve command
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// JSON fixtures file (slug -> testimonials)
    #[arg(long)]
    pub fixtures: PathBuf,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,
}

/// Color choice for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// JSON lines
    Json,
}

impl From<LogFormatArg> for crate::config::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}
