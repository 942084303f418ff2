//! Widget configuration resolved from embed attributes.
//!
//! Every field except the collection identifier has a default. Enumerated
//! tokens the widget does not recognize resolve to their default instead of
//! failing, so an embed written for a newer release keeps rendering.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::time::Duration;

use crate::error::{ConfigError, ConfigResult};
use crate::host::Host;

/// Id of the element the widget renders into
pub const RENDER_TARGET_ID: &str = "testimania-widget";

/// Embed attribute names
pub mod attr {
    /// Collection identifier (required)
    pub const SLUG: &str = "data-slug";
    /// Layout variant
    pub const LAYOUT: &str = "data-layout";
    /// Color theme
    pub const THEME: &str = "data-theme";
    /// Accent color
    pub const PRIMARY_COLOR: &str = "data-primary-color";
    /// Container max width
    pub const MAX_WIDTH: &str = "data-max-width";
    /// Maximum number of testimonials
    pub const MAX_ITEMS: &str = "data-max-items";
    /// Star rating toggle
    pub const SHOW_STARS: &str = "data-show-stars";
    /// Header text
    pub const WIDGET_TITLE: &str = "data-widget-title";
    /// Grid column count
    pub const GRID_COLUMNS: &str = "data-grid-columns";
    /// Card corner radius
    pub const BORDER_RADIUS: &str = "data-border-radius";
    /// Card shadow variant
    pub const SHADOW: &str = "data-shadow";
    /// Font family variant
    pub const FONT: &str = "data-font";
    /// Spacing between cards
    pub const GAP: &str = "data-gap";
    /// Origin serving `/api/testimonials`
    pub const API_BASE: &str = "data-api-base";
    /// Fetch timeout in milliseconds
    pub const TIMEOUT_MS: &str = "data-timeout-ms";

    /// All attributes, in embed order
    pub const ALL: &[&str] = &[
        SLUG,
        LAYOUT,
        THEME,
        PRIMARY_COLOR,
        MAX_WIDTH,
        MAX_ITEMS,
        SHOW_STARS,
        WIDGET_TITLE,
        GRID_COLUMNS,
        BORDER_RADIUS,
        SHADOW,
        FONT,
        GAP,
        API_BASE,
        TIMEOUT_MS,
    ];
}

/// Default accent color (amber)
pub const DEFAULT_PRIMARY_COLOR: &str = "#f59e0b";
/// Default container width
pub const DEFAULT_MAX_WIDTH: &str = "800px";
/// Default card corner radius
pub const DEFAULT_BORDER_RADIUS: &str = "8px";
/// Default card spacing
pub const DEFAULT_GAP: &str = "16px";
/// Default item cap
pub const DEFAULT_MAX_ITEMS: u32 = 10;
/// Default grid column count
pub const DEFAULT_GRID_COLUMNS: u32 = 3;
/// Default fetch timeout
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Read access to declarative attributes (the embed tag, a map, a host)
pub trait AttributeSource {
    /// Returns the raw attribute value, if present
    fn attribute(&self, name: &str) -> Option<String>;
}

impl<S: BuildHasher> AttributeSource for HashMap<String, String, S> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for BTreeMap<String, String> {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// A closed set of attribute tokens with a designated default
pub trait Token: Copy + Default + 'static {
    /// Every variant
    const ALL: &'static [Self];

    /// The attribute token for this variant
    fn as_str(self) -> &'static str;

    /// Matches a token, ignoring ASCII case and surrounding whitespace
    fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(token))
    }

    /// Resolves a token, falling back to the default on a miss
    fn resolve(token: Option<&str>) -> Self {
        token.and_then(Self::from_token).unwrap_or_default()
    }
}

/// Layout variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Layout {
    /// Vertical stack
    #[default]
    List,
    /// Fixed-column grid
    Grid,
    /// Horizontal strip with prev/next controls
    Carousel,
    /// First testimonial only
    Single,
}

impl Token for Layout {
    const ALL: &'static [Self] = &[Self::List, Self::Grid, Self::Carousel, Self::Single];

    fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Grid => "grid",
            Self::Carousel => "carousel",
            Self::Single => "single",
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    /// Light cards on any background
    #[default]
    Light,
    /// Dark cards
    Dark,
}

impl Token for Theme {
    const ALL: &'static [Self] = &[Self::Light, Self::Dark];

    fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Card shadow variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shadow {
    /// No shadow
    None,
    /// Hairline shadow
    Sm,
    /// Medium shadow
    #[default]
    Md,
    /// Large shadow
    Lg,
}

impl Token for Shadow {
    const ALL: &'static [Self] = &[Self::None, Self::Sm, Self::Md, Self::Lg];

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
        }
    }
}

/// Font family variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Font {
    /// System sans-serif stack
    #[default]
    Sans,
    /// Serif stack
    Serif,
    /// Monospace stack
    Mono,
}

impl Token for Font {
    const ALL: &'static [Self] = &[Self::Sans, Self::Serif, Self::Mono];

    fn as_str(self) -> &'static str {
        match self {
            Self::Sans => "sans",
            Self::Serif => "serif",
            Self::Mono => "mono",
        }
    }
}

macro_rules! impl_display_for_token {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

impl_display_for_token!(Layout, Theme, Shadow, Font);

/// Rejects anything that would let a value escape its CSS declaration,
/// including comment delimiters that would swallow the rules after it
fn is_css_safe(value: &str) -> bool {
    !value.contains("/*")
        && !value.contains("*/")
        && !value.chars().any(|c| {
            matches!(c, ';' | '{' | '}' | '<' | '>' | '\\' | '"' | '\'') || c.is_control()
        })
}

/// A CSS color value safe to place in a declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssColor(String);

impl CssColor {
    /// Accepts any non-empty value that cannot break out of a declaration
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        (!value.is_empty() && is_css_safe(value)).then(|| Self(value.to_string()))
    }

    /// The color as written
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CssColor {
    fn default() -> Self {
        Self(DEFAULT_PRIMARY_COLOR.to_string())
    }
}

impl fmt::Display for CssColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A CSS length; bare numbers are read as pixels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CssLength(String);

impl CssLength {
    /// Parses a length, normalizing `8` to `8px`
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() || !is_css_safe(value) {
            return None;
        }
        if value.parse::<f64>().is_ok_and(f64::is_finite) {
            return Some(Self(format!("{value}px")));
        }
        Some(Self(value.to_string()))
    }

    fn from_static(value: &str) -> Self {
        Self(value.to_string())
    }

    /// The normalized length
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully resolved widget configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Collection identifier (slug)
    pub collection_id: String,
    /// Layout variant
    pub layout: Layout,
    /// Color theme
    pub theme: Theme,
    /// Accent color
    pub primary_color: CssColor,
    /// Container max width
    pub max_width: CssLength,
    /// Item cap for every layout except `single`
    pub max_items: u32,
    /// Star rating line toggle
    pub show_stars: bool,
    /// Header text, empty for no header
    pub widget_title: String,
    /// Column count for the grid layout
    pub grid_columns: u32,
    /// Card corner radius
    pub border_radius: CssLength,
    /// Card shadow
    pub shadow: Shadow,
    /// Font family
    pub font: Font,
    /// Spacing between cards
    pub gap: CssLength,
    /// Origin serving the testimonials endpoint; relative URLs when unset
    pub api_base: Option<String>,
    /// Upper bound on the testimonials fetch
    pub timeout: Duration,
}

impl WidgetConfig {
    /// Creates a config with every optional field at its default
    #[must_use]
    pub fn new(collection_id: impl Into<String>) -> Self {
        Self {
            collection_id: collection_id.into(),
            layout: Layout::default(),
            theme: Theme::default(),
            primary_color: CssColor::default(),
            max_width: CssLength::from_static(DEFAULT_MAX_WIDTH),
            max_items: DEFAULT_MAX_ITEMS,
            show_stars: true,
            widget_title: String::new(),
            grid_columns: DEFAULT_GRID_COLUMNS,
            border_radius: CssLength::from_static(DEFAULT_BORDER_RADIUS),
            shadow: Shadow::default(),
            font: Font::default(),
            gap: CssLength::from_static(DEFAULT_GAP),
            api_base: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Resolves a config from attributes alone.
    ///
    /// Fails only when the collection identifier is missing or blank.
    pub fn resolve(source: &impl AttributeSource) -> ConfigResult<Self> {
        let collection_id = source
            .attribute(attr::SLUG)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingCollectionId)?;

        let mut config = Self::new(collection_id);
        config.layout = resolve_token(source, attr::LAYOUT);
        config.theme = resolve_token(source, attr::THEME);
        config.shadow = resolve_token(source, attr::SHADOW);
        config.font = resolve_token(source, attr::FONT);

        if let Some(color) = source
            .attribute(attr::PRIMARY_COLOR)
            .and_then(|v| CssColor::parse(&v))
        {
            config.primary_color = color;
        }
        if let Some(len) = resolve_length(source, attr::MAX_WIDTH) {
            config.max_width = len;
        }
        if let Some(len) = resolve_length(source, attr::BORDER_RADIUS) {
            config.border_radius = len;
        }
        if let Some(len) = resolve_length(source, attr::GAP) {
            config.gap = len;
        }
        if let Some(n) = resolve_positive(source, attr::MAX_ITEMS) {
            config.max_items = n;
        }
        if let Some(n) = resolve_positive(source, attr::GRID_COLUMNS) {
            config.grid_columns = n;
        }
        if let Some(ms) = resolve_positive(source, attr::TIMEOUT_MS) {
            config.timeout = Duration::from_millis(u64::from(ms));
        }

        config.show_stars = source
            .attribute(attr::SHOW_STARS)
            .map_or(true, |v| !v.trim().eq_ignore_ascii_case("false"));
        config.widget_title = source
            .attribute(attr::WIDGET_TITLE)
            .map(|v| v.trim().to_string())
            .unwrap_or_default();
        config.api_base = source
            .attribute(attr::API_BASE)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty());

        Ok(config)
    }

    /// Resolves a config against a host: attributes, then the render target.
    ///
    /// An `api_base` attribute wins over the host's own origin.
    pub fn resolve_on(host: &impl Host) -> ConfigResult<Self> {
        let mut config = Self::resolve(host)?;
        if !host.has_render_target() {
            return Err(ConfigError::MissingRenderTarget {
                id: RENDER_TARGET_ID.to_string(),
            });
        }
        if config.api_base.is_none() {
            config.api_base = host.origin();
        }
        Ok(config)
    }

    /// Layout variant
    #[must_use]
    pub const fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Color theme
    #[must_use]
    pub const fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Item cap
    #[must_use]
    pub const fn with_max_items(mut self, max_items: u32) -> Self {
        self.max_items = max_items;
        self
    }

    /// Star line toggle
    #[must_use]
    pub const fn with_show_stars(mut self, show_stars: bool) -> Self {
        self.show_stars = show_stars;
        self
    }

    /// Header text
    #[must_use]
    pub fn with_widget_title(mut self, title: impl Into<String>) -> Self {
        self.widget_title = title.into();
        self
    }

    /// Grid column count
    #[must_use]
    pub const fn with_grid_columns(mut self, columns: u32) -> Self {
        self.grid_columns = columns;
        self
    }

    /// API origin
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = Some(base.into());
        self
    }

    /// Fetch timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Timeout in whole milliseconds
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    /// The embed attributes describing this config.
    ///
    /// `api_base` and the timeout are emitted only when they differ from the
    /// defaults. Resolving the result yields an equal config.
    #[must_use]
    pub fn to_attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            (attr::SLUG, self.collection_id.clone()),
            (attr::LAYOUT, self.layout.to_string()),
            (attr::THEME, self.theme.to_string()),
            (attr::PRIMARY_COLOR, self.primary_color.to_string()),
            (attr::MAX_WIDTH, self.max_width.to_string()),
            (attr::MAX_ITEMS, self.max_items.to_string()),
            (attr::SHOW_STARS, self.show_stars.to_string()),
            (attr::WIDGET_TITLE, self.widget_title.clone()),
            (attr::GRID_COLUMNS, self.grid_columns.to_string()),
            (attr::BORDER_RADIUS, self.border_radius.to_string()),
            (attr::SHADOW, self.shadow.to_string()),
            (attr::FONT, self.font.to_string()),
            (attr::GAP, self.gap.to_string()),
        ];
        if let Some(base) = &self.api_base {
            attrs.push((attr::API_BASE, base.clone()));
        }
        if self.timeout_ms() != DEFAULT_TIMEOUT_MS {
            attrs.push((attr::TIMEOUT_MS, self.timeout_ms().to_string()));
        }
        attrs
    }
}

fn resolve_token<T: Token + fmt::Debug>(source: &impl AttributeSource, name: &str) -> T {
    let raw = source.attribute(name);
    let value = T::resolve(raw.as_deref());
    if let Some(raw) = raw.filter(|r| T::from_token(r).is_none()) {
        tracing::debug!(attribute = name, value = %raw, resolved = ?value, "unknown token, using default");
    }
    value
}

fn resolve_length(source: &impl AttributeSource, name: &str) -> Option<CssLength> {
    source.attribute(name).and_then(|v| CssLength::parse(&v))
}

fn resolve_positive(source: &impl AttributeSource, name: &str) -> Option<u32> {
    source
        .attribute(name)
        .and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
}
