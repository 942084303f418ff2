//! CLI configuration

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::error::{CliError, CliResult};

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default tracing filter for this level
    #[must_use]
    pub const fn log_filter(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "debug",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Log line format
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set log format
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }
}

/// Normalizes an attribute name to its `data-` form
#[must_use]
pub fn attribute_name(name: &str) -> String {
    let name = name.trim().to_ascii_lowercase().replace('_', "-");
    if name.starts_with("data-") {
        name
    } else {
        format!("data-{name}")
    }
}

/// Widget attributes gathered from a file, flags and `--attr` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetAttributes {
    values: BTreeMap<String, String>,
}

impl WidgetAttributes {
    /// Creates an empty attribute set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a YAML mapping of attribute names to scalar values
    pub fn from_yaml(yaml: &str) -> CliResult<Self> {
        let value: Value = serde_yaml_ng::from_str(yaml)?;
        let mut attrs = Self::new();
        match value {
            Value::Null => {}
            Value::Mapping(mapping) => {
                for (key, value) in mapping {
                    let key = scalar(&key)
                        .ok_or_else(|| CliError::config("attribute names must be strings"))?;
                    let value = scalar(&value).ok_or_else(|| {
                        CliError::config(format!(
                            "attribute {} must be a scalar",
                            attribute_name(&key)
                        ))
                    })?;
                    attrs.set(&key, value);
                }
            }
            _ => return Err(CliError::config("widget config must be a mapping")),
        }
        Ok(attrs)
    }

    /// Loads a YAML widget config file
    pub fn load(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_yaml(&contents)
    }

    /// Sets an attribute, normalizing its name
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(attribute_name(name), value.into());
    }

    /// Sets an attribute when a value is present
    pub fn set_opt(&mut self, name: &str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.set(name, value.to_string());
        }
    }

    /// Parses a `name=value` pair
    pub fn set_pair(&mut self, pair: &str) -> CliResult<()> {
        let (name, value) = pair
            .split_once('=')
            .ok_or_else(|| CliError::invalid_argument(format!("expected name=value, got {pair:?}")))?;
        if name.trim().is_empty() {
            return Err(CliError::invalid_argument(format!(
                "attribute name missing in {pair:?}"
            )));
        }
        self.set(name, value);
        Ok(())
    }

    /// Normalized attributes
    #[must_use]
    pub const fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    /// Consumes the set into its map
    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, String> {
        self.values
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
