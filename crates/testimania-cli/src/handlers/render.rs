//! Render command handler

use std::path::Path;

use testimania::config::attr;
use testimania::fixture::{FixtureStore, FixtureTransport};
use testimania::host::HeadlessHost;
use testimania::http::HttpTransport;
use testimania::loader::{LoadOutcome, Transport};
use testimania::widget::{bootstrap, Mounted};

use crate::commands::RenderArgs;
use crate::error::{CliError, CliResult};

/// A finished headless render
#[derive(Debug)]
pub struct RenderReport {
    /// Page or fragment HTML
    pub html: String,
    /// What the bootstrap mounted
    pub mounted: Mounted,
}

impl RenderReport {
    /// One-line summary for the status reporter
    #[must_use]
    pub fn summary(&self) -> String {
        match &self.mounted.outcome {
            LoadOutcome::Loaded(_) => format!(
                "rendered {} testimonial(s) for {} ({})",
                self.mounted.rendered, self.mounted.config.collection_id, self.mounted.config.layout
            ),
            LoadOutcome::Empty => format!(
                "collection {} has no testimonials",
                self.mounted.config.collection_id
            ),
            LoadOutcome::Failed(err) => format!("failed to load testimonials: {err}"),
        }
    }
}

/// Reads a fixtures file
pub fn load_fixtures(path: &Path) -> CliResult<FixtureStore> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| CliError::config(format!("cannot read {}: {e}", path.display())))?;
    let store = FixtureStore::from_json(&json)?;
    tracing::debug!(path = %path.display(), collections = store.len(), "fixtures loaded");
    Ok(store)
}

/// Runs the widget headlessly and serializes the result
///
/// Load failures still produce HTML with the fallback message; only a
/// configuration problem is an error.
pub async fn execute_render(args: &RenderArgs) -> CliResult<RenderReport> {
    let mut attrs = args.widget.attributes()?;
    attrs.set_opt(attr::API_BASE, args.api_base.as_ref());

    let has_api_base = attrs.values().contains_key(attr::API_BASE);
    let transport: Box<dyn Transport + Send + Sync> = match &args.fixtures {
        Some(path) => Box::new(FixtureTransport::new(load_fixtures(path)?)),
        None if has_api_base => Box::new(HttpTransport::new()),
        None => {
            return Err(CliError::invalid_argument(
                "render needs --fixtures or --api-base (or api-base in --config)",
            ))
        }
    };

    let mut host = HeadlessHost::new().with_attributes(attrs.into_map());
    let mounted = bootstrap(&mut host, transport.as_ref()).await?;

    match &mounted.outcome {
        LoadOutcome::Failed(err) => tracing::warn!(error = %err, "rendered load-failure fallback"),
        LoadOutcome::Empty => tracing::warn!(
            slug = %mounted.config.collection_id,
            "rendered empty fallback"
        ),
        LoadOutcome::Loaded(_) => {}
    }

    let html = if args.fragment {
        host.target_html()
    } else {
        host.page_html(&args.title)
    };
    Ok(RenderReport { html, mounted })
}
