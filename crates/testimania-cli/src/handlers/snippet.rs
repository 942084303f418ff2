//! Snippet command handler

use testimania::config::{attr, WidgetConfig};
use testimania::snippet::embed_snippet;

use crate::commands::SnippetArgs;
use crate::error::CliResult;

/// Builds the embed snippet for the given attributes
///
/// The attributes go through the same resolution the widget performs, so the
/// snippet carries normalized values and invalid ones are dropped.
pub fn execute_snippet(args: &SnippetArgs) -> CliResult<String> {
    let mut attrs = args.widget.attributes()?;
    attrs.set_opt(attr::API_BASE, args.api_base.as_ref());

    let config = WidgetConfig::resolve(attrs.values())?;
    tracing::debug!(slug = %config.collection_id, "snippet generated");
    Ok(embed_snippet(&config, &args.script_src))
}
