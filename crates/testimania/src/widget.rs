//! Widget bootstrap
//!
//! Wires the pieces in order: resolve config, style the page, fetch, render,
//! mount, then bind the carousel. A fatal config error stops the bootstrap
//! before any style or network side effect; every later failure degrades to
//! fallback content.

use crate::carousel::CarouselController;
use crate::config::{Layout, WidgetConfig};
use crate::error::ConfigResult;
use crate::host::Host;
use crate::loader::{self, LoadOutcome, Transport};
use crate::render::{self, CARD_CLASS};
use crate::style;

/// What a successful bootstrap put on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mounted {
    /// The resolved configuration
    pub config: WidgetConfig,
    /// How the fetch ended
    pub outcome: LoadOutcome,
    /// Number of cards rendered
    pub rendered: usize,
    /// Whether carousel controls were bound
    pub carousel: bool,
}

/// Runs one widget bootstrap against `host`.
///
/// Returns an error only for a fatal configuration problem, which is also
/// reported through [`Host::report`]. Load failures are rendered, not
/// returned.
pub async fn bootstrap<H, T>(host: &mut H, transport: &T) -> ConfigResult<Mounted>
where
    H: Host,
    T: Transport + ?Sized,
{
    let config = match WidgetConfig::resolve_on(&*host) {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "widget not started");
            host.report(&format!("Testimania: {err}"));
            return Err(err);
        }
    };
    tracing::info!(
        slug = %config.collection_id,
        layout = %config.layout,
        theme = %config.theme,
        "starting widget"
    );

    host.inject_stylesheet(&style::synthesize(&config));
    host.set_target_classes(&style::container_classes(config.theme, config.layout));

    let outcome = loader::load(&config, transport).await;
    if let LoadOutcome::Failed(err) = &outcome {
        tracing::error!(slug = %config.collection_id, error = %err, "failed to load testimonials");
        host.report(&format!("Testimania: failed to load testimonials: {err}"));
    }

    let fragment = render::render_outcome(&config, &outcome);
    let rendered = fragment.count_by_class(CARD_CLASS);
    host.mount(fragment);

    let mut carousel = false;
    if config.layout == Layout::Carousel {
        if let Some(controller) = CarouselController::new(rendered) {
            host.attach_carousel(controller);
            carousel = true;
        }
    }

    tracing::debug!(outcome = outcome.kind(), rendered, carousel, "widget mounted");
    Ok(Mounted {
        config,
        outcome,
        rendered,
        carousel,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::NavControl;
    use crate::config::attr;
    use crate::error::{ConfigError, LoadError};
    use crate::fixture::{FixtureStore, FixtureTransport};
    use crate::host::HeadlessHost;
    use crate::loader::Testimonial;

    fn transport(n: usize) -> FixtureTransport {
        let items = (0..n)
            .map(|i| Testimonial::new(format!("content {i}"), format!("client {i}")).with_rating(5))
            .collect();
        FixtureTransport::new(FixtureStore::new().with_collection("acme", items))
    }

    #[tokio::test]
    async fn test_missing_slug_has_no_side_effects() {
        let mut host = HeadlessHost::new().with_attribute(attr::LAYOUT, "grid");
        let err = bootstrap(&mut host, &transport(3)).await.unwrap_err();
        assert_eq!(err, ConfigError::MissingCollectionId);
        assert!(host.stylesheets().is_empty());
        assert!(host.target_classes().is_empty());
        assert!(host.fragment().is_none());
        assert_eq!(host.diagnostics().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_target_has_no_side_effects() {
        let mut host = HeadlessHost::new()
            .with_attribute(attr::SLUG, "acme")
            .without_render_target();
        let err = bootstrap(&mut host, &transport(3)).await.unwrap_err();
        assert!(matches!(err, ConfigError::MissingRenderTarget { .. }));
        assert!(host.stylesheets().is_empty());
        assert!(host.fragment().is_none());
    }

    #[tokio::test]
    async fn test_list_mount() {
        let mut host = HeadlessHost::new()
            .with_attribute(attr::SLUG, "acme")
            .with_attribute(attr::MAX_ITEMS, "2");
        let mounted = bootstrap(&mut host, &transport(5)).await.unwrap();
        assert_eq!(mounted.rendered, 2);
        assert!(!mounted.carousel);
        assert_eq!(host.stylesheets().len(), 1);
        assert!(host.target_classes().iter().any(|c| c == "tm-layout-list"));
        assert!(host.diagnostics().is_empty());
    }

    #[tokio::test]
    async fn test_carousel_binds_controls() {
        let mut host = HeadlessHost::new()
            .with_attribute(attr::SLUG, "acme")
            .with_attribute(attr::LAYOUT, "carousel");
        let mounted = bootstrap(&mut host, &transport(3)).await.unwrap();
        assert!(mounted.carousel);
        assert_eq!(host.click(NavControl::Next), Some(1));
    }

    #[tokio::test]
    async fn test_empty_carousel_has_no_controls() {
        let mut host = HeadlessHost::new()
            .with_attribute(attr::SLUG, "nobody")
            .with_attribute(attr::LAYOUT, "carousel");
        let mounted = bootstrap(&mut host, &transport(3)).await.unwrap();
        assert_eq!(mounted.outcome, LoadOutcome::Empty);
        assert!(!mounted.carousel);
        assert_eq!(host.click(NavControl::Next), None);
    }

    #[tokio::test]
    async fn test_failure_is_rendered_and_reported() {
        let mut host = HeadlessHost::new().with_attribute(attr::SLUG, "acme");
        let failing = transport(3).failing(LoadError::transport("connection refused"));
        let mounted = bootstrap(&mut host, &failing).await.unwrap();
        assert!(mounted.outcome.is_failed());
        assert_eq!(mounted.rendered, 0);
        assert_eq!(
            host.fragment().unwrap().text_content(),
            "Could not load testimonials."
        );
        assert_eq!(host.diagnostics().len(), 1);
        assert_eq!(host.stylesheets().len(), 1);
    }
}
