//! Layout rendering
//!
//! A pure function of (config, testimonials) to a [`Fragment`]. No network,
//! no timers. Per-item markup is identical across layouts; only the
//! container around the cards changes.

use crate::carousel::{NavControl, BUTTON_CLASS, ITEM_CLASS, STRIP_CLASS};
use crate::config::{Layout, WidgetConfig};
use crate::dom::{DomElement, Fragment};
use crate::loader::{LoadOutcome, Testimonial};

/// Class of a testimonial card
pub const CARD_CLASS: &str = "tm-card";
/// Class of the element holding list, grid and single cards
pub const WRAPPER_CLASS: &str = "testimonials-wrapper";
/// Class of the carousel frame
pub const CAROUSEL_CLASS: &str = "tm-carousel";
/// Class of the optional header
pub const HEADER_CLASS: &str = "tm-widget-header";

/// Stars shown for a perfect rating
pub const STAR_SCALE: usize = 5;
/// Upper bound on rendered filled stars for out-of-range ratings
pub const MAX_RENDERED_STARS: usize = 100;

const FILLED_STAR: char = '\u{2605}';
const EMPTY_STAR: char = '\u{2606}';

/// Substitute content when there is nothing to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fallback {
    /// The collection has no testimonials
    Empty,
    /// The fetch failed
    LoadFailed,
}

impl Fallback {
    /// Human-readable message
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Empty => "No testimonials yet.",
            Self::LoadFailed => "Could not load testimonials.",
        }
    }

    /// Class distinguishing the two fallbacks
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Empty => "tm-empty",
            Self::LoadFailed => "tm-error",
        }
    }
}

/// The fallback fragment for `kind`
#[must_use]
pub fn fallback(kind: Fallback) -> Fragment {
    Fragment::from(
        DomElement::new("p")
            .with_class("tm-fallback")
            .with_class(kind.class())
            .with_text(kind.message()),
    )
}

/// Star line for a rating: `rating` filled stars, the rest of five unfilled.
///
/// Ratings are not clamped to the five-star scale; negative ratings show no
/// filled stars and very large ones are bounded by [`MAX_RENDERED_STARS`].
#[must_use]
pub fn stars(rating: i64) -> String {
    let filled = usize::try_from(rating.max(0))
        .unwrap_or(MAX_RENDERED_STARS)
        .min(MAX_RENDERED_STARS);
    let mut line: String = std::iter::repeat(FILLED_STAR).take(filled).collect();
    line.extend(std::iter::repeat(EMPTY_STAR).take(STAR_SCALE.saturating_sub(filled)));
    line
}

/// One testimonial card
#[must_use]
pub fn card(config: &WidgetConfig, item: &Testimonial) -> DomElement {
    let mut card = DomElement::new("div").with_class(CARD_CLASS);

    if let Some(rating) = item.rating.filter(|r| config.show_stars && *r != 0) {
        card = card.with_child(
            DomElement::new("div")
                .with_class("tm-stars")
                .with_attr("role", "img")
                .with_attr("aria-label", &format!("{rating} out of {STAR_SCALE} stars"))
                .with_text(stars(rating)),
        );
    }
    if let Some(title) = item.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        card = card.with_child(DomElement::new("div").with_class("tm-title").with_text(title));
    }

    card.with_child(
        DomElement::new("p")
            .with_class("tm-content")
            .with_text(format!("\u{201C}{}\u{201D}", item.content)),
    )
    .with_child(
        DomElement::new("p")
            .with_class("tm-author")
            .with_text(format!("- {}", item.client_name)),
    )
}

fn wrapper(cards: impl IntoIterator<Item = DomElement>) -> DomElement {
    DomElement::new("div")
        .with_class(WRAPPER_CLASS)
        .with_children(cards)
}

fn nav_button(control: NavControl) -> DomElement {
    DomElement::new("button")
        .with_class(BUTTON_CLASS)
        .with_class(control.class())
        .with_attr("type", "button")
        .with_attr("aria-label", control.label())
        .with_text(control.glyph())
}

fn carousel(config: &WidgetConfig, items: &[Testimonial]) -> DomElement {
    let strip = DomElement::new("div").with_class(STRIP_CLASS).with_children(
        items.iter().map(|item| {
            DomElement::new("div")
                .with_class(ITEM_CLASS)
                .with_child(card(config, item))
        }),
    );
    DomElement::new("div")
        .with_class(CAROUSEL_CLASS)
        .with_attr("aria-roledescription", "carousel")
        .with_child(strip)
        .with_child(nav_button(NavControl::Prev))
        .with_child(nav_button(NavControl::Next))
}

/// Renders testimonials for the configured layout.
///
/// An empty slice renders the empty-state fallback. The header, when
/// configured, precedes every layout.
#[must_use]
pub fn render(config: &WidgetConfig, items: &[Testimonial]) -> Fragment {
    let Some(first) = items.first() else {
        return fallback(Fallback::Empty);
    };

    let mut fragment = Fragment::new();
    if !config.widget_title.is_empty() {
        fragment.push(
            DomElement::new("h2")
                .with_class(HEADER_CLASS)
                .with_text(config.widget_title.as_str()),
        );
    }

    let body = match config.layout {
        Layout::Single => wrapper([card(config, first)]),
        Layout::List | Layout::Grid => wrapper(items.iter().map(|item| card(config, item))),
        Layout::Carousel => carousel(config, items),
    };
    fragment.push(body);
    fragment
}

/// Renders a load outcome: cards, the empty state, or the failure message
#[must_use]
pub fn render_outcome(config: &WidgetConfig, outcome: &LoadOutcome) -> Fragment {
    match outcome {
        LoadOutcome::Loaded(items) => render(config, items),
        LoadOutcome::Empty => fallback(Fallback::Empty),
        LoadOutcome::Failed(_) => fallback(Fallback::LoadFailed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    fn items(n: usize) -> Vec<Testimonial> {
        (0..n)
            .map(|i| {
                Testimonial::new(format!("content {i}"), format!("client {i}"))
                    .with_rating(5)
                    .with_title(format!("title {i}"))
            })
            .collect()
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(5), "★★★★★");
        assert_eq!(stars(3), "★★★☆☆");
        assert_eq!(stars(1), "★☆☆☆☆");
        assert_eq!(stars(7), "★★★★★★★");
        assert_eq!(stars(-2), "☆☆☆☆☆");
        assert_eq!(stars(i64::MAX).chars().count(), MAX_RENDERED_STARS);
    }

    #[test]
    fn test_card_parts() {
        let config = WidgetConfig::new("acme");
        let card = card(
            &config,
            &Testimonial::new("Loved it", "Ana").with_rating(4).with_title("Wow"),
        );
        assert_eq!(card.find_by_class("tm-stars").unwrap().text_content(), "★★★★☆");
        assert_eq!(card.find_by_class("tm-title").unwrap().text_content(), "Wow");
        assert_eq!(
            card.find_by_class("tm-content").unwrap().text_content(),
            "\u{201C}Loved it\u{201D}"
        );
        assert_eq!(card.find_by_class("tm-author").unwrap().text_content(), "- Ana");
    }

    #[test]
    fn test_card_omits_stars_without_rating_or_when_disabled() {
        let config = WidgetConfig::new("acme");
        let unrated = card(&config, &Testimonial::new("x", "y"));
        assert!(unrated.find_by_class("tm-stars").is_none());

        let zero = card(&config, &Testimonial::new("x", "y").with_rating(0));
        assert!(zero.find_by_class("tm-stars").is_none());

        let hidden = card(
            &config.clone().with_show_stars(false),
            &Testimonial::new("x", "y").with_rating(5),
        );
        assert!(hidden.find_by_class("tm-stars").is_none());
    }

    #[test]
    fn test_card_omits_blank_title() {
        let config = WidgetConfig::new("acme");
        let card = card(&config, &Testimonial::new("x", "y").with_title("   "));
        assert!(card.find_by_class("tm-title").is_none());
    }

    #[test]
    fn test_list_renders_all_in_order() {
        let config = WidgetConfig::new("acme");
        let fragment = render(&config, &items(3));
        let cards = fragment.all_by_class(CARD_CLASS);
        assert_eq!(cards.len(), 3);
        for (i, card) in cards.iter().enumerate() {
            assert_eq!(
                card.find_by_class("tm-author").unwrap().text_content(),
                format!("- client {i}")
            );
        }
        assert!(fragment.find_by_class(WRAPPER_CLASS).is_some());
        assert!(fragment.find_by_class(HEADER_CLASS).is_none());
    }

    #[test]
    fn test_grid_renders_all() {
        let config = WidgetConfig::new("acme")
            .with_layout(Layout::Grid)
            .with_grid_columns(2);
        let fragment = render(&config, &items(5));
        assert_eq!(fragment.count_by_class(CARD_CLASS), 5);
    }

    #[test]
    fn test_single_renders_first_only() {
        let config = WidgetConfig::new("acme").with_layout(Layout::Single);
        let fragment = render(&config, &items(3));
        let cards = fragment.all_by_class(CARD_CLASS);
        assert_eq!(cards.len(), 1);
        assert!(cards[0].text_content().contains("content 0"));
    }

    #[test]
    fn test_carousel_structure() {
        let config = WidgetConfig::new("acme").with_layout(Layout::Carousel);
        let fragment = render(&config, &items(3));
        assert_eq!(fragment.count_by_class(ITEM_CLASS), 3);
        assert_eq!(fragment.count_by_class(CARD_CLASS), 3);
        assert!(fragment.find_by_class(STRIP_CLASS).is_some());

        let buttons = fragment.all_by_class(BUTTON_CLASS);
        assert_eq!(buttons.len(), 2);
        assert!(buttons[0].has_class("prev"));
        assert!(buttons[1].has_class("next"));
        assert_eq!(buttons[0].get_attr("type"), Some("button"));
    }

    #[test]
    fn test_header_only_with_title() {
        let config = WidgetConfig::new("acme").with_widget_title("What customers say");
        let fragment = render(&config, &items(1));
        let header = fragment.elements().next().unwrap();
        assert!(header.has_class(HEADER_CLASS));
        assert_eq!(header.tag, "h2");
        assert_eq!(header.text_content(), "What customers say");
    }

    #[test]
    fn test_empty_renders_empty_fallback() {
        for layout in [Layout::List, Layout::Grid, Layout::Carousel, Layout::Single] {
            let config = WidgetConfig::new("acme")
                .with_layout(layout)
                .with_widget_title("Title");
            let fragment = render(&config, &[]);
            assert_eq!(fragment.count_by_class(CARD_CLASS), 0);
            assert_eq!(fragment.text_content(), Fallback::Empty.message());
        }
    }

    #[test]
    fn test_render_outcome_fallbacks_are_distinct() {
        let config = WidgetConfig::new("acme");
        let empty = render_outcome(&config, &LoadOutcome::Empty);
        let failed = render_outcome(
            &config,
            &LoadOutcome::Failed(LoadError::Status { status: 500 }),
        );
        assert_ne!(empty.text_content(), failed.text_content());
        assert!(failed.find_by_class("tm-error").is_some());
        assert!(empty.find_by_class("tm-empty").is_some());
    }

    #[test]
    fn test_untrusted_text_is_escaped() {
        let config = WidgetConfig::new("acme").with_widget_title("<b>Reviews</b>");
        let item = Testimonial::new("<img src=x onerror=alert(1)>", "<script>evil()</script>")
            .with_title("\"><svg onload=alert(1)>");
        let html = render(&config, &[item]).to_html();

        assert!(!html.contains("<img"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<svg"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&lt;script&gt;evil()&lt;/script&gt;"));
    }
}
