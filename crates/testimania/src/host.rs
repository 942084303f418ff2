//! Host page abstraction
//!
//! The widget never touches a document directly. It talks to a [`Host`],
//! which is the browser page under `wasm` and a [`HeadlessHost`] everywhere
//! else, so the same bootstrap runs in tests, the CLI and the dev server.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::carousel::{CarouselController, NavControl, STRIP_CLASS};
use crate::config::{AttributeSource, RENDER_TARGET_ID};
use crate::dom::{escape_attr, escape_text, Fragment};
use crate::style::{self, Stylesheet};

/// The page a widget is embedded in
///
/// Attribute lookups read the embed tag. Every mutating call must be
/// idempotent with respect to stylesheet ids and must never fail into the
/// caller; hosts swallow and log their own DOM errors.
pub trait Host: AttributeSource {
    /// Whether the element with id [`RENDER_TARGET_ID`] exists
    fn has_render_target(&self) -> bool;

    /// Origin of the page serving the embed script, if known
    fn origin(&self) -> Option<String> {
        None
    }

    /// Installs a stylesheet, replacing an earlier one with the same id
    fn inject_stylesheet(&mut self, sheet: &Stylesheet);

    /// Adds classes to the render target, dropping theme and layout classes
    /// left by an earlier bootstrap
    fn set_target_classes(&mut self, classes: &[String]);

    /// Replaces the render target's content
    fn mount(&mut self, fragment: Fragment);

    /// Binds the navigation controls of the mounted carousel
    fn attach_carousel(&mut self, controller: CarouselController);

    /// Surfaces a developer diagnostic (the console, in a browser)
    fn report(&mut self, message: &str);
}

/// In-memory page used off the browser
#[derive(Debug, Clone, Default)]
pub struct HeadlessHost {
    attributes: BTreeMap<String, String>,
    origin: Option<String>,
    missing_target: bool,
    stylesheets: Vec<Stylesheet>,
    target_classes: Vec<String>,
    fragment: Option<Fragment>,
    carousel: Option<CarouselController>,
    diagnostics: Vec<String>,
}

impl HeadlessHost {
    /// A page with an empty embed tag and a render target
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an embed attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Sets several embed attributes
    #[must_use]
    pub fn with_attributes<I, K, V>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.attributes
            .extend(attributes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Sets the page origin
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    /// Removes the render target from the page
    #[must_use]
    pub fn without_render_target(mut self) -> Self {
        self.missing_target = true;
        self
    }

    /// Installed stylesheets, in insertion order
    #[must_use]
    pub fn stylesheets(&self) -> &[Stylesheet] {
        &self.stylesheets
    }

    /// Classes on the render target
    #[must_use]
    pub fn target_classes(&self) -> &[String] {
        &self.target_classes
    }

    /// Mounted content
    #[must_use]
    pub const fn fragment(&self) -> Option<&Fragment> {
        self.fragment.as_ref()
    }

    /// Carousel state, when controls are bound
    #[must_use]
    pub const fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    /// Reported diagnostics
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Clicks a carousel control.
    ///
    /// Returns the new index, or `None` when no controls are bound.
    pub fn click(&mut self, control: NavControl) -> Option<usize> {
        let carousel = self.carousel.as_mut()?;
        let index = carousel.press(control);
        let transform = carousel.transform();
        if let Some(strip) = self
            .fragment
            .as_mut()
            .and_then(|f| f.find_by_class_mut(STRIP_CLASS))
        {
            strip.set_attr("style", &format!("transform: {transform}"));
        }
        Some(index)
    }

    /// Inline style of the carousel strip
    #[must_use]
    pub fn strip_style(&self) -> Option<&str> {
        self.fragment
            .as_ref()?
            .find_by_class(STRIP_CLASS)?
            .get_attr("style")
    }

    /// The render target serialized as HTML
    #[must_use]
    pub fn target_html(&self) -> String {
        let mut out = format!("<div id=\"{RENDER_TARGET_ID}\"");
        if !self.target_classes.is_empty() {
            let _ = write!(
                out,
                " class=\"{}\"",
                escape_attr(&self.target_classes.join(" "))
            );
        }
        out.push('>');
        if let Some(fragment) = &self.fragment {
            out.push_str(&fragment.to_html());
        }
        out.push_str("</div>");
        out
    }

    /// A standalone HTML document with the stylesheets and render target
    #[must_use]
    pub fn page_html(&self, title: &str) -> String {
        let mut out = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(out, "<title>{}</title>", escape_text(title));
        for sheet in &self.stylesheets {
            let _ = writeln!(out, "<style id=\"{}\">\n{}</style>", sheet.id, sheet.css);
        }
        out.push_str("</head>\n<body>\n");
        out.push_str(&self.target_html());
        out.push_str("\n</body>\n</html>\n");
        out
    }
}

impl AttributeSource for HeadlessHost {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }
}

impl Host for HeadlessHost {
    fn has_render_target(&self) -> bool {
        !self.missing_target
    }

    fn origin(&self) -> Option<String> {
        self.origin.clone()
    }

    fn inject_stylesheet(&mut self, sheet: &Stylesheet) {
        if let Some(existing) = self.stylesheets.iter_mut().find(|s| s.id == sheet.id) {
            existing.clone_from(sheet);
        } else {
            self.stylesheets.push(sheet.clone());
        }
    }

    fn set_target_classes(&mut self, classes: &[String]) {
        self.target_classes.retain(|class| !style::is_variant_class(class));
        for class in classes {
            if !self.target_classes.contains(class) {
                self.target_classes.push(class.clone());
            }
        }
    }

    fn mount(&mut self, fragment: Fragment) {
        self.fragment = Some(fragment);
        self.carousel = None;
    }

    fn attach_carousel(&mut self, controller: CarouselController) {
        self.carousel = Some(controller);
    }

    fn report(&mut self, message: &str) {
        self.diagnostics.push(message.to_string());
    }
}
