//! Stylesheet synthesis
//!
//! Maps the enumerated style choices onto fixed lookup tables and builds the
//! single stylesheet the widget injects. Custom properties are scoped to the
//! render target so the host page's own `:root` is left alone.

use crate::config::{Font, Layout, Shadow, Theme, Token, WidgetConfig, RENDER_TARGET_ID};

/// Stable id of the injected `<style>` element; hosts replace rather than
/// duplicate a sheet with this id
pub const STYLESHEET_ID: &str = "testimania-widget-styles";

/// Shadow lookup table; the `md` entry is the designated default
pub const SHADOW_TABLE: &[(Shadow, &str)] = &[
    (Shadow::None, "none"),
    (Shadow::Sm, "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
    (
        Shadow::Md,
        "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)",
    ),
    (
        Shadow::Lg,
        "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)",
    ),
];

/// Font lookup table; the `sans` entry is the designated default
pub const FONT_TABLE: &[(Font, &str)] = &[
    (Font::Sans, "ui-sans-serif, system-ui, sans-serif"),
    (
        Font::Serif,
        "ui-serif, Georgia, Cambria, \"Times New Roman\", Times, serif",
    ),
    (
        Font::Mono,
        "ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, \"Liberation Mono\", \"Courier New\", monospace",
    ),
];

fn lookup<K: PartialEq + Copy>(table: &[(K, &'static str)], key: K, default: K) -> &'static str {
    table
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| table.iter().find(|(k, _)| *k == default))
        .map_or("", |(_, v)| *v)
}

/// CSS `box-shadow` for a shadow variant
#[must_use]
pub fn shadow_css(shadow: Shadow) -> &'static str {
    lookup(SHADOW_TABLE, shadow, Shadow::default())
}

/// CSS `font-family` for a font variant
#[must_use]
pub fn font_css(font: Font) -> &'static str {
    lookup(FONT_TABLE, font, Font::default())
}

/// Shadow for a raw attribute token; unknown tokens get the default entry
#[must_use]
pub fn shadow_for_token(token: &str) -> &'static str {
    shadow_css(Shadow::resolve(Some(token)))
}

/// Font stack for a raw attribute token; unknown tokens get the default entry
#[must_use]
pub fn font_for_token(token: &str) -> &'static str {
    font_css(Font::resolve(Some(token)))
}

/// A synthesized stylesheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    /// Element id, always [`STYLESHEET_ID`]
    pub id: &'static str,
    /// CSS text
    pub css: String,
}

/// Prefixes of the classes that encode a theme or layout choice
pub const VARIANT_CLASS_PREFIXES: &[&str] = &["tm-theme-", "tm-layout-"];

/// Whether `class` encodes a theme or layout choice
#[must_use]
pub fn is_variant_class(class: &str) -> bool {
    VARIANT_CLASS_PREFIXES.iter().any(|p| class.starts_with(p))
}

/// Classes applied to the render target
#[must_use]
pub fn container_classes(theme: Theme, layout: Layout) -> Vec<String> {
    vec![
        "tm-widget-container".to_string(),
        format!("tm-theme-{theme}"),
        format!("tm-layout-{layout}"),
    ]
}

/// Builds the widget stylesheet for a config
#[must_use]
pub fn synthesize(config: &WidgetConfig) -> Stylesheet {
    let target = format!("#{RENDER_TARGET_ID}");
    let mut css = String::with_capacity(3072);

    css.push_str(&format!(
        "{target} {{\n  --tm-primary-color: {color};\n  --tm-font-family: {font};\n  \
         --tm-card-border-radius: {radius};\n  --tm-card-shadow: {shadow};\n  --tm-gap: {gap};\n  \
         font-family: var(--tm-font-family);\n}}\n",
        color = config.primary_color,
        font = font_css(config.font),
        radius = config.border_radius,
        shadow = shadow_css(config.shadow),
        gap = config.gap,
    ));
    css.push_str(&format!(
        ".tm-widget-container {{ max-width: {}; margin: 20px auto; }}\n",
        config.max_width
    ));
    css.push_str(BASE_RULES);
    css.push_str(THEME_RULES);
    css.push_str(&format!(
        ".tm-layout-grid .testimonials-wrapper {{ display: grid; grid-template-columns: repeat({}, 1fr); gap: var(--tm-gap); }}\n",
        config.grid_columns.max(1)
    ));
    css.push_str(LAYOUT_RULES);

    Stylesheet {
        id: STYLESHEET_ID,
        css,
    }
}

const BASE_RULES: &str = "\
.tm-widget-header { font-size: 1.5em; font-weight: bold; margin-bottom: 16px; text-align: center; }
.tm-card { border: 1px solid #e2e8f0; border-left: 5px solid var(--tm-primary-color); padding: 20px; border-radius: var(--tm-card-border-radius); box-shadow: var(--tm-card-shadow); }
.tm-stars { display: flex; color: var(--tm-primary-color); margin-bottom: 8px; }
.tm-title { font-weight: bold; font-size: 1.1em; margin-bottom: 4px; }
.tm-content { line-height: 1.6; margin-bottom: 12px; }
.tm-author { font-style: italic; font-size: 0.9em; }
.tm-fallback { text-align: center; opacity: 0.8; }
";

const THEME_RULES: &str = "\
.tm-theme-light { color-scheme: light; }
.tm-theme-light .tm-widget-header { color: #1a202c; }
.tm-theme-light .tm-card { background: #fff; color: #333; }
.tm-theme-dark { color-scheme: dark; }
.tm-theme-dark .tm-widget-header { color: #f7fafc; }
.tm-theme-dark .tm-card { background: #2d3748; color: #f7fafc; border-color: #4a5568; }
";

const LAYOUT_RULES: &str = "\
.tm-layout-list .testimonials-wrapper { display: flex; flex-direction: column; gap: var(--tm-gap); }
.tm-layout-single .testimonials-wrapper { display: block; }
.tm-carousel { position: relative; overflow: hidden; }
.tm-carousel-inner { display: flex; transition: transform 0.5s ease; }
.tm-carousel-item { min-width: 100%; box-sizing: border-box; padding: 0 40px; }
.tm-carousel-btn { position: absolute; top: 50%; transform: translateY(-50%); background: rgba(0,0,0,0.2); color: white; border: none; border-radius: 50%; cursor: pointer; width: 32px; height: 32px; z-index: 1; }
.tm-carousel-btn.prev { left: 5px; }
.tm-carousel-btn.next { right: 5px; }
";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CssLength;

    #[test]
    fn test_every_variant_has_a_table_entry() {
        for shadow in Shadow::ALL {
            assert!(SHADOW_TABLE.iter().any(|(k, _)| k == shadow));
        }
        for font in Font::ALL {
            assert!(FONT_TABLE.iter().any(|(k, _)| k == font));
        }
    }

    #[test]
    fn test_unknown_tokens_get_default_entries() {
        assert_eq!(shadow_for_token("huge"), shadow_css(Shadow::Md));
        assert_eq!(shadow_for_token("huge"), shadow_for_token("huge"));
        assert_eq!(font_for_token("wingdings"), font_css(Font::Sans));
        assert_eq!(shadow_for_token("none"), "none");
        assert!(font_for_token("SERIF").contains("Georgia"));
    }

    #[test]
    fn test_container_classes() {
        assert_eq!(
            container_classes(Theme::Dark, Layout::Grid),
            vec!["tm-widget-container", "tm-theme-dark", "tm-layout-grid"]
        );
    }

    #[test]
    fn test_synthesize_embeds_config_values() {
        let mut config = WidgetConfig::new("acme").with_grid_columns(4);
        config.gap = CssLength::parse("24").unwrap();
        config.shadow = Shadow::Lg;
        let sheet = synthesize(&config);

        assert_eq!(sheet.id, STYLESHEET_ID);
        assert!(sheet.css.starts_with("#testimania-widget {"));
        assert!(sheet.css.contains("--tm-primary-color: #f59e0b;"));
        assert!(sheet.css.contains("--tm-gap: 24px;"));
        assert!(sheet.css.contains(shadow_css(Shadow::Lg)));
        assert!(sheet.css.contains("grid-template-columns: repeat(4, 1fr)"));
        assert!(sheet.css.contains("max-width: 800px"));
        assert!(!sheet.css.contains(":root"));
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let config = WidgetConfig::new("acme");
        assert_eq!(synthesize(&config), synthesize(&config));
    }
}
