//! Template rendering for composed sprites.
//!
//! The engine hands a frozen `SpriteData` to this module; rendering makes
//! no assumptions about template syntax beyond the documented field
//! names. Ships a default stylesheet template and an `inline` partial for
//! inline-SVG embedding; user templates come in through `render_str`.

mod templates;

use handlebars::{no_escape, Handlebars};

use crate::error::{Result, SpriteError};
use crate::types::SpriteData;

pub use templates::{CSS_TEMPLATE, INLINE_SVG_TEMPLATE};

/// Name of the built-in stylesheet template.
const CSS_TEMPLATE_NAME: &str = "css";
/// Name of the inline-SVG partial available to all templates.
const INLINE_PARTIAL_NAME: &str = "inline";

/// Renders sprite data through handlebars templates.
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl TemplateRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        // Output is CSS/SVG, not HTML; leave values untouched.
        registry.register_escape_fn(no_escape);
        registry
            .register_template_string(CSS_TEMPLATE_NAME, CSS_TEMPLATE)
            .map_err(template_error)?;
        registry
            .register_template_string(INLINE_PARTIAL_NAME, INLINE_SVG_TEMPLATE)
            .map_err(template_error)?;
        Ok(Self { registry })
    }

    /// Render the built-in stylesheet.
    pub fn render_css(&self, data: &SpriteData) -> Result<String> {
        self.registry
            .render(CSS_TEMPLATE_NAME, data)
            .map_err(render_error)
    }

    /// Render a user-supplied template against the data model.
    ///
    /// The template can pull in the built-in `{{> inline}}` partial.
    pub fn render_str(&self, template: &str, data: &SpriteData) -> Result<String> {
        self.registry
            .render_template(template, data)
            .map_err(render_error)
    }
}

fn template_error(e: handlebars::TemplateError) -> SpriteError {
    SpriteError::Render {
        message: format!("Invalid template: {}", e),
        help: None,
    }
}

fn render_error(e: handlebars::RenderError) -> SpriteError {
    SpriteError::Render {
        message: format!("Template rendering failed: {}", e),
        help: Some("Check that the template only references documented sprite data fields".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DimensionInfo, IconRecord, Selector};

    fn selector(expression: &str, first: bool, last: bool) -> Selector {
        Selector {
            expression: expression.to_string(),
            raw: expression.replace("\\:", ":"),
            first,
            last,
        }
    }

    fn sample_data(common: Option<&str>, dims: bool) -> SpriteData {
        SpriteData {
            common: common.map(str::to_string),
            prefix: common.unwrap_or("icon").to_string(),
            sprite: "svg/sprite.svg".to_string(),
            dims,
            padding: 0,
            width: 20.0,
            height: 30.0,
            icons: vec![
                IconRecord {
                    name: "alpha".to_string(),
                    width: 10.0,
                    height: 10.0,
                    last: false,
                    selectors: vec![selector("icon-alpha", true, true)],
                    position: "0 0".to_string(),
                    position_x: 0.0,
                    position_y: 0.0,
                    dimensions: DimensionInfo {
                        selectors: vec![selector("icon-alpha-dims", true, true)],
                        width: 10.0,
                        height: 10.0,
                    },
                    markup: "<svg id=\"alpha\" y=\"0\"/>".to_string(),
                },
                IconRecord {
                    name: "beta".to_string(),
                    width: 20.0,
                    height: 15.0,
                    last: true,
                    selectors: vec![
                        selector("icon-beta", true, false),
                        selector("icon-beta\\:regular", false, true),
                    ],
                    position: "0 -10px".to_string(),
                    position_x: 0.0,
                    position_y: -10.0,
                    dimensions: DimensionInfo {
                        selectors: vec![selector("icon-beta-dims", true, true)],
                        width: 20.0,
                        height: 15.0,
                    },
                    markup: "<svg id=\"beta\" y=\"10\"/>".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_css_without_common_repeats_background() {
        let renderer = TemplateRenderer::new().unwrap();
        let css = renderer.render_css(&sample_data(None, false)).unwrap();

        assert!(css.contains(".icon-alpha {"));
        assert!(css.contains("background-image: url(\"svg/sprite.svg\");"));
        assert!(css.contains("background-position: 0 -10px;"));
        // Two icons, each carrying its own background-image rule.
        assert_eq!(css.matches("background-image").count(), 2);
    }

    #[test]
    fn test_css_with_common_hoists_background() {
        let renderer = TemplateRenderer::new().unwrap();
        let css = renderer.render_css(&sample_data(Some("icon"), false)).unwrap();

        assert!(css.starts_with(".icon {"));
        // The shared rule carries the only background-image.
        assert_eq!(css.matches("background-image").count(), 1);
    }

    #[test]
    fn test_css_selector_groups_join_with_commas() {
        let renderer = TemplateRenderer::new().unwrap();
        let css = renderer.render_css(&sample_data(None, false)).unwrap();
        assert!(css.contains(".icon-beta,\n.icon-beta\\:regular {"));
    }

    #[test]
    fn test_css_dimension_rules_gated_by_dims() {
        let renderer = TemplateRenderer::new().unwrap();

        let without = renderer.render_css(&sample_data(None, false)).unwrap();
        assert!(!without.contains("-dims"));

        let with = renderer.render_css(&sample_data(None, true)).unwrap();
        assert!(with.contains(".icon-alpha-dims {"));
        assert!(with.contains("width: 10px;"));
        assert!(with.contains("height: 15px;"));
    }

    #[test]
    fn test_custom_template() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer
            .render_str(
                "{{#each icons}}{{name}}@{{position}};{{/each}}",
                &sample_data(None, false),
            )
            .unwrap();
        assert_eq!(out, "alpha@0 0;beta@0 -10px;");
    }

    #[test]
    fn test_inline_partial_reassembles_sprite() {
        let renderer = TemplateRenderer::new().unwrap();
        let out = renderer
            .render_str("{{> inline}}", &sample_data(None, false))
            .unwrap();
        assert!(out.starts_with("<svg xmlns="));
        assert!(out.contains("width=\"20\" height=\"30\""));
        assert!(out.contains("<svg id=\"alpha\" y=\"0\"/>"));
        assert!(out.ends_with("</svg>"));
    }

    #[test]
    fn test_invalid_template_is_render_error() {
        let renderer = TemplateRenderer::new().unwrap();
        let result = renderer.render_str("{{#each icons}}", &sample_data(None, false));
        assert!(matches!(result, Err(SpriteError::Render { .. })));
    }
}
