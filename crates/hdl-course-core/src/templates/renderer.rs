//! Handlebars-based renderer for document shells.
//!
//! Inline and data templates go through [`super::text::interpolate`]. Document shells
//! (the reveal.js wrapper around every deck) need loops over stylesheet and script
//! lists, so they are written as Handlebars templates instead and rendered here.
//!
//! The engine runs in **strict mode**: a `{{variable}}` missing from the data context
//! is a [`CourseError::MissingParameter`], matching the guarantee `interpolate` gives.
//! HTML escaping is disabled because every value handed to a shell is already markup
//! (slide bodies, `&amp;`-encoded titles).
//!
//! ## Usage
//!
//! ```ignore
//! use crate::templates::{embedded, renderer::TemplateRenderer};
//!
//! let renderer = TemplateRenderer::new();
//! let data = serde_json::json!({ "title": "Day 2.1: Data Types", "slides": "..." });
//! let html = renderer.render(embedded::DECK_SHELL, &data)?;
//! ```

use handlebars::{Handlebars, RenderErrorReason};
use serde_json::Value;

use crate::error::{CourseError, Result};

/// Template renderer for document shells.
pub struct TemplateRenderer {
    hbs: Handlebars<'static>,
}

impl TemplateRenderer {
    /// Create a new renderer with strict mode on and escaping off.
    pub fn new() -> Self {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);
        Self { hbs }
    }

    /// Render a template string with the given data context.
    pub fn render(&self, template: &str, data: &Value) -> Result<String> {
        self.hbs
            .render_template(template, data)
            .map_err(|e| match e.reason() {
                RenderErrorReason::MissingVariable(name) => CourseError::MissingParameter {
                    name: name.clone().unwrap_or_else(|| "<unknown>".into()),
                },
                _ => CourseError::TemplateRender(e.to_string()),
            })
    }
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}
