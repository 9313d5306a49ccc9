//! Handlebars-backed HTML rendering

use handlebars::Handlebars;
use tracing::debug;

use crate::error::WebServerResult;
use crate::traits::TemplateRenderer;

/// Name of the document template used for every horoscope variant.
pub const BASIC_TEMPLATE: &str = "basic_template";

const BASIC_TEMPLATE_SOURCE: &str = include_str!("../../templates/basic_template.html");

/// Template renderer with the document templates compiled in.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> WebServerResult<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(BASIC_TEMPLATE, BASIC_TEMPLATE_SOURCE)?;
        Ok(Self { registry })
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, template: &str, data: &serde_json::Value) -> WebServerResult<String> {
        let html = self.registry.render(template, data)?;
        debug!("Rendered template '{}' ({} bytes)", template, html.len());
        Ok(html)
    }
}
