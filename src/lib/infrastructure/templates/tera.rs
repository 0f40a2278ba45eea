//! Tera template renderer implementation

use clap::Parser;
use css_inline::inline;
use serde_json::Value;
use tera::{Context, Tera};

use crate::domain::communication::templates::{TemplateError, TemplateRenderer};

/// Template environment configuration
#[derive(Clone, Debug, Parser)]
pub struct TemplateConfig {
    /// The glob the template environment is loaded from
    #[clap(long, env = "TEMPLATE_GLOB", default_value = "templates/**/*.html")]
    pub glob: String,
}

/// Tera-backed template renderer
///
/// Templates are addressed by their path relative to the glob root, e.g.
/// `emails/notification.html`. The rendered content is wrapped in the
/// named layout through its `content` variable, and the final HTML has
/// its styles inlined for mail-client compatibility.
#[derive(Debug, Clone)]
pub struct TeraRenderer {
    tera: Tera,
}

impl TeraRenderer {
    /// Loads the template environment described by `config`.
    pub fn new(config: &TemplateConfig) -> Result<Self, TemplateError> {
        let tera = Tera::new(&config.glob).map_err(|source| TemplateError::Load {
            glob: config.glob.clone(),
            source,
        })?;

        Ok(Self { tera })
    }
}

impl TemplateRenderer for TeraRenderer {
    fn render(&self, template: &str, layout: &str, data: &Value) -> Result<String, TemplateError> {
        let context = Context::from_serialize(data).map_err(|source| TemplateError::Render {
            name: template.to_string(),
            source,
        })?;

        let content = self
            .tera
            .render(template, &context)
            .map_err(|source| TemplateError::Render {
                name: template.to_string(),
                source,
            })?;

        let mut layout_context = context;
        layout_context.insert("content", &content);

        let html = self
            .tera
            .render(layout, &layout_context)
            .map_err(|source| TemplateError::Render {
                name: layout.to_string(),
                source,
            })?;

        Ok(inline(&html)?)
    }
}
