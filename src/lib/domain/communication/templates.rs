//! Template rendering module

#[cfg(test)]
use mockall::mock;

use serde_json::Value;
use thiserror::Error;

/// An error that can occur while producing email HTML from a template
#[derive(Debug, Error)]
pub enum TemplateError {
    /// The template environment could not be loaded
    #[error("failed to load templates from {glob:?}")]
    Load {
        /// The glob the environment is loaded from
        glob: String,

        /// The engine failure
        source: tera::Error,
    },

    /// A named template failed to render
    #[error("failed to render template {name:?}")]
    Render {
        /// The template that failed
        name: String,

        /// The engine failure
        source: tera::Error,
    },

    /// Styles could not be inlined into the rendered HTML
    #[error("failed to inline styles into the rendered email")]
    Inline(#[from] css_inline::InlineError),
}

/// Template renderer
///
/// The templating syntax is an implementation detail of the renderer;
/// callers only name a content template, a layout and a data mapping.
pub trait TemplateRenderer: Clone + Send + Sync + 'static {
    /// Render the named template inside the named layout.
    ///
    /// # Arguments
    /// * `template` - Name of the content template.
    /// * `layout` - Name of the layout the rendered content is wrapped in.
    /// * `data` - Key-value mapping exposed to both templates.
    ///
    /// # Returns
    /// The rendered HTML, ready to be emailed.
    fn render(&self, template: &str, layout: &str, data: &Value) -> Result<String, TemplateError>;
}

#[cfg(test)]
mock! {
    pub TemplateRenderer {}

    impl Clone for TemplateRenderer {
        fn clone(&self) -> Self;
    }

    impl TemplateRenderer for TemplateRenderer {
        fn render(&self, template: &str, layout: &str, data: &Value) -> Result<String, TemplateError>;
    }
}
