//! Kickstart rendering with MiniJinja.
//! Answers are bound as nested values, so a dotted path in the template is a
//! chain of attribute lookups into the answer document.
use crate::error::Result;
use minijinja::{Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Answers bound to the template's variables
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
#[derive(Debug, Clone, Copy)]
pub struct MiniJinjaRenderer {
    undefined_behavior: UndefinedBehavior,
}

impl MiniJinjaRenderer {
    /// Creates a renderer that fails on any reference to an absent value.
    pub fn new() -> Self {
        Self { undefined_behavior: UndefinedBehavior::Strict }
    }

    fn environment<'source>(&self) -> Environment<'source> {
        let mut env = Environment::new();
        env.set_undefined_behavior(self.undefined_behavior);
        env.set_keep_trailing_newline(true);
        env
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a kickstart template using MiniJinja.
    ///
    /// # Errors
    /// * `Error::RenderError` if:
    ///   - The template does not compile
    ///   - An expression fails to evaluate
    ///   - A referenced value is absent
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        let mut env = self.environment();
        env.add_template("kickstart", template)?;
        let tmpl = env.get_template("kickstart")?;
        Ok(tmpl.render(context)?)
    }
}
