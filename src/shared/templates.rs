//! Text templates rendered by the service.
//!
//! Templates live under `templates/` and are embedded at compile time, so the
//! binary does not depend on its working directory.

use std::sync::OnceLock;

use minijinja::{Environment, Value};
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template name and source, names relative to `templates/`
const TEMPLATES: &[(&str, &str)] = &[(
    "calendar/event.ics.jinja",
    include_str!("../../templates/calendar/event.ics.jinja"),
)];

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    for (name, source) in TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }
    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a template with the given context
///
/// # Example
/// ```ignore
/// let ics = render_template("calendar/event.ics.jinja", minijinja::context! { uid => "1" })?;
/// ```
pub fn render_template(template_name: &str, ctx: Value) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}
