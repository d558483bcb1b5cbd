//! Jinja prompt templates.
//!
//! Built-in templates are compiled into the binary. A `.jinja` file with the same
//! relative name under `templates/prompts/` in the working directory overrides the
//! built-in one, so prompts can be tuned without a rebuild.

use minijinja::{Environment, Value};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Override directory relative to the working directory
const TEMPLATE_DIR: &str = "templates/prompts";

/// Name of the issue classifier instruction template
pub const ISSUE_CLASSIFIER_TEMPLATE: &str = "issue_classifier/analyze.jinja";

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[(
    ISSUE_CLASSIFIER_TEMPLATE,
    include_str!("../../../templates/prompts/issue_classifier/analyze.jinja"),
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

    for (name, source) in BUILTIN_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!("Built-in template {} is invalid: {}", name, e);
        }
    }

    let override_dir = Path::new(TEMPLATE_DIR);
    if override_dir.is_dir() {
        load_overrides(&mut env, override_dir, override_dir);
    }

    env
}

fn load_overrides(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            load_overrides(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Template names always use forward slashes
        let name = relative.to_string_lossy().replace('\\', "/");

        match std::fs::read_to_string(&path) {
            Ok(source) => {
                // Loaded once per process, so leaking gives the environment 'static sources
                let static_name: &'static str = Box::leak(name.clone().into_boxed_str());
                let static_source: &'static str = Box::leak(source.into_boxed_str());
                if let Err(e) = env.add_template(static_name, static_source) {
                    tracing::warn!("Ignoring invalid template override {}: {}", name, e);
                } else {
                    tracing::debug!("Loaded template override: {}", name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a named template with the given context.
///
/// ```ignore
/// let mut ctx = HashMap::new();
/// ctx.insert("description", Value::from("Screen stays black"));
/// let prompt = render_template(ISSUE_CLASSIFIER_TEMPLATE, &ctx)?;
/// ```
pub fn render_template(
    template_name: &str,
    ctx: &HashMap<&str, Value>,
) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    let render_ctx = Value::from_iter(ctx.iter().map(|(k, v)| (*k, v.clone())));

    template
        .render(render_ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_template() {
        let result = render_template("definitely_not_a_real_template.jinja", &HashMap::new());
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_issue_classifier_template_renders() {
        let mut ctx = HashMap::new();
        ctx.insert("description", Value::from("Printer jams on every page"));
        ctx.insert("locale", Value::from("English"));
        ctx.insert("has_image", Value::from(true));
        ctx.insert("urgency_levels", Value::from(vec!["LOW", "HIGH"]));
        ctx.insert("categories", Value::from(vec!["Hardware", "Peripheral"]));
        ctx.insert("step_count", Value::from(3));
        ctx.insert("schema", Value::from("{}"));

        let prompt = render_template(ISSUE_CLASSIFIER_TEMPLATE, &ctx).unwrap();

        assert!(prompt.contains("\"Printer jams on every page\""));
        assert!(prompt.contains("and the attached image"));
        assert!(prompt.contains("exactly one of LOW, HIGH"));
        assert!(prompt.contains("such as Hardware, Peripheral"));
        assert!(prompt.contains("3 simple troubleshooting steps"));
        assert!(prompt.contains("(in English)"));
    }
}
