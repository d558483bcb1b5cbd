mod engine;

pub use engine::{render_template, TemplateError, ISSUE_CLASSIFIER_TEMPLATE};
