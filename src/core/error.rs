use thiserror::Error;

use crate::shared::prompts::TemplateError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();

        AppError::Validation(messages.join(", "))
    }
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        tracing::error!("Template error: {}", e);
        AppError::Internal(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(length(min = 1, message = "Name is required"))]
        name: String,
    }

    #[test]
    fn test_validation_errors_convert_with_messages() {
        let probe = Probe {
            name: String::new(),
        };
        let err: AppError = probe.validate().unwrap_err().into();

        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Name is required"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_template_error_becomes_internal() {
        let err: AppError = TemplateError::NotFound("missing.jinja".to_string()).into();
        assert!(matches!(err, AppError::Internal(_)));
        assert!(err.to_string().contains("missing.jinja"));
    }
}
