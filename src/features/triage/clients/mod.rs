mod gemini_client;

use async_trait::async_trait;

use crate::core::error::{AppError, Result};

pub use gemini_client::GeminiClient;

/// Image passed inline with a reasoning request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    /// Base64 body without any data-URL header
    pub data: String,
}

/// One request to the external reasoning service
#[derive(Debug, Clone)]
pub struct ReasoningRequest {
    pub instruction: String,
    pub image: Option<InlineImage>,
    /// Schema the service should constrain its JSON answer to
    pub response_schema: serde_json::Value,
}

/// Transport to a generative model. Returns the model's raw text answer.
#[async_trait]
pub trait ReasoningClient: Send + Sync {
    async fn generate(&self, request: &ReasoningRequest) -> Result<String>;
}

/// Client used when no reasoning service is configured; every call fails.
pub struct DisabledClient {
    reason: String,
}

impl DisabledClient {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl ReasoningClient for DisabledClient {
    async fn generate(&self, _request: &ReasoningRequest) -> Result<String> {
        Err(AppError::ExternalServiceError(self.reason.clone()))
    }
}
