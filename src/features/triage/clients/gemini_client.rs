use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{InlineImage, ReasoningClient, ReasoningRequest};
use crate::core::config::GeminiConfig;
use crate::core::error::{AppError, Result};
use crate::shared::llm::preview;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    InlineData {
        inline_data: InlineData<'a>,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a serde_json::Value,
}

/// generateContent response body, reduced to the parts that are read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Google Gemini error envelope
#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// Status and message from a Gemini error envelope, or the raw body when it is not one
fn error_detail(body: &str) -> String {
    serde_json::from_str::<GeminiErrorResponse>(body)
        .map(|e| format!("{} {}", e.error.status, e.error.message).trim().to_string())
        .unwrap_or_else(|_| body.trim().to_string())
}

impl GenerateContentResponse {
    /// Text of the first candidate, all parts joined
    fn into_text(self) -> Result<String> {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(AppError::ExternalServiceError(format!(
                "Prompt blocked by reasoning service: {}",
                reason
            )));
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalServiceError("No response from AI".to_string()))?;

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AppError::ExternalServiceError(format!(
                "Empty response from AI (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

/// Client for the Gemini `generateContent` REST endpoint
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::Config("GEMINI_API_KEY is not set".to_string()))?;

        let http_client = reqwest::Client::builder()
            .user_agent(concat!("helpdesk-triage/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {:?}", e);
                AppError::Internal(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http_client,
            endpoint: config.generate_content_url(),
            api_key,
        })
    }

    fn build_body<'a>(request: &'a ReasoningRequest) -> GenerateContentRequest<'a> {
        let mut parts = vec![RequestPart::Text {
            text: &request.instruction,
        }];

        if let Some(InlineImage { mime_type, data }) = &request.image {
            parts.push(RequestPart::InlineData {
                inline_data: InlineData { mime_type, data },
            });
        }

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: &request.response_schema,
            },
        }
    }
}

#[async_trait]
impl ReasoningClient for GeminiClient {
    async fn generate(&self, request: &ReasoningRequest) -> Result<String> {
        tracing::debug!(
            "Calling reasoning service {} (image attached: {})",
            self.endpoint,
            request.image.is_some()
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::build_body(request))
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Reasoning service request failed: {}", e);
                AppError::ExternalServiceError(format!("Reasoning service request failed: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = error_detail(&body);
            tracing::error!("Reasoning service error: HTTP {} - {}", status, detail);
            return Err(AppError::ExternalServiceError(format!(
                "Reasoning service error: HTTP {} ({})",
                status,
                preview(&detail)
            )));
        }

        let payload = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| {
                tracing::error!("Failed to parse reasoning service response: {}", e);
                AppError::ExternalServiceError(format!("Failed to parse response: {}", e))
            })?;

        payload.into_text()
    }
}
