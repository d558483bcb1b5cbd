use minijinja::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::core::error::Result;
use crate::features::tickets::models::Urgency;
use crate::features::triage::clients::{InlineImage, ReasoningClient, ReasoningRequest};
use crate::features::triage::models::ClassificationResult;
use crate::shared::constants::{SUGGESTED_CATEGORIES, TROUBLESHOOTING_STEP_COUNT};
use crate::shared::image::EncodedImage;
use crate::shared::llm::{parse_with_fallback, preview, LlmResponse};
use crate::shared::prompts::{render_template, ISSUE_CLASSIFIER_TEMPLATE};

/// Classifies problem descriptions through an external reasoning service.
///
/// Holds no state between calls. Every call issues exactly one request and never
/// fails: transport errors, unusable answers and prompt problems all produce the
/// fallback result.
pub struct IssueClassifier {
    client: Arc<dyn ReasoningClient>,
    locale: String,
}

impl IssueClassifier {
    pub fn new(client: Arc<dyn ReasoningClient>, locale: impl Into<String>) -> Self {
        Self {
            client,
            locale: locale.into(),
        }
    }

    /// Classify a problem description, with an optional image as extra context.
    ///
    /// The caller gates on a non-empty description; it is not re-checked here.
    pub async fn classify(
        &self,
        description: &str,
        image: Option<&EncodedImage>,
    ) -> ClassificationResult {
        match self.request_classification(description, image).await {
            Ok(result) => {
                if result.is_success() {
                    tracing::info!(
                        "Issue classified: urgency={}, category={}",
                        result.urgency,
                        result.category
                    );
                } else {
                    tracing::warn!(
                        "Issue classification used fallback: {:?}",
                        result.fallback_reason
                    );
                }
                result
            }
            Err(e) => {
                tracing::warn!("Issue classification unavailable, using fallback: {}", e);
                ClassificationResult::fallback(e.to_string())
            }
        }
    }

    async fn request_classification(
        &self,
        description: &str,
        image: Option<&EncodedImage>,
    ) -> Result<ClassificationResult> {
        let request = ReasoningRequest {
            instruction: self.build_instruction(description, image.is_some())?,
            image: image.map(|img| InlineImage {
                mime_type: img.mime_type().to_string(),
                data: img.base64_data().to_string(),
            }),
            response_schema: Self::response_schema(),
        };

        let text = self.client.generate(&request).await?;

        tracing::debug!("Raw classification response: {}", preview(&text));

        Ok(parse_with_fallback::<ClassificationResult>(&text))
    }

    fn build_instruction(&self, description: &str, has_image: bool) -> Result<String> {
        let urgency_levels: Vec<&str> = Urgency::ALL.iter().map(|u| u.as_str()).collect();

        let mut ctx: HashMap<&str, Value> = HashMap::new();
        ctx.insert("description", Value::from(description));
        ctx.insert("has_image", Value::from(has_image));
        ctx.insert("locale", Value::from(self.locale.as_str()));
        ctx.insert("urgency_levels", Value::from(urgency_levels));
        ctx.insert("categories", Value::from(SUGGESTED_CATEGORIES.to_vec()));
        ctx.insert("step_count", Value::from(TROUBLESHOOTING_STEP_COUNT));
        ctx.insert(
            "schema",
            Value::from(ClassificationResult::json_schema_string()),
        );

        Ok(render_template(ISSUE_CLASSIFIER_TEMPLATE, &ctx)?)
    }

    /// Response schema in the reasoning service's OpenAPI subset
    pub fn response_schema() -> serde_json::Value {
        let urgency_levels: Vec<&str> = Urgency::ALL.iter().map(|u| u.as_str()).collect();

        serde_json::json!({
            "type": "OBJECT",
            "properties": {
                "diagnosis": { "type": "STRING" },
                "urgency": { "type": "STRING", "enum": urgency_levels },
                "category": { "type": "STRING" },
                "troubleshootingSteps": {
                    "type": "ARRAY",
                    "items": { "type": "STRING" }
                }
            },
            "required": ["diagnosis", "urgency", "category", "troubleshootingSteps"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::triage::clients::DisabledClient;
    use crate::features::triage::models::{FALLBACK_DIAGNOSIS, FALLBACK_STEP};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Returns a canned answer and records every request it receives
    struct ScriptedClient {
        answer: std::result::Result<String, String>,
        requests: Mutex<Vec<ReasoningRequest>>,
    }

    impl ScriptedClient {
        fn answering(text: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Ok(text.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                answer: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<ReasoningRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ReasoningClient for ScriptedClient {
        async fn generate(&self, request: &ReasoningRequest) -> Result<String> {
            self.requests.lock().unwrap().push(request.clone());
            self.answer
                .clone()
                .map_err(AppError::ExternalServiceError)
        }
    }

    const POWER_ISSUE: &str = r#"{"diagnosis": "Power issue", "urgency": "HIGH", "category": "Hardware",
        "troubleshootingSteps": ["Check power cable", "Try another outlet", "Remove battery and retry"]}"#;

    fn assert_fallback(result: &ClassificationResult) {
        assert!(!result.is_success());
        assert_eq!(result.diagnosis, FALLBACK_DIAGNOSIS);
        assert_eq!(result.urgency, "MEDIUM");
        assert_eq!(result.category, "Unknown");
        assert_eq!(result.troubleshooting_steps, vec![FALLBACK_STEP.to_string()]);
    }

    #[tokio::test]
    async fn test_classify_success() {
        let client = ScriptedClient::answering(POWER_ISSUE);
        let classifier = IssueClassifier::new(client.clone(), "Thai");

        let result = classifier.classify("เปิดไม่ติด", None).await;

        assert!(result.is_success());
        assert_eq!(result.diagnosis, "Power issue");
        assert_eq!(result.urgency_level(), Some(Urgency::High));
        assert_eq!(result.category, "Hardware");
        assert_eq!(result.troubleshooting_steps.len(), 3);
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_classify_fenced_answer() {
        let answer = format!("Here you go:\n```json\n{}\n```", POWER_ISSUE);
        let classifier = IssueClassifier::new(ScriptedClient::answering(&answer), "Thai");

        let result = classifier.classify("เปิดไม่ติด", None).await;
        assert!(result.is_success());
        assert_eq!(result.category, "Hardware");
    }

    #[tokio::test]
    async fn test_transport_error_returns_fallback() {
        let client = ScriptedClient::failing("timed out");
        let classifier = IssueClassifier::new(client.clone(), "Thai");

        let result = classifier.classify("จอฟ้า", None).await;

        assert_fallback(&result);
        assert!(result.fallback_reason.unwrap().contains("timed out"));
        // No retries
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_client_returns_fallback() {
        let classifier = IssueClassifier::new(Arc::new(DisabledClient::new("no key")), "Thai");
        assert_fallback(&classifier.classify("เครื่องช้ามาก", None).await);
    }

    #[tokio::test]
    async fn test_malformed_answer_returns_fallback() {
        let classifier =
            IssueClassifier::new(ScriptedClient::answering("Sorry, I can't do that."), "Thai");
        assert_fallback(&classifier.classify("เครื่องช้ามาก", None).await);
    }

    #[tokio::test]
    async fn test_missing_field_returns_fallback() {
        let answer = r#"{"diagnosis": "DNS", "urgency": "LOW", "category": "Network"}"#;
        let classifier = IssueClassifier::new(ScriptedClient::answering(answer), "Thai");
        assert_fallback(&classifier.classify("เข้าเว็บไม่ได้", None).await);
    }

    #[tokio::test]
    async fn test_request_carries_instruction_schema_and_image() {
        let client = ScriptedClient::answering(POWER_ISSUE);
        let classifier = IssueClassifier::new(client.clone(), "Thai");
        let image = EncodedImage::new("data:image/png;base64,iVBORw0KGgo=");

        classifier.classify("หน้าจอแตก", Some(&image)).await;

        let calls = client.calls();
        let request = &calls[0];
        assert!(request.instruction.contains("\"หน้าจอแตก\""));
        assert!(request.instruction.contains("(in Thai)"));
        assert!(request.instruction.contains("and the attached image"));
        assert!(request.instruction.contains("troubleshootingSteps"));
        assert_eq!(
            request.image,
            Some(InlineImage {
                mime_type: "image/png".to_string(),
                data: "iVBORw0KGgo=".to_string(),
            })
        );
        assert_eq!(
            request.response_schema["required"],
            serde_json::json!(["diagnosis", "urgency", "category", "troubleshootingSteps"])
        );
    }

    #[tokio::test]
    async fn test_request_without_image() {
        let client = ScriptedClient::answering(POWER_ISSUE);
        let classifier = IssueClassifier::new(client.clone(), "English");

        classifier.classify("Laptop will not boot", None).await;

        let request = &client.calls()[0];
        assert!(request.image.is_none());
        assert!(!request.instruction.contains("attached image"));
        assert!(request.instruction.contains("(in English)"));
    }

    #[test]
    fn test_response_schema_urgency_enum() {
        let schema = IssueClassifier::response_schema();
        assert_eq!(
            schema["properties"]["urgency"]["enum"],
            serde_json::json!(["LOW", "MEDIUM", "HIGH", "CRITICAL"])
        );
        assert_eq!(
            schema["properties"]["troubleshootingSteps"]["items"]["type"],
            "STRING"
        );
    }
}
