use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::features::tickets::models::Urgency;
use crate::shared::llm::LlmResponse;

/// Diagnosis shown when the reasoning service cannot be used
pub const FALLBACK_DIAGNOSIS: &str = "ไม่สามารถวิเคราะห์ได้ในขณะนี้ (AI Unavailable)";

/// Category recorded when the reasoning service cannot be used
pub const FALLBACK_CATEGORY: &str = "Unknown";

/// Single instruction shown when the reasoning service cannot be used
/// ("please wait for staff to contact you")
pub const FALLBACK_STEP: &str = "โปรดรอเจ้าหน้าที่ติดต่อกลับ";

/// Structured assessment of a problem description.
///
/// All four answer keys are required when deserializing model output; a payload that
/// misses one never becomes a `ClassificationResult` and the fallback is used instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[schemars(title = "ClassificationResult")]
pub struct ClassificationResult {
    #[schemars(description = "Short technical diagnosis of the problem")]
    pub diagnosis: String,

    #[schemars(description = "Urgency level: LOW, MEDIUM, HIGH, or CRITICAL")]
    pub urgency: String,

    #[schemars(
        description = "Problem category, e.g. Hardware, Software, Network, Peripheral, User Error"
    )]
    pub category: String,

    #[schemars(description = "Ordered troubleshooting steps the user can try immediately")]
    pub troubleshooting_steps: Vec<String>,

    /// Why this is the fallback result; `None` for a real classification
    #[serde(skip)]
    #[schemars(skip)]
    pub fallback_reason: Option<String>,
}

impl ClassificationResult {
    /// The urgency as an enum value, if the model used one of the four levels
    pub fn urgency_level(&self) -> Option<Urgency> {
        self.urgency.parse().ok()
    }
}

impl LlmResponse for ClassificationResult {
    fn fallback(reason: String) -> Self {
        Self {
            diagnosis: FALLBACK_DIAGNOSIS.to_string(),
            urgency: Urgency::Medium.as_str().to_string(),
            category: FALLBACK_CATEGORY.to_string(),
            troubleshooting_steps: vec![FALLBACK_STEP.to_string()],
            fallback_reason: Some(reason),
        }
    }

    fn is_success(&self) -> bool {
        self.fallback_reason.is_none()
    }
}
