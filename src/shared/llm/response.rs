use schemars::gen::SchemaGenerator;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Structured model output that degrades to a fixed value instead of failing.
pub trait LlmResponse: DeserializeOwned + JsonSchema + Sized {
    /// The value handed to callers when the output is missing or unusable
    fn fallback(reason: String) -> Self;

    /// Whether this value came from a successful parse
    fn is_success(&self) -> bool;

    /// JSON schema of the expected answer, embedded into prompts
    fn json_schema_string() -> String {
        let mut gen = SchemaGenerator::default();
        let schema = gen.root_schema_for::<Self>();
        serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string())
    }
}
