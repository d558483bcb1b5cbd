use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub gemini: GeminiConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Language the diagnosis and troubleshooting steps are written in
    pub locale: String,
    /// Start the session with the sample tickets already in the collection
    pub seed_samples: bool,
}

/// Configuration for the Gemini reasoning service
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; classification falls back to the unavailable result when absent
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Transport-level request timeout
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            gemini: GeminiConfig::from_env()?,
        })
    }
}

impl AppConfig {
    const DEFAULT_LOCALE: &'static str = "Thai";

    pub fn from_env() -> Result<Self, String> {
        let locale = env::var("TRIAGE_LOCALE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| Self::DEFAULT_LOCALE.to_string());

        let seed_samples = parse_bool("TICKET_SEED_SAMPLES", false)?;

        Ok(Self {
            locale,
            seed_samples,
        })
    }
}

impl GeminiConfig {
    const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";
    const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";
    const DEFAULT_TIMEOUT_SECS: u64 = 60;

    pub fn from_env() -> Result<Self, String> {
        // API_KEY is accepted for compatibility with existing deployments
        let api_key = non_empty_var("GEMINI_API_KEY").or_else(|| non_empty_var("API_KEY"));

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| Self::DEFAULT_MODEL.to_string());

        let base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "GEMINI_TIMEOUT_SECS must be a valid number".to_string())?;

        Ok(Self {
            api_key,
            model,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Endpoint for a single generateContent call
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

/// Value of `key`, treating an empty or whitespace-only setting as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn parse_bool(key: &str, default: bool) -> Result<bool, String> {
    match env::var(key) {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            _ => Err(format!("{} must be a boolean", key)),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_content_url() {
        let config = GeminiConfig {
            api_key: None,
            model: "gemini-2.5-flash".to_string(),
            base_url: "http://localhost:8080".to_string(),
            request_timeout: Duration::from_secs(5),
        };

        assert_eq!(
            config.generate_content_url(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_empty_primary_key_falls_back_to_secondary() {
        env::set_var("HELPDESK_TRIAGE_TEST_EMPTY_KEY", "");
        env::set_var("HELPDESK_TRIAGE_TEST_BLANK_KEY", "   ");
        env::set_var("HELPDESK_TRIAGE_TEST_SECONDARY_KEY", "secret");

        assert_eq!(non_empty_var("HELPDESK_TRIAGE_TEST_EMPTY_KEY"), None);
        assert_eq!(non_empty_var("HELPDESK_TRIAGE_TEST_BLANK_KEY"), None);
        assert_eq!(
            non_empty_var("HELPDESK_TRIAGE_TEST_EMPTY_KEY")
                .or_else(|| non_empty_var("HELPDESK_TRIAGE_TEST_SECONDARY_KEY")),
            Some("secret".to_string())
        );
    }

    #[test]
    fn test_parse_bool_default_when_unset() {
        assert!(parse_bool("HELPDESK_TRIAGE_TEST_UNSET_FLAG", true).unwrap());
        assert!(!parse_bool("HELPDESK_TRIAGE_TEST_UNSET_FLAG", false).unwrap());
    }
}
