use lazy_static::lazy_static;
use regex::Regex;

use super::LlmResponse;

lazy_static! {
    /// Fenced markdown block, with or without a language tag
    static ref FENCED_BLOCK_RE: Regex = Regex::new(r"(?s)```[A-Za-z]*[ \t]*\r?\n?(.*?)```").unwrap();

    /// Comma directly before a closing brace or bracket
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",(\s*[}\]])").unwrap();

    /// `"a" + "b"` style concatenation
    static ref JS_STRING_CONCAT_RE: Regex = Regex::new(r#""\s*\+\s*""#).unwrap();
}

/// Number of characters of model output kept in log lines and error messages
const PREVIEW_CHARS: usize = 200;

pub(crate) fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Locate the JSON object inside raw model output.
///
/// A fenced block wins over anything else. Otherwise the text is used as-is when it
/// already starts with `{`, and as a last resort the span from the first `{` to the
/// last `}` is taken.
pub fn extract_json_object(text: &str) -> Result<&str, String> {
    if let Some(block) = FENCED_BLOCK_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|block| block.starts_with('{'))
    {
        return Ok(block);
    }

    let trimmed = text.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed);
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => Ok(&text[start..=end]),
        (None, _) => Err("No JSON object found in response".to_string()),
        _ => Err("Incomplete JSON object in response".to_string()),
    }
}

/// Cheap textual fixes for mistakes models commonly make
pub fn apply_quick_fixes(json_str: &str) -> String {
    let joined = JS_STRING_CONCAT_RE.replace_all(json_str, "");
    TRAILING_COMMA_RE.replace_all(&joined, "$1").into_owned()
}

fn repair_with_llm_json(json_str: &str) -> Option<String> {
    let options = llm_json::RepairOptions::default();
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        llm_json::repair_json(json_str, &options)
    }));

    match outcome {
        Ok(Ok(repaired)) => Some(repaired),
        Ok(Err(e)) => {
            tracing::debug!("llm_json repair failed: {:?}", e);
            None
        }
        Err(_) => {
            tracing::warn!("llm_json repair panicked");
            None
        }
    }
}

/// Parse model output into `T`, trying progressively more forgiving strategies.
///
/// Required fields are enforced by `T`'s `Deserialize` impl, so a repaired payload
/// that lost a key still fails here.
fn try_parse<T>(text: &str) -> Result<T, String>
where
    T: LlmResponse,
{
    let json_str = extract_json_object(text)?;

    match serde_json::from_str::<T>(json_str) {
        Ok(parsed) => return Ok(parsed),
        Err(e) => tracing::debug!("Direct parse failed, applying quick fixes: {}", e),
    }

    let fixed = apply_quick_fixes(json_str);
    let mut last_error = match serde_json::from_str::<T>(&fixed) {
        Ok(parsed) => {
            tracing::debug!("Model output parsed after quick fixes");
            return Ok(parsed);
        }
        Err(e) => e.to_string(),
    };

    if let Some(repaired) = repair_with_llm_json(json_str) {
        match serde_json::from_str::<T>(&repaired) {
            Ok(parsed) => {
                tracing::debug!("Model output parsed after llm_json repair");
                return Ok(parsed);
            }
            Err(e) => last_error = e.to_string(),
        }
    }

    Err(format!(
        "Unusable model output ({}): {}",
        last_error,
        preview(json_str)
    ))
}

/// Parse model output, substituting `T::fallback` when every strategy fails.
pub fn parse_with_fallback<T>(text: &str) -> T
where
    T: LlmResponse,
{
    try_parse::<T>(text).unwrap_or_else(|reason| {
        tracing::warn!("Model output parsing failed, using fallback: {}", reason);
        T::fallback(reason)
    })
}
