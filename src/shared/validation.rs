use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Ticket ids look like `T-1234`
    pub static ref TICKET_ID_REGEX: Regex = Regex::new(r"^T-\d{4}$").unwrap();

    /// Header of a base64 data URL, capturing the mime type
    pub static ref DATA_URL_HEADER_REGEX: Regex =
        Regex::new(r"^data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+)?(?:;[^,]*)?,").unwrap();
}

/// Rejects empty and whitespace-only text
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
