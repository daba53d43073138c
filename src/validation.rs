use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Longest URL the `urls.url` column accepts.
pub const MAX_URL_LENGTH: usize = 2083;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^https?://(?:(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z]{2,6}\.?|localhost|[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3})(?::[0-9]+)?(?:/?|[/?]\S+)$",
    )
    .expect("URL pattern is a valid regex")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("URL cannot be empty")]
    Empty,
    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,
    #[error("Invalid URL format")]
    InvalidFormat,
}

/// Strip control characters (keeping tab, newline and carriage return) and
/// surrounding whitespace.
pub fn sanitize(raw: &str) -> String {
    raw.chars()
        .filter(|&c| (c as u32) >= 32 || matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .trim()
        .to_string()
}

fn with_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Normalize a URL submitted for a new short link.
pub fn normalize_for_create(raw: &str) -> Result<String, ValidationError> {
    let cleaned = sanitize(raw);
    if cleaned.is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = with_scheme(&cleaned);
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong);
    }
    if !URL_PATTERN.is_match(&url) {
        return Err(ValidationError::InvalidFormat);
    }

    Ok(url)
}

/// Normalize a replacement URL. Only emptiness and the scheme prefix are
/// checked here, not the full URL shape.
pub fn normalize_for_update(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let url = with_scheme(trimmed);
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(ValidationError::TooLong);
    }

    Ok(url)
}
