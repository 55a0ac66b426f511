//! Page slug validation for ad hoc custom pages.
use thiserror::Error;

pub const MAX_SLUG_LEN: usize = 64;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page slug cannot be empty")]
    EmptySlug,
    #[error("page slug `{0}` is longer than {MAX_SLUG_LEN} characters")]
    SlugTooLong(String),
    #[error("page slug `{0}` cannot be used as a URL path segment")]
    InvalidSlug(String),
}

/// Validate the slug of a custom page before it is persisted.
///
/// Slugs end up as a single path segment, so only characters that would
/// split or escape that segment are refused. Non-ASCII letters are fine.
pub fn validate_page_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() {
        return Err(ValidationError::EmptySlug);
    }
    if slug.chars().count() > MAX_SLUG_LEN {
        return Err(ValidationError::SlugTooLong(slug.to_string()));
    }
    let unsafe_char = |c: char| matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control();
    if slug == "." || slug == ".." || slug.chars().any(unsafe_char) {
        return Err(ValidationError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}
