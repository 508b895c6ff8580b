//! Input rules shared by the post and profile use-cases.
//!
//! Every rule is a pure function: it either hands back the normalized value
//! or the matching [`DomainError`] kind, and never touches its input.

use super::error::DomainError;

/// `page` must be present and >= 1. Below-minimum is reported before
/// absence so that a caller sending `page=0` learns what is wrong with it.
pub(crate) fn validate_page(page: Option<i64>) -> Result<u64, DomainError> {
    match page {
        Some(value) if value < 1 => Err(DomainError::PageBelowMinimum),
        None => Err(DomainError::InvalidPage),
        Some(value) => u64::try_from(value).map_err(|_| DomainError::InvalidPage),
    }
}

pub(crate) fn validate_size(size: Option<i64>) -> Result<u32, DomainError> {
    match size {
        Some(value) if value > 0 => u32::try_from(value).map_err(|_| DomainError::InvalidSize),
        _ => Err(DomainError::InvalidSize),
    }
}

pub(crate) fn ensure_page_in_range(page: u64, end_page: u64) -> Result<(), DomainError> {
    if page > end_page {
        return Err(DomainError::PageOutOfRange { page, end_page });
    }
    Ok(())
}

pub(crate) fn require_id(entity: &'static str, id: &str) -> Result<String, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::MissingId(entity));
    }
    Ok(id.to_string())
}

pub(crate) fn require_field(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::MissingField(field));
    }
    Ok(value.to_string())
}

pub(crate) fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::InvalidContent);
    }
    Ok(())
}

/// Only the first photo is inspected: it is the cover shown in listings.
pub(crate) fn validate_photo_urls(photo_urls: &[String]) -> Result<(), DomainError> {
    let Some(first) = photo_urls.first() else {
        return Err(DomainError::InvalidPhotoReference);
    };
    let first = first.trim();
    if first.is_empty() || is_decimal_literal(first) {
        return Err(DomainError::InvalidPhotoReference);
    }
    Ok(())
}

/// Plain decimal numbers such as `42`, `-3` or `1.5`. Float spellings like
/// `NaN` or `inf` are not numbers here.
fn is_decimal_literal(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    let mut parts = digits.splitn(2, '.');
    let whole = parts.next().unwrap_or_default();
    let fraction = parts.next().unwrap_or_default();
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    (!whole.is_empty() || !fraction.is_empty()) && all_digits(whole) && all_digits(fraction)
}

/// Raw query values that do not parse as integers count as absent.
pub(crate) fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}
