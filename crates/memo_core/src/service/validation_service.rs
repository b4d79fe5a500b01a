//! Pre-flight validation for memo requests.
//!
//! # Responsibility
//! - Mirror entity construction rules before mutations reach the entity or
//!   repository.
//! - Parse pagination inputs into bounded page/page-size values.
//!
//! # Invariants
//! - Every check is stateless and never touches storage.
//! - Reports collect human-readable messages instead of failing fast.

use crate::model::memo::{
    normalize_content, normalize_title, Memo, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
};
use once_cell::sync::Lazy;
use regex::Regex;

/// Largest accepted page size.
pub const PAGE_SIZE_MAX: i64 = 100;

static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?)(\d+)").expect("valid leading integer regex"));

/// Outcome of a field-level check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Outcome of pagination parsing, including the effective values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub page: i64,
    pub page_size: i64,
}

/// Validates a create request by attempting full entity construction.
pub fn validate_create_memo(title: Option<&str>, content: Option<&str>) -> ValidationReport {
    let memo = match Memo::with_identity(title, content, None, None) {
        Ok(memo) => memo,
        Err(err) => return ValidationReport::from_errors(vec![err.to_string()]),
    };

    let mut errors = Vec::new();
    if !memo.is_title_valid() {
        errors.push("title is invalid".to_string());
    }
    if !memo.is_content_valid() {
        errors.push("content is invalid".to_string());
    }
    ValidationReport::from_errors(errors)
}

/// Validates a partial update request.
///
/// Absent fields are skipped, but at least one field must be supplied.
pub fn validate_update_memo(title: Option<&str>, content: Option<&str>) -> ValidationReport {
    let mut errors = Vec::new();

    if title.is_none() && content.is_none() {
        errors.push("at least one of title or content must be provided".to_string());
    }
    if title.is_some() {
        if let Err(err) = normalize_title(title) {
            errors.push(err.to_string());
        }
    }
    if content.is_some() {
        if let Err(err) = normalize_content(content) {
            errors.push(err.to_string());
        }
    }

    ValidationReport::from_errors(errors)
}

/// Parses and bounds-checks pagination inputs.
///
/// Missing, unparseable or zero values fall back to the defaults; only
/// non-zero out-of-range values are rejected.
pub fn validate_pagination(page: Option<&str>, page_size: Option<&str>) -> PaginationReport {
    let page = parse_leading_int(page)
        .filter(|value| *value != 0)
        .unwrap_or(i64::from(DEFAULT_PAGE));
    let page_size = parse_leading_int(page_size)
        .filter(|value| *value != 0)
        .unwrap_or(i64::from(DEFAULT_PAGE_SIZE));

    let mut errors = Vec::new();
    if page < 1 {
        errors.push("page must be at least 1".to_string());
    }
    if !(1..=PAGE_SIZE_MAX).contains(&page_size) {
        errors.push(format!("page size must be between 1 and {PAGE_SIZE_MAX}"));
    }

    PaginationReport {
        is_valid: errors.is_empty(),
        errors,
        page,
        page_size,
    }
}

/// Rejects missing or blank memo ids.
pub fn validate_memo_id(id: Option<&str>) -> ValidationReport {
    let errors = match id {
        None => vec!["memo id is required".to_string()],
        Some(value) if value.trim().is_empty() => vec!["memo id must not be blank".to_string()],
        Some(_) => Vec::new(),
    };
    ValidationReport::from_errors(errors)
}

/// Reads the leading integer of `value`, ignoring trailing characters.
///
/// Out-of-range digit runs saturate instead of failing.
fn parse_leading_int(value: Option<&str>) -> Option<i64> {
    let caps = LEADING_INT_RE.captures(value?)?;
    let negative = caps.get(1).is_some_and(|sign| sign.as_str() == "-");
    let digits = caps.get(2)?.as_str();
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::parse_leading_int;

    #[test]
    fn parse_leading_int_ignores_trailing_garbage() {
        assert_eq!(parse_leading_int(Some(" 12abc")), Some(12));
        assert_eq!(parse_leading_int(Some("-3")), Some(-3));
        assert_eq!(parse_leading_int(Some("+7")), Some(7));
    }

    #[test]
    fn parse_leading_int_rejects_non_numeric() {
        assert_eq!(parse_leading_int(Some("abc")), None);
        assert_eq!(parse_leading_int(Some("")), None);
        assert_eq!(parse_leading_int(None), None);
    }

    #[test]
    fn parse_leading_int_saturates_overflow() {
        assert_eq!(
            parse_leading_int(Some("99999999999999999999999")),
            Some(i64::MAX)
        );
    }
}
