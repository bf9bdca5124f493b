//! Domain models for the portfolio API.
//!
//! Output types serialize in camelCase (`createdAt`, `imageUrl`) because
//! that is what the front-end reads. Input types (`New*`) are the allow-list
//! of fields a client may set; everything else is server-controlled.

pub mod chat;
pub mod classification;
pub mod contact;
pub mod project;
pub mod testimonial;
pub mod user;

pub use chat::ChatMessage;
pub use classification::ImageClassification;
pub use contact::{Contact, NewContact, ValidContact};
pub use project::{NewProject, Project};
pub use testimonial::{NewTestimonial, Testimonial};
pub use user::User;

use url::Url;

/// Validation failure on a client-supplied payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Trim a required text field and enforce a maximum length.
pub(crate) fn required_text(
    field: &'static str,
    value: &str,
    max_chars: usize,
) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, "is required"));
    }
    if value.chars().count() > max_chars {
        return Err(ValidationError::new(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(value.to_owned())
}

/// Trim an optional text field; blank strings become `None`.
pub(crate) fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required_text(field, v, max_chars).map(Some),
        None => Ok(None),
    }
}

/// Validate an optional absolute `http(s)` URL.
pub(crate) fn optional_url(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<String>, ValidationError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let url = Url::parse(raw).map_err(|e| ValidationError::new(field, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::new(field, "must be an http(s) URL"));
    }
    Ok(Some(url.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("title", "  Vision  ", 10), Ok("Vision".to_owned()));
        assert_eq!(
            required_text("title", "   ", 10),
            Err(ValidationError::new("title", "is required"))
        );
        assert!(required_text("title", "abcdefghijk", 10).is_err());
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text("role", Some("  "), 10), Ok(None));
        assert_eq!(optional_text("role", None, 10), Ok(None));
        assert_eq!(optional_text("role", Some(" CTO "), 10), Ok(Some("CTO".to_owned())));
    }

    #[test]
    fn test_optional_url() {
        assert_eq!(
            optional_url("githubUrl", Some("https://github.com/ada/vision")),
            Ok(Some("https://github.com/ada/vision".to_owned()))
        );
        assert!(optional_url("githubUrl", Some("javascript:alert(1)")).is_err());
        assert!(optional_url("githubUrl", Some("not a url")).is_err());
        assert_eq!(optional_url("githubUrl", Some("")), Ok(None));
    }
}
