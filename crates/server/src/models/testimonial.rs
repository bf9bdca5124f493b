//! Testimonials and their approval flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::TestimonialId;

use super::{ValidationError, optional_text, optional_url, required_text};

const MAX_NAME_CHARS: usize = 100;
const MAX_CONTENT_CHARS: usize = 2000;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub name: String,
    pub role: Option<String>,
    pub company: Option<String>,
    pub content: String,
    pub image_url: Option<String>,
    pub approved: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a visitor may submit.
///
/// There is no `approved` field: a submitted testimonial is always stored
/// unapproved, whatever the request body says.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTestimonial {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl NewTestimonial {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validated(self) -> Result<Self, ValidationError> {
        Ok(Self {
            name: required_text("name", &self.name, MAX_NAME_CHARS)?,
            role: optional_text("role", self.role.as_deref(), MAX_NAME_CHARS)?,
            company: optional_text("company", self.company.as_deref(), MAX_NAME_CHARS)?,
            content: required_text("content", &self.content, MAX_CONTENT_CHARS)?,
            image_url: optional_url("imageUrl", self.image_url.as_deref())?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_approved_in_body_is_dropped() {
        let input: NewTestimonial = serde_json::from_value(json!({
            "name": "Grace",
            "content": "Great collaborator.",
            "approved": true
        }))
        .unwrap();
        let input = input.validated().unwrap();
        assert_eq!(input.name, "Grace");
        assert_eq!(input.role, None);
    }

    #[test]
    fn test_content_required() {
        let err = NewTestimonial {
            name: "Grace".to_owned(),
            ..NewTestimonial::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(err.field, "content");
    }
}
