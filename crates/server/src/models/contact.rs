//! Contact form submissions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::{ContactId, Email};

use super::{ValidationError, optional_text, required_text};

const MAX_NAME_CHARS: usize = 100;
const MAX_SUBJECT_CHARS: usize = 200;
const MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// A contact form as posted by a visitor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// A contact form whose fields have been checked.
#[derive(Debug, Clone)]
pub struct ValidContact {
    pub name: String,
    pub email: Email,
    pub subject: Option<String>,
    pub message: String,
}

impl NewContact {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validated(self) -> Result<ValidContact, ValidationError> {
        Ok(ValidContact {
            name: required_text("name", &self.name, MAX_NAME_CHARS)?,
            email: Email::parse(&self.email)
                .map_err(|e| ValidationError::new("email", e.to_string()))?,
            subject: optional_text("subject", self.subject.as_deref(), MAX_SUBJECT_CHARS)?,
            message: required_text("message", &self.message, MAX_MESSAGE_CHARS)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validated() {
        let contact = NewContact {
            name: " Ada ".to_owned(),
            email: "Ada@Example.com".to_owned(),
            subject: None,
            message: "Hello".to_owned(),
        }
        .validated()
        .unwrap();
        assert_eq!(contact.name, "Ada");
        assert_eq!(contact.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_bad_email() {
        let err = NewContact {
            name: "Ada".to_owned(),
            email: "nope".to_owned(),
            message: "Hello".to_owned(),
            ..NewContact::default()
        }
        .validated()
        .unwrap_err();
        assert_eq!(err.field, "email");
    }
}
