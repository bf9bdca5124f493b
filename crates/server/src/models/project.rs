//! Portfolio projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use folio_core::ProjectId;

use super::{ValidationError, optional_text, optional_url, required_text};

const MAX_TITLE_CHARS: usize = 200;
const MAX_DESCRIPTION_CHARS: usize = 5000;
const MAX_TAGS: usize = 20;
const MAX_TAG_CHARS: usize = 50;

/// A project shown in the portfolio grid.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a client may set when creating a project.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
}

impl NewProject {
    /// Trim and check every field.
    ///
    /// Blank tags are dropped and duplicates removed, keeping first-seen order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first offending field.
    pub fn validated(self) -> Result<Self, ValidationError> {
        let title = required_text("title", &self.title, MAX_TITLE_CHARS)?;
        let description =
            optional_text("description", Some(&self.description), MAX_DESCRIPTION_CHARS)?
                .unwrap_or_default();

        let mut tags: Vec<String> = Vec::with_capacity(self.tags.len());
        for tag in &self.tags {
            let Some(tag) = optional_text("tags", Some(tag), MAX_TAG_CHARS)? else {
                continue;
            };
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        if tags.len() > MAX_TAGS {
            return Err(ValidationError::new(
                "tags",
                format!("at most {MAX_TAGS} tags allowed"),
            ));
        }

        Ok(Self {
            title,
            description,
            image_url: optional_url("imageUrl", self.image_url.as_deref())?,
            tags,
            github_url: optional_url("githubUrl", self.github_url.as_deref())?,
            demo_url: optional_url("demoUrl", self.demo_url.as_deref())?,
        })
    }
}
