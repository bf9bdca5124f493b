//! Seed the database with sample content.
//!
//! Reads projects from a YAML list whose entries use the same fields as
//! `POST /api/projects`:
//!
//! ```yaml
//! - title: Portfolio API
//!   description: JSON backend for this site.
//!   tags: [rust, axum]
//!   githubUrl: https://github.com/example/folio
//! ```

use std::path::Path;

use tracing::{info, warn};

use folio_server::db::ProjectRepository;
use folio_server::models::NewProject;

/// Parse and validate a project seed file.
///
/// Every entry is validated before anything touches the database, so a bad
/// file inserts nothing.
///
/// # Errors
///
/// Returns an error naming the first invalid entry.
pub fn parse_projects(content: &str) -> Result<Vec<NewProject>, Box<dyn std::error::Error>> {
    let entries: Vec<NewProject> = serde_yaml::from_str(content)?;

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .validated()
                .map_err(|e| Box::<dyn std::error::Error>::from(format!("entry {}: {e}", index + 1)))
        })
        .collect()
}

/// Insert projects from a YAML file.
///
/// # Errors
///
/// Returns an error if the file is missing or invalid, or an insert fails.
pub async fn projects(file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading projects from file");
    let content = tokio::fs::read_to_string(path).await?;
    let projects = parse_projects(&content)?;

    if projects.is_empty() {
        warn!("Seed file contains no projects");
        return Ok(());
    }

    let pool = super::connect().await?;
    let repo = ProjectRepository::new(&pool);

    for project in &projects {
        let created = repo.create(project).await?;
        info!(id = %created.id, title = %created.title, "Inserted project");
    }

    info!(count = projects.len(), "Seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_projects() {
        let yaml = r"
- title: '  Portfolio API  '
  description: JSON backend.
  tags: [rust, axum, rust]
  githubUrl: https://github.com/example/folio
- title: Image tagger
  description: Labels photos.
";
        let projects = parse_projects(yaml).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Portfolio API");
        assert_eq!(projects[0].tags, vec!["rust", "axum"]);
        assert!(projects[1].tags.is_empty());
    }

    #[test]
    fn test_parse_projects_rejects_invalid_entry() {
        let yaml = r"
- title: Fine
  description: ok
- title: ''
  description: missing title
";
        let err = parse_projects(yaml).unwrap_err();
        assert!(err.to_string().starts_with("entry 2:"));
    }

    #[test]
    fn test_bundled_seed_file_is_valid() {
        let content = include_str!("../../seed/projects.yaml");
        assert!(!parse_projects(content).unwrap().is_empty());
    }
}
