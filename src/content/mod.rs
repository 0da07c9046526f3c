//! Project content store.
//!
//! The JSON data file is the source of truth and is read per request, so
//! the routes stay stateless and edits to the file show up immediately.
//! The files involved are a few kilobytes; there is nothing here worth a
//! cache's invalidation problems.

use crate::error::Result;
use crate::lang::Language;
use crate::models::content::{GalleryItem, Project};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct ProjectStore {
    data_path: PathBuf,
}

impl ProjectStore {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        ProjectStore {
            data_path: data_path.into(),
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// All projects in file order. A missing file is an empty list; any
    /// other IO or parse problem is a real error.
    pub fn all(&self) -> Result<Vec<Project>> {
        let raw = match std::fs::read_to_string(&self.data_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "Project data file {} missing, serving empty list",
                    self.data_path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_str(&raw)?)
    }

    /// Projects cleared for the public routes.
    pub fn published(&self) -> Result<Vec<Project>> {
        Ok(self.all()?.into_iter().filter(|p| p.published).collect())
    }

    /// Looks up a published project by id. Unpublished ids stay invisible.
    pub fn find(&self, id: &str) -> Result<Option<Project>> {
        Ok(self.published()?.into_iter().find(|p| p.id == id))
    }

    pub fn gallery(&self) -> Result<Vec<GalleryItem>> {
        Ok(derive_gallery(&self.published()?))
    }
}

/// Flattens projects into gallery entries: the main image first, then
/// each gallery image, all carrying the owning project's category and
/// tags. Shared with the client-side loader's local fallback.
pub fn derive_gallery(projects: &[Project]) -> Vec<GalleryItem> {
    let mut items = Vec::new();
    for project in projects {
        if !project.main_image.is_empty() {
            items.push(gallery_item(project, &project.main_image));
        }
        for url in &project.gallery_images {
            items.push(gallery_item(project, url));
        }
    }
    items
}

fn gallery_item(project: &Project, url: &str) -> GalleryItem {
    GalleryItem {
        url: url.to_string(),
        category: project.category.clone(),
        tags: project.tags.clone(),
        project_id: project.id.clone(),
        title: non_empty(project.title.get(Language::En)),
        description: non_empty(project.summary.get(Language::En)),
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
