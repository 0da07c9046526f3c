// Content loading with API-then-local fallback

use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, warn};

use super::http::ApiClient;
use crate::content::derive_gallery;
use crate::models::content::{GalleryItem, Project};

// Projects may block first paint so they get a generous window; the
// gallery is decorative and gets a short one.
const PROJECTS_TIMEOUT: Duration = Duration::from_millis(5000);
const GALLERY_TIMEOUT: Duration = Duration::from_millis(1500);

/// Loads site content from the gateway, falling back to a bundled JSON
/// file, falling back to nothing. Rendering never waits on the network
/// being healthy.
pub struct ContentLoader {
    api: Option<ApiClient>,
    local_path: Option<PathBuf>,
}

impl ContentLoader {
    pub fn new(api: ApiClient) -> Self {
        ContentLoader {
            api: Some(api),
            local_path: None,
        }
    }

    pub fn with_local_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_path = Some(path.into());
        self
    }

    /// Offline loader: no gateway, bundled data only.
    pub fn local_only(path: impl Into<PathBuf>) -> Self {
        ContentLoader {
            api: None,
            local_path: Some(path.into()),
        }
    }

    /// Published projects, API first.
    pub async fn load_projects(&self) -> Vec<Project> {
        if let Some(api) = &self.api {
            match api
                .get_json::<Vec<Project>>("/api/projects", PROJECTS_TIMEOUT)
                .await
            {
                Ok(projects) => {
                    debug!("Loaded {} projects from API", projects.len());
                    return projects;
                }
                Err(e) => warn!("Project API unavailable, trying local data: {}", e),
            }
        }
        self.read_local()
    }

    /// Gallery items, API first; local data is flattened the same way
    /// the gateway flattens it.
    pub async fn load_gallery(&self) -> Vec<GalleryItem> {
        if let Some(api) = &self.api {
            match api
                .get_json::<Vec<GalleryItem>>("/api/gallery", GALLERY_TIMEOUT)
                .await
            {
                Ok(items) => return items,
                Err(e) => warn!("Gallery API unavailable, deriving from local data: {}", e),
            }
        }
        derive_gallery(&self.read_local())
    }

    fn read_local(&self) -> Vec<Project> {
        let Some(path) = &self.local_path else {
            return Vec::new();
        };

        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => projects.into_iter().filter(|p| p.published).collect(),
                Err(e) => {
                    warn!("Local project data unreadable: {}", e);
                    Vec::new()
                }
            },
            Err(e) => {
                debug!("No local project data at {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }
}
