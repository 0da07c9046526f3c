// Localized content models for the projects and gallery routes

use serde::{Deserialize, Serialize};

use crate::lang::Language;

/// A string in all three site languages. Missing translations fall back
/// to English.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub si: String,
    #[serde(default)]
    pub ta: String,
}

impl LocalizedText {
    pub fn get(&self, lang: Language) -> &str {
        let text = match lang {
            Language::En => &self.en,
            Language::Si => &self.si,
            Language::Ta => &self.ta,
        };
        if text.is_empty() {
            &self.en
        } else {
            text
        }
    }

    pub fn english(text: impl Into<String>) -> Self {
        LocalizedText {
            en: text.into(),
            ..Default::default()
        }
    }
}

/// One stat card line on a project ("5000+", "People Reached").
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectStat {
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub label: LocalizedText,
}

/// A project as stored in the data file. Every field except `id` is
/// optional on the wire; absent fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    #[serde(default)]
    pub title: LocalizedText,
    #[serde(default)]
    pub summary: LocalizedText,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub main_image: String,
    #[serde(default)]
    pub gallery_images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication is explicit; a project missing this flag stays off
    /// the public routes.
    #[serde(default)]
    pub published: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat1: Option<ProjectStat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat2: Option<ProjectStat>,
    #[serde(default, rename = "longDescription", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<LocalizedText>,
}

/// One flattened gallery entry derived from a project's images.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub url: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
