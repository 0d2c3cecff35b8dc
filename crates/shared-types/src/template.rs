//! Stored petition templates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A template as listed by the template storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: TemplateSource,
    pub updated_at: DateTime<Utc>,
}

/// Where the template body lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TemplateSource {
    /// Plain text typed by the user, stored inline
    Text { content: String },
    /// Uploaded word-processor package, stored as a file
    Package { storage_path: String },
}

impl TemplateRecord {
    /// Create a text template
    pub fn text(id: impl Into<String>, name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            source: TemplateSource::Text {
                content: content.into(),
            },
            updated_at: Utc::now(),
        }
    }

    /// Create a package template pointing at a stored file
    pub fn package(
        id: impl Into<String>,
        name: impl Into<String>,
        storage_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            source: TemplateSource::Package {
                storage_path: storage_path.into(),
            },
            updated_at: Utc::now(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_package(&self) -> bool {
        matches!(self.source, TemplateSource::Package { .. })
    }
}

/// Fields changed by an edit. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    /// New inline content (text templates only)
    pub content: Option<String>,
    /// Replacement file (package templates only)
    #[serde(skip)]
    pub file: Option<Vec<u8>>,
}

impl TemplateUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.content.is_none()
            && self.file.is_none()
    }
}
