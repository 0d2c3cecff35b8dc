//! In-process template store

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use shared_types::{TemplateRecord, TemplateSource, TemplateUpdate};
use tracing::debug;

use super::TemplateStore;
use crate::errors::StoreError;

/// Templates and their files held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateStore {
    templates: BTreeMap<String, TemplateRecord>,
    /// Storage path -> file bytes
    files: HashMap<String, Vec<u8>>,
}

impl MemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a template record
    pub fn insert_template(&mut self, template: TemplateRecord) {
        self.templates.insert(template.id.clone(), template);
    }

    /// Store a package file under its storage path
    pub fn insert_file(&mut self, storage_path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(storage_path.into(), bytes);
    }

    /// Add a package template together with its file
    pub fn with_package(mut self, template: TemplateRecord, bytes: Vec<u8>) -> Self {
        if let TemplateSource::Package { storage_path } = &template.source {
            self.insert_file(storage_path.clone(), bytes);
        }
        self.insert_template(template);
        self
    }

    /// Add a text template
    pub fn with_text(mut self, template: TemplateRecord) -> Self {
        self.insert_template(template);
        self
    }
}

impl TemplateStore for MemoryTemplateStore {
    fn list_templates(&self) -> Result<Vec<TemplateRecord>, StoreError> {
        Ok(self.templates.values().cloned().collect())
    }

    fn download_template_file(&self, template: &TemplateRecord) -> Result<Vec<u8>, StoreError> {
        match &template.source {
            TemplateSource::Text { content } => Ok(content.as_bytes().to_vec()),
            TemplateSource::Package { storage_path } => self
                .files
                .get(storage_path)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(storage_path.clone())),
        }
    }

    fn update_template(
        &mut self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<TemplateRecord, StoreError> {
        let template = self
            .templates
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if update.is_empty() {
            return Ok(template.clone());
        }

        // Reject before touching anything so a failed update changes nothing
        match (&template.source, &update.content, &update.file) {
            (TemplateSource::Package { .. }, Some(_), _) => {
                return Err(StoreError::Unsupported(
                    "inline content on a package template".to_string(),
                ))
            }
            (TemplateSource::Text { .. }, _, Some(_)) => {
                return Err(StoreError::Unsupported(
                    "file upload on a text template".to_string(),
                ))
            }
            _ => {}
        }

        if let Some(name) = update.name {
            template.name = name;
        }
        if let Some(description) = update.description {
            template.description = Some(description);
        }
        match &mut template.source {
            TemplateSource::Text { content } => {
                if let Some(new_content) = update.content {
                    *content = new_content;
                }
            }
            TemplateSource::Package { storage_path } => {
                if let Some(bytes) = update.file {
                    self.files.insert(storage_path.clone(), bytes);
                }
            }
        }
        template.updated_at = Utc::now();

        debug!(id, "Template updated");
        Ok(template.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> MemoryTemplateStore {
        MemoryTemplateStore::new()
            .with_text(TemplateRecord::text("a", "Procuração", "Eu, [[nome]]"))
            .with_package(
                TemplateRecord::package("b", "Inicial", "modelos/inicial.docx"),
                b"PK".to_vec(),
            )
    }

    #[test]
    fn test_list_and_download() {
        let store = store();
        let templates = store.list_templates().unwrap();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0].id, "a");

        assert_eq!(store.download_template_file(&templates[0]).unwrap(), b"Eu, [[nome]]");
        assert_eq!(store.download_template_file(&templates[1]).unwrap(), b"PK");
    }

    #[test]
    fn test_missing_file() {
        let store = MemoryTemplateStore::new();
        let template = TemplateRecord::package("x", "X", "nada.docx");
        assert!(matches!(
            store.download_template_file(&template),
            Err(StoreError::NotFound(path)) if path == "nada.docx"
        ));
    }

    #[test]
    fn test_update_text_template() {
        let mut store = store();
        let updated = store
            .update_template(
                "a",
                TemplateUpdate {
                    name: Some("Procuração ad judicia".to_string()),
                    content: Some("Outorgante: [[nome]]".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.name, "Procuração ad judicia");
        assert_eq!(
            updated.source,
            TemplateSource::Text {
                content: "Outorgante: [[nome]]".to_string()
            }
        );
        assert_eq!(store.get_template("a").unwrap(), updated);
    }

    #[test]
    fn test_update_package_file() {
        let mut store = store();
        let updated = store
            .update_template(
                "b",
                TemplateUpdate {
                    file: Some(b"PK\x03\x04".to_vec()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(store.download_template_file(&updated).unwrap(), b"PK\x03\x04");
    }

    #[test]
    fn test_empty_update_keeps_timestamp() {
        let mut store = store();
        let before = store.get_template("a").unwrap();

        let after = store.update_template("a", TemplateUpdate::default()).unwrap();

        assert_eq!(after, before);
        assert_eq!(after.updated_at, before.updated_at);
    }

    #[test]
    fn test_mismatched_update_changes_nothing() {
        let mut store = store();
        let result = store.update_template(
            "b",
            TemplateUpdate {
                name: Some("Outro".to_string()),
                content: Some("texto".to_string()),
                ..Default::default()
            },
        );

        assert!(matches!(result, Err(StoreError::Unsupported(_))));
        assert_eq!(store.get_template("b").unwrap().name, "Inicial");
    }

    #[test]
    fn test_update_unknown_id() {
        let mut store = store();
        let result = store.update_template("zzz", TemplateUpdate::default());
        assert!(matches!(result, Err(StoreError::NotFound(id)) if id == "zzz"));
    }
}
