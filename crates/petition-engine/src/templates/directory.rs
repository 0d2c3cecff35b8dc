//! Templates kept as files in one directory
//!
//! `*.txt` files are text templates, `*.docx` and `*.odt` files are package
//! templates. The file name is the template id and its stem the display
//! name. Other files and subdirectories are ignored.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use shared_types::{TemplateRecord, TemplateSource, TemplateUpdate};
use tracing::{debug, warn};

use super::TemplateStore;
use crate::errors::StoreError;
use crate::format::PackageKind;

/// Template store backed by a directory
#[derive(Debug, Clone)]
pub struct DirectoryTemplateStore {
    root: PathBuf,
}

impl DirectoryTemplateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a file name inside the root, refusing anything that would
    /// leave it
    fn resolve(&self, file_name: &str) -> Result<PathBuf, StoreError> {
        let is_plain = !file_name.is_empty()
            && !file_name.contains(['/', '\\'])
            && file_name != "."
            && file_name != "..";
        if !is_plain {
            return Err(StoreError::NotFound(file_name.to_string()));
        }
        Ok(self.root.join(file_name))
    }

    fn record_for(&self, path: &Path) -> Result<Option<TemplateRecord>, StoreError> {
        let (Some(file_name), Some(stem)) = (
            path.file_name().and_then(|n| n.to_str()),
            path.file_stem().and_then(|n| n.to_str()),
        ) else {
            return Ok(None);
        };

        let source = match kind_of(path) {
            Some(PackageKind::Txt) => TemplateSource::Text {
                content: fs::read_to_string(path)?,
            },
            Some(PackageKind::Docx | PackageKind::Odt) => TemplateSource::Package {
                storage_path: file_name.to_string(),
            },
            None => return Ok(None),
        };

        let updated_at = fs::metadata(path)
            .and_then(|meta| meta.modified())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());

        Ok(Some(TemplateRecord {
            id: file_name.to_string(),
            name: stem.to_string(),
            description: None,
            source,
            updated_at,
        }))
    }
}

fn kind_of(path: &Path) -> Option<PackageKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
}

fn not_found(err: io::Error, name: &str) -> StoreError {
    if err.kind() == io::ErrorKind::NotFound {
        StoreError::NotFound(name.to_string())
    } else {
        StoreError::Io(err)
    }
}

impl TemplateStore for DirectoryTemplateStore {
    fn list_templates(&self) -> Result<Vec<TemplateRecord>, StoreError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.root)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut templates = Vec::with_capacity(paths.len());
        for path in paths {
            match self.record_for(&path) {
                Ok(Some(record)) => templates.push(record),
                Ok(None) => {}
                Err(e) => warn!("Skipping unreadable template {}: {}", path.display(), e),
            }
        }

        debug!(root = %self.root.display(), count = templates.len(), "Listed templates");
        Ok(templates)
    }

    fn download_template_file(&self, template: &TemplateRecord) -> Result<Vec<u8>, StoreError> {
        match &template.source {
            TemplateSource::Text { content } => Ok(content.as_bytes().to_vec()),
            TemplateSource::Package { storage_path } => {
                let path = self.resolve(storage_path)?;
                fs::read(&path).map_err(|e| not_found(e, storage_path))
            }
        }
    }

    fn update_template(
        &mut self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<TemplateRecord, StoreError> {
        let path = self.resolve(id)?;
        let kind = kind_of(&path).ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if !path.is_file() {
            return Err(StoreError::NotFound(id.to_string()));
        }

        if update.name.is_some() || update.description.is_some() {
            return Err(StoreError::Unsupported(
                "renaming or describing a template stored as a file".to_string(),
            ));
        }

        match (kind, update.content, update.file) {
            (_, Some(_), Some(_)) => {
                return Err(StoreError::Unsupported(
                    "content and file in one update".to_string(),
                ))
            }
            (PackageKind::Txt, Some(content), None) => fs::write(&path, content)?,
            (PackageKind::Docx | PackageKind::Odt, None, Some(bytes)) => fs::write(&path, bytes)?,
            (PackageKind::Txt, None, Some(_)) => {
                return Err(StoreError::Unsupported(
                    "file upload on a text template".to_string(),
                ))
            }
            (_, Some(_), None) => {
                return Err(StoreError::Unsupported(
                    "inline content on a package template".to_string(),
                ))
            }
            (_, None, None) => {}
        }

        debug!(id, "Template file updated");
        self.record_for(&path)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with_files() -> (TempDir, DirectoryTemplateStore) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("procuracao.txt"), "Eu, [[nome]]").unwrap();
        fs::write(dir.path().join("inicial.docx"), b"PK docx").unwrap();
        fs::write(dir.path().join("contestacao.ODT"), b"PK odt").unwrap();
        fs::write(dir.path().join("notas.md"), "ignorado").unwrap();
        fs::create_dir(dir.path().join("arquivo.txt")).unwrap();

        let store = DirectoryTemplateStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_lists_by_extension() {
        let (_dir, store) = store_with_files();
        let templates = store.list_templates().unwrap();

        let ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["contestacao.ODT", "inicial.docx", "procuracao.txt"]);

        assert!(templates[0].is_package());
        assert_eq!(templates[1].name, "inicial");
        assert_eq!(
            templates[2].source,
            TemplateSource::Text {
                content: "Eu, [[nome]]".to_string()
            }
        );
    }

    #[test]
    fn test_download_package() {
        let (_dir, store) = store_with_files();
        let template = store.get_template("inicial.docx").unwrap();

        assert_eq!(store.download_template_file(&template).unwrap(), b"PK docx");
    }

    #[test]
    fn test_download_rejects_escaping_paths() {
        let (_dir, store) = store_with_files();
        let template = TemplateRecord::package("x", "x", "../segredo.docx");

        assert!(matches!(
            store.download_template_file(&template),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_download_missing_file() {
        let (_dir, store) = store_with_files();
        let template = TemplateRecord::package("x", "x", "sumiu.docx");

        assert!(matches!(
            store.download_template_file(&template),
            Err(StoreError::NotFound(path)) if path == "sumiu.docx"
        ));
    }

    #[test]
    fn test_update_text_content() {
        let (dir, mut store) = store_with_files();
        let update = TemplateUpdate {
            content: Some("Outorgante: [[nome]]".to_string()),
            ..Default::default()
        };
        let record = store.update_template("procuracao.txt", update).unwrap();

        assert_eq!(
            record.source,
            TemplateSource::Text {
                content: "Outorgante: [[nome]]".to_string()
            }
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("procuracao.txt")).unwrap(),
            "Outorgante: [[nome]]"
        );
    }

    #[test]
    fn test_update_replaces_package_file() {
        let (dir, mut store) = store_with_files();
        let update = TemplateUpdate {
            file: Some(b"PK novo".to_vec()),
            ..Default::default()
        };
        store.update_template("inicial.docx", update).unwrap();

        assert_eq!(fs::read(dir.path().join("inicial.docx")).unwrap(), b"PK novo");
    }

    #[test]
    fn test_rename_unsupported() {
        let (_dir, mut store) = store_with_files();
        let update = TemplateUpdate {
            name: Some("Nova".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            store.update_template("procuracao.txt", update),
            Err(StoreError::Unsupported(_))
        ));
    }

    #[test]
    fn test_update_missing_template() {
        let (_dir, mut store) = store_with_files();
        assert!(matches!(
            store.update_template("nada.txt", TemplateUpdate::default()),
            Err(StoreError::NotFound(_))
        ));
    }
}
