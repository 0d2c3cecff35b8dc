//! Document generation: one template, one client, one document

use shared_types::{ClientRecord, TemplateRecord, TemplateSource};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::errors::GenerationError;
use crate::extract::{preview, preview_text};
use crate::merge::{merge_package, merge_text, render_text_document, RenderedDocument};
use crate::placeholders::{build_placeholder_map, today_long};
use crate::templates::TemplateStore;

/// Used when the configured pattern leaves nothing of the file name
const FALLBACK_FILE_NAME: &str = "documento";

/// A generated document and the name to save it under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    /// File name including extension
    pub file_name: String,
    pub document: RenderedDocument,
}

/// Generates petitions from templates and client records
#[derive(Debug, Clone, Default)]
pub struct DocumentGenerator {
    config: EngineConfig,
}

impl DocumentGenerator {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Merge a template with a client record
    ///
    /// The template is checked before the client. Validation failures
    /// produce no document; a template package that merges badly still
    /// produces one, marked degraded.
    pub fn generate(
        &self,
        template: Option<&TemplateRecord>,
        client: Option<&ClientRecord>,
        store: &dyn TemplateStore,
    ) -> Result<GeneratedDocument, GenerationError> {
        let template = template.ok_or(GenerationError::NoTemplateSelected)?;
        let client = client.ok_or(GenerationError::NoClientSelected)?;

        let record = self.complete_record(client);
        let map = build_placeholder_map(&record);

        let document = match &template.source {
            TemplateSource::Text { content } => render_text_document(&merge_text(content, &map)),
            TemplateSource::Package { .. } => {
                let bytes = download(template, store)?;
                merge_package(&bytes, &map)
            }
        };

        if document.degraded {
            warn!(template = %template.name, "Generated degraded document");
        }

        let file_name = format!(
            "{}.{}",
            self.file_stem(template, &record),
            document.extension()
        );
        info!(
            template = %template.name,
            file_name = %file_name,
            bytes = document.bytes.len(),
            "Generated document"
        );

        Ok(GeneratedDocument {
            file_name,
            document,
        })
    }

    /// Plain-text preview of a template, or the configured sentinel
    pub fn preview_template(
        &self,
        template: &TemplateRecord,
        store: &dyn TemplateStore,
    ) -> Result<String, GenerationError> {
        match &template.source {
            TemplateSource::Text { content } => Ok(preview_text(content, &self.config.preview)),
            TemplateSource::Package { .. } => {
                let bytes = download(template, store)?;
                Ok(preview(&bytes, &self.config.preview))
            }
        }
    }

    /// The client record as merged: current date filled in when configured
    fn complete_record(&self, client: &ClientRecord) -> ClientRecord {
        let mut record = client.clone();
        let has_date = record
            .current_date
            .as_deref()
            .is_some_and(|date| !date.trim().is_empty());
        if self.config.output.fill_current_date && !has_date {
            record.current_date = Some(today_long());
        }
        record
    }

    fn file_stem(&self, template: &TemplateRecord, client: &ClientRecord) -> String {
        let raw = self
            .config
            .output
            .file_name_pattern
            .replace("{template}", template.name.trim())
            .replace("{client}", client.display_name());

        let stem = sanitize_file_name(&raw);
        if stem.is_empty() {
            FALLBACK_FILE_NAME.to_string()
        } else {
            stem
        }
    }
}

fn download(template: &TemplateRecord, store: &dyn TemplateStore) -> Result<Vec<u8>, GenerationError> {
    store
        .download_template_file(template)
        .map_err(|e| GenerationError::TemplateUnavailable {
            template: template.name.clone(),
            reason: e.to_string(),
        })
}

/// Drop path separators and control characters; trim what is left
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\') && !c.is_control())
        .collect();
    cleaned.trim().trim_matches('.').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_text;
    use crate::format::build_minimal_docx;
    use crate::templates::MemoryTemplateStore;
    use pretty_assertions::assert_eq;

    fn client() -> ClientRecord {
        ClientRecord {
            full_name: Some("ANA SILVA".to_string()),
            current_date: Some("1 de março de 2026".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validation_order() {
        let generator = DocumentGenerator::default();
        let store = MemoryTemplateStore::new();

        let err = generator.generate(None, None, &store).unwrap_err();
        assert!(matches!(err, GenerationError::NoTemplateSelected));

        let template = TemplateRecord::text("t", "Procuração", "[[nome]]");
        let err = generator.generate(Some(&template), None, &store).unwrap_err();
        assert!(matches!(err, GenerationError::NoClientSelected));
    }

    #[test]
    fn test_text_template() {
        let generator = DocumentGenerator::default();
        let template = TemplateRecord::text("t", "Procuração", "Eu, [[NOME COMPLETO]], em [[data atual]].");

        let generated = generator
            .generate(Some(&template), Some(&client()), &MemoryTemplateStore::new())
            .unwrap();

        assert_eq!(generated.file_name, "Procuração - ANA SILVA.docx");
        assert!(!generated.document.degraded);
        assert_eq!(
            extract_text(&generated.document.bytes),
            "Eu, ANA SILVA, em 1 de março de 2026."
        );
    }

    #[test]
    fn test_current_date_filled() {
        let generator = DocumentGenerator::default();
        let template = TemplateRecord::text("t", "Data", "[[data]]");
        let mut client = client();
        client.current_date = None;

        let generated = generator
            .generate(Some(&template), Some(&client), &MemoryTemplateStore::new())
            .unwrap();

        assert_eq!(extract_text(&generated.document.bytes), today_long());
    }

    #[test]
    fn test_current_date_left_blank_when_disabled() {
        let mut config = EngineConfig::default();
        config.output.fill_current_date = false;
        let generator = DocumentGenerator::new(config);
        let template = TemplateRecord::text("t", "Data", "Data: [[data]]");
        let mut client = client();
        client.current_date = None;

        let generated = generator
            .generate(Some(&template), Some(&client), &MemoryTemplateStore::new())
            .unwrap();

        assert_eq!(extract_text(&generated.document.bytes), "Data:");
    }

    #[test]
    fn test_package_download_failure() {
        let generator = DocumentGenerator::default();
        let template = TemplateRecord::package("p", "Inicial", "inicial.docx");

        let err = generator
            .generate(Some(&template), Some(&client()), &MemoryTemplateStore::new())
            .unwrap_err();

        assert!(!err.is_validation());
        assert!(matches!(
            err,
            GenerationError::TemplateUnavailable { template, .. } if template == "Inicial"
        ));
    }

    #[test]
    fn test_package_template() {
        let template = TemplateRecord::package("p", "Inicial", "inicial.docx");
        let bytes = build_minimal_docx("Autora: [[nome]]").unwrap();
        let store = MemoryTemplateStore::new().with_package(template.clone(), bytes);

        let generated = DocumentGenerator::default()
            .generate(Some(&template), Some(&client()), &store)
            .unwrap();

        assert_eq!(generated.file_name, "Inicial - ANA SILVA.docx");
        assert_eq!(extract_text(&generated.document.bytes), "Autora: ANA SILVA");
    }

    #[test]
    fn test_file_name_sanitized() {
        let mut config = EngineConfig::default();
        config.output.file_name_pattern = "../{template}/{client}\n".to_string();
        let generator = DocumentGenerator::new(config);
        let template = TemplateRecord::text("t", "Réplica", "x");

        let generated = generator
            .generate(Some(&template), Some(&ClientRecord::default()), &MemoryTemplateStore::new())
            .unwrap();

        assert_eq!(generated.file_name, "Réplicacliente.docx");
    }

    #[test]
    fn test_empty_file_name_falls_back() {
        assert_eq!(sanitize_file_name(" /\\ "), "");

        let mut config = EngineConfig::default();
        config.output.file_name_pattern = "//".to_string();
        let generator = DocumentGenerator::new(config);
        let template = TemplateRecord::text("t", "x", "x");

        let generated = generator
            .generate(Some(&template), Some(&client()), &MemoryTemplateStore::new())
            .unwrap();
        assert_eq!(generated.file_name, "documento.docx");
    }

    #[test]
    fn test_preview_template() {
        let generator = DocumentGenerator::default();
        let store = MemoryTemplateStore::new();

        let text = TemplateRecord::text("t", "Texto", "\u{200E}Excelentíssimo Juiz");
        assert_eq!(
            generator.preview_template(&text, &store).unwrap(),
            "Excelentíssimo Juiz"
        );

        let missing = TemplateRecord::package("p", "Inicial", "inicial.docx");
        assert!(generator.preview_template(&missing, &store).is_err());
    }
}
