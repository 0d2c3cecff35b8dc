//! Template storage
//!
//! The generator only ever reads through [`TemplateStore`]; persistence is
//! someone else's concern. Two backends ship with the crate: an in-memory
//! store for tests and embedding, and a plain directory of template files.

pub mod directory;
pub mod memory;

pub use directory::DirectoryTemplateStore;
pub use memory::MemoryTemplateStore;

use shared_types::{TemplateRecord, TemplateUpdate};

use crate::errors::StoreError;

/// Where templates are listed, downloaded and edited
pub trait TemplateStore {
    /// All templates, in a stable order
    fn list_templates(&self) -> Result<Vec<TemplateRecord>, StoreError>;

    /// Raw bytes of a template
    ///
    /// For a package template these are the stored file's bytes; for a text
    /// template, the UTF-8 content.
    fn download_template_file(&self, template: &TemplateRecord) -> Result<Vec<u8>, StoreError>;

    /// Apply an edit and return the updated record
    fn update_template(
        &mut self,
        id: &str,
        update: TemplateUpdate,
    ) -> Result<TemplateRecord, StoreError>;

    /// Look one template up by id
    fn get_template(&self, id: &str) -> Result<TemplateRecord, StoreError> {
        self.list_templates()?
            .into_iter()
            .find(|template| template.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}
