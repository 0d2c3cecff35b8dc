//! Error types for package handling, template storage and generation

use thiserror::Error;

/// Failures while reading or rewriting a document package
///
/// These never reach callers of the merge and extraction entry points;
/// they are logged and turned into degraded output there.
#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Invalid package container: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed markup: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Unrecognized package layout")]
    UnknownFormat,

    #[error("Package part not found: {0}")]
    MissingPart(String),

    #[error("Package part is not UTF-8: {0}")]
    InvalidEncoding(String),

    #[error("No text runs found in {0}")]
    NoText(String),
}

/// Errors from a template storage backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors surfaced to the user when a document cannot be generated at all
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("No template selected")]
    NoTemplateSelected,

    #[error("No client selected")]
    NoClientSelected,

    #[error("Template '{template}' could not be loaded: {reason}")]
    TemplateUnavailable { template: String, reason: String },
}

impl GenerationError {
    /// Validation errors are reported inline; the rest are upstream failures
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            GenerationError::NoTemplateSelected | GenerationError::NoClientSelected
        )
    }
}
