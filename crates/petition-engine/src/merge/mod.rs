//! Placeholder merge engine
//!
//! Text templates are merged as strings and wrapped into a minimal `.docx`;
//! package templates are rewritten in place, keeping their formatting.

pub mod package;
pub mod text;

pub use package::merge_package;
pub use text::merge_text;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::format::{build_minimal_docx, PackageKind};

/// A generated document, owned by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedDocument {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub kind: PackageKind,
    /// Produced by fallback logic; content is right, formatting is not kept
    pub degraded: bool,
}

impl RenderedDocument {
    /// A minimal `.docx` with one paragraph per line of `text`
    ///
    /// Only if even that cannot be built does the text come back as a
    /// plain-text document.
    pub fn from_text(text: &str) -> Self {
        match build_minimal_docx(text) {
            Ok(bytes) => Self {
                bytes,
                kind: PackageKind::Docx,
                degraded: false,
            },
            Err(e) => {
                error!("Failed to build document package: {}", e);
                Self {
                    bytes: text.as_bytes().to_vec(),
                    kind: PackageKind::Txt,
                    degraded: true,
                }
            }
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn extension(&self) -> &'static str {
        self.kind.extension()
    }
}

/// Output of a text template merge
pub fn render_text_document(merged: &str) -> RenderedDocument {
    RenderedDocument::from_text(merged)
}
