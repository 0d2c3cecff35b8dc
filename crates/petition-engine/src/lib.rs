//! Petition template merge and document text extraction
//!
//! This crate turns stored petition templates into documents for a given
//! client, including:
//! - The placeholder map: every `[[KEY]]` a template may use, under case and
//!   accent variants of each key
//! - Merging of plain-text templates and of `.docx`/`.odt` packages, with
//!   tokens split across formatting runs handled in place
//! - Best-effort text extraction for previews, never failing on bad input
//! - Template storage backends and the document generator tying it together
//!
//! # Example
//! ```
//! use petition_engine::{merge_text, build_placeholder_map};
//! use shared_types::ClientRecord;
//!
//! let client = ClientRecord {
//!     full_name: Some("ANA SILVA".to_string()),
//!     ..Default::default()
//! };
//! let map = build_placeholder_map(&client);
//! assert_eq!(merge_text("Outorgante: [[Nome]]", &map), "Outorgante: ANA SILVA");
//! ```

pub mod config;
pub mod errors;
pub mod extract;
pub mod format;
pub mod generator;
pub mod merge;
pub mod normalize;
pub mod placeholders;
pub mod templates;

pub use config::EngineConfig;
pub use errors::{GenerationError, PackageError, StoreError};
pub use extract::{extract, extract_text, preview, Extraction};
pub use format::PackageKind;
pub use generator::{DocumentGenerator, GeneratedDocument};
pub use merge::{merge_package, merge_text, render_text_document, RenderedDocument};
pub use placeholders::{build_placeholder_map, PlaceholderField, PlaceholderMap};
pub use templates::{DirectoryTemplateStore, MemoryTemplateStore, TemplateStore};
