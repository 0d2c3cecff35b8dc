pub mod template;
pub mod types;

pub use template::{TemplateRecord, TemplateSource, TemplateUpdate};
pub use types::ClientRecord;
