//! Engine configuration
//!
//! Loaded from TOML. Every field has a default, so an empty file (or no
//! file at all) is a valid configuration.
//!
//! ```toml
//! [preview]
//! unavailable_text = "Pré-visualização indisponível"
//! max_chars = 4000
//!
//! [output]
//! file_name_pattern = "{template} - {client}"
//! fill_current_date = true
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Template preview settings
    #[serde(default)]
    pub preview: PreviewConfig,
    /// Generated document settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    ///
    /// # Example
    ///
    /// ```
    /// use petition_engine::config::EngineConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = EngineConfig::from_str("[preview]\nmax_chars = 200")?;
    /// assert_eq!(config.preview.max_chars, 200);
    /// # Ok(())
    /// # }
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }
}

/// Preview rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Shown instead of text when nothing usable could be extracted
    #[serde(default = "default_unavailable_text")]
    pub unavailable_text: String,
    /// Previews longer than this many characters are cut (default: 4000)
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

fn default_unavailable_text() -> String {
    "Pré-visualização indisponível".to_string()
}

fn default_max_chars() -> usize {
    4000
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            unavailable_text: default_unavailable_text(),
            max_chars: default_max_chars(),
        }
    }
}

/// Generated documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name without extension; `{template}` and `{client}` are replaced
    #[serde(default = "default_file_name_pattern")]
    pub file_name_pattern: String,
    /// Fill an absent current date with today's date
    #[serde(default = "default_fill_current_date")]
    pub fill_current_date: bool,
}

fn default_file_name_pattern() -> String {
    "{template} - {client}".to_string()
}

fn default_fill_current_date() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_name_pattern: default_file_name_pattern(),
            fill_current_date: default_fill_current_date(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.preview.max_chars, 4000);
        assert!(config.output.fill_current_date);
    }

    #[test]
    fn test_partial_sections() {
        let toml = r#"
            [preview]
            unavailable_text = "Sem prévia"

            [output]
            fill_current_date = false
        "#;
        let config = EngineConfig::from_str(toml).unwrap();

        assert_eq!(config.preview.unavailable_text, "Sem prévia");
        assert_eq!(config.preview.max_chars, 4000);
        assert!(!config.output.fill_current_date);
        assert_eq!(config.output.file_name_pattern, "{template} - {client}");
    }

    #[test]
    fn test_malformed_toml() {
        let result = EngineConfig::from_str("[preview\nmax_chars = ");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[preview]\nmax_chars = 10").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.preview.max_chars, 10);
    }

    #[test]
    fn test_missing_file() {
        let err = EngineConfig::from_file("/nonexistent/petition.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
