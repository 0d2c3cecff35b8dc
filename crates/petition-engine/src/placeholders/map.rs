//! The placeholder map built for one client

use std::collections::{BTreeMap, HashMap};

use regex::Regex;
use shared_types::ClientRecord;

use super::fields::PlaceholderField;
use crate::normalize::{key_variants, normalize_key};

/// Opening delimiter of a placeholder token
pub const TOKEN_OPEN: &str = "[[";
/// Closing delimiter of a placeholder token
pub const TOKEN_CLOSE: &str = "]]";

/// Mapping from every registered key spelling to its value
///
/// Construction is total: every key of every field is present, possibly
/// mapped to an empty string.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderMap {
    /// Registered spelling -> value
    entries: BTreeMap<String, String>,
    /// Normalized key -> value, for case and accent insensitive lookup
    normalized: HashMap<String, String>,
    /// First key of each registration, in registration order
    canonical: Vec<(String, String)>,
}

impl PlaceholderMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key under all four of its spellings
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        for variant in key_variants(key) {
            self.entries.insert(variant, value.clone());
        }
        self.normalized.insert(normalize_key(key), value.clone());

        match self.canonical.iter_mut().find(|(k, _)| k == key) {
            Some(slot) => slot.1 = value,
            None => self.canonical.push((key.to_string(), value)),
        }
    }

    /// Look a key up regardless of case, accents and surrounding whitespace
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| self.normalized.get(&normalize_key(key)))
            .map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Every registered spelling, sorted
    pub fn registered_keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of registered spellings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty values in registration order, one per registration
    ///
    /// Fields registered under several keys contribute their value once.
    pub fn values_in_field_order(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (_, value) in &self.canonical {
            if !value.is_empty() && !seen.contains(&value.as_str()) {
                seen.push(value);
            }
        }
        seen
    }

    /// A single pattern matching `[[KEY]]` for every registered spelling
    ///
    /// Keys are escaped literals joined in one alternation, longest first,
    /// and matched case-insensitively. Bracket pairs around anything else
    /// never match. Returns `None` for an empty map.
    pub fn token_pattern(&self) -> Option<Regex> {
        if self.entries.is_empty() {
            return None;
        }

        let mut keys: Vec<&str> = self.registered_keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        keys.dedup();

        let alternation = keys
            .iter()
            .map(|key| regex::escape(key))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(
            "(?i){}({}){}",
            regex::escape(TOKEN_OPEN),
            alternation,
            regex::escape(TOKEN_CLOSE)
        );

        // Escaped literals always form a valid pattern; only the size limit can fail
        match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                tracing::warn!("Placeholder pattern rejected: {}", e);
                None
            }
        }
    }
}

/// Build the placeholder map for a client record
///
/// Pure and total: every field is registered under every key spelling,
/// absent values map to `""`.
pub fn build_placeholder_map(record: &ClientRecord) -> PlaceholderMap {
    let mut map = PlaceholderMap::new();

    for field in PlaceholderField::ALL {
        let value = field.value(record);
        for key in field.keys() {
            map.insert(key, value.clone());
        }
    }

    tracing::debug!(
        keys = map.len(),
        client = record.display_name(),
        "Built placeholder map"
    );
    map
}
