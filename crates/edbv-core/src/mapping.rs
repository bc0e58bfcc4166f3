//! Static control-code mapping table.
//!
//! The table is a JSON array of `{code, area, category, action}` records and is
//! loaded once at startup. Codes are expected to be unique; when they are not,
//! the last record wins and the duplicate is reported as a warning.

use crate::error::Result;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

const MAX_MAPPING_FILE_BYTES: u64 = 4 * 1_048_576; // 4 MiB

/// Human-readable metadata for one control code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MappingEntry {
    pub code: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub action: String,
}

impl MappingEntry {
    pub fn new(code: &str, area: &str, category: &str, action: &str) -> Self {
        Self {
            code: code.to_string(),
            area: area.to_string(),
            category: category.to_string(),
            action: action.to_string(),
        }
    }

    /// Rows are only displayed for entries that place the control somewhere.
    pub fn is_displayable(&self) -> bool {
        !self.area.is_empty() || !self.category.is_empty()
    }
}

/// Lookup from control code to [`MappingEntry`].
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    entries: HashMap<String, MappingEntry>,
    duplicates: Vec<String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from entries in file order (last duplicate wins).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = MappingEntry>,
    {
        let mut table = Self::new();
        let mut seen = HashSet::new();
        for entry in entries {
            if !seen.insert(entry.code.clone()) && !table.duplicates.contains(&entry.code) {
                table.duplicates.push(entry.code.clone());
            }
            table.entries.insert(entry.code.clone(), entry);
        }
        table
    }

    /// Parse a JSON mapping table.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let entries: Vec<MappingEntry> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    /// Read and parse a JSON mapping table from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_MAPPING_FILE_BYTES {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: mapping file too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_MAPPING_FILE_BYTES
                ),
            )
            .into());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, code: &str) -> Option<&MappingEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Codes that appeared more than once in the source, in first-seen order.
    pub fn duplicate_codes(&self) -> &[String] {
        &self.duplicates
    }
}

/// Load the mapping table, degrading to an empty table on any failure.
///
/// Never fails: problems are returned as warnings (and logged) so the caller
/// can surface them while continuing with whatever table it got.
pub fn load_mappings(path: &Path) -> (MappingTable, Vec<String>) {
    let mut warnings = Vec::new();

    let table = match MappingTable::from_path(path) {
        Ok(table) => table,
        Err(err) => {
            let msg = format!("Failed to load mappings from {}: {}", path.display(), err);
            tracing::warn!("{}", msg);
            warnings.push(msg);
            return (MappingTable::new(), warnings);
        }
    };

    if !table.duplicate_codes().is_empty() {
        let msg = format!(
            "Duplicate codes in {} (last entry wins): {}",
            path.display(),
            table.duplicate_codes().join(", ")
        );
        tracing::warn!("{}", msg);
        warnings.push(msg);
    }

    tracing::info!(entries = table.len(), path = %path.display(), "loaded mappings");
    (table, warnings)
}
