//! Projection of raw bindings into display rows.
//!
//! [`project`] is a pure function: the same bindings, mapping and view state
//! always give the same rows in the same (document) order.

use crate::bindings::{RawBinding, UNBOUND_SENTINEL};
use crate::mapping::MappingTable;

/// Column headers shared by every front end and exporter.
pub const COLUMN_HEADERS: [&str; 5] = ["Area", "Category", "Action", "Primary", "Secondary"];

/// User-controlled view settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Case-insensitive substring matched against action, area and category.
    pub filter: String,
    /// Mark rows with no input assigned at all.
    pub highlight_unbound: bool,
}

impl ViewState {
    pub fn project(&self, raw: &[RawBinding], mapping: &MappingTable) -> Vec<DisplayRow> {
        project(raw, mapping, &self.filter, self.highlight_unbound)
    }
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub code: String,
    pub area: String,
    pub category: String,
    pub action: String,
    pub primary: String,
    pub secondary: String,
    /// Neither slot has a device assigned.
    pub is_unbound: bool,
    /// `is_unbound` while "show unbound" is enabled.
    pub highlight: bool,
}

impl DisplayRow {
    /// Cell values in [`COLUMN_HEADERS`] order.
    pub fn columns(&self) -> [&str; 5] {
        [
            self.area.as_str(),
            self.category.as_str(),
            self.action.as_str(),
            self.primary.as_str(),
            self.secondary.as_str(),
        ]
    }

    /// Tab-separated row, as copied to the clipboard.
    pub fn to_tsv(&self) -> String {
        self.columns().join("\t")
    }
}

/// Join bindings with the mapping table and apply the text filter.
///
/// Only controls whose mapping has a non-empty area or category are shown;
/// that coverage rule is independent of the filter.
pub fn project(
    raw: &[RawBinding],
    mapping: &MappingTable,
    filter_text: &str,
    highlight_unbound: bool,
) -> Vec<DisplayRow> {
    let needle = filter_text.to_lowercase();

    raw.iter()
        .filter_map(|binding| {
            let entry = mapping.get(&binding.code).filter(|e| e.is_displayable())?;

            let action = if entry.action.is_empty() {
                binding.code.as_str()
            } else {
                entry.action.as_str()
            };

            if !needle.is_empty()
                && ![action, entry.area.as_str(), entry.category.as_str()]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            {
                return None;
            }

            let primary = binding.primary_display();
            let secondary = binding.secondary_display();
            let is_unbound =
                primary.starts_with(UNBOUND_SENTINEL) && secondary.starts_with(UNBOUND_SENTINEL);

            Some(DisplayRow {
                code: binding.code.clone(),
                area: entry.area.clone(),
                category: entry.category.clone(),
                action: action.to_string(),
                primary,
                secondary,
                is_unbound,
                highlight: highlight_unbound && is_unbound,
            })
        })
        .collect()
}
