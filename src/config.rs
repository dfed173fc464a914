//! Per-screen list configuration.
//!
//! Each listing screen (edificios, torres, unidades, centros de costo,
//! membresías) differs only in page size, searchable fields, initial sort and
//! presentation. Those knobs live in a [`ListConfig`] that can be built in
//! code or read from JSON; missing keys take their defaults.
//!
//! ```
//! use cuentas_listview::config::ListConfig;
//! use cuentas_listview::sort::SortDirection;
//!
//! let config = ListConfig::from_json(r#"{
//!     "page_size": 12,
//!     "searchable_fields": ["numero", "propietario.nombre"],
//!     "default_sort": { "field": "numero", "direction": "descending" }
//! }"#).unwrap();
//!
//! assert_eq!(config.page_size, 12);
//! assert_eq!(config.default_sort.unwrap().direction, SortDirection::Descending);
//! ```

use crate::error::ConfigError;
use crate::paginator::{self, DEFAULT_PAGE_SIZE};
use crate::render::ViewMode;
use crate::search::SearchMode;
use crate::sort::SortField;
use serde::{Deserialize, Serialize};

/// Configuration applied by [`ListViewController::with_config`](crate::ListViewController::with_config).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Rows per page. Must be at least 1.
    pub page_size: usize,
    /// Fields matched by the free-text search.
    pub searchable_fields: Vec<String>,
    /// Substring or fuzzy search.
    pub search_mode: SearchMode,
    /// Sort applied when the screen opens.
    pub default_sort: Option<SortField>,
    /// Page indicator style.
    pub paginator_type: paginator::Type,
    /// Table or card rendering.
    pub view_mode: ViewMode,
    /// Text shown when no row matches.
    pub empty_message: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            searchable_fields: vec!["name".to_string()],
            search_mode: SearchMode::default(),
            default_sort: None,
            paginator_type: paginator::Type::default(),
            view_mode: ViewMode::default(),
            empty_message: "No se encontraron registros".to_string(),
        }
    }
}

impl ListConfig {
    /// Parses and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot rule out.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::Invalid(
                "page_size must be at least 1".to_string(),
            ));
        }
        if let Some(field) = self.searchable_fields.iter().find(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "searchable field name {field:?} is blank"
            )));
        }
        if let Some(sort) = &self.default_sort {
            if sort.field.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "default_sort.field is blank".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = ListConfig::from_json("{}").unwrap();
        assert_eq!(config, ListConfig::default());
    }

    #[test]
    fn test_enums_use_lowercase_names() {
        let config = ListConfig::from_json(
            r#"{"search_mode": "fuzzy", "paginator_type": "dots", "view_mode": "cards"}"#,
        )
        .unwrap();
        assert_eq!(config.search_mode, SearchMode::Fuzzy);
        assert_eq!(config.paginator_type, paginator::Type::Dots);
        assert_eq!(config.view_mode, ViewMode::Cards);
    }

    #[test]
    fn test_zero_page_size_is_invalid() {
        let err = ListConfig::from_json(r#"{"page_size": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = ListConfig::from_json(r#"{"page_size": "diez"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
