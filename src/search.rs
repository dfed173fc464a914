//! Free-text search across designated fields.
//!
//! The default mode is a case-insensitive substring match: an entity matches
//! when **any** searchable field contains the term. [`SearchMode::Fuzzy`]
//! swaps in the skim fuzzy matcher for screens that want typo-tolerant
//! lookups.

use crate::entity::Entity;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::{Deserialize, Serialize};

/// How the search term is matched against field text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring match.
    #[default]
    Substring,
    /// Skim-style fuzzy match (characters in order, gaps allowed).
    Fuzzy,
}

/// A normalized free-text search term.
///
/// Surrounding whitespace is ignored and the needle is lowercased once, so
/// the per-entity check only lowercases field text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm {
    raw: String,
    needle: String,
}

impl SearchTerm {
    /// Builds a term from user input.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        Self { raw, needle }
    }

    /// The term as typed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// True when the term matches everything.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Tests an entity's searchable fields against the term.
    ///
    /// Builds a fresh [`SearchPass`]; prefer [`pass`](Self::pass) when
    /// checking a whole collection.
    pub fn matches<E: Entity>(&self, entity: &E, fields: &[String], mode: SearchMode) -> bool {
        self.pass(fields, mode).matches(entity)
    }

    /// Prepares one pass over a collection. The fuzzy matcher, when the
    /// mode needs one, is built here once and shared by every entity.
    pub fn pass<'a>(&'a self, fields: &'a [String], mode: SearchMode) -> SearchPass<'a> {
        let fuzzy = match mode {
            SearchMode::Fuzzy if !self.is_empty() => Some(SkimMatcherV2::default().ignore_case()),
            _ => None,
        };
        SearchPass {
            term: self,
            fields,
            fuzzy,
        }
    }
}

/// A search term bound to its fields and matcher for one recompute.
pub struct SearchPass<'a> {
    term: &'a SearchTerm,
    fields: &'a [String],
    fuzzy: Option<SkimMatcherV2>,
}

impl SearchPass<'_> {
    /// True when any searchable field of `entity` matches the term.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        if self.term.is_empty() {
            return true;
        }
        let needle = &self.term.needle;
        self.fields
            .iter()
            .filter_map(|field| entity.field(field))
            .flat_map(|value| value.search_fragments())
            .any(|text| match &self.fuzzy {
                None => text.to_lowercase().contains(needle.as_str()),
                Some(m) => m.fuzzy_match(&text, needle).is_some(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{FieldValue, Record};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_substring_is_case_insensitive() {
        let torre_a = Record::new(1).with_field("name", "Torre A");
        let torre_b = Record::new(2).with_field("name", "Torre B");
        let term = SearchTerm::new("torre a");
        let searchable = fields(&["name"]);

        assert!(term.matches(&torre_a, &searchable, SearchMode::Substring));
        assert!(!term.matches(&torre_b, &searchable, SearchMode::Substring));
    }

    #[test]
    fn test_empty_and_blank_terms_match_all() {
        let record = Record::new(1).with_field("name", "Edificio Norte");
        let searchable = fields(&["name"]);

        assert!(SearchTerm::new("").matches(&record, &searchable, SearchMode::Substring));
        assert!(SearchTerm::new("   ").matches(&record, &searchable, SearchMode::Substring));
    }

    #[test]
    fn test_any_field_may_match() {
        let record = Record::new(1)
            .with_field("numero", "304")
            .with_field("propietario", FieldValue::object([("nombre", "María Pérez")]));
        let searchable = fields(&["numero", "propietario.nombre"]);

        assert!(SearchTerm::new("pérez").matches(&record, &searchable, SearchMode::Substring));
        assert!(SearchTerm::new("30").matches(&record, &searchable, SearchMode::Substring));
        assert!(!SearchTerm::new("gómez").matches(&record, &searchable, SearchMode::Substring));
    }

    #[test]
    fn test_fields_outside_the_list_are_ignored() {
        let record = Record::new(1)
            .with_field("name", "Centro de costo")
            .with_field("descripcion", "mantención ascensores");
        let term = SearchTerm::new("ascensores");

        assert!(!term.matches(&record, &fields(&["name"]), SearchMode::Substring));
    }

    #[test]
    fn test_fuzzy_mode_tolerates_gaps() {
        let record = Record::new(1).with_field("name", "Membresía Premium");
        let term = SearchTerm::new("mbprm");
        let searchable = fields(&["name"]);

        assert!(!term.matches(&record, &searchable, SearchMode::Substring));
        assert!(term.matches(&record, &searchable, SearchMode::Fuzzy));
    }

    #[test]
    fn test_booleans_match_their_displayed_text() {
        let record = Record::new(1).with_field("activo", true);
        let searchable = fields(&["activo"]);

        assert!(SearchTerm::new("Sí").matches(&record, &searchable, SearchMode::Substring));
        assert!(!SearchTerm::new("true").matches(&record, &searchable, SearchMode::Substring));
    }

    #[test]
    fn test_one_pass_serves_a_whole_collection() {
        let records: Vec<Record> = ["Torre Norte", "Torre Sur", "Bodega 3"]
            .iter()
            .enumerate()
            .map(|(i, name)| Record::new(i as i64).with_field("name", *name))
            .collect();
        let term = SearchTerm::new("trr");
        let searchable = fields(&["name"]);

        let pass = term.pass(&searchable, SearchMode::Fuzzy);
        let hits: Vec<bool> = records.iter().map(|r| pass.matches(r)).collect();
        assert_eq!(hits, vec![true, true, false]);
    }
}
