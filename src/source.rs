//! Entity suppliers.
//!
//! Screens get their rows either from a static fixture or from a backend
//! call. Both sit behind [`EntitySource`]; asynchronous callers await their
//! fetch themselves and hand the result to
//! [`finish_load`](crate::ListViewController::finish_load).

use crate::entity::{Entity, Record};
use crate::error::LoadError;

/// Something that can produce an entity collection.
pub trait EntitySource<E: Entity> {
    /// Fetches the full collection.
    fn fetch(&self) -> Result<Vec<E>, LoadError>;
}

impl<E: Entity> EntitySource<E> for Vec<E> {
    fn fetch(&self) -> Result<Vec<E>, LoadError> {
        Ok(self.clone())
    }
}

/// A JSON array of records, such as a bundled mock payload or a cached
/// backend response body.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    json: String,
}

impl FixtureSource {
    /// Wraps a JSON document. It is parsed on every fetch.
    pub fn new(json: impl Into<String>) -> Self {
        Self { json: json.into() }
    }
}

impl EntitySource<Record> for FixtureSource {
    fn fetch(&self) -> Result<Vec<Record>, LoadError> {
        Ok(serde_json::from_str(&self.json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityId;

    #[test]
    fn test_fixture_source_decodes_records() {
        let source = FixtureSource::new(r#"[{"id": 1, "name": "Torre A"}, {"id": 2, "name": "Torre B"}]"#);
        let records = source.fetch().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id(), EntityId::Number(2));
    }

    #[test]
    fn test_fixture_source_reports_decode_errors() {
        let source = FixtureSource::new(r#"[{"name": "sin id"}]"#);
        assert!(matches!(source.fetch(), Err(LoadError::Decode(_))));
    }

    #[test]
    fn test_vec_source_clones() {
        let rows = vec![Record::new(1), Record::new(2)];
        assert_eq!(rows.fetch().unwrap(), rows);
    }
}
