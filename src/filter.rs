//! Structured filters.
//!
//! A [`FilterCriteria`] maps field names to a [`Criterion`]. An entity
//! passes when it satisfies every criterion (logical AND). Blank criterion
//! values are never stored: setting one clears the field instead, so an
//! unset dropdown never hides rows.

use crate::entity::{Entity, FieldValue};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared predicate over a field value.
pub type FieldPredicate = Arc<dyn Fn(&FieldValue) -> bool + Send + Sync>;

/// One structured filter constraint.
#[derive(Clone)]
pub enum Criterion {
    /// Field must equal the value (see [`FieldValue::matches_value`]).
    Equals(FieldValue),
    /// Field must equal any of the values.
    OneOf(Vec<FieldValue>),
    /// Field must satisfy the predicate. Missing fields are passed as `Null`.
    Predicate(FieldPredicate),
}

impl Criterion {
    /// Wraps a closure as a predicate criterion.
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&FieldValue) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns true when the criterion imposes no constraint.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Equals(value) => value.is_blank(),
            Self::OneOf(values) => values.iter().all(FieldValue::is_blank),
            Self::Predicate(_) => false,
        }
    }

    /// Tests a field value against this criterion.
    pub fn accepts(&self, value: Option<&FieldValue>) -> bool {
        let null = FieldValue::Null;
        let value = value.unwrap_or(&null);
        match self {
            Self::Equals(wanted) => value.matches_value(wanted),
            Self::OneOf(wanted) => wanted
                .iter()
                .filter(|w| !w.is_blank())
                .any(|w| value.matches_value(w)),
            Self::Predicate(f) => f(value),
        }
    }
}

impl fmt::Debug for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equals(value) => f.debug_tuple("Equals").field(value).finish(),
            Self::OneOf(values) => f.debug_tuple("OneOf").field(values).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

impl From<FieldValue> for Criterion {
    fn from(value: FieldValue) -> Self {
        Self::Equals(value)
    }
}

impl From<&str> for Criterion {
    fn from(value: &str) -> Self {
        Self::Equals(value.into())
    }
}

impl From<String> for Criterion {
    fn from(value: String) -> Self {
        Self::Equals(value.into())
    }
}

impl From<i64> for Criterion {
    fn from(value: i64) -> Self {
        Self::Equals(value.into())
    }
}

impl From<i32> for Criterion {
    fn from(value: i32) -> Self {
        Self::Equals(value.into())
    }
}

impl From<bool> for Criterion {
    fn from(value: bool) -> Self {
        Self::Equals(value.into())
    }
}

/// The set of active structured filters, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct FilterCriteria {
    criteria: BTreeMap<String, Criterion>,
}

impl FilterCriteria {
    /// Creates an empty set of criteria that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the criterion for `field`, or clears it when blank.
    ///
    /// Returns true if the stored criteria changed shape (a field was added,
    /// replaced or removed).
    pub fn set(&mut self, field: impl Into<String>, criterion: Criterion) -> bool {
        let field = field.into();
        if criterion.is_blank() {
            self.criteria.remove(&field).is_some()
        } else {
            self.criteria.insert(field, criterion);
            true
        }
    }

    /// Removes the criterion for `field`.
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.criteria.remove(field).is_some()
    }

    /// Removes every criterion.
    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    /// Number of active criteria.
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// True when no criterion is active.
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Borrows the criterion for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&Criterion> {
        self.criteria.get(field)
    }

    /// Iterates over the active field names.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    /// Tests an entity against every criterion.
    pub fn matches<E: Entity>(&self, entity: &E) -> bool {
        self.criteria
            .iter()
            .all(|(field, criterion)| criterion.accepts(entity.field(field).as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Record;

    fn unidad(id: i64, torre: &str, estado: &str, m2: f64) -> Record {
        Record::new(id)
            .with_field("torre", torre)
            .with_field("estado", estado)
            .with_field("superficie", m2)
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let criteria = FilterCriteria::new();
        assert!(criteria.matches(&unidad(1, "A", "ocupada", 50.0)));
    }

    #[test]
    fn test_blank_value_clears_field() {
        let mut criteria = FilterCriteria::new();
        criteria.set("torre", "A".into());
        assert_eq!(criteria.len(), 1);

        assert!(criteria.set("torre", "".into()));
        assert!(criteria.is_empty());
        assert!(!criteria.set("torre", FieldValue::Null.into()));
    }

    #[test]
    fn test_criteria_are_conjunctive() {
        let mut criteria = FilterCriteria::new();
        criteria.set("torre", "A".into());
        criteria.set("estado", "ocupada".into());

        assert!(criteria.matches(&unidad(1, "A", "ocupada", 50.0)));
        assert!(!criteria.matches(&unidad(2, "A", "vacante", 50.0)));
        assert!(!criteria.matches(&unidad(3, "B", "ocupada", 50.0)));
    }

    #[test]
    fn test_one_of_and_predicate() {
        let mut criteria = FilterCriteria::new();
        criteria.set(
            "torre",
            Criterion::OneOf(vec!["A".into(), "C".into(), "".into()]),
        );
        criteria.set(
            "superficie",
            Criterion::predicate(|v| matches!(v, FieldValue::Float(m2) if *m2 >= 60.0)),
        );

        assert!(criteria.matches(&unidad(1, "C", "ocupada", 75.0)));
        assert!(!criteria.matches(&unidad(2, "C", "ocupada", 40.0)));
        assert!(!criteria.matches(&unidad(3, "B", "ocupada", 75.0)));
    }

    #[test]
    fn test_missing_field_fails_equality() {
        let mut criteria = FilterCriteria::new();
        criteria.set("propietario", "Luis".into());
        assert!(!criteria.matches(&unidad(1, "A", "ocupada", 50.0)));
    }
}
