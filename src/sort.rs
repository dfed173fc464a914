//! Sort specifications.
//!
//! Sorting is always stable: entities whose keys compare equal keep their
//! relative input order, in both directions.

use crate::entity::Entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies the direction to an ascending ordering.
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Self::Ascending => ord,
            Self::Descending => ord.reverse(),
        }
    }

    /// Arrow shown next to a sorted column header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// A field sort, as stored in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Field name (dotted paths allowed).
    pub field: String,
    /// Direction.
    #[serde(default)]
    pub direction: SortDirection,
}

/// Opaque comparator between two entities.
pub type Comparator<E> = Arc<dyn Fn(&E, &E) -> Ordering + Send + Sync>;

/// The active sort.
pub enum SortSpec<E> {
    /// Order by one field using [`FieldValue::sort_cmp`](crate::entity::FieldValue::sort_cmp).
    Field(SortField),
    /// Order with a caller-supplied comparator.
    Comparator(Comparator<E>),
}

impl<E: Entity> SortSpec<E> {
    /// Sorts by `field` in `direction`.
    pub fn by_field(field: impl Into<String>, direction: SortDirection) -> Self {
        Self::Field(SortField {
            field: field.into(),
            direction,
        })
    }

    /// Sorts with a comparator closure.
    pub fn by<F>(f: F) -> Self
    where
        F: Fn(&E, &E) -> Ordering + Send + Sync + 'static,
    {
        Self::Comparator(Arc::new(f))
    }

    /// The sorted field, when sorting by field.
    pub fn field(&self) -> Option<&SortField> {
        match self {
            Self::Field(f) => Some(f),
            Self::Comparator(_) => None,
        }
    }

    /// Compares two entities under this spec.
    pub fn compare(&self, a: &E, b: &E) -> Ordering {
        match self {
            Self::Field(SortField { field, direction }) => {
                let ord = match (a.field(field), b.field(field)) {
                    (Some(x), Some(y)) => x.sort_cmp(&y),
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                direction.apply(ord)
            }
            Self::Comparator(cmp) => cmp(a, b),
        }
    }

    /// Stable-sorts `order` (indices into `entities`) in place.
    pub fn sort_indices(&self, entities: &[E], order: &mut [usize]) {
        // `sort_by` is a stable merge sort.
        order.sort_by(|&i, &j| self.compare(&entities[i], &entities[j]));
    }
}

impl<E> Clone for SortSpec<E> {
    fn clone(&self) -> Self {
        match self {
            Self::Field(f) => Self::Field(f.clone()),
            Self::Comparator(cmp) => Self::Comparator(Arc::clone(cmp)),
        }
    }
}

impl<E> fmt::Debug for SortSpec<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => f.debug_tuple("Field").field(field).finish(),
            Self::Comparator(_) => f.write_str("Comparator(..)"),
        }
    }
}

impl<E> From<SortField> for SortSpec<E> {
    fn from(value: SortField) -> Self {
        Self::Field(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Record;

    fn sorted_ids(spec: &SortSpec<Record>, records: &[Record]) -> Vec<String> {
        let mut order: Vec<usize> = (0..records.len()).collect();
        spec.sort_indices(records, &mut order);
        order.iter().map(|&i| records[i].id().to_string()).collect()
    }

    fn fixture() -> Vec<Record> {
        vec![
            Record::new("a").with_field("pisos", 10),
            Record::new("b").with_field("pisos", 4),
            Record::new("c").with_field("pisos", 10),
            Record::new("d"),
            Record::new("e").with_field("pisos", 4),
        ]
    }

    #[test]
    fn test_ascending_is_stable() {
        let spec = SortSpec::by_field("pisos", SortDirection::Ascending);
        assert_eq!(sorted_ids(&spec, &fixture()), ["d", "b", "e", "a", "c"]);
    }

    #[test]
    fn test_descending_keeps_ties_in_input_order() {
        let spec = SortSpec::by_field("pisos", SortDirection::Descending);
        assert_eq!(sorted_ids(&spec, &fixture()), ["a", "c", "b", "e", "d"]);
    }

    #[test]
    fn test_comparator_spec() {
        let spec: SortSpec<Record> =
            SortSpec::by(|a: &Record, b: &Record| b.id().cmp(&a.id()));
        assert_eq!(sorted_ids(&spec, &fixture()), ["e", "d", "c", "b", "a"]);
        assert!(spec.field().is_none());
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(SortDirection::Ascending.flipped(), SortDirection::Descending);
        assert_eq!(SortDirection::Descending.apply(Ordering::Less), Ordering::Greater);
        assert_eq!(SortDirection::Ascending.arrow(), "▲");
    }
}
