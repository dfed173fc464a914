//! Entities and their field values.
//!
//! Listing screens hold very different record shapes (buildings, towers,
//! units, cost centers, memberships). The controller only needs two things
//! from any of them: a stable id and named field access. Typed structs
//! implement [`Entity`] by hand; [`Record`] is a dynamic entity decoded from
//! backend JSON that resolves dotted paths into nested objects.
//!
//! # Examples
//!
//! ```
//! use cuentas_listview::entity::{Entity, EntityId, FieldValue, Record};
//!
//! let unit = Record::new(7)
//!     .with_field("numero", "101")
//!     .with_field("torre", FieldValue::object([("nombre", "Torre A")]));
//!
//! assert_eq!(unit.id(), EntityId::Number(7));
//! assert_eq!(unit.field("torre.nombre"), Some(FieldValue::from("Torre A")));
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Stable unique identifier of an entity.
///
/// Backends use both numeric and string keys, so both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric primary key.
    Number(i64),
    /// String key (codes, UUIDs).
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for EntityId {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// A single field value of an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Missing or explicit null.
    #[default]
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Integral number.
    Integer(i64),
    /// Non-integral number (amounts, areas, percentages).
    Float(f64),
    /// Text, including dates rendered as strings.
    Text(String),
    /// Arrays such as tag lists.
    List(Vec<FieldValue>),
    /// Nested sub-object.
    Object(BTreeMap<String, FieldValue>),
}

impl FieldValue {
    /// Builds an object value from `(key, value)` pairs.
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Returns true for values that impose no constraint when used as a
    /// filter criterion: null, blank text and empty lists.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Returns the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Resolves a dotted path (`"owner.name"`) inside nested objects.
    pub fn get_path(&self, path: &str) -> Option<&FieldValue> {
        let mut current = self;
        for segment in path.split('.') {
            match current {
                Self::Object(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Equality used by structured filters.
    ///
    /// Integers and floats compare numerically, and a list field matches
    /// when any of its elements matches.
    pub fn matches_value(&self, wanted: &FieldValue) -> bool {
        match (self, wanted) {
            (Self::List(items), _) if !matches!(wanted, Self::List(_)) => {
                items.iter().any(|item| item.matches_value(wanted))
            }
            (Self::Integer(a), Self::Float(b)) | (Self::Float(b), Self::Integer(a)) => {
                (*a as f64) == *b
            }
            _ => self == wanted,
        }
    }

    /// Text fragments searched by free-text matching.
    ///
    /// Scalars yield their display form, lists and objects yield the
    /// fragments of their members. Null yields nothing.
    pub fn search_fragments(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_fragments(&mut out);
        out
    }

    fn collect_fragments(&self, out: &mut Vec<String>) {
        match self {
            Self::Null => {}
            Self::Bool(_) | Self::Integer(_) | Self::Float(_) => out.push(self.to_string()),
            Self::Text(s) => out.push(s.clone()),
            Self::List(items) => items.iter().for_each(|item| item.collect_fragments(out)),
            Self::Object(map) => map.values().for_each(|value| value.collect_fragments(out)),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Integer(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
            Self::List(_) => 4,
            Self::Object(_) => 5,
        }
    }

    /// Total order used by field sorts.
    ///
    /// Null first, then booleans, numbers, text (case-insensitive), lists
    /// and objects. Values of different kinds order by kind.
    pub fn sort_cmp(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Integer(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Integer(b)) => a.total_cmp(&(*b as f64)),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::List(a), Self::List(b)) => {
                for (x, y) in a.iter().zip(b) {
                    let ord = x.sort_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", if *b { "sí" } else { "no" }),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(", "))
            }
            Self::Object(map) => {
                let parts: Vec<String> = map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                f.write_str(&parts.join(", "))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FieldValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => n
                .as_i64()
                .map_or_else(|| Self::Float(n.as_f64().unwrap_or(f64::NAN)), Self::Integer),
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                Self::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// A record that can be listed by the controller.
///
/// Implementations must return the same id for the lifetime of the record.
///
/// ```
/// use cuentas_listview::entity::{Entity, EntityId, FieldValue};
///
/// #[derive(Clone)]
/// struct Torre {
///     id: i64,
///     nombre: String,
///     pisos: i64,
/// }
///
/// impl Entity for Torre {
///     fn id(&self) -> EntityId {
///         EntityId::Number(self.id)
///     }
///
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "nombre" => Some(self.nombre.as_str().into()),
///             "pisos" => Some(self.pisos.into()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Entity: Clone {
    /// Stable unique identifier.
    fn id(&self) -> EntityId;

    /// Value of the named field, or `None` if the entity has no such field.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Dynamic entity decoded from backend JSON.
///
/// The `id` key is required and becomes the [`EntityId`]; every other key is
/// kept as a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub struct Record {
    id: EntityId,
    fields: BTreeMap<String, FieldValue>,
}

impl Record {
    /// Creates a record with no fields.
    pub fn new(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds or replaces a field (builder pattern).
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Adds or replaces a field.
    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Borrows a field, resolving dotted paths into nested objects.
    pub fn get(&self, path: &str) -> Option<&FieldValue> {
        if let Some(value) = self.fields.get(path) {
            return Some(value);
        }
        let (head, rest) = path.split_once('.')?;
        self.fields.get(head)?.get_path(rest)
    }

    /// Iterates over top-level field names.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl Entity for Record {
    fn id(&self) -> EntityId {
        self.id.clone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.get(name).cloned()
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        use serde_json::Value;

        let Value::Object(mut map) = value else {
            return Err("entity must be a JSON object".to_string());
        };
        let id = match map.remove("id") {
            Some(Value::Number(n)) => n
                .as_i64()
                .map(EntityId::Number)
                .ok_or_else(|| format!("entity id {n} is not an integer"))?,
            Some(Value::String(s)) => EntityId::Text(s),
            Some(other) => return Err(format!("unsupported entity id: {other}")),
            None => return Err("entity is missing an `id` field".to_string()),
        };
        let fields = map.into_iter().map(|(k, v)| (k, v.into())).collect();
        Ok(Self { id, fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_json_keeps_id_and_fields() {
        let record: Record = serde_json::from_str(
            r#"{"id": 3, "nombre": "Edificio Central", "pisos": 12, "admin": {"nombre": "Ana"}}"#,
        )
        .unwrap();

        assert_eq!(record.id(), EntityId::Number(3));
        assert_eq!(record.field("pisos"), Some(FieldValue::Integer(12)));
        assert_eq!(record.field("admin.nombre"), Some(FieldValue::from("Ana")));
        assert_eq!(record.field("id"), None);
        assert_eq!(record.field("admin.telefono"), None);
    }

    #[test]
    fn test_record_rejects_missing_id() {
        let result = serde_json::from_str::<Record>(r#"{"nombre": "sin id"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_string_ids() {
        let record: Record = serde_json::from_str(r#"{"id": "CC-01"}"#).unwrap();
        assert_eq!(record.id(), EntityId::from("CC-01"));
        assert_eq!(record.id().to_string(), "CC-01");
    }

    #[test]
    fn test_blank_values() {
        assert!(FieldValue::Null.is_blank());
        assert!(FieldValue::from("  ").is_blank());
        assert!(FieldValue::List(vec![]).is_blank());
        assert!(!FieldValue::from(0).is_blank());
        assert!(!FieldValue::from(false).is_blank());
    }

    #[test]
    fn test_matches_value_numeric_and_tags() {
        assert!(FieldValue::Integer(3).matches_value(&FieldValue::Float(3.0)));
        assert!(!FieldValue::Integer(3).matches_value(&FieldValue::from("3")));

        let tags = FieldValue::from(vec!["piscina", "gimnasio"]);
        assert!(tags.matches_value(&FieldValue::from("gimnasio")));
        assert!(!tags.matches_value(&FieldValue::from("sauna")));
    }

    #[test]
    fn test_sort_cmp_orders_kinds_and_text_case_insensitively() {
        assert_eq!(
            FieldValue::Null.sort_cmp(&FieldValue::Integer(0)),
            Ordering::Less
        );
        assert_eq!(
            FieldValue::Integer(2).sort_cmp(&FieldValue::Float(1.5)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::from("torre a").sort_cmp(&FieldValue::from("Torre A")),
            Ordering::Equal
        );
        assert_eq!(
            FieldValue::from("Alfa").sort_cmp(&FieldValue::from("beta")),
            Ordering::Less
        );
    }

    #[test]
    fn test_search_fragments_flatten_nested_values() {
        let value = FieldValue::object([("tags", FieldValue::from(vec!["a", "b"]))]);
        assert_eq!(value.search_fragments(), vec!["a".to_string(), "b".to_string()]);
        assert!(FieldValue::Null.search_fragments().is_empty());
    }

    #[test]
    fn test_scalar_fragments_use_display_text() {
        assert_eq!(FieldValue::from(true).search_fragments(), vec!["sí".to_string()]);
        assert_eq!(FieldValue::from(false).to_string(), "no");
        assert_eq!(FieldValue::from(42).search_fragments(), vec!["42".to_string()]);
    }
}
