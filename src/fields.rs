//! The field registry: which fields may be queried and how their raw
//! values are coerced.
//!
//! The registry is built once at startup and never mutated afterwards, so a
//! single instance can be shared freely across threads; every parse call
//! only reads from it.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::value::{FieldValue, ObjectId};

/// Declared value type of a queryable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    ObjectId,
    Integer,
    Double,
    DateTime,
    String,
}

impl FieldType {
    /// Human-readable type name, used in coercion error messages.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::ObjectId => "object id",
            FieldType::Integer => "integer",
            FieldType::Double => "double",
            FieldType::DateTime => "ISO-8601 date-time",
            FieldType::String => "string",
        }
    }

    /// Coerce raw query text into a value of this type. `None` means the
    /// text is not a valid literal for the type.
    pub fn coerce(&self, raw: &str) -> Option<FieldValue> {
        match self {
            FieldType::ObjectId => raw.parse::<ObjectId>().ok().map(FieldValue::ObjectId),
            FieldType::Integer => raw.parse::<i64>().ok().map(FieldValue::Integer),
            FieldType::Double => raw.parse::<f64>().ok().map(FieldValue::Double),
            FieldType::DateTime => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(FieldValue::DateTime),
            FieldType::String => Some(FieldValue::String(raw.to_string())),
        }
    }
}

/// Immutable mapping from field name to its declared type.
#[derive(Debug, Clone)]
pub struct FieldRegistry {
    fields: HashMap<String, FieldType>,
}

impl FieldRegistry {
    /// An empty registry. Useful for callers that register their own
    /// field set instead of the run-tracking defaults.
    pub fn empty() -> Self {
        FieldRegistry {
            fields: HashMap::new(),
        }
    }

    /// Register a field, replacing any previous entry of the same name.
    /// Intended for startup configuration only.
    pub fn register(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        self.fields.insert(name.into(), field_type);
        self
    }

    /// Look up a field's declared type. Field names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.fields.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }
}

impl Default for FieldRegistry {
    /// The run-tracking domain fields.
    fn default() -> Self {
        FieldRegistry::empty()
            .register("id", FieldType::ObjectId)
            .register("ownerId", FieldType::ObjectId)
            .register("duration", FieldType::Integer)
            .register("distance", FieldType::Double)
            .register("startDate", FieldType::DateTime)
            .register("email", FieldType::String)
            .register("fullName", FieldType::String)
            .register("created", FieldType::DateTime)
            .register("createdBy", FieldType::ObjectId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_domain_fields() {
        let registry = FieldRegistry::default();
        assert_eq!(registry.get("duration"), Some(FieldType::Integer));
        assert_eq!(registry.get("distance"), Some(FieldType::Double));
        assert_eq!(registry.get("startDate"), Some(FieldType::DateTime));
        assert_eq!(registry.get("ownerId"), Some(FieldType::ObjectId));
        assert_eq!(registry.get("fullName"), Some(FieldType::String));
        assert!(!registry.contains("foo"));
    }

    #[test]
    fn field_names_are_case_sensitive() {
        let registry = FieldRegistry::default();
        assert!(registry.get("ownerid").is_none());
    }

    #[test]
    fn coerce_integer() {
        assert_eq!(FieldType::Integer.coerce("1000"), Some(FieldValue::Integer(1000)));
        assert_eq!(FieldType::Integer.coerce("12.5"), None);
        assert_eq!(FieldType::Integer.coerce("fast"), None);
    }

    #[test]
    fn coerce_double_accepts_optional_fraction() {
        assert_eq!(FieldType::Double.coerce("2500"), Some(FieldValue::Double(2500.0)));
        assert_eq!(FieldType::Double.coerce("41.95"), Some(FieldValue::Double(41.95)));
        assert_eq!(FieldType::Double.coerce("far"), None);
    }

    #[test]
    fn coerce_date_time_is_iso_8601_only() {
        assert!(FieldType::DateTime.coerce("2020-05-01T00:00:00").is_some());
        assert!(FieldType::DateTime.coerce("2020-05-01").is_none());
        assert!(FieldType::DateTime.coerce("05/01/2020 00:00").is_none());
    }
}
