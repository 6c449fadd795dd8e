//! Recognition of the backend's response envelopes.
//!
//! The content backend has shipped several payload layouts over time:
//!
//! - collection: `{ "data": [ ... ], "meta": { "pagination": { ... } } }`
//! - single resource: `{ "data": { ... } }`
//! - bare record: `{ "id": 1, ... }`
//!
//! and, independently of the envelope, two record layouts:
//!
//! - legacy nested: `{ "id": 1, "attributes": { "title": ... } }`
//! - flat: `{ "id": 1, "title": ... }`
//!
//! [`classify`] picks the envelope once; [`flatten_record`] and
//! [`unwrap_relation`] take care of the record layout. Nothing else in the
//! crate probes raw JSON for these shapes.

use serde_json::{Map, Value};

/// The closed set of recognised top-level envelopes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope<'a> {
    /// `{ data: [...], meta }`, or a bare JSON array.
    Collection {
        items: &'a [Value],
        meta: Option<&'a Value>,
    },
    /// `{ data: { ... } }`
    Single(&'a Map<String, Value>),
    /// A record with no wrapper.
    Bare(&'a Map<String, Value>),
    /// `{ data: null }`, an error envelope, or anything unrecognised.
    Empty,
}

impl Envelope<'_> {
    /// Short name used in logs and on the diagnostic pages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Collection { .. } => "collection",
            Self::Single(_) => "single",
            Self::Bare(_) => "bare",
            Self::Empty => "empty",
        }
    }
}

/// Classify a raw backend payload.
#[must_use]
pub fn classify(raw: &Value) -> Envelope<'_> {
    match raw {
        Value::Array(items) => Envelope::Collection { items, meta: None },
        Value::Object(obj) => match obj.get("data") {
            Some(Value::Array(items)) => Envelope::Collection {
                items,
                meta: obj.get("meta"),
            },
            Some(Value::Object(record)) => Envelope::Single(record),
            Some(_) => Envelope::Empty,
            None if obj.contains_key("id") => Envelope::Bare(obj),
            None => Envelope::Empty,
        },
        _ => Envelope::Empty,
    }
}

/// Layout of a single record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordShape<'a> {
    /// `{ id, attributes: { ... } }`
    Nested {
        record: &'a Map<String, Value>,
        attributes: &'a Map<String, Value>,
    },
    /// Fields already at the top level.
    Flat(&'a Map<String, Value>),
}

/// Determine the layout of a record.
#[must_use]
pub fn record_shape(record: &Map<String, Value>) -> RecordShape<'_> {
    match record.get("attributes") {
        Some(Value::Object(attributes)) => RecordShape::Nested { record, attributes },
        _ => RecordShape::Flat(record),
    }
}

/// Produce the flat form of a record: `{ id, ...attributes }` for the legacy
/// layout, an unchanged copy otherwise.
#[must_use]
pub fn flatten_record(record: &Map<String, Value>) -> Map<String, Value> {
    match record_shape(record) {
        RecordShape::Nested { record, attributes } => {
            let mut flat = attributes.clone();
            for (key, value) in record {
                if key != "attributes" {
                    flat.insert(key.clone(), value.clone());
                }
            }
            flat
        }
        RecordShape::Flat(record) => record.clone(),
    }
}

/// A relation field after unwrapping.
#[derive(Debug, Clone, PartialEq)]
pub enum Relation {
    Absent,
    One(Map<String, Value>),
    Many(Vec<Map<String, Value>>),
}

/// Unwrap a relation field (cover, author, category, block media).
///
/// Accepts the flat record, `{ data: record }`, `{ data: [records] }`,
/// `{ data: null }` and bare arrays; every record comes back flattened.
#[must_use]
pub fn unwrap_relation(value: &Value) -> Relation {
    match value {
        Value::Object(obj) if is_relation_wrapper(obj) => match obj.get("data") {
            Some(Value::Object(record)) => Relation::One(flatten_record(record)),
            Some(Value::Array(items)) => Relation::Many(flatten_all(items)),
            _ => Relation::Absent,
        },
        Value::Object(record) => Relation::One(flatten_record(record)),
        Value::Array(items) => Relation::Many(flatten_all(items)),
        _ => Relation::Absent,
    }
}

fn is_relation_wrapper(obj: &Map<String, Value>) -> bool {
    obj.contains_key("data") && !obj.contains_key("id") && !obj.contains_key("url")
}

fn flatten_all(items: &[Value]) -> Vec<Map<String, Value>> {
    items
        .iter()
        .filter_map(Value::as_object)
        .map(flatten_record)
        .collect()
}
