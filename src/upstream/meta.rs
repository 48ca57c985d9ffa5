//! Meta read-modify-write helpers
//!
//! Pure transformations over a fetched parent entity. The dispatcher fetches,
//! calls one of these, and writes the returned collection back under
//! [`MetaShape::field`].

use serde_json::{json, Map, Value};

use super::operation::MetaShape;

/// Meta collection of `entity`, filtered to `key` when given
pub fn read(shape: MetaShape, entity: &Value, key: Option<&str>) -> Value {
    match shape {
        MetaShape::List { field } => {
            let entries = list(entity, field);
            match key {
                Some(key) => Value::Array(entries.into_iter().filter(|e| entry_key(e) == Some(key)).collect()),
                None => Value::Array(entries),
            }
        }
        MetaShape::Map { field } => {
            let map = map(entity, field);
            match key {
                Some(key) => {
                    let mut selected = Map::new();
                    if let Some(value) = map.get(key) {
                        selected.insert(key.to_string(), value.clone());
                    }
                    Value::Object(selected)
                }
                None => Value::Object(map),
            }
        }
    }
}

/// Collection with `key` set to `value`, replacing the first match or appending
pub fn upsert(shape: MetaShape, entity: &Value, key: &str, value: Value) -> Value {
    match shape {
        MetaShape::List { field } => {
            let mut entries = list(entity, field);
            match entries.iter().position(|e| entry_key(e) == Some(key)) {
                Some(index) => entries[index]["value"] = value,
                None => entries.push(json!({ "key": key, "value": value })),
            }
            Value::Array(entries)
        }
        MetaShape::Map { field } => {
            let mut map = map(entity, field);
            map.insert(key.to_string(), value);
            Value::Object(map)
        }
    }
}

/// Collection with the first `key` entry nulled out, or `None` when absent
///
/// A null value is how both APIs delete a meta entry on write-back.
pub fn remove(shape: MetaShape, entity: &Value, key: &str) -> Option<Value> {
    match shape {
        MetaShape::List { field } => {
            let mut entries = list(entity, field);
            let entry = entries.iter_mut().find(|e| entry_key(e) == Some(key))?;
            entry["value"] = Value::Null;
            Some(Value::Array(entries))
        }
        MetaShape::Map { field } => {
            let mut map = map(entity, field);
            let slot = map.get_mut(key)?;
            *slot = Value::Null;
            Some(Value::Object(map))
        }
    }
}

fn entry_key(entry: &Value) -> Option<&str> {
    entry.get("key").and_then(Value::as_str)
}

fn list(entity: &Value, field: &str) -> Vec<Value> {
    match entity.get(field) {
        Some(Value::Array(entries)) => entries.clone(),
        _ => Vec::new(),
    }
}

// WordPress serializes an empty meta object as `[]`.
fn map(entity: &Value, field: &str) -> Map<String, Value> {
    match entity.get(field) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    }
}
