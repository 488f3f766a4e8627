// SPDX-License-Identifier: Apache-2.0

use bson::{Bson, Document};
use serde_json::{Map, Value};

/// Converts a stored document into its public JSON shape: every
/// object id becomes its hex string and every datetime an RFC 3339
/// string, at any depth, and the top-level `_id` field is renamed to
/// `id`. Nested `_id` keys keep their name.
#[must_use]
pub fn normalize(document: Document) -> Value {
    let mut object = Map::with_capacity(document.len());
    for (key, value) in document {
        let key = if key == "_id" { "id".to_string() } else { key };
        object.insert(key, bson_to_json(value));
    }
    Value::Object(object)
}

fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(id) => Value::String(id.to_hex()),
        Bson::DateTime(when) => when
            .try_to_rfc3339_string()
            .map_or(Value::Null, Value::String),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(nested) => Value::Object(
            nested
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        other => other.into_relaxed_extjson(),
    }
}
