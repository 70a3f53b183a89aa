//! In-memory object store behind [`MockTransport`](super::MockTransport)

use std::collections::BTreeMap;

use serde_json::{Map, Value, json};
use uuid::Uuid;

use crate::api_error::{ApiError, ApiErrorKind};
use crate::error::ScmError;

/// Objects keyed by collection path, in insertion order
#[derive(Debug, Default)]
pub(crate) struct Store {
    collections: BTreeMap<String, Vec<Value>>,
}

fn not_present(path: &str) -> ScmError {
    let mut err = ApiError::new(
        ApiErrorKind::ObjectNotPresent,
        404,
        format!("Object not present: {path}"),
    );
    err.code = Some("E005".to_string());
    err.error_type = Some("Object Not Present".to_string());
    ScmError::Api(err)
}

/// Split `{collection}/{id}`
fn split_item_path(path: &str) -> Option<(&str, &str)> {
    path.rsplit_once('/')
        .filter(|(collection, id)| !collection.is_empty() && !id.is_empty())
}

fn param<'a>(params: &'a [(&str, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.as_str())
}

fn has_id(object: &Value, id: &str) -> bool {
    object.get("id").and_then(Value::as_str) == Some(id)
}

impl Store {
    pub(crate) fn insert(&mut self, collection: &str, object: Value) {
        self.collections
            .entry(collection.to_string())
            .or_default()
            .push(object);
    }

    pub(crate) fn objects(&self, collection: &str) -> Vec<Value> {
        self.collections
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    /// Item GET when there are no query parameters, list GET otherwise
    pub(crate) fn get(&self, path: &str, params: &[(&str, String)]) -> Result<Value, ScmError> {
        if params.is_empty() {
            let (collection, id) = split_item_path(path).ok_or_else(|| not_present(path))?;
            return self
                .collections
                .get(collection)
                .and_then(|objects| objects.iter().find(|o| has_id(o, id)))
                .cloned()
                .ok_or_else(|| not_present(path));
        }
        Ok(self.list(path, params))
    }

    fn list(&self, collection: &str, params: &[(&str, String)]) -> Value {
        let name = param(params, "name");
        let scope = ["folder", "snippet", "device"]
            .into_iter()
            .find_map(|key| param(params, key).map(|value| (key, value)));

        let matching: Vec<&Value> = self
            .collections
            .get(collection)
            .map(|objects| {
                objects
                    .iter()
                    .filter(|o| {
                        scope.is_none_or(|(key, value)| {
                            o.get(key).and_then(Value::as_str) == Some(value)
                        })
                    })
                    .filter(|o| {
                        name.is_none_or(|n| o.get("name").and_then(Value::as_str) == Some(n))
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total = matching.len();
        let offset = param(params, "offset")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(0);
        let limit = param(params, "limit")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(total);

        let data: Vec<Value> = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();

        json!({
            "data": data,
            "limit": limit,
            "offset": offset,
            "total": total,
        })
    }

    /// Echo the body back with a fresh id
    pub(crate) fn create(&mut self, collection: &str, body: &Value) -> Result<Value, ScmError> {
        let mut object = body.as_object().cloned().unwrap_or_else(Map::new);
        object.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        let object = Value::Object(object);
        self.insert(collection, object.clone());
        Ok(object)
    }

    /// Shallow-merge the body into the stored object
    pub(crate) fn update(&mut self, path: &str, body: &Value) -> Result<Value, ScmError> {
        let (collection, id) = split_item_path(path).ok_or_else(|| not_present(path))?;
        let stored = self
            .collections
            .get_mut(collection)
            .and_then(|objects| objects.iter_mut().find(|o| has_id(o, id)))
            .ok_or_else(|| not_present(path))?;

        if let (Some(target), Some(changes)) = (stored.as_object_mut(), body.as_object()) {
            for (key, value) in changes {
                target.insert(key.clone(), value.clone());
            }
        }
        Ok(stored.clone())
    }

    pub(crate) fn delete(&mut self, path: &str) -> Result<(), ScmError> {
        let (collection, id) = split_item_path(path).ok_or_else(|| not_present(path))?;
        let objects = self
            .collections
            .get_mut(collection)
            .ok_or_else(|| not_present(path))?;
        let before = objects.len();
        objects.retain(|o| !has_id(o, id));
        if objects.len() == before {
            return Err(not_present(path));
        }
        Ok(())
    }
}
