//! Decoded dump documents and the items they carry.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde_json::Value;

use crate::error::{DumpError, Result};

/// Marker used by `kubectl get -o json` when a list mixes kinds.
pub const GENERIC_LIST: &str = "List";

/* ============================= DOCUMENT ============================= */

/// One top-level object of a dump: a `<Kind>List` or a generic `List`.
#[derive(Debug, Clone)]
pub struct ResourceDocument {
    pub kind: String,
    pub items: Vec<Value>,
}

impl ResourceDocument {
    pub fn from_value(mut value: Value) -> Result<Self> {
        let kind = value
            .get("kind")
            .and_then(Value::as_str)
            .ok_or(DumpError::MissingKind)?
            .to_string();
        let items = match value.get_mut("items").map(Value::take) {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        };
        Ok(Self { kind, items })
    }

    pub fn is_generic_list(&self) -> bool {
        self.kind == GENERIC_LIST
    }
}

pub fn decode_json(text: &str) -> Result<ResourceDocument> {
    let value: Value = serde_json::from_str(text)?;
    ResourceDocument::from_value(value)
}

pub fn decode_yaml(text: &str) -> Result<ResourceDocument> {
    let value: Value = serde_yaml::from_str(text)?;
    ResourceDocument::from_value(value)
}

/* ============================= ITEM ============================= */

/// A single resource: typed metadata plus the untyped remainder.
///
/// Metadata decoding is best effort. If the dump's `metadata` block does not
/// fit `ObjectMeta` the item keeps an empty one and the raw fields stay
/// reachable through `data`.
#[derive(Debug, Clone)]
pub struct ResourceItem {
    pub metadata: ObjectMeta,
    pub data: Value,
}

impl ResourceItem {
    pub fn new(data: Value) -> Self {
        let metadata = data
            .get("metadata")
            .cloned()
            .and_then(|m| serde_json::from_value(m).ok())
            .unwrap_or_default();
        Self { metadata, data }
    }

    pub fn name(&self) -> &str {
        self.metadata
            .name
            .as_deref()
            .or_else(|| self.data["metadata"]["name"].as_str())
            .unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata
            .namespace
            .as_deref()
            .or_else(|| self.data["metadata"]["namespace"].as_str())
    }

    pub fn kind(&self) -> Option<&str> {
        self.data["kind"].as_str()
    }

    pub fn spec(&self) -> &Value {
        &self.data["spec"]
    }

    pub fn status(&self) -> &Value {
        &self.data["status"]
    }
}

/* ============================= ACCESSORS ============================= */

/// String at `value`, or `default` when absent or not a string.
pub fn str_or<'a>(value: &'a Value, default: &'a str) -> &'a str {
    match value.as_str() {
        Some(s) if !s.is_empty() => s,
        _ => default,
    }
}

/// Integer at `value`, accepting integral floats as written by some dumpers.
pub fn int_or(value: &Value, default: i64) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or(default)
}

pub fn array(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

/// Render a scalar for display; `None` for null, arrays and objects.
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Sorted `key=value` pairs of a string map.
pub fn key_values(value: &Value, separator: &str) -> Vec<String> {
    let mut pairs: Vec<String> = value
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(k, v)| format!("{k}{separator}{}", scalar(v).unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();
    pairs.sort();
    pairs
}

/* ============================= TESTS ============================= */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_typed_list() {
        let doc = decode_json(r#"{"kind":"PodList","items":[{"metadata":{"name":"a"}}]}"#).unwrap();
        assert_eq!(doc.kind, "PodList");
        assert_eq!(doc.items.len(), 1);
        assert!(!doc.is_generic_list());
    }

    #[test]
    fn test_decode_without_items_is_empty() {
        let doc = decode_json(r#"{"kind":"NodeList"}"#).unwrap();
        assert!(doc.items.is_empty());
    }

    #[test]
    fn test_decode_missing_kind_fails() {
        assert!(matches!(decode_json(r#"{"items":[]}"#), Err(DumpError::MissingKind)));
    }

    #[test]
    fn test_decode_malformed_json_fails() {
        assert!(matches!(decode_json(r#"{"kind": "PodList","#), Err(DumpError::Json(_))));
    }

    #[test]
    fn test_decode_yaml() {
        let doc = decode_yaml("kind: List\nitems:\n- kind: Pod\n  metadata:\n    name: a\n").unwrap();
        assert!(doc.is_generic_list());
        assert_eq!(doc.items[0]["metadata"]["name"], "a");
    }

    #[test]
    fn test_item_metadata_typed() {
        let item = ResourceItem::new(json!({
            "metadata": {"name": "web", "namespace": "prod", "labels": {"app": "web"},
                         "creationTimestamp": "2024-01-01T00:00:00Z"}
        }));
        assert_eq!(item.metadata.name.as_deref(), Some("web"));
        assert_eq!(item.namespace(), Some("prod"));
        assert!(item.metadata.creation_timestamp.is_some());
    }

    #[test]
    fn test_item_malformed_metadata_degrades() {
        let item = ResourceItem::new(json!({"metadata": {"name": "web", "labels": "oops"}}));
        assert!(item.metadata.name.is_none());
        assert_eq!(item.name(), "web");
    }

    #[test]
    fn test_accessors_tolerate_type_mismatch() {
        let v = json!({"a": 3.0, "b": "x", "c": [1, 2]});
        assert_eq!(int_or(&v["a"], 0), 3);
        assert_eq!(int_or(&v["b"], 7), 7);
        assert_eq!(str_or(&v["a"], "<none>"), "<none>");
        assert_eq!(array(&v["c"]).len(), 2);
        assert!(array(&v["b"]).is_empty());
        assert_eq!(array(&v["missing"]["deeper"]).len(), 0);
    }

    #[test]
    fn test_key_values_sorted() {
        let v = json!({"b": "2", "a": "1"});
        assert_eq!(key_values(&v, "="), vec!["a=1", "b=2"]);
    }
}
