//! `kubectl describe` style views.
//!
//! Each view writes label/value pairs into a [`DescribeWriter`], which aligns
//! the value column per indentation level once the whole block is known.

mod cluster;
mod core_v1;
mod workloads;

use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::age::rfc1123;
use crate::document::{ResourceItem, array, key_values, str_or};
use crate::printers::{self, NO_RESOURCES};
use crate::registry::Kind;

pub(crate) const NONE: &str = "<none>";

/* ============================= WRITER ============================= */

#[derive(Debug)]
enum Line {
    Field {
        indent: usize,
        label: String,
        value: String,
    },
    Text(String),
}

/// Buffered describe block with an aligned value column.
#[derive(Debug, Default)]
pub struct DescribeWriter {
    lines: Vec<Line>,
}

impl DescribeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// `Label:  value` at the given indentation level.
    pub fn field(&mut self, indent: usize, label: &str, value: impl Display) {
        self.lines.push(Line::Field {
            indent,
            label: format!("{label}:"),
            value: value.to_string(),
        });
    }

    /// Field whose value falls back to `<none>` when empty.
    pub fn field_or_none(&mut self, indent: usize, label: &str, value: &str) {
        self.field(indent, label, if value.is_empty() { NONE } else { value });
    }

    /// Header line such as `Containers:` that opens a nested section.
    pub fn section(&mut self, indent: usize, label: &str) {
        self.text(indent, format!("{label}:"));
    }

    pub fn text(&mut self, indent: usize, text: impl Display) {
        self.lines
            .push(Line::Text(format!("{}{text}", "  ".repeat(indent))));
    }

    /// First value on the label line, the rest on aligned continuation lines.
    pub fn list(&mut self, indent: usize, label: &str, values: &[String]) {
        let Some((first, rest)) = values.split_first() else {
            self.field(indent, label, NONE);
            return;
        };
        self.field(indent, label, first);
        for value in rest {
            self.lines.push(Line::Field {
                indent,
                label: String::new(),
                value: value.clone(),
            });
        }
    }

    /// Embedded table, e.g. node conditions.
    pub fn table(&mut self, indent: usize, header: &[&str], rows: Vec<Vec<String>>) {
        let rendered = printers::render(header, rows);
        for line in rendered.lines() {
            self.text(indent, line);
        }
    }

    pub fn finish(self) -> String {
        let mut widths: Vec<usize> = Vec::new();
        for line in &self.lines {
            if let Line::Field { indent, label, .. } = line {
                if widths.len() <= *indent {
                    widths.resize(indent + 1, 0);
                }
                widths[*indent] = widths[*indent].max(label.len());
            }
        }
        self.lines
            .into_iter()
            .map(|line| match line {
                Line::Field {
                    indent,
                    label,
                    value,
                } => {
                    let width = widths[indent] + 2;
                    format!("{}{label:<width$}{value}", "  ".repeat(indent))
                        .trim_end()
                        .to_string()
                }
                Line::Text(text) => text.trim_end().to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/* ============================= SHARED FIELDS ============================= */

pub(crate) fn timestamp(value: &Value) -> String {
    rfc1123(value).unwrap_or_else(|| NONE.to_string())
}

/// Name, Namespace, Labels, Annotations and CreationTimestamp.
pub(crate) fn write_metadata(w: &mut DescribeWriter, item: &ResourceItem, namespaced: bool) {
    let metadata = &item.data["metadata"];
    w.field(0, "Name", item.name());
    if namespaced {
        w.field(0, "Namespace", item.namespace().unwrap_or(NONE));
    }
    w.list(0, "Labels", &key_values(&metadata["labels"], "="));
    w.list(0, "Annotations", &key_values(&metadata["annotations"], ": "));
    if !metadata["creationTimestamp"].is_null() {
        w.field(0, "CreationTimestamp", timestamp(&metadata["creationTimestamp"]));
    }
}

/// `key=value` selector rendering, comma separated.
pub(crate) fn selector(value: &Value) -> String {
    let pairs = key_values(value, "=");
    if pairs.is_empty() {
        NONE.to_string()
    } else {
        pairs.join(",")
    }
}

/// Label selector with `matchLabels` and `matchExpressions`.
pub(crate) fn label_selector(value: &Value) -> String {
    let mut parts = key_values(&value["matchLabels"], "=");
    for expr in array(&value["matchExpressions"]) {
        let key = str_or(&expr["key"], "");
        let values = printers::join_scalars(&expr["values"], ",");
        parts.push(match str_or(&expr["operator"], "") {
            "In" => format!("{key} in ({values})"),
            "NotIn" => format!("{key} notin ({values})"),
            "Exists" => key.to_string(),
            "DoesNotExist" => format!("!{key}"),
            other => format!("{key} {other} ({values})"),
        });
    }
    if parts.is_empty() {
        NONE.to_string()
    } else {
        parts.join(",")
    }
}

/* ============================= DISPATCH ============================= */

/// One describe block for `item`.
pub fn describe_item(kind: Kind, item: &ResourceItem, now: DateTime<Utc>) -> String {
    let mut w = DescribeWriter::new();
    match kind {
        Kind::Node => core_v1::node(&mut w, item),
        Kind::Pod => core_v1::pod(&mut w, item),
        Kind::Service => core_v1::service(&mut w, item),
        Kind::Endpoints => core_v1::endpoints(&mut w, item),
        Kind::Event => core_v1::event(&mut w, item, now),
        Kind::ConfigMap => core_v1::config_map(&mut w, item),
        Kind::Secret => core_v1::secret(&mut w, item),
        Kind::ServiceAccount => core_v1::service_account(&mut w, item),
        Kind::Deployment => workloads::deployment(&mut w, item),
        Kind::ReplicaSet => workloads::replica_set(&mut w, item),
        Kind::DaemonSet => workloads::daemon_set(&mut w, item),
        Kind::StatefulSet => workloads::stateful_set(&mut w, item),
        Kind::Job => workloads::job(&mut w, item),
        Kind::CronJob => workloads::cron_job(&mut w, item),
        Kind::PersistentVolume => cluster::persistent_volume(&mut w, item),
        Kind::PersistentVolumeClaim => cluster::persistent_volume_claim(&mut w, item),
        Kind::StorageClass => cluster::storage_class(&mut w, item),
        Kind::Ingress => cluster::ingress(&mut w, item),
        Kind::ClusterRole | Kind::Role => cluster::role(&mut w, item, kind == Kind::Role),
        Kind::ClusterRoleBinding | Kind::RoleBinding => {
            cluster::role_binding(&mut w, item, kind == Kind::RoleBinding)
        }
    }
    w.finish()
}

/// Describe blocks for every item, separated by blank lines.
pub fn describe_items(kind: Kind, items: &[ResourceItem], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return NO_RESOURCES.to_string();
    }
    items
        .iter()
        .map(|item| describe_item(kind, item, now))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/* ============================= TESTS ============================= */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_writer_aligns_per_indent() {
        let mut w = DescribeWriter::new();
        w.field(0, "Name", "web");
        w.field(0, "Namespace", "prod");
        w.section(0, "Containers");
        w.field(1, "Image", "nginx");
        let out = w.finish();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Name:       web");
        assert_eq!(lines[1], "Namespace:  prod");
        assert_eq!(lines[2], "Containers:");
        assert_eq!(lines[3], "  Image:  nginx");
    }

    #[test]
    fn test_writer_list_continuation() {
        let mut w = DescribeWriter::new();
        w.list(0, "Labels", &["a=1".to_string(), "b=2".to_string()]);
        w.list(0, "Annotations", &[]);
        let out = w.finish();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Labels:       a=1");
        assert_eq!(lines[1], "              b=2");
        assert_eq!(lines[2], "Annotations:  <none>");
    }

    #[test]
    fn test_metadata_labels_sorted() {
        let item = ResourceItem::new(json!({"metadata": {
            "name": "x", "namespace": "ns", "labels": {"z": "1", "a": "2"}}}));
        let mut w = DescribeWriter::new();
        write_metadata(&mut w, &item, true);
        let out = w.finish();
        let a = out.find("a=2").unwrap();
        let z = out.find("z=1").unwrap();
        assert!(a < z);
    }

    #[test]
    fn test_label_selector_expressions() {
        let sel = json!({
            "matchLabels": {"app": "web"},
            "matchExpressions": [{"key": "tier", "operator": "In", "values": ["a", "b"]}]
        });
        assert_eq!(label_selector(&sel), "app=web,tier in (a,b)");
        assert_eq!(label_selector(&json!({})), NONE);
    }

    #[test]
    fn test_describe_empty() {
        let now = Utc::now();
        assert_eq!(describe_items(Kind::Pod, &[], now), NO_RESOURCES);
    }

    #[test]
    fn test_every_kind_describes_sparse_item() {
        let now = Utc::now();
        let item = ResourceItem::new(json!({"metadata": {"name": "sparse", "namespace": "ns"}}));
        for t in crate::registry::RESOURCE_TYPES {
            let out = describe_item(t.kind, &item, now);
            assert!(out.starts_with("Name:"), "{} view has no name line", t.name);
            assert!(out.contains("sparse"));
        }
    }
}
