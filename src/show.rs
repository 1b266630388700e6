//! Whole-dump overview: one section per document.

use chrono::{DateTime, Utc};

use crate::document::{ResourceDocument, ResourceItem};
use crate::error::Result;
use crate::printers::{render_generic, render_table};
use crate::registry;
use crate::source::DumpSource;

pub const NO_ITEMS: &str = "No Items";

const RULE_WIDTH: usize = 48;

/// `Kind:` heading, rule line, then the document's table.
pub fn render_document(doc: ResourceDocument, now: DateTime<Utc>) -> String {
    let mut out = format!("Kind: {}\n{}\n", doc.kind, "=".repeat(RULE_WIDTH));
    if doc.items.is_empty() {
        out.push_str(NO_ITEMS);
    } else {
        let items: Vec<ResourceItem> = doc.items.into_iter().map(ResourceItem::new).collect();
        let table = match registry::by_list_kind(&doc.kind) {
            Some(resource) => render_table(resource.kind, &items, now),
            None => render_generic(&items),
        };
        out.push_str(&table);
    }
    out.push('\n');
    out
}

/// Render every document of the dump, in dump order, through `emit`.
pub fn show_dump<F>(source: &DumpSource, now: DateTime<Utc>, mut emit: F) -> Result<usize>
where
    F: FnMut(&str),
{
    source.ensure_exists()?;
    let mut shown = 0;
    source.for_each_any_document(|doc| {
        emit(&render_document(doc, now));
        shown += 1;
    })?;
    Ok(shown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::decode_json;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn test_empty_document() {
        let doc = decode_json(r#"{"kind":"ServiceList","items":[]}"#).unwrap();
        let out = render_document(doc, now());
        assert_eq!(out, format!("Kind: ServiceList\n{}\nNo Items\n", "=".repeat(48)));
    }

    #[test]
    fn test_typed_document_uses_kind_table() {
        let doc = decode_json(
            r#"{"kind":"NodeList","items":[{"metadata":{"name":"n1"},"status":{"conditions":[{"type":"Ready","status":"True"}]}}]}"#,
        )
        .unwrap();
        let out = render_document(doc, now());
        assert!(out.contains("ROLES"));
        assert!(out.contains("n1"));
        assert!(out.contains("Ready"));
    }

    #[test]
    fn test_generic_list_uses_kind_column() {
        let doc = decode_json(
            r#"{"kind":"List","items":[{"kind":"Pod","metadata":{"name":"p","namespace":"default"}}]}"#,
        )
        .unwrap();
        let out = render_document(doc, now());
        assert!(out.contains("KIND"));
        assert!(out.contains("Pod"));
    }

    #[test]
    fn test_show_missing_dump_file() {
        let source = DumpSource::File("/no/such/cluster-info.dump".into());
        let err = show_dump(&source, now(), |_| {}).unwrap_err();
        assert!(matches!(err, crate::error::DumpError::Io { .. }));
    }

    #[test]
    fn test_show_dump_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cluster-info.dump");
        std::fs::write(
            &path,
            "{\n\"kind\": \"NodeList\",\n\"items\": []\n}\n{\n\"kind\": \"PodList\",\n\"items\": []\n}\n",
        )
        .unwrap();
        let mut sections = Vec::new();
        let shown = show_dump(&DumpSource::File(path), now(), |s| sections.push(s.to_string())).unwrap();
        assert_eq!(shown, 2);
        assert!(sections[0].starts_with("Kind: NodeList"));
        assert!(sections[1].starts_with("Kind: PodList"));
    }
}
