mod common;

use common::{fixed_now, sample_dump, write_file};
use kubedmp::describe::describe_items;
use kubedmp::dispatch::Query;
use kubedmp::printers::{NO_RESOURCES, render_table};
use kubedmp::show::{NO_ITEMS, show_dump};
use kubedmp::source::DumpSource;

// ══════════════════════════════════════════════════════════════════
// get / describe / show over a dump file
// ══════════════════════════════════════════════════════════════════

fn dump_file() -> (tempfile::TempDir, DumpSource) {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cluster-info.dump");
    write_file(&path, &sample_dump());
    (tmp, DumpSource::File(path))
}

fn field<'a>(block: &'a str, label: &str) -> Option<&'a str> {
    block
        .lines()
        .find(|l| l.starts_with(&format!("{label}:")))
        .map(|l| l[label.len() + 1..].trim())
}

#[test]
fn test_get_nodes_shows_roles_and_version() {
    let (_tmp, source) = dump_file();
    let q = Query::new("nodes", None, None, false).unwrap();
    let items = source.load(&q).unwrap();
    let table = render_table(q.resource.kind, &items, fixed_now());
    let lines: Vec<&str> = table.lines().collect();
    assert!(lines[0].starts_with("NAME"));
    assert!(lines[1].starts_with("cp-1"));
    assert!(lines[1].contains("Ready"));
    assert!(lines[1].contains("control-plane"));
    assert!(lines[1].contains("v1.26.3"));
    assert!(lines[1].contains("9d"));
}

#[test]
fn test_get_services_in_namespace() {
    let (_tmp, source) = dump_file();
    let q = Query::new("svc", Some("kube-system".into()), None, false).unwrap();
    let items = source.load(&q).unwrap();
    let table = render_table(q.resource.kind, &items, fixed_now());
    assert!(table.contains("kube-dns"));
    assert!(table.contains("10.96.0.10"));
    assert!(table.contains("53/UDP"));

    let q = Query::new("svc", Some("default".into()), None, false).unwrap();
    let items = source.load(&q).unwrap();
    assert_eq!(render_table(q.resource.kind, &items, fixed_now()), NO_RESOURCES);
}

#[test]
fn test_describe_named_pod() {
    let (_tmp, source) = dump_file();
    let q = Query::new("po", Some("default".into()), Some("web-1".into()), false).unwrap();
    let items = source.load(&q).unwrap();
    assert_eq!(items.len(), 1);

    let block = describe_items(q.resource.kind, &items, fixed_now());
    assert_eq!(field(&block, "Name"), Some("web-1"));
    assert_eq!(field(&block, "Namespace"), Some("default"));
    assert_eq!(field(&block, "Status"), Some("Running"));
    assert_eq!(field(&block, "IP"), Some("10.0.0.5"));
    assert!(block.contains("Containers:"));
    assert!(block.contains("nginx:1.25"));
}

#[test]
fn test_describe_several_nodes_separated_by_blank_line() {
    let (_tmp, source) = dump_file();
    let q = Query::new("no", None, None, false).unwrap();
    let items = source.load(&q).unwrap();
    let out = describe_items(q.resource.kind, &items, fixed_now());
    let blocks: Vec<&str> = out.split("\n\n").filter(|b| b.starts_with("Name:")).collect();
    assert_eq!(blocks.len(), 2);
    assert_eq!(field(blocks[0], "Name"), Some("cp-1"));
    assert_eq!(field(blocks[1], "Name"), Some("cp-2"));
}

#[test]
fn test_describe_missing_object() {
    let (_tmp, source) = dump_file();
    let q = Query::new("deploy", None, Some("nope".into()), true).unwrap();
    let items = source.load(&q).unwrap();
    assert_eq!(describe_items(q.resource.kind, &items, fixed_now()), NO_RESOURCES);
}

#[test]
fn test_show_lists_every_document_in_order() {
    let (_tmp, source) = dump_file();
    let mut sections = Vec::new();
    let shown = show_dump(&source, fixed_now(), |s| sections.push(s.to_string())).unwrap();
    assert_eq!(shown, 4);

    let kinds: Vec<&str> = sections
        .iter()
        .map(|s| s.lines().next().unwrap_or_default())
        .collect();
    assert_eq!(
        kinds,
        vec!["Kind: NodeList", "Kind: PodList", "Kind: ServiceList", "Kind: EventList"]
    );
    assert!(sections[1].contains("coredns-1"));
    assert!(sections[3].contains(NO_ITEMS));
}

#[test]
fn test_show_missing_file() {
    let source = DumpSource::File("/nonexistent/cluster-info.dump".into());
    assert!(show_dump(&source, fixed_now(), |_| {}).is_err());
}
