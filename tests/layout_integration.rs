mod common;

use common::{list_document, names, node, pod, service, write_file};
use kubedmp::dispatch::Query;
use kubedmp::source::DumpSource;
use serde_json::json;

// ══════════════════════════════════════════════════════════════════
// Directory and sosreport layouts
// ══════════════════════════════════════════════════════════════════

fn dump_directory() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_file(&root.join("nodes.json"), &list_document("NodeList", json!([node("cp-1")])));
    write_file(
        &root.join("default/pods.json"),
        &list_document("PodList", json!([pod("web-1", "default")])),
    );
    write_file(
        &root.join("kube-system/pods.json"),
        &list_document("PodList", json!([pod("coredns-1", "kube-system")])),
    );
    write_file(
        &root.join("kube-system/services.json"),
        &list_document("ServiceList", json!([service("kube-dns", "kube-system")])),
    );
    tmp
}

#[test]
fn test_detect_plain_directory() {
    let tmp = dump_directory();
    let source = DumpSource::detect(None, Some(tmp.path())).unwrap();
    assert_eq!(source, DumpSource::Directory(tmp.path().to_path_buf()));
}

#[test]
fn test_directory_namespace_scoping() {
    let tmp = dump_directory();
    let source = DumpSource::Directory(tmp.path().to_path_buf());

    let q = Query::new("po", Some("kube-system".into()), None, false).unwrap();
    assert_eq!(names(&source.load(&q).unwrap()), vec!["coredns-1"]);

    let q = Query::new("po", None, None, true).unwrap();
    assert_eq!(names(&source.load(&q).unwrap()), vec!["web-1", "coredns-1"]);

    let q = Query::new("svc", Some("default".into()), None, false).unwrap();
    assert!(source.load(&q).unwrap().is_empty());
}

#[test]
fn test_directory_cluster_scoped_kind() {
    let tmp = dump_directory();
    let source = DumpSource::Directory(tmp.path().to_path_buf());
    let q = Query::new("node", Some("default".into()), None, false).unwrap();
    assert_eq!(names(&source.load(&q).unwrap()), vec!["cp-1"]);
}

#[test]
fn test_directory_show_visits_every_document() {
    let tmp = dump_directory();
    let source = DumpSource::Directory(tmp.path().to_path_buf());
    let mut kinds = Vec::new();
    source.for_each_any_document(|doc| kinds.push(doc.kind)).unwrap();
    kinds.sort();
    assert_eq!(kinds, vec!["NodeList", "PodList", "PodList", "ServiceList"]);
}

#[test]
fn test_sosreport_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("sosreport-host/sos_commands/kubernetes");
    write_file(
        &root.join("kubectl_get_-o_json_nodes"),
        &list_document("NodeList", json!([node("cp-1")])),
    );
    write_file(
        &root.join("kubectl_get_-o_json_--namespace_default_pods"),
        &list_document("PodList", json!([pod("web-1", "default")])),
    );
    write_file(&root.join("kubectl_get_namespaces"), "NAME STATUS\ndefault Active\n");

    let source = DumpSource::detect(None, Some(&root)).unwrap();
    assert!(matches!(source, DumpSource::SosReport(_)));

    let q = Query::new("po", None, None, false).unwrap();
    assert_eq!(names(&source.load(&q).unwrap()), vec!["web-1"]);

    let q = Query::new("no", None, None, false).unwrap();
    assert_eq!(names(&source.load(&q).unwrap()), vec!["cp-1"]);
}
