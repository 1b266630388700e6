use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use kubedmp::document::ResourceItem;
use serde_json::{Value, json};

/// Pretty-printed list document, framed by bare brace lines like a real dump.
#[allow(dead_code)]
pub fn list_document(kind: &str, items: Value) -> String {
    let doc = json!({"kind": kind, "apiVersion": "v1", "metadata": {}, "items": items});
    format!("{}\n", serde_json::to_string_pretty(&doc).unwrap())
}

#[allow(dead_code)]
pub fn pod(name: &str, namespace: &str) -> Value {
    json!({
        "kind": "Pod",
        "metadata": {"name": name, "namespace": namespace, "creationTimestamp": "2024-01-09T00:00:00Z"},
        "spec": {"nodeName": "worker-1", "containers": [{"name": "app", "image": "nginx:1.25"}]},
        "status": {"phase": "Running", "podIP": "10.0.0.5", "containerStatuses": [
            {"name": "app", "ready": true, "restartCount": 0, "state": {"running": {"startedAt": "2024-01-09T00:00:05Z"}}}
        ]}
    })
}

#[allow(dead_code)]
pub fn node(name: &str) -> Value {
    json!({
        "kind": "Node",
        "metadata": {"name": name, "creationTimestamp": "2024-01-01T00:00:00Z",
                     "labels": {"node-role.kubernetes.io/control-plane": ""}},
        "status": {
            "conditions": [{"type": "Ready", "status": "True"}],
            "addresses": [{"type": "InternalIP", "address": "192.168.1.10"}],
            "nodeInfo": {"kubeletVersion": "v1.26.3", "osImage": "Ubuntu 22.04", "kernelVersion": "5.15.0",
                         "containerRuntimeVersion": "containerd://1.6.20"}
        }
    })
}

#[allow(dead_code)]
pub fn service(name: &str, namespace: &str) -> Value {
    json!({
        "kind": "Service",
        "metadata": {"name": name, "namespace": namespace, "creationTimestamp": "2024-01-09T00:00:00Z"},
        "spec": {"type": "ClusterIP", "clusterIP": "10.96.0.10", "ports": [{"port": 53, "protocol": "UDP"}]}
    })
}

/// A dump file holding nodes, pods across two namespaces, services and container logs.
#[allow(dead_code)]
pub fn sample_dump() -> String {
    let mut dump = String::new();
    dump.push_str(&list_document("NodeList", json!([node("cp-1"), node("cp-2")])));
    dump.push_str(&list_document(
        "PodList",
        json!([pod("web-1", "default"), pod("coredns-1", "kube-system")]),
    ));
    dump.push_str(&list_document("ServiceList", json!([service("kube-dns", "kube-system")])));
    dump.push_str(&list_document("EventList", json!([])));
    dump.push_str("==== START logs for container app of pod default/web-1 ====\n");
    dump.push_str("listening on :80\n");
    dump.push_str("==== END logs for container app of pod default/web-1 ====\n");
    dump
}

#[allow(dead_code)]
pub fn write_file(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[allow(dead_code)]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-01-10T00:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[allow(dead_code)]
pub fn names(items: &[ResourceItem]) -> Vec<&str> {
    items.iter().map(|i| i.name()).collect()
}
