//! Storage, networking and RBAC views.

use serde_json::Value;

use super::{DescribeWriter, NONE, write_metadata};
use crate::document::{ResourceItem, array, int_or, key_values, scalar, str_or};
use crate::printers::{access_modes, is_default_class, join_scalars};

/* ============================= STORAGE ============================= */

pub(super) fn persistent_volume(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    write_metadata(w, item, false);
    w.list(0, "Finalizers", &strings(&item.data["metadata"]["finalizers"]));
    w.field_or_none(0, "StorageClass", str_or(&spec["storageClassName"], ""));
    w.field(0, "Status", str_or(&item.status()["phase"], ""));
    let claim = &spec["claimRef"];
    let claim = if claim.is_object() {
        format!("{}/{}", str_or(&claim["namespace"], ""), str_or(&claim["name"], ""))
    } else {
        String::new()
    };
    w.field(0, "Claim", claim);
    w.field(0, "Reclaim Policy", str_or(&spec["persistentVolumeReclaimPolicy"], ""));
    w.field(0, "Access Modes", access_modes(&spec["accessModes"]));
    w.field(0, "VolumeMode", str_or(&spec["volumeMode"], "Filesystem"));
    w.field(0, "Capacity", str_or(&spec["capacity"]["storage"], ""));
    write_node_affinity(w, &spec["nodeAffinity"]);
    w.field(0, "Message", str_or(&item.status()["message"], ""));
    w.section(0, "Source");
    write_pv_source(w, spec);
}

fn strings(value: &Value) -> Vec<String> {
    array(value).iter().filter_map(scalar).collect()
}

fn write_node_affinity(w: &mut DescribeWriter, affinity: &Value) {
    let terms = array(&affinity["required"]["nodeSelectorTerms"]);
    if terms.is_empty() {
        w.field(0, "Node Affinity", NONE);
        return;
    }
    w.section(0, "Node Affinity");
    w.section(1, "Required Terms");
    for (n, term) in terms.iter().enumerate() {
        let exprs: Vec<String> = array(&term["matchExpressions"])
            .iter()
            .map(|e| {
                format!(
                    "{} {} [{}]",
                    str_or(&e["key"], ""),
                    str_or(&e["operator"], ""),
                    join_scalars(&e["values"], ", ")
                )
            })
            .collect();
        w.list(2, &format!("Term {n}"), &exprs);
    }
}

fn write_pv_source(w: &mut DescribeWriter, spec: &Value) {
    let i = 1;
    if let Some(src) = spec.get("hostPath") {
        w.field(i, "Type", "HostPath (bare host directory volume)");
        w.field(i, "Path", str_or(&src["path"], ""));
        w.field(i, "HostPathType", str_or(&src["type"], ""));
    } else if let Some(src) = spec.get("local") {
        w.field(i, "Type", "LocalVolume (a persistent volume backed by local storage on a node)");
        w.field(i, "Path", str_or(&src["path"], ""));
    } else if let Some(src) = spec.get("nfs") {
        w.field(i, "Type", "NFS (an NFS mount that lasts the lifetime of a pod)");
        w.field(i, "Server", str_or(&src["server"], ""));
        w.field(i, "Path", str_or(&src["path"], ""));
        w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
    } else if let Some(src) = spec.get("csi") {
        w.field(i, "Type", "CSI (a Container Storage Interface (CSI) volume source)");
        w.field(i, "Driver", str_or(&src["driver"], ""));
        w.field(i, "FSType", str_or(&src["fsType"], ""));
        w.field(i, "VolumeHandle", str_or(&src["volumeHandle"], ""));
        w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
        w.list(i, "VolumeAttributes", &key_values(&src["volumeAttributes"], "="));
    } else if let Some(src) = spec.get("iscsi") {
        w.field(i, "Type", "ISCSI (an ISCSI Disk resource that is attached to a kubelet's host machine and then exposed to the pod)");
        w.field(i, "TargetPortal", str_or(&src["targetPortal"], ""));
        w.field(i, "IQN", str_or(&src["iqn"], ""));
        w.field(i, "Lun", int_or(&src["lun"], 0));
        w.field(i, "FSType", str_or(&src["fsType"], ""));
    } else {
        w.text(i, "<unknown>");
    }
}

pub(super) fn persistent_volume_claim(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field_or_none(0, "StorageClass", str_or(&spec["storageClassName"], ""));
    w.field(0, "Status", str_or(&status["phase"], ""));
    w.field(0, "Volume", str_or(&spec["volumeName"], ""));
    w.list(0, "Finalizers", &strings(&item.data["metadata"]["finalizers"]));
    w.field(0, "Capacity", str_or(&status["capacity"]["storage"], ""));
    w.field(0, "Access Modes", access_modes(&status["accessModes"]));
    w.field(0, "VolumeMode", str_or(&spec["volumeMode"], "Filesystem"));
}

pub(super) fn storage_class(w: &mut DescribeWriter, item: &ResourceItem) {
    write_metadata(w, item, false);
    w.field(0, "IsDefaultClass", if is_default_class(item) { "Yes" } else { "No" });
    w.field(0, "Provisioner", str_or(&item.data["provisioner"], ""));
    w.list(0, "Parameters", &key_values(&item.data["parameters"], "="));
    w.field(
        0,
        "AllowVolumeExpansion",
        item.data["allowVolumeExpansion"]
            .as_bool()
            .map(|b| b.to_string())
            .unwrap_or_else(|| "<unset>".to_string()),
    );
    w.list(0, "MountOptions", &strings(&item.data["mountOptions"]));
    w.field(0, "ReclaimPolicy", str_or(&item.data["reclaimPolicy"], "Delete"));
    w.field(0, "VolumeBindingMode", str_or(&item.data["volumeBindingMode"], "Immediate"));
}

/* ============================= NETWORK ============================= */

fn backend(value: &Value) -> String {
    let service = &value["service"];
    if service.is_object() {
        let port = &service["port"];
        let port = scalar(&port["number"])
            .or_else(|| scalar(&port["name"]))
            .unwrap_or_default();
        return format!("{}:{port}", str_or(&service["name"], ""));
    }
    let resource = &value["resource"];
    if resource.is_object() {
        return format!(
            "APIGroup: {}, Kind: {}, Name: {}",
            str_or(&resource["apiGroup"], ""),
            str_or(&resource["kind"], ""),
            str_or(&resource["name"], "")
        );
    }
    NONE.to_string()
}

pub(super) fn ingress(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    write_metadata(w, item, true);
    w.field_or_none(0, "Ingress Class", str_or(&spec["ingressClassName"], ""));
    let addresses: Vec<String> = array(&item.status()["loadBalancer"]["ingress"])
        .iter()
        .filter_map(|i| i["ip"].as_str().or_else(|| i["hostname"].as_str()))
        .map(str::to_string)
        .collect();
    w.field(0, "Address", addresses.join(","));
    w.field(
        0,
        "Default backend",
        if spec["defaultBackend"].is_object() {
            backend(&spec["defaultBackend"])
        } else {
            NONE.to_string()
        },
    );
    for tls in array(&spec["tls"]) {
        w.field(
            0,
            "TLS",
            format!(
                "{} terminates {}",
                str_or(&tls["secretName"], ""),
                join_scalars(&tls["hosts"], ",")
            ),
        );
    }
    w.section(0, "Rules");
    let mut rows = Vec::new();
    for rule in array(&spec["rules"]) {
        let host = str_or(&rule["host"], "*").to_string();
        let paths = array(&rule["http"]["paths"]);
        if paths.is_empty() {
            rows.push(vec![host, String::new(), String::new()]);
            continue;
        }
        for path in paths {
            rows.push(vec![
                host.clone(),
                str_or(&path["path"], "/").to_string(),
                backend(&path["backend"]),
            ]);
        }
    }
    w.table(1, &["Host", "Path", "Backends"], rows);
}

/* ============================= RBAC ============================= */

pub(super) fn role(w: &mut DescribeWriter, item: &ResourceItem, namespaced: bool) {
    write_metadata(w, item, namespaced);
    w.section(0, "PolicyRule");
    let rows = array(&item.data["rules"])
        .iter()
        .map(|rule| {
            let groups: Vec<String> = array(&rule["apiGroups"])
                .iter()
                .filter_map(Value::as_str)
                .map(|g| if g.is_empty() { "core".to_string() } else { g.to_string() })
                .collect();
            let resources = join_scalars(&rule["resources"], ",");
            let non_resource = join_scalars(&rule["nonResourceURLs"], ",");
            let resource = if groups.is_empty() || groups.iter().all(|g| g == "core") {
                resources
            } else {
                resources
                    .split(',')
                    .filter(|r| !r.is_empty())
                    .flat_map(|r| groups.iter().map(move |g| format!("{r}.{g}")))
                    .collect::<Vec<_>>()
                    .join(",")
            };
            vec![
                resource,
                format!("[{non_resource}]"),
                format!("[{}]", join_scalars(&rule["resourceNames"], " ")),
                format!("[{}]", join_scalars(&rule["verbs"], " ")),
            ]
        })
        .collect();
    w.table(1, &["Resources", "Non-Resource URLs", "Resource Names", "Verbs"], rows);
}

pub(super) fn role_binding(w: &mut DescribeWriter, item: &ResourceItem, namespaced: bool) {
    let role_ref = &item.data["roleRef"];
    write_metadata(w, item, namespaced);
    w.section(0, "Role");
    w.field(1, "Kind", str_or(&role_ref["kind"], ""));
    w.field(1, "Name", str_or(&role_ref["name"], ""));
    w.section(0, "Subjects");
    let rows = array(&item.data["subjects"])
        .iter()
        .map(|s| {
            vec![
                str_or(&s["kind"], "").to_string(),
                str_or(&s["name"], "").to_string(),
                str_or(&s["namespace"], "").to_string(),
            ]
        })
        .collect();
    w.table(1, &["Kind", "Name", "Namespace"], rows);
}

/* ============================= TESTS ============================= */
