//! `kubectl get` style tables for every supported kind.

use chrono::{DateTime, Utc};
use comfy_table::{Table, presets};
use serde_json::Value;

use crate::age::{age, human_duration, parse_timestamp};
use crate::document::{ResourceItem, array, int_or, key_values, scalar, str_or};
use crate::registry::Kind;

pub const NO_RESOURCES: &str = "No resources found.";

const NONE: &str = "<none>";

/* ============================= RENDERING ============================= */

/// Borderless, left-aligned table with kubectl-like column spacing.
pub fn render(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut table = Table::new();
    table
        .load_preset(presets::NOTHING)
        .set_header(header.to_vec())
        .add_rows(rows);
    for column in table.column_iter_mut() {
        column.set_padding((0, 3));
    }
    table
        .to_string()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `items` of `kind` as a table, or the empty-result notice.
pub fn render_table(kind: Kind, items: &[ResourceItem], now: DateTime<Utc>) -> String {
    if items.is_empty() {
        return NO_RESOURCES.to_string();
    }
    let (header, rows): (&[&str], Vec<Vec<String>>) = match kind {
        Kind::Node => (
            &["NAME", "STATUS", "ROLES", "AGE", "VERSION", "INTERNAL-IP", "EXTERNAL-IP", "OS-IMAGE", "KERNEL-VERSION", "CONTAINER-RUNTIME"],
            items.iter().map(|i| node_row(i, now)).collect(),
        ),
        Kind::Pod => (
            &["NAMESPACE", "NAME", "READY", "STATUS", "RESTARTS", "AGE", "IP", "NODE"],
            items.iter().map(|i| pod_row(i, now)).collect(),
        ),
        Kind::Service => (
            &["NAMESPACE", "NAME", "TYPE", "CLUSTER-IP", "EXTERNAL-IP", "PORT(S)", "AGE"],
            items.iter().map(|i| service_row(i, now)).collect(),
        ),
        Kind::Deployment => (
            &["NAMESPACE", "NAME", "READY", "UP-TO-DATE", "AVAILABLE", "AGE"],
            items.iter().map(|i| deployment_row(i, now)).collect(),
        ),
        Kind::ReplicaSet => (
            &["NAMESPACE", "NAME", "DESIRED", "CURRENT", "READY", "AGE"],
            items.iter().map(|i| replica_set_row(i, now)).collect(),
        ),
        Kind::DaemonSet => (
            &["NAMESPACE", "NAME", "DESIRED", "CURRENT", "READY", "UP-TO-DATE", "AVAILABLE", "NODE SELECTOR", "AGE"],
            items.iter().map(|i| daemon_set_row(i, now)).collect(),
        ),
        Kind::StatefulSet => (
            &["NAMESPACE", "NAME", "READY", "AGE"],
            items.iter().map(|i| stateful_set_row(i, now)).collect(),
        ),
        Kind::Event => (
            &["NAMESPACE", "LAST SEEN", "TYPE", "REASON", "OBJECT", "MESSAGE"],
            sort_events(items).into_iter().map(|i| event_row(i, now)).collect(),
        ),
        Kind::PersistentVolume => (
            &["NAME", "CAPACITY", "ACCESS MODES", "RECLAIM POLICY", "STATUS", "CLAIM", "STORAGECLASS", "AGE"],
            items.iter().map(|i| pv_row(i, now)).collect(),
        ),
        Kind::PersistentVolumeClaim => (
            &["NAMESPACE", "NAME", "STATUS", "VOLUME", "CAPACITY", "ACCESS MODES", "STORAGECLASS", "AGE"],
            items.iter().map(|i| pvc_row(i, now)).collect(),
        ),
        Kind::Secret => (
            &["NAMESPACE", "NAME", "TYPE", "DATA", "AGE"],
            items.iter().map(|i| secret_row(i, now)).collect(),
        ),
        Kind::ConfigMap => (
            &["NAMESPACE", "NAME", "DATA", "AGE"],
            items.iter().map(|i| config_map_row(i, now)).collect(),
        ),
        Kind::ServiceAccount => (
            &["NAMESPACE", "NAME", "SECRETS", "AGE"],
            items.iter().map(|i| service_account_row(i, now)).collect(),
        ),
        Kind::Ingress => (
            &["NAMESPACE", "NAME", "CLASS", "HOSTS", "ADDRESS", "PORTS", "AGE"],
            items.iter().map(|i| ingress_row(i, now)).collect(),
        ),
        Kind::StorageClass => (
            &["NAME", "PROVISIONER", "RECLAIMPOLICY", "VOLUMEBINDINGMODE", "ALLOWVOLUMEEXPANSION", "AGE"],
            items.iter().map(|i| storage_class_row(i, now)).collect(),
        ),
        Kind::ClusterRole => (
            &["NAME", "CREATED AT"],
            items.iter().map(|i| vec![i.name().to_string(), created_at(i)]).collect(),
        ),
        Kind::Role => (
            &["NAMESPACE", "NAME", "CREATED AT"],
            items
                .iter()
                .map(|i| vec![namespace(i), i.name().to_string(), created_at(i)])
                .collect(),
        ),
        Kind::ClusterRoleBinding => (
            &["NAME", "ROLE", "AGE"],
            items
                .iter()
                .map(|i| vec![i.name().to_string(), role_ref(i), creation_age(i, now)])
                .collect(),
        ),
        Kind::RoleBinding => (
            &["NAMESPACE", "NAME", "ROLE", "AGE"],
            items
                .iter()
                .map(|i| vec![namespace(i), i.name().to_string(), role_ref(i), creation_age(i, now)])
                .collect(),
        ),
        Kind::Endpoints => (
            &["NAMESPACE", "NAME", "ENDPOINTS", "AGE"],
            items
                .iter()
                .map(|i| vec![namespace(i), i.name().to_string(), format_endpoints(&i.data), creation_age(i, now)])
                .collect(),
        ),
        Kind::Job => (
            &["NAMESPACE", "NAME", "COMPLETIONS", "DURATION", "AGE"],
            items.iter().map(|i| job_row(i, now)).collect(),
        ),
        Kind::CronJob => (
            &["NAMESPACE", "NAME", "SCHEDULE", "SUSPEND", "ACTIVE", "LAST SCHEDULE", "AGE"],
            items.iter().map(|i| cron_job_row(i, now)).collect(),
        ),
    };
    render(header, rows)
}

/// KIND/NAMESPACE/NAME listing for documents whose kind has no table.
pub fn render_generic(items: &[ResourceItem]) -> String {
    if items.is_empty() {
        return NO_RESOURCES.to_string();
    }
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.kind().unwrap_or(NONE).to_string(),
                i.namespace().unwrap_or(NONE).to_string(),
                i.name().to_string(),
            ]
        })
        .collect();
    render(&["KIND", "NAMESPACE", "NAME"], rows)
}

/* ============================= SHARED ============================= */

fn namespace(item: &ResourceItem) -> String {
    item.namespace().unwrap_or(NONE).to_string()
}

fn creation_age(item: &ResourceItem, now: DateTime<Utc>) -> String {
    age(&item.data["metadata"]["creationTimestamp"], now)
}

fn created_at(item: &ResourceItem) -> String {
    str_or(&item.data["metadata"]["creationTimestamp"], NONE).to_string()
}

fn count(value: &Value) -> String {
    int_or(value, 0).to_string()
}

fn join_or_none(parts: Vec<String>, sep: &str) -> String {
    if parts.is_empty() {
        NONE.to_string()
    } else {
        parts.join(sep)
    }
}

/// `ReadWriteOnce` → `RWO` and friends, comma separated.
pub fn access_modes(value: &Value) -> String {
    let modes: Vec<String> = array(value)
        .iter()
        .filter_map(Value::as_str)
        .map(|m| match m {
            "ReadWriteOnce" => "RWO".to_string(),
            "ReadOnlyMany" => "ROX".to_string(),
            "ReadWriteMany" => "RWX".to_string(),
            "ReadWriteOncePod" => "RWOP".to_string(),
            other => other.to_string(),
        })
        .collect();
    modes.join(",")
}

/* ============================= NODES ============================= */

/// `Ready`, `NotReady` or `Unknown`, with `SchedulingDisabled` appended.
pub fn node_status(item: &ResourceItem) -> String {
    let ready = array(&item.status()["conditions"])
        .iter()
        .find(|c| c["type"] == "Ready")
        .map(|c| match c["status"].as_str() {
            Some("True") => "Ready",
            Some("False") => "NotReady",
            _ => "Unknown",
        })
        .unwrap_or("Unknown");
    let mut status = ready.to_string();
    if item.spec()["unschedulable"].as_bool() == Some(true) {
        status.push_str(",SchedulingDisabled");
    }
    status
}

pub fn node_roles(labels: &Value) -> String {
    let mut roles: Vec<String> = labels
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| {
                    if let Some(role) = k.strip_prefix("node-role.kubernetes.io/") {
                        (!role.is_empty()).then(|| role.to_string())
                    } else if k == "kubernetes.io/role" {
                        v.as_str().filter(|r| !r.is_empty()).map(str::to_string)
                    } else {
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default();
    roles.sort();
    roles.dedup();
    join_or_none(roles, ",")
}

fn node_address(item: &ResourceItem, kind: &str) -> String {
    array(&item.status()["addresses"])
        .iter()
        .find(|a| a["type"] == kind)
        .and_then(|a| a["address"].as_str())
        .unwrap_or(NONE)
        .to_string()
}

fn node_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let info = &item.status()["nodeInfo"];
    vec![
        item.name().to_string(),
        node_status(item),
        node_roles(&item.data["metadata"]["labels"]),
        creation_age(item, now),
        str_or(&info["kubeletVersion"], "").to_string(),
        node_address(item, "InternalIP"),
        node_address(item, "ExternalIP"),
        str_or(&info["osImage"], "").to_string(),
        str_or(&info["kernelVersion"], "").to_string(),
        str_or(&info["containerRuntimeVersion"], "").to_string(),
    ]
}

/* ============================= PODS ============================= */

fn terminated_reason(state: &Value, prefix: &str) -> String {
    if let Some(reason) = state["reason"].as_str().filter(|r| !r.is_empty()) {
        return format!("{prefix}{reason}");
    }
    let signal = int_or(&state["signal"], 0);
    if signal != 0 {
        return format!("{prefix}Signal:{signal}");
    }
    format!("{prefix}ExitCode:{}", int_or(&state["exitCode"], 0))
}

/// Pod status column, following kubectl's precedence rules.
pub fn pod_status(item: &ResourceItem) -> String {
    let status = item.status();
    let mut reason = str_or(&status["reason"], str_or(&status["phase"], "Unknown")).to_string();

    let init_statuses = array(&status["initContainerStatuses"]);
    let init_total = array(&item.spec()["initContainers"]).len().max(init_statuses.len());
    let mut initializing = false;
    for (i, cs) in init_statuses.iter().enumerate() {
        let state = &cs["state"];
        if state["terminated"].is_object() && int_or(&state["terminated"]["exitCode"], 0) == 0 {
            continue;
        }
        initializing = true;
        reason = if state["terminated"].is_object() {
            terminated_reason(&state["terminated"], "Init:")
        } else if let Some(r) = state["waiting"]["reason"]
            .as_str()
            .filter(|r| !r.is_empty() && *r != "PodInitializing")
        {
            format!("Init:{r}")
        } else {
            format!("Init:{i}/{init_total}")
        };
        break;
    }

    if !initializing {
        let mut has_running = false;
        for cs in array(&status["containerStatuses"]).iter().rev() {
            let state = &cs["state"];
            if let Some(r) = state["waiting"]["reason"].as_str().filter(|r| !r.is_empty()) {
                reason = r.to_string();
            } else if state["terminated"].is_object() {
                reason = terminated_reason(&state["terminated"], "");
            } else if state["running"].is_object() && cs["ready"].as_bool() == Some(true) {
                has_running = true;
            }
        }
        if reason == "Completed" && has_running {
            reason = "Running".to_string();
        }
    }

    if !item.data["metadata"]["deletionTimestamp"].is_null() {
        reason = if status["reason"] == "NodeLost" {
            "Unknown".to_string()
        } else {
            "Terminating".to_string()
        };
    }
    reason
}

/// `ready/total` containers of a pod.
pub fn pod_ready(item: &ResourceItem) -> String {
    let statuses = array(&item.status()["containerStatuses"]);
    let total = array(&item.spec()["containers"]).len().max(statuses.len());
    let ready = statuses
        .iter()
        .filter(|cs| cs["ready"].as_bool() == Some(true))
        .count();
    format!("{ready}/{total}")
}

pub fn pod_restarts(item: &ResourceItem) -> i64 {
    array(&item.status()["containerStatuses"])
        .iter()
        .map(|cs| int_or(&cs["restartCount"], 0))
        .sum()
}

fn pod_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let status = item.status();
    let started = if item.data["metadata"]["creationTimestamp"].is_string() {
        &item.data["metadata"]["creationTimestamp"]
    } else {
        &status["startTime"]
    };
    vec![
        namespace(item),
        item.name().to_string(),
        pod_ready(item),
        pod_status(item),
        pod_restarts(item).to_string(),
        age(started, now),
        str_or(&status["podIP"], NONE).to_string(),
        str_or(&item.spec()["nodeName"], NONE).to_string(),
    ]
}

/* ============================= SERVICES ============================= */

fn load_balancer_ingress(status: &Value) -> Vec<String> {
    array(&status["loadBalancer"]["ingress"])
        .iter()
        .filter_map(|ing| {
            ing["ip"]
                .as_str()
                .filter(|ip| !ip.is_empty())
                .or_else(|| ing["hostname"].as_str())
                .map(str::to_string)
        })
        .collect()
}

fn strings(value: &Value) -> Vec<String> {
    array(value)
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect()
}

pub fn service_external_ip(item: &ResourceItem) -> String {
    let spec = item.spec();
    let external = strings(&spec["externalIPs"]);
    match spec["type"].as_str().unwrap_or("ClusterIP") {
        "LoadBalancer" => {
            let mut ips = load_balancer_ingress(item.status());
            ips.extend(external);
            if ips.is_empty() {
                "<pending>".to_string()
            } else {
                ips.join(",")
            }
        }
        "ExternalName" => str_or(&spec["externalName"], NONE).to_string(),
        _ => join_or_none(external, ","),
    }
}

pub fn service_ports(spec: &Value) -> String {
    let ports: Vec<String> = array(&spec["ports"])
        .iter()
        .map(|p| {
            let protocol = str_or(&p["protocol"], "TCP");
            let port = int_or(&p["port"], 0);
            match p["nodePort"].as_i64() {
                Some(node_port) => format!("{port}:{node_port}/{protocol}"),
                None => format!("{port}/{protocol}"),
            }
        })
        .collect();
    join_or_none(ports, ",")
}

fn service_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let spec = item.spec();
    vec![
        namespace(item),
        item.name().to_string(),
        str_or(&spec["type"], "ClusterIP").to_string(),
        str_or(&spec["clusterIP"], NONE).to_string(),
        service_external_ip(item),
        service_ports(spec),
        creation_age(item, now),
    ]
}

/* ============================= WORKLOADS ============================= */

fn deployment_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let status = item.status();
    vec![
        namespace(item),
        item.name().to_string(),
        format!(
            "{}/{}",
            int_or(&status["readyReplicas"], 0),
            int_or(&item.spec()["replicas"], int_or(&status["replicas"], 0))
        ),
        count(&status["updatedReplicas"]),
        count(&status["availableReplicas"]),
        creation_age(item, now),
    ]
}

fn replica_set_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let status = item.status();
    vec![
        namespace(item),
        item.name().to_string(),
        count(&item.spec()["replicas"]),
        count(&status["replicas"]),
        count(&status["readyReplicas"]),
        creation_age(item, now),
    ]
}

fn daemon_set_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let status = item.status();
    let selector = key_values(&item.spec()["template"]["spec"]["nodeSelector"], "=");
    vec![
        namespace(item),
        item.name().to_string(),
        count(&status["desiredNumberScheduled"]),
        count(&status["currentNumberScheduled"]),
        count(&status["numberReady"]),
        count(&status["updatedNumberScheduled"]),
        count(&status["numberAvailable"]),
        join_or_none(selector, ","),
        creation_age(item, now),
    ]
}

fn stateful_set_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    vec![
        namespace(item),
        item.name().to_string(),
        format!(
            "{}/{}",
            int_or(&item.status()["readyReplicas"], 0),
            int_or(&item.spec()["replicas"], 1)
        ),
        creation_age(item, now),
    ]
}

fn job_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let status = item.status();
    let completions = match item.spec()["completions"].as_i64() {
        Some(c) => format!("{}/{c}", int_or(&status["succeeded"], 0)),
        None => format!("{}/1 of {}", int_or(&status["succeeded"], 0), int_or(&item.spec()["parallelism"], 1)),
    };
    let duration = match parse_timestamp(&status["startTime"]) {
        Some(start) => {
            let end = parse_timestamp(&status["completionTime"]).unwrap_or(now);
            human_duration(end - start)
        }
        None => String::new(),
    };
    vec![
        namespace(item),
        item.name().to_string(),
        completions,
        duration,
        creation_age(item, now),
    ]
}

fn cron_job_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let spec = item.spec();
    let status = item.status();
    let last = &status["lastScheduleTime"];
    vec![
        namespace(item),
        item.name().to_string(),
        str_or(&spec["schedule"], "").to_string(),
        spec["suspend"].as_bool().unwrap_or(false).to_string(),
        array(&status["active"]).len().to_string(),
        if last.is_null() { NONE.to_string() } else { age(last, now) },
        creation_age(item, now),
    ]
}

/* ============================= EVENTS ============================= */

/// Most recent timestamp of an event, in order of preference.
pub fn event_time(item: &ResourceItem) -> Option<DateTime<Utc>> {
    parse_timestamp(&item.data["lastTimestamp"])
        .or_else(|| parse_timestamp(&item.data["eventTime"]))
        .or_else(|| parse_timestamp(&item.data["firstTimestamp"]))
        .or_else(|| parse_timestamp(&item.data["metadata"]["creationTimestamp"]))
}

/// Events ordered most recent first; undated events sort last.
pub fn sort_events(items: &[ResourceItem]) -> Vec<&ResourceItem> {
    let mut sorted: Vec<&ResourceItem> = items.iter().collect();
    sorted.sort_by(|a, b| event_time(b).cmp(&event_time(a)));
    sorted
}

fn event_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let object = &item.data["involvedObject"];
    vec![
        namespace(item),
        event_time(item)
            .map(|t| human_duration(now - t))
            .unwrap_or_else(|| "<unknown>".to_string()),
        str_or(&item.data["type"], "").to_string(),
        str_or(&item.data["reason"], "").to_string(),
        format!(
            "{}/{}",
            str_or(&object["kind"], "").to_lowercase(),
            str_or(&object["name"], "")
        ),
        str_or(&item.data["message"], "").trim().to_string(),
    ]
}

/* ============================= STORAGE ============================= */

fn pv_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let spec = item.spec();
    let claim = &spec["claimRef"];
    let claim = if claim.is_object() {
        format!("{}/{}", str_or(&claim["namespace"], ""), str_or(&claim["name"], ""))
    } else {
        String::new()
    };
    vec![
        item.name().to_string(),
        str_or(&spec["capacity"]["storage"], "").to_string(),
        access_modes(&spec["accessModes"]),
        str_or(&spec["persistentVolumeReclaimPolicy"], "").to_string(),
        str_or(&item.status()["phase"], "").to_string(),
        claim,
        str_or(&spec["storageClassName"], "").to_string(),
        creation_age(item, now),
    ]
}

fn pvc_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let spec = item.spec();
    let status = item.status();
    vec![
        namespace(item),
        item.name().to_string(),
        str_or(&status["phase"], "").to_string(),
        str_or(&spec["volumeName"], "").to_string(),
        str_or(&status["capacity"]["storage"], "").to_string(),
        access_modes(&status["accessModes"]),
        str_or(&spec["storageClassName"], "").to_string(),
        creation_age(item, now),
    ]
}

pub fn is_default_class(item: &ResourceItem) -> bool {
    let annotations = &item.data["metadata"]["annotations"];
    annotations["storageclass.kubernetes.io/is-default-class"] == "true"
        || annotations["storageclass.beta.kubernetes.io/is-default-class"] == "true"
}

fn storage_class_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let name = if is_default_class(item) {
        format!("{} (default)", item.name())
    } else {
        item.name().to_string()
    };
    vec![
        name,
        str_or(&item.data["provisioner"], "").to_string(),
        str_or(&item.data["reclaimPolicy"], "Delete").to_string(),
        str_or(&item.data["volumeBindingMode"], "Immediate").to_string(),
        item.data["allowVolumeExpansion"].as_bool().unwrap_or(false).to_string(),
        creation_age(item, now),
    ]
}

/* ============================= CONFIG ============================= */

fn map_len(value: &Value) -> usize {
    value.as_object().map(|m| m.len()).unwrap_or(0)
}

fn secret_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    vec![
        namespace(item),
        item.name().to_string(),
        str_or(&item.data["type"], "Opaque").to_string(),
        map_len(&item.data["data"]).to_string(),
        creation_age(item, now),
    ]
}

fn config_map_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    vec![
        namespace(item),
        item.name().to_string(),
        (map_len(&item.data["data"]) + map_len(&item.data["binaryData"])).to_string(),
        creation_age(item, now),
    ]
}

fn service_account_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    vec![
        namespace(item),
        item.name().to_string(),
        array(&item.data["secrets"]).len().to_string(),
        creation_age(item, now),
    ]
}

/* ============================= NETWORK ============================= */

fn ingress_row(item: &ResourceItem, now: DateTime<Utc>) -> Vec<String> {
    let spec = item.spec();
    let mut hosts: Vec<String> = array(&spec["rules"])
        .iter()
        .filter_map(|r| r["host"].as_str())
        .filter(|h| !h.is_empty())
        .map(str::to_string)
        .collect();
    hosts.dedup();
    let ports = if array(&spec["tls"]).is_empty() { "80" } else { "80, 443" };
    vec![
        namespace(item),
        item.name().to_string(),
        str_or(&spec["ingressClassName"], NONE).to_string(),
        if hosts.is_empty() { "*".to_string() } else { hosts.join(",") },
        load_balancer_ingress(item.status()).join(","),
        ports.to_string(),
        creation_age(item, now),
    ]
}

/// `ip:port` pairs of an Endpoints object, abbreviated after three.
pub fn format_endpoints(data: &Value) -> String {
    let mut pairs = Vec::new();
    for subset in array(&data["subsets"]) {
        let ports = array(&subset["ports"]);
        for address in array(&subset["addresses"]) {
            let ip = str_or(&address["ip"], "");
            if ports.is_empty() {
                pairs.push(ip.to_string());
            }
            for port in ports {
                pairs.push(format!("{ip}:{}", int_or(&port["port"], 0)));
            }
        }
    }
    match pairs.len() {
        0 => NONE.to_string(),
        n if n > 3 => format!("{} + {} more...", pairs[..3].join(","), n - 3),
        _ => pairs.join(","),
    }
}

/* ============================= RBAC ============================= */

fn role_ref(item: &ResourceItem) -> String {
    let role = &item.data["roleRef"];
    format!("{}/{}", str_or(&role["kind"], ""), str_or(&role["name"], ""))
}

/// Scalars of a JSON array joined by `sep`, used by describe too.
pub fn join_scalars(value: &Value, sep: &str) -> String {
    array(value)
        .iter()
        .filter_map(scalar)
        .collect::<Vec<_>>()
        .join(sep)
}

/* ============================= TESTS ============================= */
