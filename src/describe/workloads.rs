//! Controller views: deployments, replica sets, daemon sets, stateful sets and jobs.

use serde_json::Value;

use super::core_v1::{write_containers, write_volumes};
use super::{DescribeWriter, NONE, label_selector, selector, timestamp, write_metadata};
use crate::document::{ResourceItem, array, int_or, key_values, scalar, str_or};
use crate::printers::access_modes;

fn write_pod_template(w: &mut DescribeWriter, template: &Value) {
    w.section(0, "Pod Template");
    w.list(1, "Labels", &key_values(&template["metadata"]["labels"], "="));
    let annotations = key_values(&template["metadata"]["annotations"], ": ");
    if !annotations.is_empty() {
        w.list(1, "Annotations", &annotations);
    }
    let spec = &template["spec"];
    if let Some(sa) = spec["serviceAccountName"].as_str() {
        w.field(1, "Service Account", sa);
    }
    if !array(&spec["initContainers"]).is_empty() {
        w.section(1, "Init Containers");
        write_containers(w, 2, &spec["initContainers"], &Value::Null);
    }
    w.section(1, "Containers");
    write_containers(w, 2, &spec["containers"], &Value::Null);
    write_volumes(w, 1, &spec["volumes"]);
    let node_selector = key_values(&spec["nodeSelector"], "=");
    if !node_selector.is_empty() {
        w.list(1, "Node-Selectors", &node_selector);
    }
}

fn write_conditions(w: &mut DescribeWriter, status: &Value) {
    let conditions = array(&status["conditions"]);
    if conditions.is_empty() {
        return;
    }
    w.section(0, "Conditions");
    let rows = conditions
        .iter()
        .map(|c| {
            vec![
                str_or(&c["type"], "").to_string(),
                str_or(&c["status"], "").to_string(),
                str_or(&c["reason"], "").to_string(),
            ]
        })
        .collect();
    w.table(1, &["Type", "Status", "Reason"], rows);
}

fn controlled_by(item: &ResourceItem) -> Option<String> {
    array(&item.data["metadata"]["ownerReferences"])
        .iter()
        .find(|o| o["controller"].as_bool() == Some(true))
        .map(|o| format!("{}/{}", str_or(&o["kind"], ""), str_or(&o["name"], "")))
}

/// `Running / Waiting / Succeeded / Failed` line built from controller status counts.
fn pods_status(running: i64, waiting: i64, succeeded: i64, failed: i64) -> String {
    format!("{running} Running / {waiting} Waiting / {succeeded} Succeeded / {failed} Failed")
}

/* ============================= DEPLOYMENT ============================= */

pub(super) fn deployment(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Selector", label_selector(&spec["selector"]));
    w.field(
        0,
        "Replicas",
        format!(
            "{} desired | {} updated | {} total | {} available | {} unavailable",
            int_or(&spec["replicas"], 1),
            int_or(&status["updatedReplicas"], 0),
            int_or(&status["replicas"], 0),
            int_or(&status["availableReplicas"], 0),
            int_or(&status["unavailableReplicas"], 0),
        ),
    );
    let strategy = str_or(&spec["strategy"]["type"], "RollingUpdate");
    w.field(0, "StrategyType", strategy);
    w.field(0, "MinReadySeconds", int_or(&spec["minReadySeconds"], 0));
    if strategy == "RollingUpdate" {
        let rolling = &spec["strategy"]["rollingUpdate"];
        w.field(
            0,
            "RollingUpdateStrategy",
            format!(
                "{} max unavailable, {} max surge",
                scalar(&rolling["maxUnavailable"]).unwrap_or_else(|| "25%".to_string()),
                scalar(&rolling["maxSurge"]).unwrap_or_else(|| "25%".to_string()),
            ),
        );
    }
    write_pod_template(w, &spec["template"]);
    write_conditions(w, status);
}

/* ============================= REPLICA SET ============================= */

pub(super) fn replica_set(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Selector", label_selector(&spec["selector"]));
    if let Some(owner) = controlled_by(item) {
        w.field(0, "Controlled By", owner);
    }
    w.field(
        0,
        "Replicas",
        format!(
            "{} current / {} desired",
            int_or(&status["replicas"], 0),
            int_or(&spec["replicas"], 1)
        ),
    );
    let ready = int_or(&status["readyReplicas"], 0);
    let current = int_or(&status["replicas"], 0);
    w.field(0, "Pods Status", pods_status(ready, (current - ready).max(0), 0, 0));
    write_pod_template(w, &spec["template"]);
    write_conditions(w, status);
}

/* ============================= DAEMON SET ============================= */

pub(super) fn daemon_set(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Selector", label_selector(&spec["selector"]));
    w.field(0, "Node-Selector", selector(&spec["template"]["spec"]["nodeSelector"]));
    w.field(0, "Desired Number of Nodes Scheduled", int_or(&status["desiredNumberScheduled"], 0));
    w.field(0, "Current Number of Nodes Scheduled", int_or(&status["currentNumberScheduled"], 0));
    w.field(0, "Number of Nodes Scheduled with Up-to-date Pods", int_or(&status["updatedNumberScheduled"], 0));
    w.field(0, "Number of Nodes Scheduled with Available Pods", int_or(&status["numberAvailable"], 0));
    w.field(0, "Number of Nodes Misscheduled", int_or(&status["numberMisscheduled"], 0));
    let ready = int_or(&status["numberReady"], 0);
    let current = int_or(&status["currentNumberScheduled"], 0);
    w.field(0, "Pods Status", pods_status(ready, (current - ready).max(0), 0, 0));
    write_pod_template(w, &spec["template"]);
}

/* ============================= STATEFUL SET ============================= */

pub(super) fn stateful_set(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Selector", label_selector(&spec["selector"]));
    w.field(
        0,
        "Replicas",
        format!(
            "{} desired | {} total",
            int_or(&spec["replicas"], 1),
            int_or(&status["replicas"], 0)
        ),
    );
    w.field(0, "Update Strategy", str_or(&spec["updateStrategy"]["type"], "RollingUpdate"));
    if let Some(partition) = spec["updateStrategy"]["rollingUpdate"]["partition"].as_i64() {
        w.field(1, "Partition", partition);
    }
    let ready = int_or(&status["readyReplicas"], 0);
    let current = int_or(&status["replicas"], 0);
    w.field(0, "Pods Status", pods_status(ready, (current - ready).max(0), 0, 0));
    write_pod_template(w, &spec["template"]);

    let claims = array(&spec["volumeClaimTemplates"]);
    if claims.is_empty() {
        w.field(0, "Volume Claims", NONE);
        return;
    }
    w.section(0, "Volume Claims");
    for claim in claims {
        let claim_spec = &claim["spec"];
        w.field(1, "Name", str_or(&claim["metadata"]["name"], ""));
        w.field_or_none(1, "StorageClass", str_or(&claim_spec["storageClassName"], ""));
        w.list(1, "Labels", &key_values(&claim["metadata"]["labels"], "="));
        w.field(1, "Capacity", str_or(&claim_spec["resources"]["requests"]["storage"], ""));
        w.field(1, "Access Modes", access_modes(&claim_spec["accessModes"]));
    }
}

/* ============================= JOBS ============================= */

pub(super) fn job(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Selector", label_selector(&spec["selector"]));
    if let Some(owner) = controlled_by(item) {
        w.field(0, "Controlled By", owner);
    }
    w.field(0, "Parallelism", int_or(&spec["parallelism"], 1));
    match spec["completions"].as_i64() {
        Some(c) => w.field(0, "Completions", c),
        None => w.field(0, "Completions", "<unset>"),
    }
    w.field(0, "Completion Mode", str_or(&spec["completionMode"], "NonIndexed"));
    if !status["startTime"].is_null() {
        w.field(0, "Start Time", timestamp(&status["startTime"]));
    }
    if !status["completionTime"].is_null() {
        w.field(0, "Completed At", timestamp(&status["completionTime"]));
    }
    w.field(
        0,
        "Pods Statuses",
        format!(
            "{} Active / {} Succeeded / {} Failed",
            int_or(&status["active"], 0),
            int_or(&status["succeeded"], 0),
            int_or(&status["failed"], 0)
        ),
    );
    write_pod_template(w, &spec["template"]);
    write_conditions(w, status);
}

pub(super) fn cron_job(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    let status = item.status();
    write_metadata(w, item, true);
    w.field(0, "Schedule", str_or(&spec["schedule"], ""));
    w.field(0, "Concurrency Policy", str_or(&spec["concurrencyPolicy"], "Allow"));
    w.field(0, "Suspend", spec["suspend"].as_bool().unwrap_or(false));
    w.field(0, "Successful Job History Limit", int_or(&spec["successfulJobsHistoryLimit"], 3));
    w.field(0, "Failed Job History Limit", int_or(&spec["failedJobsHistoryLimit"], 1));
    match spec["startingDeadlineSeconds"].as_i64() {
        Some(s) => w.field(0, "Starting Deadline Seconds", format!("{s}s")),
        None => w.field(0, "Starting Deadline Seconds", "<unset>"),
    }
    w.field(0, "Last Schedule Time", timestamp(&status["lastScheduleTime"]));
    let active: Vec<String> = array(&status["active"])
        .iter()
        .filter_map(|r| r["name"].as_str().map(str::to_string))
        .collect();
    w.list(0, "Active Jobs", &active);
    let job_template = &spec["jobTemplate"]["spec"];
    w.field(0, "Parallelism", int_or(&job_template["parallelism"], 1));
    match job_template["completions"].as_i64() {
        Some(c) => w.field(0, "Completions", c),
        None => w.field(0, "Completions", "<unset>"),
    }
    write_pod_template(w, &job_template["template"]);
}

/* ============================= TESTS ============================= */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(f: impl FnOnce(&mut DescribeWriter)) -> String {
        let mut w = DescribeWriter::new();
        f(&mut w);
        w.finish()
    }

    #[test]
    fn test_deployment_view() {
        let d = ResourceItem::new(json!({
            "metadata": {"name": "web", "namespace": "prod"},
            "spec": {
                "replicas": 3,
                "selector": {"matchLabels": {"app": "web"}},
                "strategy": {"type": "RollingUpdate", "rollingUpdate": {"maxUnavailable": 1, "maxSurge": "50%"}},
                "template": {"metadata": {"labels": {"app": "web"}},
                             "spec": {"containers": [{"name": "app", "image": "nginx:1.25"}]}}
            },
            "status": {"replicas": 3, "updatedReplicas": 3, "availableReplicas": 2, "unavailableReplicas": 1,
                       "conditions": [{"type": "Available", "status": "True", "reason": "MinimumReplicasAvailable"}]}
        }));
        let out = render(|w| deployment(w, &d));
        assert!(out.contains("3 desired | 3 updated | 3 total | 2 available | 1 unavailable"));
        assert!(out.contains("1 max unavailable, 50% max surge"));
        assert!(out.contains("Pod Template:"));
        assert!(out.contains("nginx:1.25"));
        assert!(out.contains("MinimumReplicasAvailable"));
    }

    #[test]
    fn test_replica_set_controlled_by() {
        let rs = ResourceItem::new(json!({
            "metadata": {"name": "web-5d4f", "namespace": "prod",
                         "ownerReferences": [{"kind": "Deployment", "name": "web", "controller": true}]},
            "spec": {"replicas": 2},
            "status": {"replicas": 2, "readyReplicas": 1}
        }));
        let out = render(|w| replica_set(w, &rs));
        assert!(out.contains("Deployment/web"));
        assert!(out.contains("2 current / 2 desired"));
        assert!(out.contains("1 Running / 1 Waiting"));
    }

    #[test]
    fn test_stateful_set_claims() {
        let sts = ResourceItem::new(json!({
            "metadata": {"name": "db", "namespace": "prod"},
            "spec": {"replicas": 1, "volumeClaimTemplates": [{
                "metadata": {"name": "data"},
                "spec": {"accessModes": ["ReadWriteOnce"], "resources": {"requests": {"storage": "10Gi"}}}
            }]}
        }));
        let out = render(|w| stateful_set(w, &sts));
        assert!(out.contains("Volume Claims:"));
        assert!(out.contains("10Gi"));
        assert!(out.contains("RWO"));
    }

    #[test]
    fn test_cron_job_view() {
        let cj = ResourceItem::new(json!({
            "metadata": {"name": "backup", "namespace": "ops"},
            "spec": {"schedule": "0 2 * * *", "jobTemplate": {"spec": {"template": {"spec": {
                "containers": [{"name": "backup", "image": "restic"}]}}}}},
            "status": {"active": [{"name": "backup-123"}]}
        }));
        let out = render(|w| cron_job(w, &cj));
        assert!(out.contains("0 2 * * *"));
        assert!(out.contains("backup-123"));
        assert!(out.contains("Starting Deadline Seconds:"));
        assert!(out.contains("restic"));
    }
}
