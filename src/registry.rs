//! Static table of the resource kinds kubedmp understands.
//!
//! Every user-facing alias, dump file stem and scope flag lives here so the
//! readers, the dispatcher and the printers all consult the same data.

use crate::error::{DumpError, Result};

/* ============================= TYPES ============================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Node,
    Pod,
    Service,
    Deployment,
    DaemonSet,
    ReplicaSet,
    Event,
    PersistentVolume,
    PersistentVolumeClaim,
    StatefulSet,
    Secret,
    ConfigMap,
    ServiceAccount,
    Ingress,
    StorageClass,
    ClusterRole,
    ClusterRoleBinding,
    Endpoints,
    Job,
    CronJob,
    Role,
    RoleBinding,
}

/// One row of the type alias table.
#[derive(Debug)]
pub struct ResourceType {
    pub kind: Kind,
    /// Canonical kind name as it appears in `kind` fields.
    pub name: &'static str,
    /// Tokens accepted on the command line.
    pub aliases: &'static [&'static str],
    /// File stem used by `cluster-info dump --output-directory`.
    pub file_stem: &'static str,
    /// Lower-case plural resource name, as used by `kubectl get`.
    pub plural: &'static str,
    pub namespaced: bool,
}

impl ResourceType {
    /// `kind` value of a list document holding this type.
    pub fn list_kind(&self) -> String {
        format!("{}List", self.name)
    }

    pub fn is_cluster_scoped(&self) -> bool {
        !self.namespaced
    }
}

/* ============================= TABLE ============================= */

const fn row(
    kind: Kind,
    name: &'static str,
    aliases: &'static [&'static str],
    file_stem: &'static str,
    plural: &'static str,
    namespaced: bool,
) -> ResourceType {
    ResourceType {
        kind,
        name,
        aliases,
        file_stem,
        plural,
        namespaced,
    }
}

pub static RESOURCE_TYPES: &[ResourceType] = &[
    row(Kind::Node, "Node", &["no", "node", "nodes"], "nodes", "nodes", false),
    row(Kind::Pod, "Pod", &["po", "pod", "pods"], "pods", "pods", true),
    row(Kind::Service, "Service", &["svc", "service", "services"], "services", "services", true),
    row(Kind::Deployment, "Deployment", &["deploy", "deployment", "deployments"], "deployments", "deployments", true),
    row(Kind::DaemonSet, "DaemonSet", &["ds", "daemonset", "daemonsets"], "daemonsets", "daemonsets", true),
    row(Kind::ReplicaSet, "ReplicaSet", &["rs", "replicaset", "replicasets"], "replicasets", "replicasets", true),
    row(Kind::Event, "Event", &["ev", "event", "events"], "events", "events", true),
    row(Kind::PersistentVolume, "PersistentVolume", &["pv", "persistentvolume", "persistentvolumes"], "pvs", "persistentvolumes", false),
    row(Kind::PersistentVolumeClaim, "PersistentVolumeClaim", &["pvc", "persistentvolumeclaim", "persistentvolumeclaims"], "pvcs", "persistentvolumeclaims", true),
    row(Kind::StatefulSet, "StatefulSet", &["sts", "statefulset", "statefulsets"], "statefulsets", "statefulsets", true),
    row(Kind::Secret, "Secret", &["secret", "secrets"], "secrets", "secrets", true),
    row(Kind::ConfigMap, "ConfigMap", &["cm", "configmap", "configmaps"], "configmaps", "configmaps", true),
    row(Kind::ServiceAccount, "ServiceAccount", &["sa", "serviceaccount", "serviceaccounts"], "serviceaccounts", "serviceaccounts", true),
    row(Kind::Ingress, "Ingress", &["ing", "ingress", "ingresses"], "ingresses", "ingresses", true),
    row(Kind::StorageClass, "StorageClass", &["sc", "storageclass", "storageclasses"], "storageclasses", "storageclasses", false),
    row(Kind::ClusterRole, "ClusterRole", &["clusterrole", "clusterroles"], "clusterroles", "clusterroles", false),
    row(Kind::ClusterRoleBinding, "ClusterRoleBinding", &["clusterrolebinding", "clusterrolebindings"], "clusterrolebindings", "clusterrolebindings", false),
    row(Kind::Endpoints, "Endpoints", &["ep", "endpoint", "endpoints"], "endpoints", "endpoints", true),
    row(Kind::Job, "Job", &["job", "jobs"], "jobs", "jobs", true),
    row(Kind::CronJob, "CronJob", &["cj", "cronjob", "cronjobs"], "cronjobs", "cronjobs", true),
    row(Kind::Role, "Role", &["role", "roles"], "roles", "roles", true),
    row(Kind::RoleBinding, "RoleBinding", &["rolebinding", "rolebindings"], "rolebindings", "rolebindings", true),
];

/* ============================= LOOKUP ============================= */

/// Resolve a command-line token to its resource type (exact, case-sensitive).
pub fn lookup(token: &str) -> Result<&'static ResourceType> {
    RESOURCE_TYPES
        .iter()
        .find(|t| t.aliases.contains(&token))
        .ok_or_else(|| DumpError::UnsupportedType(token.to_string()))
}

/// Find a resource type by canonical kind name, e.g. `Pod`.
pub fn by_name(name: &str) -> Option<&'static ResourceType> {
    RESOURCE_TYPES.iter().find(|t| t.name == name)
}

/// Find a resource type by the `kind` of a list document, e.g. `PodList`.
pub fn by_list_kind(list_kind: &str) -> Option<&'static ResourceType> {
    list_kind.strip_suffix("List").and_then(by_name)
}

pub fn get(kind: Kind) -> &'static ResourceType {
    RESOURCE_TYPES
        .iter()
        .find(|t| t.kind == kind)
        .unwrap_or_else(|| unreachable!("every Kind has a table row"))
}

/* ============================= TESTS ============================= */
