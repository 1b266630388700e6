//! Core API views: nodes, pods, services and their companions.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{DescribeWriter, NONE, selector, timestamp, write_metadata};
use crate::age::human_duration;
use crate::document::{ResourceItem, array, int_or, key_values, scalar, str_or};
use crate::printers::{self, event_time, node_roles, service_ports};

/* ============================= NODE ============================= */

pub(super) fn node(w: &mut DescribeWriter, item: &ResourceItem) {
    let metadata = &item.data["metadata"];
    let spec = item.spec();
    let status = item.status();

    w.field(0, "Name", item.name());
    w.field(0, "Roles", node_roles(&metadata["labels"]));
    w.list(0, "Labels", &key_values(&metadata["labels"], "="));
    w.list(0, "Annotations", &key_values(&metadata["annotations"], ": "));
    w.field(0, "CreationTimestamp", timestamp(&metadata["creationTimestamp"]));

    let taints: Vec<String> = array(&spec["taints"])
        .iter()
        .map(|t| match t["value"].as_str().filter(|v| !v.is_empty()) {
            Some(value) => format!("{}={value}:{}", str_or(&t["key"], ""), str_or(&t["effect"], "")),
            None => format!("{}:{}", str_or(&t["key"], ""), str_or(&t["effect"], "")),
        })
        .collect();
    w.list(0, "Taints", &taints);
    w.field(0, "Unschedulable", spec["unschedulable"].as_bool().unwrap_or(false));

    w.section(0, "Conditions");
    let rows = array(&status["conditions"])
        .iter()
        .map(|c| {
            vec![
                str_or(&c["type"], "").to_string(),
                str_or(&c["status"], "").to_string(),
                timestamp(&c["lastHeartbeatTime"]),
                timestamp(&c["lastTransitionTime"]),
                str_or(&c["reason"], "").to_string(),
                str_or(&c["message"], "").to_string(),
            ]
        })
        .collect();
    w.table(
        1,
        &["Type", "Status", "LastHeartbeatTime", "LastTransitionTime", "Reason", "Message"],
        rows,
    );

    w.section(0, "Addresses");
    for addr in array(&status["addresses"]) {
        w.field(1, str_or(&addr["type"], "Unknown"), str_or(&addr["address"], ""));
    }
    write_quantities(w, "Capacity", &status["capacity"]);
    write_quantities(w, "Allocatable", &status["allocatable"]);

    let info = &status["nodeInfo"];
    w.section(0, "System Info");
    for (label, key) in [
        ("Machine ID", "machineID"),
        ("System UUID", "systemUUID"),
        ("Boot ID", "bootID"),
        ("Kernel Version", "kernelVersion"),
        ("OS Image", "osImage"),
        ("Operating System", "operatingSystem"),
        ("Architecture", "architecture"),
        ("Container Runtime Version", "containerRuntimeVersion"),
        ("Kubelet Version", "kubeletVersion"),
        ("Kube-Proxy Version", "kubeProxyVersion"),
    ] {
        w.field(1, label, str_or(&info[key], ""));
    }

    if let Some(cidr) = spec["podCIDR"].as_str() {
        w.field(0, "PodCIDR", cidr);
    }
    if !array(&spec["podCIDRs"]).is_empty() {
        w.field(0, "PodCIDRs", printers::join_scalars(&spec["podCIDRs"], ","));
    }
    if let Some(provider) = spec["providerID"].as_str() {
        w.field(0, "ProviderID", provider);
    }
}

fn write_quantities(w: &mut DescribeWriter, label: &str, value: &Value) {
    w.section(0, label);
    if let Some(map) = value.as_object() {
        let mut keys: Vec<&String> = map.keys().collect();
        keys.sort();
        for key in keys {
            w.field(1, key, scalar(&map[key]).unwrap_or_default());
        }
    }
}

/* ============================= POD ============================= */

pub(super) fn pod(w: &mut DescribeWriter, item: &ResourceItem) {
    let metadata = &item.data["metadata"];
    let spec = item.spec();
    let status = item.status();

    w.field(0, "Name", item.name());
    w.field(0, "Namespace", item.namespace().unwrap_or(NONE));
    w.field(0, "Priority", int_or(&spec["priority"], 0));
    w.field_or_none(0, "Service Account", str_or(&spec["serviceAccountName"], str_or(&spec["serviceAccount"], "")));
    let node = match (spec["nodeName"].as_str(), status["hostIP"].as_str()) {
        (Some(node), Some(ip)) => format!("{node}/{ip}"),
        (Some(node), None) => node.to_string(),
        _ => NONE.to_string(),
    };
    w.field(0, "Node", node);
    if !status["startTime"].is_null() {
        w.field(0, "Start Time", timestamp(&status["startTime"]));
    }
    w.list(0, "Labels", &key_values(&metadata["labels"], "="));
    w.list(0, "Annotations", &key_values(&metadata["annotations"], ": "));
    w.field(0, "Status", printers::pod_status(item));
    if let Some(reason) = status["reason"].as_str() {
        w.field(0, "Reason", reason);
    }
    if let Some(message) = status["message"].as_str() {
        w.field(0, "Message", message);
    }
    w.field_or_none(0, "IP", str_or(&status["podIP"], ""));
    let ips: Vec<String> = array(&status["podIPs"])
        .iter()
        .filter_map(|ip| ip["ip"].as_str().map(str::to_string))
        .collect();
    if ips.is_empty() {
        w.field(0, "IPs", NONE);
    } else {
        w.section(0, "IPs");
        for ip in ips {
            w.field(1, "IP", ip);
        }
    }
    let owners: Vec<String> = array(&metadata["ownerReferences"])
        .iter()
        .filter(|o| o["controller"].as_bool() == Some(true))
        .map(|o| format!("{}/{}", str_or(&o["kind"], ""), str_or(&o["name"], "")))
        .collect();
    if !owners.is_empty() {
        w.field(0, "Controlled By", owners.join(","));
    }

    if !array(&spec["initContainers"]).is_empty() {
        w.section(0, "Init Containers");
        write_containers(w, 1, &spec["initContainers"], &status["initContainerStatuses"]);
    }
    w.section(0, "Containers");
    write_containers(w, 1, &spec["containers"], &status["containerStatuses"]);

    let conditions = array(&status["conditions"]);
    if !conditions.is_empty() {
        w.section(0, "Conditions");
        let rows = conditions
            .iter()
            .map(|c| vec![str_or(&c["type"], "").to_string(), str_or(&c["status"], "").to_string()])
            .collect();
        w.table(1, &["Type", "Status"], rows);
    }

    write_volumes(w, 0, &spec["volumes"]);
    if let Some(qos) = status["qosClass"].as_str() {
        w.field(0, "QoS Class", qos);
    }
    w.list(0, "Node-Selectors", &key_values(&spec["nodeSelector"], "="));
    w.list(0, "Tolerations", &tolerations(&spec["tolerations"]));
}

fn tolerations(value: &Value) -> Vec<String> {
    array(value)
        .iter()
        .map(|t| {
            let mut line = str_or(&t["key"], "").to_string();
            if let Some(v) = t["value"].as_str().filter(|v| !v.is_empty()) {
                line.push('=');
                line.push_str(v);
            }
            if let Some(effect) = t["effect"].as_str().filter(|e| !e.is_empty()) {
                line.push(':');
                line.push_str(effect);
            }
            if let Some(op) = t["operator"].as_str() {
                line.push_str(&format!(" op={op}"));
            }
            if let Some(seconds) = t["tolerationSeconds"].as_i64() {
                line.push_str(&format!(" for {seconds}s"));
            }
            line
        })
        .collect()
}

/// Container blocks of a pod spec or pod template.
pub(super) fn write_containers(w: &mut DescribeWriter, indent: usize, containers: &Value, statuses: &Value) {
    for container in array(containers) {
        let name = str_or(&container["name"], "");
        w.section(indent, name);
        let i = indent + 1;
        w.field(i, "Image", str_or(&container["image"], ""));
        let ports: Vec<String> = array(&container["ports"])
            .iter()
            .map(|p| format!("{}/{}", int_or(&p["containerPort"], 0), str_or(&p["protocol"], "TCP")))
            .collect();
        if !ports.is_empty() {
            w.field(i, "Port", ports.join(", "));
        }
        for (label, key) in [("Command", "command"), ("Args", "args")] {
            let parts = array(&container[key]);
            if !parts.is_empty() {
                w.section(i, label);
                for part in parts {
                    w.text(i + 1, scalar(part).unwrap_or_default());
                }
            }
        }

        if let Some(cs) = array(statuses).iter().find(|cs| cs["name"] == name) {
            write_container_state(w, i, "State", &cs["state"]);
            if cs["lastState"].as_object().is_some_and(|m| !m.is_empty()) {
                write_container_state(w, i, "Last State", &cs["lastState"]);
            }
            w.field(i, "Ready", cs["ready"].as_bool().unwrap_or(false));
            w.field(i, "Restart Count", int_or(&cs["restartCount"], 0));
        }

        write_quantities_at(w, i, "Limits", &container["resources"]["limits"]);
        write_quantities_at(w, i, "Requests", &container["resources"]["requests"]);
        for (label, key) in [
            ("Liveness", "livenessProbe"),
            ("Readiness", "readinessProbe"),
            ("Startup", "startupProbe"),
        ] {
            if container[key].is_object() {
                w.field(i, label, probe(&container[key]));
            }
        }

        let env = array(&container["env"]);
        if env.is_empty() {
            w.field(i, "Environment", NONE);
        } else {
            w.section(i, "Environment");
            for var in env {
                w.field(i + 1, str_or(&var["name"], ""), env_value(var));
            }
        }

        let mounts = array(&container["volumeMounts"]);
        if mounts.is_empty() {
            w.field(i, "Mounts", NONE);
        } else {
            w.section(i, "Mounts");
            for mount in mounts {
                let mut flags = vec![if mount["readOnly"].as_bool() == Some(true) { "ro".to_string() } else { "rw".to_string() }];
                if let Some(sub) = mount["subPath"].as_str().filter(|s| !s.is_empty()) {
                    flags.push(format!("path=\"{sub}\""));
                }
                w.text(
                    i + 1,
                    format!(
                        "{} from {} ({})",
                        str_or(&mount["mountPath"], ""),
                        str_or(&mount["name"], ""),
                        flags.join(",")
                    ),
                );
            }
        }

        let devices = array(&container["volumeDevices"]);
        if !devices.is_empty() {
            w.section(i, "Devices");
            for device in devices {
                w.text(
                    i + 1,
                    format!("{} from {}", str_or(&device["devicePath"], ""), str_or(&device["name"], "")),
                );
            }
        }
    }
}

fn write_quantities_at(w: &mut DescribeWriter, indent: usize, label: &str, value: &Value) {
    let Some(map) = value.as_object().filter(|m| !m.is_empty()) else {
        return;
    };
    w.section(indent, label);
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    for key in keys {
        w.field(indent + 1, key, scalar(&map[key]).unwrap_or_default());
    }
}

fn write_container_state(w: &mut DescribeWriter, indent: usize, label: &str, state: &Value) {
    if state["running"].is_object() {
        w.field(indent, label, "Running");
        w.field(indent + 1, "Started", timestamp(&state["running"]["startedAt"]));
    } else if state["terminated"].is_object() {
        let t = &state["terminated"];
        w.field(indent, label, "Terminated");
        if let Some(reason) = t["reason"].as_str() {
            w.field(indent + 1, "Reason", reason);
        }
        if let Some(message) = t["message"].as_str() {
            w.field(indent + 1, "Message", message.trim());
        }
        w.field(indent + 1, "Exit Code", int_or(&t["exitCode"], 0));
        if let Some(signal) = t["signal"].as_i64() {
            w.field(indent + 1, "Signal", signal);
        }
        w.field(indent + 1, "Started", timestamp(&t["startedAt"]));
        w.field(indent + 1, "Finished", timestamp(&t["finishedAt"]));
    } else {
        w.field(indent, label, "Waiting");
        if let Some(reason) = state["waiting"]["reason"].as_str() {
            w.field(indent + 1, "Reason", reason);
        }
    }
}

/// One-line probe summary in kubectl's format.
pub(super) fn probe(p: &Value) -> String {
    let attrs = format!(
        "delay={}s timeout={}s period={}s #success={} #failure={}",
        int_or(&p["initialDelaySeconds"], 0),
        int_or(&p["timeoutSeconds"], 1),
        int_or(&p["periodSeconds"], 10),
        int_or(&p["successThreshold"], 1),
        int_or(&p["failureThreshold"], 3),
    );
    if p["exec"].is_object() {
        format!("exec [{}] {attrs}", printers::join_scalars(&p["exec"]["command"], " "))
    } else if p["httpGet"].is_object() {
        let get = &p["httpGet"];
        let scheme = str_or(&get["scheme"], "HTTP").to_lowercase();
        let port = scalar(&get["port"]).unwrap_or_default();
        format!(
            "http-get {scheme}://{}:{port}{} {attrs}",
            str_or(&get["host"], ""),
            str_or(&get["path"], "")
        )
    } else if p["tcpSocket"].is_object() {
        let tcp = &p["tcpSocket"];
        format!(
            "tcp-socket {}:{} {attrs}",
            str_or(&tcp["host"], ""),
            scalar(&tcp["port"]).unwrap_or_default()
        )
    } else if p["grpc"].is_object() {
        let grpc = &p["grpc"];
        format!(
            "grpc <pod>:{} {} {attrs}",
            int_or(&grpc["port"], 0),
            str_or(&grpc["service"], "")
        )
    } else {
        format!("unknown {attrs}")
    }
}

fn env_value(var: &Value) -> String {
    let from = &var["valueFrom"];
    if !from.is_object() {
        return str_or(&var["value"], "").to_string();
    }
    let optional = |r: &Value| r["optional"].as_bool().unwrap_or(false);
    if from["fieldRef"].is_object() {
        let r = &from["fieldRef"];
        format!(" ({}:{})", str_or(&r["apiVersion"], "v1"), str_or(&r["fieldPath"], ""))
    } else if from["resourceFieldRef"].is_object() {
        let r = &from["resourceFieldRef"];
        format!("{} ({})", str_or(&r["containerName"], ""), str_or(&r["resource"], ""))
    } else if from["secretKeyRef"].is_object() {
        let r = &from["secretKeyRef"];
        format!(
            "<set to the key '{}' in secret '{}'>  Optional: {}",
            str_or(&r["key"], ""),
            str_or(&r["name"], ""),
            optional(r)
        )
    } else if from["configMapKeyRef"].is_object() {
        let r = &from["configMapKeyRef"];
        format!(
            "<set to the key '{}' of config map '{}'>  Optional: {}",
            str_or(&r["key"], ""),
            str_or(&r["name"], ""),
            optional(r)
        )
    } else {
        String::new()
    }
}

/* ============================= VOLUMES ============================= */

/// `Volumes:` section, one block per volume source.
pub(super) fn write_volumes(w: &mut DescribeWriter, indent: usize, volumes: &Value) {
    let volumes = array(volumes);
    if volumes.is_empty() {
        w.field(indent, "Volumes", NONE);
        return;
    }
    w.section(indent, "Volumes");
    let i = indent + 2;
    for vol in volumes {
        w.section(indent + 1, str_or(&vol["name"], ""));
        let show = |v: &Value| scalar(v).unwrap_or_else(|| {
            if v.is_null() { String::new() } else { v.to_string() }
        });
        if let Some(src) = vol.get("hostPath") {
            w.field(i, "Type", "HostPath (bare host directory volume)");
            w.field(i, "Path", str_or(&src["path"], ""));
            w.field(i, "HostPathType", str_or(&src["type"], ""));
        } else if let Some(src) = vol.get("emptyDir") {
            w.field(i, "Type", "EmptyDir (a temporary directory that shares a pod's lifetime)");
            w.field(i, "Medium", str_or(&src["medium"], ""));
            w.field_or_none(i, "SizeLimit", &show(&src["sizeLimit"]));
        } else if let Some(src) = vol.get("secret") {
            w.field(i, "Type", "Secret (a volume populated by a Secret)");
            w.field(i, "SecretName", str_or(&src["secretName"], ""));
            w.field(i, "Optional", src["optional"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("configMap") {
            w.field(i, "Type", "ConfigMap (a volume populated by a ConfigMap)");
            w.field(i, "Name", str_or(&src["name"], ""));
            w.field(i, "Optional", src["optional"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("nfs") {
            w.field(i, "Type", "NFS (an NFS mount that lasts the lifetime of a pod)");
            w.field(i, "Server", str_or(&src["server"], ""));
            w.field(i, "Path", str_or(&src["path"], ""));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("iscsi") {
            w.field(i, "Type", "ISCSI (an ISCSI Disk resource that is attached to a kubelet's host machine and then exposed to the pod)");
            w.field(i, "TargetPortal", str_or(&src["targetPortal"], ""));
            w.field(i, "IQN", str_or(&src["iqn"], ""));
            w.field(i, "Lun", int_or(&src["lun"], 0));
            w.field(i, "ISCSIInterface", str_or(&src["iscsiInterface"], "default"));
            w.field(i, "FSType", str_or(&src["fsType"], ""));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
            w.field(i, "Portals", format!("[{}]", printers::join_scalars(&src["portals"], " ")));
            w.field(i, "DiscoveryCHAPAuth", src["chapAuthDiscovery"].as_bool().unwrap_or(false));
            w.field(i, "SessionCHAPAuth", src["chapAuthSession"].as_bool().unwrap_or(false));
            w.field(i, "SecretRef", show(&src["secretRef"]));
            if let Some(initiator) = src["initiatorName"].as_str() {
                w.field(i, "InitiatorName", initiator);
            }
        } else if let Some(src) = vol.get("persistentVolumeClaim") {
            w.field(i, "Type", "PersistentVolumeClaim (a reference to a PersistentVolumeClaim in the same namespace)");
            w.field(i, "ClaimName", str_or(&src["claimName"], ""));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("rbd") {
            w.field(i, "Type", "RBD (a Rados Block Device mount on the host that shares a pod's lifetime)");
            w.field(i, "CephMonitors", format!("[{}]", printers::join_scalars(&src["monitors"], " ")));
            w.field(i, "RBDImage", str_or(&src["image"], ""));
            w.field(i, "FSType", str_or(&src["fsType"], ""));
            w.field(i, "RBDPool", str_or(&src["pool"], "rbd"));
            w.field(i, "RadosUser", str_or(&src["user"], "admin"));
            w.field(i, "Keyring", str_or(&src["keyring"], ""));
            w.field(i, "SecretRef", show(&src["secretRef"]));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("vsphereVolume") {
            w.field(i, "Type", "vSphereVolume (a Persistent Disk resource in vSphere)");
            w.field(i, "VolumePath", str_or(&src["volumePath"], ""));
            w.field(i, "FSType", str_or(&src["fsType"], ""));
            w.field(i, "StoragePolicyName", str_or(&src["storagePolicyName"], ""));
        } else if let Some(src) = vol.get("cinder") {
            w.field(i, "Type", "Cinder (a Persistent Disk resource in OpenStack)");
            w.field(i, "VolumeID", str_or(&src["volumeID"], ""));
            w.field(i, "FSType", str_or(&src["fsType"], ""));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
            w.field(i, "SecretRef", show(&src["secretRef"]));
        } else if let Some(src) = vol.get("cephfs") {
            w.field(i, "Type", "CephFS (a CephFS mount on the host that shares a pod's lifetime)");
            w.field(i, "Monitors", format!("[{}]", printers::join_scalars(&src["monitors"], " ")));
            w.field(i, "Path", str_or(&src["path"], ""));
            w.field(i, "User", str_or(&src["user"], ""));
            w.field(i, "SecretFile", str_or(&src["secretFile"], ""));
            w.field(i, "SecretRef", show(&src["secretRef"]));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
        } else if let Some(src) = vol.get("projected") {
            w.field(i, "Type", "Projected (a volume that contains injected data from multiple sources)");
            for source in array(&src["sources"]) {
                if source["secret"].is_object() {
                    w.field(i, "SecretName", str_or(&source["secret"]["name"], ""));
                    w.field(i, "SecretOptionalName", show(&source["secret"]["optional"]));
                } else if source["downwardAPI"].is_object() {
                    w.field(i, "DownwardAPI", "true");
                } else if source["configMap"].is_object() {
                    w.field(i, "ConfigMapName", str_or(&source["configMap"]["name"], ""));
                    w.field(i, "ConfigMapOptional", show(&source["configMap"]["optional"]));
                } else if source["serviceAccountToken"].is_object() {
                    w.field(
                        i,
                        "TokenExpirationSeconds",
                        int_or(&source["serviceAccountToken"]["expirationSeconds"], 3607),
                    );
                }
            }
        } else if let Some(src) = vol.get("csi") {
            w.field(i, "Type", "CSI (a Container Storage Interface (CSI) volume source)");
            w.field(i, "Driver", str_or(&src["driver"], ""));
            w.field(i, "FSType", str_or(&src["fsType"], ""));
            w.field(i, "ReadOnly", src["readOnly"].as_bool().unwrap_or(false));
            let attrs = key_values(&src["volumeAttributes"], "=");
            if !attrs.is_empty() {
                w.list(i, "VolumeAttributes", &attrs);
            }
        } else {
            w.text(i, "<unknown>");
        }
    }
}

/* ============================= SERVICE ============================= */

pub(super) fn service(w: &mut DescribeWriter, item: &ResourceItem) {
    let spec = item.spec();
    write_metadata(w, item, true);
    w.field(0, "Selector", selector(&spec["selector"]));
    w.field(0, "Type", str_or(&spec["type"], "ClusterIP"));
    w.field_or_none(0, "IP Family Policy", str_or(&spec["ipFamilyPolicy"], ""));
    w.field_or_none(0, "IP Families", &printers::join_scalars(&spec["ipFamilies"], ","));
    w.field_or_none(0, "IP", str_or(&spec["clusterIP"], ""));
    w.field_or_none(0, "IPs", &printers::join_scalars(&spec["clusterIPs"], ","));
    if !array(&spec["externalIPs"]).is_empty() {
        w.field(0, "External IPs", printers::join_scalars(&spec["externalIPs"], ","));
    }
    if let Some(ip) = spec["loadBalancerIP"].as_str() {
        w.field(0, "Desired LoadBalancer IP", ip);
    }
    if let Some(name) = spec["externalName"].as_str() {
        w.field(0, "External Name", name);
    }
    let ingress: Vec<String> = array(&item.status()["loadBalancer"]["ingress"])
        .iter()
        .filter_map(|ing| {
            ing["ip"]
                .as_str()
                .filter(|ip| !ip.is_empty())
                .or_else(|| ing["hostname"].as_str())
                .map(str::to_string)
        })
        .collect();
    if !ingress.is_empty() {
        w.field(0, "LoadBalancer Ingress", ingress.join(", "));
    }
    for port in array(&spec["ports"]) {
        let protocol = str_or(&port["protocol"], "TCP");
        w.field(
            0,
            "Port",
            format!("{}  {}/{protocol}", str_or(&port["name"], "<unset>"), int_or(&port["port"], 0)),
        );
        let target = scalar(&port["targetPort"]).unwrap_or_else(|| int_or(&port["port"], 0).to_string());
        w.field(0, "TargetPort", format!("{target}/{protocol}"));
        if let Some(node_port) = port["nodePort"].as_i64() {
            w.field(0, "NodePort", format!("{}  {node_port}/{protocol}", str_or(&port["name"], "<unset>")));
        }
    }
    if array(&spec["ports"]).is_empty() {
        w.field(0, "Port", service_ports(spec));
    }
    w.field(0, "Session Affinity", str_or(&spec["sessionAffinity"], "None"));
    if let Some(policy) = spec["externalTrafficPolicy"].as_str() {
        w.field(0, "External Traffic Policy", policy);
    }
    if let Some(port) = spec["healthCheckNodePort"].as_i64() {
        w.field(0, "HealthCheck NodePort", port);
    }
    if !array(&spec["loadBalancerSourceRanges"]).is_empty() {
        w.field(
            0,
            "LoadBalancer Source Ranges",
            printers::join_scalars(&spec["loadBalancerSourceRanges"], ","),
        );
    }
}

/* ============================= ENDPOINTS ============================= */

pub(super) fn endpoints(w: &mut DescribeWriter, item: &ResourceItem) {
    write_metadata(w, item, true);
    w.section(0, "Subsets");
    for subset in array(&item.data["subsets"]) {
        let ips = |key: &str| -> String {
            let list: Vec<&str> = array(&subset[key])
                .iter()
                .filter_map(|a| a["ip"].as_str())
                .collect();
            if list.is_empty() { NONE.to_string() } else { list.join(",") }
        };
        w.field(1, "Addresses", ips("addresses"));
        w.field(1, "NotReadyAddresses", ips("notReadyAddresses"));
        let ports = array(&subset["ports"]);
        if !ports.is_empty() {
            w.section(1, "Ports");
            let rows = ports
                .iter()
                .map(|p| {
                    vec![
                        str_or(&p["name"], "<unset>").to_string(),
                        int_or(&p["port"], 0).to_string(),
                        str_or(&p["protocol"], "TCP").to_string(),
                    ]
                })
                .collect();
            w.table(2, &["Name", "Port", "Protocol"], rows);
        }
    }
}

/* ============================= EVENT ============================= */

pub(super) fn event(w: &mut DescribeWriter, item: &ResourceItem, now: DateTime<Utc>) {
    let object = &item.data["involvedObject"];
    write_metadata(w, item, true);
    w.field(0, "Type", str_or(&item.data["type"], ""));
    w.field(0, "Reason", str_or(&item.data["reason"], ""));
    w.section(0, "Involved Object");
    w.field(1, "Kind", str_or(&object["kind"], ""));
    w.field(1, "Name", str_or(&object["name"], ""));
    w.field_or_none(1, "Namespace", str_or(&object["namespace"], ""));
    if let Some(path) = object["fieldPath"].as_str() {
        w.field(1, "Field Path", path);
    }
    w.section(0, "Source");
    w.field(1, "Component", str_or(&item.data["source"]["component"], ""));
    w.field(1, "Host", str_or(&item.data["source"]["host"], ""));
    w.field(0, "First Timestamp", timestamp(&item.data["firstTimestamp"]));
    w.field(0, "Last Timestamp", timestamp(&item.data["lastTimestamp"]));
    w.field(
        0,
        "Last Seen",
        event_time(item)
            .map(|t| human_duration(now - t))
            .unwrap_or_else(|| "<unknown>".to_string()),
    );
    w.field(0, "Count", int_or(&item.data["count"], 1));
    w.field(0, "Message", str_or(&item.data["message"], "").trim());
}

/* ============================= CONFIG ============================= */

pub(super) fn config_map(w: &mut DescribeWriter, item: &ResourceItem) {
    write_metadata(w, item, true);
    w.text(0, "");
    w.section(0, "Data");
    w.text(0, "====");
    if let Some(data) = item.data["data"].as_object() {
        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort();
        for key in keys {
            w.section(0, key);
            w.text(0, "----");
            for line in str_or(&data[key], "").lines() {
                w.text(0, line);
            }
            w.text(0, "");
        }
    }
    w.text(0, "");
    w.section(0, "BinaryData");
    w.text(0, "====");
    if let Some(data) = item.data["binaryData"].as_object() {
        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort();
        for key in keys {
            w.field(0, key, format!("{} bytes", decoded_len(&data[key])));
        }
    }
}

/// Size of a base64 payload once decoded; undecodable payloads count raw bytes.
pub(super) fn decoded_len(value: &Value) -> usize {
    let text = value.as_str().unwrap_or_default();
    STANDARD
        .decode(text)
        .map(|bytes| bytes.len())
        .unwrap_or(text.len())
}

pub(super) fn secret(w: &mut DescribeWriter, item: &ResourceItem) {
    write_metadata(w, item, true);
    w.text(0, "");
    w.field(0, "Type", str_or(&item.data["type"], "Opaque"));
    w.text(0, "");
    w.section(0, "Data");
    w.text(0, "====");
    if let Some(data) = item.data["data"].as_object() {
        let mut keys: Vec<&String> = data.keys().collect();
        keys.sort();
        for key in keys {
            w.field(0, key, format!("{} bytes", decoded_len(&data[key])));
        }
    }
}

pub(super) fn service_account(w: &mut DescribeWriter, item: &ResourceItem) {
    let names = |key: &str| -> Vec<String> {
        array(&item.data[key])
            .iter()
            .filter_map(|s| s["name"].as_str().map(str::to_string))
            .collect()
    };
    write_metadata(w, item, true);
    w.list(0, "Image pull secrets", &names("imagePullSecrets"));
    w.list(0, "Mountable secrets", &names("secrets"));
}

/* ============================= TESTS ============================= */
