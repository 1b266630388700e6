mod common;

use common::{sample_dump, write_file};
use kubedmp::error::DumpError;
use kubedmp::logs::{LogRequest, stream_logs};
use kubedmp::source::DumpSource;

// ══════════════════════════════════════════════════════════════════
// Log extraction across the three dump layouts
// ══════════════════════════════════════════════════════════════════

const WEB_START: &str = "==== START logs for container app of pod default/web-1 ====";
const WEB_END: &str = "==== END logs for container app of pod default/web-1 ====";

async fn collect(source: &DumpSource, request: &LogRequest) -> Result<Vec<String>, DumpError> {
    let mut lines = Vec::new();
    stream_logs(source, request, |l| lines.push(l.to_string())).await?;
    Ok(lines)
}

#[tokio::test]
async fn test_file_logs_for_default_namespace() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cluster-info.dump");
    write_file(&path, &sample_dump());
    let source = DumpSource::File(path);

    let lines = collect(&source, &LogRequest::new("web-1", None, None)).await.unwrap();
    assert_eq!(lines, vec![WEB_START, "listening on :80", WEB_END]);

    let lines = collect(&source, &LogRequest::new("web-1", None, Some("app".into())))
        .await
        .unwrap();
    assert_eq!(lines.len(), 3);

    let err = collect(&source, &LogRequest::new("web-1", None, Some("sidecar".into())))
        .await
        .unwrap_err();
    assert!(matches!(err, DumpError::LogNotFound { .. }));
}

#[tokio::test]
async fn test_file_logs_unknown_pod() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cluster-info.dump");
    write_file(&path, &sample_dump());
    let source = DumpSource::File(path);

    let err = collect(&source, &LogRequest::new("web-1", Some("kube-system".into()), None))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "No log is found for pod kube-system/web-1.");
}

#[tokio::test]
async fn test_directory_logs() {
    let tmp = tempfile::tempdir().unwrap();
    write_file(
        &tmp.path().join("kube-system/coredns-1/logs.txt"),
        "==== START logs for container coredns of pod kube-system/coredns-1 ====\n\
         .:53\n\
         CoreDNS-1.10.1\n\
         ==== END logs for container coredns of pod kube-system/coredns-1 ====\n",
    );
    let source = DumpSource::Directory(tmp.path().to_path_buf());

    let request = LogRequest::new("coredns-1", Some("kube-system".into()), None);
    let lines = collect(&source, &request).await.unwrap();
    assert_eq!(lines.len(), 4);
    assert_eq!(&lines[1..3], &[".:53", "CoreDNS-1.10.1"]);

    let missing = LogRequest::new("coredns-2", Some("kube-system".into()), None);
    let err = collect(&source, &missing).await.unwrap_err();
    assert!(matches!(err, DumpError::LogNotFound { .. }));
}

#[tokio::test]
async fn test_sosreport_logs() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path().join("sosreport-host/sos_commands/kubernetes");
    write_file(
        &root.join("pods/kubectl_--namespace_default_logs_web-1_-c_app"),
        "first\nsecond\n",
    );
    let source = DumpSource::detect(None, Some(&root)).unwrap();

    let lines = collect(&source, &LogRequest::new("web-1", None, None)).await.unwrap();
    assert_eq!(lines, vec!["first", "second"]);
}
