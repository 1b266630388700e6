//! Where dump documents come from: a single dump file, a
//! `cluster-info dump --output-directory` tree, or a sosreport directory.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dispatch::{Query, filter_documents};
use crate::document::{self, ResourceDocument, ResourceItem};
use crate::error::{DumpError, Result};
use crate::scanner::scan_objects;

pub const DEFAULT_DUMP_FILE: &str = "./cluster-info.dump";

const DOCUMENT_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/* ============================= SOURCE ============================= */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DumpSource {
    /// One file holding every document back to back.
    File(PathBuf),
    /// `<dir>/<stem>.json` for cluster-scoped kinds, `<dir>/<ns>/<stem>.json` otherwise.
    Directory(PathBuf),
    /// sosreport `sos_commands/kubernetes` collection.
    SosReport(PathBuf),
}

impl DumpSource {
    /// Pick the layout from the command-line paths; a directory wins over a file.
    pub fn detect(file: Option<&Path>, dir: Option<&Path>) -> Result<Self> {
        match dir {
            Some(dir) => {
                if !dir.is_dir() {
                    return Err(DumpError::io(
                        dir,
                        std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
                    ));
                }
                let absolute = std::path::absolute(dir).map_err(|e| DumpError::io(dir, e))?;
                if is_sos_report(&absolute) {
                    Ok(DumpSource::SosReport(dir.to_path_buf()))
                } else {
                    Ok(DumpSource::Directory(dir.to_path_buf()))
                }
            }
            None => Ok(DumpSource::File(
                file.map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DUMP_FILE)),
            )),
        }
    }

    pub fn root(&self) -> &Path {
        match self {
            DumpSource::File(p) | DumpSource::Directory(p) | DumpSource::SosReport(p) => p,
        }
    }

    /// A dump file must exist; directories were checked by `detect`.
    pub fn ensure_exists(&self) -> Result<()> {
        match self {
            DumpSource::File(path) if !path.is_file() => Err(DumpError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            )),
            _ => Ok(()),
        }
    }

    /// Files that may hold documents for `query`, in read order.
    pub fn candidate_files(&self, query: &Query) -> Result<Vec<PathBuf>> {
        match self {
            DumpSource::File(path) => Ok(vec![path.clone()]),
            DumpSource::Directory(root) => {
                let stem = query.resource.file_stem;
                let dirs = if query.resource.is_cluster_scoped() {
                    vec![root.clone()]
                } else if let Some(ns) = query.effective_namespace() {
                    vec![root.join(ns)]
                } else {
                    sorted_subdirs(root)?
                };
                Ok(dirs
                    .iter()
                    .flat_map(|dir| {
                        DOCUMENT_EXTENSIONS
                            .iter()
                            .map(move |ext| dir.join(format!("{stem}.{ext}")))
                    })
                    .filter(|p| p.is_file())
                    .collect())
            }
            DumpSource::SosReport(root) => {
                let mut files = Vec::new();
                walk_files(root, &mut files)?;
                files.retain(|p| is_sos_resource_file(p, query));
                Ok(files)
            }
        }
    }

    /// Visit every document that may hold items for `query`.
    pub fn for_each_document<F>(&self, query: &Query, mut visit: F) -> Result<()>
    where
        F: FnMut(ResourceDocument),
    {
        self.ensure_exists()?;
        for path in self.candidate_files(query)? {
            debug!(path = %path.display(), "reading_dump_file");
            read_documents(&path, &mut visit)?;
        }
        Ok(())
    }

    /// Every document in the dump, regardless of kind.
    pub fn for_each_any_document<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(ResourceDocument),
    {
        let files = match self {
            DumpSource::File(path) => vec![path.clone()],
            DumpSource::Directory(root) | DumpSource::SosReport(root) => {
                let mut files = Vec::new();
                walk_files(root, &mut files)?;
                files.retain(|p| has_document_extension(p) || is_sos_get_output(p));
                files
            }
        };
        for path in files {
            read_documents(&path, &mut visit)?;
        }
        Ok(())
    }

    /// Load and filter the items selected by `query`.
    pub fn load(&self, query: &Query) -> Result<Vec<ResourceItem>> {
        let mut docs = Vec::new();
        self.for_each_document(query, |doc| docs.push(doc))?;
        Ok(filter_documents(query, docs))
    }
}

/* ============================= READING ============================= */

/// Decode the documents in one file, skipping any that fail to parse.
pub fn read_documents<F>(path: &Path, visit: &mut F) -> Result<()>
where
    F: FnMut(ResourceDocument),
{
    if is_yaml(path) {
        let text = fs::read_to_string(path).map_err(|e| DumpError::io(path, e))?;
        match document::decode_yaml(&text) {
            Ok(doc) => visit(doc),
            Err(e) => warn!(path = %path.display(), error = %e, "malformed_document_skipped"),
        }
        return Ok(());
    }

    let file = File::open(path).map_err(|e| DumpError::io(path, e))?;
    let emitted = scan_objects(BufReader::new(file), |text| {
        match document::decode_json(&text) {
            Ok(doc) => visit(doc),
            Err(e) => warn!(path = %path.display(), error = %e, "malformed_document_skipped"),
        }
    })
    .map_err(|e| DumpError::io(path, e))?;

    if emitted == 0 {
        // compact JSON has no brace-only lines; try the whole file
        let bytes = fs::read(path).map_err(|e| DumpError::io(path, e))?;
        if bytes.iter().find(|b| !b.is_ascii_whitespace()) == Some(&b'{') {
            match document::decode_json(&String::from_utf8_lossy(&bytes)) {
                Ok(doc) => visit(doc),
                Err(e) => warn!(path = %path.display(), error = %e, "malformed_document_skipped"),
            }
        }
    }
    Ok(())
}

/* ============================= LAYOUT ============================= */

pub fn is_sos_report(path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.contains("sos_commands") && text.contains("kubernetes")
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn has_document_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| DOCUMENT_EXTENSIONS.contains(&e))
}

fn file_name(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or_default()
}

fn is_sos_get_output(path: &Path) -> bool {
    let name = file_name(path);
    name.contains("_get_") && name.contains("json")
}

/// sos names command output after the command line, e.g.
/// `kubectl_get_-o_json_--namespace_default_pods`.
fn is_sos_resource_file(path: &Path, query: &Query) -> bool {
    if !is_sos_get_output(path) {
        return false;
    }
    let name = file_name(path);
    let resource = query.resource;
    [resource.plural, resource.file_stem]
        .iter()
        .any(|suffix| name.ends_with(&format!("_{suffix}")))
}

fn sorted_subdirs(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)
        .map_err(|e| DumpError::io(root, e))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}

fn walk_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| DumpError::io(dir, e))?
        .filter_map(std::result::Result::ok)
        .map(|e| e.path())
        .collect();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            walk_files(&path, out)?;
        } else if path.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

/* ============================= TESTS ============================= */

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    const PODS_DEFAULT: &str = "{\n\"kind\": \"PodList\",\n\"items\": [{\"metadata\": {\"name\": \"a\", \"namespace\": \"default\"}}]\n}\n";
    const PODS_SYSTEM: &str = "{\n\"kind\": \"PodList\",\n\"items\": [{\"metadata\": {\"name\": \"b\", \"namespace\": \"kube-system\"}}]\n}\n";

    #[test]
    fn test_detect_defaults_to_dump_file() {
        let source = DumpSource::detect(None, None).unwrap();
        assert_eq!(source, DumpSource::File(PathBuf::from(DEFAULT_DUMP_FILE)));
    }

    #[test]
    fn test_detect_missing_directory_is_io_error() {
        let err = DumpSource::detect(None, Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(matches!(err, DumpError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here"));
    }

    #[test]
    fn test_detect_sos_report() {
        let tmp = tempfile::tempdir().unwrap();
        let sos = tmp.path().join("sosreport-host/sos_commands/kubernetes");
        fs::create_dir_all(&sos).unwrap();
        let source = DumpSource::detect(None, Some(&sos)).unwrap();
        assert!(matches!(source, DumpSource::SosReport(_)));

        let plain = DumpSource::detect(None, Some(tmp.path())).unwrap();
        assert!(matches!(plain, DumpSource::Directory(_)));
    }

    #[test]
    fn test_missing_dump_file_is_io_error() {
        let source = DumpSource::File(PathBuf::from("/no/such/cluster-info.dump"));
        let q = Query::new("po", None, None, false).unwrap();
        assert!(matches!(source.load(&q), Err(DumpError::Io { .. })));
    }

    #[test]
    fn test_directory_reads_requested_namespace_only() {
        let tmp = tempfile::tempdir().unwrap();
        write(&tmp.path().join("default/pods.json"), PODS_DEFAULT);
        write(&tmp.path().join("kube-system/pods.json"), PODS_SYSTEM);
        let source = DumpSource::Directory(tmp.path().to_path_buf());

        let q = Query::new("po", Some("default".into()), None, false).unwrap();
        let files = source.candidate_files(&q).unwrap();
        assert_eq!(files, vec![tmp.path().join("default/pods.json")]);

        let q = Query::new("po", None, None, false).unwrap();
        let items = source.load(&q).unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_directory_cluster_scoped_at_root() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            &tmp.path().join("nodes.json"),
            "{\n\"kind\": \"NodeList\",\n\"items\": [{\"metadata\": {\"name\": \"n1\"}}]\n}\n",
        );
        let source = DumpSource::Directory(tmp.path().to_path_buf());
        let q = Query::new("nodes", Some("default".into()), None, false).unwrap();
        assert_eq!(source.load(&q).unwrap().len(), 1);
    }

    #[test]
    fn test_directory_missing_member_file_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("default")).unwrap();
        let source = DumpSource::Directory(tmp.path().to_path_buf());
        let q = Query::new("svc", Some("default".into()), None, false).unwrap();
        assert!(source.load(&q).unwrap().is_empty());
    }

    #[test]
    fn test_directory_yaml_member() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            &tmp.path().join("default/configmaps.yaml"),
            "kind: ConfigMapList\nitems:\n- metadata:\n    name: settings\n    namespace: default\n",
        );
        let source = DumpSource::Directory(tmp.path().to_path_buf());
        let q = Query::new("cm", Some("default".into()), None, false).unwrap();
        let items = source.load(&q).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "settings");
    }

    #[test]
    fn test_compact_json_falls_back_to_whole_file() {
        let tmp = tempfile::tempdir().unwrap();
        write(
            &tmp.path().join("default/secrets.json"),
            r#"{"kind":"SecretList","items":[{"metadata":{"name":"token","namespace":"default"}}]}"#,
        );
        let source = DumpSource::Directory(tmp.path().to_path_buf());
        let q = Query::new("secret", None, None, false).unwrap();
        assert_eq!(source.load(&q).unwrap().len(), 1);
    }

    #[test]
    fn test_logs_only_dump_with_binary_bytes_has_no_items() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cluster-info.dump");
        let mut body = b"==== START logs for container app of pod default/web-1 ====\n".to_vec();
        body.extend_from_slice(b"binary \xff\xfe payload\n");
        body.extend_from_slice(b"==== END logs for container app of pod default/web-1 ====\n");
        fs::write(&path, body).unwrap();

        let source = DumpSource::File(path);
        let q = Query::new("po", None, None, false).unwrap();
        assert!(source.load(&q).unwrap().is_empty());
    }

    #[test]
    fn test_compact_json_with_binary_bytes_decodes_lossily() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("default/configmaps.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mut body = br#"  {"kind":"ConfigMapList","items":[{"metadata":{"name":"blob","namespace":"default"},"data":{"k":""#.to_vec();
        body.push(0xff);
        body.extend_from_slice(br#""}}]}"#);
        fs::write(&path, body).unwrap();

        let source = DumpSource::Directory(tmp.path().to_path_buf());
        let q = Query::new("cm", None, None, false).unwrap();
        let items = source.load(&q).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "blob");
    }

    #[test]
    fn test_ensure_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cluster-info.dump");
        assert!(matches!(
            DumpSource::File(path.clone()).ensure_exists(),
            Err(DumpError::Io { .. })
        ));
        write(&path, PODS_DEFAULT);
        assert!(DumpSource::File(path).ensure_exists().is_ok());
        assert!(DumpSource::Directory(tmp.path().to_path_buf()).ensure_exists().is_ok());
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cluster-info.dump");
        let body = format!("{{\n\"kind\": \"PodList\",\n\"items\": [\n}}\n{PODS_DEFAULT}");
        write(&path, &body);
        let source = DumpSource::File(path);
        let q = Query::new("po", None, None, false).unwrap();
        let items = source.load(&q).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name(), "a");
    }

    #[test]
    fn test_sos_report_matches_command_output_names() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("sos_commands/kubernetes");
        write(&root.join("kubectl_get_-o_json_--namespace_default_pods"), PODS_DEFAULT);
        write(&root.join("kubectl_get_-o_json_--namespace_default_services"), "{\n\"kind\": \"ServiceList\",\n\"items\": []\n}\n");
        write(&root.join("pods/kubectl_--namespace_default_logs_a_-c_main"), "log line\n");
        let source = DumpSource::SosReport(root.clone());

        let q = Query::new("po", None, None, false).unwrap();
        let files = source.candidate_files(&q).unwrap();
        assert_eq!(files, vec![root.join("kubectl_get_-o_json_--namespace_default_pods")]);
        assert_eq!(source.load(&q).unwrap().len(), 1);
    }
}
