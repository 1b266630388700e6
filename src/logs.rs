//! Container logs stored alongside a dump.
//!
//! `cluster-info dump` writes every container log between START/END marker
//! lines; sosreport stores one file per container. A reader task streams
//! lines through a bounded channel to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{DumpError, Result};
use crate::source::DumpSource;

/// Lines buffered between the reader task and the printer.
pub const LINE_BUFFER: usize = 100;

pub const DEFAULT_LOG_NAMESPACE: &str = "default";

/* ============================= REQUEST ============================= */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRequest {
    pub namespace: String,
    pub pod: String,
    pub container: Option<String>,
}

impl LogRequest {
    pub fn new(pod: impl Into<String>, namespace: Option<String>, container: Option<String>) -> Self {
        Self {
            namespace: namespace
                .filter(|ns| !ns.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_NAMESPACE.to_string()),
            pod: pod.into(),
            container: container.filter(|c| !c.is_empty()),
        }
    }

    fn not_found(&self) -> DumpError {
        DumpError::LogNotFound {
            namespace: self.namespace.clone(),
            pod: self.pod.clone(),
        }
    }
}

/* ============================= MARKERS ============================= */

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Start,
    End,
}

/// A parsed `==== START logs for container C of pod NS/POD ====` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker<'a> {
    pub boundary: Boundary,
    pub container: &'a str,
    pub namespace: &'a str,
    pub pod: &'a str,
}

pub fn parse_marker(line: &str) -> Option<Marker<'_>> {
    let body = line.trim_end().strip_prefix("==== ")?.strip_suffix(" ====")?;
    let (boundary, rest) = if let Some(rest) = body.strip_prefix("START ") {
        (Boundary::Start, rest)
    } else if let Some(rest) = body.strip_prefix("END ") {
        (Boundary::End, rest)
    } else {
        return None;
    };
    let rest = rest.strip_prefix("logs for container ")?;
    let (container, pod_ref) = rest.split_once(" of pod ")?;
    let (namespace, pod) = pod_ref.split_once('/')?;
    Some(Marker {
        boundary,
        container,
        namespace,
        pod,
    })
}

impl Marker<'_> {
    pub fn matches(&self, request: &LogRequest) -> bool {
        self.namespace == request.namespace
            && self.pod == request.pod
            && request.container.as_deref().is_none_or(|c| c == self.container)
    }
}

/// Passes the lines of matching sections, marker lines included.
#[derive(Debug)]
pub struct SectionFilter<'r> {
    request: &'r LogRequest,
    inside: bool,
}

impl<'r> SectionFilter<'r> {
    pub fn new(request: &'r LogRequest) -> Self {
        Self {
            request,
            inside: false,
        }
    }

    pub fn accept(&mut self, line: &str) -> bool {
        match parse_marker(line) {
            Some(m) if m.matches(self.request) => match m.boundary {
                Boundary::Start => {
                    self.inside = true;
                    true
                }
                Boundary::End => {
                    let was_inside = self.inside;
                    self.inside = false;
                    was_inside
                }
            },
            _ => self.inside,
        }
    }
}

/* ============================= LOCATING ============================= */

/// Where the log lines for a request live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// A file of marker-delimited sections; only matching sections are shown.
    Sections(PathBuf),
    /// A file holding exactly one container's log.
    Whole(PathBuf),
}

impl LogTarget {
    pub fn path(&self) -> &Path {
        match self {
            LogTarget::Sections(p) | LogTarget::Whole(p) => p,
        }
    }
}

pub fn locate(source: &DumpSource, request: &LogRequest) -> Result<LogTarget> {
    match source {
        DumpSource::File(path) => {
            source.ensure_exists()?;
            Ok(LogTarget::Sections(path.clone()))
        }
        DumpSource::Directory(root) => {
            let path = root
                .join(&request.namespace)
                .join(&request.pod)
                .join("logs.txt");
            if path.is_file() {
                Ok(LogTarget::Sections(path))
            } else {
                Err(request.not_found())
            }
        }
        DumpSource::SosReport(root) => locate_sos(root, request),
    }
}

/// sos names each file after the command, e.g.
/// `kubectl_--namespace_default_logs_web-1_-c_nginx`.
fn locate_sos(root: &Path, request: &LogRequest) -> Result<LogTarget> {
    let dir = root.join("pods");
    let mut names: Vec<String> = fs::read_dir(&dir)
        .map_err(|e| DumpError::io(&dir, e))?
        .filter_map(std::result::Result::ok)
        .filter(|e| e.path().is_file())
        .filter_map(|e| e.file_name().into_string().ok())
        .collect();
    names.sort();

    let needle = format!("_--namespace_{}_logs_{}_-c_", request.namespace, request.pod);
    let found = match &request.container {
        Some(container) => {
            let suffix = format!("{needle}{container}");
            names.into_iter().find(|n| n.ends_with(&suffix))
        }
        None => {
            let mut matching = names.into_iter().filter(|n| n.contains(&needle));
            let first = matching.next();
            if first.is_some() && matching.next().is_some() {
                return Err(DumpError::AmbiguousContainer {
                    namespace: request.namespace.clone(),
                    pod: request.pod.clone(),
                });
            }
            first
        }
    };
    found
        .map(|name| LogTarget::Whole(dir.join(name)))
        .ok_or_else(|| request.not_found())
}

/* ============================= STREAMING ============================= */

async fn read_lines(target: LogTarget, request: LogRequest, tx: mpsc::Sender<String>) -> Result<()> {
    let path = target.path().to_path_buf();
    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| DumpError::io(&path, e))?;
    let mut reader = BufReader::new(file);
    let mut filter = SectionFilter::new(&request);
    let sections = matches!(target, LogTarget::Sections(_));
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| DumpError::io(&path, e))?;
        if n == 0 {
            break;
        }
        if buf.ends_with(b"\n") {
            buf.pop();
            if buf.ends_with(b"\r") {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf).into_owned();
        if sections && !filter.accept(&line) {
            continue;
        }
        if tx.send(line).await.is_err() {
            // receiver gone
            break;
        }
    }
    Ok(())
}

/// Stream the requested log lines to `emit` and return how many were emitted.
///
/// Fails with `LogNotFound` when nothing matched.
pub async fn stream_logs<F>(source: &DumpSource, request: &LogRequest, mut emit: F) -> Result<usize>
where
    F: FnMut(&str),
{
    let target = locate(source, request)?;
    debug!(path = %target.path().display(), pod = %request.pod, "reading_logs");

    let (tx, mut rx) = mpsc::channel(LINE_BUFFER);
    let reader = tokio::spawn(read_lines(target, request.clone(), tx));

    let mut emitted = 0;
    while let Some(line) = rx.recv().await {
        emit(&line);
        emitted += 1;
    }
    reader
        .await
        .map_err(|e| DumpError::io(source.root(), std::io::Error::other(e)))??;

    if emitted == 0 {
        return Err(request.not_found());
    }
    Ok(emitted)
}

/* ============================= TESTS ============================= */
