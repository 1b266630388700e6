use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or decoding dump contents.
#[derive(Debug, Error)]
pub enum DumpError {
    #[error("{0} is not a supported resource type")]
    UnsupportedType(String),

    #[error("Error to read [path={}]: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("document has no string `kind` field")]
    MissingKind,

    #[error("Please specify a container name since pod {namespace}/{pod} has more than one container")]
    AmbiguousContainer { namespace: String, pod: String },

    #[error("No log is found for pod {namespace}/{pod}.")]
    LogNotFound { namespace: String, pod: String },
}

impl DumpError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DumpError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, DumpError>;
