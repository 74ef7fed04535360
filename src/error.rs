use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid ignore rule in {path}: {source}")]
    IgnoreRule {
        path: PathBuf,
        source: ignore::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Walk error: {0}")]
    Walk(String),
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}
impl CollectError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CollectError::Io {
            path: path.into(),
            source,
        }
    }
    pub(crate) fn ignore_rule(path: impl Into<PathBuf>, source: ignore::Error) -> Self {
        CollectError::IgnoreRule {
            path: path.into(),
            source,
        }
    }
}
