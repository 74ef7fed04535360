use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A collected file with its normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    /// The absolute path to the file.
    pub path: PathBuf,
    /// The path relative to the collection root, always `/`-separated.
    pub relative_path: String,
    /// The file text with blank lines removed and trailing whitespace trimmed.
    ///
    /// Never empty: files that normalize to nothing are not collected.
    pub content: String,
}

/// The complete result of a collection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectResult {
    /// Base name of the resolved root directory.
    pub root_name: String,
    /// The rendered directory tree. Empty when the root itself is excluded.
    pub tree: String,
    /// Collected files, in tree order.
    pub files: Vec<FileEntry>,
}
