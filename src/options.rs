use crate::error::CollectError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryDetection {
    Simple,
    Accurate,
    None,
}
/// How matches from several ancestor `.gitignore` scopes are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreResolution {
    /// Ignored if any ancestor scope matches. A negation in a nested
    /// `.gitignore` cannot re-include a path an outer scope ignores.
    AnyScope,
    /// The innermost scope with any match (ignore or whitelist) decides.
    Nearest,
}
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectOptions {
    pub root: PathBuf,
    /// Allowed filename suffixes for content collection. `None` or an empty
    /// list disables the filter.
    pub extensions: Option<Vec<String>>,
    /// Directories to skip, relative to `root`.
    pub exclude_dirs: Vec<PathBuf>,
    /// Files to leave out of the content, relative to `root`.
    pub exclude_files: Vec<PathBuf>,
    pub respect_gitignore: bool,
    pub ignore_resolution: IgnoreResolution,
    pub include_hidden: bool,
    pub ignore_patterns: Vec<String>,
    pub file_size_limit: Option<u64>,
    pub binary_detection: BinaryDetection,
}
impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            extensions: None,
            exclude_dirs: Vec::new(),
            exclude_files: Vec::new(),
            respect_gitignore: true,
            ignore_resolution: IgnoreResolution::AnyScope,
            include_hidden: false,
            ignore_patterns: Vec::new(),
            file_size_limit: None,
            binary_detection: BinaryDetection::None,
        }
    }
}
impl CollectOptions {
    /// Loads options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CollectError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| CollectError::io(path, e))?;
        serde_json::from_str(&raw).map_err(|source| CollectError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
#[derive(Debug, Default)]
pub struct CollectBuilder {
    options: CollectOptions,
}
impl CollectBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: CollectOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn from_options(options: CollectOptions) -> Self {
        Self { options }
    }
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.options.root = root.into();
        self
    }
    pub fn extensions(mut self, extensions: Option<Vec<String>>) -> Self {
        self.options.extensions = extensions;
        self
    }
    pub fn exclude_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.options.exclude_dirs = dirs;
        self
    }
    pub fn exclude_files(mut self, files: Vec<PathBuf>) -> Self {
        self.options.exclude_files = files;
        self
    }
    pub fn respect_gitignore(mut self, yes: bool) -> Self {
        self.options.respect_gitignore = yes;
        self
    }
    pub fn ignore_resolution(mut self, resolution: IgnoreResolution) -> Self {
        self.options.ignore_resolution = resolution;
        self
    }
    pub fn include_hidden(mut self, yes: bool) -> Self {
        self.options.include_hidden = yes;
        self
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.ignore_patterns = patterns;
        self
    }
    pub fn file_size_limit(mut self, limit: Option<u64>) -> Self {
        self.options.file_size_limit = limit;
        self
    }
    pub fn binary_detection(mut self, method: BinaryDetection) -> Self {
        self.options.binary_detection = method;
        self
    }
    pub fn build(self) -> CollectOptions {
        self.options
    }
}
