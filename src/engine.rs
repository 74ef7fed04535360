use crate::error::CollectError;
use crate::exclusion::ExclusionConfig;
use crate::ignore_spec::IgnoreSpecs;
use crate::options::{BinaryDetection, CollectOptions};
use crate::tree::{TreeNode, WalkedEntry, build_tree};
use crate::types::{CollectResult, FileEntry};
use ignore::WalkBuilder;
use path_clean::PathClean;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
#[cfg(feature = "logging")]
use tracing;
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(
        root: &Path,
        options: &CollectOptions,
        specs: Arc<IgnoreSpecs>,
        exclusions: Arc<ExclusionConfig>,
    ) -> Result<Self, CollectError> {
        let mut builder = WalkBuilder::new(root);
        builder.standard_filters(false).follow_links(false);
        let matcher = if !options.ignore_patterns.is_empty() {
            let mut glob_builder = globset::GlobSetBuilder::new();
            for pattern in &options.ignore_patterns {
                let glob = globset::Glob::new(pattern).map_err(|e| {
                    CollectError::Walk(format!("Invalid glob pattern '{}': {}", pattern, e))
                })?;
                glob_builder.add(glob);
            }
            Some(
                glob_builder
                    .build()
                    .map_err(|e| CollectError::Walk(format!("Failed to build glob set: {}", e)))?,
            )
        } else {
            None
        };
        let include_hidden = options.include_hidden;
        let scope_root = root.to_path_buf();
        builder.filter_entry(move |entry| {
            let path = entry.path();
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if is_dir {
                if !include_hidden && is_hidden(&entry.file_name().to_string_lossy()) {
                    return false;
                }
                if exclusions.is_excluded_dir(path) {
                    return false;
                }
            }
            if let Some(ref matcher) = matcher {
                if let Ok(relative) = path.strip_prefix(&scope_root) {
                    if matcher.is_match(relative) {
                        return false;
                    }
                }
            }
            !specs.is_ignored(path, is_dir)
        });
        Ok(Self {
            inner: builder.build(),
        })
    }
    /// Surviving entries below the root. Unreadable entries are skipped.
    fn collect_entries(self) -> Vec<WalkedEntry> {
        self.inner
            .filter_map(|result| match result {
                Ok(entry) if entry.depth() == 0 => None,
                Ok(entry) => {
                    let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                    if !is_dir && !entry.path().is_file() {
                        return None;
                    }
                    Some(WalkedEntry {
                        path: entry.into_path(),
                        is_dir,
                    })
                }
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("Skipping unreadable entry: {}", _e);
                    None
                }
            })
            .collect()
    }
}
fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}
/// Makes `root` absolute and lexically normalized, and checks it is a directory.
pub fn resolve_root(root: &Path) -> Result<PathBuf, CollectError> {
    let absolute = std::path::absolute(root)
        .map_err(|e| CollectError::io(root, e))?
        .clean();
    if !absolute.is_dir() {
        return Err(CollectError::InvalidPath(format!(
            "{} is not a directory",
            absolute.display()
        )));
    }
    Ok(absolute)
}
/// Base name of a resolved root, or the whole path for a filesystem root.
pub fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
/// Drops blank lines and trims trailing whitespace from the rest.
///
/// `\n`, `\r\n` and a lone `\r` all end a line.
pub fn normalize_content(raw: &str) -> String {
    raw.split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
/// Reads a file as UTF-8 text. Any failure yields `None`.
fn read_file_content(
    path: &Path,
    binary_detection: BinaryDetection,
    size_limit: Option<u64>,
) -> Option<String> {
    if let Some(limit) = size_limit {
        let metadata = fs::metadata(path).ok()?;
        if metadata.len() > limit {
            #[cfg(feature = "logging")]
            tracing::debug!(
                "File too large ({} > {}), skipping {}",
                metadata.len(),
                limit,
                path.display()
            );
            return None;
        }
    }
    let file = File::open(path).ok()?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::with_capacity(4096);
    reader.by_ref().take(4096).read_to_end(&mut bytes).ok()?;
    let is_binary = match binary_detection {
        BinaryDetection::Simple => bytes.contains(&0),
        BinaryDetection::Accurate => content_inspector::inspect(&bytes).is_binary(),
        BinaryDetection::None => false,
    };
    if is_binary {
        #[cfg(feature = "logging")]
        tracing::debug!("Binary file detected: {}", path.display());
        return None;
    }
    reader.read_to_end(&mut bytes).ok()?;
    match String::from_utf8(bytes) {
        Ok(text) => Some(text),
        Err(_) => {
            #[cfg(feature = "logging")]
            tracing::debug!("Not valid UTF-8, skipping {}", path.display());
            None
        }
    }
}
fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
fn process_file(root: &Path, path: &Path, options: &CollectOptions) -> Option<FileEntry> {
    let raw = read_file_content(path, options.binary_detection, options.file_size_limit)?;
    let content = normalize_content(&raw);
    if content.is_empty() {
        return None;
    }
    Some(FileEntry {
        path: path.to_path_buf(),
        relative_path: relative_display(root, path),
        content,
    })
}
/// Walks the tree under `options.root` once, then renders the tree and
/// collects the content of every retained file.
pub fn collect(options: CollectOptions) -> Result<CollectResult, CollectError> {
    let root = resolve_root(&options.root)?;
    let root_name = root_name(&root);
    #[cfg(feature = "logging")]
    tracing::debug!("Collecting {} ({})", root_name, root.display());
    let specs = if options.respect_gitignore {
        IgnoreSpecs::load(&root, options.ignore_resolution)?
    } else {
        IgnoreSpecs::empty(options.ignore_resolution)
    };
    let exclusions = ExclusionConfig::resolve(
        &root,
        &options.exclude_dirs,
        &options.exclude_files,
        options.extensions.as_deref(),
    );
    let tree = build_filtered_tree(&root, &root_name, &options, specs, exclusions.clone())?;
    let candidates: Vec<PathBuf> = match &tree {
        Some(tree) => tree
            .files()
            .into_iter()
            .filter(|path| !exclusions.is_excluded_file(path))
            .filter(|path| {
                path.file_name()
                    .is_some_and(|name| exclusions.allows_name(&name.to_string_lossy()))
            })
            .map(Path::to_path_buf)
            .collect(),
        None => Vec::new(),
    };
    #[cfg(not(feature = "parallel"))]
    let files = process_files(&root, &candidates, &options);
    #[cfg(feature = "parallel")]
    let files = process_files_parallel(&root, &candidates, &options);
    Ok(CollectResult {
        root_name,
        tree: tree.map(|t| t.render()).unwrap_or_default(),
        files,
    })
}
/// `None` when the root itself is excluded or ignored.
fn build_filtered_tree(
    root: &Path,
    root_name: &str,
    options: &CollectOptions,
    specs: IgnoreSpecs,
    exclusions: ExclusionConfig,
) -> Result<Option<TreeNode>, CollectError> {
    if exclusions.is_excluded_dir(root) || specs.is_ignored(root, true) {
        return Ok(None);
    }
    let walker = Walker::new(root, options, Arc::new(specs), Arc::new(exclusions))?;
    let entries = walker.collect_entries();
    Ok(Some(build_tree(root, root_name, &entries)))
}
#[cfg(not(feature = "parallel"))]
fn process_files(root: &Path, paths: &[PathBuf], options: &CollectOptions) -> Vec<FileEntry> {
    paths
        .iter()
        .filter_map(|path| process_file(root, path, options))
        .collect()
}
#[cfg(feature = "parallel")]
fn process_files_parallel(
    root: &Path,
    paths: &[PathBuf],
    options: &CollectOptions,
) -> Vec<FileEntry> {
    paths
        .par_iter()
        .filter_map(|path| process_file(root, path, options))
        .collect()
}
