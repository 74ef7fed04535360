use std::collections::HashSet;
use std::path::{Path, PathBuf};

use path_clean::PathClean;

/// Explicit exclusions resolved to absolute paths, plus the extension
/// allow-list.
#[derive(Debug, Clone, Default)]
pub struct ExclusionConfig {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    extensions: Option<Vec<String>>,
}

impl ExclusionConfig {
    /// Resolves `dirs` and `files` against `root`, which should already be
    /// absolute and clean. Entries that are absolute are kept as given
    /// (cleaned). An empty extension list means no filter.
    pub fn resolve(
        root: &Path,
        dirs: &[PathBuf],
        files: &[PathBuf],
        extensions: Option<&[String]>,
    ) -> Self {
        Self {
            dirs: dirs.iter().map(|d| root.join(d).clean()).collect(),
            files: files.iter().map(|f| root.join(f).clean()).collect(),
            extensions: extensions
                .filter(|exts| !exts.is_empty())
                .map(|exts| exts.to_vec()),
        }
    }

    pub fn is_excluded_dir(&self, path: &Path) -> bool {
        self.dirs.contains(path)
    }

    pub fn is_excluded_file(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    /// Plain suffix test on the file name, so `py` also admits `happy`.
    pub fn allows_name(&self, name: &str) -> bool {
        match &self.extensions {
            Some(exts) => exts.iter().any(|ext| name.ends_with(ext.as_str())),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_entries_resolve_under_root() {
        let cfg = ExclusionConfig::resolve(
            Path::new("/proj"),
            &[PathBuf::from("build/../target")],
            &[PathBuf::from("./src/gen.rs")],
            None,
        );
        assert!(cfg.is_excluded_dir(Path::new("/proj/target")));
        assert!(cfg.is_excluded_file(Path::new("/proj/src/gen.rs")));
        assert!(!cfg.is_excluded_dir(Path::new("/proj/build")));
    }

    #[test]
    fn empty_extension_list_is_no_filter() {
        let cfg = ExclusionConfig::resolve(Path::new("/proj"), &[], &[], Some(&[]));
        assert!(cfg.allows_name("anything.bin"));
    }

    #[test]
    fn extension_is_a_suffix_match() {
        let exts = vec![".py".to_string(), "rs".to_string()];
        let cfg = ExclusionConfig::resolve(Path::new("/proj"), &[], &[], Some(&exts));
        assert!(cfg.allows_name("a.py"));
        assert!(cfg.allows_name("main.rs"));
        assert!(cfg.allows_name("hrs"));
        assert!(!cfg.allows_name("a.pyc"));
    }
}
