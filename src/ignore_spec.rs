//! Discovery and matching of per-directory `.gitignore` files.
//!
//! Every `.gitignore` in the tree is compiled into an [`IgnoreSpec`] scoped to
//! the directory that contains it. [`IgnoreSpecs::is_ignored`] then checks a
//! candidate path against every scope that is one of its ancestors.

use crate::error::CollectError;
use crate::options::IgnoreResolution;
use ignore::WalkBuilder;
use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;

/// Name of the per-directory ignore-rule file.
pub const IGNORE_FILE_NAME: &str = ".gitignore";

/// A compiled `.gitignore`, scoped to the directory it was found in.
#[derive(Debug, Clone)]
pub struct IgnoreSpec {
    dir: PathBuf,
    matcher: Gitignore,
}

impl IgnoreSpec {
    /// Compiles the rule lines in `contents` for the scope `dir`.
    ///
    /// Blank lines and `#` comments are dropped. `source` is only used to
    /// attribute errors.
    pub fn compile(
        dir: impl Into<PathBuf>,
        source: &Path,
        contents: &str,
    ) -> Result<Self, CollectError> {
        let dir = dir.into();
        let mut builder = GitignoreBuilder::new(&dir);
        for line in contents.lines() {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            builder
                .add_line(Some(source.to_path_buf()), line)
                .map_err(|e| CollectError::ignore_rule(source, e))?;
        }
        let matcher = builder
            .build()
            .map_err(|e| CollectError::ignore_rule(source, e))?;
        Ok(Self { dir, matcher })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn num_rules(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }

    /// Tests `relative` (a path under this scope) and its parent directories.
    /// The scope directory itself is tested as `.`, without parents.
    fn matched(&self, relative: &Path, is_dir: bool) -> ignore::Match<()> {
        let found = if relative.as_os_str().is_empty() {
            self.matcher.matched(Path::new("."), is_dir)
        } else {
            self.matcher.matched_path_or_any_parents(relative, is_dir)
        };
        match found {
            ignore::Match::None => ignore::Match::None,
            ignore::Match::Ignore(_) => ignore::Match::Ignore(()),
            ignore::Match::Whitelist(_) => ignore::Match::Whitelist(()),
        }
    }
}

/// All ignore specs of a tree, keyed by their normalized scope directory.
#[derive(Debug, Clone)]
pub struct IgnoreSpecs {
    specs: BTreeMap<PathBuf, IgnoreSpec>,
    resolution: IgnoreResolution,
}

impl IgnoreSpecs {
    pub fn empty(resolution: IgnoreResolution) -> Self {
        Self {
            specs: BTreeMap::new(),
            resolution,
        }
    }

    /// Walks the whole tree under `root` and compiles every `.gitignore`.
    ///
    /// The walk does not prune anything, so ignore files inside hidden or
    /// excluded directories are loaded too. A `.gitignore` that cannot be
    /// read or compiled aborts the load.
    pub fn load(root: &Path, resolution: IgnoreResolution) -> Result<Self, CollectError> {
        let mut specs = Self::empty(resolution);
        let walker = WalkBuilder::new(root)
            .standard_filters(false)
            .follow_links(false)
            .build();
        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(_e) => {
                    #[cfg(feature = "logging")]
                    tracing::warn!("Skipping unreadable entry while loading ignore files: {}", _e);
                    continue;
                }
            };
            if entry.file_name() != IGNORE_FILE_NAME || !entry.path().is_file() {
                continue;
            }
            let Some(dir) = entry.path().parent() else {
                continue;
            };
            let contents =
                fs::read_to_string(entry.path()).map_err(|e| CollectError::io(entry.path(), e))?;
            let spec = IgnoreSpec::compile(dir, entry.path(), &contents)?;
            #[cfg(feature = "logging")]
            tracing::debug!(
                "Loaded {} ignore rules from {}",
                spec.num_rules(),
                entry.path().display()
            );
            specs.insert(spec);
        }
        Ok(specs)
    }

    /// Adds a spec, replacing any previous spec for the same directory.
    pub fn insert(&mut self, spec: IgnoreSpec) {
        self.specs.insert(spec.dir.clone(), spec);
    }

    pub fn get(&self, dir: &Path) -> Option<&IgnoreSpec> {
        self.specs.get(dir)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Returns whether `path` is ignored by the scopes above it.
    ///
    /// `path` must be absolute and normalized the same way as the scope
    /// directories. A scope also applies to its own directory, so a
    /// `.gitignore` holding `*` hides the directory that contains it.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        match self.resolution {
            IgnoreResolution::AnyScope => self
                .scopes_for(path)
                .any(|(relative, spec)| spec.matched(relative, is_dir).is_ignore()),
            IgnoreResolution::Nearest => {
                for (relative, spec) in self.scopes_for(path).rev() {
                    match spec.matched(relative, is_dir) {
                        ignore::Match::None => continue,
                        decided => return decided.is_ignore(),
                    }
                }
                false
            }
        }
    }

    /// Scopes containing `path` (itself included), outermost first, with
    /// `path` made relative to each.
    fn scopes_for<'a>(
        &'a self,
        path: &'a Path,
    ) -> impl DoubleEndedIterator<Item = (&'a Path, &'a IgnoreSpec)> + 'a {
        self.specs
            .iter()
            .filter_map(move |(dir, spec)| Some((path.strip_prefix(dir).ok()?, spec)))
    }
}
