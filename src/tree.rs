//! In-memory filtered tree and its text rendering.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const INDENT: &str = "    ";

/// A node of the filtered directory tree.
///
/// Directory children hold the files first, then the subdirectories, each
/// group sorted by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TreeNode {
    Dir {
        name: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: PathBuf,
    },
}

impl TreeNode {
    /// Renders the tree with four spaces of indentation per level.
    /// Directories carry a trailing `/`. No trailing newline.
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        self.render_into(0, &mut lines);
        lines.join("\n")
    }

    fn render_into(&self, depth: usize, lines: &mut Vec<String>) {
        let indent = INDENT.repeat(depth);
        match self {
            TreeNode::Dir { name, children, .. } => {
                lines.push(format!("{}{}/", indent, name));
                for child in children {
                    child.render_into(depth + 1, lines);
                }
            }
            TreeNode::File { name, .. } => lines.push(format!("{}{}", indent, name)),
        }
    }

    /// File paths in rendering order.
    pub fn files(&self) -> Vec<&Path> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a Path>) {
        match self {
            TreeNode::Dir { children, .. } => {
                for child in children {
                    child.collect_files(out);
                }
            }
            TreeNode::File { path, .. } => out.push(path),
        }
    }
}

/// A path that survived the filtered walk.
#[derive(Debug, Clone)]
pub(crate) struct WalkedEntry {
    pub path: PathBuf,
    pub is_dir: bool,
}

#[derive(Default)]
struct DirBuilder {
    files: BTreeMap<String, PathBuf>,
    dirs: BTreeMap<String, DirBuilder>,
}

impl DirBuilder {
    fn insert(&mut self, components: &[String], path: &Path, is_dir: bool) {
        let Some((first, rest)) = components.split_first() else {
            return;
        };
        if rest.is_empty() && !is_dir {
            self.files.insert(first.clone(), path.to_path_buf());
            return;
        }
        self.dirs
            .entry(first.clone())
            .or_default()
            .insert(rest, path, is_dir);
    }

    fn into_node(self, name: String, path: PathBuf) -> TreeNode {
        let mut children: Vec<TreeNode> = self
            .files
            .into_iter()
            .map(|(name, path)| TreeNode::File { name, path })
            .collect();
        for (dir_name, dir) in self.dirs {
            let dir_path = path.join(&dir_name);
            children.push(dir.into_node(dir_name, dir_path));
        }
        TreeNode::Dir { name, children }
    }
}

/// Builds the tree rooted at `root` from the entries of a filtered walk.
///
/// Entries outside `root` are dropped. The walk is expected to have pruned
/// excluded directories already, so every directory seen here is kept.
pub(crate) fn build_tree(root: &Path, root_name: &str, entries: &[WalkedEntry]) -> TreeNode {
    let mut top = DirBuilder::default();
    for entry in entries {
        let Ok(relative) = entry.path.strip_prefix(root) else {
            continue;
        };
        let components: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        top.insert(&components, &entry.path, entry.is_dir);
    }
    top.into_node(root_name.to_string(), root.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, is_dir: bool) -> WalkedEntry {
        WalkedEntry {
            path: PathBuf::from(path),
            is_dir,
        }
    }

    #[test]
    fn files_come_before_subdirectories() {
        let entries = vec![
            entry("/r/b", true),
            entry("/r/b/inner.rs", false),
            entry("/r/z.rs", false),
            entry("/r/a", true),
            entry("/r/m.rs", false),
        ];
        let tree = build_tree(Path::new("/r"), "r", &entries);
        assert_eq!(
            tree.render(),
            "r/\n    m.rs\n    z.rs\n    a/\n    b/\n        inner.rs"
        );
        let files: Vec<_> = tree.files().into_iter().map(Path::to_path_buf).collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("/r/m.rs"),
                PathBuf::from("/r/z.rs"),
                PathBuf::from("/r/b/inner.rs"),
            ]
        );
    }

    #[test]
    fn empty_root_renders_only_its_name() {
        let tree = build_tree(Path::new("/r"), "r", &[]);
        assert_eq!(tree.render(), "r/");
        assert!(tree.files().is_empty());
    }
}
