//! Output document formatting and placement.
//!
//! The document is a Markdown title, the rendered tree in a fenced block, and
//! one `// <relative-path>` section per collected file. It is always written
//! under a `codebases` directory next to the requested output path.

use crate::{CollectError, CollectResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory the document is placed in, beside the requested output path.
pub const OUTPUT_DIR: &str = "codebases";

/// Formats the collection result into the output document.
pub fn format_document(result: &CollectResult) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&format!("# {}\n\n```\n{}\n```\n\n", result.root_name, result.tree));
    for file in &result.files {
        out.push_str(&format!("// {}\n{}\n\n", file.relative_path, file.content));
    }
    out
}

/// Resolves where the document goes.
///
/// `requested` defaults to `<root_name>.md`. Only its base name is kept, and
/// it is placed in [`OUTPUT_DIR`] inside the requested path's parent.
pub fn resolve_output_path(
    requested: Option<&Path>,
    root_name: &str,
) -> Result<PathBuf, CollectError> {
    let requested = match requested {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("{}.md", root_name)),
    };
    let file_name = requested.file_name().ok_or_else(|| {
        CollectError::InvalidPath(format!(
            "output path {} has no file name",
            requested.display()
        ))
    })?;
    let parent = requested.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(OUTPUT_DIR).join(file_name))
}

/// Writes the document and returns the path it was written to.
pub fn write_document(
    result: &CollectResult,
    requested: Option<&Path>,
) -> Result<PathBuf, CollectError> {
    let path = resolve_output_path(requested, &result.root_name)?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| CollectError::io(dir, e))?;
    }
    fs::write(&path, format_document(result)).map_err(|e| CollectError::io(&path, e))?;
    Ok(path)
}
