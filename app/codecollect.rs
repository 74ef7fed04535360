//! Command-line interface for codecollect.
//!
//! Collects a directory tree into `codebases/<out>` next to the requested
//! output path: a title, the filtered tree and the normalized text of every
//! matching file.

use clap::Parser;
use codecollect::{
    BinaryDetection, CollectBuilder, CollectError, CollectOptions, IgnoreResolution, collect,
    output,
};
use std::collections::HashSet;
use std::hash::Hash;
use std::path::PathBuf;
use std::process::exit;

/// codecollect: gather a codebase into a single Markdown document
#[derive(Parser)]
#[command(name = "codecollect", version, about, long_about = None)]
struct Cli {
    /// Root directory of the codebase to collect
    root: PathBuf,

    /// Output file name (default `<root-name>.md`), written under a `codebases` directory beside it
    out: Option<PathBuf>,

    /// Include only files whose name ends with one of these extensions
    #[arg(long, num_args = 0..)]
    ext: Option<Vec<String>>,

    /// Directories to skip, relative to the root
    #[arg(long, num_args = 0..)]
    exclude: Option<Vec<PathBuf>>,

    /// Files to leave out of the content, relative to the root
    #[arg(long = "exclude_files", visible_alias = "exclude-files", num_args = 0..)]
    exclude_files: Option<Vec<PathBuf>>,

    /// JSON file with default options; flags extend or override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra ignore globs matched against root-relative paths (can be repeated)
    #[arg(short = 'I', long = "ignore")]
    ignore_patterns: Vec<String>,

    /// Files larger than this many bytes are left out of the content
    #[arg(long)]
    file_size_limit: Option<u64>,

    /// Binary detection strategy applied before decoding
    #[arg(long, value_parser = parse_binary_detection)]
    binary_detection: Option<BinaryDetection>,

    /// Descend into hidden directories
    #[arg(long)]
    hidden: bool,

    /// Disable .gitignore handling
    #[arg(long)]
    no_gitignore: bool,

    /// Let the innermost matching .gitignore decide, as git does
    #[arg(long)]
    nearest_ignore: bool,
}

/// Parse string into BinaryDetection enum.
fn parse_binary_detection(s: &str) -> Result<BinaryDetection, String> {
    match s {
        "simple" => Ok(BinaryDetection::Simple),
        "accurate" => Ok(BinaryDetection::Accurate),
        "none" => Ok(BinaryDetection::None),
        _ => Err(format!("invalid binary detection method: {}", s)),
    }
}

/// Appends `cli` to `base`, dropping later duplicates.
fn merge_vecs<T: Clone + Eq + Hash>(base: Vec<T>, cli: Option<Vec<T>>) -> Vec<T> {
    let mut combined = base;
    combined.extend(cli.unwrap_or_default());
    let mut seen = HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

impl Cli {
    fn into_options(self) -> Result<(CollectOptions, Option<PathBuf>), CollectError> {
        let base = match &self.config {
            Some(path) => CollectOptions::from_json_file(path)?,
            None => CollectOptions::default(),
        };

        let extensions = match (base.extensions.clone(), self.ext) {
            (None, None) => None,
            (base_exts, cli_exts) => Some(merge_vecs(base_exts.unwrap_or_default(), cli_exts)),
        };
        let resolution = if self.nearest_ignore {
            IgnoreResolution::Nearest
        } else {
            base.ignore_resolution
        };

        let builder = CollectBuilder::from_options(base.clone())
            .root(self.root)
            .extensions(extensions)
            .exclude_dirs(merge_vecs(base.exclude_dirs, self.exclude))
            .exclude_files(merge_vecs(base.exclude_files, self.exclude_files))
            .ignore_patterns(merge_vecs(base.ignore_patterns, Some(self.ignore_patterns)))
            .respect_gitignore(base.respect_gitignore && !self.no_gitignore)
            .include_hidden(base.include_hidden || self.hidden)
            .ignore_resolution(resolution)
            .file_size_limit(self.file_size_limit.or(base.file_size_limit))
            .binary_detection(self.binary_detection.unwrap_or(base.binary_detection));

        Ok((builder.build(), self.out))
    }
}

#[cfg(feature = "logging")]
fn init_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}

fn main() {
    #[cfg(feature = "logging")]
    init_logging();

    let cli = Cli::parse();
    let (options, out) = match cli.into_options() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if let Err(e) = run(options, out) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(options: CollectOptions, out: Option<PathBuf>) -> Result<(), CollectError> {
    let result = collect(options)?;
    let _written = output::write_document(&result, out.as_deref())?;
    #[cfg(feature = "logging")]
    tracing::info!(
        "Wrote {} files from {} to {}",
        result.files.len(),
        result.root_name,
        _written.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn options_from(args: &[&str]) -> CollectOptions {
        let cli = Cli::try_parse_from(args).unwrap();
        cli.into_options().unwrap().0
    }

    #[test]
    fn test_exclude_lists_merge_with_config_in_order() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("collect.json");
        fs::write(&config, r#"{"exclude_dirs": ["target", "vendor"]}"#).unwrap();
        let config = config.to_str().unwrap();
        let options = options_from(&[
            "codecollect", "proj", "--config", config, "--exclude", "vendor", "build", "target",
        ]);
        assert_eq!(
            options.exclude_dirs,
            vec![
                PathBuf::from("target"),
                PathBuf::from("vendor"),
                PathBuf::from("build"),
            ]
        );
        assert_eq!(options.root, PathBuf::from("proj"));
    }

    #[test]
    fn test_bare_ext_flag_disables_filter() {
        let options = options_from(&["codecollect", "proj", "--ext"]);
        assert_eq!(options.extensions, Some(Vec::new()));
        let untouched = options_from(&["codecollect", "proj"]);
        assert_eq!(untouched.extensions, None);
    }

    #[test]
    fn test_flags_override_config_scalars() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("collect.json");
        fs::write(
            &config,
            r#"{"ignore_resolution": "any_scope", "binary_detection": "accurate", "file_size_limit": 10}"#,
        )
        .unwrap();
        let config = config.to_str().unwrap();
        let from_config = options_from(&["codecollect", "proj", "--config", config]);
        assert_eq!(from_config.ignore_resolution, IgnoreResolution::AnyScope);
        assert_eq!(from_config.binary_detection, BinaryDetection::Accurate);
        assert_eq!(from_config.file_size_limit, Some(10));
        let overridden = options_from(&[
            "codecollect",
            "proj",
            "--config",
            config,
            "--nearest-ignore",
            "--binary-detection",
            "simple",
            "--file-size-limit",
            "99",
        ]);
        assert_eq!(overridden.ignore_resolution, IgnoreResolution::Nearest);
        assert_eq!(overridden.binary_detection, BinaryDetection::Simple);
        assert_eq!(overridden.file_size_limit, Some(99));
    }

    #[test]
    fn test_exclude_files_spellings_match() {
        let underscore = options_from(&["codecollect", "proj", "--exclude_files", "a.rs", "b.rs"]);
        let dashed = options_from(&["codecollect", "proj", "--exclude-files", "a.rs", "b.rs"]);
        assert_eq!(underscore.exclude_files, dashed.exclude_files);
        assert_eq!(
            dashed.exclude_files,
            vec![PathBuf::from("a.rs"), PathBuf::from("b.rs")]
        );
    }

    #[test]
    fn test_invalid_binary_detection_is_rejected() {
        assert!(Cli::try_parse_from(["codecollect", "proj", "--binary-detection", "magic"]).is_err());
    }
}
