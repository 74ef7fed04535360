//! # codecollect
//!
//! `codecollect` walks a directory tree, applies layered exclusion rules and
//! concatenates the text of the surviving files into one Markdown document,
//! headed by a rendered view of the filtered tree.
//!
//! Exclusion comes from four sources:
//!
//! - every `.gitignore` in the tree, each scoped to its own directory;
//! - explicit directory and file exclusions, relative to the root;
//! - an optional extension allow-list, which only affects collected content;
//! - hidden subdirectories, which are never descended into by default.
//!
//! By default a path is ignored when *any* ancestor `.gitignore` matches it,
//! so a negation in a nested file cannot re-include what an outer file
//! excludes. [`IgnoreResolution::Nearest`] gives git's innermost-first
//! precedence instead.
//!
//! # Features
//!
//! - `logging` (default): emits `tracing` events and lets the binary install a subscriber.
//! - `parallel`: reads and normalizes files with Rayon. Output order is unchanged.
//!
//! # Example
//!
//! ```no_run
//! use codecollect::{CollectBuilder, collect, output};
//!
//! let options = CollectBuilder::new("my-project")
//!     .extensions(Some(vec![".rs".into()]))
//!     .exclude_dirs(vec!["target".into()])
//!     .build();
//!
//! let result = collect(options).expect("Failed to collect");
//! println!("{}", output::format_document(&result));
//! ```

mod engine;
mod error;
mod exclusion;
mod ignore_spec;
mod options;
pub mod output;
mod tree;
mod types;

pub use engine::{collect, normalize_content, resolve_root, root_name};
pub use error::CollectError;
pub use exclusion::ExclusionConfig;
pub use ignore_spec::{IGNORE_FILE_NAME, IgnoreSpec, IgnoreSpecs};
pub use options::{BinaryDetection, CollectBuilder, CollectOptions, IgnoreResolution};
pub use types::{CollectResult, FileEntry};
