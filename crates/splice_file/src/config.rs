// crates/splice_file/src/config.rs

use document_io::Encoding;
use std::path::{Path, PathBuf};

/// Everything one splice run needs, resolved from the command line.
#[derive(Clone, Debug)]
pub struct SpliceConfig {
    /// Document to read.
    pub path: PathBuf,
    /// Where to write the result; `None` overwrites `path`.
    pub output: Option<PathBuf>,
    pub start_marker: String,
    pub end_marker: String,
    pub replacement: String,
    pub encoding: Encoding,
    /// Compute the result without writing anything.
    pub dry_run: bool,
}

impl SpliceConfig {
    pub fn new(
        path: impl Into<PathBuf>,
        start_marker: impl Into<String>,
        end_marker: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            output: None,
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
            replacement: replacement.into(),
            encoding: Encoding::default(),
            dry_run: false,
        }
    }

    pub fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.path)
    }
}
