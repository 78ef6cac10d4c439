// crates/splice_file/src/lib.rs

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;

use document_io::{DocumentStore, FsDocumentStore};
use span_replacer::{locate_span, MarkerNotFound, Span};

pub mod config;

pub use config::SpliceConfig;

/// What a successful splice did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpliceOutcome {
    /// Byte range of the original document that was replaced.
    pub span: Span,
    pub original_len: usize,
    pub new_len: usize,
    pub destination: PathBuf,
    /// Whether `text` was stored at `destination`.
    pub written: bool,
    /// The transformed document.
    pub text: String,
}

/// Loads the configured document from `store`, replaces the marker span and
/// stores the result, unless `dry_run` is set.
///
/// Nothing is stored when either marker is missing. The returned error then
/// names the document and wraps a [`MarkerNotFound`].
pub fn splice_file_with_store(
    store: &dyn DocumentStore,
    config: &SpliceConfig,
) -> Result<SpliceOutcome> {
    let document = store.load(&config.path)?;

    let span = locate_span(&document, &config.start_marker, &config.end_marker)
        .with_context(|| format!("Failed to splice {}", config.path.display()))?;
    debug!(
        "Located span {}..{} ({} bytes) in {}",
        span.start,
        span.end,
        span.len(),
        config.path.display()
    );

    let text = span.apply(&document, &config.replacement);
    let destination = config.destination().to_path_buf();

    if config.dry_run {
        info!("Dry run: not writing {}", destination.display());
    } else {
        store.store(&destination, &text)?;
        info!("Wrote {} bytes to {}", text.len(), destination.display());
    }

    Ok(SpliceOutcome {
        span,
        original_len: document.len(),
        new_len: text.len(),
        destination,
        written: !config.dry_run,
        text,
    })
}

/// Splices the configured document on the local filesystem.
pub fn splice_file(config: &SpliceConfig) -> Result<SpliceOutcome> {
    splice_file_with_store(&FsDocumentStore::new(config.encoding), config)
}

/// Whether `err` was caused by a missing marker rather than by I/O.
pub fn is_marker_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| cause.is::<MarkerNotFound>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    /// Keeps documents in memory and records every store call.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        stores: RefCell<Vec<PathBuf>>,
    }

    impl MemoryStore {
        fn with_file(path: &str, text: &str) -> Self {
            let store = Self::default();
            store
                .files
                .borrow_mut()
                .insert(PathBuf::from(path), text.to_string());
            store
        }

        fn get(&self, path: &str) -> Option<String> {
            self.files.borrow().get(Path::new(path)).cloned()
        }
    }

    impl DocumentStore for MemoryStore {
        fn load(&self, path: &Path) -> Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow!("Error reading file {}", path.display()))
        }

        fn store(&self, path: &Path, text: &str) -> Result<()> {
            self.stores.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), text.to_string());
            Ok(())
        }
    }

    /// Dummy store whose writes always fail.
    struct ReadOnlyStore(MemoryStore);

    impl DocumentStore for ReadOnlyStore {
        fn load(&self, path: &Path) -> Result<String> {
            self.0.load(path)
        }

        fn store(&self, path: &Path, _text: &str) -> Result<()> {
            Err(anyhow!("Simulated write failure for {}", path.display()))
        }
    }

    #[test]
    fn test_splice_overwrites_source() {
        let store = MemoryStore::with_file("doc.txt", "ABCstartXYZendDEF");
        let config = SpliceConfig::new("doc.txt", "start", "end", "R");

        let outcome = splice_file_with_store(&store, &config).unwrap();

        assert_eq!(outcome.span, Span { start: 3, end: 11 });
        assert_eq!(outcome.original_len, 17);
        assert_eq!(outcome.new_len, 10);
        assert!(outcome.written);
        assert_eq!(outcome.destination, PathBuf::from("doc.txt"));
        assert_eq!(store.get("doc.txt").unwrap(), "ABCRendDEF");
        assert_eq!(*store.stores.borrow(), vec![PathBuf::from("doc.txt")]);
    }

    #[test]
    fn test_splice_to_separate_output() {
        let store = MemoryStore::with_file("in.txt", "headermarkerAmarkerBtail");
        let mut config = SpliceConfig::new("in.txt", "markerA", "markerB", "");
        config.output = Some(PathBuf::from("out.txt"));

        splice_file_with_store(&store, &config).unwrap();

        assert_eq!(store.get("in.txt").unwrap(), "headermarkerAmarkerBtail");
        assert_eq!(store.get("out.txt").unwrap(), "headermarkerBtail");
    }

    #[test]
    fn test_dry_run_stores_nothing() {
        let store = MemoryStore::with_file("doc.txt", "ABCstartXYZendDEF");
        let mut config = SpliceConfig::new("doc.txt", "start", "end", "R");
        config.dry_run = true;

        let outcome = splice_file_with_store(&store, &config).unwrap();

        assert!(!outcome.written);
        assert_eq!(outcome.text, "ABCRendDEF");
        assert!(store.stores.borrow().is_empty());
        assert_eq!(store.get("doc.txt").unwrap(), "ABCstartXYZendDEF");
    }

    #[test]
    fn test_missing_marker_stores_nothing() {
        let store = MemoryStore::with_file("noMarkers.txt", "noMarkersHere");
        let config = SpliceConfig::new("noMarkers.txt", "X", "Y", "R");

        let err = splice_file_with_store(&store, &config).unwrap_err();

        assert!(is_marker_not_found(&err));
        let message = format!("{:#}", err);
        assert!(message.contains("Failed to splice noMarkers.txt"), "{}", message);
        assert!(message.contains("start marker `X` not found"), "{}", message);
        assert!(store.stores.borrow().is_empty());
    }

    #[test]
    fn test_missing_end_marker_is_marker_error() {
        let store = MemoryStore::with_file("doc.txt", "end before start");
        let config = SpliceConfig::new("doc.txt", "start", "end", "R");

        let err = splice_file_with_store(&store, &config).unwrap_err();

        assert!(is_marker_not_found(&err));
        let cause = err.downcast_ref::<MarkerNotFound>().unwrap();
        assert_eq!(cause.search_from, 11);
    }

    #[test]
    fn test_load_failure_is_not_marker_error() {
        let store = MemoryStore::default();
        let config = SpliceConfig::new("absent.txt", "a", "b", "");

        let err = splice_file_with_store(&store, &config).unwrap_err();

        assert!(!is_marker_not_found(&err));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn test_store_failure_propagates() {
        let store = ReadOnlyStore(MemoryStore::with_file("doc.txt", "ABCstartXYZendDEF"));
        let config = SpliceConfig::new("doc.txt", "start", "end", "R");

        let err = splice_file_with_store(&store, &config).unwrap_err();

        assert!(!is_marker_not_found(&err));
        assert!(err.to_string().contains("Simulated write failure"));
        assert_eq!(store.0.get("doc.txt").unwrap(), "ABCstartXYZendDEF");
    }
}
