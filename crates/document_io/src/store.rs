// crates/document_io/src/store.rs

use anyhow::Result;
use std::path::Path;

use crate::encoding::Encoding;
use crate::{read_document, write_document_atomic};

/// Where documents are loaded from and stored to.
pub trait DocumentStore {
    /// Loads the complete text of the document at `path`.
    fn load(&self, path: &Path) -> Result<String>;

    /// Replaces the document at `path` with `text`, all or nothing.
    fn store(&self, path: &Path, text: &str) -> Result<()>;
}

/// Default implementation of the `DocumentStore` trait, backed by the local
/// filesystem with a fixed encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsDocumentStore {
    pub encoding: Encoding,
}

impl FsDocumentStore {
    pub fn new(encoding: Encoding) -> Self {
        Self { encoding }
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, path: &Path) -> Result<String> {
        read_document(path, self.encoding)
    }

    fn store(&self, path: &Path, text: &str) -> Result<()> {
        write_document_atomic(path, text, self.encoding)
    }
}
