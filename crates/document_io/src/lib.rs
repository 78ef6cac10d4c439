// crates/document_io/src/lib.rs

//! Reading a whole document into memory and writing it back in one piece.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::Builder;

pub mod encoding;
pub mod store;

pub use encoding::{decode, encode, Encoding};
pub use store::{DocumentStore, FsDocumentStore};

/// Reads the file at `file_path` in full and decodes it with `encoding`.
///
/// # Errors
///
/// Returns an error naming the file if it cannot be read or decoded.
pub fn read_document<P: AsRef<Path>>(file_path: P, encoding: Encoding) -> Result<String> {
    let file_path_ref = file_path.as_ref();
    let bytes = fs::read(file_path_ref)
        .with_context(|| format!("Error reading file {}", file_path_ref.display()))?;
    debug!("Read {} bytes from {}", bytes.len(), file_path_ref.display());
    decode(bytes, encoding)
        .with_context(|| format!("Error decoding {} as {}", file_path_ref.display(), encoding))
}

/// Replaces the file at `file_path` with `text`, or creates it.
///
/// The text is encoded before anything touches the disk, then written to a
/// temporary file in the destination directory and renamed over the
/// destination. A failure at any step leaves the existing file as it was.
/// An existing destination keeps its permissions; a new one gets the usual
/// umask-filtered mode of a freshly created file.
pub fn write_document_atomic<P: AsRef<Path>>(
    file_path: P,
    text: &str,
    encoding: Encoding,
) -> Result<()> {
    let file_path_ref = file_path.as_ref();
    let bytes = encode(text, encoding)
        .with_context(|| format!("Error encoding {} as {}", file_path_ref.display(), encoding))?;

    let dir = match file_path_ref.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let existing_permissions = fs::metadata(file_path_ref).ok().map(|m| m.permissions());
    let mut builder = Builder::new();
    if existing_permissions.is_none() {
        if let Some(permissions) = new_file_permissions() {
            builder.permissions(permissions);
        }
    }
    let mut temp_file = builder
        .tempfile_in(dir)
        .with_context(|| format!("Error creating temporary file in {}", dir.display()))?;
    temp_file
        .write_all(&bytes)
        .and_then(|_| temp_file.as_file().sync_all())
        .with_context(|| format!("Error writing temporary file for {}", file_path_ref.display()))?;

    if let Some(permissions) = existing_permissions {
        fs::set_permissions(temp_file.path(), permissions).with_context(|| {
            format!("Error copying permissions of {}", file_path_ref.display())
        })?;
    }

    temp_file
        .persist(file_path_ref)
        .with_context(|| format!("Error replacing file {}", file_path_ref.display()))?;
    debug!("Wrote {} bytes to {}", bytes.len(), file_path_ref.display());
    Ok(())
}

/// Mode requested for a file that does not exist yet; the OS applies the umask.
#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}
