// crates/span_replacer/src/lib.rs

//! Literal marker-to-marker span replacement over an in-memory document.

use std::fmt;
use thiserror::Error;

/// Which of the two markers a search was looking for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerRole {
    Start,
    End,
}

impl fmt::Display for MarkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerRole::Start => f.write_str("start"),
            MarkerRole::End => f.write_str("end"),
        }
    }
}

/// The only way a span lookup can fail: one of the markers is missing from
/// the region it was searched in.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("{role} marker `{marker}` not found{}", scan_suffix(.role, .search_from))]
pub struct MarkerNotFound {
    pub role: MarkerRole,
    pub marker: String,
    /// Byte offset the scan started from.
    pub search_from: usize,
}

fn scan_suffix(role: &MarkerRole, search_from: &usize) -> String {
    match role {
        MarkerRole::Start => String::new(),
        MarkerRole::End => format!(" at or after byte {}", search_from),
    }
}

/// Half-open byte range `[start, end)` of a document that a replacement covers.
///
/// Both offsets are produced by `str::find`, so they always sit on `char`
/// boundaries of the document they were located in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Number of bytes the replacement drops from the document.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Builds `document[..start] + replacement + document[end..]`.
    ///
    /// The span must have been located in `document`.
    pub fn apply(&self, document: &str, replacement: &str) -> String {
        let mut output =
            String::with_capacity(replaced_len(document.len(), *self, replacement.len()));
        output.push_str(&document[..self.start]);
        output.push_str(replacement);
        output.push_str(&document[self.end..]);
        output
    }
}

/// Length in bytes of the document produced by replacing `span` with a
/// replacement of `replacement_len` bytes.
pub fn replaced_len(document_len: usize, span: Span, replacement_len: usize) -> usize {
    span.start + replacement_len + (document_len - span.end)
}

/// Finds the span between the first `start_marker` and the first `end_marker`
/// that follows it.
///
/// The end marker is scanned for from the start marker's own position, not
/// from the byte after it. An end marker that overlaps or coincides with the
/// start marker is therefore a valid match, and the resulting span may be
/// empty.
pub fn locate_span(
    document: &str,
    start_marker: &str,
    end_marker: &str,
) -> Result<Span, MarkerNotFound> {
    let start = document.find(start_marker).ok_or_else(|| MarkerNotFound {
        role: MarkerRole::Start,
        marker: start_marker.to_string(),
        search_from: 0,
    })?;
    let end = document[start..]
        .find(end_marker)
        .map(|offset| start + offset)
        .ok_or_else(|| MarkerNotFound {
            role: MarkerRole::End,
            marker: end_marker.to_string(),
            search_from: start,
        })?;
    Ok(Span { start, end })
}

/// Replaces everything from the first `start_marker` up to (not including)
/// the following `end_marker` with `replacement`.
///
/// The start marker itself is consumed, the end marker is kept. `document`
/// is left untouched; on error no partial result is produced.
///
/// # Errors
///
/// Returns [`MarkerNotFound`] when the start marker does not occur, or when
/// the end marker does not occur at or after the start marker's position.
pub fn replace_span(
    document: &str,
    start_marker: &str,
    end_marker: &str,
    replacement: &str,
) -> Result<String, MarkerNotFound> {
    let span = locate_span(document, start_marker, end_marker)?;
    Ok(span.apply(document, replacement))
}
