// crates/document_io/src/encoding.rs

use anyhow::{bail, Context, Result};
use std::fmt;
use std::str::FromStr;

/// Text encoding used both to read a document and to write it back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Utf8,
    /// ISO-8859-1: every byte is the code point of the same value.
    Latin1,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::Utf8 => f.write_str("utf-8"),
            Encoding::Latin1 => f.write_str("latin-1"),
        }
    }
}

impl FromStr for Encoding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "latin-1" | "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            other => bail!("Unsupported encoding '{}' (expected utf-8 or latin-1)", other),
        }
    }
}

/// Decodes raw file bytes. Invalid UTF-8 is an error, never replaced.
pub fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String> {
    match encoding {
        Encoding::Utf8 => String::from_utf8(bytes).context("Content is not valid utf-8"),
        Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
    }
}

/// Encodes text for writing. Fails on the first character the encoding
/// cannot represent.
pub fn encode(text: &str, encoding: Encoding) -> Result<Vec<u8>> {
    match encoding {
        Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
        Encoding::Latin1 => text
            .char_indices()
            .map(|(offset, c)| {
                u8::try_from(u32::from(c)).map_err(|_| {
                    anyhow::anyhow!(
                        "Character {:?} at byte {} cannot be encoded as {}",
                        c,
                        offset,
                        encoding
                    )
                })
            })
            .collect(),
    }
}
