//! Format-name dispatch.
//!
//! Only the `"ar"` format is recognized. The lookup exists so callers
//! selecting a codec by configuration get a descriptive error for names
//! this crate does not implement, instead of silently mis-parsing.

#[cfg(feature = "reader")]
use std::io::Read;
#[cfg(feature = "writer")]
use std::io::Write;

use crate::error::FormatError;
#[cfg(feature = "reader")]
use crate::stream::reader::ArReader;
#[cfg(feature = "writer")]
use crate::stream::writer::ArWriter;

/// Name identifying the ar archive format.
pub const AR: &str = "ar";

/// Creates a reader for the named archive format over `input`.
#[cfg(feature = "reader")]
pub fn reader<R: Read>(format: &str, input: R) -> Result<ArReader<R>, FormatError> {
    if format.eq_ignore_ascii_case(AR) {
        Ok(ArReader::new(input))
    } else {
        Err(FormatError::UnknownFormat(format.to_string()))
    }
}

/// Creates a writer for the named archive format over `output`.
#[cfg(feature = "writer")]
pub fn writer<W: Write>(format: &str, output: W) -> Result<ArWriter<W>, FormatError> {
    if format.eq_ignore_ascii_case(AR) {
        Ok(ArWriter::new(output))
    } else {
        Err(FormatError::UnknownFormat(format.to_string()))
    }
}
