use crate::error::ReadError;
use crate::header::{
    BSD_LONGNAME_PREFIX, ENTRY_TRAILER, GID_OFFSET, HEADER_LEN, ID_LEN, MODE_LEN, MODE_OFFSET,
    MTIME_LEN, MTIME_OFFSET, NAME_LEN, NAME_OFFSET, SIZE_LEN, SIZE_OFFSET, TRAILER_OFFSET,
    UID_OFFSET,
};

/// A fixed 60-byte entry header, validated but not yet decoded.
///
/// Fields are parsed on access. The `//` name-table pseudo-entry leaves
/// every field except the size blank, so eager decoding would reject
/// archives that are perfectly well-formed.
pub(crate) struct RawHeader<'a> {
    block: &'a [u8; HEADER_LEN],
}

impl<'a> RawHeader<'a> {
    /// Wraps a header block read at stream offset `offset`, checking the
    /// 2-byte trailer.
    pub(crate) fn new(block: &'a [u8; HEADER_LEN], offset: u64) -> Result<RawHeader<'a>, ReadError> {
        if &block[TRAILER_OFFSET..] != ENTRY_TRAILER {
            return Err(ReadError::InvalidTrailer {
                offset: offset + TRAILER_OFFSET as u64,
            });
        }
        Ok(RawHeader { block })
    }

    /// The name field, trimmed of surrounding whitespace but otherwise
    /// verbatim. Long-name markers are still present.
    pub(crate) fn name(&self) -> Result<&'a str, ReadError> {
        trimmed(&self.block[NAME_OFFSET..NAME_OFFSET + NAME_LEN], "name")
    }

    pub(crate) fn last_modified(&self) -> Result<u64, ReadError> {
        parse_u64(
            &self.block[MTIME_OFFSET..MTIME_OFFSET + MTIME_LEN],
            "last modified",
            10,
            false,
        )
    }

    pub(crate) fn user_id(&self) -> Result<u32, ReadError> {
        parse_u32(&self.block[UID_OFFSET..UID_OFFSET + ID_LEN], "user id", 10, true)
    }

    pub(crate) fn group_id(&self) -> Result<u32, ReadError> {
        parse_u32(&self.block[GID_OFFSET..GID_OFFSET + ID_LEN], "group id", 10, true)
    }

    pub(crate) fn mode(&self) -> Result<u32, ReadError> {
        parse_u32(&self.block[MODE_OFFSET..MODE_OFFSET + MODE_LEN], "file mode", 8, false)
    }

    pub(crate) fn size(&self) -> Result<u64, ReadError> {
        parse_u64(&self.block[SIZE_OFFSET..SIZE_OFFSET + SIZE_LEN], "size", 10, false)
    }
}

/// Offset carried by a GNU long-name reference, `/` followed by decimal
/// digits spanning the whole trimmed field.
pub(crate) fn gnu_longname_offset(name: &str) -> Option<u64> {
    name.strip_prefix('/').and_then(parse_all_digits)
}

/// Name length carried by a BSD long-name marker, `#1/` followed by
/// decimal digits spanning the whole trimmed field.
pub(crate) fn bsd_longname_len(name: &str) -> Option<u64> {
    name.strip_prefix(BSD_LONGNAME_PREFIX).and_then(parse_all_digits)
}

/// Resolves a name from the GNU extended-name table.
///
/// Names are newline-terminated; a `/` immediately before the newline is
/// part of the encoding, not the name, and is dropped.
pub(crate) fn extended_name(table: &[u8], offset: u64) -> Result<String, ReadError> {
    let start = offset as usize;
    if start >= table.len() {
        return Err(ReadError::UnterminatedName { offset });
    }
    for i in start..table.len() {
        if table[i] == b'\n' {
            let mut end = i;
            if end > start && table[end - 1] == b'/' {
                end -= 1;
            }
            let name = std::str::from_utf8(&table[start..end]).map_err(|_| {
                ReadError::InvalidField {
                    field: "name",
                    value: String::from_utf8_lossy(&table[start..end]).into_owned(),
                }
            })?;
            return Ok(name.to_string());
        }
    }
    Err(ReadError::UnterminatedName { offset })
}

fn trimmed<'a>(bytes: &'a [u8], field: &'static str) -> Result<&'a str, ReadError> {
    let s = std::str::from_utf8(bytes).map_err(|_| ReadError::InvalidField {
        field,
        value: String::from_utf8_lossy(bytes).into_owned(),
    })?;
    Ok(s.trim())
}

fn parse_u64(
    bytes: &[u8],
    field: &'static str,
    radix: u32,
    blank_is_zero: bool,
) -> Result<u64, ReadError> {
    let s = trimmed(bytes, field)?;
    if s.is_empty() && blank_is_zero {
        return Ok(0);
    }
    u64::from_str_radix(s, radix).map_err(|_| ReadError::InvalidField {
        field,
        value: s.to_string(),
    })
}

fn parse_u32(
    bytes: &[u8],
    field: &'static str,
    radix: u32,
    blank_is_zero: bool,
) -> Result<u32, ReadError> {
    let s = trimmed(bytes, field)?;
    if s.is_empty() && blank_is_zero {
        return Ok(0);
    }
    u32::from_str_radix(s, radix).map_err(|_| ReadError::InvalidField {
        field,
        value: s.to_string(),
    })
}

fn parse_all_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
