use std::convert::TryFrom;
use std::io::{self, ErrorKind, Read};

use crate::de::{self, RawHeader};
use crate::entry::ArEntry;
use crate::error::ReadError;
use crate::header::{GLOBAL_HEADER, GNU_NAME_TABLE, HEADER_LEN};

const SKIP_BUF_LEN: usize = 4096;

/// Payload bounds of the entry returned by the last `next_entry` call.
#[derive(Debug, Clone, Copy)]
struct EntryBounds {
    start: u64,
    length: u64,
}

/// Forward-only reader for an ar archive.
///
/// [`next_entry`] yields each member's descriptor in turn; between calls,
/// the reader itself is the bounded payload source: `Read` returns the
/// current member's bytes and reports end-of-input at the member's
/// declared length, never running into the next header. Unread payload is
/// skipped automatically on the next [`next_entry`] call.
///
/// The GNU `//` extended-name table is consumed internally and never
/// surfaced; names referencing it come back resolved.
///
/// [`next_entry`]: ArReader::next_entry
#[derive(Debug)]
pub struct ArReader<R: Read> {
    input: R,
    offset: u64,
    current: Option<EntryBounds>,
    name_table: Option<Vec<u8>>,
}

impl<R: Read> ArReader<R> {
    pub fn new(input: R) -> ArReader<R> {
        ArReader {
            input,
            offset: 0,
            current: None,
            name_table: None,
        }
    }

    /// Advances to the next member and returns its descriptor, or `None`
    /// at the end of the archive.
    ///
    /// The first call validates the global magic. Any malformed input is
    /// fatal: after an error the stream position is undefined and the
    /// reader must be discarded.
    pub fn next_entry(&mut self) -> Result<Option<ArEntry>, ReadError> {
        if let Some(current) = self.current.take() {
            let end = current.start + current.length;
            self.skip(end - self.offset)?;
        }

        if self.offset == 0 {
            let mut magic = [0u8; 8];
            if self.fill(&mut magic)? < magic.len() {
                return Err(ReadError::UnexpectedEof { offset: self.offset });
            }
            if &magic != GLOBAL_HEADER {
                return Err(ReadError::InvalidMagic);
            }
            tracing::trace!("validated archive magic");
        }

        loop {
            // Entries are 2-byte aligned. Hitting end-of-input on the pad
            // byte, or before any header byte, ends the archive cleanly.
            if self.offset % 2 != 0 {
                let mut pad = [0u8; 1];
                if self.fill(&mut pad)? == 0 {
                    return Ok(None);
                }
            }

            let mut block = [0u8; HEADER_LEN];
            let filled = self.fill(&mut block)?;
            if filled == 0 {
                return Ok(None);
            }
            if filled < HEADER_LEN {
                return Err(ReadError::UnexpectedEof { offset: self.offset });
            }

            let header_start = self.offset - HEADER_LEN as u64;
            let header = RawHeader::new(&block, header_start)?;
            let raw_name = header.name()?;

            if raw_name == GNU_NAME_TABLE {
                let len = header.size()?;
                self.read_name_table(len)?;
                continue;
            }

            let mut length = header.size()?;
            let mut name = raw_name.to_string();
            if raw_name.ends_with('/') {
                // GNU terminator convention for short names.
                name.truncate(name.len() - 1);
            } else if let Some(table_offset) = de::gnu_longname_offset(raw_name) {
                name = match &self.name_table {
                    Some(table) => de::extended_name(table, table_offset)?,
                    None => {
                        return Err(ReadError::MissingNameTable {
                            offset: table_offset,
                        })
                    }
                };
            } else if let Some(name_len) = de::bsd_longname_len(raw_name) {
                // The inline name precedes the payload and is counted in
                // the declared size.
                name = self.read_bsd_name(name_len)?;
                length = length
                    .checked_sub(name_len)
                    .ok_or_else(|| ReadError::InvalidField {
                        field: "size",
                        value: length.to_string(),
                    })?;
            }

            let entry = ArEntry::with_metadata(
                name,
                length,
                header.user_id()?,
                header.group_id()?,
                header.mode()?,
                header.last_modified()?,
            );
            tracing::debug!(name = %entry.name(), length, offset = self.offset, "read entry header");
            self.current = Some(EntryBounds {
                start: self.offset,
                length,
            });
            return Ok(Some(entry));
        }
    }

    /// Releases the underlying byte source.
    pub fn into_inner(self) -> R {
        self.input
    }

    fn read_name_table(&mut self, len: u64) -> Result<(), ReadError> {
        let len = usize::try_from(len).map_err(|_| ReadError::InvalidField {
            field: "size",
            value: len.to_string(),
        })?;
        let mut table = vec![0u8; len];
        if self.fill(&mut table)? < len {
            return Err(ReadError::UnexpectedEof {
                offset: self.offset,
            });
        }
        tracing::debug!(len, "loaded GNU extended-name table");
        self.name_table = Some(table);
        Ok(())
    }

    fn read_bsd_name(&mut self, len: u64) -> Result<String, ReadError> {
        let len = usize::try_from(len).map_err(|_| ReadError::InvalidField {
            field: "name",
            value: len.to_string(),
        })?;
        let mut buf = vec![0u8; len];
        if self.fill(&mut buf)? < len {
            return Err(ReadError::UnexpectedEof {
                offset: self.offset,
            });
        }
        String::from_utf8(buf).map_err(|e| ReadError::InvalidField {
            field: "name",
            value: String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }

    /// Reads until `buf` is full or the input ends; returns the number of
    /// bytes actually read.
    fn fill(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.input.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => {
                    filled += n;
                    self.offset += n as u64;
                }
                Err(e) => {
                    if e.kind() == ErrorKind::Interrupted {
                        continue;
                    }
                    return Err(ReadError::Io(e));
                }
            }
        }
        Ok(filled)
    }

    /// Discards exactly `n` bytes; running out of input mid-skip is fatal.
    fn skip(&mut self, mut n: u64) -> Result<(), ReadError> {
        let mut scratch = [0u8; SKIP_BUF_LEN];
        while n > 0 {
            let take = std::cmp::min(n, SKIP_BUF_LEN as u64) as usize;
            match self.input.read(&mut scratch[..take]) {
                Ok(0) => {
                    return Err(ReadError::UnexpectedEof {
                        offset: self.offset,
                    })
                }
                Ok(read) => {
                    self.offset += read as u64;
                    n -= read as u64;
                }
                Err(e) => {
                    if e.kind() == ErrorKind::Interrupted {
                        continue;
                    }
                    return Err(ReadError::Io(e));
                }
            }
        }
        Ok(())
    }
}

impl<R: Read> Read for ArReader<R> {
    /// Reads payload bytes of the current entry. Returns `Ok(0)` once the
    /// entry's declared length has been consumed, or when no entry is
    /// open.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let bounds = match self.current {
            Some(bounds) => bounds,
            None => return Ok(0),
        };
        let end = bounds.start + bounds.length;
        if self.offset >= end || buf.is_empty() {
            return Ok(0);
        }
        let take = std::cmp::min(buf.len() as u64, end - self.offset) as usize;
        let n = self.input.read(&mut buf[..take])?;
        self.offset += n as u64;
        Ok(n)
    }
}
