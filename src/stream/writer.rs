use std::io::{self, ErrorKind, Write};

use crate::entry::ArEntry;
use crate::error::WriteError;
use crate::header::{BSD_LONGNAME_PREFIX, GLOBAL_HEADER, NAME_LEN};
use crate::ser;

/// Treatment of entry names that do not fit the fixed 16-byte name field.
///
/// Under [`Error`] any name longer than 16 bytes is rejected at
/// header-write time. Under [`Bsd`] such names, and names containing
/// embedded spaces, are stored with a `#1/<n>` marker in the name field
/// and the literal name inline before the payload. Note that under
/// [`Error`], names with leading or trailing spaces do not survive the
/// reader's field trimming; use [`Bsd`] for those.
///
/// [`Error`]: LongFileMode::Error
/// [`Bsd`]: LongFileMode::Bsd
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum LongFileMode {
    Error,
    Bsd,
}

impl Default for LongFileMode {
    fn default() -> Self {
        LongFileMode::Error
    }
}

/// Append-only writer for an ar archive.
///
/// The call sequence per member is [`append_entry`], any number of
/// `Write` calls totalling exactly the declared length, then
/// [`close_entry`] (or the next [`append_entry`], which closes the
/// previous member when its byte count checks out). [`finish`] seals the
/// archive. The declared length is compared against the bytes actually
/// written when a member closes or the next one opens, not on every
/// write.
///
/// [`append_entry`]: ArWriter::append_entry
/// [`close_entry`]: ArWriter::close_entry
/// [`finish`]: ArWriter::finish
#[derive(Debug)]
pub struct ArWriter<W: Write> {
    output: W,
    long_file_mode: LongFileMode,
    /// Total bytes written since the start of the archive.
    written: u64,
    /// Payload bytes written since the current entry opened.
    entry_written: u64,
    prev_entry: Option<ArEntry>,
    have_unclosed_entry: bool,
    finished: bool,
    closed: bool,
}

impl<W: Write> ArWriter<W> {
    pub fn new(output: W) -> ArWriter<W> {
        ArWriter {
            output,
            long_file_mode: LongFileMode::default(),
            written: 0,
            entry_written: 0,
            prev_entry: None,
            have_unclosed_entry: false,
            finished: false,
            closed: false,
        }
    }

    /// Sets the treatment of names longer than the fixed name field.
    /// Default is [`LongFileMode::Error`].
    pub fn set_long_file_mode(&mut self, mode: LongFileMode) {
        self.long_file_mode = mode;
    }

    /// Opens a new member, writing its fixed header.
    ///
    /// The global magic is emitted before the first header. If the
    /// previous member is still open it is closed first, but only when
    /// its declared length matches the bytes written for it; a mismatch
    /// is fatal.
    pub fn append_entry(&mut self, entry: &ArEntry) -> Result<(), WriteError> {
        if self.finished {
            return Err(WriteError::Finished);
        }

        match &self.prev_entry {
            None => {
                self.output.write_all(GLOBAL_HEADER)?;
                self.written += GLOBAL_HEADER.len() as u64;
            }
            Some(prev) => {
                if prev.length() != self.entry_written {
                    return Err(WriteError::LengthMismatch {
                        name: prev.name().to_string(),
                        declared: prev.length(),
                        written: self.entry_written,
                    });
                }
                if self.have_unclosed_entry {
                    self.close_entry()?;
                }
            }
        }

        self.write_entry_header(entry)?;
        tracing::debug!(name = %entry.name(), length = entry.length(), "wrote entry header");

        self.prev_entry = Some(entry.clone());
        self.entry_written = 0;
        self.have_unclosed_entry = true;
        Ok(())
    }

    /// Closes the current member, emitting the alignment pad byte when
    /// the total byte count written so far is odd.
    ///
    /// Fatal when no member is open or when the bytes written for the
    /// member do not add up to its declared length.
    pub fn close_entry(&mut self) -> Result<(), WriteError> {
        if self.finished {
            return Err(WriteError::Finished);
        }
        match &self.prev_entry {
            Some(prev) if self.have_unclosed_entry => {
                if prev.length() != self.entry_written {
                    return Err(WriteError::LengthMismatch {
                        name: prev.name().to_string(),
                        declared: prev.length(),
                        written: self.entry_written,
                    });
                }
            }
            _ => return Err(WriteError::NoOpenEntry),
        }
        if self.written % 2 != 0 {
            self.output.write_all(b"\n")?;
            self.written += 1;
        }
        self.have_unclosed_entry = false;
        Ok(())
    }

    /// Seals the archive. No further members may be opened. The format
    /// has no trailer, so nothing is written.
    pub fn finish(&mut self) -> Result<(), WriteError> {
        if self.have_unclosed_entry {
            return Err(WriteError::UnclosedEntry);
        }
        if self.finished {
            return Err(WriteError::Finished);
        }
        self.finished = true;
        tracing::debug!(bytes = self.written, "finished archive");
        Ok(())
    }

    /// Finishes (when not already finished) and flushes the sink. A
    /// second call is a no-op.
    pub fn close(&mut self) -> Result<(), WriteError> {
        if self.closed {
            return Ok(());
        }
        if !self.finished {
            self.finish()?;
        }
        self.output.flush()?;
        self.closed = true;
        Ok(())
    }

    /// Total bytes emitted to the sink so far.
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    fn write_entry_header(&mut self, entry: &ArEntry) -> Result<(), WriteError> {
        let name = entry.name();
        let must_append_name = match self.long_file_mode {
            LongFileMode::Error => {
                if name.len() > NAME_LEN {
                    return Err(WriteError::NameTooLong(name.to_string()));
                }
                false
            }
            LongFileMode::Bsd => name.len() > NAME_LEN || name.contains(' '),
        };

        let block = if must_append_name {
            let marker = format!("{}{}", BSD_LONGNAME_PREFIX, name.len());
            // The declared size covers the inline name plus the payload.
            ser::encode_entry_header(&marker, entry, entry.length() + name.len() as u64)?
        } else {
            ser::encode_entry_header(name, entry, entry.length())?
        };

        self.output.write_all(&block)?;
        self.written += block.len() as u64;

        if must_append_name {
            self.output.write_all(name.as_bytes())?;
            self.written += name.len() as u64;
        }
        Ok(())
    }
}

impl<W: Write> Write for ArWriter<W> {
    /// Writes payload bytes of the open member. Writing with no member
    /// open, or after the archive is finished, is an error.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.finished {
            return Err(io::Error::new(ErrorKind::Other, WriteError::Finished));
        }
        if !self.have_unclosed_entry {
            return Err(io::Error::new(ErrorKind::Other, WriteError::NoOpenEntry));
        }
        let n = self.output.write(buf)?;
        self.written += n as u64;
        self.entry_written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.output.flush()
    }
}

impl<W: Write> Drop for ArWriter<W> {
    fn drop(&mut self) {
        let _ = self.output.flush();
    }
}
