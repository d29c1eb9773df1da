/// Errors raised while decoding an archive.
///
/// Every variant except [`Io`] means the input is not a well-formed ar
/// archive. None of them is recoverable: the stream position is undefined
/// afterwards and the reader must be abandoned.
///
/// [`Io`]: ReadError::Io
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("invalid global header, not an ar archive")]
    InvalidMagic,

    #[error("invalid entry trailer at byte {offset}")]
    InvalidTrailer { offset: u64 },

    #[error("unexpected end of archive at byte {offset}")]
    UnexpectedEof { offset: u64 },

    #[error("unparsable {field} field: {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("cannot resolve long name at offset {offset}: no // name table in archive")]
    MissingNameTable { offset: u64 },

    #[error("unterminated long name at offset {offset} of the // name table")]
    UnterminatedName { offset: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors raised while encoding an archive.
///
/// [`LengthMismatch`], [`NoOpenEntry`], [`UnclosedEntry`] and [`Finished`]
/// indicate a broken call sequence; [`NameTooLong`] and [`FieldOverflow`]
/// indicate metadata that the fixed-width header cannot carry under the
/// active long-file policy. All are fatal to the archive being written.
///
/// [`LengthMismatch`]: WriteError::LengthMismatch
/// [`NoOpenEntry`]: WriteError::NoOpenEntry
/// [`UnclosedEntry`]: WriteError::UnclosedEntry
/// [`Finished`]: WriteError::Finished
/// [`NameTooLong`]: WriteError::NameTooLong
/// [`FieldOverflow`]: WriteError::FieldOverflow
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("archive has already been finished")]
    Finished,

    #[error("no entry is open")]
    NoOpenEntry,

    #[error("archive contains an unclosed entry")]
    UnclosedEntry,

    #[error("length of `{name}` does not match entry ({declared} declared, {written} written)")]
    LengthMismatch {
        name: String,
        declared: u64,
        written: u64,
    },

    #[error("filename too long, > 16 chars: {0}")]
    NameTooLong(String),

    #[error("{field} too long to encode: {value}")]
    FieldOverflow { field: &'static str, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Error raised by the format dispatch in [`crate::factory`].
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("archiver `{0}` not found")]
    UnknownFormat(String),
}
