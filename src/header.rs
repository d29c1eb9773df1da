/// The 8-byte archive magic, ASCII `!<arch>` followed by a line feed.
pub const GLOBAL_HEADER: &[u8; 8] = b"!<arch>\n";

/// The 2-byte terminator of every fixed entry header, backtick + line feed
/// (historically written as octal `\140\012`).
pub const ENTRY_TRAILER: &[u8; 2] = b"`\n";

// Fixed entry header layout. All fields are ASCII, left-justified and
// space-padded to their width, with no separators in between.
pub(crate) const NAME_LEN: usize = 16;
pub(crate) const MTIME_LEN: usize = 12;
pub(crate) const ID_LEN: usize = 6;
pub(crate) const MODE_LEN: usize = 8;
pub(crate) const SIZE_LEN: usize = 10;

pub(crate) const NAME_OFFSET: usize = 0;
pub(crate) const MTIME_OFFSET: usize = NAME_OFFSET + NAME_LEN;
pub(crate) const UID_OFFSET: usize = MTIME_OFFSET + MTIME_LEN;
pub(crate) const GID_OFFSET: usize = UID_OFFSET + ID_LEN;
pub(crate) const MODE_OFFSET: usize = GID_OFFSET + ID_LEN;
pub(crate) const SIZE_OFFSET: usize = MODE_OFFSET + MODE_LEN;
pub(crate) const TRAILER_OFFSET: usize = SIZE_OFFSET + SIZE_LEN;

/// Total size of the fixed entry header, trailer included.
pub(crate) const HEADER_LEN: usize = TRAILER_OFFSET + ENTRY_TRAILER.len();

/// Name of the SVR4/GNU extended-name table pseudo-entry.
pub(crate) const GNU_NAME_TABLE: &str = "//";

/// Prefix of a BSD inline long-name marker, `#1/` followed by the name length.
pub(crate) const BSD_LONGNAME_PREFIX: &str = "#1/";

/// Checks whether `signature` starts with the ar archive magic.
///
/// Inspects at most the first 8 bytes and never consumes any reader state,
/// so it can be used to sniff a buffered prefix before committing to a
/// format.
pub fn matches(signature: &[u8]) -> bool {
    signature.len() >= GLOBAL_HEADER.len() && &signature[..GLOBAL_HEADER.len()] == GLOBAL_HEADER
}
