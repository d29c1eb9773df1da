use crate::entry::ArEntry;
use crate::error::WriteError;
use crate::header::{
    ENTRY_TRAILER, GID_OFFSET, HEADER_LEN, ID_LEN, MODE_LEN, MODE_OFFSET, MTIME_LEN, MTIME_OFFSET,
    NAME_LEN, NAME_OFFSET, SIZE_LEN, SIZE_OFFSET, TRAILER_OFFSET, UID_OFFSET,
};

/// Encodes the fixed 60-byte entry header.
///
/// `name_field` is whatever should land in the 16-byte name field (the
/// plain name, or a `#1/<n>` marker under the BSD policy) and
/// `declared_size` is whatever should land in the size field (payload
/// length, plus the inline name length under the BSD policy). A value too
/// wide for its field is an error, never truncated.
pub(crate) fn encode_entry_header(
    name_field: &str,
    entry: &ArEntry,
    declared_size: u64,
) -> Result<[u8; HEADER_LEN], WriteError> {
    let mut block = [b' '; HEADER_LEN];
    put_field(&mut block, NAME_OFFSET, NAME_LEN, name_field, "name")?;
    put_field(
        &mut block,
        MTIME_OFFSET,
        MTIME_LEN,
        &entry.last_modified().to_string(),
        "last modified",
    )?;
    put_field(&mut block, UID_OFFSET, ID_LEN, &entry.user_id().to_string(), "user id")?;
    put_field(&mut block, GID_OFFSET, ID_LEN, &entry.group_id().to_string(), "group id")?;
    put_field(
        &mut block,
        MODE_OFFSET,
        MODE_LEN,
        &format!("{:o}", entry.mode()),
        "file mode",
    )?;
    put_field(&mut block, SIZE_OFFSET, SIZE_LEN, &declared_size.to_string(), "size")?;
    block[TRAILER_OFFSET..].copy_from_slice(ENTRY_TRAILER);
    Ok(block)
}

fn put_field(
    block: &mut [u8; HEADER_LEN],
    offset: usize,
    width: usize,
    value: &str,
    field: &'static str,
) -> Result<(), WriteError> {
    let bytes = value.as_bytes();
    if bytes.len() > width {
        return Err(WriteError::FieldOverflow {
            field,
            value: value.to_string(),
        });
    }
    block[offset..offset + bytes.len()].copy_from_slice(bytes);
    Ok(())
}
