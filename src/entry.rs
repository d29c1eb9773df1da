use std::fmt;
use std::hash::{Hash, Hasher};
use std::time::{SystemTime, UNIX_EPOCH};

/// Permission bits given to entries when none are specified: a regular
/// file with mode `644`.
pub const DEFAULT_MODE: u32 = 0o100_644;

/// Metadata for one archive member, independent of I/O direction.
///
/// An entry is immutable once constructed. Its identity is **keyed by name
/// alone**: `PartialEq`, `Eq` and `Hash` consider only [`name`], so two
/// entries with the same name but different lengths or timestamps compare
/// equal and collide in hashed collections. Callers that need structural
/// comparison must compare the remaining fields themselves.
///
/// [`name`]: ArEntry::name
#[derive(Debug, Clone)]
pub struct ArEntry {
    name: String,
    length: u64,
    user_id: u32,
    group_id: u32,
    mode: u32,
    last_modified: u64,
}

impl ArEntry {
    /// Creates an entry with default metadata: uid/gid 0, [`DEFAULT_MODE`],
    /// and the current time as modification time.
    ///
    /// `length` is the payload size in bytes, excluding any inline
    /// long-name bytes.
    pub fn new(name: impl Into<String>, length: u64) -> ArEntry {
        ArEntry::with_metadata(name, length, 0, 0, DEFAULT_MODE, now())
    }

    /// Creates an entry with explicit metadata. `last_modified` is in
    /// seconds since the epoch.
    pub fn with_metadata(
        name: impl Into<String>,
        length: u64,
        user_id: u32,
        group_id: u32,
        mode: u32,
        last_modified: u64,
    ) -> ArEntry {
        ArEntry {
            name: name.into(),
            length,
            user_id,
            group_id,
            mode,
            last_modified,
        }
    }

    #[inline(always)]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Payload length in bytes.
    #[inline(always)]
    pub fn length(&self) -> u64 {
        self.length
    }

    #[inline(always)]
    pub fn user_id(&self) -> u32 {
        self.user_id
    }

    #[inline(always)]
    pub fn group_id(&self) -> u32 {
        self.group_id
    }

    /// POSIX permission bits, as stored in the octal mode field.
    #[inline(always)]
    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Modification time in seconds since the epoch.
    #[inline(always)]
    pub fn last_modified(&self) -> u64 {
        self.last_modified
    }
}

impl PartialEq for ArEntry {
    fn eq(&self, other: &ArEntry) -> bool {
        self.name == other.name
    }
}

impl Eq for ArEntry {}

impl Hash for ArEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Display for ArEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
