#[cfg(feature = "reader")]
mod de;
mod entry;
mod error;
pub mod factory;
mod fs;
mod header;
#[cfg(feature = "writer")]
mod ser;
mod stream;

pub use entry::{ArEntry, DEFAULT_MODE};
pub use error::{FormatError, ReadError, WriteError};
pub use fs::entry_from_path;
pub use header::{matches, ENTRY_TRAILER, GLOBAL_HEADER};
#[cfg(feature = "reader")]
pub use stream::reader::ArReader;
#[cfg(feature = "writer")]
pub use stream::writer::{ArWriter, LongFileMode};
