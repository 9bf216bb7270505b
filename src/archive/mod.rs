pub mod directory;
pub mod memory;

pub use directory::DirectoryArchive;
pub use memory::MemoryArchive;

use crate::error::Result;
use crate::models::Table;

/// Object store holding one merged table per archive key
pub trait ArchiveGateway {
    /// Store `table` under `key`, replacing any previous content
    fn put(&self, key: &str, table: &Table) -> Result<()>;

    /// Fetch the table stored under `key`; `ArchiveNotFound` if it was never written
    fn get(&self, key: &str) -> Result<Table>;
}
