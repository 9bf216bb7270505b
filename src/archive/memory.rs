use crate::archive::ArchiveGateway;
use crate::error::{ProcessingError, Result};
use crate::models::Table;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-process archive, used for dry runs and tests
#[derive(Default)]
pub struct MemoryArchive {
    tables: RwLock<HashMap<String, Table>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .tables
            .read()
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }
}

impl ArchiveGateway for MemoryArchive {
    fn put(&self, key: &str, table: &Table) -> Result<()> {
        let mut tables = self
            .tables
            .write()
            .map_err(|_| ProcessingError::Archive("archive lock poisoned".to_string()))?;
        tables.insert(key.to_string(), table.clone());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Table> {
        let tables = self
            .tables
            .read()
            .map_err(|_| ProcessingError::Archive("archive lock poisoned".to_string()))?;
        tables
            .get(key)
            .cloned()
            .ok_or_else(|| ProcessingError::ArchiveNotFound {
                key: key.to_string(),
            })
    }
}
