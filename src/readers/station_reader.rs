use crate::error::Result;
use crate::models::{StationDirectory, WeatherSchema};
use crate::readers::TableReader;
use crate::utils::constants::STATION_INVENTORY_SKIP_ROWS;
use std::path::Path;
use tracing::info;

pub struct StationReader {
    skip_rows: usize,
}

impl StationReader {
    pub fn new() -> Self {
        Self {
            skip_rows: STATION_INVENTORY_SKIP_ROWS,
        }
    }

    pub fn with_skip_rows(skip_rows: usize) -> Self {
        Self { skip_rows }
    }

    /// Read the station inventory file into a directory keyed by climate id
    pub fn read_directory(&self, path: &Path, schema: &WeatherSchema) -> Result<StationDirectory> {
        let table = TableReader::new()
            .with_skip_rows(self.skip_rows)
            .read_path(path)?;
        let directory = StationDirectory::new(table, schema.join_key)?;

        info!(
            path = %path.display(),
            stations = directory.len(),
            "Loaded station inventory"
        );
        Ok(directory)
    }
}

impl Default for StationReader {
    fn default() -> Self {
        Self::new()
    }
}
