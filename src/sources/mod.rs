pub mod bulk_data;
pub mod reference;

pub use bulk_data::ClimateBulkClient;
pub use reference::HttpReferenceDownloader;

use crate::error::Result;
use crate::models::ObservationTable;
use std::path::Path;

/// Supplies one year of raw daily observations
pub trait ObservationSource {
    /// Fetch the observations for `year`; a non-success response is a `Fetch` error
    fn fetch(&self, year: i32) -> Result<ObservationTable>;
}

/// Downloads the station reference file
pub trait ReferenceSource {
    fn fetch(&self, dest: &Path) -> Result<()>;
}
