pub mod constants;
pub mod filename;
pub mod progress;

pub use constants::*;
pub use filename::{archive_key, workbook_name};
pub use progress::ProgressReporter;
