pub mod city;
pub mod observation;
pub mod schema;
pub mod station;
pub mod summary;
pub mod table;
pub mod window;

pub use city::City;
pub use observation::ObservationTable;
pub use schema::{Measurement, WeatherSchema};
pub use station::{normalize_climate_id, StationDirectory, StationRecord};
pub use summary::{AnalyticsSummary, PercentageDifference};
pub use table::{is_missing_value, Table};
pub use window::YearWindow;
