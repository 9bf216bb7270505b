use crate::error::{ProcessingError, Result};
use crate::models::ObservationTable;
use crate::readers::TableReader;
use crate::sources::ObservationSource;
use reqwest::blocking::Client;
use reqwest::Url;
use tracing::{debug, info};

/// Client for the climate.weather.gc.ca bulk data endpoint
pub struct ClimateBulkClient {
    client: Client,
    base_url: String,
    station_id: u32,
    month: u32,
    day: u32,
    timeframe: u32,
}

impl ClimateBulkClient {
    pub fn new(base_url: &str, station_id: u32) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            station_id,
            month: crate::utils::DEFAULT_REQUEST_MONTH,
            day: crate::utils::DEFAULT_REQUEST_DAY,
            timeframe: crate::utils::DAILY_TIMEFRAME,
        }
    }

    /// Month/day/timeframe selector sent with every request
    pub fn with_selector(mut self, month: u32, day: u32, timeframe: u32) -> Self {
        self.month = month;
        self.day = day;
        self.timeframe = timeframe;
        self
    }

    pub fn request_url(&self, year: i32) -> Result<Url> {
        Url::parse_with_params(
            &self.base_url,
            &[
                ("format", "csv".to_string()),
                ("stationID", self.station_id.to_string()),
                ("Year", year.to_string()),
                ("Month", self.month.to_string()),
                ("Day", self.day.to_string()),
                ("timeframe", self.timeframe.to_string()),
                ("submit", "Download Data".to_string()),
            ],
        )
        .map_err(|e| ProcessingError::Config(format!("Invalid bulk data URL '{}': {}", self.base_url, e)))
    }
}

impl ObservationSource for ClimateBulkClient {
    fn fetch(&self, year: i32) -> Result<ObservationTable> {
        let url = self.request_url(year)?;
        debug!(%url, year, "Requesting bulk data");

        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProcessingError::Fetch {
                year,
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProcessingError::Fetch {
                year,
                reason: format!("HTTP status {}", status),
            });
        }

        let bytes = response.bytes().map_err(|e| ProcessingError::Fetch {
            year,
            reason: e.to_string(),
        })?;
        let table = TableReader::new().read_bytes(&bytes)?;

        info!(year, rows = table.len(), "Fetched observations");
        Ok(ObservationTable::new(year, table))
    }
}
