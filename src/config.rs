use crate::error::{ProcessingError, Result};
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Runtime settings, layered as defaults -> TOML file -> `CLIMATE_ARCHIVER_*` environment
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PipelineConfig {
    #[validate(url)]
    pub station_inventory_url: String,

    pub station_inventory_path: PathBuf,

    pub station_inventory_skip_rows: usize,

    #[validate(url)]
    pub bulk_data_url: String,

    #[validate(range(min = 1, max = 12))]
    pub request_month: u32,

    #[validate(range(min = 1, max = 31))]
    pub request_day: u32,

    #[validate(range(min = 1, max = 3))]
    pub timeframe: u32,

    pub archive_root: PathBuf,

    #[validate(length(min = 1))]
    pub bucket: String,

    pub output_dir: PathBuf,

    #[validate(length(min = 1))]
    pub allowed_years: Vec<i32>,

    pub strict_imputation: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            station_inventory_url: STATION_INVENTORY_URL.to_string(),
            station_inventory_path: PathBuf::from(STATION_INVENTORY_FILE),
            station_inventory_skip_rows: STATION_INVENTORY_SKIP_ROWS,
            bulk_data_url: BULK_DATA_URL.to_string(),
            request_month: DEFAULT_REQUEST_MONTH,
            request_day: DEFAULT_REQUEST_DAY,
            timeframe: DAILY_TIMEFRAME,
            archive_root: PathBuf::from(DEFAULT_ARCHIVE_ROOT),
            bucket: DEFAULT_BUCKET.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            allowed_years: SUPPORTED_YEARS.to_vec(),
            strict_imputation: false,
        }
    }
}

impl PipelineConfig {
    /// Load settings; `path` must exist when given, the default file is optional
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(Config::try_from(&PipelineConfig::default())?)
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("allowed_years"),
            )
            .build()?;

        let config: PipelineConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject a year outside the supported set before any work starts
    pub fn check_year(&self, year: i32) -> Result<()> {
        if self.allowed_years.contains(&year) {
            return Ok(());
        }
        let valid: Vec<String> = self.allowed_years.iter().map(i32::to_string).collect();
        Err(ProcessingError::Config(format!(
            "Year {} is not supported (valid years: {})",
            year,
            valid.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bucket, "wavehistoricalweatherdata");
        assert_eq!(config.station_inventory_skip_rows, 3);
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "bucket = \"test-bucket\"")?;
        writeln!(file, "allowed_years = [2017, 2018]")?;
        writeln!(file, "strict_imputation = true")?;

        let config = PipelineConfig::load(Some(file.path()))?;

        assert_eq!(config.bucket, "test-bucket");
        assert_eq!(config.allowed_years, vec![2017, 2018]);
        assert!(config.strict_imputation);
        assert_eq!(config.request_month, 12);
        Ok(())
    }

    #[test]
    fn test_invalid_values_are_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "request_month = 13")?;

        let result = PipelineConfig::load(Some(file.path()));
        assert!(matches!(result, Err(ProcessingError::Validation(_))));
        Ok(())
    }

    #[test]
    fn test_check_year() {
        let config = PipelineConfig::default();
        assert!(config.check_year(2018).is_ok());
        let err = config.check_year(2019).unwrap_err();
        assert!(err.to_string().contains("valid years: 2018"));
    }
}
