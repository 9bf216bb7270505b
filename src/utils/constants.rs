/// Join key shared by observations and the station inventory
pub const CLIMATE_ID_COLUMN: &str = "Climate ID";

/// Date columns
pub const YEAR_COLUMN: &str = "Year";
pub const MONTH_COLUMN: &str = "Month";
pub const DAY_COLUMN: &str = "Day";

/// Measurement columns
pub const MEAN_TEMP_COLUMN: &str = "Mean Temp (°C)";
pub const MAX_TEMP_COLUMN: &str = "Max Temp (°C)";
pub const MIN_TEMP_COLUMN: &str = "Min Temp (°C)";
pub const HEAT_DEG_DAYS_COLUMN: &str = "Heat Deg Days (°C)";
pub const COOL_DEG_DAYS_COLUMN: &str = "Cool Deg Days (°C)";
pub const TOTAL_PRECIP_COLUMN: &str = "Total Precip (mm)";

/// Columns removed from every merged table
pub const DROPPED_COLUMNS: &[&str] = &[
    // quality flags
    "Data Quality",
    "Max Temp Flag",
    "Min Temp Flag",
    "Mean Temp Flag",
    "Heat Deg Days Flag",
    "Cool Deg Days Flag",
    "Total Precip Flag",
    // rain, snow and gust
    "Total Rain (mm)",
    "Total Rain Flag",
    "Total Snow (cm)",
    "Total Snow Flag",
    "Snow on Grnd (cm)",
    "Snow on Grnd Flag",
    "Dir of Max Gust (10s deg)",
    "Spd of Max Gust (km/h)",
    // station record range
    "First Year",
    "Last Year",
    "HLY First Year",
    "HLY Last Year",
    "DLY First Year",
    "DLY Last Year",
    "MLY First Year",
    "MLY Last Year",
    // duplicate coordinates
    "Longitude (x)",
    "Latitude (y)",
    "Latitude (Decimal Degrees)",
    "Longitude (Decimal Degrees)",
];

/// Cell values read as missing
pub const MISSING_TOKENS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "-NaN", "null", "NULL", "#N/A"];

/// Station inventory defaults
pub const STATION_INVENTORY_URL: &str =
    "https://drive.google.com/uc?id=1HDRnj41YBWpMioLPwAFiLlK4SK8NV72C";
pub const STATION_INVENTORY_FILE: &str = "Station_Inventory_EN.csv";
pub const STATION_INVENTORY_SKIP_ROWS: usize = 3;

/// Bulk data endpoint defaults
pub const BULK_DATA_URL: &str = "https://climate.weather.gc.ca/climate_data/bulk_data_e.html";
pub const DEFAULT_REQUEST_MONTH: u32 = 12;
pub const DEFAULT_REQUEST_DAY: u32 = 14;
pub const DAILY_TIMEFRAME: u32 = 2;

/// Storage defaults
pub const DEFAULT_BUCKET: &str = "wavehistoricalweatherdata";
pub const DEFAULT_ARCHIVE_ROOT: &str = "archive";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_CONFIG_FILE: &str = "climate-archiver.toml";
pub const ENV_PREFIX: &str = "CLIMATE_ARCHIVER";

/// Years accepted on the command line
pub const SUPPORTED_YEARS: &[i32] = &[2018];

/// Number of years covered by one run (target year and its predecessors)
pub const WINDOW_YEARS: i32 = 3;
