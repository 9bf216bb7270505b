use serde::{Deserialize, Serialize};

use crate::utils::constants::*;

/// Numeric measurement columns tracked through merge, imputation and analytics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measurement {
    MeanTemp,
    MaxTemp,
    MinTemp,
    HeatDegDays,
    CoolDegDays,
    TotalPrecip,
}

impl Measurement {
    pub const ALL: [Measurement; 6] = [
        Measurement::MeanTemp,
        Measurement::MaxTemp,
        Measurement::MinTemp,
        Measurement::HeatDegDays,
        Measurement::CoolDegDays,
        Measurement::TotalPrecip,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Measurement::MeanTemp => MEAN_TEMP_COLUMN,
            Measurement::MaxTemp => MAX_TEMP_COLUMN,
            Measurement::MinTemp => MIN_TEMP_COLUMN,
            Measurement::HeatDegDays => HEAT_DEG_DAYS_COLUMN,
            Measurement::CoolDegDays => COOL_DEG_DAYS_COLUMN,
            Measurement::TotalPrecip => TOTAL_PRECIP_COLUMN,
        }
    }
}

impl std::fmt::Display for Measurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// Column vocabulary shared by the merger, imputer and analyzer
#[derive(Debug, Clone)]
pub struct WeatherSchema {
    pub join_key: &'static str,
    pub year: &'static str,
    pub month: &'static str,
    pub day: &'static str,
    pub measurements: Vec<Measurement>,
    pub dropped: Vec<&'static str>,
}

impl WeatherSchema {
    /// Daily bulk data schema published by climate.weather.gc.ca
    pub fn climate_daily() -> Self {
        Self {
            join_key: CLIMATE_ID_COLUMN,
            year: YEAR_COLUMN,
            month: MONTH_COLUMN,
            day: DAY_COLUMN,
            measurements: Measurement::ALL.to_vec(),
            dropped: DROPPED_COLUMNS.to_vec(),
        }
    }

    pub fn is_dropped(&self, column: &str) -> bool {
        self.dropped.contains(&column)
    }
}

impl Default for WeatherSchema {
    fn default() -> Self {
        Self::climate_daily()
    }
}
