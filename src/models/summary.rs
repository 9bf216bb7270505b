use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::City;

/// Year-over-year change of the mean temperature against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageDifference {
    Defined(f64),
    /// Baseline average is zero, or the ratio is not finite
    Undefined,
}

impl PercentageDifference {
    pub fn between(value: f64, baseline: f64) -> Self {
        if baseline == 0.0 {
            return PercentageDifference::Undefined;
        }
        let ratio = (value - baseline) / baseline * 100.0;
        if ratio.is_finite() {
            PercentageDifference::Defined(ratio)
        } else {
            PercentageDifference::Undefined
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            PercentageDifference::Defined(v) => Some(*v),
            PercentageDifference::Undefined => None,
        }
    }
}

impl std::fmt::Display for PercentageDifference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PercentageDifference::Defined(v) => write!(f, "{:.2}%", v),
            PercentageDifference::Undefined => {
                write!(f, "undefined (baseline average is zero or not finite)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub city: City,
    pub year: i32,
    pub max_temp: f64,
    pub min_temp: f64,
    pub avg_temp_year: f64,
    pub avg_temp_prev_years: f64,
    pub percentage_difference: PercentageDifference,
    /// Month number (1-12) to mean temperature, only months present in the data
    pub avg_temp_per_month: BTreeMap<u32, f64>,
}

impl AnalyticsSummary {
    pub fn report(&self) -> String {
        let mut out = format!(
            "Max Temperature for {}: {:.1}°C\n\
            Min Temperature for {}: {:.1}°C\n\
            Average daily temperature: {:.2}°C (previous two years: {:.2}°C)\n\
            Percentage difference in average daily temperature: {}\n\
            Average Temperature per Month:",
            self.year,
            self.max_temp,
            self.year,
            self.min_temp,
            self.avg_temp_year,
            self.avg_temp_prev_years,
            self.percentage_difference,
        );
        for (month, mean) in &self.avg_temp_per_month {
            out.push_str(&format!("\n  {:>2}: {:.2}°C", month, mean));
        }
        out
    }
}
