use crate::archive::ArchiveGateway;
use crate::error::{ProcessingError, Result};
use crate::models::{
    AnalyticsSummary, City, Measurement, PercentageDifference, Table, WeatherSchema, YearWindow,
};
use crate::utils::filename::archive_key;
use chrono::Month;
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Computes year summaries from the archived merged tables
pub struct WeatherAnalyzer<'a> {
    archive: &'a dyn ArchiveGateway,
    schema: WeatherSchema,
}

impl<'a> WeatherAnalyzer<'a> {
    pub fn new(archive: &'a dyn ArchiveGateway) -> Self {
        Self {
            archive,
            schema: WeatherSchema::default(),
        }
    }

    pub fn with_schema(mut self, schema: WeatherSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Summarise `window.target` against the two years before it.
    ///
    /// All three archives must exist; a missing one fails the summary with
    /// `ArchiveNotFound` naming its key.
    pub fn summarize(&self, city: City, window: YearWindow) -> Result<AnalyticsSummary> {
        let year = window.target;
        let current = self.load(city, year)?;
        let [previous_year, earlier_year] = window.previous();
        let previous = self.load(city, previous_year)?;
        let earlier = self.load(city, earlier_year)?;

        // Archives hold one year each, but rows from other years are ignored here
        let selected = current.filter_eq(self.schema.year, f64::from(year), &context(year))?;
        if selected.len() != current.len() {
            debug!(
                year,
                excluded = current.len() - selected.len(),
                "Ignoring archived rows from other years"
            );
        }

        let max_temp = self
            .values(&selected, Measurement::MaxTemp, year)?
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max);
        let min_temp = self
            .values(&selected, Measurement::MinTemp, year)?
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        let avg_temp_year = self.mean(&selected, Measurement::MeanTemp, year)?;

        let avg_temp_prev_years = (self.mean(&previous, Measurement::MeanTemp, previous_year)?
            + self.mean(&earlier, Measurement::MeanTemp, earlier_year)?)
            / 2.0;
        let percentage_difference = PercentageDifference::between(avg_temp_year, avg_temp_prev_years);

        let avg_temp_per_month = self.monthly_means(&selected, year)?;

        info!(year, %city, months = avg_temp_per_month.len(), "Computed summary");

        Ok(AnalyticsSummary {
            city,
            year,
            max_temp,
            min_temp,
            avg_temp_year,
            avg_temp_prev_years,
            percentage_difference,
            avg_temp_per_month,
        })
    }

    fn load(&self, city: City, year: i32) -> Result<Table> {
        let key = archive_key(city, year);
        let table = self.archive.get(&key)?;
        debug!(key = %key, rows = table.len(), "Loaded archive");
        Ok(table)
    }

    /// Present values of a measurement; `EmptySelection` when there are none
    fn values(&self, table: &Table, measurement: Measurement, year: i32) -> Result<Vec<f64>> {
        let values: Vec<f64> = table
            .numeric_column(measurement.column(), &context(year))?
            .into_iter()
            .flatten()
            .collect();
        if values.is_empty() {
            return Err(ProcessingError::EmptySelection {
                year,
                column: measurement.column().to_string(),
            });
        }
        Ok(values)
    }

    fn mean(&self, table: &Table, measurement: Measurement, year: i32) -> Result<f64> {
        let values = self.values(table, measurement, year)?;
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    fn monthly_means(&self, table: &Table, year: i32) -> Result<BTreeMap<u32, f64>> {
        let months = table.numeric_column(self.schema.month, &context(year))?;
        let temps = table.numeric_column(Measurement::MeanTemp.column(), &context(year))?;

        let mut sums: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
        for (row, (month, temp)) in months.into_iter().zip(temps).enumerate() {
            let (Some(month), Some(temp)) = (month, temp) else {
                continue;
            };
            let month = parse_month(month).ok_or_else(|| {
                ProcessingError::InvalidFormat(format!(
                    "Invalid month {} at row {} of {}",
                    month,
                    row,
                    context(year)
                ))
            })?;
            let entry = sums.entry(month.number_from_month()).or_insert((0.0, 0));
            entry.0 += temp;
            entry.1 += 1;
        }

        Ok(sums
            .into_iter()
            .map(|(month, (sum, count))| (month, sum / count as f64))
            .collect())
    }
}

fn parse_month(value: f64) -> Option<Month> {
    if value.fract() != 0.0 || !(1.0..=12.0).contains(&value) {
        return None;
    }
    Month::try_from(value as u8).ok()
}

fn context(year: i32) -> String {
    format!("archived table for {}", year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::MemoryArchive;

    fn archived(rows: &[(i32, u32, &str, &str, &str)]) -> Table {
        let columns = vec![
            "Year".to_string(),
            "Month".to_string(),
            "Mean Temp (°C)".to_string(),
            "Max Temp (°C)".to_string(),
            "Min Temp (°C)".to_string(),
        ];
        let rows = rows
            .iter()
            .map(|(y, m, mean, max, min)| {
                vec![y.to_string(), m.to_string(), mean.to_string(), max.to_string(), min.to_string()]
            })
            .collect();
        Table::new(columns, rows).unwrap()
    }

    fn archive_with(current: Table, previous: Table, earlier: Table) -> MemoryArchive {
        let archive = MemoryArchive::new();
        archive.put("Toronto_2018_merged_data", &current).unwrap();
        archive.put("Toronto_2017_merged_data", &previous).unwrap();
        archive.put("Toronto_2016_merged_data", &earlier).unwrap();
        archive
    }

    #[test]
    fn test_summary_values() {
        let archive = archive_with(
            archived(&[
                (2018, 1, "-4.0", "2.0", "-12.0"),
                (2018, 1, "-2.0", "4.0", "-8.0"),
                (2018, 7, "24.0", "33.5", "15.0"),
                (2017, 7, "99.0", "99.0", "-99.0"),
            ]),
            archived(&[(2017, 1, "5.0", "9.0", "1.0"), (2017, 2, "7.0", "9.0", "1.0")]),
            archived(&[(2016, 1, "6.0", "9.0", "1.0")]),
        );

        let summary = WeatherAnalyzer::new(&archive)
            .summarize(City::Toronto, YearWindow::new(2018))
            .unwrap();

        assert_eq!(summary.max_temp, 33.5);
        assert_eq!(summary.min_temp, -12.0);
        assert!((summary.avg_temp_year - 6.0).abs() < 1e-9);
        assert!((summary.avg_temp_prev_years - 6.0).abs() < 1e-9);
        assert_eq!(summary.percentage_difference, PercentageDifference::Defined(0.0));
        assert_eq!(summary.avg_temp_per_month, BTreeMap::from([(1, -3.0), (7, 24.0)]));
    }

    #[test]
    fn test_zero_baseline_is_undefined() {
        let archive = archive_with(
            archived(&[(2018, 3, "4.0", "8.0", "0.0")]),
            archived(&[(2017, 3, "-2.0", "1.0", "-5.0")]),
            archived(&[(2016, 3, "2.0", "5.0", "-1.0")]),
        );

        let summary = WeatherAnalyzer::new(&archive)
            .summarize(City::Toronto, YearWindow::new(2018))
            .unwrap();

        assert_eq!(summary.avg_temp_prev_years, 0.0);
        assert_eq!(summary.percentage_difference, PercentageDifference::Undefined);
    }

    #[test]
    fn test_missing_archive_names_key() {
        let archive = MemoryArchive::new();
        archive
            .put("Toronto_2018_merged_data", &archived(&[(2018, 1, "1.0", "2.0", "0.0")]))
            .unwrap();
        archive
            .put("Toronto_2017_merged_data", &archived(&[(2017, 1, "1.0", "2.0", "0.0")]))
            .unwrap();

        let err = WeatherAnalyzer::new(&archive)
            .summarize(City::Toronto, YearWindow::new(2018))
            .unwrap_err();

        assert!(matches!(err, ProcessingError::ArchiveNotFound { key } if key == "Toronto_2016_merged_data"));
    }

    #[test]
    fn test_empty_target_year_is_reported() {
        let archive = archive_with(
            archived(&[(2017, 1, "1.0", "2.0", "0.0")]),
            archived(&[(2017, 1, "1.0", "2.0", "0.0")]),
            archived(&[(2016, 1, "1.0", "2.0", "0.0")]),
        );

        let err = WeatherAnalyzer::new(&archive)
            .summarize(City::Toronto, YearWindow::new(2018))
            .unwrap_err();

        assert!(matches!(err, ProcessingError::EmptySelection { year: 2018, .. }));
    }

    #[test]
    fn test_invalid_month() {
        let archive = archive_with(
            archived(&[(2018, 13, "1.0", "2.0", "0.0")]),
            archived(&[(2017, 1, "1.0", "2.0", "0.0")]),
            archived(&[(2016, 1, "1.0", "2.0", "0.0")]),
        );

        let err = WeatherAnalyzer::new(&archive)
            .summarize(City::Toronto, YearWindow::new(2018))
            .unwrap_err();

        assert!(matches!(err, ProcessingError::InvalidFormat(_)));
    }
}
