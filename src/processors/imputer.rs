use crate::error::{ProcessingError, Result};
use crate::models::{Measurement, Table, WeatherSchema};
use serde::Serialize;
use tracing::{debug, warn};

/// Mean used to fill one measurement column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFill {
    pub measurement: Measurement,
    pub mean: f64,
    pub filled: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImputationReport {
    pub fills: Vec<ColumnFill>,
    /// Columns with no values at all, left missing
    pub undefined: Vec<Measurement>,
}

impl ImputationReport {
    pub fn total_filled(&self) -> usize {
        self.fills.iter().map(|f| f.filled).sum()
    }
}

/// Fills missing measurement cells with the mean of the column's present values
pub struct Imputer {
    schema: WeatherSchema,
    strict: bool,
}

impl Imputer {
    pub fn new(schema: WeatherSchema) -> Self {
        Self {
            schema,
            strict: false,
        }
    }

    /// Fail with `ImputationUndefined` instead of leaving an all-missing column as is
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Impute every tracked measurement of `table` in place.
    ///
    /// Each column's mean comes from that column in this table only.
    pub fn impute(&self, table: &mut Table, context: &str) -> Result<ImputationReport> {
        let mut report = ImputationReport::default();

        for measurement in &self.schema.measurements {
            let column = measurement.column();
            let index = table.require_column(column, context)?;
            let values = table.numeric_column(column, context)?;

            let present: Vec<f64> = values.iter().flatten().copied().collect();
            if present.is_empty() {
                if values.is_empty() {
                    continue;
                }
                if self.strict {
                    return Err(ProcessingError::ImputationUndefined {
                        column: column.to_string(),
                    });
                }
                warn!(column, context, "Column has no values to average, leaving it missing");
                report.undefined.push(*measurement);
                continue;
            }

            let mean = present.iter().sum::<f64>() / present.len() as f64;
            let mut filled = 0;
            for (row, value) in values.iter().enumerate() {
                if value.is_none() {
                    table.set_cell(row, index, mean.to_string());
                    filled += 1;
                }
            }

            if filled > 0 {
                debug!(column, mean, filled, context, "Imputed missing values");
                report.fills.push(ColumnFill {
                    measurement: *measurement,
                    mean,
                    filled,
                });
            }
        }

        Ok(report)
    }
}

impl Default for Imputer {
    fn default() -> Self {
        Self::new(WeatherSchema::default())
    }
}
