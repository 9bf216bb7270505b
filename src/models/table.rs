use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::utils::constants::MISSING_TOKENS;

/// Check whether a raw cell counts as a missing value
pub fn is_missing_value(cell: &str) -> bool {
    let trimmed = cell.trim();
    MISSING_TOKENS.contains(&trimmed)
}

/// Rectangular table of string cells with named columns.
///
/// Cells keep their source text so a table written to an archive and read
/// back compares equal to the original. Numeric access goes through
/// [`Table::numeric_column`], which treats [`MISSING_TOKENS`] as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != columns.len())
        {
            return Err(ProcessingError::InvalidFormat(format!(
                "Row {} has {} cells, expected {}",
                index,
                row.len(),
                columns.len()
            )));
        }

        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Index of `name`, or `MissingColumn` naming `context` in the message
    pub fn require_column(&self, name: &str, context: &str) -> Result<usize> {
        self.column_index(name)
            .ok_or_else(|| ProcessingError::MissingColumn {
                column: name.to_string(),
                context: context.to_string(),
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    pub fn set_cell(&mut self, row: usize, column: usize, value: String) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            *cell = value;
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(ProcessingError::InvalidFormat(format!(
                "Row has {} cells, expected {}",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Parse a column as numbers; missing and non-finite cells come back as `None`
    pub fn numeric_column(&self, name: &str, context: &str) -> Result<Vec<Option<f64>>> {
        let index = self.require_column(name, context)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| parse_numeric(&cells[index], name, row))
            .collect()
    }

    /// Remove every listed column that is present, returning how many were removed
    pub fn drop_columns(&mut self, names: &[&str]) -> usize {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|c| !names.contains(&c.as_str()))
            .collect();
        let removed = keep.iter().filter(|k| !**k).count();
        if removed == 0 {
            return 0;
        }

        self.columns = retain_by_mask(std::mem::take(&mut self.columns), &keep);
        for row in &mut self.rows {
            *row = retain_by_mask(std::mem::take(row), &keep);
        }
        removed
    }

    /// Rows whose `column` cell parses to `value`
    pub fn filter_eq(&self, column: &str, value: f64, context: &str) -> Result<Table> {
        let index = self.require_column(column, context)?;
        let mut rows = Vec::new();
        for (row, cells) in self.rows.iter().enumerate() {
            if parse_numeric(&cells[index], column, row)? == Some(value) {
                rows.push(cells.clone());
            }
        }
        Ok(Table {
            columns: self.columns.clone(),
            rows,
        })
    }
}

fn retain_by_mask(values: Vec<String>, keep: &[bool]) -> Vec<String> {
    values
        .into_iter()
        .zip(keep)
        .filter_map(|(value, keep)| keep.then_some(value))
        .collect()
}

fn parse_numeric(cell: &str, column: &str, row: usize) -> Result<Option<f64>> {
    if is_missing_value(cell) {
        return Ok(None);
    }
    // `inf`, `-nan` and friends parse but carry no measurement
    cell.trim()
        .parse::<f64>()
        .map(|v| v.is_finite().then_some(v))
        .map_err(|_| {
            ProcessingError::InvalidFormat(format!(
                "Non-numeric value '{}' in column '{}' at row {}",
                cell, column, row
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["Year".into(), "Mean Temp (°C)".into(), "Flag".into()],
            vec![
                vec!["2018".into(), "1.5".into(), "E".into()],
                vec!["2018".into(), "".into(), "M".into()],
                vec!["2017".into(), "NaN".into(), "".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = Table::new(vec!["a".into(), "b".into()], vec![vec!["1".into()]]);
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }

    #[test]
    fn test_missing_tokens() {
        assert!(is_missing_value(""));
        assert!(is_missing_value("  "));
        assert!(is_missing_value("NaN"));
        assert!(is_missing_value("NA"));
        assert!(!is_missing_value("0"));
        assert!(!is_missing_value("-1.2"));
    }

    #[test]
    fn test_numeric_column() {
        let table = sample();
        let values = table.numeric_column("Mean Temp (°C)", "test").unwrap();
        assert_eq!(values, vec![Some(1.5), None, None]);
    }

    #[test]
    fn test_numeric_column_rejects_text() {
        let table = sample();
        let err = table.numeric_column("Flag", "test").unwrap_err();
        assert!(err.to_string().contains("'Flag'"));
    }

    #[test]
    fn test_missing_column_names_context() {
        let table = sample();
        let err = table.numeric_column("Max Temp (°C)", "merged table for 2018").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Column 'Max Temp (°C)' missing from merged table for 2018"
        );
    }

    #[test]
    fn test_drop_columns() {
        let mut table = sample();
        let removed = table.drop_columns(&["Flag", "Not There"]);
        assert_eq!(removed, 1);
        assert_eq!(table.columns(), &["Year".to_string(), "Mean Temp (°C)".to_string()]);
        assert!(table.rows().iter().all(|r| r.len() == 2));
    }

    #[test]
    fn test_non_finite_values_read_as_missing() {
        let table = Table::new(
            vec!["Mean Temp (°C)".into()],
            ["1.0", "-nan", "inf", "-Infinity", "NAN"]
                .iter()
                .map(|v| vec![v.to_string()])
                .collect(),
        )
        .unwrap();

        let values = table.numeric_column("Mean Temp (°C)", "test").unwrap();
        assert_eq!(values, vec![Some(1.0), None, None, None, None]);
    }

    #[test]
    fn test_filter_eq() {
        let table = sample();
        let filtered = table.filter_eq("Year", 2018.0, "test").unwrap();
        assert_eq!(filtered.len(), 2);
    }
}
