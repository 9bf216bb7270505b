use crate::error::{ProcessingError, Result};
use crate::models::{is_missing_value, Table};
use rust_xlsxwriter::{Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

/// One named sheet of a workbook
#[derive(Debug, Clone, PartialEq)]
pub struct WorkbookSheet {
    pub name: String,
    pub table: Table,
}

impl WorkbookSheet {
    pub fn new(name: impl Into<String>, table: Table) -> Self {
        Self {
            name: name.into(),
            table,
        }
    }
}

/// Destination for multi-sheet workbooks
pub trait WorkbookSink {
    /// Write `sheets` as workbook `name`, returning where it landed
    fn write(&self, name: &str, sheets: &[WorkbookSheet]) -> Result<PathBuf>;
}

/// Writes `.xlsx` files into an output directory
pub struct XlsxWorkbookWriter {
    output_dir: PathBuf,
}

impl XlsxWorkbookWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }

    fn fill_sheet(worksheet: &mut Worksheet, table: &Table) -> Result<()> {
        for (col, header) in table.columns().iter().enumerate() {
            worksheet.write_string(0, column_number(col)?, header)?;
        }

        for (row, cells) in table.rows().iter().enumerate() {
            let row_number = u32::try_from(row + 1).map_err(|_| {
                ProcessingError::InvalidFormat(format!("Too many rows for a worksheet: {}", row))
            })?;
            for (col, cell) in cells.iter().enumerate() {
                if is_missing_value(cell) {
                    continue;
                }
                let col_number = column_number(col)?;
                match cell.trim().parse::<f64>() {
                    Ok(number) if number.is_finite() => {
                        worksheet.write_number(row_number, col_number, number)?;
                    }
                    _ => {
                        worksheet.write_string(row_number, col_number, cell)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl WorkbookSink for XlsxWorkbookWriter {
    fn write(&self, name: &str, sheets: &[WorkbookSheet]) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let mut workbook = Workbook::new();
        for sheet in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(&sheet.name)?;
            Self::fill_sheet(worksheet, &sheet.table)?;
        }

        let path = self.output_dir.join(format!("{}.xlsx", name));
        workbook.save(&path)?;
        Ok(path)
    }
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| {
        ProcessingError::InvalidFormat(format!("Too many columns for a worksheet: {}", col))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_sheet_per_year() -> Result<()> {
        let dir = TempDir::new()?;
        let writer = XlsxWorkbookWriter::new(&dir.path().join("output"));
        let table = Table::new(
            vec!["Station Name".into(), "Year".into(), "Mean Temp (°C)".into()],
            vec![
                vec!["TORONTO CITY".into(), "2017".into(), "".into()],
                vec!["TORONTO CITY".into(), "2017".into(), "-2.4".into()],
            ],
        )?;

        let path = writer.write(
            "Toronto_full_data_all_years",
            &[
                WorkbookSheet::new("2016", table.clone()),
                WorkbookSheet::new("2017", table),
            ],
        )?;

        assert!(path.ends_with("output/Toronto_full_data_all_years.xlsx"));
        let bytes = fs::read(&path)?;
        assert_eq!(&bytes[..2], b"PK");
        Ok(())
    }
}
