use crate::error::{ProcessingError, Result};
use crate::models::Table;
use csv::ReaderBuilder;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Reads delimited text into a [`Table`]
pub struct TableReader {
    skip_rows: usize,
}

impl TableReader {
    pub fn new() -> Self {
        Self {
            skip_rows: 0,
        }
    }

    /// Skip this many raw lines of preamble before the header row
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    pub fn read_path(&self, path: &Path) -> Result<Table> {
        let bytes = fs::read(path)?;
        self.read_bytes(&bytes)
    }

    pub fn read_bytes(&self, bytes: &[u8]) -> Result<Table> {
        // Strips a UTF-8 BOM when present
        let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
        if had_errors {
            warn!("Replaced malformed UTF-8 sequences while decoding table");
        }
        self.read_str(&text)
    }

    pub fn read_str(&self, text: &str) -> Result<Table> {
        let body = skip_lines(text, self.skip_rows);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(body.as_bytes());
        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(ProcessingError::InvalidFormat(
                    "Table has no header row".to_string(),
                ))
            }
        };
        let columns: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(columns.len(), String::new());
            rows.push(row);
        }

        Table::new(columns, rows)
    }
}

impl Default for TableReader {
    fn default() -> Self {
        Self::new()
    }
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(pos) => rest = &rest[pos + 1..],
            None => return "",
        }
    }
    rest
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_with_preamble() -> Result<()> {
        let text = "\"Modified Date: 2023-01-31 23:30 UTC\"\n\
            \"Disclaimer: station data may change\"\n\
            \n\
            \"Name\",\"Province\",\"Climate ID\"\n\
            \"TORONTO CITY\",\"ONTARIO\",\"6158355\"\n";

        let table = TableReader::new().with_skip_rows(3).read_str(text)?;

        assert_eq!(table.columns(), &["Name", "Province", "Climate ID"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 2), Some("6158355"));
        Ok(())
    }

    #[test]
    fn test_strips_bom_and_pads_short_rows() -> Result<()> {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("\"Climate ID\",\"Year\",\"Mean Temp (°C)\"\n6158355,2018\n".as_bytes());

        let table = TableReader::new().read_bytes(&bytes)?;

        assert_eq!(table.columns()[0], "Climate ID");
        assert_eq!(table.rows()[0], vec!["6158355", "2018", ""]);
        Ok(())
    }

    #[test]
    fn test_read_path() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        writeln!(file, "a,b")?;
        writeln!(file, "1,2")?;

        let table = TableReader::new().read_path(file.path())?;
        assert_eq!(table.rows()[0], vec!["1", "2"]);
        Ok(())
    }

    #[test]
    fn test_empty_input_has_no_header() {
        let result = TableReader::new().read_str("");
        assert!(matches!(result, Err(ProcessingError::InvalidFormat(_))));
    }
}
