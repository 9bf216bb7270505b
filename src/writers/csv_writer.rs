use crate::error::Result;
use crate::models::Table;
use csv::WriterBuilder;
use std::io::Write;

/// Write `table` as comma-separated text with a header row
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = WriterBuilder::new().from_writer(writer);
    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
