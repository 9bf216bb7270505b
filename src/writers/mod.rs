pub mod csv_writer;
pub mod workbook_writer;

pub use csv_writer::write_csv;
pub use workbook_writer::{WorkbookSheet, WorkbookSink, XlsxWorkbookWriter};
