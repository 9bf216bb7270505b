use crate::models::Table;

/// One year of raw daily observations for a station, as fetched
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    pub year: i32,
    pub table: Table,
}

impl ObservationTable {
    pub fn new(year: i32, table: Table) -> Self {
        Self { year, table }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
