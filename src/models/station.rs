use std::collections::HashMap;
use tracing::warn;

use crate::error::Result;
use crate::models::Table;

/// Normalise a climate identifier to the string form used for joining.
///
/// Identifiers read through a float column come back as `6158355.0`; the
/// all-zero fractional part is stripped so they match the observation side.
pub fn normalize_climate_id(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Some((whole, fraction)) = trimmed.split_once('.') {
        if !whole.is_empty()
            && whole.chars().all(|c| c.is_ascii_digit())
            && fraction.chars().all(|c| c == '0')
        {
            return whole.to_string();
        }
    }
    trimmed.to_string()
}

/// One row of the station inventory
#[derive(Debug, Clone, Copy)]
pub struct StationRecord<'a> {
    columns: &'a [String],
    cells: &'a [String],
}

impl<'a> StationRecord<'a> {
    pub fn field(&self, column: &str) -> Option<&'a str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .map(|i| self.cells[i].as_str())
    }

    pub fn name(&self) -> Option<&'a str> {
        self.field("Name")
    }

    pub fn province(&self) -> Option<&'a str> {
        self.field("Province")
    }

    pub fn cells(&self) -> &'a [String] {
        self.cells
    }
}

/// Station inventory indexed by normalised climate id
#[derive(Debug, Clone)]
pub struct StationDirectory {
    table: Table,
    key_column: usize,
    index: HashMap<String, usize>,
}

impl StationDirectory {
    pub fn new(table: Table, join_key: &str) -> Result<Self> {
        let key_column = table.require_column(join_key, "station inventory")?;
        let mut index = HashMap::with_capacity(table.len());

        for (row, cells) in table.rows().iter().enumerate() {
            let id = normalize_climate_id(&cells[key_column]);
            if id.is_empty() {
                continue;
            }
            if index.contains_key(&id) {
                warn!(climate_id = %id, row, "Duplicate climate id in station inventory, keeping first");
                continue;
            }
            index.insert(id, row);
        }

        Ok(Self {
            table,
            key_column,
            index,
        })
    }

    pub fn get(&self, climate_id: &str) -> Option<StationRecord<'_>> {
        let row = *self.index.get(&normalize_climate_id(climate_id))?;
        let cells = &self.table.rows()[row];
        Some(StationRecord {
            columns: self.table.columns(),
            cells,
        })
    }

    pub fn columns(&self) -> &[String] {
        self.table.columns()
    }

    pub fn key_column(&self) -> usize {
        self.key_column
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn inventory() -> Table {
        Table::new(
            vec!["Name".into(), "Province".into(), "Climate ID".into()],
            vec![
                vec!["TORONTO CITY".into(), "ONTARIO".into(), "6158355.0".into()],
                vec!["OTHER".into(), "ONTARIO".into(), "615S001".into()],
                vec!["DUPLICATE".into(), "ONTARIO".into(), "6158355".into()],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_normalize_climate_id() {
        assert_eq!(normalize_climate_id("6158355"), "6158355");
        assert_eq!(normalize_climate_id(" 6158355.0 "), "6158355");
        assert_eq!(normalize_climate_id("6158355.00"), "6158355");
        assert_eq!(normalize_climate_id("615S001"), "615S001");
        assert_eq!(normalize_climate_id("1.5"), "1.5");
    }

    #[test]
    fn test_lookup_coerces_numeric_ids() {
        let directory = StationDirectory::new(inventory(), "Climate ID").unwrap();
        let station = directory.get("6158355").unwrap();
        assert_eq!(station.name(), Some("TORONTO CITY"));
        assert_eq!(station.province(), Some("ONTARIO"));
        assert!(directory.get("615S001").is_some());
        assert!(directory.get("0000000").is_none());
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let directory = StationDirectory::new(inventory(), "Climate ID").unwrap();
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("6158355.0").unwrap().name(), Some("TORONTO CITY"));
    }

    #[test]
    fn test_requires_join_key() {
        let table = Table::new(vec!["Name".into()], vec![]).unwrap();
        assert!(StationDirectory::new(table, "Climate ID").is_err());
    }
}
