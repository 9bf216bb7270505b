use crate::error::Result;
use crate::models::{normalize_climate_id, ObservationTable, StationDirectory, Table, WeatherSchema};

/// Where a merged column takes its value from
#[derive(Debug, Clone, Copy)]
enum Source {
    Observation(usize),
    Station(usize),
}

pub struct DataMerger {
    schema: WeatherSchema,
}

impl DataMerger {
    pub fn new(schema: WeatherSchema) -> Self {
        Self { schema }
    }

    /// Inner-join one year of observations with the station directory.
    ///
    /// Observations whose climate id has no station are dropped without
    /// notice. The result holds the observation columns followed by the
    /// station columns, minus the join key duplicate, any station column
    /// whose name the observation side already uses, and every column in
    /// the schema's drop list.
    pub fn merge(&self, stations: &StationDirectory, observations: &ObservationTable) -> Result<Table> {
        let context = format!("observation table for {}", observations.year);
        let key = observations
            .table
            .require_column(self.schema.join_key, &context)?;

        let (columns, plan) = self.column_plan(stations, observations);

        let mut rows = Vec::new();
        for cells in observations.table.rows() {
            let climate_id = normalize_climate_id(&cells[key]);
            let Some(station) = stations.get(&climate_id) else {
                continue;
            };
            let station_cells = station.cells();

            let row = plan
                .iter()
                .map(|source| match *source {
                    // Both sides carry the key in normalised form after the join
                    Source::Observation(i) if i == key => climate_id.clone(),
                    Source::Observation(i) => cells[i].clone(),
                    Source::Station(i) => station_cells[i].clone(),
                })
                .collect();
            rows.push(row);
        }

        Table::new(columns, rows)
    }

    fn column_plan(
        &self,
        stations: &StationDirectory,
        observations: &ObservationTable,
    ) -> (Vec<String>, Vec<Source>) {
        let mut columns = Vec::new();
        let mut plan = Vec::new();

        for (i, name) in observations.table.columns().iter().enumerate() {
            if self.schema.is_dropped(name) {
                continue;
            }
            columns.push(name.clone());
            plan.push(Source::Observation(i));
        }

        for (i, name) in stations.columns().iter().enumerate() {
            if i == stations.key_column()
                || self.schema.is_dropped(name)
                || observations.table.has_column(name)
            {
                continue;
            }
            columns.push(name.clone());
            plan.push(Source::Station(i));
        }

        (columns, plan)
    }
}

impl Default for DataMerger {
    fn default() -> Self {
        Self::new(WeatherSchema::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::DROPPED_COLUMNS;

    fn station_directory() -> StationDirectory {
        let table = Table::new(
            vec![
                "Name".into(),
                "Province".into(),
                "Climate ID".into(),
                "Latitude".into(),
                "Latitude (Decimal Degrees)".into(),
                "First Year".into(),
                "DLY Last Year".into(),
            ],
            vec![vec![
                "TORONTO CITY".into(),
                "ONTARIO".into(),
                "6158355".into(),
                "434000000".into(),
                "43.67".into(),
                "2002".into(),
                "2024".into(),
            ]],
        )
        .unwrap();
        StationDirectory::new(table, "Climate ID").unwrap()
    }

    fn observations() -> ObservationTable {
        let table = Table::new(
            vec![
                "Longitude (x)".into(),
                "Latitude (y)".into(),
                "Station Name".into(),
                "Climate ID".into(),
                "Year".into(),
                "Month".into(),
                "Day".into(),
                "Data Quality".into(),
                "Mean Temp (°C)".into(),
                "Mean Temp Flag".into(),
                "Total Rain (mm)".into(),
            ],
            vec![
                row(&["-79.4", "43.67", "TORONTO CITY", "6158355", "2018", "1", "1", "", "-5.2", "", "0"]),
                row(&["-79.4", "43.67", "TORONTO CITY", "6158355.0", "2018", "1", "2", "", "", "M", ""]),
                row(&["-79.4", "43.67", "ELSEWHERE", "9999999", "2018", "1", "3", "", "1.0", "", ""]),
            ],
        )
        .unwrap();
        ObservationTable::new(2018, table)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_inner_join_drops_unmatched() {
        let merged = DataMerger::default()
            .merge(&station_directory(), &observations())
            .unwrap();

        assert_eq!(merged.len(), 2);
        let key = merged.column_index("Climate ID").unwrap();
        assert!(merged.rows().iter().all(|r| r[key] == "6158355"));
    }

    #[test]
    fn test_projection_removes_dropped_columns() {
        let merged = DataMerger::default()
            .merge(&station_directory(), &observations())
            .unwrap();

        for dropped in DROPPED_COLUMNS {
            assert!(!merged.has_column(dropped), "{} should be dropped", dropped);
        }
        assert_eq!(
            merged.columns(),
            &[
                "Station Name",
                "Climate ID",
                "Year",
                "Month",
                "Day",
                "Mean Temp (°C)",
                "Name",
                "Province",
                "Latitude",
            ]
        );
        assert_eq!(merged.rows()[0][6], "TORONTO CITY");
    }

    #[test]
    fn test_missing_join_key_is_reported() {
        let table = Table::new(vec!["Year".into()], vec![]).unwrap();
        let err = DataMerger::default()
            .merge(&station_directory(), &ObservationTable::new(2017, table))
            .unwrap_err();
        assert!(err.to_string().contains("observation table for 2017"));
    }
}
