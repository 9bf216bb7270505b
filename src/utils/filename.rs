use crate::models::City;

/// Archive key for one year's merged table: `{city}_{year}_merged_data`
pub fn archive_key(city: City, year: i32) -> String {
    format!("{}_{}_merged_data", city.name(), year)
}

/// Workbook name holding the raw tables of every fetched year: `{city}_full_data_all_years`
pub fn workbook_name(city: City) -> String {
    format!("{}_full_data_all_years", city.name())
}
