//! CSV exports of extracted rows
//!
//! Fields are quoted only when they contain a comma, a double quote, CR or
//! LF; embedded quotes are doubled. Every record, including the last, ends
//! with CRLF.

use crate::errors::{AppError, AppResult};
use crate::types::records::{FUEL_PRICE_COLUMNS, OVERRIDE_PERIOD_COLUMNS};
use crate::types::{FuelPriceRow, OverridePeriodRow};
use crate::utils::filename::safe_base_name;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// First column of every per-station wide table
pub const WIDE_DATE_COLUMN: &str = "date_of_price";

/// Write a header and records as CRLF-terminated CSV text
pub fn write_csv<R, F>(headers: &[&str], records: R) -> AppResult<String>
where
    R: IntoIterator<Item = F>,
    F: IntoIterator,
    F::Item: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::CRLF)
        .quote_style(QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for record in records {
        writer.write_record(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| AppError::InvalidData(format!("CSV output: {}", e)))
}

/// Long-form fuel price CSV, ordered by `date_of_price`
pub fn fuel_prices_long_csv(rows: &[FuelPriceRow]) -> AppResult<String> {
    let mut sorted: Vec<&FuelPriceRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.date_of_price.cmp(&b.date_of_price));
    write_csv(&FUEL_PRICE_COLUMNS, sorted.into_iter().map(FuelPriceRow::to_record))
}

/// Long-form override period CSV, ordered by `start_of_period`
pub fn override_periods_long_csv(rows: &[OverridePeriodRow]) -> AppResult<String> {
    let mut sorted: Vec<&OverridePeriodRow> = rows.iter().collect();
    sorted.sort_by(|a, b| a.start_of_period.cmp(&b.start_of_period));
    write_csv(
        &OVERRIDE_PERIOD_COLUMNS,
        sorted.into_iter().map(OverridePeriodRow::to_record),
    )
}

/// Fuel prices of one station pivoted to one row per date
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationTable {
    pub station_id: String,
    /// Fuel columns, alphabetical
    pub fuels: Vec<String>,
    pub rows: Vec<WideRow>,
}

/// One date of a [`StationTable`]; `prices` align with `fuels`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WideRow {
    pub date_of_price: String,
    pub prices: Vec<String>,
}

impl StationTable {
    /// Header row: `date_of_price` followed by the fuel columns
    pub fn columns(&self) -> Vec<&str> {
        std::iter::once(WIDE_DATE_COLUMN)
            .chain(self.fuels.iter().map(String::as_str))
            .collect()
    }

    pub fn to_csv(&self) -> AppResult<String> {
        write_csv(
            &self.columns(),
            self.rows.iter().map(|row| {
                std::iter::once(row.date_of_price.as_str())
                    .chain(row.prices.iter().map(String::as_str))
            }),
        )
    }

    /// File name for this station alone; see [`station_file_names`] for a batch
    pub fn file_name(&self) -> String {
        wide_file_name(&safe_base_name(&self.station_id))
    }
}

fn wide_file_name(stem: &str) -> String {
    format!("station_{}_wide.csv", stem)
}

/// File names for a batch of tables, distinct even when station ids sanitise alike
///
/// Tables keep their order; a later table whose safe id is taken gets `_2`,
/// `_3`, ... appended (`a/b` → `station_a_b_wide.csv`, `a_b` → `station_a_b_2_wide.csv`).
pub fn station_file_names(tables: &[StationTable]) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    tables
        .iter()
        .map(|table| {
            let base = safe_base_name(&table.station_id);
            let mut stem = base.clone();
            let mut attempt = 2;
            while used.contains(&stem) {
                stem = format!("{}_{}", base, attempt);
                attempt += 1;
            }
            used.insert(stem.clone());
            wide_file_name(&stem)
        })
        .collect()
}

/// Pivot fuel rows per station into date-by-fuel tables
///
/// Stations and dates are ordered ascending; a later row for the same
/// station, date and fuel replaces an earlier one.
pub fn pivot_by_station(rows: &[FuelPriceRow]) -> Vec<StationTable> {
    let mut stations: BTreeMap<&str, (BTreeSet<&str>, BTreeMap<&str, BTreeMap<&str, &str>>)> =
        BTreeMap::new();

    for row in rows {
        let (fuels, dates) = stations.entry(row.station_id.as_str()).or_default();
        fuels.insert(row.fuel.as_str());
        dates
            .entry(row.date_of_price.as_str())
            .or_default()
            .insert(row.fuel.as_str(), row.price.as_str());
    }

    stations
        .into_iter()
        .map(|(station_id, (fuels, dates))| StationTable {
            station_id: station_id.to_string(),
            fuels: fuels.iter().map(|f| f.to_string()).collect(),
            rows: dates
                .into_iter()
                .map(|(date, prices)| WideRow {
                    date_of_price: date.to_string(),
                    prices: fuels
                        .iter()
                        .map(|fuel| prices.get(fuel).copied().unwrap_or_default().to_string())
                        .collect(),
                })
                .collect(),
        })
        .collect()
}
