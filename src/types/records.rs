//! Flat rows extracted from fuel-price publications

use serde::{Deserialize, Serialize};

/// Column order for the long fuel-price CSV
pub const FUEL_PRICE_COLUMNS: [&str; 8] = [
    "station_id",
    "station_version",
    "fuel",
    "price",
    "date_of_price",
    "publication_id",
    "publication_type",
    "binary_id",
];

/// Column order for the long override-period CSV
pub const OVERRIDE_PERIOD_COLUMNS: [&str; 7] = [
    "station_id",
    "station_version",
    "start_of_period",
    "end_of_period",
    "publication_id",
    "publication_type",
    "binary_id",
];

/// One price for one fuel type at one station and date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelPriceRow {
    pub station_id: String,
    pub station_version: String,
    pub fuel: String,
    pub price: String,
    pub date_of_price: String,
    pub publication_id: String,
    pub publication_type: String,
    pub binary_id: String,
}

impl FuelPriceRow {
    /// Field values in [`FUEL_PRICE_COLUMNS`] order
    pub fn to_record(&self) -> [&str; 8] {
        [
            self.station_id.as_str(),
            self.station_version.as_str(),
            self.fuel.as_str(),
            self.price.as_str(),
            self.date_of_price.as_str(),
            self.publication_id.as_str(),
            self.publication_type.as_str(),
            self.binary_id.as_str(),
        ]
    }
}

/// A period during which a station overrides its regular opening hours
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverridePeriodRow {
    pub station_id: String,
    pub station_version: String,
    pub start_of_period: String,
    pub end_of_period: String,
    pub publication_id: String,
    pub publication_type: String,
    pub binary_id: String,
}

impl OverridePeriodRow {
    /// Field values in [`OVERRIDE_PERIOD_COLUMNS`] order
    pub fn to_record(&self) -> [&str; 7] {
        [
            self.station_id.as_str(),
            self.station_version.as_str(),
            self.start_of_period.as_str(),
            self.end_of_period.as_str(),
            self.publication_id.as_str(),
            self.publication_type.as_str(),
            self.binary_id.as_str(),
        ]
    }
}

/// All rows extracted from one decode session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSet {
    pub fuel_prices: Vec<FuelPriceRow>,
    pub override_periods: Vec<OverridePeriodRow>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.fuel_prices.is_empty() && self.override_periods.is_empty()
    }

    pub fn extend(&mut self, other: RecordSet) {
        self.fuel_prices.extend(other.fuel_prices);
        self.override_periods.extend(other.override_periods);
    }
}
