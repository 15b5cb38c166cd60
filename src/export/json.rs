//! JSON export documents

use super::{response_xml_length, ExportedItem};
use crate::errors::AppResult;
use crate::session::DecodeSession;
use crate::types::RecordSet;
use crate::utils::time::iso_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Top-level decoded-binaries JSON document
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedBinariesDocument<'a> {
    pub generated_at: String,
    /// When the source text was decoded
    pub decoded_at: String,
    pub response_xml_length: usize,
    pub items: Vec<ExportedItem<'a>>,
}

impl<'a> DecodedBinariesDocument<'a> {
    pub fn new(session: &'a DecodeSession, generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at: iso_timestamp(&generated_at),
            decoded_at: iso_timestamp(&session.decoded_at()),
            response_xml_length: response_xml_length(session.source_text()),
            items: session.items().iter().map(ExportedItem::from_item).collect(),
        }
    }
}

/// Serialise every decoded item of a session
pub fn decoded_binaries_json(
    session: &DecodeSession,
    generated_at: DateTime<Utc>,
) -> AppResult<String> {
    let document = DecodedBinariesDocument::new(session, generated_at);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Serialise extracted rows as `{fuelPrices, overridePeriods}`
pub fn records_json(records: &RecordSet) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}
