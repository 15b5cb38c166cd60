//! Export Formatters
//!
//! Pure functions turning a decode session into export documents:
//! - long and per-station wide CSV of extracted rows
//! - JSON and XML documents describing every decoded binary
//! - JSON of the extracted rows

pub mod csv;
pub mod json;
pub mod xml;

use crate::decoder::DecodedItem;
use crate::errors::AppResult;
use crate::session::DecodeSession;
use crate::utils::time::file_stamp;
use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Available export documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Decoded binaries as JSON
    Json,
    /// Decoded binaries as XML
    Xml,
    /// Long-form fuel price rows
    FuelCsv,
    /// Long-form override period rows
    OverrideCsv,
    /// One date-by-fuel CSV per station
    WideCsv,
    /// Extracted rows as JSON
    RecordsJson,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Json => "decoded binaries JSON",
            ExportFormat::Xml => "decoded binaries XML",
            ExportFormat::FuelCsv => "fuel price CSV",
            ExportFormat::OverrideCsv => "override period CSV",
            ExportFormat::WideCsv => "per-station wide CSV",
            ExportFormat::RecordsJson => "records JSON",
        };
        f.write_str(name)
    }
}

/// A rendered export document and its suggested file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

/// Render `format` for a session
///
/// Wide CSV yields one artifact per station; every other format yields one.
pub fn render(
    session: &DecodeSession,
    format: ExportFormat,
    generated_at: DateTime<Utc>,
) -> AppResult<Vec<ExportArtifact>> {
    let stamp = file_stamp(&generated_at);
    let single = |file_name: String, contents: String| -> AppResult<Vec<ExportArtifact>> {
        Ok(vec![ExportArtifact {
            file_name,
            contents,
        }])
    };

    match format {
        ExportFormat::Json => single(
            format!("decoded_binaries_{}.json", stamp),
            json::decoded_binaries_json(session, generated_at)?,
        ),
        ExportFormat::Xml => single(
            format!("decoded_binaries_{}.xml", stamp),
            xml::decoded_binaries_xml(session, generated_at),
        ),
        ExportFormat::FuelCsv => single(
            format!("fuel_prices_{}.csv", stamp),
            self::csv::fuel_prices_long_csv(&session.records().fuel_prices)?,
        ),
        ExportFormat::OverrideCsv => single(
            format!("override_periods_{}.csv", stamp),
            self::csv::override_periods_long_csv(&session.records().override_periods)?,
        ),
        ExportFormat::WideCsv => {
            let tables = self::csv::pivot_by_station(&session.records().fuel_prices);
            self::csv::station_file_names(&tables)
                .into_iter()
                .zip(&tables)
                .map(|(file_name, table)| {
                    Ok(ExportArtifact {
                        file_name,
                        contents: table.to_csv()?,
                    })
                })
                .collect()
        }
        ExportFormat::RecordsJson => single(
            format!("records_{}.json", stamp),
            json::records_json(&session.records())?,
        ),
    }
}

/// Byte count and classification of raw bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawSummary {
    pub bytes: usize,
    pub ext: &'static str,
    pub mime: &'static str,
}

/// Byte count and classification of decoded bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedSummary {
    pub bytes: usize,
    pub ext: &'static str,
    pub mime: &'static str,
    pub is_text: bool,
}

/// Export view of one decoded item, shared by the JSON and XML documents
///
/// Failed items report zero byte counts, empty classifications and neither
/// decoded text nor base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedItem<'a> {
    pub id: &'a str,
    #[serde(rename = "type")]
    pub binary_type: &'a str,
    pub was_gunzipped: bool,
    pub error: Option<&'a str>,
    pub gunzip_error: Option<&'a str>,
    pub raw: RawSummary,
    pub decoded: DecodedSummary,
    pub preview: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_text: Option<Cow<'a, str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decoded_base64: Option<String>,
}

impl<'a> ExportedItem<'a> {
    pub fn from_item(item: &'a DecodedItem) -> Self {
        let payload = item.payload();

        let raw = match payload {
            Some(p) => RawSummary {
                bytes: p.raw_bytes.len(),
                ext: p.raw_info.extension,
                mime: p.raw_info.mime_type,
            },
            None => RawSummary {
                bytes: 0,
                ext: "",
                mime: "",
            },
        };
        let decoded = match payload {
            Some(p) => DecodedSummary {
                bytes: p.decoded_bytes.len(),
                ext: p.decoded_info.extension,
                mime: p.decoded_info.mime_type,
                is_text: p.decoded_info.is_text,
            },
            None => DecodedSummary {
                bytes: 0,
                ext: "",
                mime: "",
                is_text: false,
            },
        };

        let decoded_text = item.decoded_text();
        let decoded_base64 = payload
            .filter(|p| !p.decoded_info.is_text)
            .map(|p| STANDARD.encode(&p.decoded_bytes));

        Self {
            id: &item.id,
            binary_type: &item.binary_type,
            was_gunzipped: item.was_gunzipped(),
            error: item.error(),
            gunzip_error: item.gunzip_error(),
            raw,
            decoded,
            preview: payload.map(|p| p.preview.as_str()).unwrap_or_default(),
            decoded_text,
            decoded_base64,
        }
    }
}

/// Length of the source document as counted by the feed's web clients (UTF-16 code units)
pub fn response_xml_length(source_text: &str) -> usize {
    source_text.encode_utf16().count()
}
