//! Staleness guard between decodes and exports

use chrono::Utc;
use mobility_feed_decoder::decoder::DecodeOptions;
use mobility_feed_decoder::errors::AppError;
use mobility_feed_decoder::export::ExportFormat;
use mobility_feed_decoder::session::{SessionStore, Status};

use crate::common::fuel_envelope;

#[test]
fn test_export_before_decode_is_stale() {
    let mut store = SessionStore::new(DecodeOptions::default());
    let source = fuel_envelope();

    for format in [ExportFormat::Json, ExportFormat::FuelCsv, ExportFormat::WideCsv] {
        assert!(matches!(
            store.export(&source, format, Utc::now()),
            Err(AppError::ExportStaleState(_))
        ));
    }
    assert!(store.current().is_none());
}

#[test]
fn test_edited_source_blocks_export_until_redecoded() {
    let mut store = SessionStore::new(DecodeOptions::default());
    let source = fuel_envelope();
    store.decode(&source).unwrap();

    let edited = source.replace("</soap:Envelope>", "</soap:Envelope>\n<!-- edited -->");
    assert!(matches!(
        store.export(&edited, ExportFormat::Json, Utc::now()),
        Err(AppError::ExportStaleState(_))
    ));
    assert!(matches!(store.status(), Status::Failed(_)));

    store.decode(&edited).unwrap();
    let artifacts = store.export(&edited, ExportFormat::Json, Utc::now()).unwrap();
    assert_eq!(artifacts.len(), 1);
}

#[test]
fn test_status_tracks_last_operation() {
    let mut store = SessionStore::new(DecodeOptions::default());
    let source = fuel_envelope();

    store.decode(&source).unwrap();
    assert_eq!(store.status(), &Status::Decoded { items: 2, failed: 0 });

    let records = store.extract_records(&source).unwrap();
    assert_eq!(records.fuel_prices.len(), 1);
    assert_eq!(
        store.status().to_string(),
        "Extracted 1 fuel price row(s) and 0 override period row(s)."
    );

    assert!(store.decode("not xml").is_err());
    assert!(store.status().to_string().starts_with("Error: Invalid XML"));
    // The previous session survives a failed decode
    assert!(store.session_for_export(&source).is_ok());
}
