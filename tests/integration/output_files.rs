//! Payload and export files on disk

use chrono::Utc;
use mobility_feed_decoder::decoder::output::OutputManager;
use mobility_feed_decoder::decoder::DecodeOptions;
use mobility_feed_decoder::export::{render, ExportFormat};
use mobility_feed_decoder::session::DecodeSession;
use std::fs;
use tempfile::TempDir;

use crate::common::{duplicate_id_envelope, fuel_envelope, gzip, FUEL_PUBLICATION};

#[test]
fn test_payloads_written_to_raw_and_decoded() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output = OutputManager::new(temp_dir.path().to_path_buf())?;
    let session = DecodeSession::decode(fuel_envelope(), &DecodeOptions::default())?;

    let written: Vec<_> = session
        .items()
        .iter()
        .filter_map(|item| output.write_item(item).unwrap())
        .collect();
    assert_eq!(written.len(), 2);

    assert_eq!(written[0].raw, temp_dir.path().join("raw/b1_fuel.gz"));
    assert_eq!(fs::read(&written[0].raw)?, gzip(FUEL_PUBLICATION.as_bytes()));
    assert_eq!(
        fs::read_to_string(&written[0].decoded)?,
        FUEL_PUBLICATION
    );
    assert_eq!(fs::read_to_string(temp_dir.path().join("decoded/b2_note.txt"))?, "hello");
    Ok(())
}

#[test]
fn test_exports_written_under_exports() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output = OutputManager::new(temp_dir.path().to_path_buf())?;
    let session = DecodeSession::decode(fuel_envelope(), &DecodeOptions::default())?;

    for artifact in render(&session, ExportFormat::WideCsv, Utc::now())? {
        let path = output.write_export(&artifact.file_name, &artifact.contents)?;
        assert_eq!(path, temp_dir.path().join("exports/station_S1_wide.csv"));
        assert!(fs::read_to_string(path)?.starts_with("date_of_price,Diesel\r\n"));
    }
    Ok(())
}

#[test]
fn test_duplicate_ids_do_not_overwrite() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let output = OutputManager::new(temp_dir.path().to_path_buf())?;
    let session = DecodeSession::decode(duplicate_id_envelope(), &DecodeOptions::default())?;

    for item in session.items() {
        output.write_item(item)?;
    }

    assert_eq!(
        fs::read(temp_dir.path().join("raw/b1_t_1.gz"))?,
        gzip(FUEL_PUBLICATION.as_bytes())
    );
    assert_eq!(
        fs::read_to_string(temp_dir.path().join("decoded/b1_t_1.xml"))?,
        FUEL_PUBLICATION
    );
    assert_eq!(fs::read_to_string(temp_dir.path().join("raw/b1_t_2.txt"))?, "hello");
    assert_eq!(fs::read_to_string(temp_dir.path().join("decoded/b1_t_2.txt"))?, "hello");
    Ok(())
}
