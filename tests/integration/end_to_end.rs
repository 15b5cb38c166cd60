//! Full pipeline: envelope → decoded items → fuel-price rows

use mobility_feed_decoder::decoder::{decode_binaries, DecodeOptions};
use mobility_feed_decoder::envelope::extract_binaries;
use mobility_feed_decoder::errors::AppError;
use mobility_feed_decoder::session::DecodeSession;
use mobility_feed_decoder::types::ContentKind;

use crate::common::{
    duplicate_id_envelope, encode, envelope, fuel_envelope, fuel_publication_with_bom, gzip,
    FUEL_PUBLICATION,
};

#[test]
fn test_gzip_publication_and_text_note() -> anyhow::Result<()> {
    let session = DecodeSession::decode(fuel_envelope(), &DecodeOptions::default())?;
    let items = session.items();
    assert_eq!(items.len(), 2);

    let fuel = &items[0];
    assert_eq!(fuel.id, "b1");
    assert_eq!(fuel.binary_type, "fuel");
    assert!(fuel.was_gunzipped());
    let payload = fuel.payload().unwrap();
    assert_eq!(payload.raw_info.kind, ContentKind::Gzip);
    assert_eq!(payload.decoded_info.kind, ContentKind::Xml);
    assert_eq!(payload.decoded_bytes, FUEL_PUBLICATION.as_bytes());
    assert_eq!(payload.raw_filename, "b1_fuel.gz");
    assert_eq!(payload.decoded_filename, "b1_fuel.xml");

    let note = &items[1];
    assert!(!note.was_gunzipped());
    assert_eq!(note.payload().unwrap().decoded_info.kind, ContentKind::PlainText);
    assert_eq!(note.decoded_text().as_deref(), Some("hello"));

    let records = session.records();
    assert_eq!(records.fuel_prices.len(), 1);
    assert!(records.override_periods.is_empty());

    let row = &records.fuel_prices[0];
    assert_eq!(row.station_id, "S1");
    assert_eq!(row.station_version, "4");
    assert_eq!(row.fuel, "Diesel");
    assert_eq!(row.price, "1.659");
    assert_eq!(row.date_of_price, "2024-02-01T07:00:00Z");
    assert_eq!(row.publication_id, "fp-1");
    assert_eq!(row.publication_type, "FuelPricePublication");
    assert_eq!(row.binary_id, "b1");

    Ok(())
}

#[test]
fn test_malformed_outer_xml_yields_no_items() {
    let broken = "<soap:Envelope><binary id=\"x\">aGVsbG8=</binary>";

    assert!(matches!(extract_binaries(broken), Err(AppError::InvalidXml(_))));
    assert!(matches!(
        DecodeSession::decode(broken, &DecodeOptions::default()),
        Err(AppError::InvalidXml(_))
    ));
}

#[test]
fn test_missing_attributes_get_defaults() -> anyhow::Result<()> {
    let xml = format!(
        "<r><binary>{}</binary><binary id=\"\" type=\"\">{}</binary></r>",
        encode(b"one"),
        encode(b"two")
    );
    let descriptors = extract_binaries(&xml)?;
    assert_eq!(descriptors[0].id, "binary-1");
    assert_eq!(descriptors[0].binary_type, "binary");
    assert_eq!(descriptors[1].id, "binary-2");

    let items = decode_binaries(&descriptors, &DecodeOptions::default());
    assert_eq!(items[0].base_name, "binary-1_binary");
    Ok(())
}

#[test]
fn test_base64url_and_standard_decode_identically() -> anyhow::Result<()> {
    // 0xFB 0xFF 0xBF encodes to "+/+/" and "-_-_"; "+/8=" loses its padding
    let xml = envelope(&[("s", "t", "+/+/+/8="), ("u", "t", "-_-_-_8")]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default())?;
    let items = session.items();

    let standard = items[0].payload().unwrap();
    let url_safe = items[1].payload().unwrap();
    assert_eq!(standard.raw_bytes, url_safe.raw_bytes);
    assert_eq!(standard.raw_bytes, vec![0xFB, 0xFF, 0xBF, 0xFB, 0xFF]);
    Ok(())
}

#[test]
fn test_redecoding_is_idempotent() -> anyhow::Result<()> {
    let source = fuel_envelope();
    let first = DecodeSession::decode(source.as_str(), &DecodeOptions::default())?;
    let second = DecodeSession::decode(source.as_str(), &DecodeOptions::default())?;

    assert_eq!(first.items(), second.items());
    assert_eq!(first.records(), second.records());
    Ok(())
}

#[test]
fn test_one_bad_item_does_not_stop_the_batch() -> anyhow::Result<()> {
    let xml = envelope(&[
        ("bad", "t", "@@@"),
        ("ok", "t", encode(b"<ok/>").as_str()),
    ]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default())?;

    assert!(session.items()[0].error().is_some());
    assert!(session.items()[0].payload().is_none());
    assert!(session.items()[1].is_xml());
    Ok(())
}

#[test]
fn test_byte_order_mark_publication_yields_rows() -> anyhow::Result<()> {
    let bom = fuel_publication_with_bom();
    let xml = envelope(&[
        ("plain", "fuel", encode(&bom).as_str()),
        ("zipped", "fuel", encode(&gzip(&bom)).as_str()),
    ]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default())?;

    for item in session.items() {
        assert_eq!(item.payload().unwrap().decoded_info.kind, ContentKind::Xml);
        assert!(item.decoded_text().unwrap().starts_with("<?xml"));
    }

    let records = session.records();
    assert_eq!(records.fuel_prices.len(), 2);
    assert_eq!(records.fuel_prices[0].binary_id, "plain");
    assert_eq!(records.fuel_prices[1].binary_id, "zipped");
    assert_eq!(records.fuel_prices[1].price, "1.659");
    Ok(())
}

#[test]
fn test_duplicate_ids_decode_independently() -> anyhow::Result<()> {
    let session = DecodeSession::decode(duplicate_id_envelope(), &DecodeOptions::default())?;
    let items = session.items();
    assert_eq!(items.len(), 2);

    assert!(items[0].was_gunzipped());
    assert!(!items[1].was_gunzipped());
    assert_eq!(items[0].base_name, "b1_t_1");
    assert_eq!(items[1].base_name, "b1_t_2");

    let records = session.records();
    assert_eq!(records.fuel_prices.len(), 1);
    assert!(records.override_periods.is_empty());
    Ok(())
}

#[test]
fn test_multi_member_gzip_is_fully_inflated() -> anyhow::Result<()> {
    let mut stream = gzip(b"first-member,");
    stream.extend(gzip(b"second-member"));
    let xml = envelope(&[("m", "t", encode(&stream).as_str())]);

    let session = DecodeSession::decode(xml, &DecodeOptions::default())?;
    let item = &session.items()[0];
    assert!(item.was_gunzipped());
    assert!(item.gunzip_error().is_none());
    assert_eq!(item.decoded_text().as_deref(), Some("first-member,second-member"));
    Ok(())
}
