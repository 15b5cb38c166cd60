//! Common Test Utilities
//!
//! Fixture builders shared by the integration tests: feed envelopes, payload
//! encoding and a representative fuel-price publication.

#![allow(dead_code)]

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;

/// A fuel-price publication with one station and one diesel price
pub const FUEL_PUBLICATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<d2LogicalModel xmlns="http://datex2.eu/schema/2/2_0" extensionName="FuelPricePublication">
  <payloadPublication id="fp-1" type="FuelPricePublication">
    <petrolStationInformation>
      <petrolStationReference id="S1" version="4"/>
      <fuelPriceDiesel>
        <price>1.659</price>
        <dateOfPrice>2024-02-01T07:00:00Z</dateOfPrice>
      </fuelPriceDiesel>
    </petrolStationInformation>
  </payloadPublication>
</d2LogicalModel>"#;

/// A corrupt gzip stream: valid header, invalid deflate block
pub const CORRUPT_GZIP: [u8; 14] = [
    0x1F, 0x8B, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
];

/// Gzip-compress bytes
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Standard base64 of bytes
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Base64 wrapped at 76 characters, as feed responses usually carry it
pub fn encode_wrapped(data: &[u8]) -> String {
    let encoded = encode(data);
    encoded
        .as_bytes()
        .chunks(76)
        .map(|line| std::str::from_utf8(line).unwrap())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap `(id, type, base64)` triples in a namespaced feed response
pub fn envelope(binaries: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <soap:Envelope xmlns:soap=\"http://www.w3.org/2003/05/soap-envelope\" xmlns:m=\"urn:feed\">\n\
         <soap:Body><m:response>\n",
    );
    for (id, binary_type, base64_text) in binaries {
        xml.push_str(&format!(
            "<m:binary id=\"{}\" type=\"{}\">\n{}\n</m:binary>\n",
            id, binary_type, base64_text
        ));
    }
    xml.push_str("</m:response></soap:Body>\n</soap:Envelope>\n");
    xml
}

/// Envelope with a gzip-compressed fuel publication (`b1`) and a plain text note (`b2`)
pub fn fuel_envelope() -> String {
    envelope(&[
        ("b1", "fuel", encode_wrapped(&gzip(FUEL_PUBLICATION.as_bytes())).as_str()),
        ("b2", "note", encode(b"hello").as_str()),
    ])
}

/// The same payloads as [`fuel_envelope`], both carried as `<binary id="b1" type="t">`
pub fn duplicate_id_envelope() -> String {
    envelope(&[
        ("b1", "t", encode(&gzip(FUEL_PUBLICATION.as_bytes())).as_str()),
        ("b1", "t", encode(b"hello").as_str()),
    ])
}

/// [`FUEL_PUBLICATION`] prefixed with a UTF-8 byte order mark
pub fn fuel_publication_with_bom() -> Vec<u8> {
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(FUEL_PUBLICATION.as_bytes());
    bytes
}
