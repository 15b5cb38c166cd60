//! Export documents rendered from decoded sessions

use chrono::{TimeZone, Utc};
use mobility_feed_decoder::decoder::DecodeOptions;
use mobility_feed_decoder::export::{render, ExportFormat};
use mobility_feed_decoder::session::DecodeSession;
use serde_json::Value;

use crate::common::{encode, envelope, fuel_envelope, CORRUPT_GZIP};

fn fuel_session() -> DecodeSession {
    DecodeSession::decode(fuel_envelope(), &DecodeOptions::default()).unwrap()
}

fn single(session: &DecodeSession, format: ExportFormat) -> String {
    let at = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
    let mut artifacts = render(session, format, at).unwrap();
    assert_eq!(artifacts.len(), 1);
    artifacts.remove(0).contents
}

#[test]
fn test_json_export_lists_every_item() {
    let session = fuel_session();
    let json: Value = serde_json::from_str(&single(&session, ExportFormat::Json)).unwrap();

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["wasGunzipped"], true);
    assert_eq!(items[0]["raw"]["ext"], "gz");
    assert_eq!(items[0]["decoded"]["ext"], "xml");
    assert_eq!(items[0]["decoded"]["mime"], "application/xml");
    assert!(items[0]["decodedText"]
        .as_str()
        .unwrap()
        .contains("petrolStationInformation"));
    assert_eq!(items[1]["wasGunzipped"], false);
    assert_eq!(items[1]["decodedText"], "hello");
    assert_eq!(json["responseXmlLength"], session.source_text().len());
}

#[test]
fn test_corrupt_gzip_is_kept_in_exports() {
    let xml = envelope(&[("z", "blob", encode(&CORRUPT_GZIP).as_str())]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default()).unwrap();

    let json: Value = serde_json::from_str(&single(&session, ExportFormat::Json)).unwrap();
    let item = &json["items"][0];
    assert!(item["error"].is_null());
    assert!(!item["gunzipError"].as_str().unwrap().is_empty());
    assert_eq!(item["wasGunzipped"], false);
    assert_eq!(item["decoded"]["ext"], "gz");
    assert_eq!(item["decoded"]["bytes"], CORRUPT_GZIP.len());
    assert_eq!(item["decodedBase64"], encode(&CORRUPT_GZIP));

    let xml_export = single(&session, ExportFormat::Xml);
    assert!(xml_export.contains("<gunzipError>"));
    assert!(xml_export.contains(&format!(
        "<decodedBase64><![CDATA[{}]]></decodedBase64>",
        encode(&CORRUPT_GZIP)
    )));
    assert!(xml_export.contains("wasGunzipped=\"false\""));
}

#[test]
fn test_long_and_wide_fuel_csv() {
    let session = fuel_session();

    assert_eq!(
        single(&session, ExportFormat::FuelCsv),
        "station_id,station_version,fuel,price,date_of_price,publication_id,publication_type,binary_id\r\n\
         S1,4,Diesel,1.659,2024-02-01T07:00:00Z,fp-1,FuelPricePublication,b1\r\n"
    );

    let at = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
    let wide = render(&session, ExportFormat::WideCsv, at).unwrap();
    assert_eq!(wide.len(), 1);
    assert_eq!(wide[0].file_name, "station_S1_wide.csv");
    assert_eq!(
        wide[0].contents,
        "date_of_price,Diesel\r\n2024-02-01T07:00:00Z,1.659\r\n"
    );

    // No override periods in the publication: header only
    assert_eq!(
        single(&session, ExportFormat::OverrideCsv).lines().count(),
        1
    );
}

#[test]
fn test_records_json() {
    let session = fuel_session();
    let json: Value = serde_json::from_str(&single(&session, ExportFormat::RecordsJson)).unwrap();

    assert_eq!(json["fuelPrices"].as_array().unwrap().len(), 1);
    assert_eq!(json["fuelPrices"][0]["stationId"], "S1");
    assert_eq!(json["overridePeriods"].as_array().unwrap().len(), 0);
}

#[test]
fn test_xml_export_escapes_attributes() {
    let xml = envelope(&[("a&amp;b", "t&lt;1", encode(b"<x>]]></x>").as_str())]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default()).unwrap();

    let rendered = single(&session, ExportFormat::Xml);
    assert!(rendered.contains("id=\"a&amp;b\" type=\"t&lt;1\""));
    assert!(rendered.contains("<decoded><![CDATA[<x>]]]]><![CDATA[></x>]]></decoded>"));
    assert!(roxmltree::Document::parse(&rendered).is_ok());
}

#[test]
fn test_wide_csv_station_names_do_not_collide() {
    let publication = r#"<model extensionName="FuelPricePublication">
      <payloadPublication id="p">
        <petrolStationInformation>
          <petrolStationReference id="a/b" version="1"/>
          <fuelPriceDiesel><price>1.5</price><dateOfPrice>2024-01-01</dateOfPrice></fuelPriceDiesel>
        </petrolStationInformation>
        <petrolStationInformation>
          <petrolStationReference id="a_b" version="1"/>
          <fuelPriceDiesel><price>1.6</price><dateOfPrice>2024-01-01</dateOfPrice></fuelPriceDiesel>
        </petrolStationInformation>
      </payloadPublication>
    </model>"#;
    let xml = envelope(&[("p", "fuel", encode(publication.as_bytes()).as_str())]);
    let session = DecodeSession::decode(xml, &DecodeOptions::default()).unwrap();

    let wide = render(&session, ExportFormat::WideCsv, Utc::now()).unwrap();
    let names: Vec<&str> = wide.iter().map(|a| a.file_name.as_str()).collect();
    assert_eq!(names, vec!["station_a_b_wide.csv", "station_a_b_2_wide.csv"]);
    assert!(wide[0].contents.ends_with("2024-01-01,1.5\r\n"));
    assert!(wide[1].contents.ends_with("2024-01-01,1.6\r\n"));
}
