//! Record Extractor for fuel-price publications
//!
//! Reads decoded XML payloads and flattens every station's fuel prices and
//! override periods into rows. A payload that is not XML, does not parse, or
//! is not a fuel-price publication simply contributes no rows: absence of the
//! schema is an expected outcome, not an error.

use crate::decoder::DecodedItem;
use crate::types::{FuelPriceRow, OverridePeriodRow, RecordSet};
use crate::xml::{children_named, descendant_text, descendants_named, local_attribute, parse_document};
use roxmltree::Node;
use tracing::{debug, info};

/// Extension name identifying fuel-price publications
pub const FUEL_PRICE_PUBLICATION: &str = "FuelPricePublication";

/// Prefix of per-fuel child elements (`fuelPriceDiesel`, `fuelPriceE5`, ...)
pub const FUEL_PRICE_PREFIX: &str = "fuelPrice";

/// Fuel name used when an element is named exactly `fuelPrice`
pub const UNKNOWN_FUEL: &str = "Unknown";

/// Extract rows from every XML item of a decode session
pub fn extract_records(items: &[DecodedItem]) -> RecordSet {
    let mut records = RecordSet::default();
    for item in items {
        if let Some(item_records) = extract_records_from_item(item) {
            records.extend(item_records);
        }
    }

    info!(
        "Extracted {} fuel price row(s) and {} override period row(s)",
        records.fuel_prices.len(),
        records.override_periods.len()
    );
    records
}

/// Extract rows from one item; `None` when the item is not a fuel-price publication
pub fn extract_records_from_item(item: &DecodedItem) -> Option<RecordSet> {
    if !item.is_xml() {
        return None;
    }
    let text = item.decoded_text()?;
    let records = extract_from_xml(&text, &item.id);
    if records.is_none() {
        debug!("Binary {} is not a fuel price publication", item.id);
    }
    records
}

/// Extract rows from an XML payload attributed to `binary_id`
pub fn extract_from_xml(xml_text: &str, binary_id: &str) -> Option<RecordSet> {
    let document = match parse_document(xml_text) {
        Ok(document) => document,
        Err(e) => {
            debug!("Skipping unparsable payload {}: {}", binary_id, e);
            return None;
        }
    };

    let root = document.root_element();
    let root_extension = local_attribute(root, "extensionName").unwrap_or_default();
    let publications: Vec<Node> = descendants_named(root, "payloadPublication").collect();

    let is_fuel_publication = root_extension == FUEL_PRICE_PUBLICATION
        || publications.iter().any(|publication| {
            local_attribute(*publication, "type")
                .is_some_and(|t| t.contains(FUEL_PRICE_PUBLICATION))
        });
    if !is_fuel_publication {
        return None;
    }

    // A bare publication document has no wrapper; treat the root as the publication
    let publications = if publications.is_empty() {
        vec![root]
    } else {
        publications
    };

    let mut records = RecordSet::default();
    for publication in publications {
        let context = PublicationContext {
            publication_id: local_attribute(publication, "id").unwrap_or_default(),
            publication_type: local_attribute(publication, "type")
                .filter(|t| !t.is_empty())
                .unwrap_or(root_extension),
            binary_id,
        };

        for station in descendants_named(publication, "petrolStationInformation") {
            extract_station(station, &context, &mut records);
        }
    }

    Some(records)
}

struct PublicationContext<'a> {
    publication_id: &'a str,
    publication_type: &'a str,
    binary_id: &'a str,
}

fn extract_station(station: Node, context: &PublicationContext, records: &mut RecordSet) {
    let reference = children_named(station, "petrolStationReference").next();
    let station_id = reference
        .and_then(|r| local_attribute(r, "id"))
        .unwrap_or_default();
    let station_version = reference
        .and_then(|r| local_attribute(r, "version"))
        .unwrap_or_default();

    for fuel_element in station
        .children()
        .filter(|n| n.is_element() && n.tag_name().name().starts_with(FUEL_PRICE_PREFIX))
    {
        let suffix = &fuel_element.tag_name().name()[FUEL_PRICE_PREFIX.len()..];
        let fuel = if suffix.is_empty() { UNKNOWN_FUEL } else { suffix };
        let price = descendant_text(fuel_element, "price");
        let date_of_price = descendant_text(fuel_element, "dateOfPrice");

        if price.is_empty() && date_of_price.is_empty() {
            continue;
        }

        records.fuel_prices.push(FuelPriceRow {
            station_id: station_id.to_string(),
            station_version: station_version.to_string(),
            fuel: fuel.to_string(),
            price,
            date_of_price,
            publication_id: context.publication_id.to_string(),
            publication_type: context.publication_type.to_string(),
            binary_id: context.binary_id.to_string(),
        });
    }

    for period in descendants_named(station, "overrideOpen") {
        let start_of_period = descendant_text(period, "startOfPeriod");
        let end_of_period = descendant_text(period, "endOfPeriod");

        if start_of_period.is_empty() && end_of_period.is_empty() {
            continue;
        }

        records.override_periods.push(OverridePeriodRow {
            station_id: station_id.to_string(),
            station_version: station_version.to_string(),
            start_of_period,
            end_of_period,
            publication_id: context.publication_id.to_string(),
            publication_type: context.publication_type.to_string(),
            binary_id: context.binary_id.to_string(),
        });
    }
}
