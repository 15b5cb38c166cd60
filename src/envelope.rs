//! Binary Extractor
//!
//! Locates every `<binary>` element in the outer feed response, whatever its
//! namespace, and lifts out its identifiers and base64 text. This is the only
//! stage where one error aborts the batch: without a parsable document no
//! payload can be located.

use crate::errors::AppResult;
use crate::types::RawBinaryDescriptor;
use crate::xml::{descendants_named, parse_document, text_content};
use tracing::{debug, info};

/// Local name of the payload-carrying element
pub const BINARY_ELEMENT: &str = "binary";

/// Type used when a `<binary>` element carries no `type` attribute
pub const DEFAULT_BINARY_TYPE: &str = "binary";

/// Extract all `<binary>` payload descriptors in document order
pub fn extract_binaries(xml_text: &str) -> AppResult<Vec<RawBinaryDescriptor>> {
    let document = parse_document(xml_text)?;

    let descriptors: Vec<RawBinaryDescriptor> =
        descendants_named(document.root_element(), BINARY_ELEMENT)
            .enumerate()
            .map(|(index, element)| {
                let id = non_empty(element.attribute("id"))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("binary-{}", index + 1));
                let binary_type = non_empty(element.attribute("type"))
                    .unwrap_or(DEFAULT_BINARY_TYPE)
                    .to_string();
                let base64_text: String = text_content(element)
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();

                debug!(
                    "Found <binary> #{} id={} type={} ({} base64 chars)",
                    index + 1,
                    id,
                    binary_type,
                    base64_text.len()
                );

                RawBinaryDescriptor {
                    index,
                    id,
                    binary_type,
                    base64_text,
                }
            })
            .collect();

    info!("Located {} <binary> element(s)", descriptors.len());
    Ok(descriptors)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
