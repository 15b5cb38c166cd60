//! XML export of decoded binaries
//!
//! Text payloads are emitted inside `<decoded>` CDATA sections, binary payloads
//! as base64 inside `<decodedBase64>`. A `]]>` sequence in the payload is split
//! across two CDATA sections, and characters XML 1.0 cannot carry become U+FFFD.

use super::{response_xml_length, ExportedItem};
use crate::session::DecodeSession;
use crate::utils::time::iso_timestamp;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Render the decoded-binaries XML document for a session
pub fn decoded_binaries_xml(session: &DecodeSession, generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!(
        "<decodedBinaries generatedAt=\"{}\" decodedAt=\"{}\" responseXmlLength=\"{}\">\n",
        escape_xml(&iso_timestamp(&generated_at)),
        escape_xml(&iso_timestamp(&session.decoded_at())),
        response_xml_length(session.source_text())
    ));

    for item in session.items() {
        push_item(&mut out, &ExportedItem::from_item(item));
    }

    out.push_str("</decodedBinaries>\n");
    out
}

fn push_item(out: &mut String, item: &ExportedItem) {
    out.push_str(&format!(
        "  <binary id=\"{}\" type=\"{}\" rawBytes=\"{}\" decodedBytes=\"{}\" rawExt=\"{}\" decodedExt=\"{}\" rawMime=\"{}\" decodedMime=\"{}\" wasGunzipped=\"{}\">\n",
        escape_xml(item.id),
        escape_xml(item.binary_type),
        item.raw.bytes,
        item.decoded.bytes,
        escape_xml(item.raw.ext),
        escape_xml(item.decoded.ext),
        escape_xml(item.raw.mime),
        escape_xml(item.decoded.mime),
        item.was_gunzipped
    ));

    if let Some(error) = item.error {
        out.push_str(&format!("    <error>{}</error>\n", escape_xml(error)));
    } else {
        if let Some(reason) = item.gunzip_error {
            out.push_str(&format!(
                "    <gunzipError>{}</gunzipError>\n",
                escape_xml(reason)
            ));
        }
        if let Some(text) = &item.decoded_text {
            out.push_str(&format!("    <decoded>{}</decoded>\n", cdata(text)));
        } else if let Some(encoded) = &item.decoded_base64 {
            out.push_str(&format!(
                "    <decodedBase64>{}</decodedBase64>\n",
                cdata(encoded)
            ));
        }
    }

    out.push_str("  </binary>\n");
}

/// Outside the XML 1.0 `Char` production: C0 controls other than TAB, LF and
/// CR, and the noncharacters U+FFFE and U+FFFF
fn is_forbidden_xml_char(c: char) -> bool {
    matches!(c, '\u{0}'..='\u{8}' | '\u{B}' | '\u{C}' | '\u{E}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}')
}

/// Replace characters XML 1.0 forbids with U+FFFD
pub fn xml_safe_text(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_forbidden_xml_char) {
        Cow::Owned(
            text.chars()
                .map(|c| {
                    if is_forbidden_xml_char(c) {
                        char::REPLACEMENT_CHARACTER
                    } else {
                        c
                    }
                })
                .collect(),
        )
    } else {
        Cow::Borrowed(text)
    }
}

/// Escape text for use in attribute values and element content
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in xml_safe_text(text).chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap text in CDATA, splitting any embedded `]]>`
pub fn cdata(text: &str) -> String {
    format!(
        "<![CDATA[{}]]>",
        xml_safe_text(text).replace("]]>", "]]]]><![CDATA[>")
    )
}
