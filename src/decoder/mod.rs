//! Decode Orchestrator
//!
//! Turns the raw `<binary>` descriptors of one feed response into decoded
//! items: base64 decode, sniff, conditional gunzip, sniff again, preview and
//! file names. Items are processed sequentially in document order and every
//! per-item failure is captured on the item itself, so one malformed payload
//! never prevents the rest from decoding.
//!
//! Key Features:
//! - Chunked base64/base64url decoding
//! - Signature and heuristic content sniffing before and after decompression
//! - Best-effort gzip with fallback to the compressed bytes
//! - Filesystem-safe names derived from the binary id and type

pub mod base64;
pub mod error;
pub mod gzip;
pub mod output;
pub mod preview;

pub use error::{DecoderError, DecoderResult};

use self::base64::decode_base64_chunked;
use self::gzip::{gunzip_with_fallback, GunzipOutcome};
use self::preview::{build_preview, PreviewLimits};
use crate::types::content_detection::{
    describe_with, strip_utf8_bom, ContentDescriptor, ContentKind, SniffThresholds,
};
use crate::types::RawBinaryDescriptor;
use crate::utils::filename::safe_base_name;
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};

/// Error recorded for a `<binary>` element without content
pub const EMPTY_CONTENT_ERROR: &str = "Empty <binary> content.";

/// Tunables for one decode run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    pub base64_chunk_chars: usize,
    pub sniff: SniffThresholds,
    pub preview: PreviewLimits,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            base64_chunk_chars: self::base64::DEFAULT_CHUNK_CHARS,
            sniff: SniffThresholds::default(),
            preview: PreviewLimits::default(),
        }
    }
}

/// Bytes and classifications of a successfully decoded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPayload {
    pub raw_bytes: Vec<u8>,
    pub raw_info: ContentDescriptor,
    /// Equals `raw_bytes` unless gunzip succeeded
    pub decoded_bytes: Vec<u8>,
    pub decoded_info: ContentDescriptor,
    pub was_gunzipped: bool,
    pub gunzip_error: Option<String>,
    pub preview: String,
    pub raw_filename: String,
    pub decoded_filename: String,
}

/// Terminal state of one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Decoded(DecodedPayload),
    Failed { error: String },
}

/// One `<binary>` element after orchestration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedItem {
    pub index: usize,
    pub id: String,
    pub binary_type: String,
    /// Safe file base name derived from `{id}_{type}`
    pub base_name: String,
    pub outcome: ItemOutcome,
}

impl DecodedItem {
    /// Decoded payload, absent when the item failed
    pub fn payload(&self) -> Option<&DecodedPayload> {
        match &self.outcome {
            ItemOutcome::Decoded(payload) => Some(payload),
            ItemOutcome::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            ItemOutcome::Failed { error } => Some(error),
            ItemOutcome::Decoded(_) => None,
        }
    }

    pub fn was_gunzipped(&self) -> bool {
        self.payload().is_some_and(|p| p.was_gunzipped)
    }

    pub fn gunzip_error(&self) -> Option<&str> {
        self.payload().and_then(|p| p.gunzip_error.as_deref())
    }

    /// True when the decoded bytes were classified as XML
    pub fn is_xml(&self) -> bool {
        self.payload()
            .is_some_and(|p| p.decoded_info.kind == ContentKind::Xml)
    }

    /// Decoded bytes as text, only for text-classified payloads; a leading BOM is dropped
    pub fn decoded_text(&self) -> Option<Cow<'_, str>> {
        self.payload()
            .filter(|p| p.decoded_info.is_text)
            .map(|p| String::from_utf8_lossy(strip_utf8_bom(&p.decoded_bytes)))
    }

    /// One-line description for console output
    pub fn summary(&self) -> String {
        match &self.outcome {
            ItemOutcome::Failed { error } => {
                format!("{} ({}) FAILED: {}", self.id, self.binary_type, error)
            }
            ItemOutcome::Decoded(p) => {
                let mut line = format!(
                    "{} ({}) {} bytes {} -> {} bytes {}",
                    self.id,
                    self.binary_type,
                    p.raw_bytes.len(),
                    p.raw_info.extension,
                    p.decoded_bytes.len(),
                    p.decoded_info.extension
                );
                if p.was_gunzipped {
                    line.push_str(" [gunzipped]");
                }
                if let Some(reason) = &p.gunzip_error {
                    line.push_str(&format!(" [gunzip failed: {}]", reason));
                }
                line
            }
        }
    }
}

/// Decode every descriptor, in order, isolating failures per item
pub fn decode_binaries(
    descriptors: &[RawBinaryDescriptor],
    options: &DecodeOptions,
) -> Vec<DecodedItem> {
    let base_names = unique_base_names(descriptors);
    let items: Vec<DecodedItem> = descriptors
        .iter()
        .zip(base_names)
        .map(|(descriptor, base_name)| decode_named(descriptor, base_name, options))
        .collect();

    let failed = items.iter().filter(|item| item.error().is_some()).count();
    let gunzipped = items.iter().filter(|item| item.was_gunzipped()).count();
    info!(
        "Decoded {} binary item(s): {} gunzipped, {} failed",
        items.len(),
        gunzipped,
        failed
    );

    items
}

/// Decode a single descriptor
pub fn decode_item(descriptor: &RawBinaryDescriptor, options: &DecodeOptions) -> DecodedItem {
    decode_named(descriptor, item_base_name(descriptor), options)
}

fn item_base_name(descriptor: &RawBinaryDescriptor) -> String {
    safe_base_name(&format!("{}_{}", descriptor.id, descriptor.binary_type))
}

/// Base names for a batch, distinct across items
///
/// Items sharing `{id}_{type}` get their 1-based position appended
/// (`b1_t_1`, `b1_t_2`), so payload files never overwrite each other.
fn unique_base_names(descriptors: &[RawBinaryDescriptor]) -> Vec<String> {
    let names: Vec<String> = descriptors.iter().map(item_base_name).collect();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut used: HashSet<String> = HashSet::new();
    let mut unique = Vec::with_capacity(names.len());
    for (descriptor, name) in descriptors.iter().zip(&names) {
        let base = if counts[name.as_str()] > 1 {
            format!("{}_{}", name, descriptor.index + 1)
        } else {
            name.clone()
        };

        // A suffixed name can still clash with another item's plain name
        let mut candidate = base.clone();
        let mut attempt = 2;
        while used.contains(&candidate) {
            candidate = format!("{}_{}", base, attempt);
            attempt += 1;
        }
        used.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}

fn decode_named(
    descriptor: &RawBinaryDescriptor,
    base_name: String,
    options: &DecodeOptions,
) -> DecodedItem {
    let outcome = if descriptor.base64_text.is_empty() {
        warn!("Binary {} has no content", descriptor.id);
        ItemOutcome::Failed {
            error: EMPTY_CONTENT_ERROR.to_string(),
        }
    } else {
        match decode_payload(descriptor, &base_name, options) {
            Ok(payload) => ItemOutcome::Decoded(payload),
            Err(e) => {
                warn!("Failed to decode binary {}: {}", descriptor.id, e);
                ItemOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    };

    let item = DecodedItem {
        index: descriptor.index,
        id: descriptor.id.clone(),
        binary_type: descriptor.binary_type.clone(),
        base_name,
        outcome,
    };
    debug!("{}", item.summary());
    item
}

fn decode_payload(
    descriptor: &RawBinaryDescriptor,
    base_name: &str,
    options: &DecodeOptions,
) -> DecoderResult<DecodedPayload> {
    let raw_bytes = decode_base64_chunked(&descriptor.base64_text, options.base64_chunk_chars)?;
    let raw_info = describe_with(&raw_bytes, &options.sniff);

    let (decoded_bytes, was_gunzipped, gunzip_error) = if raw_info.is_gzip() {
        match gunzip_with_fallback(&raw_bytes) {
            GunzipOutcome::Decompressed(bytes) => (bytes, true, None),
            GunzipOutcome::Failed { bytes, reason } => {
                warn!(
                    "Keeping compressed bytes for binary {}: {}",
                    descriptor.id, reason
                );
                (bytes, false, Some(reason))
            }
            GunzipOutcome::NotApplicable => (raw_bytes.clone(), false, None),
        }
    } else {
        (raw_bytes.clone(), false, None)
    };

    let decoded_info = describe_with(&decoded_bytes, &options.sniff);
    let preview = build_preview(&decoded_bytes, &decoded_info, &options.preview);

    Ok(DecodedPayload {
        raw_filename: format!("{}.{}", base_name, raw_info.extension),
        decoded_filename: format!("{}.{}", base_name, decoded_info.extension),
        raw_bytes,
        raw_info,
        decoded_bytes,
        decoded_info,
        was_gunzipped,
        gunzip_error,
        preview,
    })
}
