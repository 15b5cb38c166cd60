//! Content Type Detection
//!
//! Classifies decoded payload bytes into the small fixed set of formats the
//! feed carries: gzip and zip containers, opaque binary, and text split into
//! XML, CSV and plain text.
//!
//! ## Design Principles
//!
//! 1. **Signatures First**: Container magic bytes always win over text heuristics,
//!    even when the remaining bytes look textual
//!
//! 2. **Ordered Detector Chain**: Each detector is a pure predicate over the byte slice
//!    that either settles the classification or stays inconclusive
//!
//! 3. **Total**: Every byte sequence, including the empty one, maps to exactly one
//!    descriptor (the text detector is the terminal link and always answers)
//!
//! ## Usage
//!
//! ```rust
//! use mobility_feed_decoder::types::content_detection::{describe, ContentKind};
//!
//! let descriptor = describe(&[0x1F, 0x8B, 0x08, 0x00]);
//! assert_eq!(descriptor.kind, ContentKind::Gzip);
//! assert_eq!(descriptor.mime_type, "application/gzip");
//! ```

use serde::{Deserialize, Serialize};

/// Gzip member header (ID1, ID2)
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// Zip local file header
pub const ZIP_LOCAL_HEADER_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// UTF-8 byte order mark, dropped before text is decoded
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Bytes inspected by the text-vs-binary heuristic
pub const DEFAULT_SAMPLE_BYTES: usize = 2048;

/// Fraction of control bytes above which a sample counts as binary
pub const DEFAULT_CONTROL_RATIO: f64 = 0.05;

/// Bytes decoded when sub-classifying text
pub const DEFAULT_TEXT_WINDOW_BYTES: usize = 64 * 1024;

/// Tunable thresholds for the statistical text detection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SniffThresholds {
    pub sample_bytes: usize,
    pub control_ratio: f64,
    pub text_window_bytes: usize,
}

impl Default for SniffThresholds {
    fn default() -> Self {
        Self {
            sample_bytes: DEFAULT_SAMPLE_BYTES,
            control_ratio: DEFAULT_CONTROL_RATIO,
            text_window_bytes: DEFAULT_TEXT_WINDOW_BYTES,
        }
    }
}

/// Detected content kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentKind {
    /// GZIP stream (magic: 1F 8B)
    Gzip,
    /// ZIP archive (magic: PK 03 04)
    Zip,
    /// Opaque binary data
    Binary,
    /// XML document (starts with `<` after leading whitespace)
    Xml,
    /// Delimited text (newline plus comma or semicolon)
    Csv,
    /// Anything else that passed the text heuristic
    PlainText,
}

impl ContentKind {
    pub fn extension(&self) -> &'static str {
        match self {
            ContentKind::Gzip => "gz",
            ContentKind::Zip => "zip",
            ContentKind::Binary => "bin",
            ContentKind::Xml => "xml",
            ContentKind::Csv => "csv",
            ContentKind::PlainText => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ContentKind::Gzip => "application/gzip",
            ContentKind::Zip => "application/zip",
            ContentKind::Binary => "application/octet-stream",
            ContentKind::Xml => "application/xml",
            ContentKind::Csv => "text/csv",
            ContentKind::PlainText => "text/plain",
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            ContentKind::Xml | ContentKind::Csv | ContentKind::PlainText
        )
    }

    pub fn descriptor(self) -> ContentDescriptor {
        ContentDescriptor {
            kind: self,
            extension: self.extension(),
            mime_type: self.mime_type(),
            is_text: self.is_text(),
        }
    }
}

/// Extension, MIME type and text flag for a byte sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDescriptor {
    #[serde(skip)]
    pub kind: ContentKind,
    pub extension: &'static str,
    pub mime_type: &'static str,
    pub is_text: bool,
}

impl ContentDescriptor {
    pub fn is_gzip(&self) -> bool {
        self.kind == ContentKind::Gzip
    }
}

type Detector = fn(&[u8], &SniffThresholds) -> Option<ContentKind>;

/// Detectors in precedence order; the last one always answers
const DETECTORS: &[Detector] = &[detect_gzip, detect_zip, detect_binary, detect_text];

/// Classify bytes using the default thresholds
pub fn describe(data: &[u8]) -> ContentDescriptor {
    describe_with(data, &SniffThresholds::default())
}

/// Classify bytes using explicit thresholds
pub fn describe_with(data: &[u8], thresholds: &SniffThresholds) -> ContentDescriptor {
    DETECTORS
        .iter()
        .find_map(|detect| detect(data, thresholds))
        .unwrap_or(ContentKind::Binary)
        .descriptor()
}

/// Check whether bytes start with the gzip signature
pub fn has_gzip_magic(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Slice without a leading UTF-8 byte order mark
pub fn strip_utf8_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&UTF8_BOM[..]).unwrap_or(data)
}

fn detect_gzip(data: &[u8], _: &SniffThresholds) -> Option<ContentKind> {
    has_gzip_magic(data).then_some(ContentKind::Gzip)
}

fn detect_zip(data: &[u8], _: &SniffThresholds) -> Option<ContentKind> {
    data.starts_with(&ZIP_LOCAL_HEADER_MAGIC)
        .then_some(ContentKind::Zip)
}

/// Binary when the sample holds a NUL byte or too many control bytes.
/// TAB, LF, VT, FF and CR are not counted as control bytes.
fn detect_binary(data: &[u8], thresholds: &SniffThresholds) -> Option<ContentKind> {
    let sample = &data[..data.len().min(thresholds.sample_bytes)];
    if sample.contains(&0x00) {
        return Some(ContentKind::Binary);
    }

    let control = sample
        .iter()
        .filter(|&&b| b < 0x09 || (b > 0x0D && b < 0x20))
        .count();
    let ratio = control as f64 / sample.len().max(1) as f64;

    (ratio > thresholds.control_ratio).then_some(ContentKind::Binary)
}

fn detect_text(data: &[u8], thresholds: &SniffThresholds) -> Option<ContentKind> {
    let window = strip_utf8_bom(&data[..data.len().min(thresholds.text_window_bytes)]);
    let text = String::from_utf8_lossy(window);
    let text = text.trim_start();

    if text.starts_with('<') {
        return Some(ContentKind::Xml);
    }

    if text.contains('\n') && (text.contains(',') || text.contains(';')) {
        return Some(ContentKind::Csv);
    }

    Some(ContentKind::PlainText)
}
