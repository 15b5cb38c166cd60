//! Transport Data Feed Binary Decoder - Type System
//!
//! - `content_detection`: Byte sniffing into gzip/zip/binary/xml/csv/text descriptors
//! - `records`: Fuel-price and override-period rows extracted from publications

pub mod content_detection;
pub mod records;

pub use content_detection::{describe, describe_with, ContentDescriptor, ContentKind};
pub use records::{FuelPriceRow, OverridePeriodRow, RecordSet};

/// One `<binary>` element found in the outer response document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBinaryDescriptor {
    /// Zero-based position in document order
    pub index: usize,
    pub id: String,
    pub binary_type: String,
    /// Element text with all whitespace removed
    pub base64_text: String,
}
