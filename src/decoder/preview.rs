//! Human-readable previews of decoded payloads

use crate::types::content_detection::{strip_utf8_bom, ContentDescriptor};
use serde::{Deserialize, Serialize};

/// Size limits for previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewLimits {
    /// Bytes shown in a hex dump of binary content
    pub hex_bytes: usize,
    /// Bytes decoded before truncating text content
    pub text_bytes: usize,
    /// Characters kept from decoded text
    pub text_chars: usize,
}

impl Default for PreviewLimits {
    fn default() -> Self {
        Self {
            hex_bytes: 64,
            text_bytes: 48 * 1024,
            text_chars: 4000,
        }
    }
}

const HEX_BYTES_PER_LINE: usize = 16;

/// Build a preview: hex dump for binary content, truncated text otherwise
pub fn build_preview(data: &[u8], info: &ContentDescriptor, limits: &PreviewLimits) -> String {
    if info.is_text {
        text_preview(data, limits)
    } else {
        hex_preview(data, limits.hex_bytes)
    }
}

/// Offset-prefixed hex dump of the first `max_bytes` bytes
///
/// ```
/// use mobility_feed_decoder::decoder::preview::hex_preview;
/// assert_eq!(hex_preview(&[0x1f, 0x8b], 64), "00000000  1f 8b");
/// ```
pub fn hex_preview(data: &[u8], max_bytes: usize) -> String {
    let shown = &data[..data.len().min(max_bytes)];
    let mut lines: Vec<String> = shown
        .chunks(HEX_BYTES_PER_LINE)
        .enumerate()
        .map(|(i, chunk)| {
            let bytes: Vec<String> = chunk.iter().map(|b| hex::encode([*b])).collect();
            format!("{:08x}  {}", i * HEX_BYTES_PER_LINE, bytes.join(" "))
        })
        .collect();

    if data.len() > shown.len() {
        lines.push(format!("... ({} bytes total)", data.len()));
    }
    lines.join("\n")
}

/// Lossy UTF-8 of the leading bytes, cut at `text_chars` characters
pub fn text_preview(data: &[u8], limits: &PreviewLimits) -> String {
    let window = strip_utf8_bom(&data[..data.len().min(limits.text_bytes)]);
    let text = String::from_utf8_lossy(window);

    match text.char_indices().nth(limits.text_chars) {
        Some((cut, _)) => format!("{}\n... [truncated]", &text[..cut]),
        None => text.into_owned(),
    }
}
