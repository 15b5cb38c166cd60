//! Chunked base64/base64url decoding
//!
//! Payloads inside `<binary>` elements can be tens of megabytes of base64 with
//! arbitrary line wrapping. Input is normalised to the standard alphabet with
//! padding, then decoded in fixed-size chunks appended to one buffer.

use super::error::DecoderResult;
use base64::alphabet;
use base64::engine::{self, general_purpose::GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

/// Default characters decoded per chunk (a multiple of 4)
pub const DEFAULT_CHUNK_CHARS: usize = 1024 * 1024;

/// Lenient standard-alphabet engine
///
/// Accepts missing padding and non-zero trailing bits, matching what browser
/// `atob` accepts for feed payloads.
pub const BASE64_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(engine::DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Strip whitespace, map the URL-safe alphabet onto the standard one and pad to a multiple of 4
pub fn normalize_base64(text: &str) -> String {
    let mut normalized: String = text
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let remainder = normalized.len() % 4;
    if remainder != 0 {
        normalized.extend(std::iter::repeat('=').take(4 - remainder));
    }
    normalized
}

/// Decode base64 text using the default chunk size
pub fn decode_base64(text: &str) -> DecoderResult<Vec<u8>> {
    decode_base64_chunked(text, DEFAULT_CHUNK_CHARS)
}

/// Decode base64 text in chunks of at most `chunk_chars` characters
///
/// `chunk_chars` is rounded down to a multiple of 4 (minimum 4) so that no
/// quantum is split across chunks. Empty or whitespace-only input yields an
/// empty buffer.
pub fn decode_base64_chunked(text: &str, chunk_chars: usize) -> DecoderResult<Vec<u8>> {
    let normalized = normalize_base64(text);
    if normalized.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_len = (chunk_chars / 4).max(1) * 4;
    let mut decoded = Vec::with_capacity(normalized.len() / 4 * 3);

    // Normalised text is ASCII unless the input carried stray non-ASCII
    // characters, which the engine rejects either way.
    for chunk in normalized.as_bytes().chunks(chunk_len) {
        BASE64_LENIENT.decode_vec(chunk, &mut decoded)?;
    }

    Ok(decoded)
}
