//! Conditional gzip decompression
//!
//! Only gzip is supported. Decompression is compiled in through the default
//! `gzip` feature; without it, gzip payloads are reported as unsupported and
//! callers keep the compressed bytes.

use super::error::{DecoderError, DecoderResult};
use crate::types::content_detection::has_gzip_magic;
use tracing::debug;

/// Result of a best-effort gunzip attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GunzipOutcome {
    /// Input does not carry the gzip signature
    NotApplicable,
    /// Stream inflated successfully
    Decompressed(Vec<u8>),
    /// Stream could not be inflated; `bytes` is a copy of the input to fall back on
    Failed { bytes: Vec<u8>, reason: String },
}

/// Decompress `data` if it starts with the gzip signature
///
/// Returns `Ok(None)` when the signature is absent.
pub fn maybe_gunzip(data: &[u8]) -> DecoderResult<Option<Vec<u8>>> {
    if !has_gzip_magic(data) {
        return Ok(None);
    }
    inflate(data).map(Some)
}

/// Gunzip without ever failing; the caller always gets usable bytes back
pub fn gunzip_with_fallback(data: &[u8]) -> GunzipOutcome {
    match maybe_gunzip(data) {
        Ok(None) => GunzipOutcome::NotApplicable,
        Ok(Some(decompressed)) => GunzipOutcome::Decompressed(decompressed),
        Err(e) => GunzipOutcome::Failed {
            bytes: data.to_vec(),
            reason: e.to_string(),
        },
    }
}

#[cfg(feature = "gzip")]
fn inflate(data: &[u8]) -> DecoderResult<Vec<u8>> {
    use flate2::read::MultiGzDecoder;
    use std::io::Read;

    // Concatenated members form one payload; bytes after a member must start another
    let mut decoder = MultiGzDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder
        .read_to_end(&mut decompressed)
        .map_err(|e| DecoderError::Decompression(e.to_string()))?;

    debug!(
        "Decompressed {} gzip bytes into {} bytes",
        data.len(),
        decompressed.len()
    );
    Ok(decompressed)
}

#[cfg(not(feature = "gzip"))]
fn inflate(data: &[u8]) -> DecoderResult<Vec<u8>> {
    debug!("Gzip payload of {} bytes left compressed", data.len());
    Err(DecoderError::UnsupportedOperation(
        "gzip decompression is not available in this build".to_string(),
    ))
}
