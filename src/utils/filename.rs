//! Filesystem-safe names for exported payloads

use lazy_static::lazy_static;
use regex::Regex;

/// Longest base name produced by [`safe_base_name`]
pub const MAX_BASE_NAME_LEN: usize = 180;

/// Base name used when nothing safe is left
pub const FALLBACK_BASE_NAME: &str = "file";

lazy_static! {
    static ref UNSAFE_RUN: Regex = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
}

/// Collapse unsafe character runs to `_`, trim underscores and cap the length
///
/// # Examples
/// ```
/// use mobility_feed_decoder::utils::filename::safe_base_name;
/// assert_eq!(safe_base_name("b1_fuel prices/v2"), "b1_fuel_prices_v2");
/// assert_eq!(safe_base_name("???"), "file");
/// ```
pub fn safe_base_name(raw: &str) -> String {
    let collapsed = UNSAFE_RUN.replace_all(raw, "_");
    let trimmed = collapsed.trim_matches('_');
    // Only ASCII survives the substitution, so byte truncation is char-safe
    let capped = &trimmed[..trimmed.len().min(MAX_BASE_NAME_LEN)];

    if capped.is_empty() {
        FALLBACK_BASE_NAME.to_string()
    } else {
        capped.to_string()
    }
}
