//! Transport Data Feed Binary Decoder
//!
//! Extracts `<binary>` payloads from feed responses, decodes and classifies
//! them, and turns fuel-price publications into exportable time series.

pub mod cli;
pub mod config;
pub mod decoder;
pub mod envelope;
pub mod errors;
pub mod export;
pub mod fetch;
pub mod records;
pub mod session;
pub mod types;
pub mod utils;
pub mod xml;
