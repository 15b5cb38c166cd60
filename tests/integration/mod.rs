//! Integration Tests Module
//!
//! End-to-end tests that drive a feed response through extraction, decoding,
//! record extraction and every export format.

pub mod cli_args;
pub mod end_to_end;
pub mod exports;
pub mod output_files;
pub mod session_state;
