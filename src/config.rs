use crate::decoder::DecodeOptions;
use crate::decoder::preview::PreviewLimits;
use crate::types::content_detection::SniffThresholds;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default output locations used by the CLI
pub mod output_paths {
    /// Root directory for decoded payloads and exports
    pub const OUTPUT_BASE: &str = "./output_data";
}

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub decoding: DecodingConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub output_dir: PathBuf,
}

/// Tunables for the decode-sniff pipeline
///
/// The sniffing values are heuristics tuned to observed feed payloads; the
/// defaults keep classification compatible with existing exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecodingConfig {
    pub base64_chunk_chars: usize,
    pub sniff_sample_bytes: usize,
    pub control_char_ratio: f64,
    pub text_window_bytes: usize,
    pub preview_hex_bytes: usize,
    pub preview_text_bytes: usize,
    pub preview_text_chars: usize,
}

impl Default for DecodingConfig {
    fn default() -> Self {
        let sniff = SniffThresholds::default();
        let preview = PreviewLimits::default();
        Self {
            base64_chunk_chars: crate::decoder::base64::DEFAULT_CHUNK_CHARS,
            sniff_sample_bytes: sniff.sample_bytes,
            control_char_ratio: sniff.control_ratio,
            text_window_bytes: sniff.text_window_bytes,
            preview_hex_bytes: preview.hex_bytes,
            preview_text_bytes: preview.text_bytes,
            preview_text_chars: preview.text_chars,
        }
    }
}

impl DecodingConfig {
    /// Build the orchestrator options described by this configuration
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            base64_chunk_chars: self.base64_chunk_chars,
            sniff: SniffThresholds {
                sample_bytes: self.sniff_sample_bytes,
                control_ratio: self.control_char_ratio,
                text_window_bytes: self.text_window_bytes,
            },
            preview: PreviewLimits {
                hex_bytes: self.preview_hex_bytes,
                text_bytes: self.preview_text_bytes,
                text_chars: self.preview_text_chars,
            },
        }
    }
}

/// Mutual-TLS fetch proxy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub url: String,
    pub timeout_seconds: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8787/fetch".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let decoding = DecodingConfig::default();
        let proxy = ProxyConfig::default();
        let config = Config::builder()
            .set_default("paths.output_dir", output_paths::OUTPUT_BASE)?
            .set_default(
                "decoding.base64_chunk_chars",
                decoding.base64_chunk_chars as i64,
            )?
            .set_default(
                "decoding.sniff_sample_bytes",
                decoding.sniff_sample_bytes as i64,
            )?
            .set_default("decoding.control_char_ratio", decoding.control_char_ratio)?
            .set_default(
                "decoding.text_window_bytes",
                decoding.text_window_bytes as i64,
            )?
            .set_default(
                "decoding.preview_hex_bytes",
                decoding.preview_hex_bytes as i64,
            )?
            .set_default(
                "decoding.preview_text_bytes",
                decoding.preview_text_bytes as i64,
            )?
            .set_default(
                "decoding.preview_text_chars",
                decoding.preview_text_chars as i64,
            )?
            .set_default("proxy.url", proxy.url)?
            .set_default("proxy.timeout_seconds", proxy.timeout_seconds)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // FEED_DECODING__PREVIEW_TEXT_CHARS=... style overrides
            .add_source(config::Environment::with_prefix("FEED").separator("__"))
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(output_dir) = env::var("FEED_OUTPUT_DIR") {
            app_config.paths.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(proxy_url) = env::var("FEED_PROXY_URL") {
            app_config.proxy.url = proxy_url;
        }

        if app_config.decoding.base64_chunk_chars < 4 {
            return Err(ConfigError::Message(
                "decoding.base64_chunk_chars must be at least 4".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Result<Self, ConfigError> {
        match Self::load() {
            Ok(config) => Ok(config),
            Err(_) => Ok(Self {
                paths: PathsConfig {
                    output_dir: PathBuf::from(output_paths::OUTPUT_BASE),
                },
                decoding: DecodingConfig::default(),
                proxy: ProxyConfig::default(),
            }),
        }
    }
}
