use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Outer response document could not be parsed; aborts the whole extraction
    #[error("Invalid XML: {0}")]
    InvalidXml(String),

    /// Per-payload decoding failures (base64, gzip)
    #[error("Decoder error: {0}")]
    Decoder(#[from] crate::decoder::DecoderError),

    /// Export requested before a decode, or after the source text changed
    #[error("Export unavailable: {0}")]
    ExportStaleState(String),

    /// Proxy fetch failures
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Errors surfaced by the mutual-TLS fetch proxy client
#[derive(Error, Debug)]
pub enum FetchError {
    /// Endpoint is not an absolute https URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Client certificate could not be read
    #[error("Client certificate unavailable: {0}")]
    Certificate(String),

    /// The proxy could not be reached or its response could not be read
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The proxy itself answered with a non-2xx status and an `{error}` body
    #[error("Proxy returned {status}: {message}")]
    Proxy { status: u16, message: String },

    /// The proxy reached the upstream, which answered with a failure status
    #[error("Upstream returned {status} {status_text}")]
    Upstream { status: u16, status_text: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for proxy fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<roxmltree::Error> for AppError {
    fn from(err: roxmltree::Error) -> Self {
        AppError::InvalidXml(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
