//! Decode sessions and the staleness guard for exports
//!
//! A [`DecodeSession`] pairs the exact source text with the items decoded from
//! it. [`SessionStore`] keeps the latest successful session and refuses to
//! export it once the text the user is looking at no longer matches.

use crate::decoder::{decode_binaries, DecodeOptions, DecodedItem};
use crate::envelope::extract_binaries;
use crate::errors::{AppError, AppResult};
use crate::export::{self, ExportArtifact, ExportFormat};
use crate::records::extract_records;
use crate::types::RecordSet;
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::{info, warn};

/// Source text and the items decoded from it; never mutated after construction
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeSession {
    source_text: String,
    items: Vec<DecodedItem>,
    decoded_at: DateTime<Utc>,
}

impl DecodeSession {
    /// Extract and decode every `<binary>` of `source_text`
    ///
    /// Fails only when the outer document cannot be parsed.
    pub fn decode(source_text: impl Into<String>, options: &DecodeOptions) -> AppResult<Self> {
        let source_text = source_text.into();
        let descriptors = extract_binaries(&source_text)?;
        let items = decode_binaries(&descriptors, options);

        Ok(Self {
            source_text,
            items,
            decoded_at: Utc::now(),
        })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn items(&self) -> &[DecodedItem] {
        &self.items
    }

    pub fn decoded_at(&self) -> DateTime<Utc> {
        self.decoded_at
    }

    /// True when `visible_text` is byte-identical to the decoded source
    pub fn is_current(&self, visible_text: &str) -> bool {
        self.source_text == visible_text
    }

    pub fn failed_count(&self) -> usize {
        self.items.iter().filter(|item| item.error().is_some()).count()
    }

    /// Fuel price and override period rows of every XML item
    pub fn records(&self) -> RecordSet {
        extract_records(&self.items)
    }
}

/// Most recent terminal outcome, shown to the user as a status line
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Decoded {
        items: usize,
        failed: usize,
    },
    Extracted {
        fuel_prices: usize,
        override_periods: usize,
    },
    Exported {
        format: ExportFormat,
        artifacts: usize,
    },
    Failed(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => write!(f, "Ready."),
            Status::Decoded { items, failed: 0 } => write!(f, "Decoded {} binary item(s).", items),
            Status::Decoded { items, failed } => write!(
                f,
                "Decoded {} binary item(s), {} failed.",
                items, failed
            ),
            Status::Extracted {
                fuel_prices,
                override_periods,
            } => write!(
                f,
                "Extracted {} fuel price row(s) and {} override period row(s).",
                fuel_prices, override_periods
            ),
            Status::Exported { format, artifacts } => {
                write!(f, "Exported {} file(s) of {}.", artifacts, format)
            }
            Status::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Holds the current session and the status of the last operation
#[derive(Debug, Default)]
pub struct SessionStore {
    session: Option<DecodeSession>,
    status: Status,
    options: DecodeOptions,
}

impl SessionStore {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            session: None,
            status: Status::Idle,
            options,
        }
    }

    /// Decode `source_text`, replacing the current session only on success
    pub fn decode(&mut self, source_text: &str) -> AppResult<&DecodeSession> {
        match DecodeSession::decode(source_text, &self.options) {
            Ok(session) => {
                self.status = Status::Decoded {
                    items: session.items().len(),
                    failed: session.failed_count(),
                };
                info!("{}", self.status);
                Ok(self.session.insert(session))
            }
            Err(e) => {
                warn!("Decode failed, keeping previous session: {}", e);
                self.status = Status::Failed(e.to_string());
                Err(e)
            }
        }
    }

    pub fn current(&self) -> Option<&DecodeSession> {
        self.session.as_ref()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// The current session, provided it was decoded from `visible_text`
    pub fn session_for_export(&self, visible_text: &str) -> AppResult<&DecodeSession> {
        match &self.session {
            None => Err(AppError::ExportStaleState(
                "nothing has been decoded yet".to_string(),
            )),
            Some(session) if !session.is_current(visible_text) => Err(AppError::ExportStaleState(
                "source text changed since the last decode".to_string(),
            )),
            Some(session) => Ok(session),
        }
    }

    /// Extract rows from the current session
    pub fn extract_records(&mut self, visible_text: &str) -> AppResult<RecordSet> {
        let records = match self.session_for_export(visible_text) {
            Ok(session) => session.records(),
            Err(e) => {
                self.status = Status::Failed(e.to_string());
                return Err(e);
            }
        };

        self.status = Status::Extracted {
            fuel_prices: records.fuel_prices.len(),
            override_periods: records.override_periods.len(),
        };
        Ok(records)
    }

    /// Render an export of the current session
    pub fn export(
        &mut self,
        visible_text: &str,
        format: ExportFormat,
        generated_at: DateTime<Utc>,
    ) -> AppResult<Vec<ExportArtifact>> {
        let result = self
            .session_for_export(visible_text)
            .and_then(|session| export::render(session, format, generated_at));

        self.status = match &result {
            Ok(artifacts) => Status::Exported {
                format,
                artifacts: artifacts.len(),
            },
            Err(e) => Status::Failed(e.to_string()),
        };
        result
    }
}
