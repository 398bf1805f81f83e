//! Fehlertypen fuer das Protokoll-Crate

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Fehler beim Kodieren oder Dekodieren von Share-Tokens
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Ungueltiger Share-Token: {0}")]
    InvalidToken(String),

    #[error("Share-Token abgelaufen (ausgestellt am {ausgestellt_am}, maximal {max_alter_tage} Tage gueltig)")]
    ExpiredToken {
        ausgestellt_am: DateTime<Utc>,
        max_alter_tage: i64,
    },

    #[error("Serialisierung fehlgeschlagen: {0}")]
    Serialisierung(#[from] serde_json::Error),
}

impl ProtocolError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidToken(msg.into())
    }
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
