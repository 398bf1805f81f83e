//! Fehlertypen fuer die Raum-Sitzungssteuerung

use chrono::{DateTime, Utc};
use thiserror::Error;

use roomlock_core::CoreError;
use roomlock_crypto::CryptoError;
use roomlock_db::DbError;
use roomlock_protocol::ProtocolError;

/// Fehler der Raum-Operationen
///
/// Nur `RngUnavailable` ist fuer die jeweilige Aktion fatal. Alle anderen
/// Varianten lassen den bisherigen Zustand unveraendert.
#[derive(Debug, Error)]
pub enum RoomError {
    #[error("Sicherer Raum kann nicht erstellt werden: {0}")]
    RngUnavailable(String),

    #[error("Entschluesselung fehlgeschlagen: {0}")]
    DecryptionFailed(String),

    #[error("Ungueltiger Share-Link: {0}")]
    InvalidToken(String),

    #[error("Share-Link vom {ausgestellt_am} ist aelter als {max_alter_tage} Tage")]
    ExpiredToken {
        ausgestellt_am: DateTime<Utc>,
        max_alter_tage: i64,
    },

    #[error("Signierdienst nicht verfuegbar: {0}")]
    SigningUnavailable(String),

    #[error("Der Demo-Raum ist schreibgeschuetzt")]
    DemoRoom,

    #[error("Ungueltiger Raumcode: {0}")]
    Raumcode(#[from] CoreError),

    #[error("Gespeicherter Schluessel fuer Raum '{room}' ist unlesbar: {grund}")]
    BeschaedigterSchluessel { room: String, grund: String },

    #[error("Speicherfehler: {0}")]
    Speicher(#[from] DbError),

    #[error("Kryptografiefehler: {0}")]
    Krypto(CryptoError),

    #[error("Protokollfehler: {0}")]
    Protokoll(ProtocolError),
}

impl From<CryptoError> for RoomError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::RngUnavailable(msg) => Self::RngUnavailable(msg),
            CryptoError::DecryptionFailed(msg) => Self::DecryptionFailed(msg),
            andere => Self::Krypto(andere),
        }
    }
}

impl From<ProtocolError> for RoomError {
    fn from(e: ProtocolError) -> Self {
        match e {
            ProtocolError::InvalidToken(msg) => Self::InvalidToken(msg),
            ProtocolError::ExpiredToken {
                ausgestellt_am,
                max_alter_tage,
            } => Self::ExpiredToken {
                ausgestellt_am,
                max_alter_tage,
            },
            andere => Self::Protokoll(andere),
        }
    }
}

impl RoomError {
    /// Gibt true zurueck wenn die Aktion mit unveraendertem Zustand
    /// wiederholt oder uebergangen werden kann
    pub fn ist_behebbar(&self) -> bool {
        !matches!(
            self,
            Self::RngUnavailable(_) | Self::Speicher(_) | Self::BeschaedigterSchluessel { .. }
        )
    }
}

/// Result-Alias fuer Raum-Operationen
pub type RoomResult<T> = Result<T, RoomError>;
