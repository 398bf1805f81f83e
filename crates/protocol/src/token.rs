//! Share-Token: `{room, key, ts}` als URL-sicheres Base64
//!
//! ## Wire-Format (nach dem Dekodieren)
//! ```text
//! { "v": 1, "room": "demo2", "key": "<exported-key>", "ts": 1700000000000 }
//! ```
//!
//! `v` darf fehlen (Tokens aelterer Clients), unbekannte Felder werden
//! abgelehnt. Der Codec prueft kein Alter; dafuer gibt es
//! [`ShareToken::pruefe_alter`], das der Aufrufer explizit nutzen muss.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use roomlock_core::RoomCode;
use roomlock_crypto::{ExportedKey, SymmetricKey};

use crate::error::{ProtocolError, ProtocolResult};

/// Aktuelle Token-Version
pub const TOKEN_VERSION: u8 = 1;

/// Gueltigkeit die der UI-Text fuer Share-Links nennt (nur Anzeige)
pub const ADVERTISED_LINK_VALIDITY_DAYS: i64 = 30;

/// Erlaubte Uhrenabweichung fuer Tokens "aus der Zukunft"
const MAX_CLOCK_SKEW_MINUTES: i64 = 5;

/// Inhalt eines Share-Links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShareToken {
    #[serde(rename = "v", default = "standard_version")]
    pub version: u8,
    /// Kanonischer Raumcode
    pub room: RoomCode,
    /// Exportierter Raum-Schluessel
    pub key: ExportedKey,
    /// Ausstellungszeitpunkt (Millisekunden seit Epoch)
    #[serde(rename = "ts", with = "chrono::serde::ts_milliseconds")]
    pub issued_at: DateTime<Utc>,
}

fn standard_version() -> u8 {
    TOKEN_VERSION
}

impl ShareToken {
    /// Erstellt einen Token mit `issued_at = jetzt`
    pub fn neu(room: RoomCode, key: ExportedKey) -> Self {
        Self::ausgestellt_am(room, key, Utc::now())
    }

    /// Erstellt einen Token mit festem Ausstellungszeitpunkt
    pub fn ausgestellt_am(room: RoomCode, key: ExportedKey, issued_at: DateTime<Utc>) -> Self {
        // Das Wire-Format kennt nur Millisekunden
        let issued_at = DateTime::from_timestamp_millis(issued_at.timestamp_millis())
            .unwrap_or(issued_at);
        Self {
            version: TOKEN_VERSION,
            room,
            key,
            issued_at,
        }
    }

    /// Kodiert `{room, key, ts = jetzt}` zu einem Token-String
    pub fn encode(room: &RoomCode, key: &ExportedKey) -> ProtocolResult<String> {
        Self::neu(room.clone(), key.clone()).to_token()
    }

    /// Serialisiert diesen Token (JSON, dann URL-sicheres Base64 ohne Padding)
    pub fn to_token(&self) -> ProtocolResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE_NO_PAD.encode(json))
    }

    /// Dekodiert einen Token-String
    ///
    /// Akzeptiert neben URL-sicherem Base64 auch Standard-Base64 mit oder
    /// ohne Padding. Jeder Fehler ergibt [`ProtocolError::InvalidToken`],
    /// ein Token wird nie teilweise uebernommen.
    pub fn decode(token: &str) -> ProtocolResult<Self> {
        // Formular-dekodierte Kopien machen aus einem `+` ein Leerzeichen
        let normalisiert = token.trim().replace(' ', "+");
        let trimmed = normalisiert.trim_end_matches('=');
        if trimmed.is_empty() {
            return Err(ProtocolError::invalid("leerer Token"));
        }

        let json = URL_SAFE_NO_PAD
            .decode(trimmed)
            .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
            .map_err(|e| ProtocolError::invalid(format!("kein Base64: {e}")))?;

        let parsed: Self = serde_json::from_slice(&json)
            .map_err(|e| ProtocolError::invalid(format!("unerwartete Struktur: {e}")))?;

        if parsed.version != TOKEN_VERSION {
            return Err(ProtocolError::invalid(format!(
                "Token-Version {} nicht unterstuetzt",
                parsed.version
            )));
        }

        SymmetricKey::import(&parsed.key)
            .map_err(|e| ProtocolError::invalid(format!("Schluessel: {e}")))?;

        Ok(parsed)
    }

    /// Alter des Tokens relativ zu `jetzt`
    pub fn alter(&self, jetzt: DateTime<Utc>) -> Duration {
        jetzt - self.issued_at
    }

    /// Lehnt Tokens ab die aelter als `max_alter` sind oder deutlich in der
    /// Zukunft ausgestellt wurden
    pub fn pruefe_alter(&self, max_alter: Duration, jetzt: DateTime<Utc>) -> ProtocolResult<()> {
        let alter = self.alter(jetzt);
        if alter > max_alter {
            return Err(ProtocolError::ExpiredToken {
                ausgestellt_am: self.issued_at,
                max_alter_tage: max_alter.num_days(),
            });
        }
        if alter < -Duration::minutes(MAX_CLOCK_SKEW_MINUTES) {
            return Err(ProtocolError::invalid(format!(
                "Ausstellungszeitpunkt {} liegt in der Zukunft",
                self.issued_at
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
