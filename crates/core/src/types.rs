//! Gemeinsame Typen fuer roomlock
//!
//! Raumcodes sind case-insensitiv. Damit Teilen und Beitreten denselben
//! Schluessel finden, laeuft jeder Code durch [`RoomCode::parse`] und wird
//! dabei getrimmt und kleingeschrieben.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Kanonischer Code des Demo-Raums (schreibgeschuetzt, nie verschluesselt)
pub const DEMO_ROOM: &str = "demo";

/// Praefix fuer persistierte Raum-Schluessel (`room_key_<CODE>`)
pub const STORAGE_KEY_PREFIX: &str = "room_key_";

/// Maximale Laenge eines Raumcodes in Zeichen
pub const MAX_ROOM_CODE_LEN: usize = 64;

/// Kanonischer Raumcode
///
/// Erlaubt sind ASCII-Buchstaben, Ziffern, `-` und `_`
/// (z.B. `SWIFT-TIGER-1234` -> `swift-tiger-1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoomCode(String);

impl RoomCode {
    /// Prueft und kanonisiert einen Raumcode
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::LeererRaumcode);
        }

        let laenge = trimmed.chars().count();
        if laenge > MAX_ROOM_CODE_LEN {
            return Err(CoreError::RaumcodeZuLang {
                max: MAX_ROOM_CODE_LEN,
                erhalten: laenge,
            });
        }

        if let Some(zeichen) = trimmed
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(CoreError::UngueltigesZeichen { zeichen });
        }

        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// Der Demo-Raum
    pub fn demo() -> Self {
        Self(DEMO_ROOM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Gibt true zurueck fuer den schreibgeschuetzten Demo-Raum
    pub fn ist_demo(&self) -> bool {
        self.0 == DEMO_ROOM
    }

    /// Schluessel unter dem der Raum-Schluessel persistiert wird
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.0)
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoomCode {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoomCode {
    type Error = CoreError;

    fn try_from(value: String) -> CoreResult<Self> {
        Self::parse(&value)
    }
}

impl From<RoomCode> for String {
    fn from(code: RoomCode) -> Self {
        code.0
    }
}

impl AsRef<str> for RoomCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Zustand eines Raums aus Sicht dieses Geraets
///
/// `Shared` setzt `Keyed` voraus und wird nicht persistiert: nach einem
/// Neustart ist ein geteilter Raum wieder nur `Keyed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomPhase {
    /// Kein Schluessel gespeichert
    Unkeyed,
    /// Schluessel liegt im KeyStore
    Keyed,
    /// Fuer diesen Raum wurde ein Link erzeugt oder eingeloest
    Shared,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raumcode_wird_kanonisiert() {
        let code = RoomCode::parse("  DEMO2 ").unwrap();
        assert_eq!(code.as_str(), "demo2");
        assert_eq!(code, RoomCode::parse("demo2").unwrap());
    }

    #[test]
    fn raumcode_mit_bindestrichen() {
        let code: RoomCode = "SWIFT-TIGER-1234".parse().unwrap();
        assert_eq!(code.to_string(), "swift-tiger-1234");
    }

    #[test]
    fn leerer_raumcode_schlaegt_fehl() {
        assert_eq!(RoomCode::parse("   "), Err(CoreError::LeererRaumcode));
    }

    #[test]
    fn ungueltige_zeichen_schlagen_fehl() {
        assert!(matches!(
            RoomCode::parse("raum/1"),
            Err(CoreError::UngueltigesZeichen { zeichen: '/' })
        ));
        assert!(RoomCode::parse("r&s=x").is_err());
        assert!(RoomCode::parse("raum 1").is_err());
    }

    #[test]
    fn zu_langer_raumcode() {
        let lang = "a".repeat(MAX_ROOM_CODE_LEN + 1);
        assert!(matches!(
            RoomCode::parse(&lang),
            Err(CoreError::RaumcodeZuLang { .. })
        ));
        assert!(RoomCode::parse(&"a".repeat(MAX_ROOM_CODE_LEN)).is_ok());
    }

    #[test]
    fn storage_key_format() {
        let code = RoomCode::parse("Demo2").unwrap();
        assert_eq!(code.storage_key(), "room_key_demo2");
    }

    #[test]
    fn demo_raum_erkennung() {
        assert!(RoomCode::demo().ist_demo());
        assert!(RoomCode::parse("DEMO").unwrap().ist_demo());
        assert!(!RoomCode::parse("demo2").unwrap().ist_demo());
    }

    #[test]
    fn serde_validiert_beim_lesen() {
        let code = RoomCode::parse("ABC").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"abc\"");

        let gelesen: RoomCode = serde_json::from_str("\"XyZ\"").unwrap();
        assert_eq!(gelesen.as_str(), "xyz");

        assert!(serde_json::from_str::<RoomCode>("\"\"").is_err());
    }

    #[test]
    fn phase_serde_snake_case() {
        assert_eq!(serde_json::to_string(&RoomPhase::Unkeyed).unwrap(), "\"unkeyed\"");
        assert_eq!(serde_json::to_string(&RoomPhase::Shared).unwrap(), "\"shared\"");
    }
}
