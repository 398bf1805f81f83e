//! CLI-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! Standardwerte, sodass `roomlock` ohne Konfigurationsdatei lauffaehig ist.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use roomlock_db::DatabaseConfig;
use roomlock_observability::{log_format_gueltig, log_level_gueltig};
use roomlock_rooms::ControllerConfig;

/// Standardpfad der Konfigurationsdatei
pub const STANDARD_PFAD: &str = "roomlock.toml";

/// Umgebungsvariable fuer den Konfigurationspfad
pub const ENV_CONFIG: &str = "ROOMLOCK_CONFIG";

/// Obergrenze fuer `link.max_alter_tage`
const MAX_LINK_ALTER_TAGE: i64 = 3650;

/// Vollstaendige Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomlockConfig {
    /// Share-Link-Einstellungen
    pub link: LinkEinstellungen,
    /// Externer Signierdienst
    pub signer: SignerEinstellungen,
    /// Lokaler Schluessel-Speicher
    pub datenbank: DatenbankEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
}

/// Share-Link-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEinstellungen {
    /// Origin der Web-Oberflaeche, vor die das Fragment gesetzt wird
    pub origin: String,
    /// Maximales Alter eingeloester Links in Tagen (leer = keine Pruefung)
    pub max_alter_tage: Option<i64>,
}

impl Default for LinkEinstellungen {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".into(),
            max_alter_tage: None,
        }
    }
}

/// Signierdienst-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignerEinstellungen {
    /// Endpunkt der `{token}` entgegennimmt und `{signature}` liefert
    pub url: String,
    /// Timeout pro Anfrage in Sekunden
    pub timeout_sekunden: u64,
}

impl Default for SignerEinstellungen {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/api/rooms/sign".into(),
            timeout_sekunden: 10,
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus aktivieren
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        Self {
            url: "sqlite://roomlock.db".into(),
            max_verbindungen: 5,
            wal: true,
        }
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: "text".into(),
        }
    }
}

impl RoomlockConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        let config = match std::fs::read_to_string(pfad) {
            Ok(inhalt) => toml::from_str::<Self>(&inhalt)
                .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Self::default()
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
                ))
            }
        };
        config.pruefen()?;
        Ok(config)
    }

    /// Prueft Werte die serde allein nicht abfangen kann
    pub fn pruefen(&self) -> anyhow::Result<()> {
        if let Some(tage) = self.link.max_alter_tage {
            anyhow::ensure!(
                (1..=MAX_LINK_ALTER_TAGE).contains(&tage),
                "link.max_alter_tage muss zwischen 1 und {MAX_LINK_ALTER_TAGE} liegen, ist {tage}"
            );
        }
        anyhow::ensure!(
            log_level_gueltig(&self.logging.level),
            "Unbekanntes Log-Level '{}'",
            self.logging.level
        );
        anyhow::ensure!(
            log_format_gueltig(&self.logging.format),
            "Unbekanntes Log-Format '{}'",
            self.logging.format
        );
        anyhow::ensure!(self.signer.timeout_sekunden > 0, "signer.timeout_sekunden muss > 0 sein");
        Ok(())
    }

    pub fn datenbank_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.datenbank.url.clone(),
            max_verbindungen: self.datenbank.max_verbindungen,
            sqlite_wal: self.datenbank.wal,
        }
    }

    pub fn controller_config(&self) -> ControllerConfig {
        match self.link.max_alter_tage {
            Some(tage) => ControllerConfig::mit_max_alter_tage(tage),
            None => ControllerConfig::default(),
        }
    }

    pub fn signer_timeout(&self) -> Duration {
        Duration::from_secs(self.signer.timeout_sekunden)
    }
}
