//! Structured Logging Setup via tracing-subscriber
//!
//! Konfigurierbar per Umgebungsvariable:
//! - `RL_LOG_LEVEL`: Log-Level oder EnvFilter-Direktive, Standard: Konfiguration
//! - `RL_LOG_FORMAT`: Format (text/json), Standard: Konfiguration
//!
//! Logs gehen nach stderr, stdout bleibt fuer Ausgaben der CLI frei.

use tracing_subscriber::{fmt, EnvFilter};

pub const ENV_LOG_LEVEL: &str = "RL_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "RL_LOG_FORMAT";

/// Aufgeloeste Logging-Einstellungen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEinstellungen {
    pub level: String,
    pub json: bool,
}

impl LogEinstellungen {
    /// Umgebungsvariablen haben Vorrang vor der Konfiguration.
    /// Ungueltige Formate fallen auf `text` zurueck.
    pub fn aufloesen(
        level: &str,
        format: &str,
        env_level: Option<String>,
        env_format: Option<String>,
    ) -> Self {
        let level = env_level
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| level.to_string());
        let format = env_format.unwrap_or_else(|| format.to_string());
        Self {
            level,
            json: format == "json",
        }
    }

    /// Liest die Umgebung und loest gegen die Konfiguration auf
    pub fn aus_umgebung(level: &str, format: &str) -> Self {
        Self::aufloesen(
            level,
            format,
            std::env::var(ENV_LOG_LEVEL).ok(),
            std::env::var(ENV_LOG_FORMAT).ok(),
        )
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Initialisiert das Logging-System.
///
/// Liest `RL_LOG_LEVEL` und `RL_LOG_FORMAT` aus der Umgebung.
/// Schlaegt fehl wenn bereits ein globaler Subscriber gesetzt ist.
pub fn logging_initialisieren(
    level: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let einstellungen = LogEinstellungen::aus_umgebung(level, format);
    let filter = einstellungen.filter();

    if einstellungen.json {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(true)
            .try_init()
    } else {
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init()
    }
}

/// Validiert ob ein Log-Level-String gueltig ist.
pub fn log_level_gueltig(level: &str) -> bool {
    matches!(level, "trace" | "debug" | "info" | "warn" | "error")
}

/// Validiert ob ein Log-Format-String gueltig ist.
pub fn log_format_gueltig(format: &str) -> bool {
    matches!(format, "text" | "json")
}
