//! roomlock – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und fuehrt einen
//! Unterbefehl gegen den lokalen Schluessel-Speicher aus.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use roomlock_cli::befehle::{self, Befehl};
use roomlock_cli::config::{RoomlockConfig, ENV_CONFIG, STANDARD_PFAD};
use roomlock_db::SqliteDb;
use roomlock_observability::logging_initialisieren;
use roomlock_rooms::{HttpSigningClient, RoomSessionController};

#[derive(Parser)]
#[command(name = "roomlock")]
#[command(about = "Raum-Schluessel verwalten und per signiertem Link teilen", long_about = None)]
struct Cli {
    /// Pfad zur Konfigurationsdatei (Standard: $ROOMLOCK_CONFIG oder roomlock.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    befehl: Befehl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_pfad = cli
        .config
        .or_else(|| std::env::var(ENV_CONFIG).ok())
        .unwrap_or_else(|| STANDARD_PFAD.into());

    let config = RoomlockConfig::laden(&config_pfad)?;

    logging_initialisieren(&config.logging.level, &config.logging.format)
        .map_err(|e| anyhow::anyhow!("Logging konnte nicht initialisiert werden: {e}"))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "roomlock gestartet"
    );

    let db = SqliteDb::oeffnen(&config.datenbank_config())
        .await
        .with_context(|| format!("Schluessel-Speicher '{}' nicht verfuegbar", config.datenbank.url))?;

    let signer = HttpSigningClient::neu(config.signer.url.clone(), config.signer_timeout())?;
    let controller =
        RoomSessionController::neu(db.clone(), Arc::new(signer), config.controller_config());

    let mut stdout = std::io::stdout().lock();
    let ergebnis = befehle::ausfuehren(&controller, cli.befehl, &config.link.origin, &mut stdout).await;

    db.schliessen().await;

    if let Err(fehler) = &ergebnis {
        if let Some(hinweis) = befehle::hinweis(fehler) {
            eprintln!("Hinweis: {hinweis}");
        }
    }
    ergebnis
}
