//! Fehlertypen fuer das Datenbank-Crate

use thiserror::Error;

/// Fehler des Schluessel-Speichers
#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLx-Fehler: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration-Fehler: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
