//! SQLite-Datei eines Benutzerprofils

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::repository::{DatabaseConfig, DbResult};

/// Wartezeit wenn ein zweiter roomlock-Prozess die Datei gerade sperrt
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schluessel-Speicher auf SQLite
#[derive(Debug, Clone)]
pub struct SqliteDb {
    pub(crate) pool: SqlitePool,
}

impl SqliteDb {
    /// Oeffnet (oder erstellt) die Datenbank und bringt das Schema auf Stand
    pub async fn oeffnen(config: &DatabaseConfig) -> DbResult<Self> {
        let journal = if config.sqlite_wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };
        let opts = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .journal_mode(journal)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self::verbinden(opts, config.max_verbindungen.max(1)).await?;
        info!(url = %config.url, wal = config.sqlite_wal, "Schluessel-Speicher geoeffnet");
        Ok(db)
    }

    /// Fluechtige Datenbank fuer Tests
    pub async fn in_memory() -> DbResult<Self> {
        // Jede weitere Verbindung saehe eine eigene, leere Datenbank
        Self::verbinden(SqliteConnectOptions::from_str("sqlite::memory:")?, 1).await
    }

    /// Schliesst alle Verbindungen (WAL wird dabei zurueckgeschrieben)
    pub async fn schliessen(&self) {
        self.pool.close().await;
    }

    async fn verbinden(opts: SqliteConnectOptions, max_verbindungen: u32) -> DbResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_verbindungen)
            .min_connections(1)
            .connect_with(opts)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}
