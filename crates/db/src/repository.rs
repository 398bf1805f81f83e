//! Repository-Trait fuer Raum-Schluessel
//!
//! Der Speicher ist ein schlichter Schluessel-Wert-Speicher: Schluessel ist
//! `room_key_<CODE>`, Wert der exportierte Raum-Schluessel. Jede Operation
//! betrifft genau einen Eintrag und ist fuer diesen atomar.

use crate::error::DbError;

/// Result-Alias fuer Repository-Operationen
pub type DbResult<T> = Result<T, DbError>;

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://roomlock.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://roomlock.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Repository fuer persistierte Raum-Schluessel
#[allow(async_fn_in_trait)]
pub trait RoomKeyRepository: Send + Sync {
    /// Laedt den Wert unter `storage_key`
    async fn get(&self, storage_key: &str) -> DbResult<Option<String>>;

    /// Schreibt den Wert und ueberschreibt einen vorhandenen (last-write-wins)
    async fn put(&self, storage_key: &str, value: &str) -> DbResult<()>;

    /// Schreibt den Wert nur wenn noch keiner existiert
    ///
    /// Gibt den danach gespeicherten Wert zurueck (eigener oder vorhandener).
    async fn put_if_absent(&self, storage_key: &str, value: &str) -> DbResult<String>;

    /// Prueft ob ein Wert existiert
    async fn exists(&self, storage_key: &str) -> DbResult<bool>;

    /// Entfernt den Wert. Gibt true zurueck wenn einer existierte.
    async fn delete(&self, storage_key: &str) -> DbResult<bool>;

    /// Alle gespeicherten Schluessel, sortiert
    async fn list_keys(&self) -> DbResult<Vec<String>>;
}
