//! roomlock-db – Lokale Persistenz der Raum-Schluessel
//!
//! Dieses Crate stellt das Repository-Pattern bereit, das den Speicher der
//! exportierten Raum-Schluessel hinter einer einheitlichen Schnittstelle
//! abstrahiert:
//! - `memory` – fluechtiger Speicher (Tests, kurzlebige Sitzungen)
//! - `sqlite` – dauerhafter Speicher pro Benutzerprofil

pub mod error;
pub mod memory;
pub mod repository;
pub mod sqlite;

pub use error::DbError;
pub use memory::InMemoryRoomKeys;
pub use repository::{DatabaseConfig, DbResult, RoomKeyRepository};
pub use sqlite::SqliteDb;
