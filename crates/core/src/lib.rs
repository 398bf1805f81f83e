//! roomlock-core – Gemeinsame Typen und Fehlertypen
//!
//! Dieses Crate stellt die Bausteine bereit, die von allen anderen
//! roomlock-Crates gemeinsam genutzt werden: den kanonischen Raumcode und
//! den Zustand eines Raums aus Sicht des lokalen Geraets.

pub mod error;
pub mod types;

// Re-Exporte fuer bequemen Zugriff
pub use error::{CoreError, CoreResult};
pub use types::{RoomCode, RoomPhase, DEMO_ROOM, STORAGE_KEY_PREFIX};
