//! SQLite-Backend fuer den Schluessel-Speicher

pub mod pool;
pub mod room_keys;

pub use pool::SqliteDb;
