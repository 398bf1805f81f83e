//! roomlock-rooms – Raum-Schluessel, Share-Links und Sitzungssteuerung
//!
//! - [`KeyStore`] – ein persistierter Schluessel pro Raumcode
//! - [`SigningClient`] – externer Signierdienst fuer Share-Tokens
//! - [`RoomSessionController`] – Teilen, Beitreten, Ver-/Entschluesseln

pub mod controller;
pub mod error;
pub mod keystore;
pub mod signing;

pub use controller::{ControllerConfig, RoomSessionController};
pub use error::{RoomError, RoomResult};
pub use keystore::KeyStore;
pub use signing::{HttpSigningClient, SigningClient};
