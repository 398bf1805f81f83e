//! roomlock-protocol – Wire-Formate fuer geteilte Raeume
//!
//! Dieses Crate definiert den Share-Token (`{room, key, ts}`) und das
//! Link-Fragment `#t=<token>&s=<signature>` in dem Token und Signatur
//! transportiert werden.

pub mod error;
pub mod link;
pub mod token;

pub use error::{ProtocolError, ProtocolResult};
pub use link::SignedLink;
pub use token::{ShareToken, ADVERTISED_LINK_VALIDITY_DAYS, TOKEN_VERSION};
