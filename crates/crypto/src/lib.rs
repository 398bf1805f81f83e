//! # roomlock-crypto
//!
//! Inhaltsverschluesselung fuer roomlock-Raeume.
//!
//! ## Module
//! - `cipher` - AES-256-GCM mit frischer Zufalls-Nonce pro Aufruf
//! - `types` - Raum-Schluessel und sein exportiertes Format (JWK)
//! - `error` - Fehlertypen

pub mod cipher;
pub mod error;
pub mod types;

// Bequeme Re-Exports
pub use cipher::{
    decrypt, decrypt_text, decrypt_text_or_placeholder, encrypt, encrypt_text, generate_key,
    open, seal, NONCE_LEN, UNDECRYPTABLE_PLACEHOLDER,
};
pub use error::{CryptoError, CryptoResult};
pub use types::{ExportedKey, SymmetricKey, KEY_LEN};
