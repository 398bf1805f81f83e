//! Inhaltsverschluesselung mit dem Raum-Schluessel
//!
//! ## Format
//! ```text
//! base64( [nonce(12)] [ciphertext + auth_tag(16)] )
//! ```
//!
//! Jeder Aufruf zieht eine frische 96-Bit-Nonce aus der Zufallsquelle des
//! Betriebssystems. Aufrufer koennen keine eigene Nonce uebergeben.

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};
use crate::types::{SymmetricKey, KEY_LEN};

/// Nonce-Laenge in Bytes (96 Bit)
pub const NONCE_LEN: usize = 12;

/// Auth-Tag-Laenge in Bytes
pub const TAG_LEN: usize = 16;

/// Platzhalter fuer Nachrichten die nicht entschluesselt werden koennen
pub const UNDECRYPTABLE_PLACEHOLDER: &str = "[Encrypted - unable to decrypt]";

/// Erzeugt einen neuen zufaelligen Raum-Schluessel
pub fn generate_key() -> CryptoResult<SymmetricKey> {
    let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
    fill_random(bytes.as_mut_slice())?;
    Ok(SymmetricKey::from_bytes(*bytes))
}

/// Verschluesselt Bytes und gibt `nonce || ciphertext` roh zurueck
pub fn seal(plaintext: &[u8], key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    fill_random(&mut nonce_bytes)?;

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| CryptoError::Verschluesselung(e.to_string()))?;

    let mut out = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

/// Entschluesselt `nonce || ciphertext` und prueft den Auth-Tag
pub fn open(data: &[u8], key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
    if data.len() < NONCE_LEN {
        return Err(CryptoError::DecryptionFailed(format!(
            "Payload zu kurz: {} Bytes, Nonce allein braucht {NONCE_LEN}",
            data.len()
        )));
    }
    let (nonce_bytes, ciphertext) = data.split_at(NONCE_LEN);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("Authentifizierung fehlgeschlagen".into()))
}

/// Verschluesselt Bytes und gibt das Ergebnis Base64-kodiert zurueck
pub fn encrypt(plaintext: &[u8], key: &SymmetricKey) -> CryptoResult<String> {
    Ok(STANDARD.encode(seal(plaintext, key)?))
}

/// Kehrt [`encrypt`] um
pub fn decrypt(encoded: &str, key: &SymmetricKey) -> CryptoResult<Vec<u8>> {
    let data = STANDARD
        .decode(encoded.trim())
        .map_err(|e| CryptoError::DecryptionFailed(format!("Base64: {e}")))?;
    open(&data, key)
}

/// Verschluesselt einen UTF-8-Nachrichtentext
pub fn encrypt_text(plaintext: &str, key: &SymmetricKey) -> CryptoResult<String> {
    encrypt(plaintext.as_bytes(), key)
}

/// Entschluesselt einen Nachrichtentext
pub fn decrypt_text(encoded: &str, key: &SymmetricKey) -> CryptoResult<String> {
    let bytes = decrypt(encoded, key)?;
    String::from_utf8(bytes)
        .map_err(|_| CryptoError::DecryptionFailed("Klartext ist kein UTF-8".into()))
}

/// Entschluesselt einen Nachrichtentext fuer die Anzeige
///
/// Bei jedem Fehler wird [`UNDECRYPTABLE_PLACEHOLDER`] zurueckgegeben,
/// damit die Nachrichtenzeile trotzdem gerendert werden kann.
pub fn decrypt_text_or_placeholder(encoded: &str, key: &SymmetricKey) -> String {
    match decrypt_text(encoded, key) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!(fehler = %e, "Nachricht nicht entschluesselbar");
            UNDECRYPTABLE_PLACEHOLDER.to_string()
        }
    }
}

fn fill_random(buf: &mut [u8]) -> CryptoResult<()> {
    OsRng
        .try_fill_bytes(buf)
        .map_err(|e| CryptoError::RngUnavailable(e.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
