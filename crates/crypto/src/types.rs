//! Raum-Schluessel und exportiertes Schluesselformat
//!
//! Ein Raum-Schluessel wird als JSON Web Key (`kty = "oct"`, `alg = "A256GCM"`)
//! exportiert und das JSON anschliessend Base64-kodiert. Das Format ist
//! kompatibel zu `crypto.subtle.exportKey("jwk", ...)` im Browser-Client.

use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{CryptoError, CryptoResult};

/// Schluessel-Laenge in Bytes (AES-256)
pub const KEY_LEN: usize = 32;

const JWK_KTY: &str = "oct";
const JWK_ALG: &str = "A256GCM";

/// Symmetrischer Raum-Schluessel (AES-256-GCM)
///
/// Das Schluesselmaterial wird beim Drop genullt und taucht nie in
/// `Debug`-Ausgaben auf.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: Zeroizing<[u8; KEY_LEN]>,
}

impl SymmetricKey {
    /// Erstellt einen Schluessel aus rohen Bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    /// Erstellt einen Schluessel aus einem Slice (muss genau 32 Bytes lang sein)
    pub fn from_slice(bytes: &[u8]) -> CryptoResult<Self> {
        let arr: [u8; KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::UngueltigeSchluesselLaenge {
                    erwartet: KEY_LEN,
                    erhalten: bytes.len(),
                })?;
        Ok(Self::from_bytes(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }

    /// Exportiert den Schluessel in das persistierbare Format
    pub fn export(&self) -> CryptoResult<ExportedKey> {
        let jwk = Jwk {
            alg: Some(JWK_ALG.to_string()),
            ext: Some(true),
            k: URL_SAFE_NO_PAD.encode(self.bytes.as_slice()),
            key_ops: Some(vec!["encrypt".to_string(), "decrypt".to_string()]),
            kty: JWK_KTY.to_string(),
        };
        let json = Zeroizing::new(
            serde_json::to_vec(&jwk)
                .map_err(|e| CryptoError::UngueltigerSchluessel(e.to_string()))?,
        );
        Ok(ExportedKey(STANDARD.encode(json.as_slice())))
    }

    /// Importiert einen zuvor exportierten Schluessel
    pub fn import(exported: &ExportedKey) -> CryptoResult<Self> {
        let json = Zeroizing::new(
            STANDARD
                .decode(exported.as_str().trim())
                .map_err(|e| CryptoError::UngueltigerSchluessel(format!("Base64: {e}")))?,
        );
        let jwk: Jwk = serde_json::from_slice(&json)
            .map_err(|e| CryptoError::UngueltigerSchluessel(format!("JWK: {e}")))?;

        if jwk.kty != JWK_KTY {
            return Err(CryptoError::UngueltigerSchluessel(format!(
                "kty '{}' statt '{JWK_KTY}'",
                jwk.kty
            )));
        }
        if let Some(alg) = jwk.alg.as_deref() {
            if alg != JWK_ALG {
                return Err(CryptoError::UngueltigerSchluessel(format!(
                    "alg '{alg}' statt '{JWK_ALG}'"
                )));
            }
        }

        let raw = Zeroizing::new(
            URL_SAFE_NO_PAD
                .decode(jwk.k.trim_end_matches('='))
                .map_err(|e| CryptoError::UngueltigerSchluessel(format!("k: {e}")))?,
        );
        Self::from_slice(&raw)
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SymmetricKey([REDACTED] {KEY_LEN} bytes)")
    }
}

/// Exportierter Raum-Schluessel: Base64 eines JWK-JSON-Objekts
///
/// Wird unveraendert persistiert und im Share-Token transportiert.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportedKey(String);

impl ExportedKey {
    /// Uebernimmt einen exportierten Schluessel ohne ihn zu pruefen
    ///
    /// Geprueft wird erst beim [`SymmetricKey::import`].
    pub fn new(blob: impl Into<String>) -> Self {
        Self(blob.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ExportedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ExportedKey([REDACTED] {} chars)", self.0.len())
    }
}

/// JSON Web Key fuer einen symmetrischen Schluessel (Felder alphabetisch,
/// wie von WebCrypto erzeugt)
#[derive(Serialize, Deserialize)]
struct Jwk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ext: Option<bool>,
    k: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key_ops: Option<Vec<String>>,
    kty: String,
}

impl Drop for Jwk {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.k.zeroize();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> SymmetricKey {
        let mut bytes = [0u8; KEY_LEN];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        SymmetricKey::from_bytes(bytes)
    }

    #[test]
    fn export_import_roundtrip() {
        let key = test_key();
        let exported = key.export().unwrap();
        let imported = SymmetricKey::import(&exported).unwrap();
        assert_eq!(imported.as_bytes(), key.as_bytes());
    }

    #[test]
    fn export_ist_jwk_im_base64() {
        let exported = test_key().export().unwrap();
        let json = STANDARD.decode(exported.as_str()).unwrap();
        let wert: serde_json::Value = serde_json::from_slice(&json).unwrap();

        assert_eq!(wert["kty"], "oct");
        assert_eq!(wert["alg"], "A256GCM");
        assert_eq!(wert["ext"], true);
        assert_eq!(wert["key_ops"], serde_json::json!(["encrypt", "decrypt"]));
        assert_eq!(
            URL_SAFE_NO_PAD.decode(wert["k"].as_str().unwrap()).unwrap(),
            test_key().as_bytes().to_vec()
        );
    }

    #[test]
    fn minimaler_jwk_wird_akzeptiert() {
        let json = format!(
            r#"{{"kty":"oct","k":"{}"}}"#,
            URL_SAFE_NO_PAD.encode([7u8; KEY_LEN])
        );
        let exported = ExportedKey::new(STANDARD.encode(json));
        let key = SymmetricKey::import(&exported).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; KEY_LEN]);
    }

    #[test]
    fn falscher_algorithmus_wird_abgelehnt() {
        let json = format!(
            r#"{{"kty":"oct","alg":"A128GCM","k":"{}"}}"#,
            URL_SAFE_NO_PAD.encode([1u8; KEY_LEN])
        );
        let result = SymmetricKey::import(&ExportedKey::new(STANDARD.encode(json)));
        assert!(matches!(result, Err(CryptoError::UngueltigerSchluessel(_))));
    }

    #[test]
    fn zu_kurzer_schluessel_wird_abgelehnt() {
        let json = format!(
            r#"{{"kty":"oct","k":"{}"}}"#,
            URL_SAFE_NO_PAD.encode([1u8; 16])
        );
        let result = SymmetricKey::import(&ExportedKey::new(STANDARD.encode(json)));
        assert!(matches!(
            result,
            Err(CryptoError::UngueltigeSchluesselLaenge {
                erwartet: 32,
                erhalten: 16
            })
        ));
    }

    #[test]
    fn kaputter_export_wird_abgelehnt() {
        assert!(SymmetricKey::import(&ExportedKey::new("%%%")).is_err());
        assert!(SymmetricKey::import(&ExportedKey::new(STANDARD.encode("kein json"))).is_err());
        assert!(SymmetricKey::import(&ExportedKey::new(STANDARD.encode(r#"{"kty":"oct"}"#))).is_err());
    }

    #[test]
    fn debug_zeigt_kein_schluesselmaterial() {
        let key = test_key();
        let exported = key.export().unwrap();
        assert_eq!(format!("{key:?}"), "SymmetricKey([REDACTED] 32 bytes)");
        assert!(!format!("{exported:?}").contains(exported.as_str()));
    }
}
