//! Raum-Sitzungssteuerung
//!
//! Verbindet KeyStore, Token-Codec und Signierdienst:
//! - Teilen: Schluessel sicherstellen, Token bauen, signieren lassen
//! - Beitreten: Link lesen, Token dekodieren, Schluessel uebernehmen,
//!   aktiven Raum wechseln
//! - Ver-/Entschluesseln von Nachrichtentexten im Namen der Oberflaeche
//!
//! Der Zustand `Shared` und die zuletzt gesehene Signatur leben nur im
//! Speicher dieses Controllers.

use std::sync::Arc;

use chrono::{Duration, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::{info, warn};

use roomlock_core::{RoomCode, RoomPhase};
use roomlock_crypto::{self as crypto, UNDECRYPTABLE_PLACEHOLDER};
use roomlock_db::RoomKeyRepository;
use roomlock_protocol::{ShareToken, SignedLink};

use crate::error::{RoomError, RoomResult};
use crate::keystore::KeyStore;
use crate::signing::SigningClient;

/// Einstellungen des Controllers
#[derive(Debug, Clone, Default)]
pub struct ControllerConfig {
    /// Maximales Alter eingeloester Share-Links; `None` = keine Pruefung
    pub max_link_age: Option<Duration>,
}

impl ControllerConfig {
    /// Konfiguration mit Altersgrenze in Tagen
    pub fn mit_max_alter_tage(tage: i64) -> Self {
        Self {
            max_link_age: Some(Duration::days(tage)),
        }
    }
}

/// Steuert Schluessel und Share-Links der Raeume eines Benutzerprofils
pub struct RoomSessionController<B> {
    keys: KeyStore<B>,
    signer: Arc<dyn SigningClient>,
    config: ControllerConfig,
    aktiver_raum: RwLock<RoomCode>,
    /// Geteilte Raeume mit der Signatur ihres letzten Links
    geteilt: DashMap<RoomCode, String>,
}

impl<B: RoomKeyRepository> RoomSessionController<B> {
    pub fn neu(backend: B, signer: Arc<dyn SigningClient>, config: ControllerConfig) -> Self {
        Self {
            keys: KeyStore::neu(backend),
            signer,
            config,
            aktiver_raum: RwLock::new(RoomCode::demo()),
            geteilt: DashMap::new(),
        }
    }

    pub fn key_store(&self) -> &KeyStore<B> {
        &self.keys
    }

    /// Aktuell aktiver Raum (anfangs der Demo-Raum)
    pub fn active_room(&self) -> RoomCode {
        self.aktiver_raum.read().clone()
    }

    /// Wechselt den aktiven Raum (Beitreten per Code)
    pub fn switch_room(&self, raw: &str) -> RoomResult<RoomCode> {
        let room = RoomCode::parse(raw)?;
        *self.aktiver_raum.write() = room.clone();
        info!(room = %room, "Aktiver Raum gewechselt");
        Ok(room)
    }

    /// Erzeugt Token und Signatur fuer einen Share-Link
    ///
    /// Der Schluessel bleibt auch dann gespeichert, wenn der Signierdienst
    /// ausfaellt. Ein erneuter Versuch verwendet denselben Schluessel.
    pub async fn build_share_link(&self, room: &RoomCode) -> RoomResult<SignedLink> {
        if room.ist_demo() {
            return Err(RoomError::DemoRoom);
        }

        let key = self.keys.get_or_create(room).await?;
        let token = ShareToken::encode(room, &key.export()?)?;

        let signature = self.signer.sign(&token).await.map_err(|e| {
            warn!(room = %room, fehler = %e, "Share-Link konnte nicht signiert werden");
            e
        })?;

        self.geteilt.insert(room.clone(), signature.clone());
        info!(room = %room, "Share-Link erstellt");
        Ok(SignedLink::neu(token, signature))
    }

    /// Wie [`Self::build_share_link`], gerendert als vollstaendige URL
    pub async fn share_url(&self, room: &RoomCode, origin: &str) -> RoomResult<String> {
        Ok(self.build_share_link(room).await?.to_url(origin))
    }

    /// Loest einen Share-Link ein
    ///
    /// `input` ist ein Fragment (`#t=..&s=..`) oder eine vollstaendige URL.
    /// Fehlt `t` oder `s`, ist das kein Fehler: Ergebnis ist `Ok(None)`.
    /// Bei jedem Fehler bleiben Schluessel und aktiver Raum unveraendert.
    pub async fn consume_share_link(&self, input: &str) -> RoomResult<Option<RoomCode>> {
        let Some(link) = SignedLink::parse(input) else {
            return Ok(None);
        };

        let token = ShareToken::decode(&link.token).map_err(|e| {
            warn!(fehler = %e, "Share-Link abgelehnt");
            RoomError::from(e)
        })?;

        if let Some(max_alter) = self.config.max_link_age {
            token.pruefe_alter(max_alter, Utc::now())?;
        }
        if token.room.ist_demo() {
            return Err(RoomError::DemoRoom);
        }

        self.keys.store(&token.room, &token.key).await?;
        self.geteilt.insert(token.room.clone(), link.signature);
        *self.aktiver_raum.write() = token.room.clone();

        info!(room = %token.room, "Share-Link eingeloest");
        Ok(Some(token.room))
    }

    /// Gibt true zurueck wenn fuer den Raum ein Schluessel gespeichert ist
    pub async fn is_encrypted(&self, room: &RoomCode) -> RoomResult<bool> {
        if room.ist_demo() {
            return Ok(false);
        }
        self.keys.has(room).await
    }

    pub async fn room_phase(&self, room: &RoomCode) -> RoomResult<RoomPhase> {
        if !self.is_encrypted(room).await? {
            return Ok(RoomPhase::Unkeyed);
        }
        if self.geteilt.contains_key(room) {
            Ok(RoomPhase::Shared)
        } else {
            Ok(RoomPhase::Keyed)
        }
    }

    /// Signatur des zuletzt erstellten oder eingeloesten Links
    pub fn link_signature(&self, room: &RoomCode) -> Option<String> {
        self.geteilt.get(room).map(|s| s.value().clone())
    }

    /// Verschluesselt einen Nachrichtentext (legt bei Bedarf den Schluessel an)
    pub async fn encrypt_text(&self, room: &RoomCode, plaintext: &str) -> RoomResult<String> {
        if room.ist_demo() {
            return Err(RoomError::DemoRoom);
        }
        let key = self.keys.get_or_create(room).await?;
        Ok(crypto::encrypt_text(plaintext, &key)?)
    }

    /// Entschluesselt einen Nachrichtentext
    pub async fn decrypt_text(&self, room: &RoomCode, encoded: &str) -> RoomResult<String> {
        let key = self.keys.get(room).await?.ok_or_else(|| {
            RoomError::DecryptionFailed(format!("kein Schluessel fuer Raum '{room}'"))
        })?;
        Ok(crypto::decrypt_text(encoded, &key)?)
    }

    /// Entschluesselt fuer die Anzeige
    ///
    /// Nicht entschluesselbare Nachrichten, auch bei unlesbarem
    /// gespeicherten Schluessel, werden zu [`UNDECRYPTABLE_PLACEHOLDER`].
    /// Speicherfehler werden weitergereicht.
    pub async fn decrypt_for_display(&self, room: &RoomCode, encoded: &str) -> RoomResult<String> {
        match self.decrypt_text(room, encoded).await {
            Ok(text) => Ok(text),
            Err(RoomError::DecryptionFailed(grund))
            | Err(RoomError::BeschaedigterSchluessel { grund, .. }) => {
                tracing::debug!(room = %room, grund = %grund, "Nachricht nicht entschluesselbar");
                Ok(UNDECRYPTABLE_PLACEHOLDER.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Loescht einen Raum lokal
    ///
    /// Entfernt Schluessel, Shared-Status und Signatur. War der Raum aktiv,
    /// wird auf den Demo-Raum gewechselt.
    pub async fn delete_room(&self, room: &RoomCode) -> RoomResult<bool> {
        if room.ist_demo() {
            return Err(RoomError::DemoRoom);
        }

        let entfernt = self.keys.remove(room).await?;
        self.geteilt.remove(room);

        let mut aktiv = self.aktiver_raum.write();
        if *aktiv == *room {
            *aktiv = RoomCode::demo();
        }
        Ok(entfernt)
    }
}
