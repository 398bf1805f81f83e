//! KeyStore: ein persistierter Raum-Schluessel pro Raumcode
//!
//! Der Store kapselt ein [`RoomKeyRepository`] und arbeitet ausschliesslich
//! mit kanonischen [`RoomCode`]s. Gespeichert wird der exportierte
//! Schluessel unter `room_key_<CODE>`.

use roomlock_core::{RoomCode, STORAGE_KEY_PREFIX};
use roomlock_crypto::{generate_key, ExportedKey, SymmetricKey};
use roomlock_db::RoomKeyRepository;
use tracing::{debug, info, warn};

use crate::error::{RoomError, RoomResult};

/// Schluessel-Speicher fuer ein Benutzerprofil
#[derive(Debug)]
pub struct KeyStore<B> {
    backend: B,
}

impl<B: RoomKeyRepository> KeyStore<B> {
    pub fn neu(backend: B) -> Self {
        Self { backend }
    }

    /// Zugriff auf das Speicher-Backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Liefert den Schluessel des Raums und legt bei Bedarf einen neuen an
    ///
    /// Zwei gleichzeitige Aufrufe fuer denselben Raum erhalten denselben
    /// Schluessel: angelegt wird nur wenn noch kein Eintrag existiert.
    pub async fn get_or_create(&self, room: &RoomCode) -> RoomResult<SymmetricKey> {
        if let Some(key) = self.get(room).await? {
            return Ok(key);
        }

        let key = generate_key()?;
        let exported = key.export()?;
        let gespeichert = self
            .backend
            .put_if_absent(&room.storage_key(), exported.as_str())
            .await?;

        if gespeichert == exported.as_str() {
            info!(room = %room, "Neuer Raum-Schluessel erzeugt");
            Ok(key)
        } else {
            debug!(room = %room, "Raum-Schluessel wurde parallel angelegt");
            importieren(room, &ExportedKey::new(gespeichert))
        }
    }

    /// Laedt den Schluessel des Raums, falls vorhanden
    pub async fn get(&self, room: &RoomCode) -> RoomResult<Option<SymmetricKey>> {
        match self.exported(room).await? {
            Some(exported) => importieren(room, &exported).map(Some),
            None => Ok(None),
        }
    }

    /// Laedt den exportierten Schluessel unveraendert
    pub async fn exported(&self, room: &RoomCode) -> RoomResult<Option<ExportedKey>> {
        let wert = self.backend.get(&room.storage_key()).await?;
        Ok(wert.map(ExportedKey::new))
    }

    /// Speichert einen von aussen erhaltenen Schluessel (last-write-wins)
    ///
    /// Der Schluessel wird vorab testweise importiert, damit nie ein
    /// unbrauchbarer Eintrag persistiert wird.
    pub async fn store(&self, room: &RoomCode, exported: &ExportedKey) -> RoomResult<()> {
        SymmetricKey::import(exported)
            .map_err(|e| RoomError::InvalidToken(format!("Schluessel: {e}")))?;
        self.backend
            .put(&room.storage_key(), exported.as_str())
            .await?;
        info!(room = %room, "Raum-Schluessel uebernommen");
        Ok(())
    }

    /// Gibt true zurueck wenn fuer den Raum ein Schluessel gespeichert ist
    pub async fn has(&self, room: &RoomCode) -> RoomResult<bool> {
        Ok(self.backend.exists(&room.storage_key()).await?)
    }

    /// Entfernt den Schluessel. Gibt true zurueck wenn einer existierte.
    pub async fn remove(&self, room: &RoomCode) -> RoomResult<bool> {
        let entfernt = self.backend.delete(&room.storage_key()).await?;
        if entfernt {
            info!(room = %room, "Raum-Schluessel geloescht");
        }
        Ok(entfernt)
    }

    /// Alle Raeume mit gespeichertem Schluessel
    pub async fn rooms(&self) -> RoomResult<Vec<RoomCode>> {
        let keys = self.backend.list_keys().await?;
        let mut rooms = Vec::with_capacity(keys.len());
        for key in keys {
            let Some(code) = key.strip_prefix(STORAGE_KEY_PREFIX) else {
                continue;
            };
            match RoomCode::parse(code) {
                Ok(room) => rooms.push(room),
                Err(e) => warn!(eintrag = %key, fehler = %e, "Ungueltiger Eintrag im Schluessel-Speicher"),
            }
        }
        Ok(rooms)
    }
}

fn importieren(room: &RoomCode, exported: &ExportedKey) -> RoomResult<SymmetricKey> {
    SymmetricKey::import(exported).map_err(|e| RoomError::BeschaedigterSchluessel {
        room: room.to_string(),
        grund: e.to_string(),
    })
}
