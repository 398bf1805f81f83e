//! In-Memory [`RoomKeyRepository`] (fuer Tests und fluechtige Profile)

use dashmap::DashMap;

use crate::repository::{DbResult, RoomKeyRepository};

/// Fluechtiger Schluessel-Speicher auf Basis von `DashMap`
#[derive(Debug, Default)]
pub struct InMemoryRoomKeys {
    eintraege: DashMap<String, String>,
}

impl InMemoryRoomKeys {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Anzahl gespeicherter Eintraege
    pub fn len(&self) -> usize {
        self.eintraege.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eintraege.is_empty()
    }
}

impl RoomKeyRepository for InMemoryRoomKeys {
    async fn get(&self, storage_key: &str) -> DbResult<Option<String>> {
        Ok(self.eintraege.get(storage_key).map(|e| e.value().clone()))
    }

    async fn put(&self, storage_key: &str, value: &str) -> DbResult<()> {
        self.eintraege
            .insert(storage_key.to_string(), value.to_string());
        Ok(())
    }

    async fn put_if_absent(&self, storage_key: &str, value: &str) -> DbResult<String> {
        let eintrag = self
            .eintraege
            .entry(storage_key.to_string())
            .or_insert_with(|| value.to_string());
        Ok(eintrag.value().clone())
    }

    async fn exists(&self, storage_key: &str) -> DbResult<bool> {
        Ok(self.eintraege.contains_key(storage_key))
    }

    async fn delete(&self, storage_key: &str) -> DbResult<bool> {
        Ok(self.eintraege.remove(storage_key).is_some())
    }

    async fn list_keys(&self) -> DbResult<Vec<String>> {
        let mut keys: Vec<String> = self.eintraege.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        Ok(keys)
    }
}
