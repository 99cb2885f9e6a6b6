//! LocalStorage-backed item store (browser builds)
//!
//! The whole collection lives under one key as a versioned JSON document.

use web_sys::Storage;

use super::{ItemStore, default_items, envelope};
use crate::consts::STORAGE_KEY;
use crate::error::StoreError;
use crate::item::Item;

pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
        }
    }

    /// Store under a non-default key (e.g. a second machine on one page).
    pub fn with_key(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()
            .and_then(|window| window.local_storage().ok())
            .flatten()
    }
}

impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for LocalStorageStore {
    fn load(&self) -> Vec<Item> {
        let Some(storage) = self.storage() else {
            log::warn!("LocalStorage unavailable; starting from defaults");
            return default_items();
        };
        match storage.get_item(&self.key) {
            Ok(Some(json)) => envelope::decode(&json).unwrap_or_else(default_items),
            _ => {
                log::info!("No stored items; seeding defaults");
                default_items()
            }
        }
    }

    fn save(&mut self, items: &[Item]) -> Result<(), StoreError> {
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        let json = envelope::encode(items)?;
        storage
            .set_item(&self.key, &json)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        storage
            .remove_item(&self.key)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }

    fn export(&self) -> Option<String> {
        self.storage()?.get_item(&self.key).ok().flatten()
    }

    fn import(&mut self, json: &str) -> Result<(), StoreError> {
        envelope::validate_import(json)?;
        let storage = self.storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(&self.key, json)
            .map_err(|err| StoreError::Backend(format!("{err:?}")))
    }
}
