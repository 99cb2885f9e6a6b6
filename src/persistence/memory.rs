//! In-memory item store (native builds and tests)
//!
//! Same envelope and contract as the LocalStorage store, over a single
//! document slot.

use super::{ItemStore, default_items, envelope};
use crate::error::StoreError;
use crate::item::Item;

#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-encoded document.
    pub fn with_document(json: impl Into<String>) -> Self {
        Self {
            document: Some(json.into()),
        }
    }
}

impl ItemStore for MemoryStore {
    fn load(&self) -> Vec<Item> {
        match &self.document {
            Some(json) => envelope::decode(json).unwrap_or_else(default_items),
            None => default_items(),
        }
    }

    fn save(&mut self, items: &[Item]) -> Result<(), StoreError> {
        self.document = Some(envelope::encode(items)?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.document = None;
        Ok(())
    }

    fn export(&self) -> Option<String> {
        self.document.clone()
    }

    fn import(&mut self, json: &str) -> Result<(), StoreError> {
        envelope::validate_import(json)?;
        self.document = Some(json.to_string());
        Ok(())
    }
}
