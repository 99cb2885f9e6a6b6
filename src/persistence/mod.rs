//! Item persistence
//!
//! Features:
//! - Versioned JSON envelope around the full item list
//! - Default seeding on absence, corruption, or schema version mismatch
//! - Raw export / validated import
//!
//! `LocalStorageStore` backs the browser build; `MemoryStore` backs native
//! builds and tests. Both speak the same envelope.

pub mod envelope;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

pub use envelope::StoredDocument;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::item::{COLOR_PALETTE, Item};

/// Durable store for the item collection.
///
/// The repository is the sole caller; it writes the whole collection after
/// every mutation and treats its in-memory state as authoritative between
/// successful saves.
pub trait ItemStore {
    /// Previously saved items, or the default seed set when nothing usable
    /// is stored (missing document, unreadable JSON, version mismatch).
    fn load(&self) -> Vec<Item>;

    /// Write the full collection as one document. Enforces the capacity
    /// bound defensively at the boundary.
    fn save(&mut self, items: &[Item]) -> Result<(), StoreError>;

    /// Drop the stored document entirely.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Raw stored document, if any.
    fn export(&self) -> Option<String>;

    /// Validate a raw document of the stored shape and write it through.
    fn import(&mut self, json: &str) -> Result<(), StoreError>;
}

/// Deterministic seed set used when no stored data exists.
pub fn default_items() -> Vec<Item> {
    ["Sales", "Engineering", "Planning", "HR", "General Affairs"]
        .iter()
        .zip(COLOR_PALETTE)
        .map(|(name, color)| Item::new(*name, color))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_items_seed_set() {
        let items = default_items();
        assert_eq!(items.len(), 5);
        assert!(items.iter().all(|item| !item.is_winner));
        assert_eq!(items[0].name, "Sales");
        assert_eq!(items[0].color, COLOR_PALETTE[0]);
        assert_eq!(items[4].name, "General Affairs");
        assert_eq!(items[4].color, COLOR_PALETTE[4]);
    }
}
