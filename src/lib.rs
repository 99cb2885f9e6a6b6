//! Gacha Pon - capsule-toy lottery core
//!
//! Core modules:
//! - `repository`: item collection owner (CRUD, validation, change events)
//! - `lottery`: fair draw state machine with an at-most-one-draw guard
//! - `persistence`: versioned JSON envelope over LocalStorage / memory
//! - `ceremony`: presentation ceremony capability (reveal delay only)
//! - `platform`: browser/native platform abstraction

pub mod ceremony;
pub mod error;
pub mod events;
pub mod item;
pub mod lottery;
pub mod persistence;
pub mod platform;
pub mod repository;

pub use ceremony::{Ceremony, CeremonyPhase, ScriptedCeremony};
pub use error::{GachaError, GachaResult, StoreError, ValidationError};
pub use events::{EventKind, RepositoryEvent};
pub use item::{Item, ItemId};
pub use lottery::{LotteryEngine, PendingDraw};
pub use repository::{ItemRepository, ItemUpdate};

/// Collection limits and storage schema constants
pub mod consts {
    /// Maximum number of items in the collection
    pub const MAX_ITEMS: usize = 50;
    /// Maximum item name length, in characters after trimming
    pub const MAX_NAME_CHARS: usize = 50;
    /// LocalStorage key holding the item document
    pub const STORAGE_KEY: &str = "gacha_items_v1";
    /// Stored document schema version; a mismatch discards stored data
    pub const SCHEMA_VERSION: &str = "1.0";
}
