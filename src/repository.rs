//! Item repository: sole owner of the capsule collection
//!
//! Every mutation flows through here. Each mutating operation validates,
//! applies in memory, writes the full collection to the store, then emits
//! one change event, in that order. A failed write rolls the in-memory
//! change back before the error propagates, so a returned error always
//! means the collection is unchanged.
//!
//! All reads return snapshots; callers never hold a live reference into the
//! collection.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::{MAX_ITEMS, MAX_NAME_CHARS};
use crate::error::{GachaError, GachaResult, ValidationError};
use crate::events::{EventBus, EventKind, RepositoryEvent};
use crate::item::{Item, ItemId, assign_color};
use crate::persistence::ItemStore;
use crate::platform::now_ms;

/// Field-wise patch for [`ItemRepository::update_item`]. Unset fields keep
/// their current value.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub is_winner: Option<bool>,
}

impl ItemUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn winner(is_winner: bool) -> Self {
        Self {
            is_winner: Some(is_winner),
            ..Self::default()
        }
    }
}

pub struct ItemRepository {
    items: Vec<Item>,
    store: Box<dyn ItemStore>,
    events: EventBus,
    rng: Pcg32,
}

impl ItemRepository {
    /// Load the collection from `store`.
    pub fn load(store: Box<dyn ItemStore>) -> Self {
        Self::build(store, Pcg32::from_rng(&mut rand::rng()))
    }

    /// Load with a seeded color RNG, for deterministic tests and replays.
    pub fn load_with_seed(store: Box<dyn ItemStore>, seed: u64) -> Self {
        Self::build(store, Pcg32::seed_from_u64(seed))
    }

    fn build(store: Box<dyn ItemStore>, rng: Pcg32) -> Self {
        let items = store.load();
        log::info!("Loaded {} items", items.len());
        Self {
            items,
            store,
            events: EventBus::new(),
            rng,
        }
    }

    // === Queries (snapshots, insertion order) ===

    pub fn all_items(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Items still eligible for a draw, in the same relative order as
    /// [`Self::all_items`].
    pub fn eligible_items(&self) -> Vec<Item> {
        self.items
            .iter()
            .filter(|item| !item.is_winner)
            .cloned()
            .collect()
    }

    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.items.iter().find(|item| item.id == id).cloned()
    }

    /// Past winners, most recent first.
    pub fn winner_history(&self) -> Vec<Item> {
        let mut winners: Vec<Item> = self
            .items
            .iter()
            .filter(|item| item.is_winner)
            .cloned()
            .collect();
        winners.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        winners
    }

    /// Register a change listener. Listeners fire synchronously, in
    /// registration order, after the mutation has persisted.
    pub fn on<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&RepositoryEvent) + 'static,
    {
        self.events.subscribe(kind, listener);
    }

    // === Mutations ===

    /// Add a new item. The name is trimmed and must be non-empty, at most
    /// [`MAX_NAME_CHARS`] characters, and unique; the collection must be
    /// below [`MAX_ITEMS`]. A color is assigned when none is given.
    pub fn add_item(&mut self, name: &str, color: Option<String>) -> GachaResult<Item> {
        let name = validate_name(name)?;
        if self.items.iter().any(|item| item.name == name) {
            return Err(ValidationError::DuplicateName(name).into());
        }
        if self.items.len() >= MAX_ITEMS {
            return Err(ValidationError::CapacityExceeded { max: MAX_ITEMS }.into());
        }

        let color = color.unwrap_or_else(|| assign_color(&self.items, &mut self.rng));
        let item = Item::new(name, color);
        self.items.push(item.clone());
        if let Err(err) = self.persist() {
            self.items.pop();
            return Err(err);
        }
        self.events.emit(&RepositoryEvent::ItemAdded(item.clone()));
        Ok(item)
    }

    /// Apply a patch to an existing item. A changed name is re-validated
    /// against all other items; `id` and `created_at` are preserved and
    /// `updated_at` is refreshed.
    pub fn update_item(&mut self, id: ItemId, update: ItemUpdate) -> GachaResult<Item> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(GachaError::NotFound(id))?;

        let new_name = match update.name {
            Some(raw) => {
                let name = validate_name(&raw)?;
                if self
                    .items
                    .iter()
                    .any(|other| other.id != id && other.name == name)
                {
                    return Err(ValidationError::DuplicateName(name).into());
                }
                Some(name)
            }
            None => None,
        };

        let previous = self.items[index].clone();
        {
            let item = &mut self.items[index];
            if let Some(name) = new_name {
                item.name = name;
            }
            if let Some(color) = update.color {
                item.color = color;
            }
            if let Some(is_winner) = update.is_winner {
                item.is_winner = is_winner;
            }
            item.updated_at = now_ms();
        }
        if let Err(err) = self.persist() {
            self.items[index] = previous;
            return Err(err);
        }

        let item = self.items[index].clone();
        self.events.emit(&RepositoryEvent::ItemUpdated(item.clone()));
        Ok(item)
    }

    /// Remove an item. Returns whether a removal occurred; a missing id is
    /// not an error.
    pub fn delete_item(&mut self, id: ItemId) -> GachaResult<bool> {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return Ok(false);
        };
        let removed = self.items.remove(index);
        if let Err(err) = self.persist() {
            self.items.insert(index, removed);
            return Err(err);
        }
        self.events.emit(&RepositoryEvent::ItemDeleted(removed));
        Ok(true)
    }

    /// Flag an item as having won. This is the lottery engine's commit path.
    pub fn mark_as_winner(&mut self, id: ItemId) -> GachaResult<Item> {
        self.update_item(id, ItemUpdate::winner(true))
    }

    /// Clear the winner flag on every item. One persistence write, one
    /// event. Idempotent.
    pub fn reset_all(&mut self) -> GachaResult<()> {
        let previous = self.items.clone();
        let now = now_ms();
        for item in &mut self.items {
            item.is_winner = false;
            item.updated_at = now;
        }
        if let Err(err) = self.persist() {
            self.items = previous;
            return Err(err);
        }
        self.events.emit(&RepositoryEvent::AllItemsReset);
        Ok(())
    }

    /// Remove every item. One persistence write, one event.
    pub fn delete_all(&mut self) -> GachaResult<()> {
        let previous = std::mem::take(&mut self.items);
        if let Err(err) = self.persist() {
            self.items = previous;
            return Err(err);
        }
        self.events.emit(&RepositoryEvent::AllItemsDeleted);
        Ok(())
    }

    // === Backup ===

    /// Raw stored document, if any.
    pub fn export(&self) -> Option<String> {
        self.store.export()
    }

    /// Replace the stored document wholesale and reload from it. No item
    /// event fires; callers re-render from a fresh snapshot.
    pub fn import(&mut self, json: &str) -> GachaResult<()> {
        self.store.import(json)?;
        self.items = self.store.load();
        Ok(())
    }

    fn persist(&mut self) -> GachaResult<()> {
        self.store.save(&self.items).map_err(|err| {
            log::error!("Failed to save items: {err}");
            GachaError::Persistence(err)
        })
    }
}

fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(ValidationError::NameTooLong {
            max: MAX_NAME_CHARS,
        });
    }
    Ok(trimmed.to_string())
}
