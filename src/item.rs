//! Item model and capsule colors
//!
//! An item is one capsule in the machine: named, colored, and eligible for
//! at most one win. Serialized field names are camelCase to match the
//! stored document schema.

use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::platform::now_ms;

pub type ItemId = Uuid;

/// Capsule color palette. Assignment avoids colors already in use while any
/// palette entry remains free, then falls back to a pseudo-random hex.
pub const COLOR_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#95E1D3", "#FFE66D", "#C77DFF", "#FF8C94", "#A8E6CF", "#FFD3B6",
    "#FFAAA5", "#B4A7D6",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier, immutable after creation
    pub id: ItemId,
    /// Display name, unique across the collection
    pub name: String,
    /// True once the item has won; excluded from future draws
    pub is_winner: bool,
    /// Display color (CSS hex)
    pub color: String,
    /// Creation time, ms since the Unix epoch, immutable
    pub created_at: u64,
    /// Last mutation time, ms since the Unix epoch
    pub updated_at: u64,
}

impl Item {
    /// Create a fresh eligible item. Callers validate and trim `name` first.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        let now = now_ms();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_winner: false,
            color: color.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Pick a display color for a new item: an unused palette entry while one
/// exists, a pseudo-random `#rrggbb` once the palette is exhausted.
pub fn assign_color(existing: &[Item], rng: &mut impl Rng) -> String {
    let available: Vec<&str> = COLOR_PALETTE
        .iter()
        .copied()
        .filter(|color| !existing.iter().any(|item| item.color == *color))
        .collect();

    if available.is_empty() {
        format!("#{:06x}", rng.random_range(0..0x100_0000u32))
    } else {
        available[rng.random_range(0..available.len())].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new("Sales", "#FF6B6B");
        assert!(!item.is_winner);
        assert_eq!(item.name, "Sales");
        assert_eq!(item.color, "#FF6B6B");
        assert_eq!(item.created_at, item.updated_at);
        assert!(!item.id.is_nil());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Item::new("A", "#FF6B6B");
        let b = Item::new("B", "#4ECDC4");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_assign_color_avoids_used_palette_entries() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut items = Vec::new();
        // Take 9 of the 10 palette colors; the only free one must be picked
        for (i, color) in COLOR_PALETTE.iter().take(9).enumerate() {
            items.push(Item::new(format!("item-{i}"), *color));
        }
        let color = assign_color(&items, &mut rng);
        assert_eq!(color, COLOR_PALETTE[9]);
    }

    #[test]
    fn test_assign_color_falls_back_to_random_hex() {
        let mut rng = Pcg32::seed_from_u64(42);
        let items: Vec<Item> = COLOR_PALETTE
            .iter()
            .enumerate()
            .map(|(i, color)| Item::new(format!("item-{i}"), *color))
            .collect();
        let color = assign_color(&items, &mut rng);
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        assert!(!COLOR_PALETTE.contains(&color.as_str()));
    }

    #[test]
    fn test_serialized_field_names_match_schema() {
        let item = Item::new("Sales", "#FF6B6B");
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"isWinner\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));

        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);
    }
}
