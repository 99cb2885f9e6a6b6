//! Versioned JSON envelope for the stored item list
//!
//! Document shape:
//!
//! ```json
//! { "version": "1.0", "items": [ ... ], "lastModified": 1722850000000 }
//! ```
//!
//! A schema version mismatch discards stored items rather than migrating
//! them; the caller reseeds from the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ITEMS, SCHEMA_VERSION};
use crate::error::StoreError;
use crate::item::Item;
use crate::platform::now_ms;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub version: String,
    pub items: Vec<Item>,
    pub last_modified: u64,
}

/// Wrap `items` in a fresh envelope and serialize it.
pub fn encode(items: &[Item]) -> Result<String, StoreError> {
    if items.len() > MAX_ITEMS {
        return Err(StoreError::CapacityExceeded { max: MAX_ITEMS });
    }
    let doc = StoredDocument {
        version: SCHEMA_VERSION.to_string(),
        items: items.to_vec(),
        last_modified: now_ms(),
    };
    serde_json::to_string(&doc).map_err(|err| StoreError::Backend(err.to_string()))
}

/// Parse a stored document, returning its items only when the JSON is
/// readable and the schema version matches. `None` means "fall back to the
/// default seed set."
pub fn decode(json: &str) -> Option<Vec<Item>> {
    let doc: StoredDocument = match serde_json::from_str(json) {
        Ok(doc) => doc,
        Err(err) => {
            log::warn!("Discarding unreadable stored document: {err}");
            return None;
        }
    };
    if doc.version != SCHEMA_VERSION {
        log::warn!(
            "Schema version mismatch (stored {}, expected {SCHEMA_VERSION}); using defaults",
            doc.version
        );
        return None;
    }
    Some(doc.items)
}

/// Check an imported document before writing it through: `items` must be
/// present and must be an array.
pub fn validate_import(json: &str) -> Result<(), StoreError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|err| StoreError::InvalidFormat(err.to_string()))?;
    match value.get("items") {
        Some(serde_json::Value::Array(_)) => Ok(()),
        Some(_) => Err(StoreError::InvalidFormat(
            "\"items\" is not an array".into(),
        )),
        None => Err(StoreError::InvalidFormat("missing \"items\"".into())),
    }
}
