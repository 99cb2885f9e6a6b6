//! Error taxonomy for the gacha core
//!
//! Every failure a caller can observe maps to one specific category so the
//! UI can show a targeted message (duplicate name, nothing to draw, draw
//! already running) instead of a generic one.

use thiserror::Error;

use crate::item::ItemId;

pub type GachaResult<T> = Result<T, GachaError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GachaError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("no eligible items to draw from")]
    NoEligibleItems,

    #[error("a draw is already running")]
    AlreadyRunning,

    #[error("storage error: {0}")]
    Persistence(#[from] StoreError),
}

/// Rejected `add_item`/`update_item` input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("item name must not be empty")]
    EmptyName,

    #[error("item name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("an item named \"{0}\" already exists")]
    DuplicateName(String),

    #[error("at most {max} items are allowed")]
    CapacityExceeded { max: usize },
}

/// Failure from the persistence backend or a malformed stored document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage backend is unavailable")]
    Unavailable,

    #[error("storage write failed: {0}")]
    Backend(String),

    #[error("refusing to store more than {max} items")]
    CapacityExceeded { max: usize },

    #[error("invalid document: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_specific() {
        let err = GachaError::from(ValidationError::DuplicateName("Ops".into()));
        assert_eq!(err.to_string(), "an item named \"Ops\" already exists");

        let err = GachaError::from(ValidationError::CapacityExceeded { max: 50 });
        assert_eq!(err.to_string(), "at most 50 items are allowed");

        assert_eq!(
            GachaError::NoEligibleItems.to_string(),
            "no eligible items to draw from"
        );
        assert_eq!(
            GachaError::AlreadyRunning.to_string(),
            "a draw is already running"
        );
    }
}
