//! Item domain model.
//!
//! This module defines the core `Item` type representing one chosen value in the
//! enhanced control. Items are never physically removed during a session; removal
//! flips the `active` flag so the id space stays stable and the session history
//! remains inspectable.

use serde::{Deserialize, Serialize};

/// Represents one chosen or tagged value.
///
/// An item is created when the user picks a choice from the dropdown or types a
/// free value into a text control. Items live in the store's item collection and
/// are only ever soft-deleted.
///
/// # Fields
///
/// - `id`: Store-assigned identifier, monotonically increasing and never reused
/// - `value`: The raw value serialized back into the native control
/// - `label`: Display text, defaults to `value` when the source had no label
/// - `choice_id`: Originating choice id, `None` for free-typed values
/// - `active`: `false` means soft-deleted and excluded from every selector
/// - `selected`: Marked for batch removal; only meaningful while `active`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub value: String,
    pub label: String,
    pub choice_id: Option<u64>,
    pub active: bool,
    pub selected: bool,
}

impl Item {
    /// Creates a new active, unselected item.
    ///
    /// Called by the items reducer when an add action is applied; the id comes
    /// from the store's counter, never from the caller.
    ///
    /// # Examples
    ///
    /// ```
    /// use tagbox::domain::Item;
    ///
    /// let item = Item::new(1, "red".to_string(), "Red".to_string(), None);
    /// assert!(item.active);
    /// assert!(!item.selected);
    /// assert!(item.choice_id.is_none());
    /// ```
    #[must_use]
    pub const fn new(id: u64, value: String, label: String, choice_id: Option<u64>) -> Self {
        Self {
            id,
            value,
            label,
            choice_id,
            active: true,
            selected: false,
        }
    }
}
