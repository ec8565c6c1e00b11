//! Actions describing state transitions, and their pure creators.
//!
//! This module defines the [`Action`] type, the complete vocabulary of state
//! transitions the store understands, together with a family of pure creator
//! functions. Creators only shape data; they perform no validation and carry no
//! ids for creations. Ids are assigned by the store at dispatch time so they
//! stay monotonic regardless of how many items have been soft-deleted.
//!
//! # Architecture
//!
//! The controller builds actions through the creators and hands them to
//! [`Store::dispatch`](crate::store::Store::dispatch). Each reducer
//! pattern-matches the action and either produces a new collection or returns
//! the existing one untouched.
//!
//! # Example
//!
//! ```
//! use tagbox::store::actions;
//!
//! let action = actions::add_item("red".to_string(), None, None);
//! ```

/// State transitions understood by the reducers.
///
/// Actions are plain data. An action that carries no meaning for a collection
/// leaves that collection's instance unchanged, so irrelevant actions are
/// silent no-ops rather than errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Appends a new active item; also marks the originating choice selected.
    AddItem {
        /// Raw value serialized back into the native control.
        value: String,
        /// Display text, already defaulted to `value` by the creator.
        label: String,
        /// Originating choice id, `None` for free-typed values.
        choice_id: Option<u64>,
    },

    /// Soft-deletes an item; also releases the originating choice.
    RemoveItem {
        /// Id of the item to deactivate.
        id: u64,
        /// Originating choice id, carried so the choices reducer can flip
        /// that choice back to unselected.
        choice_id: Option<u64>,
    },

    /// Sets the batch-removal mark on an active item.
    SelectItem {
        /// Id of the item to mark.
        id: u64,
        /// New mark value.
        selected: bool,
    },

    /// Appends a new choice to the selectable pool.
    AddChoice {
        /// Raw value items created from this choice will carry.
        value: String,
        /// Display text, already defaulted to `value` by the creator.
        label: String,
        /// Containing group id, `None` for ungrouped entries.
        group_id: Option<u64>,
        /// Whether the entry (or its group) is disabled.
        disabled: bool,
    },

    /// Applies a search result: listed choices become active in rank order,
    /// everything else goes inactive.
    FilterChoices {
        /// Matched choice ids, best first. Position is the rank.
        ranked_ids: Vec<u64>,
    },

    /// Resets search filtering: every non-disabled choice becomes active
    /// again and all ranks are cleared.
    ActivateChoices,

    /// Appends a new group.
    AddGroup {
        /// Display heading for the group.
        label: String,
        /// Whether the whole group is disabled.
        disabled: bool,
        /// Whether the group arrived with at least one entry.
        has_choices: bool,
    },
}

/// Creates an add-item action. The label defaults to the value when absent.
#[must_use]
pub fn add_item(value: String, label: Option<String>, choice_id: Option<u64>) -> Action {
    let label = label.unwrap_or_else(|| value.clone());
    Action::AddItem {
        value,
        label,
        choice_id,
    }
}

/// Creates a remove-item action.
#[must_use]
pub const fn remove_item(id: u64, choice_id: Option<u64>) -> Action {
    Action::RemoveItem { id, choice_id }
}

/// Creates a select-item action.
#[must_use]
pub const fn select_item(id: u64, selected: bool) -> Action {
    Action::SelectItem { id, selected }
}

/// Creates an add-choice action. The label defaults to the value when absent.
#[must_use]
pub fn add_choice(
    value: String,
    label: Option<String>,
    group_id: Option<u64>,
    disabled: bool,
) -> Action {
    let label = label.unwrap_or_else(|| value.clone());
    Action::AddChoice {
        value,
        label,
        group_id,
        disabled,
    }
}

/// Creates a filter-choices action from ranked search results.
#[must_use]
pub const fn filter_choices(ranked_ids: Vec<u64>) -> Action {
    Action::FilterChoices { ranked_ids }
}

/// Creates an activate-choices action.
#[must_use]
pub const fn activate_choices() -> Action {
    Action::ActivateChoices
}

/// Creates an add-group action.
#[must_use]
pub const fn add_group(label: String, disabled: bool, has_choices: bool) -> Action {
    Action::AddGroup {
        label,
        disabled,
        has_choices,
    }
}
