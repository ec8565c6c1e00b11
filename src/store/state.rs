//! Combined state snapshot and derived selectors.
//!
//! This module defines [`State`], the immutable `{items, choices, groups}` tree
//! the store publishes after every dispatch, along with the pure selector
//! methods the controller and renderer read through. Collections are shared via
//! `Arc`, so snapshots are cheap to clone and two snapshots can be compared by
//! pointer identity to decide whether a collection changed between dispatches.
//!
//! # Architecture
//!
//! Reducers return the same `Arc` for no-ops and a new `Arc` for any semantic
//! change. The renderer relies on that contract: `Arc::ptr_eq` on a collection
//! is the complete "did this region's source data change" signal, with no deep
//! comparison and no false positives.

use crate::domain::{Choice, ChoiceGroup, Item};
use std::sync::Arc;

/// Immutable snapshot of the three normalized collections.
///
/// Snapshots are produced by the store and never mutated in place. Cloning a
/// snapshot clones three `Arc`s; the underlying vectors are shared until the
/// next dispatch replaces them.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// Chosen values, in creation order. Soft-deleted entries stay in place.
    pub items: Arc<Vec<Item>>,

    /// Selectable entries, in creation order.
    pub choices: Arc<Vec<Choice>>,

    /// Choice categories, in creation order.
    pub groups: Arc<Vec<ChoiceGroup>>,
}

impl State {
    /// Returns the items that have not been soft-deleted, in insertion order.
    #[must_use]
    pub fn active_items(&self) -> Vec<&Item> {
        self.items.iter().filter(|item| item.active).collect()
    }

    /// Returns the active items carrying the batch-removal mark.
    #[must_use]
    pub fn selected_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.active && item.selected)
            .collect()
    }

    /// Returns the values of all active items, in insertion order.
    ///
    /// This is the sequence serialized back into the native control.
    #[must_use]
    pub fn item_values(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.active)
            .map(|item| item.value.clone())
            .collect()
    }

    /// Joins the active item values with the given delimiter.
    ///
    /// The result is the only externally persisted artifact: it is written to
    /// the host control's value whenever the item collection changes.
    #[must_use]
    pub fn serialized_value(&self, delimiter: &str) -> String {
        self.item_values().join(delimiter)
    }

    /// Returns the active item with the given id, if any.
    #[must_use]
    pub fn get_item(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id && item.active)
    }

    /// Returns the last item that is still active, if any.
    ///
    /// This is the backspace-removal target.
    #[must_use]
    pub fn last_active_item(&self) -> Option<&Item> {
        self.items.iter().rev().find(|item| item.active)
    }

    /// Returns the currently visible choices.
    ///
    /// When a search result is applied the entries carry ranks and the list is
    /// ordered best-match first; outside a search, insertion order rules.
    #[must_use]
    pub fn active_choices(&self) -> Vec<&Choice> {
        let mut active: Vec<&Choice> = self.choices.iter().filter(|c| c.active).collect();
        if active.iter().any(|c| c.rank.is_some()) {
            active.sort_by_key(|c| c.rank.unwrap_or(u32::MAX));
        }
        active
    }

    /// Returns the search haystack: every non-disabled choice.
    ///
    /// Deliberately ignores the `active` flag so that a second search runs over
    /// the full pool rather than narrowing within the first search's results.
    #[must_use]
    pub fn searchable_choices(&self) -> Vec<&Choice> {
        self.choices.iter().filter(|c| !c.disabled).collect()
    }

    /// Returns the choices that can currently be picked.
    #[must_use]
    pub fn selectable_choices(&self) -> Vec<&Choice> {
        self.choices
            .iter()
            .filter(|c| c.active && !c.disabled && !c.selected)
            .collect()
    }

    /// Returns the choice with the given id, if any.
    #[must_use]
    pub fn get_choice(&self, id: u64) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == id)
    }

    /// Returns the groups that arrived with entries and are not disabled.
    #[must_use]
    pub fn active_groups(&self) -> Vec<&ChoiceGroup> {
        self.groups
            .iter()
            .filter(|g| g.active && !g.disabled)
            .collect()
    }

    /// Returns the active choices belonging to the given group.
    #[must_use]
    pub fn choices_in_group(&self, group_id: u64) -> Vec<&Choice> {
        self.choices
            .iter()
            .filter(|c| c.active && c.group_id == Some(group_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, value: &str, active: bool, selected: bool) -> Item {
        let mut item = Item::new(id, value.to_string(), value.to_string(), None);
        item.active = active;
        item.selected = selected;
        item
    }

    fn choice(id: u64, value: &str) -> Choice {
        Choice::new(id, value.to_string(), value.to_string(), None, false)
    }

    #[test]
    fn item_values_skip_inactive_entries() {
        let state = State {
            items: Arc::new(vec![
                item(1, "red", true, false),
                item(2, "green", false, false),
                item(3, "blue", true, false),
            ]),
            ..State::default()
        };

        assert_eq!(state.item_values(), vec!["red", "blue"]);
        assert_eq!(state.serialized_value(","), "red,blue");
    }

    #[test]
    fn serialized_value_honors_custom_delimiter() {
        let state = State {
            items: Arc::new(vec![item(1, "a", true, false), item(2, "b", true, false)]),
            ..State::default()
        };

        assert_eq!(state.serialized_value("|"), "a|b");
        assert_eq!(state.serialized_value(""), "ab");
    }

    #[test]
    fn selected_items_require_active() {
        let state = State {
            items: Arc::new(vec![
                item(1, "a", true, true),
                item(2, "b", false, true),
                item(3, "c", true, false),
            ]),
            ..State::default()
        };

        let selected: Vec<u64> = state.selected_items().iter().map(|i| i.id).collect();
        assert_eq!(selected, vec![1]);
    }

    #[test]
    fn active_choices_follow_rank_order_when_ranked() {
        let mut a = choice(1, "apple");
        let mut b = choice(2, "banana");
        let c = choice(3, "cherry");
        a.rank = Some(1);
        b.rank = Some(0);

        let state = State {
            choices: Arc::new(vec![a, b, {
                let mut c = c;
                c.active = false;
                c
            }]),
            ..State::default()
        };

        let ids: Vec<u64> = state.active_choices().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn active_choices_keep_insertion_order_without_ranks() {
        let state = State {
            choices: Arc::new(vec![choice(1, "a"), choice(2, "b"), choice(3, "c")]),
            ..State::default()
        };

        let ids: Vec<u64> = state.active_choices().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn searchable_choices_ignore_the_active_flag() {
        let mut hidden = choice(1, "a");
        hidden.active = false;
        let mut disabled = choice(2, "b");
        disabled.disabled = true;

        let state = State {
            choices: Arc::new(vec![hidden, disabled, choice(3, "c")]),
            ..State::default()
        };

        let ids: Vec<u64> = state.searchable_choices().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn selectable_choices_exclude_disabled_and_selected() {
        let mut taken = choice(1, "a");
        taken.selected = true;
        let mut disabled = choice(2, "b");
        disabled.disabled = true;

        let state = State {
            choices: Arc::new(vec![taken, disabled, choice(3, "c")]),
            ..State::default()
        };

        let ids: Vec<u64> = state.selectable_choices().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn choices_in_group_filter_by_group_and_activity() {
        let mut grouped = choice(1, "a");
        grouped.group_id = Some(9);
        let mut inactive = choice(2, "b");
        inactive.group_id = Some(9);
        inactive.active = false;

        let state = State {
            choices: Arc::new(vec![grouped, inactive, choice(3, "c")]),
            groups: Arc::new(vec![ChoiceGroup::new(9, "Fruit".to_string(), true, false)]),
            ..State::default()
        };

        let ids: Vec<u64> = state.choices_in_group(9).iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn active_groups_exclude_empty_and_disabled() {
        let state = State {
            groups: Arc::new(vec![
                ChoiceGroup::new(1, "Full".to_string(), true, false),
                ChoiceGroup::new(2, "Empty".to_string(), false, false),
                ChoiceGroup::new(3, "Off".to_string(), true, true),
            ]),
            ..State::default()
        };

        let ids: Vec<u64> = state.active_groups().iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![1]);
    }
}
