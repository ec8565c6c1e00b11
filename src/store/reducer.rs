//! Pure reduction functions for the three collections.
//!
//! This module implements the complete state transition logic. The top-level
//! [`reduce`] composes three per-collection reducers and produces a full new
//! snapshot atomically, so cross-collection transitions (an added item marking
//! its choice selected, a removed item releasing it) are never observable
//! half-applied.
//!
//! # Identity contract
//!
//! Every reducer is total: an action that carries no meaning for a collection
//! returns a clone of the SAME `Arc`, observable via `Arc::ptr_eq`. Any
//! semantic change allocates a new vector behind a new `Arc`. The renderer's
//! dirty checks depend on this contract holding exactly.

use crate::domain::{Choice, ChoiceGroup, Item};
use crate::store::actions::Action;
use crate::store::state::State;
use crate::store::IdSource;
use std::sync::Arc;

/// Applies an action to a snapshot, producing the next snapshot.
///
/// Id assignment happens here: creations draw from the store-owned counters,
/// which increment unconditionally and never reuse a value within a session.
///
/// # Parameters
///
/// * `state` - Snapshot to transition from
/// * `action` - Transition to apply
/// * `ids` - Store-owned id counters
#[must_use]
pub fn reduce(state: &State, action: &Action, ids: &mut IdSource) -> State {
    tracing::trace!(action = ?action, "reducing");

    State {
        items: reduce_items(&state.items, action, ids),
        choices: reduce_choices(&state.choices, action, ids),
        groups: reduce_groups(&state.groups, action, ids),
    }
}

/// Reduces the item collection.
///
/// Handles `AddItem` (append active and unselected), `RemoveItem` (soft-delete:
/// clear `active` and `selected`, keep the entry), and `SelectItem` (mark an
/// ACTIVE item). A miss, an inactive target, or an already-matching mark is
/// identity.
#[must_use]
pub fn reduce_items(items: &Arc<Vec<Item>>, action: &Action, ids: &mut IdSource) -> Arc<Vec<Item>> {
    match action {
        Action::AddItem {
            value,
            label,
            choice_id,
        } => {
            let mut next = items.as_ref().clone();
            next.push(Item::new(
                ids.next_item_id(),
                value.clone(),
                label.clone(),
                *choice_id,
            ));
            Arc::new(next)
        }
        Action::RemoveItem { id, .. } => {
            match items.iter().position(|item| item.id == *id && item.active) {
                Some(pos) => {
                    let mut next = items.as_ref().clone();
                    next[pos].active = false;
                    next[pos].selected = false;
                    Arc::new(next)
                }
                None => Arc::clone(items),
            }
        }
        Action::SelectItem { id, selected } => {
            let pos = items
                .iter()
                .position(|item| item.id == *id && item.active && item.selected != *selected);
            match pos {
                Some(pos) => {
                    let mut next = items.as_ref().clone();
                    next[pos].selected = *selected;
                    Arc::new(next)
                }
                None => Arc::clone(items),
            }
        }
        _ => Arc::clone(items),
    }
}

/// Reduces the choice collection.
///
/// Beyond its own `AddChoice`, `FilterChoices`, and `ActivateChoices`, this
/// reducer owns the cross-collection halves of the item transitions: `AddItem`
/// from a choice marks that choice selected, `RemoveItem` releases it so it
/// reappears in the selectable pool.
#[must_use]
pub fn reduce_choices(
    choices: &Arc<Vec<Choice>>,
    action: &Action,
    ids: &mut IdSource,
) -> Arc<Vec<Choice>> {
    match action {
        Action::AddChoice {
            value,
            label,
            group_id,
            disabled,
        } => {
            let mut next = choices.as_ref().clone();
            next.push(Choice::new(
                ids.next_choice_id(),
                value.clone(),
                label.clone(),
                *group_id,
                *disabled,
            ));
            Arc::new(next)
        }
        Action::AddItem {
            choice_id: Some(choice_id),
            ..
        } => set_choice_selected(choices, *choice_id, true),
        Action::RemoveItem {
            choice_id: Some(choice_id),
            ..
        } => set_choice_selected(choices, *choice_id, false),
        Action::FilterChoices { ranked_ids } => {
            let mut next = choices.as_ref().clone();
            let mut changed = false;
            for choice in &mut next {
                let (active, rank) = match ranked_ids.iter().position(|id| *id == choice.id) {
                    Some(pos) => (true, Some(u32::try_from(pos).unwrap_or(u32::MAX))),
                    None => (false, None),
                };
                if choice.active != active || choice.rank != rank {
                    choice.active = active;
                    choice.rank = rank;
                    changed = true;
                }
            }
            if changed {
                Arc::new(next)
            } else {
                Arc::clone(choices)
            }
        }
        Action::ActivateChoices => {
            let changed = choices
                .iter()
                .any(|c| (!c.disabled && !c.active) || c.rank.is_some());
            if !changed {
                return Arc::clone(choices);
            }
            let mut next = choices.as_ref().clone();
            for choice in &mut next {
                if !choice.disabled {
                    choice.active = true;
                }
                choice.rank = None;
            }
            Arc::new(next)
        }
        _ => Arc::clone(choices),
    }
}

/// Reduces the group collection. Only `AddGroup` means anything here.
#[must_use]
pub fn reduce_groups(
    groups: &Arc<Vec<ChoiceGroup>>,
    action: &Action,
    ids: &mut IdSource,
) -> Arc<Vec<ChoiceGroup>> {
    match action {
        Action::AddGroup {
            label,
            disabled,
            has_choices,
        } => {
            let mut next = groups.as_ref().clone();
            next.push(ChoiceGroup::new(
                ids.next_group_id(),
                label.clone(),
                *has_choices,
                *disabled,
            ));
            Arc::new(next)
        }
        _ => Arc::clone(groups),
    }
}

fn set_choice_selected(
    choices: &Arc<Vec<Choice>>,
    choice_id: u64,
    selected: bool,
) -> Arc<Vec<Choice>> {
    let pos = choices
        .iter()
        .position(|c| c.id == choice_id && c.selected != selected);
    match pos {
        Some(pos) => {
            let mut next = choices.as_ref().clone();
            next[pos].selected = selected;
            Arc::new(next)
        }
        None => Arc::clone(choices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::actions;

    fn apply(state: &State, action: Action, ids: &mut IdSource) -> State {
        reduce(state, &action, ids)
    }

    fn state_with_choices(values: &[&str], ids: &mut IdSource) -> State {
        let mut state = State::default();
        for value in values {
            state = apply(
                &state,
                actions::add_choice((*value).to_string(), None, None, false),
                ids,
            );
        }
        state
    }

    #[test]
    fn sequential_adds_assign_monotonic_ids() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        for value in ["red", "green", "blue"] {
            state = apply(&state, actions::add_item(value.to_string(), None, None), &mut ids);
        }

        let assigned: Vec<u64> = state.items.iter().map(|i| i.id).collect();
        assert_eq!(assigned, vec![1, 2, 3]);
    }

    #[test]
    fn removal_never_frees_ids() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(&state, actions::add_item("a".to_string(), None, None), &mut ids);
        state = apply(&state, actions::remove_item(1, None), &mut ids);
        state = apply(&state, actions::add_item("b".to_string(), None, None), &mut ids);

        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[1].id, 2);
    }

    #[test]
    fn remove_soft_deletes_and_clears_selection() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(&state, actions::add_item("a".to_string(), None, None), &mut ids);
        state = apply(&state, actions::select_item(1, true), &mut ids);
        state = apply(&state, actions::remove_item(1, None), &mut ids);

        assert_eq!(state.items.len(), 1);
        assert!(!state.items[0].active);
        assert!(!state.items[0].selected);
        assert!(state.active_items().is_empty());
    }

    #[test]
    fn actions_on_a_soft_deleted_item_are_identity() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(&state, actions::add_item("a".to_string(), None, None), &mut ids);
        state = apply(&state, actions::remove_item(1, None), &mut ids);

        let after_select = apply(&state, actions::select_item(1, true), &mut ids);
        assert!(Arc::ptr_eq(&state.items, &after_select.items));

        let after_remove = apply(&state, actions::remove_item(1, None), &mut ids);
        assert!(Arc::ptr_eq(&state.items, &after_remove.items));
    }

    #[test]
    fn select_with_matching_mark_is_identity() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(&state, actions::add_item("a".to_string(), None, None), &mut ids);
        let unchanged = apply(&state, actions::select_item(1, false), &mut ids);

        assert!(Arc::ptr_eq(&state.items, &unchanged.items));
    }

    #[test]
    fn irrelevant_actions_preserve_collection_identity() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(&state, actions::add_item("a".to_string(), None, None), &mut ids);
        let next = apply(
            &state,
            actions::add_group("Fruit".to_string(), false, true),
            &mut ids,
        );

        assert!(Arc::ptr_eq(&state.items, &next.items));
        assert!(Arc::ptr_eq(&state.choices, &next.choices));
        assert!(!Arc::ptr_eq(&state.groups, &next.groups));
    }

    #[test]
    fn adding_an_item_from_a_choice_marks_it_selected() {
        let mut ids = IdSource::default();
        let mut state = state_with_choices(&["a"], &mut ids);

        state = apply(
            &state,
            actions::add_item("a".to_string(), None, Some(1)),
            &mut ids,
        );

        assert!(state.choices[0].selected);
        assert!(state.selectable_choices().is_empty());
    }

    #[test]
    fn removing_an_item_releases_its_choice() {
        let mut ids = IdSource::default();
        let mut state = state_with_choices(&["a"], &mut ids);

        state = apply(
            &state,
            actions::add_item("a".to_string(), None, Some(1)),
            &mut ids,
        );
        state = apply(&state, actions::remove_item(1, Some(1)), &mut ids);

        assert!(!state.choices[0].selected);
        assert_eq!(state.selectable_choices().len(), 1);
        assert!(state.active_items().is_empty());
    }

    #[test]
    fn free_typed_items_leave_choices_untouched() {
        let mut ids = IdSource::default();
        let state = state_with_choices(&["a"], &mut ids);

        let next = apply(&state, actions::add_item("b".to_string(), None, None), &mut ids);

        assert!(Arc::ptr_eq(&state.choices, &next.choices));
    }

    #[test]
    fn filter_ranks_matches_and_deactivates_the_rest() {
        let mut ids = IdSource::default();
        let mut state = state_with_choices(&["apple", "banana", "cherry"], &mut ids);

        state = apply(&state, actions::filter_choices(vec![3, 1]), &mut ids);

        let active: Vec<u64> = state.active_choices().iter().map(|c| c.id).collect();
        assert_eq!(active, vec![3, 1]);
        assert_eq!(state.choices[0].rank, Some(1));
        assert!(!state.choices[1].active);
        assert_eq!(state.choices[1].rank, None);
        assert_eq!(state.choices[2].rank, Some(0));
    }

    #[test]
    fn repeating_an_identical_filter_is_identity() {
        let mut ids = IdSource::default();
        let mut state = state_with_choices(&["apple", "banana"], &mut ids);

        state = apply(&state, actions::filter_choices(vec![1]), &mut ids);
        let repeated = apply(&state, actions::filter_choices(vec![1]), &mut ids);

        assert!(Arc::ptr_eq(&state.choices, &repeated.choices));
    }

    #[test]
    fn activate_restores_non_disabled_choices_in_insertion_order() {
        let mut ids = IdSource::default();
        let mut state = State::default();
        state = apply(
            &state,
            actions::add_choice("a".to_string(), None, None, false),
            &mut ids,
        );
        state = apply(
            &state,
            actions::add_choice("b".to_string(), None, None, true),
            &mut ids,
        );
        state = apply(
            &state,
            actions::add_choice("c".to_string(), None, None, false),
            &mut ids,
        );

        state = apply(&state, actions::filter_choices(vec![3]), &mut ids);
        state = apply(&state, actions::activate_choices(), &mut ids);

        let active: Vec<u64> = state.active_choices().iter().map(|c| c.id).collect();
        assert_eq!(active, vec![1, 3]);
        assert!(state.choices.iter().all(|c| c.rank.is_none()));
    }

    #[test]
    fn activate_never_resurrects_disabled_choices() {
        let mut ids = IdSource::default();
        let mut state = State::default();
        state = apply(
            &state,
            actions::add_choice("a".to_string(), None, None, true),
            &mut ids,
        );

        state = apply(&state, actions::filter_choices(vec![]), &mut ids);
        state = apply(&state, actions::activate_choices(), &mut ids);

        assert!(!state.choices[0].active);
    }

    #[test]
    fn activate_on_a_clean_pool_is_identity() {
        let mut ids = IdSource::default();
        let state = state_with_choices(&["a", "b"], &mut ids);

        let next = apply(&state, actions::activate_choices(), &mut ids);

        assert!(Arc::ptr_eq(&state.choices, &next.choices));
    }

    #[test]
    fn groups_record_whether_they_arrived_with_entries() {
        let mut ids = IdSource::default();
        let mut state = State::default();

        state = apply(
            &state,
            actions::add_group("Fruit".to_string(), false, true),
            &mut ids,
        );
        state = apply(
            &state,
            actions::add_group("Empty".to_string(), false, false),
            &mut ids,
        );

        assert_eq!(state.groups.len(), 2);
        assert!(state.groups[0].active);
        assert!(!state.groups[1].active);
        assert_eq!(state.active_groups().len(), 1);
    }
}
