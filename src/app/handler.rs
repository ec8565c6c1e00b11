//! Event handling and state transition logic.
//!
//! This module implements the single entry point through which hosts drive a
//! picker. It translates [`PickerEvent`]s into controller operations, store
//! dispatches, and [`Effect`] requests back to the host.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//! 1. The host translates native input into a [`PickerEvent`]
//! 2. [`handle_event`] pattern-matches the event and applies guards
//! 3. State mutations run through the picker's store dispatches
//! 4. Effects are collected and returned for the host to execute
//!
//! The boolean half of the return value reports whether any dispatch changed
//! state since the last drain, which is the host's cue to call
//! [`Picker::render`].
//!
//! # Debounce
//!
//! Search input is debounced through the host's timer: typing arms a
//! [`Effect::ScheduleSearch`] carrying a token, and the filter only runs when
//! [`PickerEvent::SearchTimerFired`] presents the token of the newest arming
//! while the input still reads exactly as it did at scheduling time. Firings
//! failing either check are dropped without touching state.

use crate::app::events::{Effect, PickerEvent};
use crate::app::modes::{ControlKind, SearchPhase};
use crate::app::notices::NoticeEvent;
use crate::app::picker::Picker;
use crate::domain::error::Result;
use crate::render::surface::Surface;
use crate::store::actions;

/// Quiet period between the last keystroke and the search running.
pub const SEARCH_DEBOUNCE_MS: u64 = 500;

/// Processes an event against a picker and returns `(needs_render, effects)`.
///
/// # Parameters
///
/// * `picker` - Controller for the enhanced control
/// * `event` - Event to process
///
/// # Returns
///
/// `needs_render` is true when a store dispatch changed state; the host
/// should call [`Picker::render`] before executing the effects.
///
/// # Errors
///
/// Infallible today; the signature leaves room for hosts whose effect
/// execution feeds failures back through controller operations.
///
/// # Tracing
///
/// Each call creates a debug-level span carrying the event type.
#[allow(clippy::cognitive_complexity, clippy::too_many_lines, clippy::unnecessary_wraps)]
pub fn handle_event<S: Surface>(
    picker: &mut Picker<S>,
    event: &PickerEvent,
) -> Result<(bool, Vec<Effect>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        PickerEvent::ValueInput { value } => {
            picker.input_value.clone_from(value);

            if picker.kind == ControlKind::TextInput || !picker.config.allow_search {
                return Ok((picker.take_render_flag(), vec![]));
            }
            if value.trim().is_empty() {
                picker.clear_search();
                return Ok((picker.take_render_flag(), vec![]));
            }

            let effect = picker.schedule_search();
            Ok((false, vec![effect]))
        }
        PickerEvent::SearchTimerFired { token } => {
            let SearchPhase::Scheduled {
                token: armed,
                query,
            } = picker.search.clone()
            else {
                tracing::debug!(token, "timer fired with no search scheduled");
                return Ok((false, vec![]));
            };

            if armed != *token {
                tracing::debug!(fired = token, armed, "stale search timer dropped");
                return Ok((false, vec![]));
            }
            if query != picker.input_value {
                tracing::debug!(
                    scheduled = %query,
                    current = %picker.input_value,
                    "input changed since scheduling, dropping firing"
                );
                picker.search = SearchPhase::Idle;
                return Ok((false, vec![]));
            }

            picker.run_search(&query);
            Ok((picker.take_render_flag(), vec![]))
        }
        PickerEvent::EnterPressed => {
            let mut effects = vec![];

            if picker.kind == ControlKind::TextInput {
                let typed = picker.input_value.clone();
                if picker.try_add_value(&typed, None, None) {
                    picker.input_value.clear();
                    effects.push(Effect::ClearInput);
                }
            } else if let Some(choice_id) = picker.highlighted_choice_id() {
                if picker.take_choice(choice_id) && !picker.input_value.is_empty() {
                    picker.input_value.clear();
                    effects.push(Effect::ClearInput);
                }
            } else {
                tracing::debug!("enter with nothing highlighted");
            }

            Ok((picker.take_render_flag(), effects))
        }
        PickerEvent::EscapePressed => {
            let mut effects = vec![];

            picker.open_dropdown(false);
            picker.clear_search();
            if !picker.input_value.is_empty() {
                picker.input_value.clear();
                effects.push(Effect::ClearInput);
            }

            Ok((picker.take_render_flag(), effects))
        }
        PickerEvent::ArrowDown | PickerEvent::ArrowUp => {
            if picker.kind == ControlKind::TextInput {
                return Ok((false, vec![]));
            }

            picker.open_dropdown(true);
            let len = picker.renderer.rendered_choice_count();
            if len == 0 {
                return Ok((false, vec![]));
            }

            let next = match (picker.highlight, event) {
                (None, _) => 0,
                (Some(current), PickerEvent::ArrowDown) => (current + 1).min(len - 1),
                (Some(current), _) => current.saturating_sub(1),
            };
            picker.move_highlight_to(next);

            Ok((false, vec![Effect::ScrollToHighlight { index: next }]))
        }
        PickerEvent::BackspacePressed => {
            if !picker.input_value.is_empty() || !picker.config.remove_items {
                return Ok((false, vec![]));
            }

            let state = picker.store.state();
            let selected: Vec<u64> = state.selected_items().iter().map(|item| item.id).collect();
            let mut effects = vec![];

            if selected.is_empty() {
                let last = state.last_active_item().map(|item| (item.id, item.value.clone()));
                if let Some((id, value)) = last {
                    picker.remove_item_by_id(id);
                    if picker.config.edit_items {
                        picker.input_value.clone_from(&value);
                        effects.push(Effect::SetInput { value });
                    }
                }
            } else {
                for id in selected {
                    picker.remove_item_by_id(id);
                }
            }

            Ok((picker.take_render_flag(), effects))
        }
        PickerEvent::SelectAllPressed => {
            if !picker.config.select_all {
                return Ok((false, vec![]));
            }

            let state = picker.store.state();
            let active: Vec<(u64, bool)> = state
                .active_items()
                .iter()
                .map(|item| (item.id, item.selected))
                .collect();
            if active.is_empty() {
                return Ok((false, vec![]));
            }

            let target = !active.iter().all(|(_, selected)| *selected);
            for (id, selected) in active {
                if selected != target {
                    picker.store.dispatch(actions::select_item(id, target));
                    picker.notices.emit(NoticeEvent::SelectionToggled {
                        id,
                        selected: target,
                    });
                }
            }

            Ok((picker.take_render_flag(), vec![]))
        }
        PickerEvent::ItemClicked { item_id } => {
            let state = picker.store.state();
            let Some(item) = state.get_item(*item_id) else {
                tracing::debug!(item_id, "click on unknown or removed item");
                return Ok((false, vec![]));
            };
            let toggled = !item.selected;

            picker.store.dispatch(actions::select_item(*item_id, toggled));
            picker.notices.emit(NoticeEvent::SelectionToggled {
                id: *item_id,
                selected: toggled,
            });

            Ok((picker.take_render_flag(), vec![]))
        }
        PickerEvent::ChoiceClicked { choice_id } => {
            let mut effects = vec![];

            if picker.take_choice(*choice_id) && !picker.input_value.is_empty() {
                picker.input_value.clear();
                effects.push(Effect::ClearInput);
            }

            Ok((picker.take_render_flag(), effects))
        }
        PickerEvent::Pasted { text } => {
            if !picker.config.allow_paste {
                tracing::debug!("paste ignored");
                return Ok((false, vec![]));
            }

            picker.input_value.push_str(text);
            let mut effects = vec![Effect::SetInput {
                value: picker.input_value.clone(),
            }];
            if picker.kind != ControlKind::TextInput
                && picker.config.allow_search
                && !picker.input_value.trim().is_empty()
            {
                effects.push(picker.schedule_search());
            }

            Ok((false, effects))
        }
        PickerEvent::Focused => {
            if picker.kind != ControlKind::TextInput {
                picker.open_dropdown(true);
            }
            Ok((false, vec![]))
        }
        PickerEvent::Blurred => {
            picker.open_dropdown(false);
            picker.clear_search();
            picker.clear_highlight();
            Ok((picker.take_render_flag(), vec![]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::notices::RejectReason;
    use crate::domain::SourceChoice;
    use crate::render::surface::RecordingSurface;
    use crate::Config;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn picker(kind: ControlKind, config: Config) -> Picker<RecordingSurface> {
        Picker::new(kind, config, RecordingSurface::default())
    }

    fn seeded(kind: ControlKind, config: Config, values: &[&str]) -> Picker<RecordingSurface> {
        let mut p = picker(kind, config);
        let choices: Vec<SourceChoice> = values.iter().map(|v| SourceChoice::new(v)).collect();
        p.seed(&[], &choices);
        p.render();
        p
    }

    fn type_text(p: &mut Picker<RecordingSurface>, text: &str) -> Vec<Effect> {
        let (_, effects) = handle_event(
            p,
            &PickerEvent::ValueInput {
                value: text.to_string(),
            },
        )
        .unwrap();
        effects
    }

    fn apply_search(p: &mut Picker<RecordingSurface>, query: &str) {
        let effects = type_text(p, query);
        let Some(Effect::ScheduleSearch { token, .. }) = effects.first().cloned() else {
            panic!("expected a scheduled search");
        };
        let (needs_render, _) = handle_event(p, &PickerEvent::SearchTimerFired { token }).unwrap();
        assert!(needs_render);
        p.render();
    }

    #[test]
    fn typing_schedules_a_debounced_search() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);

        let effects = type_text(&mut p, "oa");

        assert_eq!(
            effects,
            vec![Effect::ScheduleSearch {
                token: 1,
                delay_ms: SEARCH_DEBOUNCE_MS
            }]
        );
        assert_eq!(
            p.search,
            SearchPhase::Scheduled {
                token: 1,
                query: "oa".to_string()
            }
        );
    }

    #[test]
    fn matching_timer_applies_the_filter() {
        let mut p = seeded(
            ControlKind::SelectMultiple,
            Config::default(),
            &["oak", "elm", "yew"],
        );

        apply_search(&mut p, "oak");

        let state = p.state();
        assert_eq!(state.active_choices().len(), 1);
        assert_eq!(state.active_choices()[0].value, "oak");
        assert!(p.search.is_searching());
    }

    #[test]
    fn stale_token_is_dropped() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);

        type_text(&mut p, "o");
        let effects = type_text(&mut p, "oa");
        let Some(Effect::ScheduleSearch { token, .. }) = effects.first() else {
            panic!("expected a scheduled search");
        };

        let (needs_render, _) =
            handle_event(&mut p, &PickerEvent::SearchTimerFired { token: token - 1 }).unwrap();

        assert!(!needs_render);
        assert_eq!(
            p.search,
            SearchPhase::Scheduled {
                token: *token,
                query: "oa".to_string()
            }
        );
    }

    #[test]
    fn changed_input_invalidates_a_matching_token() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);

        let effects = type_text(&mut p, "oa");
        let Some(Effect::ScheduleSearch { token, .. }) = effects.first().cloned() else {
            panic!("expected a scheduled search");
        };
        p.input_value = "oak".to_string();

        let (needs_render, _) =
            handle_event(&mut p, &PickerEvent::SearchTimerFired { token }).unwrap();

        assert!(!needs_render);
        assert_eq!(p.search, SearchPhase::Idle);
        assert_eq!(p.state().active_choices().len(), 1);
    }

    #[test]
    fn emptied_input_clears_an_active_search() {
        let mut p = seeded(
            ControlKind::SelectMultiple,
            Config::default(),
            &["oak", "elm"],
        );
        apply_search(&mut p, "oak");
        assert_eq!(p.state().active_choices().len(), 1);

        let (needs_render, _) = handle_event(
            &mut p,
            &PickerEvent::ValueInput {
                value: String::new(),
            },
        )
        .unwrap();

        assert!(needs_render);
        assert_eq!(p.search, SearchPhase::Idle);
        assert_eq!(p.state().active_choices().len(), 2);
    }

    #[test]
    fn text_inputs_never_schedule_searches() {
        let mut p = picker(ControlKind::TextInput, Config::default());

        let effects = type_text(&mut p, "oak");

        assert!(effects.is_empty());
        assert_eq!(p.input_value, "oak");
        assert_eq!(p.search, SearchPhase::Idle);
    }

    #[test]
    fn search_gate_disables_scheduling() {
        let config = Config {
            allow_search: false,
            ..Config::default()
        };
        let mut p = seeded(ControlKind::SelectMultiple, config, &["oak"]);

        let effects = type_text(&mut p, "oa");

        assert!(effects.is_empty());
        assert_eq!(p.search, SearchPhase::Idle);
    }

    #[test]
    fn enter_adds_the_typed_value_on_text_inputs() {
        let mut p = picker(ControlKind::TextInput, Config::default());
        type_text(&mut p, "oak");

        let (needs_render, effects) = handle_event(&mut p, &PickerEvent::EnterPressed).unwrap();

        assert!(needs_render);
        assert_eq!(effects, vec![Effect::ClearInput]);
        assert_eq!(p.value(), "oak");
        assert!(p.input_value.is_empty());
    }

    #[test]
    fn rejected_enter_keeps_the_input_text() {
        let config = Config {
            add_items: false,
            ..Config::default()
        };
        let mut p = picker(ControlKind::TextInput, config);
        let rejections = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&rejections);
        p.observe(Box::new(move |notice| {
            if let NoticeEvent::AddRejected { reason, .. } = &notice.event {
                sink.borrow_mut().push(*reason);
            }
        }));
        type_text(&mut p, "oak");

        let (_, effects) = handle_event(&mut p, &PickerEvent::EnterPressed).unwrap();

        assert!(effects.is_empty());
        assert_eq!(p.input_value, "oak");
        assert_eq!(*rejections.borrow(), vec![RejectReason::AddDisabled]);
    }

    #[test]
    fn enter_takes_the_highlighted_choice() {
        let mut p = seeded(
            ControlKind::SelectMultiple,
            Config::default(),
            &["oak", "elm"],
        );
        assert_eq!(p.highlight, Some(0));

        let (needs_render, _) = handle_event(&mut p, &PickerEvent::EnterPressed).unwrap();

        assert!(needs_render);
        assert_eq!(p.value(), "oak");
        assert!(p.state().choices[0].selected);
    }

    #[test]
    fn enter_with_nothing_to_take_is_inert() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &[]);

        let (needs_render, effects) = handle_event(&mut p, &PickerEvent::EnterPressed).unwrap();

        assert!(!needs_render);
        assert!(effects.is_empty());
        assert!(p.state().active_items().is_empty());
    }

    #[test]
    fn arrows_move_and_clamp_the_highlight() {
        let mut p = seeded(
            ControlKind::SelectMultiple,
            Config::default(),
            &["oak", "elm"],
        );
        assert_eq!(p.highlight, Some(0));

        let (_, effects) = handle_event(&mut p, &PickerEvent::ArrowDown).unwrap();
        assert_eq!(effects, vec![Effect::ScrollToHighlight { index: 1 }]);
        assert!(p.dropdown_open);

        handle_event(&mut p, &PickerEvent::ArrowDown).unwrap();
        assert_eq!(p.highlight, Some(1));

        handle_event(&mut p, &PickerEvent::ArrowUp).unwrap();
        handle_event(&mut p, &PickerEvent::ArrowUp).unwrap();
        assert_eq!(p.highlight, Some(0));
    }

    #[test]
    fn arrows_with_no_rendered_choices_do_nothing() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &[]);

        let (needs_render, effects) = handle_event(&mut p, &PickerEvent::ArrowDown).unwrap();

        assert!(!needs_render);
        assert!(effects.is_empty());
        assert_eq!(p.highlight, None);
    }

    #[test]
    fn backspace_removes_the_newest_item() {
        let mut p = picker(ControlKind::SelectMultiple, Config::default());
        p.try_add_value("oak", None, None);
        p.try_add_value("elm", None, None);

        let (needs_render, _) = handle_event(&mut p, &PickerEvent::BackspacePressed).unwrap();

        assert!(needs_render);
        assert_eq!(p.value(), "oak");
    }

    #[test]
    fn backspace_prefers_marked_items() {
        let mut p = picker(ControlKind::SelectMultiple, Config::default());
        p.try_add_value("oak", None, None);
        p.try_add_value("elm", None, None);
        handle_event(&mut p, &PickerEvent::ItemClicked { item_id: 1 }).unwrap();

        handle_event(&mut p, &PickerEvent::BackspacePressed).unwrap();

        assert_eq!(p.value(), "elm");
    }

    #[test]
    fn backspace_with_text_in_the_input_is_inert() {
        let mut p = picker(ControlKind::SelectMultiple, Config::default());
        p.try_add_value("oak", None, None);
        type_text(&mut p, "el");

        let (needs_render, _) = handle_event(&mut p, &PickerEvent::BackspacePressed).unwrap();

        assert!(!needs_render);
        assert_eq!(p.value(), "oak");
    }

    #[test]
    fn backspace_respects_the_removal_gate() {
        let config = Config {
            remove_items: false,
            ..Config::default()
        };
        let mut p = picker(ControlKind::SelectMultiple, config);
        p.try_add_value("oak", None, None);

        let (needs_render, _) = handle_event(&mut p, &PickerEvent::BackspacePressed).unwrap();

        assert!(!needs_render);
        assert_eq!(p.value(), "oak");
    }

    #[test]
    fn backspace_editing_returns_the_value_to_the_input() {
        let config = Config {
            edit_items: true,
            ..Config::default()
        };
        let mut p = picker(ControlKind::TextInput, config);
        p.try_add_value("oak", None, None);

        let (needs_render, effects) = handle_event(&mut p, &PickerEvent::BackspacePressed).unwrap();

        assert!(needs_render);
        assert_eq!(
            effects,
            vec![Effect::SetInput {
                value: "oak".to_string()
            }]
        );
        assert_eq!(p.input_value, "oak");
        assert!(p.state().active_items().is_empty());
    }

    #[test]
    fn escape_closes_clears_and_keeps_the_highlight() {
        let mut p = seeded(
            ControlKind::SelectMultiple,
            Config::default(),
            &["oak", "elm"],
        );
        handle_event(&mut p, &PickerEvent::ArrowDown).unwrap();
        apply_search(&mut p, "oak");

        let (needs_render, effects) = handle_event(&mut p, &PickerEvent::EscapePressed).unwrap();

        assert!(needs_render);
        assert_eq!(effects, vec![Effect::ClearInput]);
        assert!(!p.dropdown_open);
        assert_eq!(p.search, SearchPhase::Idle);
        assert_eq!(p.state().active_choices().len(), 2);
        assert!(p.highlight.is_some());
    }

    #[test]
    fn select_all_toggles_the_whole_item_list() {
        let mut p = picker(ControlKind::SelectMultiple, Config::default());
        p.try_add_value("oak", None, None);
        p.try_add_value("elm", None, None);

        handle_event(&mut p, &PickerEvent::SelectAllPressed).unwrap();
        assert_eq!(p.state().selected_items().len(), 2);

        handle_event(&mut p, &PickerEvent::SelectAllPressed).unwrap();
        assert!(p.state().selected_items().is_empty());
    }

    #[test]
    fn select_all_gate_disables_the_chord() {
        let config = Config {
            select_all: false,
            ..Config::default()
        };
        let mut p = picker(ControlKind::SelectMultiple, config);
        p.try_add_value("oak", None, None);

        let (needs_render, _) = handle_event(&mut p, &PickerEvent::SelectAllPressed).unwrap();

        assert!(!needs_render);
        assert!(p.state().selected_items().is_empty());
    }

    #[test]
    fn clicking_a_choice_takes_it() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);

        let (needs_render, _) =
            handle_event(&mut p, &PickerEvent::ChoiceClicked { choice_id: 1 }).unwrap();

        assert!(needs_render);
        assert_eq!(p.value(), "oak");
    }

    #[test]
    fn clicking_a_disabled_choice_is_refused() {
        let mut p = picker(ControlKind::SelectMultiple, Config::default());
        p.seed(
            &[],
            &[SourceChoice {
                disabled: true,
                ..SourceChoice::new("oak")
            }],
        );
        p.render();

        let (needs_render, _) =
            handle_event(&mut p, &PickerEvent::ChoiceClicked { choice_id: 1 }).unwrap();

        assert!(!needs_render);
        assert!(p.state().active_items().is_empty());
    }

    #[test]
    fn paste_appends_and_schedules_a_search() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);
        type_text(&mut p, "o");

        let (_, effects) = handle_event(
            &mut p,
            &PickerEvent::Pasted {
                text: "ak".to_string(),
            },
        )
        .unwrap();

        assert_eq!(p.input_value, "oak");
        assert_eq!(
            effects[0],
            Effect::SetInput {
                value: "oak".to_string()
            }
        );
        assert!(matches!(effects[1], Effect::ScheduleSearch { .. }));
    }

    #[test]
    fn paste_gate_discards_the_text() {
        let config = Config {
            allow_paste: false,
            ..Config::default()
        };
        let mut p = picker(ControlKind::SelectMultiple, config);

        let (_, effects) = handle_event(
            &mut p,
            &PickerEvent::Pasted {
                text: "oak".to_string(),
            },
        )
        .unwrap();

        assert!(effects.is_empty());
        assert!(p.input_value.is_empty());
    }

    #[test]
    fn focus_and_blur_drive_the_dropdown() {
        let mut p = seeded(ControlKind::SelectMultiple, Config::default(), &["oak"]);

        handle_event(&mut p, &PickerEvent::Focused).unwrap();
        assert!(p.dropdown_open);

        handle_event(&mut p, &PickerEvent::ArrowDown).unwrap();
        apply_search(&mut p, "oak");
        let (needs_render, _) = handle_event(&mut p, &PickerEvent::Blurred).unwrap();

        assert!(needs_render);
        assert!(!p.dropdown_open);
        assert_eq!(p.search, SearchPhase::Idle);
        assert_eq!(p.highlight, None);
    }

    #[test]
    fn focus_leaves_text_inputs_closed() {
        let mut p = picker(ControlKind::TextInput, Config::default());

        handle_event(&mut p, &PickerEvent::Focused).unwrap();

        assert!(!p.dropdown_open);
    }
}
