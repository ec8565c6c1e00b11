//! Diff-driven rendering over the two output regions.
//!
//! [`Renderer::render`] compares the incoming snapshot against the one it
//! painted last time. Collections are behind `Arc`s and reducers return the
//! same `Arc` on no-ops, so pointer equality is a complete change detector:
//! the choice region repaints only when choices or groups changed, the item
//! region only when items changed, and a fully clean snapshot touches the
//! surface not at all.
//!
//! # Choice region shapes
//!
//! Outside of search, active groups render as headings with their member
//! choices; groups left with no visible members are dropped, and when every
//! group ends up empty the region falls back to a flat list. During a search
//! the region is always flat, ordered by rank. An empty row set renders a
//! placeholder whose message distinguishes "nothing matched" from "nothing
//! left to pick".

use crate::app::modes::ControlKind;
use crate::domain::Choice;
use crate::render::classnames::ClassNames;
use crate::render::surface::Surface;
use crate::render::viewmodel::{ChoiceListView, ChoiceView, GroupView, ItemListView, ItemView};
use crate::search::Searcher;
use crate::store::State;
use std::sync::Arc;

/// Per-render inputs that live outside the store.
pub struct RenderPass<'a> {
    pub searching: bool,
    pub query: &'a str,
    pub highlight: Option<usize>,
    pub kind: ControlKind,
    pub delimiter: &'a str,
    pub no_results_text: &'a str,
    pub no_choices_text: &'a str,
    pub searcher: &'a dyn Searcher,
}

/// Paints snapshots onto a [`Surface`], skipping clean regions.
#[derive(Debug)]
pub struct Renderer {
    previous: Option<State>,
    classes: ClassNames,
    rendered_choice_ids: Vec<u64>,
}

impl Renderer {
    #[must_use]
    pub fn new(classes: ClassNames) -> Self {
        Self {
            previous: None,
            classes,
            rendered_choice_ids: Vec::new(),
        }
    }

    /// Renders `state`, returning the resolved highlight.
    ///
    /// When the choice region repaints, the requested highlight is clamped
    /// to the rows actually produced: an out-of-range index snaps to the
    /// last row, no request at all highlights the first row, and an empty
    /// region clears the highlight. A clean choice region returns the
    /// request unchanged.
    pub fn render<S: Surface>(
        &mut self,
        state: &State,
        pass: &RenderPass<'_>,
        surface: &mut S,
    ) -> Option<usize> {
        let choices_dirty = self.previous.as_ref().map_or(true, |prev| {
            !Arc::ptr_eq(&prev.choices, &state.choices) || !Arc::ptr_eq(&prev.groups, &state.groups)
        });
        let items_dirty = self
            .previous
            .as_ref()
            .map_or(true, |prev| !Arc::ptr_eq(&prev.items, &state.items));

        let mut highlight = pass.highlight;

        if choices_dirty {
            let view = self.build_choice_view(state, pass);
            surface.render_choice_region(&view);

            let len = self.rendered_choice_ids.len();
            highlight = if len == 0 {
                None
            } else {
                Some(pass.highlight.map_or(0, |h| h.min(len - 1)))
            };
            surface.set_highlight(highlight);
            tracing::debug!(rows = len, searching = pass.searching, "choice region rendered");
        }

        if items_dirty {
            surface.set_control_value(&state.serialized_value(pass.delimiter));
            surface.render_item_region(&self.build_item_view(state));
            tracing::debug!(items = state.active_items().len(), "item region rendered");
        }

        if choices_dirty || items_dirty {
            self.previous = Some(state.clone());
        }
        highlight
    }

    /// Choice ids behind the currently rendered rows, in row order.
    pub(crate) fn rendered_choice_ids(&self) -> &[u64] {
        &self.rendered_choice_ids
    }

    pub(crate) fn rendered_choice_count(&self) -> usize {
        self.rendered_choice_ids.len()
    }

    pub(crate) fn classes(&self) -> &ClassNames {
        &self.classes
    }

    fn build_choice_view(&mut self, state: &State, pass: &RenderPass<'_>) -> ChoiceListView {
        self.rendered_choice_ids.clear();

        if !pass.searching {
            let groups = state.active_groups();
            if !groups.is_empty() {
                let group_views: Vec<GroupView> = groups
                    .iter()
                    .filter_map(|group| {
                        let rows: Vec<ChoiceView> = state
                            .choices_in_group(group.id)
                            .iter()
                            .filter(|c| keep_choice(c, pass.kind))
                            .map(|c| self.choice_view(c, pass))
                            .collect();
                        if rows.is_empty() {
                            return None;
                        }
                        Some(GroupView {
                            id: group.id,
                            label: group.label.clone(),
                            class: self.classes.group.clone(),
                            choices: rows,
                        })
                    })
                    .collect();

                if !group_views.is_empty() {
                    for view in &group_views {
                        self.rendered_choice_ids
                            .extend(view.choices.iter().map(|c| c.id));
                    }
                    return ChoiceListView::Grouped {
                        groups: group_views,
                    };
                }
            }
        }

        let rows: Vec<ChoiceView> = state
            .active_choices()
            .iter()
            .filter(|c| keep_choice(c, pass.kind))
            .map(|c| self.choice_view(c, pass))
            .collect();

        if rows.is_empty() {
            let message = if pass.searching {
                pass.no_results_text
            } else {
                pass.no_choices_text
            };
            return ChoiceListView::Placeholder {
                message: message.to_string(),
                class: self.classes.notice.clone(),
            };
        }

        self.rendered_choice_ids.extend(rows.iter().map(|c| c.id));
        ChoiceListView::Flat { choices: rows }
    }

    fn choice_view(&self, choice: &Choice, pass: &RenderPass<'_>) -> ChoiceView {
        let class = if choice.disabled {
            format!("{} {}", self.classes.choice, self.classes.choice_disabled)
        } else {
            self.classes.choice.clone()
        };
        let highlight_ranges = if pass.searching && !pass.query.is_empty() {
            pass.searcher.highlight_spans(pass.query, &choice.label)
        } else {
            Vec::new()
        };

        ChoiceView {
            id: choice.id,
            value: choice.value.clone(),
            label: choice.label.clone(),
            disabled: choice.disabled,
            class,
            highlight_ranges,
        }
    }

    fn build_item_view(&self, state: &State) -> ItemListView {
        let items = state
            .active_items()
            .iter()
            .map(|item| {
                let class = if item.selected {
                    format!("{} {}", self.classes.item, self.classes.item_selected)
                } else {
                    self.classes.item.clone()
                };
                ItemView {
                    id: item.id,
                    value: item.value.clone(),
                    label: item.label.clone(),
                    selected: item.selected,
                    class,
                }
            })
            .collect();

        ItemListView {
            class: self.classes.list_items.clone(),
            items,
        }
    }
}

/// Taken choices stay visible for select-one (they mark the current pick)
/// and disappear for the other kinds.
fn keep_choice(choice: &Choice, kind: ControlKind) -> bool {
    kind == ControlKind::SelectOne || !choice.selected
}
