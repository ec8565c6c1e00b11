//! Controller tying one enhanced control's store, config, search, and
//! surface together.
//!
//! A [`Picker`] owns the store and is its only writer. Event handling
//! (in [`handler`](crate::app::handler)) calls the `pub(crate)` operations
//! here; each operation reads a snapshot, applies its guards, dispatches the
//! resulting actions, and publishes notices. A store subscription flips a
//! render flag on every dispatch, which the handler drains into its
//! "needs render" return value.
//!
//! Rendering itself is pull-based: [`Picker::render`] takes a fresh snapshot
//! and hands it to the diff-driven renderer together with the transient view
//! inputs (search phase, highlight, control kind).

use crate::app::handler::SEARCH_DEBOUNCE_MS;
use crate::app::modes::{ControlKind, SearchPhase};
use crate::app::notices::{Notice, NoticeBus, NoticeEvent, RejectReason};
use crate::app::Effect;
use crate::domain::{SourceChoice, SourceGroup};
use crate::render::classnames::ClassNames;
use crate::render::renderer::{RenderPass, Renderer};
use crate::render::surface::Surface;
use crate::search::{FuzzySearcher, SearchCandidate, Searcher};
use crate::store::{actions, State, Store};
use crate::Config;
use regex::Regex;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// One enhanced control.
///
/// Generic over the [`Surface`] the host provides, so production hosts and
/// tests drive exactly the same machinery.
pub struct Picker<S: Surface> {
    pub store: Store,
    pub config: Config,
    pub kind: ControlKind,
    pub search: SearchPhase,
    /// Index into the rendered choice rows, not into the raw collection.
    pub highlight: Option<usize>,
    /// Mirror of the host input field's visible text.
    pub input_value: String,
    pub dropdown_open: bool,
    pub(crate) renderer: Renderer,
    pub(crate) notices: NoticeBus,
    surface: S,
    searcher: Box<dyn Searcher>,
    filter: Option<Regex>,
    next_token: u64,
    render_flag: Rc<Cell<bool>>,
}

impl<S: Surface> Picker<S> {
    /// Creates a picker over `surface` with an empty store.
    ///
    /// A class-name file named in the config is loaded here; a missing or
    /// malformed file logs and falls back to the defaults. An invalid
    /// `regex_filter` pattern is logged and ignored rather than refusing
    /// the whole control.
    pub fn new(kind: ControlKind, config: Config, surface: S) -> Self {
        let classes = config
            .class_file
            .as_ref()
            .map_or_else(ClassNames::default, |path| {
                ClassNames::from_file(path).unwrap_or_else(|err| {
                    tracing::debug!(error = %err, "falling back to default class names");
                    ClassNames::default()
                })
            });

        let filter = config
            .regex_filter
            .as_ref()
            .and_then(|pattern| match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(err) => {
                    tracing::warn!(pattern = %pattern, error = %err, "ignoring invalid value filter");
                    None
                }
            });

        let render_flag = Rc::new(Cell::new(false));
        let mut store = Store::new();
        let flag = Rc::clone(&render_flag);
        store.subscribe(Box::new(move || flag.set(true)));

        Self {
            store,
            config,
            kind,
            search: SearchPhase::Idle,
            highlight: None,
            input_value: String::new(),
            dropdown_open: false,
            renderer: Renderer::new(classes),
            notices: NoticeBus::default(),
            surface,
            searcher: Box::new(FuzzySearcher::new()),
            filter,
            next_token: 0,
            render_flag,
        }
    }

    /// Replaces the default fuzzy scorer.
    #[must_use]
    pub fn with_searcher(mut self, searcher: Box<dyn Searcher>) -> Self {
        self.searcher = searcher;
        self
    }

    /// Returns the current store snapshot.
    #[must_use]
    pub fn state(&self) -> State {
        self.store.state()
    }

    /// Returns the control's value: active item values joined with the
    /// configured delimiter.
    #[must_use]
    pub fn value(&self) -> String {
        self.store.state().serialized_value(&self.config.delimiter)
    }

    /// Registers a notice observer.
    pub fn observe(&mut self, observer: Box<dyn FnMut(&Notice)>) {
        self.notices.observe(observer);
    }

    /// Read access to the surface, mainly for test assertions.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The resolved class vocabulary, for host scaffolding (container,
    /// input, dropdown chrome) outside the rendered regions.
    #[must_use]
    pub fn class_names(&self) -> &ClassNames {
        self.renderer.classes()
    }

    /// Renders the current snapshot to the surface.
    ///
    /// Regions whose collections are pointer-identical to the previous
    /// render are skipped. The renderer clamps the requested highlight to
    /// the rows it actually produced and the clamped value is written back,
    /// so `highlight` always refers to a real row afterwards.
    pub fn render(&mut self) {
        let state = self.store.state();
        let pass = RenderPass {
            searching: self.search.is_searching(),
            query: self.search.active_query().unwrap_or(""),
            highlight: self.highlight,
            kind: self.kind,
            delimiter: &self.config.delimiter,
            no_results_text: &self.config.no_results_text,
            no_choices_text: &self.config.no_choices_text,
            searcher: self.searcher.as_ref(),
        };
        self.highlight = self.renderer.render(&state, &pass, &mut self.surface);
        self.render_flag.set(false);
    }

    /// Drains the dirty flag set by store dispatches since the last drain.
    pub(crate) fn take_render_flag(&mut self) -> bool {
        self.render_flag.replace(false)
    }

    pub(crate) fn open_dropdown(&mut self, open: bool) {
        if self.dropdown_open != open {
            self.dropdown_open = open;
            self.surface.set_dropdown_open(open);
        }
    }

    /// Highlight changes reach the surface immediately; they are view
    /// state only and never warrant a full render on their own.
    pub(crate) fn clear_highlight(&mut self) {
        self.highlight = None;
        self.surface.set_highlight(None);
    }

    pub(crate) fn move_highlight_to(&mut self, index: usize) {
        self.highlight = Some(index);
        self.surface.set_highlight(Some(index));
    }

    /// Arms a debounce round for the current input text.
    ///
    /// Issues a fresh token, records it with the query in the search phase,
    /// and returns the timer effect for the host. Re-arming supersedes any
    /// earlier round: the old token can no longer match.
    pub(crate) fn schedule_search(&mut self) -> Effect {
        self.next_token = self.next_token.wrapping_add(1);
        let token = self.next_token;
        self.search = SearchPhase::Scheduled {
            token,
            query: self.input_value.clone(),
        };
        tracing::debug!(token, query = %self.input_value, "search debounce armed");
        Effect::ScheduleSearch {
            token,
            delay_ms: SEARCH_DEBOUNCE_MS,
        }
    }

    /// Ranks the pool against `query` and applies the filter.
    ///
    /// The haystack is every non-disabled choice regardless of its current
    /// active flag, so a second search ranks against the full pool instead
    /// of narrowing within the first one's survivors.
    pub(crate) fn run_search(&mut self, query: &str) {
        let state = self.store.state();
        let candidates: Vec<SearchCandidate> = state
            .searchable_choices()
            .iter()
            .map(|c| SearchCandidate {
                id: c.id,
                label: c.label.clone(),
                value: c.value.clone(),
            })
            .collect();
        let ranked: Vec<u64> = self
            .searcher
            .search(query, &candidates)
            .iter()
            .map(|m| m.id)
            .collect();
        let result_count = ranked.len();

        self.store.dispatch(actions::filter_choices(ranked));
        self.search = SearchPhase::Active {
            query: query.to_string(),
        };
        self.notices.emit(NoticeEvent::SearchApplied {
            query: query.to_string(),
            result_count,
        });
    }

    /// Leaves the search lifecycle.
    ///
    /// An applied filter is undone and announced; a merely scheduled one is
    /// dropped silently, stranding its timer token.
    pub(crate) fn clear_search(&mut self) {
        match std::mem::take(&mut self.search) {
            SearchPhase::Idle | SearchPhase::Scheduled { .. } => {}
            SearchPhase::Active { .. } => {
                self.store.dispatch(actions::activate_choices());
                self.notices.emit(NoticeEvent::SearchCleared);
            }
        }
    }

    /// Attempts to add `raw` as an item, applying every configured gate.
    ///
    /// Rejections emit an [`NoticeEvent::AddRejected`] with the reason and
    /// leave state untouched. For select-one controls a successful add first
    /// removes the current item, and the item cap does not apply.
    pub(crate) fn try_add_value(
        &mut self,
        raw: &str,
        label: Option<String>,
        choice_id: Option<u64>,
    ) -> bool {
        let value = raw.trim();
        if value.is_empty() {
            return false;
        }
        if !self.config.add_items {
            self.reject(value, RejectReason::AddDisabled);
            return false;
        }

        let state = self.store.state();
        if self.kind != ControlKind::SelectOne {
            if let Some(max) = self.config.max_items {
                if state.active_items().len() >= max {
                    self.reject(value, RejectReason::LimitReached);
                    return false;
                }
            }
        }
        if !self.config.allow_duplicates
            && state.active_items().iter().any(|item| item.value == value)
        {
            self.reject(value, RejectReason::Duplicate);
            return false;
        }
        if self.kind == ControlKind::TextInput {
            if let Some(filter) = &self.filter {
                if !filter.is_match(value) {
                    self.reject(value, RejectReason::PatternMismatch);
                    return false;
                }
            }
        }

        if self.kind == ControlKind::SelectOne {
            self.remove_active_items();
        }
        self.store
            .dispatch(actions::add_item(value.to_string(), label, choice_id));

        let added = self.store.state();
        if let Some(item) = added.last_active_item() {
            self.notices.emit(NoticeEvent::ItemAdded {
                id: item.id,
                value: item.value.clone(),
            });
        }
        true
    }

    /// Soft-deletes an active item and announces the removal.
    pub(crate) fn remove_item_by_id(&mut self, id: u64) -> bool {
        let state = self.store.state();
        let Some(item) = state.get_item(id) else {
            return false;
        };
        let value = item.value.clone();
        let choice_id = item.choice_id;

        self.store.dispatch(actions::remove_item(id, choice_id));
        self.notices.emit(NoticeEvent::ItemRemoved { id, value });
        true
    }

    /// Converts a choice into an item.
    ///
    /// Disabled and already-taken choices are refused. A successful take
    /// ends any search in progress so the full pool returns.
    pub(crate) fn take_choice(&mut self, choice_id: u64) -> bool {
        let state = self.store.state();
        let Some(choice) = state.get_choice(choice_id) else {
            return false;
        };
        if choice.disabled || choice.selected {
            return false;
        }
        let value = choice.value.clone();
        let label = choice.label.clone();

        if !self.try_add_value(&value, Some(label), Some(choice_id)) {
            return false;
        }
        self.notices.emit(NoticeEvent::ChoiceTaken { choice_id });
        if !matches!(self.search, SearchPhase::Idle) {
            self.clear_search();
        }
        true
    }

    /// The choice id under the highlight, per the last rendered rows.
    pub(crate) fn highlighted_choice_id(&self) -> Option<u64> {
        let index = self.highlight?;
        self.renderer.rendered_choice_ids().get(index).copied()
    }

    pub(crate) fn reject(&mut self, value: &str, reason: RejectReason) {
        tracing::warn!(value = %value, reason = ?reason, "add rejected");
        self.notices.emit(NoticeEvent::AddRejected {
            value: value.to_string(),
            reason,
        });
    }

    /// Loads the parsed source groups and choices into the store.
    ///
    /// Group membership and disablement flow down to member choices. A
    /// choice arriving pre-selected becomes an item immediately, unless it
    /// is disabled.
    pub(crate) fn seed(&mut self, groups: &[SourceGroup], choices: &[SourceChoice]) {
        for group in groups {
            self.store.dispatch(actions::add_group(
                group.label.clone(),
                group.disabled,
                !group.choices.is_empty(),
            ));
            let group_id = self.store.state().groups.last().map(|g| g.id);
            for choice in &group.choices {
                self.seed_choice(choice, group_id, group.disabled);
            }
        }
        for choice in choices {
            self.seed_choice(choice, None, false);
        }
        tracing::debug!(
            groups = groups.len(),
            choices = self.store.state().choices.len(),
            "seeded"
        );
    }

    fn seed_choice(&mut self, source: &SourceChoice, group_id: Option<u64>, group_disabled: bool) {
        let disabled = source.disabled || group_disabled;
        let label = source.label.clone();
        self.store.dispatch(actions::add_choice(
            source.value.clone(),
            label,
            group_id,
            disabled,
        ));

        if source.selected && !disabled {
            if self.kind == ControlKind::SelectOne {
                self.remove_active_items();
            }
            let seeded = self
                .store
                .state()
                .choices
                .last()
                .map(|c| (c.id, c.value.clone(), c.label.clone()));
            if let Some((id, value, label)) = seeded {
                self.store
                    .dispatch(actions::add_item(value, Some(label), Some(id)));
            }
        }
    }

    fn remove_active_items(&mut self) {
        let current: Vec<(u64, Option<u64>)> = self
            .store
            .state()
            .active_items()
            .iter()
            .map(|item| (item.id, item.choice_id))
            .collect();
        for (id, choice_id) in current {
            self.store.dispatch(actions::remove_item(id, choice_id));
        }
    }
}

impl<S: Surface + fmt::Debug> fmt::Debug for Picker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Picker")
            .field("kind", &self.kind)
            .field("search", &self.search)
            .field("highlight", &self.highlight)
            .field("input_value", &self.input_value)
            .field("dropdown_open", &self.dropdown_open)
            .field("surface", &self.surface)
            .finish_non_exhaustive()
    }
}
