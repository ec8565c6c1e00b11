//! Tagbox: a form-control enhancer turning selects and text inputs into
//! searchable tag pickers.
//!
//! Tagbox wraps a host-provided control and provides:
//! - A single-writer, action-dispatched store over items, choices, and groups
//! - Debounce-driven fuzzy search with match highlighting
//! - Diff-driven rendering that repaints only the regions that changed
//! - Configurable gates for adding, removing, duplicating, and pasting values
//! - Typed notices for every interesting transition
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host Shim (main.rs, embedders)                     │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Controller
//! │  - Event handling                                   │  ← Debounced search
//! │  - Effect emission                                  │
//! │  - Typed notices                                    │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Store Layer   │   │ Render Layer  │   │ Search Layer  │
//! │ (store/)      │   │ (render/)     │   │ (search/)     │
//! │ - Actions     │   │ - Diff render │   │ - Fuzzy rank  │
//! │ - Reducers    │   │ - View models │   │ - Highlight   │
//! │ - Selectors   │   │ - Surfaces    │   │   spans       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Registry Layers                           │
//! │  - Entity types (domain/)                           │
//! │  - Error types (domain/error)                       │
//! │  - Control registry (registry)                      │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - Structured tracing                               │
//! │  - Rotating file export                             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Controller, event handler, effects, and notices
//! - [`domain`]: Core entity types (Item, Choice, ChoiceGroup, errors)
//! - [`store`]: Actions, reducers, selectors, and the store itself
//! - [`search`]: Fuzzy matching and span highlighting
//! - [`render`]: Diff-driven rendering onto host surfaces
//! - [`registry`]: Control specs and the one-picker-per-control registry
//! - [`observability`]: Structured logging setup
//!
//! # Configuration
//!
//! Hosts collect attribute strings from wherever they keep them (element
//! data attributes, query parameters, a config file) and hand them over as
//! a string map:
//!
//! ```
//! use std::collections::BTreeMap;
//! use tagbox::Config;
//!
//! let mut attributes = BTreeMap::new();
//! attributes.insert("max_items".to_string(), "5".to_string());
//! attributes.insert("allow_duplicates".to_string(), "false".to_string());
//!
//! let config = Config::from_attributes(&attributes);
//! assert_eq!(config.max_items, Some(5));
//! assert!(!config.allow_duplicates);
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Enhancement** ([`initialize`] or [`PickerRegistry::enhance`]):
//!    - Validate the declared control type
//!    - Build the picker with its store and resolved class names
//!    - Seed groups and choices from the control's parsed sources
//!    - Perform the initial render
//!
//! 2. **Event Loop**:
//!    - Host translates native input into [`PickerEvent`]s
//!    - [`handle_event`] applies guards and dispatches actions
//!    - Returned [`Effect`]s (timers, scrolls, input rewrites) run host-side
//!
//! 3. **Rendering**:
//!    - A true `needs_render` means some dispatch changed state
//!    - [`Picker::render`] repaints only regions whose collections changed
//!
//! # Examples
//!
//! ## Basic Usage (Library)
//!
//! ```
//! use tagbox::render::surface::RecordingSurface;
//! use tagbox::{handle_event, initialize, Config, ControlSpec, PickerEvent, SourceChoice};
//!
//! let spec = ControlSpec::new(
//!     "tags".to_string(),
//!     "select-multiple".to_string(),
//!     vec![],
//!     vec![SourceChoice::new("rust"), SourceChoice::new("zig")],
//! );
//!
//! let mut picker = initialize(&spec, Config::default(), RecordingSurface::default())?;
//!
//! let (needs_render, _effects) =
//!     handle_event(&mut picker, &PickerEvent::ChoiceClicked { choice_id: 1 })?;
//! if needs_render {
//!     picker.render();
//! }
//! assert_eq!(picker.value(), "rust");
//! # Ok::<(), tagbox::PickerError>(())
//! ```
//!
//! ## Registry Usage
//!
//! ```
//! use tagbox::render::surface::RecordingSurface;
//! use tagbox::{Config, ControlId, ControlSpec, PickerRegistry, SourceChoice};
//!
//! let mut registry = PickerRegistry::new();
//! let spec = ControlSpec::new(
//!     "tags".to_string(),
//!     "select-one".to_string(),
//!     vec![],
//!     vec![SourceChoice::new("rust")],
//! );
//! registry.enhance(&spec, Config::default(), RecordingSurface::default())?;
//!
//! let id = ControlId::new("tags".to_string());
//! assert!(registry.get(&id).is_some());
//! # Ok::<(), tagbox::PickerError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Single-Writer Store
//!
//! Each picker owns exactly one store and is its only writer:
//! - Actions are a closed enum, so unhandled inputs cannot exist
//! - Reducers are pure and run synchronously inside `dispatch`
//! - Listeners pull fresh snapshots instead of receiving payloads
//!
//! ## Pointer-Equality Change Detection
//!
//! Collections live behind `Arc`s and reducers return the same `Arc` on
//! no-ops:
//! - Renderer dirty checks are two pointer comparisons per region
//! - Snapshots are three handle clones, cheap to take and hold
//! - No-op dispatches provably repaint nothing
//!
//! ## Debounced Search via Host Timers
//!
//! The library never owns a clock; typing arms a host timer carrying a
//! token:
//! - A firing must present the newest token while the input is unchanged
//! - Stale firings are dropped without touching state
//! - Search ranks the full non-disabled pool, so queries never compound

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod observability;
pub mod registry;
pub mod render;
pub mod search;
pub mod store;

pub use app::{
    handle_event, ControlKind, Effect, Notice, NoticeEvent, Picker, PickerEvent, RejectReason,
    SearchPhase, SEARCH_DEBOUNCE_MS,
};
pub use domain::{
    Choice, ChoiceGroup, Item, PickerError, Result, SourceChoice, SourceGroup,
};
pub use registry::{ControlId, ControlSpec, PickerRegistry};
pub use render::{ClassNames, RecordingSurface, Surface};
pub use store::{actions, Action, State, Store};

use std::collections::BTreeMap;

/// Behavioral configuration for one enhanced control.
///
/// Values usually arrive as strings through [`Config::from_attributes`];
/// embedders constructing a `Config` directly get the same defaults from
/// [`Config::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether users may add items at all. Default: `true`
    pub add_items: bool,

    /// Whether backspace may remove items. Default: `true`
    pub remove_items: bool,

    /// Whether backspacing the newest item returns its value to the input
    /// for editing instead of just deleting it. Default: `false`
    pub edit_items: bool,

    /// Upper bound on active items. `None` means unlimited; select-one
    /// controls ignore the bound entirely. Default: `None`
    pub max_items: Option<usize>,

    /// Separator used when serializing item values back to the control.
    /// Default: `","`
    pub delimiter: String,

    /// Whether a value equal to an existing active item may be added again.
    /// Default: `true`
    pub allow_duplicates: bool,

    /// Whether pasted text is accepted into the input. Default: `true`
    pub allow_paste: bool,

    /// Whether typing filters the choice pool. Default: `true`
    pub allow_search: bool,

    /// Whether the select-all chord marks every item. Default: `true`
    pub select_all: bool,

    /// Pattern a free-typed value must match before a text input accepts
    /// it. Invalid patterns are logged and ignored. Default: `None`
    pub regex_filter: Option<String>,

    /// Placeholder shown when a search matches nothing.
    /// Default: `"No results found"`
    pub no_results_text: String,

    /// Placeholder shown when the pool has nothing left to pick.
    /// Default: `"No choices to choose from"`
    pub no_choices_text: String,

    /// Path to a TOML file overriding the class vocabulary. See
    /// [`render::classnames`] for the format. Default: `None`
    pub class_file: Option<String>,

    /// Log level when `RUST_LOG` is unset.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Log destination file. Unset means stderr. Default: `None`
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            add_items: true,
            remove_items: true,
            edit_items: false,
            max_items: None,
            delimiter: ",".to_string(),
            allow_duplicates: true,
            allow_paste: true,
            allow_search: true,
            select_all: true,
            regex_filter: None,
            no_results_text: "No results found".to_string(),
            no_choices_text: "No choices to choose from".to_string(),
            class_file: None,
            trace_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a host attribute map.
    ///
    /// # Parsing Rules
    ///
    /// - Boolean flags accept `true`/`false`; anything else keeps the
    ///   default
    /// - `max_items`: parsed as an integer, then dropped unless positive
    /// - String options are taken verbatim
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use tagbox::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("delimiter".to_string(), "|".to_string());
    /// map.insert("edit_items".to_string(), "true".to_string());
    ///
    /// let config = Config::from_attributes(&map);
    /// assert_eq!(config.delimiter, "|");
    /// assert!(config.edit_items);
    /// ```
    #[must_use]
    pub fn from_attributes(attributes: &BTreeMap<String, String>) -> Self {
        let flag = |key: &str, default: bool| {
            attributes
                .get(key)
                .and_then(|s| s.parse().ok())
                .unwrap_or(default)
        };

        let max_items = attributes
            .get("max_items")
            .and_then(|s| s.parse::<i64>().ok())
            .and_then(|n| usize::try_from(n).ok())
            .filter(|n| *n > 0);

        Self {
            add_items: flag("add_items", true),
            remove_items: flag("remove_items", true),
            edit_items: flag("edit_items", false),
            max_items,
            delimiter: attributes
                .get("delimiter")
                .cloned()
                .unwrap_or_else(|| ",".to_string()),
            allow_duplicates: flag("allow_duplicates", true),
            allow_paste: flag("allow_paste", true),
            allow_search: flag("allow_search", true),
            select_all: flag("select_all", true),
            regex_filter: attributes.get("regex_filter").cloned(),
            no_results_text: attributes
                .get("no_results_text")
                .cloned()
                .unwrap_or_else(|| "No results found".to_string()),
            no_choices_text: attributes
                .get("no_choices_text")
                .cloned()
                .unwrap_or_else(|| "No choices to choose from".to_string()),
            class_file: attributes.get("class_file").cloned(),
            trace_level: attributes.get("trace_level").cloned(),
            log_file: attributes.get("log_file").cloned(),
        }
    }
}

/// Enhances a single control described by `spec`.
///
/// Validates the declared type, builds the picker, seeds it from the spec's
/// parsed sources, and performs the initial render. Hosts managing many
/// controls should go through [`PickerRegistry::enhance`] instead, which
/// adds the duplicate-enhancement check.
///
/// # Errors
///
/// Returns [`PickerError::UnsupportedControl`] for unknown control types;
/// the underlying control is left untouched.
///
/// # Example
///
/// ```
/// use tagbox::render::surface::RecordingSurface;
/// use tagbox::{initialize, Config, ControlSpec, SourceChoice};
///
/// let spec = ControlSpec::new(
///     "tags".to_string(),
///     "select-multiple".to_string(),
///     vec![],
///     vec![SourceChoice::new("rust")],
/// );
///
/// let picker = initialize(&spec, Config::default(), RecordingSurface::default())?;
/// assert_eq!(picker.state().choices.len(), 1);
/// # Ok::<(), tagbox::PickerError>(())
/// ```
pub fn initialize<S: Surface>(spec: &ControlSpec, config: Config, surface: S) -> Result<Picker<S>> {
    tracing::debug!(
        control_id = %spec.control_id,
        control_type = %spec.control_type,
        "initializing picker"
    );

    let kind = registry::resolve_kind(&spec.control_type)?;
    let mut picker = Picker::new(kind, config, surface);
    picker.seed(&spec.groups, &spec.choices);
    picker.render();

    Ok(picker)
}
