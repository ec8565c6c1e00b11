//! Application layer coordinating the controller, events, and effects.
//!
//! This module sits between a host (main.rs, a browser shim, a test harness)
//! and the store/render layers. It implements the event-driven control flow
//! that powers an enhanced control.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Host Input → PickerEvent → Event Handler → Store Dispatches → Render
//!                                  ↓
//!                               Effects → Host Side Effects (timers, scroll,
//!                                         input rewrites)
//! ```
//!
//! # Modules
//!
//! - [`events`]: Host-facing event and effect vocabulary
//! - [`handler`]: Event processing logic and transition coordinator
//! - [`modes`]: Control kinds and the search lifecycle state machine
//! - [`notices`]: Typed notification channel for picker activity
//! - [`picker`]: Controller owning one control's store, config, and surface
//!
//! # Example
//!
//! ```
//! use tagbox::render::surface::RecordingSurface;
//! use tagbox::{handle_event, Config, ControlKind, Picker, PickerEvent};
//!
//! let mut picker = Picker::new(
//!     ControlKind::TextInput,
//!     Config::default(),
//!     RecordingSurface::default(),
//! );
//! let (_, _effects) = handle_event(
//!     &mut picker,
//!     &PickerEvent::ValueInput {
//!         value: "rust".to_string(),
//!     },
//! )?;
//! let (needs_render, _) = handle_event(&mut picker, &PickerEvent::EnterPressed)?;
//! assert!(needs_render);
//! # Ok::<(), tagbox::PickerError>(())
//! ```

pub mod events;
pub mod handler;
pub mod modes;
pub mod notices;
pub mod picker;

pub use events::{Effect, PickerEvent};
pub use handler::{handle_event, SEARCH_DEBOUNCE_MS};
pub use modes::{ControlKind, SearchPhase};
pub use notices::{Notice, NoticeBus, NoticeEvent, RejectReason};
pub use picker::Picker;
