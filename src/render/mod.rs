//! Rendering layer: snapshots in, surface calls out.
//!
//! # Modules
//!
//! - [`classnames`]: Styling vocabulary with TOML overrides
//! - [`renderer`]: Diff-driven painter over the two output regions
//! - [`surface`]: Host output boundary and the test capture surface
//! - [`viewmodel`]: Display-ready view structures

pub mod classnames;
pub mod renderer;
pub mod surface;
pub mod viewmodel;

pub use classnames::ClassNames;
pub use renderer::{RenderPass, Renderer};
pub use surface::{RecordingSurface, Surface};
pub use viewmodel::{ChoiceListView, ChoiceView, GroupView, ItemListView, ItemView};
