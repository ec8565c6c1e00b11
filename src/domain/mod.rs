//! Domain layer for the tagbox engine.
//!
//! This module contains the core domain types for the picker, independent of any
//! host, rendering, or storage concern. It follows domain-driven design
//! principles by keeping the data model isolated from external dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The chosen-value model
//! - [`choice`]: Selectable entries, groups, and host seed records
//!
//! # Examples
//!
//! ```
//! use tagbox::domain::{Item, Result};
//!
//! fn create_item() -> Result<Item> {
//!     Ok(Item::new(1, "red".to_string(), "Red".to_string(), None))
//! }
//! ```

pub mod choice;
pub mod error;
pub mod item;

pub use choice::{Choice, ChoiceGroup, SourceChoice, SourceGroup};
pub use error::{PickerError, Result};
pub use item::Item;
