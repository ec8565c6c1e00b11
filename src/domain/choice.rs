//! Choice and group domain models.
//!
//! This module defines the selectable side of the picker: [`Choice`] entries the
//! user can pick from, [`ChoiceGroup`] categories that organize them, and the
//! [`SourceChoice`]/[`SourceGroup`] seed records the host hands over when a
//! control is enhanced. Seed records mirror the native control's option and
//! optgroup content and can be parsed from JSON.

use crate::domain::error::{PickerError, Result};
use serde::{Deserialize, Serialize};

/// Represents one selectable source entry.
///
/// Choices are created once at initialization and never removed. Search
/// filtering toggles the `active` flag and assigns a `rank`; picking a choice
/// flips `selected` so it cannot be added twice while its item is alive.
///
/// # Fields
///
/// - `id`: Store-assigned identifier, 1-based per addition
/// - `value`: The raw value an item created from this choice will carry
/// - `label`: Display text shown in the dropdown
/// - `group_id`: Containing group id, `None` for ungrouped entries
/// - `disabled`: Immutable after creation; disabled entries are never selectable
/// - `selected`: `true` while a live item originates from this choice
/// - `active`: Search-result visibility; all choices start active
/// - `rank`: Position in the most recent search result, `None` outside a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: u64,
    pub value: String,
    pub label: String,
    pub group_id: Option<u64>,
    pub disabled: bool,
    pub selected: bool,
    pub active: bool,
    pub rank: Option<u32>,
}

impl Choice {
    /// Creates a new active, unselected, unranked choice.
    #[must_use]
    pub const fn new(
        id: u64,
        value: String,
        label: String,
        group_id: Option<u64>,
        disabled: bool,
    ) -> Self {
        Self {
            id,
            value,
            label,
            group_id,
            disabled,
            selected: false,
            active: true,
            rank: None,
        }
    }
}

/// Represents a labeled choice category.
///
/// Groups are created once at initialization and are immutable thereafter.
/// A group is `active` when it arrived with at least one entry; inactive and
/// disabled groups are never rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceGroup {
    pub id: u64,
    pub label: String,
    pub active: bool,
    pub disabled: bool,
}

impl ChoiceGroup {
    /// Creates a new group.
    #[must_use]
    pub const fn new(id: u64, label: String, active: bool, disabled: bool) -> Self {
        Self {
            id,
            label,
            active,
            disabled,
        }
    }
}

/// Host-provided seed record for one choice.
///
/// Mirrors a native `<option>`: a value, an optional display label, a disabled
/// flag, and whether the entry arrived pre-selected. Pre-selected entries
/// produce both the choice and a corresponding item at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceChoice {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub selected: bool,
}

impl SourceChoice {
    /// Creates a seed record with only a value set.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
            ..Self::default()
        }
    }

    /// Creates a seed record with a value and a display label.
    #[must_use]
    pub fn labeled(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: Some(label.to_string()),
            ..Self::default()
        }
    }

    /// Parses a JSON array of seed records.
    ///
    /// Accepts the same shape the host would pass through a data attribute:
    ///
    /// ```json
    /// [
    ///     { "value": "red", "label": "Red" },
    ///     { "value": "green", "disabled": true }
    /// ]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Source`] if the JSON cannot be deserialized.
    pub fn from_json(json: &str) -> Result<Vec<Self>> {
        serde_json::from_str(json).map_err(|e| PickerError::Source(e.to_string()))
    }
}

/// Host-provided seed record for one group and its entries.
///
/// Mirrors a native `<optgroup>`. A disabled group disables every entry in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceGroup {
    pub label: String,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub choices: Vec<SourceChoice>,
}

impl SourceGroup {
    /// Creates a seed group with the given label and entries.
    #[must_use]
    pub fn new(label: &str, choices: Vec<SourceChoice>) -> Self {
        Self {
            label: label.to_string(),
            disabled: false,
            choices,
        }
    }
}
