//! Tracks which controls are enhanced and owns their pickers.
//!
//! Hosts managing a whole page or screen of controls go through a
//! [`PickerRegistry`]; single-control embedders can call
//! [`initialize`](crate::initialize) directly. The registry enforces the
//! one-picker-per-control rule and refuses control types the library does
//! not understand, leaving such controls untouched.

use crate::app::picker::Picker;
use crate::app::ControlKind;
use crate::domain::error::{PickerError, Result};
use crate::domain::{SourceChoice, SourceGroup};
use crate::render::surface::Surface;
use crate::Config;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable identity of a host control.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlId(String);

impl ControlId {
    #[must_use]
    pub fn new(id: String) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything the host declares about a control up front: its identity, its
/// declared type, and the parsed source choices to seed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub control_id: String,
    pub control_type: String,
    #[serde(default)]
    pub groups: Vec<SourceGroup>,
    #[serde(default)]
    pub choices: Vec<SourceChoice>,
}

impl ControlSpec {
    #[must_use]
    pub fn new(
        control_id: String,
        control_type: String,
        groups: Vec<SourceGroup>,
        choices: Vec<SourceChoice>,
    ) -> Self {
        Self {
            control_id,
            control_type,
            groups,
            choices,
        }
    }
}

/// Enhanced controls keyed by [`ControlId`].
#[derive(Debug, Default)]
pub struct PickerRegistry<S: Surface> {
    pickers: BTreeMap<ControlId, Picker<S>>,
}

impl<S: Surface> PickerRegistry<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pickers: BTreeMap::new(),
        }
    }

    /// Enhances a control: validates its type, seeds a picker from the
    /// spec's sources, performs the initial render, and registers it.
    ///
    /// # Errors
    ///
    /// [`PickerError::AlreadyEnhanced`] when the id is taken and
    /// [`PickerError::UnsupportedControl`] for unknown control types. In
    /// both cases the underlying control is left untouched.
    pub fn enhance(
        &mut self,
        spec: &ControlSpec,
        config: Config,
        surface: S,
    ) -> Result<&mut Picker<S>> {
        let id = ControlId::new(spec.control_id.clone());
        if self.pickers.contains_key(&id) {
            tracing::warn!(control_id = %id, "control already enhanced");
            return Err(PickerError::AlreadyEnhanced(spec.control_id.clone()));
        }

        let picker = crate::initialize(spec, config, surface)?;
        tracing::debug!(control_id = %id, control_type = %spec.control_type, "control enhanced");
        Ok(self.pickers.entry(id).or_insert(picker))
    }

    #[must_use]
    pub fn get(&self, id: &ControlId) -> Option<&Picker<S>> {
        self.pickers.get(id)
    }

    pub fn get_mut(&mut self, id: &ControlId) -> Option<&mut Picker<S>> {
        self.pickers.get_mut(id)
    }

    /// Unregisters a picker, dropping its store and subscriptions. The
    /// underlying control keeps whatever value was last written to it.
    pub fn remove(&mut self, id: &ControlId) -> Option<Picker<S>> {
        let removed = self.pickers.remove(id);
        if removed.is_some() {
            tracing::debug!(control_id = %id, "control released");
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pickers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pickers.is_empty()
    }
}

/// Used by [`PickerRegistry::enhance`] and [`initialize`](crate::initialize)
/// to map declared types.
pub(crate) fn resolve_kind(control_type: &str) -> Result<ControlKind> {
    ControlKind::from_control_type(control_type).ok_or_else(|| {
        tracing::warn!(control_type, "unsupported control type");
        PickerError::UnsupportedControl(control_type.to_string())
    })
}
