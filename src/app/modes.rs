//! Control kinds and the search lifecycle.
//!
//! # State Machine
//!
//! A picker's search moves through three phases:
//! - **Idle**: no filter applied, the full choice pool is active
//! - **Scheduled**: input changed and a debounce timer is armed
//! - **Active**: a filter has been applied to the choice pool
//!
//! Scheduling records the timer token and the query text as of that moment.
//! A firing timer must present the right token AND find the input unchanged,
//! otherwise it is stale and is dropped without touching state.

/// Which flavor of control a picker enhances.
///
/// The kind changes a handful of behaviors rather than the machinery:
/// select-one replaces its single item instead of appending, text inputs
/// admit free-typed values and skip the dropdown, select-multiple does
/// neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    /// Single-slot chooser. Taking a choice replaces the current item and
    /// the item cap is ignored.
    SelectOne,

    /// Multi-slot chooser. Items accumulate from the choice pool up to the
    /// configured cap.
    SelectMultiple,

    /// Free-text tag input. Values come from typing, optionally gated by a
    /// pattern filter. No dropdown, no search.
    TextInput,
}

impl ControlKind {
    /// Maps a declared control type to a kind.
    ///
    /// Unknown types return `None` so enhancement can refuse them up front
    /// and leave the underlying control untouched.
    #[must_use]
    pub fn from_control_type(control_type: &str) -> Option<Self> {
        match control_type {
            "select-one" => Some(Self::SelectOne),
            "select-multiple" => Some(Self::SelectMultiple),
            "text" => Some(Self::TextInput),
            _ => None,
        }
    }
}

/// Where a picker sits in the debounced search lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    /// No filter applied.
    #[default]
    Idle,

    /// A debounce timer is armed. `token` identifies the arming; `query`
    /// is the input text captured when the timer was armed.
    Scheduled { token: u64, query: String },

    /// `query` has been applied to the choice pool.
    Active { query: String },
}

impl SearchPhase {
    /// True only once a filter has actually been applied.
    #[must_use]
    pub fn is_searching(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// The applied query, if one is active.
    #[must_use]
    pub fn active_query(&self) -> Option<&str> {
        match self {
            Self::Active { query } => Some(query),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_control_types_map_to_kinds() {
        assert_eq!(
            ControlKind::from_control_type("select-one"),
            Some(ControlKind::SelectOne)
        );
        assert_eq!(
            ControlKind::from_control_type("select-multiple"),
            Some(ControlKind::SelectMultiple)
        );
        assert_eq!(
            ControlKind::from_control_type("text"),
            Some(ControlKind::TextInput)
        );
        assert_eq!(ControlKind::from_control_type("radio"), None);
    }

    #[test]
    fn only_an_applied_filter_counts_as_searching() {
        assert!(!SearchPhase::Idle.is_searching());
        assert!(!SearchPhase::Scheduled {
            token: 1,
            query: "a".to_string()
        }
        .is_searching());
        assert!(SearchPhase::Active {
            query: "a".to_string()
        }
        .is_searching());
    }

    #[test]
    fn active_query_surfaces_only_applied_text() {
        assert_eq!(SearchPhase::Idle.active_query(), None);
        assert_eq!(
            SearchPhase::Active {
                query: "oak".to_string()
            }
            .active_query(),
            Some("oak")
        );
    }
}
