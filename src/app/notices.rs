//! Typed notification channel for picker activity.
//!
//! Interesting transitions (item added, search applied, an add rejected)
//! are published as [`Notice`] values to registered observers. Observers see
//! a closed vocabulary of events rather than a grab-bag of callbacks, so a
//! host can match exhaustively and the compiler flags any event it forgot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an attempted add was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The configured item cap is already reached.
    LimitReached,
    /// The value equals an existing active item and duplicates are off.
    Duplicate,
    /// The value failed the configured pattern filter.
    PatternMismatch,
    /// Adding is disabled outright.
    AddDisabled,
}

/// What happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum NoticeEvent {
    ItemAdded { id: u64, value: String },
    ItemRemoved { id: u64, value: String },
    SelectionToggled { id: u64, selected: bool },
    ChoiceTaken { choice_id: u64 },
    SearchApplied { query: String, result_count: usize },
    SearchCleared,
    AddRejected { value: String, reason: RejectReason },
}

/// An event stamped with its wall-clock occurrence time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub event: NoticeEvent,
    /// Milliseconds since the Unix epoch.
    pub at_ms: i64,
}

/// Fan-out to registered observers.
///
/// Observers run synchronously in registration order. Emission never fails
/// and never filters; uninterested observers ignore what they get.
#[derive(Default)]
pub struct NoticeBus {
    observers: Vec<Box<dyn FnMut(&Notice)>>,
}

impl NoticeBus {
    /// Registers an observer for all subsequent notices.
    pub fn observe(&mut self, observer: Box<dyn FnMut(&Notice)>) {
        self.observers.push(observer);
    }

    /// Stamps and publishes an event.
    pub fn emit(&mut self, event: NoticeEvent) {
        let notice = Notice {
            event,
            at_ms: chrono::Utc::now().timestamp_millis(),
        };
        tracing::debug!(notice = ?notice.event, "notice emitted");
        for observer in &mut self.observers {
            observer(&notice);
        }
    }
}

impl fmt::Debug for NoticeBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoticeBus")
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn emit_reaches_every_observer_in_order() {
        let mut bus = NoticeBus::default();
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            bus.observe(Box::new(move |notice| {
                log.borrow_mut().push((tag, notice.event.clone()));
            }));
        }

        bus.emit(NoticeEvent::SearchCleared);

        let seen = log.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].0, "second");
        assert_eq!(seen[0].1, NoticeEvent::SearchCleared);
    }

    #[test]
    fn notices_carry_a_wall_clock_stamp() {
        let mut bus = NoticeBus::default();
        let stamp = Rc::new(RefCell::new(0i64));

        let sink = Rc::clone(&stamp);
        bus.observe(Box::new(move |notice| {
            *sink.borrow_mut() = notice.at_ms;
        }));

        bus.emit(NoticeEvent::ItemAdded {
            id: 1,
            value: "oak".to_string(),
        });

        assert!(*stamp.borrow() > 0);
    }

    #[test]
    fn events_serialize_with_a_kind_tag() {
        let event = NoticeEvent::AddRejected {
            value: "oak".to_string(),
            reason: RejectReason::Duplicate,
        };
        let json = serde_json::to_string(&event).unwrap();

        assert!(json.contains("\"kind\":\"add_rejected\""));
        assert!(json.contains("\"reason\":\"duplicate\""));
    }
}
