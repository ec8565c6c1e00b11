//! Host-facing event and effect vocabulary.
//!
//! Hosts translate their native input (DOM events, key codes, terminal
//! bytes) into [`PickerEvent`] values and feed them to
//! [`handle_event`](crate::app::handler::handle_event). The handler answers
//! with [`Effect`] requests for the things only a host can do: arm a timer,
//! scroll a list, rewrite the visible input field.

/// An input occurrence translated by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
    /// The search input's visible text changed to `value`.
    ValueInput { value: String },
    /// Enter was pressed.
    EnterPressed,
    /// Escape was pressed.
    EscapePressed,
    /// Arrow-up was pressed.
    ArrowUp,
    /// Arrow-down was pressed.
    ArrowDown,
    /// Backspace was pressed while the input caret sat at the start.
    BackspacePressed,
    /// The host's select-all chord was pressed.
    SelectAllPressed,
    /// A rendered choice was clicked.
    ChoiceClicked { choice_id: u64 },
    /// A rendered item was clicked.
    ItemClicked { item_id: u64 },
    /// Text was pasted into the search input.
    Pasted { text: String },
    /// A timer armed by [`Effect::ScheduleSearch`] fired.
    SearchTimerFired { token: u64 },
    /// The control gained focus.
    Focused,
    /// The control lost focus.
    Blurred,
}

/// A side effect the host must perform on the handler's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm a one-shot timer that delivers [`PickerEvent::SearchTimerFired`]
    /// with this token after `delay_ms` milliseconds. Arming replaces any
    /// previously armed search timer.
    ScheduleSearch { token: u64, delay_ms: u64 },
    /// Bring the highlighted row at `index` into view.
    ScrollToHighlight { index: usize },
    /// Clear the visible search input.
    ClearInput,
    /// Replace the visible search input with `value`.
    SetInput { value: String },
}
