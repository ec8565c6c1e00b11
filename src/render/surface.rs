//! Host output boundary.
//!
//! A [`Surface`] is whatever the host paints on: DOM nodes, a terminal, a
//! capture buffer in tests. The renderer pushes display-ready views through
//! it and nothing else; surfaces never read picker state.

use crate::render::viewmodel::{ChoiceListView, ItemListView};

/// Receives rendered output for one enhanced control.
pub trait Surface {
    /// Writes the serialized value back to the underlying control.
    fn set_control_value(&mut self, value: &str);

    /// Replaces the choice region with `view`.
    fn render_choice_region(&mut self, view: &ChoiceListView);

    /// Replaces the item region with `view`.
    fn render_item_region(&mut self, view: &ItemListView);

    /// Moves the visual highlight to the rendered row at `index`.
    fn set_highlight(&mut self, index: Option<usize>);

    /// Shows or hides the dropdown.
    fn set_dropdown_open(&mut self, open: bool);
}

/// Capture-everything surface for tests.
///
/// Records each call so assertions can check both the final views and how
/// often regions were actually repainted.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub control_value: String,
    pub choice_renders: Vec<ChoiceListView>,
    pub item_renders: Vec<ItemListView>,
    pub highlight: Option<usize>,
    pub dropdown_open: bool,
    pub call_count: usize,
}

impl RecordingSurface {
    /// The most recent choice region view, if any render happened.
    #[must_use]
    pub fn last_choice_view(&self) -> Option<&ChoiceListView> {
        self.choice_renders.last()
    }

    /// The most recent item region view, if any render happened.
    #[must_use]
    pub fn last_item_view(&self) -> Option<&ItemListView> {
        self.item_renders.last()
    }
}

impl Surface for RecordingSurface {
    fn set_control_value(&mut self, value: &str) {
        self.call_count += 1;
        self.control_value = value.to_string();
    }

    fn render_choice_region(&mut self, view: &ChoiceListView) {
        self.call_count += 1;
        self.choice_renders.push(view.clone());
    }

    fn render_item_region(&mut self, view: &ItemListView) {
        self.call_count += 1;
        self.item_renders.push(view.clone());
    }

    fn set_highlight(&mut self, index: Option<usize>) {
        self.call_count += 1;
        self.highlight = index;
    }

    fn set_dropdown_open(&mut self, open: bool) {
        self.call_count += 1;
        self.dropdown_open = open;
    }
}
