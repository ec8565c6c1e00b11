//! Display-ready view structures handed to the surface.
//!
//! The renderer folds a state snapshot plus the transient view inputs into
//! these types. They are plain data with class names already attached, so a
//! surface only maps them onto its native widgets (DOM nodes, terminal rows)
//! without consulting state or config.

/// The choice region in one of its three shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceListView {
    /// Group headings with their member choices. Produced only outside of
    /// search, when active groups exist.
    Grouped { groups: Vec<GroupView> },
    /// A flat run of choices, rank-ordered while a search is active.
    Flat { choices: Vec<ChoiceView> },
    /// Nothing to show; `message` distinguishes an empty search result from
    /// an exhausted pool.
    Placeholder { message: String, class: String },
}

/// One group heading plus its visible choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub id: u64,
    pub label: String,
    pub class: String,
    pub choices: Vec<ChoiceView>,
}

/// One selectable row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceView {
    pub id: u64,
    pub value: String,
    pub label: String,
    pub disabled: bool,
    pub class: String,
    /// Half-open byte ranges of `label` matched by the active query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// The item region: everything currently picked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemListView {
    pub class: String,
    pub items: Vec<ItemView>,
}

/// One picked entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: u64,
    pub value: String,
    pub label: String,
    pub selected: bool,
    pub class: String,
}
