//! Interactive demo host and entry point.
//!
//! This module provides a thin reference host around the tagbox library: a
//! stdin-driven loop that translates typed commands into [`PickerEvent`]s,
//! executes the returned effects, and paints renders to stdout.
//!
//! # Architecture
//!
//! The host plays the role a browser shim or TUI would:
//!
//! ```text
//! ┌─────────────────────────┐
//! │  stdin commands         │  ← "type oa", "down", "enter", ...
//! └─────────────────────────┘
//!             │
//! ┌─────────────────────────┐
//! │  DemoHost               │  ← event mapping, timers, input mirror
//! │   └ PickerRegistry      │
//! │      └ Picker<Stdout…>  │  ← library layer
//! └─────────────────────────┘
//!             │
//! ┌─────────────────────────┐
//! │  stdout                 │  ← rendered regions, notices, effects
//! └─────────────────────────┘
//! ```
//!
//! # Timer Simulation
//!
//! The library never owns a clock, so the search debounce becomes a
//! recorded pending timer here. `tick` delivers it once its due time has
//! passed; `fire` delivers it immediately.
//!
//! # Commands
//!
//! - `type <text>`: Set the input text (schedules a search on selects)
//! - `enter` / `esc` / `up` / `down` / `backspace` / `selectall`
//! - `focus` / `blur`
//! - `choice <id>` / `item <id>`: Click a rendered choice or item
//! - `paste <text>`: Paste into the input
//! - `tick` / `fire`: Deliver the pending search timer
//! - `value` / `state`: Inspect the picker
//! - `help` / `quit`
//!
//! # Configuration
//!
//! Attributes come from `key=value` arguments:
//!
//! ```text
//! tagbox control_type=select-one max_items=3 trace_level=debug
//! ```

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use tagbox::observability::init_tracing;
use tagbox::render::{ChoiceListView, ChoiceView, ItemListView};
use tagbox::{
    handle_event, Config, ControlId, ControlSpec, Effect, PickerEvent, PickerRegistry,
    SourceChoice, SourceGroup, Surface,
};

/// A search timer armed by the library, waiting for `tick` or `fire`.
struct PendingSearch {
    token: u64,
    due_at_ms: i64,
}

/// Paints rendered views as plain text.
struct StdoutSurface;

impl Surface for StdoutSurface {
    fn set_control_value(&mut self, value: &str) {
        println!("value: {value:?}");
    }

    fn render_choice_region(&mut self, view: &ChoiceListView) {
        println!("choices:");
        match view {
            ChoiceListView::Grouped { groups } => {
                for group in groups {
                    println!("  [{}]", group.label);
                    for choice in &group.choices {
                        print_choice(choice);
                    }
                }
            }
            ChoiceListView::Flat { choices } => {
                for choice in choices {
                    print_choice(choice);
                }
            }
            ChoiceListView::Placeholder { message, .. } => {
                println!("  ({message})");
            }
        }
    }

    fn render_item_region(&mut self, view: &ItemListView) {
        if view.items.is_empty() {
            println!("items: (none)");
            return;
        }
        println!("items:");
        for item in &view.items {
            let marker = if item.selected { " *" } else { "" };
            println!("  {:>2}: {}{marker}", item.id, item.label);
        }
    }

    fn set_highlight(&mut self, index: Option<usize>) {
        match index {
            Some(index) => println!("highlight: row {index}"),
            None => println!("highlight: none"),
        }
    }

    fn set_dropdown_open(&mut self, open: bool) {
        println!("dropdown: {}", if open { "open" } else { "closed" });
    }
}

fn print_choice(view: &ChoiceView) {
    let suffix = if view.disabled { " (disabled)" } else { "" };
    println!("  {:>2}: {}{suffix}", view.id, format_label(view));
}

/// Marks matched spans with brackets, so `oak` searched with `oa`
/// prints as `[oa]k`.
fn format_label(view: &ChoiceView) -> String {
    if view.highlight_ranges.is_empty() {
        return view.label.clone();
    }
    let mut out = String::new();
    for (i, ch) in view.label.chars().enumerate() {
        if view.highlight_ranges.iter().any(|&(start, _)| start == i) {
            out.push('[');
        }
        out.push(ch);
        if view.highlight_ranges.iter().any(|&(_, end)| end == i + 1) {
            out.push(']');
        }
    }
    out
}

/// Owns the registry, the host-side input mirror, and the simulated timer.
struct DemoHost {
    registry: PickerRegistry<StdoutSurface>,
    control: ControlId,
    input: String,
    pending_search: Option<PendingSearch>,
}

impl DemoHost {
    fn new(control: ControlId) -> Self {
        Self {
            registry: PickerRegistry::new(),
            control,
            input: String::new(),
            pending_search: None,
        }
    }

    fn enhance(&mut self, spec: &ControlSpec, config: Config) -> tagbox::Result<()> {
        let picker = self.registry.enhance(spec, config, StdoutSurface)?;
        picker.observe(Box::new(|notice| println!("notice: {:?}", notice.event)));
        Ok(())
    }

    /// Routes an event through the library and executes what comes back.
    fn dispatch(&mut self, event: &PickerEvent) {
        let effects = {
            let Some(picker) = self.registry.get_mut(&self.control) else {
                eprintln!("control {} is not enhanced", self.control);
                return;
            };
            match handle_event(picker, event) {
                Ok((needs_render, effects)) => {
                    if needs_render {
                        picker.render();
                    }
                    effects
                }
                Err(err) => {
                    tracing::error!(error = %err, "event handling failed");
                    Vec::new()
                }
            }
        };

        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Performs one host-side effect.
    ///
    /// Arming a search timer replaces any previous one, matching the
    /// contract hosts are expected to honor.
    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleSearch { token, delay_ms } => {
                let due_at_ms = chrono::Utc::now()
                    .timestamp_millis()
                    .saturating_add(i64::try_from(delay_ms).unwrap_or(i64::MAX));
                self.pending_search = Some(PendingSearch { token, due_at_ms });
                println!("(search timer armed: token {token}, {delay_ms}ms)");
            }
            Effect::ScrollToHighlight { index } => {
                println!("(scroll to row {index})");
            }
            Effect::ClearInput => {
                self.input.clear();
                println!("(input cleared)");
            }
            Effect::SetInput { value } => {
                println!("(input set to {value:?})");
                self.input = value;
            }
        }
    }

    /// Delivers the pending timer if its due time has passed.
    fn tick(&mut self) {
        let Some(pending) = self.pending_search.take() else {
            println!("(no timer armed)");
            return;
        };
        if chrono::Utc::now().timestamp_millis() < pending.due_at_ms {
            println!("(timer not due yet, try 'fire')");
            self.pending_search = Some(pending);
            return;
        }
        self.dispatch(&PickerEvent::SearchTimerFired {
            token: pending.token,
        });
    }

    /// Delivers the pending timer regardless of its due time.
    fn fire(&mut self) {
        let Some(pending) = self.pending_search.take() else {
            println!("(no timer armed)");
            return;
        };
        self.dispatch(&PickerEvent::SearchTimerFired {
            token: pending.token,
        });
    }

    fn show_state(&self) {
        let Some(picker) = self.registry.get(&self.control) else {
            return;
        };
        let state = picker.state();
        println!("items: {:?}", state.item_values());
        println!("active choices: {}", state.active_choices().len());
        println!("search: {:?}", picker.search);
        println!("highlight: {:?}", picker.highlight);
        println!("input: {:?}", self.input);
    }

    /// Handles one command line; returns false to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        match command {
            "" => {}
            "type" => {
                self.input = rest.to_string();
                self.dispatch(&PickerEvent::ValueInput {
                    value: rest.to_string(),
                });
            }
            "enter" => self.dispatch(&PickerEvent::EnterPressed),
            "esc" => self.dispatch(&PickerEvent::EscapePressed),
            "up" => self.dispatch(&PickerEvent::ArrowUp),
            "down" => self.dispatch(&PickerEvent::ArrowDown),
            "backspace" => self.dispatch(&PickerEvent::BackspacePressed),
            "selectall" => self.dispatch(&PickerEvent::SelectAllPressed),
            "focus" => self.dispatch(&PickerEvent::Focused),
            "blur" => self.dispatch(&PickerEvent::Blurred),
            "choice" => match rest.parse::<u64>() {
                Ok(choice_id) => self.dispatch(&PickerEvent::ChoiceClicked { choice_id }),
                Err(_) => println!("usage: choice <id>"),
            },
            "item" => match rest.parse::<u64>() {
                Ok(item_id) => self.dispatch(&PickerEvent::ItemClicked { item_id }),
                Err(_) => println!("usage: item <id>"),
            },
            "paste" => self.dispatch(&PickerEvent::Pasted {
                text: rest.to_string(),
            }),
            "tick" => self.tick(),
            "fire" => self.fire(),
            "value" => {
                if let Some(picker) = self.registry.get(&self.control) {
                    println!("{}", picker.value());
                }
            }
            "state" => self.show_state(),
            "help" => print_help(),
            "quit" | "exit" => return false,
            other => println!("unknown command {other:?}, try 'help'"),
        }
        true
    }

    fn run(&mut self) -> tagbox::Result<()> {
        println!("tagbox demo - 'help' lists commands");
        prompt()?;

        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            if !self.handle_line(line.trim()) {
                break;
            }
            prompt()?;
        }
        Ok(())
    }
}

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

fn print_help() {
    println!("commands:");
    println!("  type <text>     set the input text");
    println!("  enter/esc/up/down/backspace/selectall");
    println!("  focus/blur      focus lifecycle");
    println!("  choice <id>     click a choice");
    println!("  item <id>       click an item");
    println!("  paste <text>    paste into the input");
    println!("  tick/fire       deliver the pending search timer");
    println!("  value/state     inspect the picker");
    println!("  quit");
}

fn demo_spec(control_type: String) -> ControlSpec {
    ControlSpec::new(
        "demo".to_string(),
        control_type,
        vec![
            SourceGroup::new(
                "Broadleaf",
                vec![
                    SourceChoice::new("oak"),
                    SourceChoice::new("elm"),
                    SourceChoice::labeled("beech", "Common Beech"),
                ],
            ),
            SourceGroup::new(
                "Conifer",
                vec![SourceChoice::new("fir"), SourceChoice::new("yew")],
            ),
        ],
        vec![SourceChoice::new("bamboo")],
    )
}

fn main() -> tagbox::Result<()> {
    let attributes: BTreeMap<String, String> = std::env::args()
        .skip(1)
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
        })
        .collect();

    let config = Config::from_attributes(&attributes);
    init_tracing(&config);

    let control_type = attributes
        .get("control_type")
        .cloned()
        .unwrap_or_else(|| "select-multiple".to_string());
    tracing::debug!(control_type = %control_type, "starting demo host");

    let spec = demo_spec(control_type);
    let mut host = DemoHost::new(ControlId::new(spec.control_id.clone()));
    host.enhance(&spec, config)?;

    host.run()
}
