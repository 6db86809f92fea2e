//! UI events and the run-to-completion event queue.
//!
//! Events mirror what a browser delivers to the widget: clicks, key presses
//! and window blur. They serialize with a `type` tag so event scripts can be
//! written as JSON:
//!
//! ```json
//! [
//!   {"type": "click", "target": "toggle"},
//!   {"type": "key_down", "key": "Enter", "target": {"option": 2}},
//!   {"type": "blur"}
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::host::Host;
use crate::switcher::ThemeSwitcher;

/// Where an event landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The toggle control
    Toggle,
    /// An option control, by position in the menu
    Option(usize),
    /// Inside the dropdown container but not on a control
    Dropdown,
    /// Anywhere else on the page
    #[default]
    Page,
}

impl Target {
    /// Whether the target sits inside the dropdown container (toggle + panel).
    pub fn is_inside_dropdown(&self) -> bool {
        !matches!(self, Target::Page)
    }
}

/// Keyboard key, using DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Key::Enter,
            " " => Key::Space,
            "Escape" => Key::Escape,
            other => Key::Other(other.to_string()),
        }
    }

    pub fn as_dom(&self) -> &str {
        match self {
            Key::Enter => "Enter",
            Key::Space => " ",
            Key::Escape => "Escape",
            Key::Other(key) => key,
        }
    }

    /// Keys that activate a focused option.
    pub fn activates(&self) -> bool {
        matches!(self, Key::Enter | Key::Space)
    }
}

impl From<String> for Key {
    fn from(key: String) -> Self {
        Key::from_dom(&key)
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.as_dom().to_string()
    }
}

/// Event types the switcher reacts to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Click {
        #[serde(default)]
        target: Target,
    },
    KeyDown {
        key: Key,
        #[serde(default)]
        target: Target,
    },
    /// The window lost focus
    Blur,
}

/// What the handlers asked the event source to do with the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dispatch {
    pub propagation_stopped: bool,
    pub default_prevented: bool,
}

impl Dispatch {
    pub fn stopped() -> Self {
        Self {
            propagation_stopped: true,
            default_prevented: false,
        }
    }
}

/// Single-threaded event source: one event is dispatched to completion
/// before the next is taken off the queue.
pub struct EventQueue<H: Host> {
    switcher: ThemeSwitcher<H>,
    pending: VecDeque<UiEvent>,
    history: Vec<(UiEvent, Dispatch)>,
}

impl<H: Host> EventQueue<H> {
    pub fn new(switcher: ThemeSwitcher<H>) -> Self {
        Self {
            switcher,
            pending: VecDeque::new(),
            history: Vec::new(),
        }
    }

    pub fn push(&mut self, event: UiEvent) {
        self.pending.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = UiEvent>) {
        self.pending.extend(events);
    }

    /// Number of events waiting to be dispatched
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Drain the queue. Returns how many events were dispatched.
    pub fn run(&mut self) -> usize {
        let mut count = 0;
        while let Some(event) = self.pending.pop_front() {
            let outcome = self.switcher.dispatch(&event);
            tracing::trace!(?event, ?outcome, "Event dispatched");
            self.history.push((event, outcome));
            count += 1;
        }
        count
    }

    /// Push one event and run it (plus anything queued before it).
    pub fn fire(&mut self, event: UiEvent) -> Dispatch {
        self.push(event);
        self.run();
        self.history
            .last()
            .map(|(_, outcome)| *outcome)
            .unwrap_or_default()
    }

    /// Every dispatched event with its outcome, oldest first.
    pub fn history(&self) -> &[(UiEvent, Dispatch)] {
        &self.history
    }

    pub fn switcher(&self) -> &ThemeSwitcher<H> {
        &self.switcher
    }

    pub fn into_switcher(self) -> ThemeSwitcher<H> {
        self.switcher
    }
}
