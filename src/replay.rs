//! Event script replay.
//!
//! Runs a recorded or hand-written sequence of UI events against a
//! [`MemoryHost`] and reports where the page ended up. A script is either a
//! bare JSON array of events or an object that also seeds the page:
//!
//! ```json
//! {
//!   "stored": "theme-ocean",
//!   "markers": ["no-js"],
//!   "events": [{"type": "click", "target": "toggle"}]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::config::SwitcherConfig;
use crate::events::{Dispatch, EventQueue, UiEvent};
use crate::memory::{Focus, MemoryHost};
use crate::switcher::{MenuState, ThemeSwitcher};
use crate::theme::ThemeId;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("invalid event script: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Value already in storage when the page loads
    #[serde(default)]
    pub stored: Option<String>,
    /// Classes already on the body when the page loads
    #[serde(default)]
    pub markers: Vec<String>,
    pub events: Vec<UiEvent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScriptFormat {
    Bare(Vec<UiEvent>),
    Full(Script),
}

impl Script {
    pub fn parse(json: &str) -> Result<Self, ScriptError> {
        let script = match serde_json::from_str::<ScriptFormat>(json) {
            Ok(ScriptFormat::Bare(events)) => Script {
                events,
                ..Script::default()
            },
            Ok(ScriptFormat::Full(script)) => script,
            // Untagged errors say nothing useful; report against the full form
            Err(_) => serde_json::from_str::<Script>(json)?,
        };
        Ok(script)
    }
}

/// Where the page ended up after a replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayReport {
    pub restored: Option<ThemeId>,
    pub menu: MenuState,
    pub markers: BTreeSet<String>,
    pub stored: Option<String>,
    pub focus: Option<Focus>,
    pub events_run: usize,
    pub outcomes: Vec<Dispatch>,
}

/// Load a page seeded from the script, run init, then every event in order.
pub fn replay(script: &Script, config: &SwitcherConfig) -> ReplayReport {
    let mut host = MemoryHost::with_standard_options();
    if let Some(stored) = &script.stored {
        host = host.with_stored(&config.storage_key, stored);
    }
    for marker in &script.markers {
        host = host.with_marker(marker);
    }

    let mut switcher = ThemeSwitcher::new(host, config);
    let restored = switcher.init();

    let mut queue = EventQueue::new(switcher);
    queue.extend(script.events.iter().cloned());
    let events_run = queue.run();
    let outcomes = queue.history().iter().map(|(_, outcome)| *outcome).collect();

    let switcher = queue.into_switcher();
    let menu = switcher.menu_state();
    let host = switcher.into_host();

    ReplayReport {
        restored,
        menu,
        markers: host.markers().clone(),
        stored: host.stored(&config.storage_key).map(str::to_string),
        focus: host.focus(),
        events_run,
        outcomes,
    }
}
