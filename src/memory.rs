//! In-memory host.
//!
//! Stands in for the page when the switcher runs outside a browser: the
//! body's class list is a set, storage is a map, and focus is tracked as a
//! plain value. Elements can be left out to exercise the missing-markup paths.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::host::{Host, HostError};
use crate::theme::ThemeId;

/// Which control currently has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Toggle,
    Option(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    #[default]
    Available,
    /// No storage at all (e.g. disabled by privacy settings)
    Unavailable,
    /// Reads work, writes are rejected (e.g. quota exceeded)
    ReadOnly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryHost {
    markers: BTreeSet<String>,
    storage: BTreeMap<String, String>,
    storage_mode: StorageMode,
    has_toggle: bool,
    has_panel: bool,
    panel_open: bool,
    /// Theme attribute of each option control, `None` if the attribute is absent
    options: Vec<Option<String>>,
    focus: Option<Focus>,
}

impl MemoryHost {
    /// Page with a toggle, a panel and the given option controls.
    pub fn new(options: Vec<Option<String>>) -> Self {
        Self {
            markers: BTreeSet::new(),
            storage: BTreeMap::new(),
            storage_mode: StorageMode::Available,
            has_toggle: true,
            has_panel: true,
            panel_open: false,
            options,
            focus: None,
        }
    }

    /// Page with one option per theme, in menu order.
    pub fn with_standard_options() -> Self {
        Self::new(
            ThemeId::ALL
                .iter()
                .map(|theme| Some(theme.as_str().to_string()))
                .collect(),
        )
    }

    /// Page with none of the dropdown markup.
    pub fn without_controls() -> Self {
        Self {
            has_toggle: false,
            has_panel: false,
            ..Self::new(Vec::new())
        }
    }

    pub fn with_stored(mut self, key: &str, value: &str) -> Self {
        self.storage.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_marker(mut self, class: &str) -> Self {
        self.markers.insert(class.to_string());
        self
    }

    pub fn storage_unavailable(mut self) -> Self {
        self.storage_mode = StorageMode::Unavailable;
        self
    }

    pub fn read_only_storage(mut self) -> Self {
        self.storage_mode = StorageMode::ReadOnly;
        self
    }

    pub fn without_toggle(mut self) -> Self {
        self.has_toggle = false;
        self
    }

    pub fn without_panel(mut self) -> Self {
        self.has_panel = false;
        self
    }

    /// The same page after a reload: storage and markup survive, everything
    /// the scripts did to the live document does not.
    pub fn reload(&self) -> Self {
        Self {
            markers: BTreeSet::new(),
            panel_open: false,
            focus: None,
            ..self.clone()
        }
    }

    pub fn markers(&self) -> &BTreeSet<String> {
        &self.markers
    }

    pub fn has_marker(&self, class: &str) -> bool {
        self.markers.contains(class)
    }

    /// Theme markers currently on the body.
    pub fn theme_markers(&self) -> Vec<ThemeId> {
        ThemeId::ALL
            .into_iter()
            .filter(|theme| self.has_marker(theme.css_class()))
            .collect()
    }

    pub fn stored(&self, key: &str) -> Option<&str> {
        self.storage.get(key).map(String::as_str)
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::with_standard_options()
    }
}

impl Host for MemoryHost {
    fn stored_preference(&self, key: &str) -> Result<Option<String>, HostError> {
        match self.storage_mode {
            StorageMode::Unavailable => Err(HostError::StorageUnavailable),
            StorageMode::Available | StorageMode::ReadOnly => Ok(self.storage.get(key).cloned()),
        }
    }

    fn store_preference(&mut self, key: &str, value: &str) -> Result<(), HostError> {
        match self.storage_mode {
            StorageMode::Unavailable => Err(HostError::StorageUnavailable),
            StorageMode::ReadOnly => Err(HostError::WriteRejected {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            }),
            StorageMode::Available => {
                self.storage.insert(key.to_string(), value.to_string());
                Ok(())
            }
        }
    }

    fn add_marker(&mut self, class: &str) {
        self.markers.insert(class.to_string());
    }

    fn remove_marker(&mut self, class: &str) {
        self.markers.remove(class);
    }

    fn set_panel_open(&mut self, open: bool) {
        if self.has_panel {
            self.panel_open = open;
        }
    }

    fn option_count(&self) -> usize {
        self.options.len()
    }

    fn option_theme(&self, index: usize) -> Option<String> {
        self.options.get(index).cloned().flatten()
    }

    fn focus_toggle(&mut self) {
        if self.has_toggle {
            self.focus = Some(Focus::Toggle);
        }
    }

    fn focus_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.focus = Some(Focus::Option(index));
        }
    }
}
