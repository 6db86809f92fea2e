//! The theme switcher component.
//!
//! Owns the menu state and drives a [`Host`] in response to UI events.
//! Handlers are split the way a browser delivers them: target handlers on
//! the toggle and option controls run first, then document-level handlers
//! (outside click, Escape) unless the target handler stopped propagation.
//! Window blur has its own handler.

use serde::{Deserialize, Serialize};

use crate::config::SwitcherConfig;
use crate::events::{Dispatch, Key, Target, UiEvent};
use crate::host::Host;
use crate::theme::ThemeId;

/// Open/closed status of the dropdown panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(&self) -> bool {
        matches!(self, MenuState::Open)
    }

    fn flipped(self) -> Self {
        match self {
            MenuState::Closed => MenuState::Open,
            MenuState::Open => MenuState::Closed,
        }
    }
}

/// Component-owned state, for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherState {
    pub menu: MenuState,
    /// Theme restored from storage at init
    pub restored: Option<ThemeId>,
    /// Most recent successful selection
    pub selected: Option<ThemeId>,
}

pub struct ThemeSwitcher<H: Host> {
    host: H,
    storage_key: String,
    menu: MenuState,
    restored: Option<ThemeId>,
    selected: Option<ThemeId>,
}

impl<H: Host> ThemeSwitcher<H> {
    pub fn new(host: H, config: &SwitcherConfig) -> Self {
        Self {
            host,
            storage_key: config.storage_key.clone(),
            menu: MenuState::Closed,
            restored: None,
            selected: None,
        }
    }

    /// Restore the persisted theme, if any. Runs once at page load.
    ///
    /// Markers already on the body are left alone; only the persisted
    /// theme's marker is added.
    pub fn init(&mut self) -> Option<ThemeId> {
        let saved = match self.host.stored_preference(&self.storage_key) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::debug!("No persisted theme available: {}", e);
                None
            }
        };

        let restored = saved.as_deref().and_then(|value| {
            let theme = ThemeId::parse(value);
            if theme.is_none() {
                tracing::debug!("Ignoring unrecognized persisted theme {:?}", value);
            }
            theme
        });

        if let Some(theme) = restored {
            self.host.add_marker(theme.css_class());
            tracing::debug!(%theme, "Restored persisted theme");
        }

        self.restored = restored;
        restored
    }

    /// Toggle control activated.
    pub fn toggle_menu(&mut self) -> Dispatch {
        self.menu = self.menu.flipped();
        self.host.set_panel_open(self.menu.is_open());

        // Keyboard users land directly on the choices
        if self.menu.is_open() && self.host.option_count() > 0 {
            self.host.focus_option(0);
        }

        tracing::debug!(menu = ?self.menu, "Menu toggled");
        Dispatch::stopped()
    }

    /// Option control at `index` activated.
    pub fn select_theme(&mut self, index: usize) -> Dispatch {
        let value = self.host.option_theme(index);
        self.select_value(value.as_deref());
        Dispatch::stopped()
    }

    /// Apply a raw theme value as if an option carrying it was activated.
    /// Returns the applied theme, or `None` if the value was missing or unknown.
    pub fn select_value(&mut self, value: Option<&str>) -> Option<ThemeId> {
        let Some(theme) = value.and_then(ThemeId::parse) else {
            tracing::debug!("Ignoring selection of unrecognized theme {:?}", value);
            return None;
        };

        // Clear before apply so at most one theme marker is ever present
        for other in ThemeId::ALL {
            self.host.remove_marker(other.css_class());
        }
        self.host.add_marker(theme.css_class());

        if let Err(e) = self
            .host
            .store_preference(&self.storage_key, theme.as_str())
        {
            tracing::warn!("Failed to persist theme {}: {}", theme, e);
        }

        self.close();
        self.host.focus_toggle();
        self.selected = Some(theme);

        tracing::debug!(%theme, "Theme selected");
        Some(theme)
    }

    /// Key pressed while the option at `index` has focus.
    pub fn option_key_down(&mut self, index: usize, key: &Key) -> Dispatch {
        if !key.activates() {
            return Dispatch::default();
        }

        // Same path as a click. The click stops its own propagation, not the key event's.
        self.select_theme(index);
        Dispatch {
            propagation_stopped: false,
            default_prevented: true,
        }
    }

    /// Document-level click handler.
    pub fn close_on_outside_interaction(&mut self, target: Target) {
        if !target.is_inside_dropdown() {
            self.close();
        }
    }

    /// Document-level keydown handler.
    pub fn close_on_escape(&mut self, key: &Key) {
        if *key == Key::Escape {
            self.close();
            self.host.focus_toggle();
        }
    }

    /// Window blur handler.
    pub fn close_on_blur(&mut self) {
        self.close();
    }

    /// Handlers attached to the event's target control.
    pub fn on_target(&mut self, event: &UiEvent) -> Dispatch {
        match event {
            UiEvent::Click {
                target: Target::Toggle,
            } => self.toggle_menu(),
            UiEvent::Click {
                target: Target::Option(index),
            } => self.select_theme(*index),
            UiEvent::KeyDown {
                key,
                target: Target::Option(index),
            } => self.option_key_down(*index, key),
            _ => Dispatch::default(),
        }
    }

    /// Handlers attached to the document, reached once the event bubbles up.
    pub fn on_document(&mut self, event: &UiEvent) {
        match event {
            UiEvent::Click { target } => self.close_on_outside_interaction(*target),
            UiEvent::KeyDown { key, .. } => self.close_on_escape(key),
            UiEvent::Blur => {}
        }
    }

    /// Deliver an event through every phase, honoring stopped propagation.
    pub fn dispatch(&mut self, event: &UiEvent) -> Dispatch {
        if let UiEvent::Blur = event {
            self.close_on_blur();
            return Dispatch::default();
        }

        let outcome = self.on_target(event);
        if !outcome.propagation_stopped {
            self.on_document(event);
        }
        outcome
    }

    pub fn menu_state(&self) -> MenuState {
        self.menu
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    pub fn snapshot(&self) -> SwitcherState {
        SwitcherState {
            menu: self.menu,
            restored: self.restored,
            selected: self.selected,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    fn close(&mut self) {
        if self.menu.is_open() {
            tracing::debug!("Menu closed");
        }
        self.menu = MenuState::Closed;
        self.host.set_panel_open(false);
    }
}
