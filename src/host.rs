//! The environment a [`ThemeSwitcher`](crate::switcher::ThemeSwitcher) drives.
//!
//! A host owns the handles the switcher needs: the document body's class
//! list, the durable storage slot, the toggle control, the dropdown panel
//! and the option controls. Any of those may be missing; a host must turn
//! operations on a missing element into no-ops rather than panicking.
//!
//! Two implementations ship with the crate:
//! - [`MemoryHost`](crate::memory::MemoryHost) for tests and the replay tool
//! - `WebHost` (wasm32 only) over `web-sys`

use thiserror::Error;

/// Storage failures. The switcher logs these and carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("storage is unavailable")]
    StorageUnavailable,

    #[error("failed to read {key} from storage: {reason}")]
    ReadFailed { key: String, reason: String },

    #[error("storage rejected write of {key}: {reason}")]
    WriteRejected { key: String, reason: String },
}

pub trait Host {
    /// Value stored under `key`, `Ok(None)` if the slot is empty.
    fn stored_preference(&self, key: &str) -> Result<Option<String>, HostError>;

    fn store_preference(&mut self, key: &str, value: &str) -> Result<(), HostError>;

    /// Add a class marker to the document body.
    fn add_marker(&mut self, class: &str);

    /// Remove a class marker from the document body. Absent markers are ignored.
    fn remove_marker(&mut self, class: &str);

    /// Show or hide the dropdown panel.
    fn set_panel_open(&mut self, open: bool);

    /// Number of option controls discovered.
    fn option_count(&self) -> usize;

    /// Raw theme attribute of the option at `index`, if the option exists and carries one.
    fn option_theme(&self, index: usize) -> Option<String>;

    fn focus_toggle(&mut self);

    fn focus_option(&mut self, index: usize);
}
