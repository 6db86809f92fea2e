//! Theme Switcher
//!
//! An accessible dropdown for picking a page theme.
//!
//! This library provides:
//! - A fixed set of theme identifiers applied as body class markers
//! - Persistence of the chosen theme in local storage, restored on load
//! - Open/close handling: toggle, outside click, Escape, window blur
//! - Keyboard activation and focus management for the menu options
//! - A browser binding (wasm32) and an in-memory host for native use
//! - A Dioxus component rendering the expected markup

// =============================================================================
// Lints - Enforce code quality and consistency
// =============================================================================

// Deny truly dangerous patterns (these will fail the build)
// wasm-bindgen expands to unsafe FFI glue, so the wasm build is exempt
#![cfg_attr(not(target_arch = "wasm32"), deny(unsafe_code))]
#![deny(unused_must_use)]

pub mod config;
pub mod events;
pub mod host;
pub mod markup;
pub mod memory;
pub mod replay;
pub mod switcher;
pub mod theme;

// Browser-only binding (excluded from native builds)
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::SwitcherConfig;
pub use events::{Dispatch, EventQueue, Key, Target, UiEvent};
pub use host::{Host, HostError};
pub use memory::MemoryHost;
pub use switcher::{MenuState, ThemeSwitcher};
pub use theme::ThemeId;
