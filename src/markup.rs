//! Dropdown markup for Dioxus pages.
//!
//! The switcher renders nothing itself; it binds to whatever markup is on
//! the page. This component produces markup that satisfies the default
//! [`SwitcherConfig`] contract.

use dioxus::prelude::*;

use crate::config::SwitcherConfig;
use crate::theme::ThemeId;

#[derive(Props, Clone, PartialEq)]
pub struct ThemeDropdownProps {
    /// Text of the toggle button
    #[props(default = "Theme".to_string())]
    pub label: String,
}

/// Toggle button plus a hidden panel with one button per theme.
#[component]
pub fn ThemeDropdown(props: ThemeDropdownProps) -> Element {
    let config = SwitcherConfig::default();

    rsx! {
        div { class: "theme-dropdown",
            button {
                id: "{config.toggle_id}",
                r#type: "button",
                "aria-haspopup": "true",
                "aria-controls": "{config.menu_id}",
                "{props.label}"
            }
            div {
                id: "{config.menu_id}",
                class: "theme-menu",
                role: "menu",
                for theme in ThemeId::ALL {
                    button {
                        key: "{theme}",
                        r#type: "button",
                        role: "menuitem",
                        "data-theme": theme.as_str(),
                        {theme.label()}
                    }
                }
            }
        }
    }
}
