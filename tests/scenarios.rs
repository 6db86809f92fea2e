//! End-to-end scenarios for the theme switcher.
//!
//! Each test builds an in-memory page, loads the switcher, and drives it
//! through the event queue the same way a browser would deliver events.
//!
//! Run with: cargo test --test scenarios

use theme_switcher::memory::{Focus, MemoryHost};
use theme_switcher::{
    EventQueue, Key, MenuState, SwitcherConfig, Target, ThemeId, ThemeSwitcher, UiEvent,
};

const KEY: &str = "preferredTheme";

fn load(host: MemoryHost) -> EventQueue<MemoryHost> {
    let mut switcher = ThemeSwitcher::new(host, &SwitcherConfig::default());
    switcher.init();
    EventQueue::new(switcher)
}

fn click(target: Target) -> UiEvent {
    UiEvent::Click { target }
}

fn key(key: &str, target: Target) -> UiEvent {
    UiEvent::KeyDown {
        key: Key::from_dom(key),
        target,
    }
}

fn option_index(theme: ThemeId) -> usize {
    ThemeId::ALL
        .iter()
        .position(|t| *t == theme)
        .expect("theme is in ALL")
}

// =============================================================================
// Load
// =============================================================================

#[test]
fn empty_storage_loads_without_marker() {
    let queue = load(MemoryHost::with_standard_options());

    assert!(queue.switcher().host().markers().is_empty());
    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
}

#[test]
fn stored_ocean_loads_exactly_ocean() {
    let queue = load(MemoryHost::with_standard_options().with_stored(KEY, "theme-ocean"));

    let host = queue.switcher().host();
    assert_eq!(host.theme_markers(), vec![ThemeId::Ocean]);
    assert_eq!(host.markers().len(), 1);
}

#[test]
fn corrupt_storage_is_treated_as_no_preference() {
    for value in ["", "dark", "theme-OCEAN", "theme-ocean ", "{\"theme\":1}"] {
        let queue = load(MemoryHost::with_standard_options().with_stored(KEY, value));
        assert!(
            queue.switcher().host().markers().is_empty(),
            "value {:?} should be ignored",
            value
        );
    }
}

#[test]
fn page_without_markup_still_restores_theme() {
    let mut queue = load(MemoryHost::without_controls().with_stored(KEY, "theme-night"));

    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Night]);

    // Nothing to bind to, but nothing may panic either
    queue.extend([
        click(Target::Toggle),
        click(Target::Option(0)),
        key("Escape", Target::Page),
        UiEvent::Blur,
    ]);
    assert_eq!(queue.run(), 4);
    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Night]);
    assert_eq!(queue.switcher().host().focus(), None);
}

// =============================================================================
// Selection
// =============================================================================

#[test]
fn selecting_any_theme_leaves_exactly_that_marker() {
    for theme in ThemeId::ALL {
        // Start from a page carrying every other marker to prove they get cleared
        let mut host = MemoryHost::with_standard_options();
        for other in ThemeId::ALL {
            if other != theme {
                host = host.with_marker(other.css_class());
            }
        }
        let mut queue = load(host);

        queue.fire(click(Target::Toggle));
        queue.fire(click(Target::Option(option_index(theme))));

        let host = queue.switcher().host();
        assert_eq!(host.theme_markers(), vec![theme], "selecting {}", theme);
        assert_eq!(host.stored(KEY), Some(theme.as_str()));
    }
}

#[test]
fn click_on_sand_updates_marker_storage_menu_and_focus() {
    let mut queue = load(MemoryHost::with_standard_options().with_stored(KEY, "theme-teal"));
    queue.fire(click(Target::Toggle));
    assert!(queue.switcher().is_open());

    let outcome = queue.fire(click(Target::Option(option_index(ThemeId::Sand))));

    assert!(outcome.propagation_stopped);
    let switcher = queue.switcher();
    assert_eq!(switcher.host().theme_markers(), vec![ThemeId::Sand]);
    assert_eq!(switcher.host().stored(KEY), Some("theme-sand"));
    assert_eq!(switcher.menu_state(), MenuState::Closed);
    assert!(!switcher.host().panel_open());
    assert_eq!(switcher.host().focus(), Some(Focus::Toggle));
}

#[test]
fn invalid_option_changes_nothing() {
    let host = MemoryHost::new(vec![
        Some("theme-ocean".to_string()),
        Some("theme-lavender".to_string()),
        None,
    ])
    .with_stored(KEY, "theme-ocean");
    let mut queue = load(host);
    queue.fire(click(Target::Toggle));
    let before = queue.switcher().host().clone();

    queue.fire(click(Target::Option(1)));
    queue.fire(click(Target::Option(2)));

    assert_eq!(queue.switcher().menu_state(), MenuState::Open);
    assert_eq!(queue.switcher().host(), &before);
}

#[test]
fn selection_survives_reload() {
    for theme in ThemeId::ALL {
        let mut queue = load(MemoryHost::with_standard_options());
        queue.fire(click(Target::Toggle));
        queue.fire(click(Target::Option(option_index(theme))));

        let reloaded = queue.into_switcher().into_host().reload();
        let queue = load(reloaded);

        assert_eq!(queue.switcher().host().theme_markers(), vec![theme]);
        assert_eq!(queue.switcher().snapshot().restored, Some(theme));
    }
}

// =============================================================================
// Keyboard
// =============================================================================

#[test]
fn enter_and_space_on_option_select_and_prevent_default() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Option(0)));

    let outcome = queue.fire(key("Enter", Target::Option(3)));
    assert!(outcome.default_prevented);
    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Ocean]);
    assert!(!queue.switcher().is_open());

    queue.fire(click(Target::Toggle));
    let outcome = queue.fire(key(" ", Target::Option(1)));
    assert!(outcome.default_prevented);
    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Coral]);
    assert_eq!(queue.switcher().host().stored(KEY), Some("theme-coral"));
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Toggle));
}

#[test]
fn other_keys_on_option_do_nothing() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));

    let outcome = queue.fire(key("ArrowDown", Target::Option(2)));

    assert!(!outcome.default_prevented);
    assert!(queue.switcher().is_open());
    assert!(queue.switcher().host().markers().is_empty());
}

#[test]
fn escape_closes_open_menu_and_focuses_toggle() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));

    queue.fire(key("Escape", Target::Option(4)));

    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
    assert!(!queue.switcher().host().panel_open());
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Toggle));
}

// =============================================================================
// Closing
// =============================================================================

#[test]
fn toggle_click_does_not_reclose_the_menu() {
    let mut queue = load(MemoryHost::with_standard_options());

    let outcome = queue.fire(click(Target::Toggle));

    assert!(outcome.propagation_stopped);
    assert!(queue.switcher().is_open());
    assert!(queue.switcher().host().panel_open());
}

#[test]
fn toggle_twice_closes() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.extend([click(Target::Toggle), click(Target::Toggle)]);
    queue.run();
    assert!(!queue.switcher().is_open());
}

#[test]
fn click_inside_dropdown_keeps_menu_open() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));

    queue.fire(click(Target::Dropdown));

    assert!(queue.switcher().is_open());
}

#[test]
fn click_outside_closes_menu() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));

    queue.fire(click(Target::Page));

    assert!(!queue.switcher().is_open());
    // Outside clicks never move focus
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Option(0)));
}

#[test]
fn outside_click_when_closed_is_a_no_op() {
    let mut queue = load(MemoryHost::with_standard_options().with_stored(KEY, "theme-sand"));
    let before = queue.switcher().host().clone();

    queue.fire(click(Target::Page));
    queue.fire(click(Target::Page));

    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
    assert_eq!(queue.switcher().host(), &before);
}

#[test]
fn window_blur_closes_without_focus_change() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.fire(click(Target::Toggle));

    queue.fire(UiEvent::Blur);

    assert!(!queue.switcher().is_open());
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Option(0)));
}

#[test]
fn events_run_in_order_one_at_a_time() {
    let mut queue = load(MemoryHost::with_standard_options());
    queue.extend([
        click(Target::Toggle),
        click(Target::Option(5)),
        click(Target::Toggle),
        key("Escape", Target::Page),
    ]);
    assert_eq!(queue.pending(), 4);

    assert_eq!(queue.run(), 4);
    assert_eq!(queue.pending(), 0);

    let history = queue.history();
    assert_eq!(history.len(), 4);
    assert_eq!(history[1].0, click(Target::Option(5)));
    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Night]);
    assert!(!queue.switcher().is_open());
}

#[test]
fn custom_storage_key_is_used() {
    let config = SwitcherConfig {
        storage_key: "siteTheme".to_string(),
        ..SwitcherConfig::default()
    };
    let host = MemoryHost::with_standard_options().with_stored("siteTheme", "theme-coral");
    let mut switcher = ThemeSwitcher::new(host, &config);

    assert_eq!(switcher.init(), Some(ThemeId::Coral));
    switcher.select_theme(0);

    assert_eq!(switcher.host().stored("siteTheme"), Some("theme-teal"));
    assert_eq!(switcher.host().stored(KEY), None);
}

// =============================================================================
// Partial markup
// =============================================================================

#[test]
fn missing_panel_still_tracks_menu_and_applies_selection() {
    let mut queue = load(MemoryHost::with_standard_options().without_panel());

    queue.fire(click(Target::Toggle));

    assert_eq!(queue.switcher().menu_state(), MenuState::Open);
    assert!(!queue.switcher().host().panel_open());
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Option(0)));

    queue.fire(click(Target::Option(option_index(ThemeId::Coral))));

    let host = queue.switcher().host();
    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
    assert_eq!(host.theme_markers(), vec![ThemeId::Coral]);
    assert_eq!(host.stored(KEY), Some("theme-coral"));
    assert_eq!(host.focus(), Some(Focus::Toggle));
}

#[test]
fn missing_toggle_still_selects_and_closes_without_focus() {
    let mut queue = load(MemoryHost::with_standard_options().without_toggle());

    queue.fire(click(Target::Option(option_index(ThemeId::Sunset))));

    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
    assert_eq!(queue.switcher().host().theme_markers(), vec![ThemeId::Sunset]);
    assert_eq!(queue.switcher().host().stored(KEY), Some("theme-sunset"));
    assert_eq!(queue.switcher().host().focus(), None);

    queue.fire(key("Escape", Target::Page));

    assert_eq!(queue.switcher().menu_state(), MenuState::Closed);
    assert_eq!(queue.switcher().host().focus(), None);
    assert_eq!(queue.switcher().host().stored(KEY), Some("theme-sunset"));
}

#[test]
fn missing_toggle_escape_closes_open_menu_and_leaves_focus() {
    let mut queue = load(MemoryHost::with_standard_options().without_toggle());
    queue.fire(click(Target::Toggle));
    assert!(queue.switcher().is_open());

    queue.fire(key("Escape", Target::Option(0)));

    assert!(!queue.switcher().is_open());
    assert!(!queue.switcher().host().panel_open());
    // Nothing to send focus back to
    assert_eq!(queue.switcher().host().focus(), Some(Focus::Option(0)));
}
