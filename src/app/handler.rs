//! Input handling: maps key/mouse events to state mutations.
//!
//! Handlers only move the scroll target or flip settings.  The stack is
//! never recomputed here; that waits for the next frame.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind};

use super::page::NAV_LINKS;
use super::settings::SETTINGS_ITEMS;
use super::state::{ActiveView, AppState};

/// Rows per mouse wheel notch.
const WHEEL_ROWS: f64 = 3.0;

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    match state.active_view {
        ActiveView::Page => handle_page_key(state, key, now),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
    }
}

fn handle_page_key(state: &mut AppState, key: KeyEvent, now: Instant) {
    let page_rows = state.page.viewport_height;
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char('?') => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        KeyCode::Up | KeyCode::Char('k') => state.scroll_by(-1.0, now, true),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_by(1.0, now, true),
        KeyCode::PageUp => state.scroll_by(-page_rows, now, true),
        KeyCode::PageDown | KeyCode::Char(' ') => state.scroll_by(page_rows, now, true),
        KeyCode::Home | KeyCode::Char('g') => state.scroll_to(0.0, now, true),
        KeyCode::End | KeyCode::Char('G') => {
            let end = state.page.max_scroll();
            state.scroll_to(end, now, true);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(&(_, kind)) = NAV_LINKS.get(index) {
                state.jump_to_section(kind, now);
            }
        }
        _ => {}
    }
}

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
            state.active_view = ActiveView::Page;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                item.activate(state);
                state.status_message = Some(format!("{} updated", item.label()));
            }
        }
        _ => {}
    }
}

/// Wheel scrolling moves the page immediately, like a browser.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, now: Instant) {
    if state.active_view != ActiveView::Page {
        return;
    }
    match mouse.kind {
        MouseEventKind::ScrollDown => state.scroll_by(WHEEL_ROWS, now, false),
        MouseEventKind::ScrollUp => state.scroll_by(-WHEEL_ROWS, now, false),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::page::SectionKind;
    use crate::config::AnimatorConfig;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn wheel(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn state() -> AppState {
        AppState::new(AnimatorConfig::default(), 100, 30, false)
    }

    #[test]
    fn wheel_scrolls_immediately_without_computing() {
        let mut s = state();
        let now = Instant::now();
        s.on_frame(now);
        assert!(!s.driver.has_pending_frame());

        handle_mouse(&mut s, wheel(MouseEventKind::ScrollDown), now);
        assert_eq!(s.scroll_offset(), WHEEL_ROWS);
        assert!(s.driver.has_pending_frame());
    }

    #[test]
    fn wheel_up_at_top_stays_at_top() {
        let mut s = state();
        handle_mouse(&mut s, wheel(MouseEventKind::ScrollUp), Instant::now());
        assert_eq!(s.scroll_offset(), 0.0);
    }

    #[test]
    fn number_keys_target_nav_sections() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('3')), Instant::now());
        assert_eq!(s.scroll.target(), s.page.section(SectionKind::Capabilities).top);
    }

    #[test]
    fn settings_menu_toggles_mobile_preview() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('?')), Instant::now());
        assert_eq!(s.active_view, ActiveView::SettingsMenu);

        // Mobile Preview is session-only, so nothing is written to disk.
        handle_key(&mut s, key(KeyCode::Down), Instant::now());
        handle_key(&mut s, key(KeyCode::Down), Instant::now());
        assert_eq!(SETTINGS_ITEMS[s.settings_selected].label(), "Mobile Preview");
        handle_key(&mut s, key(KeyCode::Enter), Instant::now());
        assert!(s.force_mobile);
        assert!(!s.driver.animator().settings().style.blur_enabled);

        handle_key(&mut s, key(KeyCode::Esc), Instant::now());
        assert_eq!(s.active_view, ActiveView::Page);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut s = state();
        s.active_view = ActiveView::SettingsMenu;
        let mut k = key(KeyCode::Char('c'));
        k.modifiers = KeyModifiers::CONTROL;
        handle_key(&mut s, k, Instant::now());
        assert!(s.should_quit);
    }
}
