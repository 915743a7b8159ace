//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use super::state::AppState;

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Boolean toggle; reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        hint: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        hint: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Toggle { label, .. } | Self::Cycle { label, .. } => label,
        }
    }

    /// One-line explanation shown under the menu for the selected item.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Toggle { hint, .. } | Self::Cycle { hint, .. } => hint,
        }
    }

    /// Current value as shown next to the label.
    pub fn display_value(&self, state: &AppState) -> String {
        match self {
            Self::Toggle { get, .. } => (if get(state) { "on" } else { "off" }).to_string(),
            Self::Cycle { value, .. } => value(state),
        }
    }

    /// Toggle or advance the item, then push the change to the stack.
    pub fn activate(&self, state: &mut AppState) {
        match self {
            Self::Toggle { get, set, .. } => {
                let current = get(state);
                set(state, !current);
            }
            Self::Cycle { cycle, .. } => cycle(state),
        }
        state.apply_config();
    }
}

const EXTENSION_STEPS: &[f64] = &[0.5, 0.75, 1.0];
const STACK_CAP_STEPS: &[usize] = &[2, 3, 4];

/// Next entry after `current` in `steps`, wrapping; the first entry if
/// `current` is not one of them.
fn next_step<T: Copy + PartialEq>(steps: &[T], current: T) -> T {
    let pos = steps.iter().position(|&s| s == current);
    match pos {
        Some(i) => steps[(i + 1) % steps.len()],
        None => steps[0],
    }
}

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Toggle {
        label: "Reduced Motion",
        hint: "Show every card at rest, no animation",
        get: |s| s.config.reduced_motion,
        set: |s, v| {
            s.config.reduced_motion = v;
            s.save_config();
        },
    },
    SettingsItem::Toggle {
        label: "Depth Blur",
        hint: "Blur cards as they recede",
        get: |s| s.config.blur_enabled,
        set: |s, v| {
            s.config.blur_enabled = v;
            s.save_config();
        },
    },
    SettingsItem::Toggle {
        label: "Mobile Preview",
        hint: "Use the narrow-screen constants (this session)",
        get: |s| s.force_mobile,
        // Session-only: not persisted.
        set: |s, v| s.force_mobile = v,
    },
    SettingsItem::Cycle {
        label: "Extension Factor",
        hint: "Scroll room after the last card arrives",
        value: |s| format!("{:.2}", s.config.extension_factor),
        cycle: |s| {
            s.config.extension_factor = next_step(EXTENSION_STEPS, s.config.extension_factor);
            s.save_config();
        },
    },
    SettingsItem::Cycle {
        label: "Stack Depth",
        hint: "Levels a card recedes before it pins",
        value: |s| s.config.max_visible_stack_cards.to_string(),
        cycle: |s| {
            s.config.max_visible_stack_cards =
                next_step(STACK_CAP_STEPS, s.config.max_visible_stack_cards);
            s.save_config();
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnimatorConfig;

    #[test]
    fn steps_wrap_around() {
        assert_eq!(next_step(EXTENSION_STEPS, 1.0), 0.5);
        assert_eq!(next_step(EXTENSION_STEPS, 0.5), 0.75);
        assert_eq!(next_step(STACK_CAP_STEPS, 7), 2);
    }

    #[test]
    fn persisted_items_write_the_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(AnimatorConfig::default(), 120, 30, false);
        state.config_path = dir.path().join("config.toml");

        let reduced = &SETTINGS_ITEMS[0];
        assert_eq!(reduced.label(), "Reduced Motion");
        reduced.activate(&mut state);
        let depth = &SETTINGS_ITEMS[4];
        depth.activate(&mut state);

        assert!(state.status_message.is_none());
        assert!(state.driver.animator().settings().reduced_motion);
        let saved = AnimatorConfig::load_from(&state.config_path);
        assert!(saved.reduced_motion);
        assert_eq!(saved.max_visible_stack_cards, 4);
        assert_eq!(reduced.display_value(&state), "on");
    }

    #[test]
    fn every_item_has_a_hint() {
        assert!(SETTINGS_ITEMS.iter().all(|item| !item.hint().is_empty()));
    }
}
