//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    // ── page ───────────────────────────────────────────────────
    pub fn light_section_style() -> Style {
        Style::default().fg(Color::Black).bg(Color::Rgb(245, 245, 240))
    }

    pub fn dark_section_style() -> Style {
        Style::default().fg(Color::White).bg(Color::Rgb(10, 10, 10))
    }

    pub fn headline_style() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    // ── cards ──────────────────────────────────────────────────
    /// Border fades with the card.
    pub fn card_border_style(level: f64) -> Style {
        let v = (level.clamp(0.0, 1.0) * 200.0).round() as u8 + 40;
        Style::default().fg(Color::Rgb(v, v, v.saturating_add(15)))
    }

    pub fn tag_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::ITALIC)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn nav_style() -> Style {
        Style::default().bg(Color::Rgb(30, 30, 34)).fg(Color::Gray)
    }

    pub fn logo_style() -> Style {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    pub fn progress_style(over_dark: bool) -> Style {
        if over_dark {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Rgb(40, 40, 40))
        }
    }

    pub fn cta_style() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── settings popup ─────────────────────────────────────────
    pub fn popup_border_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }

    pub fn popup_title_style() -> Style {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn menu_item_style(selected: bool) -> Style {
        if selected {
            Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn menu_value_style(value: &str) -> Style {
        match value {
            "on" => Style::default().fg(Color::Green),
            "off" => Style::default().fg(Color::DarkGray),
            _ => Style::default().fg(Color::Yellow),
        }
    }

    pub fn hint_style() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
