//! Page chrome: navigation bar, scroll progress line, floating CTA.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::app::page::NAV_LINKS;
use crate::core::cta::CtaStyle;

use super::theme::Theme;

/// Top navigation bar: logo, numbered section links, CTA.
pub struct NavBar;

impl Widget for NavBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::nav_style());
        let mut spans = vec![Span::styled(" GREYPILLAR ", Theme::logo_style()), Span::raw("  ")];
        for (i, (label, _)) in NAV_LINKS.iter().enumerate() {
            spans.push(Span::raw(format!("{} {label}   ", i + 1)));
        }
        spans.push(Span::styled(" Get Started ", Theme::cta_style()));
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// One-row page progress indicator.
pub struct ProgressBar {
    /// 0–100.
    pub percent: f64,
    pub over_dark: bool,
}

impl Widget for ProgressBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let style = Theme::progress_style(self.over_dark);
        let filled = ((self.percent.clamp(0.0, 100.0) / 100.0) * f64::from(area.width)).round() as u16;
        let bar: String = (0..area.width)
            .map(|i| if i < filled { '━' } else { '─' })
            .collect();
        let dim = if self.over_dark {
            Theme::dark_section_style()
        } else {
            Theme::light_section_style()
        };
        buf.set_style(area, dim);
        buf.set_string(area.x, area.y, bar, style);
    }
}

/// Floating "Book Strategy Call" button, bottom-right of `area`.
pub struct FloatingCtaButton {
    pub style: CtaStyle,
}

const CTA_LABEL: &str = " Book Strategy Call → ";

impl Widget for FloatingCtaButton {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = CTA_LABEL.chars().count() as u16;
        if !self.style.interactive || self.style.opacity <= 0.0 || area.width < width + 2 || area.height < 3 {
            return;
        }
        let x = area.x + area.width - width - 2;
        let y = area.y + area.height - 2;
        buf.set_string(x, y, CTA_LABEL, Theme::cta_style());
    }
}
