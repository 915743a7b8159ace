//! Settings popup: live animation tuning over the page.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::app::settings::SETTINGS_ITEMS;
use crate::app::state::AppState;

use super::theme::Theme;

const POPUP_WIDTH: u16 = 48;
const LABEL_WIDTH: usize = 20;

/// Animation settings overlay. Changes apply to the stack immediately.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl Widget for SettingsPopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Items, the hint line, the key legend and their spacing.
        let height = SETTINGS_ITEMS.len() as u16 + 8;
        let popup = centered_fixed(POPUP_WIDTH, height, area);
        Clear.render(popup, buf);

        let mode = if self.state.is_mobile() { " mobile " } else { " desktop " };
        let block = Block::default()
            .title(Line::styled(" Animation ", Theme::popup_title_style()))
            .title_bottom(Line::styled(mode, Theme::hint_style()).right_aligned())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Theme::popup_border_style());
        let inner = block.inner(popup);
        block.render(popup, buf);

        let selected = self.state.settings_selected;
        let mut lines = vec![Line::raw("")];
        lines.extend(SETTINGS_ITEMS.iter().enumerate().map(|(i, item)| {
            let marker = if i == selected { " ▸ " } else { "   " };
            let value = item.display_value(self.state);
            Line::from(vec![
                Span::styled(
                    format!("{marker}{:<LABEL_WIDTH$}", item.label()),
                    Theme::menu_item_style(i == selected),
                ),
                Span::styled(format!(" {value}"), Theme::menu_value_style(&value)),
            ])
        }));

        lines.push(Line::raw(""));
        if let Some(item) = SETTINGS_ITEMS.get(selected) {
            lines.push(Line::styled(format!("   {}", item.hint()), Theme::hint_style()));
        }
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "   ↑↓ select  Enter/Space change  Esc close",
            Theme::popup_border_style(),
        ));

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

/// A `width` × `height` rectangle centred in `area`, shrunk to fit.
fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
