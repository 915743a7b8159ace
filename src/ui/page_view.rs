//! Renders the visible slice of the virtual page, including the sticky
//! capability stage.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::app::page::{PageLayout, SectionKind};
use crate::core::card::Card;

use super::card_stage::{CardStage, SharedSurface, StageBox};
use super::theme::Theme;

pub struct PageView<'a> {
    pub page: &'a PageLayout,
    pub scroll_offset: f64,
    pub cards: &'a [Card],
    pub surfaces: &'a [SharedSurface],
}

impl Widget for PageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let scroll = self.scroll_offset.round();
        for section in &self.page.sections {
            let top = section.top - scroll;
            let bottom = section.bottom() - scroll;
            if bottom <= 0.0 || top >= f64::from(area.height) {
                continue;
            }
            let y0 = top.max(0.0) as u16;
            let y1 = bottom.min(f64::from(area.height)) as u16;
            let band = Rect::new(area.x, area.y + y0, area.width, y1 - y0);

            let style = if section.kind.is_dark() {
                Theme::dark_section_style()
            } else {
                Theme::light_section_style()
            };
            buf.set_style(band, style);

            // Headline sits two rows below the section top; skip it once scrolled off.
            let headline_row = top + 2.0;
            if headline_row >= 0.0 && headline_row + 2.0 < f64::from(area.height) {
                let text_area = Rect::new(
                    area.x + 2,
                    area.y + headline_row as u16,
                    area.width.saturating_sub(4),
                    y1.saturating_sub(headline_row as u16).min(4),
                );
                Paragraph::new(vec![
                    Line::styled(section.kind.title(), Theme::headline_style()),
                    Line::raw(section.kind.body()),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(text_area, buf);
            }

            if section.kind == SectionKind::Hero {
                self.render_hero_cta(area, buf, scroll);
            }
        }

        let stage_row = self.page.stage_row(scroll);
        if stage_row < f64::from(area.height) && stage_row + self.page.viewport_height > 0.0 {
            CardStage {
                cards: self.cards,
                surfaces: self.surfaces,
                stage: StageBox {
                    x: i32::from(area.x),
                    y: i32::from(area.y) + stage_row as i32,
                    width: area.width,
                    height: self.page.viewport_height as u16,
                },
            }
            .render(area, buf);
        }
    }
}

impl PageView<'_> {
    fn render_hero_cta(&self, area: Rect, buf: &mut Buffer, scroll: f64) {
        let (top, _) = self.page.hero_cta();
        let row = top + 1.0 - scroll;
        if row < 0.0 || row >= f64::from(area.height) {
            return;
        }
        let label = " Find My Revenue Leaks ↗ ";
        let width = label.chars().count() as u16;
        if area.width <= width {
            return;
        }
        let x = area.x + (area.width - width) / 2;
        buf.set_string(x, area.y + row as u16, label, Theme::cta_style());
    }
}
