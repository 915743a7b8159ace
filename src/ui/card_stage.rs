//! Terminal rendering target for the card stack.
//!
//! Each card owns a [`CardSurface`]: the last style the animator committed.
//! The animator writes through a [`SurfaceHandle`]; the [`CardStage`] widget
//! only reads surfaces, so drawing never triggers a recompute.

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};

use crate::core::card::Card;
use crate::core::stack::VisualHandle;
use crate::core::style::CardStyle;

use super::theme::Theme;

// ───────────────────────────────────────── surface ───────────

/// Committed appearance of one card.
#[derive(Debug, Clone)]
pub struct CardSurface {
    pub style: CardStyle,
    pub motion_hint: bool,
}

impl Default for CardSurface {
    fn default() -> Self {
        Self {
            style: CardStyle::HIDDEN_BELOW,
            motion_hint: false,
        }
    }
}

pub type SharedSurface = Rc<RefCell<CardSurface>>;

/// Animator-side handle onto a [`CardSurface`].
#[derive(Debug, Clone)]
pub struct SurfaceHandle(SharedSurface);

impl SurfaceHandle {
    pub fn new(surface: SharedSurface) -> Self {
        Self(surface)
    }
}

impl VisualHandle for SurfaceHandle {
    fn set_transform(&mut self, scale: f64, _x: f64, y: f64) {
        let mut s = self.0.borrow_mut();
        s.style.scale = scale;
        s.style.translate_y = y;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.0.borrow_mut().style.opacity = opacity;
    }

    fn set_blur(&mut self, px: f64) {
        self.0.borrow_mut().style.blur_px = px;
    }

    fn set_brightness(&mut self, brightness: f64) {
        self.0.borrow_mut().style.brightness = brightness;
    }

    fn set_motion_hint(&mut self, active: bool) {
        self.0.borrow_mut().motion_hint = active;
    }

    // One write for the whole style.
    fn apply(&mut self, style: &CardStyle) {
        self.0.borrow_mut().style = *style;
    }
}

// ───────────────────────────────────────── geometry ──────────

/// Blur at which a card's body text is no longer legible.
const ILLEGIBLE_BLUR_PX: f64 = 4.0;
/// Below this opacity a card is not drawn.
const MIN_DRAW_OPACITY: f64 = 0.05;

/// Stage position in signed rows/columns, so it can hang above the page
/// while the capability section scrolls away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageBox {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl From<Rect> for StageBox {
    fn from(r: Rect) -> Self {
        Self {
            x: i32::from(r.x),
            y: i32::from(r.y),
            width: r.width,
            height: r.height,
        }
    }
}

/// Resting rectangle of a card inside the stage, before transforms.
/// Returned as `(x, y, width, height)` relative to the stage.
fn resting_slot(stage: StageBox) -> (f64, f64, f64, f64) {
    let width = (f64::from(stage.width) * 0.7).clamp(24.0, 72.0).min(f64::from(stage.width));
    let height = (f64::from(stage.height) * 0.5).clamp(6.0, 12.0).min(f64::from(stage.height));
    let x = (f64::from(stage.width) - width) / 2.0;
    // Leave headroom above for receded cards.
    let y = (f64::from(stage.height) - height) * 0.6;
    (x, y, width, height)
}

/// Apply a style to the resting slot and clip the result to `bounds`.
pub fn card_rect(stage: StageBox, style: &CardStyle, bounds: Rect) -> Option<Rect> {
    let (x, y, w, h) = resting_slot(stage);
    let sw = (w * style.scale).round();
    let sh = (h * style.scale).round().max(3.0);
    let sx = f64::from(stage.x) + x + (w - sw) / 2.0;
    let sy = f64::from(stage.y) + y + (h - sh) / 2.0 + style.translate_y / 100.0 * h;
    clip(sx.round() as i32, sy.round() as i32, sw as i32, sh as i32, bounds)
}

fn clip(x: i32, y: i32, w: i32, h: i32, bounds: Rect) -> Option<Rect> {
    let left = x.max(i32::from(bounds.x));
    let top = y.max(i32::from(bounds.y));
    let right = (x + w).min(i32::from(bounds.x) + i32::from(bounds.width));
    let bottom = (y + h).min(i32::from(bounds.y) + i32::from(bounds.height));
    if right <= left || bottom <= top {
        return None;
    }
    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Grey level for a given brightness × opacity.
fn shade(level: f64) -> Color {
    let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::Rgb(v, v, v)
}

// ───────────────────────────────────────── widget ────────────

/// Draws every visible card at its committed style, oldest first so the
/// newest card ends up in front.
pub struct CardStage<'a> {
    pub cards: &'a [Card],
    pub surfaces: &'a [SharedSurface],
    /// May extend past `bounds` while scrolling away.
    pub stage: StageBox,
}

impl Widget for CardStage<'_> {
    fn render(self, bounds: Rect, buf: &mut Buffer) {
        for (card, surface) in self.cards.iter().zip(self.surfaces) {
            let style = surface.borrow().style;
            if style.opacity < MIN_DRAW_OPACITY {
                continue;
            }
            let Some(rect) = card_rect(self.stage, &style, bounds) else {
                continue;
            };
            render_card(card, &style, rect, buf);
        }
    }
}

fn render_card(card: &Card, style: &CardStyle, rect: Rect, buf: &mut Buffer) {
    let level = style.brightness * style.opacity;
    let mut text_style = Style::default().fg(shade(level));
    if style.blur_px > 0.5 {
        text_style = text_style.add_modifier(Modifier::DIM);
    }

    Clear.render(rect, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::card_border_style(level))
        .title(Line::from(vec![
            Span::raw(" "),
            Span::raw(card.icon),
            Span::raw(" "),
            Span::styled(card.title, text_style.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
        ]));
    let inner = block.inner(rect);
    block.render(rect, buf);

    if style.blur_px >= ILLEGIBLE_BLUR_PX {
        return;
    }

    let mut lines = vec![Line::from(Span::styled(card.description, text_style))];
    lines.push(Line::raw(""));
    lines.push(Line::from(
        card.tags
            .iter()
            .flat_map(|tag| [Span::styled(format!("[{tag}]"), Theme::tag_style()), Span::raw(" ")])
            .collect::<Vec<_>>(),
    ));
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}
