//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::path::PathBuf;
use std::rc::Rc;
use std::time::Instant;

use crate::config::{config_path, AnimatorConfig, CELL_WIDTH_PX};
use crate::core::{
    card::{self, Card},
    cta::{CtaTrigger, FloatingCta},
    depth::DepthPhase,
    driver::{FrameReport, StackDriver},
    page_progress::{self, DarkSectionTracker},
};
use crate::ui::card_stage::{SharedSurface, SurfaceHandle};
use crate::ui::smooth_scroll::SmoothScroll;

use super::page::{PageLayout, SectionKind};

/// Rows taken by the nav bar, progress line and status bar.
pub const CHROME_ROWS: u16 = 3;
/// Keyboard scroll easing per frame.
const EASE_SPEED: f64 = 0.25;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Page,
    SettingsMenu,
}

/// Top-level application state.
pub struct AppState {
    pub config: AnimatorConfig,
    /// Where settings changes are persisted.
    pub config_path: PathBuf,
    /// Static card content, fixed for the session.
    pub cards: Vec<Card>,
    /// What the stage draws; written only by the animator.
    pub surfaces: Vec<SharedSurface>,
    pub driver: StackDriver<SurfaceHandle>,
    pub page: PageLayout,
    pub scroll: SmoothScroll,
    /// Terminal width converted to pixels for the mobile breakpoint.
    pub viewport_width_px: u32,
    /// Preview the mobile constants regardless of terminal width.
    pub force_mobile: bool,
    pub page_percent: f64,
    pub dark_tracker: DarkSectionTracker,
    pub cta: FloatingCta,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
}

impl AppState {
    /// Build the page for a terminal of `cols` × `rows`, attach a surface per
    /// card and mount the stack.
    pub fn new(config: AnimatorConfig, cols: u16, rows: u16, force_mobile: bool) -> Self {
        let cards = card::capabilities();
        let page = PageLayout::build(page_rows(rows), cards.len());
        let viewport_width_px = u32::from(cols) * CELL_WIDTH_PX;

        let effective = effective_width(&config, viewport_width_px, force_mobile);
        let mut driver = StackDriver::new(
            cards.len(),
            config.animator_settings(effective),
            config.driver_timing(),
        );
        let surfaces: Vec<SharedSurface> = cards.iter().map(|_| SharedSurface::default()).collect();
        for (i, surface) in surfaces.iter().enumerate() {
            driver.attach(i, SurfaceHandle::new(Rc::clone(surface)));
        }
        driver.mount(page.stack_geometry(), 0.0);

        let (cta_top, cta_height) = page.hero_cta();
        let mut state = Self {
            config,
            config_path: config_path(),
            cards,
            surfaces,
            driver,
            page,
            scroll: SmoothScroll::new(EASE_SPEED),
            viewport_width_px,
            force_mobile,
            page_percent: 0.0,
            dark_tracker: DarkSectionTracker::new(0.5),
            cta: FloatingCta::new(CtaTrigger::Anchor {
                top: cta_top,
                height: cta_height,
            }),
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
        };
        state.update_page_chrome();
        state
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll.current()
    }

    /// Scroll by `delta` rows.  Smooth scrolls ease over the next frames;
    /// otherwise the offset moves now.
    pub fn scroll_by(&mut self, delta: f64, now: Instant, smooth: bool) {
        let target = self.scroll.target() + delta;
        self.scroll_to(target, now, smooth);
    }

    pub fn scroll_to(&mut self, target: f64, now: Instant, smooth: bool) {
        let target = self.page.clamp_scroll(target);
        if smooth {
            self.scroll.set_target(target);
        } else {
            self.scroll.jump_to(target);
            self.notify_scroll(now);
        }
    }

    pub fn jump_to_section(&mut self, kind: SectionKind, now: Instant) {
        let top = self.page.section(kind).top;
        self.scroll_to(top, now, true);
    }

    /// Deliver the current offset to everything that listens to scrolling.
    fn notify_scroll(&mut self, now: Instant) {
        self.driver.on_scroll(self.scroll.current(), now);
        self.update_page_chrome();
    }

    fn update_page_chrome(&mut self) {
        let offset = self.scroll.current();
        self.page_percent = page_progress::page_percent(
            offset,
            self.page.document_height,
            self.page.viewport_height,
        );
        if let Some(over) = self.dark_tracker.update(self.page.dark_rect(offset)) {
            tracing::trace!(over, "progress indicator over dark section");
        }
        self.cta.update(offset, self.page.viewport_height);
    }

    /// Terminal resized: relayout now, hand the new geometry to the
    /// (debounced) stack.
    pub fn on_resize(&mut self, cols: u16, rows: u16, now: Instant) {
        self.page = PageLayout::build(page_rows(rows), self.cards.len());
        let (top, height) = self.page.hero_cta();
        self.cta.set_trigger(CtaTrigger::Anchor { top, height });

        let width_px = u32::from(cols) * CELL_WIDTH_PX;
        let crossed = self.config.is_mobile(width_px) != self.config.is_mobile(self.viewport_width_px);
        self.viewport_width_px = width_px;
        if crossed {
            self.apply_config();
        }

        let clamped = self.page.clamp_scroll(self.scroll.current());
        self.scroll.jump_to(clamped);
        self.driver.on_resize(self.page.stack_geometry(), now);
        self.notify_scroll(now);
    }

    /// Frame boundary: advance easing, then let the stack run.
    pub fn on_frame(&mut self, now: Instant) -> FrameReport {
        if self.scroll.tick().is_some() {
            self.notify_scroll(now);
        }
        self.driver.on_frame(now)
    }

    /// Push the current config into the running stack.
    pub fn apply_config(&mut self) {
        let width = effective_width(&self.config, self.viewport_width_px, self.force_mobile);
        self.driver
            .reconfigure(self.config.animator_settings(width), self.config.driver_timing());
    }

    /// Persist the config, reporting failures in the status bar.
    pub fn save_config(&mut self) {
        if let Err(err) = self.config.save_to(&self.config_path) {
            tracing::warn!(%err, "could not save config");
            self.status_message = Some(format!("config not saved: {err}"));
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.config
            .is_mobile(effective_width(&self.config, self.viewport_width_px, self.force_mobile))
    }

    /// Cards currently on screen, by depth phase.
    pub fn visible_cards(&self) -> usize {
        let animator = self.driver.animator();
        let cap = animator.settings().style.stack_cap;
        let last = animator.card_count().saturating_sub(1);
        animator
            .depths()
            .iter()
            .enumerate()
            .filter(|&(i, &depth)| DepthPhase::classify(depth, cap, i == last).is_visible())
            .count()
    }

    /// `true` while the motion hint is up on any card.
    pub fn motion_active(&self) -> bool {
        self.surfaces.iter().any(|s| s.borrow().motion_hint)
    }

    /// Release the stack before the terminal goes away.
    pub fn shutdown(&mut self) {
        self.driver.unmount();
    }
}

/// Page viewport height for a terminal of `rows`.
pub fn page_rows(rows: u16) -> u16 {
    rows.saturating_sub(CHROME_ROWS).max(1)
}

fn effective_width(config: &AnimatorConfig, width_px: u32, force_mobile: bool) -> u32 {
    if force_mobile {
        width_px.min(config.mobile_breakpoint_px.saturating_sub(1))
    } else {
        width_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state() -> (AppState, Instant) {
        let mut s = AppState::new(AnimatorConfig::default(), 120, 33, false);
        let t0 = Instant::now();
        s.on_frame(t0);
        (s, t0)
    }

    #[test]
    fn first_frame_shows_front_card() {
        let (s, _) = state();
        assert_eq!(s.surfaces[0].borrow().style, crate::core::style::CardStyle::REST);
        assert!(!s.surfaces[1].borrow().style.is_visible());
    }

    #[test]
    fn scrolling_through_section_moves_cards() {
        let (mut s, t0) = state();
        let caps = s.page.section(SectionKind::Capabilities);
        s.scroll_to(caps.top + s.page.stack_geometry().scrollable_height() / 2.0, t0, false);
        s.on_frame(t0 + Duration::from_millis(16));
        assert!((s.driver.animator().progress() - 0.5).abs() < 1e-9);
        assert!(s.surfaces[0].borrow().style.blur_px > 0.0);
        assert!(s.motion_active());
        assert!(s.cta.is_visible());
        assert_eq!(s.visible_cards(), 4);
    }

    #[test]
    fn smooth_scroll_reaches_target_over_frames() {
        let (mut s, t0) = state();
        s.scroll_by(30.0, t0, true);
        assert_eq!(s.scroll_offset(), 0.0);
        for i in 1..200 {
            s.on_frame(t0 + Duration::from_millis(16 * i));
        }
        assert_eq!(s.scroll_offset(), 30.0);
    }

    #[test]
    fn forced_mobile_switches_constants() {
        let mut s = AppState::new(AnimatorConfig::default(), 200, 40, true);
        assert!(s.is_mobile());
        assert!(!s.driver.animator().settings().style.blur_enabled);
        s.force_mobile = false;
        s.apply_config();
        assert!(s.driver.animator().settings().style.blur_enabled);
    }

    #[test]
    fn shutdown_stops_frames() {
        let (mut s, t0) = state();
        s.shutdown();
        s.scroll_by(50.0, t0, false);
        assert!(!s.on_frame(t0 + Duration::from_millis(16)).ran);
    }
}
