//! The stack animator: state, visual handles, and the commit step.
//!
//! [`StackAnimator`] owns one [`StackState`] and one optional handle per card.
//! Each [`render`](StackAnimator::render) recomputes progress and depths from
//! the cached geometry and writes a style to a handle only when it differs
//! from the last one committed to that card.

use super::depth;
use super::geometry::{Geometry, GeometryCache};
use super::style::{style_of, CardStyle, StyleParams};

// ───────────────────────────────────────── handles ───────────

/// Write-only capability onto whatever draws a card.
///
/// The animator calls [`apply`](Self::apply) once per changed card per
/// frame.  The default `apply` forwards to the individual setters; hosts that
/// can write everything at once (a single inline-style assignment, a single
/// struct copy) should override it.
pub trait VisualHandle {
    fn set_transform(&mut self, scale: f64, x: f64, y: f64);
    fn set_opacity(&mut self, opacity: f64);
    fn set_blur(&mut self, px: f64);

    fn set_brightness(&mut self, _brightness: f64) {}

    /// Hint that the card is about to move a lot (CSS `will-change`).
    fn set_motion_hint(&mut self, _active: bool) {}

    fn apply(&mut self, style: &CardStyle) {
        self.set_transform(style.scale, 0.0, style.translate_y);
        self.set_opacity(style.opacity);
        self.set_blur(style.blur_px);
        self.set_brightness(style.brightness);
    }
}

// ───────────────────────────────────────── state ─────────────

/// Everything the animator knows, owned per instance.
#[derive(Debug, Clone, Default)]
pub struct StackState {
    /// Latest absolute document scroll offset.
    pub scroll_offset: f64,
    pub geometry: GeometryCache,
    /// Derived from `scroll_offset` and `geometry` at the last computation.
    pub progress: f64,
    /// Derived per-card depth at the last computation.
    pub depths: Vec<f64>,
    /// Last style written to each card's handle.
    pub committed: Vec<Option<CardStyle>>,
}

impl StackState {
    fn new(card_count: usize) -> Self {
        Self {
            depths: vec![0.0; card_count],
            committed: vec![None; card_count],
            ..Self::default()
        }
    }

    fn invalidate(&mut self) {
        self.committed.iter_mut().for_each(|c| *c = None);
    }
}

// ───────────────────────────────────────── animator ──────────

/// Tuning that can change at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorSettings {
    pub style: StyleParams,
    pub extension_factor: f64,
    pub reduced_motion: bool,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            style: StyleParams::default(),
            extension_factor: 1.0,
            reduced_motion: false,
        }
    }
}

pub struct StackAnimator<H> {
    state: StackState,
    handles: Vec<Option<H>>,
    settings: AnimatorSettings,
    motion_hint: bool,
    writes: u64,
}

impl<H: VisualHandle> StackAnimator<H> {
    pub fn new(card_count: usize, settings: AnimatorSettings) -> Self {
        Self {
            state: StackState::new(card_count),
            handles: (0..card_count).map(|_| None).collect(),
            settings,
            motion_hint: false,
            writes: 0,
        }
    }

    pub fn card_count(&self) -> usize {
        self.handles.len()
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    /// Attach (or replace) the handle for card `index`.  The new handle gets
    /// a full write on the next render.  Out-of-range indices are ignored.
    pub fn attach(&mut self, index: usize, handle: H) -> Option<H> {
        let slot = self.handles.get_mut(index)?;
        self.state.committed[index] = None;
        slot.replace(handle)
    }

    pub fn detach(&mut self, index: usize) -> Option<H> {
        let handle = self.handles.get_mut(index)?.take();
        self.state.committed[index] = None;
        handle
    }

    pub fn detach_all(&mut self) {
        for i in 0..self.handles.len() {
            self.detach(i);
        }
    }

    pub fn handle(&self, index: usize) -> Option<&H> {
        self.handles.get(index)?.as_ref()
    }

    /// Replace the tuning.  Every card is rewritten on the next render.
    pub fn reconfigure(&mut self, settings: AnimatorSettings) {
        if settings != self.settings {
            tracing::debug!(?settings, "animator reconfigured");
            self.settings = settings;
            self.state.invalidate();
        }
    }

    pub fn refresh_geometry(&mut self, geometry: Geometry) -> bool {
        self.state.geometry.refresh(geometry)
    }

    /// Record the latest scroll offset.  Negative or non-finite values are
    /// treated as the top of the document.
    pub fn set_scroll_offset(&mut self, offset: f64) {
        self.state.scroll_offset = if offset.is_finite() { offset.max(0.0) } else { 0.0 };
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn depths(&self) -> &[f64] {
        &self.state.depths
    }

    pub fn committed(&self, index: usize) -> Option<CardStyle> {
        self.state.committed.get(index).copied().flatten()
    }

    /// Total handle writes over the animator's lifetime.
    pub fn total_writes(&self) -> u64 {
        self.writes
    }

    /// Target style for card `index` at the current depths.
    pub fn target_style(&self, index: usize) -> CardStyle {
        if self.settings.reduced_motion {
            return CardStyle::REST;
        }
        let is_last = index + 1 == self.card_count();
        let depth = self.state.depths.get(index).copied().unwrap_or(f64::NEG_INFINITY);
        style_of(depth, is_last, &self.settings.style).quantized()
    }

    /// Recompute progress and depths from the current offset and cache.
    fn compute(&mut self) {
        let progress = self.state.geometry.progress(self.state.scroll_offset);
        self.state.progress = progress;
        self.state.depths =
            depth::all_depths(progress, self.card_count(), self.settings.extension_factor);
    }

    /// Compute and commit.  Returns the number of handle writes performed.
    ///
    /// Until the geometry cache holds a measurement nothing is computed
    /// (except under reduced motion, which needs no geometry).  Cards without
    /// a handle are skipped and retried on the next render.
    pub fn render(&mut self) -> usize {
        if !self.settings.reduced_motion {
            if !self.state.geometry.is_valid() {
                tracing::trace!("render skipped, geometry not measured yet");
                return 0;
            }
            self.compute();
        }

        let mut writes = 0;
        for index in 0..self.card_count() {
            let style = self.target_style(index);
            if self.state.committed[index] == Some(style) {
                continue;
            }
            let Some(handle) = self.handles[index].as_mut() else {
                continue;
            };
            handle.apply(&style);
            self.state.committed[index] = Some(style);
            writes += 1;
        }

        if writes > 0 {
            tracing::trace!(progress = self.state.progress, writes, "stack committed");
        }
        self.writes += writes as u64;
        writes
    }

    /// Forward a motion hint to every attached handle, on transition only.
    /// Returns `true` when the hint changed.
    pub fn set_motion_hint(&mut self, active: bool) -> bool {
        if self.motion_hint == active {
            return false;
        }
        self.motion_hint = active;
        for handle in self.handles.iter_mut().flatten() {
            handle.set_motion_hint(active);
        }
        true
    }
}
