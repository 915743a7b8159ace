//! Floating call-to-action visibility.
//!
//! The floating button appears once the hero's own call-to-action has left
//! the viewport.  Without an anchor it falls back to a scroll threshold.

/// Intersection ratio below which the hero anchor counts as "out of view".
pub const ANCHOR_THRESHOLD: f64 = 0.1;
/// Fallback: show after scrolling this fraction of the viewport height.
pub const FALLBACK_VIEWPORT_FRACTION: f64 = 0.8;
/// Slide distance of the hidden button, host units.
pub const HIDDEN_OFFSET: f64 = 20.0;

/// What decides visibility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CtaTrigger {
    /// Document-relative span of the hero CTA.
    Anchor { top: f64, height: f64 },
    /// No anchor available.
    ScrollFallback,
}

/// Fraction of `[top, top + height)` visible inside the viewport.
pub fn intersection_ratio(top: f64, height: f64, scroll_offset: f64, viewport_height: f64) -> f64 {
    if height <= 0.0 {
        return 0.0;
    }
    let view_top = scroll_offset;
    let view_bottom = scroll_offset + viewport_height;
    let overlap = (top + height).min(view_bottom) - top.max(view_top);
    (overlap.max(0.0) / height).min(1.0)
}

/// Resolved button appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CtaStyle {
    pub opacity: f64,
    pub translate_y: f64,
    /// Hidden buttons must not take clicks.
    pub interactive: bool,
}

#[derive(Debug, Clone)]
pub struct FloatingCta {
    trigger: CtaTrigger,
    visible: bool,
}

impl FloatingCta {
    pub fn new(trigger: CtaTrigger) -> Self {
        Self {
            trigger,
            visible: false,
        }
    }

    /// Re-evaluate visibility.  Returns `true` when it changed.
    pub fn update(&mut self, scroll_offset: f64, viewport_height: f64) -> bool {
        let visible = match self.trigger {
            CtaTrigger::Anchor { top, height } => {
                intersection_ratio(top, height, scroll_offset, viewport_height) < ANCHOR_THRESHOLD
            }
            CtaTrigger::ScrollFallback => {
                scroll_offset > viewport_height * FALLBACK_VIEWPORT_FRACTION
            }
        };
        let changed = visible != self.visible;
        self.visible = visible;
        changed
    }

    pub fn set_trigger(&mut self, trigger: CtaTrigger) {
        self.trigger = trigger;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn style(&self) -> CtaStyle {
        if self.visible {
            CtaStyle {
                opacity: 1.0,
                translate_y: 0.0,
                interactive: true,
            }
        } else {
            CtaStyle {
                opacity: 0.0,
                translate_y: HIDDEN_OFFSET,
                interactive: false,
            }
        }
    }
}
