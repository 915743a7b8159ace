//! Whole-page scroll progress and the "over dark section" indicator state.

/// Vertical centre line of the progress indicator, in host units.
pub const INDICATOR_CENTRE: f64 = 30.5;

/// Percent of the document scrolled, in `[0, 100]`.
///
/// A document that fits in the viewport reports 0.
pub fn page_percent(scroll_offset: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if !(scrollable > 0.0) {
        return 0.0;
    }
    let scrolled = scroll_offset.max(0.0);
    (scrolled / scrollable * 100.0).min(100.0)
}

/// Indicator value as written to the host, two decimals.
pub fn format_percent(percent: f64) -> String {
    format!("{percent:.2}")
}

/// A section's rectangle relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionRect {
    pub top: f64,
    pub bottom: f64,
}

impl SectionRect {
    /// Rect of a section at document position `top` with `height`, seen from
    /// `scroll_offset`.
    pub fn in_viewport(top: f64, height: f64, scroll_offset: f64) -> Self {
        let top = top - scroll_offset;
        Self {
            top,
            bottom: top + height,
        }
    }

    pub fn straddles(&self, line: f64) -> bool {
        self.top <= line && self.bottom > line
    }
}

/// Tracks whether the indicator sits over the dark section and reports only
/// transitions, so the host writes its class/colour change once.
#[derive(Debug, Clone, Default)]
pub struct DarkSectionTracker {
    over_dark: bool,
    centre: f64,
}

impl DarkSectionTracker {
    pub fn new(centre: f64) -> Self {
        Self {
            over_dark: false,
            centre,
        }
    }

    /// Feed the dark section's current rect.  Returns `Some(new_state)` when
    /// it changed.
    pub fn update(&mut self, rect: Option<SectionRect>) -> Option<bool> {
        let now_over = rect.is_some_and(|r| r.straddles(self.centre));
        if now_over == self.over_dark {
            return None;
        }
        self.over_dark = now_over;
        Some(now_over)
    }

    pub fn is_over_dark(&self) -> bool {
        self.over_dark
    }
}
