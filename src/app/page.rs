//! Virtual page model: the marketing funnel laid out in terminal rows.
//!
//! The preview scrolls a document taller than the terminal, exactly like a
//! browser page.  Section positions are recomputed whenever the viewport
//! height changes; the capability section is the stack animator's container.

use crate::core::geometry::Geometry;
use crate::core::page_progress::SectionRect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Problem,
    Capabilities,
    Solution,
    Results,
}

impl SectionKind {
    pub const ALL: &'static [SectionKind] = &[
        SectionKind::Hero,
        SectionKind::Problem,
        SectionKind::Capabilities,
        SectionKind::Solution,
        SectionKind::Results,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Hero => "Your Business is Leaking Revenue.",
            SectionKind::Problem => "The Silent Killers of Growth",
            SectionKind::Capabilities => "How We Work",
            SectionKind::Solution => "We Don't Sell AI. We Engineer Revenue.",
            SectionKind::Results => "Ready to Stop the Revenue Leak?",
        }
    }

    pub fn body(self) -> &'static str {
        match self {
            SectionKind::Hero => {
                "We Build the AI Systems to Stop It. No huge upfront investment. \
                 No complex tech to manage. Just results."
            }
            SectionKind::Problem => {
                "You feel it, don't you? The nagging sense that you're leaving money on the table."
            }
            SectionKind::Capabilities => {
                "Four critical domains where AI can stop revenue leaks and create a \
                 foundation for scalable growth."
            }
            SectionKind::Solution => {
                "Audit. Blueprint. Guarantee. A measurable revenue win in 30 days, \
                 or you don't pay."
            }
            SectionKind::Results => "Book a free strategy call to discover your biggest opportunity.",
        }
    }

    /// Sections rendered on a dark background.
    pub fn is_dark(self) -> bool {
        matches!(self, SectionKind::Solution)
    }
}

/// Navigation entries, in header order.
pub const NAV_LINKS: &[(&str, SectionKind)] = &[
    ("Problem", SectionKind::Problem),
    ("Solution", SectionKind::Solution),
    ("How We Work", SectionKind::Capabilities),
    ("Results", SectionKind::Results),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Positions of every section for one viewport height.
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub sections: Vec<Section>,
    pub viewport_height: f64,
    pub document_height: f64,
}

/// Rows between the hero top and its call-to-action button.
const HERO_CTA_OFFSET: f64 = 6.0;
const HERO_CTA_HEIGHT: f64 = 3.0;

impl PageLayout {
    /// Lay out the page for a viewport `viewport_rows` tall holding
    /// `card_count` capability cards.
    pub fn build(viewport_rows: u16, card_count: usize) -> Self {
        let vh = f64::from(viewport_rows.max(1));
        let mut top = 0.0;
        let sections = SectionKind::ALL
            .iter()
            .map(|&kind| {
                let height = match kind {
                    SectionKind::Hero => vh.max(12.0),
                    SectionKind::Problem => (vh * 0.6).max(8.0).round(),
                    // Pinned for `card_count + 1` viewports of scrolling.
                    SectionKind::Capabilities => vh * (card_count as f64 + 1.0),
                    SectionKind::Solution => (vh * 0.8).max(8.0).round(),
                    SectionKind::Results => (vh * 0.6).max(8.0).round(),
                };
                let section = Section { kind, top, height };
                top += height;
                section
            })
            .collect();
        Self {
            sections,
            viewport_height: vh,
            document_height: top,
        }
    }

    pub fn section(&self, kind: SectionKind) -> Section {
        self.sections
            .iter()
            .copied()
            .find(|s| s.kind == kind)
            .unwrap_or(Section {
                kind,
                top: 0.0,
                height: 0.0,
            })
    }

    /// Largest meaningful scroll offset.
    pub fn max_scroll(&self) -> f64 {
        (self.document_height - self.viewport_height).max(0.0)
    }

    pub fn clamp_scroll(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_scroll())
    }

    /// Animator geometry for the capability container.
    pub fn stack_geometry(&self) -> Geometry {
        let caps = self.section(SectionKind::Capabilities);
        Geometry::new(self.viewport_height, caps.top, caps.height)
    }

    /// Document span of the hero call-to-action (`top`, `height`).
    pub fn hero_cta(&self) -> (f64, f64) {
        let hero = self.section(SectionKind::Hero);
        (hero.top + HERO_CTA_OFFSET.min(hero.height - HERO_CTA_HEIGHT), HERO_CTA_HEIGHT)
    }

    /// The dark section's rect relative to the viewport.
    pub fn dark_rect(&self, scroll_offset: f64) -> Option<SectionRect> {
        self.sections
            .iter()
            .find(|s| s.kind.is_dark())
            .map(|s| SectionRect::in_viewport(s.top, s.height, scroll_offset))
    }

    /// Viewport row where the sticky capability stage starts (may be
    /// negative once the section scrolls away).
    pub fn stage_row(&self, scroll_offset: f64) -> f64 {
        let caps = self.section(SectionKind::Capabilities);
        let pinned_until = caps.bottom() - self.viewport_height - scroll_offset;
        (caps.top - scroll_offset).max(0.0).min(pinned_until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_contiguous() {
        let page = PageLayout::build(30, 4);
        let mut top = 0.0;
        for s in &page.sections {
            assert_eq!(s.top, top);
            top = s.bottom();
        }
        assert_eq!(page.document_height, top);
    }

    #[test]
    fn stack_container_scrolls_card_count_viewports() {
        let page = PageLayout::build(20, 4);
        let g = page.stack_geometry();
        assert_eq!(g.container_height, 100.0);
        assert_eq!(g.scrollable_height(), 80.0);
    }

    #[test]
    fn stage_pins_then_scrolls_away() {
        let page = PageLayout::build(20, 4);
        let caps = page.section(SectionKind::Capabilities);

        assert_eq!(page.stage_row(caps.top - 5.0), 5.0);
        assert_eq!(page.stage_row(caps.top + 40.0), 0.0);
        let past = caps.bottom() - 20.0 + 3.0;
        assert_eq!(page.stage_row(past), -3.0);
    }

    #[test]
    fn hero_cta_sits_inside_hero() {
        let page = PageLayout::build(10, 4);
        let (top, height) = page.hero_cta();
        let hero = page.section(SectionKind::Hero);
        assert!(top >= hero.top && top + height <= hero.bottom());
    }

    #[test]
    fn resizing_changes_stack_geometry() {
        let small = PageLayout::build(20, 4).stack_geometry();
        let tall = PageLayout::build(40, 4).stack_geometry();
        assert_ne!(small.scrollable_height(), tall.scrollable_height());
    }
}
