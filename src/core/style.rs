//! Depth → visual style.
//!
//! A pure function of `(depth, is_last)` and the tuning constants.  The
//! piecewise policy:
//!
//! * `depth <= -1`: below the viewport, transparent.
//! * `-1 < depth < 0`: sliding up from below, fading in linearly.
//! * `0 <= depth`: receding. scale shrinks to `stack_scale` by
//!   `scale_saturation`, the card moves up by a per-level stacking offset plus
//!   a parallax term, blur and dimming grow.  Everything holds once depth
//!   reaches the stack cap.
//! * The last card has nothing stacking in front of it, so it stays at the
//!   front until the cap, then fades out over one unit of depth.

use std::fmt;

/// Percent of card height a hidden card sits below its resting slot.
const ENTER_TRAVEL: f64 = 100.0;
/// Percent of card height the last card rises while exiting.
const EXIT_TRAVEL: f64 = 40.0;
/// Style comparisons ignore differences below this resolution.
const QUANTUM: f64 = 1e-3;

/// Tuning constants consumed by [`style_of`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleParams {
    /// Scale floor for receded cards.
    pub stack_scale: f64,
    /// Depth at which scale reaches `stack_scale`.
    pub scale_saturation: f64,
    /// Upward offset per stack level, percent of card height.
    pub y_offset_per_level: f64,
    /// Continuous upward drift per unit of depth, percent of card height.
    pub parallax_factor: f64,
    /// Depth where recession stops increasing.
    pub stack_cap: usize,
    pub blur_per_level: f64,
    pub max_blur_px: f64,
    pub blur_enabled: bool,
    /// Brightness lost per unit of depth.
    pub dim_per_level: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            stack_scale: 0.9,
            scale_saturation: 1.5,
            y_offset_per_level: 4.0,
            parallax_factor: 2.0,
            stack_cap: 3,
            blur_per_level: 3.0,
            max_blur_px: 8.0,
            blur_enabled: true,
            dim_per_level: 0.15,
        }
    }
}

/// Everything the animator writes to a card, as one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub scale: f64,
    /// Vertical translation, percent of card height.  Negative is up.
    pub translate_y: f64,
    pub opacity: f64,
    pub blur_px: f64,
    /// 1.0 is untouched; lower values dim the card.
    pub brightness: f64,
}

impl CardStyle {
    /// Front-most, crisp, in its resting slot.  Also the reduced-motion style.
    pub const REST: CardStyle = CardStyle {
        scale: 1.0,
        translate_y: 0.0,
        opacity: 1.0,
        blur_px: 0.0,
        brightness: 1.0,
    };

    /// Not yet entered.
    pub const HIDDEN_BELOW: CardStyle = CardStyle {
        scale: 1.0,
        translate_y: ENTER_TRAVEL,
        opacity: 0.0,
        blur_px: 0.0,
        brightness: 1.0,
    };

    /// Exited off the top.
    pub const HIDDEN_ABOVE: CardStyle = CardStyle {
        scale: 1.0,
        translate_y: -ENTER_TRAVEL,
        opacity: 0.0,
        blur_px: 0.0,
        brightness: 1.0,
    };

    /// Round every component to a fixed resolution so that float noise
    /// does not count as a change.
    pub fn quantized(self) -> Self {
        let q = |v: f64| (v / QUANTUM).round() * QUANTUM;
        Self {
            scale: q(self.scale),
            translate_y: q(self.translate_y),
            opacity: q(self.opacity),
            blur_px: q(self.blur_px),
            brightness: q(self.brightness),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// Combined transform, e.g. `translate3d(0, -6.5%, 0) scale(0.95)`.
    pub fn transform(&self) -> String {
        format!(
            "translate3d(0, {:.3}%, 0) scale({:.4})",
            self.translate_y, self.scale
        )
    }

    /// Combined filter, e.g. `blur(3.0px) brightness(0.85)`.
    pub fn filter(&self) -> String {
        format!("blur({:.2}px) brightness({:.3})", self.blur_px, self.brightness)
    }
}

/// Inline-style declaration block, so a web host can write everything in a
/// single assignment.
impl fmt::Display for CardStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transform: {}; opacity: {:.3}; filter: {}",
            self.transform(),
            self.opacity,
            self.filter()
        )
    }
}

/// Linear scale curve: 1.0 at depth 0, `stack_scale` from `saturation` on.
pub fn scale_at(depth: f64, params: &StyleParams) -> f64 {
    if depth <= 0.0 {
        return 1.0;
    }
    let t = if params.scale_saturation > 0.0 {
        (depth / params.scale_saturation).min(1.0)
    } else {
        1.0
    };
    1.0 - (1.0 - params.stack_scale) * t
}

/// Upward translation of a receded card (positive value, percent).
///
/// The per-level term eases between whole levels so adjacent cards never
/// share an offset; the parallax term is linear in depth.  Both stop at the
/// stack cap.
fn recession_offset(depth: f64, params: &StyleParams) -> f64 {
    let level = depth.clamp(0.0, params.stack_cap as f64);
    let whole = level.floor();
    let frac = level - whole;
    let eased = frac * frac * (3.0 - 2.0 * frac);
    params.y_offset_per_level * (whole + eased) + params.parallax_factor * level
}

pub fn blur_at(depth: f64, params: &StyleParams) -> f64 {
    if !params.blur_enabled || depth <= 0.0 {
        return 0.0;
    }
    let level = depth.min(params.stack_cap as f64);
    (params.blur_per_level * level).min(params.max_blur_px).max(0.0)
}

/// Opacity policy.  Entering cards fade in linearly; only the last card fades
/// out, over the unit of depth past the cap.
pub fn opacity_at(depth: f64, is_last: bool, params: &StyleParams) -> f64 {
    let cap = params.stack_cap as f64;
    if depth <= -1.0 {
        0.0
    } else if depth < 0.0 {
        depth + 1.0
    } else if is_last && depth > cap {
        (1.0 - (depth - cap)).max(0.0)
    } else {
        1.0
    }
}

/// Compute the full style for a card at `depth`.
pub fn style_of(depth: f64, is_last: bool, params: &StyleParams) -> CardStyle {
    let cap = params.stack_cap as f64;

    if !depth.is_finite() || depth <= -1.0 {
        return CardStyle::HIDDEN_BELOW;
    }

    if depth < 0.0 {
        return CardStyle {
            translate_y: -depth * ENTER_TRAVEL,
            opacity: opacity_at(depth, is_last, params),
            ..CardStyle::REST
        };
    }

    if is_last {
        if depth <= cap {
            return CardStyle::REST;
        }
        if depth >= cap + 1.0 {
            return CardStyle::HIDDEN_ABOVE;
        }
        return CardStyle {
            translate_y: -(depth - cap) * EXIT_TRAVEL,
            opacity: opacity_at(depth, is_last, params),
            ..CardStyle::REST
        };
    }

    let level = depth.min(cap);
    CardStyle {
        scale: scale_at(depth, params),
        translate_y: -recession_offset(depth, params),
        opacity: 1.0,
        blur_px: blur_at(depth, params),
        brightness: (1.0 - params.dim_per_level * level).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params() -> StyleParams {
        StyleParams::default()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn scale_is_monotonic_then_flat() {
        let p = params();
        let mut prev = f64::INFINITY;
        for step in 0..=400 {
            let depth = -1.0 + step as f64 * 0.02;
            let s = style_of(depth, false, &p).scale;
            assert!(s <= prev + 1e-12, "scale rose at depth {depth}");
            if depth >= p.scale_saturation {
                assert!(close(s, p.stack_scale));
            }
            prev = s;
        }
    }

    #[rstest]
    #[case(-0.99)]
    #[case(-0.75)]
    #[case(-0.5)]
    #[case(-0.1)]
    fn entering_fades_in_linearly(#[case] depth: f64) {
        let style = style_of(depth, false, &params());
        assert!(close(style.opacity, depth + 1.0));
        assert_eq!(style.blur_px, 0.0);
        assert!(style.translate_y > 0.0);
    }

    #[test]
    fn entering_fade_boundaries() {
        let p = params();
        assert_eq!(style_of(-1.0, false, &p).opacity, 0.0);
        assert_eq!(style_of(0.0, false, &p), CardStyle::REST);
    }

    #[test]
    fn front_card_is_crisp() {
        let style = style_of(0.0, false, &params());
        assert_eq!(style.scale, 1.0);
        assert_eq!(style.blur_px, 0.0);
        assert_eq!(style.opacity, 1.0);
    }

    #[test]
    fn recession_pins_at_cap() {
        let p = params();
        let at_cap = style_of(3.0, false, &p);
        assert_eq!(style_of(5.0, false, &p), at_cap);
        assert_eq!(style_of(50.0, false, &p), at_cap);
        assert!(at_cap.blur_px <= p.max_blur_px);
        assert_eq!(at_cap.opacity, 1.0);
    }

    #[test]
    fn blur_grows_and_caps() {
        let p = params();
        let mut prev = 0.0;
        for step in 0..=60 {
            let depth = step as f64 * 0.1;
            let b = style_of(depth, false, &p).blur_px;
            assert!(b >= prev);
            assert!(b <= p.max_blur_px);
            prev = b;
        }
        assert_eq!(blur_at(10.0, &p), p.max_blur_px);
    }

    #[test]
    fn blur_can_be_disabled() {
        let p = StyleParams {
            blur_enabled: false,
            ..params()
        };
        assert_eq!(style_of(2.0, false, &p).blur_px, 0.0);
    }

    #[test]
    fn translation_recedes_upward_continuously() {
        let p = params();
        let mut prev = 0.0;
        for step in 1..=300 {
            let depth = step as f64 * 0.01;
            let y = style_of(depth, false, &p).translate_y;
            assert!(y < prev, "translate did not move up at depth {depth}");
            // Continuity: no jumps bigger than a small step.
            assert!((y - prev).abs() < 0.5);
            prev = y;
        }
    }

    #[rstest]
    #[case(3.0, 1.0)]
    #[case(3.25, 0.75)]
    #[case(3.5, 0.5)]
    #[case(4.0, 0.0)]
    #[case(9.0, 0.0)]
    fn last_card_exits_past_cap(#[case] depth: f64, #[case] opacity: f64) {
        assert!(close(style_of(depth, true, &params()).opacity, opacity));
    }

    #[test]
    fn only_last_card_reaches_zero_through_exit() {
        let p = params();
        for step in 0..=400 {
            let depth = step as f64 * 0.01;
            assert_eq!(style_of(depth, false, &p).opacity, 1.0);
        }
    }

    #[test]
    fn last_card_stays_front_until_cap() {
        let p = params();
        for depth in [0.0, 0.5, 1.5, 2.0, 3.0] {
            assert_eq!(style_of(depth, true, &p), CardStyle::REST);
        }
    }

    #[test]
    fn not_yet_entered_is_transparent() {
        let p = params();
        assert_eq!(style_of(-3.0, false, &p), CardStyle::HIDDEN_BELOW);
        assert_eq!(style_of(f64::NAN, true, &p), CardStyle::HIDDEN_BELOW);
        assert!(!CardStyle::HIDDEN_BELOW.is_visible());
    }

    #[test]
    fn declaration_combines_every_property() {
        let css = style_of(1.0, false, &params()).to_string();
        assert!(css.starts_with("transform: translate3d(0, "));
        assert!(css.contains("scale("));
        assert!(css.contains("opacity: 1.000"));
        assert!(css.contains("filter: blur(3.00px)"));
    }

    #[test]
    fn quantize_absorbs_float_noise() {
        let a = style_of(1.2, false, &params());
        let b = CardStyle {
            translate_y: a.translate_y + 1e-9,
            ..a
        };
        assert_ne!(a, b);
        assert_eq!(a.quantized(), b.quantized());
    }
}
