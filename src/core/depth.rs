//! Per-card depth from global progress.
//!
//! `depth = progress * (N + E) - index`.  Zero means the card has just
//! arrived at the front; positive values recede into the stack; negative
//! values have not entered yet.

/// Fractional index of the card currently arriving at the front.
pub fn active_card_float(progress: f64, card_count: usize, extension_factor: f64) -> f64 {
    progress * (card_count as f64 + extension_factor)
}

/// Signed depth of card `index`.
pub fn card_depth(progress: f64, index: usize, card_count: usize, extension_factor: f64) -> f64 {
    active_card_float(progress, card_count, extension_factor) - index as f64
}

/// Depths for every card, in index order.
pub fn all_depths(progress: f64, card_count: usize, extension_factor: f64) -> Vec<f64> {
    (0..card_count)
        .map(|i| card_depth(progress, i, card_count, extension_factor))
        .collect()
}

/// Coarse classification of a depth value, used by renderers and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthPhase {
    /// Below the viewport, not yet visible.
    Hidden,
    /// Sliding in from the bottom.
    Entering,
    /// Front-most, full size, crisp.
    Front,
    /// Receded into the stack.
    Receding,
    /// Held at maximum recession.
    Pinned,
    /// Last card fading out past the stack cap.
    Exiting,
    /// Last card fully gone.
    Gone,
}

impl DepthPhase {
    pub fn classify(depth: f64, stack_cap: usize, is_last: bool) -> Self {
        let cap = stack_cap as f64;
        if depth <= -1.0 {
            DepthPhase::Hidden
        } else if depth < 0.0 {
            DepthPhase::Entering
        } else if depth == 0.0 {
            DepthPhase::Front
        } else if depth < cap {
            DepthPhase::Receding
        } else if !is_last {
            DepthPhase::Pinned
        } else if depth < cap + 1.0 {
            DepthPhase::Exiting
        } else {
            DepthPhase::Gone
        }
    }

    /// Whether a card in this phase is drawn at all.
    pub fn is_visible(self) -> bool {
        !matches!(self, DepthPhase::Hidden | DepthPhase::Gone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn half_way_through_four_cards() {
        let depths = all_depths(0.5, 4, 1.0);
        assert_eq!(active_card_float(0.5, 4, 1.0), 2.5);
        assert_eq!(depths, vec![2.5, 1.5, 0.5, -0.5]);
    }

    #[test]
    fn first_card_starts_at_front() {
        assert_eq!(card_depth(0.0, 0, 4, 1.0), 0.0);
        assert_eq!(card_depth(0.0, 3, 4, 0.5), -3.0);
    }

    #[test]
    fn extension_factor_gives_room_past_last_card() {
        // At full progress the last card is E + 1 deep.
        assert_eq!(card_depth(1.0, 3, 4, 1.0), 2.0);
        assert_eq!(card_depth(1.0, 3, 4, 0.5), 1.5);
    }

    #[rstest]
    #[case(-2.0, false, DepthPhase::Hidden)]
    #[case(-1.0, false, DepthPhase::Hidden)]
    #[case(-0.5, false, DepthPhase::Entering)]
    #[case(0.0, false, DepthPhase::Front)]
    #[case(1.5, false, DepthPhase::Receding)]
    #[case(3.0, false, DepthPhase::Pinned)]
    #[case(7.0, false, DepthPhase::Pinned)]
    #[case(3.5, true, DepthPhase::Exiting)]
    #[case(4.0, true, DepthPhase::Gone)]
    fn classify(#[case] depth: f64, #[case] is_last: bool, #[case] expected: DepthPhase) {
        assert_eq!(DepthPhase::classify(depth, 3, is_last), expected);
    }
}
