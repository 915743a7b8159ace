//! Keyboard scroll easing with exponential ease-out.
//!
//! Page-sized keyboard jumps would teleport the document and skip the whole
//! stack animation.  Instead the target moves instantly and the visible
//! offset closes a fixed fraction of the remaining distance every frame:
//! visible deceleration, like a browser's smooth scroll.

/// Offset easer.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    /// Offset currently shown.
    current: f64,
    /// Where the user asked to go.
    target: f64,
    /// Damping: `remaining *= (1 - speed)` each frame.
    /// Good range: 0.15–0.35 at 60 fps.
    speed: f64,
}

/// Below this distance (rows) the easer snaps to the target.
const SNAP: f64 = 0.05;

impl SmoothScroll {
    pub fn new(speed: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            speed: speed.clamp(0.05, 0.95),
        }
    }

    /// Move the target; the visible offset follows over the next frames.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Move both target and visible offset at once (wheel, resize clamp).
    pub fn jump_to(&mut self, offset: f64) {
        self.current = offset;
        self.target = offset;
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    /// Advance one frame.  Returns the new offset if it moved.
    pub fn tick(&mut self) -> Option<f64> {
        if !self.is_animating() {
            return None;
        }
        let remaining = self.target - self.current;
        if remaining.abs() < SNAP {
            self.current = self.target;
        } else {
            self.current += remaining * self.speed;
        }
        Some(self.current)
    }

    /// True while the visible offset has not reached the target.
    pub fn is_animating(&self) -> bool {
        self.current != self.target
    }
}
