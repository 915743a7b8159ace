//! Event plumbing around the animator.
//!
//! The host forwards three kinds of notification: scroll, resize, and frame
//! boundaries.  Scroll and resize only record state and schedule; all
//! computation happens in [`StackDriver::on_frame`], at most once per frame,
//! from the most recent offset.  After [`StackDriver::unmount`] every entry
//! point is a no-op.

use std::time::{Duration, Instant};

use super::geometry::Geometry;
use super::schedule::{Debouncer, FrameScheduler};
use super::stack::{AnimatorSettings, StackAnimator, VisualHandle};

/// Delays used by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverTiming {
    /// Quiet period after the last resize before geometry is re-read.
    pub resize_debounce: Duration,
    /// Quiet period after the last scroll before the motion hint is dropped.
    pub motion_idle: Duration,
}

impl Default for DriverTiming {
    fn default() -> Self {
        Self {
            resize_debounce: Duration::from_millis(100),
            motion_idle: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

/// What a frame did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// The stack was recomputed this frame.
    pub ran: bool,
    /// Handle writes performed.
    pub writes: usize,
    /// A debounced resize was applied to the geometry cache.
    pub geometry_refreshed: bool,
    /// The motion hint was dropped after scrolling went idle.
    pub motion_changed: bool,
}

pub struct StackDriver<H> {
    animator: StackAnimator<H>,
    frames: FrameScheduler,
    resize: Debouncer,
    motion: Debouncer,
    latest_offset: f64,
    pending_geometry: Option<Geometry>,
    lifecycle: Lifecycle,
}

impl<H: VisualHandle> StackDriver<H> {
    pub fn new(card_count: usize, settings: AnimatorSettings, timing: DriverTiming) -> Self {
        Self {
            animator: StackAnimator::new(card_count, settings),
            frames: FrameScheduler::new(),
            resize: Debouncer::new(timing.resize_debounce),
            motion: Debouncer::new(timing.motion_idle),
            latest_offset: 0.0,
            pending_geometry: None,
            lifecycle: Lifecycle::Created,
        }
    }

    pub fn animator(&self) -> &StackAnimator<H> {
        &self.animator
    }

    /// Attach a card handle.  Allowed before or after mount.
    pub fn attach(&mut self, index: usize, handle: H) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.animator.attach(index, handle);
        self.frames.request();
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    /// Take the first geometry measurement and schedule the initial frame.
    pub fn mount(&mut self, geometry: Geometry, scroll_offset: f64) {
        if self.lifecycle != Lifecycle::Created {
            tracing::warn!(lifecycle = ?self.lifecycle, "mount ignored");
            return;
        }
        self.animator.refresh_geometry(geometry);
        self.latest_offset = scroll_offset;
        self.lifecycle = Lifecycle::Mounted;
        self.frames.request();
        tracing::debug!(
            cards = self.animator.card_count(),
            scrollable_height = geometry.scrollable_height(),
            "stack mounted"
        );
    }

    /// Record a scroll position.  Never computes.
    pub fn on_scroll(&mut self, offset: f64, now: Instant) {
        if !self.is_mounted() {
            return;
        }
        self.latest_offset = offset;
        self.frames.request();
        if !self.animator.settings().reduced_motion {
            self.animator.set_motion_hint(true);
            self.motion.trigger(now);
        }
    }

    /// Record a new measurement; it is applied once resizing goes quiet.
    pub fn on_resize(&mut self, geometry: Geometry, now: Instant) {
        if !self.is_mounted() {
            return;
        }
        self.pending_geometry = Some(geometry);
        self.resize.trigger(now);
    }

    /// Frame boundary.  Applies a settled resize, expires the motion hint, and
    /// runs the pending recompute if there is one.
    pub fn on_frame(&mut self, now: Instant) -> FrameReport {
        let mut report = FrameReport::default();
        if !self.is_mounted() {
            return report;
        }

        if self.resize.fire(now) {
            if let Some(geometry) = self.pending_geometry.take() {
                tracing::debug!(
                    scrollable_height = geometry.scrollable_height(),
                    "resize settled"
                );
                self.animator.refresh_geometry(geometry);
                self.frames.request();
                report.geometry_refreshed = true;
            }
        }

        if self.motion.fire(now) {
            report.motion_changed = self.animator.set_motion_hint(false);
        }

        if !self.frames.begin_frame() {
            return report;
        }
        self.animator.set_scroll_offset(self.latest_offset);
        report.ran = true;
        report.writes = self.animator.render();
        report
    }

    /// Swap tuning at runtime and schedule a full rewrite.
    pub fn reconfigure(&mut self, settings: AnimatorSettings, timing: DriverTiming) {
        self.animator.reconfigure(settings);
        self.resize.set_delay(timing.resize_debounce);
        self.motion.set_delay(timing.motion_idle);
        if settings.reduced_motion {
            self.motion.cancel();
            self.animator.set_motion_hint(false);
        }
        self.frames.request();
    }

    /// Cancel everything pending and release the handles.  Idempotent.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        self.frames.cancel();
        self.resize.cancel();
        self.motion.cancel();
        self.pending_geometry = None;
        self.animator.set_motion_hint(false);
        self.animator.detach_all();
        self.lifecycle = Lifecycle::Unmounted;
        tracing::debug!(
            frames = self.frames.frames(),
            coalesced = self.frames.coalesced(),
            "stack unmounted"
        );
    }

    /// Frames actually computed so far.
    pub fn frames_run(&self) -> u64 {
        self.frames.frames()
    }

    pub fn has_pending_frame(&self) -> bool {
        self.frames.is_pending()
    }
}

impl<H> Drop for StackDriver<H> {
    fn drop(&mut self) {
        self.frames.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stack::tests::RecordingHandle;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Mounted driver over `n` cards, container at 0 with 1000 scrollable.
    fn mounted(n: usize) -> (StackDriver<RecordingHandle>, Vec<RecordingHandle>, Instant) {
        let mut driver = StackDriver::new(n, AnimatorSettings::default(), DriverTiming::default());
        let handles: Vec<_> = (0..n).map(|_| RecordingHandle::default()).collect();
        for (i, h) in handles.iter().enumerate() {
            driver.attach(i, h.clone());
        }
        driver.mount(Geometry::new(500.0, 0.0, 1500.0), 0.0);
        let t0 = Instant::now();
        driver.on_frame(t0);
        (driver, handles, t0)
    }

    #[test]
    fn scroll_is_deferred_to_the_frame() {
        let (mut driver, handles, t0) = mounted(4);
        let before = handles[1].0.borrow().applies;

        driver.on_scroll(500.0, t0);
        assert_eq!(handles[1].0.borrow().applies, before);
        assert_eq!(driver.animator().progress(), 0.0);

        let report = driver.on_frame(t0 + ms(16));
        assert!(report.ran);
        assert_eq!(driver.animator().progress(), 0.5);
    }

    #[test]
    fn many_scrolls_one_computation_from_latest_offset() {
        let (mut driver, _, t0) = mounted(4);
        let frames_before = driver.frames_run();

        for i in 1..=20 {
            driver.on_scroll(i as f64 * 10.0, t0);
        }
        driver.on_frame(t0 + ms(16));
        driver.on_frame(t0 + ms(32));

        assert_eq!(driver.frames_run(), frames_before + 1);
        assert!((driver.animator().progress() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn resize_is_debounced_then_refreshes_progress() {
        let (mut driver, _, t0) = mounted(4);
        driver.on_scroll(600.0, t0);
        driver.on_frame(t0 + ms(16));
        let before = driver.animator().progress();

        // A burst of resizes; only the last measurement counts.
        driver.on_resize(Geometry::new(700.0, 0.0, 1500.0), t0 + ms(20));
        driver.on_resize(Geometry::new(900.0, 0.0, 1500.0), t0 + ms(60));
        let mid = driver.on_frame(t0 + ms(120));
        assert!(!mid.geometry_refreshed);
        assert_eq!(driver.animator().progress(), before);

        let settled = driver.on_frame(t0 + ms(160));
        assert!(settled.geometry_refreshed && settled.ran);
        // 600 / (1500 - 900) = 1.0
        assert_eq!(driver.animator().progress(), 1.0);
        assert_ne!(before, driver.animator().progress());
    }

    #[test]
    fn unmount_cancels_pending_frame() {
        let (mut driver, handles, t0) = mounted(3);
        let applies = handles[0].0.borrow().applies;

        driver.on_scroll(900.0, t0);
        assert!(driver.has_pending_frame());
        driver.unmount();

        assert_eq!(driver.on_frame(t0 + ms(16)), FrameReport::default());
        driver.on_scroll(100.0, t0 + ms(20));
        driver.on_resize(Geometry::new(10.0, 0.0, 20.0), t0 + ms(20));
        assert_eq!(driver.on_frame(t0 + ms(500)), FrameReport::default());
        assert_eq!(handles[0].0.borrow().applies, applies);
        assert!(driver.animator().handle(0).is_none());

        // Second unmount is harmless.
        driver.unmount();
    }

    #[test]
    fn motion_hint_clears_after_idle() {
        let (mut driver, handles, t0) = mounted(2);
        driver.on_scroll(100.0, t0);
        assert!(handles[0].0.borrow().hint);

        let busy = driver.on_frame(t0 + ms(400));
        assert!(!busy.motion_changed);
        assert!(handles[0].0.borrow().hint);

        let idle = driver.on_frame(t0 + ms(500));
        assert!(idle.motion_changed && !idle.ran);
        assert!(!handles[0].0.borrow().hint);
    }

    #[test]
    fn frames_before_mount_do_nothing() {
        let mut driver: StackDriver<RecordingHandle> =
            StackDriver::new(2, AnimatorSettings::default(), DriverTiming::default());
        driver.on_scroll(10.0, Instant::now());
        assert!(!driver.on_frame(Instant::now()).ran);
    }

    #[test]
    fn degenerate_container_stays_at_rest() {
        let mut driver = StackDriver::new(3, AnimatorSettings::default(), DriverTiming::default());
        let h = RecordingHandle::default();
        driver.attach(0, h.clone());
        driver.mount(Geometry::new(800.0, 100.0, 600.0), 0.0);
        let t0 = Instant::now();
        for (i, offset) in [0.0, 150.0, 400.0, 5000.0].into_iter().enumerate() {
            driver.on_scroll(offset, t0);
            driver.on_frame(t0 + ms(16 * (i as u64 + 1)));
            assert_eq!(driver.animator().progress(), 0.0);
            assert_eq!(driver.animator().depths()[0], 0.0);
        }
        assert_eq!(h.0.borrow().applies, 1);
    }
}
