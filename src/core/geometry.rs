//! Geometry cache and progress mapping.
//!
//! Layout reads are expensive on every host we care about, so the container
//! and viewport measurements are taken once and cached.  The cache is only
//! refreshed on mount and after a (debounced) resize; scroll ticks read from
//! it and never measure.

/// One measurement of the scroll container and the viewport.
///
/// Units are whatever the host scrolls in (CSS pixels, terminal rows…);
/// they only need to agree with the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Viewport height.
    pub viewport_height: f64,
    /// Document-relative top of the container.
    pub container_top: f64,
    /// Full height of the container (its scroll height).
    pub container_height: f64,
}

impl Geometry {
    pub fn new(viewport_height: f64, container_top: f64, container_height: f64) -> Self {
        Self {
            viewport_height,
            container_top,
            container_height,
        }
    }

    /// Distance the page can scroll while the container stays pinned.
    /// Zero or negative when the container is shorter than the viewport.
    pub fn scrollable_height(&self) -> f64 {
        self.container_height - self.viewport_height
    }
}

/// Map an absolute document scroll offset to normalised progress in `[0, 1]`.
///
/// Progress is 0 while the container top is at or below the viewport top and
/// reaches 1 once the page has scrolled past it by the full scrollable
/// height.  A degenerate container (`scrollable_height <= 0`) never engages
/// and always yields 0.
pub fn map_progress(scroll_offset: f64, geometry: &Geometry) -> f64 {
    let scrollable = geometry.scrollable_height();
    if !(scrollable > 0.0) || !scroll_offset.is_finite() {
        return 0.0;
    }
    let raw = (geometry.container_top - scroll_offset) * -1.0 / scrollable;
    raw.clamp(0.0, 1.0)
}

/// Cached container geometry.  Empty until the first [`refresh`](Self::refresh).
#[derive(Debug, Clone, Default)]
pub struct GeometryCache {
    geometry: Option<Geometry>,
    /// Number of refreshes so far (useful for logging and tests).
    generation: u64,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a fresh measurement.  Returns `true` when it differs from the
    /// cached one (or the cache was empty).
    pub fn refresh(&mut self, geometry: Geometry) -> bool {
        self.generation += 1;
        let changed = self.geometry != Some(geometry);
        if geometry.scrollable_height() <= 0.0 {
            tracing::debug!(
                container_height = geometry.container_height,
                viewport_height = geometry.viewport_height,
                "container shorter than viewport, stack stays at rest"
            );
        } else if changed {
            tracing::debug!(
                scrollable_height = geometry.scrollable_height(),
                container_top = geometry.container_top,
                "geometry refreshed"
            );
        }
        self.geometry = Some(geometry);
        changed
    }

    /// `true` once at least one measurement has been taken.
    pub fn is_valid(&self) -> bool {
        self.geometry.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Progress for `scroll_offset` against the cached geometry (0 when the
    /// cache is empty).
    pub fn progress(&self, scroll_offset: f64) -> f64 {
        self.geometry
            .as_ref()
            .map_or(0.0, |g| map_progress(scroll_offset, g))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn geometry() -> Geometry {
        // Container starts at 1000, is 3000 tall, viewport 1000 → 2000 scrollable.
        Geometry::new(1000.0, 1000.0, 3000.0)
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(1000.0, 0.0)]
    #[case(1500.0, 0.25)]
    #[case(2000.0, 0.5)]
    #[case(3000.0, 1.0)]
    #[case(9000.0, 1.0)]
    fn progress_rises_through_scrollable_range(#[case] scroll: f64, #[case] expected: f64) {
        assert!((map_progress(scroll, &geometry()) - expected).abs() < 1e-9);
    }

    #[rstest]
    #[case(Geometry::new(800.0, 200.0, 800.0))]
    #[case(Geometry::new(800.0, 200.0, 300.0))]
    fn degenerate_container_never_engages(#[case] g: Geometry) {
        for scroll in [0.0, 199.0, 200.0, 500.0, 10_000.0] {
            assert_eq!(map_progress(scroll, &g), 0.0);
        }
    }

    #[test]
    fn empty_cache_reports_rest() {
        let cache = GeometryCache::new();
        assert!(!cache.is_valid());
        assert_eq!(cache.progress(2000.0), 0.0);
    }

    #[test]
    fn refresh_changes_progress_at_same_offset() {
        let mut cache = GeometryCache::new();
        assert!(cache.refresh(geometry()));
        let before = cache.progress(2000.0);

        // Viewport grew: scrollable height drops from 2000 to 1500.
        assert!(cache.refresh(Geometry::new(1500.0, 1000.0, 3000.0)));
        let after = cache.progress(2000.0);

        assert!((before - 0.5).abs() < 1e-9);
        assert!((after - 1000.0 / 1500.0).abs() < 1e-9);
        assert_eq!(cache.generation(), 2);
    }

    #[test]
    fn identical_refresh_reports_unchanged() {
        let mut cache = GeometryCache::new();
        cache.refresh(geometry());
        assert!(!cache.refresh(geometry()));
    }
}
