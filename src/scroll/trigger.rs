use crate::foundation::core::Viewport;
use crate::page::Container;
use crate::scroll::scrub::{Scrub, ScrubSmoother};

/// Scroll offsets (document px) at which progress is 0 and 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRegion {
    pub start: f64,
    pub end: f64,
}

impl TriggerRegion {
    /// Start when the container's top meets the viewport top, end when its bottom meets the
    /// viewport bottom.
    pub fn for_container(container: &Container, viewport: Viewport) -> Self {
        let start = container.top;
        let end = container.bottom_px(viewport) - f64::from(viewport.height);
        Self { start, end }
    }

    /// Normalized position of `scroll_y` inside the region, clamped to `[0, 1]`.
    pub fn progress(&self, scroll_y: f64) -> f64 {
        if !scroll_y.is_finite() {
            return 0.0;
        }
        let span = self.end - self.start;
        if span <= 0.0 {
            return if scroll_y < self.start { 0.0 } else { 1.0 };
        }
        ((scroll_y - self.start) / span).clamp(0.0, 1.0)
    }
}

/// Turns scroll offsets into (optionally smoothed) progress updates.
#[derive(Clone, Debug)]
pub struct ScrollTrigger {
    smoother: ScrubSmoother,
    raw: f64,
}

impl ScrollTrigger {
    pub fn new(scrub: Scrub) -> Self {
        Self {
            smoother: ScrubSmoother::new(scrub),
            raw: 0.0,
        }
    }

    /// Feed the current scroll offset. Returns a progress update when one is due right away
    /// (always the case with [`Scrub::Off`]).
    pub fn update(
        &mut self,
        scroll_y: f64,
        container: &Container,
        viewport: Viewport,
    ) -> Option<f64> {
        self.raw = TriggerRegion::for_container(container, viewport).progress(scroll_y);
        self.smoother.set_target(self.raw)
    }

    /// Advance scrub smoothing by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        self.smoother.tick(dt)
    }

    /// Last delivered progress.
    pub fn progress(&self) -> f64 {
        self.smoother.current()
    }

    /// Progress of the most recent scroll offset, before smoothing.
    pub fn raw_progress(&self) -> f64 {
        self.raw
    }

    pub fn is_settled(&self) -> bool {
        self.smoother.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Length;

    fn tall_container() -> (Container, Viewport) {
        (
            Container::new(0.0, Length::Vh(300.0)),
            Viewport::new(800, 600).unwrap(),
        )
    }

    #[test]
    fn region_spans_container_minus_one_viewport() {
        let (c, vp) = tall_container();
        let r = TriggerRegion::for_container(&c, vp);
        assert_eq!(r.start, 0.0);
        assert_eq!(r.end, 1200.0);
    }

    #[test]
    fn progress_is_zero_half_one() {
        let (c, vp) = tall_container();
        let r = TriggerRegion::for_container(&c, vp);
        assert_eq!(r.progress(0.0), 0.0);
        assert_eq!(r.progress(600.0), 0.5);
        assert_eq!(r.progress(1200.0), 1.0);
        assert_eq!(r.progress(-50.0), 0.0);
        assert_eq!(r.progress(5000.0), 1.0);
    }

    #[test]
    fn offset_container_shifts_region() {
        let c = Container::new(400.0, Length::Vh(300.0));
        let r = TriggerRegion::for_container(&c, Viewport::new(800, 600).unwrap());
        assert_eq!(r.progress(400.0), 0.0);
        assert_eq!(r.progress(1000.0), 0.5);
    }

    #[test]
    fn degenerate_region_steps() {
        let c = Container::new(100.0, Length::Vh(100.0));
        let r = TriggerRegion::for_container(&c, Viewport::new(800, 600).unwrap());
        assert_eq!(r.progress(99.0), 0.0);
        assert_eq!(r.progress(100.0), 1.0);
    }

    #[test]
    fn unsmoothed_trigger_reports_immediately() {
        let (c, vp) = tall_container();
        let mut t = ScrollTrigger::new(Scrub::Off);
        assert_eq!(t.update(300.0, &c, vp), Some(0.25));
        assert_eq!(t.update(300.0, &c, vp), None);
        assert_eq!(t.progress(), 0.25);
    }

    #[test]
    fn smoothed_trigger_reports_on_tick() {
        let (c, vp) = tall_container();
        let mut t = ScrollTrigger::new(Scrub::Seconds(1.0));
        assert_eq!(t.update(1200.0, &c, vp), None);
        assert_eq!(t.raw_progress(), 1.0);
        let p = t.tick(0.1).unwrap();
        assert!(p > 0.0 && p < 1.0);
        assert!(!t.is_settled());
    }
}
