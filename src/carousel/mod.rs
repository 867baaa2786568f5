//! Index bookkeeping shared by the page's carousels.
//!
//! The DOM bindings in the submodules own the elements and timers; the
//! types here only decide which slide is current.

pub mod school;
pub mod stories;
pub mod testimonial;

/// What happens when stepping past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Clamp,
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    visible: usize,
    index: usize,
    edge: Edge,
}

impl CarouselState {
    pub fn new(len: usize, visible: usize, edge: Edge) -> Self {
        Self {
            len,
            visible,
            index: 0,
            edge,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Last index that still fills every visible slot.
    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.visible)
    }

    pub fn next(&mut self) {
        self.index = match self.edge {
            Edge::Clamp => (self.index + 1).min(self.max_index()),
            Edge::Wrap if self.index >= self.max_index() => 0,
            Edge::Wrap => self.index + 1,
        };
    }

    pub fn prev(&mut self) {
        self.index = match self.edge {
            Edge::Clamp => self.index.saturating_sub(1),
            Edge::Wrap if self.index == 0 => self.max_index(),
            Edge::Wrap => (self.index - 1).min(self.max_index()),
        };
    }

    pub fn go_to(&mut self, index: usize) {
        self.index = index.min(self.max_index());
    }

    /// Steps forward and starts over after the last position, whatever the
    /// edge mode. Used by timers.
    pub fn advance_cyclic(&mut self) {
        self.index = (self.index + 1) % (self.max_index() + 1);
    }

    /// Returns true when the visible count actually changed.
    pub fn set_visible(&mut self, visible: usize) -> bool {
        let changed = visible != self.visible;
        self.visible = visible;
        self.clamp();
        changed
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp();
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    pub fn clamp(&mut self) {
        self.index = self.index.min(self.max_index());
    }

    pub fn offset_px(&self, step: f64) -> f64 {
        self.index as f64 * step
    }
}

/// Visible item count by viewport width: the first tier whose inclusive
/// maximum width fits wins, otherwise `widest`.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoints {
    tiers: Vec<(f64, usize)>,
    widest: usize,
}

impl Breakpoints {
    pub fn new(tiers: Vec<(f64, usize)>, widest: usize) -> Self {
        Self { tiers, widest }
    }

    pub fn visible_for(&self, width: f64) -> usize {
        self.tiers
            .iter()
            .find(|(max_width, _)| width <= *max_width)
            .map(|(_, visible)| *visible)
            .unwrap_or(self.widest)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved towards the left edge: show the next slide.
    Left,
    /// Finger moved towards the right edge: show the previous slide.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Distance must be strictly greater.
    Exceeds(f64),
    /// Distance may equal the threshold.
    AtLeast(f64),
}

impl Threshold {
    fn passes(self, distance: f64) -> bool {
        match self {
            Threshold::Exceeds(px) => distance > px,
            Threshold::AtLeast(px) => distance >= px,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeTracker {
    start_x: f64,
    threshold: Threshold,
}

impl SwipeTracker {
    pub fn new(threshold: Threshold) -> Self {
        Self {
            start_x: 0.0,
            threshold,
        }
    }

    pub fn begin(&mut self, x: f64) {
        self.start_x = x;
    }

    pub fn finish(&self, x: f64) -> Option<Swipe> {
        let diff = x - self.start_x;
        if diff == 0.0 || !self.threshold.passes(diff.abs()) {
            return None;
        }
        if diff < 0.0 {
            Some(Swipe::Left)
        } else {
            Some(Swipe::Right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_next_stops_at_last_full_page() {
        let mut state = CarouselState::new(5, 3, Edge::Clamp);
        state.next();
        state.next();
        assert_eq!(state.index(), 2);
        state.next();
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn clamp_prev_stops_at_zero() {
        let mut state = CarouselState::new(5, 1, Edge::Clamp);
        state.prev();
        assert_eq!(state.index(), 0);
        state.go_to(3);
        state.prev();
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn wrap_mode_cycles_both_ways() {
        let mut state = CarouselState::new(6, 2, Edge::Wrap);
        state.prev();
        assert_eq!(state.index(), 4);
        state.next();
        assert_eq!(state.index(), 0);
        state.next();
        assert_eq!(state.index(), 1);
    }

    #[test]
    fn fewer_items_than_slots_never_moves() {
        let mut state = CarouselState::new(2, 3, Edge::Wrap);
        assert_eq!(state.max_index(), 0);
        state.next();
        assert_eq!(state.index(), 0);
        state.prev();
        assert_eq!(state.index(), 0);
        state.advance_cyclic();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn cyclic_advance_restarts_after_max_index() {
        let mut state = CarouselState::new(4, 3, Edge::Clamp);
        state.advance_cyclic();
        assert_eq!(state.index(), 1);
        state.advance_cyclic();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn go_to_is_clamped() {
        let mut state = CarouselState::new(5, 3, Edge::Clamp);
        state.go_to(4);
        assert_eq!(state.index(), 2);
    }

    #[test]
    fn growing_visible_count_reclamps() {
        let mut state = CarouselState::new(6, 1, Edge::Wrap);
        state.go_to(5);
        assert!(state.set_visible(3));
        assert_eq!(state.index(), 3);
        assert!(!state.set_visible(3));
    }

    #[test]
    fn shrinking_len_reclamps() {
        let mut state = CarouselState::new(5, 1, Edge::Wrap);
        state.go_to(4);
        state.set_len(3);
        assert_eq!(state.index(), 2);
        state.next();
        assert_eq!(state.index(), 0);
    }

    #[test]
    fn offset_scales_with_index() {
        let mut state = CarouselState::new(6, 1, Edge::Clamp);
        state.go_to(2);
        assert_eq!(state.offset_px(310.5), 621.0);
    }

    #[test]
    fn breakpoint_tiers_are_inclusive() {
        let stories = Breakpoints::new(vec![(640.0, 1), (1024.0, 2)], 3);
        assert_eq!(stories.visible_for(375.0), 1);
        assert_eq!(stories.visible_for(640.0), 1);
        assert_eq!(stories.visible_for(641.0), 2);
        assert_eq!(stories.visible_for(1024.0), 2);
        assert_eq!(stories.visible_for(1280.0), 3);

        let testimonials = Breakpoints::new(vec![(1024.0, 1)], 3);
        assert_eq!(testimonials.visible_for(1024.0), 1);
        assert_eq!(testimonials.visible_for(1025.0), 3);
    }

    #[test]
    fn strict_threshold_rejects_exact_distance() {
        let mut tracker = SwipeTracker::new(Threshold::Exceeds(50.0));
        tracker.begin(200.0);
        assert_eq!(tracker.finish(150.0), None);
        assert_eq!(tracker.finish(149.0), Some(Swipe::Left));
        assert_eq!(tracker.finish(251.0), Some(Swipe::Right));
    }

    #[test]
    fn inclusive_threshold_accepts_exact_distance() {
        let mut tracker = SwipeTracker::new(Threshold::AtLeast(40.0));
        tracker.begin(100.0);
        assert_eq!(tracker.finish(60.0), Some(Swipe::Left));
        assert_eq!(tracker.finish(139.0), None);
        assert_eq!(tracker.finish(140.0), Some(Swipe::Right));
    }

    #[test]
    fn zero_threshold_still_ignores_taps() {
        let mut tracker = SwipeTracker::new(Threshold::AtLeast(0.0));
        tracker.begin(10.0);
        assert_eq!(tracker.finish(10.0), None);
    }
}
