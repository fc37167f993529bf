use std::rc::Rc;

use crate::{
    events::{EventSource, ScrollMetrics},
    observable::{Observable, Subscription},
};

/// Vertical scroll completion in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct ScrollProgress(f64);

impl ScrollProgress {
    pub const TOP: Self = Self(0.0);
    pub const BOTTOM: Self = Self(1.0);

    /// A page too short to scroll counts as fully read.
    pub fn from_metrics(metrics: &ScrollMetrics) -> Option<Self> {
        let ScrollMetrics {
            scroll_top,
            scroll_height,
            viewport_height,
        } = *metrics;

        if !(scroll_top.is_finite() && scroll_height.is_finite() && viewport_height.is_finite()) {
            return None;
        }

        let range = scroll_height - viewport_height;
        if range <= 0.0 {
            return Some(Self::BOTTOM);
        }

        Some(Self((scroll_top / range).clamp(0.0, 1.0)))
    }

    pub fn ratio(self) -> f64 {
        self.0
    }
}

#[derive(Clone, Debug, Default)]
pub struct ScrollProgressTracker {
    progress: Observable<ScrollProgress>,
}

impl ScrollProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> &Observable<ScrollProgress> {
        &self.progress
    }

    pub fn handle(&self, metrics: &ScrollMetrics) {
        if let Some(progress) = ScrollProgress::from_metrics(metrics) {
            self.progress.set(progress);
        }
    }

    pub fn attach(&self, source: &dyn EventSource<ScrollMetrics>) -> Subscription {
        let tracker = self.clone();
        source.listen(Rc::new(move |metrics: &ScrollMetrics| tracker.handle(metrics)))
    }
}
