use std::rc::Rc;

use tracing::debug;

use crate::{
    events::{EventSource, VisibilityBatch, VisibilityEntry},
    observable::{Observable, Subscription},
    section::SectionId,
};

pub const DEFAULT_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Tracks which section is in view.
///
/// A batch may report several sections past the threshold at once (a fast
/// jump, or short sections). The topmost of those in navigation order wins,
/// whatever order the observer delivered them in. A batch with no qualifying
/// entry leaves the active section alone.
#[derive(Clone, Debug)]
pub struct SectionVisibilityDetector {
    active: Observable<SectionId>,
    threshold: f64,
}

impl Default for SectionVisibilityDetector {
    fn default() -> Self {
        Self::new(DEFAULT_VISIBILITY_THRESHOLD)
    }
}

impl SectionVisibilityDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            active: Observable::new(SectionId::default()),
            threshold,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn active(&self) -> &Observable<SectionId> {
        &self.active
    }

    fn qualifies(&self, entry: &VisibilityEntry) -> Option<SectionId> {
        if !entry.visible_ratio.is_finite() || entry.visible_ratio < self.threshold {
            return None;
        }

        match entry.section_id.parse::<SectionId>() {
            Ok(section) => Some(section),
            Err(error) => {
                debug!(%error, "ignoring visibility entry");
                None
            }
        }
    }

    pub fn observe_batch(&self, entries: &[VisibilityEntry]) -> Option<SectionId> {
        let winner = entries
            .iter()
            .filter_map(|entry| self.qualifies(entry))
            .min_by_key(|section| section.position())?;

        if self.active.set(winner) {
            debug!(section = %winner, "active section changed");
        }
        Some(winner)
    }

    pub fn attach(&self, source: &dyn EventSource<VisibilityBatch>) -> Subscription {
        let detector = self.clone();
        source.listen(Rc::new(move |batch: &VisibilityBatch| {
            detector.observe_batch(batch);
        }))
    }
}
