//! Page-level view state.
//!
//! `PageController` owns the three trackers and the listener handles that feed
//! them. Event sources are injected, so a browser adapter and a test harness
//! drive it the same way. Dropping the controller detaches every listener.

use std::{fmt, rc::Rc};

use tracing::{debug, info};

use crate::{
    events::{EventSource, PointerMove, ScrollMetrics, VisibilityBatch},
    observable::{Observable, Subscription},
    pointer::{PointerPosition, PointerTracker},
    scroll::{ScrollProgress, ScrollProgressTracker},
    section::SectionId,
    visibility::SectionVisibilityDetector,
};

/// Browser capabilities the page listens to.
///
/// `pointer` is `None` when there is no viewport to track (touch-only hosts,
/// non-interactive renders); the pointer position then stays at its default.
#[derive(Clone)]
pub struct PageSources {
    pub pointer: Option<Rc<dyn EventSource<PointerMove>>>,
    pub visibility: Rc<dyn EventSource<VisibilityBatch>>,
    pub scroll: Rc<dyn EventSource<ScrollMetrics>>,
}

impl PartialEq for PageSources {
    fn eq(&self, other: &Self) -> bool {
        let pointer_eq = match (&self.pointer, &other.pointer) {
            (Some(left), Some(right)) => Rc::ptr_eq(left, right),
            (None, None) => true,
            _ => false,
        };

        pointer_eq
            && Rc::ptr_eq(&self.visibility, &other.visibility)
            && Rc::ptr_eq(&self.scroll, &other.scroll)
    }
}

impl fmt::Debug for PageSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageSources")
            .field("pointer", &self.pointer.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageSnapshot {
    pub active_section: SectionId,
    pub pointer: PointerPosition,
    pub scroll_progress: ScrollProgress,
}

pub struct PageController {
    sources: PageSources,
    pointer: PointerTracker,
    sections: SectionVisibilityDetector,
    scroll: ScrollProgressTracker,
    subscriptions: Vec<Subscription>,
}

impl PageController {
    pub fn new(visibility_threshold: f64, sources: PageSources) -> Self {
        Self {
            sources,
            pointer: PointerTracker::new(),
            sections: SectionVisibilityDetector::new(visibility_threshold),
            scroll: ScrollProgressTracker::new(),
            subscriptions: Vec::new(),
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }

        if let Some(pointer) = self.sources.pointer.as_deref() {
            self.subscriptions.push(self.pointer.attach(pointer));
        }
        self.subscriptions
            .push(self.sections.attach(self.sources.visibility.as_ref()));
        self.subscriptions
            .push(self.scroll.attach(self.sources.scroll.as_ref()));

        info!(
            listeners = self.subscriptions.len(),
            pointer = self.sources.pointer.is_some(),
            "page controller mounted"
        );
    }

    pub fn unmount(&mut self) {
        if !self.is_mounted() {
            return;
        }

        let released = self.subscriptions.len();
        self.subscriptions.clear();
        debug!(released, "page controller unmounted");
    }

    pub fn active_section(&self) -> &Observable<SectionId> {
        self.sections.active()
    }

    pub fn pointer(&self) -> &Observable<PointerPosition> {
        self.pointer.position()
    }

    pub fn scroll_progress(&self) -> &Observable<ScrollProgress> {
        self.scroll.progress()
    }

    pub fn snapshot(&self) -> PageSnapshot {
        PageSnapshot {
            active_section: self.active_section().get(),
            pointer: self.pointer().get(),
            scroll_progress: self.scroll_progress().get(),
        }
    }
}

impl Drop for PageController {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl fmt::Debug for PageController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageController")
            .field("mounted", &self.is_mounted())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}
