use std::rc::Rc;

use crate::{
    events::{EventSource, PointerMove},
    observable::{Observable, Subscription},
};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

impl From<PointerMove> for PointerPosition {
    fn from(event: PointerMove) -> Self {
        Self {
            x: event.x,
            y: event.y,
        }
    }
}

/// Mirrors the latest pointer coordinates. No bounds are applied.
#[derive(Clone, Debug, Default)]
pub struct PointerTracker {
    position: Observable<PointerPosition>,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> &Observable<PointerPosition> {
        &self.position
    }

    pub fn handle(&self, event: &PointerMove) {
        self.position.set(PointerPosition::from(*event));
    }

    pub fn attach(&self, source: &dyn EventSource<PointerMove>) -> Subscription {
        let tracker = self.clone();
        source.listen(Rc::new(move |event: &PointerMove| tracker.handle(event)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventChannel;

    #[test]
    fn starts_at_origin() {
        assert_eq!(PointerTracker::new().position().get(), PointerPosition::default());
    }

    #[test]
    fn position_is_event_coordinates_verbatim() {
        let source = EventChannel::<PointerMove>::new();
        let tracker = PointerTracker::new();
        let _subscription = tracker.attach(&source);

        for (x, y) in [(12.0, 40.5), (-30.0, 9000.0), (0.25, -0.75)] {
            source.emit(&PointerMove { x, y });
            assert_eq!(tracker.position().get(), PointerPosition { x, y });
        }
    }

    #[test]
    fn detached_tracker_ignores_later_moves() {
        let source = EventChannel::<PointerMove>::new();
        let tracker = PointerTracker::new();
        let subscription = tracker.attach(&source);

        source.emit(&PointerMove { x: 500.0, y: 300.0 });
        drop(subscription);
        source.emit(&PointerMove { x: 1.0, y: 1.0 });

        assert_eq!(tracker.position().get(), PointerPosition { x: 500.0, y: 300.0 });
        assert_eq!(source.listener_count(), 0);
    }
}
