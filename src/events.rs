use std::{fmt, rc::Rc};

use crate::observable::{HandlerList, Subscription};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerMove {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityEntry {
    pub section_id: String,
    pub visible_ratio: f64,
}

impl VisibilityEntry {
    pub fn new(section_id: impl Into<String>, visible_ratio: f64) -> Self {
        Self {
            section_id: section_id.into(),
            visible_ratio,
        }
    }
}

/// One observer callback's worth of entries, in delivery order.
pub type VisibilityBatch = Vec<VisibilityEntry>;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

/// Something that delivers events of type `E` until the returned handle is disposed.
pub trait EventSource<E> {
    fn listen(&self, handler: Rc<dyn Fn(&E)>) -> Subscription;
}

/// In-memory event source. Delivery is synchronous, in subscription order.
pub struct EventChannel<E> {
    handlers: Rc<HandlerList<E>>,
}

impl<E: 'static> EventChannel<E> {
    pub fn new() -> Self {
        Self {
            handlers: Rc::new(HandlerList::new()),
        }
    }

    pub fn emit(&self, event: &E) {
        self.handlers.notify(event);
    }

    pub fn listener_count(&self) -> usize {
        self.handlers.len()
    }
}

impl<E: 'static> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> EventSource<E> for EventChannel<E> {
    fn listen(&self, handler: Rc<dyn Fn(&E)>) -> Subscription {
        HandlerList::add(&self.handlers, handler)
    }
}

impl<E> fmt::Debug for EventChannel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventChannel").finish_non_exhaustive()
    }
}
