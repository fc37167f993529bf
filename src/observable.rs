//! Single-threaded publish/subscribe primitives.
//!
//! `Observable` holds one piece of view state and notifies subscribers
//! synchronously when it changes. `Subscription` is the disposable handle
//! returned by every `subscribe`/`listen` call in the crate; dropping it
//! detaches the callback.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

type Handler<T> = Rc<dyn Fn(&T)>;

pub(crate) struct HandlerList<T> {
    next_id: Cell<u64>,
    handlers: RefCell<Vec<(u64, Handler<T>)>>,
}

impl<T: 'static> HandlerList<T> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: Cell::new(0),
            handlers: RefCell::new(Vec::new()),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    fn contains(&self, id: u64) -> bool {
        self.handlers.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }

    // Snapshot before delivery so handlers may subscribe or dispose re-entrantly.
    // A handler disposed by an earlier one in the same dispatch is skipped.
    pub(crate) fn notify(&self, value: &T) {
        let snapshot: Vec<(u64, Handler<T>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in snapshot {
            if self.contains(id) {
                handler(value);
            }
        }
    }

    fn remove(&self, id: u64) {
        self.handlers.borrow_mut().retain(|(entry_id, _)| *entry_id != id);
    }

    pub(crate) fn add(list: &Rc<Self>, handler: Handler<T>) -> Subscription {
        let id = list.next_id.get();
        list.next_id.set(id + 1);
        list.handlers.borrow_mut().push((id, handler));

        let weak: Weak<Self> = Rc::downgrade(list);
        Subscription::new(move || {
            if let Some(list) = weak.upgrade() {
                list.remove(id);
            }
        })
    }
}

/// Disposable handle for a registered callback or listener.
#[must_use = "dropping a Subscription detaches it immediately"]
pub struct Subscription {
    teardown: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    pub fn noop() -> Self {
        Self { teardown: None }
    }

    pub fn is_active(&self) -> bool {
        self.teardown.is_some()
    }

    pub fn dispose(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

struct ObservableInner<T> {
    value: RefCell<T>,
    subscribers: Rc<HandlerList<T>>,
}

/// Shared state cell. Clones point at the same value.
pub struct Observable<T> {
    inner: Rc<ObservableInner<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(ObservableInner {
                value: RefCell::new(initial),
                subscribers: Rc::new(HandlerList::new()),
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value` and notifies subscribers. Returns whether the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value.clone();
        }

        self.inner.subscribers.notify(&value);
        true
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        HandlerList::add(&self.inner.subscribers, Rc::new(callback))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.len()
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Observable")
            .field(&*self.inner.value.borrow())
            .finish()
    }
}
