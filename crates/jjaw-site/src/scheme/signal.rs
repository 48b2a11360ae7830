//! Single-threaded observable value cell.
//!
//! A [`Signal`] holds a value and a list of subscribers. Setting a different
//! value notifies every subscriber synchronously, in subscription order.
//!
//! Writes issued while a notification round is running are not delivered
//! re-entrantly: the new value is stored and another round runs once the
//! current one has finished, so every subscriber always observes the latest
//! value last.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Inner<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<(u64, Callback<T>)>>,
    next_id: Cell<u64>,
    notifying: Cell<bool>,
    dirty: Cell<bool>,
}

/// A shared, observable value.
///
/// Cloning a `Signal` yields another handle to the same cell.
///
/// # Example
///
/// ```rust
/// use jjaw_site::Signal;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let count = Signal::new(0);
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let log = seen.clone();
/// let sub = count.subscribe(move |v| log.borrow_mut().push(*v));
/// count.set(1);
/// count.set(1); // unchanged, no notification
/// drop(sub);
/// count.set(2);
///
/// assert_eq!(*seen.borrow(), vec![1]);
/// ```
pub struct Signal<T> {
    inner: Rc<Inner<T>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("value", &*self.inner.value.borrow())
            .field("subscribers", &self.inner.subscribers.borrow().len())
            .finish()
    }
}

impl<T: Clone + PartialEq + 'static> Signal<T> {
    /// Creates a cell holding `value` with no subscribers.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(value),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
                notifying: Cell::new(false),
                dirty: Cell::new(false),
            }),
        }
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Stores `value` and notifies subscribers if it differs from the current one.
    ///
    /// Returns `true` when the value changed.
    pub fn set(&self, value: T) -> bool {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return false;
            }
            *current = value;
        }
        self.notify();
        true
    }

    /// Registers `callback` to run after every change.
    ///
    /// The callback is not invoked for the current value. Dropping the
    /// returned [`Subscription`] cancels it.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner.subscribers.borrow_mut().push((id, callback));

        let weak: Weak<Inner<T>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    fn notify(&self) {
        if self.inner.notifying.get() {
            self.inner.dirty.set(true);
            return;
        }
        let _round = NotifyRound::begin(&self.inner.notifying);

        loop {
            self.inner.dirty.set(false);
            let value = self.get();
            let snapshot: Vec<(u64, Callback<T>)> = self
                .inner
                .subscribers
                .borrow()
                .iter()
                .map(|(id, cb)| (*id, Rc::clone(cb)))
                .collect();

            for (id, callback) in snapshot {
                // Skip callbacks cancelled earlier in this round.
                let live = self
                    .inner
                    .subscribers
                    .borrow()
                    .iter()
                    .any(|(sid, _)| *sid == id);
                if live {
                    (callback.borrow_mut())(&value);
                }
            }

            if !self.inner.dirty.get() {
                break;
            }
        }
    }
}

/// Clears the `notifying` flag even if a subscriber panics.
struct NotifyRound<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> NotifyRound<'a> {
    fn begin(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for NotifyRound<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

/// Handle to a registered subscriber; cancels it when dropped.
#[must_use = "dropping a Subscription cancels it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub(crate) fn new<F: FnOnce() + 'static>(cancel: F) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the subscription now.
    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + 'static>() -> (Rc<RefCell<Vec<T>>>, impl FnMut(&T) + 'static) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |v: &T| sink.borrow_mut().push(v.clone()))
    }

    #[test]
    fn test_set_notifies_on_change_only() {
        let signal = Signal::new(false);
        let (seen, cb) = recorder();
        let _sub = signal.subscribe(cb);

        assert!(signal.set(true));
        assert!(!signal.set(true));
        assert!(signal.set(false));

        assert_eq!(*seen.borrow(), vec![true, false]);
    }

    #[test]
    fn test_subscribers_run_in_subscription_order() {
        let signal = Signal::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));

        let a = order.clone();
        let _first = signal.subscribe(move |_| a.borrow_mut().push("first"));
        let b = order.clone();
        let _second = signal.subscribe(move |_| b.borrow_mut().push("second"));

        signal.set(1);
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_drop_subscription_stops_notifications() {
        let signal = Signal::new(0);
        let (seen, cb) = recorder();
        let sub = signal.subscribe(cb);
        assert_eq!(signal.subscriber_count(), 1);

        signal.set(1);
        drop(sub);
        signal.set(2);

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_unsubscribe_explicitly() {
        let signal = Signal::new(0);
        let sub = signal.subscribe(|_| {});
        sub.unsubscribe();
        assert_eq!(signal.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_signal_is_harmless() {
        let signal = Signal::new(0);
        let sub = signal.subscribe(|_| {});
        drop(signal);
        drop(sub);
    }

    #[test]
    fn test_write_during_notification_is_deferred() {
        let signal = Signal::new(0);
        let (seen, cb) = recorder();

        let writer = signal.clone();
        let _clamp = signal.subscribe(move |v: &i32| {
            if *v > 10 {
                writer.set(10);
            }
        });
        let _log = signal.subscribe(cb);

        signal.set(42);

        assert_eq!(signal.get(), 10);
        // The logging subscriber finishes the first round with 42 before the
        // clamped value is delivered in a second round.
        assert_eq!(*seen.borrow(), vec![42, 10]);
    }

    #[test]
    fn test_clone_shares_cell() {
        let a = Signal::new(String::from("x"));
        let b = a.clone();
        b.set("y".to_string());
        assert_eq!(a.get(), "y");
    }
}
