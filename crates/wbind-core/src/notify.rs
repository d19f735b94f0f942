#![forbid(unsafe_code)]

//! Listener sets for change notification.
//!
//! A [`Notifier<E>`] is a shared, single-threaded list of callbacks receiving
//! events of type `E`. Subscribing returns a [`Subscription`] guard; the
//! notifier only holds a weak reference to each callback, so dropping the
//! guard unsubscribes.
//!
//! # Invariants
//!
//! 1. Listeners are notified in registration order.
//! 2. Dropping a [`Subscription`] removes the callback before the next
//!    notification cycle.
//! 3. Dead callbacks are pruned lazily during notification.
//! 4. A listener may subscribe or drop subscriptions while being notified;
//!    the change takes effect on the next cycle.
//!
//! # Failure Modes
//!
//! - **Listener panics**: the panic unwinds through [`Notifier::notify`] to
//!   the mutating caller. Listeners after the panicking one are not called
//!   for that event.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Callback<E> = dyn Fn(&E);

/// Shared list of weakly held callbacks.
pub struct Notifier<E> {
    callbacks: Rc<RefCell<Vec<Weak<Callback<E>>>>>,
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            callbacks: Rc::clone(&self.callbacks),
        }
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self {
            callbacks: Rc::new(RefCell::new(Vec::new())),
        }
    }
}

impl<E> fmt::Debug for Notifier<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<E> Notifier<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.callbacks
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Whether `other` shares this notifier's listener list.
    #[must_use]
    pub fn same_listeners(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.callbacks, &other.callbacks)
    }

    /// Deliver `event` to every live listener. Returns how many were called.
    pub fn notify(&self, event: &E) -> usize {
        // Snapshot first so callbacks can touch the list without a borrow panic.
        let live: Vec<Rc<Callback<E>>> = {
            let mut callbacks = self.callbacks.borrow_mut();
            callbacks.retain(|w| w.strong_count() > 0);
            callbacks.iter().filter_map(Weak::upgrade).collect()
        };
        for callback in &live {
            callback(event);
        }
        live.len()
    }
}

impl<E: 'static> Notifier<E> {
    /// Register `callback`; it stays registered while the returned guard lives.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) -> Subscription {
        let strong: Rc<Callback<E>> = Rc::new(callback);
        self.callbacks.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }
}

/// RAII guard keeping a callback registered.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn notifies_in_registration_order() {
        let notifier = Notifier::<u32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = Rc::clone(&log);
        let _s1 = notifier.subscribe(move |v| l1.borrow_mut().push(("first", *v)));
        let l2 = Rc::clone(&log);
        let _s2 = notifier.subscribe(move |v| l2.borrow_mut().push(("second", *v)));

        assert_eq!(notifier.notify(&7), 2);
        assert_eq!(*log.borrow(), vec![("first", 7), ("second", 7)]);
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let notifier = Notifier::<()>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let sub = notifier.subscribe(move |_| h.set(h.get() + 1));

        notifier.notify(&());
        drop(sub);
        assert_eq!(notifier.notify(&()), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(notifier.subscriber_count(), 0);
    }

    fn deliver<E>(notifier: &Notifier<E>, event: &E) -> usize {
        notifier.notify(event)
    }

    #[test]
    fn notify_needs_no_static_event_type() {
        let borrowed = String::from("local");
        let notifier = Notifier::<&str>::new();
        assert_eq!(deliver(&notifier, &borrowed.as_str()), 0);

        let owned = Notifier::<u8>::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = owned.subscribe(move |v| h.set(h.get() + u32::from(*v)));
        assert_eq!(deliver(&owned, &3), 1);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn clones_share_listeners() {
        let a = Notifier::<i32>::new();
        let b = a.clone();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let _sub = a.subscribe(move |v| h.set(h.get() + v));

        b.notify(&5);
        assert_eq!(hits.get(), 5);
        assert!(a.same_listeners(&b));
        assert!(!a.same_listeners(&Notifier::new()));
    }

    #[test]
    fn subscribing_during_notification_takes_effect_next_cycle() {
        let notifier = Notifier::<()>::new();
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));
        let late_hits = Rc::new(Cell::new(0));

        let n = notifier.clone();
        let late_store = Rc::clone(&late);
        let late_counter = Rc::clone(&late_hits);
        let _outer = notifier.subscribe(move |_| {
            let c = Rc::clone(&late_counter);
            late_store
                .borrow_mut()
                .push(n.subscribe(move |_| c.set(c.get() + 1)));
        });

        assert_eq!(notifier.notify(&()), 1);
        assert_eq!(late_hits.get(), 0);
        assert_eq!(notifier.notify(&()), 2);
        assert_eq!(late_hits.get(), 1);
    }
}
