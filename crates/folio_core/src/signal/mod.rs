//! Page signal registry with explicit teardown handles.
//!
//! # Responsibility
//! - Deliver scroll, intersection, hash-change and command events from the
//!   host environment to registered listeners.
//! - Hand out [`Subscription`] handles that unregister on drop.
//!
//! # Invariants
//! - Single-threaded: the hub and its handles are `!Send`.
//! - A dropped or released subscription never receives another event, even
//!   when it is released by an earlier listener of the same dispatch.
//! - Dispatch never panics on re-entrant delivery to a busy listener; the
//!   busy listener is skipped.

use crate::nav::active_section::IntersectionEvent;
use crate::nav::carousel::GalleryCommand;
use log::{debug, warn};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

/// Signal channel a listener subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SignalKind {
    Scroll,
    Intersection,
    HashChange,
    /// Pointer/keyboard commands: gallery controls, menu toggle, nav clicks.
    Command,
}

impl SignalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scroll => "scroll",
            Self::Intersection => "intersection",
            Self::HashChange => "hash_change",
            Self::Command => "command",
        }
    }
}

/// Inbound event from the host environment.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Vertical scroll offset in pixels.
    Scroll { position: f64 },
    Intersection(IntersectionEvent),
    HashChange,
    Gallery(GalleryCommand),
    MenuToggle,
    /// A nav link was chosen.
    NavSelected { section_id: String },
}

impl PageEvent {
    pub fn kind(&self) -> SignalKind {
        match self {
            Self::Scroll { .. } => SignalKind::Scroll,
            Self::Intersection(_) => SignalKind::Intersection,
            Self::HashChange => SignalKind::HashChange,
            Self::Gallery(_) | Self::MenuToggle | Self::NavSelected { .. } => SignalKind::Command,
        }
    }
}

type Listener = Rc<RefCell<dyn FnMut(&PageEvent)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: BTreeMap<u64, (SignalKind, Listener)>,
}

/// In-process signal registry for one page.
#[derive(Clone, Default)]
pub struct SignalHub {
    registry: Rc<RefCell<Registry>>,
}

impl SignalHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for events of `kind`.
    ///
    /// The listener stays registered until the returned handle is released
    /// or dropped.
    #[must_use = "dropping the subscription unregisters the listener"]
    pub fn subscribe<F>(&self, kind: SignalKind, listener: F) -> Subscription
    where
        F: FnMut(&PageEvent) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let listener: Listener = Rc::new(RefCell::new(listener));
        registry.listeners.insert(id, (kind, listener));
        debug!(
            "event=signal_subscribe module=signal status=ok kind={} id={}",
            kind.as_str(),
            id
        );
        Subscription {
            id,
            kind,
            registry: Rc::downgrade(&self.registry),
            released: false,
        }
    }

    /// Delivers `event` to every listener of its kind in registration order.
    ///
    /// Returns the number of listeners that received the event.
    pub fn dispatch(&self, event: &PageEvent) -> usize {
        let kind = event.kind();
        let targets = self
            .registry
            .borrow()
            .listeners
            .iter()
            .filter(|(_, (listener_kind, _))| *listener_kind == kind)
            .map(|(id, (_, listener))| (*id, Rc::clone(listener)))
            .collect::<Vec<_>>();

        let mut delivered = 0;
        for (id, listener) in targets {
            if !self.registry.borrow().listeners.contains_key(&id) {
                continue;
            }
            let Ok(mut callback) = listener.try_borrow_mut() else {
                warn!(
                    "event=signal_dispatch module=signal status=skip reason=reentrant kind={} id={}",
                    kind.as_str(),
                    id
                );
                continue;
            };
            (&mut *callback)(event);
            delivered += 1;
        }
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }

    pub fn listener_count_for(&self, kind: SignalKind) -> usize {
        self.registry
            .borrow()
            .listeners
            .values()
            .filter(|(listener_kind, _)| *listener_kind == kind)
            .count()
    }
}

/// Teardown handle for one registered listener.
///
/// Dropping the handle unregisters the listener, so release happens on every
/// exit path including early returns and unwinding.
pub struct Subscription {
    id: u64,
    kind: SignalKind,
    registry: Weak<RefCell<Registry>>,
    released: bool,
}

impl Subscription {
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Whether the listener is still registered with a live hub.
    pub fn is_active(&self) -> bool {
        !self.released
            && self
                .registry
                .upgrade()
                .is_some_and(|registry| registry.borrow().listeners.contains_key(&self.id))
    }

    /// Unregisters now. Returns whether a listener was removed.
    pub fn unsubscribe(mut self) -> bool {
        self.release()
    }

    fn release(&mut self) -> bool {
        if self.released {
            return false;
        }
        self.released = true;
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        // Take the listener out before dropping it so its captures drop
        // outside the registry borrow.
        let removed = registry.borrow_mut().listeners.remove(&self.id);
        let was_registered = removed.is_some();
        drop(removed);
        if was_registered {
            debug!(
                "event=signal_unsubscribe module=signal status=ok kind={} id={}",
                self.kind.as_str(),
                self.id
            );
        }
        was_registered
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("released", &self.released)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::{PageEvent, SignalHub, SignalKind, Subscription};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn scroll(position: f64) -> PageEvent {
        PageEvent::Scroll { position }
    }

    #[test]
    fn dispatch_reaches_only_matching_kind() {
        let hub = SignalHub::new();
        let scrolls = Rc::new(Cell::new(0));
        let hashes = Rc::new(Cell::new(0));
        let scrolls_seen = Rc::clone(&scrolls);
        let hashes_seen = Rc::clone(&hashes);
        let _scroll = hub.subscribe(SignalKind::Scroll, move |_| {
            scrolls_seen.set(scrolls_seen.get() + 1)
        });
        let _hash = hub.subscribe(SignalKind::HashChange, move |_| {
            hashes_seen.set(hashes_seen.get() + 1)
        });

        assert_eq!(hub.dispatch(&scroll(10.0)), 1);
        assert_eq!(hub.dispatch(&PageEvent::HashChange), 1);
        assert_eq!(hub.dispatch(&PageEvent::MenuToggle), 0);
        assert_eq!(scrolls.get(), 1);
        assert_eq!(hashes.get(), 1);
    }

    #[test]
    fn dropping_subscription_unregisters_listener() {
        let hub = SignalHub::new();
        let subscription = hub.subscribe(SignalKind::Scroll, |_| {});
        assert_eq!(hub.listener_count(), 1);
        assert!(subscription.is_active());
        drop(subscription);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&scroll(1.0)), 0);
    }

    #[test]
    fn explicit_unsubscribe_reports_removal() {
        let hub = SignalHub::new();
        let subscription = hub.subscribe(SignalKind::Command, |_| {});
        assert!(subscription.unsubscribe());
        assert_eq!(hub.listener_count_for(SignalKind::Command), 0);
    }

    #[test]
    fn subscription_outliving_hub_is_inert() {
        let hub = SignalHub::new();
        let subscription = hub.subscribe(SignalKind::Scroll, |_| {});
        drop(hub);
        assert!(!subscription.is_active());
        assert!(!subscription.unsubscribe());
    }

    #[test]
    fn listener_released_mid_dispatch_is_not_called() {
        let hub = SignalHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let second_calls = Rc::new(Cell::new(0));

        let slot_for_first = Rc::clone(&slot);
        let _first = hub.subscribe(SignalKind::Scroll, move |_| {
            slot_for_first.borrow_mut().take();
        });
        let calls = Rc::clone(&second_calls);
        let second = hub.subscribe(SignalKind::Scroll, move |_| calls.set(calls.get() + 1));
        *slot.borrow_mut() = Some(second);

        assert_eq!(hub.dispatch(&scroll(5.0)), 1);
        assert_eq!(second_calls.get(), 0);
        assert_eq!(hub.listener_count(), 1);
    }

    #[test]
    fn listener_can_release_itself() {
        let hub = SignalHub::new();
        let slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot_for_listener = Rc::clone(&slot);
        let subscription = hub.subscribe(SignalKind::HashChange, move |_| {
            slot_for_listener.borrow_mut().take();
        });
        *slot.borrow_mut() = Some(subscription);

        assert_eq!(hub.dispatch(&PageEvent::HashChange), 1);
        assert_eq!(hub.listener_count(), 0);
        assert_eq!(hub.dispatch(&PageEvent::HashChange), 0);
    }

    #[test]
    fn reentrant_dispatch_skips_busy_listener() {
        let hub = SignalHub::new();
        let inner_hub = hub.clone();
        let nested_deliveries = Rc::new(Cell::new(usize::MAX));
        let nested = Rc::clone(&nested_deliveries);
        let _subscription = hub.subscribe(SignalKind::Scroll, move |event| {
            if let PageEvent::Scroll { position } = event {
                if *position < 1.0 {
                    nested.set(inner_hub.dispatch(&scroll(2.0)));
                }
            }
        });

        assert_eq!(hub.dispatch(&scroll(0.0)), 1);
        assert_eq!(nested_deliveries.get(), 0);
    }
}
