//! Publish/subscribe of store events.
//!
//! Each subscriber gets its own unbounded channel, so events are delivered in
//! publish order and a slow reader never blocks the store. A [`Subscription`]
//! owns its slot on the bus and gives it back when dropped.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::trace;

use crate::protocol::StoreEvent;

type Subscribers = RefCell<HashMap<u64, Sender<StoreEvent>>>;

#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Rc<Subscribers>,
    next_id: Rc<Cell<u64>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber. Events published from now on are queued for it
    /// until the returned guard is dropped.
    pub fn subscribe(&self) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let (tx, rx) = unbounded::<StoreEvent>();
        self.subscribers.borrow_mut().insert(id, tx);
        trace!(subscription = id, "subscribed to store events");

        Subscription {
            id,
            rx,
            bus: Rc::downgrade(&self.subscribers),
        }
    }

    /// Queue an event for every live subscriber.
    pub fn publish(&self, event: StoreEvent) {
        let mut subscribers = self.subscribers.borrow_mut();
        // A receiver can only vanish without unsubscribing if its guard was
        // leaked with mem::forget; drop such senders here.
        subscribers.retain(|_, tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

/// A live registration on an [`EventBus`]. Dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    rx: Receiver<StoreEvent>,
    bus: Weak<Subscribers>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next queued event, if any. Never blocks.
    pub fn try_recv(&self) -> Option<StoreEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.bus.upgrade() {
            subscribers.borrow_mut().remove(&self.id);
            trace!(subscription = self.id, "unsubscribed from store events");
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
