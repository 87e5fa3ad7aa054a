//! Incoming-notification event hub
//!
//! Whatever receives pushed notifications (a socket, a poller, stdin) publishes
//! them here. Each subscriber gets its own unbounded channel. A
//! [`Subscription`] removes itself from the hub when dropped, so a torn-down
//! view stops receiving events without any manual bookkeeping.

use std::sync::{Arc, Weak};

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tracing::{debug, trace};

use super::types::Notification;

type SubscriberList = Mutex<Vec<(u64, async_channel::Sender<Notification>)>>;

#[derive(Default)]
struct HubInner {
    subscribers: SubscriberList,
    next_id: Mutex<u64>,
}

/// Fan-out of incoming notifications to live subscribers
#[derive(Clone, Default)]
pub struct NotificationEvents {
    inner: Arc<HubInner>,
}

impl NotificationEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let id = {
            let mut next = self.inner.next_id.lock();
            *next += 1;
            *next
        };
        let (tx, rx) = async_channel::unbounded();
        self.inner.subscribers.lock().push((id, tx));
        debug!(subscription_id = id, "Notification subscriber added");

        Subscription {
            id,
            receiver: rx,
            hub: Arc::downgrade(&self.inner),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.lock().len()
    }

    /// Deliver to every subscriber; returns how many received it
    pub fn publish(&self, notification: Notification) -> usize {
        let mut subscribers = self.inner.subscribers.lock();
        subscribers.retain(|(_, tx)| !tx.is_closed());
        for (id, tx) in subscribers.iter() {
            if tx.try_send(notification.clone()).is_err() {
                trace!(subscription_id = id, "Subscriber channel closed mid-publish");
            }
        }
        debug!(
            notification_id = %notification.id,
            delivered = subscribers.len(),
            "Published notification"
        );
        subscribers.len()
    }

    /// Parse a wire-format notification and publish it
    pub fn publish_json(&self, payload: &str) -> Result<usize> {
        let notification: Notification =
            serde_json::from_str(payload).context("Invalid notification payload")?;
        Ok(self.publish(notification))
    }
}

/// A live subscription; unsubscribes on drop
pub struct Subscription {
    id: u64,
    receiver: async_channel::Receiver<Notification>,
    hub: Weak<HubInner>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Next pending notification without blocking
    pub fn try_next(&self) -> Option<Notification> {
        self.receiver.try_recv().ok()
    }

    /// Await the next notification; None once the hub is gone
    pub async fn next(&self) -> Option<Notification> {
        self.receiver.recv().await.ok()
    }

    /// Explicit unsubscribe, same as dropping
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.subscribers.lock().retain(|(id, _)| *id != self.id);
            debug!(subscription_id = self.id, "Notification subscriber removed");
        }
    }
}
