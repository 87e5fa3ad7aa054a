//! The header's in-memory notification list
//!
//! Mutations are optimistic: the local list changes first, then the remote
//! call runs. If the remote call fails the local change is rolled back and an
//! error toast is queued, so the list never claims a state the server
//! rejected.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use tracing::{info, instrument, warn};

use super::events::Subscription;
use super::grouping::{group_notifications, TimeBucket};
use super::presentation::NotificationView;
use super::types::Notification;
use crate::api::HeaderApi;
use crate::error::{ErrorSeverity, HeaderError, Result};
use crate::toast::ToastManager;

const INCOMING_FALLBACK_TITLE: &str = "New notification!";

pub struct NotificationFeed {
    api: Arc<dyn HeaderApi>,
    notifications: Vec<Notification>,
    loaded: bool,
    toasts: ToastManager,
}

impl NotificationFeed {
    pub fn new(api: Arc<dyn HeaderApi>) -> Self {
        NotificationFeed {
            api,
            notifications: Vec::new(),
            loaded: false,
            toasts: ToastManager::new(),
        }
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    pub fn toasts_mut(&mut self) -> &mut ToastManager {
        &mut self.toasts
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Replace the whole list with a fresh server copy
    pub fn replace(&mut self, notifications: Vec<Notification>) {
        self.notifications = notifications;
        self.loaded = true;
    }

    /// Fetch the list from the server.
    ///
    /// On failure a previously loaded list is kept; a feed that never loaded
    /// stays empty. Only an expired session is surfaced as a toast.
    #[instrument(skip(self))]
    pub fn refresh(&mut self) -> Result<usize> {
        match self.api.fetch_notifications() {
            Ok(list) => {
                info!(count = list.len(), "Notifications refreshed");
                self.replace(list);
                Ok(self.notifications.len())
            }
            Err(e) => {
                warn!(error = %e, kept = self.notifications.len(), "Notification fetch failed");
                if !self.loaded {
                    self.notifications.clear();
                }
                if e.severity() == ErrorSeverity::Critical {
                    self.toasts.push_error("Could not load notifications", &e);
                }
                Err(e)
            }
        }
    }

    /// A notification pushed by the server: show it first and announce it
    pub fn push_incoming(&mut self, notification: Notification) {
        let title = notification
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(INCOMING_FALLBACK_TITLE);
        self.toasts.info(format!("🔔 {}", title));

        info!(notification_id = %notification.id, "Incoming notification");
        self.notifications.retain(|n| n.id != notification.id);
        self.notifications.insert(0, notification);
    }

    /// Apply everything queued on `subscription`; returns how many arrived
    pub fn pump(&mut self, subscription: &Subscription) -> usize {
        let mut received = 0;
        while let Some(notification) = subscription.try_next() {
            self.push_incoming(notification);
            received += 1;
        }
        received
    }

    /// Mark one notification read; already-read ones make no remote call
    #[instrument(skip(self))]
    pub fn mark_read(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        if self.notifications[index].is_read {
            return Ok(());
        }
        self.notifications[index].is_read = true;

        if let Err(e) = self.api.mark_read(id) {
            warn!(error = %e, notification_id = %id, "Mark read failed, rolling back");
            if let Some(n) = self.notifications.iter_mut().find(|n| n.id == id) {
                n.is_read = false;
            }
            self.toasts.error("Failed to mark notification as read");
            return Err(e);
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn mark_all_read(&mut self) -> Result<()> {
        let previous: Vec<bool> = self.notifications.iter().map(|n| n.is_read).collect();
        for n in &mut self.notifications {
            n.is_read = true;
        }

        match self.api.mark_all_read() {
            Ok(()) => {
                self.toasts.success("All notifications marked as read!");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Mark all read failed, rolling back");
                for (n, was_read) in self.notifications.iter_mut().zip(previous) {
                    n.is_read = was_read;
                }
                self.toasts.error("Failed to mark notifications as read");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub fn delete(&mut self, id: &str) -> Result<()> {
        let index = self.position(id)?;
        let removed = self.notifications.remove(index);

        match self.api.delete_one(id) {
            Ok(()) => {
                self.toasts.success("Notification deleted successfully");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, notification_id = %id, "Delete failed, restoring");
                let index = index.min(self.notifications.len());
                self.notifications.insert(index, removed);
                self.toasts.error("Failed to delete notification");
                Err(e)
            }
        }
    }

    #[instrument(skip(self))]
    pub fn delete_all(&mut self) -> Result<()> {
        let previous = std::mem::take(&mut self.notifications);

        match self.api.delete_all() {
            Ok(()) => {
                info!(deleted = previous.len(), "All notifications deleted");
                self.toasts.success("All notifications deleted");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Delete all failed, restoring");
                self.notifications = previous;
                self.toasts.error("Failed to delete all notifications");
                Err(e)
            }
        }
    }

    pub fn grouped<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Vec<(TimeBucket, Vec<&Notification>)> {
        group_notifications(&self.notifications, now)
    }

    /// Grouped list resolved into display rows
    pub fn grouped_views<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
    ) -> Vec<(TimeBucket, Vec<NotificationView>)>
    where
        Tz::Offset: std::fmt::Display,
    {
        self.grouped(now)
            .into_iter()
            .map(|(bucket, members)| {
                let views = members
                    .into_iter()
                    .map(|n| NotificationView::build(n, now))
                    .collect();
                (bucket, views)
            })
            .collect()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.notifications
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| HeaderError::NotificationNotFound(id.to_string()))
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
