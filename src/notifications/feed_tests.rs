use super::*;
use crate::notifications::NotificationEvents;
use crate::search::GlobalSearchResponse;
use crate::toast::ToastVariant;
use chrono::{Duration, Utc};
use parking_lot::Mutex;

/// In-memory server; every mutation fails while `failing` is set
#[derive(Default)]
struct FakeApi {
    stored: Mutex<Vec<Notification>>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    fn with(notifications: Vec<Notification>) -> Arc<Self> {
        Arc::new(FakeApi {
            stored: Mutex::new(notifications),
            ..Default::default()
        })
    }

    fn fail(&self, failing: bool) {
        *self.failing.lock() = failing;
    }

    fn check(&self, call: &str) -> Result<()> {
        self.calls.lock().push(call.to_string());
        if *self.failing.lock() {
            return Err(HeaderError::Network {
                endpoint: call.to_string(),
                message: "connection refused".into(),
            });
        }
        Ok(())
    }
}

impl HeaderApi for FakeApi {
    fn global_search(&self, _: &str) -> Result<GlobalSearchResponse> {
        Ok(GlobalSearchResponse::default())
    }

    fn fetch_notifications(&self) -> Result<Vec<Notification>> {
        self.check("fetch")?;
        Ok(self.stored.lock().clone())
    }

    fn mark_all_read(&self) -> Result<()> {
        self.check("mark_all_read")
    }

    fn delete_all(&self) -> Result<()> {
        self.check("delete_all")
    }

    fn mark_read(&self, id: &str) -> Result<()> {
        self.check(&format!("mark_read:{}", id))
    }

    fn delete_one(&self, id: &str) -> Result<()> {
        self.check(&format!("delete_one:{}", id))
    }
}

fn notification(id: &str, is_read: bool) -> Notification {
    Notification {
        id: id.to_string(),
        kind: "like".to_string(),
        is_read,
        ..Default::default()
    }
}

fn loaded_feed(api: &Arc<FakeApi>) -> NotificationFeed {
    let mut feed = NotificationFeed::new(api.clone());
    feed.refresh().unwrap();
    feed
}

fn sample() -> Vec<Notification> {
    vec![
        notification("a", false),
        notification("b", true),
        notification("c", false),
    ]
}

fn toast_messages(feed: &mut NotificationFeed) -> Vec<(ToastVariant, String)> {
    feed.toasts_mut()
        .drain()
        .into_iter()
        .map(|t| (t.variant, t.message))
        .collect()
}

#[test]
fn test_refresh_loads_and_counts_unread() {
    let api = FakeApi::with(sample());
    let feed = loaded_feed(&api);
    assert!(feed.is_loaded());
    assert_eq!(feed.notifications().len(), 3);
    assert_eq!(feed.unread_count(), 2);
}

#[test]
fn test_failed_refresh_keeps_previous_list() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);

    api.fail(true);
    assert!(feed.refresh().is_err());
    assert_eq!(feed.notifications().len(), 3);
    // Network errors are not surfaced as toasts
    assert!(feed.toasts().is_empty());
}

#[test]
fn test_failed_first_refresh_is_empty() {
    let api = FakeApi::with(sample());
    api.fail(true);
    let mut feed = NotificationFeed::new(api.clone());
    assert!(feed.refresh().is_err());
    assert!(feed.notifications().is_empty());
    assert!(!feed.is_loaded());
}

#[test]
fn test_mark_read_success() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);
    feed.mark_read("a").unwrap();
    assert_eq!(feed.unread_count(), 1);
    assert!(api.calls.lock().contains(&"mark_read:a".to_string()));
}

#[test]
fn test_mark_read_rolls_back_on_failure() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);
    api.fail(true);

    assert!(feed.mark_read("a").is_err());
    assert_eq!(feed.unread_count(), 2);
    assert_eq!(
        toast_messages(&mut feed),
        vec![(
            ToastVariant::Error,
            "Failed to mark notification as read".to_string()
        )]
    );
}

#[test]
fn test_mark_read_already_read_skips_remote() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);
    api.fail(true);

    feed.mark_read("b").unwrap();
    assert!(feed.notifications()[1].is_read);
    assert!(!api.calls.lock().iter().any(|c| c.starts_with("mark_read")));
    assert!(feed.toasts().is_empty());
}

#[test]
fn test_mark_read_unknown_id() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);
    assert!(matches!(
        feed.mark_read("zzz"),
        Err(HeaderError::NotificationNotFound(_))
    ));
    assert!(!api.calls.lock().iter().any(|c| c.starts_with("mark_read")));
}

#[test]
fn test_mark_all_read_and_rollback() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);

    api.fail(true);
    assert!(feed.mark_all_read().is_err());
    let flags: Vec<bool> = feed.notifications().iter().map(|n| n.is_read).collect();
    assert_eq!(flags, vec![false, true, false]);

    api.fail(false);
    toast_messages(&mut feed);
    feed.mark_all_read().unwrap();
    assert_eq!(feed.unread_count(), 0);
    assert_eq!(
        toast_messages(&mut feed),
        vec![(
            ToastVariant::Success,
            "All notifications marked as read!".to_string()
        )]
    );
}

#[test]
fn test_delete_restores_position_on_failure() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);

    api.fail(true);
    assert!(feed.delete("b").is_err());
    let ids: Vec<&str> = feed.notifications().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(
        toast_messages(&mut feed)[0].1,
        "Failed to delete notification"
    );

    api.fail(false);
    feed.delete("b").unwrap();
    let ids: Vec<&str> = feed.notifications().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "c"]);
    assert_eq!(
        toast_messages(&mut feed)[0].1,
        "Notification deleted successfully"
    );
}

#[test]
fn test_delete_all_and_rollback() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);

    api.fail(true);
    assert!(feed.delete_all().is_err());
    assert_eq!(feed.notifications().len(), 3);
    assert_eq!(
        toast_messages(&mut feed)[0].1,
        "Failed to delete all notifications"
    );

    api.fail(false);
    feed.delete_all().unwrap();
    assert!(feed.notifications().is_empty());
    assert_eq!(toast_messages(&mut feed)[0].1, "All notifications deleted");
}

#[test]
fn test_push_incoming_prepends_and_toasts() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);

    let mut incoming = notification("d", false);
    incoming.title = Some("Jane liked your post".into());
    feed.push_incoming(incoming);
    feed.push_incoming(notification("e", false));

    assert_eq!(feed.notifications()[0].id, "e");
    assert_eq!(feed.notifications()[1].id, "d");
    assert_eq!(feed.unread_count(), 4);
    let messages: Vec<String> = toast_messages(&mut feed).into_iter().map(|t| t.1).collect();
    assert_eq!(
        messages,
        vec!["🔔 Jane liked your post", "🔔 New notification!"]
    );
}

#[test]
fn test_push_incoming_replaces_duplicate_id() {
    let api = FakeApi::with(sample());
    let mut feed = loaded_feed(&api);
    feed.push_incoming(notification("c", false));
    let ids: Vec<&str> = feed.notifications().iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["c", "a", "b"]);
}

#[test]
fn test_pump_drains_subscription() {
    let api = FakeApi::with(vec![]);
    let mut feed = loaded_feed(&api);
    let hub = NotificationEvents::new();
    let subscription = hub.subscribe();

    hub.publish(notification("x", false));
    hub.publish(notification("y", false));
    assert_eq!(feed.pump(&subscription), 2);
    assert_eq!(feed.notifications()[0].id, "y");
    assert_eq!(feed.pump(&subscription), 0);
}

#[test]
fn test_grouped_views() {
    let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
    let mut recent = notification("recent", false);
    recent.created_at = Some(now - Duration::minutes(2));
    let mut old = notification("old", true);
    old.created_at = Some(now - Duration::days(90));

    let api = FakeApi::with(vec![recent, old]);
    let feed = loaded_feed(&api);
    let groups = feed.grouped_views(&now);

    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].0, TimeBucket::Today);
    assert_eq!(groups[0].1[0].time, "2m");
    assert_eq!(groups[1].0, TimeBucket::Older);
}
