//! Notification record types as delivered by the remote service

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Parse a wire timestamp: RFC 3339, a naive `YYYY-MM-DD[ T]HH:MM:SS` (read
/// as UTC), a bare date, or epoch milliseconds. Anything else is `None`.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(raw) => parse_timestamp_str(raw),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}

fn parse_timestamp_str(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Unparseable timestamps become `None` instead of failing the whole record
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse_timestamp))
}

/// Who triggered the notification
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSender {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        alias = "profileAvatar",
        alias = "avatar",
        skip_serializing_if = "Option::is_none"
    )]
    pub avatar_url: Option<String>,
}

/// The feed item a notification refers to
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedInfo {
    #[serde(default, alias = "dec", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

/// Recognized notification types; anything else is `Other`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    StoryLike,
    StoryView,
    Other(String),
}

impl NotificationKind {
    /// Case-insensitive parse of the wire `type` field
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "like" | "like_post" => NotificationKind::Like,
            "comment" | "reply" => NotificationKind::Comment,
            "follow" => NotificationKind::Follow,
            "story_like" => NotificationKind::StoryLike,
            "story_view" => NotificationKind::StoryView,
            other => NotificationKind::Other(other.to_string()),
        }
    }
}

/// One notification owned by the remote service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<NotificationSender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_info: Option<FeedInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub is_read: bool,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        NotificationKind::parse(&self.kind)
    }

    /// `createdAt`, then `timestamp`, then `fallback`
    pub fn occurred_at(&self, fallback: DateTime<Utc>) -> DateTime<Utc> {
        self.created_at.or(self.timestamp).unwrap_or(fallback)
    }
}

/// Wire shape of `GET /notifications`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NotificationList {
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_kind_parse_is_case_insensitive() {
        assert_eq!(NotificationKind::parse("LIKE_POST"), NotificationKind::Like);
        assert_eq!(NotificationKind::parse("Reply"), NotificationKind::Comment);
        assert_eq!(NotificationKind::parse("follow"), NotificationKind::Follow);
        assert_eq!(NotificationKind::parse("Story_Like"), NotificationKind::StoryLike);
        assert_eq!(NotificationKind::parse("story_view"), NotificationKind::StoryView);
        assert_eq!(
            NotificationKind::parse("mention"),
            NotificationKind::Other("mention".to_string())
        );
    }

    #[test]
    fn test_deserialize_wire_notification() {
        let json = r#"{
            "_id": "n1",
            "type": "LIKE_POST",
            "sender": {"userName": "jdoe", "profileAvatar": "https://cdn/x.png"},
            "feedInfo": {"dec": "Sunset over the bay", "contentUrl": "https://cdn/f.jpg"},
            "isRead": false,
            "createdAt": "2025-06-15T10:00:00Z"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.id, "n1");
        assert_eq!(n.kind(), NotificationKind::Like);
        let sender = n.sender.as_ref().unwrap();
        assert_eq!(sender.user_name.as_deref(), Some("jdoe"));
        assert_eq!(sender.avatar_url.as_deref(), Some("https://cdn/x.png"));
        assert_eq!(
            n.feed_info.as_ref().unwrap().description.as_deref(),
            Some("Sunset over the bay")
        );
        assert_eq!(
            n.created_at,
            Some(Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_minimal_notification_defaults() {
        let n: Notification = serde_json::from_str(r#"{"id": "n2"}"#).unwrap();
        assert_eq!(n.id, "n2");
        assert!(!n.is_read);
        assert!(n.sender.is_none());
        assert_eq!(n.kind(), NotificationKind::Other(String::new()));
    }

    #[test]
    fn test_occurred_at_fallback_chain() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let earlier = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();

        let mut n = Notification {
            id: "n".into(),
            ..Default::default()
        };
        assert_eq!(n.occurred_at(now), now);

        n.timestamp = Some(earlier);
        assert_eq!(n.occurred_at(now), earlier);

        n.created_at = Some(now);
        assert_eq!(n.occurred_at(earlier), now);
    }

    #[test]
    fn test_bad_timestamp_does_not_poison_list() {
        let json = r#"{"notifications": [
            {"_id": "ok", "createdAt": "2025-06-15T10:00:00Z"},
            {"_id": "odd", "createdAt": "2025-06-15 10:00:00"},
            {"_id": "junk", "createdAt": "last tuesday", "timestamp": 1749981600000},
            {"_id": "none", "createdAt": null, "timestamp": {"nested": true}}
        ]}"#;
        let list: NotificationList = serde_json::from_str(json).unwrap();
        assert_eq!(list.notifications.len(), 4);

        let expected = Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap();
        assert_eq!(list.notifications[0].created_at, Some(expected));
        assert_eq!(list.notifications[1].created_at, Some(expected));

        // Unparseable createdAt falls back to timestamp, then to now
        let junk = &list.notifications[2];
        assert_eq!(junk.created_at, None);
        assert_eq!(junk.occurred_at(Utc::now()), expected);

        let none = &list.notifications[3];
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(none.occurred_at(now), now);
    }

    #[test]
    fn test_parse_timestamp_bare_date() {
        assert_eq!(
            parse_timestamp(&Value::String("2025-06-15".into())),
            Some(Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp(&Value::Bool(true)), None);
    }

    #[test]
    fn test_notification_list_missing_field() {
        let list: NotificationList = serde_json::from_str("{}").unwrap();
        assert!(list.notifications.is_empty());
    }
}
