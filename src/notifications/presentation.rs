//! How a single notification is shown: icon, sender, action phrase, feed
//! excerpt and relative time.

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use super::types::{Notification, NotificationKind};

/// Characters of the feed description shown under like/comment rows
pub const FEED_EXCERPT_CHARS: usize = 30;

const FALLBACK_SENDER: &str = "User";
const FALLBACK_ACTION: &str = "New notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconGlyph {
    Heart,
    Message,
    UserPlus,
    Eye,
    Bell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconTone {
    Pink,
    Blue,
    Green,
    Purple,
    LightBlue,
    Gray,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationIcon {
    pub glyph: IconGlyph,
    pub tone: IconTone,
}

pub fn icon_for(kind: &NotificationKind) -> NotificationIcon {
    let (glyph, tone) = match kind {
        NotificationKind::Like => (IconGlyph::Heart, IconTone::Pink),
        NotificationKind::Comment => (IconGlyph::Message, IconTone::Blue),
        NotificationKind::Follow => (IconGlyph::UserPlus, IconTone::Green),
        NotificationKind::StoryLike => (IconGlyph::Heart, IconTone::Purple),
        NotificationKind::StoryView => (IconGlyph::Eye, IconTone::LightBlue),
        NotificationKind::Other(_) => (IconGlyph::Bell, IconTone::Gray),
    };
    NotificationIcon { glyph, tone }
}

/// Phrase following the sender name, e.g. "liked your post"
pub fn action_text(notification: &Notification) -> String {
    match notification.kind() {
        NotificationKind::Like | NotificationKind::StoryLike => "liked your post".to_string(),
        NotificationKind::Comment => "commented on your post".to_string(),
        NotificationKind::Follow => "started following you".to_string(),
        NotificationKind::StoryView | NotificationKind::Other(_) => non_blank(&notification.message)
            .or_else(|| non_blank(&notification.title))
            .unwrap_or(FALLBACK_ACTION)
            .to_string(),
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub fn sender_name(notification: &Notification) -> &str {
    notification
        .sender
        .as_ref()
        .and_then(|s| {
            non_blank(&s.user_name)
                .or_else(|| non_blank(&s.display_name))
                .or_else(|| non_blank(&s.name))
        })
        .unwrap_or(FALLBACK_SENDER)
}

/// Upper-cased first character of the sender name, for avatar placeholders
pub fn avatar_initial(notification: &Notification) -> String {
    sender_name(notification)
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Start of the liked/commented post's description
pub fn feed_excerpt(notification: &Notification) -> Option<String> {
    if !matches!(
        notification.kind(),
        NotificationKind::Like | NotificationKind::Comment
    ) {
        return None;
    }
    let description = notification
        .feed_info
        .as_ref()
        .and_then(|f| non_blank(&f.description))?;
    let head: String = description.chars().take(FEED_EXCERPT_CHARS).collect();
    Some(format!("{}...", head))
}

/// Age of `at` relative to `now`: "Just now", "5m", "3h", "2d", or a
/// M/D/YYYY date in `now`'s timezone once a week has passed.
///
/// Missing or future timestamps read as "Just now".
pub fn format_relative<Tz: TimeZone>(at: Option<DateTime<Utc>>, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(at) = at else {
        return "Just now".to_string();
    };

    let elapsed = now.with_timezone(&Utc).signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if hours < 24 {
        format!("{}h", hours)
    } else if days < 7 {
        format!("{}d", days)
    } else {
        at.with_timezone(&now.timezone())
            .format("%-m/%-d/%Y")
            .to_string()
    }
}

/// Everything a notification row needs, resolved once
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: String,
    pub icon: NotificationIcon,
    pub sender: String,
    pub avatar_initial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub time: String,
    pub is_read: bool,
}

impl NotificationView {
    pub fn build<Tz: TimeZone>(notification: &Notification, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        NotificationView {
            id: notification.id.clone(),
            icon: icon_for(&notification.kind()),
            sender: sender_name(notification).to_string(),
            avatar_initial: avatar_initial(notification),
            avatar_url: notification
                .sender
                .as_ref()
                .and_then(|s| s.avatar_url.clone()),
            action: action_text(notification),
            excerpt: feed_excerpt(notification),
            time: format_relative(
                notification.created_at.or(notification.timestamp),
                now,
            ),
            is_read: notification.is_read,
        }
    }
}
