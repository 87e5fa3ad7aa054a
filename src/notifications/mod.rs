//! Notifications module - Header notification dropdown
//!
//! # Module Structure
//!
//! - `types` - Wire records (Notification, NotificationSender, FeedInfo)
//! - `grouping` - Today / Yesterday / This Week / This Month / Older buckets
//! - `presentation` - Icon, sender, action phrase and relative time per row
//! - `events` - Subscription hub for pushed notifications
//! - `feed` - The in-memory list with optimistic, rolled-back mutations

mod events;
mod feed;
mod grouping;
mod presentation;
mod types;

pub use types::{FeedInfo, Notification, NotificationKind, NotificationList, NotificationSender};

pub use grouping::{group_notifications, BucketBounds, TimeBucket};

pub use presentation::{
    action_text, avatar_initial, feed_excerpt, format_relative, icon_for, sender_name, IconGlyph,
    IconTone, NotificationIcon, NotificationView, FEED_EXCERPT_CHARS,
};

pub use events::{NotificationEvents, Subscription};

pub use feed::NotificationFeed;
