//! Time buckets for the grouped notification list
//!
//! Boundaries are calendar midnights in the timezone of `now`, so "Today"
//! means the viewer's today rather than the last 24 hours.

use chrono::{DateTime, Days, NaiveDate, Offset, TimeZone, Utc};
use serde::Serialize;

use super::types::Notification;

/// Display group for a notification, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TimeBucket {
    Today,
    Yesterday,
    ThisWeek,
    ThisMonth,
    Older,
}

impl TimeBucket {
    pub const ALL: [TimeBucket; 5] = [
        TimeBucket::Today,
        TimeBucket::Yesterday,
        TimeBucket::ThisWeek,
        TimeBucket::ThisMonth,
        TimeBucket::Older,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TimeBucket::Today => "Today",
            TimeBucket::Yesterday => "Yesterday",
            TimeBucket::ThisWeek => "This Week",
            TimeBucket::ThisMonth => "This Month",
            TimeBucket::Older => "Older",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Start instants of the bucket windows, newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketBounds {
    pub today_start: DateTime<Utc>,
    pub yesterday_start: DateTime<Utc>,
    pub week_start: DateTime<Utc>,
    pub month_start: DateTime<Utc>,
}

impl BucketBounds {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        let days_back = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);

        BucketBounds {
            today_start: local_midnight(now, today),
            yesterday_start: local_midnight(now, days_back(1)),
            week_start: local_midnight(now, days_back(7)),
            month_start: local_midnight(now, days_back(30)),
        }
    }

    pub fn classify(&self, at: DateTime<Utc>) -> TimeBucket {
        if at >= self.today_start {
            TimeBucket::Today
        } else if at >= self.yesterday_start {
            TimeBucket::Yesterday
        } else if at >= self.week_start {
            TimeBucket::ThisWeek
        } else if at >= self.month_start {
            TimeBucket::ThisMonth
        } else {
            TimeBucket::Older
        }
    }
}

/// Midnight of `date` in `now`'s timezone
fn local_midnight<Tz: TimeZone>(now: &DateTime<Tz>, date: NaiveDate) -> DateTime<Utc> {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    match now.timezone().from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // Midnight skipped by a DST jump; use the current offset instead
        None => {
            let offset = i64::from(now.offset().fix().local_minus_utc());
            Utc.from_utc_datetime(&naive) - chrono::Duration::seconds(offset)
        }
    }
}

/// Partition notifications into time buckets.
///
/// Each notification lands in exactly one bucket, keyed by `createdAt`, then
/// `timestamp`, then `now`. Buckets come out in fixed order with empty ones
/// omitted; members keep their input order.
pub fn group_notifications<'a, Tz: TimeZone>(
    notifications: &'a [Notification],
    now: &DateTime<Tz>,
) -> Vec<(TimeBucket, Vec<&'a Notification>)> {
    let bounds = BucketBounds::at(now);
    let fallback = now.with_timezone(&Utc);

    let mut buckets: [Vec<&Notification>; 5] = Default::default();
    for notification in notifications {
        let bucket = bounds.classify(notification.occurred_at(fallback));
        buckets[bucket.index()].push(notification);
    }

    TimeBucket::ALL
        .into_iter()
        .zip(buckets)
        .filter(|(_, members)| !members.is_empty())
        .collect()
}
