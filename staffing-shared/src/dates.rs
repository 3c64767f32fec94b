/// Date helpers shared by demo fixtures, saved jobs and the job feed

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// Human label for how long ago `date` was, relative to `now`
///
/// `Today`, `Yesterday`, `N days ago`, `N week(s) ago`, then `Mon D`.
pub fn format_posted_date(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - date).num_days();

    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        d if d < 7 => format!("{} days ago", d),
        d if d < 30 => {
            let weeks = d / 7;
            format!("{} week{} ago", weeks, if weeks > 1 { "s" } else { "" })
        }
        _ => date.format("%b %-d").to_string(),
    }
}

/// Parses RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` timestamp, or a bare date
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

/// Start of the UTC day containing `now`
///
/// Demo timestamps hang off this so repeated reads within a day agree.
pub fn day_anchor(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Whole days from `now` until `deadline`, rounded up
pub fn days_until(deadline: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let seconds = (deadline - now).num_seconds();
    let day = Duration::days(1).num_seconds();
    if seconds >= 0 {
        (seconds + day - 1) / day
    } else {
        -((-seconds) / day)
    }
}
