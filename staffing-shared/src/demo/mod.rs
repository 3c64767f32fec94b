/// Sample data served when the database is not configured or a call fails
///
/// Everything here is deterministic for a given `now`: relative labels come
/// from fixed offsets, and timestamps hang off the start of the current UTC
/// day (see [`crate::dates::day_anchor`]).

pub mod catalogue;
pub mod fixtures;

use chrono::{DateTime, Utc};

/// `<prefix>_<millis>` id for a write that was not persisted
pub fn synthetic_id(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}", prefix, now.timestamp_millis())
}
