pub mod collections;
pub mod sentences;
pub mod users;

use chrono::{SecondsFormat, Utc};

/// RFC3339 UTC with millisecond precision. Stored timestamps sort
/// lexicographically in chronological order.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
