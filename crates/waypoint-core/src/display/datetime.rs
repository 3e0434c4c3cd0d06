//! DateTime display utilities.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` in the system timezone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Like [`LocalDateTime`], for millisecond epoch values as stored on saved
/// projects. Out-of-range values print as the raw number.
pub struct LocalMillis(pub i64);

impl fmt::Display for LocalMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Timestamp::from_millisecond(self.0) {
            Ok(timestamp) => write!(f, "{}", LocalDateTime(&timestamp)),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}
