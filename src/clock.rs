//! All things time-related.

pub use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};

/// Tells time and returns the time.
///
/// Generally you will want to retrieve time using [`SystemClock`],
/// but in tests you may want to implement a `Clock` with a fixed time.
pub trait Clock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;

    /// The start of a search window of length `window` ending now.
    fn window_start(&self, window: TimeDelta) -> DateTime<Utc> {
        self.now() - window
    }
}

/// Interacts with the system clock to get the current time.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Formats a timestamp the way the search API expects it: ISO-8601,
/// UTC, whole seconds.
///
/// # Examples
///
/// ```
/// use xrecent::clock::{DateTime, Utc, iso8601};
/// let dt = DateTime::parse_from_rfc3339("2025-05-23T10:13:00.250-07:00")
///     .unwrap()
///     .with_timezone(&Utc);
/// assert_eq!(iso8601(&dt), "2025-05-23T17:13:00Z");
/// ```
pub fn iso8601(datetime: &DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    mod clock {
        use super::super::*;
        use crate::test_utils::FrozenClock;
        use std::ops::Sub;

        #[test]
        fn it_returns_the_system_time() {
            let clock = SystemClock::default();
            let delta = Utc::now().sub(clock.now());
            let secs = delta.num_seconds();
            assert_eq!(secs, 0);
        }

        #[test]
        fn it_returns_the_start_of_a_window() {
            let clock = FrozenClock::default();
            let start = clock.window_start(TimeDelta::hours(24));
            assert_eq!(iso8601(&start), "2025-05-22T17:13:00Z");
        }

        #[test]
        fn it_returns_the_start_of_a_window_spanning_a_week() {
            let clock = FrozenClock::default();
            let start = clock.window_start(TimeDelta::days(7));
            assert_eq!(iso8601(&start), "2025-05-16T17:13:00Z");
        }
    }
}
