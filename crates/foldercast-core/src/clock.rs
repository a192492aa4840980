//! Clock seam for derived timestamp fields

use chrono::{DateTime, Utc};

/// Source of "now" for derived-field computation.
///
/// Injected into the patch builder so tests can pin time.
pub trait Clock: Send + Sync {
    /// Current instant in UTC
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside of tests
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
