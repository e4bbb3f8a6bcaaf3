//! Clock and identifier source for DTSTAMP and UID.

use chrono::{DateTime, Utc};

/// Basic ISO 8601 UTC format used for DTSTART, DTEND and DTSTAMP.
pub const UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Domain tag appended to generated UIDs.
pub const DEFAULT_UID_DOMAIN: &str = "vcal2ics";

/// Supplies the non-deterministic parts of an event.
pub trait Stamper {
    fn now(&self) -> DateTime<Utc>;
    fn uid(&self) -> String;
}

/// Wall clock and random v4 UUIDs.
#[derive(Debug, Clone)]
pub struct SystemStamper {
    domain: String,
}

impl SystemStamper {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl Default for SystemStamper {
    fn default() -> Self {
        Self::new(DEFAULT_UID_DOMAIN)
    }
}

impl Stamper for SystemStamper {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn uid(&self) -> String {
        format!("{}@{}", uuid::Uuid::new_v4(), self.domain)
    }
}

/// Fixed clock and counting UIDs, for reproducible output.
#[derive(Debug)]
pub struct FixedStamper {
    now: DateTime<Utc>,
    counter: std::cell::Cell<u64>,
}

impl FixedStamper {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now,
            counter: std::cell::Cell::new(0),
        }
    }
}

impl Stamper for FixedStamper {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn uid(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("fixed-{n}@{DEFAULT_UID_DOMAIN}")
    }
}
