// Id sources. Viewer connections and stored records draw from separate
// sequences so stream churn never shows up in match or goal ids.

use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

use crate::use_cases::registry::SubscriberId;

static SUBSCRIBER_IDS: AtomicU64 = AtomicU64::new(1);

// Seeded from the wall clock in milliseconds: created records stay clear of
// the small numeric ids of the seeded fixtures and of ids from earlier runs.
static RECORD_IDS: LazyLock<AtomicU64> = LazyLock::new(|| {
    let seed = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
    AtomicU64::new(seed)
});

/// Identity of a new viewer connection, unique for the process lifetime.
pub fn next_subscriber_id() -> SubscriberId {
    SUBSCRIBER_IDS.fetch_add(1, Ordering::Relaxed)
}

/// Id for a new match or goal, in the string form the API exposes.
pub fn next_record_id() -> String {
    RECORD_IDS.fetch_add(1, Ordering::Relaxed).to_string()
}
