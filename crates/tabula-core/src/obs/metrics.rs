use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::BTreeMap};
use time::OffsetDateTime;

///
/// EventState
/// Ephemeral, in-memory counters for index construction.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct EventState {
    pub ops: EventOps,
    pub indexes: BTreeMap<String, IndexCounters>,
    pub since_ms: u64,
}

impl Default for EventState {
    fn default() -> Self {
        Self {
            ops: EventOps::default(),
            indexes: BTreeMap::new(),
            since_ms: now_millis(),
        }
    }
}

///
/// EventOps
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventOps {
    // Builds
    pub index_builds: u64,
    pub unique_index_builds: u64,
    pub failed_builds: u64,

    // Work
    pub rows_scanned: u64,
    pub index_entries: u64,
    pub unique_violations: u64,

    // Schema changes
    pub indexes_created: u64,
    pub indexes_replaced: u64,
}

///
/// IndexCounters
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct IndexCounters {
    pub builds: u64,
    pub failed_builds: u64,
    pub rows_scanned: u64,
    pub entries: u64,
    pub unique_violations: u64,
    pub created: u64,
    pub replaced: u64,
}

thread_local! {
    static EVENT_STATE: RefCell<EventState> = RefCell::new(EventState::default());
}

/// Borrow metrics immutably.
pub(crate) fn with_state<R>(f: impl FnOnce(&EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&m.borrow()))
}

/// Borrow metrics mutably.
pub(crate) fn with_state_mut<R>(f: impl FnOnce(&mut EventState) -> R) -> R {
    EVENT_STATE.with(|m| f(&mut m.borrow_mut()))
}

/// Borrow (creating if absent) the counters of one index.
pub(crate) fn index_entry<'a>(state: &'a mut EventState, index: &str) -> &'a mut IndexCounters {
    state.indexes.entry(index.to_string()).or_default()
}

/// Reset all counters and restart the window.
pub(crate) fn reset_all() {
    with_state_mut(|m| *m = EventState::default());
}

fn now_millis() -> u64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

    u64::try_from(nanos).unwrap_or_default()
}
