use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::TransactionId;

const JITTER_RANGE: u128 = 1000;

/// Generates an integer id `millis * 1000 + jitter`.
///
/// `taken` holds the textual form of every id already stored in any month; a
/// colliding candidate is bumped until it is free.
pub fn next_id(now: DateTime<Utc>, taken: &HashSet<String>) -> TransactionId {
    let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
    let jitter = (Uuid::new_v4().as_u128() % JITTER_RANGE) as u64;
    let mut candidate = millis.saturating_mul(1000).saturating_add(jitter);
    while taken.contains(&candidate.to_string()) {
        candidate = candidate.wrapping_add(1);
    }
    TransactionId::from_u64(candidate)
}
