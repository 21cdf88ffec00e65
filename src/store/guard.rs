//! Single-flight guard for page fetches.

use std::sync::Mutex;

use super::{lock, StoreState};
use crate::error::{FeedError, FeedResult};

/// Holds the store's fetch slot for the lifetime of one fetch.
///
/// Acquired under the state lock before any await; released on drop, so
/// the slot frees up on success, failure, panic or a dropped future alike.
#[derive(Debug)]
pub(super) struct FetchGuard<'a> {
    state: &'a Mutex<StoreState>,
    armed: bool,
}

impl<'a> FetchGuard<'a> {
    /// Claim the slot, or fail with `AlreadyLoading`.
    pub(super) fn acquire(state: &'a Mutex<StoreState>) -> FeedResult<Self> {
        let mut guarded = lock(state);
        if guarded.fetch_in_flight {
            return Err(FeedError::AlreadyLoading);
        }
        guarded.fetch_in_flight = true;
        Ok(Self { state, armed: true })
    }

    /// Claim the slot from a caller that already holds the lock.
    pub(super) fn claim_locked(
        state: &'a Mutex<StoreState>,
        guarded: &mut StoreState,
    ) -> FeedResult<Self> {
        if guarded.fetch_in_flight {
            return Err(FeedError::AlreadyLoading);
        }
        guarded.fetch_in_flight = true;
        Ok(Self { state, armed: true })
    }

    /// Release the slot inside the caller's critical section.
    pub(super) fn release_locked(mut self, guarded: &mut StoreState) {
        guarded.fetch_in_flight = false;
        self.armed = false;
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            lock(self.state).fetch_in_flight = false;
        }
    }
}
