// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pieces shared by every store: the status slot and the in-flight registry.

use crate::error::ApiError;
use podium_domain::EventId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

/// Loading and error state of a store, for passive display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStatus {
    pending: usize,
    error: Option<String>,
}

impl StoreStatus {
    /// Returns whether any operation is under way.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.pending > 0
    }

    /// Returns the message of the last failed operation.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Shared handle to a store's status slot.
#[derive(Debug, Clone, Default)]
pub(crate) struct StatusSlot {
    inner: Arc<Mutex<StoreStatus>>,
}

impl StatusSlot {
    fn with<R>(&self, f: impl FnOnce(&mut StoreStatus) -> R) -> R {
        let mut status = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut status)
    }

    /// Returns a copy of the current status.
    pub(crate) fn get(&self) -> StoreStatus {
        self.with(|s| s.clone())
    }

    /// Marks an operation as started and clears the previous error.
    pub(crate) fn begin(&self) {
        self.with(|s| {
            s.pending += 1;
            s.error = None;
        });
    }

    /// Marks an operation as finished, recording its error if it failed.
    pub(crate) fn finish<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        self.with(|s| {
            s.pending = s.pending.saturating_sub(1);
            if let Err(err) = &result {
                s.error = Some(err.to_string());
            }
        });
        result
    }

    /// Records a failure that happened before any operation started.
    pub(crate) fn fail<T>(&self, err: ApiError) -> Result<T, ApiError> {
        self.with(|s| s.error = Some(err.to_string()));
        Err(err)
    }
}

/// Registry of events with a run request under way.
#[derive(Debug, Clone, Default)]
pub struct InFlight {
    events: Arc<Mutex<HashSet<EventId>>>,
}

impl InFlight {
    /// Claims an event for one request.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::RequestInFlight` if the event is already claimed.
    pub fn try_acquire(&self, event_id: &EventId) -> Result<InFlightGuard, ApiError> {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        if !events.insert(event_id.clone()) {
            return Err(ApiError::RequestInFlight {
                event_id: event_id.clone(),
            });
        }
        Ok(InFlightGuard {
            events: Arc::clone(&self.events),
            event_id: event_id.clone(),
        })
    }

    /// Returns whether a request for the event is under way.
    #[must_use]
    pub fn contains(&self, event_id: &EventId) -> bool {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(event_id)
    }
}

/// Releases the event's claim when dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    events: Arc<Mutex<HashSet<EventId>>>,
    event_id: EventId,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.event_id);
    }
}
