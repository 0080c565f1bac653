// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The week gate store of one world.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::store::{StatusSlot, StoreStatus};
use podium_domain::{GatedEvent, WeekStatus, WorldId, week_status};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// Cached week status of one world.
#[derive(Debug)]
pub struct WeekStatusStore<B: Backend> {
    backend: Arc<B>,
    world_id: WorldId,
    current: Mutex<Option<WeekStatus>>,
    status: StatusSlot,
}

impl<B: Backend> WeekStatusStore<B> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(backend: Arc<B>, world_id: WorldId) -> Self {
        Self {
            backend,
            world_id,
            current: Mutex::new(None),
            status: StatusSlot::default(),
        }
    }

    /// Returns the loading and error status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.status.get()
    }

    /// Returns the cached week status.
    pub async fn current(&self) -> Option<WeekStatus> {
        self.current.lock().await.clone()
    }

    /// Fetches the week status from the server.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a date key does not parse.
    pub async fn fetch(&self) -> Result<WeekStatus, ApiError> {
        self.status.begin();
        let result = async {
            let status: WeekStatus = self
                .backend
                .get_week_status(&self.world_id)
                .await?
                .into_week_status()?;
            debug!(
                world = %self.world_id,
                week = ?status.current_unlocked_week,
                complete = status.is_week_complete,
                "Fetched week status"
            );
            *self.current.lock().await = Some(status.clone());
            Ok(status)
        }
        .await;
        self.status.finish(result)
    }

    /// Returns the cached status, fetching it first if there is none.
    ///
    /// # Errors
    ///
    /// Same as [`WeekStatusStore::fetch`].
    pub async fn current_or_fetch(&self) -> Result<WeekStatus, ApiError> {
        if let Some(status) = self.current().await {
            return Ok(status);
        }
        self.fetch().await
    }

    /// Recomputes the week status from the given events without a request.
    ///
    /// # Errors
    ///
    /// Returns an error if the unlocked week's dates cannot be listed.
    pub async fn recompute(&self, events: &[GatedEvent]) -> Result<WeekStatus, ApiError> {
        let status: WeekStatus = week_status(events)?;
        *self.current.lock().await = Some(status.clone());
        Ok(status)
    }

    /// Drops the cached status, so the next run request fetches it again.
    pub async fn invalidate(&self) {
        *self.current.lock().await = None;
    }
}
