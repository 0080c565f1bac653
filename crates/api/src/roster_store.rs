// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-sport roster store.
//!
//! The cache only changes after the server confirms a mutation.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::request_response::{EntrantRequest, GenerateRosterRequest};
use crate::store::{StatusSlot, StoreStatus};
use podium_domain::{Entrant, EntrantId, Sport, WorldId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Cached roster of one sport in one world.
#[derive(Debug)]
pub struct RosterStore<B: Backend> {
    backend: Arc<B>,
    world_id: WorldId,
    sport: Sport,
    entrants: Mutex<Vec<Entrant>>,
    status: StatusSlot,
}

impl<B: Backend> RosterStore<B> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(backend: Arc<B>, world_id: WorldId, sport: Sport) -> Self {
        Self {
            backend,
            world_id,
            sport,
            entrants: Mutex::new(Vec::new()),
            status: StatusSlot::default(),
        }
    }

    /// Returns the loading and error status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.status.get()
    }

    /// Returns a copy of the cached roster.
    pub async fn entrants(&self) -> Vec<Entrant> {
        self.entrants.lock().await.clone()
    }

    /// Returns a cached entrant.
    pub async fn entrant(&self, entrant_id: &EntrantId) -> Option<Entrant> {
        self.entrants
            .lock()
            .await
            .iter()
            .find(|e| &e.id == entrant_id)
            .cloned()
    }

    /// Fetches the roster and replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch(&self) -> Result<Vec<Entrant>, ApiError> {
        self.status.begin();
        let result = async {
            let roster: Vec<Entrant> = self
                .backend
                .list_entrants(self.sport, &self.world_id)
                .await?;
            self.entrants.lock().await.clone_from(&roster);
            Ok(roster)
        }
        .await;
        self.status.finish(result)
    }

    /// Bulk-generates entrants and appends them to the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn generate(&self, count: u16) -> Result<Vec<Entrant>, ApiError> {
        self.status.begin();
        let result = async {
            let created: Vec<Entrant> = self
                .backend
                .generate_entrants(self.sport, &self.world_id, GenerateRosterRequest { count })
                .await?;
            self.entrants.lock().await.extend(created.iter().cloned());
            info!(sport = %self.sport, world = %self.world_id, count = created.len(), "Generated roster");
            Ok(created)
        }
        .await;
        self.status.finish(result)
    }

    /// Creates one entrant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, request: EntrantRequest) -> Result<Entrant, ApiError> {
        self.status.begin();
        let result = async {
            let entrant: Entrant = self
                .backend
                .create_entrant(self.sport, &self.world_id, request)
                .await?;
            self.entrants.lock().await.push(entrant.clone());
            info!(sport = %self.sport, entrant = %entrant.id, "Created entrant");
            Ok(entrant)
        }
        .await;
        self.status.finish(result)
    }

    /// Updates one entrant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(
        &self,
        entrant_id: &EntrantId,
        request: EntrantRequest,
    ) -> Result<Entrant, ApiError> {
        self.status.begin();
        let result = async {
            let updated: Entrant = self
                .backend
                .update_entrant(self.sport, entrant_id, request)
                .await?;
            let mut entrants = self.entrants.lock().await;
            match entrants.iter_mut().find(|e| &e.id == entrant_id) {
                Some(slot) => *slot = updated.clone(),
                None => entrants.push(updated.clone()),
            }
            info!(sport = %self.sport, entrant = %entrant_id, "Updated entrant");
            Ok(updated)
        }
        .await;
        self.status.finish(result)
    }

    /// Deletes one entrant.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, entrant_id: &EntrantId) -> Result<(), ApiError> {
        self.status.begin();
        let result = async {
            self.backend.delete_entrant(self.sport, entrant_id).await?;
            self.entrants.lock().await.retain(|e| &e.id != entrant_id);
            info!(sport = %self.sport, entrant = %entrant_id, "Deleted entrant");
            Ok(())
        }
        .await;
        self.status.finish(result)
    }

    /// Deletes the whole roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_all(&self) -> Result<(), ApiError> {
        self.status.begin();
        let result = async {
            self.backend
                .delete_all_entrants(self.sport, &self.world_id)
                .await?;
            self.entrants.lock().await.clear();
            info!(sport = %self.sport, world = %self.world_id, "Deleted roster");
            Ok(())
        }
        .await;
        self.status.finish(result)
    }

    /// Drops the cached roster.
    pub async fn clear(&self) {
        self.entrants.lock().await.clear();
    }
}
