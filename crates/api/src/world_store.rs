// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::request_response::CreateWorldRequest;
use crate::store::{StatusSlot, StoreStatus};
use podium_domain::{World, WorldId};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// Cached list of worlds.
#[derive(Debug)]
pub struct WorldStore<B: Backend> {
    backend: Arc<B>,
    worlds: Mutex<Vec<World>>,
    status: StatusSlot,
}

impl<B: Backend> WorldStore<B> {
    /// Creates an empty store.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            worlds: Mutex::new(Vec::new()),
            status: StatusSlot::default(),
        }
    }

    /// Returns the loading and error status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.status.get()
    }

    /// Returns a copy of the cached worlds.
    pub async fn worlds(&self) -> Vec<World> {
        self.worlds.lock().await.clone()
    }

    /// Fetches every world and replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn fetch(&self) -> Result<Vec<World>, ApiError> {
        self.status.begin();
        let result = async {
            let worlds: Vec<World> = self.backend.list_worlds().await?;
            self.worlds.lock().await.clone_from(&worlds);
            Ok(worlds)
        }
        .await;
        self.status.finish(result)
    }

    /// Fetches one world and refreshes it in the cache.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if the server does not know the world.
    pub async fn get(&self, world_id: &WorldId) -> Result<World, ApiError> {
        self.status.begin();
        let result = async {
            let world: World = self.backend.get_world(world_id).await?;
            let mut worlds = self.worlds.lock().await;
            match worlds.iter_mut().find(|w| &w.id == world_id) {
                Some(slot) => *slot = world.clone(),
                None => worlds.push(world.clone()),
            }
            Ok(world)
        }
        .await;
        self.status.finish(result)
    }

    /// Creates a world.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, request: CreateWorldRequest) -> Result<World, ApiError> {
        self.status.begin();
        let result = async {
            let world: World = self.backend.create_world(request).await?;
            self.worlds.lock().await.push(world.clone());
            info!(world = %world.id, name = %world.name, "Created world");
            Ok(world)
        }
        .await;
        self.status.finish(result)
    }

    /// Deletes a world.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, world_id: &WorldId) -> Result<(), ApiError> {
        self.status.begin();
        let result = async {
            self.backend.delete_world(world_id).await?;
            self.worlds.lock().await.retain(|w| &w.id != world_id);
            info!(world = %world_id, "Deleted world");
            Ok(())
        }
        .await;
        self.status.finish(result)
    }
}
