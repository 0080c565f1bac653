// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Every store of one signed-in user, keyed by world and sport.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::roster_store::RosterStore;
use crate::season_store::{SeasonStore, StoreSnapshot};
use crate::week_status::WeekStatusStore;
use crate::world_store::WorldStore;
use podium_domain::{EventId, RunIndex, Sport, WeekStatus, WorldId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

type StoreMap<K, S> = Mutex<HashMap<K, Arc<S>>>;

fn get_or_insert<K, S>(map: &StoreMap<K, S>, key: K, make: impl FnOnce() -> S) -> Arc<S>
where
    K: Eq + std::hash::Hash,
{
    let mut map = map.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(map.entry(key).or_insert_with(|| Arc::new(make())))
}

/// The stores of one session over a backend.
///
/// Stores are created on first use and live until their world is deleted.
#[derive(Debug)]
pub struct Session<B: Backend> {
    backend: Arc<B>,
    worlds: WorldStore<B>,
    seasons: StoreMap<(WorldId, Sport), SeasonStore<B>>,
    rosters: StoreMap<(WorldId, Sport), RosterStore<B>>,
    weeks: StoreMap<WorldId, WeekStatusStore<B>>,
}

impl<B: Backend> Session<B> {
    /// Creates a session with no cached data.
    #[must_use]
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            worlds: WorldStore::new(Arc::clone(&backend)),
            backend,
            seasons: Mutex::new(HashMap::new()),
            rosters: Mutex::new(HashMap::new()),
            weeks: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the world store.
    #[must_use]
    pub const fn worlds(&self) -> &WorldStore<B> {
        &self.worlds
    }

    /// Returns the season store of a sport in a world.
    #[must_use]
    pub fn season(&self, world_id: &WorldId, sport: Sport) -> Arc<SeasonStore<B>> {
        get_or_insert(&self.seasons, (world_id.clone(), sport), || {
            SeasonStore::new(Arc::clone(&self.backend), world_id.clone(), sport)
        })
    }

    /// Returns the roster store of a sport in a world.
    #[must_use]
    pub fn roster(&self, world_id: &WorldId, sport: Sport) -> Arc<RosterStore<B>> {
        get_or_insert(&self.rosters, (world_id.clone(), sport), || {
            RosterStore::new(Arc::clone(&self.backend), world_id.clone(), sport)
        })
    }

    /// Returns the week status store of a world.
    #[must_use]
    pub fn week_status(&self, world_id: &WorldId) -> Arc<WeekStatusStore<B>> {
        get_or_insert(&self.weeks, world_id.clone(), || {
            WeekStatusStore::new(Arc::clone(&self.backend), world_id.clone())
        })
    }

    /// Requests a run, checking the world's week gate first.
    ///
    /// The week status is fetched when none is cached. Once the run is
    /// recorded the cached week status is dropped, since a completed event
    /// may unlock the next week.
    ///
    /// # Errors
    ///
    /// Any error of [`WeekStatusStore::fetch`] or [`SeasonStore::request_run`].
    pub async fn request_run(
        &self,
        world_id: &WorldId,
        sport: Sport,
        event_id: &EventId,
        run: RunIndex,
    ) -> Result<StoreSnapshot, ApiError> {
        let weeks: Arc<WeekStatusStore<B>> = self.week_status(world_id);
        let gate: WeekStatus = weeks.current_or_fetch().await?;
        let snapshot: StoreSnapshot = self
            .season(world_id, sport)
            .request_run(event_id, run, Some(&gate), None)
            .await?;
        weeks.invalidate().await;
        Ok(snapshot)
    }

    /// Runs every remaining run of an event behind the week gate.
    ///
    /// # Errors
    ///
    /// Any error of [`WeekStatusStore::fetch`] or [`SeasonStore::simulate_all`].
    pub async fn simulate_all(
        &self,
        world_id: &WorldId,
        sport: Sport,
        event_id: &EventId,
    ) -> Result<StoreSnapshot, ApiError> {
        let weeks: Arc<WeekStatusStore<B>> = self.week_status(world_id);
        let gate: WeekStatus = weeks.current_or_fetch().await?;
        let snapshot: StoreSnapshot = self
            .season(world_id, sport)
            .simulate_all(event_id, Some(&gate))
            .await?;
        weeks.invalidate().await;
        Ok(snapshot)
    }

    /// Deletes a world and drops every store scoped to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the caches are kept then.
    pub async fn delete_world(&self, world_id: &WorldId) -> Result<(), ApiError> {
        self.worlds.delete(world_id).await?;

        let seasons: usize = Self::drop_world(&self.seasons, world_id);
        let rosters: usize = Self::drop_world(&self.rosters, world_id);
        self.weeks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(world_id);
        info!(world = %world_id, seasons, rosters, "Dropped world caches");
        Ok(())
    }

    fn drop_world<S>(map: &StoreMap<(WorldId, Sport), S>, world_id: &WorldId) -> usize {
        let mut map = map.lock().unwrap_or_else(PoisonError::into_inner);
        let before: usize = map.len();
        map.retain(|(world, _), _| world != world_id);
        before - map.len()
    }
}
