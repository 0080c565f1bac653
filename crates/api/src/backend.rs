// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The REST boundary the stores talk to.

use crate::error::BackendError;
use crate::request_response::{
    CreateSeasonRequest, CreateWorldRequest, EntrantRequest, EventPayload, GenerateRosterRequest,
    PhaseAdvanceResponse, RunResponse, SeasonPayload, SimulateRunRequest, WeekStatusResponse,
};
use podium_domain::{
    Entrant, EntrantId, EventId, EventStatus, RunIndex, SeasonId, Sport, World, WorldId,
};
use std::future::Future;

/// The simulation and storage service.
///
/// Every method is one request. Implementations attach the bearer
/// credential and map HTTP failures into [`BackendError`].
pub trait Backend: Send + Sync {
    /// Lists every world.
    fn list_worlds(&self) -> impl Future<Output = Result<Vec<World>, BackendError>> + Send;

    /// Fetches one world.
    fn get_world(
        &self,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<World, BackendError>> + Send;

    /// Creates a world.
    fn create_world(
        &self,
        request: CreateWorldRequest,
    ) -> impl Future<Output = Result<World, BackendError>> + Send;

    /// Deletes a world and everything in it.
    fn delete_world(
        &self,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Lists a sport's roster in a world.
    fn list_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<Vec<Entrant>, BackendError>> + Send;

    /// Bulk-generates roster entrants and returns the new ones.
    fn generate_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: GenerateRosterRequest,
    ) -> impl Future<Output = Result<Vec<Entrant>, BackendError>> + Send;

    /// Creates one roster entrant.
    fn create_entrant(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: EntrantRequest,
    ) -> impl Future<Output = Result<Entrant, BackendError>> + Send;

    /// Updates one roster entrant.
    fn update_entrant(
        &self,
        sport: Sport,
        entrant_id: &EntrantId,
        request: EntrantRequest,
    ) -> impl Future<Output = Result<Entrant, BackendError>> + Send;

    /// Deletes one roster entrant.
    fn delete_entrant(
        &self,
        sport: Sport,
        entrant_id: &EntrantId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Deletes a sport's whole roster in a world.
    fn delete_all_entrants(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Fetches the active season, if there is one.
    fn get_active_season(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<Option<SeasonPayload>, BackendError>> + Send;

    /// Lists completed seasons.
    fn list_season_history(
        &self,
        sport: Sport,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<Vec<SeasonPayload>, BackendError>> + Send;

    /// Creates a season and draws its schedule.
    fn create_season(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: CreateSeasonRequest,
    ) -> impl Future<Output = Result<SeasonPayload, BackendError>> + Send;

    /// Clears every result of a season.
    fn reset_season(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> impl Future<Output = Result<SeasonPayload, BackendError>> + Send;

    /// Marks a season completed.
    fn complete_season(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> impl Future<Output = Result<SeasonPayload, BackendError>> + Send;

    /// Deletes a season and its schedule.
    fn delete_season(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> impl Future<Output = Result<(), BackendError>> + Send;

    /// Asks whether the season should move into its next phase.
    fn check_phase_advance(
        &self,
        sport: Sport,
        season_id: &SeasonId,
    ) -> impl Future<Output = Result<PhaseAdvanceResponse, BackendError>> + Send;

    /// Moves an event into a pre-run status (qualifying).
    fn begin_event(
        &self,
        sport: Sport,
        event_id: &EventId,
        status: EventStatus,
    ) -> impl Future<Output = Result<EventPayload, BackendError>> + Send;

    /// Simulates (or records a precomputed) run.
    fn simulate_run(
        &self,
        sport: Sport,
        event_id: &EventId,
        run: RunIndex,
        request: SimulateRunRequest,
    ) -> impl Future<Output = Result<RunResponse, BackendError>> + Send;

    /// Fetches the week gate status of a world.
    fn get_week_status(
        &self,
        world_id: &WorldId,
    ) -> impl Future<Output = Result<WeekStatusResponse, BackendError>> + Send;
}
