// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The per-sport season store.
//!
//! One store serves every sport; the sport only selects the
//! `SportConfig` and the REST path segment.
//!
//! ## Concurrency
//!
//! The cached [`State`] sits behind a single async mutex. Network calls
//! run without holding it; the confirmed result is applied under it, so
//! two events finishing at once recompute standings one after the other.
//! A second `request_run` for an event whose first request has not
//! resolved fails with `ApiError::RequestInFlight`.

use crate::backend::Backend;
use crate::error::ApiError;
use crate::request_response::{CreateSeasonRequest, SeasonPayload, SimulateRunRequest};
use crate::store::{InFlight, StatusSlot, StoreStatus};
use podium::{Command, SeasonRecord, Signal, State, apply, validate_run};
use podium_domain::{
    Event, EventId, EventStatus, Ranking, RunIndex, SeasonId, SeasonPhase, Sport,
    StandingsSnapshot, WeekKey, WeekStatus, WorldId,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// The state after an operation, with what the operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// The cached state after the operation.
    pub state: State,
    /// Signals raised by the operation, in order.
    pub signals: Vec<Signal>,
}

/// A phase change made by the advisory check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseAdvance {
    /// The phase before.
    pub from: SeasonPhase,
    /// The phase after.
    pub to: SeasonPhase,
}

/// Cached season state of one sport in one world.
#[derive(Debug)]
pub struct SeasonStore<B: Backend> {
    backend: Arc<B>,
    state: Mutex<State>,
    status: StatusSlot,
    in_flight: InFlight,
}

impl<B: Backend> SeasonStore<B> {
    /// Creates an empty store.
    ///
    /// # Arguments
    ///
    /// * `backend` - The REST boundary
    /// * `world_id` - The world this store is scoped to
    /// * `sport` - The sport this store is scoped to
    #[must_use]
    pub fn new(backend: Arc<B>, world_id: WorldId, sport: Sport) -> Self {
        Self {
            backend,
            state: Mutex::new(State::new(world_id, sport)),
            status: StatusSlot::default(),
            in_flight: InFlight::default(),
        }
    }

    /// Returns a copy of the cached state.
    pub async fn snapshot(&self) -> State {
        self.state.lock().await.clone()
    }

    /// Returns the loading and error status.
    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.status.get()
    }

    /// Returns the cached status of an event. Pure read.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if there is no active season or no such event.
    pub async fn event_status(&self, event_id: &EventId) -> Result<EventStatus, ApiError> {
        Ok(self.state.lock().await.event_status(event_id)?)
    }

    /// Returns the cached standings of the active season.
    pub async fn standings(&self) -> Option<StandingsSnapshot> {
        self.state
            .lock()
            .await
            .current
            .as_ref()
            .map(|s| s.standings.clone())
    }

    /// Returns whether a run request for the event is under way.
    #[must_use]
    pub fn is_in_flight(&self, event_id: &EventId) -> bool {
        self.in_flight.contains(event_id)
    }

    async fn commit(&self, command: Command) -> Result<StoreSnapshot, ApiError> {
        let name: &'static str = command.name();
        let mut state = self.state.lock().await;
        let result = apply(&state, command)?;
        *state = result.new_state.clone();
        info!(
            command = name,
            sport = %state.sport,
            world = %state.world_id,
            signals = result.signals.len(),
            "Applied confirmed change"
        );
        Ok(StoreSnapshot {
            state: result.new_state,
            signals: result.signals,
        })
    }

    async fn scope(&self) -> (Sport, WorldId) {
        let state = self.state.lock().await;
        (state.sport, state.world_id.clone())
    }

    async fn active_season_id(&self) -> Result<SeasonId, ApiError> {
        Ok(self.state.lock().await.active_season()?.season.id.clone())
    }

    async fn sync(&self, payload: SeasonPayload) -> Result<StoreSnapshot, ApiError> {
        let config = self.state.lock().await.config;
        let events: Vec<Event> = payload.events(&config)?;
        self.commit(Command::SyncSeason {
            season: payload.season,
            events,
            standings: payload.standings.into_update(),
        })
        .await
    }

    /// Fetches the active season from the server and replaces the cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is inconsistent.
    pub async fn fetch(&self) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.fetch_inner().await;
        self.status.finish(result)
    }

    async fn fetch_inner(&self) -> Result<StoreSnapshot, ApiError> {
        let (sport, world_id) = self.scope().await;
        match self.backend.get_active_season(sport, &world_id).await? {
            Some(payload) => self.sync(payload).await,
            None => {
                let mut state = self.state.lock().await;
                state.current = None;
                Ok(StoreSnapshot {
                    state: state.clone(),
                    signals: Vec::new(),
                })
            }
        }
    }

    /// Fetches completed seasons from the server into the history list.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is inconsistent.
    pub async fn fetch_history(&self) -> Result<Vec<SeasonRecord>, ApiError> {
        self.status.begin();
        let result = self.fetch_history_inner().await;
        self.status.finish(result)
    }

    async fn fetch_history_inner(&self) -> Result<Vec<SeasonRecord>, ApiError> {
        let (sport, world_id) = self.scope().await;
        let seasons: Vec<SeasonPayload> =
            self.backend.list_season_history(sport, &world_id).await?;

        let mut state = self.state.lock().await;
        let mut history: Vec<SeasonRecord> = Vec::with_capacity(seasons.len());
        for payload in seasons {
            let events: Vec<Event> = payload.events(&state.config)?;
            let local: StandingsSnapshot = podium_domain::recompute(&events, &state.config);
            let standings: StandingsSnapshot = match payload.standings.into_update() {
                Some(update) => update.overlay(local),
                None => local,
            };
            let mut season = payload.season;
            season.phase = SeasonPhase::Completed;
            history.push(SeasonRecord { season, standings });
        }
        state.history.clone_from(&history);
        Ok(history)
    }

    /// Creates a season and its schedule.
    ///
    /// # Errors
    ///
    /// * `ApiError::DomainRuleViolation` if a season is already active
    /// * Any request or payload error
    pub async fn create_season(
        &self,
        request: CreateSeasonRequest,
    ) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.create_season_inner(request).await;
        self.status.finish(result)
    }

    async fn create_season_inner(
        &self,
        request: CreateSeasonRequest,
    ) -> Result<StoreSnapshot, ApiError> {
        let (sport, world_id) = {
            let state = self.state.lock().await;
            if let Some(active) = &state.current {
                return Err(podium_domain::DomainError::ActiveSeasonExists {
                    world_id: state.world_id.clone(),
                    sport: state.sport,
                    season_id: active.season.id.clone(),
                }
                .into());
            }
            (state.sport, state.world_id.clone())
        };

        let payload: SeasonPayload = self
            .backend
            .create_season(sport, &world_id, request)
            .await?;
        let config = self.state.lock().await.config;
        let events: Vec<Event> = payload.events(&config)?;
        self.commit(Command::CreateSeason {
            season: payload.season,
            events,
        })
        .await
    }

    /// Requests the next run of an event.
    ///
    /// The run must be the event's next required run and the event must not
    /// be in a week after the current unlocked week. On success the run
    /// result is stored and, on the last run, the final ranking and
    /// standings. On failure the cache is untouched.
    ///
    /// # Arguments
    ///
    /// * `event_id` - The event
    /// * `run` - The run to simulate
    /// * `gate` - The world's week status, when known
    /// * `precomputed` - A client-produced result to record instead of simulating
    ///
    /// # Errors
    ///
    /// * `ApiError::RequestInFlight` if a request for the event is under way
    /// * `ApiError::OutOfSequence` if `run` is not the next required run
    /// * `ApiError::AlreadyFinal` if the event is terminal
    /// * `ApiError::WeekLocked` if the event's week is locked
    /// * Any request or payload error
    pub async fn request_run(
        &self,
        event_id: &EventId,
        run: RunIndex,
        gate: Option<&WeekStatus>,
        precomputed: Option<Ranking>,
    ) -> Result<StoreSnapshot, ApiError> {
        let _guard = match self.in_flight.try_acquire(event_id) {
            Ok(guard) => guard,
            Err(err) => return self.status.fail(err),
        };

        self.status.begin();
        let result = self.request_run_inner(event_id, run, gate, precomputed).await;
        self.status.finish(result)
    }

    async fn request_run_inner(
        &self,
        event_id: &EventId,
        run: RunIndex,
        gate: Option<&WeekStatus>,
        precomputed: Option<Ranking>,
    ) -> Result<StoreSnapshot, ApiError> {
        let sport: Sport = {
            let state = self.state.lock().await;
            validate_run(&state, event_id, run)?;
            let event: &Event = state.event(event_id)?;
            if let Some(current_week) = gate.and_then(|g| g.current_unlocked_week) {
                let event_week: WeekKey = event.week_key();
                if event_week > current_week {
                    return Err(ApiError::WeekLocked {
                        event_id: event_id.clone(),
                        event_week,
                        current_week,
                    });
                }
            }
            state.sport
        };

        debug!(event = %event_id, %run, "Requesting run");
        let response = self
            .backend
            .simulate_run(sport, event_id, run, SimulateRunRequest { precomputed })
            .await?;

        let (outcome, standings) = response.into_parts();
        self.commit(Command::RecordRun {
            event_id: event_id.clone(),
            run,
            outcome,
            standings,
        })
        .await
    }

    /// Requests every remaining run of an event, one after the other.
    ///
    /// Each run goes through the same checks as [`SeasonStore::request_run`]
    /// and is applied once the server confirms it. The event stays claimed
    /// for the whole sequence. If a run fails the runs before it stay
    /// recorded and the error is returned.
    ///
    /// # Errors
    ///
    /// * `ApiError::RequestInFlight` if a request for the event is under way
    /// * `ApiError::AlreadyFinal` if the event has no run left
    /// * `ApiError::WeekLocked` if the event's week is locked
    /// * Any request or payload error of the failing run
    pub async fn simulate_all(
        &self,
        event_id: &EventId,
        gate: Option<&WeekStatus>,
    ) -> Result<StoreSnapshot, ApiError> {
        let _guard = match self.in_flight.try_acquire(event_id) {
            Ok(guard) => guard,
            Err(err) => return self.status.fail(err),
        };

        self.status.begin();
        let result = self.simulate_all_inner(event_id, gate).await;
        self.status.finish(result)
    }

    async fn simulate_all_inner(
        &self,
        event_id: &EventId,
        gate: Option<&WeekStatus>,
    ) -> Result<StoreSnapshot, ApiError> {
        let mut signals: Vec<Signal> = Vec::new();
        let mut recorded: Option<State> = None;
        let mut runs: u8 = 0;

        loop {
            let next: Option<RunIndex> = self.state.lock().await.event(event_id)?.next_run();
            let Some(run) = next else {
                break;
            };
            let step: StoreSnapshot = self.request_run_inner(event_id, run, gate, None).await?;
            signals.extend(step.signals);
            recorded = Some(step.state);
            runs += 1;
        }

        let state: State = recorded.ok_or_else(|| ApiError::AlreadyFinal {
            event_id: event_id.clone(),
        })?;
        info!(event = %event_id, runs, "Simulated remaining runs");
        Ok(StoreSnapshot { state, signals })
    }

    /// Moves an event into qualifying or in-progress before its first run.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot enter `status` or the request fails.
    pub async fn begin_event(
        &self,
        event_id: &EventId,
        status: EventStatus,
    ) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.begin_event_inner(event_id, status).await;
        self.status.finish(result)
    }

    async fn begin_event_inner(
        &self,
        event_id: &EventId,
        status: EventStatus,
    ) -> Result<StoreSnapshot, ApiError> {
        let sport: Sport = {
            let state = self.state.lock().await;
            podium_domain::begin(state.event(event_id)?, status)?;
            state.sport
        };
        self.backend.begin_event(sport, event_id, status).await?;
        self.commit(Command::BeginEvent {
            event_id: event_id.clone(),
            status,
        })
        .await
    }

    /// Clears every result of the active season and returns it to its
    /// initial phase. The roster is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no active season or the request fails.
    pub async fn reset_season(&self) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.reset_season_inner().await;
        self.status.finish(result)
    }

    async fn reset_season_inner(&self) -> Result<StoreSnapshot, ApiError> {
        let season_id: SeasonId = self.active_season_id().await?;
        let (sport, _) = self.scope().await;
        let payload: SeasonPayload = self.backend.reset_season(sport, &season_id).await?;

        let reset: StoreSnapshot = self.commit(Command::ResetSeason).await?;
        if payload.events.is_empty() {
            return Ok(reset);
        }

        // The server may redraw the schedule on reset; its copy wins.
        let synced: StoreSnapshot = self.sync(payload).await?;
        Ok(StoreSnapshot {
            state: synced.state,
            signals: reset.signals.into_iter().chain(synced.signals).collect(),
        })
    }

    /// Completes the active season and moves it into history.
    ///
    /// # Errors
    ///
    /// * `ApiError::DomainRuleViolation` if an event has no final ranking yet
    /// * Any request error
    pub async fn complete_season(&self) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.complete_season_inner().await;
        self.status.finish(result)
    }

    async fn complete_season_inner(&self) -> Result<StoreSnapshot, ApiError> {
        let (sport, season_id) = {
            let state = self.state.lock().await;
            // Dry run so an incomplete season never reaches the server.
            apply(&state, Command::CompleteSeason)?;
            (state.sport, state.active_season()?.season.id.clone())
        };
        self.backend.complete_season(sport, &season_id).await?;
        self.commit(Command::CompleteSeason).await
    }

    /// Deletes a season, active or archived, with its schedule.
    ///
    /// Unlike a reset nothing is kept; a new season can be created afterwards.
    ///
    /// # Errors
    ///
    /// * `ApiError::NotFound` if the season is neither active nor in history
    /// * Any request error
    pub async fn delete_season(&self, season_id: &SeasonId) -> Result<StoreSnapshot, ApiError> {
        self.status.begin();
        let result = self.delete_season_inner(season_id).await;
        self.status.finish(result)
    }

    async fn delete_season_inner(&self, season_id: &SeasonId) -> Result<StoreSnapshot, ApiError> {
        let command = Command::DeleteSeason {
            season_id: season_id.clone(),
        };
        let sport: Sport = {
            let state = self.state.lock().await;
            apply(&state, command.clone())?;
            state.sport
        };
        self.backend.delete_season(sport, season_id).await?;
        self.commit(command).await
    }

    /// Asks the server whether the season should enter its next phase and,
    /// if so, applies it.
    ///
    /// The check is advisory. Failures are logged and returned but never
    /// recorded in the store's error slot; the caller decides whether to
    /// surface them. `Ok(None)` means the server suggested no change.
    ///
    /// # Errors
    ///
    /// * `ApiError::NotFound` if there is no active season
    /// * Any request error
    /// * `ApiError::DomainRuleViolation` if the suggested phase is not a
    ///   legal next phase for the sport
    pub async fn check_phase_advance(&self) -> Result<Option<PhaseAdvance>, ApiError> {
        let season_id: SeasonId = self.active_season_id().await?;
        let (sport, _) = self.scope().await;

        let next: Option<SeasonPhase> = self
            .backend
            .check_phase_advance(sport, &season_id)
            .await
            .inspect_err(|err| {
                warn!(%sport, season = %season_id, error = %err, "Phase advance check failed");
            })?
            .next_phase;
        let Some(next) = next else {
            return Ok(None);
        };

        let from: SeasonPhase = self.state.lock().await.active_season()?.season.phase;
        if from == next {
            return Ok(None);
        }
        self.commit(Command::AdvancePhase { to: next })
            .await
            .inspect_err(|err| {
                warn!(%sport, season = %season_id, error = %err, "Rejected suggested phase");
            })?;
        Ok(Some(PhaseAdvance { from, to: next }))
    }

    /// Drops every cached season.
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        state.current = None;
        state.history.clear();
    }
}
