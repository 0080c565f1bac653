// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A scripted in-memory backend.

use crate::{
    Backend, BackendError, CreateSeasonRequest, CreateWorldRequest, EntrantRequest, EventPayload,
    GenerateRosterRequest, PhaseAdvanceResponse, RunResponse, SeasonPayload, SeasonStore,
    SimulateRunRequest, StandingsPayload, WeekStatusResponse,
};
use podium_domain::{
    Entrant, EntrantId, EventId, EventStatus, GatedEvent, Placing, Ranking, RunIndex, Season,
    SeasonId, SeasonPhase, Sport, WeekStatus, World, WorldId, week_status,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use time::macros::date;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct FakeState {
    pub worlds: Vec<World>,
    pub entrants: Vec<Entrant>,
    pub schedule: Vec<EventPayload>,
    pub active: Option<SeasonPayload>,
    pub history: Vec<SeasonPayload>,
    pub scripted_runs: VecDeque<Result<RunResponse, BackendError>>,
    pub next_phase: Option<SeasonPhase>,
    pub fail_next: Option<BackendError>,
    pub delay: Option<Duration>,
    pub simulate_calls: usize,
    pub week_status_calls: usize,
    next_id: usize,
}

impl FakeState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn active_event(&mut self, event_id: &EventId) -> Result<&mut EventPayload, BackendError> {
        self.active
            .as_mut()
            .and_then(|s| s.events.iter_mut().find(|e| &e.id == event_id))
            .ok_or_else(|| BackendError::NotFound {
                resource: format!("Event {event_id}"),
            })
    }
}

/// A backend that keeps its data in memory and can be told to fail.
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub state: Mutex<FakeState>,
}

impl FakeBackend {
    pub async fn fail_next(&self, err: BackendError) {
        self.state.lock().await.fail_next = Some(err);
    }

    pub async fn set_delay(&self, delay: Duration) {
        self.state.lock().await.delay = Some(delay);
    }

    pub async fn script_run(&self, response: Result<RunResponse, BackendError>) {
        self.state.lock().await.scripted_runs.push_back(response);
    }

    pub async fn simulate_calls(&self) -> usize {
        self.state.lock().await.simulate_calls
    }

    async fn pre(&self) -> Result<(), BackendError> {
        let (delay, failure) = {
            let mut state = self.state.lock().await;
            (state.delay, state.fail_next.take())
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        failure.map_or(Ok(()), Err)
    }
}

fn not_found(resource: impl Into<String>) -> BackendError {
    BackendError::NotFound {
        resource: resource.into(),
    }
}

fn entrant_from(id: String, request: EntrantRequest) -> Entrant {
    Entrant {
        id: EntrantId::new(id),
        display_name: request.display_name,
        country: request.country,
        skills: request.skills,
    }
}

impl Backend for FakeBackend {
    async fn list_worlds(&self) -> Result<Vec<World>, BackendError> {
        self.pre().await?;
        Ok(self.state.lock().await.worlds.clone())
    }

    async fn get_world(&self, world_id: &WorldId) -> Result<World, BackendError> {
        self.pre().await?;
        self.state
            .lock()
            .await
            .worlds
            .iter()
            .find(|w| &w.id == world_id)
            .cloned()
            .ok_or_else(|| not_found(format!("World {world_id}")))
    }

    async fn create_world(&self, request: CreateWorldRequest) -> Result<World, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let world = World {
            id: WorldId::new(state.next_id("world")),
            name: request.name,
            description: request.description,
        };
        state.worlds.push(world.clone());
        Ok(world)
    }

    async fn delete_world(&self, world_id: &WorldId) -> Result<(), BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let before: usize = state.worlds.len();
        state.worlds.retain(|w| &w.id != world_id);
        if state.worlds.len() == before {
            return Err(not_found(format!("World {world_id}")));
        }
        Ok(())
    }

    async fn list_entrants(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
    ) -> Result<Vec<Entrant>, BackendError> {
        self.pre().await?;
        Ok(self.state.lock().await.entrants.clone())
    }

    async fn generate_entrants(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
        request: GenerateRosterRequest,
    ) -> Result<Vec<Entrant>, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let mut created: Vec<Entrant> = Vec::new();
        for i in 0..request.count {
            let id: String = state.next_id("gen");
            created.push(entrant_from(
                id,
                EntrantRequest {
                    display_name: format!("Generated {i}"),
                    country: String::from("NOR"),
                    skills: std::collections::BTreeMap::new(),
                },
            ));
        }
        state.entrants.extend(created.iter().cloned());
        Ok(created)
    }

    async fn create_entrant(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
        request: EntrantRequest,
    ) -> Result<Entrant, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let id: String = state.next_id("ent");
        let entrant: Entrant = entrant_from(id, request);
        state.entrants.push(entrant.clone());
        Ok(entrant)
    }

    async fn update_entrant(
        &self,
        _sport: Sport,
        entrant_id: &EntrantId,
        request: EntrantRequest,
    ) -> Result<Entrant, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let slot: &mut Entrant = state
            .entrants
            .iter_mut()
            .find(|e| &e.id == entrant_id)
            .ok_or_else(|| not_found(format!("Entrant {entrant_id}")))?;
        *slot = entrant_from(entrant_id.as_str().to_string(), request);
        Ok(slot.clone())
    }

    async fn delete_entrant(
        &self,
        _sport: Sport,
        entrant_id: &EntrantId,
    ) -> Result<(), BackendError> {
        self.pre().await?;
        self.state
            .lock()
            .await
            .entrants
            .retain(|e| &e.id != entrant_id);
        Ok(())
    }

    async fn delete_all_entrants(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
    ) -> Result<(), BackendError> {
        self.pre().await?;
        self.state.lock().await.entrants.clear();
        Ok(())
    }

    async fn get_active_season(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
    ) -> Result<Option<SeasonPayload>, BackendError> {
        self.pre().await?;
        Ok(self.state.lock().await.active.clone())
    }

    async fn list_season_history(
        &self,
        _sport: Sport,
        _world_id: &WorldId,
    ) -> Result<Vec<SeasonPayload>, BackendError> {
        self.pre().await?;
        Ok(self.state.lock().await.history.clone())
    }

    async fn create_season(
        &self,
        sport: Sport,
        world_id: &WorldId,
        request: CreateSeasonRequest,
    ) -> Result<SeasonPayload, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let payload = SeasonPayload {
            season: Season {
                id: SeasonId::new("season-1"),
                world_id: world_id.clone(),
                sport,
                name: request.name,
                year_start: request.year_start,
                year_end: request.year_end,
                phase: SeasonPhase::Regular,
            },
            events: state.schedule.clone(),
            standings: StandingsPayload::default(),
        };
        state.active = Some(payload.clone());
        Ok(payload)
    }

    async fn reset_season(
        &self,
        _sport: Sport,
        season_id: &SeasonId,
    ) -> Result<SeasonPayload, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let active: &mut SeasonPayload = state
            .active
            .as_mut()
            .filter(|s| &s.season.id == season_id)
            .ok_or_else(|| not_found(format!("Season {season_id}")))?;
        active.season.phase = SeasonPhase::Regular;
        active.standings = StandingsPayload::default();
        for event in &mut active.events {
            event.status = EventStatus::Scheduled;
            event.run1_results = None;
            event.run2_results = None;
            event.run3_results = None;
            event.run4_results = None;
            event.results = None;
        }
        Ok(active.clone())
    }

    async fn complete_season(
        &self,
        _sport: Sport,
        season_id: &SeasonId,
    ) -> Result<SeasonPayload, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let mut season: SeasonPayload = state
            .active
            .take()
            .ok_or_else(|| not_found(format!("Season {season_id}")))?;
        season.season.phase = SeasonPhase::Completed;
        state.history.push(season.clone());
        Ok(season)
    }

    async fn delete_season(&self, _sport: Sport, season_id: &SeasonId) -> Result<(), BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        if state
            .active
            .as_ref()
            .is_some_and(|s| &s.season.id == season_id)
        {
            state.active = None;
            return Ok(());
        }
        let before: usize = state.history.len();
        state.history.retain(|s| &s.season.id != season_id);
        if state.history.len() == before {
            return Err(not_found(format!("Season {season_id}")));
        }
        Ok(())
    }

    async fn check_phase_advance(
        &self,
        _sport: Sport,
        _season_id: &SeasonId,
    ) -> Result<PhaseAdvanceResponse, BackendError> {
        self.pre().await?;
        Ok(PhaseAdvanceResponse {
            next_phase: self.state.lock().await.next_phase.take(),
        })
    }

    async fn begin_event(
        &self,
        _sport: Sport,
        event_id: &EventId,
        status: EventStatus,
    ) -> Result<EventPayload, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        let event: &mut EventPayload = state.active_event(event_id)?;
        event.status = status;
        Ok(event.clone())
    }

    async fn simulate_run(
        &self,
        _sport: Sport,
        event_id: &EventId,
        run: RunIndex,
        request: SimulateRunRequest,
    ) -> Result<RunResponse, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        state.simulate_calls += 1;
        if let Some(scripted) = state.scripted_runs.pop_front() {
            return scripted;
        }

        let event: &mut EventPayload = state.active_event(event_id)?;
        let ranking: Ranking = request
            .precomputed
            .unwrap_or_else(|| create_test_ranking(&event.entrants));
        let status: EventStatus = EventStatus::after_run(run, event.required_runs.unwrap_or(1));
        let slot: &mut Option<Ranking> = match run.get() {
            1 => &mut event.run1_results,
            2 => &mut event.run2_results,
            3 => &mut event.run3_results,
            _ => &mut event.run4_results,
        };
        *slot = Some(ranking.clone());
        event.status = status;
        if status.is_terminal() {
            event.results = Some(ranking.clone());
        }

        Ok(RunResponse {
            status: Some(status),
            run_results: ranking,
            final_results: None,
            standings: StandingsPayload::default(),
        })
    }

    async fn get_week_status(
        &self,
        _world_id: &WorldId,
    ) -> Result<WeekStatusResponse, BackendError> {
        self.pre().await?;
        let mut state = self.state.lock().await;
        state.week_status_calls += 1;
        let gated: Vec<GatedEvent> = state
            .active
            .as_ref()
            .map(|season| {
                season
                    .events
                    .iter()
                    .map(|e| GatedEvent {
                        event_id: e.id.clone(),
                        sport: season.season.sport,
                        name: e.name.clone(),
                        date: e.date,
                        status: e.status,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let status: WeekStatus =
            week_status(&gated).map_err(|e| BackendError::Decode(e.to_string()))?;

        Ok(WeekStatusResponse {
            current_unlocked_week: status.current_unlocked_week,
            is_week_complete: status.is_week_complete,
            completed_in_week: status.completed_in_week,
            total_in_week: status.total_in_week,
            current_week_events: status.current_week_events,
            events_by_date: status
                .events_by_date
                .into_iter()
                .map(|(date, events)| (date.to_string(), events))
                .collect(),
            all_weeks: status.all_weeks,
        })
    }
}

pub fn create_test_world() -> WorldId {
    WorldId::new("world-1")
}

pub fn run(n: u8) -> RunIndex {
    RunIndex::new(n).unwrap()
}

pub fn event_id(n: usize) -> EventId {
    EventId::new(format!("ev-{n}"))
}

pub fn create_test_entrants() -> Vec<EntrantId> {
    ["ath-1", "ath-2", "ath-3", "ath-4"]
        .into_iter()
        .map(EntrantId::new)
        .collect()
}

/// Entrants placed in the given order, 100 hundredths apart.
pub fn create_test_ranking(order: &[EntrantId]) -> Ranking {
    Ranking::new(
        order
            .iter()
            .zip(1u16..)
            .map(|(id, position)| {
                Placing::ranked(id.clone(), position, Some(5_000 + i64::from(position) * 100))
            })
            .collect(),
    )
}

/// `count` weekly events starting on Saturday 2024-11-23 (ISO week 47).
pub fn create_test_schedule(count: usize, required_runs: u8) -> Vec<EventPayload> {
    (0..count)
        .map(|i| EventPayload {
            id: event_id(i + 1),
            season_id: SeasonId::new("season-1"),
            name: format!("Race {}", i + 1),
            discipline: None,
            date: date!(2024 - 11 - 23) + time::Duration::weeks(i64::try_from(i).unwrap()),
            entrants: create_test_entrants(),
            required_runs: Some(required_runs),
            status: EventStatus::Scheduled,
            run1_results: None,
            run2_results: None,
            run3_results: None,
            run4_results: None,
            results: None,
        })
        .collect()
}

pub fn create_test_season_payload(
    sport: Sport,
    count: usize,
    required_runs: u8,
) -> SeasonPayload {
    SeasonPayload {
        season: Season {
            id: SeasonId::new("season-1"),
            world_id: create_test_world(),
            sport,
            name: String::from("2024/2025"),
            year_start: 2024,
            year_end: 2025,
            phase: SeasonPhase::Regular,
        },
        events: create_test_schedule(count, required_runs),
        standings: StandingsPayload::default(),
    }
}

/// A backend whose server already has an active season.
pub fn create_backend(sport: Sport, count: usize, required_runs: u8) -> Arc<FakeBackend> {
    let backend = FakeBackend::default();
    backend.state.try_lock().unwrap().active =
        Some(create_test_season_payload(sport, count, required_runs));
    Arc::new(backend)
}

/// A season store that has fetched the backend's active season.
pub async fn create_loaded_store(
    backend: &Arc<FakeBackend>,
    sport: Sport,
) -> SeasonStore<FakeBackend> {
    let store = SeasonStore::new(Arc::clone(backend), create_test_world(), sport);
    store.fetch().await.unwrap();
    store
}
