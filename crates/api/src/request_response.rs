// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects for the REST boundary.
//!
//! These mirror the server's JSON. Conversions into domain types validate
//! on the way in, so a malformed payload never reaches cached state.

use podium_domain::{
    Discipline, DomainError, EntrantId, Event, EventId, EventRecord, EventStatus, GatedEvent,
    Ranking, RunIndex, RunOutcome, Season, SeasonId, SeasonPhase, SportConfig, StandingsEntry,
    StandingsUpdate, WeekKey, WeekStatus, WeekSummary,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Request to exchange credentials for a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token to attach to every further request.
    pub token: String,
}

/// Request to create a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWorldRequest {
    /// Display name.
    pub name: String,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Request to create or update a roster entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrantRequest {
    /// Name shown in results.
    pub display_name: String,
    /// Country code.
    pub country: String,
    /// Skill attributes.
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
}

/// Request to bulk-generate roster entrants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRosterRequest {
    /// Number of entrants to generate.
    pub count: u16,
}

/// Request to start a season and draw its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSeasonRequest {
    /// Display name, e.g. `2024/2025`.
    pub name: String,
    /// First calendar year.
    pub year_start: i32,
    /// Last calendar year.
    pub year_end: i32,
}

/// Request body of a run simulation.
///
/// `precomputed` carries a result the client already produced (for example
/// by an animation); the server records it instead of simulating.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimulateRunRequest {
    /// A client-produced run result.
    #[serde(rename = "results", default, skip_serializing_if = "Option::is_none")]
    pub precomputed: Option<Ranking>,
}

/// An event as the server serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventPayload {
    /// Event id.
    pub id: EventId,
    /// Season id.
    pub season_id: SeasonId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Discipline tag.
    #[serde(default)]
    pub discipline: Option<Discipline>,
    /// Scheduled date.
    pub date: Date,
    /// Entrant ids.
    #[serde(default)]
    pub entrants: Vec<EntrantId>,
    /// Runs the event needs. Sport default when absent.
    #[serde(default)]
    pub required_runs: Option<u8>,
    /// Status string.
    pub status: EventStatus,
    /// Run 1 result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run1_results: Option<Ranking>,
    /// Run 2 result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run2_results: Option<Ranking>,
    /// Run 3 result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run3_results: Option<Ranking>,
    /// Run 4 result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run4_results: Option<Ranking>,
    /// Final ranking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Ranking>,
}

impl EventPayload {
    /// Converts the payload into a validated event.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload violates the run/result invariants.
    pub fn into_event(self, config: &SportConfig) -> Result<Event, DomainError> {
        let required_runs: u8 = self
            .required_runs
            .unwrap_or_else(|| config.runs_for(self.discipline.as_ref()));

        let mut run_results: BTreeMap<RunIndex, Ranking> = BTreeMap::new();
        let runs = [
            self.run1_results,
            self.run2_results,
            self.run3_results,
            self.run4_results,
        ];
        for (n, ranking) in (1u8..).zip(runs) {
            if let Some(ranking) = ranking {
                run_results.insert(RunIndex::new(n)?, ranking);
            }
        }

        Event::try_from(EventRecord {
            id: self.id,
            season_id: self.season_id,
            name: self.name,
            discipline: self.discipline,
            date: self.date,
            entrants: self.entrants,
            required_runs,
            status: self.status,
            run_results,
            final_result: self.results,
        })
    }
}

/// Per-discipline and overall standings as the server sends them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsPayload {
    /// Overall table.
    #[serde(default)]
    pub standings: Option<Vec<StandingsEntry>>,
    /// Discipline tables.
    #[serde(default)]
    pub discipline_standings: Option<BTreeMap<Discipline, Vec<StandingsEntry>>>,
}

impl StandingsPayload {
    /// Returns the tables the server sent, or `None` when it sent none.
    #[must_use]
    pub fn into_update(self) -> Option<StandingsUpdate> {
        let update = StandingsUpdate {
            overall: self.standings,
            disciplines: self.discipline_standings.unwrap_or_default(),
        };
        (!update.is_empty()).then_some(update)
    }
}

/// A season with its schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonPayload {
    /// The season.
    pub season: Season,
    /// Every event of the season.
    #[serde(default)]
    pub events: Vec<EventPayload>,
    /// Standings, if the server included them.
    #[serde(flatten)]
    pub standings: StandingsPayload,
}

impl SeasonPayload {
    /// Converts every event payload.
    ///
    /// # Errors
    ///
    /// Returns the first event conversion error.
    pub fn events(&self, config: &SportConfig) -> Result<Vec<Event>, DomainError> {
        self.events
            .iter()
            .cloned()
            .map(|e| e.into_event(config))
            .collect()
    }
}

/// Response of a run simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    /// Status the event is in now, if reported.
    #[serde(default)]
    pub status: Option<EventStatus>,
    /// The result of the simulated run.
    pub run_results: Ranking,
    /// Final ranking, on the terminal run.
    #[serde(default)]
    pub final_results: Option<Ranking>,
    /// Standings, on the terminal run.
    #[serde(flatten)]
    pub standings: StandingsPayload,
}

impl RunResponse {
    /// Splits the response into the lifecycle outcome and any standings tables.
    #[must_use]
    pub fn into_parts(self) -> (RunOutcome, Option<StandingsUpdate>) {
        (
            RunOutcome {
                reported_status: self.status,
                run_result: self.run_results,
                final_result: self.final_results,
            },
            self.standings.into_update(),
        )
    }
}

/// Response of the playoff/playout advance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseAdvanceResponse {
    /// The phase the season should move to, if any.
    #[serde(default)]
    pub next_phase: Option<SeasonPhase>,
}

/// Response of `GET /worlds/{worldId}/current-week-status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekStatusResponse {
    /// The unlocked week.
    #[serde(default)]
    pub current_unlocked_week: Option<WeekKey>,
    /// Whether the unlocked week is fully resolved.
    #[serde(default)]
    pub is_week_complete: bool,
    /// Terminal events in the unlocked week.
    #[serde(default)]
    pub completed_in_week: usize,
    /// Events in the unlocked week.
    #[serde(default)]
    pub total_in_week: usize,
    /// Events of the unlocked week.
    #[serde(default)]
    pub current_week_events: Vec<GatedEvent>,
    /// Events of the unlocked week keyed by ISO date.
    #[serde(default)]
    pub events_by_date: BTreeMap<String, Vec<GatedEvent>>,
    /// Counters for every week with events.
    #[serde(default)]
    pub all_weeks: Vec<WeekSummary>,
}

impl WeekStatusResponse {
    /// Converts the response into the domain week status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekKey` if a date key does not parse.
    pub fn into_week_status(self) -> Result<WeekStatus, DomainError> {
        let format = time::macros::format_description!("[year]-[month]-[day]");
        let mut events_by_date: BTreeMap<Date, Vec<GatedEvent>> = BTreeMap::new();
        for (key, events) in self.events_by_date {
            let date: Date = Date::parse(&key, format)
                .map_err(|_| DomainError::InvalidWeekKey(key.clone()))?;
            events_by_date.insert(date, events);
        }

        Ok(WeekStatus {
            current_unlocked_week: self.current_unlocked_week,
            is_week_complete: self.is_week_complete,
            completed_in_week: self.completed_in_week,
            total_in_week: self.total_in_week,
            current_week_events: self.current_week_events,
            events_by_date,
            all_weeks: self.all_weeks,
        })
    }
}
