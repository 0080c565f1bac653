// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use podium_domain::{
    Event, EventId, EventStatus, RunIndex, RunOutcome, Season, SeasonId, SeasonPhase,
    StandingsUpdate,
};

/// A command represents a confirmed change to a sport's season state.
///
/// Commands are the only way to change state. Store code issues them after
/// the server has accepted the corresponding request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a new season with its drawn schedule.
    CreateSeason {
        /// The season as created by the server.
        season: Season,
        /// The drawn schedule.
        events: Vec<Event>,
    },
    /// Replace the cached season with a fresh server snapshot.
    SyncSeason {
        /// The season.
        season: Season,
        /// Every event of the season.
        events: Vec<Event>,
        /// Server tables, when the snapshot carried any.
        standings: Option<StandingsUpdate>,
    },
    /// Move an event into qualifying or in-progress before run 1.
    BeginEvent {
        /// The event.
        event_id: EventId,
        /// `Qualifying` or `InProgress`.
        status: EventStatus,
    },
    /// Record the outcome of one run.
    RecordRun {
        /// The event.
        event_id: EventId,
        /// The run that was simulated.
        run: RunIndex,
        /// What the simulation service returned.
        outcome: RunOutcome,
        /// Tables returned with a terminal run, if any.
        standings: Option<StandingsUpdate>,
    },
    /// Clear every result and return the season to its initial phase.
    ResetSeason,
    /// Move the season into another phase.
    AdvancePhase {
        /// The target phase.
        to: SeasonPhase,
    },
    /// Finish the season and archive it into history.
    CompleteSeason,
    /// Drop the season and its schedule without archiving it.
    DeleteSeason {
        /// The season to delete.
        season_id: SeasonId,
    },
}

impl Command {
    /// Short name of the command, for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateSeason { .. } => "CreateSeason",
            Self::SyncSeason { .. } => "SyncSeason",
            Self::BeginEvent { .. } => "BeginEvent",
            Self::RecordRun { .. } => "RecordRun",
            Self::ResetSeason => "ResetSeason",
            Self::AdvancePhase { .. } => "AdvancePhase",
            Self::CompleteSeason => "CompleteSeason",
            Self::DeleteSeason { .. } => "DeleteSeason",
        }
    }
}
