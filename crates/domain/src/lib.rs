// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod event;
mod event_status;
mod lifecycle;
mod sport;
mod standings;
mod types;
mod week;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use event::{Event, EventRecord, Placing, Ranking, combine_runs};
pub use event_status::{EventStatus, MAX_RUNS, RunIndex, validate_run_count};
pub use lifecycle::{Advance, RunOutcome, advance, begin, validate_run_request};
pub use sport::{DisciplineRule, MarkOrder, PointsScheme, SportConfig};
pub use standings::{StandingsEntry, StandingsSnapshot, StandingsUpdate, recompute};

// Re-export public types
pub use types::{
    Discipline, Entrant, EntrantId, EventId, Season, SeasonId, SeasonPhase, Sport, World, WorldId,
};
pub use week::{
    GatedEvent, WeekKey, WeekStatus, WeekSummary, current_unlocked_week, is_locked, week_status,
};
