// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::event_status::{EventStatus, RunIndex};
use crate::types::{EventId, SeasonId, SeasonPhase, Sport, WorldId};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A run was requested that is not the next required run of the event.
    OutOfSequence {
        /// The event the run was requested for.
        event_id: EventId,
        /// The run the event is waiting for.
        expected: RunIndex,
        /// The run that was requested.
        requested: RunIndex,
    },
    /// A mutation was requested on an event that already has final results.
    AlreadyFinal {
        /// The terminal event.
        event_id: EventId,
    },
    /// Event does not exist in the season.
    EventNotFound(EventId),
    /// Season does not exist.
    SeasonNotFound(SeasonId),
    /// Run index outside `1..=MAX_RUNS`.
    InvalidRunIndex(u8),
    /// Required run count outside `1..=MAX_RUNS`.
    InvalidRunCount(u8),
    /// An event record violates the run/result invariants.
    InconsistentEvent {
        /// The offending event.
        event_id: EventId,
        /// Which invariant was violated.
        reason: String,
    },
    /// Failed to parse an event status string.
    InvalidEventStatus(String),
    /// Failed to parse a season phase string.
    InvalidSeasonPhase(String),
    /// Failed to parse a sport identifier.
    UnknownSport(String),
    /// Failed to parse a week key string.
    InvalidWeekKey(String),
    /// The season phase transition is not permitted.
    InvalidPhaseTransition {
        /// The current phase.
        from: SeasonPhase,
        /// The requested phase.
        to: SeasonPhase,
    },
    /// The sport has no use for the requested phase.
    UnsupportedPhase {
        /// The sport.
        sport: Sport,
        /// The requested phase.
        phase: SeasonPhase,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A non-completed season already exists for this sport in the world.
    ActiveSeasonExists {
        /// The world.
        world_id: WorldId,
        /// The sport.
        sport: Sport,
        /// The season that is still active.
        season_id: SeasonId,
    },
    /// The operation needs an active season and there is none.
    NoActiveSeason {
        /// The sport.
        sport: Sport,
    },
    /// The season cannot be completed while events are still open.
    SeasonIncomplete {
        /// The season.
        season_id: SeasonId,
        /// Number of events without final results.
        remaining: usize,
    },
    /// The season has already been completed and is read-only.
    SeasonFinalized(SeasonId),
    /// A run outcome reported a status other than the one the lifecycle implies.
    UnexpectedStatus {
        /// The event.
        event_id: EventId,
        /// Status implied by the run order.
        expected: EventStatus,
        /// Status reported with the outcome.
        reported: EventStatus,
    },
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfSequence {
                event_id,
                expected,
                requested,
            } => write!(
                f,
                "Event {event_id} is waiting for {expected}, cannot run {requested}"
            ),
            Self::AlreadyFinal { event_id } => {
                write!(f, "Event {event_id} is already completed")
            }
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::SeasonNotFound(id) => write!(f, "Season not found: {id}"),
            Self::InvalidRunIndex(n) => write!(f, "Invalid run index: {n}"),
            Self::InvalidRunCount(n) => write!(f, "Invalid run count: {n}"),
            Self::InconsistentEvent { event_id, reason } => {
                write!(f, "Event {event_id} is inconsistent: {reason}")
            }
            Self::InvalidEventStatus(s) => write!(f, "Invalid event status: {s}"),
            Self::InvalidSeasonPhase(s) => write!(f, "Invalid season phase: {s}"),
            Self::UnknownSport(s) => write!(f, "Unknown sport: {s}"),
            Self::InvalidWeekKey(s) => write!(f, "Invalid week key: {s}"),
            Self::InvalidPhaseTransition { from, to } => {
                write!(f, "Season cannot move from {from} to {to}")
            }
            Self::UnsupportedPhase { sport, phase } => {
                write!(f, "{sport} has no {phase} phase")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::ActiveSeasonExists {
                world_id,
                sport,
                season_id,
            } => write!(
                f,
                "World {world_id} already has an active {sport} season ({season_id})"
            ),
            Self::NoActiveSeason { sport } => write!(f, "No active {sport} season"),
            Self::SeasonIncomplete {
                season_id,
                remaining,
            } => write!(
                f,
                "Season {season_id} still has {remaining} event(s) without final results"
            ),
            Self::SeasonFinalized(id) => write!(f, "Season {id} is completed and read-only"),
            Self::UnexpectedStatus {
                event_id,
                expected,
                reported,
            } => write!(
                f,
                "Event {event_id} reported status {reported}, expected {expected}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
