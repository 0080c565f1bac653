// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use podium_domain::{
    DomainError, Event, EventId, EventStatus, Season, SeasonId, SeasonPhase, Sport, SportConfig,
    StandingsSnapshot, WorldId,
};

/// A season in play together with its schedule and standings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonState {
    /// The season.
    pub season: Season,
    /// Every event of the season, in schedule order.
    pub events: Vec<Event>,
    /// The current standings.
    pub standings: StandingsSnapshot,
}

impl SeasonState {
    /// Returns an event by id.
    #[must_use]
    pub fn event(&self, event_id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id() == event_id)
    }

    /// Number of events without a final ranking.
    #[must_use]
    pub fn open_events(&self) -> usize {
        self.events.iter().filter(|e| !e.is_terminal()).count()
    }
}

/// A completed season kept for reference. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRecord {
    /// The season, in phase `Completed`.
    pub season: Season,
    /// Final standings.
    pub standings: StandingsSnapshot,
}

/// The season state of one sport within one world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    /// The world this state is scoped to.
    pub world_id: WorldId,
    /// The sport this state is scoped to.
    pub sport: Sport,
    /// Rules for the sport.
    pub config: SportConfig,
    /// The season in play, if any.
    pub current: Option<SeasonState>,
    /// Completed seasons, oldest first.
    pub history: Vec<SeasonRecord>,
}

impl State {
    /// Creates an empty state for a sport in a world.
    ///
    /// # Arguments
    ///
    /// * `world_id` - The world this state is scoped to
    /// * `sport` - The sport this state is scoped to
    #[must_use]
    pub const fn new(world_id: WorldId, sport: Sport) -> Self {
        Self {
            world_id,
            sport,
            config: SportConfig::for_sport(sport),
            current: None,
            history: Vec::new(),
        }
    }

    /// Returns the season in play.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NoActiveSeason` if there is none.
    pub fn active_season(&self) -> Result<&SeasonState, DomainError> {
        self.current
            .as_ref()
            .ok_or(DomainError::NoActiveSeason { sport: self.sport })
    }

    /// Returns an event of the active season.
    ///
    /// # Errors
    ///
    /// * `DomainError::NoActiveSeason` if there is no season in play
    /// * `DomainError::EventNotFound` if the season has no such event
    pub fn event(&self, event_id: &EventId) -> Result<&Event, DomainError> {
        self.active_season()?
            .event(event_id)
            .ok_or_else(|| DomainError::EventNotFound(event_id.clone()))
    }

    /// Returns the status of an event. Pure read.
    ///
    /// # Errors
    ///
    /// Same as [`State::event`].
    pub fn event_status(&self, event_id: &EventId) -> Result<EventStatus, DomainError> {
        self.event(event_id).map(Event::status)
    }

    /// Returns a completed season from history.
    #[must_use]
    pub fn archived(&self, season_id: &SeasonId) -> Option<&SeasonRecord> {
        self.history.iter().find(|r| &r.season.id == season_id)
    }
}

/// Something a transition did that callers may react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// An event reached its terminal status.
    EventCompleted {
        /// The event.
        event_id: EventId,
    },
    /// Standings were recomputed locally.
    StandingsRecomputed {
        /// The season.
        season_id: SeasonId,
    },
    /// Standings were replaced by a server snapshot.
    StandingsReplaced {
        /// The season.
        season_id: SeasonId,
    },
    /// Every result of the season was cleared.
    SeasonReset {
        /// The season.
        season_id: SeasonId,
    },
    /// The season's phase changed.
    PhaseChanged {
        /// The previous phase.
        from: SeasonPhase,
        /// The new phase.
        to: SeasonPhase,
    },
    /// The season was completed and moved into history.
    SeasonArchived {
        /// The season.
        season_id: SeasonId,
    },
    /// The season was deleted with its schedule.
    SeasonDeleted {
        /// The season.
        season_id: SeasonId,
    },
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// What happened, in order.
    pub signals: Vec<Signal>,
}
