// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{SeasonRecord, SeasonState, Signal, State, TransitionResult};
use podium_domain::{
    Advance, DomainError, Event, Season, SeasonPhase, StandingsSnapshot, StandingsUpdate, advance,
    begin, recompute,
};

fn check_scope(state: &State, season: &Season) -> Result<(), CoreError> {
    if season.sport != state.sport {
        return Err(CoreError::SportMismatch {
            expected: state.sport,
            actual: season.sport,
        });
    }
    if season.world_id != state.world_id {
        return Err(CoreError::WorldMismatch {
            expected: state.world_id.clone(),
            actual: season.world_id.clone(),
        });
    }
    Ok(())
}

fn check_events(season: &Season, events: &[Event]) -> Result<(), DomainError> {
    match events.iter().find(|e| e.season_id() != &season.id) {
        Some(stray) => Err(DomainError::InconsistentEvent {
            event_id: stray.id().clone(),
            reason: format!(
                "belongs to season {}, not {}",
                stray.season_id(),
                season.id
            ),
        }),
        None => Ok(()),
    }
}

fn active_mut(state: &mut State) -> Result<&mut SeasonState, DomainError> {
    let sport = state.sport;
    state
        .current
        .as_mut()
        .ok_or(DomainError::NoActiveSeason { sport })
}

/// Standings for a season: a local recompute with any tables the server sent laid over it.
fn settle_standings(
    state: &State,
    season: &Season,
    events: &[Event],
    standings: Option<StandingsUpdate>,
    signals: &mut Vec<Signal>,
) -> StandingsSnapshot {
    let season_id = season.id.clone();
    let local: StandingsSnapshot = recompute(events, &state.config);
    match standings.filter(|u| !u.is_empty()) {
        Some(update) => {
            signals.push(Signal::StandingsReplaced { season_id });
            update.overlay(local)
        }
        None => {
            signals.push(Signal::StandingsRecomputed { season_id });
            local
        }
    }
}

fn complete(state: &State) -> Result<TransitionResult, CoreError> {
    let season_state: &SeasonState = state.active_season()?;
    let remaining: usize = season_state.open_events();
    if remaining > 0 {
        return Err(DomainError::SeasonIncomplete {
            season_id: season_state.season.id.clone(),
            remaining,
        }
        .into());
    }

    let from: SeasonPhase = season_state.season.phase;
    if !from.can_transition_to(SeasonPhase::Completed) {
        return Err(DomainError::InvalidPhaseTransition {
            from,
            to: SeasonPhase::Completed,
        }
        .into());
    }

    let mut season: Season = season_state.season.clone();
    season.phase = SeasonPhase::Completed;
    let season_id = season.id.clone();

    let mut new_state: State = state.clone();
    new_state.current = None;
    new_state.history.push(SeasonRecord {
        season,
        standings: season_state.standings.clone(),
    });

    Ok(TransitionResult {
        new_state,
        signals: vec![
            Signal::PhaseChanged {
                from,
                to: SeasonPhase::Completed,
            },
            Signal::SeasonArchived { season_id },
        ],
    })
}

/// Applies a command to the current state, producing a new state and signals.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and what happened
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - The season belongs to another sport or world
/// - A season is already active when creating one
/// - There is no active season for a season-scoped command
/// - The run is out of sequence or the event is already final
/// - The season still has open events when completing it
/// - The season to delete is neither active nor in history
#[allow(clippy::too_many_lines)]
pub fn apply(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateSeason { mut season, events } => {
            check_scope(state, &season)?;
            if let Some(active) = &state.current {
                return Err(DomainError::ActiveSeasonExists {
                    world_id: state.world_id.clone(),
                    sport: state.sport,
                    season_id: active.season.id.clone(),
                }
                .into());
            }
            check_events(&season, &events)?;

            season.phase = state.config.initial_phase();
            let mut signals: Vec<Signal> = Vec::new();
            let standings: StandingsSnapshot =
                settle_standings(state, &season, &events, None, &mut signals);

            let mut new_state: State = state.clone();
            new_state.current = Some(SeasonState {
                season,
                events,
                standings,
            });

            Ok(TransitionResult { new_state, signals })
        }
        Command::SyncSeason {
            season,
            events,
            standings,
        } => {
            check_scope(state, &season)?;
            check_events(&season, &events)?;

            let mut signals: Vec<Signal> = Vec::new();
            let standings: StandingsSnapshot =
                settle_standings(state, &season, &events, standings, &mut signals);

            let mut new_state: State = state.clone();
            if season.phase.is_completed() {
                if new_state
                    .current
                    .as_ref()
                    .is_some_and(|c| c.season.id == season.id)
                {
                    new_state.current = None;
                }
                new_state.history.retain(|r| r.season.id != season.id);
                signals.push(Signal::SeasonArchived {
                    season_id: season.id.clone(),
                });
                new_state.history.push(SeasonRecord { season, standings });
            } else {
                new_state.current = Some(SeasonState {
                    season,
                    events,
                    standings,
                });
            }

            Ok(TransitionResult { new_state, signals })
        }
        Command::BeginEvent { event_id, status } => {
            let updated: Event = begin(state.event(&event_id)?, status)?;

            let mut new_state: State = state.clone();
            let season_state: &mut SeasonState = active_mut(&mut new_state)?;
            for event in &mut season_state.events {
                if event.id() == &event_id {
                    *event = updated.clone();
                }
            }

            Ok(TransitionResult {
                new_state,
                signals: Vec::new(),
            })
        }
        Command::RecordRun {
            event_id,
            run,
            outcome,
            standings,
        } => {
            let Advance {
                event: updated,
                reached_terminal,
            } = advance(state.event(&event_id)?, run, outcome, state.config.mark_order)?;

            let mut new_state: State = state.clone();
            let mut signals: Vec<Signal> = Vec::new();
            let season_state: &mut SeasonState = active_mut(&mut new_state)?;
            for event in &mut season_state.events {
                if event.id() == &event_id {
                    *event = updated.clone();
                }
            }

            if reached_terminal {
                signals.push(Signal::EventCompleted {
                    event_id: event_id.clone(),
                });
                season_state.standings = settle_standings(
                    state,
                    &season_state.season,
                    &season_state.events,
                    standings,
                    &mut signals,
                );
            }

            Ok(TransitionResult { new_state, signals })
        }
        Command::ResetSeason => {
            let mut new_state: State = state.clone();
            let initial: SeasonPhase = state.config.initial_phase();
            let season_state: &mut SeasonState = active_mut(&mut new_state)?;

            let from: SeasonPhase = season_state.season.phase;
            season_state.events = season_state.events.iter().map(Event::reset).collect();
            season_state.standings = recompute(&season_state.events, &state.config);
            season_state.season.phase = initial;

            let mut signals: Vec<Signal> = vec![Signal::SeasonReset {
                season_id: season_state.season.id.clone(),
            }];
            if from != initial {
                signals.push(Signal::PhaseChanged { from, to: initial });
            }

            Ok(TransitionResult { new_state, signals })
        }
        Command::AdvancePhase { to } => {
            if to.is_completed() {
                return complete(state);
            }
            if !state.config.supports_phase(to) {
                return Err(DomainError::UnsupportedPhase {
                    sport: state.sport,
                    phase: to,
                }
                .into());
            }

            let from: SeasonPhase = state.active_season()?.season.phase;
            if !from.can_transition_to(to) {
                return Err(DomainError::InvalidPhaseTransition { from, to }.into());
            }

            let mut new_state: State = state.clone();
            active_mut(&mut new_state)?.season.phase = to;

            Ok(TransitionResult {
                new_state,
                signals: vec![Signal::PhaseChanged { from, to }],
            })
        }
        Command::CompleteSeason => complete(state),
        Command::DeleteSeason { season_id } => {
            let mut new_state: State = state.clone();
            if state
                .current
                .as_ref()
                .is_some_and(|c| c.season.id == season_id)
            {
                new_state.current = None;
            } else if state.archived(&season_id).is_some() {
                new_state.history.retain(|r| r.season.id != season_id);
            } else {
                return Err(DomainError::SeasonNotFound(season_id).into());
            }

            Ok(TransitionResult {
                new_state,
                signals: vec![Signal::SeasonDeleted { season_id }],
            })
        }
    }
}
