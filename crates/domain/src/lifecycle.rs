// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run lifecycle rules.
//!
//! These functions decide whether a run may be requested and what an event
//! looks like once a run outcome arrives. They are pure: the caller owns
//! the event and replaces it with the returned value.

use crate::error::DomainError;
use crate::event::{Event, Ranking, combine_runs};
use crate::event_status::{EventStatus, RunIndex};
use crate::sport::MarkOrder;

/// What the simulation service returned for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Status the service reports the event is now in, if it says.
    pub reported_status: Option<EventStatus>,
    /// Result of the run that was simulated.
    pub run_result: Ranking,
    /// Final ranking, when the service computed one.
    pub final_result: Option<Ranking>,
}

impl RunOutcome {
    /// Creates an outcome carrying only the run result.
    #[must_use]
    pub const fn run_only(run_result: Ranking) -> Self {
        Self {
            reported_status: None,
            run_result,
            final_result: None,
        }
    }
}

/// The event after a run was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advance {
    /// The updated event.
    pub event: Event,
    /// Whether this run made the event terminal.
    pub reached_terminal: bool,
}

/// Checks that `run` is the run the event is waiting for.
///
/// # Errors
///
/// * `DomainError::AlreadyFinal` if the event is terminal
/// * `DomainError::OutOfSequence` if `run` is not the next required run
pub fn validate_run_request(event: &Event, run: RunIndex) -> Result<(), DomainError> {
    let Some(expected) = event.next_run() else {
        return Err(DomainError::AlreadyFinal {
            event_id: event.id().clone(),
        });
    };

    if run != expected || run.get() > event.required_runs() {
        return Err(DomainError::OutOfSequence {
            event_id: event.id().clone(),
            expected,
            requested: run,
        });
    }

    Ok(())
}

/// Records a run outcome on an event.
///
/// The status moves to `runN_completed`, or to `completed` when `run` is the
/// last required run. On the last run the final ranking is the one in the
/// outcome, or the per-sport combination of every run result when the
/// outcome carries none. A final ranking sent with an intermediate run is
/// ignored.
///
/// # Arguments
///
/// * `event` - The event as currently cached
/// * `run` - The run that was simulated
/// * `outcome` - What the service returned
/// * `order` - How marks sort when combining runs
///
/// # Errors
///
/// * Any error from [`validate_run_request`]
/// * `DomainError::UnexpectedStatus` if the service reported a status that
///   disagrees with the run order
pub fn advance(
    event: &Event,
    run: RunIndex,
    outcome: RunOutcome,
    order: MarkOrder,
) -> Result<Advance, DomainError> {
    validate_run_request(event, run)?;

    let new_status: EventStatus = EventStatus::after_run(run, event.required_runs());
    event
        .status()
        .validate_transition(new_status, event.required_runs())?;

    if let Some(reported) = outcome.reported_status
        && reported != new_status
    {
        return Err(DomainError::UnexpectedStatus {
            event_id: event.id().clone(),
            expected: new_status,
            reported,
        });
    }

    let reached_terminal: bool = new_status.is_terminal();
    let final_result: Option<Ranking> = if reached_terminal {
        Some(outcome.final_result.unwrap_or_else(|| {
            let mut runs: Vec<&Ranking> = event.run_results().map(|(_, r)| r).collect();
            runs.push(&outcome.run_result);
            combine_runs(&runs, order)
        }))
    } else {
        None
    };

    Ok(Advance {
        event: event.with_run(run, outcome.run_result, new_status, final_result),
        reached_terminal,
    })
}

/// Moves an event into a pre-run status (`qualifying` or `in_progress`).
///
/// # Errors
///
/// Returns an error if the event is not in a status that may move to `status`.
pub fn begin(event: &Event, status: EventStatus) -> Result<Event, DomainError> {
    if event.is_terminal() {
        return Err(DomainError::AlreadyFinal {
            event_id: event.id().clone(),
        });
    }
    if !matches!(status, EventStatus::Qualifying | EventStatus::InProgress) {
        return Err(DomainError::InvalidEventStatus(format!(
            "{status} is not a pre-run status"
        )));
    }
    event
        .status()
        .validate_transition(status, event.required_runs())?;
    Ok(event.with_status(status))
}
