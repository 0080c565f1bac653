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

mod apply;
mod command;
mod error;
mod state;

#[cfg(test)]
mod tests;

use podium_domain::{DomainError, EventId, RunIndex, validate_run_request};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::{SeasonRecord, SeasonState, Signal, State, TransitionResult};

/// Validates that a run may be requested for an event.
///
/// This is a read-only check made before the simulation service is called,
/// so an out-of-order request never reaches the network.
///
/// # Arguments
///
/// * `state` - The current state
/// * `event_id` - The event
/// * `run` - The run about to be requested
///
/// # Returns
///
/// * `Ok(())` if `run` is the next required run of the event
/// * `Err(DomainError::OutOfSequence)` if another run is due first
/// * `Err(DomainError::AlreadyFinal)` if the event is terminal
///
/// # Errors
///
/// Returns an error if:
/// - There is no active season or no such event
/// - The run is not the next required run
/// - The event already has its final ranking
pub fn validate_run(state: &State, event_id: &EventId, run: RunIndex) -> Result<(), DomainError> {
    validate_run_request(state.event(event_id)?, run)
}
