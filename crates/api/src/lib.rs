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

//! The store layer between a user interface and the simulation service.
//!
//! Stores cache server state, validate requests locally before they reach
//! the network and update their cache only from confirmed responses.

mod backend;
mod error;
mod request_response;
mod roster_store;
mod season_store;
mod session;
mod store;
mod week_status;
mod world_store;

#[cfg(test)]
mod tests;

// Re-export public types
pub use backend::Backend;
pub use error::{ApiError, BackendError, translate_core_error, translate_domain_error};
pub use request_response::{
    CreateSeasonRequest, CreateWorldRequest, EntrantRequest, EventPayload, GenerateRosterRequest,
    LoginRequest, LoginResponse, PhaseAdvanceResponse, RunResponse, SeasonPayload,
    SimulateRunRequest, StandingsPayload, WeekStatusResponse,
};
pub use roster_store::RosterStore;
pub use season_store::{PhaseAdvance, SeasonStore, StoreSnapshot};
pub use session::Session;
pub use store::{InFlight, InFlightGuard, StoreStatus};
pub use week_status::WeekStatusStore;
pub use world_store::WorldStore;
