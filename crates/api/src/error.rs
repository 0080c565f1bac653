// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the store layer.

use podium::CoreError;
use podium_domain::{DomainError, EventId, RunIndex, WeekKey};

/// Failures reported by a [`crate::Backend`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The bearer credential is missing or was rejected.
    #[error("credential missing or rejected")]
    Unauthenticated,
    /// The server does not know the resource.
    #[error("{resource} not found")]
    NotFound {
        /// What was requested.
        resource: String,
    },
    /// The server answered with an error body.
    #[error("server rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Error message from the body.
        message: String,
    },
    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The response body could not be decoded.
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the contract
/// store callers program against.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The remote call failed or returned an error body.
    #[error("Network or server error: {message}")]
    NetworkOrServer {
        /// A human-readable description.
        message: String,
    },
    /// A run was requested before its predecessor completed.
    #[error("Event {event_id} is waiting for {expected}, cannot run {requested}")]
    OutOfSequence {
        /// The event.
        event_id: EventId,
        /// The run the event is waiting for.
        expected: RunIndex,
        /// The run that was requested.
        requested: RunIndex,
    },
    /// A mutation was requested on a terminal event.
    #[error("Event {event_id} is already final")]
    AlreadyFinal {
        /// The event.
        event_id: EventId,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The caller must log in (again).
    #[error("Not authenticated: {message}")]
    Unauthenticated {
        /// A human-readable description.
        message: String,
    },
    /// The event falls in a week after the current unlocked week.
    #[error("Event {event_id} is in {event_week}, but the current week is {current_week}")]
    WeekLocked {
        /// The event.
        event_id: EventId,
        /// The event's week.
        event_week: WeekKey,
        /// The current unlocked week.
        current_week: WeekKey,
    },
    /// Another run request for the event has not resolved yet.
    #[error("A request for event {event_id} is already in flight")]
    RequestInFlight {
        /// The event.
        event_id: EventId,
    },
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
}

impl ApiError {
    /// Returns whether the caller should be routed to the login flow.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Unauthenticated { .. })
    }
}

fn rule(rule: &str, err: &DomainError) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message: err.to_string(),
    }
}

fn input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::OutOfSequence {
            event_id,
            expected,
            requested,
        } => ApiError::OutOfSequence {
            event_id,
            expected,
            requested,
        },
        DomainError::AlreadyFinal { event_id } => ApiError::AlreadyFinal { event_id },
        DomainError::EventNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Event"),
            message: format!("Event {id} does not exist in the season"),
        },
        DomainError::SeasonNotFound(id) => ApiError::NotFound {
            resource_type: String::from("Season"),
            message: format!("Season {id} does not exist"),
        },
        DomainError::NoActiveSeason { sport } => ApiError::NotFound {
            resource_type: String::from("Active season"),
            message: format!("No active {sport} season"),
        },
        DomainError::InvalidRunIndex(_) => input("run", &err),
        DomainError::InvalidRunCount(_) => input("required_runs", &err),
        DomainError::InvalidEventStatus(_) => input("status", &err),
        DomainError::InvalidSeasonPhase(_) => input("phase", &err),
        DomainError::UnknownSport(_) => input("sport", &err),
        DomainError::InvalidWeekKey(_) => input("week", &err),
        DomainError::DateArithmeticOverflow { .. } => input("date", &err),
        DomainError::InconsistentEvent { .. } => rule("consistent_event", &err),
        DomainError::InvalidPhaseTransition { .. } => rule("phase_order", &err),
        DomainError::UnsupportedPhase { .. } => rule("sport_phases", &err),
        DomainError::ActiveSeasonExists { .. } => rule("single_active_season", &err),
        DomainError::SeasonIncomplete { .. } => rule("season_complete", &err),
        DomainError::SeasonFinalized(_) => rule("season_read_only", &err),
        DomainError::UnexpectedStatus { .. } => rule("run_order", &err),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::SportMismatch { .. } | CoreError::WorldMismatch { .. } => {
            ApiError::DomainRuleViolation {
                rule: String::from("store_scope"),
                message: err.to_string(),
            }
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        translate_domain_error(err)
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        translate_core_error(err)
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Unauthenticated => Self::Unauthenticated {
                message: err.to_string(),
            },
            BackendError::NotFound { resource } => Self::NotFound {
                message: format!("{resource} does not exist on the server"),
                resource_type: resource,
            },
            BackendError::Rejected { .. }
            | BackendError::Transport(_)
            | BackendError::Decode(_) => Self::NetworkOrServer {
                message: err.to_string(),
            },
        }
    }
}
