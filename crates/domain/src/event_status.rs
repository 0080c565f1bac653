// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event status states and valid transitions.
//!
//! An event moves `scheduled → (qualifying) → run1_completed → … → completed`.
//! The number of intermediate `runN_completed` states depends on the runs the
//! event requires; the final run always lands on `completed`, never on
//! `runN_completed`.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The most runs any event can require.
pub const MAX_RUNS: u8 = 4;

/// A 1-based run number, bounded by [`MAX_RUNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RunIndex(u8);

impl RunIndex {
    /// Run 1.
    pub const FIRST: Self = Self(1);

    /// Creates a run index.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRunIndex` if `n` is 0 or above `MAX_RUNS`.
    pub const fn new(n: u8) -> Result<Self, DomainError> {
        if n == 0 || n > MAX_RUNS {
            return Err(DomainError::InvalidRunIndex(n));
        }
        Ok(Self(n))
    }

    /// Returns the run number.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns the following run, if any.
    #[must_use]
    pub const fn next(&self) -> Option<Self> {
        if self.0 < MAX_RUNS {
            Some(Self(self.0 + 1))
        } else {
            None
        }
    }
}

impl std::fmt::Display for RunIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "run {}", self.0)
    }
}

impl TryFrom<u8> for RunIndex {
    type Error = DomainError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::new(n)
    }
}

impl From<RunIndex> for u8 {
    fn from(run: RunIndex) -> Self {
        run.0
    }
}

/// Validates a required run count.
///
/// # Errors
///
/// Returns `DomainError::InvalidRunCount` if `runs` is 0 or above `MAX_RUNS`.
pub const fn validate_run_count(runs: u8) -> Result<u8, DomainError> {
    if runs == 0 || runs > MAX_RUNS {
        return Err(DomainError::InvalidRunCount(runs));
    }
    Ok(runs)
}

/// Event status states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", into = "String")]
pub enum EventStatus {
    /// Drawn into the schedule, nothing has run yet.
    #[default]
    Scheduled,
    /// Qualifying round under way (ski jumping).
    Qualifying,
    /// Start list drawn, run 1 not yet recorded.
    InProgress,
    /// The given run has results and more runs are required.
    RunCompleted(RunIndex),
    /// All required runs recorded; the final ranking is authoritative.
    Completed,
}

impl EventStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub fn as_string(&self) -> String {
        match self {
            Self::Scheduled => String::from("scheduled"),
            Self::Qualifying => String::from("qualifying"),
            Self::InProgress => String::from("in_progress"),
            Self::RunCompleted(run) => format!("run{}_completed", run.get()),
            Self::Completed => String::from("completed"),
        }
    }

    /// Parses a status from its string representation.
    ///
    /// The server's older per-sport aliases (`not_started`, `upcoming`,
    /// `pending`, `finished`) are accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEventStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "scheduled" | "not_started" | "upcoming" | "pending" => Ok(Self::Scheduled),
            "qualifying" => Ok(Self::Qualifying),
            "in_progress" => Ok(Self::InProgress),
            "completed" | "finished" => Ok(Self::Completed),
            _ => s
                .strip_prefix("run")
                .and_then(|rest| rest.strip_suffix("_completed"))
                .and_then(|n| n.parse::<u8>().ok())
                .and_then(|n| RunIndex::new(n).ok())
                .map(Self::RunCompleted)
                .ok_or_else(|| DomainError::InvalidEventStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (no further runs are accepted).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Number of runs that have results in this status.
    ///
    /// # Arguments
    ///
    /// * `required_runs` - The run count of the event
    #[must_use]
    pub const fn completed_runs(&self, required_runs: u8) -> u8 {
        match self {
            Self::Scheduled | Self::Qualifying | Self::InProgress => 0,
            Self::RunCompleted(run) => run.get(),
            Self::Completed => required_runs,
        }
    }

    /// The run the event is waiting for, or `None` once terminal.
    #[must_use]
    pub const fn next_run(&self) -> Option<RunIndex> {
        match self {
            Self::Scheduled | Self::Qualifying | Self::InProgress => Some(RunIndex::FIRST),
            Self::RunCompleted(run) => run.next(),
            Self::Completed => None,
        }
    }

    /// The status an event lands on after recording `run`.
    ///
    /// # Arguments
    ///
    /// * `run` - The run being recorded
    /// * `required_runs` - The run count of the event
    #[must_use]
    pub const fn after_run(run: RunIndex, required_runs: u8) -> Self {
        if run.get() >= required_runs {
            Self::Completed
        } else {
            Self::RunCompleted(run)
        }
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// Pre-run statuses may move forward among themselves
    /// (`scheduled → qualifying → in_progress`); every other transition
    /// must be the result of recording exactly the next run.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(
        &self,
        new_status: Self,
        required_runs: u8,
    ) -> Result<(), DomainError> {
        // Cannot transition from terminal states
        if self.is_terminal() {
            return Err(DomainError::InvalidEventStatus(format!(
                "cannot move from {} to {}: event is terminal",
                self.as_string(),
                new_status.as_string()
            )));
        }

        let valid: bool = match (self, new_status) {
            (Self::Scheduled, Self::Qualifying | Self::InProgress)
            | (Self::Qualifying, Self::InProgress) => true,
            _ => self
                .next_run()
                .is_some_and(|next| Self::after_run(next, required_runs) == new_status),
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidEventStatus(format!(
                "cannot move from {} to {} with {required_runs} required run(s)",
                self.as_string(),
                new_status.as_string()
            )))
        }
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_string())
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl TryFrom<String> for EventStatus {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse_str(&s)
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        status.as_string()
    }
}
