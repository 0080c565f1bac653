// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use podium_domain::{DomainError, Sport, WorldId};

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A season of another sport was handed to this state.
    SportMismatch {
        /// The sport this state is scoped to.
        expected: Sport,
        /// The sport of the season.
        actual: Sport,
    },
    /// A season of another world was handed to this state.
    WorldMismatch {
        /// The world this state is scoped to.
        expected: WorldId,
        /// The world of the season.
        actual: WorldId,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::SportMismatch { expected, actual } => {
                write!(f, "Expected a {expected} season, got {actual}")
            }
            Self::WorldMismatch { expected, actual } => {
                write!(f, "Expected a season of world {expected}, got {actual}")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
