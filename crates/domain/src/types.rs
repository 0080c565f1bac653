// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a server-assigned identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }
    };
}

string_id!(
    /// Identifier of a world, the container of one independent competition universe.
    WorldId
);
string_id!(
    /// Identifier of a season.
    SeasonId
);
string_id!(
    /// Identifier of a single competition event.
    EventId
);
string_id!(
    /// Identifier of a roster entrant (athlete, team, player or fighter).
    EntrantId
);

/// The sports a world can run seasons for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    AlpineSkiing,
    Biathlon,
    Bobsleigh,
    CrossCountry,
    Luge,
    SpeedSkating,
    SkiJumping,
    Handball,
    Hockey,
    Tennis,
    Golf,
    Mma,
}

impl Sport {
    /// Every sport, in display order.
    pub const ALL: [Self; 12] = [
        Self::AlpineSkiing,
        Self::Biathlon,
        Self::Bobsleigh,
        Self::CrossCountry,
        Self::Luge,
        Self::SpeedSkating,
        Self::SkiJumping,
        Self::Handball,
        Self::Hockey,
        Self::Tennis,
        Self::Golf,
        Self::Mma,
    ];

    /// Returns the stable identifier used in serialized state.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AlpineSkiing => "alpine_skiing",
            Self::Biathlon => "biathlon",
            Self::Bobsleigh => "bobsleigh",
            Self::CrossCountry => "cross_country",
            Self::Luge => "luge",
            Self::SpeedSkating => "speed_skating",
            Self::SkiJumping => "ski_jumping",
            Self::Handball => "handball",
            Self::Hockey => "hockey",
            Self::Tennis => "tennis",
            Self::Golf => "golf",
            Self::Mma => "mma",
        }
    }

    /// Returns the REST path segment the server mounts this sport under.
    ///
    /// Ski jumping predates the other sports and lives under `seasons`.
    #[must_use]
    pub const fn path_segment(&self) -> &'static str {
        match self {
            Self::AlpineSkiing => "alpine",
            Self::Biathlon => "biathlon",
            Self::Bobsleigh => "bobsleigh",
            Self::CrossCountry => "crosscountry",
            Self::Luge => "luge",
            Self::SpeedSkating => "speed-skating",
            Self::SkiJumping => "seasons",
            Self::Handball => "handball",
            Self::Hockey => "hockey",
            Self::Tennis => "tennis",
            Self::Golf => "golf",
            Self::Mma => "mma",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::AlpineSkiing => "Alpine Skiing",
            Self::Biathlon => "Biathlon",
            Self::Bobsleigh => "Bobsleigh",
            Self::CrossCountry => "Cross-Country",
            Self::Luge => "Luge",
            Self::SpeedSkating => "Speed Skating",
            Self::SkiJumping => "Ski Jumping",
            Self::Handball => "Handball",
            Self::Hockey => "Hockey",
            Self::Tennis => "Tennis",
            Self::Golf => "Golf",
            Self::Mma => "MMA",
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Sport {
    type Err = DomainError;

    /// Accepts the stable identifier or the REST path segment.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sport| sport.as_str() == s || sport.path_segment() == s)
            .or_else(|| match s {
                "ski-jumping" | "skijumping" => Some(Self::SkiJumping),
                "alpine-skiing" => Some(Self::AlpineSkiing),
                "cross-country" => Some(Self::CrossCountry),
                _ => None,
            })
            .ok_or_else(|| DomainError::UnknownSport(s.to_string()))
    }
}

/// A discipline tag that scopes a sub-table of standings (e.g. `slalom`, `sprint`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Discipline(String);

impl Discipline {
    /// Creates a discipline tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Discipline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The phase of a season.
///
/// Timed sports only ever use `Regular` and `Completed`; league sports add
/// playoff and playout rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SeasonPhase {
    /// Initial phase after creation or reset.
    #[default]
    Regular,
    /// Championship bracket.
    Playoff,
    /// Relegation bracket.
    Playout,
    /// Season finished. Read-only.
    Completed,
}

impl SeasonPhase {
    /// Converts this phase to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::Playoff => "playoff",
            Self::Playout => "playout",
            Self::Completed => "completed",
        }
    }

    /// Checks if a transition from this phase to another is valid.
    ///
    /// Valid transitions are:
    /// - `Regular` → `Playoff` | `Completed`
    /// - `Playoff` → `Playout` | `Completed`
    /// - `Playout` → `Completed`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Regular, Self::Playoff | Self::Completed)
                | (Self::Playoff, Self::Playout | Self::Completed)
                | (Self::Playout, Self::Completed)
        )
    }

    /// Returns whether the season is finished.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl std::fmt::Display for SeasonPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            // the server reports a timed-sport season in play as `in_progress`
            "regular" | "regular_season" | "group" | "in_progress" | "active" => Ok(Self::Regular),
            "playoff" | "playoffs" => Ok(Self::Playoff),
            "playout" => Ok(Self::Playout),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidSeasonPhase(s.to_string())),
        }
    }
}

/// A competition universe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    /// Server-assigned identifier.
    pub id: WorldId,
    /// Display name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A roster entry: a skier, athlete, player, team or fighter.
///
/// Events reference entrants by id only; this value is a display cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entrant {
    /// Server-assigned identifier. Authoritative.
    pub id: EntrantId,
    /// Name shown in results and standings.
    pub display_name: String,
    /// Country code.
    pub country: String,
    /// Numeric skill attributes keyed by attribute name.
    #[serde(default)]
    pub skills: BTreeMap<String, u8>,
}

/// A season of one sport inside a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Server-assigned identifier.
    pub id: SeasonId,
    /// The world this season belongs to.
    pub world_id: WorldId,
    /// The sport this season is for.
    pub sport: Sport,
    /// Display name, e.g. `2024/2025`.
    pub name: String,
    /// First calendar year of the season.
    pub year_start: i32,
    /// Last calendar year of the season.
    pub year_end: i32,
    /// Current phase.
    #[serde(default)]
    pub phase: SeasonPhase,
}
