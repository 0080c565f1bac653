// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-sport configuration.
//!
//! Every sport runs the same lifecycle and standings logic; what differs is
//! captured here: how many runs an event needs, which discipline tables
//! exist, how finishing positions turn into points and which direction a
//! mark (time, score, strokes) sorts in.

use crate::types::{Discipline, SeasonPhase, Sport};

/// World Cup table used by alpine skiing, cross-country and ski jumping (top 30).
const WORLD_CUP_30: [u32; 30] = [
    100, 80, 60, 50, 45, 40, 36, 32, 29, 26, 24, 22, 20, 18, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7,
    6, 5, 4, 3, 2, 1,
];

/// Biathlon World Cup table (top 40).
const BIATHLON_40: [u32; 40] = [
    60, 54, 48, 43, 40, 38, 36, 34, 32, 31, 30, 29, 28, 27, 26, 25, 24, 23, 22, 21, 20, 19, 18, 17,
    16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1,
];

/// Sliding sports table, shared by luge and bobsleigh (top 25).
const SLIDING_25: [u32; 25] = [
    225, 195, 170, 155, 145, 135, 125, 115, 105, 100, 95, 90, 85, 80, 75, 70, 65, 60, 55, 50, 46,
    43, 40, 37, 35,
];

/// Speed skating World Cup table (top 20).
const SPEED_SKATING_20: [u32; 20] = [
    100, 80, 60, 50, 45, 40, 36, 32, 29, 26, 24, 22, 20, 18, 16, 15, 14, 13, 12, 11,
];

/// Regular golf tour event table (top 30).
const GOLF_30: [u32; 30] = [
    300, 180, 120, 90, 72, 60, 51, 42, 36, 30, 26, 22, 19, 16, 14, 12, 10, 9, 8, 7, 6, 5, 4, 3, 2,
    1, 1, 1, 1, 1,
];

/// Which direction a run mark sorts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOrder {
    /// Times and strokes: the smallest total wins.
    LowerIsBetter,
    /// Judged or distance scores: the largest total wins.
    HigherIsBetter,
}

impl MarkOrder {
    /// Orders two marks so that the better one sorts first.
    #[must_use]
    pub fn compare(&self, a: i64, b: i64) -> std::cmp::Ordering {
        match self {
            Self::LowerIsBetter => a.cmp(&b),
            Self::HigherIsBetter => b.cmp(&a),
        }
    }
}

/// How a finishing position turns into standings points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsScheme {
    /// Table lookup by 1-based position; positions past the table score 0.
    Ranked(&'static [u32]),
    /// Head-to-head match: a shared first place is a draw.
    Match {
        /// Points for the winner.
        win: u32,
        /// Points for each side of a draw.
        draw: u32,
        /// Points for the loser.
        loss: u32,
    },
}

impl PointsScheme {
    /// Points for a finisher.
    ///
    /// # Arguments
    ///
    /// * `position` - The 1-based finishing position
    /// * `shared` - Whether another entrant finished in the same position
    #[must_use]
    pub fn points_for(&self, position: u16, shared: bool) -> u32 {
        match self {
            Self::Ranked(table) => usize::from(position)
                .checked_sub(1)
                .and_then(|index| table.get(index))
                .copied()
                .unwrap_or(0),
            Self::Match { win, draw, loss } => match (position, shared) {
                (1, false) => *win,
                (1, true) => *draw,
                _ => *loss,
            },
        }
    }
}

/// A discipline a sport keeps a separate standings table for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisciplineRule {
    /// The discipline tag events carry.
    pub tag: &'static str,
    /// Runs an event of this discipline needs before it has a final ranking.
    pub runs: u8,
}

const fn rule(tag: &'static str, runs: u8) -> DisciplineRule {
    DisciplineRule { tag, runs }
}

const ALPINE_DISCIPLINES: [DisciplineRule; 4] = [
    rule("downhill", 1),
    rule("super_g", 1),
    rule("giant_slalom", 2),
    rule("slalom", 2),
];

const BIATHLON_DISCIPLINES: [DisciplineRule; 4] = [
    rule("sprint", 1),
    rule("pursuit", 1),
    rule("individual", 1),
    rule("mass_start", 1),
];

const CROSS_COUNTRY_DISCIPLINES: [DisciplineRule; 4] = [
    rule("sprint_free", 1),
    rule("sprint_classic", 1),
    rule("skiathlon", 1),
    rule("pursuit", 1),
];

const SPEED_SKATING_DISCIPLINES: [DisciplineRule; 6] = [
    rule("500m", 1),
    rule("1000m", 1),
    rule("1500m", 1),
    rule("3000m", 1),
    rule("5000m", 1),
    rule("10000m", 1),
];

/// Configuration that parameterizes the lifecycle engine and standings
/// aggregator for one sport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SportConfig {
    /// The sport this configuration describes.
    pub sport: Sport,
    /// Runs for events without a discipline rule.
    pub default_runs: u8,
    /// Disciplines with their own standings table.
    pub disciplines: &'static [DisciplineRule],
    /// Position-to-points mapping.
    pub points: PointsScheme,
    /// Direction run marks sort in when combining runs.
    pub mark_order: MarkOrder,
    /// Whether events pass through qualifying before run 1.
    pub has_qualifying: bool,
    /// Phases between `Regular` and `Completed` the sport uses, in order.
    pub knockout_phases: &'static [SeasonPhase],
}

impl SportConfig {
    /// Returns the configuration for a sport.
    #[must_use]
    pub const fn for_sport(sport: Sport) -> Self {
        let base: Self = Self {
            sport,
            default_runs: 1,
            disciplines: &[],
            points: PointsScheme::Ranked(&WORLD_CUP_30),
            mark_order: MarkOrder::LowerIsBetter,
            has_qualifying: false,
            knockout_phases: &[],
        };

        match sport {
            Sport::AlpineSkiing => Self {
                disciplines: &ALPINE_DISCIPLINES,
                ..base
            },
            Sport::Biathlon => Self {
                disciplines: &BIATHLON_DISCIPLINES,
                points: PointsScheme::Ranked(&BIATHLON_40),
                ..base
            },
            Sport::CrossCountry => Self {
                disciplines: &CROSS_COUNTRY_DISCIPLINES,
                ..base
            },
            Sport::Bobsleigh | Sport::Luge => Self {
                default_runs: 2,
                points: PointsScheme::Ranked(&SLIDING_25),
                ..base
            },
            Sport::SpeedSkating => Self {
                disciplines: &SPEED_SKATING_DISCIPLINES,
                points: PointsScheme::Ranked(&SPEED_SKATING_20),
                ..base
            },
            Sport::SkiJumping => Self {
                default_runs: 2,
                mark_order: MarkOrder::HigherIsBetter,
                has_qualifying: true,
                ..base
            },
            Sport::Golf => Self {
                default_runs: 4,
                points: PointsScheme::Ranked(&GOLF_30),
                ..base
            },
            Sport::Hockey => Self {
                points: PointsScheme::Match {
                    win: 3,
                    draw: 1,
                    loss: 0,
                },
                mark_order: MarkOrder::HigherIsBetter,
                knockout_phases: &[SeasonPhase::Playoff],
                ..base
            },
            Sport::Handball => Self {
                points: PointsScheme::Match {
                    win: 2,
                    draw: 1,
                    loss: 0,
                },
                mark_order: MarkOrder::HigherIsBetter,
                knockout_phases: &[SeasonPhase::Playoff, SeasonPhase::Playout],
                ..base
            },
            Sport::Tennis | Sport::Mma => Self {
                points: PointsScheme::Match {
                    win: 1,
                    draw: 0,
                    loss: 0,
                },
                mark_order: MarkOrder::HigherIsBetter,
                ..base
            },
        }
    }

    /// Returns the number of runs an event of the given discipline needs.
    #[must_use]
    pub fn runs_for(&self, discipline: Option<&Discipline>) -> u8 {
        discipline
            .and_then(|d| self.disciplines.iter().find(|r| r.tag == d.as_str()))
            .map_or(self.default_runs, |r| r.runs)
    }

    /// Returns the disciplines that keep their own standings table.
    pub fn discipline_tags(&self) -> impl Iterator<Item = Discipline> + '_ {
        self.disciplines.iter().map(|r| Discipline::new(r.tag))
    }

    /// Returns whether the sport uses the given phase at all.
    #[must_use]
    pub fn supports_phase(&self, phase: SeasonPhase) -> bool {
        matches!(phase, SeasonPhase::Regular | SeasonPhase::Completed)
            || self.knockout_phases.contains(&phase)
    }

    /// The initial phase of every season.
    #[must_use]
    pub const fn initial_phase(&self) -> SeasonPhase {
        SeasonPhase::Regular
    }
}
