// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Season standings aggregation.
//!
//! Standings are always derived from the full set of completed events and
//! replace the previous snapshot wholesale. Tables sent by the server are
//! laid over that recompute with [`StandingsUpdate::overlay`].

use crate::event::{Event, Ranking};
use crate::sport::SportConfig;
use crate::types::{Discipline, EntrantId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// One row of a standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    /// The entrant.
    pub entrant_id: EntrantId,
    /// Accumulated points.
    pub points: u32,
    /// 1-based rank after tie-breaks.
    pub rank: u32,
    /// Rank before the most recent completed event, if the entrant was ranked then.
    #[serde(default)]
    pub previous_rank: Option<u32>,
    /// Completed events the entrant appeared in.
    #[serde(default)]
    pub races: u32,
    /// First places.
    #[serde(default)]
    pub wins: u32,
    /// Top-three places.
    #[serde(default)]
    pub podiums: u32,
    /// Best finishing position.
    #[serde(default)]
    pub best_position: Option<u16>,
}

impl StandingsEntry {
    /// Rank change since the previous event; positive means the entrant moved up.
    #[must_use]
    pub fn rank_delta(&self) -> Option<i64> {
        self.previous_rank
            .map(|previous| i64::from(previous) - i64::from(self.rank))
    }
}

/// Overall and per-discipline standings of a season.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StandingsSnapshot {
    /// Overall table.
    pub overall: Vec<StandingsEntry>,
    /// Tables scoped to one discipline.
    #[serde(default)]
    pub disciplines: BTreeMap<Discipline, Vec<StandingsEntry>>,
}

impl StandingsSnapshot {
    /// Returns whether no entrant has scored anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall.is_empty() && self.disciplines.values().all(Vec::is_empty)
    }

    /// Returns the overall entry for an entrant.
    #[must_use]
    pub fn entry(&self, entrant_id: &EntrantId) -> Option<&StandingsEntry> {
        self.overall.iter().find(|e| &e.entrant_id == entrant_id)
    }
}

/// Tables the server returned with a response.
///
/// A response may carry the overall table, some discipline tables, or
/// both. Only the tables present are taken; every other table comes from
/// the base snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StandingsUpdate {
    /// Overall table, if sent.
    pub overall: Option<Vec<StandingsEntry>>,
    /// Discipline tables that were sent.
    pub disciplines: BTreeMap<Discipline, Vec<StandingsEntry>>,
}

impl StandingsUpdate {
    /// Returns whether the server sent no table at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overall.is_none() && self.disciplines.is_empty()
    }

    /// Lays the sent tables over `base`.
    #[must_use]
    pub fn overlay(self, mut base: StandingsSnapshot) -> StandingsSnapshot {
        if let Some(overall) = self.overall {
            base.overall = overall;
        }
        base.disciplines.extend(self.disciplines);
        base
    }
}

#[derive(Default)]
struct Tally {
    points: u32,
    races: u32,
    wins: u32,
    podiums: u32,
    best_position: Option<u16>,
}

fn tally(events: &[&Event], config: &SportConfig) -> BTreeMap<EntrantId, Tally> {
    let mut totals: BTreeMap<EntrantId, Tally> = BTreeMap::new();

    for ranking in events.iter().filter_map(|e| e.final_result()) {
        score_ranking(ranking, config, &mut totals);
    }

    totals
}

fn score_ranking(ranking: &Ranking, config: &SportConfig, totals: &mut BTreeMap<EntrantId, Tally>) {
    for placing in ranking.placings() {
        let entry: &mut Tally = totals.entry(placing.entrant_id.clone()).or_default();
        entry.races += 1;

        let Some(position) = placing.position else {
            continue;
        };

        entry.points += config
            .points
            .points_for(position, ranking.is_shared(position));
        if position == 1 {
            entry.wins += 1;
        }
        if position <= 3 {
            entry.podiums += 1;
        }
        entry.best_position = Some(entry.best_position.map_or(position, |b| b.min(position)));
    }
}

fn rank(totals: BTreeMap<EntrantId, Tally>) -> Vec<StandingsEntry> {
    let mut rows: Vec<(EntrantId, Tally)> = totals.into_iter().collect();
    rows.sort_by(|(a_id, a), (b_id, b)| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| b.podiums.cmp(&a.podiums))
            .then_with(|| {
                a.best_position
                    .unwrap_or(u16::MAX)
                    .cmp(&b.best_position.unwrap_or(u16::MAX))
            })
            .then_with(|| a_id.cmp(b_id))
    });

    rows.into_iter()
        .zip(1u32..)
        .map(|((entrant_id, t), rank)| StandingsEntry {
            entrant_id,
            points: t.points,
            rank,
            previous_rank: None,
            races: t.races,
            wins: t.wins,
            podiums: t.podiums,
            best_position: t.best_position,
        })
        .collect()
}

fn table(completed: &[&Event], config: &SportConfig) -> Vec<StandingsEntry> {
    let mut current: Vec<StandingsEntry> = rank(tally(completed, config));

    // The latest event is the last one once sorted by (date, id).
    if completed.len() > 1 {
        let earlier: &[&Event] = &completed[..completed.len() - 1];
        let previous: HashMap<EntrantId, u32> = rank(tally(earlier, config))
            .into_iter()
            .map(|e| (e.entrant_id, e.rank))
            .collect();
        for entry in &mut current {
            entry.previous_rank = previous.get(&entry.entrant_id).copied();
        }
    }

    current
}

/// Recomputes season standings from its events.
///
/// Only terminal events contribute. The output depends only on the set of
/// completed events, never on input order: events are sorted by date then
/// id before anything is computed.
///
/// # Arguments
///
/// * `events` - Every event of the season
/// * `config` - The sport's points scheme and discipline list
#[must_use]
pub fn recompute<'a>(
    events: impl IntoIterator<Item = &'a Event>,
    config: &SportConfig,
) -> StandingsSnapshot {
    let mut completed: Vec<&Event> = events.into_iter().filter(|e| e.is_terminal()).collect();
    completed.sort_by(|a, b| a.date().cmp(&b.date()).then_with(|| a.id().cmp(b.id())));

    let mut disciplines: BTreeMap<Discipline, Vec<StandingsEntry>> = config
        .discipline_tags()
        .map(|tag| (tag, Vec::new()))
        .collect();

    let tagged: BTreeSet<Discipline> = completed
        .iter()
        .filter_map(|e| e.discipline().cloned())
        .collect();
    for tag in tagged {
        let scoped: Vec<&Event> = completed
            .iter()
            .copied()
            .filter(|e| e.discipline() == Some(&tag))
            .collect();
        disciplines.insert(tag, table(&scoped, config));
    }

    StandingsSnapshot {
        overall: table(&completed, config),
        disciplines,
    }
}
