// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Competition events and their run results.
//!
//! ## Invariants
//!
//! - A run result exists only for runs the status says have completed
//! - The final ranking exists if and only if the status is terminal
//! - `runN_completed` is never the status of an event's last run
//!
//! `Event` can only be built through [`EventRecord`] validation, so every
//! `Event` value in the system upholds these.

use crate::error::DomainError;
use crate::event_status::{EventStatus, RunIndex, validate_run_count};
use crate::sport::MarkOrder;
use crate::types::{Discipline, EntrantId, EventId, SeasonId};
use crate::week::WeekKey;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use time::Date;

/// One entrant's line in a run result or final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placing {
    /// The entrant.
    pub entrant_id: EntrantId,
    /// 1-based finishing position. `None` means did not finish / unranked.
    #[serde(default)]
    pub position: Option<u16>,
    /// Numeric mark in the sport's unit (hundredths of a second, score
    /// tenths, strokes). Only used when combining runs locally.
    #[serde(default)]
    pub mark: Option<i64>,
    /// Opaque sport-specific detail produced by the simulation service.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub detail: Value,
}

impl Placing {
    /// Creates a ranked placing without detail.
    #[must_use]
    pub fn ranked(entrant_id: EntrantId, position: u16, mark: Option<i64>) -> Self {
        Self {
            entrant_id,
            position: Some(position),
            mark,
            detail: Value::Null,
        }
    }

    /// Creates an unranked (did not finish) placing.
    #[must_use]
    pub const fn unranked(entrant_id: EntrantId) -> Self {
        Self {
            entrant_id,
            position: None,
            mark: None,
            detail: Value::Null,
        }
    }

    /// Returns whether the entrant finished with a position.
    #[must_use]
    pub const fn is_finisher(&self) -> bool {
        self.position.is_some()
    }
}

/// An ordered list of placings: the result of one run, or a final ranking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ranking {
    placings: Vec<Placing>,
}

impl Ranking {
    /// Creates a ranking from placings in display order.
    #[must_use]
    pub const fn new(placings: Vec<Placing>) -> Self {
        Self { placings }
    }

    /// Returns the placings.
    #[must_use]
    pub fn placings(&self) -> &[Placing] {
        &self.placings
    }

    /// Returns whether the ranking has no placings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.placings.is_empty()
    }

    /// Returns the position of an entrant, if ranked.
    #[must_use]
    pub fn position_of(&self, entrant_id: &EntrantId) -> Option<u16> {
        self.placings
            .iter()
            .find(|p| &p.entrant_id == entrant_id)
            .and_then(|p| p.position)
    }

    /// Returns whether more than one entrant holds `position`.
    #[must_use]
    pub fn is_shared(&self, position: u16) -> bool {
        self.placings
            .iter()
            .filter(|p| p.position == Some(position))
            .count()
            > 1
    }
}

/// Combines per-run results into a final ranking.
///
/// Entrants that finished every run with a mark are ordered by their total
/// (ties share a position, competition style); everyone else follows,
/// unranked, in order of first appearance.
///
/// # Arguments
///
/// * `runs` - The run results, run 1 first
/// * `order` - Whether lower or higher totals win
#[must_use]
pub fn combine_runs(runs: &[&Ranking], order: MarkOrder) -> Ranking {
    let mut appearance: Vec<EntrantId> = Vec::new();
    for run in runs {
        for placing in run.placings() {
            if !appearance.contains(&placing.entrant_id) {
                appearance.push(placing.entrant_id.clone());
            }
        }
    }

    let mut finished: Vec<(EntrantId, i64, Vec<i64>)> = Vec::new();
    let mut unranked: Vec<EntrantId> = Vec::new();

    for entrant_id in appearance {
        let marks: Option<Vec<i64>> = runs
            .iter()
            .map(|run| {
                run.placings()
                    .iter()
                    .find(|p| p.entrant_id == entrant_id && p.is_finisher())
                    .and_then(|p| p.mark)
            })
            .collect();

        match marks {
            Some(marks) if !runs.is_empty() => {
                let total: i64 = marks.iter().sum();
                finished.push((entrant_id, total, marks));
            }
            _ => unranked.push(entrant_id),
        }
    }

    finished.sort_by(|a, b| order.compare(a.1, b.1).then_with(|| a.0.cmp(&b.0)));

    let mut placings: Vec<Placing> = Vec::with_capacity(finished.len() + unranked.len());
    let mut previous_total: Option<i64> = None;
    let mut position: u16 = 0;
    for (index, (entrant_id, total, marks)) in finished.into_iter().enumerate() {
        if previous_total != Some(total) {
            position = u16::try_from(index + 1).unwrap_or(u16::MAX);
            previous_total = Some(total);
        }
        placings.push(Placing {
            entrant_id,
            position: Some(position),
            mark: Some(total),
            detail: serde_json::json!({ "run_marks": marks }),
        });
    }
    placings.extend(unranked.into_iter().map(Placing::unranked));

    Ranking::new(placings)
}

/// Unvalidated event data, as received from the server or drawn into a
/// schedule. Converted into an [`Event`] with `Event::try_from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Server-assigned identifier.
    pub id: EventId,
    /// The season the event belongs to.
    pub season_id: SeasonId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Discipline tag, for sports with discipline standings.
    #[serde(default)]
    pub discipline: Option<Discipline>,
    /// Scheduled date.
    pub date: Date,
    /// Entrants taking part.
    #[serde(default)]
    pub entrants: Vec<EntrantId>,
    /// Runs required before a final ranking exists.
    pub required_runs: u8,
    /// Lifecycle status.
    #[serde(default)]
    pub status: EventStatus,
    /// Results of completed runs.
    #[serde(default)]
    pub run_results: BTreeMap<RunIndex, Ranking>,
    /// Final ranking.
    #[serde(default)]
    pub final_result: Option<Ranking>,
}

impl EventRecord {
    /// Creates a record for a freshly scheduled event.
    ///
    /// # Arguments
    ///
    /// * `id` - The event identifier
    /// * `season_id` - The season the event belongs to
    /// * `date` - The scheduled date
    /// * `required_runs` - Runs required before a final ranking exists
    #[must_use]
    pub const fn scheduled(id: EventId, season_id: SeasonId, date: Date, required_runs: u8) -> Self {
        Self {
            id,
            season_id,
            name: String::new(),
            discipline: None,
            date,
            entrants: Vec::new(),
            required_runs,
            status: EventStatus::Scheduled,
            run_results: BTreeMap::new(),
            final_result: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the discipline tag.
    #[must_use]
    pub fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.discipline = Some(discipline);
        self
    }

    /// Sets the entrant list.
    #[must_use]
    pub fn with_entrants(mut self, entrants: Vec<EntrantId>) -> Self {
        self.entrants = entrants;
        self
    }
}

/// A single scheduled competition within a season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventRecord")]
pub struct Event {
    id: EventId,
    season_id: SeasonId,
    name: String,
    discipline: Option<Discipline>,
    date: Date,
    entrants: Vec<EntrantId>,
    required_runs: u8,
    status: EventStatus,
    run_results: BTreeMap<RunIndex, Ranking>,
    final_result: Option<Ranking>,
}

impl TryFrom<EventRecord> for Event {
    type Error = DomainError;

    fn try_from(record: EventRecord) -> Result<Self, Self::Error> {
        let inconsistent = |reason: String| DomainError::InconsistentEvent {
            event_id: record.id.clone(),
            reason,
        };

        let required_runs: u8 = validate_run_count(record.required_runs)?;

        if let EventStatus::RunCompleted(run) = record.status
            && run.get() >= required_runs
        {
            return Err(inconsistent(format!(
                "status {} on an event with {required_runs} run(s)",
                record.status
            )));
        }

        let completed: u8 = record.status.completed_runs(required_runs);
        if let Some((run, _)) = record
            .run_results
            .iter()
            .find(|(run, _)| run.get() > completed)
        {
            return Err(inconsistent(format!(
                "{run} has results but status is {}",
                record.status
            )));
        }

        match (record.status.is_terminal(), record.final_result.is_some()) {
            (true, false) => {
                return Err(inconsistent(String::from(
                    "completed without a final ranking",
                )));
            }
            (false, true) => {
                return Err(inconsistent(format!(
                    "final ranking present while {}",
                    record.status
                )));
            }
            _ => {}
        }

        Ok(Self {
            id: record.id,
            season_id: record.season_id,
            name: record.name,
            discipline: record.discipline,
            date: record.date,
            entrants: record.entrants,
            required_runs,
            status: record.status,
            run_results: record.run_results,
            final_result: record.final_result,
        })
    }
}

impl Event {
    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> &EventId {
        &self.id
    }

    /// Returns the season identifier.
    #[must_use]
    pub const fn season_id(&self) -> &SeasonId {
        &self.season_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the discipline tag.
    #[must_use]
    pub const fn discipline(&self) -> Option<&Discipline> {
        self.discipline.as_ref()
    }

    /// Returns the scheduled date.
    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    /// Returns the ISO week the event falls in.
    #[must_use]
    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_date(self.date)
    }

    /// Returns the entrants.
    #[must_use]
    pub fn entrants(&self) -> &[EntrantId] {
        &self.entrants
    }

    /// Returns the number of runs required before a final ranking exists.
    #[must_use]
    pub const fn required_runs(&self) -> u8 {
        self.required_runs
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> EventStatus {
        self.status
    }

    /// Returns whether the event has its final ranking.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Returns the run the event is waiting for.
    #[must_use]
    pub const fn next_run(&self) -> Option<RunIndex> {
        self.status.next_run()
    }

    /// Returns the result of a run, if recorded.
    #[must_use]
    pub fn run_result(&self, run: RunIndex) -> Option<&Ranking> {
        self.run_results.get(&run)
    }

    /// Returns all recorded run results in run order.
    pub fn run_results(&self) -> impl Iterator<Item = (RunIndex, &Ranking)> {
        self.run_results.iter().map(|(run, ranking)| (*run, ranking))
    }

    /// Returns the final ranking. `Some` exactly when the event is terminal.
    #[must_use]
    pub const fn final_result(&self) -> Option<&Ranking> {
        self.final_result.as_ref()
    }

    /// Returns this event back in its scheduled state with every result cleared.
    #[must_use]
    pub fn reset(&self) -> Self {
        Self {
            status: EventStatus::Scheduled,
            run_results: BTreeMap::new(),
            final_result: None,
            ..self.clone()
        }
    }

    /// Returns the event with an updated pre-run status.
    pub(crate) fn with_status(&self, status: EventStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Returns the event with one more run recorded.
    ///
    /// Callers are responsible for run order; see `lifecycle::advance`.
    pub(crate) fn with_run(
        &self,
        run: RunIndex,
        result: Ranking,
        status: EventStatus,
        final_result: Option<Ranking>,
    ) -> Self {
        let mut run_results: BTreeMap<RunIndex, Ranking> = self.run_results.clone();
        run_results.insert(run, result);
        Self {
            status,
            run_results,
            final_result,
            ..self.clone()
        }
    }

    /// Converts the event back into its record form.
    #[must_use]
    pub fn to_record(&self) -> EventRecord {
        EventRecord {
            id: self.id.clone(),
            season_id: self.season_id.clone(),
            name: self.name.clone(),
            discipline: self.discipline.clone(),
            date: self.date,
            entrants: self.entrants.clone(),
            required_runs: self.required_runs,
            status: self.status,
            run_results: self.run_results.clone(),
            final_result: self.final_result.clone(),
        }
    }
}
