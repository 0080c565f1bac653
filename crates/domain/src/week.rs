// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! ISO week keys and the week gate.
//!
//! A world progresses one ISO week at a time. The current unlocked week is
//! the earliest week that still has an open event; every event in a later
//! week is locked until that week is complete.

use crate::error::DomainError;
use crate::event::Event;
use crate::event_status::EventStatus;
use crate::types::{EventId, Sport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use time::{Date, Duration, Weekday};

/// An ISO 8601 (year, week) pair. Ordered by year, then week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WeekKey {
    year: i32,
    week: u8,
}

impl WeekKey {
    /// Creates a week key.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekKey` if the year has no such ISO week.
    pub fn new(year: i32, week: u8) -> Result<Self, DomainError> {
        if week == 0 || week > time::util::weeks_in_year(year) {
            return Err(DomainError::InvalidWeekKey(format!("{year}-W{week:02}")));
        }
        Ok(Self { year, week })
    }

    /// Returns the ISO week a date falls in.
    ///
    /// The week belongs to the year its Thursday falls in, so the first days
    /// of January can be in the previous year's last week and the last days
    /// of December in the next year's first week.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        let offset: i64 = 4 - i64::from(date.weekday().number_from_monday());
        if let Some(thursday) = date.checked_add(Duration::days(offset)) {
            let week: u16 = (thursday.ordinal() - 1) / 7 + 1;
            return Self {
                year: thursday.year(),
                week: u8::try_from(week).unwrap_or(53),
            };
        }

        // Only reachable at the edges of the representable calendar.
        let (year, week, _) = date.to_iso_week_date();
        Self { year, week }
    }

    /// Returns the ISO year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the ISO week number.
    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }

    /// Returns the Monday that starts this week.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidWeekKey` if the date is not representable.
    pub fn monday(&self) -> Result<Date, DomainError> {
        Date::from_iso_week_date(self.year, self.week, Weekday::Monday)
            .map_err(|_| DomainError::InvalidWeekKey(self.to_string()))
    }

    /// Returns the seven dates of this week, Monday first.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the calendar edges.
    pub fn dates(&self) -> Result<[Date; 7], DomainError> {
        let monday: Date = self.monday()?;
        let mut dates: [Date; 7] = [monday; 7];
        for (offset, slot) in (0i64..).zip(dates.iter_mut()) {
            *slot = monday
                .checked_add(Duration::days(offset))
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("listing the dates of {self}"),
                })?;
        }
        Ok(dates)
    }
}

impl std::fmt::Display for WeekKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidWeekKey(s.to_string());
        let (year, week) = s.split_once("-W").ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let week: u8 = week.parse().map_err(|_| invalid())?;
        Self::new(year, week)
    }
}

impl TryFrom<String> for WeekKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<WeekKey> for String {
    fn from(key: WeekKey) -> Self {
        key.to_string()
    }
}

/// The part of an event the week gate looks at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatedEvent {
    /// The event.
    pub event_id: EventId,
    /// The sport the event belongs to.
    pub sport: Sport,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Scheduled date.
    pub date: Date,
    /// Lifecycle status.
    pub status: EventStatus,
}

impl GatedEvent {
    /// Projects a season event for the week gate.
    #[must_use]
    pub fn from_event(sport: Sport, event: &Event) -> Self {
        Self {
            event_id: event.id().clone(),
            sport,
            name: event.name().to_string(),
            date: event.date(),
            status: event.status(),
        }
    }

    /// Returns the week the event falls in.
    #[must_use]
    pub fn week_key(&self) -> WeekKey {
        WeekKey::from_date(self.date)
    }
}

/// Completion counters for one week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// The week.
    pub week: WeekKey,
    /// Events scheduled in the week.
    pub total: usize,
    /// Terminal events in the week.
    pub completed: usize,
}

impl WeekSummary {
    /// Returns whether every event of the week is terminal.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed == self.total
    }
}

/// The gate's view of a world's schedule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WeekStatus {
    /// The week events may currently be run in. `None` when nothing is scheduled.
    pub current_unlocked_week: Option<WeekKey>,
    /// Whether every event of the unlocked week is terminal.
    pub is_week_complete: bool,
    /// Terminal events in the unlocked week.
    pub completed_in_week: usize,
    /// Events in the unlocked week.
    pub total_in_week: usize,
    /// Events of the unlocked week, by date then id.
    pub current_week_events: Vec<GatedEvent>,
    /// Events of the unlocked week bucketed Monday through Sunday.
    pub events_by_date: BTreeMap<Date, Vec<GatedEvent>>,
    /// Every week with events, in order.
    pub all_weeks: Vec<WeekSummary>,
}

impl WeekStatus {
    /// Returns whether events on `date` are locked.
    #[must_use]
    pub fn is_locked(&self, date: Date) -> bool {
        is_locked(date, self.current_unlocked_week)
    }
}

/// Returns whether events on `date` are locked given the unlocked week.
///
/// With no unlocked week there is nothing to gate against and nothing is locked.
#[must_use]
pub fn is_locked(date: Date, current_unlocked_week: Option<WeekKey>) -> bool {
    current_unlocked_week.is_some_and(|current| WeekKey::from_date(date) > current)
}

fn summarize<'a>(events: impl IntoIterator<Item = (Date, &'a EventStatus)>) -> Vec<WeekSummary> {
    let mut weeks: BTreeMap<WeekKey, WeekSummary> = BTreeMap::new();
    for (date, status) in events {
        let week: WeekKey = WeekKey::from_date(date);
        let summary: &mut WeekSummary = weeks.entry(week).or_insert(WeekSummary {
            week,
            total: 0,
            completed: 0,
        });
        summary.total += 1;
        if status.is_terminal() {
            summary.completed += 1;
        }
    }
    weeks.into_values().collect()
}

fn pick_unlocked(weeks: &[WeekSummary]) -> Option<WeekKey> {
    weeks
        .iter()
        .find(|w| !w.is_complete())
        .or_else(|| weeks.last())
        .map(|w| w.week)
}

/// Returns the current unlocked week: the earliest week with an open event,
/// or the last week when every event is terminal.
#[must_use]
pub fn current_unlocked_week<'a>(
    events: impl IntoIterator<Item = (Date, &'a EventStatus)>,
) -> Option<WeekKey> {
    pick_unlocked(&summarize(events))
}

/// Computes the full week status for a world's events.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the unlocked week's
/// dates cannot be listed.
pub fn week_status(events: &[GatedEvent]) -> Result<WeekStatus, DomainError> {
    let all_weeks: Vec<WeekSummary> = summarize(events.iter().map(|e| (e.date, &e.status)));
    let Some(current) = pick_unlocked(&all_weeks) else {
        return Ok(WeekStatus::default());
    };

    let mut current_week_events: Vec<GatedEvent> = events
        .iter()
        .filter(|e| e.week_key() == current)
        .cloned()
        .collect();
    current_week_events.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.event_id.cmp(&b.event_id))
    });

    let mut events_by_date: BTreeMap<Date, Vec<GatedEvent>> = current
        .dates()?
        .into_iter()
        .map(|d| (d, Vec::new()))
        .collect();
    for event in &current_week_events {
        events_by_date
            .entry(event.date)
            .or_default()
            .push(event.clone());
    }

    let total_in_week: usize = current_week_events.len();
    let completed_in_week: usize = current_week_events
        .iter()
        .filter(|e| e.status.is_terminal())
        .count();

    Ok(WeekStatus {
        current_unlocked_week: Some(current),
        is_week_complete: completed_in_week == total_in_week,
        completed_in_week,
        total_in_week,
        current_week_events,
        events_by_date,
        all_weeks,
    })
}
