// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plain-text output.

use podium::{SeasonState, Signal, State};
use podium_domain::{Entrant, Event, StandingsEntry, WeekStatus, World};

fn rank_change(entry: &StandingsEntry) -> String {
    match entry.rank_delta() {
        Some(0) | None => String::from("="),
        Some(d) if d > 0 => format!("+{d}"),
        Some(d) => d.to_string(),
    }
}

fn event_line(event: &Event) -> String {
    format!(
        "{:<8} {} {:<28} {:<16} {}/{} runs",
        event.id().as_str(),
        event.date(),
        event.name(),
        event.status().as_string(),
        event.run_results().count(),
        event.required_runs()
    )
}

pub fn worlds(worlds: &[World]) -> String {
    worlds
        .iter()
        .map(|world| format!("{:<8} {}\n", world.id.as_str(), world.name))
        .collect()
}

pub fn roster(entrants: &[Entrant]) -> String {
    entrants
        .iter()
        .map(|entrant| {
            format!(
                "{:<8} {:<28} {}\n",
                entrant.id.as_str(),
                entrant.display_name,
                entrant.country
            )
        })
        .collect()
}

pub fn standings(table: &[StandingsEntry]) -> String {
    let mut out: String = String::from("rank  entrant   points  wins  podiums  chg\n");
    out.extend(table.iter().map(|entry| {
        format!(
            "{:>4}  {:<8}  {:>6}  {:>4}  {:>7}  {}\n",
            entry.rank,
            entry.entrant_id.as_str(),
            entry.points,
            entry.wins,
            entry.podiums,
            rank_change(entry)
        )
    }));
    out
}

pub fn season(state: &State) -> String {
    let Some(SeasonState {
        season,
        events,
        standings: _,
    }) = &state.current
    else {
        return format!("No active {} season\n", state.sport.display_name());
    };

    let mut out: String = format!(
        "{} {} ({}), phase {}\n",
        state.sport.display_name(),
        season.name,
        season.id.as_str(),
        season.phase
    );
    out.extend(events.iter().map(|event| format!("  {}\n", event_line(event))));
    out
}

pub fn week_status(status: &WeekStatus) -> String {
    let Some(week) = status.current_unlocked_week else {
        return String::from("Nothing scheduled\n");
    };
    let mut out: String = format!(
        "Week {week}: {}/{} resolved{}\n",
        status.completed_in_week,
        status.total_in_week,
        if status.is_week_complete { ", complete" } else { "" }
    );
    for (date, events) in &status.events_by_date {
        out.extend(events.iter().map(|event| {
            format!(
                "  {date} {:<12} {:<28} {}\n",
                event.sport.display_name(),
                event.name,
                event.status
            )
        }));
    }
    out
}

fn signal_line(signal: &Signal) -> String {
    match signal {
        Signal::EventCompleted { event_id } => format!("event {event_id} completed"),
        Signal::StandingsRecomputed { .. } => String::from("standings recomputed"),
        Signal::StandingsReplaced { .. } => String::from("standings updated by server"),
        Signal::SeasonReset { season_id } => format!("season {season_id} reset"),
        Signal::PhaseChanged { from, to } => format!("phase {from} -> {to}"),
        Signal::SeasonArchived { season_id } => format!("season {season_id} archived"),
        Signal::SeasonDeleted { season_id } => format!("season {season_id} deleted"),
    }
}

pub fn signals(signals: &[Signal]) -> String {
    signals
        .iter()
        .map(|signal| format!("* {}\n", signal_line(signal)))
        .collect()
}
