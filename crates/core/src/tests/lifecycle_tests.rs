// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Run recording through the season controller.

use crate::{Command, CoreError, Signal, State, apply, validate_run};
use podium_domain::{
    Discipline, DomainError, EntrantId, Event, EventId, EventStatus, RunOutcome, Sport,
    StandingsEntry, StandingsSnapshot, StandingsUpdate,
};
use std::collections::BTreeMap;

use super::helpers::{
    complete_event, create_active_state, create_test_events, create_test_ranking,
    create_test_season, create_test_world, run,
};

fn record(state: &State, event_id: &str, n: u8) -> Result<crate::TransitionResult, CoreError> {
    apply(
        state,
        Command::RecordRun {
            event_id: EventId::new(event_id),
            run: run(n),
            outcome: RunOutcome::run_only(create_test_ranking(&["ath-2", "ath-1", "ath-3"])),
            standings: None,
        },
    )
}

#[test]
fn test_two_run_event_scenario() {
    let state: State = create_active_state(Sport::Luge, 3, 2);
    let event_id: EventId = EventId::new("ev-1");

    let first = record(&state, "ev-1", 1).unwrap();
    let event = first.new_state.event(&event_id).unwrap();
    assert_eq!(event.status(), EventStatus::RunCompleted(run(1)));
    assert!(event.run_result(run(1)).is_some());
    assert!(event.final_result().is_none());
    assert!(first.signals.is_empty());
    assert!(first.new_state.active_season().unwrap().standings.overall.is_empty());

    let second = record(&first.new_state, "ev-1", 2).unwrap();
    let event = second.new_state.event(&event_id).unwrap();
    assert_eq!(event.status(), EventStatus::Completed);
    assert!(event.final_result().is_some());
    assert_eq!(
        second.signals,
        vec![
            Signal::EventCompleted {
                event_id: event_id.clone()
            },
            Signal::StandingsRecomputed {
                season_id: event.season_id().clone()
            },
        ]
    );

    let standings: &StandingsSnapshot = &second.new_state.active_season().unwrap().standings;
    let leader: &StandingsEntry = &standings.overall[0];
    assert_eq!(leader.entrant_id, EntrantId::new("ath-2"));
    assert_eq!(leader.points, 225);
    assert!(standings.entry(&EntrantId::new("ath-3")).unwrap().points > 0);
}

#[test]
fn test_out_of_sequence_leaves_state_unchanged() {
    let state: State = create_active_state(Sport::Luge, 1, 2);

    let err = record(&state, "ev-1", 2).unwrap_err();

    assert!(matches!(
        err,
        CoreError::DomainViolation(DomainError::OutOfSequence { .. })
    ));
    assert_eq!(
        state.event_status(&EventId::new("ev-1")).unwrap(),
        EventStatus::Scheduled
    );
}

#[test]
fn test_completed_event_is_already_final() {
    let state: State = create_active_state(Sport::AlpineSkiing, 1, 1);
    let done: State = record(&state, "ev-1", 1).unwrap().new_state;

    assert!(matches!(
        record(&done, "ev-1", 1),
        Err(CoreError::DomainViolation(DomainError::AlreadyFinal { .. }))
    ));
    assert!(matches!(
        validate_run(&done, &EventId::new("ev-1"), run(2)),
        Err(DomainError::AlreadyFinal { .. })
    ));
}

#[test]
fn test_unknown_event_is_not_found() {
    let state: State = create_active_state(Sport::Luge, 1, 2);
    assert!(matches!(
        validate_run(&state, &EventId::new("ev-404"), run(1)),
        Err(DomainError::EventNotFound(_))
    ));
}

#[test]
fn test_four_run_event_needs_every_run() {
    let mut state: State = create_active_state(Sport::Bobsleigh, 1, 4);
    for n in 1..=3 {
        state = record(&state, "ev-1", n).unwrap().new_state;
        assert_eq!(
            state.event_status(&EventId::new("ev-1")).unwrap(),
            EventStatus::RunCompleted(run(n))
        );
        assert!(state.active_season().unwrap().standings.overall.is_empty());
    }
    state = record(&state, "ev-1", 4).unwrap().new_state;
    assert_eq!(
        state.event_status(&EventId::new("ev-1")).unwrap(),
        EventStatus::Completed
    );
}

fn server_entry(entrant: &str, points: u32) -> StandingsEntry {
    StandingsEntry {
        entrant_id: EntrantId::new(entrant),
        points,
        rank: 1,
        previous_rank: None,
        races: 1,
        wins: 1,
        podiums: 1,
        best_position: Some(1),
    }
}

/// An alpine season with a downhill on ev-1 and a slalom on ev-2.
fn create_alpine_state() -> State {
    let events: Vec<Event> = create_test_events(2, 1)
        .into_iter()
        .zip(["downhill", "slalom"])
        .map(|(event, tag)| {
            Event::try_from(event.to_record().with_discipline(Discipline::new(tag))).unwrap()
        })
        .collect();
    apply(
        &State::new(create_test_world(), Sport::AlpineSkiing),
        Command::CreateSeason {
            season: create_test_season(Sport::AlpineSkiing),
            events,
        },
    )
    .unwrap()
    .new_state
}

#[test]
fn test_server_overall_replaces_only_the_overall_table() {
    let state: State = create_alpine_state();
    let server = vec![server_entry("server-pick", 999)];

    let result = apply(
        &state,
        Command::RecordRun {
            event_id: EventId::new("ev-1"),
            run: run(1),
            outcome: RunOutcome::run_only(create_test_ranking(&["ath-1"])),
            standings: Some(StandingsUpdate {
                overall: Some(server.clone()),
                disciplines: BTreeMap::new(),
            }),
        },
    )
    .unwrap();

    let standings: &StandingsSnapshot = &result.new_state.active_season().unwrap().standings;
    assert_eq!(standings.overall, server);
    assert_eq!(
        standings.disciplines[&Discipline::new("downhill")][0].entrant_id,
        EntrantId::new("ath-1")
    );
    assert!(matches!(
        result.signals.last(),
        Some(Signal::StandingsReplaced { .. })
    ));
}

#[test]
fn test_discipline_only_standings_keep_overall_and_other_disciplines() {
    let state: State = complete_event(create_alpine_state(), "ev-1", 1);
    let before: StandingsSnapshot = state.active_season().unwrap().standings.clone();
    assert_eq!(before.overall.len(), 4);
    assert_eq!(before.disciplines[&Discipline::new("downhill")].len(), 4);

    let slalom = vec![server_entry("ath-3", 100), server_entry("ath-4", 80)];
    let mut disciplines = BTreeMap::new();
    disciplines.insert(Discipline::new("slalom"), slalom.clone());

    let result = apply(
        &state,
        Command::RecordRun {
            event_id: EventId::new("ev-2"),
            run: run(1),
            outcome: RunOutcome::run_only(create_test_ranking(&["ath-3", "ath-4"])),
            standings: Some(StandingsUpdate {
                overall: None,
                disciplines,
            }),
        },
    )
    .unwrap();

    let after: &StandingsSnapshot = &result.new_state.active_season().unwrap().standings;
    // overall is recomputed over both events, not emptied
    assert_eq!(after.overall.len(), 4);
    assert!(after.entry(&EntrantId::new("ath-3")).unwrap().points > 0);
    assert_eq!(
        after.disciplines[&Discipline::new("downhill")],
        before.disciplines[&Discipline::new("downhill")]
    );
    assert_eq!(after.disciplines[&Discipline::new("slalom")], slalom);
}

#[test]
fn test_empty_server_standings_fall_back_to_recompute() {
    let state: State = create_active_state(Sport::Luge, 1, 1);
    let result = apply(
        &state,
        Command::RecordRun {
            event_id: EventId::new("ev-1"),
            run: run(1),
            outcome: RunOutcome::run_only(create_test_ranking(&["ath-1", "ath-2"])),
            standings: Some(StandingsUpdate::default()),
        },
    )
    .unwrap();

    assert_eq!(
        result.new_state.active_season().unwrap().standings.overall.len(),
        2
    );
    assert!(matches!(
        result.signals.last(),
        Some(Signal::StandingsRecomputed { .. })
    ));
}

#[test]
fn test_ski_jumping_qualifying_then_runs() {
    let state: State = create_active_state(Sport::SkiJumping, 1, 2);
    let qualifying: State = apply(
        &state,
        Command::BeginEvent {
            event_id: EventId::new("ev-1"),
            status: EventStatus::Qualifying,
        },
    )
    .unwrap()
    .new_state;

    assert_eq!(
        qualifying.event_status(&EventId::new("ev-1")).unwrap(),
        EventStatus::Qualifying
    );
    assert!(validate_run(&qualifying, &EventId::new("ev-1"), run(1)).is_ok());

    let after_first = record(&qualifying, "ev-1", 1).unwrap().new_state;
    assert_eq!(
        after_first.event_status(&EventId::new("ev-1")).unwrap(),
        EventStatus::RunCompleted(run(1))
    );
}
