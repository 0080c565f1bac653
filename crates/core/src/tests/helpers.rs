// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, apply};
use podium_domain::{
    EntrantId, Event, EventId, EventRecord, Placing, Ranking, RunIndex, RunOutcome, Season,
    SeasonId, SeasonPhase, Sport, WorldId,
};
use time::{Date, Duration};
use time::macros::date;

pub fn create_test_world() -> WorldId {
    WorldId::new("world-1")
}

pub fn create_test_season(sport: Sport) -> Season {
    Season {
        id: SeasonId::new("season-1"),
        world_id: create_test_world(),
        sport,
        name: String::from("2024/2025"),
        year_start: 2024,
        year_end: 2025,
        phase: SeasonPhase::Regular,
    }
}

pub fn create_test_entrants() -> Vec<EntrantId> {
    ["ath-1", "ath-2", "ath-3", "ath-4"]
        .into_iter()
        .map(EntrantId::new)
        .collect()
}

/// `count` weekly events of the given run count, starting on a Saturday.
pub fn create_test_events(count: usize, required_runs: u8) -> Vec<Event> {
    let start: Date = date!(2024 - 11 - 23);
    (0..count)
        .map(|i| {
            let days: i64 = i64::try_from(i * 7).unwrap();
            Event::try_from(
                EventRecord::scheduled(
                    EventId::new(format!("ev-{}", i + 1)),
                    SeasonId::new("season-1"),
                    start + Duration::days(days),
                    required_runs,
                )
                .with_name(format!("Race {}", i + 1))
                .with_entrants(create_test_entrants()),
            )
            .unwrap()
        })
        .collect()
}

/// A run result with entrants in the given order, 100 hundredths apart.
pub fn create_test_ranking(order: &[&str]) -> Ranking {
    Ranking::new(
        order
            .iter()
            .zip(1u16..)
            .map(|(id, position)| {
                Placing::ranked(
                    EntrantId::new(*id),
                    position,
                    Some(5_000 + i64::from(position) * 100),
                )
            })
            .collect(),
    )
}

pub fn run(n: u8) -> RunIndex {
    RunIndex::new(n).unwrap()
}

/// A state with an active season of `count` events.
pub fn create_active_state(sport: Sport, count: usize, required_runs: u8) -> State {
    let state: State = State::new(create_test_world(), sport);
    apply(
        &state,
        Command::CreateSeason {
            season: create_test_season(sport),
            events: create_test_events(count, required_runs),
        },
    )
    .unwrap()
    .new_state
}

/// Plays every run of an event with the same finishing order.
pub fn complete_event(state: State, event_id: &str, required_runs: u8) -> State {
    let mut state: State = state;
    for n in 1..=required_runs {
        state = apply(
            &state,
            Command::RecordRun {
                event_id: EventId::new(event_id),
                run: run(n),
                outcome: RunOutcome::run_only(create_test_ranking(&[
                    "ath-1", "ath-2", "ath-3", "ath-4",
                ])),
                standings: None,
            },
        )
        .unwrap()
        .new_state;
    }
    state
}
