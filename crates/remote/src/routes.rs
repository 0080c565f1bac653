// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! REST paths, relative to the API base URL.

use podium_domain::{EntrantId, EventId, EventStatus, RunIndex, SeasonId, Sport, WorldId};

pub(crate) const LOGIN: &str = "/auth/login";
pub(crate) const WORLDS: &str = "/worlds";

pub(crate) fn world(world_id: &WorldId) -> String {
    format!("/worlds/{world_id}")
}

pub(crate) fn week_status(world_id: &WorldId) -> String {
    format!("/worlds/{world_id}/current-week-status")
}

fn in_world(sport: Sport, world_id: &WorldId, tail: &str) -> String {
    format!("/{}/world/{world_id}/{tail}", sport.path_segment())
}

pub(crate) fn entrants(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "athletes")
}

pub(crate) fn generate_entrants(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "generate-athletes")
}

pub(crate) fn create_entrant(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "athlete")
}

pub(crate) fn all_entrants(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "all-athletes")
}

pub(crate) fn entrant(sport: Sport, entrant_id: &EntrantId) -> String {
    format!("/{}/athlete/{entrant_id}", sport.path_segment())
}

pub(crate) fn current_season(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "current-season")
}

pub(crate) fn season_history(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "history")
}

pub(crate) fn create_season(sport: Sport, world_id: &WorldId) -> String {
    in_world(sport, world_id, "create-season")
}

pub(crate) fn season(sport: Sport, season_id: &SeasonId) -> String {
    format!("/{}/season/{season_id}", sport.path_segment())
}

fn on_season(sport: Sport, season_id: &SeasonId, action: &str) -> String {
    format!("/{}/season/{season_id}/{action}", sport.path_segment())
}

pub(crate) fn reset_season(sport: Sport, season_id: &SeasonId) -> String {
    on_season(sport, season_id, "reset")
}

pub(crate) fn complete_season(sport: Sport, season_id: &SeasonId) -> String {
    on_season(sport, season_id, "complete")
}

pub(crate) fn check_advance(sport: Sport, season_id: &SeasonId) -> String {
    on_season(sport, season_id, "check-advance")
}

pub(crate) fn begin_event(sport: Sport, event_id: &EventId, status: EventStatus) -> String {
    let action: &str = if status == EventStatus::Qualifying {
        "start-qualifying"
    } else {
        "start"
    };
    format!("/{}/event/{event_id}/{action}", sport.path_segment())
}

/// Run 1 posts to `simulate`, run N to `simulate-runN`.
pub(crate) fn simulate_run(sport: Sport, event_id: &EventId, run: RunIndex) -> String {
    let segment: &str = sport.path_segment();
    match run.get() {
        1 => format!("/{segment}/event/{event_id}/simulate"),
        n => format!("/{segment}/event/{event_id}/simulate-run{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_paths() {
        let event: EventId = EventId::new("42");
        assert_eq!(
            simulate_run(Sport::Luge, &event, RunIndex::FIRST),
            "/luge/event/42/simulate"
        );
        assert_eq!(
            simulate_run(Sport::Bobsleigh, &event, RunIndex::new(4).unwrap()),
            "/bobsleigh/event/42/simulate-run4"
        );
        assert_eq!(
            simulate_run(Sport::SkiJumping, &event, RunIndex::new(2).unwrap()),
            "/seasons/event/42/simulate-run2"
        );
    }

    #[test]
    fn test_sport_segments() {
        let world: WorldId = WorldId::new("7");
        assert_eq!(
            current_season(Sport::SpeedSkating, &world),
            "/speed-skating/world/7/current-season"
        );
        assert_eq!(
            entrants(Sport::CrossCountry, &world),
            "/crosscountry/world/7/athletes"
        );
        assert_eq!(week_status(&world), "/worlds/7/current-week-status");
    }

    #[test]
    fn test_season_paths() {
        let id: SeasonId = SeasonId::new("s-3");
        assert_eq!(season(Sport::Tennis, &id), "/tennis/season/s-3");
        assert_eq!(
            reset_season(Sport::Tennis, &id),
            "/tennis/season/s-3/reset"
        );
    }

    #[test]
    fn test_qualifying_has_its_own_start() {
        let event: EventId = EventId::new("9");
        assert_eq!(
            begin_event(Sport::SkiJumping, &event, EventStatus::Qualifying),
            "/seasons/event/9/start-qualifying"
        );
        assert_eq!(
            begin_event(Sport::Golf, &event, EventStatus::InProgress),
            "/golf/event/9/start"
        );
    }
}
