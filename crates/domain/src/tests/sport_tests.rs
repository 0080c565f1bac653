// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Discipline, MarkOrder, PointsScheme, SeasonPhase, Sport, SportConfig};
use std::cmp::Ordering;

#[test]
fn test_alpine_runs_depend_on_discipline() {
    let config: SportConfig = SportConfig::for_sport(Sport::AlpineSkiing);
    assert_eq!(config.runs_for(Some(&Discipline::new("downhill"))), 1);
    assert_eq!(config.runs_for(Some(&Discipline::new("super_g"))), 1);
    assert_eq!(config.runs_for(Some(&Discipline::new("giant_slalom"))), 2);
    assert_eq!(config.runs_for(Some(&Discipline::new("slalom"))), 2);
    assert_eq!(config.runs_for(None), 1);
}

#[test]
fn test_sliding_sports_default_to_two_runs() {
    assert_eq!(SportConfig::for_sport(Sport::Luge).runs_for(None), 2);
    assert_eq!(SportConfig::for_sport(Sport::Bobsleigh).runs_for(None), 2);
}

#[test]
fn test_every_sport_has_valid_run_counts() {
    for sport in Sport::ALL {
        let config: SportConfig = SportConfig::for_sport(sport);
        assert!(crate::validate_run_count(config.default_runs).is_ok());
        for rule in config.disciplines {
            assert!(crate::validate_run_count(rule.runs).is_ok(), "{sport}");
        }
    }
}

#[test]
fn test_ranked_table_lookup() {
    let config: SportConfig = SportConfig::for_sport(Sport::Luge);
    assert_eq!(config.points.points_for(1, false), 225);
    assert_eq!(config.points.points_for(25, false), 35);
    assert_eq!(config.points.points_for(26, false), 0);
    assert_eq!(config.points.points_for(0, false), 0);
}

#[test]
fn test_biathlon_table_is_top_forty() {
    let config: SportConfig = SportConfig::for_sport(Sport::Biathlon);
    assert_eq!(config.points.points_for(1, false), 60);
    assert_eq!(config.points.points_for(40, false), 1);
    assert_eq!(config.points.points_for(41, false), 0);
}

#[test]
fn test_match_scheme_draw() {
    let scheme: PointsScheme = SportConfig::for_sport(Sport::Handball).points;
    assert_eq!(scheme.points_for(1, false), 2);
    assert_eq!(scheme.points_for(1, true), 1);
    assert_eq!(scheme.points_for(2, false), 0);
}

#[test]
fn test_mark_order() {
    assert_eq!(MarkOrder::LowerIsBetter.compare(10, 20), Ordering::Less);
    assert_eq!(MarkOrder::HigherIsBetter.compare(10, 20), Ordering::Greater);
    assert_eq!(
        SportConfig::for_sport(Sport::SkiJumping).mark_order,
        MarkOrder::HigherIsBetter
    );
}

#[test]
fn test_knockout_phases() {
    let hockey: SportConfig = SportConfig::for_sport(Sport::Hockey);
    assert!(hockey.supports_phase(SeasonPhase::Playoff));
    assert!(!hockey.supports_phase(SeasonPhase::Playout));

    let handball: SportConfig = SportConfig::for_sport(Sport::Handball);
    assert!(handball.supports_phase(SeasonPhase::Playout));

    let golf: SportConfig = SportConfig::for_sport(Sport::Golf);
    assert!(!golf.supports_phase(SeasonPhase::Playoff));
    assert!(golf.supports_phase(SeasonPhase::Completed));
}

#[test]
fn test_ski_jumping_has_qualifying() {
    assert!(SportConfig::for_sport(Sport::SkiJumping).has_qualifying);
    assert!(!SportConfig::for_sport(Sport::Luge).has_qualifying);
}
