//! Chip evaluation over whole squads.

mod support;

use gaffer::domain::solver::HighsSolver;
use gaffer::domain::{PlayerId, Universe};
use gaffer::optimizer::chip::{Chip, ChipEvaluator, Priority};
use gaffer::optimizer::{OptimizerContext, SquadSelector};

use support::league::{make_fixture, League};
use support::model::FixedModel;

fn select(league: &League, model: &FixedModel, solver: &HighsSolver) -> Vec<PlayerId> {
    let ctx = OptimizerContext::new(&league.universe, model, solver);
    let squad = SquadSelector::default().select(&ctx, 1000, 10).unwrap();
    assert!(squad.is_optimal());
    squad.players.iter().map(|p| p.id).collect()
}

fn inverted(league: &League) -> FixedModel {
    FixedModel::new(
        league
            .universe
            .players()
            .iter()
            .map(|p| (p.id, 10.0 - league.rate(p.id)))
            .collect(),
    )
}

#[test]
fn weak_squad_gets_an_early_wildcard() {
    let solver = HighsSolver::default();
    let league = League::full(60);
    let squad = select(&league, &inverted(&league), &solver);
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);

    let report = ChipEvaluator::default().report(&ctx, &squad, &[]).unwrap();

    let wildcard = report.wildcard.as_ref().unwrap();
    assert!(wildcard.recommended);
    assert!(wildcard.improvement > wildcard.threshold);
    assert_eq!(wildcard.optimal_squad.len(), 15);
    assert!(report.recommended.contains(&Chip::Wildcard));
    assert!(report
        .strategy
        .options
        .iter()
        .any(|o| o.chip == Chip::Wildcard && o.priority == Priority::High));
}

#[test]
fn optimal_squad_does_not_need_a_wildcard() {
    let solver = HighsSolver::default();
    let league = League::full(61);
    let squad = select(&league, &league.model, &solver);
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);

    let report = ChipEvaluator::default().report(&ctx, &squad, &[]).unwrap();

    let wildcard = report.wildcard.as_ref().unwrap();
    assert!(!wildcard.recommended);
    assert!(wildcard.improvement.abs() < wildcard.threshold);
}

#[test]
fn used_chips_are_skipped() {
    let solver = HighsSolver::default();
    let league = League::full(62);
    let squad = select(&league, &inverted(&league), &solver);
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);
    let used: Vec<String> = ["wildcard", "3xc", "bboost", "freehit"]
        .into_iter()
        .map(String::from)
        .collect();

    let report = ChipEvaluator::default().report(&ctx, &squad, &used).unwrap();

    assert!(report.wildcard.is_none());
    assert!(report.triple_captain.is_none());
    assert!(report.bench_boost.is_none());
    assert!(report.free_hit.is_none());
    assert!(report.recommended.is_empty());
    assert_eq!(
        report.strategy.recommendation,
        "No chips recommended for this gameweek"
    );
    assert_eq!(report.chips_used, used);
}

#[test]
fn unknown_chip_names_are_ignored() {
    let solver = HighsSolver::default();
    let league = League::full(63);
    let squad = select(&league, &league.model, &solver);
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);
    let used = vec!["manager".to_string()];

    let report = ChipEvaluator::default().report(&ctx, &squad, &used).unwrap();

    assert!(report.wildcard.is_some());
    assert!(report.free_hit.is_some());
    assert_eq!(report.chips_used, used);
}

#[test]
fn double_period_flows_through_every_evaluator() {
    let solver = HighsSolver::default();
    let league = League::full(64);
    let squad = select(&league, &league.model, &solver);
    // Every club plays twice in period 1.
    let fixtures = (1..=10)
        .step_by(2)
        .flat_map(|home| [make_fixture(1, home, home + 1, 3), make_fixture(1, home + 1, home, 3)])
        .collect();
    let universe = Universe::new(
        league.universe.players().to_vec(),
        league.universe.clubs().to_vec(),
        fixtures,
        1,
    )
    .unwrap();
    let ctx = OptimizerContext::new(&universe, &league.model, &solver);

    let report = ChipEvaluator::default().report(&ctx, &squad, &[]).unwrap();

    let triple = report.triple_captain.as_ref().unwrap();
    assert!(triple.recommended);
    assert!(triple.double_period);
    assert_eq!(triple.reason, "Double Gameweek");
    let pick = triple.player.as_ref().unwrap();
    assert!(squad.contains(&pick.id));
    let best = squad.iter().map(|&id| league.rate(id)).fold(0.0, f64::max);
    assert!((pick.points - best * 1.8).abs() < 1e-6);

    let bench = report.bench_boost.as_ref().unwrap();
    assert!(bench.double_period);
    assert!(bench.bench.iter().all(|b| b.has_double));

    let free_hit = report.free_hit.as_ref().unwrap();
    assert_eq!(free_hit.double_clubs, 10);
    assert_eq!(free_hit.covered_players, 15);

    assert!(report
        .strategy
        .options
        .iter()
        .any(|o| o.chip == Chip::TripleCaptain && o.priority == Priority::High));
    assert_eq!(report.strategy.priority, Some(Priority::High));
}
