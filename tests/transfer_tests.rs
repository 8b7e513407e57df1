//! Transfer search: exact single swaps, greedy multi-swaps, penalties.

mod support;

use std::collections::{HashMap, HashSet};

use gaffer::domain::error::DomainError;
use gaffer::domain::solver::HighsSolver;
use gaffer::domain::{ClubId, PlayerId, Position};
use gaffer::error::Error;
use gaffer::optimizer::{OptimizerContext, SquadSelector, TransferRequest, TransferSearch};

use support::assertions::assert_near;
use support::league::{make_player, make_universe, League};
use support::model::FixedModel;

/// A deliberately poor squad: the optimum under inverted ratings.
fn poor_squad(league: &League, solver: &HighsSolver, budget: i64) -> Vec<PlayerId> {
    let inverted = FixedModel::new(
        league
            .universe
            .players()
            .iter()
            .map(|p| (p.id, 10.0 - league.rate(p.id)))
            .collect(),
    );
    let ctx = OptimizerContext::new(&league.universe, &inverted, solver);
    let squad = SquadSelector::default().select(&ctx, budget, 1).unwrap();
    assert!(squad.is_optimal());
    squad.players.iter().map(|p| p.id).collect()
}

/// Best strictly positive single swap, computed by enumeration.
fn best_single_swap(league: &League, squad: &[PlayerId], bank: i64, horizon: u32) -> Option<f64> {
    let owned: HashSet<PlayerId> = squad.iter().copied().collect();
    let members = league.universe.resolve(squad).unwrap();
    let mut clubs: HashMap<ClubId, usize> = HashMap::new();
    for m in &members {
        *clubs.entry(m.club).or_default() += 1;
    }

    let mut best: Option<f64> = None;
    for out in &members {
        for incoming in league.universe.players() {
            if owned.contains(&incoming.id)
                || !incoming.is_selectable()
                || incoming.position != out.position
                || i64::from(incoming.cost) - i64::from(out.cost) > bank
            {
                continue;
            }
            if incoming.club != out.club && clubs.get(&incoming.club).copied().unwrap_or(0) >= 3 {
                continue;
            }
            let gain = (league.rate(incoming.id) - league.rate(out.id)) * f64::from(horizon);
            if gain > 0.0 && best.map_or(true, |b| gain > b) {
                best = Some(gain);
            }
        }
    }
    best
}

#[test]
fn single_transfer_matches_enumeration() {
    let solver = HighsSolver::default();
    let search = TransferSearch::default();

    for seed in 30..35 {
        let league = League::full(seed);
        let squad = poor_squad(&league, &solver, 900);
        let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);

        for bank in [0, 15, 60] {
            let request = TransferRequest::new(1).bank(bank).horizon(3);
            let plan = search.search(&ctx, &squad, &request).unwrap();

            match best_single_swap(&league, &squad, bank, 3) {
                Some(best) => {
                    assert_eq!(plan.transfers.len(), 1, "seed {seed} bank {bank}");
                    assert_near(plan.transfers[0].points_gain, best, 1e-9);
                    assert_eq!(plan.penalty, 0.0);
                    assert_near(plan.net_improvement, best, 1e-9);
                }
                None => assert!(plan.is_empty()),
            }
        }
    }
}

#[test]
fn greedy_plans_stay_within_the_rules() {
    let solver = HighsSolver::default();
    let search = TransferSearch::default();

    for seed in 40..44 {
        let league = League::full(seed);
        let squad = poor_squad(&league, &solver, 950);
        let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);

        for transfers in 1..=4 {
            let request = TransferRequest::new(transfers).bank(20);
            let plan = search.search(&ctx, &squad, &request).unwrap();

            assert!(plan.transfers.len() <= transfers as usize);
            assert!(plan.transfers.iter().all(|t| t.points_gain > 0.0));
            assert!(plan.transfers.iter().all(|t| t.out.position == t.incoming.position));
            assert!(plan.remaining_bank >= 0);

            let gains: f64 = plan.transfers.iter().map(|t| t.points_gain).sum();
            assert_near(plan.net_improvement, gains - plan.penalty, 1e-9);
            assert_near(plan.penalty, f64::from(transfers - 1) * 4.0, 1e-9);

            // Replay the plan and check the club cap on the result.
            let mut after: Vec<PlayerId> = squad.clone();
            for t in &plan.transfers {
                let slot = after.iter().position(|&id| id == t.out.id).unwrap();
                after[slot] = t.incoming.id;
            }
            let mut clubs: HashMap<ClubId, usize> = HashMap::new();
            for p in league.universe.resolve(&after).unwrap() {
                *clubs.entry(p.club).or_default() += 1;
            }
            assert!(clubs.values().all(|&c| c <= 3), "seed {seed}: {clubs:?}");
        }
    }
}

#[test]
fn more_transfers_never_gain_less_before_penalty() {
    let solver = HighsSolver::default();
    let league = League::full(50);
    let squad = poor_squad(&league, &solver, 900);
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);
    let search = TransferSearch::default();

    let mut previous = 0.0;
    for transfers in 1..=5 {
        let plan = search
            .search(&ctx, &squad, &TransferRequest::new(transfers).bank(30))
            .unwrap();
        let gains = plan.net_improvement + plan.penalty;
        assert!(gains >= previous - 1e-9);
        previous = gains;
    }
}

#[test]
fn empty_pool_yields_penalty_only() {
    let universe = make_universe(
        vec![
            make_player(1, 1, Position::Keeper, 50),
            make_player(2, 1, Position::Defender, 50),
            make_player(3, 2, Position::Forward, 80),
        ],
        2,
    );
    let model = FixedModel::default().with(1, 1.0).with(2, 2.0).with(3, 3.0);
    let solver = HighsSolver::default();
    let ctx = OptimizerContext::new(&universe, &model, &solver);
    let squad: Vec<PlayerId> = [1, 2, 3].into_iter().map(PlayerId::new).collect();

    let request = TransferRequest::new(3).free_transfers(1).bank(100);
    let plan = TransferSearch::default().search(&ctx, &squad, &request).unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.recommendation, "No beneficial transfers found");
    assert_eq!(plan.penalty, 8.0);
    assert_eq!(plan.net_improvement, -8.0);
    assert_eq!(plan.remaining_bank, 100);
}

#[test]
fn free_transfers_cover_the_penalty() {
    let universe = make_universe(
        vec![
            make_player(1, 1, Position::Midfielder, 50),
            make_player(2, 2, Position::Midfielder, 50),
            make_player(3, 3, Position::Midfielder, 50),
        ],
        3,
    );
    let model = FixedModel::default().with(1, 1.0).with(2, 5.0).with(3, 4.0);
    let solver = HighsSolver::default();
    let ctx = OptimizerContext::new(&universe, &model, &solver);
    let squad = vec![PlayerId::new(1)];

    let request = TransferRequest::new(2).free_transfers(2).horizon(2);
    let plan = TransferSearch::default().search(&ctx, &squad, &request).unwrap();

    assert_eq!(plan.penalty, 0.0);
    // Player 3 does not beat the new arrival, so the search stops early.
    assert_eq!(plan.transfers.len(), 1);
    assert_eq!(plan.transfers[0].incoming.id, PlayerId::new(2));
    assert_near(plan.transfers[0].points_gain, 8.0, 1e-9);
    assert_near(plan.net_improvement, 8.0, 1e-9);
    assert_eq!(plan.recommendation, "Make 1 transfer(s)");
}

#[test]
fn zero_transfers_is_rejected() {
    let league = League::full(1);
    let solver = HighsSolver::default();
    let ctx = OptimizerContext::new(&league.universe, &league.model, &solver);

    let err = TransferSearch::default()
        .search(&ctx, &[PlayerId::new(1)], &TransferRequest::new(0))
        .unwrap_err();

    assert!(matches!(err, Error::Domain(DomainError::InvalidTransferCount(0))));
}
