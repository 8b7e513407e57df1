//! Bench boost: score the bench as well as the starters for one period.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{ClubId, PlayerId};
use crate::error::Result;
use crate::optimizer::{LineupSelector, OptimizerContext, PickedPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BenchBoostConfig {
    /// Bench players with a double fixture needed for the double-period rule.
    #[serde(default = "default_double_players")]
    pub double_players: usize,

    /// Bench points needed alongside enough double-fixture players.
    #[serde(default = "default_double_points")]
    pub double_points: f64,

    /// Bench points that justify the chip on their own.
    #[serde(default = "default_strong_points")]
    pub strong_points: f64,

    /// Bench points needed when any club plays twice.
    #[serde(default = "default_any_double_points")]
    pub any_double_points: f64,
}

fn default_double_players() -> usize {
    2
}

fn default_double_points() -> f64 {
    12.0
}

fn default_strong_points() -> f64 {
    15.0
}

fn default_any_double_points() -> f64 {
    10.0
}

impl Default for BenchBoostConfig {
    fn default() -> Self {
        Self {
            double_players: default_double_players(),
            double_points: default_double_points(),
            strong_points: default_strong_points(),
            any_double_points: default_any_double_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchPlayer {
    #[serde(flatten)]
    pub player: PickedPlayer,
    pub has_double: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct BenchBoostAdvice {
    pub recommended: bool,
    pub reason: String,
    pub bench_points: f64,
    /// Whether any club plays twice this period.
    pub double_period: bool,
    pub bench: Vec<BenchPlayer>,
}

/// Judge the bench the lineup selector leaves out.
pub fn evaluate(
    ctx: &OptimizerContext<'_>,
    selector: &LineupSelector,
    squad: &[PlayerId],
    doubles: &HashSet<ClubId>,
    config: &BenchBoostConfig,
) -> Result<BenchBoostAdvice> {
    let lineup = selector.select(ctx, squad)?;
    let double_period = !doubles.is_empty();

    if !lineup.is_optimal() {
        return Ok(BenchBoostAdvice {
            recommended: false,
            reason: format!("Could not pick a lineup ({})", lineup.status),
            bench_points: 0.0,
            double_period,
            bench: Vec::new(),
        });
    }

    let bench_points = lineup.bench_points();
    let bench: Vec<BenchPlayer> = lineup
        .bench
        .into_iter()
        .map(|player| BenchPlayer {
            has_double: doubles.contains(&player.club_id),
            player,
        })
        .collect();
    let bench_doubles = bench.iter().filter(|b| b.has_double).count();

    let (recommended, reason) =
        if bench_doubles >= config.double_players && bench_points > config.double_points {
            (
                true,
                format!("Double gameweek with {bench_doubles} bench players having DGW"),
            )
        } else if bench_points > config.strong_points {
            (
                true,
                format!("Strong bench with {bench_points:.1} expected points"),
            )
        } else if double_period && bench_points > config.any_double_points {
            (
                true,
                "Double gameweek opportunity with decent bench".to_string(),
            )
        } else {
            (
                false,
                format!("Bench too weak ({bench_points:.1} expected points) or no DGW"),
            )
        };

    Ok(BenchBoostAdvice {
        recommended,
        reason,
        bench_points,
        double_period,
        bench,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::HighsSolver;
    use crate::testkit::{squad_ids, squad_universe, RateModel};

    /// Starters score 10; the bench is keeper 2, defender 7 and
    /// midfielders 11 and 12.
    fn bench_of(rates: [f64; 4]) -> RateModel {
        [2, 7, 11, 12]
            .into_iter()
            .zip(rates)
            .fold(RateModel::uniform(10.0), |model, (id, rate)| model.with(id, rate))
    }

    fn run(model: &RateModel, doubles: &[u32]) -> BenchBoostAdvice {
        let universe = squad_universe(Vec::new());
        let solver = HighsSolver::default();
        let ctx = OptimizerContext::new(&universe, model, &solver);
        let doubles: HashSet<ClubId> = doubles.iter().copied().map(ClubId::new).collect();

        evaluate(
            &ctx,
            &LineupSelector::default(),
            &squad_ids(),
            &doubles,
            &BenchBoostConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn bench_with_two_doubles() {
        let advice = run(&bench_of([4.0, 3.0, 3.0, 3.0]), &[2, 7]);

        assert!(advice.recommended);
        assert_eq!(advice.reason, "Double gameweek with 2 bench players having DGW");
        assert!((advice.bench_points - 13.0).abs() < 1e-6);
        assert!(advice.double_period);
        assert_eq!(advice.bench.len(), 4);
        assert_eq!(advice.bench[0].player.id, PlayerId::new(2));
        assert_eq!(advice.bench.iter().filter(|b| b.has_double).count(), 2);
    }

    #[test]
    fn strong_bench_without_doubles() {
        let advice = run(&bench_of([4.0, 4.0, 4.0, 4.0]), &[]);

        assert!(advice.recommended);
        assert_eq!(advice.reason, "Strong bench with 16.0 expected points");
        assert!(!advice.double_period);
    }

    #[test]
    fn decent_bench_in_a_double_period() {
        // The only double is a starter's club.
        let advice = run(&bench_of([2.0, 3.0, 3.0, 3.0]), &[1]);

        assert!(advice.recommended);
        assert_eq!(advice.reason, "Double gameweek opportunity with decent bench");
        assert!(advice.bench.iter().all(|b| !b.has_double));
    }

    #[test]
    fn two_doubles_need_more_than_twelve_points() {
        // Exactly 12 misses the first rule but clears the any-double rule.
        let advice = run(&bench_of([3.0, 3.0, 3.0, 3.0]), &[2, 7]);

        assert!(advice.recommended);
        assert_eq!(advice.reason, "Double gameweek opportunity with decent bench");
    }

    #[test]
    fn weak_bench_is_kept_back() {
        let advice = run(&bench_of([2.0, 3.0, 3.0, 3.0]), &[]);

        assert!(!advice.recommended);
        assert_eq!(advice.reason, "Bench too weak (11.0 expected points) or no DGW");
    }
}
