//! Triple captain: triple one player's points instead of doubling them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{ClubId, Player, PlayerId};
use crate::error::Result;
use crate::optimizer::{CaptainSelector, OptimizerContext, PickedPlayer};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TripleCaptainConfig {
    /// Projection scale for a player with two fixtures.
    #[serde(default = "default_double_multiplier")]
    pub double_multiplier: f64,

    /// Fixture difficulty the captain must be under without a double.
    #[serde(default = "default_max_difficulty")]
    pub max_difficulty: f64,

    #[serde(default = "default_min_ceiling")]
    pub min_ceiling: f64,

    #[serde(default = "default_min_points")]
    pub min_points: f64,
}

fn default_double_multiplier() -> f64 {
    1.8
}

fn default_max_difficulty() -> f64 {
    2.0
}

fn default_min_ceiling() -> f64 {
    15.0
}

fn default_min_points() -> f64 {
    8.0
}

impl Default for TripleCaptainConfig {
    fn default() -> Self {
        Self {
            double_multiplier: default_double_multiplier(),
            max_difficulty: default_max_difficulty(),
            min_ceiling: default_min_ceiling(),
            min_points: default_min_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripleCaptainAdvice {
    pub recommended: bool,
    pub reason: String,
    /// The pick was driven by a double fixture.
    pub double_period: bool,
    pub player: Option<PickedPlayer>,
    pub reasoning: String,
}

/// Look for a double-fixture pick first, then an exceptional single fixture.
pub fn evaluate(
    ctx: &OptimizerContext<'_>,
    captain: &CaptainSelector,
    squad: &[PlayerId],
    doubles: &HashSet<ClubId>,
    config: &TripleCaptainConfig,
) -> Result<TripleCaptainAdvice> {
    let players = ctx.universe.resolve(squad)?;

    let mut best_double: Option<(&Player, f64)> = None;
    for player in players.iter().copied().filter(|p| doubles.contains(&p.club)) {
        let points = ctx.points(player, 1) * config.double_multiplier;
        if best_double.map_or(true, |(_, top)| points > top) {
            best_double = Some((player, points));
        }
    }

    if let Some((player, points)) = best_double {
        return Ok(TripleCaptainAdvice {
            recommended: true,
            reason: "Double Gameweek".to_string(),
            double_period: true,
            player: Some(ctx.pick(player, points)),
            reasoning: format!(
                "{} has a double gameweek with excellent expected returns",
                player.name
            ),
        });
    }

    let pick = captain.suggest_over(ctx, squad, 1)?;
    let candidate = pick.captain;
    if candidate.fixture_difficulty < config.max_difficulty
        && candidate.ceiling > config.min_ceiling
        && candidate.player.points > config.min_points
    {
        let reasoning = format!(
            "While not a DGW, {} has exceptional fixture and form",
            candidate.player.name
        );
        return Ok(TripleCaptainAdvice {
            recommended: true,
            reason: "Exceptional fixture and form".to_string(),
            double_period: false,
            player: Some(candidate.player),
            reasoning,
        });
    }

    Ok(TripleCaptainAdvice {
        recommended: false,
        reason: "Wait for better opportunity".to_string(),
        double_period: false,
        player: None,
        reasoning: "Save Triple Captain for a double gameweek or exceptional fixture".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::HighsSolver;
    use crate::domain::Fixture;
    use crate::testkit::{fixture, squad_ids, squad_universe, RateModel};

    fn run(model: &RateModel, fixtures: Vec<Fixture>) -> TripleCaptainAdvice {
        let universe = squad_universe(fixtures);
        let solver = HighsSolver::default();
        let ctx = OptimizerContext::new(&universe, model, &solver);
        let doubles = universe.double_clubs(1);

        evaluate(
            &ctx,
            &CaptainSelector::default(),
            &squad_ids(),
            &doubles,
            &TripleCaptainConfig::default(),
        )
        .unwrap()
    }

    fn star_striker() -> RateModel {
        RateModel::uniform(5.0).with(12, 5.0).with(13, 7.0).with(15, 9.0)
    }

    #[test]
    fn double_fixture_pick_beats_a_better_single() {
        let fixtures = vec![fixture(1, 12, 13, 3), fixture(1, 13, 12, 3)];
        let advice = run(&star_striker(), fixtures);

        assert!(advice.recommended);
        assert!(advice.double_period);
        assert_eq!(advice.reason, "Double Gameweek");
        let player = advice.player.unwrap();
        assert_eq!(player.id, PlayerId::new(13));
        assert!((player.points - 12.6).abs() < 1e-9);
        assert_eq!(
            advice.reasoning,
            "Player 13 has a double gameweek with excellent expected returns"
        );
    }

    #[test]
    fn exceptional_single_fixture() {
        // 9 * 1.6 + 4 * 0.2 + 0.5 * 2 = 16.2 ceiling against a rank-1 opponent.
        let advice = run(&star_striker(), vec![fixture(1, 15, 16, 1)]);

        assert!(advice.recommended);
        assert!(!advice.double_period);
        assert_eq!(advice.reason, "Exceptional fixture and form");
        assert_eq!(advice.player.unwrap().id, PlayerId::new(15));
        assert_eq!(
            advice.reasoning,
            "While not a DGW, Player 15 has exceptional fixture and form"
        );
    }

    #[test]
    fn ordinary_fixture_waits() {
        let advice = run(&star_striker(), vec![fixture(1, 15, 16, 3)]);

        assert!(!advice.recommended);
        assert_eq!(advice.reason, "Wait for better opportunity");
        assert!(advice.player.is_none());
    }

    #[test]
    fn easy_fixture_needs_enough_points() {
        let model = RateModel::uniform(5.0).with(15, 8.0);
        let advice = run(&model, vec![fixture(1, 15, 16, 1)]);

        assert!(!advice.recommended);
        assert!(advice.player.is_none());
    }
}
