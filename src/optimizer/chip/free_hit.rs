//! Free hit: a one-period rebuild for awkward fixture weeks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{ClubId, PlayerId};
use crate::error::Result;
use crate::optimizer::OptimizerContext;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct FreeHitConfig {
    /// Clubs with a double fixture that make a "big" double period.
    #[serde(default = "default_double_clubs")]
    pub double_clubs: usize,

    /// Squad players covered by doubles below which the chip helps.
    #[serde(default = "default_covered_players")]
    pub covered_players: usize,

    /// Difficulty at or above which a fixture counts as hard.
    #[serde(default = "default_hard_difficulty")]
    pub hard_difficulty: f64,

    #[serde(default = "default_hard_players")]
    pub hard_players: usize,

    /// Projection below which a player is expected to blank.
    #[serde(default = "default_blank_points")]
    pub blank_points: f64,

    #[serde(default = "default_blank_players")]
    pub blank_players: usize,

    /// Squad projection below which the chip helps.
    #[serde(default = "default_min_squad_points")]
    pub min_squad_points: f64,
}

fn default_double_clubs() -> usize {
    5
}

fn default_covered_players() -> usize {
    5
}

fn default_hard_difficulty() -> f64 {
    4.0
}

fn default_hard_players() -> usize {
    8
}

fn default_blank_points() -> f64 {
    2.0
}

fn default_blank_players() -> usize {
    7
}

fn default_min_squad_points() -> f64 {
    35.0
}

impl Default for FreeHitConfig {
    fn default() -> Self {
        Self {
            double_clubs: default_double_clubs(),
            covered_players: default_covered_players(),
            hard_difficulty: default_hard_difficulty(),
            hard_players: default_hard_players(),
            blank_points: default_blank_points(),
            blank_players: default_blank_players(),
            min_squad_points: default_min_squad_points(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FreeHitAdvice {
    pub recommended: bool,
    pub reason: String,
    pub squad_points: f64,
    pub hard_fixtures: usize,
    pub blanking_players: usize,
    pub double_clubs: usize,
    /// Squad players whose club plays twice.
    pub covered_players: usize,
}

/// Judge the squad's next period.
pub fn evaluate(
    ctx: &OptimizerContext<'_>,
    squad: &[PlayerId],
    doubles: &HashSet<ClubId>,
    config: &FreeHitConfig,
) -> Result<FreeHitAdvice> {
    let players = ctx.universe.resolve(squad)?;
    let projections: Vec<_> = players
        .iter()
        .map(|p| ctx.model.project(ctx.universe, p, 1))
        .collect();

    let squad_points: f64 = projections.iter().map(|p| p.points).sum();
    let hard_fixtures = projections
        .iter()
        .filter(|p| p.fixture_difficulty >= config.hard_difficulty)
        .count();
    let blanking_players = projections
        .iter()
        .filter(|p| p.points < config.blank_points)
        .count();
    let covered_players = players.iter().filter(|p| doubles.contains(&p.club)).count();

    let (recommended, reason) =
        if doubles.len() >= config.double_clubs && covered_players < config.covered_players {
            (
                true,
                format!(
                    "Big double gameweek but only {covered_players} of your players have DGW"
                ),
            )
        } else if hard_fixtures >= config.hard_players {
            (
                true,
                format!("{hard_fixtures} players have very difficult fixtures"),
            )
        } else if blanking_players >= config.blank_players {
            (true, format!("{blanking_players} players expected to blank"))
        } else if squad_points < config.min_squad_points {
            (
                true,
                format!("Low expected points ({squad_points:.1}) this gameweek"),
            )
        } else {
            (
                false,
                "Current squad is reasonably strong for this gameweek".to_string(),
            )
        };

    Ok(FreeHitAdvice {
        recommended,
        reason,
        squad_points,
        hard_fixtures,
        blanking_players,
        double_clubs: doubles.len(),
        covered_players,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::solver::HighsSolver;
    use crate::domain::Fixture;
    use crate::testkit::{fixture, squad_ids, squad_universe, RateModel};

    fn run(model: &RateModel, fixtures: Vec<Fixture>) -> FreeHitAdvice {
        let universe = squad_universe(fixtures);
        let solver = HighsSolver::default();
        let ctx = OptimizerContext::new(&universe, model, &solver);
        let doubles = universe.double_clubs(1);

        evaluate(&ctx, &squad_ids(), &doubles, &FreeHitConfig::default()).unwrap()
    }

    #[test]
    fn big_double_with_few_squad_players_covered() {
        // Clubs 15 to 20 all play twice; only player 15 is at one of them.
        let fixtures = vec![
            fixture(1, 16, 17, 3),
            fixture(1, 17, 16, 3),
            fixture(1, 18, 19, 3),
            fixture(1, 19, 18, 3),
            fixture(1, 20, 15, 3),
            fixture(1, 15, 20, 3),
        ];
        let advice = run(&RateModel::uniform(10.0), fixtures);

        assert!(advice.recommended);
        assert_eq!(advice.double_clubs, 6);
        assert_eq!(advice.covered_players, 1);
        assert_eq!(
            advice.reason,
            "Big double gameweek but only 1 of your players have DGW"
        );
    }

    #[test]
    fn small_double_is_not_enough() {
        let fixtures = vec![
            fixture(1, 16, 17, 3),
            fixture(1, 17, 16, 3),
            fixture(1, 18, 19, 3),
            fixture(1, 19, 18, 3),
        ];
        let advice = run(&RateModel::uniform(10.0), fixtures);

        assert!(!advice.recommended);
        assert_eq!(advice.double_clubs, 4);
        assert_eq!(
            advice.reason,
            "Current squad is reasonably strong for this gameweek"
        );
    }

    #[test]
    fn many_hard_fixtures() {
        let fixtures = vec![
            fixture(1, 1, 2, 5),
            fixture(1, 3, 4, 5),
            fixture(1, 5, 6, 4),
            fixture(1, 7, 8, 4),
        ];
        let advice = run(&RateModel::uniform(10.0), fixtures);

        assert!(advice.recommended);
        assert_eq!(advice.hard_fixtures, 8);
        assert_eq!(advice.reason, "8 players have very difficult fixtures");
    }

    #[test]
    fn seven_hard_fixtures_are_tolerated() {
        let fixtures = vec![
            fixture(1, 1, 2, 5),
            fixture(1, 3, 4, 5),
            fixture(1, 5, 6, 4),
            fixture(1, 7, 16, 4),
        ];
        let advice = run(&RateModel::uniform(10.0), fixtures);

        assert_eq!(advice.hard_fixtures, 7);
        assert!(!advice.recommended);
    }

    #[test]
    fn many_blanks() {
        let model = (9..=15).fold(RateModel::uniform(10.0), |m, id| m.with(id, 1.0));
        let advice = run(&model, Vec::new());

        assert!(advice.recommended);
        assert_eq!(advice.blanking_players, 7);
        assert_eq!(advice.reason, "7 players expected to blank");
    }

    #[test]
    fn low_squad_total() {
        // 2.0 is not a blank, but fifteen of them total only 30.
        let advice = run(&RateModel::uniform(2.0), Vec::new());

        assert!(advice.recommended);
        assert_eq!(advice.blanking_players, 0);
        assert_eq!(advice.reason, "Low expected points (30.0) this gameweek");
    }
}
