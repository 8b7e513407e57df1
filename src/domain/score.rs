//! Projected-points scoring.
//!
//! The optimizers only need *a* number per player and horizon; how it is
//! produced is policy. [`ScoringModel`] is the seam, [`HeuristicModel`] the
//! default policy: a form / season-rate / estimate blend scaled by fixture
//! difficulty and playing time.
//!
//! Missing `form`, `points_per_period` and `next_estimate` values are zero by
//! the time they reach a [`Player`], so the model never sees a gap.

use serde::{Deserialize, Serialize};

use super::ids::PlayerId;
use super::player::Player;
use super::position::Position;
use super::universe::Universe;

/// A player's projection over a horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projection {
    /// Expected points over the whole horizon. Never negative.
    pub points: f64,
    /// Mean fixture difficulty over the horizon.
    pub fixture_difficulty: f64,
    /// Share of match minutes the player tends to play.
    pub availability: f64,
}

/// Produces projected points for a player over a number of periods.
///
/// Implementations must be deterministic for a given universe.
pub trait ScoringModel: Send + Sync {
    /// Model name for logging.
    fn name(&self) -> &'static str;

    /// Project `player` over the next `horizon` periods.
    fn project(&self, universe: &Universe, player: &Player, horizon: u32) -> Projection;

    /// Shortcut for the points component.
    fn points(&self, universe: &Universe, player: &Player, horizon: u32) -> f64 {
        self.project(universe, player, horizon).points
    }
}

/// Weights for the default heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct ScoringConfig {
    #[serde(default = "default_form_weight")]
    pub form_weight: f64,

    #[serde(default = "default_season_weight")]
    pub season_weight: f64,

    #[serde(default = "default_estimate_weight")]
    pub estimate_weight: f64,

    /// Multiplier at difficulty zero; the line through it is
    /// `intercept - slope * difficulty`.
    #[serde(default = "default_difficulty_intercept")]
    pub difficulty_intercept: f64,

    #[serde(default = "default_difficulty_slope")]
    pub difficulty_slope: f64,
}

fn default_form_weight() -> f64 {
    0.5
}

fn default_season_weight() -> f64 {
    0.3
}

fn default_estimate_weight() -> f64 {
    0.2
}

fn default_difficulty_intercept() -> f64 {
    1.4
}

fn default_difficulty_slope() -> f64 {
    0.12
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            form_weight: default_form_weight(),
            season_weight: default_season_weight(),
            estimate_weight: default_estimate_weight(),
            difficulty_intercept: default_difficulty_intercept(),
            difficulty_slope: default_difficulty_slope(),
        }
    }
}

/// Default form / fixture / minutes blend.
#[derive(Debug, Clone, Default)]
pub struct HeuristicModel {
    config: ScoringConfig,
}

impl HeuristicModel {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Per-period base rate before fixture and minutes adjustments.
    pub fn base_rate(&self, player: &Player) -> f64 {
        player.form * self.config.form_weight
            + player.points_per_period * self.config.season_weight
            + player.next_estimate * self.config.estimate_weight
    }

    /// Map a 1..5 difficulty rating to a points multiplier (1.28 .. 0.8 by default).
    pub fn difficulty_multiplier(&self, difficulty: f64) -> f64 {
        self.config.difficulty_intercept - difficulty * self.config.difficulty_slope
    }
}

impl ScoringModel for HeuristicModel {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn project(&self, universe: &Universe, player: &Player, horizon: u32) -> Projection {
        let fixture_difficulty = universe.fixture_difficulty(player.club, horizon);
        let availability = player.minutes_ratio();
        let points = self.base_rate(player)
            * self.difficulty_multiplier(fixture_difficulty)
            * availability
            * f64::from(horizon);

        Projection {
            points: points.max(0.0),
            fixture_difficulty,
            availability,
        }
    }
}

/// A player ranked by projected points per currency unit.
#[derive(Debug, Clone, Serialize)]
pub struct ValuePick {
    pub id: PlayerId,
    pub name: String,
    pub club: String,
    pub position: Position,
    pub cost: u32,
    pub points: f64,
    /// Points per currency unit (cost / 10).
    pub value: f64,
    pub form: f64,
}

/// Best single-period value picks among selectable players.
pub fn value_rankings(
    universe: &Universe,
    model: &dyn ScoringModel,
    position: Option<Position>,
    limit: usize,
) -> Vec<ValuePick> {
    let mut picks: Vec<ValuePick> = universe
        .players()
        .iter()
        .filter(|p| position.map_or(true, |pos| p.position == pos))
        .filter(|p| p.is_selectable() && p.cost > 0)
        .map(|p| {
            let points = model.points(universe, p, 1);
            ValuePick {
                id: p.id,
                name: p.name.clone(),
                club: universe.club_name(p.club).to_string(),
                position: p.position,
                cost: p.cost,
                points,
                value: points / (f64::from(p.cost) / 10.0),
                form: p.form,
            }
        })
        .collect();

    picks.sort_by(|a, b| b.value.total_cmp(&a.value).then(a.id.cmp(&b.id)));
    picks.truncate(limit);
    picks
}

/// One side of a player comparison.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerScore {
    pub id: PlayerId,
    pub name: String,
    pub club: String,
    pub position: Position,
    pub cost: u32,
    pub points: f64,
    pub value: f64,
    pub form: f64,
    pub total_points: i32,
    pub ownership: f64,
    /// `0.5 * points + 0.3 * value + 0.2 * form`.
    pub overall: f64,
}

impl PlayerScore {
    pub fn new(universe: &Universe, model: &dyn ScoringModel, player: &Player, horizon: u32) -> Self {
        let points = model.points(universe, player, horizon);
        let cost = f64::from(player.cost) / 10.0;
        let value = if cost > 0.0 { points / cost } else { 0.0 };
        Self {
            id: player.id,
            name: player.name.clone(),
            club: universe.club_name(player.club).to_string(),
            position: player.position,
            cost: player.cost,
            points,
            value,
            form: player.form,
            total_points: player.total_points,
            ownership: player.ownership,
            overall: points * 0.5 + value * 0.3 + player.form * 0.2,
        }
    }
}

/// Head-to-head comparison of two players.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub first: PlayerScore,
    pub second: PlayerScore,
    pub better: PlayerId,
    pub difference: f64,
}

/// Compare two players over a horizon. Ties favour the second player.
pub fn compare(
    universe: &Universe,
    model: &dyn ScoringModel,
    first: &Player,
    second: &Player,
    horizon: u32,
) -> Comparison {
    let first = PlayerScore::new(universe, model, first, horizon);
    let second = PlayerScore::new(universe, model, second, horizon);
    let better = if first.overall > second.overall {
        first.id
    } else {
        second.id
    };
    let difference = (first.overall - second.overall).abs();
    Comparison {
        first,
        second,
        better,
        difference,
    }
}
