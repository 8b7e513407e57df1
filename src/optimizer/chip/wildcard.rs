//! Wildcard: rebuild the whole squad for its current value.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::solver::SolutionStatus;
use crate::domain::PlayerId;
use crate::error::Result;
use crate::optimizer::{OptimizerContext, PickedPlayer, SquadSelector};

/// Wildcard thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WildcardConfig {
    /// Periods to compare the squads over.
    #[serde(default = "default_horizon")]
    pub horizon: u32,

    /// Horizons at least this long use the long threshold.
    #[serde(default = "default_long_horizon")]
    pub long_horizon: u32,

    #[serde(default = "default_long_threshold")]
    pub long_threshold: f64,

    #[serde(default = "default_short_threshold")]
    pub short_threshold: f64,
}

fn default_horizon() -> u32 {
    10
}

fn default_long_horizon() -> u32 {
    5
}

fn default_long_threshold() -> f64 {
    20.0
}

fn default_short_threshold() -> f64 {
    15.0
}

impl Default for WildcardConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            long_horizon: default_long_horizon(),
            long_threshold: default_long_threshold(),
            short_threshold: default_short_threshold(),
        }
    }
}

impl WildcardConfig {
    /// Improvement needed over `horizon` periods.
    pub fn threshold(&self, horizon: u32) -> f64 {
        if horizon >= self.long_horizon {
            self.long_threshold
        } else {
            self.short_threshold
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WildcardAdvice {
    pub recommended: bool,
    /// Status of the rebuild solve.
    pub status: SolutionStatus,
    pub current_points: f64,
    pub optimal_points: f64,
    pub improvement: f64,
    pub threshold: f64,
    pub optimal_squad: Vec<PickedPlayer>,
    pub reasoning: String,
    pub horizon: u32,
}

/// Compare `squad` against the best squad its value can buy.
pub fn evaluate(
    ctx: &OptimizerContext<'_>,
    selector: &SquadSelector,
    squad: &[PlayerId],
    config: &WildcardConfig,
    horizon: u32,
) -> Result<WildcardAdvice> {
    let players = ctx.universe.resolve(squad)?;
    let current_points: f64 = players.iter().map(|p| ctx.points(p, horizon)).sum();
    let value: i64 = players.iter().map(|p| i64::from(p.cost)).sum();
    let threshold = config.threshold(horizon);

    let rebuild = selector.select(ctx, value, horizon)?;
    if !rebuild.is_optimal() {
        return Ok(WildcardAdvice {
            recommended: false,
            status: rebuild.status,
            current_points,
            optimal_points: 0.0,
            improvement: 0.0,
            threshold,
            optimal_squad: Vec::new(),
            reasoning: format!(
                "Could not build a replacement squad for {value} ({}).",
                rebuild.status
            ),
            horizon,
        });
    }

    let improvement = rebuild.total_points - current_points;
    let recommended = improvement > threshold;
    info!(improvement, threshold, recommended, "Wildcard evaluated");

    Ok(WildcardAdvice {
        recommended,
        status: rebuild.status,
        current_points,
        optimal_points: rebuild.total_points,
        improvement,
        threshold,
        optimal_squad: rebuild.players,
        reasoning: reasoning(improvement, threshold),
        horizon,
    })
}

fn reasoning(improvement: f64, threshold: f64) -> String {
    if improvement > threshold * 1.5 {
        format!("Strongly recommend using wildcard. Expected improvement of {improvement:.1} points is significant.")
    } else if improvement > threshold {
        format!("Recommend using wildcard. Expected improvement of {improvement:.1} points justifies the chip usage.")
    } else if improvement > threshold * 0.7 {
        format!("Marginal case. Expected improvement of {improvement:.1} points. Consider team situation and remaining chips.")
    } else {
        format!("Do not recommend wildcard. Expected improvement of {improvement:.1} points is too small.")
    }
}
