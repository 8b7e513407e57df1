//! Captain and vice-captain suggestion.
//!
//! Squad players are ranked by projected points. Each of them also gets an
//! upside estimate (ceiling) and a downside estimate (floor); the ceiling
//! drives the low-ownership differential pick and the triple-captain check.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{OptimizerContext, PickedPlayer};
use crate::domain::error::DomainError;
use crate::domain::{Player, PlayerId, Position, FULL_MATCH_MINUTES};
use crate::error::Result;

/// Captaincy settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CaptainConfig {
    /// How many ranked options to report.
    #[serde(default = "default_top_options")]
    pub top_options: usize,

    /// Projection a differential must exceed.
    #[serde(default = "default_differential_min_points")]
    pub differential_min_points: f64,

    /// Periods to project over.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
}

fn default_top_options() -> usize {
    5
}

fn default_differential_min_points() -> f64 {
    4.0
}

fn default_horizon() -> u32 {
    1
}

impl Default for CaptainConfig {
    fn default() -> Self {
        Self {
            top_options: default_top_options(),
            differential_min_points: default_differential_min_points(),
            horizon: default_horizon(),
        }
    }
}

/// A squad player scored for captaincy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptainCandidate {
    #[serde(flatten)]
    pub player: PickedPlayer,
    pub fixture_difficulty: f64,
    pub form: f64,
    pub ownership: f64,
    /// Upside: attackers and in-form players score higher.
    pub ceiling: f64,
    /// Downside: regular starters and clean-sheet defenders score higher.
    pub floor: f64,
}

/// Low-ownership alternative to the captain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Differential {
    #[serde(flatten)]
    pub candidate: CaptainCandidate,
    pub reasoning: String,
}

/// Captaincy suggestion for one squad.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptainPick {
    pub captain: CaptainCandidate,
    pub reasoning: String,
    pub vice_captain: CaptainCandidate,
    pub differential: Option<Differential>,
    pub top_options: Vec<CaptainCandidate>,
    pub horizon: u32,
}

/// Ranks a squad for the captain's armband.
#[derive(Debug, Clone, Default)]
pub struct CaptainSelector {
    config: CaptainConfig,
}

impl CaptainSelector {
    pub fn new(config: CaptainConfig) -> Self {
        Self { config }
    }

    /// Suggest a captain over the configured horizon.
    pub fn suggest(&self, ctx: &OptimizerContext<'_>, squad: &[PlayerId]) -> Result<CaptainPick> {
        self.suggest_over(ctx, squad, self.config.horizon)
    }

    /// Suggest a captain over `horizon` periods.
    ///
    /// # Errors
    ///
    /// Fails on an empty squad, a zero horizon, or an unknown or repeated
    /// player.
    pub fn suggest_over(
        &self,
        ctx: &OptimizerContext<'_>,
        squad: &[PlayerId],
        horizon: u32,
    ) -> Result<CaptainPick> {
        if horizon == 0 {
            return Err(DomainError::InvalidHorizon(horizon).into());
        }
        let players = ctx.universe.resolve(squad)?;

        let mut ranked: Vec<CaptainCandidate> = players
            .iter()
            .map(|p| candidate(ctx, p, horizon))
            .collect();
        // Stable: equal projections keep squad order.
        ranked.sort_by(|a, b| b.player.points.total_cmp(&a.player.points));

        let captain = ranked.first().cloned().ok_or(DomainError::EmptySquad)?;
        let vice_captain = ranked.get(1).cloned().unwrap_or_else(|| captain.clone());
        let differential = self.differential(&ranked, captain.player.id);
        let reasoning = captain_reasoning(&captain);

        ranked.truncate(self.config.top_options);

        info!(
            captain = %captain.player.name,
            vice_captain = %vice_captain.player.name,
            points = captain.player.points,
            "Captain suggested"
        );

        Ok(CaptainPick {
            captain,
            reasoning,
            vice_captain,
            differential,
            top_options: ranked,
            horizon,
        })
    }

    fn differential(&self, ranked: &[CaptainCandidate], captain: PlayerId) -> Option<Differential> {
        let score = |c: &CaptainCandidate| c.ceiling * 100.0 / (c.ownership + 1.0);

        ranked
            .iter()
            .filter(|c| c.player.id != captain && c.player.points > self.config.differential_min_points)
            .fold(None::<&CaptainCandidate>, |best, c| match best {
                Some(b) if score(b) >= score(c) => Some(b),
                _ => Some(c),
            })
            .map(|c| Differential {
                reasoning: format!(
                    "Differential pick with {:.1}% ownership and high ceiling",
                    c.ownership
                ),
                candidate: c.clone(),
            })
    }
}

fn candidate(ctx: &OptimizerContext<'_>, player: &Player, horizon: u32) -> CaptainCandidate {
    let projection = ctx.model.project(ctx.universe, player, horizon);
    CaptainCandidate {
        player: ctx.pick(player, projection.points),
        fixture_difficulty: projection.fixture_difficulty,
        form: player.form,
        ownership: player.ownership,
        ceiling: ceiling(player, projection.points),
        floor: floor(player, projection.points),
    }
}

/// `points * position multiplier + form * 0.2 + threat / 100 * 2`.
pub fn ceiling(player: &Player, points: f64) -> f64 {
    let multiplier = match player.position {
        Position::Keeper => 1.2,
        Position::Defender => 1.3,
        Position::Midfielder => 1.5,
        Position::Forward => 1.6,
    };
    points * multiplier + player.form * 0.2 + player.threat / 100.0 * 2.0
}

/// `points * 0.6` plus minutes and clean-sheet bonuses.
pub fn floor(player: &Player, points: f64) -> f64 {
    let minutes_bonus = if player.minutes > 0 && player.starts > 0 {
        f64::from(player.minutes) / (f64::from(player.starts) * FULL_MATCH_MINUTES) * 2.0
    } else {
        0.0
    };
    let clean_sheet_bonus = match player.position {
        Position::Keeper | Position::Defender => {
            f64::from(player.clean_sheets) / f64::from(player.starts.max(1)) * 4.0
        }
        _ => 0.0,
    };
    points * 0.6 + minutes_bonus + clean_sheet_bonus
}

fn captain_reasoning(captain: &CaptainCandidate) -> String {
    let mut reasons = vec![format!(
        "highest expected points ({:.1})",
        captain.player.points
    )];

    if captain.form > 6.0 {
        reasons.push(format!("excellent form ({:.1})", captain.form));
    } else if captain.form > 4.0 {
        reasons.push(format!("good form ({:.1})", captain.form));
    }

    if captain.fixture_difficulty < 2.5 {
        reasons.push("favorable fixture".to_string());
    } else if captain.fixture_difficulty > 3.5 {
        reasons.push("difficult fixture - be cautious".to_string());
    }

    match captain.player.position {
        Position::Forward => reasons.push("premium forward with high ceiling".to_string()),
        Position::Midfielder => reasons.push("attacking midfielder".to_string()),
        _ => {}
    }

    capitalize(&reasons.join(", "))
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
