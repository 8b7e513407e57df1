//! One-off action ("chip") evaluators.
//!
//! Each evaluator is a pure function of the universe, the scoring model and
//! the squad. [`ChipEvaluator`] runs the ones not yet played and ranks the
//! result with [`strategy::plan`].

pub mod bench_boost;
pub mod free_hit;
pub mod strategy;
pub mod triple_captain;
pub mod wildcard;

pub use bench_boost::{BenchBoostAdvice, BenchBoostConfig};
pub use free_hit::{FreeHitAdvice, FreeHitConfig};
pub use strategy::{ChipOption, Priority, Strategy};
pub use triple_captain::{TripleCaptainAdvice, TripleCaptainConfig};
pub use wildcard::{WildcardAdvice, WildcardConfig};

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{CaptainSelector, LineupSelector, OptimizerContext, SquadSelector};
use crate::domain::PlayerId;
use crate::error::Result;

/// A one-off action, named as the data source names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Chip {
    #[serde(rename = "wildcard")]
    Wildcard,
    #[serde(rename = "3xc")]
    TripleCaptain,
    #[serde(rename = "bboost")]
    BenchBoost,
    #[serde(rename = "freehit")]
    FreeHit,
}

impl Chip {
    pub const ALL: [Chip; 4] = [
        Chip::Wildcard,
        Chip::TripleCaptain,
        Chip::BenchBoost,
        Chip::FreeHit,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Chip::Wildcard => "wildcard",
            Chip::TripleCaptain => "3xc",
            Chip::BenchBoost => "bboost",
            Chip::FreeHit => "freehit",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Thresholds for every chip evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChipConfig {
    #[serde(default)]
    pub wildcard: WildcardConfig,

    #[serde(default)]
    pub bench_boost: BenchBoostConfig,

    #[serde(default)]
    pub free_hit: FreeHitConfig,

    #[serde(default)]
    pub triple_captain: TripleCaptainConfig,

    /// Last period in which a wildcard is urgent.
    #[serde(default = "default_early_season_period")]
    pub early_season_period: u32,
}

fn default_early_season_period() -> u32 {
    10
}

impl Default for ChipConfig {
    fn default() -> Self {
        Self {
            wildcard: WildcardConfig::default(),
            bench_boost: BenchBoostConfig::default(),
            free_hit: FreeHitConfig::default(),
            triple_captain: TripleCaptainConfig::default(),
            early_season_period: default_early_season_period(),
        }
    }
}

/// Every evaluated chip plus the overall call.
#[derive(Debug, Clone, Serialize)]
pub struct ChipReport {
    pub current_period: u32,
    /// Chip names already played, as reported.
    pub chips_used: Vec<String>,
    /// Chips whose evaluator came out positive.
    pub recommended: Vec<Chip>,
    pub wildcard: Option<WildcardAdvice>,
    pub triple_captain: Option<TripleCaptainAdvice>,
    pub bench_boost: Option<BenchBoostAdvice>,
    pub free_hit: Option<FreeHitAdvice>,
    pub strategy: Strategy,
}

/// Runs the chip evaluators for one squad.
#[derive(Debug, Clone)]
pub struct ChipEvaluator {
    config: ChipConfig,
    squad: SquadSelector,
    lineup: LineupSelector,
    captain: CaptainSelector,
}

impl Default for ChipEvaluator {
    fn default() -> Self {
        Self::new(
            ChipConfig::default(),
            SquadSelector::default(),
            LineupSelector::default(),
            CaptainSelector::default(),
        )
    }
}

impl ChipEvaluator {
    pub fn new(
        config: ChipConfig,
        squad: SquadSelector,
        lineup: LineupSelector,
        captain: CaptainSelector,
    ) -> Self {
        Self {
            config,
            squad,
            lineup,
            captain,
        }
    }

    /// Evaluate every chip not in `chips_used`.
    ///
    /// Unrecognised names in `chips_used` are reported back but otherwise
    /// ignored.
    pub fn report(
        &self,
        ctx: &OptimizerContext<'_>,
        squad: &[PlayerId],
        chips_used: &[String],
    ) -> Result<ChipReport> {
        let current_period = ctx.universe.current_period();
        let used: BTreeSet<Chip> = chips_used.iter().filter_map(|n| Chip::from_name(n)).collect();
        let doubles = ctx.universe.double_clubs(current_period);
        let mut recommended = Vec::new();

        let wildcard = if used.contains(&Chip::Wildcard) {
            None
        } else {
            let advice = wildcard::evaluate(
                ctx,
                &self.squad,
                squad,
                &self.config.wildcard,
                self.config.wildcard.horizon,
            )?;
            if advice.recommended {
                recommended.push(Chip::Wildcard);
            }
            Some(advice)
        };

        let triple_captain = if used.contains(&Chip::TripleCaptain) {
            None
        } else {
            let advice = triple_captain::evaluate(
                ctx,
                &self.captain,
                squad,
                &doubles,
                &self.config.triple_captain,
            )?;
            if advice.recommended {
                recommended.push(Chip::TripleCaptain);
            }
            Some(advice)
        };

        let bench_boost = if used.contains(&Chip::BenchBoost) {
            None
        } else {
            let advice =
                bench_boost::evaluate(ctx, &self.lineup, squad, &doubles, &self.config.bench_boost)?;
            if advice.recommended {
                recommended.push(Chip::BenchBoost);
            }
            Some(advice)
        };

        let free_hit = if used.contains(&Chip::FreeHit) {
            None
        } else {
            let advice = free_hit::evaluate(ctx, squad, &doubles, &self.config.free_hit)?;
            if advice.recommended {
                recommended.push(Chip::FreeHit);
            }
            Some(advice)
        };

        let mut report = ChipReport {
            current_period,
            chips_used: chips_used.to_vec(),
            recommended,
            wildcard,
            triple_captain,
            bench_boost,
            free_hit,
            strategy: Strategy::default(),
        };
        report.strategy = strategy::plan(&report, &self.config);

        info!(
            period = current_period,
            recommended = report.recommended.len(),
            strategy = %report.strategy.recommendation,
            "Chips evaluated"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chip_names_match_data_source() {
        assert_eq!(Chip::from_name("3xc"), Some(Chip::TripleCaptain));
        assert_eq!(Chip::from_name("bboost"), Some(Chip::BenchBoost));
        assert_eq!(Chip::from_name("manager"), None);
        assert_eq!(Chip::FreeHit.to_string(), "freehit");
        assert_eq!(serde_json::to_string(&Chip::TripleCaptain).unwrap(), "\"3xc\"");
    }

    #[test]
    fn config_defaults() {
        let config = ChipConfig::default();
        assert_eq!(config.early_season_period, 10);
        assert_eq!(config.wildcard.horizon, 10);
        assert_eq!(config.free_hit.min_squad_points, 35.0);
        assert_eq!(config.triple_captain.double_multiplier, 1.8);
    }
}
