//! Advisor service: fetch, build the universe, run an optimizer.
//!
//! This is where upstream failures stop being errors. Anything that needs a
//! manager's squad reports [`Advice::Unavailable`] when the source cannot
//! supply it, while bad input and broken data still propagate as errors.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use super::config::Config;
use crate::domain::error::DomainError;
use crate::domain::score::{self, Comparison, ValuePick};
use crate::domain::solver::HighsSolver;
use crate::domain::{HeuristicModel, PlayerId, Position, ScoringModel, Universe};
use crate::error::{Error, Result};
use crate::optimizer::chip::{ChipEvaluator, ChipReport};
use crate::optimizer::{
    CaptainPick, CaptainSelector, LineupSelection, LineupSelector, OptimizerContext,
    SquadConfig, SquadRules, SquadSelection, SquadSelector, TransferPlan, TransferRequest,
    TransferSearch,
};
use crate::port::DataSource;

/// Shown when a manager's squad cannot be fetched.
pub const TEAM_UNAVAILABLE: &str = "Could not fetch team data. Please check team ID.";

/// A result that may be unavailable because the data source failed.
///
/// Serializes as the inner value, or as `{"error": message}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Advice<T> {
    Ready(T),
    Unavailable {
        #[serde(rename = "error")]
        message: String,
    },
}

impl<T> Advice<T> {
    pub fn ready(self) -> Option<T> {
        match self {
            Advice::Ready(value) => Some(value),
            Advice::Unavailable { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Advice::Ready(_))
    }

    /// Apply a fallible step to a ready value.
    pub fn try_map<U>(self, f: impl FnOnce(T) -> Result<U>) -> Result<Advice<U>> {
        match self {
            Advice::Ready(value) => f(value).map(Advice::Ready),
            Advice::Unavailable { message } => Ok(Advice::Unavailable { message }),
        }
    }
}

/// Everything the advisor can say about one manager's squad.
#[derive(Debug, Clone, Serialize)]
pub struct TeamReport {
    pub team: u32,
    pub current_period: u32,
    pub lineup: LineupSelection,
    pub transfers: TransferPlan,
    pub captain: CaptainPick,
    /// Chip history comes from a separate endpoint and can fail on its own.
    pub chips: Advice<ChipReport>,
}

/// Turn an upstream failure into [`Advice::Unavailable`]; pass anything else
/// through.
fn soften<T>(result: Result<T>, message: impl FnOnce(&Error) -> String) -> Result<Advice<T>> {
    match result {
        Ok(value) => Ok(Advice::Ready(value)),
        Err(err) if err.is_upstream() => {
            warn!(error = %err, "Data source unavailable");
            Ok(Advice::Unavailable {
                message: message(&err),
            })
        }
        Err(err) => Err(err),
    }
}

fn chips_unavailable(err: &Error) -> String {
    format!("Could not generate chip recommendations: {err}")
}

/// Wires a data source to the optimizers.
pub struct Advisor {
    source: Arc<dyn DataSource>,
    model: Arc<dyn ScoringModel>,
    solver: HighsSolver,
    squad_config: SquadConfig,
    squad: SquadSelector,
    lineup: LineupSelector,
    transfers: TransferSearch,
    captain: CaptainSelector,
    chips: ChipEvaluator,
}

impl Advisor {
    pub fn new(config: &Config, source: Arc<dyn DataSource>) -> Self {
        let rules = SquadRules::default();
        let squad = SquadSelector::new(rules);
        let lineup = LineupSelector::default();
        let captain = CaptainSelector::new(config.captain);
        Self {
            source,
            model: Arc::new(HeuristicModel::new(config.scoring)),
            solver: HighsSolver::new(config.solver),
            squad_config: config.squad,
            transfers: TransferSearch::new(config.transfers, &rules),
            chips: ChipEvaluator::new(config.chips, squad.clone(), lineup.clone(), captain.clone()),
            squad,
            lineup,
            captain,
        }
    }

    pub fn transfer_search(&self) -> &TransferSearch {
        &self.transfers
    }

    /// Fetch a snapshot and index it.
    pub async fn universe(&self) -> Result<Universe> {
        let snapshot = self.source.snapshot().await?;
        Ok(Universe::from_snapshot(snapshot)?)
    }

    /// Drop anything the source has cached.
    pub async fn refresh(&self) -> Result<()> {
        self.source.refresh().await
    }

    fn context<'a>(&'a self, universe: &'a Universe) -> OptimizerContext<'a> {
        OptimizerContext::new(universe, self.model.as_ref(), &self.solver)
    }

    async fn team_squad(&self, universe: &Universe, team: u32) -> Result<Vec<PlayerId>> {
        let picks = self
            .source
            .squad_picks(team, universe.current_period())
            .await?;
        Ok(picks.player_ids())
    }

    async fn fetch_squad(&self, universe: &Universe, team: u32) -> Result<Advice<Vec<PlayerId>>> {
        soften(self.team_squad(universe, team).await, |_| TEAM_UNAVAILABLE.into())
    }

    /// Best squad under `budget` (tenths) over `horizon` periods, falling
    /// back to configured values.
    pub async fn squad(&self, budget: Option<i64>, horizon: Option<u32>) -> Result<SquadSelection> {
        let universe = self.universe().await?;
        let budget = budget.unwrap_or(self.squad_config.budget);
        let horizon = horizon.unwrap_or(self.squad_config.horizon);
        self.squad.select(&self.context(&universe), budget, horizon)
    }

    /// Starting eleven for a manager's current squad.
    pub async fn lineup(&self, team: u32) -> Result<Advice<LineupSelection>> {
        let universe = self.universe().await?;
        let ctx = self.context(&universe);
        self.fetch_squad(&universe, team)
            .await?
            .try_map(|squad| self.lineup.select(&ctx, &squad))
    }

    /// Transfer plan for a manager's current squad.
    pub async fn transfers(
        &self,
        team: u32,
        request: TransferRequest,
    ) -> Result<Advice<TransferPlan>> {
        let universe = self.universe().await?;
        let ctx = self.context(&universe);
        self.fetch_squad(&universe, team).await?.try_map(|squad| {
            let plan = self.transfers.search(&ctx, &squad, &request)?;
            info!(
                team,
                transfers = plan.transfers.len(),
                net = plan.net_improvement,
                "Transfer plan ready"
            );
            Ok(plan)
        })
    }

    /// Captain and vice-captain for a manager's current squad.
    pub async fn captain(&self, team: u32) -> Result<Advice<CaptainPick>> {
        let universe = self.universe().await?;
        let ctx = self.context(&universe);
        self.fetch_squad(&universe, team)
            .await?
            .try_map(|squad| self.captain.suggest(&ctx, &squad))
    }

    /// Evaluate every chip the manager has not played yet.
    pub async fn chips(&self, team: u32) -> Result<Advice<ChipReport>> {
        let universe = self.universe().await?;
        let fetched = async {
            let history = self.source.team_history(team).await?;
            let squad = self.team_squad(&universe, team).await?;
            Ok::<_, Error>((history, squad))
        }
        .await;
        let ctx = self.context(&universe);
        soften(fetched, chips_unavailable)?
            .try_map(|(history, squad)| self.chips.report(&ctx, &squad, &history.chip_names()))
    }

    /// Lineup, one transfer, captaincy and chips for a manager's squad.
    ///
    /// The universe and squad are fetched once and shared by every step.
    pub async fn team_report(&self, team: u32) -> Result<Advice<TeamReport>> {
        let universe = self.universe().await?;
        let ctx = self.context(&universe);
        let squad = match self.fetch_squad(&universe, team).await? {
            Advice::Ready(squad) => squad,
            Advice::Unavailable { message } => return Ok(Advice::Unavailable { message }),
        };

        let lineup = self.lineup.select(&ctx, &squad)?;
        let defaults = self.transfers.config();
        let request = TransferRequest::new(1)
            .free_transfers(defaults.free_transfers)
            .horizon(defaults.horizon);
        let transfers = self.transfers.search(&ctx, &squad, &request)?;
        let captain = self.captain.suggest(&ctx, &squad)?;
        let chips = soften(self.source.team_history(team).await, chips_unavailable)?
            .try_map(|history| self.chips.report(&ctx, &squad, &history.chip_names()))?;

        info!(team, chips = chips.is_ready(), "Team report ready");

        Ok(Advice::Ready(TeamReport {
            team,
            current_period: universe.current_period(),
            lineup,
            transfers,
            captain,
            chips,
        }))
    }

    /// Best single-period value picks.
    pub async fn values(&self, position: Option<Position>, limit: usize) -> Result<Vec<ValuePick>> {
        let universe = self.universe().await?;
        Ok(score::value_rankings(&universe, self.model.as_ref(), position, limit))
    }

    /// Head-to-head comparison over `horizon` periods.
    pub async fn compare(&self, first: PlayerId, second: PlayerId, horizon: u32) -> Result<Comparison> {
        if horizon == 0 {
            return Err(DomainError::InvalidHorizon(horizon).into());
        }
        let universe = self.universe().await?;
        let a = universe.player(first).ok_or(DomainError::UnknownPlayer(first))?;
        let b = universe.player(second).ok_or(DomainError::UnknownPlayer(second))?;
        Ok(score::compare(&universe, self.model.as_ref(), a, b, horizon))
    }
}
