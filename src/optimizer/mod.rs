//! Roster optimizers layered on the player universe.
//!
//! - [`squad`]: exact 0/1 program for the full squad under budget
//! - [`lineup`]: exact 0/1 program for the starting eleven
//! - [`transfer`]: exhaustive single swap, greedy multi-swap
//! - [`captain`]: captain and vice-captain ranking
//! - [`chip`]: one-off action evaluators built on the above
//!
//! Every optimizer borrows an [`OptimizerContext`]; none of them mutates it.

pub mod captain;
pub mod chip;
pub mod lineup;
pub mod squad;
pub mod transfer;

pub use captain::{CaptainConfig, CaptainPick, CaptainSelector};
pub use lineup::{LineupSelection, LineupSelector};
pub use squad::{SquadConfig, SquadSelection, SquadSelector};
pub use transfer::{TransferConfig, TransferPlan, TransferProposal, TransferRequest, TransferSearch};

use serde::Serialize;

use crate::domain::solver::Solver;
use crate::domain::{
    ClubId, PerPosition, Player, PlayerId, Position, Quota, ScoringModel, Universe,
};

/// Everything an optimizer reads: the universe, a scoring policy and a solver.
#[derive(Clone, Copy)]
pub struct OptimizerContext<'a> {
    pub universe: &'a Universe,
    pub model: &'a dyn ScoringModel,
    pub solver: &'a dyn Solver,
}

impl<'a> OptimizerContext<'a> {
    pub fn new(
        universe: &'a Universe,
        model: &'a dyn ScoringModel,
        solver: &'a dyn Solver,
    ) -> Self {
        Self {
            universe,
            model,
            solver,
        }
    }

    /// Projected points for `player` over `horizon` periods.
    pub fn points(&self, player: &Player, horizon: u32) -> f64 {
        self.model.points(self.universe, player, horizon)
    }

    /// Present `player` with a projection attached.
    pub fn pick(&self, player: &Player, points: f64) -> PickedPlayer {
        PickedPlayer {
            id: player.id,
            name: player.name.clone(),
            club_id: player.club,
            club: self.universe.club_name(player.club).to_string(),
            position: player.position,
            cost: player.cost,
            points,
        }
    }
}

impl std::fmt::Debug for OptimizerContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptimizerContext")
            .field("model", &self.model.name())
            .field("solver", &self.solver.name())
            .finish_non_exhaustive()
    }
}

/// Squad composition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquadRules {
    pub size: u32,
    pub quotas: PerPosition<Quota>,
    pub max_per_club: u32,
}

impl Default for SquadRules {
    fn default() -> Self {
        Self {
            size: 15,
            quotas: PerPosition::new(
                Quota::exactly(2),
                Quota::exactly(5),
                Quota::exactly(5),
                Quota::exactly(3),
            ),
            max_per_club: 3,
        }
    }
}

/// Starting-eleven rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormationRules {
    pub size: u32,
    pub quotas: PerPosition<Quota>,
}

impl Default for FormationRules {
    fn default() -> Self {
        Self {
            size: 11,
            quotas: PerPosition::new(
                Quota::exactly(1),
                Quota::new(3, 5),
                Quota::new(2, 5),
                Quota::new(1, 3),
            ),
        }
    }
}

/// A selected player with the projection the optimizer used.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickedPlayer {
    pub id: PlayerId,
    pub name: String,
    #[serde(skip)]
    pub club_id: ClubId,
    pub club: String,
    pub position: Position,
    /// Price in tenths.
    pub cost: u32,
    pub points: f64,
}

/// Position order, then highest projection first.
pub(crate) fn sort_by_position(players: &mut [PickedPlayer]) {
    players.sort_by(|a, b| {
        a.position
            .cmp(&b.position)
            .then(b.points.total_cmp(&a.points))
            .then(a.id.cmp(&b.id))
    });
}
