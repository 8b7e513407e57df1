//! Transfer search: swap owned players for unowned ones.
//!
//! Every round scans the full cross product of working-squad players and
//! same-position candidates, keeping the swap with the largest strictly
//! positive gain that stays within budget and the club cap. A single
//! transfer is therefore exact. Several transfers apply rounds one after
//! another against the updated squad, which is greedy: two swaps that are
//! each second-best can beat the greedy pair, and this search will not find
//! them.
//!
//! The points penalty for transfers beyond the free allowance is charged
//! once, up front, whether or not the search finds enough swaps to use them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{OptimizerContext, PickedPlayer, SquadRules};
use crate::domain::error::DomainError;
use crate::domain::{ClubId, PerPosition, Player, PlayerId, Position};
use crate::error::Result;

/// Transfer settings.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct TransferConfig {
    /// Transfers available without a points penalty.
    #[serde(default = "default_free_transfers")]
    pub free_transfers: u32,

    /// Points charged for each transfer beyond the free allowance.
    #[serde(default = "default_penalty_per_transfer")]
    pub penalty_per_transfer: f64,

    /// Periods to project over.
    #[serde(default = "default_horizon")]
    pub horizon: u32,
}

fn default_free_transfers() -> u32 {
    1
}

fn default_penalty_per_transfer() -> f64 {
    4.0
}

fn default_horizon() -> u32 {
    5
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            free_transfers: default_free_transfers(),
            penalty_per_transfer: default_penalty_per_transfer(),
            horizon: default_horizon(),
        }
    }
}

/// What the manager is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferRequest {
    pub transfers: u32,
    pub free_transfers: u32,
    /// Banked funds in tenths.
    pub bank: i64,
    pub horizon: u32,
}

impl TransferRequest {
    pub fn new(transfers: u32) -> Self {
        Self {
            transfers,
            free_transfers: default_free_transfers(),
            bank: 0,
            horizon: default_horizon(),
        }
    }

    #[must_use]
    pub fn free_transfers(mut self, free_transfers: u32) -> Self {
        self.free_transfers = free_transfers;
        self
    }

    #[must_use]
    pub fn bank(mut self, bank: i64) -> Self {
        self.bank = bank;
        self
    }

    #[must_use]
    pub fn horizon(mut self, horizon: u32) -> Self {
        self.horizon = horizon;
        self
    }

    /// Transfers beyond the free allowance.
    pub fn extra_transfers(&self) -> u32 {
        self.transfers.saturating_sub(self.free_transfers)
    }
}

/// One applied swap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferProposal {
    pub out: PickedPlayer,
    #[serde(rename = "in")]
    pub incoming: PickedPlayer,
    /// Incoming cost minus outgoing cost, in tenths.
    pub cost_change: i64,
    /// Incoming points minus outgoing points, before any penalty.
    pub points_gain: f64,
}

/// Ordered swaps plus their combined effect.
#[derive(Debug, Clone, Serialize)]
pub struct TransferPlan {
    pub recommendation: String,
    pub transfers: Vec<TransferProposal>,
    /// Points charged up front for extra transfers.
    pub penalty: f64,
    /// Sum of swap gains minus the penalty.
    pub net_improvement: f64,
    /// Squad value plus bank, in tenths.
    pub budget: i64,
    /// Budget left after every swap is applied.
    pub remaining_bank: i64,
    pub horizon: u32,
}

impl TransferPlan {
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
struct Member<'a> {
    player: &'a Player,
    points: f64,
}

#[derive(Debug, Clone, Copy)]
struct Swap<'a> {
    out: usize,
    incoming: Member<'a>,
    gain: f64,
}

/// Searches for point-improving swaps.
#[derive(Debug, Clone)]
pub struct TransferSearch {
    config: TransferConfig,
    max_per_club: u32,
}

impl Default for TransferSearch {
    fn default() -> Self {
        Self::new(TransferConfig::default(), &SquadRules::default())
    }
}

impl TransferSearch {
    pub fn new(config: TransferConfig, rules: &SquadRules) -> Self {
        Self {
            config,
            max_per_club: rules.max_per_club,
        }
    }

    pub fn config(&self) -> &TransferConfig {
        &self.config
    }

    /// Points charged for a request before any swap is found.
    pub fn penalty(&self, request: &TransferRequest) -> f64 {
        f64::from(request.extra_transfers()) * self.config.penalty_per_transfer
    }

    /// Propose up to `request.transfers` swaps for `squad`.
    ///
    /// Candidates are selectable players outside the current squad. The plan
    /// never mutates anything; callers apply it themselves.
    ///
    /// # Errors
    ///
    /// Fails on a zero transfer count, a zero horizon, or a squad naming an
    /// unknown or repeated player.
    pub fn search(
        &self,
        ctx: &OptimizerContext<'_>,
        squad: &[PlayerId],
        request: &TransferRequest,
    ) -> Result<TransferPlan> {
        if request.transfers == 0 {
            return Err(DomainError::InvalidTransferCount(request.transfers).into());
        }
        if request.horizon == 0 {
            return Err(DomainError::InvalidHorizon(request.horizon).into());
        }

        let owned: HashSet<PlayerId> = squad.iter().copied().collect();
        let mut working: Vec<Member<'_>> = ctx
            .universe
            .resolve(squad)?
            .into_iter()
            .map(|player| Member {
                player,
                points: ctx.points(player, request.horizon),
            })
            .collect();
        let mut candidates: PerPosition<Vec<Member<'_>>> = PerPosition::default();
        for position in Position::ALL {
            candidates[position] = ctx
                .universe
                .by_position(position)
                .filter(|p| p.is_selectable() && !owned.contains(&p.id))
                .map(|player| Member {
                    player,
                    points: ctx.points(player, request.horizon),
                })
                .collect();
        }

        let squad_value: i64 = working.iter().map(|m| i64::from(m.player.cost)).sum();
        let budget = squad_value + request.bank;
        let penalty = self.penalty(request);

        debug!(
            squad = working.len(),
            candidates = candidates.iter().map(|(_, c)| c.len()).sum::<usize>(),
            budget,
            penalty,
            transfers = request.transfers,
            "Searching transfers"
        );

        let mut brought_in: HashSet<PlayerId> = HashSet::new();
        let mut transfers = Vec::new();

        for _ in 0..request.transfers {
            let Some(swap) = self.best_swap(&working, &candidates, &brought_in, budget) else {
                break;
            };
            let out = working[swap.out];
            let incoming = swap.incoming;
            transfers.push(TransferProposal {
                out: ctx.pick(out.player, out.points),
                incoming: ctx.pick(incoming.player, incoming.points),
                cost_change: i64::from(incoming.player.cost) - i64::from(out.player.cost),
                points_gain: swap.gain,
            });
            working[swap.out] = incoming;
            brought_in.insert(incoming.player.id);
        }

        let final_value: i64 = working.iter().map(|m| i64::from(m.player.cost)).sum();
        let gains: f64 = transfers.iter().map(|t| t.points_gain).sum();
        let net_improvement = gains - penalty;
        let recommendation = recommendation(request.transfers, &transfers);

        info!(
            found = transfers.len(),
            net_improvement,
            %recommendation,
            "Transfer search finished"
        );

        Ok(TransferPlan {
            recommendation,
            transfers,
            penalty,
            net_improvement,
            budget,
            remaining_bank: budget - final_value,
            horizon: request.horizon,
        })
    }

    /// Best strictly improving swap against the working squad.
    fn best_swap<'a>(
        &self,
        working: &[Member<'a>],
        candidates: &PerPosition<Vec<Member<'a>>>,
        excluded: &HashSet<PlayerId>,
        budget: i64,
    ) -> Option<Swap<'a>> {
        let squad_cost: i64 = working.iter().map(|m| i64::from(m.player.cost)).sum();
        let mut best: Option<Swap<'a>> = None;
        let mut best_gain = 0.0;

        for (out, member) in working.iter().enumerate() {
            for incoming in &candidates[member.player.position] {
                if excluded.contains(&incoming.player.id) {
                    continue;
                }
                let cost_diff = i64::from(incoming.player.cost) - i64::from(member.player.cost);
                if squad_cost + cost_diff > budget {
                    continue;
                }
                let club = incoming.player.club;
                if club != member.player.club
                    && club_count(working, club) >= self.max_per_club as usize
                {
                    continue;
                }

                let gain = incoming.points - member.points;
                if gain > best_gain {
                    best_gain = gain;
                    best = Some(Swap {
                        out,
                        incoming: *incoming,
                        gain,
                    });
                }
            }
        }

        best
    }
}

fn club_count(working: &[Member<'_>], club: ClubId) -> usize {
    working.iter().filter(|m| m.player.club == club).count()
}

fn recommendation(requested: u32, transfers: &[TransferProposal]) -> String {
    match transfers {
        [] => "No beneficial transfers found".to_string(),
        [only] if requested == 1 => {
            format!("Transfer out {} for {}", only.out.name, only.incoming.name)
        }
        _ => format!("Make {} transfer(s)", transfers.len()),
    }
}
