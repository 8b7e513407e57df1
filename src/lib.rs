//! Gaffer - fantasy football roster optimization.
//!
//! Recommends a squad under budget, a starting lineup, transfers and chip
//! usage for a fantasy football manager.
//!
//! # Architecture
//!
//! - **`domain`** - Player universe, scoring model and the ILP solver port
//!   - `Universe` - Immutable, indexed snapshot of players, clubs and fixtures
//!   - `HeuristicModel` - Form, fixture difficulty and minutes blend
//!   - `HighsSolver` - HiGHS via good_lp
//!
//! - **`optimizer`** - Roster decisions built on the domain
//!   - `SquadSelector` / `LineupSelector` - Exact 0/1 programs
//!   - `TransferSearch` - Exhaustive single swap, greedy multi-swap
//!   - `chip` - One-off action evaluators and overall strategy
//!
//! - **`port`** / **`adapter`** - Data source trait, public API client and
//!   offline snapshot loader
//!
//! - **`app`** - Configuration and the advisor service
//! - **`cli`** - Command-line presentation
//!
//! # Example
//!
//! ```no_run
//! use gaffer::domain::record::Snapshot;
//! use gaffer::domain::solver::HighsSolver;
//! use gaffer::domain::{HeuristicModel, Universe};
//! use gaffer::optimizer::{OptimizerContext, SquadSelector};
//!
//! # fn main() -> gaffer::error::Result<()> {
//! let snapshot: Snapshot = serde_json::from_str(&std::fs::read_to_string("snapshot.json")?)?;
//! let universe = Universe::from_snapshot(snapshot)?;
//! let model = HeuristicModel::default();
//! let solver = HighsSolver::default();
//! let ctx = OptimizerContext::new(&universe, &model, &solver);
//!
//! let squad = SquadSelector::default().select(&ctx, 1000, 5)?;
//! println!("{} players, {:.1} points", squad.players.len(), squad.total_points);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod port;

#[cfg(test)]
pub(crate) mod testkit;
