//! Data source port for players, fixtures and manager squads.
//!
//! Everything behind this trait is I/O. The optimizers never see it: the
//! caller fetches a [`Snapshot`], builds a [`Universe`](crate::domain::Universe)
//! and hands that over.

use async_trait::async_trait;

use crate::domain::record::{Snapshot, SquadPicks, TeamHistory};
use crate::error::Result;

/// Supplies boundary records.
///
/// Implementations may cache; [`refresh`](DataSource::refresh) must drop
/// anything cached so the next call sees fresh data.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Players, clubs, fixtures and the current period.
    async fn snapshot(&self) -> Result<Snapshot>;

    /// The squad a manager holds in `period`.
    async fn squad_picks(&self, team: u32, period: u32) -> Result<SquadPicks>;

    /// A manager's season history, including chips already played.
    async fn team_history(&self, team: u32) -> Result<TeamHistory>;

    /// Drop cached data.
    async fn refresh(&self) -> Result<()>;
}
