//! Offline data source backed by a JSON file.
//!
//! The file holds the same records the API serves, plus per-manager squads
//! and chip history keyed by team id:
//!
//! ```json
//! {
//!   "current_period": 8,
//!   "players": [...], "clubs": [...], "fixtures": [...],
//!   "entries": { "42": { "picks": [{"element": 1}], "chips": [{"name": "wildcard"}] } }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::record::{
    ChipUse, ClubRecord, FixtureRecord, PickRecord, PlayerRecord, Snapshot, SquadPicks,
    TeamHistory,
};
use crate::error::{Result, UpstreamError};
use crate::port::DataSource;

#[derive(Debug, Clone, Default, Deserialize)]
struct EntryRecord {
    #[serde(default)]
    picks: Vec<PickRecord>,
    #[serde(default)]
    chips: Vec<ChipUse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SnapshotFile {
    #[serde(alias = "elements")]
    players: Vec<PlayerRecord>,
    #[serde(alias = "teams")]
    clubs: Vec<ClubRecord>,
    #[serde(default)]
    fixtures: Vec<FixtureRecord>,
    #[serde(default = "default_period")]
    current_period: u32,
    #[serde(default)]
    entries: BTreeMap<u32, EntryRecord>,
}

fn default_period() -> u32 {
    1
}

impl SnapshotFile {
    fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

/// Serves records from a snapshot file.
///
/// Squads are the same for every period; the file captures one moment.
pub struct SnapshotSource {
    path: PathBuf,
    data: RwLock<SnapshotFile>,
}

impl SnapshotSource {
    /// Read and parse `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let data = Self::read(&path).await?;
        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Build from an in-memory JSON document. No file backs it, so
    /// `refresh` fails.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(Self {
            path: PathBuf::new(),
            data: RwLock::new(SnapshotFile::parse(content)?),
        })
    }

    async fn read(path: &Path) -> Result<SnapshotFile> {
        let content = tokio::fs::read_to_string(path).await?;
        let data = SnapshotFile::parse(&content)?;
        info!(
            path = %path.display(),
            players = data.players.len(),
            entries = data.entries.len(),
            "Loaded snapshot"
        );
        Ok(data)
    }
}

#[async_trait]
impl DataSource for SnapshotSource {
    fn name(&self) -> &'static str {
        "snapshot"
    }

    async fn snapshot(&self) -> Result<Snapshot> {
        let data = self.data.read();
        Ok(Snapshot {
            players: data.players.clone(),
            clubs: data.clubs.clone(),
            fixtures: data.fixtures.clone(),
            current_period: data.current_period,
        })
    }

    async fn squad_picks(&self, team: u32, period: u32) -> Result<SquadPicks> {
        debug!(team, period, "Reading squad picks from snapshot");
        let data = self.data.read();
        let entry = data
            .entries
            .get(&team)
            .filter(|e| !e.picks.is_empty())
            .ok_or(UpstreamError::MissingPicks { team })?;
        Ok(SquadPicks {
            picks: entry.picks.clone(),
        })
    }

    async fn team_history(&self, team: u32) -> Result<TeamHistory> {
        let data = self.data.read();
        let entry = data
            .entries
            .get(&team)
            .ok_or(UpstreamError::MissingHistory { team })?;
        Ok(TeamHistory {
            chips: entry.chips.clone(),
        })
    }

    async fn refresh(&self) -> Result<()> {
        let fresh = Self::read(&self.path).await?;
        *self.data.write() = fresh;
        Ok(())
    }
}
