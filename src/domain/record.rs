//! Boundary records supplied by the data source.
//!
//! Field names follow the public fantasy API so records deserialize straight
//! from its JSON. Numeric fields the API publishes as decimal strings stay
//! strings here; [`Universe::from_snapshot`](super::Universe::from_snapshot)
//! parses them and treats absent or null values as zero.

use serde::{Deserialize, Serialize};

fn default_status() -> String {
    "a".into()
}

/// One player as published by the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub id: u32,
    #[serde(default)]
    pub web_name: String,
    pub team: u32,
    pub element_type: u8,
    pub now_cost: u32,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub chance_of_playing_next_round: Option<u8>,
    #[serde(default)]
    pub form: Option<String>,
    #[serde(default)]
    pub points_per_game: Option<String>,
    #[serde(default)]
    pub ep_next: Option<String>,
    #[serde(default)]
    pub minutes: u32,
    #[serde(default)]
    pub starts: u32,
    #[serde(default)]
    pub selected_by_percent: Option<String>,
    #[serde(default)]
    pub clean_sheets: u32,
    #[serde(default)]
    pub threat: Option<String>,
    #[serde(default)]
    pub total_points: i32,
}

/// One club.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRecord {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub short_name: String,
}

/// One fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureRecord {
    #[serde(default)]
    pub event: Option<u32>,
    pub team_h: u32,
    pub team_a: u32,
    pub team_h_difficulty: u8,
    pub team_a_difficulty: u8,
}

/// One scheduling period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub id: u32,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub is_next: bool,
}

impl PeriodRecord {
    /// The current period, else the next one, else 1.
    pub fn current(periods: &[PeriodRecord]) -> u32 {
        periods
            .iter()
            .find(|p| p.is_current)
            .or_else(|| periods.iter().find(|p| p.is_next))
            .map_or(1, |p| p.id)
    }
}

/// Everything needed to build a [`Universe`](super::Universe).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(alias = "elements")]
    pub players: Vec<PlayerRecord>,
    #[serde(alias = "teams")]
    pub clubs: Vec<ClubRecord>,
    #[serde(default)]
    pub fixtures: Vec<FixtureRecord>,
    pub current_period: u32,
}

/// A pick in a manager's squad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickRecord {
    pub element: u32,
}

/// A manager's squad for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquadPicks {
    pub picks: Vec<PickRecord>,
}

impl SquadPicks {
    pub fn player_ids(&self) -> Vec<super::PlayerId> {
        self.picks
            .iter()
            .map(|p| super::PlayerId::new(p.element))
            .collect()
    }
}

/// A one-off strategic action already played.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipUse {
    pub name: String,
    #[serde(default)]
    pub event: Option<u32>,
}

/// A manager's season history; only chip usage matters here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamHistory {
    #[serde(default)]
    pub chips: Vec<ChipUse>,
}

impl TeamHistory {
    /// Names of chips already played, as the source spells them.
    pub fn chip_names(&self) -> Vec<String> {
        self.chips.iter().map(|c| c.name.clone()).collect()
    }
}
