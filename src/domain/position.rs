//! Playing positions and per-position count bounds.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A player's position. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Keeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::Keeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// Parse the data source's `element_type` code (1..=4).
    pub fn from_code(code: u8) -> Result<Self, DomainError> {
        match code {
            1 => Ok(Position::Keeper),
            2 => Ok(Position::Defender),
            3 => Ok(Position::Midfielder),
            4 => Ok(Position::Forward),
            _ => Err(DomainError::UnknownPosition { code }),
        }
    }

    pub const fn code(self) -> u8 {
        self as u8 + 1
    }

    /// Short label used in tables.
    pub const fn abbrev(self) -> &'static str {
        match self {
            Position::Keeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Plural heading used when grouping players.
    pub const fn plural(self) -> &'static str {
        match self {
            Position::Keeper => "Goalkeepers",
            Position::Defender => "Defenders",
            Position::Midfielder => "Midfielders",
            Position::Forward => "Forwards",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Inclusive `[min, max]` bound on how many players of a position to pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quota {
    pub min: u32,
    pub max: u32,
}

impl Quota {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub const fn exactly(count: u32) -> Self {
        Self::new(count, count)
    }

    pub const fn contains(&self, count: u32) -> bool {
        count >= self.min && count <= self.max
    }
}

/// A value per position, indexable by [`Position`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerPosition<T> {
    pub keeper: T,
    pub defender: T,
    pub midfielder: T,
    pub forward: T,
}

impl<T> PerPosition<T> {
    pub const fn new(keeper: T, defender: T, midfielder: T, forward: T) -> Self {
        Self {
            keeper,
            defender,
            midfielder,
            forward,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> {
        Position::ALL.into_iter().map(move |p| (p, &self[p]))
    }
}

impl<T> Index<Position> for PerPosition<T> {
    type Output = T;

    fn index(&self, position: Position) -> &T {
        match position.index() {
            0 => &self.keeper,
            1 => &self.defender,
            2 => &self.midfielder,
            _ => &self.forward,
        }
    }
}

impl<T> IndexMut<Position> for PerPosition<T> {
    fn index_mut(&mut self, position: Position) -> &mut T {
        match position.index() {
            0 => &mut self.keeper,
            1 => &mut self.defender,
            2 => &mut self.midfielder,
            _ => &mut self.forward,
        }
    }
}

/// Number of players per position.
pub type PositionCounts = PerPosition<u32>;

impl PositionCounts {
    /// Count positions over any iterator of positions.
    pub fn tally(positions: impl IntoIterator<Item = Position>) -> Self {
        let mut counts = Self::default();
        for p in positions {
            counts[p] += 1;
        }
        counts
    }

    pub fn total(&self) -> u32 {
        self.keeper + self.defender + self.midfielder + self.forward
    }

    /// Whether every position count lies within its quota.
    pub fn within(&self, quotas: &PerPosition<Quota>) -> bool {
        self.iter().all(|(p, count)| quotas[p].contains(*count))
    }

    /// Formation label: defenders-midfielders-forwards.
    pub fn formation(&self) -> String {
        format!("{}-{}-{}", self.defender, self.midfielder, self.forward)
    }
}
