//! Players, clubs and fixtures as held in the universe arena.

use serde::{Deserialize, Serialize};

use super::ids::{ClubId, PlayerId};
use super::position::Position;

/// Minimum chance of playing (percent) for a flagged player to stay selectable.
pub const MIN_CHANCE_OF_PLAYING: u8 = 75;

/// Minutes in a full match.
pub const FULL_MATCH_MINUTES: f64 = 90.0;

/// Availability status as published by the data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Doubtful,
    Injured,
    Suspended,
    Unavailable,
    NotInSquad,
}

impl Availability {
    /// Parse a status letter (`a`, `d`, `i`, `s`, `u`, `n`).
    ///
    /// Anything unrecognised is treated as unavailable.
    pub fn from_status(status: &str) -> Self {
        match status {
            "a" => Availability::Available,
            "d" => Availability::Doubtful,
            "i" => Availability::Injured,
            "s" => Availability::Suspended,
            "n" => Availability::NotInSquad,
            _ => Availability::Unavailable,
        }
    }
}

/// A player snapshot. Immutable for the lifetime of a [`Universe`](super::Universe).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub club: ClubId,
    pub position: Position,
    /// Price in tenths of a currency unit.
    pub cost: u32,
    pub availability: Availability,
    /// Percent chance of playing next period; `None` means no flag.
    pub chance_next: Option<u8>,
    pub form: f64,
    pub points_per_period: f64,
    pub next_estimate: f64,
    pub minutes: u32,
    pub starts: u32,
    pub clean_sheets: u32,
    pub threat: f64,
    /// Percent of managers who own the player.
    pub ownership: f64,
    pub total_points: i32,
}

impl Player {
    /// Whether the optimizers may pick this player.
    pub fn is_selectable(&self) -> bool {
        self.availability == Availability::Available
            && self
                .chance_next
                .map_or(true, |chance| chance >= MIN_CHANCE_OF_PLAYING)
    }

    /// Share of available minutes actually played, capped at 1.
    ///
    /// A player with no starts is measured against a single match.
    pub fn minutes_ratio(&self) -> f64 {
        let starts = self.starts.max(1) as f64;
        (self.minutes as f64 / (FULL_MATCH_MINUTES * starts)).min(1.0)
    }
}

/// A club; used for names and the per-club cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    pub short_name: String,
}

/// A scheduled match. Difficulty ratings run from 1 (easy) to 5 (hard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fixture {
    /// Scheduling period; `None` while the match is unscheduled.
    pub period: Option<u32>,
    pub home: ClubId,
    pub away: ClubId,
    pub home_difficulty: u8,
    pub away_difficulty: u8,
}

impl Fixture {
    pub fn involves(&self, club: ClubId) -> bool {
        self.home == club || self.away == club
    }

    /// Difficulty rating for `club`'s side of this fixture.
    pub fn difficulty_for(&self, club: ClubId) -> Option<u8> {
        if self.home == club {
            Some(self.home_difficulty)
        } else if self.away == club {
            Some(self.away_difficulty)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(availability: Availability, chance_next: Option<u8>) -> Player {
        Player {
            id: PlayerId::new(1),
            name: "Test".into(),
            club: ClubId::new(1),
            position: Position::Midfielder,
            cost: 50,
            availability,
            chance_next,
            form: 0.0,
            points_per_period: 0.0,
            next_estimate: 0.0,
            minutes: 0,
            starts: 0,
            clean_sheets: 0,
            threat: 0.0,
            ownership: 0.0,
            total_points: 0,
        }
    }

    #[test]
    fn selectable_requires_available_status() {
        assert!(player(Availability::Available, None).is_selectable());
        assert!(!player(Availability::Doubtful, None).is_selectable());
        assert!(!player(Availability::Injured, Some(100)).is_selectable());
    }

    #[test]
    fn selectable_respects_chance_threshold() {
        assert!(player(Availability::Available, Some(75)).is_selectable());
        assert!(player(Availability::Available, Some(100)).is_selectable());
        assert!(!player(Availability::Available, Some(50)).is_selectable());
    }

    #[test]
    fn minutes_ratio_is_capped() {
        let mut p = player(Availability::Available, None);
        p.minutes = 900;
        p.starts = 10;
        assert!((p.minutes_ratio() - 1.0).abs() < 1e-9);

        p.minutes = 450;
        assert!((p.minutes_ratio() - 0.5).abs() < 1e-9);

        // Substitute appearances only: measured against one match.
        p.minutes = 45;
        p.starts = 0;
        assert!((p.minutes_ratio() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn status_letters() {
        assert_eq!(Availability::from_status("a"), Availability::Available);
        assert_eq!(Availability::from_status("d"), Availability::Doubtful);
        assert_eq!(Availability::from_status("?"), Availability::Unavailable);
    }

    #[test]
    fn fixture_difficulty_by_side() {
        let fixture = Fixture {
            period: Some(3),
            home: ClubId::new(1),
            away: ClubId::new(2),
            home_difficulty: 2,
            away_difficulty: 4,
        };
        assert_eq!(fixture.difficulty_for(ClubId::new(1)), Some(2));
        assert_eq!(fixture.difficulty_for(ClubId::new(2)), Some(4));
        assert_eq!(fixture.difficulty_for(ClubId::new(3)), None);
    }
}
