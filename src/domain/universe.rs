//! The player universe: a read-only arena with index maps.
//!
//! Built once per load from a [`Snapshot`]. All optimizers borrow it; nothing
//! mutates it afterwards, so a `Universe` can be shared across threads.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::error::DomainError;
use super::ids::{ClubId, PlayerId};
use super::player::{Availability, Club, Fixture, Player};
use super::position::{PerPosition, Position};
use super::record::{PlayerRecord, Snapshot};

/// Rating used when a club has no fixture in the window.
pub const NEUTRAL_DIFFICULTY: f64 = 3.0;

/// Immutable snapshot of players, clubs and fixtures.
#[derive(Debug, Clone)]
pub struct Universe {
    players: Vec<Player>,
    clubs: Vec<Club>,
    fixtures: Vec<Fixture>,
    current_period: u32,
    player_index: HashMap<PlayerId, usize>,
    club_index: HashMap<ClubId, usize>,
    by_position: PerPosition<Vec<usize>>,
    by_club: HashMap<ClubId, Vec<usize>>,
}

impl Universe {
    /// Build a universe from typed parts, indexing them.
    pub fn new(
        players: Vec<Player>,
        clubs: Vec<Club>,
        fixtures: Vec<Fixture>,
        current_period: u32,
    ) -> Result<Self, DomainError> {
        let club_index: HashMap<ClubId, usize> =
            clubs.iter().enumerate().map(|(i, c)| (c.id, i)).collect();

        let mut player_index = HashMap::with_capacity(players.len());
        let mut by_position: PerPosition<Vec<usize>> = PerPosition::default();
        let mut by_club: HashMap<ClubId, Vec<usize>> = HashMap::new();

        for (i, player) in players.iter().enumerate() {
            if !club_index.contains_key(&player.club) {
                return Err(DomainError::UnknownClub {
                    player: player.id,
                    club: player.club,
                });
            }
            if player_index.insert(player.id, i).is_some() {
                return Err(DomainError::DuplicatePlayer(player.id));
            }
            by_position[player.position].push(i);
            by_club.entry(player.club).or_default().push(i);
        }

        debug!(
            players = players.len(),
            clubs = clubs.len(),
            fixtures = fixtures.len(),
            current_period,
            "Universe indexed"
        );

        Ok(Self {
            players,
            clubs,
            fixtures,
            current_period,
            player_index,
            club_index,
            by_position,
            by_club,
        })
    }

    /// Convert boundary records into a universe.
    ///
    /// Malformed numeric strings are a data-contract violation and are
    /// returned as errors rather than guessed around.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, DomainError> {
        let clubs = snapshot
            .clubs
            .into_iter()
            .map(|c| Club {
                id: ClubId::new(c.id),
                short_name: if c.short_name.is_empty() {
                    c.name.clone()
                } else {
                    c.short_name
                },
                name: c.name,
            })
            .collect();

        let players = snapshot
            .players
            .into_iter()
            .map(player_from_record)
            .collect::<Result<Vec<_>, _>>()?;

        let fixtures = snapshot
            .fixtures
            .into_iter()
            .map(|f| Fixture {
                period: f.event,
                home: ClubId::new(f.team_h),
                away: ClubId::new(f.team_a),
                home_difficulty: f.team_h_difficulty,
                away_difficulty: f.team_a_difficulty,
            })
            .collect();

        Self::new(players, clubs, fixtures, snapshot.current_period)
    }

    pub fn current_period(&self) -> u32 {
        self.current_period
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn clubs(&self) -> &[Club] {
        &self.clubs
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.player_index.get(&id).map(|&i| &self.players[i])
    }

    pub fn club(&self, id: ClubId) -> Option<&Club> {
        self.club_index.get(&id).map(|&i| &self.clubs[i])
    }

    /// Club display name, or an empty string for an unknown club.
    pub fn club_name(&self, id: ClubId) -> &str {
        self.club(id).map_or("", |c| c.name.as_str())
    }

    pub fn by_position(&self, position: Position) -> impl Iterator<Item = &Player> {
        self.by_position[position].iter().map(|&i| &self.players[i])
    }

    pub fn by_club(&self, club: ClubId) -> impl Iterator<Item = &Player> {
        self.by_club
            .get(&club)
            .into_iter()
            .flatten()
            .map(|&i| &self.players[i])
    }

    /// Look up every id, failing on the first unknown or repeated one.
    pub fn resolve(&self, ids: &[PlayerId]) -> Result<Vec<&Player>, DomainError> {
        let mut seen = HashSet::with_capacity(ids.len());
        ids.iter()
            .map(|&id| {
                if !seen.insert(id) {
                    return Err(DomainError::DuplicatePlayer(id));
                }
                self.player(id).ok_or(DomainError::UnknownPlayer(id))
            })
            .collect()
    }

    /// Mean difficulty of `club`'s fixtures over the next `horizon` periods.
    pub fn fixture_difficulty(&self, club: ClubId, horizon: u32) -> f64 {
        let start = self.current_period;
        let end = start.saturating_add(horizon);
        let ratings: Vec<f64> = self
            .fixtures
            .iter()
            .filter(|f| f.period.is_some_and(|p| p >= start && p < end))
            .filter_map(|f| f.difficulty_for(club))
            .map(f64::from)
            .collect();

        if ratings.is_empty() {
            NEUTRAL_DIFFICULTY
        } else {
            ratings.iter().sum::<f64>() / ratings.len() as f64
        }
    }

    /// Number of fixtures `club` plays in `period`.
    pub fn fixtures_in(&self, club: ClubId, period: u32) -> usize {
        self.fixtures
            .iter()
            .filter(|f| f.period == Some(period) && f.involves(club))
            .count()
    }

    /// Clubs playing more than once in `period`.
    pub fn double_clubs(&self, period: u32) -> HashSet<ClubId> {
        self.clubs
            .iter()
            .map(|c| c.id)
            .filter(|&id| self.fixtures_in(id, period) >= 2)
            .collect()
    }
}

fn player_from_record(record: PlayerRecord) -> Result<Player, DomainError> {
    let id = PlayerId::new(record.id);
    let number = |field: &'static str, value: &Option<String>| -> Result<f64, DomainError> {
        match value.as_deref().map(str::trim) {
            None | Some("") => Ok(0.0),
            Some(raw) => raw.parse::<f64>().map_err(|_| DomainError::InvalidNumber {
                player: id,
                field,
                value: raw.to_string(),
            }),
        }
    };

    Ok(Player {
        id,
        club: ClubId::new(record.team),
        position: Position::from_code(record.element_type)?,
        cost: record.now_cost,
        availability: Availability::from_status(&record.status),
        chance_next: record.chance_of_playing_next_round,
        form: number("form", &record.form)?,
        points_per_period: number("points_per_game", &record.points_per_game)?,
        next_estimate: number("ep_next", &record.ep_next)?,
        minutes: record.minutes,
        starts: record.starts,
        clean_sheets: record.clean_sheets,
        threat: number("threat", &record.threat)?,
        ownership: number("selected_by_percent", &record.selected_by_percent)?,
        total_points: record.total_points,
        name: record.web_name,
    })
}
