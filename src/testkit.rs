//! Builders shared by unit tests.
//!
//! A squad here is always ids 1 to 15 laid out as keepers 1-2, defenders
//! 3-7, midfielders 8-12 and forwards 13-15, each at the club with the same
//! id.

use std::collections::HashMap;

use crate::domain::{
    Availability, Club, ClubId, Fixture, Player, PlayerId, Position, Projection, ScoringModel,
    Universe,
};

pub fn player(id: u32, club: u32, position: Position) -> Player {
    Player {
        id: PlayerId::new(id),
        name: format!("Player {id}"),
        club: ClubId::new(club),
        position,
        cost: 50,
        availability: Availability::Available,
        chance_next: None,
        form: 4.0,
        points_per_period: 4.0,
        next_estimate: 4.0,
        minutes: 900,
        starts: 10,
        clean_sheets: 2,
        threat: 50.0,
        ownership: 10.0,
        total_points: 40,
    }
}

pub fn clubs(count: u32) -> Vec<Club> {
    (1..=count)
        .map(|id| Club {
            id: ClubId::new(id),
            name: format!("Club {id}"),
            short_name: format!("C{id:02}"),
        })
        .collect()
}

pub fn fixture(period: u32, home: u32, away: u32, difficulty: u8) -> Fixture {
    Fixture {
        period: Some(period),
        home: ClubId::new(home),
        away: ClubId::new(away),
        home_difficulty: difficulty,
        away_difficulty: difficulty,
    }
}

pub fn position_of(id: u32) -> Position {
    match id {
        1..=2 => Position::Keeper,
        3..=7 => Position::Defender,
        8..=12 => Position::Midfielder,
        _ => Position::Forward,
    }
}

/// The standard squad across twenty clubs, current period 1.
pub fn squad_universe(fixtures: Vec<Fixture>) -> Universe {
    let players = squad_ids()
        .iter()
        .map(|id| player(id.get(), id.get(), position_of(id.get())))
        .collect();
    Universe::new(players, clubs(20), fixtures, 1).expect("valid universe")
}

pub fn squad_ids() -> Vec<PlayerId> {
    (1..=15).map(PlayerId::new).collect()
}

/// Fixed points per period, with fixture difficulty read from the universe.
#[derive(Debug, Clone)]
pub struct RateModel {
    rates: HashMap<PlayerId, f64>,
    default_rate: f64,
}

impl RateModel {
    pub fn uniform(rate: f64) -> Self {
        Self {
            rates: HashMap::new(),
            default_rate: rate,
        }
    }

    pub fn with(mut self, id: u32, rate: f64) -> Self {
        self.rates.insert(PlayerId::new(id), rate);
        self
    }
}

impl ScoringModel for RateModel {
    fn name(&self) -> &'static str {
        "rates"
    }

    fn project(&self, universe: &Universe, player: &Player, horizon: u32) -> Projection {
        let rate = self.rates.get(&player.id).copied().unwrap_or(self.default_rate);
        Projection {
            points: rate * f64::from(horizon),
            fixture_difficulty: universe.fixture_difficulty(player.club, horizon),
            availability: 1.0,
        }
    }
}
