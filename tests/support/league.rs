use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gaffer::domain::{
    Availability, Club, ClubId, Fixture, PerPosition, Player, PlayerId, Position, Universe,
};

use super::model::FixedModel;

pub fn make_player(id: u32, club: u32, position: Position, cost: u32) -> Player {
    Player {
        id: PlayerId::new(id),
        name: format!("Player {id}"),
        club: ClubId::new(club),
        position,
        cost,
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

pub fn make_clubs(count: u32) -> Vec<Club> {
    (1..=count)
        .map(|id| Club {
            id: ClubId::new(id),
            name: format!("Club {id}"),
            short_name: format!("C{id:02}"),
        })
        .collect()
}

pub fn make_fixture(period: u32, home: u32, away: u32, difficulty: u8) -> Fixture {
    Fixture {
        period: Some(period),
        home: ClubId::new(home),
        away: ClubId::new(away),
        home_difficulty: difficulty,
        away_difficulty: difficulty,
    }
}

pub fn make_universe(players: Vec<Player>, clubs: u32) -> Universe {
    Universe::new(players, make_clubs(clubs), Vec::new(), 1).expect("valid universe")
}

/// A seeded random league paired with a fixed-rate model.
pub struct League {
    pub universe: Universe,
    pub model: FixedModel,
}

impl League {
    /// `per_club` players of each position at every club, costs in
    /// `costs`, rates in `0..10`.
    pub fn random(
        seed: u64,
        clubs: u32,
        per_club: PerPosition<u32>,
        costs: std::ops::RangeInclusive<u32>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut players = Vec::new();
        let mut rates = HashMap::new();
        let mut next_id = 1;

        for club in 1..=clubs {
            for (position, count) in per_club.iter() {
                for _ in 0..*count {
                    let cost = rng.gen_range(costs.clone());
                    players.push(make_player(next_id, club, position, cost));
                    rates.insert(PlayerId::new(next_id), rng.gen_range(0.0..10.0));
                    next_id += 1;
                }
            }
        }

        Self {
            universe: make_universe(players, clubs),
            model: FixedModel::new(rates),
        }
    }

    /// A full-size league: ten clubs with two keepers, four defenders, four
    /// midfielders and three forwards each.
    pub fn full(seed: u64) -> Self {
        Self::random(seed, 10, PerPosition::new(2, 4, 4, 3), 40..=110)
    }

    pub fn rate(&self, id: PlayerId) -> f64 {
        self.model.rate(id)
    }
}

/// All `k`-element index subsets of `0..n`, in lexicographic order.
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(start: usize, n: usize, k: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if current.len() == k {
            out.push(current.clone());
            return;
        }
        for i in start..n {
            if n - i < k - current.len() {
                break;
            }
            current.push(i);
            extend(i + 1, n, k, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(0, n, k, &mut Vec::with_capacity(k), &mut out);
    out
}
