use std::collections::HashMap;

use gaffer::domain::{ClubId, PositionCounts};
use gaffer::optimizer::{PickedPlayer, SquadRules};

pub fn assert_near(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Checks size, quotas and the club cap for a selected squad.
pub fn assert_valid_squad(players: &[PickedPlayer], rules: &SquadRules, budget: i64) {
    assert_eq!(players.len(), rules.size as usize, "squad size");

    let cost: i64 = players.iter().map(|p| i64::from(p.cost)).sum();
    assert!(cost <= budget, "cost {cost} exceeds budget {budget}");

    let counts = PositionCounts::tally(players.iter().map(|p| p.position));
    assert!(counts.within(&rules.quotas), "quotas violated: {counts:?}");

    let mut clubs: HashMap<ClubId, u32> = HashMap::new();
    for player in players {
        *clubs.entry(player.club_id).or_default() += 1;
    }
    for (club, count) in clubs {
        assert!(
            count <= rules.max_per_club,
            "club {club} has {count} players"
        );
    }
}
