//! Response shapes for the fantasy API.

use serde::Deserialize;

use crate::domain::record::{ClubRecord, FixtureRecord, PeriodRecord, PlayerRecord, Snapshot};

/// `GET /bootstrap-static/`.
#[derive(Debug, Clone, Deserialize)]
pub struct Bootstrap {
    pub elements: Vec<PlayerRecord>,
    pub teams: Vec<ClubRecord>,
    #[serde(default)]
    pub events: Vec<PeriodRecord>,
}

impl Bootstrap {
    /// Join with the fixture list into a snapshot.
    pub fn into_snapshot(self, fixtures: Vec<FixtureRecord>) -> Snapshot {
        Snapshot {
            current_period: PeriodRecord::current(&self.events),
            players: self.elements,
            clubs: self.teams,
            fixtures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bootstrap_to_snapshot() {
        let json = r#"{
            "elements": [{"id": 1, "web_name": "Raya", "team": 1, "element_type": 1, "now_cost": 55}],
            "teams": [{"id": 1, "name": "Arsenal", "short_name": "ARS", "strength": 5}],
            "events": [
                {"id": 7, "is_current": false, "is_next": false, "finished": true},
                {"id": 8, "is_current": true, "is_next": false, "finished": false}
            ],
            "element_types": []
        }"#;
        let bootstrap: Bootstrap = serde_json::from_str(json).unwrap();
        let fixtures = vec![FixtureRecord {
            event: Some(8),
            team_h: 1,
            team_a: 2,
            team_h_difficulty: 3,
            team_a_difficulty: 4,
        }];

        let snapshot = bootstrap.into_snapshot(fixtures);
        assert_eq!(snapshot.current_period, 8);
        assert_eq!(snapshot.players.len(), 1);
        assert_eq!(snapshot.clubs[0].short_name, "ARS");
        assert_eq!(snapshot.fixtures.len(), 1);
    }
}
