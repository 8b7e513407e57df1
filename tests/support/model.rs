use std::collections::HashMap;

use gaffer::domain::{Player, PlayerId, Projection, ScoringModel, Universe, NEUTRAL_DIFFICULTY};

/// Scores each player at a fixed rate per period.
///
/// Lets tests compare the optimizers against hand-computed or brute-force
/// answers without reasoning about the heuristic.
#[derive(Debug, Clone, Default)]
pub struct FixedModel {
    rates: HashMap<PlayerId, f64>,
}

impl FixedModel {
    pub fn new(rates: HashMap<PlayerId, f64>) -> Self {
        Self { rates }
    }

    pub fn with(mut self, id: u32, rate: f64) -> Self {
        self.rates.insert(PlayerId::new(id), rate);
        self
    }

    pub fn rate(&self, id: PlayerId) -> f64 {
        self.rates.get(&id).copied().unwrap_or(0.0)
    }
}

impl ScoringModel for FixedModel {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn project(&self, _universe: &Universe, player: &Player, horizon: u32) -> Projection {
        Projection {
            points: self.rate(player.id) * f64::from(horizon),
            fixture_difficulty: NEUTRAL_DIFFICULTY,
            availability: 1.0,
        }
    }
}
