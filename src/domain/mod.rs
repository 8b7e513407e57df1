//! Data-source-agnostic domain logic.

pub mod error;
mod ids;
mod money;
mod player;
mod position;
pub mod record;
pub mod score;
pub mod solver;
mod universe;

// Core domain types
pub use ids::{ClubId, PlayerId};
pub use money::Money;
pub use player::{Availability, Club, Fixture, Player, FULL_MATCH_MINUTES, MIN_CHANCE_OF_PLAYING};
pub use position::{PerPosition, Position, PositionCounts, Quota};

// Universe and scoring
pub use score::{HeuristicModel, Projection, ScoringConfig, ScoringModel};
pub use universe::{Universe, NEUTRAL_DIFFICULTY};
