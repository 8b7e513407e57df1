//! Domain errors for the player universe and the optimizers.
//!
//! These represent data-contract violations or invalid requests. Expected
//! optimization outcomes such as an infeasible budget are reported through
//! [`SolutionStatus`](crate::domain::solver::SolutionStatus) instead.
//!
//! # Examples
//!
//! ```
//! use gaffer::domain::error::DomainError;
//! use gaffer::domain::Position;
//!
//! let result = Position::from_code(7);
//! assert!(matches!(result, Err(DomainError::UnknownPosition { code: 7 })));
//! ```

use thiserror::Error;

use super::ids::{ClubId, PlayerId};

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Position codes are 1 (keeper) through 4 (forward).
    #[error("unknown position code {code}")]
    UnknownPosition {
        /// The code that was provided.
        code: u8,
    },

    /// A numeric field arrived as a string that does not parse.
    #[error("invalid number for {field} on player {player}: {value:?}")]
    InvalidNumber {
        /// The player whose record is malformed.
        player: PlayerId,
        /// Wire field name.
        field: &'static str,
        /// The raw value.
        value: String,
    },

    /// A referenced player is not part of the universe.
    #[error("player {0} is not in the universe")]
    UnknownPlayer(PlayerId),

    /// A player references a club that is not part of the universe.
    #[error("player {player} references unknown club {club}")]
    UnknownClub {
        /// The player carrying the reference.
        player: PlayerId,
        /// The missing club.
        club: ClubId,
    },

    /// The same player appears twice in one squad.
    #[error("player {0} appears more than once in the squad")]
    DuplicatePlayer(PlayerId),

    /// Lineup selection needs a full squad.
    #[error("squad must contain exactly {expected} players, got {actual}")]
    InvalidSquadSize {
        /// Required squad size.
        expected: usize,
        /// Provided squad size.
        actual: usize,
    },

    /// Budgets are positive amounts in tenths.
    #[error("budget must be positive, got {0}")]
    InvalidBudget(i64),

    /// Projection horizons are at least one period.
    #[error("horizon must be at least 1 period, got {0}")]
    InvalidHorizon(u32),

    /// A transfer search must ask for at least one swap.
    #[error("number of transfers must be at least 1, got {0}")]
    InvalidTransferCount(u32),

    /// Captaincy needs at least one player to choose from.
    #[error("squad is empty")]
    EmptySquad,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_number_message_names_field() {
        let err = DomainError::InvalidNumber {
            player: PlayerId::new(12),
            field: "form",
            value: "abc".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid number for form on player 12: \"abc\""
        );
    }

    #[test]
    fn squad_size_message() {
        let err = DomainError::InvalidSquadSize {
            expected: 15,
            actual: 14,
        };
        assert_eq!(err.to_string(), "squad must contain exactly 15 players, got 14");
    }
}
