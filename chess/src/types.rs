//! Core chess types

pub use chessrules_base::types::{
    Piece, PieceKind, PieceParseError, Position, PositionParseError, PositionRangeError, Team,
    TeamParseError,
};

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Final result of the game
///
/// The engine never stops the game by itself; the outcome is only reported on request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Outcome {
    /// The side to move is checkmated
    Checkmate { winner: Team },
    /// The side to move is not in check, but has no legal moves
    Stalemate,
}

impl Outcome {
    /// Returns the winner, or `None` in case of a draw
    #[inline]
    pub fn winner(&self) -> Option<Team> {
        match *self {
            Outcome::Checkmate { winner } => Some(winner),
            Outcome::Stalemate => None,
        }
    }

    /// Returns `true` if the game ended in a draw
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.winner().is_none()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Outcome::Checkmate { winner } => write!(f, "{} wins by checkmate", winner),
            Outcome::Stalemate => write!(f, "draw by stalemate"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome() {
        let o = Outcome::Checkmate {
            winner: Team::Black,
        };
        assert_eq!(o.winner(), Some(Team::Black));
        assert!(!o.is_draw());
        assert_eq!(o.to_string(), "black wins by checkmate");

        assert_eq!(Outcome::Stalemate.winner(), None);
        assert!(Outcome::Stalemate.is_draw());
        assert_eq!(Outcome::Stalemate.to_string(), "draw by stalemate");
    }
}
