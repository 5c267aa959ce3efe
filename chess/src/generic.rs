use crate::movegen::{MaybeMovePush, Stepper};
use crate::types::PieceKind;
use chessrules_base::geometry;

/// How a piece walks along each of its directions
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum StepMode {
    /// One square, landing on an empty square or an enemy piece
    Single,
    /// Repeated single steps until the board edge, a friendly piece or a capture
    Ray,
    /// Non-capturing forward steps plus diagonal captures
    Pawn,
}

/// Movement pattern of one piece kind
pub(crate) trait Pattern {
    const KIND: PieceKind;
    const MODE: StepMode;
    const DIRECTIONS: &'static [(i8, i8)];

    fn gen<P: MaybeMovePush>(s: &mut Stepper<'_, P>) -> Result<(), P::Err> {
        match Self::MODE {
            StepMode::Single => {
                for &(d_row, d_col) in Self::DIRECTIONS {
                    s.single(d_row, d_col)?;
                }
            }
            StepMode::Ray => {
                for &(d_row, d_col) in Self::DIRECTIONS {
                    s.ray(d_row, d_col)?;
                }
            }
            StepMode::Pawn => s.pawn()?,
        }
        Ok(())
    }
}

/// Generates the moves of the piece under the stepper, using pattern `T`
#[inline]
pub(crate) fn gen_with<T: Pattern, P: MaybeMovePush>(
    s: &mut Stepper<'_, P>,
) -> Result<(), P::Err> {
    debug_assert_eq!(s.piece().kind(), T::KIND);
    T::gen(s)
}

pub(crate) struct King;
pub(crate) struct Queen;
pub(crate) struct Bishop;
pub(crate) struct Knight;
pub(crate) struct Rook;
pub(crate) struct Pawn;

impl Pattern for King {
    const KIND: PieceKind = PieceKind::King;
    const MODE: StepMode = StepMode::Single;
    const DIRECTIONS: &'static [(i8, i8)] = &geometry::ALL_DIRECTIONS;
}

impl Pattern for Queen {
    const KIND: PieceKind = PieceKind::Queen;
    const MODE: StepMode = StepMode::Ray;
    const DIRECTIONS: &'static [(i8, i8)] = &geometry::ALL_DIRECTIONS;
}

impl Pattern for Bishop {
    const KIND: PieceKind = PieceKind::Bishop;
    const MODE: StepMode = StepMode::Ray;
    const DIRECTIONS: &'static [(i8, i8)] = &geometry::DIAGONALS;
}

impl Pattern for Knight {
    const KIND: PieceKind = PieceKind::Knight;
    const MODE: StepMode = StepMode::Single;
    const DIRECTIONS: &'static [(i8, i8)] = &geometry::KNIGHT_JUMPS;
}

impl Pattern for Rook {
    const KIND: PieceKind = PieceKind::Rook;
    const MODE: StepMode = StepMode::Ray;
    const DIRECTIONS: &'static [(i8, i8)] = &geometry::ORTHOGONALS;
}

impl Pattern for Pawn {
    const KIND: PieceKind = PieceKind::Pawn;
    const MODE: StepMode = StepMode::Pawn;
    // Pawn directions depend on the team, see `Stepper::pawn()`
    const DIRECTIONS: &'static [(i8, i8)] = &[];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns() {
        assert_eq!(King::DIRECTIONS.len(), 8);
        assert_eq!(Queen::DIRECTIONS, King::DIRECTIONS);
        assert_eq!(Bishop::DIRECTIONS.len() + Rook::DIRECTIONS.len(), 8);
        assert_eq!(Knight::DIRECTIONS.len(), 8);
        assert!(Pawn::DIRECTIONS.is_empty());
        assert_eq!(Knight::MODE, StepMode::Single);
        assert_eq!(Rook::MODE, StepMode::Ray);
        assert_eq!(Pawn::KIND, PieceKind::Pawn);
    }
}
