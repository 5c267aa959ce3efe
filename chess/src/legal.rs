use crate::board::Board;
use crate::movegen;
use crate::moves::{self, Move};

/// Legality tester for moves
///
/// Holds a scratch copy of the board. Each candidate move is applied to the copy, the mover's king
/// is tested for check, and then the move is reverted. The source board is never modified.
#[derive(Clone, Debug)]
pub struct Checker {
    board: Board,
}

impl Checker {
    pub fn new(src: &Board) -> Self {
        Checker { board: src.clone() }
    }

    /// Returns the scratch board, which is equal to the source board between calls
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns `true` if the move `mv` doesn't leave the own king under attack
    ///
    /// The move must be pseudo-legal. If the source square of `mv` is empty, returns `false`.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        let team = match self.board.get_piece(mv.src()) {
            Some(p) => p.team(),
            None => return false,
        };

        #[cfg(feature = "selftest")]
        let before = self.board.clone();

        let u = moves::make_move_raw(&mut self.board, mv);
        let res = !movegen::is_in_check(&self.board, team);
        moves::unmake_move_raw(&mut self.board, mv, u);

        #[cfg(feature = "selftest")]
        assert_eq!(self.board, before, "board not restored after move {}", mv);

        res
    }
}
