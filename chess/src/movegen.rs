use crate::board::Board;
use crate::generic;
use crate::legal::Checker;
use crate::moves::{Move, PromotePiece};
use crate::types::{Piece, PieceKind, Position, Team};
use chessrules_base::geometry;

use std::convert::Infallible;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;

/// Move sink which may stop the generation early by returning an error
pub trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

/// Move sink which accepts all the moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

/// Upper bound on the number of moves of one team on any board
///
/// A queen has at most 27 moves, and no other piece has more. The board may hold any placement,
/// so the bound assumes a piece with 27 moves on each of the 64 squares.
pub const MAX_MOVES: usize = 64 * 27;

#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, MAX_MOVES>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, MAX_MOVES>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = arrayvec::IntoIter<Move, MAX_MOVES>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        ArrayVec::push(self, m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        Vec::push(self, m);
    }
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

/// Directional stepping over the board for a single piece
///
/// Every generated move goes to the underlying sink as is, so the moves are pseudo-legal.
pub(crate) struct Stepper<'a, P> {
    board: &'a Board,
    src: Position,
    piece: Piece,
    dst: &'a mut P,
}

impl<'a, P: MaybeMovePush> Stepper<'a, P> {
    fn new(board: &'a Board, src: Position, piece: Piece, dst: &'a mut P) -> Self {
        Stepper {
            board,
            src,
            piece,
            dst,
        }
    }

    pub(crate) fn piece(&self) -> Piece {
        self.piece
    }

    fn is_enemy(&self, pos: Position) -> bool {
        matches!(self.board.get_piece(pos), Some(p) if p.team() != self.piece.team())
    }

    /// Makes one step from `from` and returns the reached square if the walk can go on
    fn step_from(
        &mut self,
        from: Position,
        d_row: i8,
        d_col: i8,
    ) -> Result<Option<Position>, P::Err> {
        let dst = match from.try_shift(d_row, d_col) {
            Some(dst) => dst,
            None => return Ok(None),
        };
        match self.board.get_piece(dst) {
            None => {
                self.dst.push(Move::new(self.src, dst))?;
                Ok(Some(dst))
            }
            Some(p) if p.team() != self.piece.team() => {
                self.dst.push(Move::new(self.src, dst))?;
                Ok(None)
            }
            Some(_) => Ok(None),
        }
    }

    pub(crate) fn single(&mut self, d_row: i8, d_col: i8) -> Result<(), P::Err> {
        self.step_from(self.src, d_row, d_col)?;
        Ok(())
    }

    pub(crate) fn ray(&mut self, d_row: i8, d_col: i8) -> Result<(), P::Err> {
        let mut cur = self.src;
        while let Some(next) = self.step_from(cur, d_row, d_col)? {
            cur = next;
        }
        Ok(())
    }

    fn add_pawn_with_promote(&mut self, dst: Position) -> Result<(), P::Err> {
        if dst.row() == geometry::promote_row(self.piece.team()) {
            for p in PromotePiece::ALL {
                self.dst.push(Move::with_promote(self.src, dst, p))?;
            }
        } else {
            self.dst.push(Move::new(self.src, dst))?;
        }
        Ok(())
    }

    pub(crate) fn pawn(&mut self) -> Result<(), P::Err> {
        let team = self.piece.team();
        let forward = geometry::pawn_forward_delta(team);

        if let Some(one) = self.src.try_shift(forward, 0) {
            if self.board.get_piece(one).is_none() {
                self.add_pawn_with_promote(one)?;
                if self.src.row() == geometry::pawn_start_row(team) {
                    if let Some(two) = self.src.try_shift(2 * forward, 0) {
                        if self.board.get_piece(two).is_none() {
                            self.dst.push(Move::new(self.src, two))?;
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            if let Some(dst) = self.src.try_shift(forward, d_col) {
                if self.is_enemy(dst) {
                    self.add_pawn_with_promote(dst)?;
                }
            }
        }
        Ok(())
    }
}

fn do_gen_piece<P: MaybeMovePush>(b: &Board, src: Position, dst: &mut P) -> Result<(), P::Err> {
    let piece = match b.get_piece(src) {
        Some(p) => p,
        None => return Ok(()),
    };
    let mut s = Stepper::new(b, src, piece, dst);
    match piece.kind() {
        PieceKind::King => generic::gen_with::<generic::King, _>(&mut s),
        PieceKind::Queen => generic::gen_with::<generic::Queen, _>(&mut s),
        PieceKind::Bishop => generic::gen_with::<generic::Bishop, _>(&mut s),
        PieceKind::Knight => generic::gen_with::<generic::Knight, _>(&mut s),
        PieceKind::Rook => generic::gen_with::<generic::Rook, _>(&mut s),
        PieceKind::Pawn => generic::gen_with::<generic::Pawn, _>(&mut s),
    }
}

fn do_gen_team<P: MaybeMovePush>(b: &Board, t: Team, dst: &mut P) -> Result<(), P::Err> {
    for (src, _) in b.pieces(t) {
        do_gen_piece(b, src, dst)?;
    }
    Ok(())
}

/// Sink which fails as soon as a move lands on the given square
struct HitProbe(Position);

impl MaybeMovePush for HitProbe {
    type Err = ();

    fn push(&mut self, m: Move) -> Result<(), ()> {
        if m.dst() == self.0 {
            return Err(());
        }
        Ok(())
    }
}

/// Returns `true` if any piece of team `by` has a pseudo-legal move ending on `pos`
pub fn is_cell_attacked(b: &Board, pos: Position, by: Team) -> bool {
    let mut probe = HitProbe(pos);
    do_gen_team(b, by, &mut probe).is_err()
}

/// Returns the squares of all the pieces of team `by` which have a pseudo-legal move ending on `pos`
pub fn cell_attackers(b: &Board, pos: Position, by: Team) -> Vec<Position> {
    b.pieces(by)
        .filter(|&(src, _)| do_gen_piece(b, src, &mut HitProbe(pos)).is_err())
        .map(|(src, _)| src)
        .collect()
}

/// Returns `true` if the king of team `t` is under attack
///
/// Only pseudo-legal moves of the opponent are considered, as in the rules a pinned piece
/// still gives check. If team `t` has no king, returns `false`.
pub fn is_in_check(b: &Board, t: Team) -> bool {
    match b.king_pos(t) {
        Some(king) => is_cell_attacked(b, king, t.inv()),
        None => false,
    }
}

/// Pseudo-legal move generation
///
/// The generated moves follow the movement patterns, but may leave the own king under attack.
pub mod semilegal {
    use super::{MoveList, MovePush};
    use crate::{board::Board, types::Position, types::Team};

    /// Generates the pseudo-legal moves of the piece on `src` into `dst`
    ///
    /// Nothing is generated if the square is empty.
    pub fn gen_piece_into<P: MovePush>(b: &Board, src: Position, dst: &mut P) {
        let _ = super::do_gen_piece(b, src, dst);
    }

    /// Returns the pseudo-legal moves of the piece on `src`
    pub fn gen_piece(b: &Board, src: Position) -> MoveList {
        let mut res = MoveList::new();
        gen_piece_into(b, src, &mut res);
        res
    }

    /// Generates the pseudo-legal moves of all the pieces of team `t` into `dst`
    pub fn gen_team_into<P: MovePush>(b: &Board, t: Team, dst: &mut P) {
        let _ = super::do_gen_team(b, t, dst);
    }

    /// Returns the pseudo-legal moves of all the pieces of team `t`
    pub fn gen_team(b: &Board, t: Team) -> MoveList {
        let mut res = MoveList::new();
        gen_team_into(b, t, &mut res);
        res
    }
}

/// Legal move generation
///
/// Each pseudo-legal move is simulated on a scratch copy of the board, and kept only if the
/// own king is not under attack afterwards. The source board is never modified.
pub mod legal {
    use super::{LegalFilter, MoveList, MovePush};
    use crate::{board::Board, types::Position, types::Team};

    /// Generates the legal moves of the piece on `src` into `dst`
    pub fn gen_piece_into<P: MovePush>(b: &Board, src: Position, dst: &mut P) {
        let mut p = LegalFilter::new(b, dst);
        let _ = super::do_gen_piece(b, src, &mut p);
    }

    /// Returns the legal moves of the piece on `src`
    pub fn gen_piece(b: &Board, src: Position) -> MoveList {
        let mut res = MoveList::new();
        gen_piece_into(b, src, &mut res);
        res
    }

    /// Generates the legal moves of all the pieces of team `t` into `dst`
    pub fn gen_team_into<P: MovePush>(b: &Board, t: Team, dst: &mut P) {
        let mut p = LegalFilter::new(b, dst);
        let _ = super::do_gen_team(b, t, &mut p);
    }

    /// Returns the legal moves of all the pieces of team `t`
    pub fn gen_team(b: &Board, t: Team) -> MoveList {
        let mut res = MoveList::new();
        gen_team_into(b, t, &mut res);
        res
    }
}

struct LegalFilter<'a, P> {
    checker: Checker,
    inner: &'a mut P,
}

impl<'a, P: MaybeMovePush> LegalFilter<'a, P> {
    fn new(board: &Board, inner: &'a mut P) -> Self {
        Self {
            checker: Checker::new(board),
            inner,
        }
    }
}

impl<'a, P: MaybeMovePush> MaybeMovePush for LegalFilter<'a, P> {
    type Err = P::Err;

    fn push(&mut self, mv: Move) -> Result<(), Self::Err> {
        match self.checker.is_legal(mv) {
            true => self.inner.push(mv),
            false => Ok(()),
        }
    }
}

struct ErrOnFirst;

impl MaybeMovePush for ErrOnFirst {
    type Err = ();

    fn push(&mut self, _mv: Move) -> Result<(), ()> {
        Err(())
    }
}

/// Returns `true` if team `t` has at least one legal move
pub fn has_legal_moves(b: &Board, t: Team) -> bool {
    let mut err_on_first = ErrOnFirst;
    let mut p = LegalFilter::new(b, &mut err_on_first);
    do_gen_team(b, t, &mut p).is_err()
}
