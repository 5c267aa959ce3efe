//! Moves and their application to the board

use crate::board::Board;
use crate::types::{Piece, PieceKind, Position, PositionParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Target piece for promotion
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PromotePiece {
    Queen = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
}

impl PromotePiece {
    /// All the promotion choices, in the order in which move generation emits them
    pub const ALL: [PromotePiece; 4] = [
        PromotePiece::Queen,
        PromotePiece::Rook,
        PromotePiece::Knight,
        PromotePiece::Bishop,
    ];

    pub fn as_char(&self) -> char {
        match *self {
            PromotePiece::Queen => 'q',
            PromotePiece::Bishop => 'b',
            PromotePiece::Knight => 'n',
            PromotePiece::Rook => 'r',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'q' => Some(PromotePiece::Queen),
            'b' => Some(PromotePiece::Bishop),
            'n' => Some(PromotePiece::Knight),
            'r' => Some(PromotePiece::Rook),
            _ => None,
        }
    }
}

impl From<PromotePiece> for PieceKind {
    #[inline]
    fn from(p: PromotePiece) -> Self {
        match p {
            PromotePiece::Queen => PieceKind::Queen,
            PromotePiece::Bishop => PieceKind::Bishop,
            PromotePiece::Knight => PieceKind::Knight,
            PromotePiece::Rook => PieceKind::Rook,
        }
    }
}

impl TryFrom<PieceKind> for PromotePiece {
    type Error = ();

    #[inline]
    fn try_from(p: PieceKind) -> Result<Self, Self::Error> {
        match p {
            PieceKind::Queen => Ok(PromotePiece::Queen),
            PieceKind::Bishop => Ok(PromotePiece::Bishop),
            PieceKind::Knight => Ok(PromotePiece::Knight),
            PieceKind::Rook => Ok(PromotePiece::Rook),
            PieceKind::King | PieceKind::Pawn => Err(()),
        }
    }
}

/// Chess move
///
/// A move is just a source square, a destination square and an optional promotion piece.
/// It doesn't store which piece moves or whether it captures anything; this is determined by
/// the board the move is applied to.
///
/// Moves can have different degrees of validity:
///
/// - _Pseudo-legal_. The move follows the movement pattern of the piece on its source square
///   and doesn't land on a friendly piece, but it may leave the own king under attack.
///
/// - _Legal_. The move is pseudo-legal and the own king is not under attack after it.
///
/// A move with a promotion piece is only pseudo-legal when a pawn reaches its last row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    src: Position,
    dst: Position,
    promote: Option<PromotePiece>,
}

/// Error parsing a move in coordinate notation
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum MoveParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(PositionParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(PositionParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

impl Move {
    /// Creates a move without promotion
    #[inline]
    pub const fn new(src: Position, dst: Position) -> Move {
        Move {
            src,
            dst,
            promote: None,
        }
    }

    /// Creates a pawn move which promotes to `promote`
    #[inline]
    pub const fn with_promote(src: Position, dst: Position, promote: PromotePiece) -> Move {
        Move {
            src,
            dst,
            promote: Some(promote),
        }
    }

    /// Returns the source square
    #[inline]
    pub const fn src(&self) -> Position {
        self.src
    }

    /// Returns the destination square
    #[inline]
    pub const fn dst(&self) -> Position {
        self.dst
    }

    /// Returns the promotion piece, if any
    #[inline]
    pub const fn promote(&self) -> Option<PromotePiece> {
        self.promote
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = MoveParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if !matches!(s.len(), 4 | 5) || !s.is_ascii() {
            return Err(MoveParseError::BadLength);
        }
        let src = Position::from_str(&s[0..2]).map_err(MoveParseError::BadSrc)?;
        let dst = Position::from_str(&s[2..4]).map_err(MoveParseError::BadDst)?;
        let promote = match s.as_bytes().get(4) {
            Some(&b) => {
                let c = b as char;
                Some(PromotePiece::from_char(c).ok_or(MoveParseError::BadPromote(c))?)
            }
            None => None,
        };
        Ok(Move { src, dst, promote })
    }
}

/// Undo token returned by [`make_move_raw()`]
///
/// Holds everything needed to restore the board with [`unmake_move_raw()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawUndo {
    moved: Option<Piece>,
    captured: Option<Piece>,
}

impl RawUndo {
    /// Returns the piece that stood on the source square before the move
    #[inline]
    pub fn moved(&self) -> Option<Piece> {
        self.moved
    }

    /// Returns the piece that stood on the destination square before the move
    #[inline]
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}

/// Applies the move `mv` on the board `b` without any validation
///
/// The piece on the destination square is removed, the piece from the source square is
/// relocated to the destination square, and replaced by the promotion piece of the same team
/// if `mv` has one. If the source square is empty, the destination square is just cleared.
///
/// The returned token must be passed to [`unmake_move_raw()`] with the same move to revert it.
pub fn make_move_raw(b: &mut Board, mv: Move) -> RawUndo {
    let captured = b.remove_piece(mv.dst);
    let moved = b.remove_piece(mv.src);
    if let Some(piece) = moved {
        let placed = match mv.promote {
            Some(p) => Piece::new(piece.team(), p.into()),
            None => piece,
        };
        b.add_piece(mv.dst, placed);
    }
    RawUndo { moved, captured }
}

/// Reverts the move `mv` on the board `b`
///
/// You may invoke this function only on the board obtained after the corresponding call to
/// [`make_move_raw()`] which returned `u`. In this case, the board is restored exactly.
pub fn unmake_move_raw(b: &mut Board, mv: Move, u: RawUndo) {
    b.remove_piece(mv.dst);
    if let Some(piece) = u.moved {
        b.add_piece(mv.src, piece);
    }
    if let Some(piece) = u.captured {
        b.add_piece(mv.dst, piece);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Team;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_str() {
        let mv = Move::new(pos("e2"), pos("e4"));
        assert_eq!(mv.to_string(), "e2e4");
        assert_eq!(Move::from_str("e2e4"), Ok(mv));

        let mv = Move::with_promote(pos("b7"), pos("a8"), PromotePiece::Knight);
        assert_eq!(mv.to_string(), "b7a8n");
        assert_eq!(Move::from_str("b7a8n"), Ok(mv));
        assert_eq!(mv.promote(), Some(PromotePiece::Knight));

        assert_eq!(Move::from_str("e2e"), Err(MoveParseError::BadLength));
        assert_eq!(
            Move::from_str("e9e4"),
            Err(MoveParseError::BadSrc(PositionParseError::UnexpectedRowChar('9')))
        );
        assert_eq!(
            Move::from_str("e2z4"),
            Err(MoveParseError::BadDst(PositionParseError::UnexpectedColChar('z')))
        );
        assert_eq!(
            Move::from_str("e7e8k"),
            Err(MoveParseError::BadPromote('k'))
        );
    }

    #[test]
    fn test_promote_piece() {
        for p in PromotePiece::ALL {
            let kind = PieceKind::from(p);
            assert_eq!(PromotePiece::try_from(kind), Ok(p));
            assert_eq!(PromotePiece::from_char(p.as_char()), Some(p));
        }
        assert_eq!(PromotePiece::try_from(PieceKind::King), Err(()));
        assert_eq!(PromotePiece::try_from(PieceKind::Pawn), Err(()));
    }

    #[test]
    fn test_make_unmake_capture() {
        let mut b = Board::initial();
        let rook = b.remove_piece(pos("a1")).unwrap();
        b.add_piece(pos("a5"), rook);
        let before = b.clone();

        let mv = Move::new(pos("a5"), pos("a7"));
        let u = make_move_raw(&mut b, mv);
        assert_eq!(u.moved(), Some(rook));
        assert_eq!(u.captured(), Some(Piece::new(Team::Black, PieceKind::Pawn)));
        assert_eq!(b.get_piece(pos("a7")), Some(rook));
        assert_eq!(b.get_piece(pos("a5")), None);

        unmake_move_raw(&mut b, mv, u);
        assert_eq!(b, before);
    }

    #[test]
    fn test_make_unmake_promote() {
        let mut b = Board::from_placement("1n2k3/P7/8/8/8/8/8/4K3").unwrap();
        let before = b.clone();
        for p in PromotePiece::ALL {
            let mv = Move::with_promote(pos("a7"), pos("b8"), p);
            let u = make_move_raw(&mut b, mv);
            assert_eq!(b.get_piece(pos("b8")), Some(Piece::new(Team::White, p.into())));
            assert_eq!(b.get_piece(pos("a7")), None);
            unmake_move_raw(&mut b, mv, u);
            assert_eq!(b, before);
        }
    }

    #[test]
    fn test_make_unmake_empty_src() {
        let mut b = Board::initial();
        let before = b.clone();
        let mv = Move::new(pos("e4"), pos("e7"));
        let u = make_move_raw(&mut b, mv);
        assert_eq!(u.moved(), None);
        assert_eq!(b.get_piece(pos("e7")), None);
        unmake_move_raw(&mut b, mv, u);
        assert_eq!(b, before);
    }
}
