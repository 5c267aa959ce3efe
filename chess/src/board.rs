//! Board and related things

use crate::moves::Move;
use crate::movegen::{self, MoveList};
use crate::types::{Piece, PieceKind, Position, Team};
use chessrules_base::geometry;

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error parsing the piece placement string (i.e. the first part of FEN)
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum PlacementParseError {
    /// Row is too large
    #[error("too many items in row {0}")]
    RowOverflow(u8),
    /// Row is too small
    #[error("not enough items in row {0}")]
    RowUnderflow(u8),
    /// Too many rows
    #[error("too many rows")]
    Overflow,
    /// Not enough rows
    #[error("not enough rows")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Chess board
///
/// The board is a total function from [`Position`] to `Option<Piece>`, backed by an 8x8 array.
/// Each square holds at most one piece. The board knows nothing about whose turn it is; this
/// is tracked by [`Game`](crate::Game).
///
/// # Example
///
/// ```
/// # use chessrules::{Board, Piece, PieceKind, Position, Team};
/// #
/// let mut board = Board::empty();
/// board.add_piece(Position::new(2, 2), Piece::new(Team::White, PieceKind::King));
/// board.add_piece(Position::new(5, 4), Piece::new(Team::Black, PieceKind::King));
///
/// assert_eq!(board.to_string(), "8/8/8/3k4/8/8/1K6/8");
/// assert_eq!(board.get_piece_at(0, 4), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Returns a board without any pieces
    ///
    /// Does the same as [`Board::default()`], except that this function is `const`.
    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Returns a board with the initial position
    pub fn initial() -> Board {
        let mut res = Board::empty();
        res.reset_board();
        res
    }

    /// Parses a board from the piece placement string
    ///
    /// Does the same as [`Board::from_str`]. It is recommended to use this function instead of
    /// `from_str()` for better readability.
    pub fn from_placement(s: &str) -> Result<Board, PlacementParseError> {
        Board::from_str(s)
    }

    /// Puts `piece` on the square `pos`, replacing the previous occupant
    #[inline]
    pub fn add_piece(&mut self, pos: Position, piece: Piece) {
        *self.square_mut(pos) = Some(piece);
    }

    /// Clears the square `pos` and returns its previous contents
    #[inline]
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.square_mut(pos).take()
    }

    /// Returns the contents of the square `pos`
    #[inline]
    pub fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.squares[pos.row() as usize - 1][pos.col() as usize - 1]
    }

    /// Returns the contents of the square in row `row` and column `col`
    ///
    /// Coordinates outside of the board are allowed and always yield `None`.
    #[inline]
    pub fn get_piece_at(&self, row: i8, col: i8) -> Option<Piece> {
        Position::try_new(row, col).and_then(|pos| self.get_piece(pos))
    }

    #[inline]
    fn square_mut(&mut self, pos: Position) -> &mut Option<Piece> {
        &mut self.squares[pos.row() as usize - 1][pos.col() as usize - 1]
    }

    /// Replaces the contents of the board with the initial position
    pub fn reset_board(&mut self) {
        *self = Board::empty();
        for team in Team::iter() {
            let back = geometry::back_row(team);
            let pawns = geometry::pawn_start_row(team);
            for (col, kind) in (1..=8).zip(geometry::BACK_ROW) {
                self.add_piece(Position::new(back, col), Piece::new(team, kind));
                self.add_piece(
                    Position::new(pawns, col),
                    Piece::new(team, PieceKind::Pawn),
                );
            }
        }
    }

    /// Iterates over all the occupied squares, starting from row 1
    pub fn iter(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::iter().filter_map(|pos| self.get_piece(pos).map(|p| (pos, p)))
    }

    /// Iterates over all the pieces of team `t`
    pub fn pieces(&self, t: Team) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.team() == t)
    }

    /// Returns the position of the king of team `t`
    ///
    /// If there are several such kings, the first one in row-major order is returned.
    pub fn king_pos(&self, t: Team) -> Option<Position> {
        let king = Piece::new(t, PieceKind::King);
        self.iter().find(|&(_, p)| p == king).map(|(pos, _)| pos)
    }

    /// Returns the pseudo-legal moves of the piece on `pos`, without any check validation
    ///
    /// Returns an empty list if the square is empty.
    pub fn piece_moves(&self, pos: Position) -> MoveList {
        movegen::semilegal::gen_piece(self, pos)
    }

    /// Returns `true` if the king of team `t` is under attack
    ///
    /// Returns `false` if the team has no king.
    #[inline]
    pub fn is_check(&self, t: Team) -> bool {
        movegen::is_in_check(self, t)
    }

    /// Returns `true` if team `t` has at least one legal move
    #[inline]
    pub fn has_legal_moves(&self, t: Team) -> bool {
        movegen::has_legal_moves(self, t)
    }

    /// Returns all the pieces that give check to the king of team `t`
    pub fn checkers(&self, t: Team) -> Vec<Position> {
        match self.king_pos(t) {
            Some(king) => movegen::cell_attackers(self, king, t.inv()),
            None => Vec::new(),
        }
    }

    /// Returns `true` if `mv` is legal for the piece standing on its source square
    pub fn is_move_legal(&self, mv: Move) -> bool {
        movegen::legal::gen_piece(self, mv.src()).contains(&mv)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

fn parse_rows(s: &str) -> Result<[[Option<Piece>; 8]; 8], PlacementParseError> {
    type Error = PlacementParseError;

    let mut col = 0_usize;
    let mut row = 7_usize;
    let mut rows_seen = 1_usize;
    let mut squares = [[None; 8]; 8];
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if col + add > 8 {
                    return Err(Error::RowOverflow(row as u8 + 1));
                }
                col += add;
            }
            b'/' => {
                if col < 8 {
                    return Err(Error::RowUnderflow(row as u8 + 1));
                }
                if rows_seen == 8 {
                    return Err(Error::Overflow);
                }
                rows_seen += 1;
                row -= 1;
                col = 0;
            }
            _ => {
                if col >= 8 {
                    return Err(Error::RowOverflow(row as u8 + 1));
                }
                let piece = Piece::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?;
                squares[row][col] = Some(piece);
                col += 1;
            }
        };
    }

    if col < 8 {
        return Err(Error::RowUnderflow(row as u8 + 1));
    }
    if rows_seen < 8 {
        return Err(Error::Underflow);
    }

    Ok(squares)
}

impl FromStr for Board {
    type Err = PlacementParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        if !s.is_ascii() {
            let bad = s.chars().find(|c| !c.is_ascii()).unwrap_or('?');
            return Err(PlacementParseError::UnexpectedChar(bad));
        }
        Ok(Board {
            squares: parse_rows(s)?,
        })
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for row in (1..=8_u8).rev() {
            if row != 8 {
                write!(f, "/")?;
            }
            let mut empty = 0;
            for col in 1..=8 {
                let piece = match self.get_piece(Position::new(row, col)) {
                    Some(p) => p,
                    None => {
                        empty += 1;
                        continue;
                    }
                };
                if empty != 0 {
                    write!(f, "{}", (b'0' + empty) as char)?;
                    empty = 0;
                }
                write!(f, "{}", piece)?;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
            }
        }
        Ok(())
    }
}
