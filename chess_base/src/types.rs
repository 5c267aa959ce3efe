use derive_more::Display;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionParseError {
    #[error("unexpected column char {0:?}")]
    UnexpectedColChar(char),
    #[error("unexpected row char {0:?}")]
    UnexpectedRowChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("position ({row}, {col}) is outside the board")]
pub struct PositionRangeError {
    pub row: u8,
    pub col: u8,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PieceParseError {
    #[error("unexpected piece char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TeamParseError {
    #[error("unexpected team char {0:?}")]
    UnexpectedChar(char),
    #[error("invalid string length")]
    BadLength,
}

/// One of the two sides of the game
#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum Team {
    #[display(fmt = "white")]
    White = 0,
    #[display(fmt = "black")]
    Black = 1,
}

impl Team {
    pub const fn inv(&self) -> Team {
        match *self {
            Team::White => Team::Black,
            Team::Black => Team::White,
        }
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [Team::White, Team::Black].into_iter()
    }

    pub fn as_char(&self) -> char {
        match *self {
            Team::White => 'w',
            Team::Black => 'b',
        }
    }

    pub fn from_char(c: char) -> Option<Team> {
        match c {
            'w' => Some(Team::White),
            'b' => Some(Team::Black),
            _ => None,
        }
    }
}

impl FromStr for Team {
    type Err = TeamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(TeamParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Team::from_char(ch).ok_or(TeamParseError::UnexpectedChar(ch))
    }
}

#[derive(Debug, Display, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
pub enum PieceKind {
    #[display(fmt = "king")]
    King = 0,
    #[display(fmt = "queen")]
    Queen = 1,
    #[display(fmt = "bishop")]
    Bishop = 2,
    #[display(fmt = "knight")]
    Knight = 3,
    #[display(fmt = "rook")]
    Rook = 4,
    #[display(fmt = "pawn")]
    Pawn = 5,
}

impl PieceKind {
    pub const COUNT: usize = 6;

    pub const fn index(&self) -> usize {
        *self as u8 as usize
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        [
            PieceKind::King,
            PieceKind::Queen,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
            PieceKind::Pawn,
        ]
        .into_iter()
    }

    fn as_upper_char(&self) -> u8 {
        b"KQBNRP"[self.index()]
    }
}

/// Chess piece, identified only by its team and kind
///
/// Two pieces with the same team and kind are interchangeable.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    team: Team,
    kind: PieceKind,
}

impl Piece {
    pub const fn new(team: Team, kind: PieceKind) -> Piece {
        Piece { team, kind }
    }

    pub const fn team(&self) -> Team {
        self.team
    }

    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the FEN letter of the piece: uppercase for White, lowercase for Black
    pub fn as_char(&self) -> char {
        let c = self.kind.as_upper_char();
        match self.team {
            Team::White => c as char,
            Team::Black => c.to_ascii_lowercase() as char,
        }
    }

    pub fn from_char(c: char) -> Option<Piece> {
        let team = if c.is_ascii_uppercase() {
            Team::White
        } else {
            Team::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'r' => PieceKind::Rook,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some(Piece::new(team, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Piece {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 1 {
            return Err(PieceParseError::BadLength);
        }
        let ch = s.as_bytes()[0] as char;
        Piece::from_char(ch).ok_or(PieceParseError::UnexpectedChar(ch))
    }
}

/// Square on the board
///
/// Rows and columns are numbered from 1 to 8. Row 1 is White's back row, column 1 is the
/// `a` file. A `Position` is always on the board: out-of-range coordinates are represented
/// by `None` from [`Position::try_new()`] and [`Position::try_shift()`].
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "(u8, u8)", into = "(u8, u8)")
)]
pub struct Position(u8);

impl Position {
    pub const fn new(row: u8, col: u8) -> Position {
        assert!(
            row >= 1 && row <= 8 && col >= 1 && col <= 8,
            "row and column must be between 1 and 8"
        );
        Position((row - 1) * 8 + (col - 1))
    }

    pub fn try_new(row: i8, col: i8) -> Option<Position> {
        if !(1..=8).contains(&row) || !(1..=8).contains(&col) {
            return None;
        }
        Some(Position((row as u8 - 1) * 8 + (col as u8 - 1)))
    }

    pub const fn from_index(val: usize) -> Position {
        assert!(val < 64, "position index must be between 0 and 63");
        Position(val as u8)
    }

    pub const fn row(&self) -> u8 {
        (self.0 >> 3) + 1
    }

    pub const fn col(&self) -> u8 {
        (self.0 & 7) + 1
    }

    /// Returns the row-major index of the square, starting from row 1
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub fn try_shift(self, d_row: i8, d_col: i8) -> Option<Position> {
        Position::try_new(self.row() as i8 + d_row, self.col() as i8 + d_col)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        (0_u8..64_u8).map(Position)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        if self.0 < 64 {
            return write!(f, "Position({}, {})", self.row(), self.col());
        }
        write!(f, "Position(?{:?})", self.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(
            f,
            "{}{}",
            (b'a' + self.col() - 1) as char,
            (b'0' + self.row()) as char
        )
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 2 {
            return Err(PositionParseError::BadLength);
        }
        let bytes = s.as_bytes();
        let col = match bytes[0] {
            b @ b'a'..=b'h' => b - b'a' + 1,
            b => return Err(PositionParseError::UnexpectedColChar(b as char)),
        };
        let row = match bytes[1] {
            b @ b'1'..=b'8' => b - b'0',
            b => return Err(PositionParseError::UnexpectedRowChar(b as char)),
        };
        Ok(Position::new(row, col))
    }
}

impl TryFrom<(u8, u8)> for Position {
    type Error = PositionRangeError;

    fn try_from((row, col): (u8, u8)) -> Result<Self, Self::Error> {
        if !(1..=8).contains(&row) || !(1..=8).contains(&col) {
            return Err(PositionRangeError { row, col });
        }
        Ok(Position::new(row, col))
    }
}

impl From<Position> for (u8, u8) {
    fn from(p: Position) -> Self {
        (p.row(), p.col())
    }
}
