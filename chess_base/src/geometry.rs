use crate::types::{PieceKind, Team};

/// Row and column deltas of the four diagonal directions
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (-1, -1), (1, -1)];

/// Row and column deltas of the four orthogonal directions
pub const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Piece kinds of the back row, from column 1 to column 8
pub const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const fn back_row(t: Team) -> u8 {
    match t {
        Team::White => 1,
        Team::Black => 8,
    }
}

pub const fn pawn_start_row(t: Team) -> u8 {
    match t {
        Team::White => 2,
        Team::Black => 7,
    }
}

pub const fn promote_row(t: Team) -> u8 {
    back_row(t.inv())
}

pub const fn pawn_forward_delta(t: Team) -> i8 {
    match t {
        Team::White => 1,
        Team::Black => -1,
    }
}
