//! # Two-player chess rules engine
//!
//! Maintains a board, generates legal moves per piece, enforces turn order and detects check,
//! checkmate and stalemate. There are no castling, en passant or draw rules other than
//! stalemate.
//!
//! The main entry point is [`Game`], which owns a [`Board`] and the side to move. Lower-level
//! move generation lives in [`movegen`].

pub mod board;
pub mod game;
mod generic;
pub mod legal;
pub mod movegen;
pub mod moves;
pub mod types;

pub use board::Board;
pub use game::{Game, InvalidMoveError};
pub use movegen::MoveList;
pub use moves::{Move, PromotePiece};
pub use types::{Outcome, Piece, PieceKind, Position, Team};
