//! # Base types for chessrules
//!
//! This is an auxiliary crate for `chessrules`, which contains the plain value types and board
//! geometry. They don't know anything about boards or move legality.
//!
//! Normally you don't want to use this crate directly. Use `chessrules` instead, which
//! re-exports everything declared here.

pub mod geometry;
pub mod types;

pub use types::{Piece, PieceKind, Position, Team};
