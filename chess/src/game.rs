//! Game state: board, turn and history of moves

use crate::board::Board;
use crate::movegen::{self, MoveList};
use crate::moves::{self, Move, RawUndo};
use crate::types::{Outcome, Position, Team};

use std::hash::{Hash, Hasher};

use log::{debug, trace};
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Error returned by [`Game::make_move()`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum InvalidMoveError {
    /// No piece on the source square
    #[error("no piece on {0}")]
    NoPiece(Position),
    /// The piece on the source square belongs to the side which is not to move
    #[error("it is not {0}'s turn")]
    NotYourTurn(Team),
    /// The move is not in the legal move set of its source square
    #[error("move {0} is not legal")]
    NotLegal(Move),
}

/// Chess game
///
/// Owns the board and tracks whose turn it is. The board is only mutated via [`Game::make_move()`]
/// and [`Game::undo_move()`] (or replaced entirely with [`Game::set_board()`]); all the queries
/// leave it untouched.
///
/// The game has no terminal state. Call [`Game::outcome()`] (or the predicates like
/// [`Game::is_in_checkmate()`]) after each move to decide whether the game is over.
///
/// # Example
///
/// ```
/// # use chessrules::{Game, Move, Outcome, Team};
/// #
/// let mut game = Game::new_initial();
/// for s in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     game.make_move(s.parse().unwrap()).unwrap();
/// }
///
/// assert!(game.is_in_checkmate(Team::White));
/// assert_eq!(game.outcome(), Some(Outcome::Checkmate { winner: Team::Black }));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Game {
    board: Board,
    turn: Team,
    #[cfg_attr(feature = "serde", serde(skip))]
    stack: Vec<(Move, RawUndo)>,
}

impl Game {
    /// Creates a game without pieces, with White to move
    pub fn new() -> Self {
        Self::from_board(Board::empty(), Team::White)
    }

    /// Creates a game from the initial position, with White to move
    pub fn new_initial() -> Self {
        Self::from_board(Board::initial(), Team::White)
    }

    pub fn from_board(board: Board, turn: Team) -> Self {
        Game {
            board,
            turn,
            stack: Vec::new(),
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Replaces the board and clears the move history
    ///
    /// The turn is kept as is.
    pub fn set_board(&mut self, board: Board) {
        debug!("setting board {}", board);
        self.board = board;
        self.stack.clear();
    }

    #[inline]
    pub fn team_turn(&self) -> Team {
        self.turn
    }

    #[inline]
    pub fn set_team_turn(&mut self, turn: Team) {
        self.turn = turn;
    }

    /// Returns the legal moves of the piece on `pos`
    ///
    /// Works for both sides, regardless of whose turn it is. Returns an empty list if the square
    /// is empty.
    pub fn valid_moves(&self, pos: Position) -> MoveList {
        movegen::legal::gen_piece(&self.board, pos)
    }

    /// Returns the legal moves of all the pieces of team `t`
    pub fn legal_moves(&self, t: Team) -> MoveList {
        movegen::legal::gen_team(&self.board, t)
    }

    fn validate(&self, mv: Move) -> Result<(), InvalidMoveError> {
        let piece = self
            .board
            .get_piece(mv.src())
            .ok_or(InvalidMoveError::NoPiece(mv.src()))?;
        if piece.team() != self.turn {
            return Err(InvalidMoveError::NotYourTurn(piece.team()));
        }
        if !self.valid_moves(mv.src()).contains(&mv) {
            return Err(InvalidMoveError::NotLegal(mv));
        }
        Ok(())
    }

    /// Applies the move `mv` and passes the turn to the other side
    ///
    /// The move must be legal for the side to move. Otherwise, an error is returned, and the
    /// game is left unchanged.
    pub fn make_move(&mut self, mv: Move) -> Result<(), InvalidMoveError> {
        if let Err(e) = self.validate(mv) {
            debug!("rejected move {}: {}", mv, e);
            return Err(e);
        }
        let u = moves::make_move_raw(&mut self.board, mv);
        self.stack.push((mv, u));
        self.turn = self.turn.inv();
        trace!("applied move {}, {} to move", mv, self.turn);
        Ok(())
    }

    /// Takes back the last applied move and returns it
    ///
    /// Returns `None` if there are no moves since the board was set.
    pub fn undo_move(&mut self) -> Option<Move> {
        let (mv, u) = self.stack.pop()?;
        moves::unmake_move_raw(&mut self.board, mv, u);
        self.turn = self.turn.inv();
        debug!("undone move {}", mv);
        Some(mv)
    }

    /// Iterates over the moves applied since the board was set, oldest first
    pub fn history(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(m, _)| *m)
    }

    /// Returns `true` if the king of team `t` is under attack
    ///
    /// Returns `false` if the team has no king.
    #[inline]
    pub fn is_in_check(&self, t: Team) -> bool {
        movegen::is_in_check(&self.board, t)
    }

    /// Returns `true` if team `t` is in check and has no legal moves
    pub fn is_in_checkmate(&self, t: Team) -> bool {
        self.is_in_check(t) && !movegen::has_legal_moves(&self.board, t)
    }

    /// Returns `true` if team `t` is not in check, but has no legal moves
    pub fn is_in_stalemate(&self, t: Team) -> bool {
        !self.is_in_check(t) && !movegen::has_legal_moves(&self.board, t)
    }

    /// Returns the pieces that give check to the king of team `t`
    pub fn checkers(&self, t: Team) -> Vec<Position> {
        self.board.checkers(t)
    }

    /// Returns the outcome for the side to move, or `None` if it still has legal moves
    pub fn outcome(&self) -> Option<Outcome> {
        if movegen::has_legal_moves(&self.board, self.turn) {
            return None;
        }
        match self.is_in_check(self.turn) {
            true => Some(Outcome::Checkmate {
                winner: self.turn.inv(),
            }),
            false => Some(Outcome::Stalemate),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq<Self> for Game {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.turn == other.turn
    }
}

impl Eq for Game {}

impl Hash for Game {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.turn.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::PromotePiece;
    use crate::types::{Piece, PieceKind};

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn test_new() {
        let g = Game::new();
        assert_eq!(g.board(), &Board::empty());
        assert_eq!(g.team_turn(), Team::White);
        assert_eq!(g, Game::default());
        assert!(!g.is_in_check(Team::White));

        let g = Game::new_initial();
        assert_eq!(g.board(), &Board::initial());
        assert_eq!(g.legal_moves(Team::White).len(), 20);
        assert_eq!(g.legal_moves(Team::Black).len(), 20);
        assert_eq!(g.outcome(), None);
    }

    #[test]
    fn test_turns() {
        let mut g = Game::new_initial();
        g.make_move(mv("e2e4")).unwrap();
        assert_eq!(g.team_turn(), Team::Black);
        assert_eq!(
            g.make_move(mv("d2d4")),
            Err(InvalidMoveError::NotYourTurn(Team::White))
        );
        g.make_move(mv("e7e5")).unwrap();
        assert_eq!(g.team_turn(), Team::White);

        g.set_team_turn(Team::Black);
        assert_eq!(g.team_turn(), Team::Black);
        g.make_move(mv("d7d6")).unwrap();
        assert_eq!(g.team_turn(), Team::White);
    }

    #[test]
    fn test_invalid() {
        let mut g = Game::new_initial();
        let before = g.clone();
        assert_eq!(
            g.make_move(mv("e4e5")),
            Err(InvalidMoveError::NoPiece(pos("e4")))
        );
        assert_eq!(
            g.make_move(mv("e2e5")),
            Err(InvalidMoveError::NotLegal(mv("e2e5")))
        );
        assert_eq!(
            g.make_move(mv("g1g3")),
            Err(InvalidMoveError::NotLegal(mv("g1g3")))
        );
        assert_eq!(
            g.make_move(mv("e7e5")),
            Err(InvalidMoveError::NotYourTurn(Team::Black))
        );
        assert_eq!(g, before);
        assert_eq!(g.history().count(), 0);
    }

    #[test]
    fn test_valid_moves_any_side() {
        let g = Game::new_initial();
        let ml = g.valid_moves(pos("b8"));
        assert_eq!(ml.len(), 2);
        assert!(ml.contains(&mv("b8c6")));
        assert!(g.valid_moves(pos("e4")).is_empty());
    }

    #[test]
    fn test_fools_mate() {
        let mut g = Game::new_initial();
        for m in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            assert_eq!(g.outcome(), None);
            g.make_move(mv(m)).unwrap();
        }
        assert!(g.is_in_check(Team::White));
        assert!(g.is_in_checkmate(Team::White));
        assert!(!g.is_in_stalemate(Team::White));
        assert!(!g.is_in_check(Team::Black));
        assert_eq!(g.checkers(Team::White), vec![pos("h4")]);
        assert!(g.legal_moves(Team::White).is_empty());
        assert_eq!(
            g.outcome(),
            Some(Outcome::Checkmate {
                winner: Team::Black
            })
        );
    }

    #[test]
    fn test_block_is_not_mate() {
        let b = Board::from_placement("7k/8/8/8/8/3R4/5PPP/r5K1").unwrap();
        let g = Game::from_board(b, Team::White);
        assert!(g.is_in_check(Team::White));
        // The king has no escape squares, but the rook can block or capture
        assert!(g.valid_moves(pos("g1")).is_empty());
        assert!(!g.is_in_checkmate(Team::White));
        assert_eq!(g.outcome(), None);
        let ml = g.legal_moves(Team::White);
        assert_eq!(ml.len(), 1);
        assert_eq!(ml[0], mv("d3d1"));

        let b = Board::from_placement("7k/8/8/8/8/8/5PPP/r5K1").unwrap();
        let g = Game::from_board(b, Team::White);
        assert!(g.is_in_checkmate(Team::White));
    }

    #[test]
    fn test_stalemate() {
        let b = Board::from_placement("k7/8/8/8/8/6q1/8/7K").unwrap();
        let g = Game::from_board(b, Team::White);
        assert!(!g.is_in_check(Team::White));
        assert!(g.is_in_stalemate(Team::White));
        assert!(!g.is_in_checkmate(Team::White));
        assert!(!g.is_in_stalemate(Team::Black));
        assert_eq!(g.outcome(), Some(Outcome::Stalemate));
    }

    #[test]
    fn test_promote() {
        let b = Board::from_placement("4k3/P7/8/8/8/8/8/4K3").unwrap();
        let mut g = Game::from_board(b, Team::White);
        assert_eq!(g.valid_moves(pos("a7")).len(), 4);
        assert_eq!(
            g.make_move(mv("a7a8")),
            Err(InvalidMoveError::NotLegal(mv("a7a8")))
        );
        g.make_move(Move::with_promote(pos("a7"), pos("a8"), PromotePiece::Knight))
            .unwrap();
        assert_eq!(
            g.board().get_piece(pos("a8")),
            Some(Piece::new(Team::White, PieceKind::Knight))
        );
        assert_eq!(g.board().get_piece(pos("a7")), None);
        assert_eq!(g.team_turn(), Team::Black);
    }

    #[test]
    fn test_undo() {
        let mut g = Game::new_initial();
        assert_eq!(g.undo_move(), None);
        for m in ["e2e4", "d7d5", "e4d5", "d8d5"] {
            g.make_move(mv(m)).unwrap();
        }
        assert_eq!(
            g.history().map(|m| m.to_string()).collect::<Vec<_>>(),
            vec!["e2e4", "d7d5", "e4d5", "d8d5"]
        );
        assert_eq!(g.undo_move(), Some(mv("d8d5")));
        assert_eq!(g.team_turn(), Team::Black);
        assert_eq!(
            g.board().get_piece(pos("d5")),
            Some(Piece::new(Team::White, PieceKind::Pawn))
        );
        for _ in 0..3 {
            assert!(g.undo_move().is_some());
        }
        assert_eq!(g, Game::new_initial());
        assert_eq!(g.undo_move(), None);
    }

    #[test]
    fn test_set_board() {
        let mut g = Game::new_initial();
        g.make_move(mv("e2e4")).unwrap();
        g.set_board(Board::initial());
        assert_eq!(g.history().count(), 0);
        assert_eq!(g.board(), &Board::initial());
        assert_eq!(g.team_turn(), Team::Black);
        assert_eq!(g.undo_move(), None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde() {
        let mut g = Game::new_initial();
        g.make_move(mv("g1f3")).unwrap();
        let s = serde_json::to_string(&g).unwrap();
        let g2: Game = serde_json::from_str(&s).unwrap();
        assert_eq!(g, g2);
        assert_eq!(g2.team_turn(), Team::Black);
        assert_eq!(g2.history().count(), 0);
    }
}
